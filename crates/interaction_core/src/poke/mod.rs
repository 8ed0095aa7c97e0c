//! Poke: pressing a fingertip through a surface
//!
//! A surface is a rectangle in its pose's local XY plane. Its forward
//! axis (+Z) is the press direction, so a point with positive depth has
//! pushed into the surface. Crossing the surface plane in the press
//! direction selects; backing out releases.

pub mod interactable;
pub mod interactor;
pub mod surface;

pub use interactable::PokeInteractable;
pub use interactor::PokeModality;
pub use surface::PokeSurface;
