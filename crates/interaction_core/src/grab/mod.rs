//! Rigid proximity grab
//!
//! A tracked point (controller or hand anchor) grabs the collider it is
//! in, or failing that the one whose surface is closest. Selection comes
//! from a [`Selector`](crate::interaction::Selector), typically a trigger
//! button.

pub mod interactable;
pub mod interactor;

pub use interactable::GrabInteractable;
pub use interactor::{GrabModality, GrabScore};
