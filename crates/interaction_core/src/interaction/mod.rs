//! Interactor/interactable state machines and their coordination
//!
//! An [`InteractionWorld`] owns every interactable, one registry per
//! modality. Interactors live outside the world and are ticked by drivers,
//! driver groups and finally the [`InteractionScheduler`]:
//!
//! ```text
//! scheduler ─▶ driver group ─▶ driver ─▶ interactor ─▶ registry ─▶ interactable
//! ```

pub mod driver;
pub mod driver_group;
pub mod filter;
pub mod interactable;
pub mod interactor;
pub mod registry;
pub mod scheduler;
pub mod selector;
pub mod state;
pub mod world;

#[cfg(test)]
mod tests;

pub use driver::{Driver, InteractorDriver};
pub use driver_group::{
    GroupStrategy, InteractorComparer, InteractorDriverGroup, SelectIntentComparer,
};
pub use filter::{FilterChain, InteractableFilter, LayerMaskFilter};
pub use interactable::{Interactable, InteractableData, InteractableKey, InteractableLimits};
pub use interactor::{Interactor, InteractorContext, InteractorId, Modality};
pub use registry::InteractableRegistry;
pub use scheduler::{InteractionScheduler, ScheduleId};
pub use selector::{ButtonSelector, GestureSelector, Selector, SharedSelector};
pub use state::{InteractableState, InteractorState, StateChange};
pub use world::InteractionWorld;
