//! # Interaction Core
//!
//! Hover/select state machines for hand and controller interaction.
//!
//! ## Features
//!
//! - **Interactors and Interactables**: per-input state machines competing
//!   for shared targets, with capacity limits and selection transfer
//! - **Driver Groups**: arbitration so only one of several interactors on
//!   the same hand selects at a time
//! - **Modalities**: controller grab, hand grab (pinch and palm) and poke
//! - **Hand Estimators**: pinch with hysteresis, palm grab with a strength
//!   band, per-finger grabbing rules
//! - **Explicit World**: every interactable lives in an
//!   [`InteractionWorld`](interaction::InteractionWorld) passed in by the host
//!
//! ## Quick Start
//!
//! ```rust
//! use interaction_core::prelude::*;
//!
//! let mut world = InteractionWorld::new();
//! let cube = world.spawn(
//!     Pose::from_position(Vec3::new(0.0, 1.0, -0.3)),
//!     GrabInteractable::sphere(0.05).unwrap(),
//! );
//!
//! let controller = SharedPose::tracked(Pose::from_position(Vec3::new(0.0, 1.0, -0.3)));
//! let trigger = ButtonSelector::shared();
//! let grab = GrabModality::interactor(&mut world, controller, trigger.clone());
//!
//! let mut scheduler = InteractionScheduler::new();
//! scheduler.add(0, Driver::new(grab));
//!
//! trigger.borrow_mut().press();
//! scheduler.tick(&mut world, 1.0 / 72.0);
//! let cube = world.interactable::<GrabInteractable>(cube).unwrap();
//! assert_eq!(cube.state(), InteractableState::Select);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all, clippy::pedantic, clippy::nursery)]
#![allow(clippy::module_name_repetitions, clippy::similar_names, clippy::too_many_arguments)]

// Shared infrastructure
pub mod config;
pub mod error;
pub mod events;
pub mod foundation;
pub mod input;
pub mod physics;

// Interaction state machines
pub mod interaction;

// Modalities
pub mod grab;
pub mod hand;
pub mod hand_grab;
pub mod poke;

pub use error::InteractionError;

/// Common imports for interaction users
pub mod prelude {
    pub use crate::{
        config::{Config, InteractionConfig},
        error::InteractionError,
        events::Signal,
        foundation::math::{Pose, Quat, Vec2, Vec3},
        grab::{GrabInteractable, GrabModality},
        hand::{GrabbingRule, HandJointPoses, Handedness},
        hand_grab::{HandGrabInteractable, HandGrabModality},
        input::{ActiveState, HandSource, PoseSource, SharedFlag, SharedHand, SharedPose},
        interaction::{
            ButtonSelector, Driver, GestureSelector, GroupStrategy, Interactable,
            InteractableKey, InteractableLimits, InteractableState, InteractionScheduler,
            InteractionWorld, Interactor, InteractorDriver, InteractorDriverGroup,
            InteractorState, Modality,
        },
        physics::{ColliderShape, InteractionLayers},
        poke::{PokeInteractable, PokeModality, PokeSurface},
    };
}
