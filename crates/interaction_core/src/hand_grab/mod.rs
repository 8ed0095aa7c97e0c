//! Hand grab with snap poses
//!
//! Selection is driven by the hand itself: a grab type (pinch or palm)
//! whose [`GrabbingRule`](crate::hand::GrabbingRule) just became satisfied
//! near an interactable selects it, and the rule's release condition
//! unselects it. While hovering, candidates are ranked by grab strength,
//! then by how well the hand matches the interactable's snap poses.

pub mod interactable;
pub mod interactor;

pub use interactable::{HandGrabInteractable, HandGrabPoint, PoseMatch};
pub use interactor::HandGrabModality;
