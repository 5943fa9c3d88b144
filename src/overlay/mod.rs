pub mod geometry;
pub mod messages;
pub mod monitor;
pub mod render;
pub mod service;
pub mod state;
pub mod store;
pub mod surface;

pub use geometry::{resolve_placement, Bounds, Placement, WorkArea};
pub use service::OverlayOwner;
pub use state::{BorderStyle, GuideDirection, OverlayPatch, OverlayState, SizeMode};
pub use store::{StatePersistence, StateStore};
pub use surface::{OverlaySurface, OverlayWindow};
