//! Host game engine facade.
//!
//! The stacking core treats the host engine as an external collaborator: it
//! needs worlds to spawn into, locations, and live entities whose persistent
//! state can be read and written by a version adapter. The types here are
//! that seam, kept deliberately thin: no physics or block simulation.
//!
//! Live entities are shared as `Arc<LiveEntity>`; the storage engine holds
//! only a `Weak` handle, so an entity removed from its world and dropped by
//! the host becomes unresolvable without notice. Consumers must treat failed
//! upgrades as a valid, non-exceptional state.

mod entity;
mod world;

pub use entity::{EntityKind, LiveEntity};
pub use world::{Block, Location, Material, World};
