//! Stack entities.
//!
//! A stack is a group of same-kind objects represented in the world by one
//! live object plus a count and metadata. Everything here is thin
//! orchestration over the storage engine: size bookkeeping, display label
//! recomputation on mutation, settings lookups, and spawn-condition
//! predicates for spawner stacks. The heavy lifting of capturing, diffing,
//! and rebuilding member state lives in `stacker-storage`.

use stacker_host::Location;

mod block;
mod conditions;
mod display;
mod entity;
mod item;
mod settings;
mod spawner;

pub use block::StackedBlock;
pub use conditions::{ConditionTag, DarknessConditionTag};
pub use display::stack_display_text;
pub use entity::StackedEntity;
pub use item::StackedItem;
pub use settings::{
    BlockStackSettings, EntityStackSettings, ItemStackSettings, SpawnerStackSettings, StackConfig,
    StackSettingsRegistry,
};
pub use spawner::{SpawnerTile, StackedSpawner};

/// Common surface of every stack kind.
pub trait Stack {
    /// Total number of objects in the stack, representative included.
    fn stack_size(&self) -> usize;

    /// Where the stack's representative object is.
    fn location(&self) -> Location;

    /// Recompute the human-readable display label after a mutation.
    fn update_display(&mut self);
}
