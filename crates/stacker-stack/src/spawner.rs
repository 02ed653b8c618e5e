//! Stacked mob spawners.

use stacker_host::{Block, EntityKind, Location};

use crate::conditions::ConditionTag;
use crate::settings::{SpawnerStackSettings, StackConfig};
use crate::{Stack, display};

/// The spawner tile state the conditions need: what it spawns.
#[derive(Debug, Clone, Copy)]
pub struct SpawnerTile {
    spawned_kind: EntityKind,
}

impl SpawnerTile {
    #[must_use]
    pub fn new(spawned_kind: EntityKind) -> Self {
        Self { spawned_kind }
    }

    #[must_use]
    pub fn spawned_kind(&self) -> EntityKind {
        self.spawned_kind
    }
}

/// A stack of identical spawners at one position.
pub struct StackedSpawner {
    size: usize,
    block: Block,
    tile: SpawnerTile,
    hologram: Option<String>,
    settings: Option<SpawnerStackSettings>,
    config: StackConfig,
}

impl StackedSpawner {
    #[must_use]
    pub fn new(
        size: usize,
        block: Block,
        tile: SpawnerTile,
        settings: Option<SpawnerStackSettings>,
        config: StackConfig,
    ) -> Self {
        let mut stack = Self {
            size,
            block,
            tile,
            hologram: None,
            settings,
            config,
        };
        stack.update_display();
        stack
    }

    #[must_use]
    pub fn block(&self) -> &Block {
        &self.block
    }

    #[must_use]
    pub fn tile(&self) -> &SpawnerTile {
        &self.tile
    }

    #[must_use]
    pub fn spawned_kind(&self) -> EntityKind {
        self.tile.spawned_kind()
    }

    #[must_use]
    pub fn hologram(&self) -> Option<&str> {
        self.hologram.as_deref()
    }

    pub fn increase_stack_size(&mut self, amount: usize) {
        self.size += amount;
        self.update_display();
    }

    pub fn set_stack_size(&mut self, size: usize) {
        self.size = size;
        self.update_display();
    }

    #[must_use]
    pub fn settings(&self) -> Option<&SpawnerStackSettings> {
        self.settings.as_ref()
    }

    /// Whether every spawn condition passes for the candidate spawn block.
    #[must_use]
    pub fn can_spawn_at(&self, conditions: &[Box<dyn ConditionTag>], spawn_block: &Block) -> bool {
        conditions.iter().all(|condition| condition.check(self, spawn_block))
    }
}

impl Stack for StackedSpawner {
    fn stack_size(&self) -> usize {
        self.size
    }

    fn location(&self) -> Location {
        self.block.location().clone()
    }

    fn update_display(&mut self) {
        self.hologram = match &self.settings {
            Some(settings)
                if settings.enabled && self.config.block_display_tags && self.size > 1 =>
            {
                Some(display::stack_display_text(self.size, &settings.display_name))
            }
            _ => None,
        };
    }
}
