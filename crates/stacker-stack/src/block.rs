//! Stacked blocks.

use stacker_host::{Block, Location};

use crate::settings::{BlockStackSettings, StackConfig};
use crate::{Stack, display};

/// A stack of identical blocks at one position, labeled by a hologram.
pub struct StackedBlock {
    size: usize,
    block: Block,
    hologram: Option<String>,
    settings: Option<BlockStackSettings>,
    config: StackConfig,
}

impl StackedBlock {
    #[must_use]
    pub fn new(
        size: usize,
        block: Block,
        settings: Option<BlockStackSettings>,
        config: StackConfig,
    ) -> Self {
        let mut stack = Self {
            size,
            block,
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

    /// The current hologram text, or `None` when no hologram is shown.
    ///
    /// Single blocks never show a hologram.
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
    pub fn settings(&self) -> Option<&BlockStackSettings> {
        self.settings.as_ref()
    }
}

impl Stack for StackedBlock {
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

#[cfg(test)]
mod tests {
    use stacker_host::{Material, World};

    use super::*;

    fn diamond_block(world: &std::sync::Arc<World>) -> Block {
        Block::new(
            Material::new("minecraft:diamond_block"),
            Location::new(world, 10.0, 64.0, 10.0),
            15,
        )
    }

    fn settings() -> BlockStackSettings {
        BlockStackSettings {
            enabled: true,
            max_stack_size: 2048,
            display_name: "Diamond Block".into(),
        }
    }

    #[test]
    fn test_hologram_tracks_size() {
        let world = World::new("world");
        let mut stack = StackedBlock::new(
            3,
            diamond_block(&world),
            Some(settings()),
            StackConfig::default(),
        );
        assert_eq!(stack.hologram(), Some("3x Diamond Block"));

        stack.increase_stack_size(5);
        assert_eq!(stack.hologram(), Some("8x Diamond Block"));

        stack.set_stack_size(1);
        assert_eq!(stack.hologram(), None);
    }

    #[test]
    fn test_no_hologram_without_settings() {
        let world = World::new("world");
        let stack = StackedBlock::new(10, diamond_block(&world), None, StackConfig::default());
        assert_eq!(stack.hologram(), None);
    }
}
