//! Stacked dropped items.

use std::sync::Arc;

use stacker_host::{LiveEntity, Location, World};

use crate::settings::{ItemStackSettings, StackConfig};
use crate::{Stack, display};

/// A stack of dropped items: a size counter plus one live item entity.
///
/// Item state is fungible, so unlike entity stacks there is no per-member
/// storage; the count is the whole of the bookkeeping.
pub struct StackedItem {
    size: usize,
    item: Arc<LiveEntity>,
    settings: Option<ItemStackSettings>,
    config: StackConfig,
}

impl StackedItem {
    #[must_use]
    pub fn new(
        size: usize,
        item: Arc<LiveEntity>,
        settings: Option<ItemStackSettings>,
        config: StackConfig,
    ) -> Self {
        let mut stack = Self {
            size,
            item,
            settings,
            config,
        };
        stack.update_display();
        stack
    }

    #[must_use]
    pub fn item(&self) -> &Arc<LiveEntity> {
        &self.item
    }

    /// Re-resolve the live item from the world after the host replaced it.
    pub fn update_item(&mut self, world: &World) {
        let Some(found) = world.find(self.item.id()) else {
            return;
        };
        if Arc::ptr_eq(&found, &self.item) {
            return;
        }

        self.item = found;
        self.update_display();
    }

    pub fn increase_stack_size(&mut self, amount: usize, update_display: bool) {
        self.size += amount;
        if update_display {
            self.update_display();
        }
    }

    pub fn set_stack_size(&mut self, size: usize) {
        self.size = size;
        self.update_display();
    }

    #[must_use]
    pub fn settings(&self) -> Option<&ItemStackSettings> {
        self.settings.as_ref()
    }

    /// Which of two stacks the merge should flow into.
    ///
    /// Returns a positive value when this stack should be preferred as the
    /// merge target and a negative value when the other should. Only the
    /// sign carries meaning; the tie-break paths return magnitudes of 1 and
    /// 2 for historical reasons.
    #[must_use]
    pub fn compare_merge_target(&self, other: &StackedItem) -> i32 {
        if std::ptr::eq(self, other) {
            return 0;
        }

        let ticks1 = self.item.ticks_lived();
        let ticks2 = other.item.ticks_lived();

        if self.config.item_merge_into_newest {
            return if ticks1 < ticks2 { 1 } else { -1 };
        }

        if self.size == other.size {
            return if ticks1 > ticks2 { 2 } else { -2 };
        }

        if self.size > other.size { 1 } else { -1 }
    }
}

impl Stack for StackedItem {
    fn stack_size(&self) -> usize {
        self.size
    }

    fn location(&self) -> Location {
        self.item.location()
    }

    fn update_display(&mut self) {
        let name = match &self.settings {
            Some(settings)
                if settings.enabled && self.config.item_display_tags && self.size > 1 =>
            {
                Some(display::stack_display_text(self.size, &settings.display_name))
            }
            _ => None,
        };
        self.item.set_custom_name(name);
    }
}

#[cfg(test)]
mod tests {
    use stacker_host::EntityKind;

    use super::*;

    fn dropped_item(world: &Arc<World>, ticks_lived: i32) -> Arc<LiveEntity> {
        let item = LiveEntity::new(EntityKind::Item, Location::new(world, 0.0, 64.0, 0.0));
        item.set_ticks_lived(ticks_lived);
        item
    }

    fn stack(world: &Arc<World>, size: usize, ticks_lived: i32, config: StackConfig) -> StackedItem {
        StackedItem::new(size, dropped_item(world, ticks_lived), None, config)
    }

    #[test]
    fn test_merge_target_prefers_larger_stack() {
        let world = World::new("world");
        let config = StackConfig::default();
        let large = stack(&world, 32, 100, config.clone());
        let small = stack(&world, 4, 100, config);

        assert!(large.compare_merge_target(&small) > 0);
        assert!(small.compare_merge_target(&large) < 0);
    }

    #[test]
    fn test_merge_target_ties_break_on_age() {
        let world = World::new("world");
        let config = StackConfig::default();
        let older = stack(&world, 8, 200, config.clone());
        let newer = stack(&world, 8, 50, config);

        assert!(older.compare_merge_target(&newer) > 0);
        assert!(newer.compare_merge_target(&older) < 0);
    }

    #[test]
    fn test_merge_into_newest_flag_inverts_preference() {
        let world = World::new("world");
        let config = StackConfig {
            item_merge_into_newest: true,
            ..StackConfig::default()
        };
        let older = stack(&world, 32, 200, config.clone());
        let newer = stack(&world, 4, 50, config);

        // Size no longer matters; the newer item wins.
        assert!(newer.compare_merge_target(&older) > 0);
        assert!(older.compare_merge_target(&newer) < 0);
    }

    #[test]
    fn test_self_comparison_is_zero() {
        let world = World::new("world");
        let stack = stack(&world, 8, 100, StackConfig::default());
        assert_eq!(stack.compare_merge_target(&stack), 0);
    }

    #[test]
    fn test_display_label_follows_size() {
        let world = World::new("world");
        let settings = ItemStackSettings {
            enabled: true,
            max_stack_size: 1024,
            display_name: "Diamond".into(),
        };
        let mut stack = StackedItem::new(
            5,
            dropped_item(&world, 0),
            Some(settings),
            StackConfig::default(),
        );
        assert_eq!(stack.item().custom_name().as_deref(), Some("5x Diamond"));

        stack.set_stack_size(1);
        assert_eq!(stack.item().custom_name(), None);
    }
}
