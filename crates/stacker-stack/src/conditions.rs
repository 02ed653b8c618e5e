//! Spawn-condition predicates for spawner stacks.

use stacker_host::{Block, EntityKind};

use crate::spawner::StackedSpawner;

/// One condition a candidate spawn block must satisfy.
///
/// Conditions are configured as `tag:value,value` strings; `parse_values`
/// receives the value list and reports whether it is well-formed for this
/// tag.
pub trait ConditionTag: Send + Sync {
    /// The configuration tag this condition was built from.
    fn tag(&self) -> &str;

    /// Whether `spawn_block` satisfies this condition for `spawner`.
    fn check(&self, spawner: &StackedSpawner, spawn_block: &Block) -> bool;

    /// Validate the configured values. Called once at parse time.
    fn parse_values(&mut self, values: &[&str]) -> bool;
}

/// Requires the spawn block to be dark enough for the spawned kind.
pub struct DarknessConditionTag {
    tag: String,
}

impl DarknessConditionTag {
    #[must_use]
    pub fn new(tag: impl Into<String>) -> Self {
        Self { tag: tag.into() }
    }
}

impl ConditionTag for DarknessConditionTag {
    fn tag(&self) -> &str {
        &self.tag
    }

    fn check(&self, spawner: &StackedSpawner, spawn_block: &Block) -> bool {
        if spawn_block.material().is_occluding() {
            return false;
        }

        match spawner.spawned_kind() {
            EntityKind::Blaze | EntityKind::Silverfish => spawn_block.light_level() <= 11,
            _ => spawn_block.light_level() <= 7,
        }
    }

    fn parse_values(&mut self, values: &[&str]) -> bool {
        values.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use stacker_host::{Location, Material, World};

    use crate::settings::StackConfig;
    use crate::spawner::SpawnerTile;

    use super::*;

    fn spawner(world: &std::sync::Arc<World>, kind: EntityKind) -> StackedSpawner {
        StackedSpawner::new(
            1,
            Block::new(
                Material::new("minecraft:spawner"),
                Location::new(world, 0.0, 12.0, 0.0),
                0,
            ),
            SpawnerTile::new(kind),
            None,
            StackConfig::default(),
        )
    }

    fn air_block(world: &std::sync::Arc<World>, light_level: u8) -> Block {
        Block::new(
            Material::new("minecraft:air"),
            Location::new(world, 1.0, 12.0, 0.0),
            light_level,
        )
    }

    #[test]
    fn test_darkness_thresholds_per_kind() {
        let world = World::new("world");
        let condition = DarknessConditionTag::new("darkness");

        let zombie_spawner = spawner(&world, EntityKind::Zombie);
        assert!(condition.check(&zombie_spawner, &air_block(&world, 7)));
        assert!(!condition.check(&zombie_spawner, &air_block(&world, 8)));

        // Blazes and silverfish tolerate brighter spawn spots.
        let blaze_spawner = spawner(&world, EntityKind::Blaze);
        assert!(condition.check(&blaze_spawner, &air_block(&world, 11)));
        assert!(!condition.check(&blaze_spawner, &air_block(&world, 12)));
    }

    #[test]
    fn test_occluding_block_never_spawns() {
        let world = World::new("world");
        let condition = DarknessConditionTag::new("darkness");
        let zombie_spawner = spawner(&world, EntityKind::Zombie);

        let stone = Block::new(
            Material::new("minecraft:stone"),
            Location::new(&world, 1.0, 12.0, 0.0),
            0,
        );
        assert!(!condition.check(&zombie_spawner, &stone));
    }

    #[test]
    fn test_darkness_takes_no_values() {
        let mut condition = DarknessConditionTag::new("darkness");
        assert!(condition.parse_values(&[]));
        assert!(!condition.parse_values(&["7"]));
    }

    #[test]
    fn test_all_conditions_gate_spawning() {
        let world = World::new("world");
        let zombie_spawner = spawner(&world, EntityKind::Zombie);
        let conditions: Vec<Box<dyn ConditionTag>> =
            vec![Box::new(DarknessConditionTag::new("darkness"))];

        assert!(zombie_spawner.can_spawn_at(&conditions, &air_block(&world, 0)));
        assert!(!zombie_spawner.can_spawn_at(&conditions, &air_block(&world, 15)));
    }
}
