//! Worlds, locations, blocks, and materials.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Weak};

use parking_lot::Mutex;

use crate::LiveEntity;

/// A world: a named container of live entities.
///
/// Spawning is observable (`spawn_count`) so callers can distinguish a real
/// unmerge from a silent, inspection-only materialization.
pub struct World {
    id: u128,
    name: String,
    entities: Mutex<Vec<Arc<LiveEntity>>>,
    spawn_count: AtomicU64,
}

impl World {
    #[must_use]
    pub fn new(name: impl Into<String>) -> Arc<Self> {
        Arc::new(Self {
            id: rand::random(),
            name: name.into(),
            entities: Mutex::new(Vec::new()),
            spawn_count: AtomicU64::new(0),
        })
    }

    /// The world's unique 128-bit id.
    #[must_use]
    pub fn id(&self) -> u128 {
        self.id
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Register a live entity in this world and count the spawn event.
    pub fn spawn(&self, entity: Arc<LiveEntity>) {
        self.entities.lock().push(entity);
        self.spawn_count.fetch_add(1, Ordering::Relaxed);
    }

    /// Unregister an entity by id. Returns whether it was present.
    pub fn remove(&self, entity: &LiveEntity) -> bool {
        let mut entities = self.entities.lock();
        let before = entities.len();
        entities.retain(|e| e.id() != entity.id());
        entities.len() != before
    }

    /// Look up a registered entity by id.
    #[must_use]
    pub fn find(&self, id: u128) -> Option<Arc<LiveEntity>> {
        self.entities.lock().iter().find(|e| e.id() == id).cloned()
    }

    /// Snapshot of all registered entities.
    #[must_use]
    pub fn entities(&self) -> Vec<Arc<LiveEntity>> {
        self.entities.lock().clone()
    }

    #[must_use]
    pub fn entity_count(&self) -> usize {
        self.entities.lock().len()
    }

    /// Number of spawn events seen by this world.
    #[must_use]
    pub fn spawn_count(&self) -> u64 {
        self.spawn_count.load(Ordering::Relaxed)
    }
}

/// A position within a world.
///
/// Carries a non-owning world handle; like entities, a world may be unloaded
/// out from under a stored location.
#[derive(Debug, Clone)]
pub struct Location {
    world: Weak<World>,
    pub x: f64,
    pub y: f64,
    pub z: f64,
    pub yaw: f32,
    pub pitch: f32,
}

impl Location {
    #[must_use]
    pub fn new(world: &Arc<World>, x: f64, y: f64, z: f64) -> Self {
        Self {
            world: Arc::downgrade(world),
            x,
            y,
            z,
            yaw: 0.0,
            pitch: 0.0,
        }
    }

    #[must_use]
    pub fn with_rotation(mut self, yaw: f32, pitch: f32) -> Self {
        self.yaw = yaw;
        self.pitch = pitch;
        self
    }

    /// Resolve the owning world, if it is still loaded.
    #[must_use]
    pub fn world(&self) -> Option<Arc<World>> {
        self.world.upgrade()
    }
}

/// A block/item material key, e.g. `minecraft:stone`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Material(String);

impl Material {
    #[must_use]
    pub fn new(key: impl Into<String>) -> Self {
        Self(key.into())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Whether this material fully occludes light, per the host's block data.
    #[must_use]
    pub fn is_occluding(&self) -> bool {
        !matches!(
            self.0.as_str(),
            "minecraft:air"
                | "minecraft:cave_air"
                | "minecraft:glass"
                | "minecraft:water"
                | "minecraft:torch"
                | "minecraft:snow"
        )
    }
}

/// One block in a world: material, position, and current light level.
#[derive(Debug, Clone)]
pub struct Block {
    material: Material,
    location: Location,
    light_level: u8,
}

impl Block {
    #[must_use]
    pub fn new(material: Material, location: Location, light_level: u8) -> Self {
        Self {
            material,
            location,
            light_level,
        }
    }

    #[must_use]
    pub fn material(&self) -> &Material {
        &self.material
    }

    #[must_use]
    pub fn location(&self) -> &Location {
        &self.location
    }

    #[must_use]
    pub fn light_level(&self) -> u8 {
        self.light_level
    }
}

#[cfg(test)]
mod tests {
    use crate::EntityKind;

    use super::*;

    #[test]
    fn test_spawn_and_remove() {
        let world = World::new("world");
        let entity = LiveEntity::new(EntityKind::Zombie, Location::new(&world, 0.0, 64.0, 0.0));

        world.spawn(Arc::clone(&entity));
        assert_eq!(world.entity_count(), 1);
        assert_eq!(world.spawn_count(), 1);
        assert!(world.find(entity.id()).is_some());

        assert!(world.remove(&entity));
        assert_eq!(world.entity_count(), 0);
        assert!(!world.remove(&entity));
        // Spawn count is an event counter, not a population count.
        assert_eq!(world.spawn_count(), 1);
    }

    #[test]
    fn test_location_world_expires() {
        let world = World::new("world");
        let location = Location::new(&world, 0.0, 0.0, 0.0);
        assert!(location.world().is_some());

        drop(world);
        assert!(location.world().is_none());
    }
}
