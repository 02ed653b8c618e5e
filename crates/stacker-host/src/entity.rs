//! Live entities and entity kinds.

use std::fmt;
use std::sync::Arc;
use std::sync::atomic::{AtomicI32, Ordering};

use parking_lot::Mutex;
use stacker_nbt::NbtCompound;

use crate::Location;

/// The kind of a live entity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntityKind {
    Zombie,
    Skeleton,
    Creeper,
    Blaze,
    Silverfish,
    Cow,
    Sheep,
    Chicken,
    Pig,
    Item,
}

impl EntityKind {
    /// The namespaced key used in persisted entity tags.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Zombie => "minecraft:zombie",
            Self::Skeleton => "minecraft:skeleton",
            Self::Creeper => "minecraft:creeper",
            Self::Blaze => "minecraft:blaze",
            Self::Silverfish => "minecraft:silverfish",
            Self::Cow => "minecraft:cow",
            Self::Sheep => "minecraft:sheep",
            Self::Chicken => "minecraft:chicken",
            Self::Pig => "minecraft:pig",
            Self::Item => "minecraft:item",
        }
    }

    #[must_use]
    pub fn from_key(key: &str) -> Option<Self> {
        Some(match key {
            "minecraft:zombie" => Self::Zombie,
            "minecraft:skeleton" => Self::Skeleton,
            "minecraft:creeper" => Self::Creeper,
            "minecraft:blaze" => Self::Blaze,
            "minecraft:silverfish" => Self::Silverfish,
            "minecraft:cow" => Self::Cow,
            "minecraft:sheep" => Self::Sheep,
            "minecraft:chicken" => Self::Chicken,
            "minecraft:pig" => Self::Pig,
            "minecraft:item" => Self::Item,
            _ => return None,
        })
    }
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One live host entity.
///
/// Holds the fields the host simulates directly (location, lifetime ticks,
/// display name) plus the persistent-state compound that version adapters
/// read from and write into. Everything is interior-mutable because the
/// host owns the object; stacking code only ever sees `Arc<LiveEntity>`.
pub struct LiveEntity {
    id: u128,
    kind: EntityKind,
    location: Mutex<Location>,
    ticks_lived: AtomicI32,
    custom_name: Mutex<Option<String>>,
    state: Mutex<NbtCompound>,
}

impl LiveEntity {
    /// Create a live entity with an empty persistent state.
    #[must_use]
    pub fn new(kind: EntityKind, location: Location) -> Arc<Self> {
        Self::with_state(kind, location, NbtCompound::new())
    }

    /// Create a live entity carrying the given persistent state.
    #[must_use]
    pub fn with_state(kind: EntityKind, location: Location, state: NbtCompound) -> Arc<Self> {
        Arc::new(Self {
            id: rand::random(),
            kind,
            location: Mutex::new(location),
            ticks_lived: AtomicI32::new(0),
            custom_name: Mutex::new(None),
            state: Mutex::new(state),
        })
    }

    /// The entity's unique 128-bit id, regenerated for every live instance.
    #[must_use]
    pub fn id(&self) -> u128 {
        self.id
    }

    #[must_use]
    pub fn kind(&self) -> EntityKind {
        self.kind
    }

    #[must_use]
    pub fn location(&self) -> Location {
        self.location.lock().clone()
    }

    pub fn set_location(&self, location: Location) {
        *self.location.lock() = location;
    }

    #[must_use]
    pub fn ticks_lived(&self) -> i32 {
        self.ticks_lived.load(Ordering::Relaxed)
    }

    pub fn set_ticks_lived(&self, ticks: i32) {
        self.ticks_lived.store(ticks, Ordering::Relaxed);
    }

    #[must_use]
    pub fn custom_name(&self) -> Option<String> {
        self.custom_name.lock().clone()
    }

    pub fn set_custom_name(&self, name: Option<String>) {
        *self.custom_name.lock() = name;
    }

    /// Snapshot of the persistent-state compound.
    #[must_use]
    pub fn state(&self) -> NbtCompound {
        self.state.lock().clone()
    }

    /// Mutate the persistent-state compound in place.
    pub fn update_state(&self, f: impl FnOnce(&mut NbtCompound)) {
        f(&mut self.state.lock());
    }
}

impl fmt::Debug for LiveEntity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LiveEntity")
            .field("id", &format_args!("{:032x}", self.id))
            .field("kind", &self.kind)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use stacker_nbt::nbt;

    use crate::World;

    use super::*;

    #[test]
    fn test_kind_key_round_trip() {
        for kind in [EntityKind::Zombie, EntityKind::Blaze, EntityKind::Item] {
            assert_eq!(EntityKind::from_key(kind.as_str()), Some(kind));
        }
        assert_eq!(EntityKind::from_key("minecraft:warden"), None);
    }

    #[test]
    fn test_ids_are_unique_per_instance() {
        let world = World::new("world");
        let location = Location::new(&world, 0.0, 0.0, 0.0);
        let a = LiveEntity::new(EntityKind::Cow, location.clone());
        let b = LiveEntity::new(EntityKind::Cow, location);
        assert_ne!(a.id(), b.id());
    }

    #[test]
    fn test_state_update() {
        let world = World::new("world");
        let entity = LiveEntity::with_state(
            EntityKind::Sheep,
            Location::new(&world, 0.0, 0.0, 0.0),
            nbt! { "Color" => 5i8 },
        );

        entity.update_state(|state| state.insert("Sheared", true));
        let state = entity.state();
        assert!(state.contains_key("Color"));
        assert!(state.contains_key("Sheared"));
    }
}
