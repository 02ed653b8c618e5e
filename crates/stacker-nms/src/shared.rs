//! Save/create logic shared by every adapter version.
//!
//! What varies across host versions is the world-linkage layout and the
//! data version stamp; the rest of an entity's persisted shape is stable.

use std::sync::Arc;

use stacker_host::{EntityKind, LiveEntity, Location};
use stacker_nbt::{NbtCompound, NbtList};

/// Fields the live object supplies directly; they are written by save and
/// stripped back out when a tag becomes live-entity state again.
const LIVE_KEYS: &[&str] = &[
    "Pos",
    "Rotation",
    "Motion",
    "UUID",
    "OnGround",
    "FallDistance",
    "Spigot.ticksLived",
    "WorldUUIDMost",
    "WorldUUIDLeast",
    "Paper.OriginWorld",
];

/// A 128-bit id in the persisted int-array form.
pub(crate) fn uuid_ints(id: u128) -> Vec<i32> {
    vec![
        (id >> 96) as i32,
        (id >> 64) as i32,
        (id >> 32) as i32,
        id as i32,
    ]
}

/// Write the version-independent part of an entity's full state.
pub(crate) fn save_common(entity: &LiveEntity) -> NbtCompound {
    let mut tag = entity.state();
    tag.insert("id", entity.kind().as_str());
    tag.insert("UUID", uuid_ints(entity.id()));

    let location = entity.location();
    tag.insert("Pos", NbtList::Double(vec![location.x, location.y, location.z]));
    tag.insert("Rotation", NbtList::Float(vec![location.yaw, location.pitch]));
    tag.insert("Motion", NbtList::Double(vec![0.0, 0.0, 0.0]));
    tag.insert("OnGround", true);
    tag.insert("FallDistance", 0.0f32);
    tag.insert("Spigot.ticksLived", entity.ticks_lived());
    tag
}

/// Turn a tag back into a live entity at `location`.
///
/// The live fields are dropped from the state compound (the new instance
/// supplies them); with `silent` unset the entity is registered in the
/// location's world.
pub(crate) fn create_common(
    mut tag: NbtCompound,
    location: Location,
    kind: EntityKind,
    silent: bool,
) -> Arc<LiveEntity> {
    for key in LIVE_KEYS {
        tag.remove(key);
    }

    let entity = LiveEntity::with_state(kind, location.clone(), tag);
    if !silent {
        if let Some(world) = location.world() {
            world.spawn(Arc::clone(&entity));
        }
    }
    entity
}
