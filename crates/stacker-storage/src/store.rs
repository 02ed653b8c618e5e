//! The stacked entity data engine.

use std::collections::VecDeque;
use std::io::Cursor;
use std::sync::{Arc, Weak};

use byteorder::{BigEndian, ReadBytesExt, WriteBytesExt};
use parking_lot::{Mutex, RwLock};
use stacker_host::LiveEntity;
use stacker_nbt::{NbtCompound, NbtError, NbtList, NbtValue};

use crate::{EntityDataEntry, StorageError, StorageResult, StorageType, VersionAdapter};

/// Top-level fields that are meaningless or harmful to persist per member.
/// The representative entity supplies them at render time.
const TRANSIENT_KEYS: &[&str] = &[
    "UUID",
    "Pos",
    "Rotation",
    "WorldUUIDMost",
    "WorldUUIDLeast",
    "Motion",
    "OnGround",
    "FallDistance",
    "Leash",
    "AngryAt",
    "Spigot.ticksLived",
    "Paper.OriginWorld",
    "Paper.Origin",
];

const PLUGIN_VALUES_KEY: &str = "BukkitValues";
const STACKED_DATA_KEY: &str = "stacker:stacked_entity_data";

const ATTRIBUTES_KEY: &str = "Attributes";
const MODIFIERS_KEY: &str = "Modifiers";
const UUID_KEY: &str = "UUID";
/// Modifier applied once at natural spawn; persisting it would compound
/// across repeated rebuilds.
const RANDOM_SPAWN_BONUS: &str = "Random spawn bonus";

/// Stores large amounts of entities of the same type in a small data
/// footprint: one base snapshot plus one sparse diff per stacked member.
///
/// Structural mutation is confined to the simulation thread by convention;
/// the diff sequence is synchronized so background persistence can snapshot
/// (`serialize`, `get_all`) concurrently with main-thread mutation.
pub struct EntityDataStore {
    storage_type: StorageType,
    adapter: Arc<dyn VersionAdapter>,
    entity: RwLock<Weak<LiveEntity>>,
    base: NbtCompound,
    data: Mutex<VecDeque<NbtCompound>>,
}

impl std::fmt::Debug for EntityDataStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EntityDataStore")
            .field("storage_type", &self.storage_type)
            .field("adapter", &self.adapter.name())
            .field("entity", &self.entity)
            .field("base", &self.base)
            .field("data", &self.data)
            .finish()
    }
}

impl EntityDataStore {
    /// Create a storage from the stack's first live entity.
    ///
    /// The entity's full state becomes the base template, with transient
    /// fields and attribute UUIDs stripped.
    pub fn from_entity(
        adapter: Arc<dyn VersionAdapter>,
        entity: &Arc<LiveEntity>,
    ) -> StorageResult<Self> {
        let mut base = adapter.save_entity_to_tag(entity)?;
        strip_transient(&mut base);
        strip_attribute_uuids(&mut base);

        Ok(Self {
            storage_type: StorageType::Nbt,
            adapter,
            entity: RwLock::new(Arc::downgrade(entity)),
            base,
            data: Mutex::new(VecDeque::new()),
        })
    }

    /// Reconstruct a storage from persisted bytes, the exact inverse of
    /// [`Self::serialize`]: base tag, i32 diff count, that many diff tags.
    pub fn from_bytes(
        adapter: Arc<dyn VersionAdapter>,
        entity: &Arc<LiveEntity>,
        bytes: &[u8],
    ) -> StorageResult<Self> {
        let mut reader = Cursor::new(bytes);
        let base = NbtCompound::read_named(&mut reader)?;
        let count = reader.read_i32::<BigEndian>()?;
        if count < 0 {
            return Err(NbtError::InvalidLength(count).into());
        }

        let mut data = VecDeque::with_capacity(count as usize);
        for _ in 0..count {
            data.push_back(NbtCompound::read_named(&mut reader)?);
        }

        Ok(Self {
            storage_type: StorageType::Nbt,
            adapter,
            entity: RwLock::new(Arc::downgrade(entity)),
            base,
            data: Mutex::new(data),
        })
    }

    #[must_use]
    pub fn storage_type(&self) -> StorageType {
        self.storage_type
    }

    #[must_use]
    pub fn adapter(&self) -> &Arc<dyn VersionAdapter> {
        &self.adapter
    }

    /// The live representative, if it is still resolvable.
    #[must_use]
    pub fn entity(&self) -> Option<Arc<LiveEntity>> {
        self.entity.read().upgrade()
    }

    /// Point the storage at a new representative entity.
    pub fn update_entity(&self, entity: &Arc<LiveEntity>) {
        *self.entity.write() = Arc::downgrade(entity);
    }

    /// Add a new entry to the front.
    pub fn add_first(&self, entity: &LiveEntity) -> StorageResult<()> {
        let tag = self.capture(entity)?;
        self.data.lock().push_front(tag);
        Ok(())
    }

    /// Add a new entry to the end.
    pub fn add_last(&self, entity: &LiveEntity) -> StorageResult<()> {
        let tag = self.capture(entity)?;
        self.data.lock().push_back(tag);
        Ok(())
    }

    /// Add all given entries to the front, processing them in caller order.
    ///
    /// Each entry is inserted at the front in turn, so a batch ends up in
    /// reverse order relative to the input. Entry tags are stripped and
    /// diffed against this storage's base before insertion, never inserted
    /// verbatim, since entries may originate from another storage with a
    /// different base.
    pub fn add_all_first(&self, entries: Vec<EntityDataEntry>) {
        let mut data = self.data.lock();
        for entry in entries {
            data.push_front(self.prepare(entry.into_tag()));
        }
    }

    /// Add all given entries to the end, processing them in caller order.
    ///
    /// Entry tags are stripped and diffed exactly as in [`Self::add_all_first`].
    pub fn add_all_last(&self, entries: Vec<EntityDataEntry>) {
        let mut data = self.data.lock();
        for entry in entries {
            data.push_back(self.prepare(entry.into_tag()));
        }
    }

    /// Append `amount` exact copies of the base as all-default members.
    pub fn add_clones(&self, amount: usize) {
        let mut data = self.data.lock();
        for _ in 0..amount {
            data.push_back(self.base.clone());
        }
    }

    /// Rebuild the entry at the front without removing it.
    pub fn peek(&self) -> StorageResult<EntityDataEntry> {
        let data = self.data.lock();
        let front = data.front().ok_or(StorageError::Empty)?;
        Ok(EntityDataEntry::new(self.rebuild(front)))
    }

    /// Remove and rebuild the entry at the front.
    pub fn pop(&self) -> StorageResult<EntityDataEntry> {
        let front = self.data.lock().pop_front().ok_or(StorageError::Empty)?;
        Ok(EntityDataEntry::new(self.rebuild(&front)))
    }

    /// Remove and rebuild up to `amount` entries from the front.
    ///
    /// Clamps to the current size; an over-request returns whatever is
    /// available, possibly an empty list, and is not an error.
    pub fn pop_many(&self, amount: usize) -> Vec<EntityDataEntry> {
        let drained: Vec<NbtCompound> = {
            let mut data = self.data.lock();
            let amount = amount.min(data.len());
            data.drain(..amount).collect()
        };

        tracing::debug!(requested = amount, popped = drained.len(), "popping stack entries");
        drained
            .iter()
            .map(|tag| EntityDataEntry::new(self.rebuild(tag)))
            .collect()
    }

    /// The number of stored entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.data.lock().len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.data.lock().is_empty()
    }

    /// Rebuild every entry from a consistent point-in-time snapshot.
    ///
    /// Later concurrent mutation does not retroactively change the returned
    /// list.
    #[must_use]
    pub fn get_all(&self) -> Vec<EntityDataEntry> {
        let snapshot: Vec<NbtCompound> = self.data.lock().iter().cloned().collect();
        snapshot
            .iter()
            .map(|tag| EntityDataEntry::new(self.rebuild(tag)))
            .collect()
    }

    /// Serialize the base plus all diffs into a byte buffer.
    pub fn serialize(&self) -> StorageResult<Vec<u8>> {
        self.serialize_capped(usize::MAX)
    }

    /// Serialize the base plus the first `min(max_amount, len)` diffs.
    ///
    /// Layout: base tag, big-endian i32 diff count, diff tags front to back.
    pub fn serialize_capped(&self, max_amount: usize) -> StorageResult<Vec<u8>> {
        let snapshot: Vec<NbtCompound> = {
            let data = self.data.lock();
            data.iter().take(max_amount.min(data.len())).cloned().collect()
        };

        let mut buf = Vec::new();
        self.base.write_named(&mut buf)?;
        buf.write_i32::<BigEndian>(snapshot.len() as i32)?;
        for tag in &snapshot {
            tag.write_named(&mut buf)?;
        }
        Ok(buf)
    }

    /// Call `consumer` with a transient live entity for each entry.
    ///
    /// No-op when the representative entity is unresolvable.
    pub fn for_each(&self, consumer: impl FnMut(Arc<LiveEntity>)) -> StorageResult<()> {
        self.for_each_capped(usize::MAX, consumer)
    }

    /// Call `consumer` with a transient live entity for each of the first
    /// `count` entries, front to back.
    ///
    /// Entities are materialized silently (no spawn side effects). No-op
    /// when the representative entity is unresolvable.
    pub fn for_each_capped(
        &self,
        count: usize,
        mut consumer: impl FnMut(Arc<LiveEntity>),
    ) -> StorageResult<()> {
        let Some(entity) = self.entity() else {
            return Ok(());
        };

        let snapshot: Vec<NbtCompound> = {
            let data = self.data.lock();
            data.iter().take(count.min(data.len())).cloned().collect()
        };

        for tag in &snapshot {
            let live = EntityDataEntry::new(self.rebuild(tag)).materialize(
                &*self.adapter,
                entity.location(),
                true,
                entity.kind(),
            )?;
            consumer(live);
        }
        Ok(())
    }

    /// Materialize every entry, remove those where `predicate` returns true,
    /// and return the removed live entities in original order.
    ///
    /// Non-matching materializations are discarded, not reused. Returns an
    /// empty list without mutating when the representative entity is
    /// unresolvable. No mutation takes place if an entry fails to
    /// materialize.
    pub fn remove_if(
        &self,
        mut predicate: impl FnMut(&LiveEntity) -> bool,
    ) -> StorageResult<Vec<Arc<LiveEntity>>> {
        let Some(entity) = self.entity() else {
            return Ok(Vec::new());
        };

        let snapshot: Vec<NbtCompound> = self.data.lock().iter().cloned().collect();
        let mut removed = Vec::new();
        let mut kept = Vec::with_capacity(snapshot.len());
        for tag in snapshot {
            let live = EntityDataEntry::new(self.rebuild(&tag)).materialize(
                &*self.adapter,
                entity.location(),
                true,
                entity.kind(),
            )?;
            if predicate(&live) {
                removed.push(live);
            } else {
                kept.push(tag);
            }
        }

        *self.data.lock() = kept.into();
        Ok(removed)
    }

    /// Capture a live entity's state as a diff against the base.
    fn capture(&self, entity: &LiveEntity) -> StorageResult<NbtCompound> {
        let tag = self.adapter.save_entity_to_tag(entity)?;
        Ok(self.prepare(tag))
    }

    /// Strip transient fields and attribute UUIDs, then drop every
    /// top-level key whose value is structurally equal to the base's.
    fn prepare(&self, mut tag: NbtCompound) -> NbtCompound {
        strip_transient(&mut tag);
        strip_attribute_uuids(&mut tag);
        self.remove_duplicates(&mut tag);
        tag
    }

    fn remove_duplicates(&self, tag: &mut NbtCompound) {
        let duplicates: Vec<String> = tag
            .iter()
            .filter(|&(key, value)| self.base.get(key) == Some(value))
            .map(|(key, _)| key.to_owned())
            .collect();
        for key in &duplicates {
            tag.remove(key);
        }
    }

    /// Overlay a diff onto a copy of the base and refill stripped fields.
    fn rebuild(&self, diff: &NbtCompound) -> NbtCompound {
        let mut merged = self.base.clone();
        merged.merge(diff);
        fill_attribute_uuids(&mut merged);
        merged
    }
}

fn strip_transient(tag: &mut NbtCompound) {
    for key in TRANSIENT_KEYS {
        tag.remove(key);
    }
    if let Some(plugin_values) = tag.get_compound_mut(PLUGIN_VALUES_KEY) {
        plugin_values.remove(STACKED_DATA_KEY);
    }
}

/// Remove every attribute and attribute-modifier UUID, and drop randomized
/// spawn-bonus modifiers entirely so they cannot compound across rebuilds.
fn strip_attribute_uuids(tag: &mut NbtCompound) {
    let Some(attributes) = tag
        .get_list_mut(ATTRIBUTES_KEY)
        .and_then(NbtList::as_compounds_mut)
    else {
        return;
    };

    for attribute in attributes {
        attribute.remove(UUID_KEY);
        let Some(modifiers) = attribute
            .get_list_mut(MODIFIERS_KEY)
            .and_then(NbtList::as_compounds_mut)
        else {
            continue;
        };

        modifiers.retain(|modifier| modifier.get_string("Name") != Some(RANDOM_SPAWN_BONUS));
        for modifier in modifiers {
            modifier.remove(UUID_KEY);
        }
    }
}

/// Regenerate a fresh random UUID for every attribute and modifier.
///
/// Identifiers must be unique per live instance, so they are never reused
/// across rebuilds. An attribute whose modifier list is empty has the list
/// key removed entirely to match a clean baseline shape.
fn fill_attribute_uuids(tag: &mut NbtCompound) {
    let Some(attributes) = tag
        .get_list_mut(ATTRIBUTES_KEY)
        .and_then(NbtList::as_compounds_mut)
    else {
        return;
    };

    for attribute in attributes {
        attribute.insert(UUID_KEY, random_uuid());
        let mut remove_modifiers = false;
        if let Some(modifiers) = attribute
            .get_list_mut(MODIFIERS_KEY)
            .and_then(NbtList::as_compounds_mut)
        {
            for modifier in modifiers.iter_mut() {
                modifier.insert(UUID_KEY, random_uuid());
            }
            remove_modifiers = modifiers.is_empty();
        }
        if remove_modifiers {
            attribute.remove(MODIFIERS_KEY);
        }
    }
}

/// A random UUID in the int-array form used by persisted tags.
fn random_uuid() -> NbtValue {
    let bits: u128 = rand::random();
    NbtValue::IntArray(vec![
        (bits >> 96) as i32,
        (bits >> 64) as i32,
        (bits >> 32) as i32,
        bits as i32,
    ])
}
