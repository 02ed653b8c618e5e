//! Storage type registry.
//!
//! One concrete storage encoding exists today (tag-based); the registry
//! keeps the mapping from [`StorageType`] to constructors in one place so
//! alternative encodings can be added without touching call sites.

use std::sync::Arc;

use stacker_host::LiveEntity;
use stacker_storage::{EntityDataStore, StorageError, StorageResult, StorageType, VersionAdapter};

use crate::select_adapter;

type FromEntityFn = fn(Arc<dyn VersionAdapter>, &Arc<LiveEntity>) -> StorageResult<EntityDataStore>;
type FromBytesFn =
    fn(Arc<dyn VersionAdapter>, &Arc<LiveEntity>, &[u8]) -> StorageResult<EntityDataStore>;

/// Constructor pair for one storage encoding.
pub struct StorageCtor {
    pub storage_type: StorageType,
    pub from_entity: FromEntityFn,
    pub from_bytes: FromBytesFn,
}

/// Every storage encoding this build knows how to construct.
pub const STORAGE_CTORS: &[StorageCtor] = &[StorageCtor {
    storage_type: StorageType::Nbt,
    from_entity: EntityDataStore::from_entity,
    from_bytes: EntityDataStore::from_bytes,
}];

/// Produces entity data storages for the host version detected at startup.
pub struct StorageTypeRegistry {
    adapter: Arc<dyn VersionAdapter>,
}

impl StorageTypeRegistry {
    #[must_use]
    pub fn new(adapter: Arc<dyn VersionAdapter>) -> Self {
        Self { adapter }
    }

    /// Build a registry for a detected `major.minor.patch` host version.
    pub fn detect(host_version: &str) -> StorageResult<Self> {
        Ok(Self::new(select_adapter(host_version)?))
    }

    #[must_use]
    pub fn adapter(&self) -> &Arc<dyn VersionAdapter> {
        &self.adapter
    }

    /// Create an empty storage from a stack's first live entity.
    pub fn create_storage(
        &self,
        storage_type: StorageType,
        entity: &Arc<LiveEntity>,
    ) -> StorageResult<EntityDataStore> {
        let ctor = Self::ctor(storage_type)?;
        (ctor.from_entity)(Arc::clone(&self.adapter), entity)
    }

    /// Reconstruct a storage from persisted bytes.
    pub fn load_storage(
        &self,
        storage_type: StorageType,
        entity: &Arc<LiveEntity>,
        bytes: &[u8],
    ) -> StorageResult<EntityDataStore> {
        let ctor = Self::ctor(storage_type)?;
        (ctor.from_bytes)(Arc::clone(&self.adapter), entity, bytes)
    }

    /// Reconstruct a storage from persisted bytes tagged with a raw type id.
    pub fn load_storage_by_id(
        &self,
        type_id: u8,
        entity: &Arc<LiveEntity>,
        bytes: &[u8],
    ) -> StorageResult<EntityDataStore> {
        let storage_type =
            StorageType::from_id(type_id).ok_or(StorageError::UnknownStorageType(type_id))?;
        self.load_storage(storage_type, entity, bytes)
    }

    fn ctor(storage_type: StorageType) -> StorageResult<&'static StorageCtor> {
        STORAGE_CTORS
            .iter()
            .find(|ctor| ctor.storage_type == storage_type)
            .ok_or(StorageError::UnknownStorageType(storage_type.id()))
    }
}
