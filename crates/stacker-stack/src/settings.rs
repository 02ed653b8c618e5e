//! Read-only stack settings lookups.
//!
//! Settings are consumed, never loaded: the host plugin's configuration
//! layer deserializes them (serde) and hands the registry to the stacking
//! code fully built.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use stacker_host::{EntityKind, Material};

fn default_true() -> bool {
    true
}

/// Per-entity-kind stacking settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EntityStackSettings {
    #[serde(default = "default_true")]
    pub enabled: bool,
    pub max_stack_size: usize,
    pub display_name: String,
}

/// Per-material item stacking settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ItemStackSettings {
    #[serde(default = "default_true")]
    pub enabled: bool,
    pub max_stack_size: usize,
    pub display_name: String,
}

/// Per-material block stacking settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BlockStackSettings {
    #[serde(default = "default_true")]
    pub enabled: bool,
    pub max_stack_size: usize,
    pub display_name: String,
}

/// Per-spawned-kind spawner stacking settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SpawnerStackSettings {
    #[serde(default = "default_true")]
    pub enabled: bool,
    pub max_stack_size: usize,
    pub display_name: String,
}

/// Global display and merge flags.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct StackConfig {
    pub entity_display_tags: bool,
    pub item_display_tags: bool,
    pub block_display_tags: bool,
    pub item_merge_into_newest: bool,
}

impl Default for StackConfig {
    fn default() -> Self {
        Self {
            entity_display_tags: true,
            item_display_tags: true,
            block_display_tags: true,
            item_merge_into_newest: false,
        }
    }
}

/// All stack settings, keyed by kind or material.
#[derive(Debug, Default)]
pub struct StackSettingsRegistry {
    entities: HashMap<EntityKind, EntityStackSettings>,
    items: HashMap<Material, ItemStackSettings>,
    blocks: HashMap<Material, BlockStackSettings>,
    spawners: HashMap<EntityKind, SpawnerStackSettings>,
}

impl StackSettingsRegistry {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert_entity(&mut self, kind: EntityKind, settings: EntityStackSettings) {
        self.entities.insert(kind, settings);
    }

    pub fn insert_item(&mut self, material: Material, settings: ItemStackSettings) {
        self.items.insert(material, settings);
    }

    pub fn insert_block(&mut self, material: Material, settings: BlockStackSettings) {
        self.blocks.insert(material, settings);
    }

    pub fn insert_spawner(&mut self, kind: EntityKind, settings: SpawnerStackSettings) {
        self.spawners.insert(kind, settings);
    }

    #[must_use]
    pub fn entity_settings(&self, kind: EntityKind) -> Option<&EntityStackSettings> {
        self.entities.get(&kind)
    }

    #[must_use]
    pub fn item_settings(&self, material: &Material) -> Option<&ItemStackSettings> {
        self.items.get(material)
    }

    #[must_use]
    pub fn block_settings(&self, material: &Material) -> Option<&BlockStackSettings> {
        self.blocks.get(material)
    }

    #[must_use]
    pub fn spawner_settings(&self, kind: EntityKind) -> Option<&SpawnerStackSettings> {
        self.spawners.get(&kind)
    }
}
