//! Stacked living entities.

use std::sync::Arc;

use stacker_host::{LiveEntity, Location};
use stacker_storage::{EntityDataEntry, EntityDataStore, StorageResult};

use crate::settings::{EntityStackSettings, StackConfig};
use crate::{Stack, display};

/// A stack of living entities: one live representative plus the storage
/// engine holding every other member's state.
pub struct StackedEntity {
    entity: Arc<LiveEntity>,
    storage: EntityDataStore,
    settings: Option<EntityStackSettings>,
    config: StackConfig,
}

impl StackedEntity {
    #[must_use]
    pub fn new(
        entity: Arc<LiveEntity>,
        storage: EntityDataStore,
        settings: Option<EntityStackSettings>,
        config: StackConfig,
    ) -> Self {
        let mut stack = Self {
            entity,
            storage,
            settings,
            config,
        };
        stack.update_display();
        stack
    }

    #[must_use]
    pub fn entity(&self) -> &Arc<LiveEntity> {
        &self.entity
    }

    #[must_use]
    pub fn storage(&self) -> &EntityDataStore {
        &self.storage
    }

    /// Merge a live entity into this stack.
    ///
    /// The member's state is captured into the storage and the live object
    /// is removed from its world.
    pub fn increase_stack_size(&mut self, member: &Arc<LiveEntity>) -> StorageResult<()> {
        self.storage.add_last(member)?;
        if let Some(world) = member.location().world() {
            world.remove(member);
        }
        tracing::debug!(size = self.stack_size(), kind = %self.entity.kind(), "merged entity into stack");
        self.update_display();
        Ok(())
    }

    /// Merge previously popped entries into this stack.
    pub fn increase_stack_size_all(&mut self, entries: Vec<EntityDataEntry>) {
        self.storage.add_all_last(entries);
        self.update_display();
    }

    /// The representative died or was removed: promote the next member.
    ///
    /// Pops the front entry, spawns it at the old representative's location,
    /// and points the storage at the new live object. Errors with the
    /// empty-storage kind when no members remain; the owning plugin drops
    /// the stack instead.
    pub fn decrease_stack_size(&mut self) -> StorageResult<Arc<LiveEntity>> {
        let entry = self.storage.pop()?;
        let adapter = Arc::clone(self.storage.adapter());
        let replacement = entry.materialize(
            &*adapter,
            self.entity.location(),
            false,
            self.entity.kind(),
        )?;

        self.storage.update_entity(&replacement);
        self.entity = Arc::clone(&replacement);
        self.update_display();
        Ok(replacement)
    }

    /// Unmerge up to `amount` members, spawning each at the stack's
    /// location. Clamps to the number of stored members.
    pub fn unstack(&mut self, amount: usize) -> StorageResult<Vec<Arc<LiveEntity>>> {
        let adapter = Arc::clone(self.storage.adapter());
        let entries = self.storage.pop_many(amount);

        let mut spawned = Vec::with_capacity(entries.len());
        for entry in &entries {
            spawned.push(entry.materialize(
                &*adapter,
                self.entity.location(),
                false,
                self.entity.kind(),
            )?);
        }

        tracing::debug!(count = spawned.len(), kind = %self.entity.kind(), "unmerged entities from stack");
        self.update_display();
        Ok(spawned)
    }

    #[must_use]
    pub fn settings(&self) -> Option<&EntityStackSettings> {
        self.settings.as_ref()
    }
}

impl Stack for StackedEntity {
    fn stack_size(&self) -> usize {
        self.storage.len() + 1
    }

    fn location(&self) -> Location {
        self.entity.location()
    }

    fn update_display(&mut self) {
        let name = match &self.settings {
            Some(settings)
                if settings.enabled && self.config.entity_display_tags && self.stack_size() > 1 =>
            {
                Some(display::stack_display_text(
                    self.stack_size(),
                    &settings.display_name,
                ))
            }
            _ => None,
        };
        self.entity.set_custom_name(name);
    }
}

#[cfg(test)]
mod tests {
    use stacker_host::{EntityKind, World};
    use stacker_nbt::nbt;
    use stacker_nms::StorageTypeRegistry;
    use stacker_storage::StorageType;

    use super::*;

    fn zombie_settings() -> EntityStackSettings {
        EntityStackSettings {
            enabled: true,
            max_stack_size: 128,
            display_name: "Zombie".into(),
        }
    }

    fn spawn_zombie(world: &Arc<World>, health: f32) -> Arc<LiveEntity> {
        let entity = LiveEntity::with_state(
            EntityKind::Zombie,
            Location::new(world, 0.0, 64.0, 0.0),
            nbt! { "Health" => health },
        );
        world.spawn(Arc::clone(&entity));
        entity
    }

    #[test]
    fn test_merge_and_promote_flow() {
        let registry = StorageTypeRegistry::detect("1.19.3").unwrap();
        let world = World::new("world");
        let representative = spawn_zombie(&world, 20.0);
        let storage = registry
            .create_storage(StorageType::Nbt, &representative)
            .unwrap();

        let mut stack = StackedEntity::new(
            Arc::clone(&representative),
            storage,
            Some(zombie_settings()),
            StackConfig::default(),
        );
        assert_eq!(stack.stack_size(), 1);
        assert_eq!(representative.custom_name(), None);

        let member = spawn_zombie(&world, 5.0);
        stack.increase_stack_size(&member).unwrap();
        assert_eq!(stack.stack_size(), 2);
        assert_eq!(world.entity_count(), 1);
        assert_eq!(representative.custom_name().as_deref(), Some("2x Zombie"));

        // Representative dies; the hurt member takes over.
        world.remove(&representative);
        let replacement = stack.decrease_stack_size().unwrap();
        assert_eq!(stack.stack_size(), 1);
        assert_eq!(world.entity_count(), 1);
        assert!(Arc::ptr_eq(stack.entity(), &replacement));
        assert_eq!(replacement.custom_name(), None);
        assert_eq!(
            replacement.state().get("Health"),
            Some(&stacker_nbt::NbtValue::Float(5.0))
        );
    }

    #[test]
    fn test_unstack_spawns_members() {
        let registry = StorageTypeRegistry::detect("1.19.3").unwrap();
        let world = World::new("world");
        let representative = spawn_zombie(&world, 20.0);
        let storage = registry
            .create_storage(StorageType::Nbt, &representative)
            .unwrap();
        storage.add_clones(4);

        let mut stack = StackedEntity::new(
            Arc::clone(&representative),
            storage,
            Some(zombie_settings()),
            StackConfig::default(),
        );
        assert_eq!(stack.stack_size(), 5);

        let spawned = stack.unstack(2).unwrap();
        assert_eq!(spawned.len(), 2);
        assert_eq!(stack.stack_size(), 3);
        assert_eq!(world.entity_count(), 3);

        // Over-request clamps to what is stored.
        let rest = stack.unstack(100).unwrap();
        assert_eq!(rest.len(), 2);
        assert_eq!(stack.stack_size(), 1);
    }
}
