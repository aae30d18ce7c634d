//! Per-session identifier allocation for exchange-format export.
//!
//! Every registered category owns a counter. An entity's kind resolves to
//! its own category or, failing that, to the nearest generalization that has
//! one. Assigned ids are remembered per entity, one per sub-component, so
//! re-requesting an id is side-effect free.
//!
//! Numbering follows access order. The allocator is not meant to be shared
//! between threads or driven out of order.

use std::collections::HashMap;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use tessera_foundation::{Category, Entity, Error, ErrorContext, Identity, Result};
use tessera_storage::IdMappingTable;
use tracing::{debug, trace, warn};

use crate::config::AllocatorConfig;
use crate::list;

/// One sub-component of an entity: the entity's identity plus the
/// sub-component index.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct SubComponentRef {
    /// The owning entity.
    pub identity: Identity,
    /// Index of the sub-component within the entity.
    pub index: usize,
}

/// Entities written as one or more exchange-format records.
///
/// A meshed panel, for example, writes one element per face.
pub trait SubComponents: Entity {
    /// Number of records this entity writes.
    fn sub_component_count(&self) -> usize {
        1
    }
}

/// Hands out exchange-format ids for one export or import session.
#[derive(Clone, Debug)]
pub struct IdAllocator {
    config: AllocatorConfig,
    /// Next value per registered category.
    counters: HashMap<Category, u32>,
    /// Identity -> handle into `lists`, partitioned by category.
    ids: IdMappingTable<Identity, usize>,
    /// Assigned ids per handle, in sub-component order.
    lists: Vec<Vec<u32>>,
    /// Sub-component -> id, partitioned by category.
    sub_ids: IdMappingTable<SubComponentRef, u32>,
    /// Current sub-component index for [`current_id`](Self::current_id).
    cursor: usize,
}

impl Default for IdAllocator {
    fn default() -> Self {
        Self::new(AllocatorConfig::default())
    }
}

impl IdAllocator {
    /// Creates an allocator with every configured category at its start
    /// value.
    #[must_use]
    pub fn new(config: AllocatorConfig) -> Self {
        let counters = config
            .categories
            .iter()
            .map(|category| (category.clone(), config.start_value))
            .collect();
        let ids = IdMappingTable::new(&config.first_id_name, &config.second_id_name);
        let sub_ids = IdMappingTable::new(&config.first_id_name, &config.second_id_name);
        Self {
            config,
            counters,
            ids,
            lists: Vec::new(),
            sub_ids,
            cursor: 0,
        }
    }

    /// The configuration this allocator was built from.
    #[must_use]
    pub fn config(&self) -> &AllocatorConfig {
        &self.config
    }

    /// Returns true if `kind` owns a counter directly.
    #[must_use]
    pub fn is_registered(&self, kind: &Category) -> bool {
        self.counters.contains_key(kind)
    }

    /// Identity to id-list handle, partitioned by resolved category. Use
    /// [`ids_of`](Self::ids_of) for the ids themselves.
    #[must_use]
    pub fn ids(&self) -> &IdMappingTable<Identity, usize> {
        &self.ids
    }

    // =========================================================================
    // Category resolution and counters
    // =========================================================================

    /// The category whose counter numbers `kind`: `kind` itself if
    /// registered, otherwise its nearest registered generalization.
    ///
    /// # Errors
    ///
    /// Returns an unregistered category error if neither `kind` nor any of
    /// its generalizations is registered.
    pub fn resolve_category(&self, kind: &Category) -> Result<Category> {
        let found = self
            .config
            .hierarchy
            .closest_registered(kind, |k| self.counters.contains_key(k));
        let Some((category, steps)) = found else {
            warn!(%kind, "no numbering category registered");
            return Err(Error::unregistered_category(kind.clone()));
        };
        if steps > 0 {
            trace!(%kind, %category, steps, "numbering through ancestor category");
        }
        Ok(category)
    }

    /// The value the next allocation for `kind` would return.
    ///
    /// # Errors
    ///
    /// Returns an unregistered category error if `kind` cannot be resolved.
    pub fn peek_next(&self, kind: &Category) -> Result<u32> {
        let category = self.resolve_category(kind)?;
        self.counters
            .get(&category)
            .copied()
            .ok_or_else(|| Error::internal(format!("no counter for resolved category {category}")))
    }

    fn allocate(&mut self, kind: &Category) -> Result<(Category, u32)> {
        let category = self.resolve_category(kind)?;
        let Some(counter) = self.counters.get_mut(&category) else {
            return Err(Error::internal(format!(
                "no counter for resolved category {category}"
            )));
        };
        let id = *counter;
        *counter = id.checked_add(1).ok_or_else(|| {
            Error::internal(format!("identifier counter for {category} is exhausted"))
        })?;
        if category == *kind {
            debug!(%category, id, "allocated identifier");
        } else {
            debug!(%kind, %category, id, "allocated identifier from ancestor category");
        }
        Ok((category, id))
    }

    /// Consumes and returns the next id for `kind`.
    ///
    /// The id is not recorded against any entity.
    ///
    /// # Errors
    ///
    /// Returns an unregistered category error if `kind` cannot be resolved.
    pub fn next_id_for_kind(&mut self, kind: &Category) -> Result<u32> {
        self.allocate(kind).map(|(_, id)| id)
    }

    /// Consumes and returns the next id for the kind of `entity`.
    ///
    /// # Errors
    ///
    /// Returns an unregistered category error if the kind cannot be resolved.
    pub fn next_id<E: Entity + ?Sized>(&mut self, entity: &E) -> Result<u32> {
        self.next_id_for_kind(&entity.kind())
    }

    // =========================================================================
    // Resolution
    // =========================================================================

    /// The exchange-format id of sub-component `sub_index` of `entity`.
    ///
    /// The global and local coordinate-system references resolve to their
    /// configured tokens and never consume a counter. Any other entity gets
    /// a fresh id the first time an index past its assigned list is
    /// requested; later requests return the same id. Ids are appended in
    /// request order, so callers should request indices in ascending order.
    ///
    /// # Errors
    ///
    /// Returns an unregistered category error if the entity's kind cannot be
    /// resolved. Nothing is recorded in that case.
    pub fn resolved_id<E: Entity + ?Sized>(&mut self, entity: &E, sub_index: usize) -> Result<String> {
        let identity = entity.identity();
        if identity == Identity::GLOBAL {
            return Ok(self.config.global_token.clone());
        }
        if identity == Identity::LOCAL {
            return Ok(self.config.local_token.clone());
        }

        let kind = entity.kind();
        let category = self
            .resolve_category(&kind)
            .map_err(|e| e.with_context(resolution_context(entity, sub_index)))?;

        let handle = self.handle(&category, identity);
        let assigned = handle
            .and_then(|h| self.lists.get(h))
            .map(Vec::as_slice)
            .unwrap_or_default();
        if let Some(&id) = assigned.get(sub_index) {
            trace!(%identity, sub_index, id, "identifier already assigned");
            return Ok(id.to_string());
        }
        let index = assigned.len();
        if sub_index > index {
            warn!(
                %identity,
                sub_index,
                assigned = index,
                "sub-component requested out of order; id follows access order"
            );
        }

        let (category, id) = self
            .allocate(&kind)
            .map_err(|e| e.with_context(resolution_context(entity, sub_index)))?;
        let handle = handle.unwrap_or_else(|| {
            self.lists.push(Vec::new());
            let handle = self.lists.len() - 1;
            self.ids.add_in(category.name(), identity, handle);
            handle
        });
        self.lists[handle].push(id);
        self.sub_ids
            .add_in(category.name(), SubComponentRef { identity, index }, id);
        Ok(id.to_string())
    }

    fn handle(&self, category: &Category, identity: Identity) -> Option<usize> {
        self.ids
            .category(category.name())
            .and_then(|map| map.try_second(&identity))
            .copied()
    }

    /// Ids already assigned to `entity`, in sub-component order. Never
    /// allocates.
    #[must_use]
    pub fn ids_of<E: Entity + ?Sized>(&self, entity: &E) -> Option<&[u32]> {
        let category = self.config.hierarchy.closest_registered(&entity.kind(), |k| {
            self.counters.contains_key(k)
        })?;
        let handle = self.handle(&category.0, entity.identity())?;
        self.lists.get(handle).map(Vec::as_slice)
    }

    /// The sub-component that was assigned `id` in `category`.
    ///
    /// # Errors
    ///
    /// Returns a not-found error if no sub-component holds `id`.
    pub fn lookup(&self, category: &Category, id: u32) -> Result<SubComponentRef> {
        self.sub_ids.first_id_in(category.name(), &id).copied()
    }

    // =========================================================================
    // Sub-component cursor
    // =========================================================================

    /// The current sub-component index.
    #[must_use]
    pub fn sub_component_index(&self) -> usize {
        self.cursor
    }

    /// Moves the sub-component cursor.
    pub fn set_sub_component_index(&mut self, index: usize) {
        self.cursor = index;
    }

    /// Returns the cursor to the first sub-component.
    pub fn reset_sub_component_index(&mut self) {
        self.cursor = 0;
    }

    /// [`resolved_id`](Self::resolved_id) at the current cursor.
    ///
    /// # Errors
    ///
    /// Returns an unregistered category error if the kind cannot be resolved.
    pub fn current_id<E: Entity + ?Sized>(&mut self, entity: &E) -> Result<String> {
        let index = self.cursor;
        self.resolved_id(entity, index)
    }

    /// Returns true while the cursor is below the entity's sub-component
    /// count.
    #[must_use]
    pub fn has_sub_components_to_write<E: SubComponents + ?Sized>(&self, entity: &E) -> bool {
        self.cursor < entity.sub_component_count()
    }

    /// Resolves every sub-component of `entity` in ascending index order.
    ///
    /// # Errors
    ///
    /// Returns an unregistered category error if the kind cannot be resolved.
    pub fn resolve_all<E: SubComponents + ?Sized>(&mut self, entity: &E) -> Result<Vec<String>> {
        (0..entity.sub_component_count())
            .map(|index| self.resolved_id(entity, index))
            .collect()
    }

    /// Drives `write` once per sub-component of `entity`, with the cursor
    /// set to each index in turn. The cursor is reset afterwards, including
    /// when `write` fails.
    ///
    /// # Errors
    ///
    /// Propagates the first error returned by `write`.
    pub fn each_sub_component<E, F>(&mut self, entity: &E, mut write: F) -> Result<()>
    where
        E: SubComponents + ?Sized,
        F: FnMut(&mut Self, &E) -> Result<()>,
    {
        self.reset_sub_component_index();
        let mut outcome = Ok(());
        while self.has_sub_components_to_write(entity) {
            outcome = write(self, entity);
            if outcome.is_err() {
                break;
            }
            self.cursor += 1;
        }
        self.reset_sub_component_index();
        outcome
    }

    // =========================================================================
    // Lists
    // =========================================================================

    /// Compressed list of every id assigned to `members`.
    ///
    /// Members that have not been numbered yet are skipped; nothing is
    /// allocated.
    #[must_use]
    pub fn list_definition<'a, E, I>(&self, members: I) -> String
    where
        E: Entity + ?Sized + 'a,
        I: IntoIterator<Item = &'a E>,
    {
        let ids: Vec<u32> = members
            .into_iter()
            .filter_map(|member| self.ids_of(member))
            .flatten()
            .copied()
            .collect();
        list::compress(ids)
    }
}

fn resolution_context<E: Entity + ?Sized>(entity: &E, sub_index: usize) -> ErrorContext {
    let source = if entity.name().is_empty() {
        format!("{} {}", entity.kind(), entity.identity())
    } else {
        format!("{} '{}'", entity.kind(), entity.name())
    };
    ErrorContext::new()
        .with_source(source)
        .with_frame(format!("resolved_id(sub_index = {sub_index})"))
}
