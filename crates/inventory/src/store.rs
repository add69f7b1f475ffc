use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

use chrono::Utc;

use stockroom_core::{DomainError, DomainResult, Entity, ItemId};

use crate::filter::ItemFilter;
use crate::item::{Item, ItemDraft, ItemPatch};

/// The authoritative collection of items and its validated mutations.
pub trait ItemStore: Send + Sync {
    /// Every current item, in insertion order.
    fn list(&self) -> DomainResult<Vec<Item>>;
    fn get(&self, id: &ItemId) -> DomainResult<Item>;
    fn create(&self, draft: ItemDraft) -> DomainResult<Item>;
    /// Overwrite every mutable field; `id` and `created_at` are kept.
    fn replace(&self, id: &ItemId, draft: ItemDraft) -> DomainResult<Item>;
    /// Overwrite only the fields present in `patch`.
    fn update(&self, id: &ItemId, patch: ItemPatch) -> DomainResult<Item>;
    /// Remove the item and hand back what was removed.
    fn delete(&self, id: &ItemId) -> DomainResult<Item>;
    /// Items matching every predicate of `filter`, in insertion order.
    fn search(&self, filter: &ItemFilter) -> DomainResult<Vec<Item>>;
}

impl<S> ItemStore for Arc<S>
where
    S: ItemStore + ?Sized,
{
    fn list(&self) -> DomainResult<Vec<Item>> {
        (**self).list()
    }

    fn get(&self, id: &ItemId) -> DomainResult<Item> {
        (**self).get(id)
    }

    fn create(&self, draft: ItemDraft) -> DomainResult<Item> {
        (**self).create(draft)
    }

    fn replace(&self, id: &ItemId, draft: ItemDraft) -> DomainResult<Item> {
        (**self).replace(id, draft)
    }

    fn update(&self, id: &ItemId, patch: ItemPatch) -> DomainResult<Item> {
        (**self).update(id, patch)
    }

    fn delete(&self, id: &ItemId) -> DomainResult<Item> {
        (**self).delete(id)
    }

    fn search(&self, filter: &ItemFilter) -> DomainResult<Vec<Item>> {
        (**self).search(filter)
    }
}

/// Process-lifetime in-memory store.
///
/// One lock guards the whole collection, so every mutation is serialised
/// against other mutations and against reads. A `Vec` keeps insertion order
/// for listing; lookups are linear.
#[derive(Debug, Default)]
pub struct InMemoryItemStore {
    inner: RwLock<Vec<Item>>,
}

impl InMemoryItemStore {
    pub fn new() -> Self {
        Self {
            inner: RwLock::new(Vec::new()),
        }
    }

    pub fn len(&self) -> DomainResult<usize> {
        Ok(self.read()?.len())
    }

    pub fn is_empty(&self) -> DomainResult<bool> {
        Ok(self.read()?.is_empty())
    }

    fn read(&self) -> DomainResult<RwLockReadGuard<'_, Vec<Item>>> {
        self.inner
            .read()
            .map_err(|_| DomainError::unavailable("item store lock poisoned"))
    }

    fn write(&self) -> DomainResult<RwLockWriteGuard<'_, Vec<Item>>> {
        self.inner
            .write()
            .map_err(|_| DomainError::unavailable("item store lock poisoned"))
    }
}

fn position(items: &[Item], id: &ItemId) -> DomainResult<usize> {
    items
        .iter()
        .position(|item| item.id() == id)
        .ok_or(DomainError::NotFound)
}

impl ItemStore for InMemoryItemStore {
    fn list(&self) -> DomainResult<Vec<Item>> {
        Ok(self.read()?.clone())
    }

    fn get(&self, id: &ItemId) -> DomainResult<Item> {
        let items = self.read()?;
        let idx = position(&items, id)?;
        Ok(items[idx].clone())
    }

    fn create(&self, draft: ItemDraft) -> DomainResult<Item> {
        let fields = draft.validate()?;

        let mut items = self.write()?;
        let mut id = ItemId::new();
        while items.iter().any(|item| item.id() == &id) {
            id = ItemId::new();
        }

        let item = Item::new(id, fields, Utc::now());
        items.push(item.clone());
        tracing::info!(item_id = %id, "item created");
        Ok(item)
    }

    fn replace(&self, id: &ItemId, draft: ItemDraft) -> DomainResult<Item> {
        let mut items = self.write()?;
        let idx = position(&items, id)?;
        let fields = draft.validate()?;

        let item = &mut items[idx];
        item.overwrite(fields);
        tracing::info!(item_id = %id, "item replaced");
        Ok(item.clone())
    }

    fn update(&self, id: &ItemId, patch: ItemPatch) -> DomainResult<Item> {
        let mut items = self.write()?;
        let idx = position(&items, id)?;
        patch.validate()?;

        let item = &mut items[idx];
        item.apply_patch(patch);
        tracing::info!(item_id = %id, "item updated");
        Ok(item.clone())
    }

    fn delete(&self, id: &ItemId) -> DomainResult<Item> {
        let mut items = self.write()?;
        let idx = position(&items, id)?;
        let removed = items.remove(idx);
        tracing::info!(item_id = %id, "item deleted");
        Ok(removed)
    }

    fn search(&self, filter: &ItemFilter) -> DomainResult<Vec<Item>> {
        let items = self.read()?;
        Ok(items.iter().filter(|item| filter.matches(item)).cloned().collect())
    }
}
