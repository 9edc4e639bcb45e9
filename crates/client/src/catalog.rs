//! Catalog store: tables and menu items.
//!
//! Local collections are only changed after the backend confirms a write, so
//! a failed call never leaves the store ahead of the backing store. Refreshes
//! from the sync layer replace them wholesale.

use std::collections::HashSet;
use std::sync::Arc;

use tableside_core::{
    MenuFilter, MenuItem, MenuItemDraft, MenuItemId, MenuItemPatch, MenuSection, Table, TableId,
    TableLookup, TablePatch, available_menu, generate_unique_slug, group_by_category,
    normalize_table_number,
};
use tokio::sync::RwLock;
use tracing::{info, instrument};

use crate::backend::Backend;
use crate::error::StoreError;

/// Owns the local copy of tables and menu items.
pub struct CatalogStore {
    backend: Arc<dyn Backend>,
    tables: RwLock<Vec<Table>>,
    menu_items: RwLock<Vec<MenuItem>>,
}

impl std::fmt::Debug for CatalogStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CatalogStore").finish_non_exhaustive()
    }
}

impl CatalogStore {
    /// Create an empty store writing through `backend`.
    #[must_use]
    pub fn new(backend: Arc<dyn Backend>) -> Self {
        Self {
            backend,
            tables: RwLock::new(Vec::new()),
            menu_items: RwLock::new(Vec::new()),
        }
    }

    // =========================================================================
    // Reads
    // =========================================================================

    pub async fn tables(&self) -> Vec<Table> {
        self.tables.read().await.clone()
    }

    pub async fn table(&self, id: TableId) -> Option<Table> {
        self.tables.read().await.iter().find(|t| t.id == id).cloned()
    }

    pub async fn menu_items(&self) -> Vec<MenuItem> {
        self.menu_items.read().await.clone()
    }

    pub async fn menu_item(&self, id: MenuItemId) -> Option<MenuItem> {
        self.menu_items
            .read()
            .await
            .iter()
            .find(|i| i.id == id)
            .cloned()
    }

    /// Find the table a customer link points at.
    ///
    /// `None` means the customer may browse but not check out.
    pub async fn resolve_table(&self, lookup: &TableLookup) -> Option<Table> {
        self.tables
            .read()
            .await
            .iter()
            .find(|t| lookup.matches(t))
            .cloned()
    }

    /// The customer menu: available items passing `filter`, grouped by
    /// category in alphabetical order.
    pub async fn list_available_menu_items(&self, filter: &MenuFilter) -> Vec<MenuItem> {
        available_menu(&self.menu_items.read().await, filter)
    }

    /// [`Self::list_available_menu_items`] split into category sections.
    pub async fn menu_sections(&self, filter: &MenuFilter) -> Vec<MenuSection> {
        group_by_category(self.list_available_menu_items(filter).await)
    }

    // =========================================================================
    // Tables
    // =========================================================================

    /// Create a table with a fresh slug and status `available`.
    ///
    /// # Errors
    ///
    /// - `Validation` if the trimmed number is empty
    /// - `DuplicateTableNumber` if a known table already has this number
    /// - `Backend` if the write fails
    #[instrument(skip(self))]
    pub async fn add_table(&self, table_number: &str) -> Result<Table, StoreError> {
        let table_number = normalize_table_number(table_number)?;

        let known_slugs: HashSet<String> = {
            let tables = self.tables.read().await;
            if tables.iter().any(|t| t.table_number == table_number) {
                return Err(StoreError::DuplicateTableNumber(table_number));
            }
            tables.iter().map(|t| t.slug.to_string()).collect()
        };
        let slug = generate_unique_slug(|candidate| known_slugs.contains(candidate));

        let created = self
            .backend
            .create_table(&Table::new(table_number, slug))
            .await?;
        upsert(&mut *self.tables.write().await, created.clone(), |t| t.id);

        info!(table_number = %created.table_number, slug = %created.slug, "Table created");
        Ok(created)
    }

    /// Apply a partial update to a table.
    ///
    /// # Errors
    ///
    /// - `Validation` if the patch sets a blank number
    /// - `NotFound` if the table is unknown
    /// - `DuplicateTableNumber` if the new number belongs to another table
    /// - `Backend` if the write fails
    #[instrument(skip(self, patch))]
    pub async fn update_table(
        &self,
        id: TableId,
        patch: TablePatch,
    ) -> Result<Table, StoreError> {
        let patch = patch.normalized()?;

        {
            let tables = self.tables.read().await;
            if !tables.iter().any(|t| t.id == id) {
                return Err(StoreError::NotFound(format!("table {id}")));
            }
            if let Some(number) = &patch.table_number
                && tables.iter().any(|t| t.id != id && &t.table_number == number)
            {
                return Err(StoreError::DuplicateTableNumber(number.clone()));
            }
        }

        let updated = self.backend.update_table(id, &patch).await?;
        upsert(&mut *self.tables.write().await, updated.clone(), |t| t.id);
        Ok(updated)
    }

    /// Delete a table. Deleting an unknown table succeeds.
    ///
    /// Orders placed from the table are kept.
    ///
    /// # Errors
    ///
    /// Returns `Backend` if the write fails.
    #[instrument(skip(self))]
    pub async fn delete_table(&self, id: TableId) -> Result<(), StoreError> {
        self.backend.delete_table(id).await?;
        self.tables.write().await.retain(|t| t.id != id);
        Ok(())
    }

    // =========================================================================
    // Menu items
    // =========================================================================

    /// Validate and create a menu item.
    ///
    /// # Errors
    ///
    /// - `Validation` for a blank name, out-of-range price, or bad image URL
    /// - `Backend` if the write fails
    #[instrument(skip(self, draft), fields(name = %draft.name))]
    pub async fn add_menu_item(&self, draft: MenuItemDraft) -> Result<MenuItem, StoreError> {
        draft.validate()?;
        let item = draft.into_menu_item(MenuItemId::generate());

        let created = self.backend.create_menu_item(&item).await?;
        upsert(&mut *self.menu_items.write().await, created.clone(), |i| i.id);
        Ok(created)
    }

    /// Validate the changed fields and update a menu item.
    ///
    /// # Errors
    ///
    /// - `Validation` for invalid changed fields
    /// - `NotFound` if the item is unknown
    /// - `Backend` if the write fails
    #[instrument(skip(self, patch))]
    pub async fn update_menu_item(
        &self,
        id: MenuItemId,
        patch: MenuItemPatch,
    ) -> Result<MenuItem, StoreError> {
        patch.validate()?;
        if self.menu_item(id).await.is_none() {
            return Err(StoreError::NotFound(format!("menu item {id}")));
        }

        let updated = self.backend.update_menu_item(id, &patch).await?;
        upsert(&mut *self.menu_items.write().await, updated.clone(), |i| i.id);
        Ok(updated)
    }

    /// Delete a menu item. Deleting an unknown item succeeds.
    ///
    /// # Errors
    ///
    /// Returns `Backend` if the write fails.
    #[instrument(skip(self))]
    pub async fn delete_menu_item(&self, id: MenuItemId) -> Result<(), StoreError> {
        self.backend.delete_menu_item(id).await?;
        self.menu_items.write().await.retain(|i| i.id != id);
        Ok(())
    }

    /// Flip `available` and return the updated item.
    ///
    /// # Errors
    ///
    /// - `NotFound` if the item is unknown
    /// - `Backend` if the write fails
    #[instrument(skip(self))]
    pub async fn toggle_availability(&self, id: MenuItemId) -> Result<MenuItem, StoreError> {
        let current = self
            .menu_item(id)
            .await
            .ok_or_else(|| StoreError::NotFound(format!("menu item {id}")))?;
        self.update_menu_item(id, MenuItemPatch::available(!current.available))
            .await
    }

    // =========================================================================
    // Sync
    // =========================================================================

    pub(crate) async fn replace_tables(&self, tables: Vec<Table>) {
        *self.tables.write().await = tables;
    }

    pub(crate) async fn replace_menu_items(&self, items: Vec<MenuItem>) {
        *self.menu_items.write().await = items;
    }
}

/// Replace the record with the same key, or append it.
pub(crate) fn upsert<T, K: PartialEq>(records: &mut Vec<T>, record: T, key: impl Fn(&T) -> K) {
    let k = key(&record);
    match records.iter_mut().find(|r| key(r) == k) {
        Some(existing) => *existing = record,
        None => records.push(record),
    }
}
