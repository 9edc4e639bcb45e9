//! Per-session cart.
//!
//! The cart is purely local: it is never sent anywhere until checkout turns it
//! into an order. [`CartFile`] can keep it on disk between runs.

use std::path::{Path, PathBuf};

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tableside_core::{CartLine, MenuItem, MenuItemId, order_total};

use crate::error::CartFileError;

/// Menu items a customer has picked, plus the name the order goes under.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Cart {
    lines: Vec<CartLine>,
    #[serde(default)]
    customer_name: String,
}

impl Cart {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    #[must_use]
    pub fn customer_name(&self) -> &str {
        &self.customer_name
    }

    pub fn set_customer_name(&mut self, name: impl Into<String>) {
        self.customer_name = name.into();
    }

    /// Add `quantity` of `item`.
    ///
    /// If the item is already in the cart its quantity grows and its notes are
    /// kept; otherwise a new line snapshots the item's name and price. Adding
    /// zero does nothing.
    pub fn add_item(&mut self, item: &MenuItem, quantity: u32, notes: &str) {
        if quantity == 0 {
            return;
        }
        if let Some(line) = self.line_mut(item.id) {
            line.quantity = line.quantity.saturating_add(quantity);
            return;
        }
        let mut line = CartLine::from_menu_item(item, quantity);
        notes.clone_into(&mut line.notes);
        self.lines.push(line);
    }

    /// Set a line's quantity. Zero removes the line.
    pub fn update_quantity(&mut self, menu_item_id: MenuItemId, quantity: u32) {
        if quantity == 0 {
            self.remove_item(menu_item_id);
        } else if let Some(line) = self.line_mut(menu_item_id) {
            line.quantity = quantity;
        }
    }

    pub fn update_notes(&mut self, menu_item_id: MenuItemId, notes: impl Into<String>) {
        if let Some(line) = self.line_mut(menu_item_id) {
            line.notes = notes.into();
        }
    }

    pub fn remove_item(&mut self, menu_item_id: MenuItemId) {
        self.lines.retain(|line| line.menu_item_id != menu_item_id);
    }

    /// Empty the cart and forget the customer name.
    pub fn clear(&mut self) {
        self.lines.clear();
        self.customer_name.clear();
    }

    /// Running total of all lines.
    #[must_use]
    pub fn total(&self) -> Decimal {
        order_total(&self.lines)
    }

    /// Total quantity across all lines.
    #[must_use]
    pub fn item_count(&self) -> u64 {
        self.lines.iter().map(|line| u64::from(line.quantity)).sum()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    fn line_mut(&mut self, menu_item_id: MenuItemId) -> Option<&mut CartLine> {
        self.lines
            .iter_mut()
            .find(|line| line.menu_item_id == menu_item_id)
    }
}

/// A cart saved as JSON on disk.
#[derive(Debug, Clone)]
pub struct CartFile {
    path: PathBuf,
}

impl CartFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read the saved cart. A missing file is an empty cart.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read or parsed.
    pub fn load(&self) -> Result<Cart, CartFileError> {
        match std::fs::read(&self.path) {
            Ok(bytes) => Ok(serde_json::from_slice(&bytes)?),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(Cart::new()),
            Err(e) => Err(e.into()),
        }
    }

    /// Write `cart`, replacing any earlier save.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be written.
    pub fn save(&self, cart: &Cart) -> Result<(), CartFileError> {
        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
        {
            std::fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_vec_pretty(cart)?;
        let tmp = self.path.with_extension("json.tmp");
        std::fs::write(&tmp, json)?;
        std::fs::rename(&tmp, &self.path)?;
        Ok(())
    }

    /// Delete the saved cart, if any.
    ///
    /// # Errors
    ///
    /// Returns an error if an existing file cannot be removed.
    pub fn remove(&self) -> Result<(), CartFileError> {
        match std::fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use tableside_core::Category;

    use super::*;

    fn menu_item(name: &str, price: i64) -> MenuItem {
        MenuItem {
            id: MenuItemId::generate(),
            name: name.into(),
            description: String::new(),
            price: Decimal::from(price),
            category: Category::MainCourse,
            image_url: String::new(),
            available: true,
        }
    }

    #[test]
    fn test_add_merges_by_menu_item() {
        let sate = menu_item("Sate", 50_000);
        let mut cart = Cart::new();
        cart.add_item(&sate, 1, "no peanuts");
        cart.add_item(&sate, 2, "extra spicy");

        assert_eq!(cart.lines().len(), 1);
        assert_eq!(cart.lines()[0].quantity, 3);
        assert_eq!(cart.lines()[0].notes, "no peanuts");
        assert_eq!(cart.total(), Decimal::from(150_000));
    }

    #[test]
    fn test_add_zero_is_noop() {
        let mut cart = Cart::new();
        cart.add_item(&menu_item("Sate", 50_000), 0, "");
        assert!(cart.is_empty());
    }

    #[test]
    fn test_line_snapshots_price() {
        let mut item = menu_item("Sate", 50_000);
        let mut cart = Cart::new();
        cart.add_item(&item, 2, "");
        item.price = Decimal::from(99_000);
        assert_eq!(cart.total(), Decimal::from(100_000));
    }

    #[test]
    fn test_update_quantity_zero_removes() {
        let sate = menu_item("Sate", 50_000);
        let tea = menu_item("Es Teh", 8_000);
        let mut cart = Cart::new();
        cart.add_item(&sate, 2, "");
        cart.add_item(&tea, 1, "");

        cart.update_quantity(tea.id, 4);
        assert_eq!(cart.item_count(), 6);
        cart.update_quantity(sate.id, 0);
        assert_eq!(cart.lines().len(), 1);
        assert_eq!(cart.total(), Decimal::from(32_000));

        // Unknown ids are ignored.
        cart.update_quantity(MenuItemId::generate(), 3);
        assert_eq!(cart.lines().len(), 1);
    }

    #[test]
    fn test_item_count_large_quantities() {
        let mut cart = Cart::new();
        cart.add_item(&menu_item("Sate", 1), u32::MAX, "");
        cart.add_item(&menu_item("Es Teh", 1), u32::MAX, "");
        assert_eq!(cart.item_count(), 2 * u64::from(u32::MAX));
    }

    #[test]
    fn test_notes_and_remove() {
        let sate = menu_item("Sate", 50_000);
        let mut cart = Cart::new();
        cart.add_item(&sate, 1, "");
        cart.update_notes(sate.id, "well done");
        assert_eq!(cart.lines()[0].notes, "well done");
        cart.remove_item(sate.id);
        assert!(cart.is_empty());
        assert_eq!(cart.total(), Decimal::ZERO);
    }

    #[test]
    fn test_clear_resets_customer_name() {
        let mut cart = Cart::new();
        cart.add_item(&menu_item("Sate", 50_000), 1, "");
        cart.set_customer_name("Budi");
        cart.clear();
        assert!(cart.is_empty());
        assert_eq!(cart.customer_name(), "");
    }

    #[test]
    fn test_cart_file_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let file = CartFile::new(dir.path().join("nested").join("cart.json"));
        assert_eq!(file.load().unwrap(), Cart::new());

        let mut cart = Cart::new();
        cart.add_item(&menu_item("Sate", 50_000), 2, "no peanuts");
        cart.set_customer_name("Budi");
        file.save(&cart).unwrap();
        assert_eq!(file.load().unwrap(), cart);

        file.remove().unwrap();
        file.remove().unwrap();
        assert!(file.load().unwrap().is_empty());
    }

    #[test]
    fn test_cart_file_rejects_garbage() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("cart.json");
        std::fs::write(&path, "not json").unwrap();
        assert!(matches!(
            CartFile::new(path).load(),
            Err(CartFileError::Json(_))
        ));
    }
}
