//! Domain records shared by the stores, the REST contract, and the CLI.

pub mod cart;
pub mod menu;
pub mod order;
pub mod table;

pub use cart::{CartLine, checked_order_total, order_total};
pub use menu::{
    Category, CategoryFilter, MenuFilter, MenuItem, MenuItemDraft, MenuItemForm, MenuItemPatch,
    MenuSection, available_menu, group_by_category, validate_image_url,
};
pub use order::{NewOrder, Order, OrderBoard, orders_for_table, sort_by_newest};
pub use table::{Table, TableLookup, TablePatch, normalize_table_number};
