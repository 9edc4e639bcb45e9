//! `tbs menu` - menu browsing and management.

use tableside_client::Tableside;
use tableside_core::{
    CategoryFilter, MenuFilter, MenuItem, MenuItemForm, MenuSection, format_rupiah,
    group_by_category,
};
use tracing::info;

use super::menu_item_by_ref;

fn log_item(item: &MenuItem) {
    let sold_out = if item.available { "" } else { "  (sold out)" };
    info!(
        "  {:<24} {:>12}  {}{}",
        item.name,
        format_rupiah(item.price),
        item.id,
        sold_out
    );
}

/// Log the menu grouped by category.
///
/// Without `all` this is exactly what a customer sees.
pub async fn list(client: &Tableside, search: Option<String>, category: CategoryFilter, all: bool) {
    let filter = MenuFilter {
        search_text: search,
        category,
    };

    let sections: Vec<MenuSection> = if all {
        let mut items: Vec<MenuItem> = client
            .catalog
            .menu_items()
            .await
            .into_iter()
            .filter(|item| filter.matches(item))
            .collect();
        items.sort_by_key(|item| item.category);
        group_by_category(items)
    } else {
        client.catalog.menu_sections(&filter).await
    };

    if sections.is_empty() {
        info!("No menu items match");
    }
    for section in &sections {
        info!("{} ({})", section.category, section.items.len());
        for item in &section.items {
            log_item(item);
        }
    }
}

/// Validate and create a menu item.
///
/// # Errors
///
/// Returns every invalid field at once, or the write failure.
pub async fn add(client: &Tableside, form: MenuItemForm) -> Result<(), Box<dyn std::error::Error>> {
    let draft = form.parse()?;
    let item = client.catalog.add_menu_item(draft).await?;
    info!("Created {}", item.category);
    log_item(&item);
    Ok(())
}

/// Flip an item between available and sold out.
///
/// # Errors
///
/// Returns an error for an unknown item or a failed write.
pub async fn toggle(client: &Tableside, reference: &str) -> Result<(), Box<dyn std::error::Error>> {
    let item = menu_item_by_ref(client, reference).await?;
    let item = client.catalog.toggle_availability(item.id).await?;
    log_item(&item);
    Ok(())
}
