//! `tbs seed` - load a menu in bulk.
//!
//! Items come from a JSON array in the menu item draft format (`name`,
//! `description`, `price`, `category`, `imageUrl`, `available`). Without a
//! file the built-in 45-item menu is used.

use std::collections::HashSet;
use std::path::Path;

use tableside_client::Tableside;
use tableside_core::MenuItemDraft;
use tracing::{error, info};

const DEFAULT_MENU: &str = include_str!("../../data/default-menu.json");

/// Counts reported at the end of a seed run.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct SeedResult {
    pub inserted: usize,
    pub skipped: usize,
    pub failed: usize,
}

/// Parse and validate a menu file's contents.
///
/// # Errors
///
/// Returns an error if the JSON is malformed or any item is invalid; nothing
/// is written in that case.
fn parse_menu(json: &str) -> Result<Vec<MenuItemDraft>, Box<dyn std::error::Error>> {
    let drafts: Vec<MenuItemDraft> = serde_json::from_str(json)?;

    let mut invalid = 0;
    for draft in &drafts {
        if let Err(errors) = draft.validate() {
            error!("  - {}: {errors}", draft.name);
            invalid += 1;
        }
    }
    if invalid > 0 {
        return Err(format!("{invalid} invalid menu items found").into());
    }
    Ok(drafts)
}

/// Create every item whose name is not on the menu yet.
///
/// # Errors
///
/// Returns an error if the file cannot be read or fails validation. Failed
/// writes of single items are logged and counted instead.
pub async fn run(client: &Tableside, file: Option<&Path>) -> Result<(), Box<dyn std::error::Error>> {
    let drafts = match file {
        Some(path) => {
            info!(path = %path.display(), "Loading menu from file");
            parse_menu(&tokio::fs::read_to_string(path).await?)?
        }
        None => parse_menu(DEFAULT_MENU)?,
    };
    info!(items = drafts.len(), "Parsed menu");

    let mut existing: HashSet<String> = client
        .catalog
        .menu_items()
        .await
        .iter()
        .map(|item| name_key(&item.name))
        .collect();

    let mut result = SeedResult::default();
    for draft in drafts {
        if !existing.insert(name_key(&draft.name)) {
            result.skipped += 1;
            continue;
        }
        let name = draft.name.clone();
        match client.catalog.add_menu_item(draft).await {
            Ok(_) => result.inserted += 1,
            Err(e) => {
                error!("  - {name}: {e}");
                result.failed += 1;
            }
        }
    }

    info!("Seeding complete!");
    info!("  Items inserted: {}", result.inserted);
    info!("  Items skipped (already exist): {}", result.skipped);
    if result.failed > 0 {
        return Err(format!("{} items could not be created", result.failed).into());
    }
    Ok(())
}

fn name_key(name: &str) -> String {
    name.trim().to_lowercase()
}
