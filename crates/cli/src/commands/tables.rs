//! `tbs tables` - table management.

use tableside_client::Tableside;
use tableside_core::{Table, TablePatch, TableStatus};
use tracing::info;

use super::table_by_number;

fn log_table(client: &Tableside, table: &Table) {
    match table.menu_url(&client.config.public_url) {
        Ok(url) => info!(
            "Table {:<6} {:<10} {}  {}",
            table.table_number,
            table.status.as_str(),
            table.slug,
            url
        ),
        Err(_) => info!(
            "Table {:<6} {:<10} {}  {}",
            table.table_number,
            table.status.as_str(),
            table.slug,
            table.menu_path()
        ),
    }
}

/// Log every table with its menu link.
pub async fn list(client: &Tableside) {
    let tables = client.catalog.tables().await;
    if tables.is_empty() {
        info!("No tables yet");
    }
    for table in &tables {
        log_table(client, table);
    }
}

/// Create a table and log its QR link.
///
/// # Errors
///
/// Returns an error for a blank or duplicate number, or if the write fails.
pub async fn add(client: &Tableside, number: &str) -> Result<(), Box<dyn std::error::Error>> {
    let table = client.catalog.add_table(number).await?;
    log_table(client, &table);
    Ok(())
}

/// Mark a table available or occupied.
///
/// # Errors
///
/// Returns an error for an unknown table or a failed write.
pub async fn set_status(
    client: &Tableside,
    number: &str,
    status: TableStatus,
) -> Result<(), Box<dyn std::error::Error>> {
    let table = table_by_number(client, number).await?;
    let table = client
        .catalog
        .update_table(table.id, TablePatch::status(status))
        .await?;
    log_table(client, &table);
    Ok(())
}

/// Renumber a table. The slug, and so the printed QR code, is unchanged.
///
/// # Errors
///
/// Returns an error for an unknown table, a blank or taken new number, or a
/// failed write.
pub async fn rename(
    client: &Tableside,
    number: &str,
    new_number: &str,
) -> Result<(), Box<dyn std::error::Error>> {
    let table = table_by_number(client, number).await?;
    let table = client
        .catalog
        .update_table(table.id, TablePatch::table_number(new_number))
        .await?;
    log_table(client, &table);
    Ok(())
}

/// Delete a table. Its orders stay.
///
/// # Errors
///
/// Returns an error for an unknown table or a failed write.
pub async fn remove(client: &Tableside, number: &str) -> Result<(), Box<dyn std::error::Error>> {
    let table = table_by_number(client, number).await?;
    client.catalog.delete_table(table.id).await?;
    info!(table_number = %table.table_number, "Table removed");
    Ok(())
}
