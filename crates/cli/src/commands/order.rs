//! `tbs order` - place an order the way a customer at a table would.
//!
//! When `TABLESIDE_CART_PATH` is set the cart is loaded from that file first
//! and written back if checkout fails, so a retry starts where it left off.

use tableside_client::{Cart, CartFile, TableSession, Tableside};
use tableside_core::{PaymentType, TableLookup, format_rupiah};
use tracing::{info, warn};

use super::{CommandError, ItemSpec, menu_item_by_ref};

/// Which table the order is for.
///
/// # Errors
///
/// Returns `MissingTable` if neither a slug nor a number was given.
pub fn lookup(
    table_slug: Option<String>,
    table_number: Option<String>,
) -> Result<TableLookup, CommandError> {
    match (table_slug, table_number) {
        (Some(slug), _) => Ok(TableLookup::Slug(slug.trim().to_string())),
        (None, Some(number)) => Ok(TableLookup::Number(number.trim().to_string())),
        (None, None) => Err(CommandError::MissingTable),
    }
}

/// Add `items` to a cart and check it out for the table.
///
/// # Errors
///
/// Returns an error for an unknown or sold-out item, an invalid table, or a
/// failed write.
pub async fn run(
    client: &Tableside,
    lookup: TableLookup,
    items: &[ItemSpec],
    customer_name: &str,
    payment_type: PaymentType,
) -> Result<(), Box<dyn std::error::Error>> {
    let cart_file = client.config.cart_path.as_ref().map(CartFile::new);
    let mut cart = match &cart_file {
        Some(file) => file.load()?,
        None => Cart::new(),
    };

    for spec in items {
        let item = menu_item_by_ref(client, &spec.item).await?;
        if !item.available {
            return Err(CommandError::Unavailable(item.name).into());
        }
        cart.add_item(&item, spec.quantity, "");
    }
    if !customer_name.trim().is_empty() {
        cart.set_customer_name(customer_name.trim());
    }
    info!(
        items = cart.item_count(),
        total = %format_rupiah(cart.total()),
        "Cart ready"
    );

    let session = TableSession::resolve(&client.catalog, lookup).await;
    match session.checkout(&mut cart, &client.orders, payment_type).await {
        Ok(order) => {
            if let Some(file) = &cart_file {
                file.remove()?;
            }
            info!("Order {} placed for table {}", order.id, order.table_number);
            for line in &order.items {
                info!(
                    "  {} x {:<24} {:>12}",
                    line.quantity,
                    line.name,
                    format_rupiah(line.line_total())
                );
            }
            info!("  Total {}  ({})", format_rupiah(order.total), order.payment_type);
            Ok(())
        }
        Err(e) => {
            if let Some(file) = &cart_file {
                file.save(&cart)?;
                warn!(path = %file.path().display(), "Cart saved for retry");
            }
            Err(e.into())
        }
    }
}
