//! Dining tables.

use serde::{Deserialize, Serialize};
use url::Url;

use crate::types::{Slug, TableId, TableStatus};
use crate::validation::ValidationError;

/// A physical table, reachable by customers through `/menu/<slug>`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Table {
    pub id: TableId,
    /// Human-readable number printed on the table. Unique, case-sensitive.
    pub table_number: String,
    /// Routing token encoded in the table's QR code. Never changes.
    pub slug: Slug,
    #[serde(default)]
    pub status: TableStatus,
}

impl Table {
    /// Create an available table with a fresh id.
    #[must_use]
    pub fn new(table_number: impl Into<String>, slug: Slug) -> Self {
        Self {
            id: TableId::generate(),
            table_number: table_number.into(),
            slug,
            status: TableStatus::Available,
        }
    }

    /// Path of the customer menu for this table.
    #[must_use]
    pub fn menu_path(&self) -> String {
        format!("/menu/{}", self.slug)
    }

    /// Absolute menu URL, i.e. what the table's QR code encodes.
    ///
    /// # Errors
    ///
    /// Returns an error if `base` cannot be joined with the menu path.
    pub fn menu_url(&self, base: &Url) -> Result<Url, url::ParseError> {
        base.join(&self.menu_path())
    }

    /// Apply the fields present in `patch`. The slug is never touched.
    pub fn apply(&mut self, patch: &TablePatch) {
        if let Some(number) = &patch.table_number {
            number.clone_into(&mut self.table_number);
        }
        if let Some(status) = patch.status {
            self.status = status;
        }
    }
}

/// Partial update of a [`Table`]. Absent fields are left unchanged.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TablePatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub table_number: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<TableStatus>,
}

impl TablePatch {
    /// Patch that only renumbers the table.
    #[must_use]
    pub fn table_number(number: impl Into<String>) -> Self {
        Self {
            table_number: Some(number.into()),
            ..Self::default()
        }
    }

    /// Patch that only changes the status.
    #[must_use]
    pub fn status(status: TableStatus) -> Self {
        Self {
            status: Some(status),
            ..Self::default()
        }
    }

    /// Trim the table number, if present, and reject an empty one.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::TableNumberRequired`] for a blank number.
    pub fn normalized(mut self) -> Result<Self, ValidationError> {
        if let Some(number) = self.table_number.take() {
            self.table_number = Some(normalize_table_number(&number)?);
        }
        Ok(self)
    }
}

/// Trim a table number typed by an admin.
///
/// # Errors
///
/// Returns [`ValidationError::TableNumberRequired`] if nothing is left after
/// trimming.
pub fn normalize_table_number(input: &str) -> Result<String, ValidationError> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::TableNumberRequired);
    }
    Ok(trimmed.to_string())
}

/// How a customer arrived at a table's menu.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TableLookup {
    /// `/menu/<slug>` - the QR code route.
    Slug(String),
    /// `/menu?table=<number>` - the older route keyed by table number.
    Number(String),
}

impl TableLookup {
    /// Whether `table` is the one being looked up.
    #[must_use]
    pub fn matches(&self, table: &Table) -> bool {
        match self {
            Self::Slug(slug) => table.slug.as_str() == slug,
            Self::Number(number) => table.table_number == *number,
        }
    }
}

impl std::fmt::Display for TableLookup {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Slug(slug) => write!(f, "slug {slug}"),
            Self::Number(number) => write!(f, "table {number}"),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn table(number: &str, slug: &str) -> Table {
        Table::new(number, Slug::parse(slug).unwrap())
    }

    #[test]
    fn test_new_table_is_available() {
        assert_eq!(table("5", "abcd1234").status, TableStatus::Available);
    }

    #[test]
    fn test_menu_url() {
        let t = table("5", "abcd1234");
        assert_eq!(t.menu_path(), "/menu/abcd1234");
        let base = Url::parse("https://resto.example").unwrap();
        assert_eq!(
            t.menu_url(&base).unwrap().as_str(),
            "https://resto.example/menu/abcd1234"
        );
    }

    #[test]
    fn test_apply_partial_patch() {
        let mut t = table("5", "abcd1234");
        t.apply(&TablePatch::status(TableStatus::Occupied));
        assert_eq!(t.table_number, "5");
        assert_eq!(t.status, TableStatus::Occupied);

        t.apply(&TablePatch::table_number("7"));
        assert_eq!(t.table_number, "7");
        assert_eq!(t.status, TableStatus::Occupied);
        assert_eq!(t.slug.as_str(), "abcd1234");
    }

    #[test]
    fn test_normalize_table_number() {
        assert_eq!(normalize_table_number("  12 ").unwrap(), "12");
        assert_eq!(
            normalize_table_number("   "),
            Err(ValidationError::TableNumberRequired)
        );
        assert!(TablePatch::table_number(" ").normalized().is_err());
        assert_eq!(
            TablePatch::table_number(" 3 ").normalized().unwrap(),
            TablePatch::table_number("3")
        );
    }

    #[test]
    fn test_lookup_matches() {
        let t = table("5", "abcd1234");
        assert!(TableLookup::Slug("abcd1234".into()).matches(&t));
        assert!(TableLookup::Number("5".into()).matches(&t));
        assert!(!TableLookup::Number("05".into()).matches(&t));
        assert!(!TableLookup::Slug("5".into()).matches(&t));
    }

    #[test]
    fn test_wire_shape() {
        let t = table("5", "abcd1234");
        let json = serde_json::to_value(&t).unwrap();
        assert_eq!(json["tableNumber"], "5");
        assert_eq!(json["slug"], "abcd1234");
        assert_eq!(json["status"], "available");

        let patch: TablePatch = serde_json::from_str(r#"{"status":"occupied"}"#).unwrap();
        assert_eq!(patch, TablePatch::status(TableStatus::Occupied));
    }
}
