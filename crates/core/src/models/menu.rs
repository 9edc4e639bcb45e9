//! Menu items, their validation, and the customer-facing menu listing.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use url::Url;

use crate::types::{MenuItemId, parse_price, validate_price};
use crate::validation::{ValidationError, ValidationErrors};

/// Menu category.
///
/// Variants are declared in alphabetical order of their display names, so the
/// derived `Ord` is the order sections appear on the menu.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Category {
    Appetizers,
    Beverages,
    Desserts,
    #[serde(rename = "Main Course")]
    MainCourse,
}

impl Category {
    /// All categories in menu order.
    pub const ALL: [Self; 4] = [
        Self::Appetizers,
        Self::Beverages,
        Self::Desserts,
        Self::MainCourse,
    ];

    /// Display and wire name.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Appetizers => "Appetizers",
            Self::Beverages => "Beverages",
            Self::Desserts => "Desserts",
            Self::MainCourse => "Main Course",
        }
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Category {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            return Err(ValidationError::CategoryRequired);
        }
        Self::ALL
            .into_iter()
            .find(|c| c.as_str() == trimmed)
            .ok_or_else(|| ValidationError::UnknownCategory(trimmed.to_string()))
    }
}

/// A sellable menu entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MenuItem {
    pub id: MenuItemId,
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(with = "rust_decimal::serde::float")]
    pub price: Decimal,
    pub category: Category,
    /// Image URL, or an opaque blob reference from an upload. Empty for none.
    #[serde(default)]
    pub image_url: String,
    #[serde(default = "default_available")]
    pub available: bool,
}

const fn default_available() -> bool {
    true
}

impl MenuItem {
    /// Check a complete item as received from another session.
    ///
    /// # Errors
    ///
    /// Returns the failing fields: empty name, out-of-range price, malformed
    /// image URL.
    pub fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();
        errors.check(validate_name(&self.name));
        errors.check(validate_price(self.price));
        errors.check(validate_image_url(&self.image_url));
        errors.into_result(())
    }

    /// Apply the fields present in `patch`.
    ///
    /// The patch is not validated here; see [`MenuItemPatch::validate`].
    pub fn apply(&mut self, patch: &MenuItemPatch) {
        if let Some(name) = &patch.name {
            name.clone_into(&mut self.name);
        }
        if let Some(description) = &patch.description {
            description.clone_into(&mut self.description);
        }
        if let Some(price) = patch.price {
            self.price = price;
        }
        if let Some(category) = patch.category {
            self.category = category;
        }
        if let Some(image_url) = &patch.image_url {
            image_url.clone_into(&mut self.image_url);
        }
        if let Some(available) = patch.available {
            self.available = available;
        }
    }
}

/// Check an optional image URL.
///
/// Empty strings mean "no image". Anything else must parse as an absolute URL;
/// `blob:` references from the upload flow parse as such and are kept opaque.
///
/// # Errors
///
/// Returns [`ValidationError::InvalidImageUrl`] when the URL does not parse.
pub fn validate_image_url(input: &str) -> Result<(), ValidationError> {
    if input.trim().is_empty() {
        return Ok(());
    }
    Url::parse(input.trim())
        .map(|_| ())
        .map_err(|_| ValidationError::InvalidImageUrl(input.to_string()))
}

fn validate_name(name: &str) -> Result<(), ValidationError> {
    if name.trim().is_empty() {
        Err(ValidationError::NameRequired)
    } else {
        Ok(())
    }
}

/// Typed input for creating a menu item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MenuItemDraft {
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(with = "rust_decimal::serde::float")]
    pub price: Decimal,
    pub category: Category,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    #[serde(default = "default_available")]
    pub available: bool,
}

impl MenuItemDraft {
    /// Check every field, collecting all failures.
    ///
    /// # Errors
    ///
    /// Returns the failing fields: empty name, out-of-range price, malformed
    /// image URL.
    pub fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();
        errors.check(validate_name(&self.name));
        errors.check(validate_price(self.price));
        if let Some(url) = &self.image_url {
            errors.check(validate_image_url(url));
        }
        errors.into_result(())
    }

    /// Build the menu item this draft describes.
    #[must_use]
    pub fn into_menu_item(self, id: MenuItemId) -> MenuItem {
        MenuItem {
            id,
            name: self.name.trim().to_string(),
            description: self.description.trim().to_string(),
            price: self.price,
            category: self.category,
            image_url: self.image_url.map(|u| u.trim().to_string()).unwrap_or_default(),
            available: self.available,
        }
    }
}

/// Untyped menu item input as it arrives from a form or the command line.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct MenuItemForm {
    pub name: String,
    pub description: String,
    pub price: String,
    pub category: String,
    pub image_url: String,
    pub available: Option<bool>,
}

impl MenuItemForm {
    /// Parse and validate the form, reporting every bad field at once.
    ///
    /// # Errors
    ///
    /// Returns all failing fields, including non-numeric prices and unknown
    /// categories.
    pub fn parse(self) -> Result<MenuItemDraft, ValidationErrors> {
        let mut errors = ValidationErrors::new();
        errors.check(validate_name(&self.name));
        let price = errors.check(parse_price(&self.price));
        let category = errors.check(self.category.parse::<Category>());
        errors.check(validate_image_url(&self.image_url));

        match (price, category) {
            (Some(price), Some(category)) if errors.is_empty() => Ok(MenuItemDraft {
                name: self.name,
                description: self.description,
                price,
                category,
                image_url: Some(self.image_url).filter(|u| !u.trim().is_empty()),
                available: self.available.unwrap_or(true),
            }),
            _ => Err(errors),
        }
    }
}

/// Partial update of a [`MenuItem`]. Absent fields are left unchanged.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MenuItemPatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        with = "rust_decimal::serde::float_option"
    )]
    pub price: Option<Decimal>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<Category>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub available: Option<bool>,
}

impl MenuItemPatch {
    /// Patch that only sets availability.
    #[must_use]
    pub fn available(available: bool) -> Self {
        Self {
            available: Some(available),
            ..Self::default()
        }
    }

    /// Validate only the fields being changed.
    ///
    /// # Errors
    ///
    /// Returns the failing fields among those present.
    pub fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();
        if let Some(name) = &self.name {
            errors.check(validate_name(name));
        }
        if let Some(price) = self.price {
            errors.check(validate_price(price));
        }
        if let Some(url) = &self.image_url {
            errors.check(validate_image_url(url));
        }
        errors.into_result(())
    }

    /// Returns true when the patch changes nothing.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.description.is_none()
            && self.price.is_none()
            && self.category.is_none()
            && self.image_url.is_none()
            && self.available.is_none()
    }
}

/// Category restriction for the customer menu.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CategoryFilter {
    #[default]
    All,
    Only(Category),
}

impl std::str::FromStr for CategoryFilter {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.trim() == "All" {
            Ok(Self::All)
        } else {
            s.parse().map(Self::Only)
        }
    }
}

/// Search and category filter for the customer menu.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MenuFilter {
    /// Case-insensitive substring matched against name, description, and category.
    pub search_text: Option<String>,
    pub category: CategoryFilter,
}

impl MenuFilter {
    /// Filter by search text only.
    #[must_use]
    pub fn search(text: impl Into<String>) -> Self {
        Self {
            search_text: Some(text.into()),
            category: CategoryFilter::All,
        }
    }

    /// Filter by category only.
    #[must_use]
    pub const fn category(category: Category) -> Self {
        Self {
            search_text: None,
            category: CategoryFilter::Only(category),
        }
    }

    /// Whether `item` passes the filter. Availability is not checked here.
    #[must_use]
    pub fn matches(&self, item: &MenuItem) -> bool {
        if let CategoryFilter::Only(category) = self.category
            && item.category != category
        {
            return false;
        }

        let Some(query) = self
            .search_text
            .as_deref()
            .map(str::trim)
            .filter(|q| !q.is_empty())
        else {
            return true;
        };
        let query = query.to_lowercase();
        item.name.to_lowercase().contains(&query)
            || item.description.to_lowercase().contains(&query)
            || item.category.as_str().to_lowercase().contains(&query)
    }
}

/// Available items that pass `filter`, grouped by category.
///
/// Categories come in alphabetical order; within a category the input order is
/// kept.
#[must_use]
pub fn available_menu(items: &[MenuItem], filter: &MenuFilter) -> Vec<MenuItem> {
    let mut visible: Vec<MenuItem> = items
        .iter()
        .filter(|item| item.available && filter.matches(item))
        .cloned()
        .collect();
    // sort_by_key is stable
    visible.sort_by_key(|item| item.category);
    visible
}

/// One category heading on the customer menu.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MenuSection {
    pub category: Category,
    pub items: Vec<MenuItem>,
}

/// Split an already ordered listing (see [`available_menu`]) into sections.
#[must_use]
pub fn group_by_category(items: Vec<MenuItem>) -> Vec<MenuSection> {
    let mut sections: Vec<MenuSection> = Vec::new();
    for item in items {
        match sections.last_mut() {
            Some(section) if section.category == item.category => section.items.push(item),
            _ => sections.push(MenuSection {
                category: item.category,
                items: vec![item],
            }),
        }
    }
    sections
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use super::*;

    fn item(name: &str, category: Category, available: bool) -> MenuItem {
        MenuItem {
            id: MenuItemId::generate(),
            name: name.to_string(),
            description: format!("{name} description"),
            price: Decimal::from(10_000),
            category,
            image_url: String::new(),
            available,
        }
    }

    fn draft(price: Decimal) -> MenuItemDraft {
        MenuItemDraft {
            name: "Nasi Goreng".to_string(),
            description: String::new(),
            price,
            category: Category::MainCourse,
            image_url: None,
            available: true,
        }
    }

    #[test]
    fn test_category_wire_names() {
        assert_eq!(
            serde_json::to_string(&Category::MainCourse).unwrap(),
            "\"Main Course\""
        );
        assert_eq!("Desserts".parse::<Category>().unwrap(), Category::Desserts);
        assert_eq!(
            "Soup".parse::<Category>(),
            Err(ValidationError::UnknownCategory("Soup".into()))
        );
        assert_eq!("".parse::<Category>(), Err(ValidationError::CategoryRequired));
    }

    #[test]
    fn test_category_order_is_alphabetical() {
        let mut names: Vec<&str> = Category::ALL.iter().map(Category::as_str).collect();
        let declared = names.clone();
        names.sort_unstable();
        assert_eq!(names, declared);
    }

    #[test]
    fn test_draft_price_bounds() {
        assert!(draft(Decimal::ZERO).validate().is_err());
        assert!(draft(Decimal::from(-1)).validate().is_err());
        assert!(draft(Decimal::from(10_000_001)).validate().is_err());
        assert!(draft(Decimal::from(10_000_000)).validate().is_ok());
        assert!(draft(Decimal::new(5, 1)).validate().is_ok());
    }

    #[test]
    fn test_draft_rejects_empty_name_and_bad_url() {
        let mut d = draft(Decimal::from(1));
        d.name = "  ".into();
        d.image_url = Some("not a url".into());
        let errors = d.validate().unwrap_err();
        assert_eq!(errors.errors().len(), 2);
        assert!(errors.for_field("name").is_some());
        assert!(errors.for_field("imageUrl").is_some());
    }

    #[test]
    fn test_image_url_accepts_blob_and_empty() {
        assert!(validate_image_url("").is_ok());
        assert!(validate_image_url("https://images.example/a.jpg").is_ok());
        assert!(validate_image_url("blob:http://localhost:3000/4f1c").is_ok());
        assert!(validate_image_url("/relative.png").is_err());
    }

    #[test]
    fn test_menu_item_validate() {
        assert!(item("Sate", Category::MainCourse, true).validate().is_ok());

        let mut bad = item(" ", Category::MainCourse, true);
        bad.price = Decimal::ZERO;
        bad.image_url = "not a url".into();
        let errors = bad.validate().unwrap_err();
        assert_eq!(errors.errors().len(), 3);
    }

    #[test]
    fn test_form_reports_all_fields() {
        let form = MenuItemForm {
            name: String::new(),
            price: "abc".into(),
            category: "Soup".into(),
            ..MenuItemForm::default()
        };
        let errors = form.parse().unwrap_err();
        assert_eq!(errors.for_field("name"), Some(&ValidationError::NameRequired));
        assert!(matches!(
            errors.for_field("price"),
            Some(ValidationError::PriceNotANumber(_))
        ));
        assert!(matches!(
            errors.for_field("category"),
            Some(ValidationError::UnknownCategory(_))
        ));
    }

    #[test]
    fn test_form_parses_valid_input() {
        let form = MenuItemForm {
            name: "Es Teh".into(),
            description: "Iced tea".into(),
            price: "8000".into(),
            category: "Beverages".into(),
            image_url: String::new(),
            available: None,
        };
        let d = form.parse().unwrap();
        assert_eq!(d.price, Decimal::from(8_000));
        assert_eq!(d.category, Category::Beverages);
        assert_eq!(d.image_url, None);
        assert!(d.available);
    }

    #[test]
    fn test_patch_validates_only_present_fields() {
        assert!(MenuItemPatch::available(false).validate().is_ok());
        let bad = MenuItemPatch {
            price: Some(Decimal::ZERO),
            ..MenuItemPatch::default()
        };
        assert!(bad.validate().is_err());
        assert!(MenuItemPatch::default().is_empty());
    }

    #[test]
    fn test_patch_apply() {
        let mut it = item("Soto", Category::MainCourse, true);
        it.apply(&MenuItemPatch {
            price: Some(Decimal::from(30_000)),
            available: Some(false),
            ..MenuItemPatch::default()
        });
        assert_eq!(it.price, Decimal::from(30_000));
        assert!(!it.available);
        assert_eq!(it.name, "Soto");
    }

    #[test]
    fn test_available_menu_filters_and_groups() {
        let items = vec![
            item("Sate", Category::MainCourse, true),
            item("Es Jeruk", Category::Beverages, true),
            item("Lumpia", Category::Appetizers, true),
            item("Rendang", Category::MainCourse, true),
            item("Puding", Category::Desserts, false),
            item("Kopi", Category::Beverages, true),
        ];

        let listed = available_menu(&items, &MenuFilter::default());
        let names: Vec<&str> = listed.iter().map(|i| i.name.as_str()).collect();
        assert_eq!(names, ["Lumpia", "Es Jeruk", "Kopi", "Sate", "Rendang"]);

        let sections = group_by_category(listed);
        assert_eq!(sections.len(), 3);
        assert_eq!(sections[0].category, Category::Appetizers);
        assert_eq!(sections[2].items.len(), 2);
    }

    #[test]
    fn test_search_is_case_insensitive_over_all_text() {
        let items = vec![
            item("Sate Ayam", Category::MainCourse, true),
            item("Es Jeruk", Category::Beverages, true),
        ];
        let by_name = available_menu(&items, &MenuFilter::search("AYAM"));
        assert_eq!(by_name.len(), 1);

        let by_category = available_menu(&items, &MenuFilter::search("bever"));
        assert_eq!(by_category[0].name, "Es Jeruk");

        let by_description = available_menu(&items, &MenuFilter::search("jeruk desc"));
        assert_eq!(by_description.len(), 1);

        let blank = available_menu(&items, &MenuFilter::search("   "));
        assert_eq!(blank.len(), 2);
    }

    #[test]
    fn test_category_filter() {
        let items = vec![
            item("Sate", Category::MainCourse, true),
            item("Kopi", Category::Beverages, true),
        ];
        let only = available_menu(&items, &MenuFilter::category(Category::Beverages));
        assert_eq!(only.len(), 1);
        assert_eq!("All".parse::<CategoryFilter>().unwrap(), CategoryFilter::All);
        assert_eq!(
            "Main Course".parse::<CategoryFilter>().unwrap(),
            CategoryFilter::Only(Category::MainCourse)
        );
    }

    #[test]
    fn test_price_serializes_as_number() {
        let it = item("Kopi", Category::Beverages, true);
        let json = serde_json::to_value(&it).unwrap();
        assert!(json["price"].is_number());
        let back: MenuItem = serde_json::from_value(json).unwrap();
        assert_eq!(back.price, Decimal::from(10_000));
    }
}
