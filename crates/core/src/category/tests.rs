//! Tests for category and subcategory lifecycle rules.

use chrono::{TimeZone, Utc};
use proptest::prelude::*;

use finora_shared::types::{SubcategoryId, UserId};

use super::error::CategoryError;
use super::types::{Category, CategoryKind, CreateCategoryInput, FlowKind, MAX_NAME_LEN};

fn input(name: &str) -> CreateCategoryInput {
    CreateCategoryInput {
        name: name.to_string(),
        description: None,
        icon: None,
        color: None,
        kind: CategoryKind::Variable,
        flow: FlowKind::Expense,
        owner_id: UserId::new(),
        is_default: false,
        created_at: Utc.with_ymd_and_hms(2024, 1, 15, 12, 0, 0).unwrap(),
    }
}

fn category(name: &str) -> Category {
    Category::create(input(name)).unwrap()
}

proptest! {
    /// *For any* non-blank name of up to 50 letters, creation succeeds
    /// and stores the name verbatim.
    #[test]
    fn prop_valid_names_accepted(name in "[a-zA-Z]{1,50}") {
        let category = Category::create(input(&name)).expect("name within limits");
        prop_assert_eq!(category.name(), name.as_str());
    }

    /// *For any* name longer than 50 characters, creation fails.
    #[test]
    fn prop_long_names_rejected(name in "[a-zA-Z]{51,100}") {
        let result = Category::create(input(&name));
        let is_too_long = matches!(
            result,
            Err(CategoryError::NameTooLong { max: MAX_NAME_LEN, .. })
        );
        prop_assert!(is_too_long);
    }

    /// *For any* whitespace-only name, creation fails.
    #[test]
    fn prop_blank_names_rejected(name in "[ \t]{0,10}") {
        let result = Category::create(input(&name));
        prop_assert!(matches!(result, Err(CategoryError::NameRequired)));
    }
}

#[cfg(test)]
mod unit_tests {
    use super::*;

    #[test]
    fn test_create_trims_name() {
        let category = category("  Groceries  ");
        assert_eq!(category.name(), "Groceries");
        assert!(category.is_active());
        assert!(category.subcategories().is_empty());
    }

    #[test]
    fn test_name_at_limit_accepted() {
        let name = "x".repeat(MAX_NAME_LEN);
        assert_eq!(category(&name).name(), name);
    }

    #[test]
    fn test_name_over_limit_rejected() {
        let name = "x".repeat(MAX_NAME_LEN + 1);
        let result = Category::create(input(&name));
        assert!(matches!(
            result,
            Err(CategoryError::NameTooLong { len: 51, max: 50 })
        ));
    }

    #[test]
    fn test_rename_validates() {
        let mut category = category("Food");
        category.rename("Dining").unwrap();
        assert_eq!(category.name(), "Dining");

        assert!(matches!(
            category.rename("   "),
            Err(CategoryError::NameRequired)
        ));
        // Failed rename leaves the previous name in place.
        assert_eq!(category.name(), "Dining");
    }

    #[test]
    fn test_add_subcategory() {
        let mut category = category("Food");
        let now = Utc.with_ymd_and_hms(2024, 2, 1, 8, 0, 0).unwrap();

        let id = category.add_subcategory("Coffee", None, now).unwrap();
        let subcategory = category.subcategory(id).unwrap();
        assert_eq!(subcategory.name(), "Coffee");
        assert_eq!(subcategory.category_id(), category.id());
        assert!(subcategory.is_active());
    }

    #[test]
    fn test_duplicate_subcategory_rejected_case_insensitively() {
        let mut category = category("Food");
        let now = Utc.with_ymd_and_hms(2024, 2, 1, 8, 0, 0).unwrap();
        category.add_subcategory("Coffee", None, now).unwrap();

        let duplicate = category.add_subcategory("coffee", None, now);
        assert!(matches!(
            duplicate,
            Err(CategoryError::DuplicateSubcategory(_))
        ));

        let shouting = category.add_subcategory("COFFEE", None, now);
        assert!(shouting.is_err());
        assert_eq!(category.subcategories().len(), 1);
    }

    #[test]
    fn test_rename_subcategory_checks_siblings_only() {
        let mut category = category("Food");
        let now = Utc.with_ymd_and_hms(2024, 2, 1, 8, 0, 0).unwrap();
        let coffee = category.add_subcategory("Coffee", None, now).unwrap();
        category.add_subcategory("Tea", None, now).unwrap();

        // Renaming to a sibling's name fails, even with different case.
        assert!(matches!(
            category.rename_subcategory(coffee, "tea"),
            Err(CategoryError::DuplicateSubcategory(_))
        ));

        // Renaming to its own name (case change) is allowed.
        category.rename_subcategory(coffee, "COFFEE").unwrap();
        assert_eq!(category.subcategory(coffee).unwrap().name(), "COFFEE");
    }

    #[test]
    fn test_rename_missing_subcategory() {
        let mut category = category("Food");
        let missing = SubcategoryId::new();
        assert!(matches!(
            category.rename_subcategory(missing, "Snacks"),
            Err(CategoryError::SubcategoryNotFound(id)) if id == missing
        ));
    }

    #[test]
    fn test_deactivate_subcategory_is_idempotent() {
        let mut category = category("Food");
        let now = Utc.with_ymd_and_hms(2024, 2, 1, 8, 0, 0).unwrap();
        let id = category.add_subcategory("Coffee", None, now).unwrap();

        category.deactivate_subcategory(id).unwrap();
        category.deactivate_subcategory(id).unwrap();
        assert!(!category.subcategory(id).unwrap().is_active());
    }

    #[test]
    fn test_deactivated_subcategory_name_still_reserved() {
        let mut category = category("Food");
        let now = Utc.with_ymd_and_hms(2024, 2, 1, 8, 0, 0).unwrap();
        let id = category.add_subcategory("Coffee", None, now).unwrap();
        category.deactivate_subcategory(id).unwrap();

        assert!(category.add_subcategory("Coffee", None, now).is_err());
    }

    #[test]
    fn test_deactivate_category_is_idempotent_and_local() {
        let mut category = category("Food");
        let now = Utc.with_ymd_and_hms(2024, 2, 1, 8, 0, 0).unwrap();
        let id = category.add_subcategory("Coffee", None, now).unwrap();

        category.deactivate();
        category.deactivate();
        assert!(!category.is_active());
        // Subcategories are untouched by the parent's soft delete.
        assert!(category.subcategory(id).unwrap().is_active());
    }

    #[test]
    fn test_update_appearance_unchecked() {
        let mut category = category("Food");
        category.update_appearance(Some("burger".into()), Some("#ff8800".into()));
        assert_eq!(category.icon(), Some("burger"));
        assert_eq!(category.color(), Some("#ff8800"));

        category.update_appearance(None, None);
        assert_eq!(category.icon(), None);
        assert_eq!(category.color(), None);
    }

    #[test]
    fn test_deserialize_round_trips_valid_category() {
        let mut original = category("Food");
        let now = Utc.with_ymd_and_hms(2024, 2, 1, 8, 0, 0).unwrap();
        original.add_subcategory("Coffee", None, now).unwrap();

        let json = serde_json::to_string(&original).unwrap();
        let back: Category = serde_json::from_str(&json).unwrap();
        assert_eq!(back.id(), original.id());
        assert_eq!(back.name(), "Food");
        assert_eq!(back.subcategories().len(), 1);
    }

    #[test]
    fn test_deserialize_revalidates_names() {
        let category = category("Food");
        let mut value = serde_json::to_value(&category).unwrap();
        value["name"] = "   ".into();

        let result: Result<Category, _> = serde_json::from_value(value);
        assert!(result.is_err());
    }

    #[test]
    fn test_deserialize_rejects_duplicate_subcategories() {
        // Hydration must not admit a sibling set the entity's own
        // add_subcategory would have refused.
        let mut category = category("Food");
        let now = Utc.with_ymd_and_hms(2024, 2, 1, 8, 0, 0).unwrap();
        category.add_subcategory("Coffee", None, now).unwrap();
        category.add_subcategory("Tea", None, now).unwrap();

        let mut value = serde_json::to_value(&category).unwrap();
        value["subcategories"][1]["name"] = "COFFEE".into();

        let result: Result<Category, _> = serde_json::from_value(value);
        assert!(result.is_err());
    }

    #[test]
    fn test_kind_and_flow_serde() {
        assert_eq!(
            serde_json::to_string(&CategoryKind::Fixed).unwrap(),
            "\"fixed\""
        );
        assert_eq!(
            serde_json::to_string(&FlowKind::Income).unwrap(),
            "\"income\""
        );
        let kind: CategoryKind = serde_json::from_str("\"variable\"").unwrap();
        assert_eq!(kind, CategoryKind::Variable);
    }
}
