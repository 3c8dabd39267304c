//! Category and subcategory types.
//!
//! Categories classify money flow (income or expense) and cost behavior
//! (fixed or variable). Each category owns its subcategories: they are
//! created, renamed, and deactivated only through the parent, which is
//! where the name-uniqueness rule lives.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use finora_shared::types::{CategoryId, SubcategoryId, UserId};

use super::error::CategoryError;

/// Maximum length of category and subcategory names, in characters.
pub const MAX_NAME_LEN: usize = 50;

/// Cost behavior classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CategoryKind {
    /// Recurring cost of similar size each period (rent, subscriptions).
    Fixed,
    /// Cost that fluctuates period to period (groceries, leisure).
    Variable,
}

impl CategoryKind {
    /// Returns the string representation of the kind.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Fixed => "fixed",
            Self::Variable => "variable",
        }
    }
}

impl fmt::Display for CategoryKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Direction of money flow a category classifies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FlowKind {
    /// Money coming in.
    Income,
    /// Money going out.
    Expense,
}

impl FlowKind {
    /// Returns the string representation of the flow direction.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Income => "income",
            Self::Expense => "expense",
        }
    }
}

impl fmt::Display for FlowKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A subcategory within a category.
///
/// Lifecycle is managed by the owning [`Category`]; there is no way to
/// construct or mutate one outside it.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(try_from = "RawSubcategory")]
pub struct Subcategory {
    id: SubcategoryId,
    name: String,
    icon: Option<String>,
    category_id: CategoryId,
    is_active: bool,
    created_at: DateTime<Utc>,
}

impl Subcategory {
    /// Unique identifier.
    #[must_use]
    pub const fn id(&self) -> SubcategoryId {
        self.id
    }

    /// Display name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Optional icon identifier.
    #[must_use]
    pub fn icon(&self) -> Option<&str> {
        self.icon.as_deref()
    }

    /// The owning category.
    #[must_use]
    pub const fn category_id(&self) -> CategoryId {
        self.category_id
    }

    /// False once soft-deleted.
    #[must_use]
    pub const fn is_active(&self) -> bool {
        self.is_active
    }

    /// Creation timestamp.
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }
}

/// Input for creating a new category.
#[derive(Debug, Clone)]
pub struct CreateCategoryInput {
    /// Display name (non-blank, max 50 characters).
    pub name: String,
    /// Optional description.
    pub description: Option<String>,
    /// Optional icon identifier.
    pub icon: Option<String>,
    /// Optional display color.
    pub color: Option<String>,
    /// Cost behavior classification.
    pub kind: CategoryKind,
    /// Flow direction this category classifies.
    pub flow: FlowKind,
    /// Owning user.
    pub owner_id: UserId,
    /// Whether this is a system-provided default category.
    pub is_default: bool,
    /// Creation timestamp (supplied by the caller, never read from a clock).
    pub created_at: DateTime<Utc>,
}

/// A spending or income category owning its subcategories.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(try_from = "RawCategory")]
pub struct Category {
    id: CategoryId,
    name: String,
    description: Option<String>,
    icon: Option<String>,
    color: Option<String>,
    kind: CategoryKind,
    flow: FlowKind,
    owner_id: UserId,
    is_default: bool,
    is_active: bool,
    created_at: DateTime<Utc>,
    subcategories: Vec<Subcategory>,
}

impl Category {
    /// Creates a category after validating its name.
    ///
    /// # Errors
    ///
    /// Returns `CategoryError::NameRequired` if the name is blank and
    /// `CategoryError::NameTooLong` if it exceeds [`MAX_NAME_LEN`].
    pub fn create(input: CreateCategoryInput) -> Result<Self, CategoryError> {
        let name = validated_name(&input.name)?;
        Ok(Self {
            id: CategoryId::new(),
            name,
            description: input.description,
            icon: input.icon,
            color: input.color,
            kind: input.kind,
            flow: input.flow,
            owner_id: input.owner_id,
            is_default: input.is_default,
            is_active: true,
            created_at: input.created_at,
            subcategories: Vec::new(),
        })
    }

    /// Renames the category, applying the same validation as creation.
    pub fn rename(&mut self, name: &str) -> Result<(), CategoryError> {
        self.name = validated_name(name)?;
        Ok(())
    }

    /// Updates icon and color. Appearance carries no validation rules.
    pub fn update_appearance(&mut self, icon: Option<String>, color: Option<String>) {
        self.icon = icon;
        self.color = color;
    }

    /// Soft-deletes the category. Idempotent; historical records keep
    /// referencing it.
    pub fn deactivate(&mut self) {
        self.is_active = false;
    }

    /// Adds a subcategory, enforcing name rules and case-insensitive
    /// uniqueness among this category's subcategories.
    ///
    /// # Errors
    ///
    /// Returns a name validation error or
    /// `CategoryError::DuplicateSubcategory` if another subcategory
    /// already uses the name (ignoring case).
    pub fn add_subcategory(
        &mut self,
        name: &str,
        icon: Option<String>,
        created_at: DateTime<Utc>,
    ) -> Result<SubcategoryId, CategoryError> {
        let name = validated_name(name)?;
        if self.has_subcategory_named(&name, None) {
            return Err(CategoryError::DuplicateSubcategory(name));
        }

        let id = SubcategoryId::new();
        self.subcategories.push(Subcategory {
            id,
            name,
            icon,
            category_id: self.id,
            is_active: true,
            created_at,
        });
        Ok(id)
    }

    /// Renames a subcategory, re-checking uniqueness against its siblings.
    pub fn rename_subcategory(
        &mut self,
        id: SubcategoryId,
        name: &str,
    ) -> Result<(), CategoryError> {
        let name = validated_name(name)?;
        if self.has_subcategory_named(&name, Some(id)) {
            return Err(CategoryError::DuplicateSubcategory(name));
        }

        let subcategory = self
            .subcategories
            .iter_mut()
            .find(|s| s.id == id)
            .ok_or(CategoryError::SubcategoryNotFound(id))?;
        subcategory.name = name;
        Ok(())
    }

    /// Soft-deletes a subcategory. Idempotent once it exists.
    pub fn deactivate_subcategory(&mut self, id: SubcategoryId) -> Result<(), CategoryError> {
        let subcategory = self
            .subcategories
            .iter_mut()
            .find(|s| s.id == id)
            .ok_or(CategoryError::SubcategoryNotFound(id))?;
        subcategory.is_active = false;
        Ok(())
    }

    /// Unique identifier.
    #[must_use]
    pub const fn id(&self) -> CategoryId {
        self.id
    }

    /// Display name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Optional description.
    #[must_use]
    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    /// Optional icon identifier.
    #[must_use]
    pub fn icon(&self) -> Option<&str> {
        self.icon.as_deref()
    }

    /// Optional display color.
    #[must_use]
    pub fn color(&self) -> Option<&str> {
        self.color.as_deref()
    }

    /// Cost behavior classification.
    #[must_use]
    pub const fn kind(&self) -> CategoryKind {
        self.kind
    }

    /// Flow direction this category classifies.
    #[must_use]
    pub const fn flow(&self) -> FlowKind {
        self.flow
    }

    /// Owning user.
    #[must_use]
    pub const fn owner_id(&self) -> UserId {
        self.owner_id
    }

    /// Whether this is a system-provided default category.
    #[must_use]
    pub const fn is_default(&self) -> bool {
        self.is_default
    }

    /// False once soft-deleted.
    #[must_use]
    pub const fn is_active(&self) -> bool {
        self.is_active
    }

    /// Creation timestamp.
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// All subcategories, including deactivated ones.
    #[must_use]
    pub fn subcategories(&self) -> &[Subcategory] {
        &self.subcategories
    }

    /// Looks up a subcategory by id.
    #[must_use]
    pub fn subcategory(&self, id: SubcategoryId) -> Option<&Subcategory> {
        self.subcategories.iter().find(|s| s.id == id)
    }

    /// Case-insensitive name check, optionally ignoring one subcategory
    /// (the one being renamed). Deactivated subcategories still count.
    fn has_subcategory_named(&self, name: &str, excluding: Option<SubcategoryId>) -> bool {
        let needle = name.to_lowercase();
        self.subcategories
            .iter()
            .filter(|s| Some(s.id) != excluding)
            .any(|s| s.name.to_lowercase() == needle)
    }
}

/// Serde-facing mirror of `Subcategory` without the name invariant.
#[derive(Deserialize)]
struct RawSubcategory {
    id: SubcategoryId,
    name: String,
    icon: Option<String>,
    category_id: CategoryId,
    is_active: bool,
    created_at: DateTime<Utc>,
}

impl TryFrom<RawSubcategory> for Subcategory {
    type Error = CategoryError;

    fn try_from(raw: RawSubcategory) -> Result<Self, Self::Error> {
        Ok(Self {
            id: raw.id,
            name: validated_name(&raw.name)?,
            icon: raw.icon,
            category_id: raw.category_id,
            is_active: raw.is_active,
            created_at: raw.created_at,
        })
    }
}

/// Serde-facing mirror of `Category` without the invariants.
///
/// Deserialization re-runs the name and uniqueness validation, so a
/// hydrated category obeys the same rules as a created one.
#[derive(Deserialize)]
struct RawCategory {
    id: CategoryId,
    name: String,
    description: Option<String>,
    icon: Option<String>,
    color: Option<String>,
    kind: CategoryKind,
    flow: FlowKind,
    owner_id: UserId,
    is_default: bool,
    is_active: bool,
    created_at: DateTime<Utc>,
    subcategories: Vec<Subcategory>,
}

impl TryFrom<RawCategory> for Category {
    type Error = CategoryError;

    fn try_from(raw: RawCategory) -> Result<Self, Self::Error> {
        let name = validated_name(&raw.name)?;
        for (i, subcategory) in raw.subcategories.iter().enumerate() {
            let needle = subcategory.name.to_lowercase();
            if raw.subcategories[..i]
                .iter()
                .any(|other| other.name.to_lowercase() == needle)
            {
                return Err(CategoryError::DuplicateSubcategory(
                    subcategory.name.clone(),
                ));
            }
        }
        Ok(Self {
            id: raw.id,
            name,
            description: raw.description,
            icon: raw.icon,
            color: raw.color,
            kind: raw.kind,
            flow: raw.flow,
            owner_id: raw.owner_id,
            is_default: raw.is_default,
            is_active: raw.is_active,
            created_at: raw.created_at,
            subcategories: raw.subcategories,
        })
    }
}

/// Validates and trims a category or subcategory name.
fn validated_name(name: &str) -> Result<String, CategoryError> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return Err(CategoryError::NameRequired);
    }
    let len = trimmed.chars().count();
    if len > MAX_NAME_LEN {
        return Err(CategoryError::NameTooLong {
            len,
            max: MAX_NAME_LEN,
        });
    }
    Ok(trimmed.to_string())
}
