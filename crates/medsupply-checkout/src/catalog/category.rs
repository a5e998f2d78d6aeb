//! Category records as served by the storefront API.

use crate::ids::CategoryId;
use serde::{Deserialize, Serialize};

/// A product category in the catalog hierarchy.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Category {
    /// Unique category identifier.
    #[serde(alias = "_id")]
    pub id: CategoryId,
    /// Parent category ID (None for root categories).
    #[serde(default, alias = "parent")]
    pub parent_id: Option<CategoryId>,
    pub name: String,
    /// URL-friendly slug.
    #[serde(default)]
    pub slug: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub image_url: Option<String>,
    /// Sort order position within parent.
    #[serde(default)]
    pub position: i32,
    #[serde(default = "default_active")]
    pub is_active: bool,
}

fn default_active() -> bool {
    true
}

impl Category {
    /// Create a root category with a slug derived from the name.
    pub fn new(id: impl Into<CategoryId>, name: impl Into<String>) -> Self {
        let name = name.into();
        Self {
            id: id.into(),
            parent_id: None,
            slug: slugify(&name),
            name,
            description: None,
            image_url: None,
            position: 0,
            is_active: true,
        }
    }

    pub fn with_parent(mut self, parent_id: impl Into<CategoryId>) -> Self {
        self.parent_id = Some(parent_id.into());
        self
    }

    pub fn with_position(mut self, position: i32) -> Self {
        self.position = position;
        self
    }

    /// Check if this is a root category.
    pub fn is_root(&self) -> bool {
        self.parent_id.is_none()
    }
}

/// Lowercase, ASCII alphanumerics joined by single hyphens.
pub fn slugify(name: &str) -> String {
    let mut slug = String::with_capacity(name.len());
    for c in name.chars() {
        if c.is_ascii_alphanumeric() {
            slug.push(c.to_ascii_lowercase());
        } else if !slug.is_empty() && !slug.ends_with('-') {
            slug.push('-');
        }
    }
    while slug.ends_with('-') {
        slug.pop();
    }
    slug
}
