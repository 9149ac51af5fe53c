//! Categories

use crate::ids::CategoryId;

/// Catalog category.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Category {
    /// Category identifier
    pub id: CategoryId,

    /// Display name
    pub name: String,

    /// Optional description
    pub description: Option<String>,

    /// Parent category for nested categories
    pub parent: Option<CategoryId>,

    /// Image reference
    pub image: String,

    /// Whether the category is shown
    pub active: bool,
}

impl Category {
    /// Create an active top-level category.
    pub fn new(id: impl Into<CategoryId>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            description: None,
            parent: None,
            image: String::new(),
            active: true,
        }
    }

    /// Whether this category sits at the top of the tree.
    pub fn is_root(&self) -> bool {
        self.parent.is_none()
    }
}
