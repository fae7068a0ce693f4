//! Categories and the lookup capability the engine resolves them through.

use std::collections::HashMap;
use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::common::{Displayable, Identifiable};

/// Groups revenue or expense activity for reporting.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Category {
    pub id: Uuid,
    pub name: String,
    #[serde(rename = "type")]
    pub kind: CategoryKind,
}

impl Category {
    pub fn new(name: impl Into<String>, kind: CategoryKind) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            kind,
        }
    }

    /// Placeholder used when a transaction points at a category that no longer resolves.
    pub fn uncategorized(label: impl Into<String>, kind: CategoryKind) -> Self {
        Self {
            id: Uuid::nil(),
            name: label.into(),
            kind,
        }
    }

    pub fn is_uncategorized(&self) -> bool {
        self.id.is_nil()
    }
}

impl Identifiable for Category {
    fn id(&self) -> Uuid {
        self.id
    }
}

impl Displayable for Category {
    fn display_label(&self) -> String {
        format!("{} ({})", self.name, self.kind)
    }
}

/// Supported category types.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum CategoryKind {
    Revenue,
    Expense,
}

impl fmt::Display for CategoryKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            CategoryKind::Revenue => "Revenue",
            CategoryKind::Expense => "Expense",
        };
        f.write_str(label)
    }
}

/// Resolves category identifiers. Owned and supplied by the caller.
pub trait CategoryLookup {
    fn category(&self, id: Uuid) -> Option<&Category>;
}

impl CategoryLookup for [Category] {
    fn category(&self, id: Uuid) -> Option<&Category> {
        self.iter().find(|category| category.id == id)
    }
}

impl CategoryLookup for Vec<Category> {
    fn category(&self, id: Uuid) -> Option<&Category> {
        self.as_slice().category(id)
    }
}

impl CategoryLookup for HashMap<Uuid, Category> {
    fn category(&self, id: Uuid) -> Option<&Category> {
        self.get(&id)
    }
}

impl<L: CategoryLookup + ?Sized> CategoryLookup for &L {
    fn category(&self, id: Uuid) -> Option<&Category> {
        (**self).category(id)
    }
}

/// Returns the category name for `id`, or `fallback` when it does not resolve.
pub fn category_name<'a, L>(lookup: &'a L, id: Uuid, fallback: &'a str) -> &'a str
where
    L: CategoryLookup + ?Sized,
{
    lookup
        .category(id)
        .map(|category| category.name.as_str())
        .unwrap_or(fallback)
}
