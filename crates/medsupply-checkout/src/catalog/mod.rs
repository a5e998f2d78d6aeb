//! Category hierarchy helpers for the admin catalog screens.

mod category;
mod tree;

pub use category::{slugify, Category};
pub use tree::{build_tree, delete_category, descendant_ids, CategoryNode};
