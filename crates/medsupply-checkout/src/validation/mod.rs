//! Schema-driven field validation for the shipping and payment steps.
//!
//! A [`Schema`] lists fields in declaration order, each with a set of [`Rule`]s.
//! [`validate`] walks the declared fields only, keeps at most one message per field
//! (the first failing rule), and never fails itself.

mod engine;
mod rule;
mod schema;

pub use engine::{validate, FieldErrors, ValidationResult};
pub use rule::{FieldSchema, FieldValue, Rule, Schema, Validatable};
pub use schema::{payment_schema, shipping_schema, SchemaSet};
