//! Rule and schema declarations.

use regex::Regex;

use crate::draft::ScreenshotFile;

/// The value of a single declared field, as seen by the engine.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FieldValue<'a> {
    Absent,
    Text(&'a str),
    File(&'a ScreenshotFile),
}

impl<'a> FieldValue<'a> {
    pub fn from_optional(value: Option<&'a str>) -> Self {
        value.map_or(FieldValue::Absent, FieldValue::Text)
    }

    /// Falsy: absent, or text that is empty after trimming.
    pub fn is_blank(&self) -> bool {
        match self {
            FieldValue::Absent => true,
            FieldValue::Text(s) => s.trim().is_empty(),
            FieldValue::File(_) => false,
        }
    }

    /// Present for the purpose of the length, pattern, enum and file rules.
    pub fn is_present(&self) -> bool {
        match self {
            FieldValue::Absent => false,
            FieldValue::Text(s) => !s.is_empty(),
            FieldValue::File(_) => true,
        }
    }
}

/// Exposes named fields to the engine.
///
/// Unknown names must map to [`FieldValue::Absent`].
pub trait Validatable {
    fn field(&self, name: &str) -> FieldValue<'_>;
}

/// One check on a field.
pub enum Rule<T> {
    /// Value must be present and not blank.
    Required,
    /// Value must be present when the predicate holds for the whole object.
    RequiredWhen(fn(&T) -> bool),
    /// Character count bounds, inclusive.
    Length {
        min: Option<usize>,
        max: Option<usize>,
    },
    /// Text must match; `message` overrides the generic "format is invalid".
    Pattern {
        regex: Regex,
        message: Option<String>,
    },
    /// Text must be one of a fixed set.
    OneOf(Vec<String>),
    /// Uploaded file constraints.
    File { mime_types: Vec<String>, max_bytes: u64 },
}

impl<T> Rule<T> {
    pub fn length(min: usize, max: usize) -> Self {
        Rule::Length {
            min: Some(min),
            max: Some(max),
        }
    }

    pub fn max_length(max: usize) -> Self {
        Rule::Length {
            min: None,
            max: Some(max),
        }
    }

    pub fn pattern(regex: &Regex) -> Self {
        Rule::Pattern {
            regex: regex.clone(),
            message: None,
        }
    }

    pub fn one_of<I, S>(values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Rule::OneOf(values.into_iter().map(Into::into).collect())
    }

    /// Evaluation position: presence, length, pattern, enum, file.
    pub(crate) fn rank(&self) -> u8 {
        match self {
            Rule::Required | Rule::RequiredWhen(_) => 0,
            Rule::Length { .. } => 1,
            Rule::Pattern { .. } => 2,
            Rule::OneOf(_) => 3,
            Rule::File { .. } => 4,
        }
    }
}

/// A declared field and its rules, kept in evaluation order.
pub struct FieldSchema<T> {
    pub name: &'static str,
    pub rules: Vec<Rule<T>>,
}

/// Ordered list of declared fields for one sub-object.
pub struct Schema<T> {
    fields: Vec<FieldSchema<T>>,
}

impl<T> Default for Schema<T> {
    fn default() -> Self {
        Self { fields: Vec::new() }
    }
}

impl<T> Schema<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Declare a field. Rules are reordered into evaluation order.
    pub fn field(mut self, name: &'static str, mut rules: Vec<Rule<T>>) -> Self {
        rules.sort_by_key(Rule::rank);
        self.fields.push(FieldSchema { name, rules });
        self
    }

    pub fn fields(&self) -> &[FieldSchema<T>] {
        &self.fields
    }

    pub fn field_names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.fields.iter().map(|f| f.name)
    }
}
