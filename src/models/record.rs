//! Wire types for the LibraryCloud `items.dc.json` response.
//!
//! LibraryCloud emits Dublin Core fields either as a single string or as an
//! array of strings, depending on how many values the record carries. That
//! ambiguity is resolved once here, at deserialization time, into
//! [`FieldValue`].

use serde::{Deserialize, Serialize};

/// A Dublin Core field that may hold one value or several.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldValue {
    Single(String),
    Multiple(Vec<String>),
}

impl FieldValue {
    /// Collapse the field into display text, joining multiple values with `separator`.
    pub fn join(&self, separator: &str) -> String {
        match self {
            FieldValue::Single(value) => value.clone(),
            FieldValue::Multiple(values) => values.join(separator),
        }
    }

    /// Whether this field carries more than one value slot.
    pub fn is_multiple(&self) -> bool {
        matches!(self, FieldValue::Multiple(_))
    }
}

impl From<&str> for FieldValue {
    fn from(value: &str) -> Self {
        FieldValue::Single(value.to_string())
    }
}

impl From<String> for FieldValue {
    fn from(value: String) -> Self {
        FieldValue::Single(value)
    }
}

impl From<Vec<&str>> for FieldValue {
    fn from(values: Vec<&str>) -> Self {
        FieldValue::Multiple(values.into_iter().map(String::from).collect())
    }
}

impl From<Vec<String>> for FieldValue {
    fn from(values: Vec<String>) -> Self {
        FieldValue::Multiple(values)
    }
}

/// One bibliographic record as returned by the API.
///
/// A missing key and an explicit `null` both deserialize to `None`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DcRecord {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub creator: Option<FieldValue>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub contributor: Option<FieldValue>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<FieldValue>,
}

impl DcRecord {
    /// Create an empty record
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the creator field
    pub fn creator(mut self, creator: impl Into<FieldValue>) -> Self {
        self.creator = Some(creator.into());
        self
    }

    /// Set the contributor field
    pub fn contributor(mut self, contributor: impl Into<FieldValue>) -> Self {
        self.contributor = Some(contributor.into());
        self
    }

    /// Set the title field
    pub fn title(mut self, title: impl Into<FieldValue>) -> Self {
        self.title = Some(title.into());
        self
    }
}

/// The `items` block of the response.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemsBlock {
    pub dc: Vec<DcRecord>,
}

/// Top-level response body: `{ "items": { "dc": [...] } }`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemsPayload {
    pub items: ItemsBlock,
}

impl ItemsPayload {
    /// Wrap a list of records in the response envelope
    pub fn new(records: Vec<DcRecord>) -> Self {
        Self {
            items: ItemsBlock { dc: records },
        }
    }

    /// Records in the order the API returned them
    pub fn records(&self) -> &[DcRecord] {
        &self.items.dc
    }

    pub fn len(&self) -> usize {
        self.items.dc.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.dc.is_empty()
    }
}
