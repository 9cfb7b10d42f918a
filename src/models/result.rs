//! Display-ready records derived from the API payload.

use serde::{Deserialize, Serialize};

use super::record::{DcRecord, FieldValue, ItemsPayload};

/// Shown when a record has neither `creator` nor `contributor`.
pub const NO_AUTHOR_PLACEHOLDER: &str = "[No author listed]";

/// Shown when a record has no `title`.
pub const NO_TITLE_PLACEHOLDER: &str = "[No title listed]";

/// Separator between multiple author values
pub const AUTHOR_SEPARATOR: &str = "; ";

/// Separator between multiple title values
pub const TITLE_SEPARATOR: &str = " - ";

/// One record normalized for display
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResultItem {
    pub title: String,
    pub author: String,
}

impl ResultItem {
    pub fn new(title: impl Into<String>, author: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            author: author.into(),
        }
    }

    /// Normalize a raw record.
    ///
    /// `creator` wins over `contributor`; a record with neither gets
    /// [`NO_AUTHOR_PLACEHOLDER`]. A record without `title` gets
    /// [`NO_TITLE_PLACEHOLDER`].
    pub fn from_record(record: &DcRecord) -> Self {
        let author = record
            .creator
            .as_ref()
            .or(record.contributor.as_ref())
            .map(|value| value.join(AUTHOR_SEPARATOR))
            .unwrap_or_else(|| NO_AUTHOR_PLACEHOLDER.to_string());

        let title = record
            .title
            .as_ref()
            .map(|value: &FieldValue| value.join(TITLE_SEPARATOR))
            .unwrap_or_else(|| NO_TITLE_PLACEHOLDER.to_string());

        Self { title, author }
    }
}

impl From<&DcRecord> for ResultItem {
    fn from(record: &DcRecord) -> Self {
        Self::from_record(record)
    }
}

/// Ordered results of one search, in the order the API returned them
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ResultSet {
    items: Vec<ResultItem>,
}

impl ResultSet {
    pub fn new(items: Vec<ResultItem>) -> Self {
        Self { items }
    }

    /// Build a result set from a response payload, preserving record order
    pub fn from_payload(payload: &ItemsPayload) -> Self {
        Self {
            items: payload.records().iter().map(ResultItem::from).collect(),
        }
    }

    pub fn items(&self) -> &[ResultItem] {
        &self.items
    }

    pub fn iter(&self) -> std::slice::Iter<'_, ResultItem> {
        self.items.iter()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

impl From<&ItemsPayload> for ResultSet {
    fn from(payload: &ItemsPayload) -> Self {
        Self::from_payload(payload)
    }
}

impl<'a> IntoIterator for &'a ResultSet {
    type Item = &'a ResultItem;
    type IntoIter = std::slice::Iter<'a, ResultItem>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}
