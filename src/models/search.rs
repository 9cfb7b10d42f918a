//! Search query model and the input guard that produces it.

use serde::Serialize;

/// Notice shown when the search field is empty.
pub const EMPTY_QUERY_NOTICE: &str = "Enter a search term";

/// Errors raised by the input guard
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GuardError {
    #[error("{}", EMPTY_QUERY_NOTICE)]
    EmptyQuery,
}

/// A validated search term.
///
/// The value is the raw field text: never trimmed, never escaped, never empty.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct SearchQuery {
    query: String,
}

impl SearchQuery {
    /// Validate the current text of the search field.
    ///
    /// Only the exact empty string is rejected; whitespace-only input and any
    /// length or character set pass through unchanged.
    pub fn from_field(value: impl Into<String>) -> Result<Self, GuardError> {
        let query = value.into();
        if query.is_empty() {
            return Err(GuardError::EmptyQuery);
        }
        Ok(Self { query })
    }

    /// The raw search term
    pub fn as_str(&self) -> &str {
        &self.query
    }

    pub fn into_inner(self) -> String {
        self.query
    }
}

impl std::fmt::Display for SearchQuery {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.query)
    }
}

impl TryFrom<&str> for SearchQuery {
    type Error = GuardError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Self::from_field(value)
    }
}

impl TryFrom<String> for SearchQuery {
    type Error = GuardError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::from_field(value)
    }
}

/// A text field whose current value is read when a search is triggered.
pub trait InputField {
    fn value(&self) -> String;
}

impl InputField for str {
    fn value(&self) -> String {
        self.to_string()
    }
}

impl InputField for String {
    fn value(&self) -> String {
        self.clone()
    }
}

impl<T: InputField + ?Sized> InputField for &T {
    fn value(&self) -> String {
        (**self).value()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_rejected() {
        assert_eq!(SearchQuery::from_field(""), Err(GuardError::EmptyQuery));
        assert_eq!(GuardError::EmptyQuery.to_string(), "Enter a search term");
    }

    #[test]
    fn test_raw_value_kept() {
        let query = SearchQuery::from_field("  whale & sea ").unwrap();
        assert_eq!(query.as_str(), "  whale & sea ");
    }

    #[test]
    fn test_whitespace_only_accepted() {
        let query = SearchQuery::try_from(" ").unwrap();
        assert_eq!(query.to_string(), " ");
    }

    #[test]
    fn test_input_field_reads_current_value() {
        let field = String::from("dickens");
        assert_eq!(field.value(), "dickens");
        assert_eq!((&field).value(), "dickens");
        assert_eq!("twain".value(), "twain");
    }
}
