//! Core data models for catalog records and search operations.

mod record;
mod result;
mod search;

pub use record::{DcRecord, FieldValue, ItemsBlock, ItemsPayload};
pub use result::{
    ResultItem, ResultSet, AUTHOR_SEPARATOR, NO_AUTHOR_PLACEHOLDER, NO_TITLE_PLACEHOLDER,
    TITLE_SEPARATOR,
};
pub use search::{GuardError, InputField, SearchQuery, EMPTY_QUERY_NOTICE};
