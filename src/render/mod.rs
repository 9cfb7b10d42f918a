//! HTML rendering of result sets into a results container.
//!
//! [`render`] is a pure function from a [`ResultSet`] to markup. The
//! container the markup lands in is a [`ResultSink`], passed in explicitly
//! so the renderer never reaches for global state. Every successful render
//! replaces the sink's whole content in a single assignment.
//!
//! ```rust
//! use librarycloud_search::models::{ResultItem, ResultSet};
//! use librarycloud_search::render::{render_into, MemoryContainer};
//!
//! let results = ResultSet::new(vec![ResultItem::new("Walden", "Thoreau, Henry David")]);
//! let mut container = MemoryContainer::new();
//! render_into(&mut container, &results).unwrap();
//! assert!(container.content().contains("Walden"));
//! ```

mod sink;

pub use sink::{FileContainer, MemoryContainer, ResultSink, SharedContainer, WriterContainer};

use crate::models::{ResultItem, ResultSet};

/// Append the markup for one record to `out`.
fn push_fragment(out: &mut String, item: &ResultItem) {
    out.push_str("<div class='oneresult'><span class='titleclass'>");
    out.push_str(&item.title);
    out.push_str("</span>, by <span class='authorclass'>");
    out.push_str(&item.author);
    out.push_str("</span></div>");
}

/// Render every record, in order, into one markup string.
///
/// Field values are inserted verbatim. An empty result set renders as an
/// empty string.
pub fn render(results: &ResultSet) -> String {
    let mut out = String::new();
    for item in results {
        push_fragment(&mut out, item);
    }
    out
}

/// Render `results` and replace the sink's content with the markup.
///
/// Returns the number of fragments written.
pub fn render_into<S>(sink: &mut S, results: &ResultSet) -> std::io::Result<usize>
where
    S: ResultSink + ?Sized,
{
    let markup = render(results);
    sink.replace(markup)?;
    tracing::debug!("Rendered {} records into {}", results.len(), sink.describe());
    Ok(results.len())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{DcRecord, ItemsPayload, NO_AUTHOR_PLACEHOLDER};

    const FRAGMENT_OPEN: &str = "<div class='oneresult'>";

    #[test]
    fn test_render_single_fragment_template() {
        let results = ResultSet::new(vec![ResultItem::new("T", "A")]);
        assert_eq!(
            render(&results),
            "<div class='oneresult'><span class='titleclass'>T</span>, by <span class='authorclass'>A</span></div>"
        );
    }

    #[test]
    fn test_render_inserts_values_verbatim() {
        let results = ResultSet::new(vec![ResultItem::new("{title} <b>", "100% {}")]);
        assert_eq!(
            render(&results),
            "<div class='oneresult'><span class='titleclass'>{title} <b></span>, by <span class='authorclass'>100% {}</span></div>"
        );
    }

    #[test]
    fn test_render_normalized_payload() {
        let payload = ItemsPayload::new(vec![
            DcRecord::new().contributor(vec!["X", "Y"]).title(vec!["P1", "P2"]),
            DcRecord::new(),
        ]);
        let markup = render(&ResultSet::from_payload(&payload));

        assert!(markup.contains("<span class='titleclass'>P1 - P2</span>, by <span class='authorclass'>X; Y</span>"));
        assert!(markup.contains(NO_AUTHOR_PLACEHOLDER));
        assert!(markup.contains("[No title listed]"));
    }

    #[test]
    fn test_render_n_fragments_in_order() {
        let results = ResultSet::new(
            (1..=5)
                .map(|i| ResultItem::new(format!("title-{i}"), format!("author-{i}")))
                .collect(),
        );
        let markup = render(&results);

        assert_eq!(markup.matches(FRAGMENT_OPEN).count(), 5);
        let positions: Vec<usize> = (1..=5)
            .map(|i| markup.find(&format!("title-{i}<")).unwrap())
            .collect();
        assert!(positions.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn test_render_empty_is_empty() {
        assert_eq!(render(&ResultSet::default()), "");
    }

    #[test]
    fn test_render_into_replaces_previous_content() {
        let mut container = MemoryContainer::with_content("<p>old results</p>");

        let first = ResultSet::new(vec![
            ResultItem::new("one", "a"),
            ResultItem::new("two", "b"),
        ]);
        assert_eq!(render_into(&mut container, &first).unwrap(), 2);

        let second = ResultSet::new(vec![ResultItem::new("three", "c")]);
        assert_eq!(render_into(&mut container, &second).unwrap(), 1);

        let content = container.content();
        assert!(!content.contains("old results"));
        assert!(!content.contains(">one<"));
        assert_eq!(content.matches(FRAGMENT_OPEN).count(), 1);
        assert!(content.contains("three"));
    }

    #[test]
    fn test_render_into_empty_clears_container() {
        let mut container = MemoryContainer::with_content("stale");
        render_into(&mut container, &ResultSet::default()).unwrap();
        assert_eq!(container.content(), "");
    }
}
