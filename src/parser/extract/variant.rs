use std::sync::LazyLock;

use scraper::Selector;

use crate::parser::dom::{selector, Selection};
use crate::parser::{validate, ParseError, ParseResult, Variant, ID_RE, NAME_RE};

static LINK: LazyLock<Selector> = LazyLock::new(|| selector("a"));

/// One `<li>` of a union's variant list, linking to the variant's definition.
#[derive(Debug, Clone)]
pub struct RawVariant<'a> {
    item: Selection<'a>,
}

impl<'a> RawVariant<'a> {
    pub fn new(item: Selection<'a>) -> Self {
        Self { item }
    }
}

impl Variant for RawVariant<'_> {
    fn id(&self) -> ParseResult<String> {
        let id = self
            .item
            .find(&LINK)
            .attr("href")
            .ok_or(ParseError::MissingAttribute { attribute: "href" })?;
        validate("id", &ID_RE, id)
    }

    fn name(&self) -> ParseResult<String> {
        validate("name", &NAME_RE, self.item.text())
    }
}

// ── Tests ──

#[cfg(test)]
mod tests {
    use rstest::rstest;
    use scraper::Html;

    use super::*;

    fn with_variant<R>(item: &str, f: impl FnOnce(RawVariant<'_>) -> R) -> R {
        let doc = Html::parse_document(&format!("<ul>{item}</ul>"));
        let li = Selection::from_document(&doc).find(&selector("li"));
        f(RawVariant::new(li))
    }

    #[test]
    fn valid_variant() {
        with_variant(r##"<li><a href="#message"> Message </a></li>"##, |v| {
            assert_eq!(v.id().unwrap(), "#message");
            assert_eq!(v.name().unwrap(), "Message");
        });
    }

    #[rstest]
    #[case::no_link("<li>Message</li>")]
    #[case::link_without_href("<li><a>Message</a></li>")]
    fn missing_href(#[case] item: &str) {
        with_variant(item, |v| {
            assert!(v.id().unwrap_err().is_missing_attribute());
            assert_eq!(v.name().unwrap(), "Message");
        });
    }

    #[rstest]
    #[case::external(r#"<li><a href="https://example.com">Message</a></li>"#)]
    #[case::uppercase(r##"<li><a href="#Message">Message</a></li>"##)]
    fn malformed_href(#[case] item: &str) {
        with_variant(item, |v| assert!(v.id().unwrap_err().is_grammar_mismatch()));
    }

    #[test]
    fn sentence_is_not_a_name() {
        with_variant(r##"<li><a href="#message">a message</a></li>"##, |v| {
            assert!(v.name().unwrap_err().is_grammar_mismatch());
        });
    }
}
