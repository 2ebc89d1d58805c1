use std::sync::LazyLock;

use scraper::Selector;

use super::variant::RawVariant;
use crate::parser::dom::{selector, Selection};
use crate::parser::sections::Section;
use crate::parser::{validate, ParseError, ParseResult, Union, ID_RE, NAME_RE};

static VARIANT_ITEMS: LazyLock<Selector> = LazyLock::new(|| selector("ul li"));

/// Union definition anchored on a heading and backed by a bullet list of
/// variant links.
#[derive(Debug, Clone)]
pub struct RawUnion<'a> {
    section: Section<'a>,
}

impl<'a> RawUnion<'a> {
    pub fn new(heading: Selection<'a>) -> Self {
        Self {
            section: Section::new(heading),
        }
    }
}

impl<'a> Union for RawUnion<'a> {
    type Variant = RawVariant<'a>;

    fn id(&self) -> ParseResult<String> {
        let id = self
            .section
            .anchor_id()
            .ok_or(ParseError::MissingAttribute { attribute: "href" })?;
        validate("id", &ID_RE, id)
    }

    fn name(&self) -> ParseResult<String> {
        validate("name", &NAME_RE, self.section.title())
    }

    fn description(&self) -> ParseResult<String> {
        Ok(self.section.description())
    }

    fn variants(&self) -> impl Iterator<Item = RawVariant<'a>> {
        self.section
            .body()
            .find(&VARIANT_ITEMS)
            .into_nodes()
            .map(RawVariant::new)
    }
}

// ── Tests ──
