use std::sync::LazyLock;

use scraper::Selector;

use super::field::RawObjectField;
use crate::parser::dom::{selector, Selection};
use crate::parser::sections::Section;
use crate::parser::{validate, Object, ParseError, ParseResult, ID_RE, NAME_RE};

static FIELD_ROWS: LazyLock<Selector> = LazyLock::new(|| selector("table tbody tr"));

/// Object definition anchored on a heading and backed by a field table.
#[derive(Debug, Clone)]
pub struct RawObject<'a> {
    section: Section<'a>,
}

impl<'a> RawObject<'a> {
    pub fn new(heading: Selection<'a>) -> Self {
        Self {
            section: Section::new(heading),
        }
    }
}

impl<'a> Object for RawObject<'a> {
    type Field = RawObjectField<'a>;

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

    /// Data rows of every table in the section. Header rows live in `<thead>`
    /// and are not matched.
    fn fields(&self) -> impl Iterator<Item = RawObjectField<'a>> {
        self.section
            .body()
            .find(&FIELD_ROWS)
            .into_nodes()
            .map(RawObjectField::new)
    }
}

// ── Tests ──
