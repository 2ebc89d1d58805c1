use std::sync::LazyLock;

use scraper::Selector;

use crate::parser::dom::{selector, Selection};
use crate::parser::{validate, Field, ParseError, ParseResult, JSON_KEY_RE, TYPE_RE};

static CELL: LazyLock<Selector> = LazyLock::new(|| selector("td"));

const COLUMNS: usize = 3;
const OPTIONAL_PREFIX: &str = "Optional";

/// One `<tr>` of an object's field table: key, type, description.
#[derive(Debug, Clone)]
pub struct RawObjectField<'a> {
    row: Selection<'a>,
}

impl<'a> RawObjectField<'a> {
    pub fn new(row: Selection<'a>) -> Self {
        Self { row }
    }

    fn cell(&self, index: usize) -> ParseResult<Selection<'a>> {
        let cells = self.row.find(&CELL);
        if cells.len() != COLUMNS {
            return Err(ParseError::UnexpectedStructure {
                expected: format!("{COLUMNS} columns for object field"),
                found: cells.len().to_string(),
            });
        }
        Ok(cells.at(index))
    }
}

impl Field for RawObjectField<'_> {
    fn name(&self) -> ParseResult<String> {
        self.json_key()
    }

    fn json_key(&self) -> ParseResult<String> {
        validate("json key", &JSON_KEY_RE, self.cell(0)?.text())
    }

    fn type_name(&self) -> ParseResult<String> {
        validate("type", &TYPE_RE, self.cell(1)?.text())
    }

    fn description(&self) -> ParseResult<String> {
        Ok(self.cell(2)?.text())
    }

    /// The docs mark optional fields by starting the description with
    /// "Optional"; there is no structural signal.
    fn is_optional(&self) -> ParseResult<bool> {
        Ok(self.description()?.starts_with(OPTIONAL_PREFIX))
    }
}

// ── Tests ──
