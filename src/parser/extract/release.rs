use std::sync::LazyLock;

use chrono::NaiveDate;
use regex::Regex;
use scraper::Selector;

use crate::parser::dom::{selector, Selection};
use crate::parser::sections::Section;
use crate::parser::{validate, ParseError, ParseResult, Release};

/// Changelog anchors, e.g. `#february-9-2026`.
pub static RELEASE_ID_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^#[a-z]+-[0-9]{1,2}-[0-9]{4}$").unwrap());
static VERSION_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^Bot API (\d+\.\d+)$").unwrap());

static PARAGRAPH: LazyLock<Selector> = LazyLock::new(|| selector("p"));
static STRONG: LazyLock<Selector> = LazyLock::new(|| selector("strong"));

const DATE_FORMAT: &str = "%B-%d-%Y";

/// A "Recent changes" entry: a dated heading followed by a bold version label.
#[derive(Debug, Clone)]
pub struct RawRelease<'a> {
    section: Section<'a>,
}

impl<'a> RawRelease<'a> {
    pub fn new(heading: Selection<'a>) -> Self {
        Self {
            section: Section::new(heading),
        }
    }

    fn anchor(&self) -> ParseResult<String> {
        self.section
            .anchor_id()
            .ok_or(ParseError::MissingAttribute { attribute: "href" })
    }
}

impl Release for RawRelease<'_> {
    fn id(&self) -> ParseResult<String> {
        validate("release id", &RELEASE_ID_RE, self.anchor()?)
    }

    /// `Bot API 9.4` → `v9.4`.
    fn version(&self) -> ParseResult<String> {
        let label = self.section.body().filter(&PARAGRAPH).find(&STRONG).first();
        if label.is_empty() {
            return Err(ParseError::UnexpectedStructure {
                expected: "a bold version label after the release heading".to_string(),
                found: "none".to_string(),
            });
        }
        let text = label.text();
        match VERSION_RE.captures(&text) {
            Some(caps) => Ok(format!("v{}", &caps[1])),
            None => Err(ParseError::GrammarMismatch {
                what: "version",
                value: text,
                pattern: VERSION_RE.as_str().to_string(),
            }),
        }
    }

    fn date(&self) -> ParseResult<NaiveDate> {
        let id = self.anchor()?;
        id.strip_prefix('#')
            .and_then(|raw| NaiveDate::parse_from_str(raw, DATE_FORMAT).ok())
            .ok_or_else(|| ParseError::GrammarMismatch {
                what: "release date",
                value: id.clone(),
                pattern: format!("#{DATE_FORMAT}"),
            })
    }
}

// ── Tests ──
