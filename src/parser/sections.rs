use std::sync::LazyLock;

use scraper::Selector;

use super::dom::{selector, Selection};

/// Any heading. Definitions are anchored on headings; the next one ends them.
pub(crate) static HEADING: LazyLock<Selector> =
    LazyLock::new(|| selector("h1, h2, h3, h4, h5, h6"));
/// Narrative text stops at the next heading or at the structured body.
static DESCRIPTION_END: LazyLock<Selector> =
    LazyLock::new(|| selector("h1, h2, h3, h4, h5, h6, table, ul"));
static ANCHOR_LINK: LazyLock<Selector> = LazyLock::new(|| selector("a.anchor"));
static PARAGRAPH: LazyLock<Selector> = LazyLock::new(|| selector("p"));
pub(crate) static TABLE: LazyLock<Selector> = LazyLock::new(|| selector("table"));
pub(crate) static LIST: LazyLock<Selector> = LazyLock::new(|| selector("ul"));

/// The run of flat siblings owned by one heading.
///
/// The document never nests a definition's content under its heading, so
/// membership is inferred from position: everything after the heading up to
/// the next heading belongs to it.
#[derive(Debug, Clone)]
pub struct Section<'a> {
    heading: Selection<'a>,
}

impl<'a> Section<'a> {
    pub fn new(heading: Selection<'a>) -> Self {
        Self { heading }
    }

    /// Normalized heading text.
    pub fn title(&self) -> String {
        self.heading.text()
    }

    /// `href` of the heading's anchor link, if any.
    pub fn anchor_id(&self) -> Option<String> {
        self.heading.find(&ANCHOR_LINK).attr("href")
    }

    /// Full-section boundary: siblings up to the next heading of any rank.
    pub fn body(&self) -> Selection<'a> {
        self.heading.next_until(&HEADING)
    }

    /// Description boundary: siblings up to the next heading or the first
    /// table/list, whichever comes first.
    pub fn lead(&self) -> Selection<'a> {
        self.heading.next_until(&DESCRIPTION_END)
    }

    /// Every paragraph of the description boundary, joined by single spaces.
    /// Empty paragraphs still contribute their separator.
    pub fn description(&self) -> String {
        self.lead()
            .filter(&PARAGRAPH)
            .iter()
            .map(|(_, p)| p.text())
            .collect::<Vec<_>>()
            .join(" ")
    }

    pub fn has_table(&self) -> bool {
        !self.body().filter(&TABLE).is_empty()
    }

    pub fn has_list(&self) -> bool {
        !self.body().filter(&LIST).is_empty()
    }
}

// ── Tests ──
