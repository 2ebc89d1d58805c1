use serde::Serialize;

use super::dom::Selection;
use super::sections::Section;

/// Category of a documentation heading.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DefinitionKind {
    /// Narrative or otherwise irrelevant section.
    Unknown,
    Method,
    Object,
    Union,
}

/// A heading that may start an API definition.
///
/// Classification relies on weak signals only: the anchor id, the case of the
/// first letter, and whether a table or list follows before the next heading.
#[derive(Debug, Clone)]
pub struct Anchor<'a> {
    section: Section<'a>,
}

impl<'a> Anchor<'a> {
    pub fn new(heading: Selection<'a>) -> Self {
        Self {
            section: Section::new(heading),
        }
    }

    /// Never fails; anything that does not look like a definition is `Unknown`.
    pub fn kind(&self) -> DefinitionKind {
        let Some(id) = self.section.anchor_id() else {
            return DefinitionKind::Unknown;
        };
        // Hyphenated ids belong to grouped narrative topics ("#formatting-options").
        if id.contains('-') {
            return DefinitionKind::Unknown;
        }
        let Some(first) = self.section.title().chars().next() else {
            return DefinitionKind::Unknown;
        };
        if first.is_lowercase() {
            return DefinitionKind::Method;
        }
        if !first.is_uppercase() {
            return DefinitionKind::Unknown;
        }
        if self.section.has_table() {
            DefinitionKind::Object
        } else if self.section.has_list() {
            DefinitionKind::Union
        } else {
            DefinitionKind::Unknown
        }
    }
}

// ── Tests ──

#[cfg(test)]
mod tests {
    use rstest::rstest;
    use scraper::Html;

    use super::*;
    use crate::parser::sections::HEADING;

    fn classify(html: &str) -> DefinitionKind {
        let doc = Html::parse_document(html);
        let heading = Selection::from_document(&doc).find(&HEADING).first();
        Anchor::new(heading).kind()
    }

    #[rstest]
    #[case::object(
        r##"<h4><a class="anchor" href="#user"></a>User</h4><p>A user.</p><table><tr><td>id</td></tr></table>"##,
        DefinitionKind::Object
    )]
    #[case::union(
        r##"<h4><a class="anchor" href="#chatmember"></a>ChatMember</h4><p>Members.</p><ul><li>a</li></ul>"##,
        DefinitionKind::Union
    )]
    #[case::table_wins_over_list(
        r##"<h4><a class="anchor" href="#user"></a>User</h4><ul><li>a</li></ul><table><tr><td>id</td></tr></table>"##,
        DefinitionKind::Object
    )]
    #[case::method_with_table(
        r##"<h4><a class="anchor" href="#sendmessage"></a>sendMessage</h4><table><tr><td>chat_id</td></tr></table>"##,
        DefinitionKind::Method
    )]
    #[case::method_without_body(
        r##"<h4><a class="anchor" href="#getme"></a>getMe</h4><p>Returns the bot.</p>"##,
        DefinitionKind::Method
    )]
    #[case::uppercase_without_structure(
        r##"<h4><a class="anchor" href="#inputfile"></a>InputFile</h4><p>Contents of a file.</p>"##,
        DefinitionKind::Unknown
    )]
    #[case::hyphenated_id(
        r##"<h4><a class="anchor" href="#formatting-options"></a>Formatting options</h4><table><tr><td>x</td></tr></table>"##,
        DefinitionKind::Unknown
    )]
    #[case::missing_anchor(
        "<h4>User</h4><table><tr><td>id</td></tr></table>",
        DefinitionKind::Unknown
    )]
    #[case::anchor_without_href(
        r#"<h4><a class="anchor"></a>User</h4><table><tr><td>id</td></tr></table>"#,
        DefinitionKind::Unknown
    )]
    #[case::non_letter_title(
        r##"<h4><a class="anchor" href="#v94"></a>9.4</h4><ul><li>a</li></ul>"##,
        DefinitionKind::Unknown
    )]
    #[case::empty_title(
        r##"<h4><a class="anchor" href="#empty"></a></h4><table><tr><td>x</td></tr></table>"##,
        DefinitionKind::Unknown
    )]
    fn kinds(#[case] html: &str, #[case] expected: DefinitionKind) {
        assert_eq!(classify(html), expected);
    }

    #[test]
    fn table_in_next_section_is_ignored() {
        let html = r##"
            <h4><a class="anchor" href="#inputfile"></a>InputFile</h4>
            <p>Contents of a file.</p>
            <h4><a class="anchor" href="#user"></a>User</h4>
            <table><tr><td>id</td></tr></table>
        "##;
        assert_eq!(classify(html), DefinitionKind::Unknown);
    }

    #[test]
    fn kind_serializes_lowercase() {
        let json = serde_json::to_string(&DefinitionKind::Union).unwrap();
        assert_eq!(json, "\"union\"");
    }
}
