use tracing::debug;

use super::anchor::{Anchor, DefinitionKind};
use super::dom::Selection;
use super::extract::{RawObject, RawRelease, RawUnion};
use super::extract::release::RELEASE_ID_RE;
use super::sections::{Section, HEADING};
use super::Specification;

/// Entry point over a parsed documentation page.
///
/// Holds nothing but the root selection: every call rescans the headings, so
/// sequences can be dropped half-way and restarted freely.
#[derive(Debug, Clone)]
pub struct RawSpecification<'a> {
    root: Selection<'a>,
}

impl<'a> RawSpecification<'a> {
    pub fn new(root: Selection<'a>) -> Self {
        Self { root }
    }

    /// Headings of the given kind, in document order. Classification runs
    /// lazily as the sequence is consumed.
    pub fn definitions(&self, kind: DefinitionKind) -> impl Iterator<Item = Selection<'a>> {
        let headings = self.root.find(&HEADING);
        debug!(headings = headings.len(), ?kind, "scanning headings");
        headings
            .into_nodes()
            .filter(move |heading| Anchor::new(heading.clone()).kind() == kind)
    }
}

impl<'a> Specification for RawSpecification<'a> {
    type Object = RawObject<'a>;
    type Union = RawUnion<'a>;
    type Release = RawRelease<'a>;

    fn objects(&self) -> impl Iterator<Item = RawObject<'a>> {
        self.definitions(DefinitionKind::Object).map(RawObject::new)
    }

    fn unions(&self) -> impl Iterator<Item = RawUnion<'a>> {
        self.definitions(DefinitionKind::Union).map(RawUnion::new)
    }

    fn releases(&self) -> impl Iterator<Item = RawRelease<'a>> {
        self.root
            .find(&HEADING)
            .filter_by(|heading| {
                Section::new(heading.clone())
                    .anchor_id()
                    .is_some_and(|id| RELEASE_ID_RE.is_match(&id))
            })
            .into_nodes()
            .map(RawRelease::new)
    }
}

// ── Tests ──
