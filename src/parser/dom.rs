use std::collections::HashSet;

use scraper::{ElementRef, Html, Selector};

/// Read-only, ordered set of elements over a parsed HTML tree.
///
/// Every query returns a fresh `Selection`; the tree itself is never touched,
/// so selections are cheap to clone and safe to throw away.
#[derive(Debug, Clone, Default)]
pub struct Selection<'a> {
    nodes: Vec<ElementRef<'a>>,
}

impl<'a> Selection<'a> {
    pub fn new(node: ElementRef<'a>) -> Self {
        Self { nodes: vec![node] }
    }

    /// Selection holding the `<html>` element of a parsed document.
    pub fn from_document(html: &'a Html) -> Self {
        Self::new(html.root_element())
    }

    fn from_nodes(nodes: Vec<ElementRef<'a>>) -> Self {
        Self { nodes }
    }

    /// Text of every element in the set, concatenated without separators and
    /// with whitespace runs collapsed to a single space.
    pub fn text(&self) -> String {
        let raw: String = self.nodes.iter().flat_map(|node| node.text()).collect();
        normalize(&raw)
    }

    /// Whitespace-normalized attribute of the first element, if present.
    pub fn attr(&self, name: &str) -> Option<String> {
        self.nodes
            .first()
            .and_then(|node| node.value().attr(name))
            .map(normalize)
    }

    pub fn first(&self) -> Selection<'a> {
        self.at(0)
    }

    /// Descendants of every element matching `selector`, deduplicated, in
    /// document order per source element.
    pub fn find(&self, selector: &Selector) -> Selection<'a> {
        Self::dedup(self.nodes.iter().flat_map(move |node| node.select(selector)))
    }

    /// Elements of the set that match `selector`.
    pub fn filter(&self, selector: &Selector) -> Selection<'a> {
        let nodes = self
            .nodes
            .iter()
            .copied()
            .filter(|node| selector.matches(node))
            .collect();
        Self::from_nodes(nodes)
    }

    /// Elements of the set for which `predicate` holds. The predicate sees
    /// each element wrapped as a single-element selection.
    pub fn filter_by(&self, predicate: impl Fn(&Selection<'a>) -> bool) -> Selection<'a> {
        let nodes = self
            .nodes
            .iter()
            .copied()
            .filter(|node| predicate(&Selection::new(*node)))
            .collect();
        Self::from_nodes(nodes)
    }

    /// Following element siblings of each element, up to but excluding the
    /// first one matching `stop`. Without a match the run goes to the end.
    pub fn next_until(&self, stop: &Selector) -> Selection<'a> {
        Self::dedup(self.nodes.iter().flat_map(|node| {
            following(node).take_while(move |sibling| !stop.matches(sibling))
        }))
    }

    fn dedup(nodes: impl Iterator<Item = ElementRef<'a>>) -> Selection<'a> {
        let mut seen = HashSet::new();
        Self::from_nodes(nodes.filter(|node| seen.insert(node.id())).collect())
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Element at `index` as a single-element selection; empty when out of range.
    pub fn at(&self, index: usize) -> Selection<'a> {
        match self.nodes.get(index) {
            Some(node) => Selection::new(*node),
            None => Selection::default(),
        }
    }

    /// `(index, element)` pairs in document order.
    pub fn iter(&self) -> impl Iterator<Item = (usize, Selection<'a>)> + '_ {
        self.nodes
            .iter()
            .enumerate()
            .map(|(i, node)| (i, Selection::new(*node)))
    }

    /// Consumes the set, yielding each element as its own selection.
    pub fn into_nodes(self) -> impl Iterator<Item = Selection<'a>> {
        self.nodes.into_iter().map(Selection::new)
    }
}

fn following<'a>(node: &ElementRef<'a>) -> impl Iterator<Item = ElementRef<'a>> {
    node.next_siblings().filter_map(ElementRef::wrap)
}

fn normalize(raw: &str) -> String {
    raw.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Compile a selector known at build time.
pub(crate) fn selector(css: &str) -> Selector {
    Selector::parse(css).unwrap_or_else(|e| panic!("invalid selector {css:?}: {e}"))
}

// ── Tests ──

#[cfg(test)]
mod tests {
    use super::*;

    const DOC: &str = r#"
        <div id="root">
            <h4><a class="anchor" href="  #user "></a>User</h4>
            <p>First   paragraph.</p>
            <p>Second <em>paragraph</em>.</p>
            <table><tr><td>a</td></tr></table>
            <p>After table.</p>
            <h4>Chat</h4>
            <ul><li>one</li></ul>
        </div>
    "#;

    fn doc() -> Html {
        Html::parse_document(DOC)
    }

    #[test]
    fn text_collapses_whitespace() {
        let html = doc();
        let root = Selection::from_document(&html);
        let p = root.find(&selector("p")).at(1);
        assert_eq!(p.text(), "Second paragraph.");
    }

    #[test]
    fn text_concatenates_without_separator() {
        let html = Html::parse_document("<p>a</p><p>b</p>");
        let root = Selection::from_document(&html);
        assert_eq!(root.find(&selector("p")).text(), "ab");
    }

    #[test]
    fn attr_normalized_and_missing() {
        let html = doc();
        let root = Selection::from_document(&html);
        let anchor = root.find(&selector("a.anchor"));
        assert_eq!(anchor.attr("href").as_deref(), Some("#user"));
        assert_eq!(anchor.attr("name"), None);
        assert_eq!(Selection::default().attr("href"), None);
    }

    #[test]
    fn next_until_stops_before_match() {
        let html = doc();
        let root = Selection::from_document(&html);
        let h4 = root.find(&selector("h4")).first();
        let run = h4.next_until(&selector("h4"));
        assert_eq!(run.len(), 4);
        assert_eq!(run.filter(&selector("p")).len(), 3);
        assert!(run.filter(&selector("ul")).is_empty());
    }

    #[test]
    fn next_until_without_match_runs_to_end() {
        let html = doc();
        let root = Selection::from_document(&html);
        let chat = root.find(&selector("h4")).at(1);
        let run = chat.next_until(&selector("h1"));
        assert_eq!(run.len(), 1);
        assert_eq!(run.text(), "one");
    }

    #[test]
    fn at_out_of_range_is_empty() {
        let html = doc();
        let root = Selection::from_document(&html);
        let headings = root.find(&selector("h4"));
        assert_eq!(headings.len(), 2);
        assert!(headings.at(2).is_empty());
        assert!(Selection::default().first().is_empty());
    }

    #[test]
    fn filter_by_preserves_order() {
        let html = doc();
        let root = Selection::from_document(&html);
        let long = root
            .find(&selector("p"))
            .filter_by(|p| p.text().len() > 12);
        let texts: Vec<String> = long.iter().map(|(_, p)| p.text()).collect();
        assert_eq!(texts, vec!["First paragraph.", "Second paragraph."]);
    }

    #[test]
    fn find_deduplicates_nested_sources() {
        let html = Html::parse_document("<div><div><span>x</span></div></div>");
        let root = Selection::from_document(&html);
        let divs = root.find(&selector("div"));
        assert_eq!(divs.len(), 2);
        assert_eq!(divs.find(&selector("span")).len(), 1);
    }

    #[test]
    fn iteration_is_indexed() {
        let html = doc();
        let root = Selection::from_document(&html);
        let indices: Vec<usize> = root.find(&selector("p")).iter().map(|(i, _)| i).collect();
        assert_eq!(indices, vec![0, 1, 2]);
    }
}
