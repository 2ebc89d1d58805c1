pub mod anchor;
pub mod dom;
pub mod extract;
pub mod sections;
pub mod specification;

use std::sync::LazyLock;

use regex::Regex;
use thiserror::Error;

pub use dom::Selection;
pub use specification::RawSpecification;

/// Anchor identifiers of definitions and variants, e.g. `#message`.
pub static ID_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^#[a-z0-9]+$").unwrap());
/// PascalCase type names, e.g. `Message`.
pub static NAME_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^[A-Z][a-zA-Z0-9]+$").unwrap());
/// snake_case wire keys of object fields.
pub static JSON_KEY_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^[a-z_]+$").unwrap());
/// Field types, including compound forms like `Array of User` or `Integer or String`.
pub static TYPE_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^[a-zA-Z0-9 ]+$").unwrap());

/// Failure of a single attribute accessor.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    #[error("attribute {attribute} not found")]
    MissingAttribute { attribute: &'static str },

    #[error("{what} {value:?} does not match pattern {pattern}")]
    GrammarMismatch {
        what: &'static str,
        value: String,
        pattern: String,
    },

    #[error("expected {expected}, got {found}")]
    UnexpectedStructure { expected: String, found: String },
}

impl ParseError {
    pub fn is_missing_attribute(&self) -> bool {
        matches!(self, ParseError::MissingAttribute { .. })
    }

    pub fn is_grammar_mismatch(&self) -> bool {
        matches!(self, ParseError::GrammarMismatch { .. })
    }

    pub fn is_unexpected_structure(&self) -> bool {
        matches!(self, ParseError::UnexpectedStructure { .. })
    }
}

pub type ParseResult<T> = Result<T, ParseError>;

/// Return `value` if it fully matches `pattern`, a grammar mismatch otherwise.
pub(crate) fn validate(what: &'static str, pattern: &Regex, value: String) -> ParseResult<String> {
    if pattern.is_match(&value) {
        Ok(value)
    } else {
        Err(ParseError::GrammarMismatch {
            what,
            value,
            pattern: pattern.as_str().to_string(),
        })
    }
}

// ── Capabilities ──
//
// Every accessor is independently fallible: building an entity never fails,
// reading one of its attributes can.

/// One member of a union, e.g. `Message` inside `MaybeInaccessibleMessage`.
pub trait Variant {
    fn id(&self) -> ParseResult<String>;
    fn name(&self) -> ParseResult<String>;
}

/// One property of an object.
pub trait Field {
    /// Display name. Currently the wire key itself; case conventions belong
    /// to the renderer.
    fn name(&self) -> ParseResult<String>;
    fn json_key(&self) -> ParseResult<String>;
    fn type_name(&self) -> ParseResult<String>;
    fn description(&self) -> ParseResult<String>;
    fn is_optional(&self) -> ParseResult<bool>;
}

/// A data-structure definition.
pub trait Object {
    type Field: Field;

    fn id(&self) -> ParseResult<String>;
    fn name(&self) -> ParseResult<String>;
    fn description(&self) -> ParseResult<String>;
    fn fields(&self) -> impl Iterator<Item = Self::Field>;
}

/// A sum-type definition.
pub trait Union {
    type Variant: Variant;

    fn id(&self) -> ParseResult<String>;
    fn name(&self) -> ParseResult<String>;
    fn description(&self) -> ParseResult<String>;
    fn variants(&self) -> impl Iterator<Item = Self::Variant>;
}

/// A changelog entry announcing an API version.
pub trait Release {
    fn id(&self) -> ParseResult<String>;
    fn version(&self) -> ParseResult<String>;
    fn date(&self) -> ParseResult<chrono::NaiveDate>;
}

/// Root query over a whole document. Sequences are re-derived on every call.
pub trait Specification {
    type Object: Object;
    type Union: Union;
    type Release: Release;

    fn objects(&self) -> impl Iterator<Item = Self::Object>;
    fn unions(&self) -> impl Iterator<Item = Self::Union>;
    fn releases(&self) -> impl Iterator<Item = Self::Release>;

    /// Newest release; the changelog lists entries newest-first.
    fn latest_release(&self) -> Option<Self::Release> {
        self.releases().next()
    }
}

// ── Tests ──
