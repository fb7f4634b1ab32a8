//! `Part`: the tree's alphabet.
//!
//! Every registered pattern is decomposed into an ordered list of parts,
//! one list entry per pattern fragment, each tagged with the URL component
//! it constrains. Parts are what the prefix tree shares between routes:
//! two routes share a node exactly when their parts at that depth are
//! *structurally equivalent* (equal by everything except the capture
//! name).

use std::fmt;

use serde::{Deserialize, Serialize};

/// A section of a URL. The variants carry a fixed total order; parts of a
/// pattern and components of a match input are both produced in this
/// order, which lets the matcher walk them as a merge rather than a
/// search.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UrlComponent {
    Protocol,
    Username,
    Password,
    Hostname,
    Port,
    Pathname,
    Search,
    Hash,
}

impl UrlComponent {
    /// All components in match order.
    pub const ALL: [UrlComponent; 8] = [
        UrlComponent::Protocol,
        UrlComponent::Username,
        UrlComponent::Password,
        UrlComponent::Hostname,
        UrlComponent::Port,
        UrlComponent::Pathname,
        UrlComponent::Search,
        UrlComponent::Hash,
    ];

    /// Lowercase component name, as it appears in pattern inits.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            UrlComponent::Protocol => "protocol",
            UrlComponent::Username => "username",
            UrlComponent::Password => "password",
            UrlComponent::Hostname => "hostname",
            UrlComponent::Port => "port",
            UrlComponent::Pathname => "pathname",
            UrlComponent::Search => "search",
            UrlComponent::Hash => "hash",
        }
    }
}

impl fmt::Display for UrlComponent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// How often a part may repeat.
///
/// Mirrors the URLPattern modifiers: none, `?` (optional), `*` (zero or
/// more), `+` (one or more).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum Modifier {
    #[default]
    None,
    Optional,
    ZeroOrMore,
    OneOrMore,
}

impl Modifier {
    /// Whether this modifier admits a zero-width match at the tree level.
    ///
    /// OneOrMore is included: the external engine accepts zero-width
    /// OneOrMore matches for some pattern shapes, so the tree must not
    /// rule them out.
    #[must_use]
    pub fn allows_zero(self) -> bool {
        !matches!(self, Modifier::None)
    }
}

/// The four part kinds the tree distinguishes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PartKind {
    /// A literal that must match exactly.
    Fixed,
    /// A named hole bounded by the component's delimiter, with optional
    /// literal prefix and suffix (`:id`, `{/:id}`).
    SegmentWildcard,
    /// `*`: matches any run of characters, including the delimiter.
    FullWildcard,
    /// A custom regular expression group (`(\d+)`).
    Regexp,
}

/// One element of a pattern's parsed form.
///
/// `value` holds the literal text for `Fixed` and the raw regex source
/// (no anchors, no delimiters) for `Regexp`; it is empty for wildcards.
/// `prefix` and `suffix` frame wildcard and regexp parts (`{/:id.html}`
/// has prefix `/` and suffix `.html`). `name` is the capture name and is
/// deliberately excluded from structural equivalence: `/books/:id` and
/// `/books/:bookId` share every tree node.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Part {
    pub kind: PartKind,
    pub component: UrlComponent,
    pub modifier: Modifier,
    pub value: String,
    pub prefix: String,
    pub suffix: String,
    pub name: String,
}

impl Part {
    pub(crate) fn fixed(component: UrlComponent, value: impl Into<String>) -> Self {
        Part {
            kind: PartKind::Fixed,
            component,
            modifier: Modifier::None,
            value: value.into(),
            prefix: String::new(),
            suffix: String::new(),
            name: String::new(),
        }
    }

    /// Structural equivalence: equality of (kind, component, modifier,
    /// value, prefix, suffix). The capture name is ignored, which is what
    /// enables prefix sharing across differently-named captures.
    #[must_use]
    pub fn same_shape(&self, other: &Part) -> bool {
        self.kind == other.kind
            && self.component == other.component
            && self.modifier == other.modifier
            && self.value == other.value
            && self.prefix == other.prefix
            && self.suffix == other.suffix
    }
}
