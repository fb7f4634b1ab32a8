//! Pattern-string parsing: one URL component's pattern → ordered parts.
//!
//! Implements the URLPattern pattern grammar (path-to-regexp style):
//! literal text, `:name` holes, `(regexp)` groups, `*` wildcards, brace
//! groups with prefix/suffix text, and the `?`/`+`/`*` modifiers. The
//! output is the part list the tree is built from, so the rules here
//! decide what structure routes can share.
//!
//! Two deviations from a general-purpose pattern compiler, both
//! deliberate:
//!
//! - Fixed pathname text is split per segment (`"/a/b"` → `"/a"`, `"/b"`)
//!   so that inserting a new route never has to split an existing tree
//!   node.
//! - Parsing is allowed to give up: the engine has already validated the
//!   pattern at registration, so a component this module cannot digest is
//!   simply left out of the part list. The tree then under-constrains and
//!   the engine filters at confirmation time. Giving up must never happen
//!   for patterns this module's tests cover; the fallback exists for the
//!   long tail.

use crate::part::{Modifier, Part, PartKind, UrlComponent};

/// Per-component grammar options.
///
/// Pathname treats `/` as both delimiter and implicit hole prefix;
/// hostname treats `.` as delimiter; every other component has neither.
fn delimiter(component: UrlComponent) -> Option<char> {
    match component {
        UrlComponent::Pathname => Some('/'),
        UrlComponent::Hostname => Some('.'),
        _ => None,
    }
}

fn implicit_prefix(component: UrlComponent) -> Option<char> {
    match component {
        UrlComponent::Pathname => Some('/'),
        _ => None,
    }
}

/// The generated regexes a `:name` hole compiles to, used to classify an
/// explicitly authored regexp back to the simpler part kinds. Both the
/// delimiter-escaped and bare spellings are recognized.
fn segment_wildcard_sources(component: UrlComponent) -> [String; 2] {
    match delimiter(component) {
        Some(d) => [format!("[^\\{d}]+?"), format!("[^{d}]+?")],
        None => ["[^]+?".to_string(), "[^]+?".to_string()],
    }
}

#[derive(Debug, Clone, PartialEq)]
enum Token {
    Open,
    Close,
    Name(String),
    Regexp(String),
    Asterisk,
    OtherModifier(char),
    Char(char),
}

fn is_name_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_' || c == '$'
}

/// Lexes a component pattern string. Returns `None` on input the grammar
/// cannot represent (dangling escape, unterminated regexp group).
fn tokenize(input: &str) -> Option<Vec<Token>> {
    let chars: Vec<char> = input.chars().collect();
    let mut tokens = Vec::new();
    let mut i = 0;

    while i < chars.len() {
        match chars[i] {
            '\\' => {
                i += 1;
                let c = *chars.get(i)?;
                tokens.push(Token::Char(c));
                i += 1;
            }
            '{' => {
                tokens.push(Token::Open);
                i += 1;
            }
            '}' => {
                tokens.push(Token::Close);
                i += 1;
            }
            '*' => {
                tokens.push(Token::Asterisk);
                i += 1;
            }
            c @ ('?' | '+') => {
                tokens.push(Token::OtherModifier(c));
                i += 1;
            }
            ':' => {
                let start = i + 1;
                let mut end = start;
                while end < chars.len() && is_name_char(chars[end]) {
                    end += 1;
                }
                if end == start {
                    // A bare colon is literal text.
                    tokens.push(Token::Char(':'));
                    i += 1;
                } else {
                    tokens.push(Token::Name(chars[start..end].iter().collect()));
                    i = end;
                }
            }
            '(' => {
                let mut depth = 1;
                let mut j = i + 1;
                let mut source = String::new();
                while j < chars.len() && depth > 0 {
                    match chars[j] {
                        '\\' => {
                            source.push('\\');
                            j += 1;
                            source.push(*chars.get(j)?);
                        }
                        '(' => {
                            depth += 1;
                            source.push('(');
                        }
                        ')' => {
                            depth -= 1;
                            if depth > 0 {
                                source.push(')');
                            }
                        }
                        c => source.push(c),
                    }
                    j += 1;
                }
                if depth != 0 {
                    return None;
                }
                tokens.push(Token::Regexp(source));
                i = j;
            }
            c => {
                tokens.push(Token::Char(c));
                i += 1;
            }
        }
    }

    Some(tokens)
}

#[derive(Debug, Clone, PartialEq)]
enum Group {
    Regexp(String),
    Wildcard,
}

struct ComponentParser {
    tokens: Vec<Token>,
    index: usize,
    component: UrlComponent,
    parts: Vec<Part>,
    pending_fixed: String,
    next_positional: usize,
}

impl ComponentParser {
    fn new(component: UrlComponent, tokens: Vec<Token>) -> Self {
        ComponentParser {
            tokens,
            index: 0,
            component,
            parts: Vec::new(),
            pending_fixed: String::new(),
            next_positional: 0,
        }
    }

    fn try_char(&mut self) -> Option<char> {
        if let Some(Token::Char(c)) = self.tokens.get(self.index) {
            let c = *c;
            self.index += 1;
            Some(c)
        } else {
            None
        }
    }

    fn try_name(&mut self) -> Option<String> {
        if let Some(Token::Name(n)) = self.tokens.get(self.index) {
            let n = n.clone();
            self.index += 1;
            Some(n)
        } else {
            None
        }
    }

    /// A `*` counts as a wildcard group only when no name precedes it;
    /// after a name it is left for the modifier position (`:name*`).
    fn try_group(&mut self, has_name: bool) -> Option<Group> {
        match self.tokens.get(self.index) {
            Some(Token::Regexp(r)) => {
                let r = r.clone();
                self.index += 1;
                Some(Group::Regexp(r))
            }
            Some(Token::Asterisk) if !has_name => {
                self.index += 1;
                Some(Group::Wildcard)
            }
            _ => None,
        }
    }

    fn try_open(&mut self) -> bool {
        if let Some(Token::Open) = self.tokens.get(self.index) {
            self.index += 1;
            true
        } else {
            false
        }
    }

    fn try_close(&mut self) -> bool {
        if let Some(Token::Close) = self.tokens.get(self.index) {
            self.index += 1;
            true
        } else {
            false
        }
    }

    fn try_modifier(&mut self) -> Modifier {
        match self.tokens.get(self.index) {
            Some(Token::OtherModifier('?')) => {
                self.index += 1;
                Modifier::Optional
            }
            Some(Token::OtherModifier('+')) => {
                self.index += 1;
                Modifier::OneOrMore
            }
            Some(Token::Asterisk) => {
                self.index += 1;
                Modifier::ZeroOrMore
            }
            _ => Modifier::None,
        }
    }

    fn consume_text(&mut self) -> String {
        let mut text = String::new();
        while let Some(c) = self.try_char() {
            text.push(c);
        }
        text
    }

    fn flush_fixed(&mut self) {
        if !self.pending_fixed.is_empty() {
            let value = std::mem::take(&mut self.pending_fixed);
            self.parts.push(Part::fixed(self.component, value));
        }
    }

    fn add_part(
        &mut self,
        prefix: String,
        name: Option<String>,
        group: Option<Group>,
        suffix: String,
        modifier: Modifier,
    ) {
        if name.is_none() && group.is_none() && modifier == Modifier::None {
            // A brace group with only text folds into the fixed run.
            self.pending_fixed.push_str(&prefix);
            self.pending_fixed.push_str(&suffix);
            return;
        }

        self.flush_fixed();

        if name.is_none() && group.is_none() {
            // Modified literal: `{.html}?`.
            let mut value = prefix;
            value.push_str(&suffix);
            self.parts.push(Part {
                kind: PartKind::Fixed,
                component: self.component,
                modifier,
                value,
                prefix: String::new(),
                suffix: String::new(),
                name: String::new(),
            });
            return;
        }

        let segment_sources = segment_wildcard_sources(self.component);
        let (kind, value) = match &group {
            None => (PartKind::SegmentWildcard, String::new()),
            Some(Group::Wildcard) => (PartKind::FullWildcard, String::new()),
            Some(Group::Regexp(r)) if r == ".*" => (PartKind::FullWildcard, String::new()),
            Some(Group::Regexp(r)) if segment_sources.contains(r) => {
                (PartKind::SegmentWildcard, String::new())
            }
            Some(Group::Regexp(r)) => (PartKind::Regexp, r.clone()),
        };

        let name = name.unwrap_or_else(|| {
            let n = self.next_positional.to_string();
            self.next_positional += 1;
            n
        });

        self.parts.push(Part {
            kind,
            component: self.component,
            modifier,
            value,
            prefix,
            suffix,
            name,
        });
    }

    fn parse(mut self) -> Option<Vec<Part>> {
        let prefix_char = implicit_prefix(self.component);

        while self.index < self.tokens.len() {
            let char_token = self.try_char();
            let name = self.try_name();
            let group = self.try_group(name.is_some());

            if name.is_some() || group.is_some() {
                let mut prefix = char_token.map(String::from).unwrap_or_default();
                if !prefix.is_empty() && char_token != prefix_char {
                    // Only the component's hole prefix stays attached to
                    // the part; anything else is fixed text.
                    self.pending_fixed.push_str(&prefix);
                    prefix.clear();
                }
                let modifier = self.try_modifier();
                self.add_part(prefix, name, group, String::new(), modifier);
                continue;
            }

            if let Some(c) = char_token {
                self.pending_fixed.push(c);
                continue;
            }

            if self.try_open() {
                let prefix = self.consume_text();
                let name = self.try_name();
                let group = self.try_group(name.is_some());
                let suffix = self.consume_text();
                if !self.try_close() {
                    return None;
                }
                let modifier = self.try_modifier();
                self.add_part(prefix, name, group, suffix, modifier);
                continue;
            }

            // Stray modifier or close brace.
            return None;
        }

        self.flush_fixed();
        Some(self.parts)
    }
}

/// Splits fixed pathname parts into per-segment pieces so later inserts
/// only ever append children, never split a node's literal.
fn split_fixed_segments(parts: Vec<Part>) -> Vec<Part> {
    let mut out = Vec::with_capacity(parts.len());
    for part in parts {
        let splittable = part.kind == PartKind::Fixed
            && part.modifier == Modifier::None
            && part.component == UrlComponent::Pathname;
        if !splittable {
            out.push(part);
            continue;
        }
        let mut piece = String::new();
        for c in part.value.chars() {
            if c == '/' && !piece.is_empty() {
                out.push(Part::fixed(part.component, std::mem::take(&mut piece)));
            }
            piece.push(c);
        }
        if !piece.is_empty() {
            out.push(Part::fixed(part.component, piece));
        }
    }
    out
}

/// Parses one component's pattern string into parts.
///
/// Returns `None` when the grammar cannot represent the input; callers
/// omit the component from the part list (under-constraining the tree is
/// always safe).
pub(crate) fn parse_component(component: UrlComponent, pattern: &str) -> Option<Vec<Part>> {
    let tokens = tokenize(pattern)?;
    let parts = ComponentParser::new(component, tokens).parse()?;
    Some(split_fixed_segments(parts))
}

/// Parses a processed init (per-component pattern strings) into the flat
/// part list the tree consumes. Catch-all (`*`) and empty components are
/// omitted, as are components the grammar cannot digest.
pub(crate) fn parse_parts(components: &[(UrlComponent, String)]) -> Vec<Part> {
    let mut parts = Vec::new();
    for (component, pattern) in components {
        if pattern.is_empty() || pattern == "*" {
            continue;
        }
        match parse_component(*component, pattern) {
            Some(component_parts) => parts.extend(component_parts),
            None => {
                tracing::debug!(
                    component = %component,
                    pattern = %pattern,
                    "pattern component not representable as parts; relying on engine filtering"
                );
            }
        }
    }
    parts
}
