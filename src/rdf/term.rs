//! RDF term model
//!
//! Executors hand back loosely typed binding values ([`RowValue`]). Everything
//! downstream works on their text form, obtained through [`RowValue::to_text`].

use super::prefix::Shorts;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Prefix marking a blank-node label
pub const BLANK_NODE_SENTINEL: &str = "_:";

/// Value bound to a variable in a result row
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RowValue {
    Boolean(bool),
    Integer(i64),
    Float(f64),
    Text(String),
}

impl RowValue {
    /// Text form of the value, whatever its run-time shape
    pub fn to_text(&self) -> String {
        self.to_string()
    }

    /// Borrow the text if this is a text value
    pub fn as_text(&self) -> Option<&str> {
        match self {
            RowValue::Text(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_integer(&self) -> Option<i64> {
        match self {
            RowValue::Integer(i) => Some(*i),
            _ => None,
        }
    }

    /// Whether the text form is empty (the `COALESCE(?x, '')` marker)
    pub fn is_empty_text(&self) -> bool {
        matches!(self, RowValue::Text(s) if s.is_empty())
    }
}

impl fmt::Display for RowValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RowValue::Boolean(b) => write!(f, "{}", b),
            RowValue::Integer(i) => write!(f, "{}", i),
            RowValue::Float(x) => write!(f, "{}", x),
            RowValue::Text(s) => f.write_str(s),
        }
    }
}

impl From<&str> for RowValue {
    fn from(value: &str) -> Self {
        RowValue::Text(value.to_string())
    }
}

impl From<String> for RowValue {
    fn from(value: String) -> Self {
        RowValue::Text(value)
    }
}

impl From<i64> for RowValue {
    fn from(value: i64) -> Self {
        RowValue::Integer(value)
    }
}

impl From<f64> for RowValue {
    fn from(value: f64) -> Self {
        RowValue::Float(value)
    }
}

impl From<bool> for RowValue {
    fn from(value: bool) -> Self {
        RowValue::Boolean(value)
    }
}

/// One result row: variable name → value, in projection order
pub type Row = IndexMap<String, RowValue>;

/// Build a row from `(name, value)` pairs
pub fn row<K, V, I>(pairs: I) -> Row
where
    K: Into<String>,
    V: Into<RowValue>,
    I: IntoIterator<Item = (K, V)>,
{
    pairs
        .into_iter()
        .map(|(k, v)| (k.into(), v.into()))
        .collect()
}

/// A triple to write to a store
#[derive(Debug, Clone, PartialEq)]
pub struct Triple {
    pub subject: RowValue,
    pub predicate: RowValue,
    pub object: RowValue,
}

impl Triple {
    pub fn new(
        subject: impl Into<RowValue>,
        predicate: impl Into<RowValue>,
        object: impl Into<RowValue>,
    ) -> Self {
        Self {
            subject: subject.into(),
            predicate: predicate.into(),
            object: object.into(),
        }
    }
}

/// A triple read back from a store, with the blank-node flags of its row.
///
/// The flags keep the executor's textual convention: only the text `"true"` marks a
/// blank node.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TripleRow {
    pub s: Option<RowValue>,
    pub p: Option<RowValue>,
    pub o: Option<RowValue>,
    pub s_is_blank: Option<RowValue>,
    pub o_is_blank: Option<RowValue>,
}

impl TripleRow {
    pub fn new(
        s: impl Into<RowValue>,
        p: impl Into<RowValue>,
        o: impl Into<RowValue>,
    ) -> Self {
        Self {
            s: Some(s.into()),
            p: Some(p.into()),
            o: Some(o.into()),
            s_is_blank: None,
            o_is_blank: None,
        }
    }

    /// Set both blank flags from their textual form
    pub fn with_blank_flags(mut self, s_is_blank: &str, o_is_blank: &str) -> Self {
        self.s_is_blank = Some(RowValue::from(s_is_blank));
        self.o_is_blank = Some(RowValue::from(o_is_blank));
        self
    }

    /// Read `s`, `p`, `o`, `s_is_blank`, `o_is_blank` from a result row
    pub fn from_row(row: &Row) -> Self {
        Self {
            s: row.get("s").cloned(),
            p: row.get("p").cloned(),
            o: row.get("o").cloned(),
            s_is_blank: row.get("s_is_blank").cloned(),
            o_is_blank: row.get("o_is_blank").cloned(),
        }
    }

    pub fn subject_is_blank(&self) -> bool {
        flag_is_true(self.s_is_blank.as_ref())
    }

    pub fn object_is_blank(&self) -> bool {
        flag_is_true(self.o_is_blank.as_ref())
    }
}

fn flag_is_true(flag: Option<&RowValue>) -> bool {
    flag.map_or(false, |v| v.to_text() == "true")
}

/// Shape of a textual term
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TermKind<'a> {
    /// `a`, shorthand for `rdf:type`
    TypeKeyword,
    /// `?name`
    Variable(&'a str),
    /// Absolute IRI, brackets removed
    Iri(&'a str),
    /// `short:local` with a known short and a plain local part
    PrefixedName(&'a str),
    /// `short:local` with a known short whose local part only fits the expanded IRI
    ExpandableName(&'a str),
    /// Anything else
    Literal(&'a str),
}

/// Classify a text value.
///
/// Absolute IRIs are recognised before prefixed names so a scheme such as `http`
/// is never taken for a short name.
pub fn classify<'a>(text: &'a str, shorts: Shorts<'_>) -> TermKind<'a> {
    if text == "a" {
        return TermKind::TypeKeyword;
    }
    if let Some(name) = text.strip_prefix('?') {
        if !name.is_empty() {
            return TermKind::Variable(text);
        }
    }
    if let Some(inner) = text.strip_prefix('<').and_then(|t| t.strip_suffix('>')) {
        return TermKind::Iri(inner);
    }
    if is_absolute_iri(text) {
        return TermKind::Iri(text);
    }
    if let Some((short, _)) = text.split_once(':') {
        if shorts.contains(short) {
            return if shorts.is_prefixed_name(text) {
                TermKind::PrefixedName(text)
            } else {
                TermKind::ExpandableName(text)
            };
        }
    }
    TermKind::Literal(text)
}

fn is_absolute_iri(text: &str) -> bool {
    let Some((scheme, rest)) = text.split_once(':') else {
        return false;
    };
    let scheme_ok = scheme
        .chars()
        .next()
        .map_or(false, |c| c.is_ascii_alphabetic())
        && scheme
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '+' | '-' | '.'));
    scheme_ok
        && !text.chars().any(char::is_whitespace)
        && (rest.starts_with("//") || matches!(scheme, "urn" | "mailto" | "tag"))
}

/// Blank-node label for a term, if it is one.
///
/// A value already carrying the sentinel is returned as-is; otherwise a flagged value
/// gets the sentinel prepended.
pub fn blank_node_label(text: &str, flagged: bool) -> Option<String> {
    if text.starts_with(BLANK_NODE_SENTINEL) {
        Some(text.to_string())
    } else if flagged {
        Some(format!("{}{}", BLANK_NODE_SENTINEL, text))
    } else {
        None
    }
}
