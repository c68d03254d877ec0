//! Namespace prefixes and the prefix registry
//!
//! A [`PrefixRegistry`] is an ordered set of `(short, namespace)` bindings keyed by
//! the short name. It is owned by whoever constructs it: components that need extra
//! bindings clone it first ([`PrefixRegistry::copy`]) and extend the clone.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Prefix errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PrefixError {
    /// Short name is empty
    #[error("Prefix short name must not be empty")]
    EmptyShort,

    /// Short name already bound to another namespace
    #[error("Prefix '{short}' is already bound to <{existing}>, refusing to rebind it to <{requested}>")]
    Conflict {
        short: String,
        existing: String,
        requested: String,
    },
}

pub type PrefixResult<T> = Result<T, PrefixError>;

/// Namespace prefix (short name → namespace IRI)
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Prefix {
    /// Short name, without the trailing colon
    pub short: String,
    /// Namespace IRI
    #[serde(rename = "long")]
    pub namespace: String,
}

impl Prefix {
    /// Create a new prefix
    pub fn new(short: impl Into<String>, namespace: impl Into<String>) -> Self {
        Self {
            short: short.into(),
            namespace: namespace.into(),
        }
    }

    /// SPARQL declaration: `PREFIX short: <namespace>`
    pub fn to_sparql(&self) -> String {
        format!("PREFIX {}: <{}>", self.short, self.namespace)
    }

    /// Turtle directive: `@prefix short: <namespace> .`
    pub fn to_turtle(&self) -> String {
        format!("@prefix {}: <{}> .", self.short, self.namespace)
    }
}

/// Ordered, deduplicated collection of prefixes
///
/// Insertion order is kept for display (headers). Compaction picks the first
/// binding, in insertion order, whose namespace starts the IRI.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PrefixRegistry {
    entries: IndexMap<String, String>,
}

impl PrefixRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a registry from a sequence of prefixes
    pub fn from_prefixes<I>(prefixes: I) -> PrefixResult<Self>
    where
        I: IntoIterator<Item = Prefix>,
    {
        let mut registry = Self::new();
        for prefix in prefixes {
            registry.add(prefix)?;
        }
        Ok(registry)
    }

    /// Registry seeded with the vocabularies used by shapes and datatypes
    pub fn with_common() -> Self {
        let mut registry = Self::new();
        registry.extend_missing([
            Prefix::new("rdf", "http://www.w3.org/1999/02/22-rdf-syntax-ns#"),
            Prefix::new("rdfs", "http://www.w3.org/2000/01/rdf-schema#"),
            Prefix::new("xsd", "http://www.w3.org/2001/XMLSchema#"),
            Prefix::new("owl", "http://www.w3.org/2002/07/owl#"),
            Prefix::new("sh", "http://www.w3.org/ns/shacl#"),
        ]);
        registry
    }

    /// Whether a binding exists for `short`
    pub fn has(&self, short: &str) -> bool {
        self.entries.contains_key(short)
    }

    /// Find the binding for `short`
    pub fn find(&self, short: &str) -> Option<Prefix> {
        self.entries
            .get_key_value(short)
            .map(|(s, ns)| Prefix::new(s.clone(), ns.clone()))
    }

    /// Namespace bound to `short`
    pub fn namespace(&self, short: &str) -> Option<&str> {
        self.entries.get(short).map(String::as_str)
    }

    /// Add a binding. Mutates the registry: only call this on an instance you own.
    ///
    /// Re-adding an identical binding is a no-op. Binding an existing short name to a
    /// different namespace is refused with [`PrefixError::Conflict`]; nothing is overwritten.
    pub fn add(&mut self, prefix: Prefix) -> PrefixResult<()> {
        if prefix.short.is_empty() {
            return Err(PrefixError::EmptyShort);
        }
        match self.entries.get(&prefix.short) {
            Some(existing) if *existing == prefix.namespace => Ok(()),
            Some(existing) => Err(PrefixError::Conflict {
                short: prefix.short,
                existing: existing.clone(),
                requested: prefix.namespace,
            }),
            None => {
                self.entries.insert(prefix.short, prefix.namespace);
                Ok(())
            }
        }
    }

    /// Add every binding whose short name is not present yet; existing ones are left as-is.
    ///
    /// Returns the number of bindings added.
    pub fn extend_missing<I>(&mut self, prefixes: I) -> usize
    where
        I: IntoIterator<Item = Prefix>,
    {
        let mut added = 0;
        for prefix in prefixes {
            if prefix.short.is_empty() || self.has(&prefix.short) {
                continue;
            }
            self.entries.insert(prefix.short, prefix.namespace);
            added += 1;
        }
        added
    }

    /// Remove the binding for `short`, returning it
    pub fn remove(&mut self, short: &str) -> Option<Prefix> {
        self.entries
            .shift_remove_entry(short)
            .map(|(s, ns)| Prefix::new(s, ns))
    }

    /// Independent copy with the same bindings
    pub fn copy(&self) -> Self {
        self.clone()
    }

    /// Read-only view of the short names, used for prefixed-name recognition
    pub fn shorts(&self) -> Shorts<'_> {
        Shorts { registry: self }
    }

    /// Rewrite an absolute IRI (optionally in `<...>`) into `short:local`.
    ///
    /// Returns `None` when no namespace matches or the remainder is not a plain local name;
    /// callers then keep the full IRI.
    pub fn compact(&self, iri: &str) -> Option<String> {
        let iri = strip_angle_brackets(iri);
        self.entries.iter().find_map(|(short, namespace)| {
            let local = iri.strip_prefix(namespace.as_str())?;
            is_plain_local_name(local).then(|| format!("{}:{}", short, local))
        })
    }

    /// Compact when possible, otherwise return the IRI unchanged
    pub fn shorten(&self, iri: &str) -> String {
        self.compact(iri).unwrap_or_else(|| iri.to_string())
    }

    /// Expand `short:local` into the full IRI, if `short` is bound
    pub fn expand(&self, name: &str) -> Option<String> {
        let (short, local) = name.split_once(':')?;
        let namespace = self.entries.get(short)?;
        Some(format!("{}{}", namespace, local))
    }

    /// Expand when possible, otherwise return the value unchanged
    pub fn lengthen(&self, name: &str) -> String {
        self.expand(name).unwrap_or_else(|| name.to_string())
    }

    /// `PREFIX` lines, one per binding
    pub fn sparql_header(&self) -> String {
        self.iter()
            .map(|p| p.to_sparql())
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// `@prefix` lines, one per binding
    pub fn turtle_header(&self) -> String {
        self.iter()
            .map(|p| p.to_turtle())
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// Bindings in insertion order
    pub fn iter(&self) -> impl Iterator<Item = Prefix> + '_ {
        self.entries
            .iter()
            .map(|(s, ns)| Prefix::new(s.clone(), ns.clone()))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Borrowed, read-only view over the short names of a registry
#[derive(Debug, Clone, Copy)]
pub struct Shorts<'a> {
    registry: &'a PrefixRegistry,
}

impl<'a> Shorts<'a> {
    /// View with no short names at all
    pub fn none() -> Shorts<'static> {
        static EMPTY: std::sync::OnceLock<PrefixRegistry> = std::sync::OnceLock::new();
        Shorts {
            registry: EMPTY.get_or_init(PrefixRegistry::new),
        }
    }

    pub fn contains(&self, short: &str) -> bool {
        self.registry.has(short)
    }

    /// Whether `value` is a `short:local` name using a known short and a plain local part
    pub fn is_prefixed_name(&self, value: &str) -> bool {
        value
            .split_once(':')
            .map_or(false, |(short, local)| self.contains(short) && is_plain_local_name(local))
    }

    /// Expand `short:local` against the underlying registry
    pub fn expand(&self, name: &str) -> Option<String> {
        self.registry.expand(name)
    }

    pub fn iter(&self) -> impl Iterator<Item = &'a str> {
        self.registry.entries.keys().map(String::as_str)
    }
}

impl<'a> From<Option<&'a PrefixRegistry>> for Shorts<'a> {
    fn from(registry: Option<&'a PrefixRegistry>) -> Self {
        match registry {
            Some(registry) => registry.shorts(),
            None => Shorts::none(),
        }
    }
}

fn strip_angle_brackets(iri: &str) -> &str {
    let iri = iri.strip_prefix('<').unwrap_or(iri);
    iri.strip_suffix('>').unwrap_or(iri)
}

/// Conservative PN_LOCAL check: PN_CHARS with inner dots, no escapes or `:`.
pub(crate) fn is_plain_local_name(local: &str) -> bool {
    let Some(first) = local.chars().next() else {
        return true;
    };
    if !(is_pn_chars_u(first) || first.is_ascii_digit()) || local.ends_with('.') {
        return false;
    }
    local.chars().all(|c| is_pn_chars(c) || c == '.')
}

/// `short:local` where both parts are valid Turtle names, bound or not
pub(crate) fn is_prefixed_name_shape(text: &str) -> bool {
    let Some((short, local)) = text.split_once(':') else {
        return false;
    };
    let Some(first) = short.chars().next() else {
        return false;
    };
    is_pn_chars_base(first)
        && !short.ends_with('.')
        && short.chars().all(|c| is_pn_chars(c) || c == '.')
        && is_plain_local_name(local)
}

fn is_pn_chars_base(c: char) -> bool {
    matches!(c,
        'A'..='Z'
        | 'a'..='z'
        | '\u{00C0}'..='\u{00D6}'
        | '\u{00D8}'..='\u{00F6}'
        | '\u{00F8}'..='\u{02FF}'
        | '\u{0370}'..='\u{037D}'
        | '\u{037F}'..='\u{1FFF}'
        | '\u{200C}'..='\u{200D}'
        | '\u{2070}'..='\u{218F}'
        | '\u{2C00}'..='\u{2FEF}'
        | '\u{3001}'..='\u{D7FF}'
        | '\u{F900}'..='\u{FDCF}'
        | '\u{FDF0}'..='\u{FFFD}'
        | '\u{10000}'..='\u{EFFFF}')
}

fn is_pn_chars_u(c: char) -> bool {
    is_pn_chars_base(c) || c == '_'
}

fn is_pn_chars(c: char) -> bool {
    is_pn_chars_u(c)
        || c == '-'
        || c.is_ascii_digit()
        || matches!(c, '\u{00B7}' | '\u{0300}'..='\u{036F}' | '\u{203F}'..='\u{2040}')
}

impl FromIterator<Prefix> for PrefixRegistry {
    /// Collects bindings, keeping the first one seen for each short name
    fn from_iter<I: IntoIterator<Item = Prefix>>(iter: I) -> Self {
        let mut registry = Self::new();
        registry.extend_missing(iter);
        registry
    }
}
