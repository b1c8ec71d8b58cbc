use crate::error::{Error, Result};
use crate::kind::ValueKind;
use core::fmt;
use core::hash::{Hash, Hasher};
use string_cache::DefaultAtom;

/// An expanded qualified name. The prefix is kept for display only;
/// equality looks at namespace and local part.
#[derive(Debug, Clone)]
pub struct QName {
    pub prefix: Option<DefaultAtom>,
    pub namespace: Option<DefaultAtom>,
    pub local: DefaultAtom,
}

impl QName {
    pub fn new(namespace: Option<&str>, prefix: Option<&str>, local: &str) -> Self {
        Self {
            prefix: prefix.map(DefaultAtom::from),
            namespace: namespace.filter(|ns| !ns.is_empty()).map(DefaultAtom::from),
            local: DefaultAtom::from(local),
        }
    }

    pub fn local(local: &str) -> Self {
        Self::new(None, None, local)
    }

    /// Parse `local`, `prefix:local` or the expanded `Q{namespace}local`.
    /// Prefixes are not resolved here; a prefixed name carries no namespace
    /// until the caller binds one.
    pub fn parse(text: &str) -> Result<Self> {
        let trimmed = text.trim_matches(|c: char| c.is_ascii_whitespace());
        let bad = || Error::lexical(ValueKind::QName, text);
        if let Some(rest) = trimmed.strip_prefix("Q{") {
            let (namespace, local) = rest.split_once('}').ok_or_else(bad)?;
            if namespace.contains('{') || !is_ncname(local) {
                return Err(bad());
            }
            return Ok(Self::new(Some(namespace), None, local));
        }
        match trimmed.split_once(':') {
            Some((prefix, local)) if is_ncname(prefix) && is_ncname(local) => Ok(Self::new(None, Some(prefix), local)),
            None if is_ncname(trimmed) => Ok(Self::local(trimmed)),
            _ => Err(bad()),
        }
    }

    pub fn with_namespace(mut self, namespace: &str) -> Self {
        self.namespace = Some(DefaultAtom::from(namespace)).filter(|ns| !ns.is_empty());
        self
    }
}

fn is_ncname(s: &str) -> bool {
    let mut chars = s.chars();
    let Some(first) = chars.next() else {
        return false;
    };
    (first.is_alphabetic() || first == '_')
        && chars.all(|c| c.is_alphanumeric() || matches!(c, '_' | '-' | '.' | '\u{B7}'))
}

impl PartialEq for QName {
    fn eq(&self, other: &Self) -> bool {
        self.namespace == other.namespace && self.local == other.local
    }
}

impl Eq for QName {}

impl Hash for QName {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.namespace.hash(state);
        self.local.hash(state);
    }
}

impl fmt::Display for QName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (&self.prefix, &self.namespace) {
            (Some(prefix), _) if !prefix.is_empty() => write!(f, "{prefix}:{}", self.local),
            (None, Some(ns)) => write!(f, "Q{{{ns}}}{}", self.local),
            _ => f.write_str(&self.local),
        }
    }
}
