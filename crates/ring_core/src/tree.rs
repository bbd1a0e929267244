use std::fmt;

/// Leaf value of a document.
///
/// `Quoted` is a string that must be emitted as an explicitly quoted YAML
/// scalar. It compares equal to a plain `String` with the same text.
#[derive(Debug, Clone)]
pub enum Scalar {
    Null,
    Bool(bool),
    Int(i64),
    UInt(u64),
    Float(f64),
    String(String),
    Quoted(String),
}

impl Scalar {
    /// Builds an unsigned scalar, preferring `Int` whenever the value fits.
    pub fn unsigned(value: u64) -> Self {
        match i64::try_from(value) {
            Ok(signed) => Scalar::Int(signed),
            Err(_) => Scalar::UInt(value),
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Scalar::String(text) | Scalar::Quoted(text) => Some(text),
            _ => None,
        }
    }

    pub fn is_string(&self) -> bool {
        self.as_str().is_some()
    }

    /// Text used when the scalar has to become a mapping key or a quoted string.
    pub fn to_key_string(&self) -> String {
        match self {
            Scalar::Null => "null".to_string(),
            Scalar::Bool(value) => value.to_string(),
            Scalar::Int(value) => value.to_string(),
            Scalar::UInt(value) => value.to_string(),
            Scalar::Float(value) => format_float(*value),
            Scalar::String(text) | Scalar::Quoted(text) => text.clone(),
        }
    }
}

/// Formats a float so that it reads back as a float in both YAML and JSON.
pub(crate) fn format_float(value: f64) -> String {
    if value.is_nan() {
        ".nan".to_string()
    } else if value.is_infinite() {
        if value.is_sign_positive() {
            ".inf".to_string()
        } else {
            "-.inf".to_string()
        }
    } else {
        // serde_json keeps a fractional part ("1.0") or an exponent.
        serde_json::Number::from_f64(value)
            .map(|number| number.to_string())
            .unwrap_or_else(|| format!("{value:?}"))
    }
}

impl PartialEq for Scalar {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Scalar::Null, Scalar::Null) => true,
            (Scalar::Bool(a), Scalar::Bool(b)) => a == b,
            (Scalar::Int(a), Scalar::Int(b)) => a == b,
            (Scalar::UInt(a), Scalar::UInt(b)) => a == b,
            (Scalar::Float(a), Scalar::Float(b)) => a.to_bits() == b.to_bits(),
            (
                Scalar::String(a) | Scalar::Quoted(a),
                Scalar::String(b) | Scalar::Quoted(b),
            ) => a == b,
            _ => false,
        }
    }
}

impl Eq for Scalar {}

impl fmt::Display for Scalar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_key_string())
    }
}

impl From<&str> for Scalar {
    fn from(value: &str) -> Self {
        Scalar::String(value.to_string())
    }
}

impl From<String> for Scalar {
    fn from(value: String) -> Self {
        Scalar::String(value)
    }
}

impl From<bool> for Scalar {
    fn from(value: bool) -> Self {
        Scalar::Bool(value)
    }
}

impl From<i64> for Scalar {
    fn from(value: i64) -> Self {
        Scalar::Int(value)
    }
}

impl From<f64> for Scalar {
    fn from(value: f64) -> Self {
        Scalar::Float(value)
    }
}

/// Key/value pairs with unique keys, kept in insertion order.
///
/// Order is preserved for output stability only; equality ignores it.
#[derive(Debug, Clone, Default)]
pub struct Mapping {
    entries: Vec<(Scalar, DocumentTree)>,
}

impl Mapping {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            entries: Vec::with_capacity(capacity),
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, key: &Scalar) -> Option<&DocumentTree> {
        self.entries
            .iter()
            .find(|(existing, _)| existing == key)
            .map(|(_, value)| value)
    }

    pub fn get_mut(&mut self, key: &Scalar) -> Option<&mut DocumentTree> {
        self.entries
            .iter_mut()
            .find(|(existing, _)| existing == key)
            .map(|(_, value)| value)
    }

    /// Looks up a string key.
    pub fn get_str(&self, key: &str) -> Option<&DocumentTree> {
        self.entries
            .iter()
            .find(|(existing, _)| existing.as_str() == Some(key))
            .map(|(_, value)| value)
    }

    pub fn contains_key(&self, key: &Scalar) -> bool {
        self.get(key).is_some()
    }

    /// Inserts `value` under `key`. An existing entry keeps its position and
    /// its previous value is returned.
    pub fn insert(&mut self, key: Scalar, value: DocumentTree) -> Option<DocumentTree> {
        match self.get_mut(&key) {
            Some(slot) => Some(std::mem::replace(slot, value)),
            None => {
                self.entries.push((key, value));
                None
            }
        }
    }

    pub fn keys(&self) -> impl Iterator<Item = &Scalar> {
        self.entries.iter().map(|(key, _)| key)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&Scalar, &DocumentTree)> {
        self.entries.iter().map(|(key, value)| (key, value))
    }
}

impl PartialEq for Mapping {
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len()
            && self
                .iter()
                .all(|(key, value)| other.get(key) == Some(value))
    }
}

impl Eq for Mapping {}

impl IntoIterator for Mapping {
    type Item = (Scalar, DocumentTree);
    type IntoIter = std::vec::IntoIter<(Scalar, DocumentTree)>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}

impl<K: Into<Scalar>> FromIterator<(K, DocumentTree)> for Mapping {
    fn from_iter<I: IntoIterator<Item = (K, DocumentTree)>>(iter: I) -> Self {
        let mut mapping = Mapping::new();
        for (key, value) in iter {
            mapping.insert(key.into(), value);
        }
        mapping
    }
}

/// Generic structured document: what every source is decoded into and what
/// the merged result is rendered from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DocumentTree {
    Scalar(Scalar),
    Mapping(Mapping),
    Sequence(Vec<DocumentTree>),
}

impl DocumentTree {
    pub fn as_mapping(&self) -> Option<&Mapping> {
        match self {
            DocumentTree::Mapping(mapping) => Some(mapping),
            _ => None,
        }
    }

    pub fn as_sequence(&self) -> Option<&[DocumentTree]> {
        match self {
            DocumentTree::Sequence(items) => Some(items),
            _ => None,
        }
    }

    pub fn as_scalar(&self) -> Option<&Scalar> {
        match self {
            DocumentTree::Scalar(scalar) => Some(scalar),
            _ => None,
        }
    }

    /// Follows a path of string keys through nested mappings.
    pub fn pointer(&self, path: &[&str]) -> Option<&DocumentTree> {
        path.iter()
            .try_fold(self, |node, key| node.as_mapping()?.get_str(key))
    }
}

impl Default for DocumentTree {
    fn default() -> Self {
        DocumentTree::Scalar(Scalar::Null)
    }
}

impl From<Scalar> for DocumentTree {
    fn from(value: Scalar) -> Self {
        DocumentTree::Scalar(value)
    }
}

impl From<Mapping> for DocumentTree {
    fn from(value: Mapping) -> Self {
        DocumentTree::Mapping(value)
    }
}

impl From<Vec<DocumentTree>> for DocumentTree {
    fn from(value: Vec<DocumentTree>) -> Self {
        DocumentTree::Sequence(value)
    }
}

impl From<&str> for DocumentTree {
    fn from(value: &str) -> Self {
        DocumentTree::Scalar(Scalar::from(value))
    }
}
