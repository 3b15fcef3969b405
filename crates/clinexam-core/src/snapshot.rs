//! The observation snapshot.
//!
//! A tree of named branches with typed leaves, addressed by dotted paths.
//! The form layer owns it and is its only writer; the engine only reads.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

/// A number with a domain range. Reads are clamped into `[min, max]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct BoundedNumber {
    pub value: f64,
    pub min: f64,
    pub max: f64,
}

impl BoundedNumber {
    pub fn clamped(&self) -> f64 {
        self.value.max(self.min).min(self.max)
    }
}

/// One label out of a fixed option set.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Category {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub selected: Option<String>,
    pub options: Vec<String>,
}

impl Category {
    pub fn new<I, S>(options: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            selected: None,
            options: options.into_iter().map(Into::into).collect(),
        }
    }

    pub fn select(mut self, label: impl Into<String>) -> Self {
        self.selected = Some(label.into());
        self
    }

    /// The selected label, if it is non-blank and part of the option set.
    pub fn label(&self) -> Option<&str> {
        let label = self.selected.as_deref()?.trim();
        if label.is_empty() {
            return None;
        }
        if !self.options.is_empty() && !self.options.iter().any(|o| o == label) {
            return None;
        }
        Some(label)
    }
}

/// A typed leaf value.
///
/// Untagged so that snapshots serialize as the plain nested JSON the form
/// layer already produces. Variant order matters for deserialization.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Leaf {
    Flag(bool),
    Number(f64),
    Text(String),
    Selection(Vec<String>),
    Bounded(BoundedNumber),
    Category(Category),
}

impl Leaf {
    /// Whether this leaf counts as answered: a `true` flag, a positive
    /// number, non-blank text or category, or a non-empty selection.
    ///
    /// A `false` flag is indistinguishable from an untouched one and counts
    /// as unanswered.
    pub fn is_answered(&self) -> bool {
        match self {
            Leaf::Flag(b) => *b,
            Leaf::Number(n) => *n > 0.0,
            Leaf::Bounded(b) => b.value > 0.0,
            Leaf::Text(s) => !s.trim().is_empty(),
            Leaf::Category(c) => c.label().is_some(),
            Leaf::Selection(items) => !items.is_empty(),
        }
    }
}

impl From<bool> for Leaf {
    fn from(value: bool) -> Self {
        Leaf::Flag(value)
    }
}

impl From<f64> for Leaf {
    fn from(value: f64) -> Self {
        Leaf::Number(value)
    }
}

impl From<&str> for Leaf {
    fn from(value: &str) -> Self {
        Leaf::Text(value.to_string())
    }
}

impl From<String> for Leaf {
    fn from(value: String) -> Self {
        Leaf::Text(value)
    }
}

impl From<Vec<String>> for Leaf {
    fn from(value: Vec<String>) -> Self {
        Leaf::Selection(value)
    }
}

impl From<Vec<&str>> for Leaf {
    fn from(value: Vec<&str>) -> Self {
        Leaf::Selection(value.into_iter().map(str::to_string).collect())
    }
}

impl From<BoundedNumber> for Leaf {
    fn from(value: BoundedNumber) -> Self {
        Leaf::Bounded(value)
    }
}

impl From<Category> for Leaf {
    fn from(value: Category) -> Self {
        Leaf::Category(value)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Node {
    Leaf(Leaf),
    Branch(BTreeMap<String, Node>),
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Snapshot {
    root: BTreeMap<String, Node>,
}

fn segments(path: &str) -> Result<Vec<&str>, CoreError> {
    let parts: Vec<&str> = path.split('.').collect();
    if path.is_empty() || parts.iter().any(|p| p.is_empty()) {
        return Err(CoreError::InvalidPath(path.to_string()));
    }
    Ok(parts)
}

impl Snapshot {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_json(json: &str) -> Result<Self, CoreError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn from_value(value: serde_json::Value) -> Result<Self, CoreError> {
        Ok(serde_json::from_value(value)?)
    }

    pub fn to_value(&self) -> Result<serde_json::Value, CoreError> {
        Ok(serde_json::to_value(self)?)
    }

    pub fn root(&self) -> &BTreeMap<String, Node> {
        &self.root
    }

    pub fn is_empty(&self) -> bool {
        self.root.is_empty()
    }

    /// Look up the leaf at `path`. Branches and invalid paths yield `None`.
    pub fn get(&self, path: &str) -> Option<&Leaf> {
        let mut parts = path.split('.');
        let mut node = self.root.get(parts.next()?)?;
        for part in parts {
            match node {
                Node::Branch(children) => node = children.get(part)?,
                Node::Leaf(_) => return None,
            }
        }
        match node {
            Node::Leaf(leaf) => Some(leaf),
            Node::Branch(_) => None,
        }
    }

    /// Write a leaf at `path`, creating intermediate branches.
    ///
    /// Fails if a prefix of `path` is already a leaf, or if `path` itself
    /// names a branch.
    pub fn set(&mut self, path: &str, leaf: impl Into<Leaf>) -> Result<(), CoreError> {
        let parts = segments(path)?;
        let (last, prefix) = parts
            .split_last()
            .ok_or_else(|| CoreError::InvalidPath(path.to_string()))?;

        let mut children = &mut self.root;
        for (depth, part) in prefix.iter().enumerate() {
            let node = children
                .entry((*part).to_string())
                .or_insert_with(|| Node::Branch(BTreeMap::new()));
            children = match node {
                Node::Branch(next) => next,
                Node::Leaf(_) => {
                    return Err(CoreError::PathConflict {
                        path: path.to_string(),
                        at: parts[..=depth].join("."),
                        existing: "leaf",
                    });
                }
            };
        }

        if let Some(Node::Branch(_)) = children.get(*last) {
            return Err(CoreError::PathConflict {
                path: path.to_string(),
                at: path.to_string(),
                existing: "branch",
            });
        }
        children.insert((*last).to_string(), Node::Leaf(leaf.into()));
        Ok(())
    }

    /// Copy-on-write variant of [`Snapshot::set`]; `self` is left untouched.
    pub fn with(&self, path: &str, leaf: impl Into<Leaf>) -> Result<Snapshot, CoreError> {
        let mut next = self.clone();
        next.set(path, leaf)?;
        Ok(next)
    }

    pub fn is_answered(&self, path: &str) -> bool {
        self.get(path).is_some_and(Leaf::is_answered)
    }

    /// Boolean finding; anything other than a `true` flag reads as `false`.
    pub fn flag(&self, path: &str) -> bool {
        matches!(self.get(path), Some(Leaf::Flag(true)))
    }

    /// Numeric value, clamped into its bounds when the leaf carries them.
    pub fn number(&self, path: &str) -> Option<f64> {
        match self.get(path)? {
            Leaf::Number(n) if n.is_finite() => Some(*n),
            Leaf::Bounded(b) if b.value.is_finite() => Some(b.clamped()),
            _ => None,
        }
    }

    /// Numeric value only when it has been answered (strictly positive).
    pub fn measured(&self, path: &str) -> Option<f64> {
        self.number(path).filter(|n| *n > 0.0)
    }

    /// Selected category label. Plain text leaves are read as labels too.
    pub fn category(&self, path: &str) -> Option<&str> {
        match self.get(path)? {
            Leaf::Category(c) => c.label(),
            Leaf::Text(s) => Some(s.trim()).filter(|s| !s.is_empty()),
            _ => None,
        }
    }

    pub fn text(&self, path: &str) -> Option<&str> {
        match self.get(path)? {
            Leaf::Text(s) => Some(s.as_str()),
            _ => None,
        }
    }

    pub fn selection(&self, path: &str) -> &[String] {
        match self.get(path) {
            Some(Leaf::Selection(items)) => items,
            _ => &[],
        }
    }
}
