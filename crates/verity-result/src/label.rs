//! Test labels
//!
//! Categorical tags describing which property a check validates:
//! - [`TestLabel`]: the closed set of built-in labels
//! - [`Label`]: a built-in label or a free-form string
//! - [`LabelSet`]: ordered, duplicate-free collection of labels

use crate::error::UnknownLabelError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::hash::{Hash, Hasher};
use std::str::FromStr;

/// Built-in label set
///
/// Compared and serialized by its string value (`"data-bias"`,
/// `"minimum-functionality"`, ...).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TestLabel {
    /// Model bias
    Bias,
    /// Bias in the training or evaluation data
    DataBias,
    /// Fairness across groups
    Fairness,
    /// Explainability of outputs
    Transparency,
    /// Ownership and traceability
    Accountability,
    /// Predictive accuracy
    Accuracy,
    /// Unit-level check
    Unit,
    /// Integration-level check
    Integration,
    /// Minimum functionality (behavioral) check
    MinimumFunctionality,
}

impl TestLabel {
    /// Every built-in label, in declaration order
    pub const ALL: [TestLabel; 9] = [
        TestLabel::Bias,
        TestLabel::DataBias,
        TestLabel::Fairness,
        TestLabel::Transparency,
        TestLabel::Accountability,
        TestLabel::Accuracy,
        TestLabel::Unit,
        TestLabel::Integration,
        TestLabel::MinimumFunctionality,
    ];

    /// String value of the label
    #[inline]
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            TestLabel::Bias => "bias",
            TestLabel::DataBias => "data-bias",
            TestLabel::Fairness => "fairness",
            TestLabel::Transparency => "transparency",
            TestLabel::Accountability => "accountability",
            TestLabel::Accuracy => "accuracy",
            TestLabel::Unit => "unit",
            TestLabel::Integration => "integration",
            TestLabel::MinimumFunctionality => "minimum-functionality",
        }
    }

    /// Convert an external framework marker by exact name match
    ///
    /// # Errors
    /// `UnknownLabelError` if the marker name is not a built-in label.
    pub fn of<M: LabelMarker + ?Sized>(marker: &M) -> Result<Self, UnknownLabelError> {
        marker.marker_name().parse()
    }
}

impl fmt::Display for TestLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TestLabel {
    type Err = UnknownLabelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        TestLabel::ALL
            .into_iter()
            .find(|label| label.as_str() == s)
            .ok_or_else(|| UnknownLabelError::new(s))
    }
}

/// A marker attached to a test by an external test-discovery framework
pub trait LabelMarker {
    /// The marker's name as declared in the framework
    fn marker_name(&self) -> &str;
}

impl LabelMarker for str {
    fn marker_name(&self) -> &str {
        self
    }
}

impl LabelMarker for String {
    fn marker_name(&self) -> &str {
        self.as_str()
    }
}

/// A label attached to a result: built-in or free-form
///
/// Equality and hashing use the string value, so `Label::Custom("bias")`
/// and `Label::Known(TestLabel::Bias)` are the same label.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(into = "String", from = "String")]
pub enum Label {
    /// One of the built-in labels
    Known(TestLabel),
    /// Any other tag
    Custom(String),
}

impl Label {
    /// String value of the label
    #[inline]
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Label::Known(label) => label.as_str(),
            Label::Custom(name) => name,
        }
    }

    /// The built-in label, if this is one
    #[must_use]
    pub fn known(&self) -> Option<TestLabel> {
        match self {
            Label::Known(label) => Some(*label),
            Label::Custom(name) => name.parse().ok(),
        }
    }
}

impl PartialEq for Label {
    fn eq(&self, other: &Self) -> bool {
        self.as_str() == other.as_str()
    }
}

impl Eq for Label {}

impl Hash for Label {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.as_str().hash(state);
    }
}

impl fmt::Display for Label {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<TestLabel> for Label {
    fn from(label: TestLabel) -> Self {
        Label::Known(label)
    }
}

impl From<String> for Label {
    fn from(name: String) -> Self {
        match name.parse::<TestLabel>() {
            Ok(label) => Label::Known(label),
            Err(_) => Label::Custom(name),
        }
    }
}

impl From<&str> for Label {
    fn from(name: &str) -> Self {
        Label::from(name.to_string())
    }
}

impl From<Label> for String {
    fn from(label: Label) -> Self {
        match label {
            Label::Known(label) => label.as_str().to_string(),
            Label::Custom(name) => name,
        }
    }
}

/// Ordered, duplicate-free list of labels
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Vec<Label>", into = "Vec<Label>")]
pub struct LabelSet {
    labels: Vec<Label>,
}

impl LabelSet {
    /// Create empty set
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a label, ignoring duplicates
    ///
    /// Returns `true` if the label was not already present.
    pub fn insert(&mut self, label: impl Into<Label>) -> bool {
        let label = label.into();
        if label.as_str().is_empty() || self.labels.contains(&label) {
            return false;
        }
        self.labels.push(label);
        true
    }

    /// Order-preserving union: appends labels of `other` not already present
    pub fn merge(&mut self, other: &LabelSet) {
        for label in &other.labels {
            self.insert(label.clone());
        }
    }

    /// Union of two sets, `self` first
    #[must_use]
    pub fn union(mut self, other: &LabelSet) -> Self {
        self.merge(other);
        self
    }

    /// Check membership by string value
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.labels.iter().any(|l| l.as_str() == name)
    }

    /// Iterate labels in insertion order
    pub fn iter(&self) -> impl Iterator<Item = &Label> {
        self.labels.iter()
    }

    /// Labels as plain strings
    #[must_use]
    pub fn to_strings(&self) -> Vec<String> {
        self.labels.iter().map(|l| l.as_str().to_string()).collect()
    }

    /// Number of labels
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.labels.len()
    }

    /// Check if set is empty
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }
}

impl<L: Into<Label>> FromIterator<L> for LabelSet {
    fn from_iter<I: IntoIterator<Item = L>>(iter: I) -> Self {
        let mut set = LabelSet::new();
        for label in iter {
            set.insert(label);
        }
        set
    }
}

impl From<Vec<Label>> for LabelSet {
    fn from(labels: Vec<Label>) -> Self {
        labels.into_iter().collect()
    }
}

impl From<LabelSet> for Vec<Label> {
    fn from(set: LabelSet) -> Self {
        set.labels
    }
}

impl From<TestLabel> for LabelSet {
    fn from(label: TestLabel) -> Self {
        std::iter::once(label).collect()
    }
}
