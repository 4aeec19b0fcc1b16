//! FILENAME: core/engine/src/sets.rs
//! PURPOSE: Finite set algebra over typed literal elements.
//! CONTEXT: Sets are parsed from comma-separated text. Each token becomes a
//! numeric element when its text survives a parse/print round trip, otherwise
//! a symbolic one. Elements compare by their canonical text, so `2` and a
//! symbol spelled "2" can never coexist. Sets keep first-seen order and are
//! never sorted.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;
use std::hash::{Hash, Hasher};

// ============================================================================
// ELEMENTS
// ============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "camelCase")]
pub enum Element {
    Numeric(f64),
    Symbolic(String),
}

impl Element {
    /// Classifies one trimmed token.
    pub fn parse(token: &str) -> Self {
        match token.parse::<f64>() {
            Ok(n) if n.is_finite() && format_number(n) == token => Element::Numeric(n),
            _ => Element::Symbolic(token.to_string()),
        }
    }

    /// The text used for equality and uniqueness.
    pub fn canonical(&self) -> String {
        match self {
            Element::Numeric(n) => format_number(*n),
            Element::Symbolic(s) => s.clone(),
        }
    }

    pub fn is_numeric(&self) -> bool {
        matches!(self, Element::Numeric(_))
    }

    pub fn as_number(&self) -> Option<f64> {
        match self {
            Element::Numeric(n) => Some(*n),
            Element::Symbolic(_) => None,
        }
    }
}

/// Shortest decimal text of a number. Negative zero prints as "0".
pub fn format_number(n: f64) -> String {
    if n == 0.0 {
        "0".to_string()
    } else {
        n.to_string()
    }
}

impl PartialEq for Element {
    fn eq(&self, other: &Self) -> bool {
        self.canonical() == other.canonical()
    }
}

impl Eq for Element {}

impl Hash for Element {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.canonical().hash(state);
    }
}

impl fmt::Display for Element {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.canonical())
    }
}

// ============================================================================
// FINITE SET
// ============================================================================

/// Unique elements in insertion order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Vec<Element>", into = "Vec<Element>")]
pub struct FiniteSet {
    elements: Vec<Element>,
}

impl FiniteSet {
    pub fn new() -> Self {
        FiniteSet::default()
    }

    /// Splits on commas, trims, drops empty tokens and de-duplicates.
    pub fn parse(raw: &str) -> Self {
        raw.split(',')
            .map(str::trim)
            .filter(|token| !token.is_empty())
            .map(Element::parse)
            .collect()
    }

    /// Appends `element` unless an equal one is already present.
    pub fn insert(&mut self, element: Element) -> bool {
        if self.contains(&element) {
            return false;
        }
        self.elements.push(element);
        true
    }

    pub fn contains(&self, element: &Element) -> bool {
        self.elements.iter().any(|e| e == element)
    }

    pub fn len(&self) -> usize {
        self.elements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Element> {
        self.elements.iter()
    }

    pub fn elements(&self) -> &[Element] {
        &self.elements
    }

    /// True when no element is symbolic. Vacuously true for the empty set.
    pub fn is_all_numeric(&self) -> bool {
        self.elements.iter().all(Element::is_numeric)
    }

    fn keys(&self) -> HashSet<String> {
        self.elements.iter().map(Element::canonical).collect()
    }

    /// Elements of `self` whose canonical text is (or is not) in `other`.
    fn filter_by(&self, other: &FiniteSet, keep_members: bool) -> FiniteSet {
        let keys = other.keys();
        self.elements
            .iter()
            .filter(|e| keys.contains(&e.canonical()) == keep_members)
            .cloned()
            .collect()
    }
}

impl FromIterator<Element> for FiniteSet {
    fn from_iter<I: IntoIterator<Item = Element>>(iter: I) -> Self {
        let mut set = FiniteSet::new();
        for element in iter {
            set.insert(element);
        }
        set
    }
}

impl From<Vec<Element>> for FiniteSet {
    fn from(elements: Vec<Element>) -> Self {
        elements.into_iter().collect()
    }
}

impl From<FiniteSet> for Vec<Element> {
    fn from(set: FiniteSet) -> Self {
        set.elements
    }
}

impl<'a> IntoIterator for &'a FiniteSet {
    type Item = &'a Element;
    type IntoIter = std::slice::Iter<'a, Element>;

    fn into_iter(self) -> Self::IntoIter {
        self.elements.iter()
    }
}

/// `∅` for the empty set, `{ a, b }` otherwise.
impl fmt::Display for FiniteSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.elements.is_empty() {
            return write!(f, "∅");
        }
        let parts: Vec<String> = self.elements.iter().map(Element::canonical).collect();
        write!(f, "{{ {} }}", parts.join(", "))
    }
}

// ============================================================================
// BINARY OPERATIONS
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SetOperation {
    #[serde(rename = "union")]
    Union,
    #[serde(rename = "intersect")]
    Intersection,
    #[serde(rename = "setdiffAB")]
    DifferenceAB,
    #[serde(rename = "setdiffBA")]
    DifferenceBA,
    #[serde(rename = "setxor")]
    SymmetricDifference,
}

impl SetOperation {
    pub const ALL: [SetOperation; 5] = [
        SetOperation::Union,
        SetOperation::Intersection,
        SetOperation::DifferenceAB,
        SetOperation::DifferenceBA,
        SetOperation::SymmetricDifference,
    ];

    /// Maps a selector to an operation. Unknown selectors mean union.
    pub fn from_selector(selector: &str) -> Self {
        match selector {
            "union" => SetOperation::Union,
            "intersect" => SetOperation::Intersection,
            "setdiffAB" => SetOperation::DifferenceAB,
            "setdiffBA" => SetOperation::DifferenceBA,
            "setxor" => SetOperation::SymmetricDifference,
            other => {
                log::debug!("unknown set operation {:?}, using union", other);
                SetOperation::Union
            }
        }
    }

    pub fn selector(self) -> &'static str {
        match self {
            SetOperation::Union => "union",
            SetOperation::Intersection => "intersect",
            SetOperation::DifferenceAB => "setdiffAB",
            SetOperation::DifferenceBA => "setdiffBA",
            SetOperation::SymmetricDifference => "setxor",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            SetOperation::Union => "A ∪ B",
            SetOperation::Intersection => "A ∩ B",
            SetOperation::DifferenceAB => "A \\ B",
            SetOperation::DifferenceBA => "B \\ A",
            SetOperation::SymmetricDifference => "A △ B",
        }
    }
}

/// The three Venn regions of two sets.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SetRegions {
    pub a_only: FiniteSet,
    pub intersection: FiniteSet,
    pub b_only: FiniteSet,
}

pub fn regions(a: &FiniteSet, b: &FiniteSet) -> SetRegions {
    SetRegions {
        a_only: a.filter_by(b, false),
        intersection: a.filter_by(b, true),
        b_only: b.filter_by(a, false),
    }
}

pub fn apply(operation: SetOperation, a: &FiniteSet, b: &FiniteSet) -> FiniteSet {
    let SetRegions {
        a_only,
        intersection,
        b_only,
    } = regions(a, b);

    match operation {
        SetOperation::Union => a.iter().chain(b_only.iter()).cloned().collect(),
        SetOperation::Intersection => intersection,
        SetOperation::DifferenceAB => a_only,
        SetOperation::DifferenceBA => b_only,
        SetOperation::SymmetricDifference => a_only.iter().chain(b_only.iter()).cloned().collect(),
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SetOperationResult {
    pub a: FiniteSet,
    pub b: FiniteSet,
    pub operation: SetOperation,
    pub label: String,
    pub regions: SetRegions,
    pub result: FiniteSet,
}

impl SetOperationResult {
    /// `|A|, |B|`
    pub fn cardinalities(&self) -> (usize, usize) {
        (self.a.len(), self.b.len())
    }
}

/// Parses both operands and applies `operation`.
pub fn compute_set_operation(a_raw: &str, b_raw: &str, operation: SetOperation) -> SetOperationResult {
    let a = FiniteSet::parse(a_raw);
    let b = FiniteSet::parse(b_raw);
    let regions = regions(&a, &b);
    let result = apply(operation, &a, &b);

    log::debug!("{} over |A|={} |B|={} -> {}", operation.label(), a.len(), b.len(), result);

    SetOperationResult {
        label: operation.label().to_string(),
        a,
        b,
        operation,
        regions,
        result,
    }
}

// ============================================================================
// UNIVERSE
// ============================================================================

/// Elements of `universe` not in `set`, in universe order.
pub fn complement(universe: &FiniteSet, set: &FiniteSet) -> FiniteSet {
    universe.filter_by(set, false)
}

/// Elements of `set` that the universe does not contain.
pub fn outside_universe(universe: &FiniteSet, set: &FiniteSet) -> FiniteSet {
    set.filter_by(universe, false)
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UniverseComplements {
    pub universe: FiniteSet,
    pub a: FiniteSet,
    pub b: FiniteSet,
    pub a_complement: FiniteSet,
    pub b_complement: FiniteSet,
    pub a_outside: FiniteSet,
    pub b_outside: FiniteSet,
    /// Set when A or B mentions something the universe lacks. The complements
    /// are computed the same way regardless.
    pub out_of_universe: bool,
}

pub fn compute_universe(universe_raw: &str, a_raw: &str, b_raw: &str) -> UniverseComplements {
    let universe = FiniteSet::parse(universe_raw);
    let a = FiniteSet::parse(a_raw);
    let b = FiniteSet::parse(b_raw);

    let a_outside = outside_universe(&universe, &a);
    let b_outside = outside_universe(&universe, &b);
    let out_of_universe = !a_outside.is_empty() || !b_outside.is_empty();
    if out_of_universe {
        log::debug!("elements outside U: A {} B {}", a_outside, b_outside);
    }

    UniverseComplements {
        a_complement: complement(&universe, &a),
        b_complement: complement(&universe, &b),
        universe,
        a,
        b,
        a_outside,
        b_outside,
        out_of_universe,
    }
}
