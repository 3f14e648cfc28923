//! The active equation set.
//!
//! Equations are parsed and solved once, eagerly, on the submission
//! path; their branch sets are immutable afterward. Callers hold only
//! stable [`EquationId`]s and query the registry, so the UI layer
//! never co-owns an equation.

use std::fmt;

use crate::error::Result;
use crate::relation::{solve_for_y, Branch, Relation};

/// Stable handle to a registered equation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct EquationId(u64);

/// A registered equation: the user's text, its solved branches, and a
/// visibility toggle.
#[derive(Debug, Clone)]
pub struct Equation {
    id: EquationId,
    relation: Relation,
    branches: Vec<Branch>,
    visible: bool,
}

impl Equation {
    /// The registry handle.
    #[must_use]
    pub fn id(&self) -> EquationId {
        self.id
    }

    /// The user-entered equation text (the display key).
    #[must_use]
    pub fn source(&self) -> &str {
        self.relation.source()
    }

    /// The solved branches, in solver order. Empty when the relation
    /// has no closed-form solution for `y`.
    #[must_use]
    pub fn branches(&self) -> &[Branch] {
        &self.branches
    }

    /// Whether the equation is currently drawn.
    #[must_use]
    pub fn is_visible(&self) -> bool {
        self.visible
    }
}

impl fmt::Display for Equation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.source())
    }
}

/// Insertion-ordered collection of the currently tracked equations.
#[derive(Debug, Default)]
pub struct EquationSet {
    entries: Vec<Equation>,
    next_id: u64,
}

impl EquationSet {
    /// Create an empty set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse, solve, and register an equation.
    ///
    /// On any parse failure nothing is registered. A relation that
    /// solves to zero branches is still registered; it simply plots
    /// nothing.
    pub fn submit(&mut self, raw: &str) -> Result<EquationId> {
        let relation = Relation::parse(raw)?;
        let branches = solve_for_y(&relation)?;
        let id = EquationId(self.next_id);
        self.next_id += 1;
        self.entries.push(Equation { id, relation, branches, visible: true });
        Ok(id)
    }

    /// Remove an equation. Returns whether it was present.
    pub fn remove(&mut self, id: EquationId) -> bool {
        let before = self.entries.len();
        self.entries.retain(|entry| entry.id != id);
        self.entries.len() != before
    }

    /// Flip an equation's visibility, returning the new state.
    pub fn toggle_visibility(&mut self, id: EquationId) -> Option<bool> {
        let entry = self.entries.iter_mut().find(|entry| entry.id == id)?;
        entry.visible = !entry.visible;
        Some(entry.visible)
    }

    /// Look up an equation by id.
    #[must_use]
    pub fn get(&self, id: EquationId) -> Option<&Equation> {
        self.entries.iter().find(|entry| entry.id == id)
    }

    /// Number of tracked equations (visible or not); this count drives
    /// the sample planner's density.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the set is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate in insertion (display) order.
    pub fn iter(&self) -> impl Iterator<Item = &Equation> {
        self.entries.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_submit_registers_in_order() {
        let mut set = EquationSet::new();
        let first = set.submit("y = x").unwrap();
        let second = set.submit("y = x^2").unwrap();
        assert_ne!(first, second);
        let sources: Vec<&str> = set.iter().map(Equation::source).collect();
        assert_eq!(sources, vec!["y = x", "y = x^2"]);
    }

    #[test]
    fn test_submit_failure_registers_nothing() {
        let mut set = EquationSet::new();
        assert!(set.submit("y == x").is_err());
        assert!(set.submit("banana(x) = y").is_err());
        assert!(set.is_empty());
    }

    #[test]
    fn test_branchless_relation_still_registers() {
        let mut set = EquationSet::new();
        let id = set.submit("sin(y) = x").unwrap();
        assert!(set.get(id).unwrap().branches().is_empty());
        assert_eq!(set.len(), 1);
    }

    #[test]
    fn test_remove_invalidates_id() {
        let mut set = EquationSet::new();
        let id = set.submit("y = x").unwrap();
        assert!(set.remove(id));
        assert!(set.get(id).is_none());
        // A second remove of the same id is a no-op.
        assert!(!set.remove(id));
    }

    #[test]
    fn test_ids_are_never_reused() {
        let mut set = EquationSet::new();
        let first = set.submit("y = x").unwrap();
        set.remove(first);
        let second = set.submit("y = x").unwrap();
        assert_ne!(first, second);
    }

    #[test]
    fn test_toggle_visibility() {
        let mut set = EquationSet::new();
        let id = set.submit("y = x").unwrap();
        assert!(set.get(id).unwrap().is_visible());
        assert_eq!(set.toggle_visibility(id), Some(false));
        assert!(!set.get(id).unwrap().is_visible());
        assert_eq!(set.toggle_visibility(id), Some(true));
    }

    #[test]
    fn test_toggle_unknown_id() {
        let mut set = EquationSet::new();
        let id = set.submit("y = x").unwrap();
        set.remove(id);
        assert_eq!(set.toggle_visibility(id), None);
    }
}
