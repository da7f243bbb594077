//! Finalized rules and the shared session collector.

use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use log::trace;

use crate::chain::{SymbolReference, Term};
use crate::value::Value;

/// The comparison that finalized a rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum RuleKind {
    /// Finalized with `greater_than`.
    GreaterThan,
    /// Finalized with `equals`.
    Equal,
    /// Finalized with `not_equals`.
    NotEqual,
}

impl fmt::Display for RuleKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RuleKind::GreaterThan => f.write_str(">"),
            RuleKind::Equal => f.write_str("=="),
            RuleKind::NotEqual => f.write_str("!="),
        }
    }
}

/// A finalized comparison record.
///
/// Rules are created only by the comparison finalizers, which append them
/// to the session collector and hand the same record back to the caller.
/// A rule is plain data: the caller's copy and the recorded copy cannot
/// diverge through aliasing.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Rule {
    /// The comparison kind.
    pub kind: RuleKind,
    /// The chain or union the comparison was applied to.
    pub lhs: Term,
    /// The right-hand side the chain was compared against.
    pub rhs: Value,
}

impl fmt::Display for Rule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {}", self.lhs, self.kind, self.rhs)
    }
}

/// The shared, append-only rule sequence of one authoring session.
///
/// Every [`Expression`](crate::Expression) and
/// [`ExpressionSet`](crate::ExpressionSet) derived from the same session
/// holds a handle to the same collector, and every comparison finalizer
/// appends exactly one rule to it. The handle is a single-threaded `Rc`:
/// it cannot cross a thread boundary, so unsynchronized concurrent appends
/// are unrepresentable. Sessions that author concurrently each create
/// their own collector.
///
/// Once authoring completes, the model compiler reads the rules back with
/// [`rules`](RuleCollector::rules) or drains them with
/// [`take`](RuleCollector::take).
#[derive(Debug, Clone, Default)]
pub struct RuleCollector {
    rules: Rc<RefCell<Vec<Rule>>>,
}

impl RuleCollector {
    /// Creates an empty collector for a new authoring session.
    pub fn new() -> Self {
        Self::default()
    }

    /// Enters a named root symbol into the session.
    pub fn symbol(&self, name: impl Into<String>) -> SymbolReference {
        SymbolReference::new(self, name)
    }

    /// Appends a finalized rule.
    pub(crate) fn record(&self, rule: Rule) {
        trace!("rule #{}: {}", self.len(), rule);
        self.rules.borrow_mut().push(rule);
    }

    /// Number of rules recorded so far.
    pub fn len(&self) -> usize {
        self.rules.borrow().len()
    }

    /// Whether no rule has been recorded yet.
    pub fn is_empty(&self) -> bool {
        self.rules.borrow().is_empty()
    }

    /// A snapshot of the recorded rules, in finalization order.
    pub fn rules(&self) -> Vec<Rule> {
        self.rules.borrow().clone()
    }

    /// Drains the recorded rules for handoff to the model compiler.
    pub fn take(&self) -> Vec<Rule> {
        self.rules.borrow_mut().drain(..).collect()
    }

    /// Whether two handles refer to the same session collector.
    pub fn same_session(&self, other: &RuleCollector) -> bool {
        Rc::ptr_eq(&self.rules, &other.rules)
    }
}
