//! Unions of chains and the closed operand sums used to build them.

use std::fmt;

use log::trace;

use crate::error::{DslError, DslResult};
use crate::rule::{Rule, RuleCollector, RuleKind};
use crate::value::Value;

use super::element::ElementNode;
use super::expression::{Expression, PartialAttribute, SymbolReference};

/// A complete symbolic reference: either a single chain or a union of
/// chains. This is what a finalized rule holds on its left-hand side and
/// what an [`ExpressionSet`] holds as members.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum Term {
    /// A single chain.
    Expression(Expression),
    /// A union of chains.
    Set(ExpressionSet),
}

impl Term {
    /// Handle to the session collector behind this reference.
    pub fn collector(&self) -> &RuleCollector {
        match self {
            Term::Expression(expr) => expr.collector(),
            Term::Set(set) => set.collector(),
        }
    }

    /// Appends the flattened element sequence of this reference onto
    /// `target`.
    pub fn flatten_into(&self, target: &mut Vec<ElementNode>) {
        match self {
            Term::Expression(expr) => expr.flatten_into(target),
            Term::Set(set) => set.flatten_into(target),
        }
    }

    fn with_parameter(self, param: Expression) -> Self {
        match self {
            Term::Expression(expr) => Term::Expression(expr.with_parameter(param)),
            Term::Set(set) => Term::Set(set.with_parameter(param)),
        }
    }
}

impl fmt::Display for Term {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Term::Expression(expr) => write!(f, "{}", expr),
            Term::Set(set) => write!(f, "{}", set),
        }
    }
}

/// Right-hand side of a union: a symbolic reference in any construction
/// state. The set of accepted states is closed; anything else is rejected
/// at the [`Value`] boundary by [`TryFrom`].
#[derive(Debug, Clone)]
pub enum Operand {
    /// An unmaterialized root symbol.
    Reference(SymbolReference),
    /// A pending attribute access.
    Partial(PartialAttribute),
    /// A materialized chain.
    Expression(Expression),
    /// An existing union.
    Set(ExpressionSet),
}

impl From<SymbolReference> for Operand {
    fn from(symbol: SymbolReference) -> Self {
        Operand::Reference(symbol)
    }
}

impl From<&SymbolReference> for Operand {
    fn from(symbol: &SymbolReference) -> Self {
        Operand::Reference(symbol.clone())
    }
}

impl From<PartialAttribute> for Operand {
    fn from(partial: PartialAttribute) -> Self {
        Operand::Partial(partial)
    }
}

impl From<Expression> for Operand {
    fn from(expr: Expression) -> Self {
        Operand::Expression(expr)
    }
}

impl From<ExpressionSet> for Operand {
    fn from(set: ExpressionSet) -> Self {
        Operand::Set(set)
    }
}

impl TryFrom<Value> for Operand {
    type Error = DslError;

    fn try_from(value: Value) -> DslResult<Self> {
        match value {
            Value::Expression(expr) => Ok(Operand::Expression(*expr)),
            Value::Set(set) => Ok(Operand::Set(*set)),
            other => Err(DslError::IncompatibleUnion(other.kind())),
        }
    }
}

/// An ordered union of two or more chains, combined with `+`.
///
/// A set of alternatives is not itself a chain: call, index, attribute, and
/// append operations on it fail with
/// [`DslError::UnsupportedSetOperation`]. Only further unions, a trailing
/// parameter on the last member, and the comparison finalizers apply.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct ExpressionSet {
    members: Vec<Term>,
    #[cfg_attr(feature = "serde", serde(skip))]
    rules: RuleCollector,
}

impl ExpressionSet {
    /// Builds a set from pre-assembled members.
    ///
    /// Fails with [`DslError::TooFewMembers`] unless at least two members
    /// are given.
    pub fn new(members: Vec<Term>) -> DslResult<Self> {
        if members.len() < 2 {
            return Err(DslError::TooFewMembers(members.len()));
        }
        let rules = members[0].collector().clone();
        Ok(Self { members, rules })
    }

    /// Assembles a set whose member count was already checked by the union
    /// logic.
    pub(crate) fn from_members(rules: RuleCollector, members: Vec<Term>) -> Self {
        debug_assert!(members.len() >= 2);
        Self { members, rules }
    }

    pub(crate) fn into_members(self) -> Vec<Term> {
        self.members
    }

    /// The members of the union, in combination order. At least two.
    pub fn members(&self) -> &[Term] {
        &self.members
    }

    /// Handle to the session collector this set records into.
    pub fn collector(&self) -> &RuleCollector {
        &self.rules
    }

    /// Unsupported: a set of alternatives cannot take call arguments.
    pub fn call(self, _args: Vec<Value>, _kwargs: Vec<(String, Value)>) -> DslResult<Self> {
        Err(DslError::UnsupportedSetOperation { operation: "call" })
    }

    /// Unsupported: a set of alternatives cannot be indexed.
    pub fn with_key(self, _key: Value) -> DslResult<Self> {
        Err(DslError::UnsupportedSetOperation {
            operation: "with_key",
        })
    }

    /// Unsupported: a set of alternatives has no attributes.
    pub fn attribute(self, _name: &str) -> DslResult<PartialAttribute> {
        Err(DslError::UnsupportedSetOperation {
            operation: "attribute",
        })
    }

    /// Unsupported: elements are appended to chains, never to sets.
    pub(crate) fn append_element(self, _element: ElementNode) -> DslResult<Self> {
        Err(DslError::UnsupportedSetOperation {
            operation: "append_element",
        })
    }

    /// Attaches a trailing parameter to the last member of the union.
    pub fn with_parameter(mut self, param: Expression) -> Self {
        if let Some(last) = self.members.pop() {
            self.members.push(last.with_parameter(param));
        }
        self
    }

    /// Unions this set with a further symbolic reference.
    ///
    /// A single reference is materialized if needed and appended; another
    /// set is flattened one level into this one, keeping member order.
    pub fn union(mut self, rhs: impl Into<Operand>) -> Self {
        match rhs.into() {
            Operand::Reference(symbol) => {
                self.members.push(Term::Expression(symbol.to_expression()))
            }
            Operand::Partial(partial) => {
                self.members.push(Term::Expression(partial.materialize()))
            }
            Operand::Expression(expr) => self.members.push(Term::Expression(expr)),
            Operand::Set(set) => self.members.extend(set.members),
        }
        trace!("union extended to {} members", self.members.len());
        self
    }

    /// Unions this set with an arbitrary [`Value`].
    ///
    /// Fails with [`DslError::IncompatibleUnion`] when the value is not a
    /// chain or a set.
    pub fn union_value(self, rhs: Value) -> DslResult<Self> {
        let operand = Operand::try_from(rhs)?;
        Ok(self.union(operand))
    }

    /// Appends the flattened element sequences of every member, in member
    /// order, onto `target`.
    pub fn flatten_into(&self, target: &mut Vec<ElementNode>) {
        for member in &self.members {
            member.flatten_into(target);
        }
    }

    /// Finalizes `self > rhs` into a rule, records it in the session
    /// collector, and returns it. Terminal: the set is consumed.
    pub fn greater_than(self, rhs: impl Into<Value>) -> Rule {
        self.finalize(RuleKind::GreaterThan, rhs.into())
    }

    /// Finalizes `self == rhs` into a rule, records it, and returns it.
    pub fn equals(self, rhs: impl Into<Value>) -> Rule {
        self.finalize(RuleKind::Equal, rhs.into())
    }

    /// Finalizes `self != rhs` into a rule, records it, and returns it.
    pub fn not_equals(self, rhs: impl Into<Value>) -> Rule {
        self.finalize(RuleKind::NotEqual, rhs.into())
    }

    fn finalize(self, kind: RuleKind, rhs: Value) -> Rule {
        let rules = self.rules.clone();
        let rule = Rule {
            kind,
            lhs: Term::Set(self),
            rhs,
        };
        rules.record(rule.clone());
        rule
    }
}

impl PartialEq for ExpressionSet {
    fn eq(&self, other: &Self) -> bool {
        self.members == other.members
    }
}

impl fmt::Display for ExpressionSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let labels: Vec<String> = self
            .members
            .iter()
            .map(|member| member.to_string())
            .collect();
        f.write_str(&labels.join("+"))
    }
}
