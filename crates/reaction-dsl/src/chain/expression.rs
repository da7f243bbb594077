//! Chain construction: symbol roots, pending attribute cursors, and the
//! element chain itself.

use std::fmt;

use log::trace;

use crate::error::{DslError, DslResult};
use crate::rule::{Rule, RuleCollector, RuleKind};
use crate::value::Value;

use super::element::ElementNode;
use super::set::{ExpressionSet, Operand, Term};

/// Prefix marking internal-only attribute names.
const RESERVED_PREFIX: char = '_';

/// An immutable named root symbol: the entry point of every chain.
///
/// A symbol exposes no call, index, or parameter operations of its own.
/// Those require a materialized chain, reached either through
/// [`attribute`](SymbolReference::attribute) access or explicitly via
/// [`to_expression`](SymbolReference::to_expression).
#[derive(Debug, Clone)]
pub struct SymbolReference {
    rules: RuleCollector,
    name: String,
}

impl SymbolReference {
    /// Creates a symbol bound to the given session collector. Usually
    /// reached through [`RuleCollector::symbol`].
    pub fn new(rules: &RuleCollector, name: impl Into<String>) -> Self {
        Self {
            rules: rules.clone(),
            name: name.into(),
        }
    }

    /// The symbol's name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Materializes the symbol into a fresh single-element chain.
    ///
    /// Every call allocates an independent chain; the symbol itself is
    /// never mutated.
    pub fn to_expression(&self) -> Expression {
        Expression::root(&self.rules, self.name.clone())
    }

    /// Starts an attribute access on this symbol.
    ///
    /// Fails with [`DslError::ReservedAttribute`] if `name` uses the
    /// reserved internal prefix.
    pub fn attribute(&self, name: &str) -> DslResult<PartialAttribute> {
        self.to_expression().attribute(name)
    }
}

impl fmt::Display for SymbolReference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}

/// An ordered, non-empty chain of elements: one fully or partially
/// qualified symbolic reference.
///
/// Chain operations consume `self` and return the extended chain, so every
/// chain owns its own element storage. The only state shared between chains
/// is the [`RuleCollector`] handle of the authoring session they were
/// created in.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Expression {
    elements: Vec<ElementNode>,
    #[cfg_attr(feature = "serde", serde(skip))]
    rules: RuleCollector,
}

impl Expression {
    /// Creates a fresh single-element chain rooted at `name`, with its own
    /// element storage.
    pub(crate) fn root(rules: &RuleCollector, name: impl Into<String>) -> Self {
        Self {
            elements: vec![ElementNode::new(name)],
            rules: rules.clone(),
        }
    }

    /// The elements of the chain, in construction order. Never empty.
    pub fn elements(&self) -> &[ElementNode] {
        &self.elements
    }

    /// Handle to the session collector this chain records into.
    pub fn collector(&self) -> &RuleCollector {
        &self.rules
    }

    /// Attaches call arguments to the last element, replacing any earlier
    /// attachment wholesale. Attaching nothing at all is a no-op.
    pub fn call(mut self, args: Vec<Value>, kwargs: Vec<(String, Value)>) -> Self {
        if args.is_empty() && kwargs.is_empty() {
            return self;
        }
        if let Some(last) = self.elements.last_mut() {
            trace!(
                "call: {}({} positional, {} keyword)",
                last.name,
                args.len(),
                kwargs.len()
            );
            last.set_arguments(args, kwargs);
        }
        self
    }

    /// Attaches an index key to the last element, replacing any earlier
    /// one.
    pub fn with_key(mut self, key: impl Into<Value>) -> Self {
        if let Some(last) = self.elements.last_mut() {
            last.set_key(key.into());
        }
        self
    }

    /// Attaches a trailing parameter chain to the last element, replacing
    /// any earlier one.
    pub fn with_parameter(mut self, param: Expression) -> Self {
        if let Some(last) = self.elements.last_mut() {
            trace!("parameter: {}|{}", last.name, param);
            last.set_parameter(param);
        }
        self
    }

    /// Starts an attribute access, to be materialized by the next
    /// operation on the returned cursor.
    ///
    /// Fails with [`DslError::ReservedAttribute`] if `name` uses the
    /// reserved internal prefix.
    pub fn attribute(self, name: &str) -> DslResult<PartialAttribute> {
        if name.starts_with(RESERVED_PREFIX) {
            return Err(DslError::ReservedAttribute(name.to_string()));
        }
        trace!("attribute: {}.{}", self, name);
        Ok(PartialAttribute {
            base: self,
            name: name.to_string(),
        })
    }

    /// Unions this chain with another symbolic reference.
    ///
    /// A symbol or pending attribute on the right-hand side is materialized
    /// first; a set on the right-hand side is flattened one level, keeping
    /// member order.
    pub fn union(self, rhs: impl Into<Operand>) -> ExpressionSet {
        let rules = self.rules.clone();
        let mut members = vec![Term::Expression(self)];
        match rhs.into() {
            Operand::Reference(symbol) => members.push(Term::Expression(symbol.to_expression())),
            Operand::Partial(partial) => members.push(Term::Expression(partial.materialize())),
            Operand::Expression(expr) => members.push(Term::Expression(expr)),
            Operand::Set(set) => members.extend(set.into_members()),
        }
        trace!("union of {} members", members.len());
        ExpressionSet::from_members(rules, members)
    }

    /// Unions this chain with an arbitrary [`Value`].
    ///
    /// Fails with [`DslError::IncompatibleUnion`] when the value is not a
    /// chain or a set.
    pub fn union_value(self, rhs: Value) -> DslResult<ExpressionSet> {
        let operand = Operand::try_from(rhs)?;
        Ok(self.union(operand))
    }

    /// Appends an element to the chain. Chains only grow through attribute
    /// materialization, so this stays crate-internal.
    pub(crate) fn append_element(mut self, element: ElementNode) -> Self {
        self.elements.push(element);
        self
    }

    /// Appends this chain's elements onto `target`, in order.
    pub fn flatten_into(&self, target: &mut Vec<ElementNode>) {
        target.extend(self.elements.iter().cloned());
    }

    /// Finalizes `self > rhs` into a rule, records it in the session
    /// collector, and returns it. Terminal: the chain is consumed.
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
            lhs: Term::Expression(self),
            rhs,
        };
        rules.record(rule.clone());
        rule
    }
}

impl PartialEq for Expression {
    fn eq(&self, other: &Self) -> bool {
        self.elements == other.elements
    }
}

impl fmt::Display for Expression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let labels: Vec<String> = self.elements.iter().map(|elem| elem.to_string()).collect();
        f.write_str(&labels.join("."))
    }
}

/// A pending attribute access: the transient cursor between an attribute
/// access and the next operation on it.
///
/// Materialization consumes the cursor, so the pending element can never be
/// appended to its base chain twice.
#[derive(Debug, Clone)]
pub struct PartialAttribute {
    base: Expression,
    name: String,
}

impl PartialAttribute {
    /// Appends the pending element to the base chain and returns the
    /// extended chain.
    pub fn materialize(self) -> Expression {
        trace!("materialize: {}.{}", self.base, self.name);
        self.base.append_element(ElementNode::new(self.name))
    }

    /// Materializes, then attaches call arguments.
    pub fn call(self, args: Vec<Value>, kwargs: Vec<(String, Value)>) -> Expression {
        self.materialize().call(args, kwargs)
    }

    /// Materializes, then starts the next attribute access.
    pub fn attribute(self, name: &str) -> DslResult<PartialAttribute> {
        self.materialize().attribute(name)
    }

    /// Materializes, then attaches an index key.
    pub fn with_key(self, key: impl Into<Value>) -> Expression {
        self.materialize().with_key(key)
    }

    /// Materializes, then attaches a trailing parameter chain.
    pub fn with_parameter(self, param: Expression) -> Expression {
        self.materialize().with_parameter(param)
    }

    /// Materializes, then unions with `rhs`.
    pub fn union(self, rhs: impl Into<Operand>) -> ExpressionSet {
        self.materialize().union(rhs)
    }

    /// Materializes, then finalizes `self > rhs`.
    pub fn greater_than(self, rhs: impl Into<Value>) -> Rule {
        self.materialize().greater_than(rhs)
    }

    /// Materializes, then finalizes `self == rhs`.
    pub fn equals(self, rhs: impl Into<Value>) -> Rule {
        self.materialize().equals(rhs)
    }

    /// Materializes, then finalizes `self != rhs`.
    pub fn not_equals(self, rhs: impl Into<Value>) -> Rule {
        self.materialize().not_equals(rhs)
    }
}

impl fmt::Display for PartialAttribute {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.base, self.name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn session() -> RuleCollector {
        RuleCollector::new()
    }

    #[test]
    fn test_symbol_is_not_consumed_by_materialization() {
        let rules = session();
        let sp = rules.symbol("Sp");
        let first = sp.to_expression();
        let second = sp.to_expression();
        assert_eq!(first, second);
        assert_eq!(sp.name(), "Sp");
    }

    #[test]
    fn test_attribute_extends_the_chain() {
        let rules = session();
        let chain = rules
            .symbol("Egfr")
            .attribute("ligand")
            .unwrap()
            .materialize();
        assert_eq!(chain.elements().len(), 2);
        assert_eq!(chain.to_string(), "Egfr.ligand");
    }

    #[test]
    fn test_reserved_attribute_is_rejected() {
        let rules = session();
        let err = rules.symbol("Sp").attribute("_private").unwrap_err();
        assert_eq!(err, DslError::ReservedAttribute("_private".to_string()));
    }

    #[test]
    fn test_empty_call_is_a_no_op() {
        let rules = session();
        let chain = rules.symbol("Sp").to_expression().call(vec![], vec![]);
        assert_eq!(chain.to_string(), "Sp");
        assert!(chain.elements()[0].args.is_none());
    }

    #[test]
    fn test_call_targets_the_last_element() {
        let rules = session();
        let chain = rules
            .symbol("Egfr")
            .attribute("ligand")
            .unwrap()
            .call(vec![Value::from(1)], vec![]);
        assert_eq!(chain.to_string(), "Egfr.ligand(1)");
    }

    #[test]
    fn test_pending_attribute_display() {
        let rules = session();
        let pending = rules.symbol("Egfr").attribute("ligand").unwrap();
        assert_eq!(pending.to_string(), "Egfr.ligand");
    }

    #[test]
    fn test_key_and_parameter_render_after_arguments() {
        let rules = session();
        let rate = rules.symbol("kf").to_expression();
        let chain = rules
            .symbol("Sp")
            .to_expression()
            .call(vec![Value::from(2)], vec![])
            .with_key("cytosol")
            .with_parameter(rate);
        assert_eq!(chain.to_string(), "Sp(2)[cytosol]|kf");
    }

    #[test]
    fn test_finalize_records_into_the_session() {
        let rules = session();
        let rule = rules.symbol("Sp").to_expression().equals("bound");
        assert_eq!(rules.len(), 1);
        assert_eq!(rules.rules()[0], rule);
        assert_eq!(rule.kind, RuleKind::Equal);
    }

    #[test]
    fn test_cloned_chain_owns_its_elements() {
        let rules = session();
        let chain = rules.symbol("Sp").to_expression();
        let extended = chain.clone().attribute("site").unwrap().materialize();
        assert_eq!(chain.elements().len(), 1);
        assert_eq!(extended.elements().len(), 2);
    }
}
