//! # reaction-dsl
//!
//! Builder-style authoring core for species and reaction-rule expressions.
//!
//! Instead of parsing a textual grammar, model descriptions are assembled
//! directly as expression trees: attribute access extends a chain, call
//! arguments, index keys, and trailing parameters decorate its last
//! element, `union` combines chains into sets of alternatives, and a
//! comparison finalizes the chain into a [`Rule`] recorded in the
//! session's [`RuleCollector`].
//!
//! ## Quick start
//!
//! ```rust
//! use reaction_dsl::{RuleCollector, Value};
//!
//! let rules = RuleCollector::new();
//! let egfr = rules.symbol("Egfr");
//!
//! // Egfr.ligand(1)[cytosol] > unbound
//! let chain = egfr
//!     .attribute("ligand")
//!     .unwrap()
//!     .call(vec![Value::from(1)], vec![])
//!     .with_key("cytosol");
//! let rule = chain.greater_than("unbound");
//!
//! assert_eq!(rule.to_string(), "Egfr.ligand(1)[cytosol] > unbound");
//! assert_eq!(rules.len(), 1);
//! ```
//!
//! ## Unions
//!
//! Chains combine into ordered sets of alternatives; a set cannot be
//! chained further, but it can be parameterized on its last member and
//! finalized like any chain:
//!
//! ```rust
//! use reaction_dsl::RuleCollector;
//!
//! let rules = RuleCollector::new();
//! let (a, b, c) = (rules.symbol("A"), rules.symbol("B"), rules.symbol("C"));
//!
//! // A + B + C == complex
//! let set = a.to_expression().union(&b).union(&c);
//! assert_eq!(set.to_string(), "A+B+C");
//!
//! set.equals("complex");
//! assert_eq!(rules.len(), 1);
//! ```
//!
//! ## Feature flags
//!
//! - `serde` — `Serialize` impls for rules and chain types. One-way by
//!   design: rules are exported to the model compiler, never read back
//!   into a live session.

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

mod chain;
mod error;
mod rule;
mod value;

pub use chain::{
    ElementNode, Expression, ExpressionSet, Operand, PartialAttribute, SymbolReference, Term,
};
pub use error::{DslError, DslResult};
pub use rule::{Rule, RuleCollector, RuleKind};
pub use value::Value;
