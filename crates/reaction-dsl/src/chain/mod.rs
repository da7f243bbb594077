//! Chain construction for symbolic species and rule references.
//!
//! A chain starts at an immutable [`SymbolReference`], passes through
//! transient [`PartialAttribute`] cursors as attributes are accessed, and
//! materializes into an [`Expression`] that later operations decorate in
//! place. `union` combines chains into an [`ExpressionSet`] of
//! alternatives, and a comparison finalizer ends the chain by recording a
//! [`Rule`](crate::Rule) in the session collector:
//!
//! ```text
//! SymbolReference --attribute--> PartialAttribute --any op--> Expression
//! Expression      --attribute--> PartialAttribute --any op--> Expression
//! Expression | ExpressionSet --union-->      ExpressionSet
//! Expression | ExpressionSet --comparison--> Rule (terminal)
//! ```
//!
//! No operation leads back to the root state.

mod element;
mod expression;
mod set;

pub use element::ElementNode;
pub use expression::{Expression, PartialAttribute, SymbolReference};
pub use set::{ExpressionSet, Operand, Term};
