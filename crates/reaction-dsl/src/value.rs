//! Argument and right-hand-side values carried by a chain.

use std::fmt;

use crate::chain::{Expression, ExpressionSet};

/// A value attached to a chain: a call argument, a keyword argument, an
/// index key, or the right-hand side of a finalized rule.
///
/// The set of carried kinds is closed, so every dispatch over a value is an
/// exhaustive match. Text renders bare, without quoting: the rendering is a
/// one-way display form and is never parsed back.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum Value {
    /// A signed integer literal.
    Integer(i64),
    /// A floating-point literal.
    Float(f64),
    /// A bare text literal.
    Text(String),
    /// A boolean literal.
    Bool(bool),
    /// A nested chain.
    Expression(Box<Expression>),
    /// A nested union of chains.
    Set(Box<ExpressionSet>),
}

impl Value {
    /// Short label for the value kind, used in error messages.
    pub fn kind(&self) -> &'static str {
        match self {
            Value::Integer(_) => "integer",
            Value::Float(_) => "float",
            Value::Text(_) => "text",
            Value::Bool(_) => "bool",
            Value::Expression(_) => "expression",
            Value::Set(_) => "expression set",
        }
    }
}

impl From<i64> for Value {
    fn from(value: i64) -> Self {
        Value::Integer(value)
    }
}

impl From<i32> for Value {
    fn from(value: i32) -> Self {
        Value::Integer(i64::from(value))
    }
}

impl From<f64> for Value {
    fn from(value: f64) -> Self {
        Value::Float(value)
    }
}

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Value::Bool(value)
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Value::Text(value.to_string())
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Value::Text(value)
    }
}

impl From<Expression> for Value {
    fn from(value: Expression) -> Self {
        Value::Expression(Box::new(value))
    }
}

impl From<ExpressionSet> for Value {
    fn from(value: ExpressionSet) -> Self {
        Value::Set(Box::new(value))
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Integer(value) => write!(f, "{}", value),
            Value::Float(value) => write!(f, "{}", value),
            Value::Text(value) => f.write_str(value),
            Value::Bool(value) => write!(f, "{}", value),
            Value::Expression(value) => write!(f, "{}", value),
            Value::Set(value) => write!(f, "{}", value),
        }
    }
}
