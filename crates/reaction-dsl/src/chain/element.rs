//! The named tokens a chain is made of.

use std::fmt;

use crate::value::Value;

use super::expression::Expression;

/// One named token in a chain.
///
/// An element renders as its name, optionally followed by attached call
/// arguments, an index key, and a trailing parameter, in that order:
/// `name(args,k=v)[key]|param`.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct ElementNode {
    /// Token name.
    pub name: String,
    /// Positional call arguments, if any were attached.
    pub args: Option<Vec<Value>>,
    /// Keyword call arguments in attachment order, if any were attached.
    pub kwargs: Option<Vec<(String, Value)>>,
    /// Index key, if one was attached.
    pub key: Option<Value>,
    /// Trailing parameter chain, if one was attached.
    pub param: Option<Box<Expression>>,
}

impl ElementNode {
    /// Creates a bare element with the given name.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            args: None,
            kwargs: None,
            key: None,
            param: None,
        }
    }

    /// Attaches call arguments, replacing any earlier attachment wholesale.
    pub fn set_arguments(&mut self, args: Vec<Value>, kwargs: Vec<(String, Value)>) {
        self.args = Some(args);
        self.kwargs = Some(kwargs);
    }

    /// Attaches an index key, replacing any earlier one.
    pub fn set_key(&mut self, key: Value) {
        self.key = Some(key);
    }

    /// Attaches a trailing parameter chain, replacing any earlier one.
    pub fn set_parameter(&mut self, param: Expression) {
        self.param = Some(Box::new(param));
    }
}

impl fmt::Display for ElementNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)?;

        if self.args.is_some() || self.kwargs.is_some() {
            let mut parts: Vec<String> = Vec::new();
            if let Some(ref args) = self.args {
                parts.extend(args.iter().map(|value| value.to_string()));
            }
            if let Some(ref kwargs) = self.kwargs {
                parts.extend(
                    kwargs
                        .iter()
                        .map(|(name, value)| format!("{}={}", name, value)),
                );
            }
            write!(f, "({})", parts.join(","))?;
        }

        if let Some(ref key) = self.key {
            write!(f, "[{}]", key)?;
        }
        if let Some(ref param) = self.param {
            write!(f, "|{}", param)?;
        }
        Ok(())
    }
}
