//! Introspection over the supported operator surface.
//!
//! The operator methods on [`Operator`](crate::Operator) are generated from a
//! single declarative table; this module exposes that table as data so
//! callers can enumerate the supported operators or resolve a method name
//! without going through the wrapper. Because the table drives both, the
//! methods and the registry cannot drift apart.

use serde::Serialize;

use crate::operator::OPERATORS;

/// Operand shape of an operator method.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Arity {
    /// Exactly this many operands.
    Fixed(u8),
    /// `required` operands followed by up to `optional` trailing operands.
    ///
    /// Trailing operands the caller omits are not forwarded; an omitted
    /// operand followed by a present one forwards as BSON null so operand
    /// positions stay stable.
    Optional {
        /// Number of operands that must be supplied.
        required: u8,
        /// Number of trailing operands that may be supplied.
        optional: u8,
    },
    /// Any number of operands.
    Variadic,
}

/// One row of the operator table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct OperatorSpec {
    /// The wrapper method name (`"date_to_string"`).
    pub method: &'static str,
    /// The forwarded MongoDB operator name (`"$dateToString"`).
    pub name: &'static str,
    /// The method's operand shape.
    pub arity: Arity,
}

/// Look up a table row by wrapper method name.
pub fn lookup(method: &str) -> Option<&'static OperatorSpec> {
    OPERATORS.iter().find(|spec| spec.method == method)
}

/// Look up a table row by MongoDB operator name, including the `$`.
pub fn by_operator(name: &str) -> Option<&'static OperatorSpec> {
    OPERATORS.iter().find(|spec| spec.name == name)
}
