//! Error types for dynamic operator dispatch.

use smol_str::SmolStr;
use thiserror::Error;

/// Returned by [`Operator::try_call`](crate::Operator::try_call) when the
/// method name is not in the operator table.
///
/// The open dispatch paths ([`Operator::call`](crate::Operator::call),
/// [`Operator::operator`](crate::Operator::operator)) never produce this
/// error; they forward unknown names verbatim.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("unknown operator method `{method}`")]
pub struct UnknownOperatorError {
    method: SmolStr,
}

impl UnknownOperatorError {
    pub(crate) fn new(method: impl Into<SmolStr>) -> Self {
        Self {
            method: method.into(),
        }
    }

    /// The method name that failed to resolve.
    pub fn method(&self) -> &str {
        &self.method
    }
}
