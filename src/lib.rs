//! # agg-chain
//!
//! Chainable MongoDB aggregation expression operators.
//!
//! This crate exposes the MongoDB aggregation operator reference (`$add`,
//! `$cond`, `$map`, `$dateToString`, and the rest) as fluent method calls,
//! so application code composes expressions without hand-building nested
//! documents. It is a pure forwarding layer:
//! - [`Operator`] wraps a mutable borrow of an expression builder and
//!   forwards every method call to it, unchanged and in order, returning
//!   itself so calls chain.
//! - [`ExpressionBuilder`] is the seam the forwarded calls land on. Document
//!   assembly, field-reference coercion, and operand validation all live
//!   behind it; builder failures surface through the builder's own API,
//!   untranslated.
//! - [`OPERATORS`] is the declarative table the operator methods are
//!   generated from, exposed for introspection via [`registry`].
//! - [`Recorder`] is a bundled builder that records forwarded calls
//!   verbatim, for testing pipeline assembly.
//!
//! Operators the table does not name (new server releases, `$function`,
//! vendor extensions) remain reachable through [`Operator::operator`] and
//! [`Operator::call`], which forward unknown names verbatim.
//!
//! ## Example
//!
//! ```rust
//! use agg_chain::{operands, Operator, Recorder};
//!
//! let mut expr = Recorder::new();
//! Operator::new(&mut expr)
//!     .add(operands!["$price", "$shipping"])
//!     .cond("$onSale", "$salePrice", "$price")
//!     .date_to_string("$orderedAt", Some("%Y-%m-%d".into()), None, None);
//!
//! let calls = expr.calls();
//! assert_eq!(calls[0].operator, "$add");
//! assert_eq!(calls[1].operator, "$cond");
//! assert_eq!(calls[2].operands.len(), 2); // omitted tail operands are dropped
//! ```

pub mod builder;
pub mod error;
#[macro_use]
pub mod macros;
pub mod operator;
pub mod recorder;
pub mod registry;

pub use builder::ExpressionBuilder;
pub use error::UnknownOperatorError;
pub use operator::{Operator, OPERATORS};
pub use recorder::{RecordedCall, Recorder};
pub use registry::{Arity, OperatorSpec};

pub use ::bson;
pub use ::bson::{bson, doc, Bson, Document};

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::builder::ExpressionBuilder;
    pub use crate::error::UnknownOperatorError;
    pub use crate::operator::{Operator, OPERATORS};
    pub use crate::recorder::{RecordedCall, Recorder};
    pub use crate::registry::{Arity, OperatorSpec};
    pub use crate::operands;
    pub use bson::{bson, doc, Bson, Document};
}
