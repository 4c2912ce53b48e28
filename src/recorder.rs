//! Call-recording expression builder.
//!
//! [`Recorder`] implements [`ExpressionBuilder`] by appending each forwarded
//! operator to a list, in call order, without assembling any expression
//! document. It exists for tests and debugging: wrap one in an
//! [`Operator`](crate::Operator), drive the fluent API, then assert on the
//! recorded calls. Downstream crates can use it the same way to test their
//! own pipeline assembly.
//!
//! # Example
//!
//! ```rust
//! use agg_chain::{Operator, Recorder};
//!
//! let mut expr = Recorder::new();
//! Operator::new(&mut expr).add([1, 2]).multiply([3, 4]);
//!
//! let operators: Vec<_> = expr.calls().iter().map(|c| c.operator.as_str()).collect();
//! assert_eq!(operators, ["$add", "$multiply"]);
//! ```

use bson::Bson;
use serde::{Deserialize, Serialize};
use smol_str::SmolStr;

use crate::builder::ExpressionBuilder;

/// A single forwarded operator invocation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecordedCall {
    /// The operator name as forwarded (`"$add"`).
    pub operator: SmolStr,
    /// The operands as forwarded, in order.
    pub operands: Vec<Bson>,
}

/// An [`ExpressionBuilder`] that records forwarded calls in order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Recorder {
    calls: Vec<RecordedCall>,
}

impl Recorder {
    /// Create an empty recorder.
    pub fn new() -> Self {
        Self::default()
    }

    /// The recorded calls, oldest first.
    pub fn calls(&self) -> &[RecordedCall] {
        &self.calls
    }

    /// The most recently recorded call.
    pub fn last(&self) -> Option<&RecordedCall> {
        self.calls.last()
    }

    /// Number of recorded calls.
    pub fn len(&self) -> usize {
        self.calls.len()
    }

    /// Whether nothing has been recorded yet.
    pub fn is_empty(&self) -> bool {
        self.calls.is_empty()
    }

    /// Drain the recorded calls, leaving the recorder empty.
    pub fn take_calls(&mut self) -> Vec<RecordedCall> {
        std::mem::take(&mut self.calls)
    }

    /// Discard all recorded calls.
    pub fn clear(&mut self) {
        self.calls.clear();
    }
}

impl ExpressionBuilder for Recorder {
    fn apply(&mut self, operator: &str, operands: Vec<Bson>) {
        self.calls.push(RecordedCall {
            operator: SmolStr::new(operator),
            operands,
        });
    }
}

#[cfg(test)]
mod tests {
    use bson::Bson;
    use pretty_assertions::assert_eq;

    use super::{RecordedCall, Recorder};
    use crate::builder::ExpressionBuilder;

    #[test]
    fn test_records_calls_in_order() {
        let mut recorder = Recorder::new();
        recorder.apply("$add", vec![Bson::Int32(1), Bson::Int32(2)]);
        recorder.apply("$multiply", vec![Bson::Int32(3)]);

        assert_eq!(recorder.len(), 2);
        assert_eq!(recorder.calls()[0].operator, "$add");
        assert_eq!(recorder.last().unwrap().operator, "$multiply");
    }

    #[test]
    fn test_take_calls_drains_the_recorder() {
        let mut recorder = Recorder::new();
        recorder.apply("$sum", vec![Bson::Int32(1)]);

        let calls = recorder.take_calls();
        assert_eq!(
            calls,
            vec![RecordedCall {
                operator: "$sum".into(),
                operands: vec![Bson::Int32(1)],
            }]
        );
        assert!(recorder.is_empty());
    }

    #[test]
    fn test_clear_discards_recorded_calls() {
        let mut recorder = Recorder::new();
        recorder.apply("$rand", Vec::new());
        recorder.clear();

        assert!(recorder.is_empty());
        assert_eq!(recorder.last(), None);
    }

    #[test]
    fn test_empty_recorder_reports_empty() {
        let recorder = Recorder::new();
        assert!(recorder.is_empty());
        assert_eq!(recorder.len(), 0);
        assert!(recorder.calls().is_empty());
    }
}
