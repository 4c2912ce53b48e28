//! The expression-builder seam.
//!
//! The wrapper in [`crate::operator`] does not build expression trees itself.
//! Every operator method forwards its operands to an [`ExpressionBuilder`],
//! which owns document assembly, field-reference coercion, and whatever
//! validation it wants to perform.

use bson::Bson;

/// Receiver for forwarded aggregation operators.
///
/// Implementors own the expression state. The wrapper calls
/// [`apply`](Self::apply) once per operator method invocation, in call order,
/// and never inspects the result.
///
/// Operand failures (wrong type, out-of-range value, unsupported operator)
/// are the implementor's to surface through its own finishing API; the
/// forwarding layer neither checks nor translates them.
pub trait ExpressionBuilder {
    /// Apply the named aggregation operator to the expression under
    /// construction.
    ///
    /// `operator` is the MongoDB operator name (`"$add"`,
    /// `"$dateToString"`); `operands` are the caller's arguments, unchanged
    /// and in order.
    fn apply(&mut self, operator: &str, operands: Vec<Bson>);
}

impl<B: ExpressionBuilder + ?Sized> ExpressionBuilder for &mut B {
    fn apply(&mut self, operator: &str, operands: Vec<Bson>) {
        (**self).apply(operator, operands);
    }
}

#[cfg(test)]
mod tests {
    use bson::Bson;

    use super::ExpressionBuilder;
    use crate::operator::Operator;

    /// A builder that only counts invocations.
    #[derive(Default)]
    struct Counter {
        applied: usize,
    }

    impl ExpressionBuilder for Counter {
        fn apply(&mut self, _operator: &str, _operands: Vec<Bson>) {
            self.applied += 1;
        }
    }

    #[test]
    fn test_custom_builder_receives_each_call() {
        let mut counter = Counter::default();
        Operator::new(&mut counter).add([1, 2]).not(true).rand();

        assert_eq!(counter.applied, 3);
    }

    #[test]
    fn test_blanket_impl_forwards_through_reborrow() {
        let mut counter = Counter::default();
        let mut borrowed = &mut counter;
        borrowed.apply("$add", vec![Bson::Int32(1)]);

        assert_eq!(counter.applied, 1);
    }
}
