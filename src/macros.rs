//! Operand-list construction macros.

/// Build a `Vec<Bson>` from a heterogeneous operand list.
///
/// Variadic operator methods and the dynamic dispatch paths take their
/// operands as iterators of [`Bson`](bson::Bson); this macro converts each
/// element through `Bson::from`, so field-reference strings, literals, and
/// nested `bson!` values mix freely.
///
/// # Examples
///
/// ```rust
/// use agg_chain::{operands, Operator, Recorder};
///
/// let mut expr = Recorder::new();
/// Operator::new(&mut expr).concat(operands!["$firstName", " ", "$lastName"]);
/// assert_eq!(expr.last().unwrap().operands.len(), 3);
/// ```
#[macro_export]
macro_rules! operands {
    () => {
        ::std::vec::Vec::<$crate::Bson>::new()
    };
    ($($operand:expr),+ $(,)?) => {
        ::std::vec![$($crate::Bson::from($operand)),+]
    };
}
