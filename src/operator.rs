//! The fluent operator wrapper.
//!
//! [`Operator`] wraps a mutable borrow of an [`ExpressionBuilder`] and exposes
//! the MongoDB aggregation operator reference as chainable methods. Each
//! method converts its operands to BSON, forwards them to the builder under
//! the operator's `$` name, and returns `&mut Self` so calls chain. The
//! wrapper holds no state of its own and never reads the builder back.
//!
//! The methods are generated from the declarative table at the bottom of this
//! file; the same table is exported as [`OPERATORS`] for introspection (see
//! [`crate::registry`]).
//!
//! # Example
//!
//! ```rust
//! use agg_chain::{operands, Operator, Recorder};
//!
//! let mut expr = Recorder::new();
//! Operator::new(&mut expr)
//!     .multiply(operands!["$price", "$quantity"])
//!     .round("$total", Some(2.into()));
//!
//! assert_eq!(expr.calls()[0].operator, "$multiply");
//! assert_eq!(expr.calls()[1].operator, "$round");
//! ```

use bson::Bson;
use tracing::trace;

use crate::builder::ExpressionBuilder;
use crate::error::UnknownOperatorError;
use crate::registry::{self, Arity, OperatorSpec};

/// Fluent wrapper over an expression builder.
///
/// Holds the builder borrow for its entire lifetime; the borrow ends when the
/// wrapper goes out of scope. Every operator method forwards to
/// [`ExpressionBuilder::apply`] exactly once and yields the wrapper back.
///
/// This layer performs no operand checking. Whether `$divide` got two
/// operands or `$round`'s place is in range is the builder's concern, and
/// builder failures surface through the builder's own API, untranslated.
#[derive(Debug)]
pub struct Operator<'a, B: ExpressionBuilder> {
    expr: &'a mut B,
}

impl<'a, B: ExpressionBuilder> Operator<'a, B> {
    /// Wrap an expression builder.
    pub fn new(expr: &'a mut B) -> Self {
        Self { expr }
    }

    /// Forward an arbitrary operator name with the given operands.
    ///
    /// Escape hatch for operators without a named method: new server
    /// releases, `$function`, vendor extensions. `name` is forwarded
    /// verbatim, so pass the `$`-prefixed operator name.
    ///
    /// ```rust
    /// use agg_chain::{operands, Operator, Recorder};
    ///
    /// let mut expr = Recorder::new();
    /// Operator::new(&mut expr).operator("$toHashedIndexKey", operands!["$userName"]);
    /// assert_eq!(expr.last().unwrap().operator, "$toHashedIndexKey");
    /// ```
    pub fn operator(
        &mut self,
        name: &str,
        operands: impl IntoIterator<Item = Bson>,
    ) -> &mut Self {
        self.forward(name, operands.into_iter().collect())
    }

    /// Dispatch by method name.
    ///
    /// Names found in the operator table forward their mapped `$` operator
    /// (`"date_to_string"` forwards `$dateToString`); anything else falls
    /// through to the generic path and is forwarded verbatim, like
    /// [`operator`](Self::operator).
    pub fn call(&mut self, method: &str, operands: impl IntoIterator<Item = Bson>) -> &mut Self {
        match registry::lookup(method) {
            Some(spec) => self.forward(spec.name, operands.into_iter().collect()),
            None => self.forward(method, operands.into_iter().collect()),
        }
    }

    /// Dispatch by method name, rejecting names the table does not declare.
    ///
    /// The closed-set counterpart of [`call`](Self::call): nothing is
    /// forwarded on error. Operand constraints are still not checked; only
    /// the name is resolved.
    pub fn try_call(
        &mut self,
        method: &str,
        operands: impl IntoIterator<Item = Bson>,
    ) -> Result<&mut Self, UnknownOperatorError> {
        match registry::lookup(method) {
            Some(spec) => Ok(self.forward(spec.name, operands.into_iter().collect())),
            None => Err(UnknownOperatorError::new(method)),
        }
    }

    fn forward(&mut self, operator: &str, operands: Vec<Bson>) -> &mut Self {
        trace!(operator = %operator, operands = operands.len(), "Forwarding operator");
        self.expr.apply(operator, operands);
        self
    }
}

/// Generates the operator methods and the [`OPERATORS`] table from one
/// declarative list.
///
/// Row shapes:
/// - `name [..] => "$op";` variadic, takes any iterator of operands
/// - `name (a, b) => "$op";` fixed arity, one operand per parameter
/// - `name (a; b, c) => "$op";` required operands, then optional trailing
///   operands (`Option<Bson>`); omitted tail operands are dropped, a `None`
///   between present operands forwards as `Bson::Null` to keep positions
/// - `name () => "$op";` no operands
macro_rules! operators {
    (
        $(
            $(#[$doc:meta])*
            $name:ident $shape:tt => $op:literal;
        )*
    ) => {
        impl<'a, B: ExpressionBuilder> Operator<'a, B> {
            $(
                operators!(@method $(#[$doc])* $name $shape => $op);
            )*
        }

        /// The declarative table the operator methods are generated from,
        /// in declaration order.
        pub const OPERATORS: &[OperatorSpec] = &[
            $(
                OperatorSpec {
                    method: stringify!($name),
                    name: $op,
                    arity: operators!(@arity $shape),
                },
            )*
        ];
    };

    (@method $(#[$doc:meta])* $name:ident [..] => $op:literal) => {
        $(#[$doc])*
        pub fn $name<I, V>(&mut self, operand_list: I) -> &mut Self
        where
            I: IntoIterator<Item = V>,
            V: Into<Bson>,
        {
            let ops = operand_list.into_iter().map(Into::into).collect();
            self.forward($op, ops)
        }
    };
    (@method $(#[$doc:meta])* $name:ident () => $op:literal) => {
        $(#[$doc])*
        pub fn $name(&mut self) -> &mut Self {
            self.forward($op, Vec::new())
        }
    };
    (@method $(#[$doc:meta])* $name:ident ($($req:ident),+ ; $($opt:ident),+) => $op:literal) => {
        $(#[$doc])*
        pub fn $name(
            &mut self,
            $($req: impl Into<Bson>,)+
            $($opt: Option<Bson>,)+
        ) -> &mut Self {
            let mut ops = vec![$($req.into()),+];
            let tail = [$($opt),+];
            if let Some(present) = tail.iter().rposition(Option::is_some) {
                ops.extend(
                    tail.into_iter()
                        .take(present + 1)
                        .map(|operand| operand.unwrap_or(Bson::Null)),
                );
            }
            self.forward($op, ops)
        }
    };
    (@method $(#[$doc:meta])* $name:ident ($($req:ident),+) => $op:literal) => {
        $(#[$doc])*
        pub fn $name(&mut self, $($req: impl Into<Bson>),+) -> &mut Self {
            self.forward($op, vec![$($req.into()),+])
        }
    };

    (@arity [..]) => { Arity::Variadic };
    (@arity ()) => { Arity::Fixed(0) };
    (@arity ($($req:ident),+ ; $($opt:ident),+)) => {
        Arity::Optional {
            required: operators!(@count $($req),+),
            optional: operators!(@count $($opt),+),
        }
    };
    (@arity ($($req:ident),+)) => { Arity::Fixed(operators!(@count $($req),+)) };

    (@count) => { 0u8 };
    (@count $head:ident $(, $tail:ident)*) => { 1u8 + operators!(@count $($tail),*) };
}

operators! {
    // Arithmetic operators
    /// Absolute value (`$abs`).
    abs(value) => "$abs";
    /// Sum of the operands; numbers, or a date plus numbers (`$add`).
    add[..] => "$add";
    /// Smallest integer greater than or equal to the operand (`$ceil`).
    ceil(value) => "$ceil";
    /// Division (`$divide`).
    divide(dividend, divisor) => "$divide";
    /// Raises e to the operand (`$exp`).
    exp(exponent) => "$exp";
    /// Largest integer less than or equal to the operand (`$floor`).
    floor(value) => "$floor";
    /// Natural logarithm (`$ln`).
    ln(value) => "$ln";
    /// Logarithm in the given base (`$log`).
    log(number, base) => "$log";
    /// Base-10 logarithm (`$log10`).
    log10(value) => "$log10";
    /// Remainder of dividing the operands (`$mod`).
    modulo(dividend, divisor) => "$mod";
    /// Product of the operands (`$multiply`).
    multiply[..] => "$multiply";
    /// Raises a number to an exponent (`$pow`).
    pow(base, exponent) => "$pow";
    /// Rounds to the given decimal place, default whole integer (`$round`).
    round(value; place) => "$round";
    /// Square root (`$sqrt`).
    sqrt(value) => "$sqrt";
    /// Difference of two numbers or dates (`$subtract`).
    subtract(minuend, subtrahend) => "$subtract";
    /// Truncates to the given decimal place (`$trunc`).
    trunc(value; place) => "$trunc";

    // Accumulator operators usable in expression position
    /// Average of the operands, ignoring non-numeric values (`$avg`).
    avg[..] => "$avg";
    /// Maximum of the operands (`$max`).
    max[..] => "$max";
    /// Minimum of the operands (`$min`).
    min[..] => "$min";
    /// Population standard deviation (`$stdDevPop`).
    std_dev_pop[..] => "$stdDevPop";
    /// Sample standard deviation (`$stdDevSamp`).
    std_dev_samp[..] => "$stdDevSamp";
    /// Sum of the operands, ignoring non-numeric values (`$sum`).
    sum[..] => "$sum";

    // Array operators
    /// Element at the given array index; negative counts from the end
    /// (`$arrayElemAt`).
    array_elem_at(array, idx) => "$arrayElemAt";
    /// Converts an array of key/value pairs to a document (`$arrayToObject`).
    array_to_object(array) => "$arrayToObject";
    /// Concatenates arrays (`$concatArrays`).
    concat_arrays[..] => "$concatArrays";
    /// Selects the array elements matching a condition (`$filter`).
    ///
    /// Operands forward as input, cond, then the optional element variable
    /// name and result limit.
    filter(input, cond_expr; as_var, limit) => "$filter";
    /// First element of an array (`$first`).
    first(expression) => "$first";
    /// Whether a value is contained in an array (`$in`).
    in_array(needle, haystack) => "$in";
    /// Index of the first occurrence of a value in an array, with an
    /// optional search range (`$indexOfArray`).
    index_of_array(array, search; start, end) => "$indexOfArray";
    /// Whether the operand is an array (`$isArray`).
    is_array(expression) => "$isArray";
    /// Last element of an array (`$last`).
    last(expression) => "$last";
    /// Applies an expression to each array element (`$map`).
    ///
    /// Operands forward as input, in, then the optional element variable
    /// name.
    map(input, in_expr; as_var) => "$map";
    /// Converts a document to an array of key/value pairs
    /// (`$objectToArray`).
    object_to_array(object) => "$objectToArray";
    /// Sequence of integers with an optional step (`$range`).
    range(start, end; step) => "$range";
    /// Folds an array into a single value (`$reduce`).
    reduce(input, initial_value, in_expr) => "$reduce";
    /// Array with elements in reverse order (`$reverseArray`).
    reverse_array(array) => "$reverseArray";
    /// Number of elements in an array (`$size`).
    size(array) => "$size";
    /// Subset of an array (`$slice`).
    ///
    /// Operands forward as array, n, then the optional start position.
    slice(array, n; position) => "$slice";
    /// Sorts an array by the given sort specification (`$sortArray`).
    sort_array(input, sort_by) => "$sortArray";
    /// Transposes arrays, zipping elements pairwise (`$zip`).
    zip(inputs; use_longest_length, defaults) => "$zip";

    // Boolean operators
    /// Logical conjunction (`$and`).
    and[..] => "$and";
    /// Logical negation (`$not`).
    not(expression) => "$not";
    /// Logical disjunction (`$or`).
    or[..] => "$or";

    // Comparison operators
    /// Three-way comparison: -1, 0, or 1 (`$cmp`).
    cmp(left, right) => "$cmp";
    /// Equality comparison (`$eq`).
    eq(left, right) => "$eq";
    /// Greater-than comparison (`$gt`).
    gt(left, right) => "$gt";
    /// Greater-than-or-equal comparison (`$gte`).
    gte(left, right) => "$gte";
    /// Less-than comparison (`$lt`).
    lt(left, right) => "$lt";
    /// Less-than-or-equal comparison (`$lte`).
    lte(left, right) => "$lte";
    /// Inequality comparison (`$ne`).
    ne(left, right) => "$ne";

    // Conditional operators
    /// Ternary conditional (`$cond`).
    cond(if_expr, then_expr, else_expr) => "$cond";
    /// First non-null operand (`$ifNull`).
    if_null[..] => "$ifNull";
    /// Multi-branch conditional (`$switch`).
    ///
    /// Operands forward as the branch array, then the optional default.
    switch(branches; default) => "$switch";

    // Date operators
    /// Adds a number of time units to a date (`$dateAdd`).
    date_add(start_date, unit, amount; timezone) => "$dateAdd";
    /// Difference between two dates in the given unit (`$dateDiff`).
    date_diff(start_date, end_date, unit; timezone, start_of_week) => "$dateDiff";
    /// Parses a date from a string (`$dateFromString`).
    date_from_string(date_string; format, timezone, on_error, on_null) => "$dateFromString";
    /// Subtracts a number of time units from a date (`$dateSubtract`).
    date_subtract(start_date, unit, amount; timezone) => "$dateSubtract";
    /// Splits a date into its constituent parts (`$dateToParts`).
    date_to_parts(date; timezone, iso8601) => "$dateToParts";
    /// Formats a date as a string (`$dateToString`).
    ///
    /// Operands forward as date, then the optional format, timezone, and
    /// null-replacement.
    date_to_string(date; format, timezone, on_null) => "$dateToString";
    /// Truncates a date to the given unit boundary (`$dateTrunc`).
    date_trunc(date, unit; bin_size, timezone, start_of_week) => "$dateTrunc";
    /// Day of the month, 1–31 (`$dayOfMonth`).
    day_of_month(date) => "$dayOfMonth";
    /// Day of the week, 1 (Sunday) – 7 (Saturday) (`$dayOfWeek`).
    day_of_week(date) => "$dayOfWeek";
    /// Day of the year, 1–366 (`$dayOfYear`).
    day_of_year(date) => "$dayOfYear";
    /// Hour portion of a date, 0–23 (`$hour`).
    hour(date) => "$hour";
    /// ISO 8601 day of the week, 1 (Monday) – 7 (Sunday)
    /// (`$isoDayOfWeek`).
    iso_day_of_week(date) => "$isoDayOfWeek";
    /// ISO 8601 week of the year, 1–53 (`$isoWeek`).
    iso_week(date) => "$isoWeek";
    /// ISO 8601 week-numbering year (`$isoWeekYear`).
    iso_week_year(date) => "$isoWeekYear";
    /// Millisecond portion of a date, 0–999 (`$millisecond`).
    millisecond(date) => "$millisecond";
    /// Minute portion of a date, 0–59 (`$minute`).
    minute(date) => "$minute";
    /// Month of the year, 1–12 (`$month`).
    month(date) => "$month";
    /// Second portion of a date, 0–60 (`$second`).
    second(date) => "$second";
    /// Week of the year, 0–53 (`$week`).
    week(date) => "$week";
    /// Year portion of a date (`$year`).
    year(date) => "$year";

    // Literal and field operators
    /// Value of a named field, from `$$CURRENT` or the optional input
    /// document (`$getField`).
    get_field(field; input) => "$getField";
    /// Binds variables for use in a sub-expression (`$let`).
    let_vars(vars, in_expr) => "$let";
    /// Returns the operand without parsing it as an expression
    /// (`$literal`).
    literal(value) => "$literal";
    /// Metadata associated with a document, e.g. `"textScore"` (`$meta`).
    meta(keyword) => "$meta";
    /// Random float in [0, 1) (`$rand`).
    rand() => "$rand";
    /// Matches a random selection of documents at the given rate
    /// (`$sampleRate`).
    sample_rate(rate) => "$sampleRate";
    /// Adds or overwrites a field in a document (`$setField`).
    set_field(field, input, value) => "$setField";
    /// Removes a field from a document (`$unsetField`).
    unset_field(field, input) => "$unsetField";

    // Object operators
    /// Combines documents into one (`$mergeObjects`).
    merge_objects[..] => "$mergeObjects";

    // Set operators
    /// Whether no element of the array is false (`$allElementsTrue`).
    all_elements_true(array) => "$allElementsTrue";
    /// Whether any element of the array is true (`$anyElementTrue`).
    any_element_true(array) => "$anyElementTrue";
    /// Elements of the first set absent from the second
    /// (`$setDifference`).
    set_difference(left, right) => "$setDifference";
    /// Whether the sets contain the same distinct elements (`$setEquals`).
    set_equals[..] => "$setEquals";
    /// Elements common to all sets (`$setIntersection`).
    set_intersection[..] => "$setIntersection";
    /// Whether the first set is a subset of the second (`$setIsSubset`).
    set_is_subset(left, right) => "$setIsSubset";
    /// Distinct elements across all sets (`$setUnion`).
    set_union[..] => "$setUnion";

    // String operators
    /// Concatenates strings (`$concat`).
    concat[..] => "$concat";
    /// Byte index of a substring, with an optional search range
    /// (`$indexOfBytes`).
    index_of_bytes(string, substring; start, end) => "$indexOfBytes";
    /// Code-point index of a substring, with an optional search range
    /// (`$indexOfCP`).
    index_of_cp(string, substring; start, end) => "$indexOfCP";
    /// Strips leading whitespace or the given characters (`$ltrim`).
    ltrim(input; chars) => "$ltrim";
    /// First regular-expression match in a string (`$regexFind`).
    regex_find(input, regex; options) => "$regexFind";
    /// All regular-expression matches in a string (`$regexFindAll`).
    regex_find_all(input, regex; options) => "$regexFindAll";
    /// Whether a regular expression matches a string (`$regexMatch`).
    regex_match(input, regex; options) => "$regexMatch";
    /// Replaces every occurrence of a search string (`$replaceAll`).
    replace_all(input, find, replacement) => "$replaceAll";
    /// Replaces the first occurrence of a search string (`$replaceOne`).
    replace_one(input, find, replacement) => "$replaceOne";
    /// Strips trailing whitespace or the given characters (`$rtrim`).
    rtrim(input; chars) => "$rtrim";
    /// Splits a string on a delimiter (`$split`).
    split(string, delimiter) => "$split";
    /// String length in bytes (`$strLenBytes`).
    str_len_bytes(string) => "$strLenBytes";
    /// String length in UTF-8 code points (`$strLenCP`).
    str_len_cp(string) => "$strLenCP";
    /// Case-insensitive three-way string comparison (`$strcasecmp`).
    strcasecmp(left, right) => "$strcasecmp";
    /// Substring by byte offset and length (`$substr`).
    substr(string, start, length) => "$substr";
    /// Substring by byte offset and count (`$substrBytes`).
    substr_bytes(string, start, count) => "$substrBytes";
    /// Substring by code-point offset and count (`$substrCP`).
    substr_cp(string, start, count) => "$substrCP";
    /// Lowercases a string (`$toLower`).
    to_lower(expression) => "$toLower";
    /// Uppercases a string (`$toUpper`).
    to_upper(expression) => "$toUpper";
    /// Strips surrounding whitespace or the given characters (`$trim`).
    trim(input; chars) => "$trim";

    // Trigonometry operators
    /// Inverse cosine, in radians (`$acos`).
    acos(value) => "$acos";
    /// Inverse hyperbolic cosine (`$acosh`).
    acosh(value) => "$acosh";
    /// Inverse sine, in radians (`$asin`).
    asin(value) => "$asin";
    /// Inverse hyperbolic sine (`$asinh`).
    asinh(value) => "$asinh";
    /// Inverse tangent, in radians (`$atan`).
    atan(value) => "$atan";
    /// Inverse tangent of y / x, quadrant-aware (`$atan2`).
    atan2(y_value, x_value) => "$atan2";
    /// Inverse hyperbolic tangent (`$atanh`).
    atanh(value) => "$atanh";
    /// Cosine of an angle in radians (`$cos`).
    cos(value) => "$cos";
    /// Hyperbolic cosine (`$cosh`).
    cosh(value) => "$cosh";
    /// Converts degrees to radians (`$degreesToRadians`).
    degrees_to_radians(value) => "$degreesToRadians";
    /// Converts radians to degrees (`$radiansToDegrees`).
    radians_to_degrees(value) => "$radiansToDegrees";
    /// Sine of an angle in radians (`$sin`).
    sin(value) => "$sin";
    /// Hyperbolic sine (`$sinh`).
    sinh(value) => "$sinh";
    /// Tangent of an angle in radians (`$tan`).
    tan(value) => "$tan";
    /// Hyperbolic tangent (`$tanh`).
    tanh(value) => "$tanh";

    // Type operators
    /// Converts a value to the given type, with optional error and null
    /// replacements (`$convert`).
    convert(input, to; on_error, on_null) => "$convert";
    /// Whether the operand is an integer, decimal, double, or long
    /// (`$isNumber`).
    is_number(expression) => "$isNumber";
    /// Converts a value to a boolean (`$toBool`).
    to_bool(expression) => "$toBool";
    /// Converts a value to a date (`$toDate`).
    to_date(expression) => "$toDate";
    /// Converts a value to a Decimal128 (`$toDecimal`).
    to_decimal(expression) => "$toDecimal";
    /// Converts a value to a double (`$toDouble`).
    to_double(expression) => "$toDouble";
    /// Converts a value to an integer (`$toInt`).
    to_int(expression) => "$toInt";
    /// Converts a value to a long (`$toLong`).
    to_long(expression) => "$toLong";
    /// Converts a value to an ObjectId (`$toObjectId`).
    to_object_id(expression) => "$toObjectId";
    /// Converts a value to a string (`$toString`).
    to_string(expression) => "$toString";
    /// Name of the operand's BSON type (`$type`).
    type_of(expression) => "$type";
}
