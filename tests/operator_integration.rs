//! Integration tests for the operator forwarding layer.
//!
//! These tests drive the public API end to end:
//! - Pass-through fidelity for each operand shape
//! - Chaining order and identity
//! - Generic and dynamic dispatch, including the fallback path
//! - Registry/table consistency
//! - Operand conversions for chrono/uuid values
//! - Recorder serialization

use agg_chain::{operands, Arity, Bson, ExpressionBuilder, Operator, RecordedCall, Recorder};
use bson::bson;
use pretty_assertions::assert_eq;

#[test]
fn test_fixed_arity_pass_through() {
    let mut expr = Recorder::new();
    Operator::new(&mut expr).subtract("$total", "$discount");

    assert_eq!(
        expr.take_calls(),
        vec![RecordedCall {
            operator: "$subtract".into(),
            operands: vec![Bson::String("$total".into()), Bson::String("$discount".into())],
        }]
    );
}

#[test]
fn test_variadic_pass_through_preserves_heterogeneous_operands() {
    let mut expr = Recorder::new();
    Operator::new(&mut expr).add(operands!["$price", 5, 0.25]);

    assert_eq!(
        expr.take_calls(),
        vec![RecordedCall {
            operator: "$add".into(),
            operands: vec![
                Bson::String("$price".into()),
                Bson::Int32(5),
                Bson::Double(0.25),
            ],
        }]
    );
}

#[test]
fn test_niladic_pass_through() {
    let mut expr = Recorder::new();
    Operator::new(&mut expr).rand();

    assert_eq!(
        expr.take_calls(),
        vec![RecordedCall {
            operator: "$rand".into(),
            operands: vec![],
        }]
    );
}

#[test]
fn test_optional_trailing_operands_are_dropped_when_omitted() {
    let mut expr = Recorder::new();
    Operator::new(&mut expr)
        .trunc("$measurement", None)
        .trunc("$measurement", Some(1.into()));

    let calls = expr.take_calls();
    assert_eq!(calls[0].operands, vec![Bson::String("$measurement".into())]);
    assert_eq!(
        calls[1].operands,
        vec![Bson::String("$measurement".into()), Bson::Int32(1)]
    );
}

#[test]
fn test_optional_gap_before_present_operand_forwards_null() {
    let mut expr = Recorder::new();
    Operator::new(&mut expr).date_from_string(
        "2026-08-08",
        None,
        Some("UTC".into()),
        None,
        None,
    );

    assert_eq!(
        expr.take_calls(),
        vec![RecordedCall {
            operator: "$dateFromString".into(),
            operands: vec![
                Bson::String("2026-08-08".into()),
                Bson::Null,
                Bson::String("UTC".into()),
            ],
        }]
    );
}

#[test]
fn test_chained_calls_arrive_in_call_order() {
    let mut expr = Recorder::new();
    Operator::new(&mut expr)
        .add(operands![1, 2])
        .multiply(operands![3, 4]);

    assert_eq!(
        expr.take_calls(),
        vec![
            RecordedCall {
                operator: "$add".into(),
                operands: vec![Bson::Int32(1), Bson::Int32(2)],
            },
            RecordedCall {
                operator: "$multiply".into(),
                operands: vec![Bson::Int32(3), Bson::Int32(4)],
            },
        ]
    );
}

#[test]
fn test_long_chain_produces_one_invocation_per_call() {
    let mut expr = Recorder::new();
    Operator::new(&mut expr)
        .to_upper("$name")
        .concat(operands!["$first", " ", "$last"])
        .year("$createdAt")
        .eq("$status", "active")
        .if_null(operands!["$nickname", "$name"])
        .switch(vec![bson!({ "case": "$isVip", "then": 1 })], None);

    let operators: Vec<&str> = expr
        .calls()
        .iter()
        .map(|call| call.operator.as_str())
        .collect();
    assert_eq!(
        operators,
        vec!["$toUpper", "$concat", "$year", "$eq", "$ifNull", "$switch"]
    );
}

#[test]
fn test_chaining_yields_the_same_wrapper_instance() {
    let mut expr = Recorder::new();
    let mut op = Operator::new(&mut expr);

    let chained: *const _ = op
        .add(operands![1, 2])
        .multiply(operands![3, 4])
        .floor("$value");
    assert!(std::ptr::eq(chained, &raw const op));
}

#[test]
fn test_generic_operator_forwards_name_and_operands_verbatim() {
    let mut expr = Recorder::new();
    Operator::new(&mut expr).operator("$function", operands![
        bson!({ "body": "function(x) { return x * 2; }", "args": ["$qty"], "lang": "js" })
    ]);

    let call = expr.last().unwrap();
    assert_eq!(call.operator, "$function");
    assert!(matches!(call.operands[0], Bson::Document(_)));
}

#[test]
fn test_dynamic_call_maps_table_methods() {
    let mut expr = Recorder::new();
    Operator::new(&mut expr)
        .call("in_array", operands!["$status", vec!["open", "closed"]])
        .call("modulo", operands!["$qty", 2]);

    let operators: Vec<&str> = expr
        .calls()
        .iter()
        .map(|call| call.operator.as_str())
        .collect();
    assert_eq!(operators, vec!["$in", "$mod"]);
}

#[test]
fn test_dynamic_call_falls_back_verbatim_for_unknown_names() {
    let mut expr = Recorder::new();
    Operator::new(&mut expr).call("$percentile", operands![0.95]);

    assert_eq!(
        expr.take_calls(),
        vec![RecordedCall {
            operator: "$percentile".into(),
            operands: vec![Bson::Double(0.95)],
        }]
    );
}

#[test]
fn test_try_call_rejects_unknown_names_and_forwards_nothing() {
    let mut expr = Recorder::new();
    let mut op = Operator::new(&mut expr);

    let err = op.try_call("not_an_operator", operands![1]).unwrap_err();
    assert_eq!(err.method(), "not_an_operator");
    assert!(expr.is_empty());
}

#[test]
fn test_try_call_chains_like_the_named_methods() {
    let mut expr = Recorder::new();
    let mut op = Operator::new(&mut expr);
    op.try_call("abs", operands!["$delta"])
        .unwrap()
        .sqrt("$delta");

    let operators: Vec<&str> = expr
        .calls()
        .iter()
        .map(|call| call.operator.as_str())
        .collect();
    assert_eq!(operators, vec!["$abs", "$sqrt"]);
}

#[test]
fn test_registry_agrees_with_dispatch() {
    for spec in agg_chain::OPERATORS {
        let mut expr = Recorder::new();
        Operator::new(&mut expr).call(spec.method, operands![]);
        assert_eq!(
            expr.last().unwrap().operator,
            spec.name,
            "method {} forwarded the wrong operator",
            spec.method
        );
    }
}

#[test]
fn test_registry_lookup_round_trips() {
    let spec = agg_chain::registry::lookup("merge_objects").unwrap();
    assert_eq!(spec.name, "$mergeObjects");
    assert_eq!(spec.arity, Arity::Variadic);

    let back = agg_chain::registry::by_operator(spec.name).unwrap();
    assert_eq!(back.method, "merge_objects");
}

#[test]
fn test_chrono_operands_convert_through_bson() {
    use chrono::{TimeZone, Utc};

    let moment = Utc.with_ymd_and_hms(2026, 8, 8, 12, 0, 0).unwrap();
    let mut expr = Recorder::new();
    Operator::new(&mut expr).date_to_string(moment, None, None, None);

    assert!(matches!(
        expr.last().unwrap().operands[0],
        Bson::DateTime(_)
    ));
}

#[test]
fn test_uuid_operands_convert_through_bson() {
    let id = uuid::Uuid::new_v4();
    let mut expr = Recorder::new();
    Operator::new(&mut expr).eq("$sessionId", bson::Uuid::from(id));

    assert!(matches!(
        expr.last().unwrap().operands[1],
        Bson::Binary(_)
    ));
}

#[test]
fn test_recorded_calls_serialize_for_snapshots() {
    let mut expr = Recorder::new();
    Operator::new(&mut expr).pow("$base", 2);

    let json = serde_json::to_value(expr.calls()).unwrap();
    assert_eq!(
        json,
        serde_json::json!([
            { "operator": "$pow", "operands": ["$base", 2] }
        ])
    );
}

#[test]
fn test_custom_builder_behind_the_trait_object_seam() {
    #[derive(Default)]
    struct Names(Vec<String>);

    impl ExpressionBuilder for Names {
        fn apply(&mut self, operator: &str, _operands: Vec<Bson>) {
            self.0.push(operator.to_owned());
        }
    }

    let mut names = Names::default();
    Operator::new(&mut names).ln("$x").exp("$x");

    assert_eq!(names.0, vec!["$ln", "$exp"]);
}
