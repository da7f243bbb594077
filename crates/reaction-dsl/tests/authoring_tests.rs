//! End-to-end authoring sessions for the chain builder.
//!
//! These tests drive whole sessions through the public surface: chain
//! construction, union combination, rule finalization, and the collector
//! handoff.

use reaction_dsl::{DslError, ExpressionSet, RuleCollector, RuleKind, Term, Value};

#[test]
fn render_follows_the_element_grammar() {
    let rules = RuleCollector::new();
    let param = rules.symbol("B").to_expression();
    let chain = rules
        .symbol("A")
        .to_expression()
        .call(vec![Value::from(1)], vec![])
        .with_key("loc")
        .with_parameter(param);
    assert_eq!(chain.to_string(), "A(1)[loc]|B");
}

#[test]
fn render_keeps_keyword_arguments_in_attachment_order() {
    let rules = RuleCollector::new();
    let chain = rules.symbol("A").to_expression().call(
        vec![Value::from(1)],
        vec![
            ("kf".to_string(), Value::from(0.5)),
            ("kr".to_string(), Value::from(2)),
        ],
    );
    assert_eq!(chain.to_string(), "A(1,kf=0.5,kr=2)");
}

#[test]
fn repeated_calls_overwrite_arguments_wholesale() {
    let rules = RuleCollector::new();
    let chain = rules
        .symbol("A")
        .to_expression()
        .call(vec![Value::from(1), Value::from(2)], vec![])
        .call(vec![Value::from(3)], vec![]);
    assert_eq!(chain.to_string(), "A(3)");
}

#[test]
fn union_is_associative_in_flattening() {
    let rules = RuleCollector::new();
    let chain = |name: &str| rules.symbol(name).to_expression();

    let left = chain("a").union(chain("b")).union(chain("c"));
    let right = chain("a").union(chain("b").union(chain("c")));

    assert_eq!(left, right);
    assert_eq!(left.members().len(), 3);
    assert_eq!(left.to_string(), "a+b+c");
}

#[test]
fn set_construction_requires_two_members() {
    let rules = RuleCollector::new();
    assert_eq!(
        ExpressionSet::new(vec![]).unwrap_err(),
        DslError::TooFewMembers(0)
    );
    assert_eq!(
        ExpressionSet::new(vec![Term::Expression(rules.symbol("A").to_expression())]).unwrap_err(),
        DslError::TooFewMembers(1)
    );
    let pair = vec![
        Term::Expression(rules.symbol("A").to_expression()),
        Term::Expression(rules.symbol("B").to_expression()),
    ];
    assert!(ExpressionSet::new(pair).is_ok());
}

#[test]
fn chaining_operations_fail_on_sets() {
    let rules = RuleCollector::new();
    let set = || {
        rules
            .symbol("A")
            .to_expression()
            .union(rules.symbol("B").to_expression())
    };

    assert!(matches!(
        set().call(vec![Value::from(1)], vec![]).unwrap_err(),
        DslError::UnsupportedSetOperation { operation: "call" }
    ));
    assert!(matches!(
        set().with_key(Value::from("loc")).unwrap_err(),
        DslError::UnsupportedSetOperation {
            operation: "with_key"
        }
    ));
    assert!(matches!(
        set().attribute("site").unwrap_err(),
        DslError::UnsupportedSetOperation {
            operation: "attribute"
        }
    ));
}

#[test]
fn reserved_attribute_names_are_rejected() {
    let rules = RuleCollector::new();
    assert_eq!(
        rules.symbol("A").attribute("_internal").unwrap_err(),
        DslError::ReservedAttribute("_internal".to_string())
    );
    assert_eq!(
        rules
            .symbol("A")
            .attribute("site")
            .unwrap()
            .attribute("_hidden")
            .unwrap_err(),
        DslError::ReservedAttribute("_hidden".to_string())
    );
}

#[test]
fn each_comparison_records_exactly_one_rule() {
    let rules = RuleCollector::new();

    rules.symbol("A").to_expression().greater_than("x");
    assert_eq!(rules.len(), 1);
    rules.symbol("B").to_expression().equals("y");
    assert_eq!(rules.len(), 2);
    rules.symbol("C").to_expression().not_equals("z");
    assert_eq!(rules.len(), 3);

    let kinds: Vec<RuleKind> = rules.rules().iter().map(|rule| rule.kind).collect();
    assert_eq!(
        kinds,
        [RuleKind::GreaterThan, RuleKind::Equal, RuleKind::NotEqual]
    );
}

#[test]
fn end_to_end_authoring_session() {
    let rules = RuleCollector::new();

    let chain = rules
        .symbol("A")
        .attribute("loc")
        .unwrap()
        .call(vec![Value::from(1)], vec![]);
    assert!(rules.is_empty());

    let rule = chain.greater_than("B");
    assert_eq!(rules.len(), 1);

    let recorded = rules.rules().remove(0);
    assert_eq!(recorded, rule);
    assert_eq!(recorded.kind, RuleKind::GreaterThan);
    assert_eq!(recorded.rhs, Value::from("B"));
    // The left-hand side is the chain exactly as built, not a re-parse of
    // its rendering.
    match &recorded.lhs {
        Term::Expression(expr) => {
            let names: Vec<&str> = expr
                .elements()
                .iter()
                .map(|elem| elem.name.as_str())
                .collect();
            assert_eq!(names, ["A", "loc"]);
            assert_eq!(expr.elements()[1].args, Some(vec![Value::from(1)]));
            assert_eq!(expr.to_string(), "A.loc(1)");
        }
        Term::Set(_) => panic!("expected a single chain on the left-hand side"),
    }
}

#[test]
fn set_comparison_records_the_set_as_built() {
    let rules = RuleCollector::new();
    let rule = rules
        .symbol("A")
        .to_expression()
        .union(rules.symbol("B").to_expression())
        .equals(rules.symbol("C").to_expression());

    assert_eq!(rules.len(), 1);
    assert_eq!(rule.to_string(), "A+B == C");
    match &rule.lhs {
        Term::Set(set) => assert_eq!(set.members().len(), 2),
        Term::Expression(_) => panic!("expected a set on the left-hand side"),
    }
}

#[test]
fn union_value_rejects_scalar_right_hand_sides() {
    let rules = RuleCollector::new();
    let err = rules
        .symbol("A")
        .to_expression()
        .union_value(Value::from(3))
        .unwrap_err();
    assert_eq!(err, DslError::IncompatibleUnion("integer"));

    let joined = rules
        .symbol("A")
        .to_expression()
        .union_value(Value::from(rules.symbol("B").to_expression()))
        .unwrap();
    assert_eq!(joined.to_string(), "A+B");
}

#[test]
fn sessions_are_isolated() {
    let first = RuleCollector::new();
    let second = RuleCollector::new();

    first.symbol("A").to_expression().equals("x");
    first.symbol("B").to_expression().equals("y");
    second.symbol("C").to_expression().equals("z");

    assert_eq!(first.len(), 2);
    assert_eq!(second.len(), 1);
}

#[test]
fn take_hands_rules_to_the_compiler_once() {
    let rules = RuleCollector::new();
    rules.symbol("A").to_expression().greater_than("x");

    let drained = rules.take();
    assert_eq!(drained.len(), 1);
    assert!(rules.is_empty());
    assert!(rules.take().is_empty());
}

#[cfg(feature = "serde")]
#[test]
fn rules_serialize_for_the_compiler() {
    let rules = RuleCollector::new();
    let rule = rules
        .symbol("A")
        .attribute("loc")
        .unwrap()
        .greater_than("B");

    let json = serde_json::to_value(&rule).unwrap();
    assert_eq!(json["kind"], "greater_than");
    assert_eq!(json["lhs"]["expression"]["elements"][0]["name"], "A");
    assert_eq!(json["lhs"]["expression"]["elements"][1]["name"], "loc");
    assert_eq!(json["rhs"]["text"], "B");
}
