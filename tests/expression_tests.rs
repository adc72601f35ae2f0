// Integration tests for the expression ladder

use javelin::{ListKind, Node, Operator, Parser, Rule};
use proptest::prelude::*;

fn parse_expression(source: &str) -> Node {
    let mut parser = Parser::from_source("test", source).expect("Scanner start failed");
    let node = parser.parse_expression().expect("Parsing failed");
    parser.expect_end().expect("Trailing input");
    node.collapsed()
}

const LEFT_ASSOCIATIVE: &[(&str, Operator)] = &[
    ("||", Operator::LogicalOr),
    ("^^", Operator::LogicalXor),
    ("&&", Operator::LogicalAnd),
    ("<", Operator::Less),
    (">=", Operator::GreaterEqual),
    ("==", Operator::Equal),
    ("!=", Operator::NotEqual),
    ("|", Operator::BitOr),
    ("^", Operator::BitXor),
    ("&", Operator::BitAnd),
    ("<<", Operator::Shl),
    (">>", Operator::Shr),
    (">>>", Operator::UShr),
    ("+", Operator::Add),
    ("-", Operator::Sub),
    ("*", Operator::Mul),
    ("/", Operator::Div),
    ("%", Operator::Rem),
];

fn operands(count: usize) -> Vec<String> {
    (0..count).map(|i| format!("x{i}")).collect()
}

proptest! {
    #[test]
    fn binary_levels_associate_left(
        (symbol, op) in prop::sample::select(LEFT_ASSOCIATIVE),
        count in 2usize..10,
    ) {
        let source = operands(count).join(&format!(" {symbol} "));
        let tree = parse_expression(&source);

        // ((x0 op x1) op x2) ...: walk down the left spine
        let mut node = &tree;
        for i in (1..count).rev() {
            prop_assert_eq!(node.operator(), Some(op));
            prop_assert_eq!(node.child(1).and_then(Node::dotted_name), Some(format!("x{i}")));
            node = node.child(0).unwrap();
        }
        prop_assert_eq!(node.dotted_name(), Some("x0".to_string()));
    }

    #[test]
    fn assignment_associates_right(count in 2usize..8) {
        let source = operands(count).join(" = ");
        let tree = parse_expression(&source);

        // x0 = (x1 = (x2 = ...)): walk down the right spine
        let mut node = &tree;
        for i in 0..count - 1 {
            prop_assert_eq!(node.operator(), Some(Operator::Assign));
            let target = node.child(0).unwrap();
            prop_assert_eq!(target.rule(), Rule::LeftHandSide);
            prop_assert_eq!(target.child(0).and_then(Node::dotted_name), Some(format!("x{i}")));
            node = node.child(1).unwrap();
        }
        prop_assert_eq!(node.dotted_name(), Some(format!("x{}", count - 1)));
    }
}

#[test]
fn test_conditional_associates_right() {
    let tree = parse_expression("a ? x : b ? y : z");

    assert_eq!(tree.rule(), Rule::ConditionalExpression);
    assert_eq!(tree.child(0).and_then(Node::dotted_name).as_deref(), Some("a"));
    assert_eq!(tree.child(1).and_then(Node::dotted_name).as_deref(), Some("x"));

    let nested = tree.child(2).unwrap();
    assert_eq!(nested.operator(), Some(Operator::Conditional));
    let names: Vec<_> = nested.children().into_iter().filter_map(Node::dotted_name).collect();
    assert_eq!(names, vec!["b", "y", "z"]);
}

#[test]
fn test_ladder_order() {
    // && binds tighter than ^^, which binds tighter than ||
    let tree = parse_expression("a && b || c ^^ d");
    assert_eq!(tree.operator(), Some(Operator::LogicalOr));
    assert_eq!(tree.child(0).and_then(Node::operator), Some(Operator::LogicalAnd));
    assert_eq!(tree.child(1).and_then(Node::operator), Some(Operator::LogicalXor));

    // shift binds tighter than relational
    let tree = parse_expression("a << 1 < b >> 2");
    assert_eq!(tree.operator(), Some(Operator::Less));
    assert_eq!(tree.child(0).and_then(Node::operator), Some(Operator::Shl));
    assert_eq!(tree.child(1).and_then(Node::operator), Some(Operator::Shr));

    // unary binds tighter than multiplicative
    let tree = parse_expression("-a * ~b");
    assert_eq!(tree.operator(), Some(Operator::Mul));
    assert_eq!(tree.child(0).and_then(Node::operator), Some(Operator::Negate));
    assert_eq!(tree.child(1).and_then(Node::operator), Some(Operator::BitNot));
}

#[test]
fn test_generic_call_and_shift_in_one_expression() {
    let tree = parse_expression("Collections.<List<Integer>>emptyList().size() >> 1");
    assert_eq!(tree.operator(), Some(Operator::Shr));

    let size = tree.child(0).unwrap();
    assert_eq!(size.operator(), Some(Operator::PrimaryInvocation));
    let empty_list = size.child(0).unwrap();
    assert_eq!(empty_list.operator(), Some(Operator::QualifiedInvocation));
    assert!(empty_list.find_list(ListKind::TypeArguments).is_some());
}

#[test]
fn test_lambda_in_arguments() {
    let tree = parse_expression("list.stream().map(x -> x * 2).reduce(0, (a, b) -> a + b)");
    assert_eq!(tree.operator(), Some(Operator::PrimaryInvocation));

    let arguments = tree.find_list(ListKind::Arguments).unwrap();
    assert_eq!(arguments.len(), 2);
    assert_eq!(arguments.child(1).map(Node::rule), Some(Rule::LambdaExpression));
}

#[test]
fn test_cast_of_lambda_and_method_reference() {
    let tree = parse_expression("(Runnable) () -> {}");
    assert_eq!(tree.operator(), Some(Operator::Cast));
    assert_eq!(tree.child(1).map(Node::rule), Some(Rule::LambdaExpression));

    let tree = parse_expression("(Function<String, Integer>) Integer::parseInt");
    assert_eq!(tree.operator(), Some(Operator::Cast));
    assert_eq!(tree.child(1).and_then(Node::operator), Some(Operator::NameReference));
}
