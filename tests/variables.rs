mod common;

use common::create_test_index;
use phpantom_solver::config::ClassifierConfig;
use phpantom_solver::syntax::{AssignOp, Node};
use phpantom_solver::variables::classify_variables_with;
use phpantom_solver::{SymbolTable, VariableAccesses, classify_variables};

fn classify(node: &Node) -> VariableAccesses {
    let index = create_test_index();
    classify_variables(&index, node).expect("tree should classify")
}

fn assert_accesses(node: &Node, reads: &[&str], writes: &[&str]) {
    let accesses = classify(node);
    assert_eq!(accesses.reads, reads, "reads of {node:?}");
    assert_eq!(accesses.writes, writes, "writes of {node:?}");
}

// ─── Plain assignments ──────────────────────────────────────────────────────

#[test]
fn test_simple_assignment() {
    // $a = $b;
    let tree = Node::stmt(Node::assign(Node::var("a"), Node::var("b")));
    assert_accesses(&tree, &["b"], &["a"]);
}

#[test]
fn test_bare_variable_is_read() {
    // echo $a, $b;
    let tree = Node::echo(vec![Node::var("b"), Node::var("a")]);
    assert_accesses(&tree, &["a", "b"], &[]);
}

#[test]
fn test_chained_assignment() {
    // $a = $b = $c;
    let tree = Node::assign(Node::var("a"), Node::assign(Node::var("b"), Node::var("c")));
    assert_accesses(&tree, &["c"], &["a", "b"]);
}

#[test]
fn test_compound_assignment_writes_target() {
    // $total += $price;
    let tree = Node::assign_op(AssignOp::Compound, Node::var("total"), Node::var("price"));
    assert_accesses(&tree, &["price"], &["total"]);
}

#[test]
fn test_reference_assignment_writes_target() {
    // $alias =& $original;
    let tree = Node::assign_op(AssignOp::Reference, Node::var("alias"), Node::var("original"));
    assert_accesses(&tree, &["original"], &["alias"]);
}

#[test]
fn test_same_variable_read_and_written() {
    // $i = $i + 1;
    let tree = Node::assign(
        Node::var("i"),
        Node::binary("+", Node::var("i"), Node::scalar("1")),
    );
    assert_accesses(&tree, &["i"], &["i"]);
}

// ─── Array and property targets ─────────────────────────────────────────────

#[test]
fn test_array_index_is_read_inside_target() {
    // $a[$b] = $c;
    let tree = Node::assign(Node::dim(Node::var("a"), Node::var("b")), Node::var("c"));
    assert_accesses(&tree, &["b", "c"], &["a"]);
}

#[test]
fn test_nested_array_target() {
    // $grid[$x][$y] = $value;
    let tree = Node::assign(
        Node::dim(Node::dim(Node::var("grid"), Node::var("x")), Node::var("y")),
        Node::var("value"),
    );
    assert_accesses(&tree, &["value", "x", "y"], &["grid"]);
}

#[test]
fn test_array_append_writes_base() {
    // $items[] = 1;
    let tree = Node::assign(Node::append(Node::var("items")), Node::scalar("1"));
    assert_accesses(&tree, &[], &["items"]);
}

#[test]
fn test_property_target_writes_object() {
    // $obj->prop = $x;
    let tree = Node::assign(Node::prop(Node::var("obj"), "prop"), Node::var("x"));
    assert_accesses(&tree, &["x"], &["obj"]);
}

#[test]
fn test_dynamic_property_name_is_read() {
    // $obj->$name = $x;
    let tree = Node::assign(
        Node::dynamic_prop(Node::var("obj"), Node::var("name")),
        Node::var("x"),
    );
    assert_accesses(&tree, &["name", "x"], &["obj"]);
}

#[test]
fn test_static_property_target() {
    // Config::$value = $x;
    let tree = Node::assign(Node::static_prop("Config", "value"), Node::var("x"));
    assert_accesses(&tree, &["x"], &[]);
}

// ─── Variable variables ─────────────────────────────────────────────────────

#[test]
fn test_variable_variable_target_reads_its_name() {
    // $$a = $b;
    let tree = Node::assign(Node::var_var(Node::var("a")), Node::var("b"));
    assert_accesses(&tree, &["a", "b"], &[]);
}

#[test]
fn test_variable_variable_read() {
    // echo $$name;
    let tree = Node::echo(vec![Node::var_var(Node::var("name"))]);
    assert_accesses(&tree, &["name"], &[]);
}

// ─── Destructuring ──────────────────────────────────────────────────────────

#[test]
fn test_list_destructuring_writes_every_slot() {
    // list($a, , $b) = $pair;
    let tree = Node::assign(
        Node::list(vec![
            Node::item(Node::var("a")),
            Node::empty_item(),
            Node::item(Node::var("b")),
        ]),
        Node::var("pair"),
    );
    assert_accesses(&tree, &["pair"], &["a", "b"]);
}

#[test]
fn test_keyed_destructuring_reads_keys() {
    // ['id' => $id, $key => $value] = $row;
    let tree = Node::assign(
        Node::list(vec![
            Node::keyed_item(Node::scalar("'id'"), Node::var("id")),
            Node::keyed_item(Node::var("key"), Node::var("value")),
        ]),
        Node::var("row"),
    );
    assert_accesses(&tree, &["key", "row"], &["id", "value"]);
}

#[test]
fn test_nested_destructuring() {
    // [[$a, $b], $c] = $nested;
    let tree = Node::assign(
        Node::list(vec![
            Node::item(Node::list(vec![
                Node::item(Node::var("a")),
                Node::item(Node::var("b")),
            ])),
            Node::item(Node::var("c")),
        ]),
        Node::var("nested"),
    );
    assert_accesses(&tree, &["nested"], &["a", "b", "c"]);
}

#[test]
fn test_array_literal_on_right_is_read() {
    // $pair = [$a, $b];
    let tree = Node::assign(
        Node::var("pair"),
        Node::array(vec![Node::item(Node::var("a")), Node::item(Node::var("b"))]),
    );
    assert_accesses(&tree, &["a", "b"], &["pair"]);
}

// ─── Calls ──────────────────────────────────────────────────────────────────

#[test]
fn test_call_arguments_are_read() {
    // $len = strlen($text);
    let tree = Node::assign(Node::var("len"), Node::call("strlen", vec![Node::var("text")]));
    assert_accesses(&tree, &["text"], &["len"]);
}

#[test]
fn test_method_call_reads_receiver_and_arguments() {
    // $user->save($options);
    let tree = Node::stmt(Node::method_call(
        Node::var("user"),
        "save",
        vec![Node::var("options")],
    ));
    assert_accesses(&tree, &["options", "user"], &[]);
}

#[test]
fn test_static_call_arguments_are_read() {
    // User::find($id);
    let tree = Node::stmt(Node::static_call("User", "find", vec![Node::var("id")]));
    assert_accesses(&tree, &["id"], &[]);
}

// ─── Declarations ───────────────────────────────────────────────────────────

#[test]
fn test_parameters_are_not_occurrences() {
    let tree = Node::stmts(vec![
        Node::param("request", Some(Node::var("fallback"))),
        Node::ret(Some(Node::var("request"))),
    ]);
    assert_accesses(&tree, &["request"], &[]);
}

#[test]
fn test_property_declarations_are_not_occurrences() {
    let tree = Node::property_decl("count", Some(Node::scalar("0")));
    assert_accesses(&tree, &[], &[]);
}

// ─── Statement lists ────────────────────────────────────────────────────────

#[test]
fn test_results_are_sorted_and_deduplicated() {
    let tree = Node::stmts(vec![
        Node::stmt(Node::assign(Node::var("z"), Node::var("b"))),
        Node::stmt(Node::assign(Node::var("a"), Node::var("b"))),
        Node::stmt(Node::assign(Node::var("z"), Node::var("a"))),
        Node::ret(None),
    ]);
    assert_accesses(&tree, &["a", "b"], &["a", "z"]);
}

// ─── Index state ────────────────────────────────────────────────────────────

#[test]
fn test_incomplete_index_classifies_nothing() {
    phpantom_solver::logging::init_for_tests();
    let index = SymbolTable::new();
    let tree = Node::assign(Node::var("a"), Node::var("b"));

    let accesses = classify_variables(&index, &tree).expect("tree should classify");
    assert_eq!(accesses, VariableAccesses::default());
}

#[test]
fn test_incomplete_index_allowed_by_config() {
    phpantom_solver::logging::init_for_tests();
    let index = SymbolTable::new();
    let tree = Node::assign(Node::var("a"), Node::var("b"));
    let config = ClassifierConfig {
        require_complete_index: false,
    };

    let accesses = classify_variables_with(&index, &tree, &config).expect("tree should classify");
    assert_eq!(accesses.reads, vec!["b"]);
    assert_eq!(accesses.writes, vec!["a"]);
}
