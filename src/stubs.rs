// Stub significance policy: which literal values are worth retaining in a
// persisted stub. Restricts stub creation to literals plausibly belonging to
// a framework descriptor so ordinary array/`required` literals elsewhere do
// not bloat the index.

use tree_sitter::Node;

use crate::patterns::node_text;
use crate::types::FileContext;

const LITERAL_KINDS: [&str; 5] = ["string", "number", "true", "false", "null"];

pub fn is_literal(node: &Node) -> bool {
    LITERAL_KINDS.contains(&node.kind())
}

/// Decide whether `literal` must be retained in a persisted stub.
///
/// The literal qualifies only as a direct array element or as the value of a
/// `required` property. Inside a single-file component that is enough; in any
/// other file the literal must additionally sit inside a call or construction
/// whose callee chain references `Vue`.
pub fn is_significant_literal(literal: Node<'_>, source: &[u8], file: &FileContext) -> bool {
    if !is_literal(&literal) {
        return false;
    }
    let Some(parent) = literal.parent() else {
        return false;
    };
    let retained = match parent.kind() {
        "array" => true,
        "pair" => parent.child_by_field_name("key").is_some_and(|key| {
            key.kind() == "property_identifier" && node_text(key, source) == "required"
        }),
        _ => false,
    };
    if !retained {
        return false;
    }
    if file.is_single_file_component() {
        return true;
    }
    inside_framework_descriptor(literal, source)
}

// Walk upward to the nearest enclosing call or construction expression; an
// expression statement on the way up ends the search. The literal counts as
// descriptor content when that call's callee chain mentions `Vue`.
fn inside_framework_descriptor(literal: Node<'_>, source: &[u8]) -> bool {
    let mut node = literal;
    while let Some(parent) = node.parent() {
        match parent.kind() {
            "call_expression" => {
                return parent
                    .child_by_field_name("function")
                    .is_some_and(|callee| chain_contains(callee, source, "Vue"));
            }
            "new_expression" => {
                return parent
                    .child_by_field_name("constructor")
                    .is_some_and(|constructor| chain_contains(constructor, source, "Vue"));
            }
            "expression_statement" => return false,
            _ => node = parent,
        }
    }
    false
}

// Loose membership test over a reference chain: any identifier segment with
// the given text qualifies, so `Vue`, `Vue.component`, and `window.Vue.use`
// all contain "Vue".
fn chain_contains(reference: Node<'_>, source: &[u8], name: &str) -> bool {
    match reference.kind() {
        "identifier" => node_text(reference, source) == name,
        "member_expression" => {
            let object_contains = reference
                .child_by_field_name("object")
                .is_some_and(|object| chain_contains(object, source, name));
            object_contains
                || reference.child_by_field_name("property").is_some_and(|property| {
                    property.kind() == "property_identifier" && node_text(property, source) == name
                })
        }
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{FileContext, FileKind};
    use tree_sitter::Tree;

    fn parse(source: &str) -> Tree {
        let mut parser = tree_sitter::Parser::new();
        parser
            .set_language(&tree_sitter_javascript::LANGUAGE.into())
            .unwrap();
        parser.parse(source, None).unwrap()
    }

    fn collect_literals<'tree>(node: Node<'tree>, out: &mut Vec<Node<'tree>>) {
        if is_literal(&node) {
            out.push(node);
        }
        let mut cursor = node.walk();
        for child in node.named_children(&mut cursor) {
            collect_literals(child, out);
        }
    }

    fn first_literal_matching<'tree>(tree: &'tree Tree, source: &str, text: &str) -> Node<'tree> {
        let mut literals = Vec::new();
        collect_literals(tree.root_node(), &mut literals);
        literals
            .into_iter()
            .find(|node| node_text(*node, source.as_bytes()) == text)
            .unwrap()
    }

    fn script_file() -> FileContext {
        FileContext::new(FileKind::Script, "app.js")
    }

    fn sfc_file() -> FileContext {
        FileContext::new(FileKind::SingleFileComponent, "App.vue")
    }

    #[test]
    fn array_element_inside_vue_construction_is_significant() {
        let source = r#"new Vue({props: ["foo", "bar"]});"#;
        let tree = parse(source);
        let literal = first_literal_matching(&tree, source, "\"foo\"");

        assert!(is_significant_literal(literal, source.as_bytes(), &script_file()));
    }

    #[test]
    fn array_element_in_plain_assignment_is_not_significant() {
        let source = r#"var x = {props: ["foo"]};"#;
        let tree = parse(source);
        let literal = first_literal_matching(&tree, source, "\"foo\"");

        assert!(!is_significant_literal(literal, source.as_bytes(), &script_file()));
    }

    #[test]
    fn sfc_array_element_is_always_significant() {
        let source = r#"var x = {props: ["foo"]};"#;
        let tree = parse(source);
        let literal = first_literal_matching(&tree, source, "\"foo\"");

        assert!(is_significant_literal(literal, source.as_bytes(), &sfc_file()));
    }

    #[test]
    fn required_property_value_is_significant() {
        let source = r#"Vue.component("x", {props: {value: {required: true}}});"#;
        let tree = parse(source);
        let literal = first_literal_matching(&tree, source, "true");

        assert!(is_significant_literal(literal, source.as_bytes(), &script_file()));
    }

    #[test]
    fn other_property_values_are_not_significant() {
        let source = r#"Vue.component("x", {props: {value: {optional: true}}});"#;
        let tree = parse(source);
        let literal = first_literal_matching(&tree, source, "true");

        assert!(!is_significant_literal(literal, source.as_bytes(), &script_file()));
    }

    #[test]
    fn unrelated_call_does_not_qualify() {
        let source = r#"register({props: ["foo"]});"#;
        let tree = parse(source);
        let literal = first_literal_matching(&tree, source, "\"foo\"");

        assert!(!is_significant_literal(literal, source.as_bytes(), &script_file()));
    }

    #[test]
    fn expression_statement_stops_the_upward_walk() {
        // The literal's nearest statement is inside the method body, so the
        // enclosing Vue call is never reached.
        let source = r#"Vue.component("x", {data() { this.list = ["foo"]; }});"#;
        let tree = parse(source);
        let literal = first_literal_matching(&tree, source, "\"foo\"");

        assert!(!is_significant_literal(literal, source.as_bytes(), &script_file()));
    }

    #[test]
    fn nearest_enclosing_call_wins() {
        let source = r#"Vue.component("x", {data: () => record(["foo"])});"#;
        let tree = parse(source);
        let literal = first_literal_matching(&tree, source, "\"foo\"");

        assert!(!is_significant_literal(literal, source.as_bytes(), &script_file()));
    }

    #[test]
    fn bare_array_statement_is_not_significant() {
        let source = r#"["foo"];"#;
        let tree = parse(source);
        let literal = first_literal_matching(&tree, source, "\"foo\"");

        assert!(!is_significant_literal(literal, source.as_bytes(), &script_file()));
    }

    #[test]
    fn non_literal_nodes_are_rejected() {
        let source = "new Vue({props: [value]});";
        let tree = parse(source);
        let mut literals = Vec::new();
        collect_literals(tree.root_node(), &mut literals);
        assert!(literals.is_empty());
    }
}
