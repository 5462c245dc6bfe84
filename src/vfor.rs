// Type forwarding for `v-for` loop variables.
//
// A `v-for` attribute value such as `item in items` or `(item, index) in
// items` parses as a binary `in` expression in the template-expression
// dialect. Element-type inference applies to the first bound variable only;
// everything else is reported as "not handled" so the host's fallback
// resolution can proceed.

use tracing::trace;
use tree_sitter::Node;

use crate::types::ExpressionDialect;

// Ancestor steps allowed between a bound variable and its loop expression:
// enough for a parenthesized list with nested sequence expressions.
const MAX_BINDING_DEPTH: usize = 4;

/// Generic "element type of an iterable expression" calculator, supplied by
/// the host. On success the result has already been recorded in the host's
/// type-evaluation context.
pub trait IterableElementType {
    fn calculate_element_type(&mut self, collection: Node<'_>, loop_expression: Node<'_>) -> bool;
}

/// Forwards element-type inference for the first bound variable of a
/// recognized `v-for` expression.
#[derive(Debug, Clone)]
pub struct LoopVariableTypeForwarder {
    vue_active: bool,
}

impl LoopVariableTypeForwarder {
    /// `vue_active` is the project-wide flag; when the framework is absent
    /// the forwarder never handles anything.
    pub fn new(vue_active: bool) -> Self {
        Self { vue_active }
    }

    /// Returns true when the variable is the first bound variable of an
    /// enclosing `v-for` expression and the calculator succeeded; false
    /// signals "not handled" and lets fallback resolution proceed.
    pub fn resolve_iteration_variable_type(
        &self,
        variable: Node<'_>,
        dialect: ExpressionDialect,
        calculator: &mut dyn IterableElementType,
    ) -> bool {
        if !self.vue_active || dialect != ExpressionDialect::VueTemplate {
            return false;
        }
        if variable.kind() != "identifier" {
            return false;
        }
        let Some(loop_expression) = enclosing_for_each(variable) else {
            return false;
        };
        let variables = bound_variables(loop_expression);
        if variables.first().map(|first| first.id()) != Some(variable.id()) {
            trace!("not the first bound variable, leaving to fallback resolution");
            return false;
        }
        let Some(collection) = loop_expression.child_by_field_name("right") else {
            return false;
        };
        calculator.calculate_element_type(collection, loop_expression)
    }
}

// Locate the binary `in` expression the variable is bound by, stepping only
// through the wrappers a bound-variable list can introduce. The variable must
// come from the left-hand (binding) side.
fn enclosing_for_each(variable: Node<'_>) -> Option<Node<'_>> {
    let mut node = variable;
    for _ in 0..MAX_BINDING_DEPTH {
        let parent = node.parent()?;
        match parent.kind() {
            "binary_expression" if is_for_each(parent) => {
                let left = parent.child_by_field_name("left")?;
                return (left.id() == node.id()).then_some(parent);
            }
            "sequence_expression" | "parenthesized_expression" => node = parent,
            _ => return None,
        }
    }
    None
}

fn is_for_each(expression: Node<'_>) -> bool {
    expression
        .child_by_field_name("operator")
        .is_some_and(|operator| operator.kind() == "in")
}

/// The ordered bound variables of a loop expression: the flattened left-hand
/// side, parentheses and comma sequences unwrapped.
fn bound_variables(loop_expression: Node<'_>) -> Vec<Node<'_>> {
    let mut variables = Vec::new();
    if let Some(left) = loop_expression.child_by_field_name("left") {
        flatten_binding_list(left, &mut variables);
    }
    variables
}

fn flatten_binding_list<'tree>(node: Node<'tree>, out: &mut Vec<Node<'tree>>) {
    match node.kind() {
        "parenthesized_expression" | "sequence_expression" => {
            let mut cursor = node.walk();
            for child in node.named_children(&mut cursor) {
                if child.kind() != "comment" {
                    flatten_binding_list(child, out);
                }
            }
        }
        _ => out.push(node),
    }
}
