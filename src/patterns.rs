// Descriptor pattern recognition over JavaScript object literals.
//
// Three mutually exclusive shapes are recognized, each anchored on an object
// literal reached from its first property:
//   1. `Vue.component("name", {...})`  - explicit component registration
//   2. `export default {...}`          - single-file-component export
//   3. `new Vue({...})` / `Vue.extend({...})` - linked root-instance descriptor
//
// Everything here is a pure function over borrowed tree-sitter nodes; a shape
// that does not match is simply `None`, never an error.

use tracing::trace;
use tree_sitter::Node;

use crate::types::{FileContext, IndexKey};

/// Outcome of a successful descriptor match.
#[derive(Debug, Clone, PartialEq)]
pub struct DescriptorMatch {
    pub name: String,
    pub index_key: IndexKey,
}

/// Node kinds that count as properties of an object literal.
pub fn is_property(node: &Node) -> bool {
    matches!(
        node.kind(),
        "pair" | "method_definition" | "shorthand_property_identifier"
    )
}

/// The properties of an object literal in source order, comments and spread
/// elements excluded.
pub fn object_properties<'tree>(object: Node<'tree>) -> Vec<Node<'tree>> {
    let mut cursor = object.walk();
    object
        .named_children(&mut cursor)
        .filter(is_property)
        .collect()
}

/// Evaluate the descriptor patterns for one visited property.
///
/// Only the first property of an object literal triggers evaluation, and only
/// when the object literal is not itself the value of another property (which
/// would make it a nested sub-options block). At most one pattern fires; the
/// export pattern wins in single-file components, then explicit registration,
/// then the linked-instance descriptor.
pub fn match_descriptor(
    property: Node<'_>,
    source: &[u8],
    file: &FileContext,
) -> Option<DescriptorMatch> {
    let object = property.parent()?;
    if object.kind() != "object" {
        return None;
    }
    let first = object_properties(object).into_iter().next()?;
    if first.id() != property.id() {
        return None;
    }
    let container = object.parent()?;
    if container.kind() == "pair" {
        return None;
    }

    if file.is_single_file_component() && is_default_export_value(object) {
        let name = property_string_value(object, source, "name")
            .unwrap_or_else(|| file.name_without_extension().to_string());
        trace!(name = %name, "matched single-file-component export");
        return Some(DescriptorMatch {
            name,
            index_key: IndexKey::Components,
        });
    }

    if let Some(name) = component_registration_name(object, source) {
        trace!(name = %name, "matched explicit component registration");
        return Some(DescriptorMatch {
            name,
            index_key: IndexKey::Components,
        });
    }

    if let Some(binding) = linked_instance_binding(object, source) {
        trace!(binding = %binding, "matched linked root-instance descriptor");
        return Some(DescriptorMatch {
            name: binding,
            index_key: IndexKey::Options,
        });
    }

    None
}

/// `Vue.component("name", {...})` with the object literal in argument
/// position 1 and a quoted string in position 0. Returns the unquoted name.
fn component_registration_name(object: Node<'_>, source: &[u8]) -> Option<String> {
    let arguments = object.parent()?;
    if arguments.kind() != "arguments" {
        return None;
    }
    let call = arguments.parent()?;
    if call.kind() != "call_expression" {
        return None;
    }
    let callee = call.child_by_field_name("function")?;
    if !is_reference_chain(callee, source, &["Vue", "component"]) {
        return None;
    }
    let args = call_arguments(arguments);
    if args.len() < 2 || args[1].id() != object.id() {
        return None;
    }
    quoted_string_value(args[0], source)
}

/// `new Vue({...})` or `Vue.extend({...})` with the object literal as the
/// first argument. Returns the `el` binding, or an empty string when the
/// descriptor carries none (the instance is still indexed).
fn linked_instance_binding(object: Node<'_>, source: &[u8]) -> Option<String> {
    if !is_linked_instance_descriptor(object, source) {
        return None;
    }
    let binding = property_string_value(object, source, "el").unwrap_or_default();
    Some(binding)
}

fn is_linked_instance_descriptor(object: Node<'_>, source: &[u8]) -> bool {
    let Some(arguments) = object.parent() else {
        return false;
    };
    if arguments.kind() != "arguments" {
        return false;
    }
    let args = call_arguments(arguments);
    if args.first().map(|arg| arg.id()) != Some(object.id()) {
        return false;
    }
    let Some(call) = arguments.parent() else {
        return false;
    };
    match call.kind() {
        "new_expression" => call
            .child_by_field_name("constructor")
            .is_some_and(|constructor| is_reference_chain(constructor, source, &["Vue"])),
        "call_expression" => call
            .child_by_field_name("function")
            .is_some_and(|callee| is_reference_chain(callee, source, &["Vue", "extend"])),
        _ => false,
    }
}

/// True when the object literal is the expression of a default export.
fn is_default_export_value(object: Node<'_>) -> bool {
    object.parent().is_some_and(|parent| {
        parent.kind() == "export_statement"
            && parent
                .child_by_field_name("value")
                .is_some_and(|value| value.id() == object.id())
    })
}

/// Exact match of a callee against a reference chain such as
/// `["Vue", "component"]`. The qualifier must be a plain identifier at every
/// step, so `a.Vue.component` does not match.
pub(crate) fn is_reference_chain(node: Node<'_>, source: &[u8], chain: &[&str]) -> bool {
    match chain {
        [] => false,
        [name] => node.kind() == "identifier" && node_text(node, source) == *name,
        [qualifier @ .., last] => {
            if node.kind() != "member_expression" {
                return false;
            }
            let property_matches = node.child_by_field_name("property").is_some_and(|property| {
                property.kind() == "property_identifier" && node_text(property, source) == *last
            });
            property_matches
                && node
                    .child_by_field_name("object")
                    .is_some_and(|object| is_reference_chain(object, source, qualifier))
        }
    }
}

/// Named children of an `arguments` node in call order, comments excluded.
pub(crate) fn call_arguments<'tree>(arguments: Node<'tree>) -> Vec<Node<'tree>> {
    let mut cursor = arguments.walk();
    arguments
        .named_children(&mut cursor)
        .filter(|child| child.kind() != "comment")
        .collect()
}

/// The unquoted content of a single- or double-quoted string literal.
/// Template strings are not quoted literals for pattern purposes.
pub(crate) fn quoted_string_value(node: Node<'_>, source: &[u8]) -> Option<String> {
    if node.kind() != "string" {
        return None;
    }
    let text = node_text(node, source);
    let unquoted = text
        .strip_prefix('"')
        .and_then(|t| t.strip_suffix('"'))
        .or_else(|| text.strip_prefix('\'').and_then(|t| t.strip_suffix('\'')))?;
    Some(unquoted.to_string())
}

/// Look up a property of an object literal by key (identifier or quoted
/// string key) and return its string-literal value, if any.
pub(crate) fn property_string_value(
    object: Node<'_>,
    source: &[u8],
    name: &str,
) -> Option<String> {
    let value = property_value(object, source, name)?;
    quoted_string_value(value, source)
}

/// The value node of the named property, if the object literal has one.
pub(crate) fn property_value<'tree>(
    object: Node<'tree>,
    source: &[u8],
    name: &str,
) -> Option<Node<'tree>> {
    for property in object_properties(object) {
        if property.kind() != "pair" {
            continue;
        }
        let Some(key) = property.child_by_field_name("key") else {
            continue;
        };
        let matches = match key.kind() {
            "property_identifier" => node_text(key, source) == name,
            "string" => quoted_string_value(key, source).as_deref() == Some(name),
            _ => false,
        };
        if matches {
            return property.child_by_field_name("value");
        }
    }
    None
}

pub(crate) fn node_text<'a>(node: Node<'_>, source: &'a [u8]) -> &'a str {
    node.utf8_text(source).unwrap_or("")
}
