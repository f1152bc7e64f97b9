//! Body-tree flattening.
//!
//! Rich-text body exports encode the article body as a nested block tree
//! (paragraphs, lists, ordered lists, arbitrary containers). [flatten]
//! serializes one node into a single marked-up string, which then goes
//! through [crate::cleaning::normalize].
use serde_json::Value;

/// Flatten one body node into marked-up text.
///
/// Lists emit one `" * "` (or `" {n}. "` for ordered lists) entry per
/// item group, paragraphs get a double trailing newline, any other node
/// carrying an `items` sequence recurses over its children in order.
/// Depth is bounded only by the input.
pub fn flatten(node: &Value) -> String {
    let mut out = String::new();
    flatten_into(node, &mut out);
    out
}

fn flatten_into(node: &Value, out: &mut String) {
    // leaves can be bare strings in irregular exports
    if let Value::String(text) = node {
        out.push_str(text);
        return;
    }
    if let Some(text) = node.get("text").and_then(Value::as_str) {
        out.push_str(text);
    }

    let kind = node.get("type").and_then(Value::as_str);
    match kind {
        Some("list") => {
            for group in item_groups(node) {
                out.push_str("\n * ");
                flatten_group(group, out);
            }
            out.push('\n');
        }
        Some("list-ordered") => {
            for (index, group) in item_groups(node).iter().enumerate() {
                out.push_str(&format!("\n {}. ", index + 1));
                flatten_group(group, out);
            }
            out.push('\n');
        }
        _ => {
            for child in item_groups(node) {
                flatten_into(child, out);
            }
        }
    }

    if kind == Some("paragraph") {
        out.push_str("\n\n");
    }
}

fn item_groups(node: &Value) -> &[Value] {
    node.get("items")
        .and_then(Value::as_array)
        .map(Vec::as_slice)
        .unwrap_or(&[])
}

// a list item group is usually an array of children, but tolerate a
// single bare node
fn flatten_group(group: &Value, out: &mut String) {
    match group.as_array() {
        Some(children) => {
            for child in children {
                flatten_into(child, out);
            }
        }
        None => flatten_into(group, out),
    }
}
