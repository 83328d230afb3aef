use crate::error::{OutlineError, Result};
use tree_sitter::Node;

/// Rendered receiver type of a function declaration node
///
/// Returns `None` for plain functions. For methods, the receiver's declared
/// type expression is printed back to canonical source text, so `*Foo`,
/// `Stack[T]`, and `*Map[K, V]` come out with gofmt spacing regardless of how
/// the source was formatted.
pub fn receiver_type(decl: Node, src: &str) -> Result<Option<String>> {
    let receiver = match decl.child_by_field_name("receiver") {
        Some(receiver) => receiver,
        None => return Ok(None),
    };

    let mut cursor = receiver.walk();
    let param = receiver
        .named_children(&mut cursor)
        .find(|child| child.kind() == "parameter_declaration")
        .ok_or_else(|| OutlineError::render("receiver clause has no parameter"))?;
    let ty = param
        .child_by_field_name("type")
        .ok_or_else(|| OutlineError::render("receiver parameter has no type"))?;

    render_type(ty, src).map(Some)
}

/// Print a receiver type expression
///
/// Only the shapes a legal receiver can take are supported; anything else is
/// a rendering error that aborts the run.
fn render_type(node: Node, src: &str) -> Result<String> {
    match node.kind() {
        "type_identifier" => Ok(text(node, src).to_string()),
        "pointer_type" => {
            let inner = inner_type(node)?;
            Ok(format!("*{}", render_type(inner, src)?))
        }
        "generic_type" => {
            let base = field(node, "type")?;
            let args = field(node, "type_arguments")?;
            let mut rendered = Vec::new();
            let mut cursor = args.walk();
            for arg in args.named_children(&mut cursor) {
                if arg.kind() == "comment" {
                    continue;
                }
                rendered.push(render_type(arg, src)?);
            }
            Ok(format!("{}[{}]", render_type(base, src)?, rendered.join(", ")))
        }
        // the grammar wraps every type argument in a type_elem; a receiver
        // argument holds one term, constraint unions hold several
        "type_elem" => {
            let mut terms = Vec::new();
            let mut cursor = node.walk();
            for term in node.named_children(&mut cursor) {
                if term.kind() == "comment" {
                    continue;
                }
                terms.push(render_type(term, src)?);
            }
            Ok(terms.join(" | "))
        }
        "qualified_type" => {
            let package = field(node, "package")?;
            let name = field(node, "name")?;
            Ok(format!("{}.{}", text(package, src), text(name, src)))
        }
        "parenthesized_type" => {
            let inner = inner_type(node)?;
            Ok(format!("({})", render_type(inner, src)?))
        }
        other => Err(OutlineError::render(format!(
            "unsupported receiver type node: {other}"
        ))),
    }
}

fn text<'a>(node: Node, src: &'a str) -> &'a str {
    &src[node.start_byte()..node.end_byte()]
}

fn field<'a>(node: Node<'a>, name: &str) -> Result<Node<'a>> {
    node.child_by_field_name(name)
        .ok_or_else(|| OutlineError::render(format!("{} node missing {name} field", node.kind())))
}

fn inner_type(node: Node) -> Result<Node> {
    node.named_child(0)
        .ok_or_else(|| OutlineError::render(format!("{} node has no inner type", node.kind())))
}
