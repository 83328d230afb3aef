use crate::error::{OutlineError, Result};
use crate::parser::SourceFile;
use crate::receiver::receiver_type;
use crate::types::{Declaration, DeclarationKind};
use tree_sitter::Node;

/// Build the outline tree for a parsed file
///
/// The result is a single `package` root whose children are the file's
/// top-level declarations in source order. Grouped declarations are
/// flattened: every import spec, type spec, and declared identifier of a
/// var/const spec becomes its own sibling. A construct outside the supported
/// taxonomy fails the whole build.
pub fn build(file: &SourceFile) -> Result<Declaration> {
    let mut children = Vec::new();
    for node in file.declarations() {
        match node.kind() {
            "function_declaration" | "method_declaration" => {
                children.push(function_declaration(file, node)?);
            }
            "import_declaration" => import_specs(file, node, &mut children)?,
            "type_declaration" => type_specs(file, node, &mut children)?,
            "const_declaration" => {
                value_specs(file, node, "const_spec", DeclarationKind::Constant, &mut children)?;
            }
            "var_declaration" => {
                value_specs(file, node, "var_spec", DeclarationKind::Variable, &mut children)?;
            }
            _ => return Err(OutlineError::UnknownDeclaration(file.start_offset(node))),
        }
    }

    let package = file.package_name()?;
    let (start, end) = file.root_span();
    Ok(Declaration::new(package, DeclarationKind::Package, start, end).with_children(children))
}

/// One node per function or method, spanning the whole declaration
fn function_declaration(file: &SourceFile, node: Node) -> Result<Declaration> {
    let name = node
        .child_by_field_name("name")
        .ok_or_else(|| OutlineError::parse_failure("function declaration has no name"))?;

    let decl = Declaration::new(
        file.text(name),
        DeclarationKind::Function,
        file.start_offset(node),
        file.end_offset(node),
    );
    Ok(match receiver_type(node, file.source())? {
        Some(receiver) => decl.with_receiver(receiver),
        None => decl,
    })
}

/// One node per import spec; the label keeps the quoted path verbatim and
/// drops any local alias
fn import_specs(file: &SourceFile, node: Node, out: &mut Vec<Declaration>) -> Result<()> {
    for spec in group_specs(node) {
        if spec.kind() != "import_spec" {
            return Err(OutlineError::unknown_spec(spec.kind()));
        }
        let path = spec
            .child_by_field_name("path")
            .ok_or_else(|| OutlineError::parse_failure("import spec has no path"))?;
        out.push(Declaration::new(
            file.text(path),
            DeclarationKind::Import,
            file.start_offset(spec),
            file.end_offset(spec),
        ));
    }
    Ok(())
}

/// One node per type spec or alias, spanning name through definition
fn type_specs(file: &SourceFile, node: Node, out: &mut Vec<Declaration>) -> Result<()> {
    for spec in group_specs(node) {
        if !matches!(spec.kind(), "type_spec" | "type_alias") {
            return Err(OutlineError::unknown_spec(spec.kind()));
        }
        let name = spec
            .child_by_field_name("name")
            .ok_or_else(|| OutlineError::parse_failure("type spec has no name"))?;
        out.push(Declaration::new(
            file.text(name),
            DeclarationKind::Type,
            file.start_offset(spec),
            file.end_offset(spec),
        ));
    }
    Ok(())
}

/// One node per declared identifier of a var/const spec, spanning just the
/// identifier
fn value_specs(
    file: &SourceFile,
    node: Node,
    spec_kind: &str,
    kind: DeclarationKind,
    out: &mut Vec<Declaration>,
) -> Result<()> {
    for spec in group_specs(node) {
        if spec.kind() != spec_kind {
            return Err(OutlineError::unknown_spec(spec.kind()));
        }
        let mut cursor = spec.walk();
        for name in spec.children_by_field_name("name", &mut cursor) {
            out.push(Declaration::new(
                file.text(name),
                kind,
                file.start_offset(name),
                file.end_offset(name),
            ));
        }
    }
    Ok(())
}

/// Named spec nodes of a grouped declaration, in source order
///
/// Unwraps the parenthesized spec-list node where the grammar produces one
/// and drops interleaved comments.
fn group_specs(decl: Node) -> Vec<Node> {
    let mut cursor = decl.walk();
    let mut specs = Vec::new();
    for child in decl.named_children(&mut cursor) {
        match child.kind() {
            "comment" => continue,
            "import_spec_list" | "var_spec_list" => {
                let mut list_cursor = child.walk();
                for spec in child.named_children(&mut list_cursor) {
                    if spec.kind() != "comment" {
                        specs.push(spec);
                    }
                }
            }
            _ => specs.push(child),
        }
    }
    specs
}
