use crate::error::{OutlineError, Result};
use tree_sitter::{Node, Parser, Tree};

/// How much of the file the outline should cover
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ParseMode {
    /// The whole file
    Full,
    /// The package clause and import section only
    ImportsOnly,
}

/// Go parser wrapping the tree-sitter grammar
pub struct GoParser {
    parser: Parser,
}

impl GoParser {
    /// Create a parser with the Go grammar loaded
    pub fn new() -> Result<Self> {
        let language: tree_sitter::Language = tree_sitter_go::LANGUAGE.into();
        let mut parser = Parser::new();
        parser
            .set_language(&language)
            .map_err(|e| OutlineError::parse_failure(format!("failed to load Go grammar: {e}")))?;
        Ok(Self { parser })
    }

    /// Parse source bytes into a syntax-checked file
    ///
    /// The source must be valid UTF-8. In [`ParseMode::Full`] the whole tree
    /// must be free of syntax errors; in [`ParseMode::ImportsOnly`] only the
    /// package clause and the leading import section are checked, so broken
    /// or half-written code after the imports still parses.
    pub fn parse(&mut self, source: Vec<u8>, mode: ParseMode) -> Result<SourceFile> {
        let src = String::from_utf8(source)
            .map_err(|e| OutlineError::parse_failure(format!("source is not valid UTF-8: {e}")))?;
        let tree = self
            .parser
            .parse(&src, None)
            .ok_or_else(|| OutlineError::parse_failure("parser produced no tree"))?;

        let file = SourceFile { src, tree, mode };
        file.check_syntax()?;
        Ok(file)
    }
}

/// A parsed Go file plus the view restriction of its parse mode
#[derive(Debug)]
pub struct SourceFile {
    src: String,
    tree: Tree,
    mode: ParseMode,
}

impl SourceFile {
    /// The source text
    #[must_use]
    pub fn source(&self) -> &str {
        &self.src
    }

    /// Text of a node, sliced from the original source
    #[must_use]
    pub fn text(&self, node: Node) -> &str {
        &self.src[node.start_byte()..node.end_byte()]
    }

    /// 1-based byte offset of a node's first byte
    #[must_use]
    pub fn start_offset(&self, node: Node) -> usize {
        node.start_byte() + 1
    }

    /// 1-based byte offset one past a node's last byte
    #[must_use]
    pub fn end_offset(&self, node: Node) -> usize {
        node.end_byte() + 1
    }

    /// Span of the entire input as 1-based byte offsets
    #[must_use]
    pub fn root_span(&self) -> (usize, usize) {
        (1, self.src.len() + 1)
    }

    /// The file's declared package name
    pub fn package_name(&self) -> Result<&str> {
        let root = self.tree.root_node();
        let mut cursor = root.walk();
        for child in root.named_children(&mut cursor) {
            if child.kind() == "package_clause" {
                let mut clause_cursor = child.walk();
                for clause_child in child.named_children(&mut clause_cursor) {
                    if clause_child.kind() == "package_identifier" {
                        return Ok(self.text(clause_child));
                    }
                }
            }
        }
        Err(OutlineError::parse_failure("missing package clause"))
    }

    /// Top-level declaration nodes in source order
    ///
    /// The package clause and comments are filtered out. In imports-only
    /// mode the list stops at the first node that is not an import
    /// declaration, so later content is invisible to the builder.
    #[must_use]
    pub fn declarations(&self) -> Vec<Node<'_>> {
        let root = self.tree.root_node();
        let mut cursor = root.walk();
        let mut decls = Vec::new();
        for child in root.named_children(&mut cursor) {
            match child.kind() {
                "package_clause" | "comment" => continue,
                "import_declaration" => decls.push(child),
                _ => {
                    if self.mode == ParseMode::ImportsOnly {
                        break;
                    }
                    decls.push(child);
                }
            }
        }
        decls
    }

    /// Reject trees with syntax errors inside the visible region
    fn check_syntax(&self) -> Result<()> {
        let root = self.tree.root_node();
        match self.mode {
            ParseMode::Full => {
                if root.has_error() {
                    return Err(OutlineError::parse_failure(Self::syntax_error_detail(root)));
                }
            }
            ParseMode::ImportsOnly => {
                let mut cursor = root.walk();
                for child in root.named_children(&mut cursor) {
                    match child.kind() {
                        "package_clause" | "comment" | "import_declaration" => {
                            if child.has_error() {
                                return Err(OutlineError::parse_failure(
                                    Self::syntax_error_detail(child),
                                ));
                            }
                        }
                        // an unparseable tail still ends the visible region,
                        // as long as it begins where a Go token can begin
                        _ if child.is_error() => {
                            let first = self.text(child).chars().next();
                            if !first.is_some_and(starts_go_token) {
                                return Err(OutlineError::parse_failure(
                                    Self::syntax_error_detail(child),
                                ));
                            }
                            break;
                        }
                        _ => break,
                    }
                }
            }
        }
        // both modes expose the package clause, so it must be present
        self.package_name()?;
        Ok(())
    }

    fn syntax_error_detail(node: Node) -> String {
        match Self::find_error(node) {
            Some(err) if err.is_missing() => {
                let pos = err.start_position();
                format!(
                    "missing {} at line {}, column {}",
                    err.kind(),
                    pos.row + 1,
                    pos.column + 1
                )
            }
            Some(err) => {
                let pos = err.start_position();
                format!("syntax error at line {}, column {}", pos.row + 1, pos.column + 1)
            }
            None => "syntax error".to_string(),
        }
    }

    /// First error or missing node in a subtree, depth first
    fn find_error(node: Node) -> Option<Node> {
        if node.is_error() || node.is_missing() {
            return Some(node);
        }
        if !node.has_error() {
            return None;
        }
        let mut cursor = node.walk();
        let children: Vec<_> = node.children(&mut cursor).collect();
        for child in children {
            if let Some(err) = Self::find_error(child) {
                return Some(err);
            }
        }
        None
    }
}

/// Characters the Go scanner accepts as the start of a token
fn starts_go_token(c: char) -> bool {
    c.is_alphabetic()
        || c.is_ascii_digit()
        || c == '_'
        || "\"'`+-*/%&|^<>=!:;,.()[]{}~".contains(c)
}
