use crate::builder;
use crate::error::Result;
use crate::parser::{GoParser, ParseMode};
use crate::source;
use crate::types::Declaration;
use std::path::Path;

/// High-level entry point for outlining one Go file
///
/// Owns the parser so repeated calls reuse the loaded grammar.
pub struct Outliner {
    parser: GoParser,
}

impl Outliner {
    /// Create an outliner with the Go grammar loaded
    pub fn new() -> Result<Self> {
        Ok(Self {
            parser: GoParser::new()?,
        })
    }

    /// Outline source bytes already in memory
    pub fn outline_source(&mut self, source: Vec<u8>, mode: ParseMode) -> Result<Declaration> {
        let file = self.parser.parse(source, mode)?;
        let root = builder::build(&file)?;
        log::debug!(
            "outlined package {} with {} declaration(s)",
            root.label,
            root.children.len()
        );
        Ok(root)
    }

    /// Outline a file read from disk
    pub fn outline_file(&mut self, path: impl AsRef<Path>, mode: ParseMode) -> Result<Declaration> {
        let bytes = source::resolve(path.as_ref(), None)?;
        self.outline_source(bytes, mode)
    }
}
