//! # Go Outline
//!
//! Structural outline extraction for single Go source files.
//!
//! The outline lists a file's package, imports, declared types, functions and
//! methods, variables, and constants, each with 1-based byte offsets into the
//! original source. Editor integrations consume the serialized form to drive
//! symbol trees and navigation.
//!
//! ## Architecture
//!
//! ```text
//! Source bytes (disk or overlay archive from stdin)
//!     │
//!     ├──> GoParser (tree-sitter) → SourceFile
//!     │    └─> full or imports-only view, syntax checked
//!     │
//!     ├──> build(): classify top-level declarations
//!     │    ├─> functions/methods (with rendered receiver type)
//!     │    ├─> import/type/const/var groups, flattened to siblings
//!     │    └─> anything else is a hard error, no partial output
//!     │
//!     └──> Declaration tree rooted at the package node
//! ```
//!
//! ## Example
//!
//! ```rust
//! use go_outline::{Outliner, ParseMode};
//!
//! let src = br#"package demo
//!
//! func Hello() {}
//! "#;
//!
//! let mut outliner = Outliner::new().unwrap();
//! let root = outliner
//!     .outline_source(src.to_vec(), ParseMode::Full)
//!     .unwrap();
//! assert_eq!(root.label, "demo");
//! assert_eq!(root.children.len(), 1);
//! ```

mod builder;
mod error;
mod outliner;
mod parser;
mod receiver;
mod source;
mod types;

pub use builder::build;
pub use error::{OutlineError, Result};
pub use outliner::Outliner;
pub use parser::{GoParser, ParseMode, SourceFile};
pub use source::{resolve, OverlayArchive};
pub use types::{Declaration, DeclarationKind};
