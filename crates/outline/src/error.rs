use thiserror::Error;

/// Result type for outline operations
pub type Result<T> = std::result::Result<T, OutlineError>;

/// Errors that can occur while producing an outline
///
/// Every variant is fatal: the tool never emits a partial outline.
#[derive(Error, Debug)]
pub enum OutlineError {
    /// The source file could not be read from disk
    #[error("could not read file {path}: {source}")]
    SourceUnavailable {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// The overlay archive has no entry for the requested file
    #[error("couldn't find {0} in archive")]
    OverlayMiss(String),

    /// The overlay archive on standard input is malformed
    #[error("failed to parse --modified archive: {0}")]
    OverlayCorrupt(String),

    /// The source does not parse under the requested mode
    #[error("could not parse file: {0}")]
    ParseFailure(String),

    /// A method receiver type could not be rendered back to source text
    #[error("failed to render receiver type: {0}")]
    RenderError(String),

    /// A grouped declaration contains a spec outside the supported taxonomy
    #[error("unknown spec kind: {0}")]
    UnknownSpec(String),

    /// A top-level declaration outside the supported taxonomy, at a 1-based
    /// byte offset
    #[error("unknown declaration @ {0}")]
    UnknownDeclaration(usize),
}

impl OutlineError {
    /// Wrap a filesystem error with the path that failed
    pub fn source_unavailable(path: impl Into<String>, source: std::io::Error) -> Self {
        Self::SourceUnavailable {
            path: path.into(),
            source,
        }
    }

    /// Create an overlay miss error
    pub fn overlay_miss(path: impl Into<String>) -> Self {
        Self::OverlayMiss(path.into())
    }

    /// Create an overlay corrupt error
    pub fn overlay_corrupt(msg: impl Into<String>) -> Self {
        Self::OverlayCorrupt(msg.into())
    }

    /// Create a parse failure
    pub fn parse_failure(msg: impl Into<String>) -> Self {
        Self::ParseFailure(msg.into())
    }

    /// Create a receiver rendering error
    pub fn render(msg: impl Into<String>) -> Self {
        Self::RenderError(msg.into())
    }

    /// Create an unknown spec error
    pub fn unknown_spec(kind: impl Into<String>) -> Self {
        Self::UnknownSpec(kind.into())
    }
}
