//! Error types shared by the parser, renderer and outline extractor.

use std::io;
use std::path::PathBuf;

/// Result alias used throughout the library.
pub type Result<T> = std::result::Result<T, Error>;

/// Fatal errors. Each of these aborts the current render or extraction.
///
/// Image problems are not listed here: they degrade to inline text inside the
/// rendered output (see [`crate::render::image::ImageError`]).
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The markdown source could not be opened or decoded.
    #[error("cannot read {}: {source}", .path.display())]
    SourceUnreadable {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The controlling terminal did not report its size.
    #[error("terminal dimensions unavailable: {0}")]
    TerminalDimensionsUnavailable(#[source] io::Error),

    /// The document contains a node kind the renderer has no handler for.
    #[error("unsupported markdown node: {0}")]
    UnsupportedNodeKind(String),

    /// Writing to the output sink failed.
    #[error(transparent)]
    Io(#[from] io::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_source_unreadable_message_names_path() {
        let err = Error::SourceUnreadable {
            path: PathBuf::from("plan/README.md"),
            source: io::Error::new(io::ErrorKind::NotFound, "no such file"),
        };
        assert_eq!(err.to_string(), "cannot read plan/README.md: no such file");
    }

    #[test]
    fn test_io_errors_convert() {
        let err: Error = io::Error::new(io::ErrorKind::BrokenPipe, "closed").into();
        assert!(matches!(err, Error::Io(_)));
    }
}
