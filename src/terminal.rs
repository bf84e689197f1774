//! Terminal facts the renderer needs: size, color support, inline images.

use crate::error::{Error, Result};
use supports_color::{Stream, on};

/// Rows used when only the column count is known.
const DEFAULT_ROWS: u16 = 24;

/// Terminal dimensions in character cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TerminalSize {
    pub columns: u16,
    pub rows: u16,
}

impl TerminalSize {
    pub fn new(columns: u16, rows: u16) -> Self {
        Self { columns, rows }
    }

    /// Ask the controlling terminal for its size.
    ///
    /// A terminal that answers with zero columns is treated as unavailable.
    pub fn query() -> Result<Self> {
        let (columns, rows) =
            crossterm::terminal::size().map_err(Error::TerminalDimensionsUnavailable)?;
        if columns == 0 {
            return Err(Error::TerminalDimensionsUnavailable(std::io::Error::other(
                "terminal reported zero columns",
            )));
        }
        Ok(Self { columns, rows })
    }

    /// Use `columns` when given, otherwise query the terminal.
    pub fn resolve(columns: Option<u16>) -> Result<Self> {
        match columns {
            Some(columns) => {
                let rows = Self::query().map(|size| size.rows).unwrap_or(DEFAULT_ROWS);
                Ok(Self { columns, rows })
            }
            None => Self::query(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TerminalCapabilities {
    /// Stdout accepts ANSI color escapes
    pub supports_color: bool,
    /// The terminal understands the iTerm2 inline image sequence
    pub inline_images: bool,
}

impl TerminalCapabilities {
    pub fn detect() -> Self {
        let supports_color = on(Stream::Stdout).is_some();
        let inline_images = Self::detect_inline_images(
            std::env::var("ITERM_SESSION_ID").ok().as_deref(),
            std::env::var("TERM_PROGRAM").ok().as_deref(),
        );

        tracing::debug!(supports_color, inline_images, "detected terminal capabilities");

        Self {
            supports_color,
            inline_images,
        }
    }

    /// iTerm2 sets `ITERM_SESSION_ID`; WezTerm speaks the same protocol.
    fn detect_inline_images(session_id: Option<&str>, term_program: Option<&str>) -> bool {
        if session_id.is_some_and(|id| !id.is_empty()) {
            return true;
        }
        matches!(term_program, Some("iTerm.app") | Some("WezTerm"))
    }
}
