//! Source code location types used by issues and the reporter.

/// A position in a source file (1-indexed line and column).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceLocation {
    pub file_path: String,
    pub line: usize,
    pub col: usize,
}

impl SourceLocation {
    pub fn new(file_path: impl Into<String>, line: usize, col: usize) -> Self {
        Self {
            file_path: file_path.into(),
            line,
            col,
        }
    }
}

/// Location plus the exact character span and the source line it sits on.
///
/// `span_start` is a 0-based character offset from the start of the file and
/// `span_len` covers exactly the offending literal substring, never its
/// surrounding quotes or braces. Editors consume the span; the CLI reporter
/// uses `line`/`col` and `source_line` for display.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceContext {
    pub location: SourceLocation,
    pub span_start: u32,
    pub span_len: u32,
    pub source_line: String,
}

impl SourceContext {
    pub fn new(
        location: SourceLocation,
        span_start: u32,
        span_len: u32,
        source_line: impl Into<String>,
    ) -> Self {
        Self {
            location,
            span_start,
            span_len,
            source_line: source_line.into(),
        }
    }
}
