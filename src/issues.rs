//! Diagnostic types produced by class-expression analysis.
//!
//! Every issue is self-contained: it carries the exact source span of the
//! offending class literal plus everything a consumer needs to render it,
//! whether that consumer is the CLI reporter or an editor host mapping spans
//! to squiggles.

use enum_dispatch::enum_dispatch;

use crate::core::data::SourceContext;
use crate::utils::pluralize;

// ============================================================
// Severity and Rule
// ============================================================

/// Severity level of an issue.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Error,
    Warning,
    /// Style nudge, never a correctness problem.
    Hint,
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Severity::Error => write!(f, "error"),
            Severity::Warning => write!(f, "warning"),
            Severity::Hint => write!(f, "hint"),
        }
    }
}

/// Rule identifier for each issue type. The display name doubles as the rule
/// token accepted by `twlint-disable-next-line` directives.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Rule {
    InvalidClass,
    DuplicateClass,
    ClassConflict,
    ExtractableClass,
    ParseError,
}

impl Rule {
    /// Stable numeric code consumed by editor hosts.
    pub fn code(&self) -> u16 {
        match self {
            Rule::ParseError => 1000,
            Rule::InvalidClass => 1001,
            Rule::DuplicateClass => 1002,
            Rule::ClassConflict => 1003,
            Rule::ExtractableClass => 1004,
        }
    }
}

impl std::fmt::Display for Rule {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Rule::InvalidClass => write!(f, "invalid-class"),
            Rule::DuplicateClass => write!(f, "duplicate-class"),
            Rule::ClassConflict => write!(f, "class-conflict"),
            Rule::ExtractableClass => write!(f, "extractable-class"),
            Rule::ParseError => write!(f, "parse-error"),
        }
    }
}

// ============================================================
// Issue Types
// ============================================================

/// Class name the design system does not produce.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvalidClassIssue {
    pub context: SourceContext,
    /// The unknown class text.
    pub text: String,
}

impl InvalidClassIssue {
    pub fn severity() -> Severity {
        Severity::Error
    }

    pub fn rule() -> Rule {
        Rule::InvalidClass
    }
}

/// Same class applied more than once along a single execution path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DuplicateClassIssue {
    pub context: SourceContext,
    /// The repeated class text.
    pub text: String,
    /// How many simultaneously-present copies the element can carry.
    pub count: usize,
}

impl DuplicateClassIssue {
    pub fn severity() -> Severity {
        Severity::Warning
    }

    pub fn rule() -> Rule {
        Rule::DuplicateClass
    }
}

/// Two different classes that set the same style axis on one element.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassConflictIssue {
    pub context: SourceContext,
    /// The class this diagnostic is attached to.
    pub text: String,
    /// The class it collides with.
    pub other: String,
    /// The shared style axis (CSS properties both classes set).
    pub axis: String,
}

impl ClassConflictIssue {
    pub fn severity() -> Severity {
        Severity::Warning
    }

    pub fn rule() -> Rule {
        Rule::ClassConflict
    }
}

/// Class repeated across every arm of a conditional; hoisting it out makes
/// the expression smaller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractableClassIssue {
    pub context: SourceContext,
    pub text: String,
}

impl ExtractableClassIssue {
    pub fn severity() -> Severity {
        Severity::Hint
    }

    pub fn rule() -> Rule {
        Rule::ExtractableClass
    }
}

/// File could not be parsed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseErrorIssue {
    pub file_path: String,
    pub error: String,
}

impl ParseErrorIssue {
    pub fn severity() -> Severity {
        Severity::Error
    }

    pub fn rule() -> Rule {
        Rule::ParseError
    }
}

// ============================================================
// Issue Enum
// ============================================================

/// A class-usage issue found during analysis.
#[enum_dispatch(Report)]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Issue {
    InvalidClass(InvalidClassIssue),
    DuplicateClass(DuplicateClassIssue),
    ClassConflict(ClassConflictIssue),
    ExtractableClass(ExtractableClassIssue),
    ParseError(ParseErrorIssue),
}

impl Issue {
    pub fn severity(&self) -> Severity {
        match self {
            Issue::InvalidClass(_) => InvalidClassIssue::severity(),
            Issue::DuplicateClass(_) => DuplicateClassIssue::severity(),
            Issue::ClassConflict(_) => ClassConflictIssue::severity(),
            Issue::ExtractableClass(_) => ExtractableClassIssue::severity(),
            Issue::ParseError(_) => ParseErrorIssue::severity(),
        }
    }

    pub fn rule(&self) -> Rule {
        match self {
            Issue::InvalidClass(_) => InvalidClassIssue::rule(),
            Issue::DuplicateClass(_) => DuplicateClassIssue::rule(),
            Issue::ClassConflict(_) => ClassConflictIssue::rule(),
            Issue::ExtractableClass(_) => ExtractableClassIssue::rule(),
            Issue::ParseError(_) => ParseErrorIssue::rule(),
        }
    }
}

// ============================================================
// Report Trait (for CLI output)
// ============================================================

/// Location information for report output.
pub enum ReportLocation<'a> {
    /// Source code location with the line text for context display.
    Source(&'a SourceContext),
    /// File-level only (parse errors have no line context).
    File { path: &'a str },
}

/// Rendering interface implemented by every issue type. `enum_dispatch`
/// makes calls through the `Issue` enum direct rather than virtual.
#[enum_dispatch]
pub trait Report {
    fn location(&self) -> ReportLocation<'_>;

    /// Primary message to display.
    fn message(&self) -> String;

    fn report_severity(&self) -> Severity;

    fn report_rule(&self) -> Rule;

    /// Optional content for the trailing "= note:" line.
    fn details(&self) -> Option<String> {
        None
    }
}

impl Report for InvalidClassIssue {
    fn location(&self) -> ReportLocation<'_> {
        ReportLocation::Source(&self.context)
    }

    fn message(&self) -> String {
        format!("unknown class `{}`", self.text)
    }

    fn report_severity(&self) -> Severity {
        Self::severity()
    }

    fn report_rule(&self) -> Rule {
        Self::rule()
    }

    fn details(&self) -> Option<String> {
        Some("the compiled stylesheet produces no rule for this class".to_string())
    }
}

impl Report for DuplicateClassIssue {
    fn location(&self) -> ReportLocation<'_> {
        ReportLocation::Source(&self.context)
    }

    fn message(&self) -> String {
        format!("duplicate class `{}`", self.text)
    }

    fn report_severity(&self) -> Severity {
        Self::severity()
    }

    fn report_rule(&self) -> Rule {
        Self::rule()
    }

    fn details(&self) -> Option<String> {
        Some(format!(
            "this element can carry {} at the same time",
            pluralize(self.count, "copy", "copies")
        ))
    }
}

impl Report for ClassConflictIssue {
    fn location(&self) -> ReportLocation<'_> {
        ReportLocation::Source(&self.context)
    }

    fn message(&self) -> String {
        format!("`{}` conflicts with `{}`", self.text, self.other)
    }

    fn report_severity(&self) -> Severity {
        Self::severity()
    }

    fn report_rule(&self) -> Rule {
        Self::rule()
    }

    fn details(&self) -> Option<String> {
        Some(format!("both set `{}`; the stylesheet order decides which wins", self.axis))
    }
}

impl Report for ExtractableClassIssue {
    fn location(&self) -> ReportLocation<'_> {
        ReportLocation::Source(&self.context)
    }

    fn message(&self) -> String {
        format!("`{}` appears in every branch", self.text)
    }

    fn report_severity(&self) -> Severity {
        Self::severity()
    }

    fn report_rule(&self) -> Rule {
        Self::rule()
    }

    fn details(&self) -> Option<String> {
        Some("hoist it out of the conditional".to_string())
    }
}

impl Report for ParseErrorIssue {
    fn location(&self) -> ReportLocation<'_> {
        ReportLocation::File { path: &self.file_path }
    }

    fn message(&self) -> String {
        self.error.clone()
    }

    fn report_severity(&self) -> Severity {
        Self::severity()
    }

    fn report_rule(&self) -> Rule {
        Self::rule()
    }
}

// ============================================================
// Ordering for Issue (for sorting in reports)
// ============================================================

impl Issue {
    fn sort_file_path(&self) -> &str {
        match self.location() {
            ReportLocation::Source(ctx) => &ctx.location.file_path,
            ReportLocation::File { path } => path,
        }
    }

    fn sort_line(&self) -> usize {
        match self.location() {
            ReportLocation::Source(ctx) => ctx.location.line,
            ReportLocation::File { .. } => 0,
        }
    }

    fn sort_col(&self) -> usize {
        match self.location() {
            ReportLocation::Source(ctx) => ctx.location.col,
            ReportLocation::File { .. } => 0,
        }
    }
}

impl Ord for Issue {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.sort_file_path()
            .cmp(other.sort_file_path())
            .then_with(|| self.sort_line().cmp(&other.sort_line()))
            .then_with(|| self.sort_col().cmp(&other.sort_col()))
            .then_with(|| self.message().cmp(&other.message()))
    }
}

impl PartialOrd for Issue {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

// ============================================================
// Tests
// ============================================================
