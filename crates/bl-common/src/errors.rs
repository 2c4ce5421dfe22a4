use std::fmt;

use crate::span::Span;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    /// Stops compilation.
    Error,
    /// Reported unless `--quiet`; the program still compiles.
    Warning,
}

impl Severity {
    pub fn as_str(self) -> &'static str {
        match self {
            Severity::Error => "error",
            Severity::Warning => "warning",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A second location worth pointing at, e.g. the `INSTRUCTION foo` a
/// mismatched `END bar` was meant to close.
#[derive(Debug, Clone)]
pub struct RelatedSpan {
    pub span: Span,
    pub message: String,
}

/// A message for the user from the tokenizer, parser or code generator.
#[derive(Debug, Clone)]
pub struct Diagnostic {
    pub severity: Severity,
    pub message: String,
    pub span: Option<Span>,
    pub related: Vec<RelatedSpan>,
    pub suggestion: Option<String>,
}

impl Diagnostic {
    pub fn new(severity: Severity, message: impl Into<String>) -> Self {
        Self {
            severity,
            message: message.into(),
            span: None,
            related: Vec::new(),
            suggestion: None,
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self::new(Severity::Error, message)
    }

    pub fn warning(message: impl Into<String>) -> Self {
        Self::new(Severity::Warning, message)
    }

    pub fn with_span(self, span: Span) -> Self {
        Self {
            span: Some(span),
            ..self
        }
    }

    pub fn with_related(mut self, span: Span, message: impl Into<String>) -> Self {
        self.related.push(RelatedSpan {
            span,
            message: message.into(),
        });
        self
    }

    pub fn with_suggestion(self, suggestion: impl Into<String>) -> Self {
        Self {
            suggestion: Some(suggestion.into()),
            ..self
        }
    }

    pub fn is_error(&self) -> bool {
        self.severity == Severity::Error
    }
}

/// `file:line:col: severity: message`, then one `= help:` line if there
/// is a suggestion. The location is left out when there is no span.
impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(ref span) = self.span {
            write!(f, "{}: ", span)?;
        }
        write!(f, "{}: {}", self.severity, self.message)?;
        if let Some(ref help) = self.suggestion {
            write!(f, "\n  = help: {}", help)?;
        }
        Ok(())
    }
}

/// Diagnostics gathered by a pass that keeps going after a problem. The
/// tokenizer reports every illegal token this way, and the program parser
/// reports warnings this way.
#[derive(Debug, Default)]
pub struct DiagnosticBag {
    diagnostics: Vec<Diagnostic>,
}

impl DiagnosticBag {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn report(&mut self, diagnostic: Diagnostic) {
        self.diagnostics.push(diagnostic);
    }

    pub fn error(&mut self, message: impl Into<String>, span: Span) {
        self.report(Diagnostic::error(message).with_span(span));
    }

    pub fn warning(&mut self, message: impl Into<String>, span: Span) {
        self.report(Diagnostic::warning(message).with_span(span));
    }

    fn count(&self, severity: Severity) -> usize {
        self.diagnostics
            .iter()
            .filter(|d| d.severity == severity)
            .count()
    }

    pub fn error_count(&self) -> usize {
        self.count(Severity::Error)
    }

    pub fn warning_count(&self) -> usize {
        self.count(Severity::Warning)
    }

    pub fn has_errors(&self) -> bool {
        self.error_count() > 0
    }

    pub fn is_empty(&self) -> bool {
        self.diagnostics.is_empty()
    }

    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    pub fn into_diagnostics(self) -> Vec<Diagnostic> {
        self.diagnostics
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::span::Position;

    fn at(line: u32, column: u32) -> Span {
        let pos = Position {
            line,
            column,
            offset: 0,
        };
        Span::new("a.bl", pos, pos)
    }

    #[test]
    fn display_leads_with_location() {
        let diag = Diagnostic::error("expected THEN, found \"DO\"").with_span(at(2, 4));
        assert_eq!(diag.to_string(), "a.bl:2:4: error: expected THEN, found \"DO\"");
    }

    #[test]
    fn display_without_span_keeps_help() {
        let diag = Diagnostic::error("unknown instruction \"fly\"")
            .with_suggestion("define it with INSTRUCTION ... END");
        assert_eq!(
            diag.to_string(),
            "error: unknown instruction \"fly\"\n  = help: define it with INSTRUCTION ... END"
        );
    }

    #[test]
    fn bag_counts_by_severity() {
        let mut bag = DiagnosticBag::new();
        assert!(bag.is_empty());
        bag.warning("instruction \"hop\" is never called", at(3, 15));
        assert!(!bag.has_errors());
        bag.error("illegal token \";\"", at(5, 9));
        assert!(bag.has_errors());
        assert_eq!((bag.error_count(), bag.warning_count()), (1, 1));
        assert_eq!(
            bag.diagnostics()[0].to_string(),
            "a.bl:3:15: warning: instruction \"hop\" is never called"
        );
    }
}
