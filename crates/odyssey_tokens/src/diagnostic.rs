//! Located error records produced by every stage of the pipeline

use crate::location::{Located, Location};
use itertools::Itertools;
use std::fmt::{Display, Formatter};

/// Which stage of the pipeline noticed the problem
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, strum::Display)]
#[strum(serialize_all = "lowercase")]
pub enum DiagnosticKind {
    /// unrecognized characters, unterminated strings
    Lexical,
    /// missing or stray tokens, malformed declarations
    Syntactic,
    /// type mismatches, unbound variables, illegal operators
    Semantic,
}

/// A located, human-readable error
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub struct Diagnostic {
    kind: DiagnosticKind,
    location: Location,
    message: String,
    until_eof: bool,
}

impl Diagnostic {
    /// Creates a new diagnostic
    pub fn new(kind: DiagnosticKind, location: impl Located, message: impl Into<String>) -> Self {
        Self {
            kind,
            location: location.location(),
            message: message.into(),
            until_eof: false,
        }
    }

    pub fn lexical(location: impl Located, message: impl Into<String>) -> Self {
        Self::new(DiagnosticKind::Lexical, location, message)
    }

    pub fn syntactic(location: impl Located, message: impl Into<String>) -> Self {
        Self::new(DiagnosticKind::Syntactic, location, message)
    }

    pub fn semantic(location: impl Located, message: impl Into<String>) -> Self {
        Self::new(DiagnosticKind::Semantic, location, message)
    }

    /// Marks this diagnostic as running from its start to the end of the source
    pub fn until_eof(mut self) -> Self {
        self.until_eof = true;
        self
    }

    pub fn kind(&self) -> DiagnosticKind {
        self.kind
    }

    pub fn line(&self) -> usize {
        self.location.line
    }

    pub fn start(&self) -> usize {
        self.location.start
    }

    pub fn end(&self) -> usize {
        self.location.end
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn runs_until_eof(&self) -> bool {
        self.until_eof
    }
}

impl Located for Diagnostic {
    fn location(&self) -> Location {
        self.location
    }
}

impl Display for Diagnostic {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        // columns are shown 1-based
        if self.until_eof {
            write!(
                f,
                "[line {}] from col {} till the end of file: {}",
                self.location.line,
                self.location.start + 1,
                self.message
            )
        } else {
            write!(
                f,
                "[line {}] from col {} to col {}: {}",
                self.location.line,
                self.location.start + 1,
                self.location.end + 1,
                self.message
            )
        }
    }
}

/// An append-only, ordered collection of [Diagnostic]s
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Diagnostics(Vec<Diagnostic>);

impl Diagnostics {
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a diagnostic
    pub fn push(&mut self, diagnostic: Diagnostic) {
        self.0.push(diagnostic);
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Diagnostic> {
        self.0.iter()
    }

    /// Checks whether any recorded diagnostic contains the given text
    pub fn mentions(&self, text: &str) -> bool {
        self.0.iter().any(|d| d.message.contains(text))
    }

    pub fn as_slice(&self) -> &[Diagnostic] {
        &self.0
    }

    pub fn into_vec(self) -> Vec<Diagnostic> {
        self.0
    }
}

impl Display for Diagnostics {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0.iter().join("\n"))
    }
}

impl Extend<Diagnostic> for Diagnostics {
    fn extend<T: IntoIterator<Item = Diagnostic>>(&mut self, iter: T) {
        self.0.extend(iter)
    }
}

impl FromIterator<Diagnostic> for Diagnostics {
    fn from_iter<T: IntoIterator<Item = Diagnostic>>(iter: T) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl IntoIterator for Diagnostics {
    type Item = Diagnostic;
    type IntoIter = std::vec::IntoIter<Diagnostic>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<'a> IntoIterator for &'a Diagnostics {
    type Item = &'a Diagnostic;
    type IntoIter = std::slice::Iter<'a, Diagnostic>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_within_line() {
        let diagnostic = Diagnostic::lexical(Location::new(3, 4, 5), "unrecognized token in input: $");
        assert_eq!(
            diagnostic.to_string(),
            "[line 3] from col 5 to col 6: unrecognized token in input: $"
        );
    }

    #[test]
    fn test_display_until_eof() {
        let diagnostic = Diagnostic::lexical(Location::new(1, 2, 6), "unterminated string").until_eof();
        assert_eq!(
            diagnostic.to_string(),
            "[line 1] from col 3 till the end of file: unterminated string"
        );
    }

    #[test]
    fn test_sink_keeps_order() {
        let mut diagnostics = Diagnostics::new();
        diagnostics.push(Diagnostic::syntactic(Location::new(1, 0, 1), "first"));
        diagnostics.push(Diagnostic::semantic(Location::new(2, 0, 1), "second"));
        let messages = diagnostics.iter().map(|d| d.message()).collect::<Vec<_>>();
        assert_eq!(messages, ["first", "second"]);
        assert!(diagnostics.mentions("sec"));
        assert_eq!(diagnostics.as_slice()[1].kind(), DiagnosticKind::Semantic);
    }
}
