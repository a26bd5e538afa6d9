//! Lexical building blocks of the odyssey front end.
//!
//! Every stage of the pipeline speaks in terms of the types defined here: the lexer produces
//! [Token]s, every stage reports [Diagnostic]s, and AST nodes remember where they came from
//! through a [Location].

pub mod diagnostic;
pub mod location;
pub mod token;

pub use diagnostic::{Diagnostic, DiagnosticKind, Diagnostics};
pub use location::{Located, Location};
pub use token::{Token, TokenKind};
