//! Lexing and parsing of odyssey source text.
//!
//! Both stages are batch and best-effort: they never stop on the first problem they see but
//! record it as a [Diagnostic](odyssey_tokens::Diagnostic) and keep going where they can.
//!
//! ```
//! use odyssey_parsing::lexer::Lexer;
//! use odyssey_parsing::parser::Parser;
//!
//! let lexed = Lexer::new("let x = 1 + 2;").lex();
//! assert!(lexed.diagnostics.is_empty());
//! let mut parser = Parser::new(lexed.tokens);
//! let program = parser.parse().expect("should parse");
//! assert_eq!(program[0].to_string(), "(let x (+ 1 2))");
//! ```

pub mod lexer;
pub mod parser;
