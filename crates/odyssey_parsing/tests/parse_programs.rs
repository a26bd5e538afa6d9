use odyssey_parsing::lexer::Lexer;
use odyssey_parsing::parser::Parser;
use odyssey_tokens::{DiagnosticKind, Located, TokenKind};
use test_log::test;

const PROGRAM: &str = r#"
# declarations across several lines
let width = 3;
let height = width * (2 + 1);
let ratio = 1.5 / 3.0;
let name = "odyssey";
let flag = 1 < 2;
let later;
"#;

#[test]
fn parses_multi_line_program() {
    let lexed = Lexer::new(PROGRAM).lex();
    assert!(lexed.diagnostics.is_empty(), "{}", lexed.diagnostics);
    let mut parser = Parser::new(lexed.tokens);
    let program = parser.parse().expect("program should parse");
    assert!(parser.diagnostics().is_empty());

    let printed = program.iter().map(ToString::to_string).collect::<Vec<_>>();
    assert_eq!(
        printed,
        [
            "(let width 3)",
            "(let height (* width (group (+ 2 1))))",
            "(let ratio (/ 1.5 3.0))",
            "(let name \"odyssey\")",
            "(let flag (< 1 2))",
            "(let later)",
        ]
    );
    assert_eq!(program[1].location().line, 4);
}

#[test]
fn parsing_is_deterministic() {
    let first = Parser::new(Lexer::new(PROGRAM).lex().tokens).parse();
    let second = Parser::new(Lexer::new(PROGRAM).lex().tokens).parse();
    assert_eq!(first, second);
}

#[test]
fn variable_reference_in_expression() {
    // at the top level this is an unbound expression
    let mut parser = Parser::new(Lexer::new("let x = 5; x + 1").lex().tokens);
    assert!(parser.parse().is_none());
    assert!(parser.diagnostics().mentions("unbound expression"));

    let mut parser = Parser::new(Lexer::new("x + 1").lex().tokens);
    let expr = parser.parse_expression().expect("should parse");
    assert_eq!(expr.to_string(), "(+ x 1)");
}

#[test]
fn lexical_and_syntactic_diagnostics_are_distinct() {
    let lexed = Lexer::new("let x = 1 $ 2;").lex();
    assert_eq!(lexed.diagnostics.as_slice()[0].kind(), DiagnosticKind::Lexical);
    assert!(lexed.tokens.last().is_some_and(|t| t.is(TokenKind::Eof)));

    let mut parser = Parser::new(lexed.tokens);
    parser.parse();
    assert!(parser
        .diagnostics()
        .iter()
        .all(|d| d.kind() == DiagnosticKind::Syntactic));
}
