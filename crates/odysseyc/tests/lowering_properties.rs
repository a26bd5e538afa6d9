use odyssey_ast::Stmt;
use odyssey_ir::IrBuilder;
use odyssey_parsing::lexer::Lexer;
use odyssey_parsing::parser::Parser;
use odysseyc::generate;
use odysseyc::lowering::Lowering;
use test_log::test;

fn parse(src: &str) -> Vec<Stmt> {
    let lexed = Lexer::new(src).lex();
    assert!(lexed.diagnostics.is_empty(), "{}", lexed.diagnostics);
    let mut parser = Parser::new(lexed.tokens);
    let program = parser.parse().expect("test program should parse");
    assert!(parser.diagnostics().is_empty(), "{}", parser.diagnostics());
    program
}

/// Renders the module generated for a program
fn ir(src: &str) -> String {
    let mut builder = IrBuilder::new("main");
    let diagnostics = generate(&mut builder, "main", &parse(src));
    assert!(diagnostics.is_empty(), "{diagnostics}");
    builder.finish().to_string()
}

#[test]
fn grouping_matches_precedence() {
    assert_eq!(ir("let r = 1 + 2 * 3;"), ir("let r = 1 + (2 * 3);"));
    assert_ne!(ir("let r = 1 + 2 * 3;"), ir("let r = (1 + 2) * 3;"));
}

#[test]
fn addition_is_left_associative() {
    assert_eq!(ir("let r = 1 + 2 + 3;"), ir("let r = (1 + 2) + 3;"));
    assert_ne!(ir("let r = 1 + 2 + 3;"), ir("let r = 1 + (2 + 3);"));
}

#[test]
fn negation_is_subtraction_from_zero() {
    assert_eq!(ir("let r = -5;"), ir("let r = 0 - 5;"));
    assert_eq!(ir("let r = -2.5;"), ir("let r = 0.0 - 2.5;"));
}

#[test]
fn mismatched_operands_emit_nothing() {
    let program = parse("let r = 1 + 1.0;");
    let mut builder = IrBuilder::new("main");
    let main = builder.get_or_declare_function("main");
    let entry = builder.append_block(main, "entry").unwrap();
    builder.position_at_end(entry).unwrap();

    let mut lowering = Lowering::new(&mut builder);
    assert_eq!(lowering.lower_program(&program), None);
    assert!(lowering.had_error());
    assert!(lowering
        .diagnostics()
        .mentions("arguments of different types provided to binary expression; implicit casts not allowed"));
    assert_eq!(builder.module().instruction_count(), 0);
}

#[test]
fn declared_variables_resolve() {
    let program = ir("let x = 5; let y = x + 1;");
    assert!(program.contains("%0 = add i32 5, 1"));
}

#[test]
fn undeclared_variables_do_not_resolve() {
    let mut builder = IrBuilder::new("main");
    let diagnostics = generate(&mut builder, "main", &parse("let y = x + 1;"));
    assert!(diagnostics.mentions("variable not given a value, but used in expression"));
}

#[test]
fn redeclaration_rebinds() {
    let program = ir("let x = 1; let x = 2.0; let y = x * 2.0;");
    assert!(program.contains("%0 = fmul double 2.0, 2.0"));
}

#[test]
fn lowering_twice_is_identical() {
    let source = "let a = 1.5; let b = a < 2.0; let s = \"text\"; let c = -(a * 3.0);";
    let first = ir(source);
    let second = ir(source);
    assert_eq!(first, second);
}
