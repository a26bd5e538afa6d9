use eyre::Result;
use odysseyc::{Odysseyc, OdysseycError, Stage};
use std::io::Write;
use test_log::test;

fn odysseyc() -> Odysseyc {
    Odysseyc::builder().build().expect("default settings are valid")
}

#[test]
fn compiles_program_into_main() {
    let compilation = odysseyc().compile_source("let x = 2; let y = x * 3;");
    assert!(compilation.is_success(), "{}", compilation.diagnostics());
    assert_eq!(compilation.stage(), Stage::Complete);
    assert_eq!(compilation.exit_code(), 0);
    let module = compilation.module().expect("module should exist");
    assert_eq!(
        module.to_string(),
        "\
; ModuleID = 'main'

define i32 @main() {
entry:
  %0 = mul i32 2, 3
  ret i32 %0
}
"
    );
}

#[test]
fn empty_program_returns_void() {
    let compilation = odysseyc().compile_source("# nothing here\n");
    assert!(compilation.is_success());
    assert_eq!(
        compilation.module().map(|m| m.listing()).as_deref(),
        Some("ret void")
    );
}

#[test]
fn comparison_result_is_a_double() {
    let compilation = odysseyc().compile_source("let small = 1 < 2;");
    let module = compilation.module().expect("module should exist");
    assert_eq!(
        module.function("main").map(|f| f.ret().to_string()).as_deref(),
        Some("double")
    );
}

#[test]
fn strings_become_globals() {
    let compilation = odysseyc().compile_source("let greeting = \"hello\";");
    assert!(compilation.is_success());
    let ir = compilation.module().expect("module should exist").to_string();
    assert!(ir.contains("@.str.0 = private constant [6 x i8] c\"hello\\00\""));
    assert!(ir.contains("ret ptr @.str.0"));
}

#[test]
fn stops_after_lexing() {
    let compilation = odysseyc().compile_source("let x = \"abc");
    assert_eq!(compilation.stage(), Stage::Lexing);
    assert_eq!(compilation.diagnostics().len(), 1);
    assert!(compilation.diagnostics().mentions("unterminated string"));
    assert!(compilation.ast().is_none());
    assert!(compilation.module().is_none());
    assert_eq!(compilation.exit_code(), 1);
}

#[test]
fn stops_after_parsing() {
    let compilation = odysseyc().compile_source("let = 3;");
    assert_eq!(compilation.stage(), Stage::Parsing);
    assert!(compilation.module().is_none());
    assert_eq!(compilation.exit_code(), 1);
}

#[test]
fn parse_diagnostics_stop_even_with_an_ast() {
    let compilation = odysseyc().compile_source("let x = 1");
    assert_eq!(compilation.stage(), Stage::Parsing);
    assert!(compilation.ast().is_some());
    assert!(compilation.module().is_none());
}

#[test]
fn lowering_failure_keeps_partial_module() {
    let compilation = odysseyc().compile_source("let a = 1 + 2; let b = 1 + 1.0;");
    assert_eq!(compilation.stage(), Stage::Lowering);
    assert!(!compilation.is_success());
    assert_eq!(compilation.exit_code(), 1);
    assert!(compilation
        .diagnostics()
        .mentions("arguments of different types provided to binary expression"));
    let module = compilation.module().expect("partial module is kept");
    assert_eq!(module.listing(), "%0 = add i32 1, 2\nret i32 %0");
}

#[test]
fn recovery_reports_every_bad_declaration() {
    let source = "let = 1; let x = 2; let = 3;";
    let without = odysseyc().compile_source(source);
    assert_eq!(without.diagnostics().len(), 1);

    let with = Odysseyc::builder()
        .recover(true)
        .build()
        .expect("valid settings")
        .compile_source(source);
    assert_eq!(with.diagnostics().len(), 2);
    assert_eq!(with.stage(), Stage::Parsing);
    assert_eq!(with.ast().map(|ast| ast.len()), Some(1));
}

#[test]
fn custom_module_and_entry_point() -> Result<()> {
    let compilation = Odysseyc::builder()
        .module_name("demo")
        .entry_point("start")
        .build()?
        .compile_source("let x = 1;");
    let ir = compilation.module().expect("module should exist").to_string();
    assert!(ir.starts_with("; ModuleID = 'demo'"));
    assert!(ir.contains("define i32 @start()"));
    Ok(())
}

#[test]
fn compiles_file() -> Result<()> {
    let mut file = tempfile::NamedTempFile::new()?;
    writeln!(file, "let x = 4;")?;
    writeln!(file, "let y = x / 2;")?;
    let compilation = odysseyc().compile_file(file.path())?;
    assert!(compilation.is_success());
    assert_eq!(
        compilation.module().map(|m| m.listing()).as_deref(),
        Some("%0 = sdiv i32 4, 2\nret i32 %0")
    );
    Ok(())
}

#[test]
fn missing_file_is_an_error() -> Result<()> {
    let dir = tempfile::tempdir()?;
    let result = odysseyc().compile_file(dir.path().join("missing.ody"));
    assert!(matches!(result, Err(OdysseycError::Read { .. })));
    Ok(())
}
