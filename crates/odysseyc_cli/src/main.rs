use crate::args::{Args, Emit};
use clap::Parser;
use eyre::WrapErr;
use itertools::Itertools;
use odyssey_tokens::Diagnostics;
use odysseyc::{Compilation, Odysseyc};
use owo_colors::{OwoColorize, Stream};
use std::process::ExitCode;
use tracing::metadata::LevelFilter;
use tracing::{debug, info, trace};
use tracing_error::ErrorLayer;
use tracing_subscriber::fmt::format;
use tracing_subscriber::prelude::*;
use tracing_subscriber::Registry;

mod args;

fn main() -> eyre::Result<ExitCode> {
    color_eyre::install()?;
    let args = Args::parse();
    init_logging(args.log_level_filter())?;
    trace!("starting odc with args: {args:?}");
    debug!("odc version: {}", env!("CARGO_PKG_VERSION"));

    let odysseyc = Odysseyc::builder()
        .module_name(&args.module_name)
        .recover(args.recover)
        .dump_tokens(args.emit == Emit::Tokens)
        .build()?;
    let compilation = odysseyc.compile_file(&args.file)?;
    report(compilation.diagnostics());
    info!("compilation stopped at stage {}", compilation.stage());

    if let Some(artifact) = artifact(&compilation, args.emit) {
        match &args.output {
            Some(path) => std::fs::write(path, artifact)
                .wrap_err_with(|| format!("could not write output to {path:?}"))?,
            None => print!("{artifact}"),
        }
    }

    Ok(ExitCode::from(compilation.exit_code()))
}

/// Prints every diagnostic to stderr
fn report(diagnostics: &Diagnostics) {
    for diagnostic in diagnostics {
        eprintln!(
            "{} {diagnostic}",
            "error:".if_supports_color(Stream::Stderr, |text| text.red())
        );
    }
}

/// Renders the requested artifact from as far as the compilation got. A module from a failed
/// lowering is still rendered.
fn artifact(compilation: &Compilation, emit: Emit) -> Option<String> {
    match emit {
        Emit::Tokens => Some(
            compilation
                .tokens()
                .iter()
                .map(|token| format!("{token}\n"))
                .join(""),
        ),
        Emit::Ast => compilation
            .ast()
            .map(|ast| ast.iter().map(|stmt| format!("{stmt}\n")).join("")),
        Emit::Ir => compilation.module().map(|module| module.to_string()),
    }
}

fn init_logging(level_filter: LevelFilter) -> eyre::Result<()> {
    // stdout only carries the emitted artifact
    let registry = Registry::default()
        .with(
            tracing_subscriber::fmt::layer()
                .event_format(format().without_time())
                .with_writer(std::io::stderr)
                .with_filter(level_filter),
        )
        .with(ErrorLayer::default());

    tracing::subscriber::set_global_default(registry)?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn compile(src: &str) -> Compilation {
        Odysseyc::builder().build().unwrap().compile_source(src)
    }

    #[test]
    fn test_ast_artifact() {
        let compilation = compile("let x = 1 + 2; let y;");
        assert_eq!(
            artifact(&compilation, Emit::Ast).as_deref(),
            Some("(let x (+ 1 2))\n(let y)\n")
        );
    }

    #[test]
    fn test_token_artifact_after_lexing_failure() {
        let compilation = compile("let $");
        let tokens = artifact(&compilation, Emit::Tokens).expect("tokens are always available");
        assert_eq!(tokens.lines().count(), 2);
        assert!(tokens.contains("Let"));
        assert_eq!(artifact(&compilation, Emit::Ir), None);
    }

    #[test]
    fn test_partial_ir_artifact() {
        let compilation = compile("let x = 1 * 2; let y = true + false;");
        assert_eq!(compilation.exit_code(), 1);
        let ir = artifact(&compilation, Emit::Ir).expect("partial module is kept");
        assert!(ir.contains("%0 = mul i32 1, 2"));
    }
}
