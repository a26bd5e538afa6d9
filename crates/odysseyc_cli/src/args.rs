//! the args for running odc

use clap::{value_parser, ArgAction, ValueEnum};
use std::path::PathBuf;
use tracing::level_filters::LevelFilter;

/// The args struct
#[derive(Debug, clap::Parser)]
#[clap(author, version, about = "Compiles odyssey code into IR")]
pub struct Args {
    #[command(flatten)]
    logging: LoggingArgs,

    /// The source file to compile
    #[clap(value_name = "source file", value_hint = clap::ValueHint::FilePath)]
    pub file: PathBuf,
    /// Write the output to this file instead of stdout
    #[clap(short = 'o', long = "output")]
    pub output: Option<PathBuf>,
    /// What to print once compilation succeeds
    #[clap(long, value_enum, default_value_t = Emit::Ir)]
    pub emit: Emit,
    /// Keep parsing after a malformed declaration, reporting every one
    #[clap(long)]
    pub recover: bool,
    /// The name of the generated module
    #[clap(long, default_value = "main")]
    pub module_name: String,
}

impl Args {
    pub fn log_level_filter(&self) -> LevelFilter {
        self.logging.log_level_filter()
    }
}

/// The artifact to emit
#[derive(Debug, Copy, Clone, PartialEq, Eq, ValueEnum)]
pub enum Emit {
    /// the scanned tokens, one per line
    Tokens,
    /// the syntax tree as s-expressions, one declaration per line
    Ast,
    /// the generated module
    Ir,
}

/// Common way to set logging levels
#[derive(Debug, Clone, Copy, clap::Args)]
pub struct LoggingArgs {
    #[clap(short = 'v', value_parser = value_parser!(u8).range(0..=2), action = ArgAction::Count, conflicts_with = "quiet")]
    verbose: u8,
    #[clap(short = 'q', value_parser = value_parser!(u8).range(0..=2), action = ArgAction::Count, conflicts_with = "verbose")]
    quiet: u8,
}

impl LoggingArgs {
    /// Gets the logging level based on whether `-v[v]` or `-q[q]` has been used
    pub fn log_level_filter(&self) -> LevelFilter {
        match self.verbose as i8 - self.quiet as i8 {
            i8::MIN..=-2 => LevelFilter::OFF,
            -1 => LevelFilter::ERROR,
            0 => LevelFilter::INFO,
            1 => LevelFilter::DEBUG,
            2..=i8::MAX => LevelFilter::TRACE,
        }
    }
}
