//! Responsible for running source text through every stage of the compiler

use crate::backend::Backend;
use crate::lowering::Lowering;
use odyssey_ast::Stmt;
use odyssey_ir::{IrBuilder, Module};
use odyssey_parsing::lexer::Lexer;
use odyssey_parsing::parser::Parser;
use odyssey_tokens::{Diagnostic, Diagnostics, Located, Location, Token, TokenKind};
use std::fmt::{Display, Formatter};
use std::path::Path;
use tracing::{debug, debug_span, info_span};

pub mod error;

pub use error::{BuildOdysseycError, OdysseycError, OdysseycResult};

/// Runs odyssey source through lexing, parsing and lowering.
///
/// Must be configured using an [OdysseycBuilder].
#[derive(Debug)]
pub struct Odysseyc {
    module_name: String,
    entry_point: String,
    recover: bool,
    dump_tokens: bool,
}

impl Odysseyc {
    /// Creates the default OdysseycBuilder
    #[inline]
    pub fn builder() -> OdysseycBuilder {
        OdysseycBuilder::new()
    }

    /// Compiles the file at a given path
    pub fn compile_file(&self, path: impl AsRef<Path>) -> OdysseycResult<Compilation> {
        let path = path.as_ref();
        let _span = info_span!("compile", path = ?path).entered();
        let source = std::fs::read_to_string(path).map_err(|source| OdysseycError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(self.compile_source(&source))
    }

    /// Compiles source text. Stops after the first stage that reports a diagnostic.
    pub fn compile_source(&self, source: &str) -> Compilation {
        let lexed = debug_span!("lex").in_scope(|| Lexer::new(source).lex());
        if self.dump_tokens {
            for token in &lexed.tokens {
                debug!(?token, "token");
            }
        }
        let mut compilation = Compilation {
            stage: Stage::Lexing,
            tokens: lexed.tokens.iter().map(TokenRecord::from).collect(),
            ast: None,
            module: None,
            diagnostics: lexed.diagnostics,
        };
        if !compilation.diagnostics.is_empty() {
            return compilation;
        }

        compilation.stage = Stage::Parsing;
        let (ast, diagnostics) = debug_span!("parse").in_scope(|| {
            let mut parser = Parser::new(lexed.tokens).with_recovery(self.recover);
            let ast = parser.parse();
            (ast, parser.into_diagnostics())
        });
        compilation.ast = ast;
        compilation.diagnostics.extend(diagnostics);
        let Some(program) = compilation.ast.as_deref() else {
            return compilation;
        };
        if !compilation.diagnostics.is_empty() {
            return compilation;
        }

        compilation.stage = Stage::Lowering;
        let mut builder = IrBuilder::new(&self.module_name);
        let diagnostics = generate(&mut builder, &self.entry_point, program);
        compilation.module = Some(builder.finish());
        if diagnostics.is_empty() {
            compilation.stage = Stage::Complete;
        }
        compilation.diagnostics.extend(diagnostics);
        compilation
    }
}

/// Emits a program into the entry point function of a backend, returning the problems found.
///
/// The function returns the value of the last statement that produced one, or nothing.
pub fn generate<B: Backend>(backend: &mut B, entry_point: &str, program: &[Stmt]) -> Diagnostics {
    let mut diagnostics = Diagnostics::new();
    let function = backend.get_or_declare_function(entry_point);
    let positioned = backend
        .append_block(function, "entry")
        .and_then(|entry| backend.position_at_end(entry));
    if let Err(error) = positioned {
        diagnostics.push(Diagnostic::semantic(
            Location::default(),
            format!("backend rejected instruction: {error}"),
        ));
        return diagnostics;
    }

    let mut lowering = Lowering::new(backend);
    let last = lowering.lower_program(program);
    let (lowered, _) = lowering.into_parts();
    diagnostics.extend(lowered);

    if let Err(error) = backend.ret(last) {
        let location = program.last().map(|s| s.location()).unwrap_or_default();
        diagnostics.push(Diagnostic::semantic(
            location,
            format!("backend rejected instruction: {error}"),
        ));
    }
    diagnostics
}

/// Builder for creating an [Odysseyc] instance.
#[derive(Debug)]
pub struct OdysseycBuilder {
    module_name: String,
    entry_point: String,
    recover: bool,
    dump_tokens: bool,
}

impl OdysseycBuilder {
    /// Creates an OdysseycBuilder with default settings
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the name of the generated module
    pub fn module_name(mut self, name: impl Into<String>) -> Self {
        self.module_name = name.into();
        self
    }

    /// Sets the name of the function the program is emitted into
    pub fn entry_point(mut self, name: impl Into<String>) -> Self {
        self.entry_point = name.into();
        self
    }

    /// Skip failed declarations and keep parsing instead of stopping at the first
    pub fn recover(mut self, recover: bool) -> Self {
        self.recover = recover;
        self
    }

    /// Log every scanned token at debug level
    pub fn dump_tokens(mut self, dump_tokens: bool) -> Self {
        self.dump_tokens = dump_tokens;
        self
    }

    /// Builds an [Odysseyc] instance from this builder
    pub fn build(self) -> Result<Odysseyc, BuildOdysseycError> {
        if self.module_name.is_empty() {
            return Err(BuildOdysseycError::EmptyModuleName);
        }
        if self.entry_point.is_empty() {
            return Err(BuildOdysseycError::EmptyEntryPoint);
        }
        Ok(Odysseyc {
            module_name: self.module_name,
            entry_point: self.entry_point,
            recover: self.recover,
            dump_tokens: self.dump_tokens,
        })
    }
}

impl Default for OdysseycBuilder {
    fn default() -> Self {
        Self {
            module_name: "main".to_string(),
            entry_point: "main".to_string(),
            recover: false,
            dump_tokens: false,
        }
    }
}

/// The stage a compilation reached
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, strum::Display)]
#[strum(serialize_all = "lowercase")]
pub enum Stage {
    Lexing,
    Parsing,
    Lowering,
    /// every stage ran without diagnostics
    Complete,
}

/// A scanned token that outlives its source
#[derive(Debug, Clone, PartialEq)]
pub struct TokenRecord {
    pub kind: TokenKind,
    pub lexeme: String,
    pub location: Location,
}

impl From<&Token<'_>> for TokenRecord {
    fn from(token: &Token<'_>) -> Self {
        Self {
            kind: token.kind(),
            lexeme: token.lexeme().to_string(),
            location: token.location(),
        }
    }
}

impl Display for TokenRecord {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{:<10} {:?} {:?}",
            self.location.to_string(),
            self.kind,
            self.lexeme
        )
    }
}

/// Everything a run of the compiler produced, up to the stage it stopped at
#[derive(Debug)]
pub struct Compilation {
    stage: Stage,
    tokens: Vec<TokenRecord>,
    ast: Option<Vec<Stmt>>,
    module: Option<Module>,
    diagnostics: Diagnostics,
}

impl Compilation {
    /// The stage this compilation stopped at, or [Stage::Complete]
    pub fn stage(&self) -> Stage {
        self.stage
    }

    pub fn diagnostics(&self) -> &Diagnostics {
        &self.diagnostics
    }

    pub fn tokens(&self) -> &[TokenRecord] {
        &self.tokens
    }

    pub fn ast(&self) -> Option<&[Stmt]> {
        self.ast.as_deref()
    }

    /// The generated module. Present once lowering started, even if lowering failed.
    pub fn module(&self) -> Option<&Module> {
        self.module.as_ref()
    }

    pub fn is_success(&self) -> bool {
        self.stage == Stage::Complete && self.diagnostics.is_empty()
    }

    /// The process exit code for this compilation
    pub fn exit_code(&self) -> u8 {
        if self.is_success() {
            0
        } else {
            1
        }
    }
}
