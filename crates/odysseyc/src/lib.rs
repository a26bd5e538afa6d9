//! The odyssey compiler: runs source text through lexing, parsing and lowering into an
//! [odyssey_ir::Module].
//!
//! ```
//! use odysseyc::Odysseyc;
//!
//! let odysseyc = Odysseyc::builder().build().expect("default settings are valid");
//! let compilation = odysseyc.compile_source("let x = 1 + 2;");
//! assert!(compilation.is_success());
//! ```

pub mod backend;
mod compiler;
pub mod lowering;
pub mod symbols;

pub use compiler::*;
