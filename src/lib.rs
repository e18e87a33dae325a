//! # Lua Stub Generator Library
//!
//! Core functionality for regenerating the Lua intellisense stub file that
//! gives plugin authors editor completion for the Quaver scripting API.
//! The source of truth is hand-written C# in two external repositories;
//! the output is a derived, regenerable artifact with no runtime behavior.
//!
//! ## Quick Example
//!
//! ```
//! use lua_stubgen::extract::{BodyExtractor, DeclKind};
//!
//! let source = "namespace Quaver.API.Enums\n\
//! {\n\
//! \x20   public enum GameMode\n\
//! \x20   {\n\
//! \x20       // 4 keys\n\
//! \x20       Keys4 = 1\n\
//! \x20   }\n\
//! }\n";
//!
//! let extractor = BodyExtractor::new().unwrap();
//! let body = extractor.extract_body(source, DeclKind::Enum).unwrap();
//! assert_eq!(body, "{\n    -- 4 keys\n    Keys4 = 1\n}");
//! ```
//!
//! ## Pipeline
//!
//! Three stages, run sequentially by the `generate` command:
//!
//! 1. **Repository sync (`git`)**: each configured source repository is
//!    shallow-cloned if absent or fast-forwarded if present.
//! 2. **Extraction (`patterns`, `extract`)**: for each configured
//!    descriptor, the relevant brace-delimited declaration body is located,
//!    comment syntax is converted, and members are matched with a small
//!    permissive pattern library.
//! 3. **Emission (`generate`)**: enum bodies become Lua table literals,
//!    class members become default-value assignments and no-op function
//!    stubs, and everything is concatenated into one timestamped document.
//!
//! Extraction misses are skipped silently, by design: the patterns are tied
//! to the upstream formatting convention, and a declaration they cannot see
//! simply produces no completion hint.

pub mod config;
pub mod error;
pub mod extract;
pub mod generate;
pub mod git;
pub mod output;
pub mod patterns;
