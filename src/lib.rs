//! lit2md: turn a tree of literate source files into Markdown.
//!
//! Prose blocks delimited by a language's comment markers become plain Markdown and
//! everything between them becomes fenced code, tagged with the language.

pub mod config;
pub mod convert;
pub mod errors;
pub mod output;
pub mod types;
pub mod walk;

pub use config::{CompiledLanguage, ConfigTable};
pub use convert::{output_path_for, ConvertOutcome, Converter};
pub use errors::{Lit2mdError, Result};
pub use types::{ConversionJob, ConvertedFile, LanguageConfig, Region, RegionKind};
pub use walk::{plan, walk, WalkPlan, WalkReport};
