use serde::Deserialize;
use std::path::PathBuf;

/// Delimiters for one source extension, as written in `lit2md.yml`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct LanguageConfig {
    /// Text that starts a prose block.
    pub open: String,
    /// Text that ends a prose block.
    pub close: String,
    /// Fence tag; the extension itself when absent.
    #[serde(default)]
    pub lang: Option<String>,
}

impl LanguageConfig {
    pub fn new(open: &str, close: &str, lang: Option<&str>) -> Self {
        LanguageConfig {
            open: open.to_string(),
            close: close.to_string(),
            lang: lang.map(str::to_string),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RegionKind {
    Prose,
    Code,
}

/// A run of prose or code cut out of a literate file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Region {
    pub kind: RegionKind,
    pub text: String,
}

/// One file the walker decided to convert.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConversionJob {
    pub input: PathBuf,
    pub output: PathBuf,
}

/// A file that was written successfully
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConvertedFile {
    pub input: PathBuf,
    pub output: PathBuf,
}
