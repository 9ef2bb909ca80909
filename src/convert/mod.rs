pub mod fence;
pub mod regions;

use crate::config::{CompiledLanguage, ConfigTable};
use crate::errors::{Lit2mdError, Result};
use crate::output::write_atomic;
use crate::types::{ConversionJob, ConvertedFile};
use fence::render_markdown;
use log::debug;
use regions::split_regions;
use std::ffi::OsStr;
use std::fs;
use std::path::{Path, PathBuf};

/// Line ending used for lines the converter adds itself.
pub const NATIVE_LINE_ENDING: &str = if cfg!(windows) { "\r\n" } else { "\n" };

/// What happened to a single file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConvertOutcome {
    Converted(ConvertedFile),
    /// The extension has no entry in the config table.
    Skipped,
}

/// Extension text without the dot, if it is valid UTF-8.
pub fn extension_of(path: &Path) -> Option<&str> {
    path.extension().and_then(OsStr::to_str)
}

/// Where the Markdown for `path` goes: same place, `.md` extension.
pub fn output_path_for(path: &Path) -> PathBuf {
    path.with_extension("md")
}

/// Rewrites literate files into Markdown using a shared, read-only config table.
#[derive(Debug, Clone, Copy)]
pub struct Converter<'a> {
    table: &'a ConfigTable,
    line_ending: &'static str,
}

impl<'a> Converter<'a> {
    pub fn new(table: &'a ConfigTable) -> Self {
        Converter {
            table,
            line_ending: NATIVE_LINE_ENDING,
        }
    }

    /// Pin the line ending used for inserted fence lines.
    pub fn with_line_ending(mut self, line_ending: &'static str) -> Self {
        self.line_ending = line_ending;
        self
    }

    pub fn table(&self) -> &'a ConfigTable {
        self.table
    }

    pub fn language_for(&self, path: &Path) -> Option<&'a CompiledLanguage> {
        extension_of(path).and_then(|ext| self.table.lookup(ext))
    }

    /// Convert text already in memory. `None` when `extension` is not configured.
    pub fn convert_text(&self, extension: &str, text: &str) -> Option<String> {
        let language = self.table.lookup(extension)?;
        Some(self.render(language, text))
    }

    fn render(&self, language: &CompiledLanguage, text: &str) -> String {
        let regions = split_regions(text, language, self.line_ending);
        render_markdown(&regions, language.fence_tag(), self.line_ending)
    }

    /// Convert `input` and write the result to exactly `output`.
    ///
    /// Files whose extension is not configured are skipped without touching the disk.
    pub fn convert(&self, input: &Path, output: &Path) -> Result<ConvertOutcome> {
        let language = match self.language_for(input) {
            Some(language) => language,
            None => {
                debug!("Skipping unconfigured extension: {}", input.display());
                return Ok(ConvertOutcome::Skipped);
            }
        };

        let text = fs::read_to_string(input).map_err(|e| Lit2mdError::from_read(input, e))?;
        let markdown = self.render(language, &text);

        if let Some(parent) = output.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|e| Lit2mdError::from_write(parent, e))?;
        }
        write_atomic(output, markdown.as_bytes())?;

        Ok(ConvertOutcome::Converted(ConvertedFile {
            input: input.to_path_buf(),
            output: output.to_path_buf(),
        }))
    }

    pub fn convert_job(&self, job: &ConversionJob) -> Result<ConvertOutcome> {
        self.convert(&job.input, &job.output)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::LanguageConfig;
    use pretty_assertions::assert_eq;
    use std::collections::BTreeMap;
    use tempfile::TempDir;

    fn foo_table() -> ConfigTable {
        let mut entries = BTreeMap::new();
        entries.insert("foo".to_string(), LanguageConfig::new("/*", "*/", Some("c")));
        entries.insert("bar".to_string(), LanguageConfig::new("/*", "*/", None));
        ConfigTable::from_entries(entries, false).unwrap()
    }

    #[test]
    fn test_leading_prose_then_code() {
        let table = foo_table();
        let converter = Converter::new(&table).with_line_ending("\n");
        let out = converter
            .convert_text("foo", "/*\nHello prose.\n*/\nint x = 1;\n")
            .unwrap();
        assert_eq!(out, "Hello prose.\n\n```c\nint x = 1;\n```\n");
    }

    #[test]
    fn test_no_delimiters_is_wrapped() {
        let table = foo_table();
        let converter = Converter::new(&table).with_line_ending("\n");
        assert_eq!(
            converter.convert_text("foo", "int x = 1;").unwrap(),
            "```c\nint x = 1;\n```\n"
        );
    }

    #[test]
    fn test_tag_defaults_to_extension() {
        let table = foo_table();
        let converter = Converter::new(&table).with_line_ending("\n");
        assert_eq!(
            converter.convert_text("bar", "x").unwrap(),
            "```bar\nx\n```\n"
        );
    }

    #[test]
    fn test_unconfigured_extension_text() {
        let table = foo_table();
        let converter = Converter::new(&table);
        assert_eq!(converter.convert_text("txt", "anything"), None);
    }

    #[test]
    fn test_interior_spacing_is_normalized() {
        let table = foo_table();
        let converter = Converter::new(&table).with_line_ending("\n");
        let input = "a;\n/*\n\n\nOne.\n\n\n*/\n\n\nb;\n\n\n\n/*\nTwo.\n*/";
        assert_eq!(
            converter.convert_text("foo", input).unwrap(),
            "```c\na;\n```\n\nOne.\n\n```c\nb;\n```\n\nTwo.\n"
        );
    }

    #[test]
    fn test_crlf_kept_inside_spans() {
        let table = foo_table();
        let converter = Converter::new(&table).with_line_ending("\r\n");
        assert_eq!(
            converter
                .convert_text("foo", "/*\r\nP1\r\nP2\r\n*/\r\nc1;\r\nc2;\r\n")
                .unwrap(),
            "P1\r\nP2\r\n\r\n```c\r\nc1;\r\nc2;\r\n```\r\n"
        );
    }

    #[test]
    fn test_prose_markdown_is_copied_as_written() {
        let table = foo_table();
        let converter = Converter::new(&table).with_line_ending("\n");
        assert_eq!(
            converter
                .convert_text("foo", "/*\nExample:\n```\n*/\nint x;\n")
                .unwrap(),
            "Example:\n```\n\n```c\nint x;\n```\n"
        );
    }

    #[test]
    fn test_output_path_for() {
        assert_eq!(output_path_for(Path::new("a/b/c.foo")), PathBuf::from("a/b/c.md"));
        assert_eq!(output_path_for(Path::new("noext")), PathBuf::from("noext.md"));
    }

    #[test]
    fn test_convert_writes_file() {
        let table = foo_table();
        let converter = Converter::new(&table).with_line_ending("\n");
        let dir = TempDir::new().unwrap();
        let input = dir.path().join("x.foo");
        let output = dir.path().join("out").join("nested").join("x.md");
        fs::write(&input, "int x = 1;\n").unwrap();

        let outcome = converter.convert(&input, &output).unwrap();
        assert_eq!(
            outcome,
            ConvertOutcome::Converted(ConvertedFile {
                input: input.clone(),
                output: output.clone(),
            })
        );
        assert_eq!(fs::read_to_string(&output).unwrap(), "```c\nint x = 1;\n```\n");
    }

    #[test]
    fn test_convert_skips_without_output() {
        let table = foo_table();
        let converter = Converter::new(&table);
        let dir = TempDir::new().unwrap();
        let input = dir.path().join("notes.txt");
        let output = dir.path().join("notes.md");
        fs::write(&input, "plain").unwrap();

        assert_eq!(converter.convert(&input, &output).unwrap(), ConvertOutcome::Skipped);
        assert!(!output.exists());
    }

    #[test]
    fn test_convert_missing_input_is_not_found() {
        let table = foo_table();
        let converter = Converter::new(&table);
        let dir = TempDir::new().unwrap();
        let err = converter
            .convert(&dir.path().join("gone.foo"), &dir.path().join("gone.md"))
            .unwrap_err();
        assert!(matches!(err, Lit2mdError::NotFound { .. }));
        assert!(!dir.path().join("gone.md").exists());
    }

    #[test]
    fn test_convert_non_utf8_is_read_failure() {
        let table = foo_table();
        let converter = Converter::new(&table);
        let dir = TempDir::new().unwrap();
        let input = dir.path().join("bin.foo");
        fs::write(&input, [0xff, 0xfe, 0x00, 0x81]).unwrap();

        let err = converter.convert(&input, &dir.path().join("bin.md")).unwrap_err();
        assert!(matches!(err, Lit2mdError::ReadFailure { .. }));
        assert!(!dir.path().join("bin.md").exists());
    }
}
