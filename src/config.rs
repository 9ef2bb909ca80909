use crate::errors::{Lit2mdError, Result};
use crate::types::LanguageConfig;
use log::info;
use regex::Regex;
use serde::Deserialize;
use std::collections::{BTreeMap, HashMap};
use std::fs;
use std::path::Path;

/// Extensions converted out of the box: (extension, open, close, fence tag).
static BUILTIN_LANGUAGES: &[(&str, &str, &str, &str)] = &[
    // C family
    ("c", "/*", "*/", "c"),
    ("h", "/*", "*/", "c"),
    ("cpp", "/*", "*/", "cpp"),
    ("hpp", "/*", "*/", "cpp"),
    ("cs", "/*", "*/", "csharp"),
    ("java", "/*", "*/", "java"),
    ("js", "/*", "*/", "javascript"),
    ("ts", "/*", "*/", "typescript"),
    ("rs", "/*", "*/", "rust"),
    ("go", "/*", "*/", "go"),
    ("swift", "/*", "*/", "swift"),
    ("kt", "/*", "*/", "kotlin"),
    ("scala", "/*", "*/", "scala"),
    ("css", "/*", "*/", "css"),
    // Docstring-style
    ("py", "\"\"\"", "\"\"\"", "python"),
    // ML family
    ("hs", "{-", "-}", "haskell"),
    ("ml", "(*", "*)", "ocaml"),
    ("lua", "--[[", "]]", "lua"),
    ("html", "<!--", "-->", "html"),
];

/// Config file names looked up in the working directory, first match wins.
pub const CONFIG_FILE_NAMES: &[&str] = &["lit2md.yml", "lit2md.yaml"];

/// Shape of `lit2md.yml`
#[derive(Debug, Deserialize)]
struct Lit2mdConfig {
    /// Per-extension delimiters, keyed without the leading dot.
    #[serde(default)]
    languages: BTreeMap<String, LanguageConfig>,
    /// Keep the built-in table underneath the file's entries.
    #[serde(default = "default_true")]
    defaults: bool,
}

fn default_true() -> bool {
    true
}

/// A [`LanguageConfig`] with its delimiter matcher built.
#[derive(Debug)]
pub struct CompiledLanguage {
    pub config: LanguageConfig,
    fence_tag: String,
    delimiter: Regex,
}

impl CompiledLanguage {
    fn compile(extension: &str, config: LanguageConfig) -> Result<Self> {
        validate(extension, &config)?;

        // A delimiter only counts when it is alone on its line; `\r?` lets CRLF files match.
        let pattern = format!(
            r"(?m)^(?:{}|{})\r?$",
            regex::escape(&config.open),
            regex::escape(&config.close)
        );
        let delimiter = Regex::new(&pattern).map_err(|e| {
            Lit2mdError::Config(format!("bad delimiters for extension '{}': {}", extension, e))
        })?;
        let fence_tag = config
            .lang
            .clone()
            .unwrap_or_else(|| extension.to_string());

        Ok(CompiledLanguage {
            config,
            fence_tag,
            delimiter,
        })
    }

    pub fn open(&self) -> &str {
        &self.config.open
    }

    pub fn close(&self) -> &str {
        &self.config.close
    }

    /// Language tag written after the opening fence.
    pub fn fence_tag(&self) -> &str {
        &self.fence_tag
    }

    /// Matches whole lines holding either delimiter.
    pub fn delimiter(&self) -> &Regex {
        &self.delimiter
    }
}

fn validate(extension: &str, config: &LanguageConfig) -> Result<()> {
    if extension.is_empty() {
        return Err(Lit2mdError::Config("empty extension key".to_string()));
    }
    if extension.starts_with('.') {
        return Err(Lit2mdError::Config(format!(
            "extension '{}' must be written without the leading dot",
            extension
        )));
    }
    for (name, value) in [("open", &config.open), ("close", &config.close)] {
        if value.is_empty() {
            return Err(Lit2mdError::Config(format!(
                "extension '{}': '{}' delimiter is empty",
                extension, name
            )));
        }
        if value.contains('\n') || value.contains('\r') {
            return Err(Lit2mdError::Config(format!(
                "extension '{}': '{}' delimiter spans more than one line",
                extension, name
            )));
        }
    }
    if let Some(lang) = &config.lang {
        if lang.contains('\n') || lang.contains('`') {
            return Err(Lit2mdError::Config(format!(
                "extension '{}': invalid fence language '{}'",
                extension, lang
            )));
        }
    }
    Ok(())
}

/// Every configured extension, compiled once per run and only read afterwards.
#[derive(Debug)]
pub struct ConfigTable {
    languages: HashMap<String, CompiledLanguage>,
}

impl ConfigTable {
    /// The built-in table alone.
    pub fn builtin() -> Result<Self> {
        Self::from_entries(BTreeMap::new(), true)
    }

    /// Build a table from explicit entries, optionally layered over the built-ins.
    pub fn from_entries(
        entries: BTreeMap<String, LanguageConfig>,
        include_defaults: bool,
    ) -> Result<Self> {
        let mut languages = HashMap::new();

        if include_defaults {
            for (ext, open, close, lang) in BUILTIN_LANGUAGES {
                let config = LanguageConfig::new(open, close, Some(*lang));
                languages.insert(ext.to_string(), CompiledLanguage::compile(ext, config)?);
            }
        }
        for (ext, config) in entries {
            let compiled = CompiledLanguage::compile(&ext, config)?;
            languages.insert(ext, compiled);
        }

        Ok(ConfigTable { languages })
    }

    pub fn from_yaml_str(text: &str, origin: &Path) -> Result<Self> {
        let parsed: Lit2mdConfig =
            serde_yaml::from_str(text).map_err(|source| Lit2mdError::ConfigParse {
                path: origin.to_path_buf(),
                source,
            })?;
        Self::from_entries(parsed.languages, parsed.defaults)
    }

    pub fn load_file(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path).map_err(|e| Lit2mdError::from_read(path, e))?;
        let table = Self::from_yaml_str(&text, path)?;
        info!("Loaded config from {}", path.display());
        Ok(table)
    }

    /// Use `lit2md.yml` / `lit2md.yaml` from `dir` if present, else the built-ins.
    pub fn load_from_dir(dir: &Path) -> Result<Self> {
        for candidate in CONFIG_FILE_NAMES {
            let path = dir.join(candidate);
            if path.is_file() {
                return Self::load_file(&path);
            }
        }
        info!("No config file found, using built-in languages");
        Self::builtin()
    }

    /// Config lookup for the current working directory.
    pub fn load_default_file() -> Result<Self> {
        Self::load_from_dir(Path::new("."))
    }

    /// Case-sensitive lookup by extension (no leading dot).
    pub fn lookup(&self, extension: &str) -> Option<&CompiledLanguage> {
        self.languages.get(extension)
    }

    /// Configured extensions, sorted.
    pub fn extensions(&self) -> Vec<&str> {
        let mut exts: Vec<&str> = self.languages.keys().map(String::as_str).collect();
        exts.sort_unstable();
        exts
    }

    pub fn len(&self) -> usize {
        self.languages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.languages.is_empty()
    }
}
