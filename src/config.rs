use std::{
    fs,
    path::{Path, PathBuf},
};

use anyhow::{Context, Ok, Result};
use glob::Pattern;
use serde::{Deserialize, Serialize};

pub const CONFIG_FILE_NAME: &str = ".twlintrc.json";

pub const TEST_FILE_PATTERNS: &[&str] = &[
    "**/*.test.tsx",
    "**/*.test.ts",
    "**/*.test.jsx",
    "**/*.test.js",
    "**/*.spec.tsx",
    "**/*.spec.ts",
    "**/*.spec.jsx",
    "**/*.spec.js",
    "**/__tests__/**",
];

/// A class-producing helper the analyzer should recognize. When `from` is
/// set, only imports of `name` from that module match (default imports of the
/// module match too, whatever local name they take); when `from` is absent
/// the bare identifier matches anywhere, which covers project-local wrappers
/// like `cn`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BuilderSpec {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub from: Option<String>,
}

impl BuilderSpec {
    pub fn bare(name: &str) -> Self {
        Self {
            name: name.to_string(),
            from: None,
        }
    }

    pub fn from_module(name: &str, from: &str) -> Self {
        Self {
            name: name.to_string(),
            from: Some(from.to_string()),
        }
    }
}

#[derive(Debug, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Config {
    #[serde(default)]
    pub ignores: Vec<String>,
    #[serde(default = "default_includes")]
    pub includes: Vec<String>,
    /// Markup attributes whose values are class expressions.
    #[serde(default = "default_class_attributes")]
    pub class_attributes: Vec<String>,
    /// Joiner functions: every argument contributes classes unconditionally.
    #[serde(default = "default_class_functions")]
    pub class_functions: Vec<BuilderSpec>,
    /// Variant-builder factories (`cva`, `tv` style).
    #[serde(default = "default_variant_builders")]
    pub variant_builders: Vec<BuilderSpec>,
    /// Generated CSS the design-system model is compiled from, relative to
    /// the project root.
    #[serde(default = "default_stylesheet")]
    pub stylesheet: String,
    /// Variant prefixes beyond the built-in vocabulary and what the
    /// stylesheet itself reveals (custom `group-*` names and the like).
    #[serde(default)]
    pub extra_variants: Vec<String>,
    #[serde(default = "default_source_root")]
    pub source_root: String,
    #[serde(default = "default_ignore_test_files")]
    pub ignore_test_files: bool,
}

fn default_includes() -> Vec<String> {
    ["src", "app", "components", "pages"].map(String::from).to_vec()
}

fn default_class_attributes() -> Vec<String> {
    ["class", "className"].map(String::from).to_vec()
}

fn default_class_functions() -> Vec<BuilderSpec> {
    vec![
        BuilderSpec::bare("clsx"),
        BuilderSpec::bare("cn"),
        BuilderSpec::bare("cx"),
        BuilderSpec::from_module("classNames", "classnames"),
        BuilderSpec::from_module("twMerge", "tailwind-merge"),
        BuilderSpec::from_module("twJoin", "tailwind-merge"),
    ]
}

fn default_variant_builders() -> Vec<BuilderSpec> {
    vec![
        BuilderSpec::from_module("cva", "class-variance-authority"),
        BuilderSpec::from_module("tv", "tailwind-variants"),
    ]
}

fn default_stylesheet() -> String {
    "./dist/output.css".to_string()
}

fn default_source_root() -> String {
    "./".to_string()
}

fn default_ignore_test_files() -> bool {
    true
}

impl Default for Config {
    fn default() -> Self {
        Self {
            ignores: Vec::new(),
            includes: default_includes(),
            class_attributes: default_class_attributes(),
            class_functions: default_class_functions(),
            variant_builders: default_variant_builders(),
            stylesheet: default_stylesheet(),
            extra_variants: Vec::new(),
            source_root: default_source_root(),
            ignore_test_files: default_ignore_test_files(),
        }
    }
}

impl Config {
    /// Validate configuration values: glob patterns must compile and builder
    /// names must be plain identifiers.
    pub fn validate(&self) -> Result<()> {
        for pattern in &self.ignores {
            Pattern::new(pattern)
                .with_context(|| format!("Invalid glob pattern in 'ignores': \"{}\"", pattern))?;
        }

        // Include patterns without wildcards are literal directory paths and
        // need no escaping.
        for pattern in &self.includes {
            if pattern.contains('*') || pattern.contains('?') {
                Pattern::new(pattern).with_context(|| {
                    format!("Invalid glob pattern in 'includes': \"{}\"", pattern)
                })?;
            }
        }

        for spec in self.class_functions.iter().chain(&self.variant_builders) {
            if spec.name.is_empty()
                || !spec.name.chars().all(|c| c.is_alphanumeric() || c == '_' || c == '$')
            {
                anyhow::bail!("Invalid builder name: \"{}\"", spec.name);
            }
        }

        Ok(())
    }
}

pub fn default_config_json() -> Result<String> {
    let config = Config::default();
    serde_json::to_string_pretty(&config).context("Failed to generate default config.")
}

pub fn find_config_file(start_dir: &Path) -> Option<PathBuf> {
    let mut current = start_dir.to_path_buf();

    loop {
        let config_path = current.join(CONFIG_FILE_NAME);
        if config_path.exists() {
            return Some(config_path);
        }
        if current.join(".git").exists() {
            return None;
        }
        if !current.pop() {
            return None;
        }
    }
}

/// Result of loading configuration.
pub struct ConfigLoadResult {
    pub config: Config,
    /// True if config was loaded from a file, false if using defaults.
    pub from_file: bool,
}

pub fn load_config(start_dir: &Path) -> Result<ConfigLoadResult> {
    match find_config_file(start_dir) {
        Some(path) => {
            let content = fs::read_to_string(&path)?;
            let config: Config = serde_json::from_str(&content)
                .with_context(|| format!("Failed to parse config file: {:?}", path))?;
            config.validate()?;
            Ok(ConfigLoadResult {
                config,
                from_file: true,
            })
        }
        None => Ok(ConfigLoadResult {
            config: Config::default(),
            from_file: false,
        }),
    }
}

#[cfg(test)]
mod tests {
    use crate::config::*;
    use std::fs::File;
    use std::io::Write;
    use tempfile::tempdir;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert!(config.ignores.is_empty());
        assert!(config.class_attributes.contains(&"className".to_string()));
        assert!(config.class_functions.iter().any(|s| s.name == "clsx"));
        assert!(config.variant_builders.iter().any(|s| s.name == "cva"));
    }

    #[test]
    fn test_parse_config() {
        let json = r#"{
              "ignores": ["**/dist/**"],
              "includes": ["src/**"],
              "classAttributes": ["className"],
              "stylesheet": "./build/app.css"
          }"#;
        let config: Config = serde_json::from_str(json).unwrap();
        assert_eq!(config.ignores, vec!["**/dist/**"]);
        assert_eq!(config.includes, vec!["src/**"]);
        assert_eq!(config.class_attributes, vec!["className"]);
        assert_eq!(config.stylesheet, "./build/app.css");
        // Unspecified sections keep their defaults.
        assert!(!config.class_functions.is_empty());
    }

    #[test]
    fn test_builder_spec_parses_with_and_without_source() {
        let json = r#"{
            "classFunctions": [
                { "name": "cn" },
                { "name": "clsx", "from": "clsx" }
            ]
        }"#;
        let config: Config = serde_json::from_str(json).unwrap();
        assert_eq!(config.class_functions[0], BuilderSpec::bare("cn"));
        assert_eq!(
            config.class_functions[1],
            BuilderSpec::from_module("clsx", "clsx")
        );
    }

    #[test]
    fn test_validate_rejects_bad_globs() {
        let config = Config {
            ignores: vec!["[".to_string()],
            ..Config::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_non_identifier_builder() {
        let config = Config {
            class_functions: vec![BuilderSpec::bare("not a name")],
            ..Config::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_find_config_file() {
        let dir = tempdir().unwrap();
        let sub_dir = dir.path().join("a").join("b");
        std::fs::create_dir_all(&sub_dir).unwrap();
        File::create(dir.path().join(CONFIG_FILE_NAME)).unwrap();

        let found = find_config_file(&sub_dir);
        assert_eq!(found, Some(dir.path().join(CONFIG_FILE_NAME)));
    }

    #[test]
    fn test_find_config_stops_at_git_root() {
        let dir = tempdir().unwrap();
        let repo = dir.path().join("repo");
        std::fs::create_dir_all(repo.join(".git")).unwrap();
        File::create(dir.path().join(CONFIG_FILE_NAME)).unwrap();

        assert_eq!(find_config_file(&repo), None);
    }

    #[test]
    fn test_load_config_falls_back_to_defaults() {
        let dir = tempdir().unwrap();
        std::fs::create_dir_all(dir.path().join(".git")).unwrap();
        let loaded = load_config(dir.path()).unwrap();
        assert!(!loaded.from_file);
        assert_eq!(loaded.config.stylesheet, default_stylesheet());
    }

    #[test]
    fn test_load_config_reads_file() {
        let dir = tempdir().unwrap();
        std::fs::create_dir_all(dir.path().join(".git")).unwrap();
        let mut file = File::create(dir.path().join(CONFIG_FILE_NAME)).unwrap();
        write!(file, r#"{{ "stylesheet": "./styles/out.css" }}"#).unwrap();

        let loaded = load_config(dir.path()).unwrap();
        assert!(loaded.from_file);
        assert_eq!(loaded.config.stylesheet, "./styles/out.css");
    }
}
