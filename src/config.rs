// src/config.rs

//! Defines the configuration structures for `alakon-highlight`.
//!
//! This module provides a set of structs that can be deserialized from a
//! JSON configuration file to choose the grammar preset, the output format
//! and the colors used for each token category.
//!
//! Every struct carries `#[serde(default)]`, so a config file only needs to
//! name the settings it changes.

use anyhow::{Context, Result};
use log::info;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use std::str::FromStr;

use crate::color::{Color, NamedColor};
use crate::grammar::{Category, HostShape, Preset};
use crate::style::{Style, StyleFlags};

// --- Top-Level Configuration Structure ---

/// Represents the complete configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct Config {
    /// Which grammar to highlight with.
    pub grammar: GrammarConfig,
    /// What to write and how.
    pub output: OutputConfig,
    /// Style per token category.
    pub theme: Theme,
}

impl Config {
    /// Reads a JSON config file.
    pub fn load(path: &Path) -> Result<Config> {
        let text = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        let config = serde_json::from_str(&text)
            .with_context(|| format!("Failed to parse config file {}", path.display()))?;
        info!("Loaded configuration from {}", path.display());
        Ok(config)
    }

    /// `load` when a path is given, defaults otherwise.
    pub fn load_or_default(path: Option<&Path>) -> Result<Config> {
        match path {
            Some(path) => Config::load(path),
            None => {
                info!("No config file given, using defaults.");
                Ok(Config::default())
            }
        }
    }
}

// --- Grammar Configuration ---

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct GrammarConfig {
    /// `classic` (true/false keywords) or `extended` (adds if/else/while).
    pub preset: Preset,
}

// --- Output Configuration ---

/// Rendering of highlighted text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum OutputFormat {
    /// SGR escape sequences for a terminal.
    #[default]
    Ansi,
    /// `<span class="hljs-...">` markup.
    Html,
    /// One line per classified span, for debugging grammars.
    Tokens,
}

impl FromStr for OutputFormat {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "ansi" => Ok(OutputFormat::Ansi),
            "html" => Ok(OutputFormat::Html),
            "tokens" => Ok(OutputFormat::Tokens),
            other => anyhow::bail!("unknown output format {:?} (expected ansi, html or tokens)", other),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct OutputConfig {
    pub format: OutputFormat,
    /// Host object shape used when dumping the grammar.
    /// `None` dumps in the preset's own shape.
    pub host_shape: Option<HostShape>,
}

// --- Theme Configuration ---

/// Style for each token category. Plain text is never styled.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Theme {
    pub string: Style,
    pub number: Style,
    pub keyword: Style,
    pub built_in: Style,
}

impl Theme {
    pub fn style_for(&self, category: Category) -> &Style {
        match category {
            Category::String => &self.string,
            Category::Number => &self.number,
            Category::Keyword => &self.keyword,
            Category::BuiltIn => &self.built_in,
        }
    }
}

impl Default for Theme {
    fn default() -> Self {
        Theme {
            string: Style::new(Color::Named(NamedColor::Green)),
            number: Style::new(Color::Named(NamedColor::Cyan)),
            keyword: Style::new(Color::Named(NamedColor::Magenta)).with_flags(StyleFlags::BOLD),
            built_in: Style::new(Color::Named(NamedColor::Yellow)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn partial_file_keeps_defaults() {
        let config: Config = serde_json::from_str(
            r#"{ "grammar": { "preset": "extended" }, "theme": { "number": { "fg": { "Indexed": 208 } } } }"#,
        )
        .unwrap();
        assert_eq!(config.grammar.preset, Preset::Extended);
        assert_eq!(config.output.format, OutputFormat::Ansi);
        assert_eq!(config.theme.number.fg, Color::Indexed(208));
        assert!(config.theme.number.flags.is_empty());
        assert_eq!(config.theme.string, Theme::default().string);
    }

    #[test]
    fn theme_lookup_by_category() {
        let theme = Theme::default();
        assert!(theme.style_for(Category::Keyword).flags.contains(StyleFlags::BOLD));
        assert_eq!(theme.style_for(Category::String).fg, Color::Named(NamedColor::Green));
    }

    #[test]
    fn output_format_parsing() {
        assert_eq!("html".parse::<OutputFormat>().unwrap(), OutputFormat::Html);
        assert!("pdf".parse::<OutputFormat>().is_err());
        let output: OutputConfig =
            serde_json::from_str(r#"{ "format": "tokens", "host_shape": "modern" }"#).unwrap();
        assert_eq!(output.format, OutputFormat::Tokens);
        assert_eq!(output.host_shape, Some(HostShape::Modern));
    }

    #[test]
    fn load_from_file_and_report_errors() {
        let dir = std::env::temp_dir();
        let path = dir.join(format!("alakon-highlight-config-{}.json", std::process::id()));
        let mut file = fs::File::create(&path).unwrap();
        write!(file, r#"{{ "output": {{ "format": "html" }} }}"#).unwrap();
        drop(file);

        let config = Config::load_or_default(Some(&path)).unwrap();
        assert_eq!(config.output.format, OutputFormat::Html);

        fs::write(&path, "{ not json").unwrap();
        let err = Config::load(&path).unwrap_err();
        assert!(format!("{:#}", err).contains("Failed to parse config file"));
        fs::remove_file(&path).unwrap();

        assert!(Config::load(&dir.join("alakon-highlight-missing.json")).is_err());
        assert_eq!(Config::load_or_default(None).unwrap(), Config::default());
    }
}
