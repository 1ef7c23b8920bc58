use anyhow::Result;
use fs_err as fs;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::cli::ProviderKind;

/// Fixed name of the saved artifact, matching what the download button ships.
pub const ARTIFACT_FILE_NAME: &str = "GenUI-Code.html";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub schema_version: String,
    pub root: String,
    pub provider: ProviderKind,
    pub model: String,
    pub output_file: String,
    pub preview_dir: String,
    pub timeout_secs: u64,
    pub ollama_url: Option<String>,
    pub anthropic_api_base: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            schema_version: "2025-10-01".into(),
            root: ".".into(),
            provider: ProviderKind::OpenAI,
            model: "gpt-4.1-mini".into(),
            output_file: ARTIFACT_FILE_NAME.into(),
            preview_dir: ".genui/preview".into(),
            timeout_secs: 2400,
            ollama_url: Some("http://localhost:11434".into()),
            anthropic_api_base: "https://api.anthropic.com".into(),
        }
    }
}

/// Accent palette flag persisted across runs under a fixed storage key,
/// the CLI counterpart of the app's theme toggle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    Light,
    Dark,
}

impl Theme {
    pub fn flip(self) -> Self {
        match self {
            Theme::Light => Theme::Dark,
            Theme::Dark => Theme::Light,
        }
    }

    fn as_str(self) -> &'static str {
        match self {
            Theme::Light => "light",
            Theme::Dark => "dark",
        }
    }

    fn parse(s: &str) -> Option<Self> {
        match s.trim() {
            "light" => Some(Theme::Light),
            "dark" => Some(Theme::Dark),
            _ => None,
        }
    }
}

fn theme_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("genui").join("theme"))
}

/// Missing or unreadable flag reads as light, matching the app's default.
pub fn load_theme() -> Theme {
    let Some(path) = theme_path() else { return Theme::Light };
    match fs::read_to_string(&path) {
        Ok(s) => Theme::parse(&s).unwrap_or(Theme::Light),
        Err(_) => Theme::Light,
    }
}

pub fn save_theme(theme: Theme) -> Result<()> {
    let Some(path) = theme_path() else { return Ok(()) };
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(&path, theme.as_str())?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn theme_parses_known_flags_and_rejects_garbage() {
        assert_eq!(Theme::parse("light"), Some(Theme::Light));
        assert_eq!(Theme::parse(" dark\n"), Some(Theme::Dark));
        assert_eq!(Theme::parse("solarized"), None);
    }

    #[test]
    fn flip_alternates() {
        assert_eq!(Theme::Light.flip(), Theme::Dark);
        assert_eq!(Theme::Dark.flip().flip(), Theme::Dark);
    }
}
