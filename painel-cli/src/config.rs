use anyhow::{Context, Result};
use painel_assist::AssistConfig;
use painel_assist::client::{DEFAULT_ENDPOINT, DEFAULT_MODEL};
use painel_assist::prompt::DEFAULT_SYSTEM_PROMPT;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub llm: LlmSection,
    pub display: DisplaySection,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LlmSection {
    /// Full URL of the chat-completion endpoint.
    pub endpoint: String,
    pub model: String,
    /// Omitted from requests when unset.
    pub temperature: Option<f32>,
    pub system_prompt: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DisplaySection {
    pub currency: String,
}

impl Default for LlmSection {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            model: DEFAULT_MODEL.to_string(),
            temperature: None,
            system_prompt: None,
        }
    }
}

impl Default for DisplaySection {
    fn default() -> Self {
        Self {
            currency: "R$".to_string(),
        }
    }
}

impl Config {
    pub fn assist_config(&self) -> AssistConfig {
        AssistConfig {
            endpoint: self.llm.endpoint.clone(),
            model: self.llm.model.clone(),
            temperature: self.llm.temperature,
            system_prompt: self
                .llm
                .system_prompt
                .clone()
                .unwrap_or_else(|| DEFAULT_SYSTEM_PROMPT.to_string()),
        }
    }
}

fn painel_home() -> Result<PathBuf> {
    let home = std::env::var("HOME").context("HOME is not set")?;
    Ok(PathBuf::from(home).join(".painel"))
}

fn ensure_painel_home() -> Result<PathBuf> {
    let dir = painel_home()?;
    fs::create_dir_all(&dir).with_context(|| format!("create {}", dir.display()))?;
    Ok(dir)
}

pub fn config_path() -> Result<PathBuf> {
    Ok(painel_home()?.join("config.toml"))
}

pub fn load_config() -> Result<Config> {
    load_config_from(&config_path()?)
}

pub fn load_config_from(p: &Path) -> Result<Config> {
    if !p.exists() {
        return Ok(Config::default());
    }
    let s = fs::read_to_string(p).with_context(|| format!("read {}", p.display()))?;
    toml::from_str(&s).with_context(|| format!("parse {}", p.display()))
}

pub fn save_config(cfg: &Config) -> Result<PathBuf> {
    let p = ensure_painel_home()?.join("config.toml");
    let s = toml::to_string_pretty(cfg).context("serialize config")?;
    fs::write(&p, s).with_context(|| format!("write {}", p.display()))?;
    Ok(p)
}

pub fn init_config() -> Result<()> {
    let p = config_path()?;
    if p.exists() {
        println!("Config already exists: {}", p.display());
        return Ok(());
    }
    let p = save_config(&Config::default())?;
    println!("Wrote {}", p.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_file_falls_back_to_defaults() {
        let cfg: Config = toml::from_str("[llm]\nmodel = \"gpt-4o-mini\"\n").unwrap();
        assert_eq!(cfg.llm.model, "gpt-4o-mini");
        assert_eq!(cfg.llm.endpoint, DEFAULT_ENDPOINT);
        assert_eq!(cfg.display.currency, "R$");
    }

    #[test]
    fn test_assist_config_uses_default_prompt() {
        let a = Config::default().assist_config();
        assert_eq!(a, AssistConfig::default());
    }

    #[test]
    fn test_config_path_is_under_painel_home() {
        let p = config_path().unwrap();
        assert!(p.ends_with(".painel/config.toml"), "{}", p.display());
    }

    #[test]
    fn test_missing_file_is_default() {
        let cfg = load_config_from(Path::new("/definitely/not/here/config.toml")).unwrap();
        assert_eq!(cfg, Config::default());
    }
}
