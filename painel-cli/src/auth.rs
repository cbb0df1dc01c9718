use anyhow::{bail, Result};
use painel_assist::Credential;
use std::io::{self, Write};

fn prompt_secret(label: &str) -> Result<String> {
    // Plain stdin read; the key is held in memory for this run only.
    eprint!("{}: ", label);
    io::stderr().flush().ok();
    let mut s = String::new();
    io::stdin().read_line(&mut s)?;
    Ok(s.trim().to_string())
}

/// The key from `--api-key` / `OPENAI_API_KEY`, else prompt for it.
pub fn resolve_credential(flag: Option<String>) -> Result<Credential> {
    let key = match flag {
        Some(k) if !k.trim().is_empty() => k,
        _ => prompt_secret("Paste your OpenAI API key")?,
    };
    let credential = Credential::new(key);
    if credential.is_blank() {
        bail!("an API key is required to ask questions (pass --api-key or set OPENAI_API_KEY)");
    }
    Ok(credential)
}
