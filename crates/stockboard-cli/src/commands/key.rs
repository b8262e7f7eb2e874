use serde::Serialize;
use stockboard_core::{CredentialStore, FileCredentialStore};

use crate::cli::{KeyArgs, KeyCommand};
use crate::error::CliError;

use super::{resolve_api_key, CommandData, CommandResult, KeySource};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum KeyAction {
    Set,
    Show,
    Clear,
}

/// Outcome of a `key` subcommand. The key itself is never echoed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CredentialView {
    pub action: KeyAction,
    pub source: Option<KeySource>,
    pub masked_key: Option<String>,
    pub store_path: String,
}

pub fn run(
    args: &KeyArgs,
    flag: Option<&str>,
    environment: Option<String>,
    store: &FileCredentialStore,
) -> Result<CommandResult, CliError> {
    let store_path = store.path().display().to_string();
    let view = match &args.command {
        KeyCommand::Set { key } => {
            store.save(key)?;
            let stored = store.load()?;
            CredentialView {
                action: KeyAction::Set,
                source: stored.as_ref().map(|_| KeySource::Store),
                masked_key: stored.as_deref().map(mask),
                store_path,
            }
        }
        KeyCommand::Show => {
            let resolved = resolve_api_key(flag, environment, store)?;
            CredentialView {
                action: KeyAction::Show,
                source: resolved.as_ref().map(|(_, source)| *source),
                masked_key: resolved.as_ref().map(|(key, _)| mask(key)),
                store_path,
            }
        }
        KeyCommand::Clear => {
            store.clear()?;
            CredentialView {
                action: KeyAction::Clear,
                source: None,
                masked_key: None,
                store_path,
            }
        }
    };

    Ok(CommandResult::ok(CommandData::Credential(view)))
}

/// Keep only the last four characters visible.
pub fn mask(key: &str) -> String {
    let chars: Vec<char> = key.chars().collect();
    if chars.len() <= 4 {
        return "*".repeat(chars.len().max(4));
    }
    let visible: String = chars[chars.len() - 4..].iter().collect();
    format!("{}{visible}", "*".repeat(chars.len() - 4))
}
