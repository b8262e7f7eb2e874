mod key;
mod show;

use serde::Serialize;
use stockboard_core::{
    CredentialError, CredentialStore, FileCredentialStore, StockboardConfig, API_KEY_ENV,
};
use tracing::debug;

use crate::cli::{Cli, Command};
use crate::error::CliError;
use crate::metadata::{Envelope, EnvelopeError, Metadata};

pub use key::{CredentialView, KeyAction};
pub use show::{DashboardView, SeriesPoints, SeriesView};

/// Payload of one command, serialized as the envelope's `data`.
#[derive(Debug, Serialize)]
#[serde(untagged)]
pub enum CommandData {
    Dashboard(Box<DashboardView>),
    Credential(CredentialView),
    None,
}

pub struct CommandResult {
    pub data: CommandData,
    pub errors: Vec<EnvelopeError>,
    pub latency_ms: u64,
}

impl CommandResult {
    pub fn ok(data: CommandData) -> Self {
        Self {
            data,
            errors: Vec::new(),
            latency_ms: 0,
        }
    }

    pub fn failed(error: EnvelopeError) -> Self {
        Self {
            data: CommandData::None,
            errors: vec![error],
            latency_ms: 0,
        }
    }

    pub fn with_latency(mut self, latency_ms: u64) -> Self {
        self.latency_ms = latency_ms;
        self
    }
}

/// Where the active API key came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum KeySource {
    Flag,
    Environment,
    Store,
}

/// First non-blank key among the flag, the environment value, and the store.
pub fn resolve_api_key(
    flag: Option<&str>,
    environment: Option<String>,
    store: &dyn CredentialStore,
) -> Result<Option<(String, KeySource)>, CredentialError> {
    let non_blank = |value: &str| {
        let value = value.trim();
        (!value.is_empty()).then(|| value.to_owned())
    };

    if let Some(key) = flag.and_then(non_blank) {
        return Ok(Some((key, KeySource::Flag)));
    }
    if let Some(key) = environment.as_deref().and_then(non_blank) {
        return Ok(Some((key, KeySource::Environment)));
    }
    Ok(store.load()?.map(|key| (key, KeySource::Store)))
}

pub async fn run(cli: &Cli) -> Result<Envelope<CommandData>, CliError> {
    let config = StockboardConfig::from_env().with_timeout_ms(cli.timeout_ms);
    let store = FileCredentialStore::new(config.credentials_path());
    let environment_key = std::env::var(API_KEY_ENV).ok();

    let CommandResult {
        data,
        errors,
        latency_ms,
    } = match &cli.command {
        Command::Show(args) => {
            let resolved = resolve_api_key(cli.api_key.as_deref(), environment_key, &store)?;
            let source = resolved.as_ref().map(|(_, source)| *source);
            debug!(?source, "resolved api key source");
            let api_key = resolved.map(|(key, _)| key).unwrap_or_default();
            show::run(args, &config, &api_key).await?
        }
        Command::Key(args) => key::run(args, cli.api_key.as_deref(), environment_key, &store)?,
    };

    Ok(Envelope {
        meta: Metadata::new(latency_ms),
        data,
        errors,
    })
}
