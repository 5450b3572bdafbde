use std::{
    fs,
    path::{Path, PathBuf},
    time::Duration,
};

use anyhow::{bail, Context};
use serde::Deserialize;
use url::Url;

pub const DEFAULT_CONFIG_FILE: &str = "dashboard.toml";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub server_url: String,
    pub owner_id: Option<i64>,
    pub restaurant_id: Option<i64>,
    pub auth_token: Option<String>,
    pub request_timeout_secs: u64,
    pub poll_interval_secs: u64,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            server_url: "http://localhost:8080".into(),
            owner_id: None,
            restaurant_id: None,
            auth_token: None,
            request_timeout_secs: 15,
            poll_interval_secs: 10,
        }
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct FileSettings {
    server_url: Option<String>,
    owner_id: Option<i64>,
    restaurant_id: Option<i64>,
    auth_token: Option<String>,
    request_timeout_secs: Option<u64>,
    poll_interval_secs: Option<u64>,
}

impl Settings {
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    pub fn poll_interval(&self) -> Duration {
        Duration::from_secs(self.poll_interval_secs)
    }

    pub fn validate(&self) -> anyhow::Result<()> {
        let url = Url::parse(&self.server_url)
            .with_context(|| format!("invalid server_url '{}'", self.server_url))?;
        if !matches!(url.scheme(), "http" | "https") {
            bail!("server_url must use http or https, got '{}'", url.scheme());
        }
        if self.poll_interval_secs == 0 {
            bail!("poll_interval_secs must be greater than zero");
        }
        if self.request_timeout_secs == 0 {
            bail!("request_timeout_secs must be greater than zero");
        }
        Ok(())
    }
}

/// Builds settings from defaults, then the config file, then the process
/// environment. An explicitly requested file must exist; the default one is
/// optional.
pub fn load_settings(explicit_path: Option<&Path>) -> anyhow::Result<Settings> {
    let mut settings = Settings::default();

    let path = explicit_path
        .map(Path::to_path_buf)
        .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_FILE));
    match fs::read_to_string(&path) {
        Ok(raw) => apply_file(&mut settings, &raw)
            .with_context(|| format!("failed to parse config file '{}'", path.display()))?,
        Err(err) if explicit_path.is_some() => {
            return Err(err)
                .with_context(|| format!("failed to read config file '{}'", path.display()));
        }
        Err(_) => {}
    }

    apply_env(&mut settings, |key| std::env::var(key).ok())?;
    Ok(settings)
}

fn apply_file(settings: &mut Settings, raw: &str) -> anyhow::Result<()> {
    let file: FileSettings = toml::from_str(raw)?;
    if let Some(v) = file.server_url {
        settings.server_url = v;
    }
    if file.owner_id.is_some() {
        settings.owner_id = file.owner_id;
    }
    if file.restaurant_id.is_some() {
        settings.restaurant_id = file.restaurant_id;
    }
    if file.auth_token.is_some() {
        settings.auth_token = file.auth_token;
    }
    if let Some(v) = file.request_timeout_secs {
        settings.request_timeout_secs = v;
    }
    if let Some(v) = file.poll_interval_secs {
        settings.poll_interval_secs = v;
    }
    Ok(())
}

fn parse_number<T: std::str::FromStr>(key: &str, raw: &str) -> anyhow::Result<T> {
    raw.trim()
        .parse()
        .map_err(|_| anyhow::anyhow!("{key} must be a number, got '{raw}'"))
}

/// `DASHBOARD_*` variables win over their `APP__*` aliases.
fn apply_env(
    settings: &mut Settings,
    lookup: impl Fn(&str) -> Option<String>,
) -> anyhow::Result<()> {
    let var = |name: &str| {
        lookup(&format!("DASHBOARD_{name}")).or_else(|| lookup(&format!("APP__{name}")))
    };

    if let Some(v) = var("SERVER_URL") {
        settings.server_url = v;
    }
    if let Some(v) = var("OWNER_ID") {
        settings.owner_id = Some(parse_number("OWNER_ID", &v)?);
    }
    if let Some(v) = var("RESTAURANT_ID") {
        settings.restaurant_id = Some(parse_number("RESTAURANT_ID", &v)?);
    }
    if let Some(v) = var("AUTH_TOKEN") {
        settings.auth_token = Some(v);
    }
    if let Some(v) = var("REQUEST_TIMEOUT_SECS") {
        settings.request_timeout_secs = parse_number("REQUEST_TIMEOUT_SECS", &v)?;
    }
    if let Some(v) = var("POLL_INTERVAL_SECS") {
        settings.poll_interval_secs = parse_number("POLL_INTERVAL_SECS", &v)?;
    }
    Ok(())
}

#[cfg(test)]
#[path = "tests/config_tests.rs"]
mod tests;
