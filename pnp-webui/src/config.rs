#[allow(unused)]
use tracing::{debug, error, info, span, trace, warn, Instrument, Level};

use std::fmt;

use serde_derive::Deserialize;

/// Token in the configured uri that is replaced by the local host name
pub const HOST_PLACEHOLDER: &str = "YOURSERVERNAME";

/// Module type the hosting framework registers this module under
pub const MODULE_TYPE: &str = "pnp_webui";

/// Daemons the module attaches to
pub const DAEMONS: &[&str] = &["webui"];

#[derive(thiserror::Error, Debug, PartialEq)]
pub enum ConfigError {
    #[error("The WebUI PNP module is missing uri parameter.")]
    MissingUri,
}

pub type Result<T> = std::result::Result<T, ConfigError>;

/// A password that stays out of `Debug` output
#[derive(Clone, Default, Deserialize, PartialEq)]
#[serde(transparent)]
pub struct Password(String);

/// Module settings as handed over by the hosting framework.
///
/// ```json
/// {
///   "module_name": "ui-pnp",
///   "uri": "http://YOURSERVERNAME/pnp4nagios/",
///   "username": "nagiosadmin",
///   "password": "secret"
/// }
/// ```
#[derive(Clone, Debug, Default, Deserialize, PartialEq)]
pub struct PnpConfig {
    #[serde(default)]
    pub module_name: Option<String>,

    /// Base uri of the PNP4Nagios installation.  Required.
    #[serde(default)]
    pub uri: Option<String>,

    /// Held for authenticated access, not used when building links
    #[serde(default)]
    pub username: Option<String>,

    #[serde(default)]
    pub password: Password,
}

impl Password {
    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl From<String> for Password {
    fn from(password: String) -> Self {
        Self(password)
    }
}

impl From<&str> for Password {
    fn from(password: &str) -> Self {
        Self(password.to_owned())
    }
}

impl fmt::Debug for Password {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("***")
    }
}

impl PnpConfig {
    pub fn new(uri: impl Into<String>) -> Self {
        Self {
            uri: Some(uri.into()),
            ..Self::default()
        }
    }

    pub fn with_module_name(self, module_name: impl Into<String>) -> Self {
        Self {
            module_name: Some(module_name.into()),
            ..self
        }
    }

    pub fn with_credentials(self, username: impl Into<String>, password: impl Into<Password>) -> Self {
        Self {
            username: Some(username.into()),
            password: password.into(),
            ..self
        }
    }

    /// Reads settings from a JSON document
    pub fn from_json(settings: &str) -> serde_json::Result<Self> {
        serde_json::from_str(settings)
    }

    /// The name the module was configured under, falling back to its type
    pub fn name(&self) -> &str {
        self.module_name.as_deref().unwrap_or(MODULE_TYPE)
    }

    /// Validates and normalizes the configured uri.
    ///
    /// The result is trimmed, ends with a single `/`, and has [`HOST_PLACEHOLDER`] replaced by
    /// the name `host_name` resolves to.  `host_name` is only called when the placeholder is
    /// present.
    pub fn base_uri<F>(&self, host_name: F) -> Result<String>
    where
        F: FnOnce() -> Option<String>,
    {
        let trimmed = self.uri.as_deref().map(str::trim).unwrap_or_default();
        if trimmed.is_empty() {
            Err(ConfigError::MissingUri)?
        }

        let mut uri = format!("{}/", trimmed.trim_end_matches('/'));

        if uri.contains(HOST_PLACEHOLDER) {
            match host_name() {
                Some(name) => {
                    debug!(%name, "substituting {}", HOST_PLACEHOLDER);
                    uri = uri.replace(HOST_PLACEHOLDER, &name);
                }
                None => warn!(%uri, "no host name to substitute for {}", HOST_PLACEHOLDER),
            }
        }

        Ok(uri)
    }
}

/// The name of the machine we're running on, if it can be determined
#[cfg(feature = "resolve_hostname")]
pub fn local_host_name() -> Option<String> {
    match hostname::get() {
        Ok(name) => Some(name.to_string_lossy().into_owned()),
        Err(e) => {
            warn!(%e, "couldn't resolve the local host name");
            None
        }
    }
}

#[cfg(not(feature = "resolve_hostname"))]
pub fn local_host_name() -> Option<String> {
    None
}
