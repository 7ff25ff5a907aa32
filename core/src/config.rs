//! Client configuration: credentials, environment and label settings.
//!
//! # Design
//! All fields are public so callers can assign them directly; the few
//! setters exist for the values that are commonly changed after
//! construction. `Debug` is written by hand so credentials never end up in
//! logs.

use std::fmt;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::{FedexError, Result};
use crate::types::LabelImageType;

/// Connection timeout handed to every SOAP session.
pub const DEFAULT_TIMEOUT_SECS: u64 = 90;

/// FedEx deployment the client talks to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    #[default]
    Sandbox,
    Production,
}

impl Environment {
    /// Directory under the WSDL root that holds this environment's documents.
    pub fn wsdl_dir(&self) -> &'static str {
        match self {
            Environment::Sandbox => "wsdl_beta",
            Environment::Production => "wsdl",
        }
    }

    pub fn service_url(&self) -> &'static str {
        match self {
            Environment::Sandbox => "https://wsbeta.fedex.com:443/web-services",
            Environment::Production => "https://ws.fedex.com:443/web-services",
        }
    }
}

impl std::str::FromStr for Environment {
    type Err = FedexError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "sandbox" | "development" | "test" => Ok(Environment::Sandbox),
            "production" | "live" => Ok(Environment::Production),
            other => Err(FedexError::Config(format!("unknown environment: {other}"))),
        }
    }
}

#[derive(Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FedexConfig {
    pub account_number: String,
    pub meter_number: String,
    pub password: String,
    pub key: String,
    pub label_type: LabelImageType,
    pub label_name: String,
    pub download_location: PathBuf,
    /// Two-letter home country; shipments leaving it need customs detail.
    pub country_code: String,
    pub environment: Environment,
    /// Log every outgoing envelope at `info` level.
    pub trace: bool,
    pub wsdl_root: PathBuf,
    /// Replaces the FedEx URL for the environment, e.g. to hit a mock.
    pub service_url: Option<String>,
    pub timeout_secs: u64,
}

impl Default for FedexConfig {
    fn default() -> Self {
        Self {
            account_number: String::new(),
            meter_number: String::new(),
            password: String::new(),
            key: String::new(),
            label_type: LabelImageType::Pdf,
            label_name: "label".to_string(),
            download_location: PathBuf::from("/tmp"),
            country_code: "US".to_string(),
            environment: Environment::Sandbox,
            trace: false,
            wsdl_root: PathBuf::from("wsdl"),
            service_url: None,
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }
}

impl FedexConfig {
    pub fn new(account_number: &str, meter_number: &str, key: &str, password: &str) -> Self {
        Self {
            account_number: account_number.to_string(),
            meter_number: meter_number.to_string(),
            key: key.to_string(),
            password: password.to_string(),
            ..Self::default()
        }
    }

    /// Build a configuration from `FEDEX_*` environment variables. Unset
    /// variables keep their defaults.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    pub(crate) fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();
        if let Some(v) = lookup("FEDEX_ACCOUNT_NUMBER") {
            config.account_number = v;
        }
        if let Some(v) = lookup("FEDEX_METER_NUMBER") {
            config.meter_number = v;
        }
        if let Some(v) = lookup("FEDEX_PASSWORD") {
            config.password = v;
        }
        if let Some(v) = lookup("FEDEX_KEY") {
            config.key = v;
        }
        if let Some(v) = lookup("FEDEX_LABEL_TYPE") {
            config.label_type = v.parse()?;
        }
        if let Some(v) = lookup("FEDEX_LABEL_NAME") {
            config.label_name = v;
        }
        if let Some(v) = lookup("FEDEX_DOWNLOAD_PATH") {
            config.download_location = PathBuf::from(v);
        }
        if let Some(v) = lookup("FEDEX_COUNTRY_CODE") {
            config.country_code = v;
        }
        if let Some(v) = lookup("FEDEX_ENVIRONMENT") {
            config.environment = v.parse()?;
        }
        if let Some(v) = lookup("FEDEX_TRACE") {
            config.trace = matches!(v.as_str(), "1" | "true" | "yes");
        }
        if let Some(v) = lookup("FEDEX_WSDL_ROOT") {
            config.wsdl_root = PathBuf::from(v);
        }
        if let Some(v) = lookup("FEDEX_SERVICE_URL") {
            config.service_url = Some(v);
        }
        if let Some(v) = lookup("FEDEX_TIMEOUT_SECS") {
            config.timeout_secs = v
                .parse()
                .map_err(|_| FedexError::Config(format!("invalid FEDEX_TIMEOUT_SECS: {v}")))?;
        }
        Ok(config)
    }

    pub fn set_download_path(&mut self, path: impl AsRef<Path>) {
        self.download_location = path.as_ref().to_path_buf();
    }

    pub fn set_environment(&mut self, environment: Environment) {
        self.environment = environment;
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

impl fmt::Debug for FedexConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FedexConfig")
            .field("account_number", &self.account_number)
            .field("meter_number", &self.meter_number)
            .field("password", &"***")
            .field("key", &"***")
            .field("label_type", &self.label_type)
            .field("label_name", &self.label_name)
            .field("download_location", &self.download_location)
            .field("country_code", &self.country_code)
            .field("environment", &self.environment)
            .field("trace", &self.trace)
            .field("wsdl_root", &self.wsdl_root)
            .field("service_url", &self.service_url)
            .field("timeout_secs", &self.timeout_secs)
            .finish()
    }
}
