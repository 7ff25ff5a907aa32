//! Endpoint resolution and the SOAP session that performs the round-trip.
//!
//! # Design
//! `Endpoint::resolve` is pure: it combines the environment with the static
//! WSDL table and the configured URL. Opening a `SoapSession` is where I/O
//! starts. When the WSDL document for the service is present locally, the
//! session posts to the `soap:address` it declares, as a WSDL-driven SOAP
//! client would. A configured service URL always wins.
//!
//! HTTP error statuses are returned as data, not errors, so a SOAP fault in
//! a 500 response can still be parsed.

use std::fmt;
use std::io::BufReader;
use std::path::{Path, PathBuf};
use std::time::Duration;

use xmltree::Element;

use crate::config::{Environment, FedexConfig};
use crate::error::{FedexError, Result};
use crate::http::{HttpRequest, HttpResponse};

/// FedEx web service families, one WSDL document each.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ServiceFamily {
    AddressValidation,
    CloseService,
    LocatorService,
    PackageMovement,
    PickupService,
    RateService,
    ReturnTagService,
    ShipService,
    UploadService,
    TrackService,
}

impl ServiceFamily {
    pub fn wsdl_document(&self) -> &'static str {
        match self {
            ServiceFamily::AddressValidation => "AddressValidationService_v2.wsdl",
            ServiceFamily::CloseService => "CloseService_v2.wsdl",
            ServiceFamily::LocatorService => "LocatorService_v2.wsdl",
            ServiceFamily::PackageMovement => "PackageMovementInformationService_v5.wsdl",
            ServiceFamily::PickupService => "PickupService_v3.wsdl",
            ServiceFamily::RateService => "RateService_v10.wsdl",
            ServiceFamily::ReturnTagService => "ReturnTagService_v1.wsdl",
            ServiceFamily::ShipService => "ShipService_v10.wsdl",
            ServiceFamily::UploadService => "UploadDocumentService_v1.wsdl",
            ServiceFamily::TrackService => "TrackService_v5.wsdl",
        }
    }
}

impl fmt::Display for ServiceFamily {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}

/// Where and how to reach one service family.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoint {
    pub family: ServiceFamily,
    pub environment: Environment,
    pub wsdl_path: PathBuf,
    pub url: String,
    /// True when `url` came from configuration rather than the environment.
    pub url_overridden: bool,
    pub timeout: Duration,
}

impl Endpoint {
    pub fn resolve(config: &FedexConfig, family: ServiceFamily) -> Self {
        let wsdl_path = config
            .wsdl_root
            .join(config.environment.wsdl_dir())
            .join(family.wsdl_document());
        let (url, url_overridden) = match &config.service_url {
            Some(url) => (url.clone(), true),
            None => (config.environment.service_url().to_string(), false),
        };
        Self {
            family,
            environment: config.environment,
            wsdl_path,
            url,
            url_overridden,
            timeout: config.timeout(),
        }
    }
}

/// Executes SOAP requests. Implemented over ureq by `UreqTransport`; tests
/// plug in their own.
pub trait Transport {
    fn send(&self, endpoint: &Endpoint, request: &HttpRequest) -> Result<HttpResponse>;
}

/// An open connection to one endpoint.
pub struct SoapSession {
    location: String,
    agent: ureq::Agent,
}

impl fmt::Debug for SoapSession {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SoapSession").field("location", &self.location).finish()
    }
}

impl SoapSession {
    pub fn open(endpoint: &Endpoint) -> Result<Self> {
        let location = if !endpoint.url_overridden && endpoint.wsdl_path.is_file() {
            wsdl_location(&endpoint.wsdl_path).map_err(|reason| FedexError::Connection {
                endpoint: endpoint.wsdl_path.display().to_string(),
                reason,
            })?
        } else {
            endpoint.url.clone()
        };

        if !(location.starts_with("http://") || location.starts_with("https://")) {
            return Err(FedexError::Connection {
                endpoint: location,
                reason: "service location must be an http(s) URL".to_string(),
            });
        }

        let agent = ureq::Agent::config_builder()
            .http_status_as_error(false)
            .timeout_connect(Some(endpoint.timeout))
            .build()
            .new_agent();

        tracing::debug!(family = %endpoint.family, %location, "SOAP session opened");
        Ok(Self { location, agent })
    }

    pub fn location(&self) -> &str {
        &self.location
    }

    /// POST the envelope to the session location.
    pub fn invoke(&self, request: &HttpRequest) -> Result<HttpResponse> {
        let mut builder = self.agent.post(&self.location);
        for (name, value) in &request.headers {
            builder = builder.header(name.as_str(), value.as_str());
        }
        let mut response = builder
            .send(request.body.as_bytes())
            .map_err(|e| FedexError::Transport(format!("{}: {e}", self.location)))?;

        let status = response.status().as_u16();
        let headers = response
            .headers()
            .iter()
            .filter_map(|(k, v)| v.to_str().ok().map(|v| (k.as_str().to_string(), v.to_string())))
            .collect();
        let body = response
            .body_mut()
            .read_to_string()
            .map_err(|e| FedexError::Transport(format!("reading SOAP response body: {e}")))?;

        Ok(HttpResponse { status, headers, body })
    }
}

/// Opens a fresh session for every call.
#[derive(Debug, Clone, Copy, Default)]
pub struct UreqTransport;

impl Transport for UreqTransport {
    fn send(&self, endpoint: &Endpoint, request: &HttpRequest) -> Result<HttpResponse> {
        SoapSession::open(endpoint)?.invoke(request)
    }
}

/// Read the `location` of the first `soap:address` in a WSDL document.
fn wsdl_location(path: &Path) -> std::result::Result<String, String> {
    let file = std::fs::File::open(path).map_err(|e| e.to_string())?;
    let root = Element::parse(BufReader::new(file)).map_err(|e| e.to_string())?;
    find_address_location(&root).ok_or_else(|| "no soap:address location in WSDL".to_string())
}

fn find_address_location(elem: &Element) -> Option<String> {
    if elem.name == "address" {
        if let Some(location) = elem.attributes.get("location") {
            return Some(location.clone());
        }
    }
    elem.children
        .iter()
        .filter_map(|n| n.as_element())
        .find_map(find_address_location)
}
