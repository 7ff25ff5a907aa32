//! Client core for the FedEx SOAP web services.
//!
//! # Overview
//! Builds SOAP requests for rates, shipping, tracking, pickups, address
//! validation, location search and package movement queries, and parses
//! the replies. `FedexClient` never touches the network (host-does-IO
//! pattern); `Fedex` runs its requests through a `Transport`, by default a
//! blocking ureq session.
//!
//! # Design
//! - Requests are typed records serialized in WSDL element order to a JSON
//!   tree, then to XML only at the envelope boundary (`soap`).
//! - `ShipmentBuilder` accumulates one transaction; each dispatch takes a
//!   snapshot, so nothing leaks between operations. `clear` starts over.
//! - `Operation` is the single table of operation name, service family,
//!   version and namespace.
//! - Business failures (`HighestSeverity` of `FAILURE`/`ERROR`) are normal
//!   `Reply` values; everything else that goes wrong is a `FedexError`.

pub mod client;
pub mod config;
pub mod error;
pub mod format;
pub mod http;
pub mod label;
pub mod reply;
pub mod request;
pub mod service;
pub mod shipment;
pub mod soap;
pub mod transport;
pub mod types;

pub use client::{FedexClient, SoapRequest};
pub use config::{Environment, FedexConfig};
pub use error::{FedexError, Result};
pub use http::{HttpRequest, HttpResponse};
pub use label::{LabelKind, download_label};
pub use reply::{CompletedPackage, Notification, RateQuote, Reply, Severity};
pub use request::{
    AddressValidationOptions, CancelPickup, CreatePickup, DropoffService, LocatorQuery, Operation,
    PickupAvailability, ServiceAvailabilityQuery, ShipmentOptions,
};
pub use service::{Fedex, ProcessedShipment};
pub use shipment::{Commodity, ExportDetail, ShipmentBuilder};
pub use transport::{Endpoint, ServiceFamily, SoapSession, Transport, UreqTransport};
