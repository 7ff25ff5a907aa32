//! Blocking dispatcher that runs `FedexClient` requests through a transport.

use std::path::PathBuf;

use chrono::{DateTime, Local};

use crate::client::{FedexClient, SoapRequest};
use crate::config::FedexConfig;
use crate::error::Result;
use crate::label::{self, LabelKind};
use crate::reply::Reply;
use crate::request::{
    AddressValidationOptions, CancelPickup, CreatePickup, LocatorQuery, PickupAvailability,
    ServiceAvailabilityQuery, ShipmentOptions,
};
use crate::shipment::ShipmentBuilder;
use crate::transport::{Transport, UreqTransport};
use crate::types::{Address, CarrierCode, DeletionControl, TrackingIdType};

/// Outcome of `process_shipment`: the reply and the label files written.
///
/// The shipment exists once FedEx replies, so a failed label write is
/// reported in `labels` and never hides `reply`.
#[derive(Debug)]
pub struct ProcessedShipment {
    pub reply: Reply,
    pub labels: Result<Vec<PathBuf>>,
}

/// FedEx web services client: one method per remote operation.
///
/// ```no_run
/// use fedex_core::{Fedex, FedexConfig, ShipmentOptions, format};
/// use fedex_core::types::{LinearUnits, WeightUnits};
///
/// let fedex = Fedex::new(FedexConfig::from_env()?);
/// let mut shipment = fedex.shipment();
/// shipment
///     .set_shipper(format::address(&["10 Fed Ex Pkwy"], "Memphis", "TN", "38115"), None)
///     .set_recipient(format::address(&["1 Main St"], "Austin", "TX", "73301"), None)
///     .add_package_line_item(format::weight(5.0, WeightUnits::Lb), format::dimensions(10, 8, 6, LinearUnits::In));
///
/// let reply = fedex.get_rates(&shipment, &ShipmentOptions::all_services())?;
/// for quote in reply.rate_quotes() {
///     println!("{}: {}", quote.display_name, quote.total_net_charge.amount);
/// }
/// # Ok::<(), fedex_core::FedexError>(())
/// ```
#[derive(Debug, Clone)]
pub struct Fedex<T: Transport = UreqTransport> {
    client: FedexClient,
    transport: T,
}

impl Fedex<UreqTransport> {
    pub fn new(config: FedexConfig) -> Self {
        Self::with_transport(config, UreqTransport)
    }
}

impl<T: Transport> Fedex<T> {
    pub fn with_transport(config: FedexConfig, transport: T) -> Self {
        Self {
            client: FedexClient::new(config),
            transport,
        }
    }

    pub fn client(&self) -> &FedexClient {
        &self.client
    }

    pub fn config(&self) -> &FedexConfig {
        self.client.config()
    }

    pub fn config_mut(&mut self) -> &mut FedexConfig {
        self.client.config_mut()
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    pub fn shipment(&self) -> ShipmentBuilder {
        self.client.shipment()
    }

    pub fn get_rates(&self, shipment: &ShipmentBuilder, options: &ShipmentOptions) -> Result<Reply> {
        self.dispatch(self.client.build_rates(shipment, options)?)
    }

    pub fn validate_shipment(&self, shipment: &ShipmentBuilder, options: &ShipmentOptions) -> Result<Reply> {
        self.dispatch(self.client.build_validate_shipment(shipment, options)?)
    }

    /// Create the shipment and write the standard label of every package
    /// to the download directory. Labels are skipped for failed replies.
    pub fn process_shipment(
        &self,
        shipment: &ShipmentBuilder,
        options: &ShipmentOptions,
    ) -> Result<ProcessedShipment> {
        let reply = self.dispatch(self.client.build_process_shipment(shipment, options)?)?;
        let labels = if reply.is_failure() {
            Ok(Vec::new())
        } else {
            label::download_label(self.config(), &reply, &[LabelKind::Standard])
                .inspect_err(|e| tracing::warn!(error = %e, "shipment created but label was not written"))
        };
        Ok(ProcessedShipment { reply, labels })
    }

    pub fn delete_shipment(
        &self,
        ship_timestamp: DateTime<Local>,
        tracking_number: &str,
        tracking_id_type: TrackingIdType,
        deletion_control: DeletionControl,
    ) -> Result<Reply> {
        self.dispatch(self.client.build_delete_shipment(
            ship_timestamp,
            tracking_number,
            tracking_id_type,
            deletion_control,
        )?)
    }

    pub fn track(&self, tracking_number: &str) -> Result<Reply> {
        self.dispatch(self.client.build_track(tracking_number)?)
    }

    pub fn create_pickup(&self, pickup: &CreatePickup) -> Result<Reply> {
        self.dispatch(self.client.build_create_pickup(pickup)?)
    }

    pub fn cancel_pickup(&self, cancel: &CancelPickup) -> Result<Reply> {
        self.dispatch(self.client.build_cancel_pickup(cancel)?)
    }

    pub fn pickup_availability(&self, query: &PickupAvailability) -> Result<Reply> {
        self.dispatch(self.client.build_pickup_availability(query)?)
    }

    pub fn address_validation(&self, addresses: &[Address], options: &AddressValidationOptions) -> Result<Reply> {
        self.dispatch(self.client.build_address_validation(addresses, options)?)
    }

    pub fn locator(&self, query: &LocatorQuery) -> Result<Reply> {
        self.dispatch(self.client.build_locator(query)?)
    }

    pub fn service_availability(
        &self,
        shipment: &ShipmentBuilder,
        query: &ServiceAvailabilityQuery,
    ) -> Result<Reply> {
        self.dispatch(self.client.build_service_availability(shipment, query)?)
    }

    pub fn postal_code_inquiry(
        &self,
        carrier_code: CarrierCode,
        postal_code: &str,
        country_code: &str,
    ) -> Result<Reply> {
        self.dispatch(self.client.build_postal_code_inquiry(carrier_code, postal_code, country_code)?)
    }

    fn dispatch(&self, request: SoapRequest) -> Result<Reply> {
        let operation = request.operation.name();
        tracing::info!(operation, family = %request.endpoint.family, "dispatching");

        let response = self
            .transport
            .send(&request.endpoint, &request.http)
            .inspect_err(|e| tracing::error!(operation, error = %e, "transport failed"))?;
        let reply = self.client.parse_reply(&request, response)?;

        if reply.is_failure() {
            tracing::warn!(
                operation,
                severity = %reply.highest_severity,
                messages = ?reply.messages(),
                "FedEx reported a failure"
            );
        }
        Ok(reply)
    }
}
