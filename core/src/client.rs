//! Stateless SOAP request builder and reply parser for the FedEx services.
//!
//! # Design
//! `FedexClient` holds only the configuration and carries no request state
//! between calls. Each operation is split into a `build_*` method that
//! produces a `SoapRequest` and `parse_reply`, which consumes the
//! `HttpResponse`. The caller (or `Fedex`) executes the round-trip in
//! between, keeping this module deterministic and free of I/O.
//!
//! Shipment state lives in a `ShipmentBuilder` owned by the caller; every
//! `build_*` call snapshots it into a fresh request value.

use chrono::{DateTime, Local, SecondsFormat};
use serde::Serialize;
use serde_json::Value;

use crate::config::FedexConfig;
use crate::error::{FedexError, Result};
use crate::http::{HttpRequest, HttpResponse};
use crate::reply::Reply;
use crate::request::{
    AddressToValidate, AddressValidationOptions, AddressValidationPayload, CancelPickup, CreatePickup,
    CreatePickupPayload, CustomerSpecifiedDetail, DeleteShipmentPayload, LabelSpecification, LocatorPayload,
    LocatorQuery, Operation, PickupAvailability, PostalCodeInquiryPayload, RequestBody, RequestHeader,
    RequestedShipment, ServiceAvailabilityPayload, ServiceAvailabilityQuery, ShipmentOptions, ShipmentPayload,
    TrackPayload, TrackingId,
};
use crate::shipment::ShipmentBuilder;
use crate::soap;
use crate::transport::Endpoint;
use crate::types::{Address, CarrierCode, DeletionControl, TrackingIdType};

/// A fully assembled call to one FedEx operation.
#[derive(Debug, Clone)]
pub struct SoapRequest {
    pub operation: Operation,
    pub endpoint: Endpoint,
    /// The request element as a tree, in WSDL order.
    pub tree: Value,
    /// The envelope POST. A session may replace `url` with the location
    /// declared by a local WSDL document.
    pub http: HttpRequest,
}

/// Synchronous, stateless client for the FedEx SOAP services.
#[derive(Debug, Clone)]
pub struct FedexClient {
    config: FedexConfig,
}

impl FedexClient {
    pub fn new(config: FedexConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &FedexConfig {
        &self.config
    }

    pub fn config_mut(&mut self) -> &mut FedexConfig {
        &mut self.config
    }

    /// A fresh builder for one shipment transaction.
    pub fn shipment(&self) -> ShipmentBuilder {
        ShipmentBuilder::new()
    }

    /// Quote the shipment. With `options.service_type == None` every
    /// available service is quoted.
    pub fn build_rates(&self, shipment: &ShipmentBuilder, options: &ShipmentOptions) -> Result<SoapRequest> {
        shipment.require_parties()?;
        let payload = ShipmentPayload {
            return_transit_and_commit: true,
            requested_shipment: RequestedShipment::from_builder(shipment, options, &self.config),
        };
        self.build(Operation::GetRates, &payload)
    }

    pub fn build_validate_shipment(
        &self,
        shipment: &ShipmentBuilder,
        options: &ShipmentOptions,
    ) -> Result<SoapRequest> {
        let payload = self.shipping_payload(shipment, options)?;
        self.build(Operation::ValidateShipment, &payload)
    }

    pub fn build_process_shipment(
        &self,
        shipment: &ShipmentBuilder,
        options: &ShipmentOptions,
    ) -> Result<SoapRequest> {
        let payload = self.shipping_payload(shipment, options)?;
        self.build(Operation::ProcessShipment, &payload)
    }

    /// Shared by validate and process: a label specification, and for
    /// shipments leaving the home country, mandatory customs detail plus a
    /// masked shipper account.
    fn shipping_payload(&self, shipment: &ShipmentBuilder, options: &ShipmentOptions) -> Result<ShipmentPayload> {
        shipment.require_parties()?;
        if options.service_type.is_none() {
            return Err(FedexError::requires("service type"));
        }

        let mut requested = RequestedShipment::from_builder(shipment, options, &self.config);
        requested.label_specification = Some(LabelSpecification::new(self.config.label_type));

        if shipment.is_international(&self.config.country_code) {
            if requested.customs_clearance_detail.is_none() {
                return Err(FedexError::precondition(
                    "CustomsClearanceDetail must be sent for international shipments",
                ));
            }
            requested.customer_specified_detail = Some(CustomerSpecifiedDetail {
                masked_data: "SHIPPER_ACCOUNT_NUMBER".to_string(),
            });
        }

        Ok(ShipmentPayload {
            return_transit_and_commit: true,
            requested_shipment: requested,
        })
    }

    pub fn build_delete_shipment(
        &self,
        ship_timestamp: DateTime<Local>,
        tracking_number: &str,
        tracking_id_type: TrackingIdType,
        deletion_control: DeletionControl,
    ) -> Result<SoapRequest> {
        let payload = DeleteShipmentPayload {
            ship_timestamp: ship_timestamp.to_rfc3339_opts(SecondsFormat::Secs, false),
            tracking_id: TrackingId {
                tracking_id_type,
                tracking_number: tracking_number.to_string(),
            },
            deletion_control,
        };
        self.build(Operation::DeleteShipment, &payload)
    }

    pub fn build_track(&self, tracking_number: &str) -> Result<SoapRequest> {
        self.build(Operation::Track, &TrackPayload::new(tracking_number))
    }

    pub fn build_create_pickup(&self, pickup: &CreatePickup) -> Result<SoapRequest> {
        self.build(Operation::CreatePickup, &CreatePickupPayload::from(pickup))
    }

    pub fn build_cancel_pickup(&self, cancel: &CancelPickup) -> Result<SoapRequest> {
        self.build(Operation::CancelPickup, cancel)
    }

    pub fn build_pickup_availability(&self, query: &PickupAvailability) -> Result<SoapRequest> {
        self.build(Operation::GetPickupAvailability, query)
    }

    pub fn build_address_validation(
        &self,
        addresses: &[Address],
        options: &AddressValidationOptions,
    ) -> Result<SoapRequest> {
        let payload = AddressValidationPayload {
            request_timestamp: Local::now().to_rfc3339_opts(SecondsFormat::Secs, false),
            options: options.clone(),
            addresses_to_validate: addresses
                .iter()
                .map(|address| AddressToValidate {
                    address: address.clone(),
                })
                .collect(),
        };
        self.build(Operation::AddressValidation, &payload)
    }

    pub fn build_locator(&self, query: &LocatorQuery) -> Result<SoapRequest> {
        self.build(Operation::FedExLocator, &LocatorPayload::from(query))
    }

    /// Missing origin or destination fall back to the shipment's shipper
    /// and recipient addresses.
    pub fn build_service_availability(
        &self,
        shipment: &ShipmentBuilder,
        query: &ServiceAvailabilityQuery,
    ) -> Result<SoapRequest> {
        let origin = query
            .origin
            .clone()
            .or_else(|| shipment.shipper().address.clone())
            .ok_or_else(|| FedexError::requires("shipper"))?;
        let destination = query
            .destination
            .clone()
            .or_else(|| shipment.recipient().address.clone())
            .ok_or_else(|| FedexError::requires("recipient"))?;
        let payload = ServiceAvailabilityPayload {
            origin,
            destination,
            ship_date: query.ship_date.clone(),
            carrier_code: query.carrier_code,
        };
        self.build(Operation::ServiceAvailability, &payload)
    }

    pub fn build_postal_code_inquiry(
        &self,
        carrier_code: CarrierCode,
        postal_code: &str,
        country_code: &str,
    ) -> Result<SoapRequest> {
        let payload = PostalCodeInquiryPayload {
            carrier_code,
            postal_code: postal_code.to_string(),
            country_code: country_code.to_string(),
        };
        self.build(Operation::PostalCodeInquiry, &payload)
    }

    /// Stamp the transaction header, render the tree and wrap it in an
    /// envelope.
    fn build<P: Serialize>(&self, operation: Operation, payload: &P) -> Result<SoapRequest> {
        let body = RequestBody {
            header: RequestHeader::new(&self.config, operation),
            payload,
        };
        let tree = serde_json::to_value(&body)?;
        let envelope = soap::encode_envelope(operation.request_element(), operation.namespace(), &tree)?;
        let endpoint = Endpoint::resolve(&self.config, operation.family());

        if self.config.trace {
            tracing::info!(operation = operation.name(), url = %endpoint.url, %envelope, "request");
        } else {
            tracing::debug!(operation = operation.name(), url = %endpoint.url, %envelope, "request");
        }

        let http = HttpRequest {
            url: endpoint.url.clone(),
            headers: vec![
                ("Content-Type".to_string(), "text/xml; charset=utf-8".to_string()),
                ("SOAPAction".to_string(), format!("\"{}\"", operation.soap_action())),
            ],
            body: envelope,
        };
        Ok(SoapRequest {
            operation,
            endpoint,
            tree,
            http,
        })
    }

    /// Decode the response to `request`. SOAP faults and HTTP failures are
    /// errors; a reply with `FAILURE` severity is not.
    pub fn parse_reply(&self, request: &SoapRequest, response: HttpResponse) -> Result<Reply> {
        let decoded = match soap::decode_envelope(&response.body) {
            Ok(decoded) => decoded,
            Err(FedexError::MalformedReply(reason)) if response.status != 200 => {
                tracing::debug!(status = response.status, %reason, "non-SOAP error response");
                return Err(FedexError::Http {
                    status: response.status,
                    body: response.body,
                });
            }
            Err(e) => return Err(e),
        };
        if response.status != 200 {
            return Err(FedexError::Http {
                status: response.status,
                body: response.body,
            });
        }
        if self.config.trace {
            tracing::info!(operation = request.operation.name(), element = %decoded.element, "reply");
        }
        Reply::from_tree(request.operation, decoded.tree)
    }
}
