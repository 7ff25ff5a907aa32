//! Per-operation request records.
//!
//! # Design
//! `Operation` is the lookup table: each variant knows its remote method
//! name, the service family (and so the WSDL/endpoint), the version stamp,
//! the request element and its namespace. Payload structs below are the
//! operation-specific parts; `RequestHeader` carries what every request
//! shares and is flattened in front of the payload.

use serde::Serialize;

use crate::config::FedexConfig;
use crate::shipment::{Commodity, CustomsClearance, ExportDetail, Party, RequestedPackageLineItem, ShipmentBuilder};
use crate::transport::ServiceFamily;
use crate::types::{
    Accuracy, Address, BuildingPartCode, CarrierCode, Contact, DeletionControl, Dimensions, DocumentContent,
    DropoffType, LabelImageType, Money, PackageLocation, PackagingType, PaymentType, PickupRequestType,
    RateRequestType, ServiceType, TrackingIdType, Weight,
};

/// Every remote operation this client can call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    GetRates,
    ValidateShipment,
    ProcessShipment,
    DeleteShipment,
    Track,
    CreatePickup,
    CancelPickup,
    GetPickupAvailability,
    AddressValidation,
    FedExLocator,
    ServiceAvailability,
    PostalCodeInquiry,
}

impl Operation {
    pub const ALL: [Operation; 12] = [
        Operation::GetRates,
        Operation::ValidateShipment,
        Operation::ProcessShipment,
        Operation::DeleteShipment,
        Operation::Track,
        Operation::CreatePickup,
        Operation::CancelPickup,
        Operation::GetPickupAvailability,
        Operation::AddressValidation,
        Operation::FedExLocator,
        Operation::ServiceAvailability,
        Operation::PostalCodeInquiry,
    ];

    /// Remote method name, also used in the transaction id.
    pub fn name(&self) -> &'static str {
        match self {
            Operation::GetRates => "getRates",
            Operation::ValidateShipment => "validateShipment",
            Operation::ProcessShipment => "processShipment",
            Operation::DeleteShipment => "deleteShipment",
            Operation::Track => "track",
            Operation::CreatePickup => "createPickup",
            Operation::CancelPickup => "cancelPickup",
            Operation::GetPickupAvailability => "getPickupAvailability",
            Operation::AddressValidation => "addressValidation",
            Operation::FedExLocator => "fedExLocator",
            Operation::ServiceAvailability => "serviceAvailability",
            Operation::PostalCodeInquiry => "postalCodeInquiry",
        }
    }

    pub fn family(&self) -> ServiceFamily {
        match self {
            Operation::GetRates => ServiceFamily::RateService,
            Operation::ValidateShipment | Operation::ProcessShipment | Operation::DeleteShipment => {
                ServiceFamily::ShipService
            }
            Operation::Track => ServiceFamily::TrackService,
            Operation::CreatePickup | Operation::CancelPickup | Operation::GetPickupAvailability => {
                ServiceFamily::PickupService
            }
            Operation::AddressValidation => ServiceFamily::AddressValidation,
            Operation::FedExLocator => ServiceFamily::LocatorService,
            Operation::ServiceAvailability | Operation::PostalCodeInquiry => ServiceFamily::PackageMovement,
        }
    }

    pub fn version(&self) -> VersionId {
        let (service_id, major) = match self.family() {
            ServiceFamily::RateService => ("crs", 10),
            ServiceFamily::ShipService => ("ship", 10),
            ServiceFamily::TrackService => ("trck", 5),
            ServiceFamily::PickupService => ("disp", 3),
            ServiceFamily::AddressValidation => ("aval", 2),
            ServiceFamily::LocatorService => ("dloc", 2),
            ServiceFamily::PackageMovement => ("pmis", 5),
            ServiceFamily::CloseService => ("clos", 2),
            ServiceFamily::ReturnTagService => ("wsi", 1),
            ServiceFamily::UploadService => ("cdus", 1),
        };
        VersionId::new(service_id, major)
    }

    /// Root element of the request body.
    pub fn request_element(&self) -> &'static str {
        match self {
            Operation::GetRates => "RateRequest",
            Operation::ValidateShipment => "ValidateShipmentRequest",
            Operation::ProcessShipment => "ProcessShipmentRequest",
            Operation::DeleteShipment => "DeleteShipmentRequest",
            Operation::Track => "TrackRequest",
            Operation::CreatePickup => "CreatePickupRequest",
            Operation::CancelPickup => "CancelPickupRequest",
            Operation::GetPickupAvailability => "PickupAvailabilityRequest",
            Operation::AddressValidation => "AddressValidationRequest",
            Operation::FedExLocator => "FedExLocatorRequest",
            Operation::ServiceAvailability => "ServiceAvailabilityRequest",
            Operation::PostalCodeInquiry => "PostalCodeInquiryRequest",
        }
    }

    pub fn namespace(&self) -> &'static str {
        match self.family() {
            ServiceFamily::RateService => "http://fedex.com/ws/rate/v10",
            ServiceFamily::ShipService => "http://fedex.com/ws/ship/v10",
            ServiceFamily::TrackService => "http://fedex.com/ws/track/v5",
            ServiceFamily::PickupService => "http://fedex.com/ws/pickup/v3",
            ServiceFamily::AddressValidation => "http://fedex.com/ws/addressvalidation/v2",
            ServiceFamily::LocatorService => "http://fedex.com/ws/locator/v2",
            ServiceFamily::PackageMovement => "http://fedex.com/ws/packagemovementinformationservice/v5",
            ServiceFamily::CloseService => "http://fedex.com/ws/close/v2",
            ServiceFamily::ReturnTagService => "http://fedex.com/ws/returntag/v1",
            ServiceFamily::UploadService => "http://fedex.com/ws/uploaddocument/v1",
        }
    }

    pub fn soap_action(&self) -> String {
        format!("{}/{}", self.namespace(), self.name())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct VersionId {
    pub service_id: String,
    pub major: u32,
    pub intermediate: u32,
    pub minor: u32,
}

impl VersionId {
    pub fn new(service_id: &str, major: u32) -> Self {
        Self {
            service_id: service_id.to_string(),
            major,
            intermediate: 0,
            minor: 0,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct UserCredential {
    pub key: String,
    pub password: String,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct WebAuthenticationDetail {
    pub user_credential: UserCredential,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct ClientDetail {
    pub account_number: String,
    pub meter_number: String,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct TransactionDetail {
    pub customer_transaction_id: String,
}

/// Authentication, client, transaction and version stamp shared by every
/// request.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct RequestHeader {
    pub web_authentication_detail: WebAuthenticationDetail,
    pub client_detail: ClientDetail,
    pub transaction_detail: TransactionDetail,
    pub version: VersionId,
}

impl RequestHeader {
    pub fn new(config: &FedexConfig, operation: Operation) -> Self {
        Self {
            web_authentication_detail: WebAuthenticationDetail {
                user_credential: UserCredential {
                    key: config.key.clone(),
                    password: config.password.clone(),
                },
            },
            client_detail: ClientDetail {
                account_number: config.account_number.clone(),
                meter_number: config.meter_number.clone(),
            },
            transaction_detail: TransactionDetail {
                customer_transaction_id: format!("Fedex Api - {}", operation.name()),
            },
            version: operation.version(),
        }
    }
}

/// Header followed by the operation payload.
#[derive(Debug, Clone, Serialize)]
pub struct RequestBody<'a, P: Serialize> {
    #[serde(flatten)]
    pub header: RequestHeader,
    #[serde(flatten)]
    pub payload: &'a P,
}

// ---------------------------------------------------------------------------
// Shipment requests (rate, validate, process)
// ---------------------------------------------------------------------------

/// Operation parameters for rate/validate/process.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ShipmentOptions {
    pub dropoff_type: DropoffType,
    /// `None` asks the rate service for every available service.
    pub service_type: Option<ServiceType>,
    pub packaging_type: PackagingType,
    pub rate_request_type: RateRequestType,
}

impl Default for ShipmentOptions {
    fn default() -> Self {
        Self {
            dropoff_type: DropoffType::RegularPickup,
            service_type: Some(ServiceType::FedexGround),
            packaging_type: PackagingType::YourPackaging,
            rate_request_type: RateRequestType::List,
        }
    }
}

impl ShipmentOptions {
    pub fn service(service_type: ServiceType) -> Self {
        Self {
            service_type: Some(service_type),
            ..Self::default()
        }
    }

    /// Quote every service the shipment qualifies for.
    pub fn all_services() -> Self {
        Self {
            service_type: None,
            ..Self::default()
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct Payor {
    pub account_number: String,
    pub country_code: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct Payment {
    pub payment_type: PaymentType,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub payor: Option<Payor>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct CustomsClearanceDetail {
    pub duties_payment: Payment,
    pub document_content: DocumentContent,
    pub customs_value: Money,
    pub commodities: Vec<Commodity>,
    pub export_detail: ExportDetail,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct CustomerSpecifiedDetail {
    pub masked_data: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct LabelSpecification {
    pub label_format_type: String,
    pub image_type: LabelImageType,
    pub label_stock_type: String,
}

impl LabelSpecification {
    pub fn new(image_type: LabelImageType) -> Self {
        Self {
            label_format_type: "COMMON2D".to_string(),
            image_type,
            label_stock_type: "PAPER_7X4.75".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct RequestedShipment {
    pub ship_timestamp: String,
    pub dropoff_type: DropoffType,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub service_type: Option<ServiceType>,
    pub packaging_type: PackagingType,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total_insured_value: Option<Money>,
    pub shipper: Party,
    pub recipient: Party,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub shipping_charges_payment: Option<Payment>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub customs_clearance_detail: Option<CustomsClearanceDetail>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub customer_specified_detail: Option<CustomerSpecifiedDetail>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label_specification: Option<LabelSpecification>,
    pub rate_request_types: RateRequestType,
    pub package_count: usize,
    pub requested_package_line_items: Vec<RequestedPackageLineItem>,
}

impl RequestedShipment {
    /// Snapshot the builder into a requested shipment. Payors are filled
    /// from the configured account and home country.
    pub fn from_builder(shipment: &ShipmentBuilder, options: &ShipmentOptions, config: &FedexConfig) -> Self {
        Self {
            ship_timestamp: shipment.ship_timestamp(),
            dropoff_type: options.dropoff_type,
            service_type: options.service_type,
            packaging_type: options.packaging_type,
            total_insured_value: shipment.insured_value().cloned(),
            shipper: shipment.shipper().clone(),
            recipient: shipment.recipient().clone(),
            shipping_charges_payment: shipment.shipping_charges().map(|payment_type| Payment {
                payment_type,
                payor: Some(account_payor(config)),
            }),
            customs_clearance_detail: shipment.customs().map(|c| customs_detail(c, config)),
            customer_specified_detail: None,
            label_specification: None,
            rate_request_types: options.rate_request_type,
            package_count: shipment.package_line_items().len(),
            requested_package_line_items: shipment.package_line_items().to_vec(),
        }
    }
}

fn account_payor(config: &FedexConfig) -> Payor {
    Payor {
        account_number: config.account_number.clone(),
        country_code: config.country_code.clone(),
    }
}

/// Only a paying sender names its own account; recipient and third party
/// payments carry just the payment type.
fn customs_detail(customs: &CustomsClearance, config: &FedexConfig) -> CustomsClearanceDetail {
    let payor = match customs.duties_payment {
        PaymentType::Sender => Some(account_payor(config)),
        PaymentType::Recipient | PaymentType::ThirdParty => None,
    };
    CustomsClearanceDetail {
        duties_payment: Payment {
            payment_type: customs.duties_payment,
            payor,
        },
        document_content: customs.document_content,
        customs_value: customs.customs_value.clone(),
        commodities: customs.commodities.clone(),
        export_detail: customs.export_detail.clone(),
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct ShipmentPayload {
    pub return_transit_and_commit: bool,
    pub requested_shipment: RequestedShipment,
}

// ---------------------------------------------------------------------------
// Delete shipment
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct TrackingId {
    pub tracking_id_type: TrackingIdType,
    pub tracking_number: String,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct DeleteShipmentPayload {
    pub ship_timestamp: String,
    pub tracking_id: TrackingId,
    pub deletion_control: DeletionControl,
}

// ---------------------------------------------------------------------------
// Track
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct PackageIdentifier {
    pub value: String,
    #[serde(rename = "Type")]
    pub kind: String,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct TrackPayload {
    pub package_identifier: PackageIdentifier,
}

impl TrackPayload {
    pub fn new(tracking_number: &str) -> Self {
        Self {
            package_identifier: PackageIdentifier {
                value: tracking_number.to_string(),
                kind: "TRACKING_NUMBER_OR_DOORTAG".to_string(),
            },
        }
    }
}

// ---------------------------------------------------------------------------
// Pickup
// ---------------------------------------------------------------------------

/// Parameters of a pickup request.
#[derive(Debug, Clone, PartialEq)]
pub struct CreatePickup {
    pub carrier_code: CarrierCode,
    pub contact: Contact,
    pub address: Address,
    pub total_weight: Weight,
    /// When the packages are ready, e.g. `2024-03-05T10:00:00-05:00`.
    pub ready_timestamp: String,
    pub building_part: Option<(BuildingPartCode, String)>,
    pub package_location: PackageLocation,
    pub company_close_time: String,
    pub package_count: u32,
    pub oversize_package_count: Option<u32>,
    pub courier_remarks: Option<String>,
}

impl CreatePickup {
    pub fn new(contact: Contact, address: Address, total_weight: Weight, ready_timestamp: &str) -> Self {
        Self {
            carrier_code: CarrierCode::Express,
            contact,
            address,
            total_weight,
            ready_timestamp: ready_timestamp.to_string(),
            building_part: None,
            package_location: PackageLocation::Front,
            company_close_time: "20:00:00-05:00".to_string(),
            package_count: 1,
            oversize_package_count: None,
            courier_remarks: None,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct PickupLocation {
    pub contact: Contact,
    pub address: Address,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct PickupOriginDetail {
    pub pickup_location: PickupLocation,
    pub package_location: PackageLocation,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub building_part: Option<BuildingPartCode>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub building_part_description: Option<String>,
    pub ready_timestamp: String,
    pub company_close_time: String,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct CreatePickupPayload {
    pub origin_detail: PickupOriginDetail,
    pub package_count: u32,
    pub total_weight: Weight,
    pub carrier_code: CarrierCode,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub oversize_package_count: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub courier_remarks: Option<String>,
}

impl From<&CreatePickup> for CreatePickupPayload {
    fn from(p: &CreatePickup) -> Self {
        Self {
            origin_detail: PickupOriginDetail {
                pickup_location: PickupLocation {
                    contact: p.contact.clone(),
                    address: p.address.clone(),
                },
                package_location: p.package_location,
                building_part: p.building_part.as_ref().map(|(code, _)| *code),
                building_part_description: p.building_part.as_ref().map(|(_, d)| d.clone()),
                ready_timestamp: p.ready_timestamp.clone(),
                company_close_time: p.company_close_time.clone(),
            },
            package_count: p.package_count,
            total_weight: p.total_weight,
            carrier_code: p.carrier_code,
            oversize_package_count: p.oversize_package_count,
            courier_remarks: p.courier_remarks.clone(),
        }
    }
}

/// Parameters of a pickup cancellation; serialized as is.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct CancelPickup {
    pub carrier_code: CarrierCode,
    pub pickup_confirmation_number: String,
    /// Pickup date as `YYYY-MM-DD`.
    pub scheduled_date: String,
    /// Location id returned by `createPickup`.
    pub location: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub courier_remarks: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct ShipmentAttributes {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub service_type: Option<ServiceType>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub packaging_type: Option<PackagingType>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dimensions: Option<Dimensions>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub weight: Option<Weight>,
}

/// Parameters of a pickup availability query; serialized as is.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct PickupAvailability {
    pub pickup_address: Address,
    pub pickup_request_type: Vec<PickupRequestType>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dispatch_date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub package_ready_time: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub customer_close_time: Option<String>,
    pub carriers: Vec<CarrierCode>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub shipment_attributes: Option<ShipmentAttributes>,
}

impl PickupAvailability {
    /// Same-day and future-day availability for Express and Ground.
    pub fn new(pickup_address: Address) -> Self {
        Self {
            pickup_address,
            pickup_request_type: vec![PickupRequestType::SameDay, PickupRequestType::FutureDay],
            dispatch_date: None,
            package_ready_time: None,
            customer_close_time: None,
            carriers: vec![CarrierCode::Express, CarrierCode::Ground],
            shipment_attributes: None,
        }
    }
}

// ---------------------------------------------------------------------------
// Address validation
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct AddressValidationOptions {
    pub check_residential_status: bool,
    pub maximum_number_of_matches: u32,
    pub street_accuracy: Accuracy,
    pub directional_accuracy: Accuracy,
    pub company_name_accuracy: Accuracy,
    pub convert_to_upper_case: bool,
    pub recognize_alternate_city_names: bool,
    pub return_parsed_elements: bool,
}

impl Default for AddressValidationOptions {
    fn default() -> Self {
        Self {
            check_residential_status: true,
            maximum_number_of_matches: 5,
            street_accuracy: Accuracy::Loose,
            directional_accuracy: Accuracy::Loose,
            company_name_accuracy: Accuracy::Loose,
            convert_to_upper_case: true,
            recognize_alternate_city_names: true,
            return_parsed_elements: true,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct AddressToValidate {
    pub address: Address,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct AddressValidationPayload {
    pub request_timestamp: String,
    pub options: AddressValidationOptions,
    pub addresses_to_validate: Vec<AddressToValidate>,
}

// ---------------------------------------------------------------------------
// Locator
// ---------------------------------------------------------------------------

/// Kinds of drop-off location a locator search may ask for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DropoffService {
    Express,
    Ground,
    FedExStaffed,
    FedExSelfService,
    FedExAuthorizedShippingCenter,
    HoldAtLocation,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct DropoffServicesDesired {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub express: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ground: Option<bool>,
    #[serde(rename = "FedExStaffed", skip_serializing_if = "Option::is_none")]
    pub fedex_staffed: Option<bool>,
    #[serde(rename = "FedExSelfService", skip_serializing_if = "Option::is_none")]
    pub fedex_self_service: Option<bool>,
    #[serde(rename = "FedExAuthorizedShippingCenter", skip_serializing_if = "Option::is_none")]
    pub fedex_authorized_shipping_center: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hold_at_location: Option<bool>,
}

impl DropoffServicesDesired {
    pub fn from_services(services: &[DropoffService]) -> Self {
        let mut desired = Self::default();
        for service in services {
            let flag = match service {
                DropoffService::Express => &mut desired.express,
                DropoffService::Ground => &mut desired.ground,
                DropoffService::FedExStaffed => &mut desired.fedex_staffed,
                DropoffService::FedExSelfService => &mut desired.fedex_self_service,
                DropoffService::FedExAuthorizedShippingCenter => &mut desired.fedex_authorized_shipping_center,
                DropoffService::HoldAtLocation => &mut desired.hold_at_location,
            };
            *flag = Some(true);
        }
        desired
    }
}

/// Parameters of a location search.
#[derive(Debug, Clone, PartialEq)]
pub struct LocatorQuery {
    pub country_code: String,
    pub services: Vec<DropoffService>,
    pub near_to_address: Option<Address>,
    pub near_to_phone_number: Option<String>,
}

impl Default for LocatorQuery {
    fn default() -> Self {
        Self {
            country_code: "US".to_string(),
            services: vec![DropoffService::Ground],
            near_to_address: None,
            near_to_phone_number: None,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct LocatorPayload {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub near_to_phone_number: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub near_to_address: Option<Address>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dropoff_services_desired: Option<DropoffServicesDesired>,
    pub country_code: String,
}

impl From<&LocatorQuery> for LocatorPayload {
    fn from(q: &LocatorQuery) -> Self {
        Self {
            near_to_phone_number: q.near_to_phone_number.clone(),
            near_to_address: q.near_to_address.clone(),
            dropoff_services_desired: (!q.services.is_empty())
                .then(|| DropoffServicesDesired::from_services(&q.services)),
            country_code: q.country_code.clone(),
        }
    }
}

// ---------------------------------------------------------------------------
// Package movement (service availability, postal code inquiry)
// ---------------------------------------------------------------------------

/// Parameters of a service availability query. Missing origin and
/// destination fall back to the builder's shipper and recipient.
#[derive(Debug, Clone, PartialEq)]
pub struct ServiceAvailabilityQuery {
    pub carrier_code: CarrierCode,
    pub origin: Option<Address>,
    pub destination: Option<Address>,
    /// Ship date as `YYYY-MM-DD`.
    pub ship_date: String,
}

impl ServiceAvailabilityQuery {
    pub fn new(ship_date: &str) -> Self {
        Self {
            carrier_code: CarrierCode::Ground,
            origin: None,
            destination: None,
            ship_date: ship_date.to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct ServiceAvailabilityPayload {
    pub origin: Address,
    pub destination: Address,
    pub ship_date: String,
    pub carrier_code: CarrierCode,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct PostalCodeInquiryPayload {
    pub carrier_code: CarrierCode,
    pub postal_code: String,
    pub country_code: String,
}
