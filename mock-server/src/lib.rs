//! A stand-in for the FedEx SOAP endpoint.
//!
//! Every request is a POST of a SOAP envelope to `/web-services`. The first
//! element of the body selects the canned reply. Processed shipments and
//! created pickups are kept in memory so track, delete and cancel behave
//! like the sandbox does.

use std::{collections::HashMap, io::BufReader, sync::Arc};

use axum::{
    extract::State,
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    routing::post,
    Router,
};
use base64::{engine::general_purpose::STANDARD, Engine};
use tokio::{net::TcpListener, sync::RwLock};
use xmltree::{Element, EmitterConfig, XMLNode};

/// Decoded content of every label the mock hands out.
pub const MOCK_LABEL: &[u8] = b"%PDF-1.4 mock label";
pub const FIRST_TRACKING_NUMBER: u64 = 794600000001;
/// Never issued, so tracking it always fails.
pub const UNKNOWN_TRACKING_NUMBER: &str = "000000000000";

#[derive(Debug, Default)]
pub struct Store {
    issued: u64,
    pickups_issued: u64,
    /// Tracking number to service type.
    shipments: HashMap<String, String>,
    /// Confirmation number to location.
    pickups: HashMap<String, String>,
}

impl Store {
    fn next_tracking_number(&mut self) -> String {
        let number = FIRST_TRACKING_NUMBER + self.issued;
        self.issued += 1;
        number.to_string()
    }

    fn next_confirmation_number(&mut self) -> String {
        self.pickups_issued += 1;
        self.pickups_issued.to_string()
    }
}

pub type Db = Arc<RwLock<Store>>;

pub fn app() -> Router {
    let db: Db = Arc::new(RwLock::new(Store::default()));
    Router::new()
        .route("/web-services", post(web_services))
        .with_state(db)
}

pub async fn run(listener: TcpListener) -> Result<(), std::io::Error> {
    axum::serve(listener, app()).await
}

async fn web_services(State(db): State<Db>, body: String) -> Response {
    let request = match request_element(&body) {
        Ok(request) => request,
        Err(reason) => {
            tracing::warn!(%reason, "rejecting request");
            return fault("soapenv:Client", &reason);
        }
    };
    tracing::info!(element = %request.name, "request");

    if text(&request, &["WebAuthenticationDetail", "UserCredential", "Key"]).is_none() {
        let reply_name = reply_name(&request.name).unwrap_or("Reply");
        return soap_ok(reply(
            reply_name,
            "FAILURE",
            ("FAILURE", "prof", "1000", "Authentication Failed"),
            Vec::new(),
        ));
    }

    let mut store = db.write().await;
    match request.name.as_str() {
        "RateRequest" => soap_ok(rate_reply(&request)),
        "ValidateShipmentRequest" => soap_ok(reply(
            "ShipmentReply",
            "SUCCESS",
            ("SUCCESS", "ship", "0000", "Success"),
            Vec::new(),
        )),
        "ProcessShipmentRequest" => soap_ok(process_reply(&request, &mut store)),
        "DeleteShipmentRequest" => soap_ok(delete_reply(&request, &mut store)),
        "TrackRequest" => soap_ok(track_reply(&request, &store)),
        "CreatePickupRequest" => soap_ok(create_pickup_reply(&mut store)),
        "CancelPickupRequest" => soap_ok(cancel_pickup_reply(&request, &mut store)),
        "PickupAvailabilityRequest" => soap_ok(success(
            "PickupAvailabilityReply",
            "disp",
            vec![node(
                "Options",
                vec![
                    leaf("Carrier", "FDXE"),
                    leaf("Available", "true"),
                    leaf("PickupDate", "2024-03-05"),
                ],
            )],
        )),
        "AddressValidationRequest" => soap_ok(address_validation_reply(&request)),
        "FedExLocatorRequest" => soap_ok(success(
            "FedExLocatorReply",
            "dloc",
            vec![
                leaf("TotalResultsAvailable", "1"),
                node(
                    "AddressToLocationRelationships",
                    vec![node(
                        "DistanceAndLocationDetails",
                        vec![node("LocationDetail", vec![leaf("LocationId", "MEMA")])],
                    )],
                ),
            ],
        )),
        "ServiceAvailabilityRequest" => soap_ok(success(
            "ServiceAvailabilityReply",
            "pmis",
            vec![node(
                "Options",
                vec![leaf("Service", "FEDEX_GROUND"), leaf("TransitTime", "TWO_DAYS")],
            )],
        )),
        "PostalCodeInquiryRequest" => {
            let postal_code = text(&request, &["PostalCode"]).unwrap_or_default();
            soap_ok(success(
                "PostalCodeInquiryReply",
                "pmis",
                vec![node(
                    "ExpressDescription",
                    vec![
                        leaf("LocationId", "MEMA"),
                        leaf("StateOrProvinceCode", "TN"),
                        leaf("PostalCode", postal_code),
                        leaf("CountryCode", text(&request, &["CountryCode"]).unwrap_or_default()),
                    ],
                )],
            ))
        }
        other => fault("soapenv:Client", &format!("unknown operation {other}")),
    }
}

fn rate_reply(request: &Element) -> Element {
    let requested = text(request, &["RequestedShipment", "ServiceType"]);
    let quotes: Vec<(&str, &str)> = match requested.as_deref() {
        Some(service) => vec![(service, rate_for(service))],
        None => vec![("FEDEX_GROUND", "12.34"), ("GROUND_HOME_DELIVERY", "15.10")],
    };
    let details = quotes
        .into_iter()
        .map(|(service, amount)| {
            node(
                "RateReplyDetails",
                vec![
                    leaf("ServiceType", service),
                    node(
                        "RatedShipmentDetails",
                        vec![node(
                            "ShipmentRateDetail",
                            vec![node(
                                "TotalNetCharge",
                                vec![leaf("Currency", "USD"), leaf("Amount", amount)],
                            )],
                        )],
                    ),
                ],
            )
        })
        .collect();
    success("RateReply", "crs", details)
}

fn rate_for(service: &str) -> &'static str {
    match service {
        "FEDEX_GROUND" => "12.34",
        "GROUND_HOME_DELIVERY" => "15.10",
        _ => "42.00",
    }
}

fn process_reply(request: &Element, store: &mut Store) -> Element {
    let Some(shipment) = request.get_child("RequestedShipment") else {
        return reply(
            "ProcessShipmentReply",
            "ERROR",
            ("ERROR", "ship", "2001", "RequestedShipment is required"),
            Vec::new(),
        );
    };
    let service = text(shipment, &["ServiceType"]).unwrap_or_else(|| "FEDEX_GROUND".to_string());
    let packages = children(shipment, "RequestedPackageLineItems").count().max(1);
    let label = STANDARD.encode(MOCK_LABEL);

    let mut details = Vec::new();
    for sequence in 1..=packages {
        let tracking_number = store.next_tracking_number();
        store.shipments.insert(tracking_number.clone(), service.clone());
        tracing::info!(%tracking_number, %service, "shipment created");
        details.push(node(
            "CompletedPackageDetails",
            vec![
                leaf("SequenceNumber", sequence.to_string()),
                node(
                    "TrackingIds",
                    vec![leaf("TrackingIdType", "GROUND"), leaf("TrackingNumber", tracking_number)],
                ),
                node(
                    "Label",
                    vec![
                        leaf("Type", "OUTBOUND_LABEL"),
                        node(
                            "Parts",
                            vec![leaf("DocumentPartSequenceNumber", "1"), leaf("Image", label.clone())],
                        ),
                    ],
                ),
            ],
        ));
    }

    let mut completed = vec![leaf("ServiceTypeDescription", service)];
    completed.extend(details);
    success(
        "ProcessShipmentReply",
        "ship",
        vec![node("CompletedShipmentDetail", completed)],
    )
}

fn delete_reply(request: &Element, store: &mut Store) -> Element {
    let tracking_number = text(request, &["TrackingId", "TrackingNumber"]).unwrap_or_default();
    if store.shipments.remove(&tracking_number).is_some() {
        success("ShipmentReply", "ship", Vec::new())
    } else {
        reply(
            "ShipmentReply",
            "ERROR",
            (
                "ERROR",
                "ship",
                "8159",
                "Shipment Delete was requested for a tracking number already in a deleted state.",
            ),
            Vec::new(),
        )
    }
}

fn track_reply(request: &Element, store: &Store) -> Element {
    let tracking_number = text(request, &["PackageIdentifier", "Value"]).unwrap_or_default();
    match store.shipments.get(&tracking_number) {
        Some(service) => success(
            "TrackReply",
            "trck",
            vec![node(
                "TrackDetails",
                vec![
                    leaf("TrackingNumber", tracking_number.clone()),
                    leaf("StatusCode", "OC"),
                    leaf("StatusDescription", "Shipment information sent to FedEx"),
                    leaf("ServiceType", service.clone()),
                ],
            )],
        ),
        _ => reply(
            "TrackReply",
            "FAILURE",
            ("FAILURE", "trck", "6035", "Invalid tracking numbers.   Please check the following numbers and resubmit."),
            Vec::new(),
        ),
    }
}

fn create_pickup_reply(store: &mut Store) -> Element {
    let confirmation = store.next_confirmation_number();
    store.pickups.insert(confirmation.clone(), "NQAA".to_string());
    success(
        "CreatePickupReply",
        "disp",
        vec![leaf("PickupConfirmationNumber", confirmation), leaf("Location", "NQAA")],
    )
}

fn cancel_pickup_reply(request: &Element, store: &mut Store) -> Element {
    let confirmation = text(request, &["PickupConfirmationNumber"]).unwrap_or_default();
    if store.pickups.remove(&confirmation).is_some() {
        success("CancelPickupReply", "disp", Vec::new())
    } else {
        reply(
            "CancelPickupReply",
            "ERROR",
            ("ERROR", "disp", "5500", "Pickup confirmation number not found"),
            Vec::new(),
        )
    }
}

fn address_validation_reply(request: &Element) -> Element {
    let results = children(request, "AddressesToValidate")
        .filter_map(|item| item.get_child("Address"))
        .map(|address| {
            node(
                "AddressResults",
                vec![node(
                    "ProposedAddressDetails",
                    vec![
                        leaf("Score", "100"),
                        leaf("ResidentialStatus", "RESIDENTIAL"),
                        plain_copy(address),
                    ],
                )],
            )
        })
        .collect();
    success("AddressValidationReply", "aval", results)
}

// ---------------------------------------------------------------------------
// XML helpers
// ---------------------------------------------------------------------------

fn request_element(body: &str) -> Result<Element, String> {
    let envelope = Element::parse(BufReader::new(body.as_bytes())).map_err(|e| e.to_string())?;
    if envelope.name != "Envelope" {
        return Err(format!("expected Envelope, found {}", envelope.name));
    }
    let body = envelope
        .get_child("Body")
        .ok_or_else(|| "missing SOAP Body".to_string())?;
    body.children
        .iter()
        .find_map(|n| n.as_element())
        .cloned()
        .ok_or_else(|| "empty SOAP Body".to_string())
}

fn reply_name(request: &str) -> Option<&'static str> {
    Some(match request {
        "RateRequest" => "RateReply",
        "ValidateShipmentRequest" | "DeleteShipmentRequest" => "ShipmentReply",
        "ProcessShipmentRequest" => "ProcessShipmentReply",
        "TrackRequest" => "TrackReply",
        "CreatePickupRequest" => "CreatePickupReply",
        "CancelPickupRequest" => "CancelPickupReply",
        "PickupAvailabilityRequest" => "PickupAvailabilityReply",
        "AddressValidationRequest" => "AddressValidationReply",
        "FedExLocatorRequest" => "FedExLocatorReply",
        "ServiceAvailabilityRequest" => "ServiceAvailabilityReply",
        "PostalCodeInquiryRequest" => "PostalCodeInquiryReply",
        _ => return None,
    })
}

fn children<'a>(elem: &'a Element, name: &'a str) -> impl Iterator<Item = &'a Element> {
    elem.children
        .iter()
        .filter_map(|n| n.as_element())
        .filter(move |e| e.name == name)
}

/// Trimmed, non-empty text at `path` below `elem`.
fn text(elem: &Element, path: &[&str]) -> Option<String> {
    let mut current = elem;
    for name in path {
        current = current.get_child(*name)?;
    }
    current
        .get_text()
        .map(|t| t.trim().to_string())
        .filter(|t| !t.is_empty())
}

/// Copy an element's names and text, dropping namespace bookkeeping.
fn plain_copy(elem: &Element) -> Element {
    let mut copy = Element::new(&elem.name);
    for child in &elem.children {
        match child {
            XMLNode::Element(e) => copy.children.push(XMLNode::Element(plain_copy(e))),
            XMLNode::Text(t) => copy.children.push(XMLNode::Text(t.clone())),
            _ => {}
        }
    }
    copy
}

fn leaf(name: &str, text: impl Into<String>) -> Element {
    let mut elem = Element::new(name);
    elem.children.push(XMLNode::Text(text.into()));
    elem
}

fn node(name: &str, children: Vec<Element>) -> Element {
    let mut elem = Element::new(name);
    elem.children.extend(children.into_iter().map(XMLNode::Element));
    elem
}

/// A reply element: severity, one notification, then the body elements.
fn reply(name: &str, severity: &str, notification: (&str, &str, &str, &str), body: Vec<Element>) -> Element {
    let (note_severity, source, code, message) = notification;
    let mut elem = node(
        name,
        vec![
            leaf("HighestSeverity", severity),
            node(
                "Notifications",
                vec![
                    leaf("Severity", note_severity),
                    leaf("Source", source),
                    leaf("Code", code),
                    leaf("Message", message),
                ],
            ),
        ],
    );
    elem.children.extend(body.into_iter().map(XMLNode::Element));
    elem
}

fn success(name: &str, source: &str, body: Vec<Element>) -> Element {
    reply(
        name,
        "SUCCESS",
        ("SUCCESS", source, "0", "Request was successfully processed."),
        body,
    )
}

fn envelope(child: Element) -> String {
    let mut body = Element::new("soapenv:Body");
    body.children.push(XMLNode::Element(child));

    let mut envelope = Element::new("soapenv:Envelope");
    envelope.attributes.insert(
        "xmlns:soapenv".to_string(),
        "http://schemas.xmlsoap.org/soap/envelope/".to_string(),
    );
    envelope.children.push(XMLNode::Element(body));

    let mut buf = Vec::new();
    let config = EmitterConfig::new().write_document_declaration(true);
    if let Err(e) = envelope.write_with_config(&mut buf, config) {
        tracing::error!(error = %e, "cannot write reply envelope");
    }
    String::from_utf8_lossy(&buf).into_owned()
}

fn xml_response(status: StatusCode, body: String) -> Response {
    (status, [(header::CONTENT_TYPE, "text/xml; charset=utf-8")], body).into_response()
}

fn soap_ok(reply: Element) -> Response {
    xml_response(StatusCode::OK, envelope(reply))
}

fn fault(code: &str, message: &str) -> Response {
    let fault = node(
        "soapenv:Fault",
        vec![leaf("faultcode", code), leaf("faultstring", message)],
    );
    xml_response(StatusCode::INTERNAL_SERVER_ERROR, envelope(fault))
}
