//! Verify request building and reply parsing against JSON test vectors
//! stored in `test-vectors/`.
//!
//! Each vector file describes inputs, the expected request tree, a simulated
//! SOAP response and the expected reply. Trees are compared as parsed JSON;
//! top-level element order is checked separately because the WSDL sequence
//! order matters on the wire.

use fedex_core::types::CarrierCode;
use fedex_core::{CancelPickup, DropoffService, FedexClient, FedexConfig, HttpResponse, LocatorQuery, SoapRequest};
use serde_json::Value;

fn client() -> FedexClient {
    let mut config = FedexConfig::new("510087000", "118000000", "test-key", "test-pass");
    config.service_url = Some("http://localhost:3000/web-services".to_string());
    FedexClient::new(config)
}

fn cases(raw: &str) -> Vec<Value> {
    let vectors: Value = serde_json::from_str(raw).unwrap();
    vectors["cases"].as_array().unwrap().clone()
}

fn str_field<'a>(value: &'a Value, key: &str) -> &'a str {
    value[key].as_str().unwrap_or_else(|| panic!("missing string {key}"))
}

/// Check the built request, then parse the simulated response and check
/// the reply.
fn verify(c: &FedexClient, case: &Value, request: SoapRequest) {
    let name = str_field(case, "name");
    let expected_req = &case["expected_request"];

    assert_eq!(request.operation.name(), str_field(expected_req, "operation"), "{name}: operation");
    assert_eq!(request.endpoint.family.to_string(), str_field(expected_req, "family"), "{name}: family");
    assert_eq!(
        request.http.header("SOAPAction"),
        Some(str_field(expected_req, "soap_action")),
        "{name}: soap action"
    );
    assert_eq!(request.http.url, "http://localhost:3000/web-services", "{name}: url");
    assert_eq!(request.tree, expected_req["tree"], "{name}: tree");

    let keys = |v: &Value| v.as_object().unwrap().keys().cloned().collect::<Vec<_>>();
    assert_eq!(keys(&request.tree), keys(&expected_req["tree"]), "{name}: element order");

    let sim = &case["simulated_response"];
    let response = HttpResponse {
        status: sim["status"].as_u64().unwrap() as u16,
        headers: Vec::new(),
        body: str_field(sim, "body").to_string(),
    };
    let reply = c.parse_reply(&request, response).unwrap();

    let expected = &case["expected_result"];
    assert_eq!(
        reply.highest_severity.to_string(),
        str_field(expected, "highest_severity"),
        "{name}: severity"
    );
    let messages: Vec<String> = serde_json::from_value(expected["messages"].clone()).unwrap();
    assert_eq!(reply.messages(), messages, "{name}: messages");
    for (path, value) in expected["fields"].as_object().unwrap() {
        assert_eq!(reply.get_str(path), value.as_str(), "{name}: {path}");
    }
}

// ---------------------------------------------------------------------------
// Track
// ---------------------------------------------------------------------------

#[test]
fn track_test_vectors() {
    let c = client();
    for case in cases(include_str!("../../test-vectors/track.json")) {
        let request = c.build_track(str_field(&case["input"], "tracking_number")).unwrap();
        verify(&c, &case, request);
    }
}

// ---------------------------------------------------------------------------
// Postal code inquiry
// ---------------------------------------------------------------------------

#[test]
fn postal_code_inquiry_test_vectors() {
    let c = client();
    for case in cases(include_str!("../../test-vectors/postal_code_inquiry.json")) {
        let input = &case["input"];
        let carrier: CarrierCode = serde_json::from_value(input["carrier_code"].clone()).unwrap();
        let request = c
            .build_postal_code_inquiry(carrier, str_field(input, "postal_code"), str_field(input, "country_code"))
            .unwrap();
        verify(&c, &case, request);
    }
}

// ---------------------------------------------------------------------------
// Cancel pickup
// ---------------------------------------------------------------------------

#[test]
fn cancel_pickup_test_vectors() {
    let c = client();
    for case in cases(include_str!("../../test-vectors/cancel_pickup.json")) {
        let input = &case["input"];
        let cancel = CancelPickup {
            carrier_code: serde_json::from_value(input["carrier_code"].clone()).unwrap(),
            pickup_confirmation_number: str_field(input, "pickup_confirmation_number").to_string(),
            scheduled_date: str_field(input, "scheduled_date").to_string(),
            location: str_field(input, "location").to_string(),
            courier_remarks: input["courier_remarks"].as_str().map(str::to_string),
        };
        let request = c.build_cancel_pickup(&cancel).unwrap();
        verify(&c, &case, request);
    }
}

// ---------------------------------------------------------------------------
// Locator
// ---------------------------------------------------------------------------

fn dropoff_service(name: &str) -> DropoffService {
    match name {
        "Express" => DropoffService::Express,
        "Ground" => DropoffService::Ground,
        "FedExStaffed" => DropoffService::FedExStaffed,
        "FedExSelfService" => DropoffService::FedExSelfService,
        "FedExAuthorizedShippingCenter" => DropoffService::FedExAuthorizedShippingCenter,
        "HoldAtLocation" => DropoffService::HoldAtLocation,
        other => panic!("unknown dropoff service: {other}"),
    }
}

#[test]
fn locator_test_vectors() {
    let c = client();
    for case in cases(include_str!("../../test-vectors/locator.json")) {
        let input = &case["input"];
        let query = LocatorQuery {
            country_code: str_field(input, "country_code").to_string(),
            services: input["services"]
                .as_array()
                .unwrap()
                .iter()
                .map(|s| dropoff_service(s.as_str().unwrap()))
                .collect(),
            near_to_address: None,
            near_to_phone_number: input["near_to_phone_number"].as_str().map(str::to_string),
        };
        let request = c.build_locator(&query).unwrap();
        verify(&c, &case, request);
    }
}
