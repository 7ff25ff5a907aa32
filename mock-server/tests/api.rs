use axum::http::{self, Request, StatusCode};
use http_body_util::BodyExt;
use mock_server::{app, MOCK_LABEL, UNKNOWN_TRACKING_NUMBER};
use tower::ServiceExt;

const AUTH: &str = "<WebAuthenticationDetail><UserCredential><Key>test-key</Key><Password>p</Password></UserCredential></WebAuthenticationDetail>";

async fn body_text(response: axum::response::Response) -> String {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    String::from_utf8(bytes.to_vec()).unwrap()
}

fn envelope(element: &str, inner: &str) -> String {
    format!(
        r#"<?xml version="1.0" encoding="UTF-8"?>
<soapenv:Envelope xmlns:soapenv="http://schemas.xmlsoap.org/soap/envelope/">
  <soapenv:Body><{element} xmlns="http://fedex.com/ws/test">{inner}</{element}></soapenv:Body>
</soapenv:Envelope>"#
    )
}

fn soap_request(body: String) -> Request<String> {
    Request::builder()
        .method("POST")
        .uri("/web-services")
        .header(http::header::CONTENT_TYPE, "text/xml; charset=utf-8")
        .body(body)
        .unwrap()
}

fn between<'a>(xml: &'a str, open: &str, close: &str) -> &'a str {
    let start = xml.find(open).unwrap() + open.len();
    let end = start + xml[start..].find(close).unwrap();
    &xml[start..end]
}

// --- rates ---

#[tokio::test]
async fn rates_quote_every_service_when_none_requested() {
    let resp = app()
        .oneshot(soap_request(envelope(
            "RateRequest",
            &format!("{AUTH}<RequestedShipment><DropoffType>REGULAR_PICKUP</DropoffType></RequestedShipment>"),
        )))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    let xml = body_text(resp).await;
    assert!(xml.contains("<HighestSeverity>SUCCESS</HighestSeverity>"));
    assert!(xml.contains("<ServiceType>FEDEX_GROUND</ServiceType>"));
    assert!(xml.contains("<Amount>12.34</Amount>"));
    assert!(xml.contains("<ServiceType>GROUND_HOME_DELIVERY</ServiceType>"));
    assert!(xml.contains("<Amount>15.10</Amount>"));
}

#[tokio::test]
async fn rates_quote_only_requested_service() {
    let resp = app()
        .oneshot(soap_request(envelope(
            "RateRequest",
            &format!("{AUTH}<RequestedShipment><ServiceType>GROUND_HOME_DELIVERY</ServiceType></RequestedShipment>"),
        )))
        .await
        .unwrap();

    let xml = body_text(resp).await;
    assert_eq!(xml.matches("<RateReplyDetails>").count(), 1);
    assert!(xml.contains("<Amount>15.10</Amount>"));
}

// --- authentication ---

#[tokio::test]
async fn missing_key_fails_authentication() {
    let resp = app()
        .oneshot(soap_request(envelope(
            "TrackRequest",
            "<WebAuthenticationDetail><UserCredential><Key></Key></UserCredential></WebAuthenticationDetail>",
        )))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    let xml = body_text(resp).await;
    assert!(xml.contains("<TrackReply>"));
    assert!(xml.contains("<HighestSeverity>FAILURE</HighestSeverity>"));
    assert!(xml.contains("<Message>Authentication Failed</Message>"));
}

// --- faults ---

#[tokio::test]
async fn unknown_operation_returns_fault() {
    let resp = app()
        .oneshot(soap_request(envelope("UploadDocumentsRequest", AUTH)))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let xml = body_text(resp).await;
    assert!(xml.contains("<soapenv:Fault>"));
    assert!(xml.contains("unknown operation UploadDocumentsRequest"));
}

#[tokio::test]
async fn malformed_envelope_returns_fault() {
    let resp = app()
        .oneshot(soap_request("not xml at all".to_string()))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert!(body_text(resp).await.contains("<faultcode>soapenv:Client</faultcode>"));
}

#[tokio::test]
async fn get_is_not_routed() {
    let resp = app()
        .oneshot(Request::builder().uri("/web-services").body(String::new()).unwrap())
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::METHOD_NOT_ALLOWED);
}

// --- shipment lifecycle ---

#[tokio::test]
async fn processed_shipment_can_be_tracked_and_deleted() {
    let app = app();

    let resp = app
        .clone()
        .oneshot(soap_request(envelope(
            "ProcessShipmentRequest",
            &format!(
                "{AUTH}<RequestedShipment><ServiceType>FEDEX_GROUND</ServiceType>\
                 <RequestedPackageLineItems><SequenceNumber>1</SequenceNumber></RequestedPackageLineItems>\
                 </RequestedShipment>"
            ),
        )))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let xml = body_text(resp).await;
    let tracking = between(&xml, "<TrackingNumber>", "</TrackingNumber>").to_string();
    assert_eq!(tracking, "794600000001");
    let image = between(&xml, "<Image>", "</Image>");
    assert_eq!(image, "JVBERi0xLjQgbW9jayBsYWJlbA==");
    assert_eq!(MOCK_LABEL, b"%PDF-1.4 mock label");

    let resp = app
        .clone()
        .oneshot(soap_request(envelope(
            "TrackRequest",
            &format!("{AUTH}<PackageIdentifier><Value>{tracking}</Value><Type>TRACKING_NUMBER_OR_DOORTAG</Type></PackageIdentifier>"),
        )))
        .await
        .unwrap();
    let xml = body_text(resp).await;
    assert!(xml.contains("<HighestSeverity>SUCCESS</HighestSeverity>"));
    assert!(xml.contains("<StatusCode>OC</StatusCode>"));

    let delete = envelope(
        "DeleteShipmentRequest",
        &format!("{AUTH}<TrackingId><TrackingIdType>GROUND</TrackingIdType><TrackingNumber>{tracking}</TrackingNumber></TrackingId>"),
    );
    let resp = app.clone().oneshot(soap_request(delete.clone())).await.unwrap();
    let xml = body_text(resp).await;
    assert!(xml.contains("<ShipmentReply>"));
    assert!(xml.contains("<HighestSeverity>SUCCESS</HighestSeverity>"));

    let resp = app.oneshot(soap_request(delete)).await.unwrap();
    assert!(body_text(resp).await.contains("<HighestSeverity>ERROR</HighestSeverity>"));
}

#[tokio::test]
async fn multi_package_shipment_gets_one_tracking_number_each() {
    let resp = app()
        .oneshot(soap_request(envelope(
            "ProcessShipmentRequest",
            &format!(
                "{AUTH}<RequestedShipment>\
                 <RequestedPackageLineItems><SequenceNumber>1</SequenceNumber></RequestedPackageLineItems>\
                 <RequestedPackageLineItems><SequenceNumber>2</SequenceNumber></RequestedPackageLineItems>\
                 </RequestedShipment>"
            ),
        )))
        .await
        .unwrap();

    let xml = body_text(resp).await;
    assert_eq!(xml.matches("<CompletedPackageDetails>").count(), 2);
    assert!(xml.contains("<TrackingNumber>794600000002</TrackingNumber>"));
}

#[tokio::test]
async fn unknown_tracking_number_fails() {
    let resp = app()
        .oneshot(soap_request(envelope(
            "TrackRequest",
            &format!("{AUTH}<PackageIdentifier><Value>{UNKNOWN_TRACKING_NUMBER}</Value></PackageIdentifier>"),
        )))
        .await
        .unwrap();

    let xml = body_text(resp).await;
    assert!(xml.contains("<HighestSeverity>FAILURE</HighestSeverity>"));
    assert!(xml.contains("<Code>6035</Code>"));
}

// --- pickups ---

#[tokio::test]
async fn pickup_can_be_cancelled_once() {
    let app = app();

    let resp = app
        .clone()
        .oneshot(soap_request(envelope("CreatePickupRequest", AUTH)))
        .await
        .unwrap();
    let xml = body_text(resp).await;
    let confirmation = between(&xml, "<PickupConfirmationNumber>", "</PickupConfirmationNumber>").to_string();
    assert_eq!(between(&xml, "<Location>", "</Location>"), "NQAA");

    let cancel = envelope(
        "CancelPickupRequest",
        &format!("{AUTH}<CarrierCode>FDXE</CarrierCode><PickupConfirmationNumber>{confirmation}</PickupConfirmationNumber>"),
    );
    let resp = app.clone().oneshot(soap_request(cancel.clone())).await.unwrap();
    assert!(body_text(resp).await.contains("<HighestSeverity>SUCCESS</HighestSeverity>"));

    let resp = app.oneshot(soap_request(cancel)).await.unwrap();
    assert!(body_text(resp).await.contains("<Message>Pickup confirmation number not found</Message>"));
}

// --- lookups ---

#[tokio::test]
async fn address_validation_echoes_each_address() {
    let resp = app()
        .oneshot(soap_request(envelope(
            "AddressValidationRequest",
            &format!(
                "{AUTH}<AddressesToValidate><Address><StreetLines>1 Main St</StreetLines><City>Austin</City></Address></AddressesToValidate>\
                 <AddressesToValidate><Address><StreetLines>2 Main St</StreetLines><City>Austin</City></Address></AddressesToValidate>"
            ),
        )))
        .await
        .unwrap();

    let xml = body_text(resp).await;
    assert_eq!(xml.matches("<AddressResults>").count(), 2);
    assert!(xml.contains("<StreetLines>2 Main St</StreetLines>"));
    assert!(xml.contains("<Score>100</Score>"));
}

#[tokio::test]
async fn postal_code_inquiry_echoes_postal_code() {
    let resp = app()
        .oneshot(soap_request(envelope(
            "PostalCodeInquiryRequest",
            &format!("{AUTH}<CarrierCode>FDXG</CarrierCode><PostalCode>38115</PostalCode><CountryCode>US</CountryCode>"),
        )))
        .await
        .unwrap();

    let xml = body_text(resp).await;
    assert!(xml.contains("<PostalCodeInquiryReply>"));
    assert!(xml.contains("<PostalCode>38115</PostalCode>"));
    assert!(xml.contains("<LocationId>MEMA</LocationId>"));
}
