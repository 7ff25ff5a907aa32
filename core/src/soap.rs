//! SOAP envelope encoding and decoding.
//!
//! # Design
//! Requests travel as an ordered JSON tree until this module turns them into
//! XML: objects become child elements in key order, arrays become repeated
//! elements with the same name, scalars become text, nulls are dropped.
//! Replies take the opposite path. Every leaf comes back as a string and a
//! repeated element becomes an array, so callers must accept both a single
//! object and a list wherever FedEx allows more than one occurrence.

use std::io::BufReader;

use serde_json::{Map, Value};
use xmltree::{Element, EmitterConfig, XMLNode};

use crate::error::{FedexError, Result};

pub const SOAP_ENV_NS: &str = "http://schemas.xmlsoap.org/soap/envelope/";

/// Wrap `tree` as `<element xmlns="namespace">` inside a SOAP 1.1 envelope.
pub fn encode_envelope(element: &str, namespace: &str, tree: &Value) -> Result<String> {
    let mut request = Element::new(element);
    request
        .attributes
        .insert("xmlns".to_string(), namespace.to_string());
    let fields = tree
        .as_object()
        .ok_or_else(|| FedexError::Xml(format!("{element} must be an object, got {tree}")))?;
    append_fields(&mut request, fields);

    let mut body = Element::new("soapenv:Body");
    body.children.push(XMLNode::Element(request));

    let mut envelope = Element::new("soapenv:Envelope");
    envelope
        .attributes
        .insert("xmlns:soapenv".to_string(), SOAP_ENV_NS.to_string());
    envelope.children.push(XMLNode::Element(body));

    let mut buf = Vec::new();
    let config = EmitterConfig::new()
        .write_document_declaration(true)
        .perform_indent(true)
        .indent_string("  ");
    envelope
        .write_with_config(&mut buf, config)
        .map_err(|e| FedexError::Xml(e.to_string()))?;

    String::from_utf8(buf).map_err(|e| FedexError::Xml(e.to_string()))
}

fn append_fields(parent: &mut Element, fields: &Map<String, Value>) {
    for (name, value) in fields {
        match value {
            Value::Array(items) => {
                for item in items {
                    append_value(parent, name, item);
                }
            }
            other => append_value(parent, name, other),
        }
    }
}

fn append_value(parent: &mut Element, name: &str, value: &Value) {
    let mut child = Element::new(name);
    match value {
        Value::Null => return,
        Value::Object(fields) => append_fields(&mut child, fields),
        Value::String(s) => child.children.push(XMLNode::Text(s.clone())),
        Value::Bool(b) => child.children.push(XMLNode::Text(b.to_string())),
        Value::Number(n) => child.children.push(XMLNode::Text(n.to_string())),
        // Nested arrays have no XML shape; flatten them into repeats.
        Value::Array(items) => {
            for item in items {
                append_value(parent, name, item);
            }
            return;
        }
    }
    parent.children.push(XMLNode::Element(child));
}

/// The first element inside `Body`, or the SOAP fault it carries.
#[derive(Debug, Clone, PartialEq)]
pub struct DecodedBody {
    /// Local name of the reply element, e.g. `RateReply`.
    pub element: String,
    pub tree: Value,
}

pub fn decode_envelope(xml: &str) -> Result<DecodedBody> {
    let root = Element::parse(BufReader::new(xml.as_bytes()))
        .map_err(|e| FedexError::MalformedReply(e.to_string()))?;
    if root.name != "Envelope" {
        return Err(FedexError::MalformedReply(format!(
            "expected Envelope, found {}",
            root.name
        )));
    }
    let body = child_elements(&root)
        .find(|e| e.name == "Body")
        .ok_or_else(|| FedexError::MalformedReply("missing SOAP Body".to_string()))?;
    let reply = child_elements(body)
        .next()
        .ok_or_else(|| FedexError::MalformedReply("empty SOAP Body".to_string()))?;

    if reply.name == "Fault" {
        return Err(fault(reply));
    }

    Ok(DecodedBody {
        element: reply.name.clone(),
        tree: element_to_value(reply),
    })
}

fn fault(elem: &Element) -> FedexError {
    let text = |name: &str| {
        elem.get_child(name)
            .and_then(|c| c.get_text())
            .map(|t| t.trim().to_string())
            .unwrap_or_default()
    };
    let mut message = text("faultstring");
    // FedEx puts the useful part of a fault in detail/desc.
    if let Some(desc) = elem
        .get_child("detail")
        .and_then(|d| find_descendant(d, "desc"))
        .and_then(|d| d.get_text())
    {
        message = format!("{message} ({})", desc.trim());
    }
    FedexError::SoapFault {
        code: text("faultcode"),
        message,
    }
}

fn find_descendant<'a>(elem: &'a Element, name: &str) -> Option<&'a Element> {
    child_elements(elem).find_map(|c| {
        if c.name == name {
            Some(c)
        } else {
            find_descendant(c, name)
        }
    })
}

fn child_elements(elem: &Element) -> impl Iterator<Item = &Element> {
    elem.children.iter().filter_map(|n| n.as_element())
}

/// Convert an element to JSON: leaves become strings, repeated children
/// become arrays.
pub fn element_to_value(elem: &Element) -> Value {
    let mut children = child_elements(elem).peekable();
    if children.peek().is_none() {
        let text = elem.get_text().map(|t| t.trim().to_string()).unwrap_or_default();
        return Value::String(text);
    }

    let mut map = Map::new();
    for child in children {
        let value = element_to_value(child);
        match map.get_mut(&child.name) {
            Some(Value::Array(items)) => items.push(value),
            Some(existing) => {
                let first = existing.take();
                *existing = Value::Array(vec![first, value]);
            }
            None => {
                map.insert(child.name.clone(), value);
            }
        }
    }
    Value::Object(map)
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn encode_wraps_request_in_envelope() {
        let tree = json!({"PackageIdentifier": {"Value": "123", "Type": "TRACKING_NUMBER_OR_DOORTAG"}});
        let xml = encode_envelope("TrackRequest", "http://fedex.com/ws/track/v5", &tree).unwrap();
        assert!(xml.contains(r#"xmlns:soapenv="http://schemas.xmlsoap.org/soap/envelope/""#));
        assert!(xml.contains("<soapenv:Body>"));
        assert!(xml.contains(r#"<TrackRequest xmlns="http://fedex.com/ws/track/v5">"#));
        assert!(xml.contains("<Value>123</Value>"));
        assert!(xml.contains("<Type>TRACKING_NUMBER_OR_DOORTAG</Type>"));
    }

    #[test]
    fn encode_repeats_arrays_and_keeps_order() {
        let tree = json!({
            "PackageCount": 2,
            "RequestedPackageLineItems": [{"SequenceNumber": 1}, {"SequenceNumber": 2}],
            "Residential": true,
            "Skipped": null
        });
        let xml = encode_envelope("RateRequest", "urn:test", &tree).unwrap();
        assert_eq!(xml.matches("<RequestedPackageLineItems>").count(), 2);
        assert!(xml.contains("<Residential>true</Residential>"));
        assert!(!xml.contains("Skipped"));

        let count = xml.find("<PackageCount>").unwrap();
        let items = xml.find("<RequestedPackageLineItems>").unwrap();
        let residential = xml.find("<Residential>").unwrap();
        assert!(count < items && items < residential);
    }

    #[test]
    fn encode_escapes_text() {
        let tree = json!({"CompanyName": "Smith & Sons <Ltd>"});
        let xml = encode_envelope("RateRequest", "urn:test", &tree).unwrap();
        assert!(xml.contains("Smith &amp; Sons &lt;Ltd>") || xml.contains("Smith &amp; Sons &lt;Ltd&gt;"));
    }

    #[test]
    fn encode_rejects_scalar_tree() {
        let err = encode_envelope("RateRequest", "urn:test", &json!("nope")).unwrap_err();
        assert!(matches!(err, FedexError::Xml(_)));
    }

    #[test]
    fn decode_turns_repeats_into_arrays() {
        let xml = r#"<?xml version="1.0"?>
<SOAP-ENV:Envelope xmlns:SOAP-ENV="http://schemas.xmlsoap.org/soap/envelope/">
  <SOAP-ENV:Header/>
  <SOAP-ENV:Body>
    <v10:RateReply xmlns:v10="http://fedex.com/ws/rate/v10">
      <v10:HighestSeverity>SUCCESS</v10:HighestSeverity>
      <v10:Notifications><v10:Message>ok</v10:Message></v10:Notifications>
      <v10:RateReplyDetails><v10:ServiceType>FEDEX_GROUND</v10:ServiceType></v10:RateReplyDetails>
      <v10:RateReplyDetails><v10:ServiceType>GROUND_HOME_DELIVERY</v10:ServiceType></v10:RateReplyDetails>
    </v10:RateReply>
  </SOAP-ENV:Body>
</SOAP-ENV:Envelope>"#;
        let decoded = decode_envelope(xml).unwrap();
        assert_eq!(decoded.element, "RateReply");
        assert_eq!(decoded.tree["HighestSeverity"], "SUCCESS");
        assert_eq!(decoded.tree["Notifications"]["Message"], "ok");
        assert_eq!(decoded.tree["RateReplyDetails"][1]["ServiceType"], "GROUND_HOME_DELIVERY");
    }

    #[test]
    fn decode_maps_fault_to_error() {
        let xml = r#"<soapenv:Envelope xmlns:soapenv="http://schemas.xmlsoap.org/soap/envelope/">
  <soapenv:Body>
    <soapenv:Fault>
      <faultcode>soapenv:Server</faultcode>
      <faultstring>Fault</faultstring>
      <detail><con:fault xmlns:con="http://www.bea.com/wli/sb/context"><con:reason>x</con:reason><con:desc>Validation failed</con:desc></con:fault></detail>
    </soapenv:Fault>
  </soapenv:Body>
</soapenv:Envelope>"#;
        match decode_envelope(xml).unwrap_err() {
            FedexError::SoapFault { code, message } => {
                assert_eq!(code, "soapenv:Server");
                assert_eq!(message, "Fault (Validation failed)");
            }
            other => panic!("expected SoapFault, got {other:?}"),
        }
    }

    #[test]
    fn decode_rejects_non_envelope() {
        assert!(matches!(decode_envelope("<html/>"), Err(FedexError::MalformedReply(_))));
        assert!(matches!(decode_envelope("not xml"), Err(FedexError::MalformedReply(_))));
    }

    #[test]
    fn round_trip_through_encoder_preserves_structure() {
        let tree = json!({
            "Shipper": {"Address": {"StreetLines": ["1 Main St", "Apt 2"], "City": "Memphis"}}
        });
        let xml = encode_envelope("RateRequest", "urn:test", &tree).unwrap();
        let decoded = decode_envelope(&xml).unwrap();
        assert_eq!(decoded.element, "RateRequest");
        assert_eq!(decoded.tree, tree);
    }
}
