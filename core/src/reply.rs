//! Decoded FedEx replies.
//!
//! A reply is kept as the loosely typed tree the SOAP decoder produced, plus
//! the two fields every FedEx reply carries: the highest notification
//! severity and the notifications themselves. Typed views (`rate_quotes`,
//! `completed_packages`) pull out the parts callers usually want.

use std::fmt;
use std::str::FromStr;

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use serde_json::Value;

use crate::error::{FedexError, Result};
use crate::request::Operation;
use crate::types::Money;

/// Fallback message when a failed reply carries no notifications.
pub const NO_NOTIFICATIONS_MESSAGE: &str = "Unable to connect with Fedex";

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Severity {
    Success,
    Note,
    Warning,
    Error,
    Failure,
}

impl FromStr for Severity {
    type Err = FedexError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "SUCCESS" => Ok(Severity::Success),
            "NOTE" => Ok(Severity::Note),
            "WARNING" => Ok(Severity::Warning),
            "ERROR" => Ok(Severity::Error),
            "FAILURE" => Ok(Severity::Failure),
            other => Err(FedexError::MalformedReply(format!("unknown severity {other:?}"))),
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Severity::Success => "SUCCESS",
            Severity::Note => "NOTE",
            Severity::Warning => "WARNING",
            Severity::Error => "ERROR",
            Severity::Failure => "FAILURE",
        };
        f.write_str(s)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Notification {
    pub severity: Option<Severity>,
    pub source: String,
    pub code: String,
    pub message: String,
}

impl Notification {
    fn from_value(value: &Value) -> Self {
        let text = |key: &str| value.get(key).and_then(Value::as_str).unwrap_or_default().to_string();
        Self {
            severity: value
                .get("Severity")
                .and_then(Value::as_str)
                .and_then(|s| s.parse().ok()),
            source: text("Source"),
            code: text("Code"),
            message: text("Message"),
        }
    }
}

/// One service quoted by `getRates`.
#[derive(Debug, Clone, PartialEq)]
pub struct RateQuote {
    pub service_type: String,
    /// `FEDEX_GROUND` becomes `Fedex Ground`.
    pub display_name: String,
    pub total_net_charge: Money,
}

/// One package of a processed shipment, with its decoded label images.
#[derive(Debug, Clone, PartialEq)]
pub struct CompletedPackage {
    pub tracking_number: String,
    pub label: Option<Vec<u8>>,
    pub cod_label: Option<Vec<u8>>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Reply {
    pub operation: Operation,
    pub highest_severity: Severity,
    pub notifications: Vec<Notification>,
    pub body: Value,
}

impl Reply {
    pub fn from_tree(operation: Operation, body: Value) -> Result<Self> {
        let highest_severity = body
            .get("HighestSeverity")
            .and_then(Value::as_str)
            .ok_or_else(|| {
                FedexError::MalformedReply(format!("{} reply has no HighestSeverity", operation.name()))
            })?
            .parse()?;
        let notifications = body
            .get("Notifications")
            .map(|n| as_list(n).into_iter().map(Notification::from_value).collect())
            .unwrap_or_default();

        Ok(Self {
            operation,
            highest_severity,
            notifications,
            body,
        })
    }

    pub fn is_failure(&self) -> bool {
        matches!(self.highest_severity, Severity::Failure | Severity::Error)
    }

    /// Human readable notification messages.
    pub fn messages(&self) -> Vec<String> {
        let messages: Vec<String> = self
            .notifications
            .iter()
            .filter(|n| !n.message.is_empty())
            .map(|n| n.message.clone())
            .collect();
        if messages.is_empty() {
            vec![NO_NOTIFICATIONS_MESSAGE.to_string()]
        } else {
            messages
        }
    }

    /// Look up a dotted path such as `CompletedShipmentDetail.MasterTrackingId`.
    /// Repeated elements resolve to their first occurrence.
    pub fn get(&self, path: &str) -> Option<&Value> {
        lookup(&self.body, path)
    }

    pub fn get_str(&self, path: &str) -> Option<&str> {
        self.get(path).and_then(Value::as_str)
    }

    pub fn rate_quotes(&self) -> Vec<RateQuote> {
        let Some(details) = self.body.get("RateReplyDetails") else {
            return Vec::new();
        };
        as_list(details)
            .into_iter()
            .filter_map(|detail| {
                let service_type = detail.get("ServiceType")?.as_str()?.to_string();
                let charge = lookup(detail, "RatedShipmentDetails.ShipmentRateDetail.TotalNetCharge")?;
                let amount = charge.get("Amount")?.as_str()?.parse().ok()?;
                let currency = charge.get("Currency").and_then(Value::as_str).unwrap_or("USD");
                Some(RateQuote {
                    display_name: display_name(&service_type),
                    service_type,
                    total_net_charge: Money::new(amount, currency),
                })
            })
            .collect()
    }

    pub fn completed_packages(&self) -> Result<Vec<CompletedPackage>> {
        let Some(details) = lookup(&self.body, "CompletedShipmentDetail.CompletedPackageDetails") else {
            return Ok(Vec::new());
        };
        as_list(details)
            .into_iter()
            .map(|detail| {
                let tracking_number = lookup(detail, "TrackingIds.TrackingNumber")
                    .and_then(Value::as_str)
                    .ok_or_else(|| FedexError::MalformedReply("completed package has no tracking number".to_string()))?
                    .to_string();
                Ok(CompletedPackage {
                    label: decode_image(detail, "Label.Parts.Image")?,
                    cod_label: decode_image(detail, "CodReturnDetail.Label.Parts.Image")?,
                    tracking_number,
                })
            })
            .collect()
    }
}

fn decode_image(detail: &Value, path: &str) -> Result<Option<Vec<u8>>> {
    let Some(encoded) = lookup(detail, path).and_then(Value::as_str) else {
        return Ok(None);
    };
    let compact: String = encoded.chars().filter(|c| !c.is_ascii_whitespace()).collect();
    STANDARD
        .decode(compact)
        .map(Some)
        .map_err(|e| FedexError::MalformedReply(format!("{path}: {e}")))
}

fn lookup<'a>(root: &'a Value, path: &str) -> Option<&'a Value> {
    path.split('.').try_fold(root, |node, key| {
        let node = match node {
            Value::Array(items) => items.first()?,
            other => other,
        };
        node.get(key)
    })
    .map(|found| match found {
        Value::Array(items) => items.first().unwrap_or(found),
        other => other,
    })
}

/// A decoded element that may occur once (object) or many times (array).
fn as_list(value: &Value) -> Vec<&Value> {
    match value {
        Value::Array(items) => items.iter().collect(),
        other => vec![other],
    }
}

fn display_name(service_type: &str) -> String {
    service_type
        .split('_')
        .filter(|w| !w.is_empty())
        .map(|word| {
            let lower = word.to_lowercase();
            let mut chars = lower.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}
