//! Per-transaction shipment state.
//!
//! # Design
//! A `ShipmentBuilder` accumulates everything a rate, validate or process
//! call needs: shipper, recipient, packages, customs, insurance and the
//! shipping charges payor. Dispatch only ever borrows it and produces a new
//! request value, so one builder can be quoted and then shipped without the
//! first request leaking into the second. Start a new transaction with a new
//! builder or `clear()`.

use chrono::{DateTime, Local, SecondsFormat};
use serde::Serialize;

use crate::error::{FedexError, Result};
use crate::types::{Address, Contact, Dimensions, DocumentContent, Money, PaymentType, Weight};

/// Shipper or recipient as sent in `RequestedShipment`.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct Party {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub contact: Option<Contact>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<Address>,
}

impl Party {
    fn assign(&mut self, address: Address, contact: Option<Contact>) {
        if let Some(contact) = contact {
            self.contact = Some(contact);
        }
        self.address = Some(address);
    }

    pub fn country_code(&self) -> Option<&str> {
        self.address.as_ref().map(|a| a.country_code.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct RequestedPackageLineItem {
    pub sequence_number: usize,
    pub group_package_count: usize,
    pub weight: Weight,
    pub dimensions: Dimensions,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExportDetail {
    #[serde(rename = "B13AFilingOption")]
    pub b13a_filing_option: String,
}

impl Default for ExportDetail {
    fn default() -> Self {
        Self {
            b13a_filing_option: "NOT_REQUIRED".to_string(),
        }
    }
}

/// One customs commodity line.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct Commodity {
    pub name: String,
    pub number_of_pieces: u32,
    pub description: String,
    pub country_of_manufacture: String,
    pub harmonized_code: String,
    pub weight: Weight,
    pub quantity: u32,
    pub quantity_units: String,
    pub unit_price: Money,
    pub customs_value: Money,
}

impl Commodity {
    /// A single piece, single unit commodity made in the US under the
    /// printed-matter harmonized code.
    pub fn new(description: &str, weight: Weight, unit_price: Money) -> Self {
        Self {
            name: description.to_string(),
            number_of_pieces: 1,
            description: description.to_string(),
            country_of_manufacture: "US".to_string(),
            harmonized_code: "48201020".to_string(),
            weight,
            quantity: 1,
            quantity_units: "EA".to_string(),
            customs_value: unit_price.clone(),
            unit_price,
        }
    }

    pub fn harmonized_code(mut self, code: &str) -> Self {
        self.harmonized_code = code.to_string();
        self
    }

    pub fn country_of_manufacture(mut self, country: &str) -> Self {
        self.country_of_manufacture = country.to_string();
        self
    }

    pub fn name(mut self, name: &str) -> Self {
        self.name = name.to_string();
        self
    }

    pub fn pieces(mut self, pieces: u32) -> Self {
        self.number_of_pieces = pieces;
        self
    }

    /// Set quantity and units; the customs value follows the quantity,
    /// rounded to cents.
    pub fn quantity(mut self, quantity: u32, units: &str) -> Self {
        self.quantity = quantity;
        self.quantity_units = units.to_string();
        let total = (self.unit_price.amount * f64::from(quantity) * 100.0).round() / 100.0;
        self.customs_value = Money::new(total, &self.unit_price.currency);
        self
    }
}

/// Customs detail as collected by the builder. The duties payor is
/// resolved against the client configuration at dispatch time.
#[derive(Debug, Clone, PartialEq)]
pub struct CustomsClearance {
    pub duties_payment: PaymentType,
    pub document_content: DocumentContent,
    pub customs_value: Money,
    pub export_detail: ExportDetail,
    pub commodities: Vec<Commodity>,
}

#[derive(Debug, Clone)]
pub struct ShipmentBuilder {
    shipper: Party,
    recipient: Party,
    package_line_items: Vec<RequestedPackageLineItem>,
    customs: Option<CustomsClearance>,
    insured_value: Option<Money>,
    shipping_charges: Option<PaymentType>,
    ship_timestamp: DateTime<Local>,
}

impl Default for ShipmentBuilder {
    fn default() -> Self {
        Self {
            shipper: Party::default(),
            recipient: Party::default(),
            package_line_items: Vec::new(),
            customs: None,
            insured_value: None,
            shipping_charges: None,
            ship_timestamp: Local::now(),
        }
    }
}

impl ShipmentBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the shipper address. The contact is only replaced when given.
    pub fn set_shipper(&mut self, address: Address, contact: Option<Contact>) -> &mut Self {
        self.shipper.assign(address, contact);
        self
    }

    /// Replace the recipient address. The contact is only replaced when given.
    pub fn set_recipient(&mut self, address: Address, contact: Option<Contact>) -> &mut Self {
        self.recipient.assign(address, contact);
        self
    }

    /// Append a package; every package's group count is rewritten to the
    /// new total.
    pub fn add_package_line_item(&mut self, weight: Weight, dimensions: Dimensions) -> &mut Self {
        let package_count = self.package_line_items.len() + 1;
        self.package_line_items.push(RequestedPackageLineItem {
            sequence_number: package_count,
            group_package_count: package_count,
            weight,
            dimensions,
        });
        for item in &mut self.package_line_items {
            item.group_package_count = package_count;
        }
        self
    }

    /// Start customs detail with an empty commodity list, dropping any
    /// commodities added before.
    pub fn set_custom_clearance_detail(
        &mut self,
        duties_payment: PaymentType,
        customs_value: Money,
        document_content: DocumentContent,
        export_detail: ExportDetail,
    ) -> &mut Self {
        self.customs = Some(CustomsClearance {
            duties_payment,
            document_content,
            customs_value,
            export_detail,
            commodities: Vec::new(),
        });
        self
    }

    pub fn add_commodity(&mut self, commodity: Commodity) -> Result<&mut Self> {
        let customs = self.customs.as_mut().ok_or_else(|| {
            FedexError::precondition("Method add_commodity requires set_custom_clearance_detail")
        })?;
        customs.commodities.push(commodity);
        Ok(self)
    }

    pub fn set_insurance(&mut self, amount: f64, currency: &str) -> &mut Self {
        self.insured_value = Some(Money::new(amount, currency));
        self
    }

    pub fn set_shipping_charges_payment(&mut self, payment_type: PaymentType) -> &mut Self {
        self.shipping_charges = Some(payment_type);
        self
    }

    pub fn set_ship_timestamp(&mut self, timestamp: DateTime<Local>) -> &mut Self {
        self.ship_timestamp = timestamp;
        self
    }

    /// Forget everything and start a new transaction.
    pub fn clear(&mut self) {
        *self = Self::default();
    }

    pub fn shipper(&self) -> &Party {
        &self.shipper
    }

    pub fn recipient(&self) -> &Party {
        &self.recipient
    }

    pub fn package_line_items(&self) -> &[RequestedPackageLineItem] {
        &self.package_line_items
    }

    pub fn customs(&self) -> Option<&CustomsClearance> {
        self.customs.as_ref()
    }

    pub fn insured_value(&self) -> Option<&Money> {
        self.insured_value.as_ref()
    }

    pub fn shipping_charges(&self) -> Option<PaymentType> {
        self.shipping_charges
    }

    pub fn ship_timestamp(&self) -> String {
        self.ship_timestamp.to_rfc3339_opts(SecondsFormat::Secs, false)
    }

    /// Shipper and recipient must both have an address before rating or
    /// shipping.
    pub(crate) fn require_parties(&self) -> Result<()> {
        if self.shipper.address.is_none() {
            return Err(FedexError::requires("shipper"));
        }
        if self.recipient.address.is_none() {
            return Err(FedexError::requires("recipient"));
        }
        Ok(())
    }

    /// True when either party sits outside `home_country`.
    pub fn is_international(&self, home_country: &str) -> bool {
        [&self.shipper, &self.recipient]
            .iter()
            .any(|party| party.country_code().is_some_and(|code| code != home_country))
    }
}
