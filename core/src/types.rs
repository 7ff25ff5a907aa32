//! Shared FedEx records and code lists.
//!
//! # Design
//! Field names follow the FedEx WSDL via `rename_all = "PascalCase"` and
//! fields are declared in the WSDL `xs:sequence` order, because the request
//! tree keeps declaration order all the way to the XML body. Code lists are
//! closed enums serialized to the FedEx tokens (`REGULAR_PICKUP`, `FDXG`, ...)
//! so that a misspelled token is a compile error instead of a FAILURE reply.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::FedexError;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Contact {
    pub person_name: String,
    pub company_name: String,
    pub phone_number: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Address {
    pub street_lines: Vec<String>,
    pub city: String,
    pub state_or_province_code: String,
    pub postal_code: String,
    pub country_code: String,
    pub residential: bool,
}

impl Address {
    pub fn with_country(mut self, country_code: &str) -> Self {
        self.country_code = country_code.to_string();
        self
    }

    pub fn with_residential(mut self, residential: bool) -> Self {
        self.residential = residential;
        self
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum WeightUnits {
    #[default]
    Lb,
    Kg,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Weight {
    pub units: WeightUnits,
    pub value: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum LinearUnits {
    #[default]
    In,
    Cm,
}

/// Package dimensions. FedEx only accepts whole units here.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Dimensions {
    pub length: u32,
    pub width: u32,
    pub height: u32,
    pub units: LinearUnits,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Money {
    pub currency: String,
    pub amount: f64,
}

impl Money {
    pub fn new(amount: f64, currency: &str) -> Self {
        Self {
            currency: currency.to_string(),
            amount,
        }
    }
}

/// FedEx operating companies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CarrierCode {
    #[serde(rename = "FDXC")]
    Cargo,
    #[serde(rename = "FDXE")]
    Express,
    #[serde(rename = "FDXG")]
    Ground,
    #[serde(rename = "FDCC")]
    CustomCritical,
    #[serde(rename = "FXFR")]
    Freight,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DropoffType {
    #[default]
    RegularPickup,
    RequestCourier,
    DropBox,
    BusinessServiceCenter,
    Station,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ServiceType {
    FedexGround,
    GroundHomeDelivery,
    SmartPost,
    FedexExpressSaver,
    #[serde(rename = "FEDEX_2_DAY")]
    Fedex2Day,
    #[serde(rename = "FEDEX_2_DAY_AM")]
    Fedex2DayAm,
    StandardOvernight,
    PriorityOvernight,
    FirstOvernight,
    InternationalEconomy,
    InternationalPriority,
    InternationalFirst,
    #[serde(rename = "FEDEX_1_DAY_FREIGHT")]
    Fedex1DayFreight,
    #[serde(rename = "FEDEX_2_DAY_FREIGHT")]
    Fedex2DayFreight,
    #[serde(rename = "FEDEX_3_DAY_FREIGHT")]
    Fedex3DayFreight,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PackagingType {
    #[default]
    YourPackaging,
    FedexEnvelope,
    FedexPak,
    FedexBox,
    FedexTube,
    #[serde(rename = "FEDEX_10KG_BOX")]
    Fedex10KgBox,
    #[serde(rename = "FEDEX_25KG_BOX")]
    Fedex25KgBox,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RateRequestType {
    Account,
    #[default]
    List,
    Preferred,
}

/// Who pays duties or shipping charges.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PaymentType {
    #[default]
    Sender,
    Recipient,
    ThirdParty,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DocumentContent {
    Documents,
    DocumentsOnly,
    #[default]
    NonDocuments,
    Derived,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TrackingIdType {
    Express,
    Fedex,
    Freight,
    #[default]
    Ground,
    Usps,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DeletionControl {
    #[default]
    DeleteOnePackage,
    DeleteAllPackages,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PickupRequestType {
    SameDay,
    FutureDay,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PackageLocation {
    None,
    #[default]
    Front,
    Rear,
    Side,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum BuildingPartCode {
    Apartment,
    Building,
    Department,
    Suite,
    Floor,
    Room,
}

/// Matching tolerance used by address validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Accuracy {
    Exact,
    Tight,
    Medium,
    #[default]
    Loose,
}

/// Label image formats. Also decides the extension of downloaded labels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum LabelImageType {
    #[default]
    #[serde(alias = "pdf")]
    Pdf,
    #[serde(alias = "png")]
    Png,
    #[serde(alias = "epl2")]
    Epl2,
    #[serde(alias = "zplii")]
    Zplii,
    #[serde(alias = "dpl")]
    Dpl,
}

impl LabelImageType {
    pub fn extension(&self) -> &'static str {
        match self {
            LabelImageType::Pdf => "pdf",
            LabelImageType::Png => "png",
            LabelImageType::Epl2 => "epl2",
            LabelImageType::Zplii => "zplii",
            LabelImageType::Dpl => "dpl",
        }
    }
}

impl FromStr for LabelImageType {
    type Err = FedexError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "pdf" => Ok(LabelImageType::Pdf),
            "png" => Ok(LabelImageType::Png),
            "epl2" => Ok(LabelImageType::Epl2),
            "zplii" => Ok(LabelImageType::Zplii),
            "dpl" => Ok(LabelImageType::Dpl),
            other => Err(FedexError::Config(format!("unknown label type: {other}"))),
        }
    }
}

impl fmt::Display for LabelImageType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.extension().to_ascii_uppercase())
    }
}
