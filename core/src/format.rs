//! Formatters producing canonical FedEx sub-structures.
//!
//! Every function here is pure apart from `date`/`time`, which read the
//! local clock for relative inputs. Values are taken as given: garbage in is
//! garbage in the request.

use chrono::{DateTime, Duration, Local, NaiveDate, NaiveDateTime, TimeZone};

use crate::error::{FedexError, Result};
use crate::types::{Address, Contact, Dimensions, LinearUnits, Money, Weight, WeightUnits};

pub fn contact(name: &str, phone: &str, company: Option<&str>) -> Contact {
    Contact {
        person_name: name.to_string(),
        company_name: company.unwrap_or("None").to_string(),
        phone_number: phone.to_string(),
    }
}

/// A residential US address. Use `Address::with_country` and
/// `Address::with_residential` for anything else.
pub fn address(street_lines: &[&str], city: &str, state: &str, zip: &str) -> Address {
    Address {
        street_lines: street_lines.iter().map(|s| s.to_string()).collect(),
        city: city.to_string(),
        state_or_province_code: state.to_string(),
        postal_code: zip.to_string(),
        country_code: "US".to_string(),
        residential: true,
    }
}

pub fn weight(value: f64, units: WeightUnits) -> Weight {
    Weight { units, value }
}

pub fn dimensions(length: u32, width: u32, height: u32, units: LinearUnits) -> Dimensions {
    Dimensions {
        length,
        width,
        height,
        units,
    }
}

/// An amount in US dollars.
pub fn price(amount: f64) -> Money {
    Money::new(amount, "USD")
}

pub fn money(amount: f64, currency: &str) -> Money {
    Money::new(amount, currency)
}

/// Calendar date (`YYYY-MM-DD`) for `value`.
pub fn date(value: &str) -> Result<String> {
    Ok(parse_moment(value)?.format("%Y-%m-%d").to_string())
}

/// Unix timestamp in seconds for `value`.
pub fn time(value: &str) -> Result<i64> {
    Ok(parse_moment(value)?.timestamp())
}

/// Resolve `now`/`today`/`tomorrow`/`yesterday`, RFC 3339, `YYYY-MM-DD` or
/// `YYYY-MM-DD HH:MM:SS` (local time) into a point in time.
pub fn parse_moment(value: &str) -> Result<DateTime<Local>> {
    let value = value.trim();
    let now = Local::now();
    match value.to_ascii_lowercase().as_str() {
        "" | "now" | "today" => return Ok(now),
        "tomorrow" => return Ok(now + Duration::days(1)),
        "yesterday" => return Ok(now - Duration::days(1)),
        _ => {}
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(value) {
        return Ok(dt.with_timezone(&Local));
    }
    let naive = NaiveDateTime::parse_from_str(value, "%Y-%m-%d %H:%M:%S")
        .ok()
        .or_else(|| {
            NaiveDate::parse_from_str(value, "%Y-%m-%d")
                .ok()
                .and_then(|d| d.and_hms_opt(0, 0, 0))
        })
        .ok_or_else(|| FedexError::InvalidDate(value.to_string()))?;

    Local
        .from_local_datetime(&naive)
        .earliest()
        .ok_or_else(|| FedexError::InvalidDate(value.to_string()))
}
