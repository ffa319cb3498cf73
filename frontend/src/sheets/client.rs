use gloo_net::http::Request;
use gloo_timers::callback::Timeout;
use log::{error, warn};
use serde::Serialize;
use serde_json::Value;
use thiserror::Error;
use web_sys::{AbortController, RequestMode};

use crate::config;

use super::models::{
    parse_banners, parse_settings, parse_testimonials, Banner, DemoBooking, NewBanner,
    NewTestimonial, SettingEntry, Settings, Testimonial, BANNERS_SHEET, BOOKINGS_SHEET,
    SETTINGS_SHEET, TESTIMONIALS_SHEET,
};
use super::row::SheetRow;
use super::validation::validate_booking;

const CONNECTIVITY_TIMEOUT_MS: u32 = 5_000;

#[derive(Debug, Error)]
pub enum SheetError {
    #[error("sheet endpoint is not configured")]
    Unconfigured,
    #[error("request failed: {0}")]
    Network(String),
    #[error("endpoint answered with status {0}")]
    Status(u16),
    #[error("unexpected response: {0}")]
    Decode(String),
}

/// Result of a write. Writes go out in `no-cors` mode, so the browser never
/// lets us see whether the row actually landed.
#[derive(Clone, Debug, PartialEq)]
pub enum SubmitOutcome {
    /// Handed to the network; the remote outcome is unknown.
    Submitted,
    /// Rejected locally, nothing was sent.
    Invalid(String),
    /// The request could not be dispatched at all.
    Unreachable(String),
}

#[derive(Serialize)]
struct SheetPayload<'a, T: Serialize> {
    sheet: &'a str,
    #[serde(flatten)]
    fields: &'a T,
}

#[derive(Clone, Debug, PartialEq)]
pub struct SheetClient {
    endpoint: String,
}

impl Default for SheetClient {
    fn default() -> Self {
        Self::new(config::APPS_SCRIPT_URL)
    }
}

impl SheetClient {
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
        }
    }

    pub fn read_url(&self, sheet: &str) -> String {
        format!("{}?sheet={}", self.endpoint, urlencoding::encode(sheet))
    }

    fn ensure_configured(&self) -> Result<(), SheetError> {
        if self.endpoint.trim().is_empty() {
            return Err(SheetError::Unconfigured);
        }
        Ok(())
    }

    pub async fn fetch_rows(&self, sheet: &str) -> Result<Vec<SheetRow>, SheetError> {
        self.ensure_configured()?;
        let response = Request::get(&self.read_url(sheet))
            .send()
            .await
            .map_err(|e| SheetError::Network(e.to_string()))?;
        if !response.ok() {
            return Err(SheetError::Status(response.status()));
        }
        let body = response
            .json::<Value>()
            .await
            .map_err(|e| SheetError::Decode(e.to_string()))?;
        Ok(rows_from_body(sheet, body))
    }

    pub async fn fetch_testimonials(&self) -> Result<Vec<Testimonial>, SheetError> {
        let rows = self.fetch_rows(TESTIMONIALS_SHEET).await?;
        Ok(parse_testimonials(&rows))
    }

    pub async fn fetch_banners(&self) -> Result<Vec<Banner>, SheetError> {
        let rows = self.fetch_rows(BANNERS_SHEET).await?;
        Ok(parse_banners(&rows))
    }

    pub async fn fetch_settings(&self) -> Result<Settings, SheetError> {
        let rows = self.fetch_rows(SETTINGS_SHEET).await?;
        Ok(parse_settings(&rows))
    }

    /// Pings the settings tab, giving up after five seconds.
    pub async fn check_connectivity(&self) -> bool {
        if self.ensure_configured().is_err() {
            return false;
        }
        let controller = match AbortController::new() {
            Ok(controller) => controller,
            Err(e) => {
                error!("AbortController unavailable: {:?}", e);
                return false;
            }
        };
        let signal = controller.signal();
        let _deadline = Timeout::new(CONNECTIVITY_TIMEOUT_MS, move || controller.abort());

        match Request::get(&self.read_url(SETTINGS_SHEET))
            .abort_signal(Some(&signal))
            .send()
            .await
        {
            Ok(response) => response.ok(),
            Err(e) => {
                error!("Connectivity ping failed: {}", e);
                false
            }
        }
    }

    /// Appends one row to `sheet`. The Apps Script stamps the time server side.
    pub async fn append<T: Serialize>(&self, sheet: &str, fields: &T) -> SubmitOutcome {
        if self.ensure_configured().is_err() {
            return SubmitOutcome::Unreachable(SheetError::Unconfigured.to_string());
        }
        let body = match encode_payload(sheet, fields) {
            Ok(body) => body,
            Err(outcome) => return outcome,
        };
        let request = Request::post(&self.endpoint)
            .mode(RequestMode::NoCors)
            .header("Content-Type", "application/json")
            .body(body);
        match request.send().await {
            Ok(_) => SubmitOutcome::Submitted,
            Err(e) => {
                error!("Append to sheet '{}' failed: {}", sheet, e);
                SubmitOutcome::Unreachable(e.to_string())
            }
        }
    }

    pub async fn add_demo_booking(&self, booking: &DemoBooking) -> SubmitOutcome {
        if let Err(e) = validate_booking(booking) {
            return SubmitOutcome::Invalid(e.to_string());
        }
        self.append(BOOKINGS_SHEET, booking).await
    }

    pub async fn add_testimonial(&self, testimonial: &NewTestimonial) -> SubmitOutcome {
        if testimonial.name.trim().is_empty() || testimonial.feedback.trim().is_empty() {
            return SubmitOutcome::Invalid("Client name and feedback are required.".to_string());
        }
        self.append(TESTIMONIALS_SHEET, testimonial).await
    }

    pub async fn add_banner(&self, banner: &NewBanner) -> SubmitOutcome {
        if banner.title.trim().is_empty() && banner.image_url.trim().is_empty() {
            return SubmitOutcome::Invalid("A banner needs a title or an image.".to_string());
        }
        self.append(BANNERS_SHEET, banner).await
    }

    /// One row per entry, sent in order. Stops at the first entry that could
    /// not be dispatched.
    pub async fn update_settings(&self, entries: &[(String, String)]) -> SubmitOutcome {
        for (key, value) in entries {
            let entry = SettingEntry {
                setting_key: key.clone(),
                setting_value: value.clone(),
            };
            let outcome = self.append(SETTINGS_SHEET, &entry).await;
            if outcome != SubmitOutcome::Submitted {
                return outcome;
            }
        }
        SubmitOutcome::Submitted
    }
}

// An unencodable row never leaves the browser, same as a failed dispatch.
fn encode_payload<T: Serialize>(sheet: &str, fields: &T) -> Result<String, SubmitOutcome> {
    serde_json::to_string(&SheetPayload { sheet, fields }).map_err(|e| {
        error!("Could not encode row for sheet '{}': {}", sheet, e);
        SubmitOutcome::Unreachable(e.to_string())
    })
}

// The script answers `{"error": ...}` instead of an array when something broke
// on its side; that reads as an empty sheet.
fn rows_from_body(sheet: &str, body: Value) -> Vec<SheetRow> {
    match body {
        Value::Array(items) => items
            .into_iter()
            .filter_map(|item| match item {
                Value::Object(fields) => Some(SheetRow::new(fields)),
                _ => None,
            })
            .collect(),
        other => {
            warn!("Sheet '{}' returned a non-array body: {}", sheet, other);
            Vec::new()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn read_url_encodes_sheet_name() {
        let client = SheetClient::new("https://script.example/exec");
        assert_eq!(client.read_url("demo book"), "https://script.example/exec?sheet=demo%20book");
        assert_eq!(client.read_url("ADS"), "https://script.example/exec?sheet=ADS");
    }

    #[test]
    fn payload_puts_sheet_first_and_keeps_field_order() {
        let testimonial = NewTestimonial {
            name: "Acme".to_string(),
            logo: "https://i.ibb.co/a.png".to_string(),
            feedback: "Great".to_string(),
        };
        let body = serde_json::to_string(&SheetPayload { sheet: "admin", fields: &testimonial }).unwrap();
        assert_eq!(
            body,
            r#"{"sheet":"admin","client_name":"Acme","logo_url":"https://i.ibb.co/a.png","feedback":"Great"}"#
        );
    }

    struct Unencodable;

    impl Serialize for Unencodable {
        fn serialize<S: serde::Serializer>(&self, _serializer: S) -> Result<S::Ok, S::Error> {
            Err(serde::ser::Error::custom("no json form"))
        }
    }

    #[test]
    fn encoding_failure_is_a_dispatch_failure() {
        match encode_payload("admin", &Unencodable) {
            Err(SubmitOutcome::Unreachable(reason)) => assert!(reason.contains("no json form")),
            other => panic!("expected Unreachable, got {:?}", other),
        }
        let booking = DemoBooking::default();
        assert!(encode_payload(BOOKINGS_SHEET, &booking).unwrap().starts_with(r#"{"sheet":"demo book""#));
    }

    #[test]
    fn non_array_bodies_read_as_empty() {
        assert!(rows_from_body("ADS", json!({ "error": "Sheet not found" })).is_empty());
        let rows = rows_from_body("ADS", json!([{ "CONTENT": "a" }, "stray", 3]));
        assert_eq!(rows.len(), 1);
    }

    #[test]
    fn blank_endpoint_is_unconfigured() {
        let client = SheetClient::new("  ");
        assert!(matches!(client.ensure_configured(), Err(SheetError::Unconfigured)));
    }
}
