//! Best-effort lead submission to an external CRM webhook.
//!
//! A failed submission is reported to the caller as a `LeadError`; callers
//! log it and carry on, the projection result never depends on it.

use std::sync::LazyLock;
use std::time::Duration;

use chrono::{DateTime, SecondsFormat, Utc};
use regex::Regex;
use serde::Serialize;
use thiserror::Error;

use crate::core::ProjectionInput;

pub const CALCULATOR_ID: &str = "retirement-tax-calculator";
pub const LEAD_SOURCE: &str = "Retirement Tax Calculator";
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);
pub const WEBHOOK_URL_ENV: &str = "ROTH_LEAD_WEBHOOK_URL";

static EMAIL_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^[A-Z0-9._%+-]+@[A-Z0-9.-]+\.[A-Z]{2,}$").expect("valid email pattern")
});

/// Applied to the digits only, so the optional `+` never matches.
static PHONE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\+?1?\d{10,11}$").expect("valid phone pattern"));

#[derive(Debug, Error)]
pub enum LeadError {
    #[error("lead webhook URL is not configured")]
    NotConfigured,
    #[error("{0}")]
    InvalidContact(String),
    #[error("webhook error ({status}): {message}")]
    Status { status: u16, message: String },
    #[error("webhook request failed: {0}")]
    Transport(#[from] reqwest::Error),
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Contact {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: String,
    pub state: String,
}

#[derive(Debug, Clone, Default)]
pub struct LeadConfig {
    pub webhook_url: Option<String>,
    pub timeout: Option<Duration>,
}

impl LeadConfig {
    pub fn from_env() -> Self {
        Self {
            webhook_url: std::env::var(WEBHOOK_URL_ENV).ok(),
            timeout: None,
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.webhook_url.as_deref().is_some_and(|url| !url.trim().is_empty())
    }

    pub fn client(&self) -> Result<reqwest::Client, LeadError> {
        let client = reqwest::Client::builder()
            .timeout(self.timeout.unwrap_or(DEFAULT_TIMEOUT))
            .build()?;
        Ok(client)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LeadMetadata {
    pub birth_year: i32,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LeadPayload {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: String,
    pub state: String,
    pub age: u32,
    pub qualified_account_value: f64,
    pub tax_bracket: f64,
    pub growth_rate: f64,
    pub calculator_id: &'static str,
    pub timestamp: String,
    pub source: &'static str,
    pub status: &'static str,
    pub metadata: LeadMetadata,
}

impl LeadPayload {
    pub fn new(contact: &Contact, input: &ProjectionInput, submitted_at: DateTime<Utc>) -> Self {
        Self {
            first_name: contact.first_name.trim().to_string(),
            last_name: contact.last_name.trim().to_string(),
            email: contact.email.trim().to_lowercase(),
            phone: normalize_phone(&contact.phone),
            state: contact.state.clone(),
            age: input.current_age,
            qualified_account_value: input.qualified_balance,
            tax_bracket: input.tax_bracket_percent,
            growth_rate: input.growth_rate_percent,
            calculator_id: CALCULATOR_ID,
            timestamp: submitted_at.to_rfc3339_opts(SecondsFormat::Millis, true),
            source: LEAD_SOURCE,
            status: "new",
            metadata: LeadMetadata {
                birth_year: input.birth_year,
            },
        }
    }
}

fn phone_digits(raw: &str) -> String {
    raw.chars().filter(char::is_ascii_digit).collect()
}

/// E.164 for US numbers: ten digits get a `+1` prefix, eleven digits starting
/// with `1` get a `+`. Anything else is sent as the bare digits.
pub fn normalize_phone(raw: &str) -> String {
    let digits = phone_digits(raw);
    match digits.len() {
        10 => format!("+1{digits}"),
        11 if digits.starts_with('1') => format!("+{digits}"),
        _ => digits,
    }
}

pub fn validate_contact(contact: &Contact) -> Result<(), LeadError> {
    for (label, value) in [
        ("First name", &contact.first_name),
        ("Last name", &contact.last_name),
        ("Email", &contact.email),
        ("Phone number", &contact.phone),
        ("State", &contact.state),
    ] {
        if value.trim().is_empty() {
            return Err(LeadError::InvalidContact(format!("{label} is required")));
        }
    }

    if !EMAIL_RE.is_match(contact.email.trim()) {
        return Err(LeadError::InvalidContact("Invalid email address".to_string()));
    }

    if !PHONE_RE.is_match(&phone_digits(&contact.phone)) {
        return Err(LeadError::InvalidContact(
            "Please enter a valid 10-digit phone number".to_string(),
        ));
    }

    Ok(())
}

/// Posts the lead. A 2xx body that is not JSON yields `Ok(None)`.
pub async fn submit_lead(
    client: &reqwest::Client,
    config: &LeadConfig,
    payload: &LeadPayload,
) -> Result<Option<serde_json::Value>, LeadError> {
    let url = config
        .webhook_url
        .as_deref()
        .filter(|url| !url.trim().is_empty())
        .ok_or(LeadError::NotConfigured)?;

    let response = client
        .post(url)
        .header(reqwest::header::ACCEPT, "application/json")
        .json(payload)
        .send()
        .await?;

    let status = response.status();
    let body = response.text().await?;
    let parsed = parse_body(&body);

    if !status.is_success() {
        return Err(LeadError::Status {
            status: status.as_u16(),
            message: error_message(parsed.as_ref(), &body, status.canonical_reason()),
        });
    }

    Ok(parsed)
}

fn parse_body(body: &str) -> Option<serde_json::Value> {
    if body.trim().is_empty() {
        return None;
    }
    serde_json::from_str(body).ok()
}

fn error_message(parsed: Option<&serde_json::Value>, body: &str, reason: Option<&str>) -> String {
    if let Some(message) = parsed
        .and_then(|value| value.get("message"))
        .and_then(serde_json::Value::as_str)
    {
        return message.to_string();
    }
    if !body.trim().is_empty() {
        return body.to_string();
    }
    reason.unwrap_or("unknown error").to_string()
}
