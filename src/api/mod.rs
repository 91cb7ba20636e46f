use axum::{
    Router,
    extract::{
        Json, Query, State,
        rejection::{JsonRejection, QueryRejection},
    },
    http::{StatusCode, header},
    response::{IntoResponse, Response},
    routing::get,
};
use chrono::{Datelike, Local, Utc};
use clap::{Parser, ValueEnum};
use serde::{Deserialize, Serialize};
use std::net::SocketAddr;
use std::time::Duration;
use tokio::net::TcpListener;

use crate::core::{DEFAULT_GROWTH_RATE_PERCENT, ProjectionInput, ProjectionResult, project};
use crate::leads::{
    Contact, LeadConfig, LeadError, LeadPayload, WEBHOOK_URL_ENV, submit_lead, validate_contact,
};
use crate::report::{render_summary, render_year_table};

const AGE_RANGE: (u32, u32) = (50, 100);
const GROWTH_RATE_RANGE: (f64, f64) = (1.0, 12.0);
const TAX_BRACKET_RANGE: (f64, f64) = (10.0, 37.0);
const START_YEAR_RANGE: (i32, i32) = (1900, 2200);

#[derive(Copy, Clone, Debug, Eq, PartialEq, ValueEnum)]
pub enum OutputFormat {
    Table,
    Json,
}

#[derive(Parser, Debug, Clone)]
#[command(
    name = "roth-compare",
    about = "Compare keeping a qualified account (RMDs reinvested) against a full Roth conversion",
    after_help = "Run `roth-compare serve [port]` to start the HTTP API instead."
)]
pub struct Cli {
    #[arg(long, help = "Current age in whole years (50-100)")]
    pub age: u32,
    #[arg(long, help = "Qualified account balance in dollars")]
    pub qualified_balance: f64,
    #[arg(long, help = "Marginal tax bracket in percent, e.g. 24")]
    pub tax_bracket: f64,
    #[arg(
        long,
        default_value_t = DEFAULT_GROWTH_RATE_PERCENT,
        help = "Expected annual growth rate in percent (1-12)"
    )]
    pub growth_rate: f64,
    #[arg(long, help = "Calendar year of the first projected year; defaults to this year")]
    pub start_year: Option<i32>,
    #[arg(long, value_enum, default_value_t = OutputFormat::Table)]
    pub format: OutputFormat,

    #[arg(long)]
    pub first_name: Option<String>,
    #[arg(long)]
    pub last_name: Option<String>,
    #[arg(long)]
    pub email: Option<String>,
    #[arg(long)]
    pub phone: Option<String>,
    #[arg(long, help = "Two-letter state abbreviation")]
    pub state: Option<String>,
    #[arg(long, env = WEBHOOK_URL_ENV, help = "CRM webhook that receives lead submissions")]
    pub lead_webhook_url: Option<String>,
    #[arg(long, default_value_t = 10, help = "Lead webhook timeout in seconds")]
    pub lead_timeout_secs: u64,
}

impl Cli {
    fn contact(&self) -> Option<Contact> {
        contact_from_parts(
            &self.first_name,
            &self.last_name,
            &self.email,
            &self.phone,
            &self.state,
        )
    }

    fn lead_config(&self) -> LeadConfig {
        LeadConfig {
            webhook_url: self.lead_webhook_url.clone(),
            timeout: Some(Duration::from_secs(self.lead_timeout_secs)),
        }
    }
}

fn contact_from_parts(
    first_name: &Option<String>,
    last_name: &Option<String>,
    email: &Option<String>,
    phone: &Option<String>,
    state: &Option<String>,
) -> Option<Contact> {
    let parts = [first_name, last_name, email, phone, state];
    if parts.iter().all(|part| part.is_none()) {
        return None;
    }
    let take = |part: &Option<String>| part.clone().unwrap_or_default();
    Some(Contact {
        first_name: take(first_name),
        last_name: take(last_name),
        email: take(email),
        phone: take(phone),
        state: take(state),
    })
}

pub fn current_year() -> i32 {
    Local::now().year()
}

pub fn build_inputs(cli: &Cli) -> Result<ProjectionInput, String> {
    let (min_age, max_age) = AGE_RANGE;
    if !(min_age..=max_age).contains(&cli.age) {
        return Err(format!("--age must be between {min_age} and {max_age}"));
    }

    if !cli.qualified_balance.is_finite() || cli.qualified_balance < 0.0 {
        return Err("--qualified-balance must be >= 0".to_string());
    }

    let (min_growth, max_growth) = GROWTH_RATE_RANGE;
    if !(min_growth..=max_growth).contains(&cli.growth_rate) {
        return Err(format!(
            "--growth-rate must be between {min_growth} and {max_growth}"
        ));
    }

    let (min_bracket, max_bracket) = TAX_BRACKET_RANGE;
    if !(min_bracket..=max_bracket).contains(&cli.tax_bracket) {
        return Err(format!(
            "--tax-bracket must be between {min_bracket} and {max_bracket}"
        ));
    }

    let start_year = cli.start_year.unwrap_or_else(current_year);
    let (min_year, max_year) = START_YEAR_RANGE;
    if !(min_year..=max_year).contains(&start_year) {
        return Err(format!(
            "--start-year must be between {min_year} and {max_year}"
        ));
    }

    Ok(ProjectionInput {
        current_age: cli.age,
        birth_year: start_year - cli.age as i32,
        qualified_balance: cli.qualified_balance,
        tax_bracket_percent: cli.tax_bracket,
        growth_rate_percent: cli.growth_rate,
        start_year,
    })
}

/// Runs one projection from the command line and prints it. A lead
/// submission, when requested, happens after the report is printed and
/// cannot fail the run.
pub async fn run_cli(cli: Cli) -> Result<(), String> {
    let inputs = build_inputs(&cli)?;
    let contact = cli.contact();
    if let Some(contact) = &contact {
        validate_contact(contact).map_err(|e| e.to_string())?;
    }

    let results = project(&inputs);
    match cli.format {
        OutputFormat::Table => {
            print!("{}", render_summary(&inputs, &results));
            println!();
            print!("{}", render_year_table(&results));
        }
        OutputFormat::Json => {
            let response = build_project_response(&inputs, &results, None);
            let json = serde_json::to_string_pretty(&response)
                .map_err(|e| format!("Failed to serialize projection: {e}"))?;
            println!("{json}");
        }
    }

    if let Some(contact) = contact {
        let config = cli.lead_config();
        if !config.is_enabled() {
            log::warn!("contact details given but no lead webhook is configured; skipping");
            return Ok(());
        }
        let payload = LeadPayload::new(&contact, &inputs, Utc::now());
        if let Err(err) = send_lead(&config, &payload).await {
            log::warn!("lead submission failed (non-critical): {err}");
        }
    }

    Ok(())
}

async fn send_lead(config: &LeadConfig, payload: &LeadPayload) -> Result<(), LeadError> {
    let client = config.client()?;
    let response = submit_lead(&client, config, payload).await?;
    log::info!("lead submitted to webhook (response: {response:?})");
    Ok(())
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
struct ProjectPayload {
    age: Option<u32>,
    qualified_account_value: Option<f64>,
    tax_bracket: Option<f64>,
    growth_rate: Option<f64>,
    start_year: Option<i32>,

    first_name: Option<String>,
    last_name: Option<String>,
    email: Option<String>,
    phone: Option<String>,
    state: Option<String>,
}

#[derive(Debug)]
struct ApiRequest {
    inputs: ProjectionInput,
    contact: Option<Contact>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ProjectResponse<'a> {
    input: &'a ProjectionInput,
    results: &'a ProjectionResult,
    #[serde(skip_serializing_if = "Option::is_none")]
    lead_queued: Option<bool>,
}

#[derive(Debug, Serialize)]
struct ErrorResponse {
    error: String,
}

#[derive(Debug, Serialize)]
struct HealthResponse {
    status: &'static str,
}

#[derive(Clone)]
struct AppState {
    lead_config: LeadConfig,
    client: reqwest::Client,
}

impl AppState {
    fn new(lead_config: LeadConfig) -> Result<Self, LeadError> {
        let client = lead_config.client()?;
        Ok(Self {
            lead_config,
            client,
        })
    }
}

pub async fn run_http_server(port: u16, lead_config: LeadConfig) -> std::io::Result<()> {
    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    if !lead_config.is_enabled() {
        log::info!("{WEBHOOK_URL_ENV} not set; lead submissions are disabled");
    }
    let state = AppState::new(lead_config).map_err(std::io::Error::other)?;
    let app = build_router(state);

    let listener = TcpListener::bind(addr).await?;
    log::info!("RMD vs Roth HTTP API listening on http://{addr}");
    log::info!("Local access: http://127.0.0.1:{port}/api/health");

    axum::serve(listener, app).await
}

fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/api/health", get(health_handler))
        .route(
            "/api/project",
            get(project_get_handler).post(project_post_handler),
        )
        .fallback(not_found_handler)
        .with_state(state)
}

async fn health_handler() -> Response {
    json_response(StatusCode::OK, HealthResponse { status: "ok" })
}

async fn not_found_handler() -> Response {
    error_response(StatusCode::NOT_FOUND, "Not found")
}

async fn project_get_handler(
    State(state): State<AppState>,
    payload: Result<Query<ProjectPayload>, QueryRejection>,
) -> Response {
    match payload {
        Ok(Query(payload)) => project_handler_impl(&state, payload),
        Err(rejection) => error_response(
            StatusCode::BAD_REQUEST,
            &format!("Invalid query string: {}", rejection.body_text()),
        ),
    }
}

async fn project_post_handler(
    State(state): State<AppState>,
    payload: Result<Json<ProjectPayload>, JsonRejection>,
) -> Response {
    match payload {
        Ok(Json(payload)) => project_handler_impl(&state, payload),
        Err(rejection) => error_response(
            StatusCode::BAD_REQUEST,
            &format!("Invalid API JSON payload: {}", rejection.body_text()),
        ),
    }
}

fn project_handler_impl(state: &AppState, payload: ProjectPayload) -> Response {
    let request = match api_request_from_payload(payload) {
        Ok(request) => request,
        Err(msg) => return error_response(StatusCode::BAD_REQUEST, &msg),
    };

    let inputs = &request.inputs;
    let results = project(inputs);
    log::debug!(
        "projected age {} balance {} bracket {}% growth {}%: savings {:.2}",
        inputs.current_age,
        inputs.qualified_balance,
        inputs.tax_bracket_percent,
        inputs.growth_rate_percent,
        results.convert_to_roth.total_tax_savings
    );

    let lead_queued = match request.contact {
        Some(contact) => queue_lead(state, &contact, inputs),
        None => false,
    };

    json_response(
        StatusCode::OK,
        build_project_response(inputs, &results, Some(lead_queued)),
    )
}

/// Spawns the webhook call so the response never waits on it.
fn queue_lead(state: &AppState, contact: &Contact, inputs: &ProjectionInput) -> bool {
    if !state.lead_config.is_enabled() {
        log::debug!("lead webhook not configured; dropping contact");
        return false;
    }

    let payload = LeadPayload::new(contact, inputs, Utc::now());
    let client = state.client.clone();
    let config = state.lead_config.clone();
    tokio::spawn(async move {
        match submit_lead(&client, &config, &payload).await {
            Ok(_) => log::info!("lead submitted for {}", payload.email),
            Err(err) => log::warn!("lead submission failed (non-critical): {err}"),
        }
    });
    true
}

fn build_project_response<'a>(
    inputs: &'a ProjectionInput,
    results: &'a ProjectionResult,
    lead_queued: Option<bool>,
) -> ProjectResponse<'a> {
    ProjectResponse {
        input: inputs,
        results,
        lead_queued,
    }
}

fn json_response<T: Serialize>(status: StatusCode, body: T) -> Response {
    let mut response = (status, Json(body)).into_response();
    response.headers_mut().insert(
        header::CACHE_CONTROL,
        header::HeaderValue::from_static("no-store"),
    );
    response
}

fn error_response(status: StatusCode, msg: &str) -> Response {
    json_response(
        status,
        ErrorResponse {
            error: msg.to_string(),
        },
    )
}

#[cfg(test)]
fn api_request_from_json(json: &str) -> Result<ApiRequest, String> {
    let payload = serde_json::from_str::<ProjectPayload>(json)
        .map_err(|e| format!("Invalid API JSON payload: {e}"))?;
    api_request_from_payload(payload)
}

fn api_request_from_payload(payload: ProjectPayload) -> Result<ApiRequest, String> {
    let mut cli = default_cli_for_api();

    if let Some(v) = payload.age {
        cli.age = v;
    }
    if let Some(v) = payload.qualified_account_value {
        cli.qualified_balance = v;
    }
    if let Some(v) = payload.tax_bracket {
        cli.tax_bracket = v;
    }
    if let Some(v) = payload.growth_rate {
        cli.growth_rate = v;
    }
    if let Some(v) = payload.start_year {
        cli.start_year = Some(v);
    }

    let inputs = build_inputs(&cli)?;
    let contact = contact_from_parts(
        &payload.first_name,
        &payload.last_name,
        &payload.email,
        &payload.phone,
        &payload.state,
    );
    if let Some(contact) = &contact {
        validate_contact(contact).map_err(|e| e.to_string())?;
    }

    Ok(ApiRequest { inputs, contact })
}

fn default_cli_for_api() -> Cli {
    Cli {
        age: 65,
        qualified_balance: 500_000.0,
        tax_bracket: 24.0,
        growth_rate: DEFAULT_GROWTH_RATE_PERCENT,
        start_year: None,
        format: OutputFormat::Json,
        first_name: None,
        last_name: None,
        email: None,
        phone: None,
        state: None,
        lead_webhook_url: None,
        lead_timeout_secs: 10,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f64 = 1e-6;

    fn assert_approx(actual: f64, expected: f64) {
        assert!(
            (actual - expected).abs() <= EPS,
            "expected {expected}, got {actual}"
        );
    }

    fn sample_cli() -> Cli {
        let mut cli = default_cli_for_api();
        cli.start_year = Some(2024);
        cli
    }

    fn test_state() -> AppState {
        AppState::new(LeadConfig::default()).expect("client builds")
    }

    #[test]
    fn cli_parses_required_flags_and_default_growth() {
        let cli = Cli::try_parse_from([
            "roth-compare",
            "--age",
            "65",
            "--qualified-balance",
            "500000",
            "--tax-bracket",
            "24",
        ])
        .expect("flags should parse");

        assert_eq!(cli.age, 65);
        assert_approx(cli.qualified_balance, 500_000.0);
        assert_approx(cli.growth_rate, 5.0);
        assert_eq!(cli.format, OutputFormat::Table);
        assert!(cli.contact().is_none());
    }

    #[test]
    fn cli_rejects_missing_balance() {
        let err = Cli::try_parse_from(["roth-compare", "--age", "65", "--tax-bracket", "24"])
            .expect_err("balance is required");
        assert!(err.to_string().contains("--qualified-balance"));
    }

    #[test]
    fn build_inputs_derives_birth_year_from_start_year() {
        let mut cli = sample_cli();
        cli.age = 70;

        let inputs = build_inputs(&cli).expect("valid inputs");
        assert_eq!(inputs.birth_year, 1954);
        assert_eq!(inputs.start_year, 2024);
        assert_approx(inputs.tax_bracket_percent, 24.0);
        assert_approx(inputs.growth_rate_percent, 5.0);
    }

    #[test]
    fn build_inputs_defaults_start_year_to_current_year() {
        let mut cli = sample_cli();
        cli.start_year = None;

        let inputs = build_inputs(&cli).expect("valid inputs");
        assert_eq!(inputs.start_year, current_year());
        assert_eq!(inputs.birth_year, current_year() - 65);
    }

    #[test]
    fn build_inputs_accepts_range_boundaries() {
        for (age, growth, bracket) in [(50, 1.0, 10.0), (100, 12.0, 37.0)] {
            let mut cli = sample_cli();
            cli.age = age;
            cli.growth_rate = growth;
            cli.tax_bracket = bracket;
            build_inputs(&cli).expect("boundary values are valid");
        }
    }

    #[test]
    fn build_inputs_rejects_out_of_range_age() {
        for age in [49, 101] {
            let mut cli = sample_cli();
            cli.age = age;
            let err = build_inputs(&cli).expect_err("must reject age");
            assert!(err.contains("--age"));
        }
    }

    #[test]
    fn build_inputs_rejects_out_of_range_rates() {
        let mut cli = sample_cli();
        cli.growth_rate = 0.5;
        let err = build_inputs(&cli).expect_err("must reject growth rate");
        assert!(err.contains("--growth-rate"));

        let mut cli = sample_cli();
        cli.growth_rate = f64::NAN;
        let err = build_inputs(&cli).expect_err("must reject NaN growth rate");
        assert!(err.contains("--growth-rate"));

        let mut cli = sample_cli();
        cli.tax_bracket = 38.0;
        let err = build_inputs(&cli).expect_err("must reject tax bracket");
        assert!(err.contains("--tax-bracket"));
    }

    #[test]
    fn build_inputs_rejects_negative_or_non_finite_balance() {
        for balance in [-1.0, f64::INFINITY, f64::NAN] {
            let mut cli = sample_cli();
            cli.qualified_balance = balance;
            let err = build_inputs(&cli).expect_err("must reject balance");
            assert!(err.contains("--qualified-balance"));
        }
    }

    #[test]
    fn api_request_from_json_parses_web_keys() {
        let json = r#"{
          "age": 72,
          "qualifiedAccountValue": 750000,
          "taxBracket": 32,
          "growthRate": 7,
          "startYear": 2025
        }"#;
        let request = api_request_from_json(json).expect("json should parse");
        let inputs = request.inputs;

        assert_eq!(inputs.current_age, 72);
        assert_eq!(inputs.birth_year, 1953);
        assert_eq!(inputs.start_year, 2025);
        assert_approx(inputs.qualified_balance, 750_000.0);
        assert_approx(inputs.tax_bracket_percent, 32.0);
        assert_approx(inputs.growth_rate_percent, 7.0);
        assert!(request.contact.is_none());
    }

    #[test]
    fn api_request_from_json_fills_defaults() {
        let request = api_request_from_json("{}").expect("empty payload uses defaults");
        assert_eq!(request.inputs.current_age, 65);
        assert_approx(request.inputs.qualified_balance, 500_000.0);
        assert_approx(request.inputs.growth_rate_percent, DEFAULT_GROWTH_RATE_PERCENT);
    }

    #[test]
    fn api_request_from_json_collects_contact() {
        let json = r#"{
          "age": 66,
          "firstName": "Pat",
          "lastName": "Doe",
          "email": "pat@example.com",
          "phone": "555-123-4567",
          "state": "OH"
        }"#;
        let request = api_request_from_json(json).expect("json should parse");
        let contact = request.contact.expect("contact present");
        assert_eq!(contact.first_name, "Pat");
        assert_eq!(contact.state, "OH");
    }

    #[test]
    fn api_request_from_json_rejects_partial_contact() {
        let json = r#"{ "email": "pat@example.com" }"#;
        let err = api_request_from_json(json).expect_err("names are required");
        assert_eq!(err, "First name is required");
    }

    #[test]
    fn project_response_serialization_contains_expected_fields() {
        let inputs = build_inputs(&sample_cli()).expect("valid inputs");
        let results = project(&inputs);
        let response = build_project_response(&inputs, &results, Some(false));
        let json = serde_json::to_string(&response).expect("response should serialize");

        assert!(json.contains("\"keepQualified\""));
        assert!(json.contains("\"convertToRoth\""));
        assert!(json.contains("\"yearByYear\""));
        assert!(json.contains("\"currentRetirementTaxBill\""));
        assert!(json.contains("\"totalTaxSavings\""));
        assert!(json.contains("\"rmdFactor\""));
        assert!(json.contains("\"rothValue\""));
        assert!(json.contains("\"taxableAccount\""));
        assert!(json.contains("\"birthYear\":1959"));
        assert!(json.contains("\"leadQueued\":false"));
    }

    #[test]
    fn cli_json_response_omits_lead_flag() {
        let inputs = build_inputs(&sample_cli()).expect("valid inputs");
        let results = project(&inputs);
        let response = build_project_response(&inputs, &results, None);
        let json = serde_json::to_string(&response).expect("response should serialize");

        assert!(json.contains("\"keepQualified\""));
        assert!(!json.contains("leadQueued"));
    }

    #[test]
    fn build_inputs_rejects_start_year_outside_calendar_range() {
        for year in [i32::MIN, 1899, 2201, i32::MAX] {
            let mut cli = sample_cli();
            cli.start_year = Some(year);
            let err = build_inputs(&cli).expect_err("must reject start year");
            assert!(err.contains("--start-year"), "{err}");
        }
    }

    #[test]
    fn api_request_from_json_rejects_extreme_start_year() {
        let err = api_request_from_json(r#"{ "startYear": 2147483647 }"#)
            .expect_err("must reject start year");
        assert!(err.contains("--start-year"));
    }

    #[tokio::test]
    async fn project_handler_returns_ok_for_valid_payload() {
        let payload = ProjectPayload {
            age: Some(70),
            start_year: Some(2024),
            ..ProjectPayload::default()
        };
        let response = project_handler_impl(&test_state(), payload);
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            response.headers().get(header::CACHE_CONTROL),
            Some(&header::HeaderValue::from_static("no-store"))
        );
    }

    #[tokio::test]
    async fn project_handler_rejects_invalid_payload() {
        let payload = ProjectPayload {
            tax_bracket: Some(50.0),
            ..ProjectPayload::default()
        };
        let response = project_handler_impl(&test_state(), payload);
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn project_handler_succeeds_without_webhook_when_contact_given() {
        let payload = ProjectPayload {
            first_name: Some("Pat".to_string()),
            last_name: Some("Doe".to_string()),
            email: Some("pat@example.com".to_string()),
            phone: Some("5551234567".to_string()),
            state: Some("TX".to_string()),
            ..ProjectPayload::default()
        };
        let response = project_handler_impl(&test_state(), payload);
        assert_eq!(response.status(), StatusCode::OK);
    }

    async fn spawn_api() -> SocketAddr {
        let listener = TcpListener::bind("127.0.0.1:0")
            .await
            .expect("bind local api");
        let addr = listener.local_addr().expect("local addr");
        let app = build_router(test_state());
        tokio::spawn(async move {
            axum::serve(listener, app).await.expect("api server");
        });
        addr
    }

    async fn assert_json_error(response: reqwest::Response, expected_status: u16) -> String {
        assert_eq!(response.status().as_u16(), expected_status);
        assert_eq!(
            response
                .headers()
                .get(reqwest::header::CACHE_CONTROL)
                .and_then(|v| v.to_str().ok()),
            Some("no-store")
        );
        let body = response
            .json::<serde_json::Value>()
            .await
            .expect("error body is JSON");
        body["error"]
            .as_str()
            .expect("error field is a string")
            .to_string()
    }

    #[tokio::test]
    async fn router_maps_mistyped_json_to_json_bad_request() {
        let addr = spawn_api().await;
        let response = reqwest::Client::new()
            .post(format!("http://{addr}/api/project"))
            .header(reqwest::header::CONTENT_TYPE, "application/json")
            .body(r#"{"age": -5}"#)
            .send()
            .await
            .expect("request succeeds");

        let error = assert_json_error(response, 400).await;
        assert!(error.starts_with("Invalid API JSON payload"), "{error}");
    }

    #[tokio::test]
    async fn router_maps_malformed_query_to_json_bad_request() {
        let addr = spawn_api().await;
        let response = reqwest::get(format!("http://{addr}/api/project?age=old"))
            .await
            .expect("request succeeds");

        let error = assert_json_error(response, 400).await;
        assert!(error.starts_with("Invalid query string"), "{error}");
    }

    #[tokio::test]
    async fn router_rejects_out_of_range_start_year() {
        let addr = spawn_api().await;
        let response = reqwest::Client::new()
            .post(format!("http://{addr}/api/project"))
            .json(&serde_json::json!({ "startYear": -2147483648i64 }))
            .send()
            .await
            .expect("request succeeds");

        let error = assert_json_error(response, 400).await;
        assert!(error.contains("--start-year"), "{error}");
    }

    #[tokio::test]
    async fn router_projects_valid_query_and_serves_fallback() {
        let addr = spawn_api().await;
        let response = reqwest::get(format!(
            "http://{addr}/api/project?age=65&qualifiedAccountValue=500000&taxBracket=24&startYear=2023"
        ))
        .await
        .expect("request succeeds");
        assert_eq!(response.status().as_u16(), 200);
        let body = response
            .json::<serde_json::Value>()
            .await
            .expect("body is JSON");
        let years = body["results"]["keepQualified"]["yearByYear"].as_array();
        assert_eq!(years.map(Vec::len), Some(26));
        assert_eq!(body["leadQueued"], false);

        let missing = reqwest::get(format!("http://{addr}/nope"))
            .await
            .expect("request succeeds");
        assert_eq!(assert_json_error(missing, 404).await, "Not found");
    }
}
