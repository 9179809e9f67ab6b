use std::net::SocketAddr;
use std::sync::Arc;

use axum::{
    Router,
    extract::{Json, Query, State},
    http::{StatusCode, header},
    response::{IntoResponse, Response},
    routing::get,
};
use serde::{Deserialize, Serialize};
use tokio::net::TcpListener;
use tracing::{debug, info};

use crate::core::{RawScenario, Region, StatusReport, Tier, TierEngine};

type SharedEngine = Arc<TierEngine>;

/// A form field that may arrive as a JSON number or as text.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
enum RawField {
    Number(f64),
    Text(String),
}

impl RawField {
    fn into_text(self) -> String {
        match self {
            RawField::Number(value) => value.to_string(),
            RawField::Text(text) => text,
        }
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
struct StatusPayload {
    region: Option<String>,
    #[serde(alias = "currentSpendLocal")]
    current_spend: Option<RawField>,
    #[serde(alias = "multiplier")]
    partner_multiplier: Option<RawField>,
    #[serde(alias = "extraSpendLocal")]
    extra_spend: Option<RawField>,
}

impl From<StatusPayload> for RawScenario {
    fn from(payload: StatusPayload) -> Self {
        RawScenario {
            region: payload.region.unwrap_or_default(),
            current_spend: payload.current_spend.map(RawField::into_text),
            partner_multiplier: payload.partner_multiplier.map(RawField::into_text),
            extra_spend: payload.extra_spend.map(RawField::into_text),
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct RegionsResponse<'a> {
    base_currency: &'static str,
    regions: &'a [Region],
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct TiersResponse<'a> {
    tiers: &'a [Tier],
}

#[derive(Debug, Serialize)]
struct ErrorResponse {
    error: String,
}

pub fn router(engine: SharedEngine) -> Router {
    Router::new()
        .route(
            "/api/status",
            get(status_get_handler).post(status_post_handler),
        )
        .route("/api/example", get(example_handler))
        .route("/api/regions", get(regions_handler))
        .route("/api/tiers", get(tiers_handler))
        .fallback(not_found_handler)
        .with_state(engine)
}

pub async fn run_http_server(addr: SocketAddr, engine: TierEngine) -> std::io::Result<()> {
    let app = router(Arc::new(engine));

    let listener = TcpListener::bind(addr).await?;
    info!(%addr, "tier status API listening");
    info!("local access: http://127.0.0.1:{}/api/example", addr.port());

    axum::serve(listener, app).await
}

async fn status_get_handler(
    State(engine): State<SharedEngine>,
    Query(payload): Query<StatusPayload>,
) -> Response {
    status_handler_impl(&engine, payload.into())
}

async fn status_post_handler(
    State(engine): State<SharedEngine>,
    Json(payload): Json<StatusPayload>,
) -> Response {
    status_handler_impl(&engine, payload.into())
}

async fn example_handler(State(engine): State<SharedEngine>) -> Response {
    status_handler_impl(&engine, RawScenario::example())
}

async fn regions_handler(State(engine): State<SharedEngine>) -> Response {
    json_response(
        StatusCode::OK,
        RegionsResponse {
            base_currency: "USD",
            regions: engine.regions().regions(),
        },
    )
}

async fn tiers_handler(State(engine): State<SharedEngine>) -> Response {
    json_response(
        StatusCode::OK,
        TiersResponse {
            tiers: engine.ladder().tiers(),
        },
    )
}

async fn not_found_handler() -> Response {
    error_response(StatusCode::NOT_FOUND, "Not found")
}

fn status_handler_impl(engine: &TierEngine, raw: RawScenario) -> Response {
    debug!(?raw, "status request");
    let report = engine.status_report(&raw);
    let status = if report.valid {
        StatusCode::OK
    } else {
        StatusCode::BAD_REQUEST
    };
    if let Some(tier_status) = &report.status {
        info!(
            region = %tier_status.region.code,
            tier = %tier_status.messaging_tier,
            classification = ?tier_status.classification,
            "status calculated"
        );
    }
    json_response(status, report)
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
fn raw_scenario_from_json(json: &str) -> Result<RawScenario, String> {
    let payload = serde_json::from_str::<StatusPayload>(json)
        .map_err(|e| format!("Invalid API JSON payload: {e}"))?;
    Ok(payload.into())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ProgramConfig;

    fn shared_engine() -> SharedEngine {
        Arc::new(
            ProgramConfig::reference()
                .into_engine()
                .expect("reference config is valid"),
        )
    }

    #[test]
    fn payload_accepts_numbers_and_text() {
        let raw = raw_scenario_from_json(
            r#"{
                "region": "EU",
                "currentSpend": 1800,
                "partnerMultiplier": "1.5",
                "extraSpend": 400.5
            }"#,
        )
        .expect("valid payload");

        assert_eq!(raw.region, "EU");
        assert_eq!(raw.current_spend.as_deref(), Some("1800"));
        assert_eq!(raw.partner_multiplier.as_deref(), Some("1.5"));
        assert_eq!(raw.extra_spend.as_deref(), Some("400.5"));
    }

    #[test]
    fn payload_accepts_field_aliases_and_missing_optionals() {
        let raw = raw_scenario_from_json(r#"{ "region": "UK", "currentSpendLocal": "250" }"#)
            .expect("valid payload");
        assert_eq!(raw.current_spend.as_deref(), Some("250"));
        assert_eq!(raw.partner_multiplier, None);
        assert_eq!(raw.extra_spend, None);

        let raw = raw_scenario_from_json(r#"{ "multiplier": 2 }"#).expect("valid payload");
        assert_eq!(raw.partner_multiplier.as_deref(), Some("2"));
        assert_eq!(raw.region, "");
    }

    #[test]
    fn report_serialization_contains_expected_fields() {
        let report = shared_engine().status_report(&RawScenario::example());
        let json = serde_json::to_string(&report).expect("serialize");

        assert!(json.contains("\"valid\":true"));
        assert!(json.contains("\"classification\":\"tier-in-reach\""));
        assert!(json.contains("\"baselineNormalized\""));
        assert!(json.contains("\"normalizedForMessaging\""));
        assert!(json.contains("\"gapToNextLocalWithMultiplier\""));
        assert!(json.contains("\"tierProgressFractions\""));
        assert!(json.contains("\"hasSimulatedSpend\":true"));
        assert!(json.contains("\"fxRateToBase\":1.1"));
        assert!(!json.contains("\"errorReason\""));
    }

    #[test]
    fn invalid_report_serializes_reason_without_status() {
        let report = shared_engine().status_report(&RawScenario {
            region: "EU".to_string(),
            current_spend: Some("-5".to_string()),
            ..RawScenario::default()
        });
        let json = serde_json::to_string(&report).expect("serialize");

        assert!(json.contains("\"valid\":false"));
        assert!(json.contains("\"errorReason\""));
        assert!(!json.contains("\"status\""));
    }

    #[tokio::test]
    async fn status_handler_returns_ok_for_valid_input() {
        let response = status_post_handler(
            State(shared_engine()),
            Json(StatusPayload {
                region: Some("JP".to_string()),
                current_spend: Some(RawField::Number(500_000.0)),
                ..StatusPayload::default()
            }),
        )
        .await;

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            response.headers().get(header::CACHE_CONTROL),
            Some(&header::HeaderValue::from_static("no-store"))
        );
    }

    #[tokio::test]
    async fn status_handler_rejects_invalid_primary_spend() {
        let response = status_get_handler(
            State(shared_engine()),
            Query(StatusPayload {
                region: Some("EU".to_string()),
                current_spend: Some(RawField::Text("abc".to_string())),
                ..StatusPayload::default()
            }),
        )
        .await;

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn status_query_string_decodes_into_raw_scenario() {
        let uri = axum::http::Uri::from_static(
            "/api/status?region=EU&currentSpend=1800&partnerMultiplier=1.5&extraSpend=400",
        );
        let Query(payload) = Query::<StatusPayload>::try_from_uri(&uri).expect("valid query");
        assert_eq!(RawScenario::from(payload), RawScenario::example());

        let uri = axum::http::Uri::from_static("/api/status?region=EU&currentSpend=abc");
        let query = Query::<StatusPayload>::try_from_uri(&uri).expect("valid query");
        let response = status_get_handler(State(shared_engine()), query).await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn example_and_listing_handlers_succeed() {
        let engine = shared_engine();
        assert_eq!(
            example_handler(State(engine.clone())).await.status(),
            StatusCode::OK
        );
        assert_eq!(
            regions_handler(State(engine.clone())).await.status(),
            StatusCode::OK
        );
        assert_eq!(tiers_handler(State(engine)).await.status(), StatusCode::OK);
        assert_eq!(not_found_handler().await.status(), StatusCode::NOT_FOUND);
    }
}
