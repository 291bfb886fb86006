//! Tests for the public route, alert and landing endpoints.

use axum::{extract::State, http::StatusCode, response::IntoResponse};
use serde_json::json;
use transit::{
    model::transit::{AlertDto, LandingDto, RouteDto},
    server::controller::{
        public::{get_alerts, get_landing, get_routes},
        util::caller::Caller,
    },
};

use super::*;

/// Expect routes to be listed by name for anonymous visitors
#[tokio::test]
async fn lists_routes_by_name() -> Result<(), TestError> {
    let test = TestBuilder::new()
        .with_route("sarchi-norte", "Sarchí Norte", "sarchi")
        .with_route("grecia-centro", "Grecia-Centro", "grecia")
        .build()
        .await?;

    let result = get_routes(State(test.to_app_state()), Caller(None)).await;

    let resp = result.unwrap().into_response();
    assert_eq!(resp.status(), StatusCode::OK);

    let routes: Vec<RouteDto> = read_json(resp).await?;
    let names: Vec<&str> = routes.iter().map(|route| route.name.as_str()).collect();
    assert_eq!(names, vec!["Grecia-Centro", "Sarchí Norte"]);

    Ok(())
}

/// Expect alerts newest first regardless of how their timestamp was stored
#[tokio::test]
async fn lists_alerts_newest_first() -> Result<(), TestError> {
    let test = TestBuilder::new()
        .with_document(
            "alerts",
            "old",
            json!({ "titulo": "Antigua", "lastUpdated": "2025-01-01T08:00:00Z" }),
        )
        .with_document(
            "alerts",
            "new",
            json!({ "titulo": "Reciente", "lastUpdated": 1767254400000i64 }),
        )
        .with_document(
            "alerts",
            "middle",
            json!({ "titulo": "Intermedia", "lastUpdated": { "seconds": 1751356800, "nanoseconds": 0 } }),
        )
        .build()
        .await?;

    let result = get_alerts(State(test.to_app_state()), Caller(None)).await;

    let alerts: Vec<AlertDto> = read_json(result.unwrap().into_response()).await?;
    let ids: Vec<&str> = alerts.iter().map(|alert| alert.id.as_str()).collect();
    assert_eq!(ids, vec!["new", "middle", "old"]);
    assert!(alerts
        .iter()
        .all(|alert| chrono::DateTime::parse_from_rfc3339(&alert.last_updated).is_ok()));

    Ok(())
}

/// Expect the landing payload to stay cached until a gateway write invalidates it
#[tokio::test]
async fn landing_cached_until_write() -> Result<(), TestError> {
    let test = TestBuilder::new()
        .with_route("grecia-centro", "Grecia-Centro", "grecia")
        .build()
        .await?;
    let state: AppState = test.to_app_state();

    let first: LandingDto = read_json(
        get_landing(State(state.clone()))
            .await
            .unwrap()
            .into_response(),
    )
    .await?;

    // Written behind the gateway's back, so nothing invalidates the cache
    test.document()
        .insert_document("alerts", "a1", factory::alert("Desvío"))
        .await?;
    let cached: LandingDto = read_json(
        get_landing(State(state.clone()))
            .await
            .unwrap()
            .into_response(),
    )
    .await?;
    assert_eq!(first, cached);
    assert!(cached.alerts.is_empty());

    let admin = transit::server::model::session::Principal {
        uid: "admin-test".to_string(),
        email: None,
        display_name: None,
        admin: true,
    };
    let deleted = state.gateway(Some(&admin)).delete_alert("a1").await;
    assert!(deleted.success);

    test.document()
        .insert_document("alerts", "a2", factory::alert("Cierre"))
        .await?;
    let fresh: LandingDto = read_json(
        get_landing(State(state.clone()))
            .await
            .unwrap()
            .into_response(),
    )
    .await?;
    assert_eq!(fresh.alerts.len(), 1);
    assert_eq!(fresh.alerts[0].title, "Cierre");
    assert_eq!(fresh.routes.len(), 1);

    Ok(())
}
