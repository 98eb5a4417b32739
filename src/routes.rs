// src/routes.rs

use axum::{
    routing::{get, patch, post},
    Router,
};
use tower_http::trace::TraceLayer;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::{config::AppState, docs::ApiDoc, handlers};

pub fn build_router(app_state: AppState) -> Router {
    let room_routes = Router::new()
        .route("/{room_id}/quotes/daily", post(handlers::quotes::quote_daily))
        .route(
            "/{room_id}/quotes/daily/extra-hours",
            post(handlers::quotes::adjust_extra_hours),
        )
        .route("/{room_id}/quotes/hourly", post(handlers::quotes::quote_hourly))
        .route(
            "/{room_id}/bookings/daily",
            post(handlers::bookings::create_daily_booking),
        )
        .route(
            "/{room_id}/bookings/hourly",
            post(handlers::bookings::create_hourly_booking),
        )
        .route(
            "/{room_id}/reservations",
            get(handlers::rooms::list_room_reservations),
        );

    let booking_routes = Router::new()
        .route("/mine", get(handlers::bookings::list_my_bookings))
        .route(
            "/{booking_id}/status",
            patch(handlers::bookings::update_booking_status),
        );

    Router::new()
        .route("/api/health", get(|| async { "OK" }))
        .nest("/api/rooms", room_routes)
        .nest("/api/bookings", booking_routes)
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .layer(TraceLayer::new_for_http())
        .with_state(app_state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use axum::{
        body::{to_bytes, Body},
        http::{Request, StatusCode},
    };
    use chrono::{Days, FixedOffset, Utc};
    use rust_decimal::Decimal;
    use serde_json::{json, Value};
    use tower::ServiceExt;
    use uuid::Uuid;

    use crate::{
        common::i18n::I18nStore,
        db::MemoryBookingRepository,
        models::room::Room,
        services::BookingService,
    };

    struct TestApp {
        router: Router,
        room_id: Uuid,
    }

    fn test_app() -> TestApp {
        let repo = Arc::new(MemoryBookingRepository::new());
        let room_id = Uuid::new_v4();
        repo.add_room(Room {
            id: room_id,
            title: "Suíte".into(),
            price_per_day: Decimal::from(240),
        });
        let service = BookingService::new(repo, FixedOffset::east_opt(0).unwrap());
        TestApp {
            router: build_router(AppState::from_parts(service, I18nStore::new())),
            room_id,
        }
    }

    fn days_ahead(days: u64) -> String {
        (Utc::now().date_naive() + Days::new(days)).to_string()
    }

    async fn send(
        router: &Router,
        method: &str,
        uri: &str,
        headers: &[(&str, String)],
        body: Option<Value>,
    ) -> (StatusCode, Value) {
        let mut builder = Request::builder().method(method).uri(uri);
        for (name, value) in headers {
            builder = builder.header(*name, value);
        }
        let request = match body {
            Some(json) => builder
                .header("content-type", "application/json")
                .body(Body::from(json.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };

        let response = router.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, serde_json::from_slice(&bytes).unwrap_or(Value::Null))
    }

    fn tenant(id: Uuid) -> (&'static str, String) {
        ("x-tenant-id", id.to_string())
    }

    #[tokio::test]
    async fn health_check() {
        let app = test_app();
        let (status, _) = send(&app.router, "GET", "/api/health", &[], None).await;
        assert_eq!(status, StatusCode::OK);
    }

    #[tokio::test]
    async fn daily_quote_bills_23_hours() {
        let app = test_app();
        let uri = format!("/api/rooms/{}/quotes/daily", app.room_id);

        let (status, body) = send(
            &app.router,
            "POST",
            &uri,
            &[],
            Some(json!({ "checkin": days_ahead(30) })),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["totalHours"].as_f64(), Some(23.0));
        assert_eq!(body["pricePerHour"].as_f64(), Some(10.0));
        assert_eq!(body["totalPrice"].as_f64(), Some(230.0));
        assert_eq!(body["conflicts"].as_array().map(Vec::len), Some(0));
    }

    #[tokio::test]
    async fn hourly_quote() {
        let app = test_app();
        let uri = format!("/api/rooms/{}/quotes/hourly", app.room_id);

        let (status, body) = send(
            &app.router,
            "POST",
            &uri,
            &[],
            Some(json!({
                "date": days_ahead(30),
                "checkin": "14:00:00",
                "checkout": "16:00:00"
            })),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["totalHours"].as_f64(), Some(2.0));
        assert_eq!(body["totalPrice"].as_f64(), Some(20.0));
    }

    #[tokio::test]
    async fn early_checkout_without_extra_hours_is_refused() {
        let app = test_app();
        let uri = format!("/api/rooms/{}/quotes/daily/extra-hours", app.room_id);

        let (status, _) = send(
            &app.router,
            "POST",
            &uri,
            &[],
            Some(json!({ "checkin": days_ahead(30), "extraHours": 0, "adjustment": "early" })),
        )
        .await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);

        let (status, body) = send(
            &app.router,
            "POST",
            &uri,
            &[],
            Some(json!({ "checkin": days_ahead(30), "extraHours": 0, "adjustment": "late" })),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["extraHours"].as_u64(), Some(1));
        assert_eq!(body["totalPrice"].as_f64(), Some(240.0));
    }

    #[tokio::test]
    async fn past_checkin_is_unprocessable() {
        let app = test_app();
        let uri = format!("/api/rooms/{}/quotes/daily", app.room_id);
        let yesterday = (Utc::now().date_naive() - Days::new(1)).to_string();

        let (status, _) = send(&app.router, "POST", &uri, &[], Some(json!({ "checkin": yesterday })))
            .await;

        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    }

    #[tokio::test]
    async fn booking_requires_tenant_header() {
        let app = test_app();
        let uri = format!("/api/rooms/{}/bookings/daily", app.room_id);

        let (status, _) = send(
            &app.router,
            "POST",
            &uri,
            &[],
            Some(json!({ "checkin": days_ahead(30) })),
        )
        .await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn second_overlapping_booking_gets_localized_conflict() {
        let app = test_app();
        let uri = format!("/api/rooms/{}/bookings/daily", app.room_id);
        let payload = json!({ "checkin": days_ahead(30) });

        let (status, created) = send(
            &app.router,
            "POST",
            &uri,
            &[tenant(Uuid::new_v4())],
            Some(payload.clone()),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(created["status"], "pending");
        assert_eq!(created["totalPrice"].as_f64(), Some(230.0));

        let (status, body) = send(
            &app.router,
            "POST",
            &uri,
            &[
                tenant(Uuid::new_v4()),
                ("accept-language", "pt-BR".to_string()),
            ],
            Some(payload),
        )
        .await;
        assert_eq!(status, StatusCode::CONFLICT);
        assert_eq!(
            body["error"],
            I18nStore::new().translate("pt", "booking_conflict")
        );
        assert_eq!(body["details"]["conflicts"].as_array().map(Vec::len), Some(1));
    }

    #[tokio::test]
    async fn history_and_status_flow() {
        let app = test_app();
        let me = Uuid::new_v4();
        let uri = format!("/api/rooms/{}/bookings/hourly", app.room_id);

        let (status, created) = send(
            &app.router,
            "POST",
            &uri,
            &[tenant(me)],
            Some(json!({
                "date": days_ahead(30),
                "checkin": "22:00:00",
                "checkout": "08:00:00",
                "overnight": true
            })),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(created["totalPrice"].as_f64(), Some(100.0));

        let (status, history) =
            send(&app.router, "GET", "/api/bookings/mine?limit=10", &[tenant(me)], None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(history.as_array().map(Vec::len), Some(1));

        let (status, _) =
            send(&app.router, "GET", "/api/bookings/mine?limit=0", &[tenant(me)], None).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);

        let status_uri = format!("/api/bookings/{}/status", created["id"].as_str().unwrap());
        let (status, confirmed) = send(
            &app.router,
            "PATCH",
            &status_uri,
            &[],
            Some(json!({ "status": "confirmed" })),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(confirmed["status"], "confirmed");

        let (status, _) = send(
            &app.router,
            "PATCH",
            &status_uri,
            &[],
            Some(json!({ "status": "pending" })),
        )
        .await;
        assert_eq!(status, StatusCode::CONFLICT);
    }

    #[tokio::test]
    async fn reservations_of_unknown_room_are_not_found() {
        let app = test_app();
        let uri = format!("/api/rooms/{}/reservations", Uuid::new_v4());

        let (status, _) = send(&app.router, "GET", &uri, &[], None).await;

        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn extra_hours_above_the_cap_are_a_bad_request() {
        let app = test_app();

        let (status, body) = send(
            &app.router,
            "POST",
            &format!("/api/rooms/{}/quotes/daily", app.room_id),
            &[],
            Some(json!({ "checkin": days_ahead(30), "extraHours": 100_000 })),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body["details"]
            .to_string()
            .contains("Extra hours cannot exceed 720."));

        let (status, _) = send(
            &app.router,
            "POST",
            &format!("/api/rooms/{}/quotes/daily/extra-hours", app.room_id),
            &[],
            Some(json!({
                "checkin": days_ahead(30),
                "extraHours": u32::MAX,
                "adjustment": "late"
            })),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn malformed_pagination_gets_localized_error_body() {
        let app = test_app();

        let (status, body) = send(
            &app.router,
            "GET",
            "/api/bookings/mine?limit=abc",
            &[tenant(Uuid::new_v4()), ("accept-language", "pt-BR".into())],
            None,
        )
        .await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "Parâmetros de consulta inválidos.");
        assert!(body["details"]["reason"].is_string());
    }
}
