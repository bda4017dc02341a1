use crate::audit::{client_origin, record_attempt};
use axum::extract::{ConnectInfo, State};
use axum::http::{HeaderMap, StatusCode};
use axum::response::{Html, Json, Redirect};
use axum::routing::get;
use axum::{Form, Router};
use registration::{PipelineConfig, RegistrationSubmission, ValidationResult, validate_with};
use serde_json::json;
use std::net::SocketAddr;
use tower_http::trace::TraceLayer;

const REGISTER_PAGE: &str = include_str!("../templates/register.html");

#[derive(Debug, Clone, Copy, Default)]
pub struct AppState {
    pub pipeline: PipelineConfig,
}

pub fn app(state: AppState) -> Router {
    Router::new()
        .route("/", get(home))
        .route("/register", get(register_form).post(register))
        .route("/health", get(health_handler))
        .layer(tower::ServiceBuilder::new().layer(TraceLayer::new_for_http()))
        .with_state(state)
}

async fn home() -> Redirect {
    Redirect::to("/register")
}

async fn register_form() -> Html<&'static str> {
    Html(REGISTER_PAGE)
}

/// Runs the pipeline on a submitted form and records the attempt.
///
/// Accepted registrations answer `200`, rejections `422`; both carry the
/// serialized [`ValidationResult`]. A body missing a form field is refused
/// by the extractor before validation runs.
async fn register(
    State(state): State<AppState>,
    ConnectInfo(peer): ConnectInfo<SocketAddr>,
    headers: HeaderMap,
    Form(submission): Form<RegistrationSubmission>,
) -> (StatusCode, Json<ValidationResult>) {
    let result = validate_with(&submission, state.pipeline);
    record_attempt(&result, &client_origin(&headers, peer));

    let status = if result.is_accepted() {
        tracing::info!("Registration accepted");
        StatusCode::OK
    } else {
        tracing::info!(errors = result.errors().len(), "Registration rejected");
        StatusCode::UNPROCESSABLE_ENTITY
    };
    (status, Json(result))
}

/// Liveness plus the reporting policy this instance validates with.
async fn health_handler(State(state): State<AppState>) -> Json<serde_json::Value> {
    Json(json!({
        "status": "ok",
        "checked_at": chrono::Utc::now().to_rfc3339(),
        "error_reporting": state.pipeline.reporting.as_str(),
        "version": env!("CARGO_PKG_VERSION")
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::{Body, to_bytes};
    use axum::extract::connect_info::MockConnectInfo;
    use axum::http::{Request, header};
    use registration::ErrorReporting;
    use tower::ServiceExt as _;

    fn test_app(reporting: ErrorReporting) -> Router {
        app(AppState {
            pipeline: PipelineConfig::new(reporting),
        })
        .layer(MockConnectInfo(SocketAddr::from(([127, 0, 0, 1], 40000))))
    }

    fn post_form(body: &'static str) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri("/register")
            .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
            .body(Body::from(body))
            .unwrap()
    }

    async fn json_body(response: axum::response::Response) -> serde_json::Value {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn test_home_redirects_to_register() {
        let response = test_app(ErrorReporting::default())
            .oneshot(Request::get("/").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        assert_eq!(response.headers()[header::LOCATION], "/register");
    }

    #[tokio::test]
    async fn test_register_form_served() {
        let response = test_app(ErrorReporting::default())
            .oneshot(Request::get("/register").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let page = String::from_utf8(bytes.to_vec()).unwrap();
        assert!(page.contains("name=\"confirm_password\""));
    }

    #[tokio::test]
    async fn test_accepted_submission() {
        let response = test_app(ErrorReporting::default())
            .oneshot(post_form(
                "username=alice_w&email=alice%40uni.edu&password=Str0ng%21Passw0rd\
                 &confirm_password=Str0ng%21Passw0rd&bio=%3Cscript%3Ealert(1)%3C%2Fscript%3EHello",
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let body = json_body(response).await;
        assert_eq!(body["outcome"], "accepted");
        assert_eq!(body["username"], "alice_w");
        assert_eq!(body["bio"], "Hello");
        assert!(body.get("password").is_none());
    }

    #[tokio::test]
    async fn test_bio_is_optional() {
        let response = test_app(ErrorReporting::default())
            .oneshot(post_form(
                "username=alice_w&email=alice%40uni.edu&password=Str0ng%21Passw0rd\
                 &confirm_password=Str0ng%21Passw0rd",
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_rejected_submission_lists_errors() {
        let response = test_app(ErrorReporting::FirstPerField)
            .oneshot(post_form(
                "username=admin&email=bob%40corp.com&password=Str0ng%21Passw0rd\
                 &confirm_password=nope",
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);

        let body = json_body(response).await;
        assert_eq!(body["outcome"], "rejected");
        let codes: Vec<&str> = body["errors"]
            .as_array()
            .unwrap()
            .iter()
            .map(|e| e["code"].as_str().unwrap())
            .collect();
        assert_eq!(
            codes,
            vec!["username_reserved", "email_domain_not_allowed", "password_mismatch"]
        );
    }

    #[tokio::test]
    async fn test_missing_field_refused_before_validation() {
        let response = test_app(ErrorReporting::default())
            .oneshot(post_form("username=alice_w"))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    }

    #[test]
    fn test_health_handler_reports_policy() {
        tokio_test::block_on(async {
            let state = AppState {
                pipeline: PipelineConfig::new(ErrorReporting::FirstPerField),
            };
            let Json(body) = health_handler(State(state)).await;
            assert_eq!(body["status"], "ok");
            assert!(body.get("checked_at").is_some());
            assert_eq!(body["error_reporting"], "first_per_field");
            assert!(body.get("version").is_some());
        });
    }

    #[tokio::test]
    async fn test_health_route() {
        let response = test_app(ErrorReporting::default())
            .oneshot(Request::get("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(json_body(response).await["error_reporting"], "all_per_field");
    }
}
