//! Integration tests for the HTTP backend.
//!
//! Each test spins up a small axum app on a random port that imitates the
//! REST backend's auth endpoints, then drives `HttpBackend` against it.

#[cfg(feature = "http")]
mod http {
    use std::time::Duration;

    use axum::Json;
    use axum::Router;
    use axum::http::{HeaderMap, StatusCode};
    use axum::response::{IntoResponse, Response};
    use axum::routing::post;
    use hotelgenie_protocol::{Credential, LoginRequest, RegisterRequest};
    use hotelgenie_transport::{AuthBackend, BackendConfig, HttpBackend, TransportError};
    use serde_json::{Value, json};

    // =====================================================================
    // Fake backend
    // =====================================================================

    async fn validate(headers: HeaderMap) -> Response {
        let auth = headers
            .get("authorization")
            .and_then(|v| v.to_str().ok())
            .unwrap_or_default();

        match auth {
            "Bearer admin-token" => Json(json!({ "role": "ROLE_ADMIN" })).into_response(),
            "Bearer no-role" => Json(json!({})).into_response(),
            "Bearer garbage" => (StatusCode::OK, "<html>oops</html>").into_response(),
            "Bearer slow" => {
                tokio::time::sleep(Duration::from_secs(5)).await;
                Json(json!({ "role": "ROLE_CLIENT" })).into_response()
            }
            _ => StatusCode::UNAUTHORIZED.into_response(),
        }
    }

    async fn login(Json(body): Json<Value>) -> Response {
        if body["email"] == "guest@example.com" && body["password"] == "hunter22" {
            Json(json!({ "accessToken": "issued-token", "role": "ROLE_CLIENT" }))
                .into_response()
        } else {
            StatusCode::UNAUTHORIZED.into_response()
        }
    }

    async fn register(Json(body): Json<Value>) -> Response {
        if body["email"] == "taken@example.com" {
            (
                StatusCode::CONFLICT,
                Json(json!({ "message": "Email already registered" })),
            )
                .into_response()
        } else if body["email"] == "broken@example.com" {
            StatusCode::INTERNAL_SERVER_ERROR.into_response()
        } else {
            StatusCode::CREATED.into_response()
        }
    }

    /// Starts the fake backend and returns its base URL.
    async fn start_backend() -> String {
        let app = Router::new()
            .route("/api/auth/validate-token", post(validate))
            .route("/api/auth/login", post(login))
            .route("/api/auth/client/register", post(register));

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("should bind");
        let addr = listener.local_addr().expect("should have addr");

        tokio::spawn(async move {
            let _ = axum::serve(listener, app).await;
        });

        format!("http://{addr}")
    }

    async fn backend() -> HttpBackend {
        let base = start_backend().await;
        HttpBackend::new(BackendConfig::with_base_url(base)).expect("client should build")
    }

    // =====================================================================
    // validate_token()
    // =====================================================================

    #[tokio::test]
    async fn test_validate_token_accepted_returns_role() {
        let backend = backend().await;

        let resp = backend
            .validate_token(&Credential::new("admin-token"))
            .await
            .expect("should validate");

        assert_eq!(resp.role.as_deref(), Some("ROLE_ADMIN"));
    }

    #[tokio::test]
    async fn test_validate_token_without_role_returns_none() {
        let backend = backend().await;

        let resp = backend
            .validate_token(&Credential::new("no-role"))
            .await
            .expect("should validate");

        assert!(resp.role.is_none());
    }

    #[tokio::test]
    async fn test_validate_token_unknown_returns_rejected_401() {
        let backend = backend().await;

        let result = backend.validate_token(&Credential::new("stolen")).await;

        assert!(
            matches!(result, Err(TransportError::Rejected { status: 401, .. })),
            "expected 401 rejection, got {result:?}"
        );
    }

    #[tokio::test]
    async fn test_validate_token_non_json_body_is_malformed() {
        let backend = backend().await;

        let result = backend.validate_token(&Credential::new("garbage")).await;

        assert!(matches!(result, Err(TransportError::MalformedBody(_))));
    }

    #[tokio::test]
    async fn test_validate_token_slow_backend_times_out() {
        let base = start_backend().await;
        let backend = HttpBackend::new(BackendConfig {
            base_url: base,
            request_timeout: Some(Duration::from_millis(100)),
        })
        .unwrap();

        let result = backend.validate_token(&Credential::new("slow")).await;

        assert!(matches!(result, Err(TransportError::Timeout)));
    }

    #[tokio::test]
    async fn test_validate_token_unreachable_backend_is_http_error() {
        // Grab a free port, then close it so nothing is listening.
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let backend =
            HttpBackend::new(BackendConfig::with_base_url(format!("http://{addr}"))).unwrap();

        let result = backend.validate_token(&Credential::new("admin-token")).await;

        assert!(matches!(result, Err(TransportError::Http(_))));
    }

    // =====================================================================
    // login()
    // =====================================================================

    #[tokio::test]
    async fn test_login_good_credentials_returns_token_and_role() {
        let backend = backend().await;

        let resp = backend
            .login(&LoginRequest {
                email: "guest@example.com".into(),
                password: "hunter22".into(),
            })
            .await
            .expect("should log in");

        assert_eq!(resp.access_token, "issued-token");
        assert_eq!(resp.role, "ROLE_CLIENT");
    }

    #[tokio::test]
    async fn test_login_bad_password_is_rejected() {
        let backend = backend().await;

        let result = backend
            .login(&LoginRequest {
                email: "guest@example.com".into(),
                password: "wrong-password".into(),
            })
            .await;

        assert_eq!(result.unwrap_err().status(), Some(401));
    }

    // =====================================================================
    // register()
    // =====================================================================

    fn registration(email: &str) -> RegisterRequest {
        RegisterRequest {
            name: "Ada".into(),
            email: email.into(),
            password: "hunter22".into(),
        }
    }

    #[tokio::test]
    async fn test_register_new_email_succeeds() {
        let backend = backend().await;

        backend
            .register(&registration("new@example.com"))
            .await
            .expect("should register");
    }

    #[tokio::test]
    async fn test_register_conflict_carries_server_message() {
        let backend = backend().await;

        let result = backend.register(&registration("taken@example.com")).await;

        match result {
            Err(TransportError::Rejected { status, message }) => {
                assert_eq!(status, 409);
                assert_eq!(message.as_deref(), Some("Email already registered"));
            }
            other => panic!("expected rejection, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_register_rejection_without_body_has_no_message() {
        let backend = backend().await;

        let result = backend.register(&registration("broken@example.com")).await;

        assert!(matches!(
            result,
            Err(TransportError::Rejected {
                status: 500,
                message: None
            })
        ));
    }
}
