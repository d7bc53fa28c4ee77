use crate::cfg::Config;
use crate::state::{State, StateRef};
use crate::store::MemoryTodoStore;
use anyhow::Result;
use axum::body::Body;
use axum::http::header::{AUTHORIZATION, CONTENT_TYPE};
use axum::http::{Method, Request};
use axum::routing::{get, patch, post};
use axum::Router;
use std::iter::once;
use std::time::Duration;
use todoauth::{Authorizer, PinnedKey, Verifier};
use tower::ServiceBuilder;
use tower_http::cors::{Any, CorsLayer};
use tower_http::request_id::MakeRequestUuid;
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::{DefaultOnRequest, DefaultOnResponse, TraceLayer};
use tower_http::ServiceBuilderExt;
use tracing::{info, span, Level};

//--------------------------------------------------------------------------------------------------

mod cfg;
mod handler_proxy;
mod handlers;
mod response;
mod state;
mod store;
mod types;

//--------------------------------------------------------------------------------------------------

const DEFAULT_HTTP_PORT: u16 = 3001;
const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 10;

#[tokio::main]
async fn main() -> Result<()> {
    // Load config
    let cfg: Config = config::Config::builder()
        .add_source(config::File::with_name("config").required(false))
        .add_source(config::File::with_name("config.local").required(false))
        .add_source(config::Environment::with_prefix("TODOAUTH").separator("__"))
        .build()?
        .try_deserialize()?;

    // Initialize tracing
    let mut fmt_sub = tracing_subscriber::fmt();
    if cfg.debug {
        fmt_sub = fmt_sub.with_max_level(Level::DEBUG);
    } else {
        fmt_sub = fmt_sub.with_max_level(Level::INFO);
    }
    fmt_sub.init();

    // Load the pinned key once; it is read-only from here on
    let pinned_key = PinnedKey::from_file(&cfg.certificate_path)?;

    let mut verifier = Verifier::new(pinned_key);
    if let Some(issuer) = &cfg.issuer {
        verifier = verifier.with_issuer(issuer);
    }
    if let Some(audience) = &cfg.audience {
        verifier = verifier.with_audience(audience);
    }

    // Create state
    let state = State::new(
        Authorizer::new(verifier),
        Box::new(MemoryTodoStore::default()),
    );

    let timeout = Duration::from_secs(
        cfg.request_timeout_secs
            .unwrap_or(DEFAULT_REQUEST_TIMEOUT_SECS),
    );
    let app = router(state.into(), timeout);

    // Run the API
    let bind_addr = format!("0.0.0.0:{}", cfg.http_port.unwrap_or(DEFAULT_HTTP_PORT));
    info!("Listening on {}", bind_addr);
    let listener = tokio::net::TcpListener::bind(bind_addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

//--------------------------------------------------------------------------------------------------

fn router(state: StateRef, timeout: Duration) -> Router {
    Router::new()
        .route("/authorize", post(handler_proxy::authorize))
        .route(
            "/todos",
            get(handler_proxy::get_todos).post(handler_proxy::create_todo),
        )
        .route(
            "/todos/:todo_id",
            patch(handler_proxy::update_todo).delete(handler_proxy::delete_todo),
        )
        .with_state(state)
        .layer(
            ServiceBuilder::new()
                .sensitive_headers(once(AUTHORIZATION))
                .set_x_request_id(MakeRequestUuid)
                .layer(
                    TraceLayer::new_for_http()
                        .make_span_with(|request: &Request<Body>| {
                            let request_id = request
                                .headers()
                                .get("x-request-id")
                                .and_then(|hv| hv.to_str().ok())
                                .unwrap_or("unknown");
                            span!(
                                Level::INFO,
                                "http_request",
                                request_id,
                                http_request.request_method = request.method().as_str(),
                                http_request.request_url = request.uri().path()
                            )
                        })
                        .on_request(DefaultOnRequest::new().level(Level::INFO))
                        .on_response(DefaultOnResponse::new().level(Level::INFO)),
                )
                .propagate_x_request_id()
                .layer(
                    CorsLayer::new()
                        .allow_origin(Any)
                        .allow_methods([
                            Method::GET,
                            Method::POST,
                            Method::PATCH,
                            Method::DELETE,
                            Method::OPTIONS,
                        ])
                        .allow_headers([AUTHORIZATION, CONTENT_TYPE]),
                )
                .layer(TimeoutLayer::new(timeout)),
        )
}

//--------------------------------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::header::{
        ACCESS_CONTROL_ALLOW_HEADERS, ACCESS_CONTROL_ALLOW_ORIGIN, ACCESS_CONTROL_REQUEST_HEADERS,
        ACCESS_CONTROL_REQUEST_METHOD, ORIGIN,
    };
    use axum::http::{Response, StatusCode};
    use jsonwebtoken::{encode, Algorithm, EncodingKey, Header};
    use serde_json::{json, Value};
    use std::time::{SystemTime, UNIX_EPOCH};
    use tower::ServiceExt;

    const CERTIFICATE: &str = include_str!("../../todoauth/tests/fixtures/pinned_cert.pem");
    const PRIVATE_KEY: &str = include_str!("../../todoauth/tests/fixtures/pinned_key.pem");

    fn app() -> Router {
        let key = PinnedKey::from_pem(CERTIFICATE.as_bytes()).unwrap();
        let state = State::new(
            Authorizer::new(Verifier::new(key)),
            Box::new(MemoryTodoStore::default()),
        );
        router(state.into(), Duration::from_secs(10))
    }

    fn bearer(sub: &str, expires_in: i64) -> String {
        let now = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap()
            .as_secs() as i64;
        let key = EncodingKey::from_rsa_pem(PRIVATE_KEY.as_bytes()).unwrap();
        let token = encode(
            &Header::new(Algorithm::RS256),
            &json!({ "sub": sub, "exp": now + expires_in }),
            &key,
        )
        .unwrap();
        format!("Bearer {token}")
    }

    fn request(method: &str, uri: &str, auth: Option<&str>, body: Option<Value>) -> Request<Body> {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(auth) = auth {
            builder = builder.header(AUTHORIZATION, auth);
        }
        match body {
            Some(body) => builder
                .header(CONTENT_TYPE, "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        }
    }

    async fn body_json(response: Response<Body>) -> Value {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn authorize_endpoint_allows_valid_token() {
        let event = json!({
            "type": "TOKEN",
            "authorizationToken": bearer("auth0|abc123", 3600),
            "methodArn": "arn:aws:execute-api:eu-west-1:123456789012:api/dev/GET/todos",
        });
        let response = app()
            .oneshot(request("POST", "/authorize", None, Some(event)))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = body_json(response).await;
        assert_eq!(body["principalId"], "auth0|abc123");
        assert_eq!(body["policyDocument"]["Statement"][0]["Effect"], "Allow");
    }

    #[tokio::test]
    async fn authorize_endpoint_denies_with_ok_status() {
        let event = json!({ "type": "TOKEN", "authorizationToken": "Basic xyz" });
        let response = app()
            .oneshot(request("POST", "/authorize", None, Some(event)))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = body_json(response).await;
        assert_eq!(
            body,
            json!({
                "principalId": "user",
                "policyDocument": {
                    "Version": "2012-10-17",
                    "Statement": [
                        { "Action": "execute-api:Invoke", "Effect": "Deny", "Resource": "*" }
                    ]
                }
            })
        );
    }

    #[tokio::test]
    async fn authorize_endpoint_rejects_other_event_types() {
        let event = json!({ "type": "REQUEST", "authorizationToken": "Bearer x" });
        let response = app()
            .oneshot(request("POST", "/authorize", None, Some(event)))
            .await
            .unwrap();

        assert!(response.status().is_client_error());
    }

    #[tokio::test]
    async fn todos_require_a_credential() {
        let response = app()
            .oneshot(request("GET", "/todos", None, None))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn todos_reject_denied_credentials() {
        let expired = bearer("auth0|abc123", -3600);
        for auth in ["Basic xyz", "Bearer abc.def.ghi", expired.as_str()] {
            let response = app()
                .oneshot(request("GET", "/todos", Some(auth), None))
                .await
                .unwrap();
            assert_eq!(response.status(), StatusCode::FORBIDDEN);
            assert_eq!(
                body_json(response).await,
                json!({ "code": "forbidden", "message": "Forbidden" })
            );
        }
    }

    #[tokio::test]
    async fn todo_lifecycle_is_scoped_to_caller() {
        let app = app();
        let alice = bearer("auth0|alice", 3600);
        let bob = bearer("auth0|bob", 3600);

        // Create
        let response = app
            .clone()
            .oneshot(request(
                "POST",
                "/todos",
                Some(&alice),
                Some(json!({ "name": "Buy milk", "dueDate": "2026-10-20" })),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let created = body_json(response).await;
        assert_eq!(created["item"]["userId"], "auth0|alice");
        assert_eq!(created["item"]["done"], false);
        let todo_id = created["item"]["todoId"].as_str().unwrap().to_string();

        // Only the owner sees it
        let response = app
            .clone()
            .oneshot(request("GET", "/todos", Some(&bob), None))
            .await
            .unwrap();
        assert_eq!(body_json(response).await, json!({ "items": [] }));

        // Update
        let update = json!({ "name": "Buy oat milk", "dueDate": "2026-10-21", "done": true });
        let response = app
            .clone()
            .oneshot(request(
                "PATCH",
                &format!("/todos/{todo_id}"),
                Some(&bob),
                Some(update.clone()),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);

        let response = app
            .clone()
            .oneshot(request(
                "PATCH",
                &format!("/todos/{todo_id}"),
                Some(&alice),
                Some(update),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NO_CONTENT);

        let response = app
            .clone()
            .oneshot(request("GET", "/todos", Some(&alice), None))
            .await
            .unwrap();
        let items = body_json(response).await;
        assert_eq!(items["items"][0]["name"], "Buy oat milk");
        assert_eq!(items["items"][0]["dueDate"], "2026-10-21");
        assert_eq!(items["items"][0]["done"], true);

        // Delete
        let response = app
            .clone()
            .oneshot(request("DELETE", &format!("/todos/{todo_id}"), Some(&alice), None))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NO_CONTENT);

        let response = app
            .oneshot(request("DELETE", &format!("/todos/{todo_id}"), Some(&alice), None))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn empty_todo_name_is_rejected() {
        let response = app()
            .oneshot(request(
                "POST",
                "/todos",
                Some(&bearer("auth0|alice", 3600)),
                Some(json!({ "name": "  ", "dueDate": "2026-10-20" })),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(body_json(response).await["code"], "empty_name");
    }

    #[tokio::test]
    async fn responses_allow_any_origin() {
        let mut request = request("GET", "/todos", Some(&bearer("auth0|alice", 3600)), None);
        request
            .headers_mut()
            .insert(ORIGIN, "https://todo.example".parse().unwrap());

        let response = app().oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(response.headers()[ACCESS_CONTROL_ALLOW_ORIGIN], "*");
    }

    #[tokio::test]
    async fn preflight_allows_authorization_header() {
        let request = Request::builder()
            .method("OPTIONS")
            .uri("/todos")
            .header(ORIGIN, "https://todo.example")
            .header(ACCESS_CONTROL_REQUEST_METHOD, "POST")
            .header(ACCESS_CONTROL_REQUEST_HEADERS, "authorization,content-type")
            .body(Body::empty())
            .unwrap();

        let response = app().oneshot(request).await.unwrap();
        assert!(response.status().is_success());
        assert_eq!(response.headers()[ACCESS_CONTROL_ALLOW_ORIGIN], "*");

        let allowed = response.headers()[ACCESS_CONTROL_ALLOW_HEADERS]
            .to_str()
            .unwrap()
            .to_ascii_lowercase();
        assert!(allowed.contains("authorization"));
        assert!(allowed.contains("content-type"));
    }
}
