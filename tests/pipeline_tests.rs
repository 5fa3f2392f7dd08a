mod common;

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use axum::http::{header, HeaderMap, StatusCode};
use axum::routing::get;
use axum::{Json, Router};
use serde_json::{json, Value};

use common::{dead_origin, harness, preset, spawn_backend, RecordingNavigator};
use salon_client::api;
use salon_client::config::Frontend;
use salon_client::error::{ClientError, FailureOrigin};
use salon_client::pipeline::{Endpoint, ExpiryDispatcher, NoticeLevel};
use salon_client::storage::KeyValueStore;

async fn echo_headers(headers: HeaderMap) -> Json<Value> {
    let h = |name: &str| headers.get(name).and_then(|v| v.to_str().ok()).map(str::to_string);
    Json(json!({
        "code": 200,
        "message": "ok",
        "data": { "authorization": h("authorization"), "client_type": h("x-client-type") }
    }))
}

fn backend() -> Router {
    Router::new()
        .route("/api/v1/echo", get(echo_headers))
        .route("/api/v1/ok", get(|| async { Json(json!({"code": 0, "message": "ok", "data": {"n": 1}})) }))
        .route("/api/v1/envelope-401", get(|| async { Json(json!({"code": 401, "message": "token expired"})) }))
        .route(
            "/api/v1/status-401",
            get(|| async { (StatusCode::UNAUTHORIZED, Json(json!({"message": "login required"}))) }),
        )
        .route(
            "/api/v1/status-403",
            get(|| async { (StatusCode::FORBIDDEN, Json(json!({"message": "store managers only"}))) }),
        )
        .route("/api/v1/status-500", get(|| async { StatusCode::INTERNAL_SERVER_ERROR }))
        .route(
            "/api/v1/slow-401",
            get(|| async {
                tokio::time::sleep(Duration::from_millis(150)).await;
                (StatusCode::UNAUTHORIZED, Json(json!({"message": "token expired"})))
            }),
        )
        .route("/api/v1/appointments/my", get(|| async { StatusCode::UNAUTHORIZED }))
        .route("/api/v1/envelope-403", get(|| async { Json(json!({"code": 403, "message": "admins only"})) }))
        .route(
            "/api/v1/missing",
            get(|| async { (StatusCode::NOT_FOUND, Json(json!({"code": 404, "data": {"message": "no such store"}}))) }),
        )
        .route("/api/v1/slot-full", get(|| async { Json(json!({"code": 40012, "message": "slot is full"})) }))
        .route(
            "/api/v1/slow",
            get(|| async {
                tokio::time::sleep(Duration::from_millis(500)).await;
                Json(json!({"code": 200}))
            }),
        )
        .route(
            "/api/v1/admin/payments/export",
            get(|| async { ([(header::CONTENT_TYPE, "application/vnd.ms-excel")], b"id,amount\n1,20\n".to_vec()) }),
        )
}

async fn signed_in(frontend: Frontend) -> common::Harness {
    let origin = spawn_backend(backend()).await;
    let h = harness(preset(frontend, &origin));
    h.session.set_token(Some("tok-1")).unwrap();
    h
}

#[tokio::test]
async fn bearer_header_carries_the_stored_token() {
    let h = signed_in(Frontend::Admin).await;
    let env = h.client.send(Endpoint::get("/echo")).await.unwrap();
    assert_eq!(env.data["authorization"], "Bearer tok-1");
    assert_eq!(env.data["client_type"], "admin-web");

    h.session.clear().unwrap();
    let env = h.client.send(Endpoint::get("/echo")).await.unwrap();
    assert!(env.data["authorization"].is_null());
}

#[tokio::test]
async fn only_admin_sends_a_client_type() {
    let h = signed_in(Frontend::Staff).await;
    let env = h.client.send(Endpoint::get("/echo")).await.unwrap();
    assert!(env.data["client_type"].is_null());
}

#[tokio::test]
async fn success_codes_leave_the_session_alone() {
    let mut h = signed_in(Frontend::Admin).await;
    let epoch = h.session.epoch();
    let env = h.client.send(Endpoint::get("/ok")).await.unwrap();
    assert_eq!(env.code, 0);
    assert_eq!(env.data["n"], 1);
    assert_eq!(h.session.token().as_deref(), Some("tok-1"));
    assert_eq!(h.session.epoch(), epoch);
    assert!(h.expiry.try_recv().is_err());
}

#[tokio::test]
async fn customer_treats_code_zero_as_failure() {
    let h = signed_in(Frontend::Customer).await;
    let err = h.client.send(Endpoint::get("/ok")).await.unwrap_err();
    assert_eq!(err, ClientError::Application { code: 0, message: "ok".into() });
}

#[tokio::test]
async fn envelope_401_clears_the_session_once() {
    let mut h = signed_in(Frontend::Admin).await;
    let err = h.client.send(Endpoint::get("/envelope-401")).await.unwrap_err();
    assert_eq!(
        err,
        ClientError::AuthExpired { message: "token expired".into(), origin: FailureOrigin::Envelope { code: 401 } }
    );
    assert!(h.session.token().is_none());
    assert!(h.storage.get("token").is_none());
    let ev = h.expiry.try_recv().expect("one expiry event");
    assert_eq!(ev.epoch, Some(1));
    assert!(h.expiry.try_recv().is_err());
}

#[tokio::test]
async fn status_401_clears_the_session_once() {
    let mut h = signed_in(Frontend::Store).await;
    let err = h.client.send(Endpoint::get("/status-401")).await.unwrap_err();
    assert_eq!(err.status(), Some(401));
    assert!(err.is_auth_failure());
    assert_eq!(err.message(), "login required");
    assert!(!h.session.is_logged_in());
    assert!(h.expiry.try_recv().is_ok());
    assert!(h.expiry.try_recv().is_err());
}

#[tokio::test]
async fn admin_envelope_403_is_forbidden_without_clearing() {
    let mut h = signed_in(Frontend::Admin).await;
    let err = h.client.send(Endpoint::get("/envelope-403")).await.unwrap_err();
    assert_eq!(err.code_str(), "forbidden");
    assert_eq!(err.message(), "admins only");
    assert_eq!(h.session.token().as_deref(), Some("tok-1"));
    assert!(h.expiry.try_recv().is_err());
    assert!(h.notices.messages().is_empty());
}

#[tokio::test]
async fn store_surfaces_forbidden_to_the_user() {
    let h = signed_in(Frontend::Store).await;
    let _ = h.client.send(Endpoint::get("/envelope-403")).await.unwrap_err();
    assert_eq!(h.notices.messages(), vec![(NoticeLevel::Error, "admins only".to_string())]);
}

#[tokio::test]
async fn status_403_is_forbidden_and_keeps_the_session() {
    let mut h = signed_in(Frontend::Store).await;
    let err = h.client.send(Endpoint::get("/status-403")).await.unwrap_err();
    assert_eq!(
        err,
        ClientError::Forbidden {
            message: "store managers only".into(),
            origin: FailureOrigin::HttpStatus { status: 403 },
        }
    );
    assert_eq!(h.session.token().as_deref(), Some("tok-1"));
    assert_eq!(h.storage.get("token").as_deref(), Some("tok-1"));
    assert!(h.expiry.try_recv().is_err());
    assert_eq!(h.notices.messages(), vec![(NoticeLevel::Error, "store managers only".to_string())]);
}

#[tokio::test]
async fn status_500_falls_back_to_its_category() {
    let mut h = signed_in(Frontend::Customer).await;
    let err = h.client.send(Endpoint::get("/status-500")).await.unwrap_err();
    assert_eq!(
        err,
        ClientError::Http {
            status: 500,
            category: "internal server error".into(),
            message: "internal server error".into(),
        }
    );
    assert_eq!(h.session.token().as_deref(), Some("tok-1"));
    assert!(h.expiry.try_recv().is_err());
    assert_eq!(h.notices.messages(), vec![(NoticeLevel::Error, "internal server error".to_string())]);
}

#[tokio::test]
async fn other_statuses_carry_category_and_server_message() {
    let h = signed_in(Frontend::Admin).await;
    let err = h.client.send(Endpoint::get("/missing")).await.unwrap_err();
    assert_eq!(
        err,
        ClientError::Http { status: 404, category: "resource not found".into(), message: "no such store".into() }
    );
    assert!(h.session.is_logged_in());
}

#[tokio::test]
async fn application_errors_surface_per_deployment() {
    let admin = signed_in(Frontend::Admin).await;
    let err = admin.client.send(Endpoint::get("/slot-full")).await.unwrap_err();
    assert_eq!(err, ClientError::Application { code: 40012, message: "slot is full".into() });
    assert!(admin.notices.messages().is_empty());

    let customer = signed_in(Frontend::Customer).await;
    let _ = customer.client.send(Endpoint::get("/slot-full")).await.unwrap_err();
    assert_eq!(customer.notices.messages(), vec![(NoticeLevel::Error, "slot is full".to_string())]);
}

#[tokio::test]
async fn blob_export_is_returned_untouched() {
    let h = signed_in(Frontend::Admin).await;
    let resp = api::admin::payments::export_payments(&h.client, &json!({"status": "paid"})).await.unwrap();
    assert_eq!(resp.headers()[header::CONTENT_TYPE], "application/vnd.ms-excel");
    assert_eq!(&resp.bytes().await.unwrap()[..], b"id,amount\n1,20\n");
}

#[tokio::test]
async fn slow_backend_times_out() {
    let origin = spawn_backend(backend()).await;
    let mut cfg = preset(Frontend::Customer, &origin);
    cfg.timeout_ms = 100;
    let h = harness(cfg);
    let err = h.client.send(Endpoint::get("/slow")).await.unwrap_err();
    assert_eq!(err, ClientError::Timeout { timeout_ms: 100 });
    assert!(err.is_transport());
    assert_eq!(h.notices.messages(), vec![(NoticeLevel::Error, "request timed out".to_string())]);
}

#[tokio::test]
async fn unreachable_backend_is_a_network_error() {
    let origin = dead_origin().await;
    let h = harness(preset(Frontend::Staff, &origin));
    h.session.set_token(Some("tok-1")).unwrap();
    let err = h.client.send(Endpoint::get("/ok")).await.unwrap_err();
    assert!(matches!(err, ClientError::Network { .. }), "{err:?}");
    assert!(h.session.is_logged_in());
}

#[tokio::test]
async fn concurrent_401s_produce_one_navigation() {
    let hits = Arc::new(AtomicUsize::new(0));
    let counter = hits.clone();
    let app = Router::new().route(
        "/api/v1/mine",
        get(move || {
            let counter = counter.clone();
            async move {
                counter.fetch_add(1, Ordering::SeqCst);
                tokio::time::sleep(Duration::from_millis(20)).await;
                (StatusCode::UNAUTHORIZED, Json(json!({"message": "token expired"})))
            }
        }),
    );
    let origin = spawn_backend(app).await;
    let h = harness(preset(Frontend::Admin, &origin));
    h.session.set_token(Some("stale")).unwrap();

    let nav = Arc::new(RecordingNavigator::default());
    let dispatcher = ExpiryDispatcher::new(nav.clone(), "/login").spawn(h.expiry);

    let calls = (0..5).map(|_| h.client.send(Endpoint::get("/mine")));
    let results = futures::future::join_all(calls).await;
    assert!(results.iter().all(|r| matches!(r, Err(ClientError::AuthExpired { .. }))));
    assert_eq!(hits.load(Ordering::SeqCst), 5);

    drop(h.client);
    let dispatcher = dispatcher.await.unwrap();
    assert_eq!(dispatcher.redirects(), 1);
    assert_eq!(*nav.0.lock(), vec!["/login".to_string()]);
}

#[tokio::test]
async fn each_anonymous_401_redirects() {
    let origin = spawn_backend(backend()).await;
    let h = harness(preset(Frontend::Customer, &origin));
    let nav = Arc::new(RecordingNavigator::default());
    let dispatcher = ExpiryDispatcher::new(nav.clone(), "/login").spawn(h.expiry);

    for _ in 0..2 {
        let err = api::customer::bookings::get_my_appointments(&h.client).await.unwrap_err();
        assert_eq!(
            err,
            ClientError::AuthExpired {
                message: "authentication failed".into(),
                origin: FailureOrigin::HttpStatus { status: 401 },
            }
        );
        tokio::time::sleep(Duration::from_millis(50)).await;
    }

    drop(h.client);
    let dispatcher = dispatcher.await.unwrap();
    assert_eq!(dispatcher.redirects(), 2);
    assert_eq!(*nav.0.lock(), vec!["/login".to_string(), "/login".to_string()]);
}

#[tokio::test]
async fn a_new_login_after_expiry_redirects_again() {
    let h = signed_in(Frontend::Admin).await;
    let nav = Arc::new(RecordingNavigator::default());
    let dispatcher = ExpiryDispatcher::new(nav.clone(), "/login").spawn(h.expiry);

    let _ = h.client.send(Endpoint::get("/status-401")).await.unwrap_err();
    h.session.set_token(Some("tok-2")).unwrap();
    let _ = h.client.send(Endpoint::get("/envelope-401")).await.unwrap_err();
    assert!(h.session.token().is_none());

    drop(h.client);
    assert_eq!(dispatcher.await.unwrap().redirects(), 2);
}

#[tokio::test]
async fn late_401_from_a_replaced_token_keeps_the_new_session() {
    let mut h = signed_in(Frontend::Admin).await;
    let relogin = async {
        tokio::time::sleep(Duration::from_millis(40)).await;
        h.session.clear().unwrap();
        h.session.set_token(Some("tok-2")).unwrap();
    };
    let (result, ()) = tokio::join!(h.client.send(Endpoint::get("/slow-401")), relogin);

    assert!(matches!(result, Err(ClientError::AuthExpired { .. })), "{result:?}");
    assert_eq!(h.session.token().as_deref(), Some("tok-2"));
    assert_eq!(h.storage.get("token").as_deref(), Some("tok-2"));
    assert!(h.expiry.try_recv().is_err());
}
