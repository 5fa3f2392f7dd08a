mod common;

use axum::body::Bytes;
use axum::http::{HeaderMap, Method, Uri};
use axum::{Json, Router};
use serde_json::{json, Value};

use common::{harness, preset, spawn_backend, Harness};
use salon_client::api;
use salon_client::config::Frontend;
use salon_client::pipeline::FormPart;

/// Reflects the request back inside a success envelope.
async fn echo(method: Method, uri: Uri, headers: HeaderMap, body: Bytes) -> Json<Value> {
    let content_type = headers.get("content-type").and_then(|v| v.to_str().ok()).unwrap_or_default().to_string();
    let parsed: Value = serde_json::from_slice(&body).unwrap_or(Value::Null);
    Json(json!({
        "code": 200,
        "message": "ok",
        "data": {
            "method": method.as_str(),
            "path": uri.path(),
            "query": uri.query().unwrap_or_default(),
            "body": parsed,
            "content_type": content_type,
            "raw_len": body.len(),
        }
    }))
}

fn query_pairs(env_query: &Value) -> Vec<String> {
    let mut pairs: Vec<String> = env_query.as_str().unwrap_or_default().split('&').map(str::to_string).collect();
    pairs.sort();
    pairs
}

async fn echo_client(frontend: Frontend) -> Harness {
    let origin = spawn_backend(Router::new().fallback(echo)).await;
    let h = harness(preset(frontend, &origin));
    h.session.set_token(Some("tok")).unwrap();
    h
}

#[tokio::test]
async fn date_range_omits_missing_store() {
    let h = echo_client(Frontend::Admin).await;
    let env = api::admin::appointments::get_appointments_by_date_range(&h.client, "2024-05-01", "2024-05-07", None)
        .await
        .unwrap();
    assert_eq!(env.data["method"], "GET");
    assert_eq!(env.data["path"], "/api/v1/appointments/store");
    assert_eq!(query_pairs(&env.data["query"]), vec!["end_date=2024-05-07", "start_date=2024-05-01"]);

    let env = api::admin::appointments::get_appointments_by_date_range(&h.client, "2024-05-01", "2024-05-07", Some(3))
        .await
        .unwrap();
    assert!(env.data["query"].as_str().unwrap().contains("store_id=3"));
}

#[tokio::test]
async fn confirm_arrival_posts_the_appointment_id() {
    let h = echo_client(Frontend::Store).await;
    let env = api::store::appointments::confirm_arrival(&h.client, 7).await.unwrap();
    assert_eq!(env.data["method"], "POST");
    assert_eq!(env.data["path"], "/api/v1/appointments/confirm-arrival");
    assert_eq!(env.data["body"], json!({"appointment_id": 7}));
}

#[tokio::test]
async fn slot_adjustments_share_one_body_shape() {
    let h = echo_client(Frontend::Admin).await;
    let env = api::admin::slots::lock_slot(&h.client, 11, 2).await.unwrap();
    assert_eq!(env.data["path"], "/api/v1/slots/lock");
    assert_eq!(env.data["body"], json!({"slot_id": 11, "count": 2}));
    let env = api::admin::slots::release_slot(&h.client, 11, 1).await.unwrap();
    assert_eq!(env.data["path"], "/api/v1/slots/release");
}

#[tokio::test]
async fn phone_numbers_are_path_encoded() {
    let h = echo_client(Frontend::Customer).await;
    let env = api::customer::members::get_member_info(&h.client, "+86 138").await.unwrap();
    assert_eq!(env.data["path"], "/api/v1/customer/members/phone/%2B86%20138");
}

#[tokio::test]
async fn technicians_are_always_filtered_by_role() {
    let h = echo_client(Frontend::Store).await;
    let env = api::store::appointments::get_technicians(&h.client, &json!({"page": 1, "role": "admin"})).await.unwrap();
    assert_eq!(env.data["path"], "/api/v1/users");
    assert_eq!(query_pairs(&env.data["query"]), vec!["page=1", "role=technician"]);
}

#[tokio::test]
async fn store_slot_alias_forwards_to_available_slots() {
    let h = echo_client(Frontend::Customer).await;
    let env = api::customer::bookings::get_store_available_slots(&h.client, 4, "2024-06-01").await.unwrap();
    assert_eq!(env.data["path"], "/api/v1/slots/available");
    assert_eq!(query_pairs(&env.data["query"]), vec!["date=2024-06-01", "store_id=4"]);
}

#[tokio::test]
async fn staff_booking_actions_use_put() {
    let h = echo_client(Frontend::Staff).await;
    let env = api::staff::bookings::cancel_booking(&h.client, 15, "customer no-show").await.unwrap();
    assert_eq!(env.data["method"], "PUT");
    assert_eq!(env.data["path"], "/api/v1/staff/bookings/15/cancel");
    assert_eq!(env.data["body"], json!({"reason": "customer no-show"}));

    let env = api::staff::bookings::get_staff_schedule(&h.client, "2024-06-01").await.unwrap();
    assert_eq!(env.data["query"], "date=2024-06-01");
}

#[tokio::test]
async fn template_delete_and_update() {
    let h = echo_client(Frontend::Admin).await;
    let env = api::admin::templates::delete_template(&h.client, 3).await.unwrap();
    assert_eq!(env.data["method"], "DELETE");
    assert_eq!(env.data["path"], "/api/v1/slot-templates/3");

    let env = api::admin::templates::update_template(&h.client, 3, &json!({"capacity": 4})).await.unwrap();
    assert_eq!(env.data["method"], "PUT");
    assert_eq!(env.data["body"]["capacity"], 4);
}

#[tokio::test]
async fn face_upload_is_multipart() {
    let h = echo_client(Frontend::Store).await;
    let parts = vec![
        FormPart::text("note", "front desk"),
        FormPart::file("face", "face.jpg", Some("image/jpeg"), vec![0xff, 0xd8, 0xff]),
    ];
    let env = api::store::members::upload_face_image(&h.client, 21, parts).await.unwrap();
    assert_eq!(env.data["path"], "/api/v1/members/21/face");
    assert!(env.data["content_type"].as_str().unwrap().starts_with("multipart/form-data"));
    assert!(env.data["raw_len"].as_u64().unwrap() > 3);
}

#[tokio::test]
async fn deposit_refund_carries_reason() {
    let h = echo_client(Frontend::Admin).await;
    let env = api::admin::payments::refund_appointment_deposit(&h.client, 88, "goodwill").await.unwrap();
    assert_eq!(env.data["path"], "/api/v1/admin/appointments/88/deposit/refund");
    assert_eq!(env.data["body"], json!({"reason": "goodwill"}));
}

#[tokio::test]
async fn wechat_js_config_passes_page_url() {
    let h = echo_client(Frontend::Customer).await;
    let env = api::customer::auth::get_wechat_config(&h.client, "https://salon.example/home?a=1").await.unwrap();
    assert_eq!(env.data["path"], "/api/v1/customer/auth/wechat/config");
    assert_eq!(env.data["query"], "url=https%3A%2F%2Fsalon.example%2Fhome%3Fa%3D1");
}
