use serde::Serialize;
use serde_json::json;

use crate::error::ClientResult;
use crate::pipeline::{segment, ApiClient, Endpoint, Envelope};

pub async fn create_payment<B: Serialize + ?Sized>(client: &ApiClient, body: &B) -> ClientResult<Envelope> {
    client.send(Endpoint::post("/payments").json(body)?).await
}

pub async fn get_payment_status(client: &ApiClient, payment_id: i64) -> ClientResult<Envelope> {
    client.send(Endpoint::get(format!("/payments/{}/status", payment_id))).await
}

/// Older public WeChat login route, kept for the payment pages.
pub async fn wechat_login(client: &ApiClient, code: &str) -> ClientResult<Envelope> {
    let body = json!({ "code": code });
    client.send(Endpoint::post("/public/customer/wechat/login").json(&body)?.without_session_expiry()).await
}

pub async fn get_my_member_info(client: &ApiClient) -> ClientResult<Envelope> {
    client.send(Endpoint::get("/members/my")).await
}

pub async fn get_member_by_phone(client: &ApiClient, phone: &str) -> ClientResult<Envelope> {
    client.send(Endpoint::get(format!("/members/phone/{}", segment(phone)))).await
}
