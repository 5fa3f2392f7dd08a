use serde::Serialize;

use crate::error::ClientResult;
use crate::pipeline::{segment, ApiClient, Endpoint, Envelope};

pub async fn register_member<B: Serialize + ?Sized>(client: &ApiClient, body: &B) -> ClientResult<Envelope> {
    client.send(Endpoint::post("/customer/members/register").json(body)?).await
}

pub async fn get_member_info(client: &ApiClient, phone: &str) -> ClientResult<Envelope> {
    client.send(Endpoint::get(format!("/customer/members/phone/{}", segment(phone)))).await
}

pub async fn get_member_code(client: &ApiClient, member_id: i64) -> ClientResult<Envelope> {
    client.send(Endpoint::get(format!("/customer/members/{}/code", member_id))).await
}

/// Issues a fresh verification code for the member to show at the counter.
pub async fn generate_member_code<B: Serialize + ?Sized>(client: &ApiClient, body: &B) -> ClientResult<Envelope> {
    client.send(Endpoint::post("/customer/members/verify").json(body)?).await
}
