use serde::Serialize;

use crate::error::ClientResult;
use crate::pipeline::{ApiClient, Endpoint, Envelope};

/// Check the code a member shows at the counter.
pub async fn verify_member<B: Serialize + ?Sized>(client: &ApiClient, body: &B) -> ClientResult<Envelope> {
    client.send(Endpoint::post("/staff/members/verify").json(body)?).await
}

pub async fn get_member_info(client: &ApiClient, member_id: i64) -> ClientResult<Envelope> {
    client.send(Endpoint::get(format!("/staff/members/{}", member_id))).await
}

pub async fn record_consumption<B: Serialize + ?Sized>(client: &ApiClient, body: &B) -> ClientResult<Envelope> {
    client.send(Endpoint::post("/staff/members/consumption").json(body)?).await
}
