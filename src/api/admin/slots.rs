use serde::Serialize;
use serde_json::json;

use crate::error::ClientResult;
use crate::pipeline::{ApiClient, Endpoint, Envelope};

pub async fn get_slots<P: Serialize + ?Sized>(client: &ApiClient, params: &P) -> ClientResult<Envelope> {
    client.send(Endpoint::get("/slots").query(params)?).await
}

pub async fn get_available_slots<P: Serialize + ?Sized>(client: &ApiClient, params: &P) -> ClientResult<Envelope> {
    client.send(Endpoint::get("/slots/available").query(params)?).await
}

pub async fn get_slot_by_id(client: &ApiClient, id: i64) -> ClientResult<Envelope> {
    client.send(Endpoint::get(format!("/slots/{}", id))).await
}

pub async fn generate_slots<B: Serialize + ?Sized>(client: &ApiClient, body: &B) -> ClientResult<Envelope> {
    client.send(Endpoint::post("/slots/generate").json(body)?).await
}

async fn adjust(client: &ApiClient, action: &str, slot_id: i64, count: u32) -> ClientResult<Envelope> {
    let body = json!({ "slot_id": slot_id, "count": count });
    client.send(Endpoint::post(format!("/slots/{}", action)).json(&body)?).await
}

pub async fn lock_slot(client: &ApiClient, slot_id: i64, count: u32) -> ClientResult<Envelope> {
    adjust(client, "lock", slot_id, count).await
}

pub async fn unlock_slot(client: &ApiClient, slot_id: i64, count: u32) -> ClientResult<Envelope> {
    adjust(client, "unlock", slot_id, count).await
}

pub async fn book_slot(client: &ApiClient, slot_id: i64, count: u32) -> ClientResult<Envelope> {
    adjust(client, "book", slot_id, count).await
}

pub async fn release_slot(client: &ApiClient, slot_id: i64, count: u32) -> ClientResult<Envelope> {
    adjust(client, "release", slot_id, count).await
}

pub async fn recalculate_slot_capacity<B: Serialize + ?Sized>(client: &ApiClient, body: &B) -> ClientResult<Envelope> {
    client.send(Endpoint::post("/slots/recalculate-capacity").json(body)?).await
}
