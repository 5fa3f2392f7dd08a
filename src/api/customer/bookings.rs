use serde::Serialize;
use serde_json::json;

use crate::error::ClientResult;
use crate::pipeline::{ApiClient, Endpoint, Envelope};

pub async fn get_available_slots<P: Serialize + ?Sized>(client: &ApiClient, params: &P) -> ClientResult<Envelope> {
    client.send(Endpoint::get("/slots/available").query(params)?).await
}

pub async fn create_appointment<B: Serialize + ?Sized>(client: &ApiClient, body: &B) -> ClientResult<Envelope> {
    client.send(Endpoint::post("/appointments").json(body)?).await
}

pub async fn get_my_appointments(client: &ApiClient) -> ClientResult<Envelope> {
    client.send(Endpoint::get("/appointments/my")).await
}

pub async fn get_upcoming_appointments(client: &ApiClient) -> ClientResult<Envelope> {
    client.send(Endpoint::get("/appointments/my/upcoming")).await
}

pub async fn get_appointment_by_id(client: &ApiClient, id: i64) -> ClientResult<Envelope> {
    client.send(Endpoint::get(format!("/appointments/{}", id))).await
}

pub async fn cancel_appointment_by_customer(client: &ApiClient, id: i64, reason: &str) -> ClientResult<Envelope> {
    let body = json!({ "appointment_id": id, "reason": reason });
    client.send(Endpoint::post("/appointments/cancel/customer").json(&body)?).await
}

/// `payment_method` is `"wechat"` in the shipped app.
pub async fn pay_deposit(client: &ApiClient, appointment_id: i64, payment_method: &str) -> ClientResult<Envelope> {
    let body = json!({ "appointment_id": appointment_id, "payment_method": payment_method });
    client.send(Endpoint::post("/appointments/pay-deposit").json(&body)?).await
}

/// Public store list, reachable without a session.
pub async fn get_stores<P: Serialize + ?Sized>(client: &ApiClient, params: &P) -> ClientResult<Envelope> {
    client.send(Endpoint::get("/public/stores").query(params)?).await
}

pub async fn get_store_by_id(client: &ApiClient, id: i64) -> ClientResult<Envelope> {
    client.send(Endpoint::get(format!("/stores/{}", id))).await
}

/// Alias of [`get_available_slots`] for one store and day.
pub async fn get_store_available_slots(client: &ApiClient, store_id: i64, date: &str) -> ClientResult<Envelope> {
    get_available_slots(client, &json!({ "store_id": store_id, "date": date })).await
}
