use serde::Serialize;
use serde_json::json;

use crate::error::ClientResult;
use crate::pipeline::{ApiClient, Endpoint, Envelope};

pub async fn get_appointments<P: Serialize + ?Sized>(client: &ApiClient, params: &P) -> ClientResult<Envelope> {
    client.send(Endpoint::get("/appointments/store").query(params)?).await
}

pub async fn get_appointment_by_id(client: &ApiClient, id: i64) -> ClientResult<Envelope> {
    client.send(Endpoint::get(format!("/appointments/{}", id))).await
}

/// Same listing as [`get_appointments`], filtered to `[start_date, end_date]` and
/// optionally one store.
pub async fn get_appointments_by_date_range(
    client: &ApiClient,
    start_date: &str,
    end_date: &str,
    store_id: Option<i64>,
) -> ClientResult<Envelope> {
    let params = json!({ "start_date": start_date, "end_date": end_date, "store_id": store_id });
    client.send(Endpoint::get("/appointments/store").query(&params)?).await
}

/// Customer arrived; the backend refunds the deposit.
pub async fn confirm_arrival(client: &ApiClient, appointment_id: i64) -> ClientResult<Envelope> {
    let body = json!({ "appointment_id": appointment_id });
    client.send(Endpoint::post("/appointments/confirm-arrival").json(&body)?).await
}

pub async fn complete_appointment(client: &ApiClient, appointment_id: i64) -> ClientResult<Envelope> {
    let body = json!({ "appointment_id": appointment_id });
    client.send(Endpoint::post("/appointments/complete").json(&body)?).await
}

pub async fn cancel_appointment(client: &ApiClient, appointment_id: i64, reason: &str) -> ClientResult<Envelope> {
    let body = json!({ "appointment_id": appointment_id, "reason": reason });
    client.send(Endpoint::post("/appointments/cancel/technician").json(&body)?).await
}
