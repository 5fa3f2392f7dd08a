//! Front-desk calls: the store's appointments, its technicians, slots and profile.

use serde::Serialize;
use serde_json::json;

use crate::error::ClientResult;
use crate::pipeline::{ApiClient, Endpoint, Envelope};

pub async fn get_store_appointments<P: Serialize + ?Sized>(client: &ApiClient, params: &P) -> ClientResult<Envelope> {
    client.send(Endpoint::get("/appointments/store").query(params)?).await
}

pub async fn get_appointment_by_id(client: &ApiClient, id: i64) -> ClientResult<Envelope> {
    client.send(Endpoint::get(format!("/appointments/{}", id))).await
}

pub async fn confirm_arrival(client: &ApiClient, appointment_id: i64) -> ClientResult<Envelope> {
    let body = json!({ "appointment_id": appointment_id });
    client.send(Endpoint::post("/appointments/confirm-arrival").json(&body)?).await
}

pub async fn complete_appointment(client: &ApiClient, appointment_id: i64) -> ClientResult<Envelope> {
    let body = json!({ "appointment_id": appointment_id });
    client.send(Endpoint::post("/appointments/complete").json(&body)?).await
}

pub async fn cancel_appointment_by_technician(client: &ApiClient, appointment_id: i64, reason: &str) -> ClientResult<Envelope> {
    let body = json!({ "appointment_id": appointment_id, "reason": reason });
    client.send(Endpoint::post("/appointments/cancel/technician").json(&body)?).await
}

pub async fn get_appointments_by_date_range(client: &ApiClient, start_date: &str, end_date: &str) -> ClientResult<Envelope> {
    let params = json!({ "start_date": start_date, "end_date": end_date });
    client.send(Endpoint::get("/appointments/store").query(&params)?).await
}

/// User listing restricted to technicians; a caller-supplied `role` is overridden.
pub async fn get_technicians<P: Serialize + ?Sized>(client: &ApiClient, params: &P) -> ClientResult<Envelope> {
    let mut ep = Endpoint::get("/users").query(params)?;
    ep.query.retain(|(k, _)| k != "role");
    client.send(ep.param("role", "technician")).await
}

pub async fn get_technician_by_id(client: &ApiClient, id: i64) -> ClientResult<Envelope> {
    client.send(Endpoint::get(format!("/users/{}", id))).await
}

pub async fn update_technician_work_status(client: &ApiClient, id: i64, work_status: &str) -> ClientResult<Envelope> {
    let body = json!({ "work_status": work_status });
    client.send(Endpoint::put(format!("/users/{}/work-status", id)).json(&body)?).await
}

pub async fn get_available_slots<P: Serialize + ?Sized>(client: &ApiClient, params: &P) -> ClientResult<Envelope> {
    client.send(Endpoint::get("/slots/available").query(params)?).await
}

pub async fn get_slots<P: Serialize + ?Sized>(client: &ApiClient, params: &P) -> ClientResult<Envelope> {
    client.send(Endpoint::get("/slots").query(params)?).await
}

pub async fn generate_slots<B: Serialize + ?Sized>(client: &ApiClient, body: &B) -> ClientResult<Envelope> {
    client.send(Endpoint::post("/slots/generate").json(body)?).await
}

/// The store the signed-in manager belongs to.
pub async fn get_current_store(client: &ApiClient) -> ClientResult<Envelope> {
    client.send(Endpoint::get("/stores/my")).await
}

pub async fn update_store<B: Serialize + ?Sized>(client: &ApiClient, id: i64, body: &B) -> ClientResult<Envelope> {
    client.send(Endpoint::put(format!("/stores/{}", id)).json(body)?).await
}
