//! Back-office user accounts (admins, managers, technicians).

use serde::Serialize;
use serde_json::json;

use crate::error::ClientResult;
use crate::pipeline::{ApiClient, Endpoint, Envelope};

pub async fn get_users<P: Serialize + ?Sized>(client: &ApiClient, params: &P) -> ClientResult<Envelope> {
    client.send(Endpoint::get("/users").query(params)?).await
}

pub async fn get_user_by_id(client: &ApiClient, id: i64) -> ClientResult<Envelope> {
    client.send(Endpoint::get(format!("/users/{}", id))).await
}

pub async fn create_user<B: Serialize + ?Sized>(client: &ApiClient, body: &B) -> ClientResult<Envelope> {
    client.send(Endpoint::post("/users").json(body)?).await
}

pub async fn update_user<B: Serialize + ?Sized>(client: &ApiClient, id: i64, body: &B) -> ClientResult<Envelope> {
    client.send(Endpoint::put(format!("/users/{}", id)).json(body)?).await
}

pub async fn update_user_status(client: &ApiClient, id: i64, status: &str) -> ClientResult<Envelope> {
    let body = json!({ "status": status });
    client.send(Endpoint::put(format!("/users/{}/status", id)).json(&body)?).await
}

/// Technician availability (e.g. `working`, `resting`).
pub async fn update_work_status(client: &ApiClient, id: i64, work_status: &str) -> ClientResult<Envelope> {
    let body = json!({ "work_status": work_status });
    client.send(Endpoint::put(format!("/users/{}/work-status", id)).json(&body)?).await
}
