use serde::Serialize;

use crate::error::ClientResult;
use crate::pipeline::{ApiClient, Endpoint, Envelope};

pub async fn create_payment<B: Serialize + ?Sized>(client: &ApiClient, body: &B) -> ClientResult<Envelope> {
    client.send(Endpoint::post("/payments").json(body)?).await
}

pub async fn get_payments<P: Serialize + ?Sized>(client: &ApiClient, params: &P) -> ClientResult<Envelope> {
    client.send(Endpoint::get("/payments").query(params)?).await
}

pub async fn get_payment_by_id(client: &ApiClient, id: i64) -> ClientResult<Envelope> {
    client.send(Endpoint::get(format!("/payments/{}", id))).await
}

pub async fn get_payment_status(client: &ApiClient, payment_id: i64) -> ClientResult<Envelope> {
    client.send(Endpoint::get(format!("/payments/{}/status", payment_id))).await
}

pub async fn get_store_revenue<P: Serialize + ?Sized>(client: &ApiClient, params: &P) -> ClientResult<Envelope> {
    client.send(Endpoint::get("/reports/revenue").query(params)?).await
}

pub async fn get_appointment_stats<P: Serialize + ?Sized>(client: &ApiClient, params: &P) -> ClientResult<Envelope> {
    client.send(Endpoint::get("/reports/appointments").query(params)?).await
}
