use serde::Serialize;
use serde_json::json;

use crate::error::ClientResult;
use crate::pipeline::{ApiClient, Endpoint, Envelope};

pub async fn get_payments<P: Serialize + ?Sized>(client: &ApiClient, params: &P) -> ClientResult<Envelope> {
    client.send(Endpoint::get("/admin/payments").query(params)?).await
}

pub async fn get_payment_by_id(client: &ApiClient, id: i64) -> ClientResult<Envelope> {
    client.send(Endpoint::get(format!("/admin/payments/{}", id))).await
}

pub async fn get_appointment_payments(client: &ApiClient, appointment_id: i64) -> ClientResult<Envelope> {
    client.send(Endpoint::get(format!("/admin/appointments/{}/payments", appointment_id))).await
}

pub async fn refund_payment<B: Serialize + ?Sized>(client: &ApiClient, id: i64, body: &B) -> ClientResult<Envelope> {
    client.send(Endpoint::post(format!("/admin/payments/{}/refund", id)).json(body)?).await
}

pub async fn retry_payment(client: &ApiClient, id: i64) -> ClientResult<Envelope> {
    client.send(Endpoint::post(format!("/admin/payments/{}/retry", id))).await
}

/// Spreadsheet export. The body is a file, so the raw response is returned as-is.
pub async fn export_payments<P: Serialize + ?Sized>(client: &ApiClient, params: &P) -> ClientResult<reqwest::Response> {
    client.download(Endpoint::get("/admin/payments/export").query(params)?).await
}

pub async fn get_refunds<P: Serialize + ?Sized>(client: &ApiClient, params: &P) -> ClientResult<Envelope> {
    client.send(Endpoint::get("/admin/refunds").query(params)?).await
}

pub async fn get_refund_by_id(client: &ApiClient, id: i64) -> ClientResult<Envelope> {
    client.send(Endpoint::get(format!("/admin/refunds/{}", id))).await
}

pub async fn get_appointment_refunds(client: &ApiClient, appointment_id: i64) -> ClientResult<Envelope> {
    client.send(Endpoint::get(format!("/admin/appointments/{}/refunds", appointment_id))).await
}

pub async fn get_appointment_deposit_status(client: &ApiClient, appointment_id: i64) -> ClientResult<Envelope> {
    client.send(Endpoint::get(format!("/admin/appointments/{}/deposit", appointment_id))).await
}

/// Manual deposit refund outside the normal arrival flow.
pub async fn refund_appointment_deposit(client: &ApiClient, appointment_id: i64, reason: &str) -> ClientResult<Envelope> {
    let body = json!({ "reason": reason });
    client.send(Endpoint::post(format!("/admin/appointments/{}/deposit/refund", appointment_id)).json(&body)?).await
}
