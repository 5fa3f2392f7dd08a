use serde::Serialize;
use serde_json::json;

use crate::error::ClientResult;
use crate::pipeline::{ApiClient, Endpoint, Envelope};

pub async fn get_staff_schedule(client: &ApiClient, date: &str) -> ClientResult<Envelope> {
    client.send(Endpoint::get("/staff/schedule").param("date", date)).await
}

pub async fn get_staff_bookings<P: Serialize + ?Sized>(client: &ApiClient, params: &P) -> ClientResult<Envelope> {
    client.send(Endpoint::get("/staff/bookings").query(params)?).await
}

pub async fn confirm_booking(client: &ApiClient, booking_id: i64) -> ClientResult<Envelope> {
    client.send(Endpoint::put(format!("/staff/bookings/{}/confirm", booking_id))).await
}

pub async fn complete_booking<B: Serialize + ?Sized>(client: &ApiClient, booking_id: i64, body: &B) -> ClientResult<Envelope> {
    client.send(Endpoint::put(format!("/staff/bookings/{}/complete", booking_id)).json(body)?).await
}

pub async fn cancel_booking(client: &ApiClient, booking_id: i64, reason: &str) -> ClientResult<Envelope> {
    let body = json!({ "reason": reason });
    client.send(Endpoint::put(format!("/staff/bookings/{}/cancel", booking_id)).json(&body)?).await
}
