//! Self-service calls for the signed-in technician.

use serde::Serialize;

use crate::error::ClientResult;
use crate::pipeline::{ApiClient, Endpoint, Envelope};

pub use super::bookings::{cancel_booking, complete_booking};

pub async fn update_my_work_status<B: Serialize + ?Sized>(client: &ApiClient, body: &B) -> ClientResult<Envelope> {
    client.send(Endpoint::put("/staff/work-status").json(body)?).await
}

pub async fn get_today_bookings(client: &ApiClient) -> ClientResult<Envelope> {
    client.send(Endpoint::get("/staff/bookings/today")).await
}

pub async fn get_my_bookings<P: Serialize + ?Sized>(client: &ApiClient, params: &P) -> ClientResult<Envelope> {
    client.send(Endpoint::get("/staff/bookings").query(params)?).await
}
