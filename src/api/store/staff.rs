use serde::Serialize;

use crate::error::ClientResult;
use crate::pipeline::{ApiClient, Endpoint, Envelope};

pub async fn get_staff_list(client: &ApiClient) -> ClientResult<Envelope> {
    client.send(Endpoint::get("/store/staff")).await
}

pub async fn create_staff<B: Serialize + ?Sized>(client: &ApiClient, body: &B) -> ClientResult<Envelope> {
    client.send(Endpoint::post("/store/staff").json(body)?).await
}

pub async fn update_staff_status<B: Serialize + ?Sized>(client: &ApiClient, id: i64, body: &B) -> ClientResult<Envelope> {
    client.send(Endpoint::put(format!("/store/staff/{}/status", id)).json(body)?).await
}
