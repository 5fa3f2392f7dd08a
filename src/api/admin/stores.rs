use serde::Serialize;

use crate::error::ClientResult;
use crate::pipeline::{ApiClient, Endpoint, Envelope};

pub async fn get_stores<P: Serialize + ?Sized>(client: &ApiClient, params: &P) -> ClientResult<Envelope> {
    client.send(Endpoint::get("/admin/stores").query(params)?).await
}

pub async fn get_store_by_id(client: &ApiClient, id: i64) -> ClientResult<Envelope> {
    client.send(Endpoint::get(format!("/admin/stores/{}", id))).await
}

pub async fn create_store<B: Serialize + ?Sized>(client: &ApiClient, body: &B) -> ClientResult<Envelope> {
    client.send(Endpoint::post("/admin/stores").json(body)?).await
}

pub async fn update_store<B: Serialize + ?Sized>(client: &ApiClient, id: i64, body: &B) -> ClientResult<Envelope> {
    client.send(Endpoint::put(format!("/admin/stores/{}", id)).json(body)?).await
}

pub async fn delete_store(client: &ApiClient, id: i64) -> ClientResult<Envelope> {
    client.send(Endpoint::delete(format!("/admin/stores/{}", id))).await
}
