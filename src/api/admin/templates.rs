//! Slot templates: the weekly pattern slots are generated from.

use serde::Serialize;

use crate::error::ClientResult;
use crate::pipeline::{ApiClient, Endpoint, Envelope};

pub async fn get_templates<P: Serialize + ?Sized>(client: &ApiClient, params: &P) -> ClientResult<Envelope> {
    client.send(Endpoint::get("/slot-templates").query(params)?).await
}

pub async fn get_template_by_id(client: &ApiClient, id: i64) -> ClientResult<Envelope> {
    client.send(Endpoint::get(format!("/slot-templates/{}", id))).await
}

pub async fn create_template<B: Serialize + ?Sized>(client: &ApiClient, body: &B) -> ClientResult<Envelope> {
    client.send(Endpoint::post("/slot-templates").json(body)?).await
}

pub async fn update_template<B: Serialize + ?Sized>(client: &ApiClient, id: i64, body: &B) -> ClientResult<Envelope> {
    client.send(Endpoint::put(format!("/slot-templates/{}", id)).json(body)?).await
}

pub async fn delete_template(client: &ApiClient, id: i64) -> ClientResult<Envelope> {
    client.send(Endpoint::delete(format!("/slot-templates/{}", id))).await
}
