use serde::Serialize;

use crate::error::ClientResult;
use crate::pipeline::{ApiClient, Endpoint, Envelope, FormPart};

pub async fn get_members<P: Serialize + ?Sized>(client: &ApiClient, params: &P) -> ClientResult<Envelope> {
    client.send(Endpoint::get("/admin/members").query(params)?).await
}

pub async fn get_member_by_id(client: &ApiClient, id: i64) -> ClientResult<Envelope> {
    client.send(Endpoint::get(format!("/admin/members/{}", id))).await
}

pub async fn create_member<B: Serialize + ?Sized>(client: &ApiClient, body: &B) -> ClientResult<Envelope> {
    client.send(Endpoint::post("/admin/members").json(body)?).await
}

pub async fn update_member<B: Serialize + ?Sized>(client: &ApiClient, id: i64, body: &B) -> ClientResult<Envelope> {
    client.send(Endpoint::put(format!("/admin/members/{}", id)).json(body)?).await
}

pub async fn disable_member(client: &ApiClient, id: i64) -> ClientResult<Envelope> {
    client.send(Endpoint::put(format!("/admin/members/{}/disable", id))).await
}

pub async fn enable_member(client: &ApiClient, id: i64) -> ClientResult<Envelope> {
    client.send(Endpoint::put(format!("/admin/members/{}/enable", id))).await
}

pub async fn get_member_consumptions<P: Serialize + ?Sized>(client: &ApiClient, id: i64, params: &P) -> ClientResult<Envelope> {
    client.send(Endpoint::get(format!("/admin/members/{}/consumptions", id)).query(params)?).await
}

/// Face photo upload, sent as multipart form data.
pub async fn upload_member_face(client: &ApiClient, id: i64, parts: Vec<FormPart>) -> ClientResult<Envelope> {
    client.send(Endpoint::post(format!("/admin/members/{}/face", id)).multipart(parts)).await
}
