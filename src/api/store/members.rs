use serde::Serialize;

use crate::error::ClientResult;
use crate::pipeline::{segment, ApiClient, Endpoint, Envelope, FormPart};

pub async fn get_members<P: Serialize + ?Sized>(client: &ApiClient, params: &P) -> ClientResult<Envelope> {
    client.send(Endpoint::get("/members").query(params)?).await
}

pub async fn get_member_by_id(client: &ApiClient, id: i64) -> ClientResult<Envelope> {
    client.send(Endpoint::get(format!("/members/{}", id))).await
}

pub async fn get_member_by_phone(client: &ApiClient, phone: &str) -> ClientResult<Envelope> {
    client.send(Endpoint::get(format!("/members/phone/{}", segment(phone)))).await
}

pub async fn create_member<B: Serialize + ?Sized>(client: &ApiClient, body: &B) -> ClientResult<Envelope> {
    client.send(Endpoint::post("/members").json(body)?).await
}

/// Registration form with the face photo attached.
pub async fn create_member_form(client: &ApiClient, parts: Vec<FormPart>) -> ClientResult<Envelope> {
    client.send(Endpoint::post("/members").multipart(parts)).await
}

pub async fn update_member<B: Serialize + ?Sized>(client: &ApiClient, id: i64, body: &B) -> ClientResult<Envelope> {
    client.send(Endpoint::put(format!("/members/{}", id)).json(body)?).await
}

pub async fn upload_face_image(client: &ApiClient, member_id: i64, parts: Vec<FormPart>) -> ClientResult<Envelope> {
    client.send(Endpoint::post(format!("/members/{}/face", member_id)).multipart(parts)).await
}

pub async fn get_member_usages(client: &ApiClient, member_id: i64) -> ClientResult<Envelope> {
    client.send(Endpoint::get(format!("/members/{}/usages", member_id))).await
}

pub async fn create_usage<B: Serialize + ?Sized>(client: &ApiClient, member_id: i64, body: &B) -> ClientResult<Envelope> {
    client.send(Endpoint::post(format!("/members/{}/usages", member_id)).json(body)?).await
}

pub async fn delete_usage(client: &ApiClient, usage_id: i64) -> ClientResult<Envelope> {
    client.send(Endpoint::delete(format!("/usages/{}", usage_id))).await
}
