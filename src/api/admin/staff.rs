use serde::Serialize;

use crate::error::ClientResult;
use crate::pipeline::{ApiClient, Endpoint, Envelope};

pub async fn get_staff<P: Serialize + ?Sized>(client: &ApiClient, params: &P) -> ClientResult<Envelope> {
    client.send(Endpoint::get("/admin/staff").query(params)?).await
}

pub async fn get_staff_by_id(client: &ApiClient, id: i64) -> ClientResult<Envelope> {
    client.send(Endpoint::get(format!("/admin/staff/{}", id))).await
}

pub async fn create_staff<B: Serialize + ?Sized>(client: &ApiClient, body: &B) -> ClientResult<Envelope> {
    client.send(Endpoint::post("/admin/staff").json(body)?).await
}

pub async fn update_staff<B: Serialize + ?Sized>(client: &ApiClient, id: i64, body: &B) -> ClientResult<Envelope> {
    client.send(Endpoint::put(format!("/admin/staff/{}", id)).json(body)?).await
}

pub async fn resign_staff(client: &ApiClient, id: i64) -> ClientResult<Envelope> {
    client.send(Endpoint::put(format!("/admin/staff/{}/resign", id))).await
}

pub async fn rehire_staff(client: &ApiClient, id: i64) -> ClientResult<Envelope> {
    client.send(Endpoint::put(format!("/admin/staff/{}/rehire", id))).await
}

pub async fn get_staff_schedule<P: Serialize + ?Sized>(client: &ApiClient, id: i64, params: &P) -> ClientResult<Envelope> {
    client.send(Endpoint::get(format!("/admin/staff/{}/schedule", id)).query(params)?).await
}

pub async fn update_staff_schedule<B: Serialize + ?Sized>(client: &ApiClient, id: i64, body: &B) -> ClientResult<Envelope> {
    client.send(Endpoint::put(format!("/admin/staff/{}/schedule", id)).json(body)?).await
}
