use serde::Serialize;

use crate::error::ClientResult;
use crate::pipeline::{ApiClient, Endpoint, Envelope};

pub async fn get_admin_dashboard(client: &ApiClient) -> ClientResult<Envelope> {
    client.send(Endpoint::get("/admin/dashboard")).await
}

pub async fn get_reports<P: Serialize + ?Sized>(client: &ApiClient, params: &P) -> ClientResult<Envelope> {
    client.send(Endpoint::get("/admin/reports").query(params)?).await
}
