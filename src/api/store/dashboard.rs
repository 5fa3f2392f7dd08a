use serde::Serialize;

use crate::error::ClientResult;
use crate::pipeline::{ApiClient, Endpoint, Envelope};

pub async fn get_store_dashboard(client: &ApiClient) -> ClientResult<Envelope> {
    client.send(Endpoint::get("/store/dashboard")).await
}

pub async fn get_store_stats<P: Serialize + ?Sized>(client: &ApiClient, params: &P) -> ClientResult<Envelope> {
    client.send(Endpoint::get("/store/stats").query(params)?).await
}

pub async fn get_today_overview(client: &ApiClient) -> ClientResult<Envelope> {
    client.send(Endpoint::get("/store/today-overview")).await
}

pub async fn get_staff_stats(client: &ApiClient) -> ClientResult<Envelope> {
    client.send(Endpoint::get("/store/staff-stats")).await
}

pub async fn get_recent_members<P: Serialize + ?Sized>(client: &ApiClient, params: &P) -> ClientResult<Envelope> {
    client.send(Endpoint::get("/store/recent-members").query(params)?).await
}
