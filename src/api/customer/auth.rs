use serde_json::json;

use crate::error::ClientResult;
use crate::pipeline::{ApiClient, Endpoint, Envelope};

/// Exchange a WeChat OAuth `code` for a session.
pub async fn wechat_login(client: &ApiClient, code: &str) -> ClientResult<Envelope> {
    let body = json!({ "code": code });
    client.send(Endpoint::post("/customer/auth/wechat/login").json(&body)?.without_session_expiry()).await
}

/// JS-SDK signature for the page at `url`.
pub async fn get_wechat_config(client: &ApiClient, url: &str) -> ClientResult<Envelope> {
    client.send(Endpoint::get("/customer/auth/wechat/config").param("url", url)).await
}
