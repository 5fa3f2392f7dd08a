//! `/auth` endpoints shared by the staff-facing front-ends.

use crate::error::ClientResult;
use crate::identity::Credentials;
use crate::pipeline::{ApiClient, Endpoint, Envelope};

/// `POST /auth/login`. A 401 here means bad credentials, not an expired session.
pub async fn login(client: &ApiClient, creds: &Credentials) -> ClientResult<Envelope> {
    client.send(Endpoint::post("/auth/login").json(creds)?.without_session_expiry()).await
}

pub async fn get_current_user(client: &ApiClient) -> ClientResult<Envelope> {
    client.send(Endpoint::get("/auth/me")).await
}

pub async fn logout(client: &ApiClient) -> ClientResult<Envelope> {
    client.send(Endpoint::post("/auth/logout").without_session_expiry()).await
}

pub async fn refresh_token(client: &ApiClient) -> ClientResult<Envelope> {
    client.send(Endpoint::post("/auth/refresh")).await
}
