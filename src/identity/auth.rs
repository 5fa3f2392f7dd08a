use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use super::profile::UserProfile;
use super::session::SessionStore;
use crate::api;
use crate::error::{ClientError, ClientResult};
use crate::pipeline::{ApiClient, NoticeLevel};

/// Login form. Staff sign in with username + password; customers may use a phone
/// number with no password.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Credentials {
    pub username: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
}

impl Credentials {
    pub fn new<U: Into<String>, P: Into<String>>(username: U, password: P) -> Self {
        Self { username: username.into(), password: Some(password.into()) }
    }

    pub fn phone<U: Into<String>>(phone: U) -> Self {
        Self { username: phone.into(), password: None }
    }
}

#[derive(Debug, Deserialize)]
struct LoginData {
    #[serde(default)]
    token: String,
    #[serde(default)]
    user: Option<UserProfile>,
}

impl SessionStore {
    /// Authenticate and install the session; the typed form of [`SessionStore::login`].
    pub async fn try_login(&self, client: &ApiClient, creds: &Credentials) -> ClientResult<UserProfile> {
        let env = api::auth::login(client, creds).await?;
        let data: LoginData = env.data_as()?;

        if let (Some(required), Some(user)) = (client.config().required_role.as_deref(), data.user.as_ref()) {
            if user.role() != Some(required) {
                warn!(target: "salon::session", username = %creds.username, role = ?user.role(), "login refused: role '{}' required", required);
                return Err(ClientError::rejected(format!("only {} accounts can sign in here", required)));
            }
        }
        if data.token.is_empty() {
            return Err(ClientError::decode("login response carried no token"));
        }

        let user = data.user.unwrap_or_default();
        self.establish(&data.token, user.clone())?;
        info!(target: "salon::session", username = %creds.username, user_id = ?user.id(), "login succeeded");
        Ok(user)
    }

    /// Returns false on any failure; the server's message goes to the notifier.
    pub async fn login(&self, client: &ApiClient, creds: &Credentials) -> bool {
        match self.try_login(client, creds).await {
            Ok(_) => {
                client.notifier().notify(NoticeLevel::Success, "login successful");
                true
            }
            Err(e) => {
                warn!(target: "salon::session", username = %creds.username, "login failed: {}", e);
                client.notifier().notify(NoticeLevel::Error, &e.message());
                false
            }
        }
    }

    /// Best-effort server logout followed by an unconditional local clear.
    pub async fn logout(&self, client: &ApiClient) -> ClientResult<()> {
        if client.config().server_logout {
            if let Err(e) = api::auth::logout(client).await {
                warn!(target: "salon::session", "logout request failed: {}", e);
            }
        }
        self.clear()
    }
}
