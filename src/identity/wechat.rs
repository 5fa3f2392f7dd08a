//! WeChat OAuth sign-in for the customer app.
//!
//! Inside the WeChat browser the customer is sent to the `snsapi_base` authorize
//! page, comes back to `/login?code=...`, and the code is exchanged for a session.

use std::env;

use reqwest::Url;
use serde::Deserialize;
use tracing::info;

use super::profile::{MemberProfile, UserProfile};
use super::session::SessionStore;
use crate::api;
use crate::error::{ClientError, ClientResult};
use crate::pipeline::ApiClient;

const AUTHORIZE_ENDPOINT: &str = "https://open.weixin.qq.com/connect/oauth2/authorize";
const PLACEHOLDER_APP_ID: &str = "your_wechat_app_id";

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WechatConfig {
    pub app_id: String,
    /// Explicit callback; when unset the current page URL is rewritten to `/login`.
    pub redirect_uri: Option<String>,
}

impl WechatConfig {
    pub fn from_env() -> Self {
        Self {
            app_id: env::var("SALON_WECHAT_APP_ID").unwrap_or_default(),
            redirect_uri: env::var("SALON_WECHAT_REDIRECT_URI").ok().filter(|s| !s.is_empty()),
        }
    }
}

pub fn is_wechat_browser(user_agent: &str) -> bool {
    user_agent.to_lowercase().contains("micromessenger")
}

/// Build the authorize URL the browser is sent to.
pub fn authorize_url(cfg: &WechatConfig, current_url: &str) -> ClientResult<String> {
    if cfg.app_id.is_empty() || cfg.app_id == PLACEHOLDER_APP_ID {
        return Err(ClientError::config("wechat app id is not configured"));
    }
    let redirect = match &cfg.redirect_uri {
        Some(explicit) => explicit.clone(),
        None => login_callback(current_url)?,
    };
    Ok(format!(
        "{}?appid={}&redirect_uri={}&response_type=code&scope=snsapi_base&state=STATE#wechat_redirect",
        AUTHORIZE_ENDPOINT,
        cfg.app_id,
        urlencoding::encode(&redirect)
    ))
}

/// Origin + path of the current page, without a non-standard port, pointed at `/login`.
fn login_callback(current_url: &str) -> ClientResult<String> {
    let url = Url::parse(current_url)
        .map_err(|e| ClientError::config(format!("invalid page url '{}': {}", current_url, e)))?;
    let host = url
        .host_str()
        .ok_or_else(|| ClientError::config(format!("page url '{}' has no host", current_url)))?;
    // Url::port() is None for the scheme's default port.
    let mut out = match url.port() {
        Some(_) => format!("{}://{}{}", url.scheme(), host, url.path()),
        None => format!("{}{}", url.origin().ascii_serialization(), url.path()),
    };
    if !out.ends_with("/login") {
        if let Some(idx) = out.rfind('/') {
            out.truncate(idx);
        }
        out.push_str("/login");
    }
    Ok(out)
}

#[derive(Debug, Default, Deserialize)]
struct WechatLoginData {
    #[serde(default)]
    token: Option<String>,
    #[serde(default)]
    openid: Option<String>,
    #[serde(default)]
    user: Option<UserProfile>,
    #[serde(default)]
    member: Option<MemberProfile>,
}

impl SessionStore {
    /// Exchange an OAuth code for a customer session.
    pub async fn wechat_login(&self, client: &ApiClient, code: &str) -> ClientResult<UserProfile> {
        let reply = api::customer::auth::wechat_login(client, code).await?;
        let data: WechatLoginData = if reply.data.is_null() { WechatLoginData::default() } else { reply.data_as()? };

        let mut user = data.user.unwrap_or_default();
        if let Some(openid) = data.openid.as_deref().filter(|s| !s.is_empty()) {
            if user.openid().is_none() {
                user.set("openid", openid);
            }
        }
        if user.is_empty() && data.token.is_none() {
            return Err(ClientError::decode("wechat login returned neither a token nor a user"));
        }

        if let Some(token) = data.token.as_deref() {
            self.set_token(Some(token))?;
        }
        self.set_user_info(user.clone())?;
        if data.member.is_some() {
            self.set_member_info(data.member)?;
        }
        info!(target: "salon::session", openid = ?user.openid(), "wechat login succeeded");
        Ok(user)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cfg() -> WechatConfig {
        WechatConfig { app_id: "wx123".into(), redirect_uri: None }
    }

    #[test]
    fn detects_wechat_user_agent() {
        assert!(is_wechat_browser("Mozilla/5.0 (iPhone) MicroMessenger/8.0.40"));
        assert!(!is_wechat_browser("Mozilla/5.0 (X11; Linux x86_64) Firefox/120.0"));
    }

    #[test]
    fn callback_strips_custom_port_and_points_at_login() {
        let url = authorize_url(&cfg(), "http://10.0.0.5:5173/booking/create?x=1").unwrap();
        assert!(url.starts_with("https://open.weixin.qq.com/connect/oauth2/authorize?appid=wx123&redirect_uri="));
        assert!(url.contains(&*urlencoding::encode("http://10.0.0.5/booking/login")));
        assert!(url.ends_with("&response_type=code&scope=snsapi_base&state=STATE#wechat_redirect"));
    }

    #[test]
    fn callback_keeps_login_page_and_default_port() {
        assert_eq!(login_callback("https://salon.example/login").unwrap(), "https://salon.example/login");
        assert_eq!(login_callback("https://salon.example:443/home").unwrap(), "https://salon.example/login");
    }

    #[test]
    fn explicit_redirect_wins_and_placeholder_is_rejected() {
        let explicit = WechatConfig { app_id: "wx123".into(), redirect_uri: Some("https://a.example/cb".into()) };
        let url = authorize_url(&explicit, "not even a url").unwrap();
        assert!(url.contains("redirect_uri=https%3A%2F%2Fa.example%2Fcb"));
        let placeholder = WechatConfig { app_id: PLACEHOLDER_APP_ID.into(), redirect_uri: None };
        assert!(authorize_url(&placeholder, "https://salon.example/").is_err());
        assert!(authorize_url(&WechatConfig::default(), "https://salon.example/").is_err());
    }
}
