//! Client-side identity: who the current actor is, how they sign in and out, and
//! where that state is kept between runs.

mod auth;
mod profile;
mod session;
pub mod wechat;

pub use auth::Credentials;
pub use profile::{MemberProfile, UserProfile};
pub use session::{Session, SessionStore};
pub(crate) use session::ExpiryClear;
pub use wechat::{authorize_url, is_wechat_browser, WechatConfig};
