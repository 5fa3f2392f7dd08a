use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// JS-style truthiness used for identity fields: null, false, 0 and "" are absent.
pub(crate) fn truthy(v: &Value) -> bool {
    match v {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().map(|f| f != 0.0).unwrap_or(true),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

fn as_id(v: &Value) -> Option<i64> {
    match v {
        Value::Number(n) => n.as_i64(),
        Value::String(s) => s.parse().ok(),
        _ => None,
    }
}

/// Cached profile of the signed-in account.
///
/// Stored as an open record so fields the backend adds are kept across persistence;
/// the accessors cover the ones the client itself reads.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserProfile(pub Map<String, Value>);

impl UserProfile {
    pub fn is_empty(&self) -> bool { self.0.is_empty() }

    pub fn get(&self, field: &str) -> Option<&Value> { self.0.get(field) }

    /// String field, `None` when missing or empty.
    pub fn field(&self, field: &str) -> Option<&str> {
        self.0.get(field).and_then(|v| v.as_str()).filter(|s| !s.is_empty())
    }

    pub fn has(&self, field: &str) -> bool {
        self.0.get(field).map(truthy).unwrap_or(false)
    }

    pub fn set<V: Into<Value>>(&mut self, field: &str, value: V) {
        self.0.insert(field.to_string(), value.into());
    }

    pub fn id(&self) -> Option<i64> { self.0.get("id").and_then(as_id) }
    pub fn username(&self) -> Option<&str> { self.field("username") }
    pub fn role(&self) -> Option<&str> { self.field("role") }
    pub fn phone(&self) -> Option<&str> { self.field("phone") }
    pub fn openid(&self) -> Option<&str> { self.field("openid") }
}

/// Cached member (loyalty card) profile; customer deployment only.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MemberProfile(pub Map<String, Value>);

impl MemberProfile {
    pub fn is_empty(&self) -> bool { self.0.is_empty() }

    pub fn id(&self) -> Option<i64> { self.0.get("id").and_then(as_id) }

    /// A member record counts only when it carries an id.
    pub fn is_member(&self) -> bool {
        self.0.get("id").map(truthy).unwrap_or(false)
    }

    pub fn phone(&self) -> Option<&str> {
        self.0.get("phone").and_then(|v| v.as_str()).filter(|s| !s.is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn accessors_read_known_fields_and_keep_the_rest() {
        let raw = json!({"id": 12, "username": "amy", "role": "admin", "phone": "", "avatar": "a.png"});
        let user: UserProfile = serde_json::from_value(raw.clone()).unwrap();
        assert_eq!(user.id(), Some(12));
        assert_eq!(user.role(), Some("admin"));
        assert_eq!(user.phone(), None);
        assert!(!user.has("phone"));
        assert_eq!(serde_json::to_value(&user).unwrap(), raw);
    }

    #[test]
    fn member_needs_truthy_id() {
        let m: MemberProfile = serde_json::from_value(json!({"id": "31", "phone": "13800000000"})).unwrap();
        assert!(m.is_member());
        assert_eq!(m.id(), Some(31));
        let zero: MemberProfile = serde_json::from_value(json!({"id": 0})).unwrap();
        assert!(!zero.is_member());
        assert!(!MemberProfile::default().is_member());
    }

    #[test]
    fn truthiness() {
        assert!(!truthy(&json!(null)));
        assert!(!truthy(&json!("")));
        assert!(!truthy(&json!(0)));
        assert!(truthy(&json!("wx-openid")));
        assert!(truthy(&json!({})));
    }
}
