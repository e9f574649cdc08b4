//! Attributes exchanged with the alert pipeline
//!
//! An attribute is a typed observable (IP address, username, domain, ...)
//! attached to an alert. Inspectors receive one attribute per invocation and
//! may contribute new attributes back through a [`TaskResult`].

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Kind of observable an attribute carries
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AttrType {
    /// IPv4 or IPv6 address
    #[serde(rename = "ipaddr")]
    IpAddr,
    /// Domain name
    #[serde(rename = "domain")]
    DomainName,
    /// Account or user name, possibly with an `@realm` suffix
    #[serde(rename = "username")]
    UserName,
    /// File hash value
    #[serde(rename = "filehash")]
    FileHashValue,
    /// Arbitrary JSON document
    #[serde(rename = "json")]
    JsonData,
    /// URL
    #[serde(rename = "url")]
    Url,
    /// Any type this crate does not know about
    #[serde(other)]
    Unknown,
}

impl fmt::Display for AttrType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            AttrType::IpAddr => "ipaddr",
            AttrType::DomainName => "domain",
            AttrType::UserName => "username",
            AttrType::FileHashValue => "filehash",
            AttrType::JsonData => "json",
            AttrType::Url => "url",
            AttrType::Unknown => "unknown",
        };
        f.write_str(name)
    }
}

/// How an attribute relates to the alert it was found in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AttrContext {
    Local,
    Remote,
    Subject,
    Object,
    Client,
    Server,
    /// Derived by an inspector as supplementary information
    AdditionalInfo,
    #[serde(other)]
    Unknown,
}

/// A typed observable under investigation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Attribute {
    #[serde(rename = "type")]
    pub attr_type: AttrType,
    pub value: String,
    /// Free-form label describing where the value came from
    pub key: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<DateTime<Utc>>,
    #[serde(default)]
    pub context: Vec<AttrContext>,
}

impl Attribute {
    pub fn new(attr_type: AttrType, key: &str, value: &str) -> Self {
        Self {
            attr_type,
            value: value.to_string(),
            key: key.to_string(),
            timestamp: None,
            context: Vec::new(),
        }
    }

    pub fn with_timestamp(mut self, timestamp: DateTime<Utc>) -> Self {
        self.timestamp = Some(timestamp);
        self
    }

    pub fn with_context(mut self, context: AttrContext) -> Self {
        self.context.push(context);
        self
    }
}

/// Output of an inspector invocation
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TaskResult {
    #[serde(default)]
    pub new_attributes: Vec<Attribute>,
    /// Report sections contributed by the inspector (opaque to this crate)
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub contents: Vec<serde_json::Value>,
}

impl TaskResult {
    pub fn with_attribute(mut self, attr: Attribute) -> Self {
        self.new_attributes.push(attr);
        self
    }

    pub fn is_empty(&self) -> bool {
        self.new_attributes.is_empty() && self.contents.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_attribute_from_pipeline_json() {
        let raw = r#"{
            "type": "username",
            "key": "login user",
            "value": "alice@example.com",
            "timestamp": "2024-03-01T10:00:00Z",
            "context": ["subject"]
        }"#;

        let attr: Attribute = serde_json::from_str(raw).unwrap();
        assert_eq!(attr.attr_type, AttrType::UserName);
        assert_eq!(attr.value, "alice@example.com");
        assert_eq!(attr.context, vec![AttrContext::Subject]);
        assert!(attr.timestamp.is_some());
    }

    #[test]
    fn test_unknown_type_is_tolerated() {
        let raw = r#"{"type": "phonenumber", "key": "k", "value": "555"}"#;
        let attr: Attribute = serde_json::from_str(raw).unwrap();
        assert_eq!(attr.attr_type, AttrType::Unknown);
        assert!(attr.timestamp.is_none());
        assert!(attr.context.is_empty());
    }

    #[test]
    fn test_additional_info_serialization() {
        let attr = Attribute::new(AttrType::Url, "link", "https://s/#/search/abc")
            .with_context(AttrContext::AdditionalInfo);
        let json = serde_json::to_value(&attr).unwrap();
        assert_eq!(json["type"], "url");
        assert_eq!(json["context"][0], "additional_info");
        assert!(json.get("timestamp").is_none());
    }

    #[test]
    fn test_task_result_is_empty() {
        let result = TaskResult::default();
        assert!(result.is_empty());

        let result = result.with_attribute(Attribute::new(AttrType::IpAddr, "k", "1.2.3.4"));
        assert!(!result.is_empty());
    }
}
