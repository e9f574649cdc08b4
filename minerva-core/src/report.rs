//! Finished alert reports handed to emitters

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::Attribute;

/// Lifecycle status of a report
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReportStatus {
    #[default]
    New,
    Published,
    #[serde(other)]
    Unknown,
}

/// Severity assigned by the reviewer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    #[default]
    Unclassified,
    Safe,
    Urgent,
    #[serde(other)]
    Unknown,
}

/// Review outcome of a report
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ReportResult {
    #[serde(default)]
    pub severity: Severity,
    #[serde(default)]
    pub reason: String,
}

/// A finished report: the alerts, collected attributes and inspector output
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Report {
    pub id: String,
    #[serde(default)]
    pub alerts: Vec<serde_json::Value>,
    #[serde(default)]
    pub attributes: Vec<Attribute>,
    #[serde(default)]
    pub sections: Vec<serde_json::Value>,
    #[serde(default)]
    pub result: ReportResult,
    #[serde(default)]
    pub status: ReportStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
}
