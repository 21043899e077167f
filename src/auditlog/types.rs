//! Audit record types
//!
//! All types use camelCase JSON serialization for wire compatibility.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// One audit record for an inspected transaction
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuditLog {
    /// Transaction identifier assigned by the engine
    pub transaction_id: String,

    /// When the transaction started
    pub timestamp: DateTime<Utc>,

    /// Client address and port
    pub client_ip: String,
    pub client_port: u16,

    /// Server address and port
    pub server_ip: String,
    pub server_port: u16,

    /// Request line and headers
    pub request: AuditRequest,

    /// Response summary, if the transaction got that far
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub response: Option<AuditResponse>,

    /// Rule matches recorded for this transaction
    #[serde(default)]
    pub messages: Vec<AuditMessage>,
}

impl AuditLog {
    /// Create a record stamped with the current time
    pub fn new(transaction_id: impl Into<String>, request: AuditRequest) -> Self {
        Self {
            transaction_id: transaction_id.into(),
            timestamp: Utc::now(),
            client_ip: String::new(),
            client_port: 0,
            server_ip: String::new(),
            server_port: 0,
            request,
            response: None,
            messages: Vec::new(),
        }
    }

    /// Set client address (builder)
    pub fn with_client(mut self, ip: impl Into<String>, port: u16) -> Self {
        self.client_ip = ip.into();
        self.client_port = port;
        self
    }

    /// Set server address (builder)
    pub fn with_server(mut self, ip: impl Into<String>, port: u16) -> Self {
        self.server_ip = ip.into();
        self.server_port = port;
        self
    }

    /// Set the response summary (builder)
    pub fn with_response(mut self, response: AuditResponse) -> Self {
        self.response = Some(response);
        self
    }

    /// Append a rule match (builder)
    pub fn with_message(mut self, message: AuditMessage) -> Self {
        self.messages.push(message);
        self
    }
}

/// Request part of an audit record
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuditRequest {
    pub method: String,
    pub uri: String,
    pub protocol: String,

    /// Request headers, ordered by name
    #[serde(default)]
    pub headers: BTreeMap<String, String>,
}

impl AuditRequest {
    /// Create a request line with no headers
    pub fn new(
        method: impl Into<String>,
        uri: impl Into<String>,
        protocol: impl Into<String>,
    ) -> Self {
        Self {
            method: method.into(),
            uri: uri.into(),
            protocol: protocol.into(),
            headers: BTreeMap::new(),
        }
    }

    /// Add a header (builder)
    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(name.into(), value.into());
        self
    }
}

/// Response part of an audit record
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuditResponse {
    pub protocol: String,
    pub status: u16,
}

/// A rule match that contributed to the record
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuditMessage {
    /// Matching rule id
    pub rule_id: u32,

    /// Rule message
    pub message: String,

    /// Matched data, already normalized
    #[serde(default)]
    pub data: String,
}

impl AuditMessage {
    pub fn new(rule_id: u32, message: impl Into<String>, data: impl Into<String>) -> Self {
        Self {
            rule_id,
            message: message.into(),
            data: data.into(),
        }
    }
}
