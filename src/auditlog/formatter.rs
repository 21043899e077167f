//! Built-in audit log formatters

use super::{AuditLog, AuditLogFormatter};
use crate::error::Result;

/// Sectioned plain-text format in the ModSecurity serial style
///
/// Each record is framed by `--<transaction id>-<section>--` boundaries:
/// `A` (transaction), `B` (request), `F` (response), `H` (rule matches)
/// and `Z` (end of record).
#[derive(Debug, Clone, Copy, Default)]
pub struct NativeFormatter;

impl NativeFormatter {
    fn boundary(id: &str, section: char) -> String {
        format!("--{}-{}--\n", id, section)
    }
}

impl AuditLogFormatter for NativeFormatter {
    fn format(&self, log: &AuditLog) -> Result<Vec<u8>> {
        let id = log.transaction_id.as_str();
        let mut out = Self::boundary(id, 'A');
        out.push_str(&format!(
            "[{}] {} {} {} {} {}\n",
            log.timestamp.format("%d/%b/%Y:%H:%M:%S %z"),
            id,
            log.client_ip,
            log.client_port,
            log.server_ip,
            log.server_port
        ));

        out.push_str(&Self::boundary(id, 'B'));
        let req = &log.request;
        out.push_str(&format!("{} {} {}\n", req.method, req.uri, req.protocol));
        for (name, value) in &req.headers {
            out.push_str(&format!("{}: {}\n", name, value));
        }

        if let Some(resp) = &log.response {
            out.push_str(&Self::boundary(id, 'F'));
            out.push_str(&format!("{} {}\n", resp.protocol, resp.status));
        }

        if !log.messages.is_empty() {
            out.push_str(&Self::boundary(id, 'H'));
            for msg in &log.messages {
                out.push_str(&format!(
                    "Message: [id \"{}\"] [msg \"{}\"] [data \"{}\"]\n",
                    msg.rule_id, msg.message, msg.data
                ));
            }
        }

        out.push_str(&Self::boundary(id, 'Z'));
        Ok(out.into_bytes())
    }

    fn mime_type(&self) -> &str {
        "application/x-modsec-audit"
    }
}

/// One JSON object per record
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonFormatter;

impl AuditLogFormatter for JsonFormatter {
    fn format(&self, log: &AuditLog) -> Result<Vec<u8>> {
        Ok(serde_json::to_vec(log)?)
    }

    fn mime_type(&self) -> &str {
        "application/json"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auditlog::{AuditMessage, AuditRequest, AuditResponse};
    use chrono::{TimeZone, Utc};

    fn sample_log() -> AuditLog {
        let mut log = AuditLog::new(
            "abc123",
            AuditRequest::new("GET", "/search?q=1", "HTTP/1.1").with_header("Host", "example.com"),
        )
        .with_client("10.0.0.1", 51000)
        .with_server("10.0.0.2", 80)
        .with_response(AuditResponse {
            protocol: "HTTP/1.1".to_string(),
            status: 403,
        })
        .with_message(AuditMessage::new(942100, "SQL Injection", "union select"));
        log.timestamp = Utc.with_ymd_and_hms(2024, 1, 15, 8, 30, 0).unwrap();
        log
    }

    #[test]
    fn test_native_format_sections() {
        let out = String::from_utf8(NativeFormatter.format(&sample_log()).unwrap()).unwrap();
        let expected = "\
--abc123-A--
[15/Jan/2024:08:30:00 +0000] abc123 10.0.0.1 51000 10.0.0.2 80
--abc123-B--
GET /search?q=1 HTTP/1.1
Host: example.com
--abc123-F--
HTTP/1.1 403
--abc123-H--
Message: [id \"942100\"] [msg \"SQL Injection\"] [data \"union select\"]
--abc123-Z--
";
        assert_eq!(out, expected);
    }

    #[test]
    fn test_native_format_skips_empty_sections() {
        let mut log = sample_log();
        log.response = None;
        log.messages.clear();
        let out = String::from_utf8(NativeFormatter.format(&log).unwrap()).unwrap();
        assert!(!out.contains("-F--"));
        assert!(!out.contains("-H--"));
        assert!(out.ends_with("--abc123-Z--\n"));
    }

    #[test]
    fn test_json_format_roundtrip() {
        let log = sample_log();
        let bytes = JsonFormatter.format(&log).unwrap();
        let parsed: AuditLog = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(parsed, log);
        assert_eq!(JsonFormatter.mime_type(), "application/json");
    }
}
