//! Secrets Manager ARN parsing

use std::fmt;

use crate::SecretError;

/// Number of colon-separated fields in a secret ARN
const ARN_FIELDS: usize = 7;

/// A parsed Secrets Manager ARN
///
/// Format: `arn:<partition>:secretsmanager:<region>:<account>:secret:<name>`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SecretArn {
    raw: String,
    region: String,
}

impl SecretArn {
    pub fn parse(raw: &str) -> Result<Self, SecretError> {
        let fields: Vec<&str> = raw.split(':').collect();
        if fields.len() != ARN_FIELDS {
            return Err(SecretError::Format(raw.to_string()));
        }

        Ok(Self {
            raw: raw.to_string(),
            region: fields[3].to_string(),
        })
    }

    pub fn region(&self) -> &str {
        &self.region
    }

    pub fn as_str(&self) -> &str {
        &self.raw
    }
}

impl fmt::Display for SecretArn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_region() {
        let arn = SecretArn::parse("arn:aws:secretsmanager:ap-northeast-1:1234567890:secret:mytest")
            .unwrap();
        assert_eq!(arn.region(), "ap-northeast-1");
        assert_eq!(
            arn.as_str(),
            "arn:aws:secretsmanager:ap-northeast-1:1234567890:secret:mytest"
        );
    }

    #[test]
    fn test_wrong_field_count() {
        for raw in [
            "",
            "mytest",
            "arn:aws:secretsmanager:ap-northeast-1:1234567890:mytest",
            "arn:aws:secretsmanager:ap-northeast-1:1234567890:secret:mytest:extra",
        ] {
            let err = SecretArn::parse(raw).unwrap_err();
            assert!(matches!(err, SecretError::Format(ref s) if s == raw));
        }
    }
}
