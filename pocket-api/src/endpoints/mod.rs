pub mod accounts;
pub mod postings;

use crate::ApiError;
use serde::{Deserialize, Serialize};
use std::fmt::Display;

/// Identifier of a ledger (the `account` field on the wire)
#[derive(Default, Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AccountId(String);

impl AccountId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Display for AccountId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for AccountId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl From<String> for AccountId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl PartialEq<str> for AccountId {
    fn eq(&self, other: &str) -> bool {
        self.0 == other
    }
}

impl PartialEq<&str> for AccountId {
    fn eq(&self, other: &&str) -> bool {
        self.0 == *other
    }
}

/// Envelope every endpoint answers with: `{ "success": bool, "data": ... }`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    pub data: Option<T>,
    pub message: Option<String>,
}

impl<T> ApiResponse<T> {
    pub fn into_result(self) -> Result<T, ApiError> {
        match (self.success, self.data) {
            (true, Some(data)) => Ok(data),
            (true, None) => Err(ApiError::Unsuccessful {
                message: "response carried no data".to_string(),
            }),
            (false, _) => Err(ApiError::Unsuccessful {
                message: self.message.unwrap_or_else(|| "unknown error".to_string()),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn envelope_success_yields_data() {
        let res: ApiResponse<Vec<u32>> =
            serde_json::from_str(r#"{"success": true, "data": [1, 2]}"#).unwrap();
        assert_eq!(res.into_result().unwrap(), vec![1, 2]);
    }

    #[test]
    fn envelope_failure_is_an_error() {
        let res: ApiResponse<Vec<u32>> =
            serde_json::from_str(r#"{"success": false, "message": "nope"}"#).unwrap();
        let err = res.into_result().unwrap_err();
        assert_eq!(err.to_string(), "Request unsuccessful: nope");
    }

    #[test]
    fn envelope_success_without_data_is_an_error() {
        let res: ApiResponse<Vec<u32>> = serde_json::from_str(r#"{"success": true}"#).unwrap();
        assert!(res.into_result().is_err());
    }

    #[test]
    fn account_id_is_transparent() {
        let id: AccountId = serde_json::from_str(r#""acc-1""#).unwrap();
        assert_eq!(id, "acc-1");
        assert_eq!(serde_json::to_string(&id).unwrap(), r#""acc-1""#);
    }
}
