use super::{AccountId, ApiResponse};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use tower_api_client::{Request, RequestData};

// Common

/// A user account ("ledger") the home screen can be switched to
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ledger {
    pub account: AccountId,
    pub title: String,
    /// ISO 4217 currency code
    pub currency: String,
    /// Balance available to spend
    pub available: Decimal,
}

// Requests

#[derive(Default, Debug, Clone, Serialize)]
pub struct ListAccounts;

impl ListAccounts {
    pub fn new() -> Self {
        Self
    }
}

impl Request for ListAccounts {
    type Data = ();
    type Response = AccountsResponse;

    fn endpoint(&self) -> Cow<'_, str> {
        "/accounts".into()
    }

    fn data(&self) -> RequestData<&Self::Data> {
        RequestData::Empty
    }
}

// Responses

pub type AccountsResponse = ApiResponse<Vec<Ledger>>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ledger_deserializes_numeric_balance() {
        let json = r#"{
            "success": true,
            "data": [
                {"account": "acc-1", "title": "Main", "currency": "EUR", "available": 1520.75}
            ]
        }"#;
        let res: AccountsResponse = serde_json::from_str(json).unwrap();
        let ledgers = res.into_result().unwrap();

        assert_eq!(ledgers.len(), 1);
        assert_eq!(ledgers[0].account, "acc-1");
        assert_eq!(ledgers[0].available, Decimal::new(152075, 2));
    }
}
