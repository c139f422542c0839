use super::{AccountId, ApiResponse};
use crate::macros::setter;
use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use tower_api_client::{Request, RequestData};

pub const DEFAULT_PAGE_SIZE: u32 = 30;

// Common

/// A single ledger entry ("transaction" in the app)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Posting {
    /// Unique key, also the pagination cursor. Holds the posting timestamp.
    pub action_key: String,
    /// Display title of the posting
    #[serde(default)]
    pub action: String,
    pub created: Option<String>,
    pub status: PostingStatus,
    pub currency: String,
    pub debit: Option<Decimal>,
    pub credit: Option<Decimal>,
}

impl Posting {
    /// Timestamp encoded in the action key
    pub fn action_time(&self) -> Option<DateTime<Utc>> {
        parse_timestamp(&self.action_key)
    }

    /// Creation timestamp, if present and well formed
    pub fn created_time(&self) -> Option<DateTime<Utc>> {
        self.created.as_deref().and_then(parse_timestamp)
    }

    /// The populated side of the posting. Credit wins when both are set and
    /// non-zero, matching how the amount is signed for display.
    pub fn amount(&self) -> Option<PostingAmount> {
        match (self.credit, self.debit) {
            (Some(credit), _) if !credit.is_zero() => Some(PostingAmount::Credit(credit)),
            (_, Some(debit)) => Some(PostingAmount::Debit(debit)),
            (Some(credit), None) => Some(PostingAmount::Credit(credit)),
            (None, None) => None,
        }
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum PostingAmount {
    Credit(Decimal),
    Debit(Decimal),
}

impl PostingAmount {
    pub fn value(&self) -> Decimal {
        match self {
            Self::Credit(v) | Self::Debit(v) => *v,
        }
    }

    pub fn is_credit(&self) -> bool {
        matches!(self, Self::Credit(_))
    }
}

#[derive(Debug, Copy, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum PostingStatus {
    #[serde(alias = "PENDING")]
    Pending,
    #[serde(alias = "COMPLETED")]
    Completed,
    #[serde(alias = "FAILED")]
    Failed,
    #[serde(alias = "CANCELLED")]
    Cancelled,
    #[serde(other)]
    Unknown,
}

impl std::fmt::Display for PostingStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Pending => write!(f, "Pending"),
            Self::Completed => write!(f, "Completed"),
            Self::Failed => write!(f, "Failed"),
            Self::Cancelled => write!(f, "Cancelled"),
            Self::Unknown => write!(f, "Unknown"),
        }
    }
}

/// Parse the timestamp formats the API emits: RFC 3339, naive ISO date-time
/// (taken as UTC) and bare dates.
pub fn parse_timestamp(value: &str) -> Option<DateTime<Utc>> {
    let value = value.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(value) {
        return Some(dt.with_timezone(&Utc));
    }
    if let Ok(naive) = NaiveDateTime::parse_from_str(value, "%Y-%m-%dT%H:%M:%S%.f") {
        return Some(naive.and_utc());
    }
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}

// Requests

#[derive(Debug, Clone, Default, Serialize)]
pub struct PostingsQuery {
    pub limit: u32,
    #[serde(rename = "lastEvaluatedKey", skip_serializing_if = "Option::is_none")]
    pub last_evaluated_key: Option<String>,
}

/// `getTransactions` / `getMoreTransactions`: one page of postings for a ledger
#[derive(Debug, Clone, Serialize)]
pub struct ListPostings {
    #[serde(skip)]
    account_id: AccountId,
    query: PostingsQuery,
}

impl ListPostings {
    pub fn new(account_id: AccountId) -> Self {
        Self {
            account_id,
            query: PostingsQuery {
                limit: DEFAULT_PAGE_SIZE,
                last_evaluated_key: None,
            },
        }
    }

    setter!(query.limit: u32);
    setter!(opt query.last_evaluated_key: String);

    pub fn account_id(&self) -> &AccountId {
        &self.account_id
    }

    pub fn query(&self) -> &PostingsQuery {
        &self.query
    }
}

impl Request for ListPostings {
    type Data = PostingsQuery;
    type Response = PostingsResponse;

    fn endpoint(&self) -> Cow<'_, str> {
        format!("/accounts/{}/postings", self.account_id).into()
    }

    fn data(&self) -> RequestData<&Self::Data> {
        RequestData::Query(&self.query)
    }
}

// Responses

pub type PostingsResponse = ApiResponse<PostingsPage>;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PostingsPage {
    #[serde(default)]
    pub postings: Vec<Posting>,
    /// Present when the server holds more postings past this page
    pub last_evaluated_key: Option<String>,
}

impl PostingsPage {
    pub fn has_next_page(&self) -> bool {
        self.last_evaluated_key.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn posting(credit: Option<Decimal>, debit: Option<Decimal>) -> Posting {
        Posting {
            action_key: "2024-03-01T10:00:00Z".to_string(),
            action: "Coffee".to_string(),
            created: None,
            status: PostingStatus::Completed,
            currency: "EUR".to_string(),
            debit,
            credit,
        }
    }

    #[test]
    fn parse_timestamp_formats() {
        let expected = Utc.with_ymd_and_hms(2024, 3, 1, 10, 0, 0).unwrap();
        assert_eq!(parse_timestamp("2024-03-01T10:00:00Z"), Some(expected));
        assert_eq!(parse_timestamp("2024-03-01T11:00:00+01:00"), Some(expected));
        assert_eq!(parse_timestamp("2024-03-01T10:00:00.000"), Some(expected));
        assert_eq!(
            parse_timestamp("2024-03-01"),
            Some(Utc.with_ymd_and_hms(2024, 3, 1, 0, 0, 0).unwrap())
        );
        assert_eq!(parse_timestamp("not a date"), None);
        assert_eq!(parse_timestamp(""), None);
    }

    #[test]
    fn amount_prefers_nonzero_credit() {
        let p = posting(Some(Decimal::new(500, 2)), None);
        assert_eq!(p.amount(), Some(PostingAmount::Credit(Decimal::new(500, 2))));

        let p = posting(Some(Decimal::ZERO), Some(Decimal::new(250, 2)));
        assert_eq!(p.amount(), Some(PostingAmount::Debit(Decimal::new(250, 2))));

        let p = posting(None, None);
        assert_eq!(p.amount(), None);
    }

    #[test]
    fn page_deserializes_with_cursor() {
        let json = r#"{
            "success": true,
            "data": {
                "postings": [{
                    "actionKey": "2024-03-01T10:00:00Z",
                    "action": "Salary",
                    "created": "2024-03-01T09:59:58Z",
                    "status": "COMPLETED",
                    "currency": "EUR",
                    "credit": 2500
                }],
                "lastEvaluatedKey": "2024-03-01T10:00:00Z"
            }
        }"#;
        let res: PostingsResponse = serde_json::from_str(json).unwrap();
        let page = res.into_result().unwrap();

        assert!(page.has_next_page());
        assert_eq!(page.postings[0].status, PostingStatus::Completed);
        assert_eq!(page.postings[0].debit, None);
        assert_eq!(page.postings[0].credit, Some(Decimal::new(2500, 0)));
    }

    #[test]
    fn unknown_status_is_tolerated() {
        let json = r#"{"actionKey": "k", "status": "on_hold", "currency": "EUR"}"#;
        let p: Posting = serde_json::from_str(json).unwrap();
        assert_eq!(p.status, PostingStatus::Unknown);
        assert_eq!(p.action, "");
    }

    #[test]
    fn more_request_carries_cursor() {
        let req = ListPostings::new("acc-1".into())
            .limit(30u32)
            .last_evaluated_key("2024-03-01T10:00:00Z");
        assert_eq!(req.endpoint(), "/accounts/acc-1/postings");
        assert_eq!(
            req.query().last_evaluated_key.as_deref(),
            Some("2024-03-01T10:00:00Z")
        );
    }
}
