//! JSON wire types shared by the HTTP server and its clients.
//!
//! Field names are camelCase and timestamps are RFC3339 strings with second
//! precision (`2026-01-02T00:00:00Z`).

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Serde adapter for `DateTime<Utc>` as an RFC3339 string.
pub mod rfc3339 {
    use chrono::{DateTime, SecondsFormat, Utc};
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S>(value: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&value.to_rfc3339_opts(SecondsFormat::Secs, true))
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<DateTime<Utc>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        DateTime::parse_from_rfc3339(&raw)
            .map(|dt| dt.with_timezone(&Utc))
            .map_err(serde::de::Error::custom)
    }
}

fn is_empty(value: &str) -> bool {
    value.is_empty()
}

pub mod category {
    use super::*;

    #[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
    #[serde(rename_all = "snake_case")]
    pub enum CategoryType {
        Income,
        Expense,
    }

    #[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct Category {
        pub id: String,
        #[serde(rename = "type")]
        pub category_type: CategoryType,
        pub name: String,
        #[serde(default, skip_serializing_if = "is_empty")]
        pub description: String,
        #[serde(with = "rfc3339")]
        pub created_at: DateTime<Utc>,
        #[serde(with = "rfc3339")]
        pub updated_at: DateTime<Utc>,
    }

    /// Request body for `POST /categories`.
    ///
    /// `type` is kept as a raw string so that an unknown value is reported as
    /// a validation failure rather than malformed JSON.
    #[derive(Debug, Default, Serialize, Deserialize)]
    #[serde(default)]
    pub struct CategoryCreate {
        #[serde(rename = "type")]
        pub category_type: String,
        pub name: String,
        pub description: String,
    }

    /// Request body for `PATCH /categories/{id}`. Absent fields are left untouched.
    #[derive(Debug, Default, Serialize, Deserialize)]
    #[serde(default)]
    pub struct CategoryUpdate {
        pub name: Option<String>,
        pub description: Option<String>,
    }
}

pub mod budget {
    use super::*;

    #[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct Budget {
        pub id: String,
        /// `YYYY-MM`
        pub month: String,
        pub category_id: String,
        pub amount_cents: i64,
        #[serde(with = "rfc3339")]
        pub created_at: DateTime<Utc>,
        #[serde(with = "rfc3339")]
        pub updated_at: DateTime<Utc>,
    }

    /// Request body for `PUT /budgets`, keyed on `(month, categoryId)`.
    #[derive(Debug, Default, Serialize, Deserialize)]
    #[serde(default, rename_all = "camelCase")]
    pub struct BudgetUpsert {
        pub month: String,
        pub category_id: String,
        pub amount_cents: i64,
    }
}

pub mod transaction {
    use super::*;

    #[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
    #[serde(rename_all = "snake_case")]
    pub enum TransactionKind {
        Income,
        Expense,
    }

    #[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct Transaction {
        pub id: String,
        pub kind: TransactionKind,
        /// `YYYY-MM-DD`
        pub date: String,
        pub category_id: String,
        pub amount_cents: i64,
        #[serde(default, skip_serializing_if = "is_empty")]
        pub note: String,
        #[serde(with = "rfc3339")]
        pub created_at: DateTime<Utc>,
        #[serde(with = "rfc3339")]
        pub updated_at: DateTime<Utc>,
    }

    #[derive(Debug, Default, Serialize, Deserialize)]
    #[serde(default, rename_all = "camelCase")]
    pub struct TransactionCreate {
        pub kind: String,
        pub date: String,
        pub category_id: String,
        pub amount_cents: i64,
        pub note: String,
    }

    /// Request body for `PATCH /transactions/{id}`. Absent fields are left untouched.
    #[derive(Debug, Default, Serialize, Deserialize)]
    #[serde(default, rename_all = "camelCase")]
    pub struct TransactionUpdate {
        pub kind: Option<String>,
        pub date: Option<String>,
        pub category_id: Option<String>,
        pub amount_cents: Option<i64>,
        pub note: Option<String>,
    }
}

pub mod state {
    use super::*;

    use super::{budget::Budget, category::Category, transaction::Transaction};

    /// Whole-dataset snapshot exchanged by `GET /state` and `PUT /state`.
    #[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
    #[serde(default)]
    pub struct AppState {
        pub version: i64,
        pub categories: Vec<Category>,
        pub budgets: Vec<Budget>,
        pub transactions: Vec<Transaction>,
    }
}

pub mod health {
    use super::*;

    #[derive(Debug, Serialize, Deserialize)]
    pub struct Health {
        pub status: String,
    }
}

/// Body of every error response: `{"error": "<kind>"}`.
#[derive(Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorBody {
    pub error: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn category_serializes_type_and_second_precision_timestamps() {
        let at = Utc.with_ymd_and_hms(2026, 1, 2, 0, 0, 0).unwrap();
        let category = category::Category {
            id: "c1".to_string(),
            category_type: category::CategoryType::Expense,
            name: "Groceries".to_string(),
            description: String::new(),
            created_at: at,
            updated_at: at,
        };

        let value = serde_json::to_value(&category).unwrap();
        assert_eq!(value["type"], "expense");
        assert_eq!(value["createdAt"], "2026-01-02T00:00:00Z");
        assert!(value.get("description").is_none());
    }

    #[test]
    fn transaction_update_tells_absent_from_empty() {
        let patch: transaction::TransactionUpdate =
            serde_json::from_str(r#"{"note": ""}"#).unwrap();
        assert_eq!(patch.note.as_deref(), Some(""));
        assert!(patch.kind.is_none());
        assert!(patch.amount_cents.is_none());
    }

    #[test]
    fn timestamps_with_offsets_normalize_to_utc() {
        let raw = r#"{
            "id": "b1",
            "month": "2026-01",
            "categoryId": "c1",
            "amountCents": 0,
            "createdAt": "2026-01-02T01:00:00+01:00",
            "updatedAt": "2026-01-02T00:00:00.123Z"
        }"#;
        let budget: budget::Budget = serde_json::from_str(raw).unwrap();
        assert_eq!(
            budget.created_at,
            Utc.with_ymd_and_hms(2026, 1, 2, 0, 0, 0).unwrap()
        );
    }

    #[test]
    fn missing_state_fields_default() {
        let state: state::AppState = serde_json::from_str(r#"{"version": 1}"#).unwrap();
        assert_eq!(state.version, 1);
        assert!(state.categories.is_empty());
    }
}
