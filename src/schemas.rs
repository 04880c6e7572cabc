use chrono::{DateTime, NaiveDate, NaiveDateTime};
use serde::{de, Deserialize, Deserializer, Serialize};
use sqlx::FromRow;

pub type UserId = i32;
pub type ExpenseId = i32;

#[derive(Clone, Debug, PartialEq, Deserialize, Serialize, FromRow)]
pub struct User {
    pub id: UserId,
    pub name: String,
    pub email: String,
}

/// A directed `contact_list` row: `list_owner_id` sees `contact_id` as a friend.
#[derive(Clone, Debug, PartialEq, Deserialize, Serialize, FromRow)]
pub struct Contact {
    pub list_owner_id: UserId,
    pub contact_id: UserId,
}

#[derive(Clone, Debug, PartialEq, Deserialize, Serialize, FromRow)]
pub struct Expense {
    pub id: ExpenseId,
    pub user_id: UserId,
    pub description: String,
    pub transaction_date: NaiveDate,
    pub total_balance: f64,
    pub notes: Option<String>,
}

/// One IOU line of an expense: `borrower_id` owes `lender_id` the `balance`.
#[derive(Clone, Debug, PartialEq, Deserialize, Serialize, FromRow)]
pub struct Transaction {
    pub id: i32,
    pub expense_id: ExpenseId,
    pub lender_id: UserId,
    pub borrower_id: UserId,
    pub balance: f64,
}

#[derive(Clone, Debug, PartialEq, Deserialize, Serialize, FromRow)]
pub struct Comment {
    pub id: i32,
    pub expense_id: ExpenseId,
    pub user_id: UserId,
    pub comment: String,
}

#[derive(Clone, Debug, PartialEq, Serialize, FromRow)]
pub struct ExpenseWithOwner {
    pub id: ExpenseId,
    pub user_id: UserId,
    pub name: String,
    pub description: String,
    pub transaction_date: NaiveDate,
    pub total_balance: f64,
    pub notes: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Serialize, FromRow)]
pub struct TransactionWithNames {
    pub id: i32,
    pub expense_id: ExpenseId,
    pub lender_id: UserId,
    pub lender_name: String,
    pub borrower_id: UserId,
    pub borrower_name: String,
    pub balance: f64,
}

/// The other side of a transaction as seen from one user.
#[derive(Clone, Debug, PartialEq, Serialize, FromRow)]
pub struct Counterparty {
    pub id: UserId,
    pub name: String,
    pub balance: f64,
}

#[derive(Clone, Debug, PartialEq, Serialize, FromRow)]
pub struct PairTransaction {
    pub id: i32,
    pub expense_id: ExpenseId,
    pub lender_id: UserId,
    pub borrower_id: UserId,
    pub balance: f64,
    pub description: String,
    pub transaction_date: NaiveDate,
}

#[derive(Clone, Debug, PartialEq, Serialize, FromRow)]
pub struct CommentWithAuthor {
    pub id: i32,
    pub expense_id: ExpenseId,
    pub user_id: UserId,
    pub name: String,
    pub comment: String,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ExpenseDetail<E, T> {
    pub expense: E,
    pub transactions: Vec<T>,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserSummary {
    pub friends: Vec<User>,
    pub money_borrowed: Vec<Counterparty>,
    pub money_lent: Vec<Counterparty>,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PairBalances {
    pub money_borrowed: Vec<PairTransaction>,
    pub money_lent: Vec<PairTransaction>,
}

#[derive(Clone, Debug, Deserialize)]
pub struct NewUser {
    pub name: String,
    pub email: String,
}

#[derive(Clone, Debug, Deserialize)]
pub struct NewFriend {
    pub email: String,
}

#[derive(Clone, Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewTransaction {
    pub lender_id: UserId,
    pub borrower_id: UserId,
    pub balance: f64,
}

#[derive(Clone, Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewExpense {
    pub user_id: UserId,
    pub description: String,
    #[serde(deserialize_with = "date_or_timestamp")]
    pub transaction_date: NaiveDate,
    pub total_balance: f64,
    #[serde(default)]
    pub notes: Option<String>,
    pub transactions: Vec<NewTransaction>,
}

/// Reads `2024-01-31` or an ISO-8601 timestamp. Timestamps keep the date
/// as written; the offset is ignored.
fn date_or_timestamp<'de, D: Deserializer<'de>>(deserializer: D) -> Result<NaiveDate, D::Error> {
    let raw = String::deserialize(deserializer)?;
    let raw = raw.trim();
    if let Ok(date) = raw.parse::<NaiveDate>() {
        return Ok(date);
    }
    if let Ok(stamp) = DateTime::parse_from_rfc3339(raw) {
        return Ok(stamp.date_naive());
    }
    raw.replacen(' ', "T", 1)
        .parse::<NaiveDateTime>()
        .map(|stamp| stamp.date())
        .map_err(|_| de::Error::custom(format!("invalid date '{raw}'")))
}

#[derive(Clone, Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewComment {
    pub user_id: UserId,
    pub comment: String,
}
