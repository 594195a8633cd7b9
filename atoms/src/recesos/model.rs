use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::users::model::User;

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Receso {
    pub id: String,
    pub user_id: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub comments: Option<String>,
    pub created_date: String,
    /// Owner, joined in by the read path for the admin table.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user: Option<User>,
}

#[derive(Debug, Deserialize)]
pub struct CreateRecesoPayload {
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub comments: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct UpdateRecesoPayload {
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub comments: Option<String>,
}
