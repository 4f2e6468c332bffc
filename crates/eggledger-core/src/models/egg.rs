//! Daily egg count records.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// One manually logged egg count.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EggCount {
    pub id: i64,
    pub date: NaiveDate,
    pub count: u32,
    #[serde(default)]
    pub notes: String,
}
