use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Note left on a request by a master.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Comment {
    pub comment_id: i64,
    pub message: Option<String>,
    pub master_id: Option<i64>,
    pub request_id: Option<i64>,
}
