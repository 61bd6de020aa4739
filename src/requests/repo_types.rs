use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A single repair job.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct ServiceRequest {
    pub request_id: i64,
    pub start_date: Option<String>,
    pub climate_tech_type: Option<String>,
    pub climate_tech_model: Option<String>,
    pub problem_description: Option<String>,
    pub request_status: Option<String>,
    pub completion_date: Option<String>,
    pub repair_parts: Option<String>,
    pub master_id: Option<i64>,
    pub client_id: Option<i64>,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct RequestStats {
    pub total: i64,
    pub completed: i64,
    pub by_status: Vec<(Option<String>, i64)>,
    pub by_tech_type: Vec<(Option<String>, i64)>,
}
