use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use time::PrimitiveDateTime;

/// Any system actor: manager, master or client.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct User {
    pub user_id: i64,
    pub fio: Option<String>,
    pub phone: Option<String>,
    pub login: Option<String>,
    #[serde(skip_serializing)]
    pub password: Option<String>, // stored as imported, not hashed
    pub user_type: Option<String>, // "Менеджер", "Мастер", "Заказчик", ...
    pub is_active: bool,
    pub registration_date: Option<PrimitiveDateTime>,
}
