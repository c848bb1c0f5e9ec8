use serde::{Deserialize, Serialize};
use sqlx::FromRow;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct Nota {
    pub id: i64,
    pub texto: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewNotaRequest {
    pub texto: String,
}
