use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use tracing::info;

use crate::db::repository;
use crate::error::{AppError, StoreContext};
use crate::models::{NewNotaRequest, Nota};
use crate::state::AppState;

pub async fn list_notas(State(state): State<AppState>) -> Result<Json<Vec<Nota>>, AppError> {
    let notas = repository::fetch_notas(&state.db)
        .await
        .read_context("Erro ao buscar notas")?;
    Ok(Json(notas))
}

pub async fn create_nota(
    State(state): State<AppState>,
    Json(req): Json<NewNotaRequest>,
) -> Result<(StatusCode, Json<Nota>), AppError> {
    let nota = repository::insert_nota(&state.db, req.texto)
        .await
        .write_context("Erro ao adicionar nota")?;

    info!(id = nota.id, "Sucesso ao adicionar nota");
    Ok((StatusCode::CREATED, Json(nota)))
}

/// The raw path segment is bound as-is; an id that matches no row, numeric or
/// not, deletes nothing.
pub async fn delete_nota(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<StatusCode, AppError> {
    repository::delete_nota(&state.db, &id)
        .await
        .write_context("Erro ao deletar nota")?;

    Ok(StatusCode::NO_CONTENT)
}
