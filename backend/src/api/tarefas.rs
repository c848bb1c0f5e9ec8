use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};
use tracing::{debug, info};

use crate::db::repository;
use crate::error::{AppError, StoreContext};
use crate::models::{StatusUpdateRequest, Tarefa, TarefaUpdate};
use crate::services::update_check;
use crate::state::AppState;

/// Result of a full update: the merged task, or nothing to do.
#[derive(Debug)]
pub enum UpdateOutcome {
    Updated(Value),
    Unchanged,
}

impl IntoResponse for UpdateOutcome {
    fn into_response(self) -> Response {
        match self {
            UpdateOutcome::Updated(body) => (StatusCode::OK, Json(body)).into_response(),
            UpdateOutcome::Unchanged => (
                StatusCode::NOT_MODIFIED,
                "Dados iguais, não é necessário atualizar.",
            )
                .into_response(),
        }
    }
}

pub async fn list_tarefas(State(state): State<AppState>) -> Result<Json<Vec<Tarefa>>, AppError> {
    let tarefas = repository::fetch_tarefas(&state.db)
        .await
        .read_context("Erro ao buscar tarefas")?;
    Ok(Json(tarefas))
}

/// Inserts the task with its dates in canonical form and echoes the submitted
/// payload back, with the id filled in.
pub async fn create_tarefa(
    State(state): State<AppState>,
    Json(payload): Json<Value>,
) -> Result<(StatusCode, Json<Value>), AppError> {
    let mut tarefa: Tarefa = parse_payload(&payload)?;
    tarefa.data_inicio = canonical_date("dataInicio", &tarefa.data_inicio)?;
    tarefa.data_previsao = canonical_date("dataPrevisao", &tarefa.data_previsao)?;

    repository::insert_tarefa(&state.db, &tarefa)
        .await
        .write_context("Erro ao adicionar tarefa")?;

    info!(id = %tarefa.id, "Sucesso ao adicionar tarefa");
    Ok((StatusCode::CREATED, Json(with_id(tarefa.id, payload))))
}

/// Replaces every field but `status`, unless the payload already matches the
/// stored task. The read and the write are separate statements; concurrent
/// updates of the same id are last-write-wins.
pub async fn update_tarefa(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(payload): Json<Value>,
) -> Result<UpdateOutcome, AppError> {
    let existing = repository::find_tarefa_by_id(&state.db, &id)
        .await
        .read_context("Erro ao buscar tarefa existente")?
        .ok_or(AppError::NotFound)?;

    if update_check::is_unchanged(&payload, &existing) {
        info!(%id, "Dados iguais, não é necessário atualizar.");
        return Ok(UpdateOutcome::Unchanged);
    }

    let mut changes: TarefaUpdate = parse_payload(&payload)?;
    changes.data_inicio = canonical_date("dataInicio", &changes.data_inicio)?;
    changes.data_previsao = canonical_date("dataPrevisao", &changes.data_previsao)?;

    repository::update_tarefa(&state.db, &id, &changes)
        .await
        .write_context("Erro ao atualizar tarefa")?;

    info!(%id, "Tarefa atualizada com sucesso");
    Ok(UpdateOutcome::Updated(with_id(id, payload)))
}

pub async fn update_tarefa_status(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(req): Json<StatusUpdateRequest>,
) -> Result<StatusCode, AppError> {
    debug!(%id, status = %req.status, "Atualizando status da tarefa");

    repository::update_tarefa_status(&state.db, &id, &req.status)
        .await
        .write_context("Erro ao atualizar status da tarefa")?;

    info!(%id, "Sucesso ao atualizar status da tarefa");
    Ok(StatusCode::NO_CONTENT)
}

pub async fn delete_tarefa(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<StatusCode, AppError> {
    repository::delete_tarefa(&state.db, &id)
        .await
        .write_context("Erro ao deletar tarefa")?;

    info!(%id, "Sucesso ao deletar tarefa");
    Ok(StatusCode::NO_CONTENT)
}

fn parse_payload<T: DeserializeOwned>(payload: &Value) -> Result<T, AppError> {
    serde::Deserialize::deserialize(payload).map_err(|e| AppError::InvalidPayload(e.to_string()))
}

fn canonical_date(field: &str, raw: &str) -> Result<String, AppError> {
    update_check::canonical_timestamp(raw).ok_or_else(|| {
        AppError::InvalidPayload(format!("{} não é uma data válida: {:?}", field, raw))
    })
}

// An `id` inside the payload overrides the given one.
fn with_id(id: String, payload: Value) -> Value {
    let mut merged = Map::new();
    merged.insert("id".to_string(), Value::String(id));
    if let Value::Object(fields) = payload {
        merged.extend(fields);
    }
    Value::Object(merged)
}
