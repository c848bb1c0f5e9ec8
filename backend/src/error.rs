use axum::{http::StatusCode, response::{IntoResponse, Response}};
use thiserror::Error;
use tracing::{error, warn};

#[derive(Debug, Error)]
pub enum AppError {
    #[error("{context}: database connection failed: {source}")]
    StoreConnection {
        context: &'static str,
        #[source]
        source: sqlx::Error,
    },

    #[error("{context}: {source}")]
    StoreRead {
        context: &'static str,
        #[source]
        source: sqlx::Error,
    },

    #[error("{context}: {source}")]
    StoreWrite {
        context: &'static str,
        #[source]
        source: sqlx::Error,
    },

    #[error("Tarefa não encontrada")]
    NotFound,

    #[error("Dados inválidos: {0}")]
    InvalidPayload(String),

    #[error("Método não permitido")]
    MethodNotAllowed,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            AppError::StoreConnection { context, source } => {
                error!(operation = context, "database connection error: {}", source);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Erro de conexão com o banco de dados".to_string(),
                )
            }
            AppError::StoreRead { context, source } | AppError::StoreWrite { context, source } => {
                error!(operation = context, "database error: {}", source);
                (StatusCode::INTERNAL_SERVER_ERROR, context.to_string())
            }
            AppError::NotFound => (StatusCode::NOT_FOUND, AppError::NotFound.to_string()),
            AppError::InvalidPayload(msg) => {
                warn!("rejected payload: {}", msg);
                (StatusCode::UNPROCESSABLE_ENTITY, format!("Dados inválidos: {}", msg))
            }
            AppError::MethodNotAllowed => (
                StatusCode::METHOD_NOT_ALLOWED,
                AppError::MethodNotAllowed.to_string(),
            ),
        };

        (status, message).into_response()
    }
}

/// Attaches the failing operation to a driver error and sorts it into
/// connection, read, or write failures.
pub trait StoreContext<T> {
    fn read_context(self, context: &'static str) -> Result<T, AppError>;
    fn write_context(self, context: &'static str) -> Result<T, AppError>;
}

impl<T> StoreContext<T> for Result<T, sqlx::Error> {
    fn read_context(self, context: &'static str) -> Result<T, AppError> {
        self.map_err(|source| {
            if is_connection_error(&source) {
                AppError::StoreConnection { context, source }
            } else {
                AppError::StoreRead { context, source }
            }
        })
    }

    fn write_context(self, context: &'static str) -> Result<T, AppError> {
        self.map_err(|source| {
            if is_connection_error(&source) {
                AppError::StoreConnection { context, source }
            } else {
                AppError::StoreWrite { context, source }
            }
        })
    }
}

fn is_connection_error(err: &sqlx::Error) -> bool {
    matches!(
        err,
        sqlx::Error::PoolTimedOut
            | sqlx::Error::PoolClosed
            | sqlx::Error::Io(_)
            | sqlx::Error::Tls(_)
            | sqlx::Error::WorkerCrashed
    )
}
