pub mod notas;
pub mod tarefas;

use axum::Router;
use axum::extract::Request;
use axum::http::{Method, header};
use axum::middleware::{Next, from_fn};
use axum::response::{IntoResponse, Response};
use axum::routing::{delete, get, put};
use tower_http::cors::{Any, CorsLayer};

use crate::error::AppError;
use crate::state::AppState;

pub fn router(state: AppState) -> Router {
    Router::new()
        .route(
            "/tarefas",
            get(tarefas::list_tarefas)
                .post(tarefas::create_tarefa)
                .fallback(method_not_allowed),
        )
        .route(
            "/tarefas/{id}",
            put(tarefas::update_tarefa)
                .patch(tarefas::update_tarefa_status)
                .delete(tarefas::delete_tarefa)
                .fallback(method_not_allowed),
        )
        .route(
            "/notas",
            get(notas::list_notas)
                .post(notas::create_nota)
                .fallback(method_not_allowed),
        )
        .route(
            "/notas/{id}",
            delete(notas::delete_nota).fallback(method_not_allowed),
        )
        .route_layer(cors())
        .route_layer(from_fn(reject_unlisted_methods))
        .with_state(state)
}

fn cors() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::PATCH,
            Method::DELETE,
        ])
        .allow_headers([header::CONTENT_TYPE])
}

/// Turns away the methods axum would otherwise answer on its own: HEAD is
/// routed to GET handlers, and the CORS layer treats every OPTIONS request as
/// a preflight. Only real preflights (carrying `Access-Control-Request-Method`)
/// get through.
async fn reject_unlisted_methods(req: Request, next: Next) -> Response {
    let bare_options = req.method() == Method::OPTIONS
        && !req
            .headers()
            .contains_key(header::ACCESS_CONTROL_REQUEST_METHOD);

    if req.method() == Method::HEAD || bare_options {
        return AppError::MethodNotAllowed.into_response();
    }

    next.run(req).await
}

async fn method_not_allowed() -> AppError {
    AppError::MethodNotAllowed
}
