use sqlx::SqlitePool;

use crate::models::{Nota, Tarefa, TarefaUpdate};

pub async fn fetch_tarefas(db: &SqlitePool) -> Result<Vec<Tarefa>, sqlx::Error> {
    sqlx::query_as::<_, Tarefa>(
        "SELECT id, nome, descricao, periodicidade, dataInicio, dataPrevisao, status, comentarios FROM tarefas"
    )
    .fetch_all(db)
    .await
}

pub async fn find_tarefa_by_id(db: &SqlitePool, id: &str) -> Result<Option<Tarefa>, sqlx::Error> {
    sqlx::query_as::<_, Tarefa>(
        "SELECT id, nome, descricao, periodicidade, dataInicio, dataPrevisao, status, comentarios FROM tarefas WHERE id = ?"
    )
    .bind(id)
    .fetch_optional(db)
    .await
}

pub async fn insert_tarefa(db: &SqlitePool, tarefa: &Tarefa) -> Result<(), sqlx::Error> {
    sqlx::query(
        "INSERT INTO tarefas (id, nome, descricao, periodicidade, dataInicio, dataPrevisao, status, comentarios) VALUES (?, ?, ?, ?, ?, ?, ?, ?)"
    )
    .bind(&tarefa.id)
    .bind(&tarefa.nome)
    .bind(&tarefa.descricao)
    .bind(&tarefa.periodicidade)
    .bind(&tarefa.data_inicio)
    .bind(&tarefa.data_previsao)
    .bind(&tarefa.status)
    .bind(&tarefa.comentarios)
    .execute(db)
    .await?;

    Ok(())
}

/// Rewrites every column except `status`. Returns the number of rows touched.
pub async fn update_tarefa(
    db: &SqlitePool,
    id: &str,
    changes: &TarefaUpdate,
) -> Result<u64, sqlx::Error> {
    let result = sqlx::query(
        "UPDATE tarefas SET nome = ?, descricao = ?, periodicidade = ?, dataInicio = ?, dataPrevisao = ?, comentarios = ? WHERE id = ?"
    )
    .bind(&changes.nome)
    .bind(&changes.descricao)
    .bind(&changes.periodicidade)
    .bind(&changes.data_inicio)
    .bind(&changes.data_previsao)
    .bind(&changes.comentarios)
    .bind(id)
    .execute(db)
    .await?;

    Ok(result.rows_affected())
}

pub async fn update_tarefa_status(
    db: &SqlitePool,
    id: &str,
    status: &str,
) -> Result<u64, sqlx::Error> {
    let result = sqlx::query("UPDATE tarefas SET status = ? WHERE id = ?")
        .bind(status)
        .bind(id)
        .execute(db)
        .await?;

    Ok(result.rows_affected())
}

pub async fn delete_tarefa(db: &SqlitePool, id: &str) -> Result<u64, sqlx::Error> {
    let result = sqlx::query("DELETE FROM tarefas WHERE id = ?")
        .bind(id)
        .execute(db)
        .await?;

    Ok(result.rows_affected())
}

pub async fn fetch_notas(db: &SqlitePool) -> Result<Vec<Nota>, sqlx::Error> {
    sqlx::query_as::<_, Nota>("SELECT id, texto FROM observacoes")
        .fetch_all(db)
        .await
}

pub async fn insert_nota(db: &SqlitePool, texto: String) -> Result<Nota, sqlx::Error> {
    let id = sqlx::query("INSERT INTO observacoes (texto) VALUES (?)")
        .bind(&texto)
        .execute(db)
        .await?
        .last_insert_rowid();

    Ok(Nota { id, texto })
}

/// `id` is compared against the integer key with SQLite's numeric affinity, so
/// `"3"` matches row 3 and non-numeric text matches nothing.
pub async fn delete_nota(db: &SqlitePool, id: &str) -> Result<u64, sqlx::Error> {
    let result = sqlx::query("DELETE FROM observacoes WHERE id = ?")
        .bind(id)
        .execute(db)
        .await?;

    Ok(result.rows_affected())
}
