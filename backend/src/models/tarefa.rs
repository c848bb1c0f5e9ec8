use serde::{Deserialize, Deserializer, Serialize};
use sqlx::FromRow;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Tarefa {
    /// Accepted as a JSON string or integer, always stored as text.
    #[serde(deserialize_with = "id_from_text_or_integer")]
    pub id: String,
    pub nome: String,
    pub descricao: String,
    pub periodicidade: String,
    #[sqlx(rename = "dataInicio")]
    pub data_inicio: String,
    #[sqlx(rename = "dataPrevisao")]
    pub data_previsao: String,
    pub status: String,
    pub comentarios: Option<String>,
}

/// Columns written by a full update. `id` and `status` in the payload are
/// ignored: status only changes through [`StatusUpdateRequest`].
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TarefaUpdate {
    pub nome: String,
    pub descricao: String,
    pub periodicidade: String,
    pub data_inicio: String,
    pub data_previsao: String,
    #[serde(default)]
    pub comentarios: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatusUpdateRequest {
    pub status: String,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawId {
    Text(String),
    Integer(i64),
}

fn id_from_text_or_integer<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match RawId::deserialize(deserializer)? {
        RawId::Text(id) => id,
        RawId::Integer(id) => id.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn payload(id: serde_json::Value) -> serde_json::Value {
        json!({
            "id": id,
            "nome": "Varrer",
            "descricao": "Varrer a cozinha",
            "periodicidade": "diaria",
            "dataInicio": "2024-01-01T00:00:00.000Z",
            "dataPrevisao": "2024-01-02T00:00:00.000Z",
            "status": "pendente"
        })
    }

    #[test]
    fn test_id_accepts_text_and_integer() {
        let texto: Tarefa = serde_json::from_value(payload(json!("abc"))).unwrap();
        assert_eq!(texto.id, "abc");

        let inteiro: Tarefa = serde_json::from_value(payload(json!(7))).unwrap();
        assert_eq!(inteiro.id, "7");
        assert_eq!(inteiro.comentarios, None);
    }

    #[test]
    fn test_id_rejects_other_types() {
        assert!(serde_json::from_value::<Tarefa>(payload(json!(true))).is_err());
        assert!(serde_json::from_value::<Tarefa>(payload(json!(1.5))).is_err());
    }
}
