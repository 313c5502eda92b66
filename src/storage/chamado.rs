use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A support ticket as exposed by the search API
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Chamado {
    pub id: i64,
    pub titulo: String,
    pub descricao: String,
    pub status: String,
    pub criticidade: String,
    pub data_criacao: DateTime<Utc>,
    pub autor_id: i64,

    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub autor_nome: String,
}

impl Chamado {
    /// Case-insensitive substring match on title or description.
    /// `needle` must already be lower-cased; an empty needle matches everything.
    pub fn matches_text(&self, needle: &str) -> bool {
        needle.is_empty()
            || self.titulo.to_lowercase().contains(needle)
            || self.descricao.to_lowercase().contains(needle)
    }
}
