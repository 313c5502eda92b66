use crate::storage::Chamado;
use chrono::Utc;
use std::collections::HashSet;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;
use thiserror::Error;
use tracing::info;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Failed to read seed file {path}: {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },

    #[error("Invalid seed file {path}: {source}")]
    Parse {
        path: String,
        source: serde_json::Error,
    },

    #[error("Duplicate chamado id {0}")]
    DuplicateId(i64),
}

/// Read-only set of tickets, fixed for the lifetime of the process
#[derive(Debug, Clone)]
pub struct ChamadoStore {
    chamados: Vec<Chamado>,
}

impl ChamadoStore {
    /// Build a store from a fixture, rejecting duplicate ids
    pub fn new(chamados: Vec<Chamado>) -> Result<Self, StoreError> {
        let mut seen = HashSet::with_capacity(chamados.len());
        for chamado in &chamados {
            if !seen.insert(chamado.id) {
                return Err(StoreError::DuplicateId(chamado.id));
            }
        }

        Ok(Self { chamados })
    }

    /// Built-in mock tickets, all stamped with the construction time
    pub fn seed() -> Self {
        let now = Utc::now();
        let chamado = |id, titulo: &str, descricao: &str, status: &str, criticidade: &str, autor_id| {
            Chamado {
                id,
                titulo: titulo.to_string(),
                descricao: descricao.to_string(),
                status: status.to_string(),
                criticidade: criticidade.to_string(),
                data_criacao: now,
                autor_id,
                autor_nome: String::new(),
            }
        };

        Self {
            chamados: vec![
                chamado(
                    1,
                    "Problema com impressora",
                    "A impressora não está funcionando",
                    "Aberto",
                    "Média",
                    1,
                ),
                chamado(
                    2,
                    "Erro no sistema de login",
                    "Usuários não conseguem fazer login",
                    "Em andamento",
                    "Alta",
                    2,
                ),
                chamado(
                    3,
                    "Solicitação de novo equipamento",
                    "Precisamos de novos monitores",
                    "Aberto",
                    "Baixa",
                    1,
                ),
            ],
        }
    }

    /// Load tickets from a JSON array in the API wire format
    pub fn from_json_file(path: &Path) -> Result<Self, StoreError> {
        let shown = path.display().to_string();
        info!(path = %shown, "Loading seed chamados");

        let file = File::open(path).map_err(|source| StoreError::Io {
            path: shown.clone(),
            source,
        })?;
        let chamados: Vec<Chamado> = serde_json::from_reader(BufReader::new(file))
            .map_err(|source| StoreError::Parse {
                path: shown,
                source,
            })?;

        Self::new(chamados)
    }

    /// Every ticket, in insertion order
    pub fn all(&self) -> &[Chamado] {
        &self.chamados
    }

    pub fn len(&self) -> usize {
        self.chamados.len()
    }

    pub fn is_empty(&self) -> bool {
        self.chamados.is_empty()
    }
}
