use crate::storage::{Chamado, ChamadoStore};
use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use serde::Serialize;
use std::sync::Arc;
use thiserror::Error;
use tracing::debug;

/// Parameters for a ticket search
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SearchQuery {
    pub text: String,
    /// Always >= 1. Accepted but not applied by `LinearScan`.
    pub page: u32,
    pub status: Option<String>,
    pub criticidade: Option<String>,
    /// Created at or after midnight UTC of this day
    pub data_inicio: Option<NaiveDate>,
    /// Created at or before midnight UTC of this day
    pub data_fim: Option<NaiveDate>,
}

/// Matching tickets plus their count
#[derive(Debug, Clone, Default, Serialize)]
pub struct SearchResult {
    pub chamados: Vec<Chamado>,
    pub total: usize,
}

impl From<Vec<Chamado>> for SearchResult {
    fn from(chamados: Vec<Chamado>) -> Self {
        Self {
            total: chamados.len(),
            chamados,
        }
    }
}

#[derive(Debug, Error)]
pub enum SearchError {
    #[error("Search backend {backend} failed: {message}")]
    Backend { backend: String, message: String },
}

/// Anything that can answer a ticket search.
///
/// The in-memory `LinearScan` is the only backend today; an indexed search engine
/// client plugs in here without touching the HTTP handlers.
#[async_trait]
pub trait SearchBackend: Send + Sync {
    /// Backend name for logging.
    fn name(&self) -> &str;

    async fn search(&self, query: &SearchQuery) -> Result<SearchResult, SearchError>;
}

/// Substring scan over every ticket in the store
pub struct LinearScan {
    store: Arc<ChamadoStore>,
}

impl LinearScan {
    pub fn new(store: Arc<ChamadoStore>) -> Self {
        Self { store }
    }

    pub fn scan(&self, query: &SearchQuery) -> SearchResult {
        let needle = query.text.to_lowercase();
        let status = non_empty(&query.status);
        let criticidade = non_empty(&query.criticidade);
        let from = query.data_inicio.map(midnight_utc);
        let until = query.data_fim.map(midnight_utc);

        let chamados: Vec<Chamado> = self
            .store
            .all()
            .iter()
            .filter(|c| c.matches_text(&needle))
            .filter(|c| status.is_none_or(|s| c.status == s))
            .filter(|c| criticidade.is_none_or(|s| c.criticidade == s))
            .filter(|c| from.is_none_or(|t| c.data_criacao >= t))
            .filter(|c| until.is_none_or(|t| c.data_criacao <= t))
            .cloned()
            .collect();

        debug!(
            scanned = self.store.len(),
            matched = chamados.len(),
            "Linear scan completed"
        );

        chamados.into()
    }
}

#[async_trait]
impl SearchBackend for LinearScan {
    fn name(&self) -> &str {
        "linear-scan"
    }

    async fn search(&self, query: &SearchQuery) -> Result<SearchResult, SearchError> {
        Ok(self.scan(query))
    }
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|v| !v.is_empty())
}

fn midnight_utc(day: NaiveDate) -> DateTime<Utc> {
    day.and_time(chrono::NaiveTime::MIN).and_utc()
}
