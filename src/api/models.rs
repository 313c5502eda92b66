use crate::storage::{SearchBackend, SearchQuery};
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use chrono::NaiveDate;
use serde::Serialize;
use std::sync::Arc;
use tracing::error;

/// Application state
#[derive(Clone)]
pub struct AppState {
    pub search_backend: Arc<dyn SearchBackend>,
}

/// Query string of `GET /api/search`.
///
/// Values stay as text so each malformed field falls back on its own instead of
/// rejecting the whole request.
#[derive(Debug, Default)]
pub struct SearchParams {
    pub q: String,
    pub page: Option<String>,
    pub status: Option<String>,
    pub criticidade: Option<String>,
    pub data_inicio: Option<String>,
    pub data_fim: Option<String>,
}

impl SearchParams {
    /// Build from decoded query pairs; the first occurrence of a key wins
    pub fn from_pairs<I>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (String, String)>,
    {
        let mut q = None;
        let mut params = Self::default();

        for (key, value) in pairs {
            let slot = match key.as_str() {
                "q" => &mut q,
                "page" => &mut params.page,
                "status" => &mut params.status,
                "criticidade" => &mut params.criticidade,
                "data_inicio" => &mut params.data_inicio,
                "data_fim" => &mut params.data_fim,
                _ => continue,
            };
            if slot.is_none() {
                *slot = Some(value);
            }
        }

        params.q = q.unwrap_or_default();
        params
    }

    /// Absent, non-numeric and non-positive pages all resolve to 1
    pub fn resolved_page(&self) -> u32 {
        self.page
            .as_deref()
            .and_then(|raw| raw.parse::<i64>().ok())
            .filter(|page| *page > 0)
            .map(|page| u32::try_from(page).unwrap_or(u32::MAX))
            .unwrap_or(1)
    }

    pub fn into_query(self) -> SearchQuery {
        let page = self.resolved_page();
        SearchQuery {
            text: self.q,
            page,
            status: self.status,
            criticidade: self.criticidade,
            data_inicio: parse_date(self.data_inicio.as_deref()),
            data_fim: parse_date(self.data_fim.as_deref()),
        }
    }
}

/// `YYYY-MM-DD`; anything else means no date filter
fn parse_date(raw: Option<&str>) -> Option<NaiveDate> {
    raw.and_then(|value| NaiveDate::parse_from_str(value.trim(), "%Y-%m-%d").ok())
}

/// Health check response
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub message: String,
    pub timestamp: String,
}

/// Error response
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
}

/// Application error type
#[derive(Debug)]
pub enum AppError {
    Internal(String),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            AppError::Internal(msg) => {
                error!("Internal error: {}", msg);
                (StatusCode::INTERNAL_SERVER_ERROR, msg)
            }
        };

        (status, Json(ErrorResponse {
            error: status.to_string(),
            message,
        }))
        .into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn page(raw: Option<&str>) -> u32 {
        SearchParams {
            page: raw.map(str::to_string),
            ..Default::default()
        }
        .resolved_page()
    }

    #[test]
    fn test_resolved_page() {
        assert_eq!(page(None), 1);
        assert_eq!(page(Some("")), 1);
        assert_eq!(page(Some("abc")), 1);
        assert_eq!(page(Some("0")), 1);
        assert_eq!(page(Some("-5")), 1);
        assert_eq!(page(Some("2.5")), 1);
        assert_eq!(page(Some("3")), 3);
        assert_eq!(page(Some("+4")), 4);
        assert_eq!(page(Some("99999999999")), u32::MAX);
    }

    fn pairs(raw: &[(&str, &str)]) -> SearchParams {
        SearchParams::from_pairs(
            raw.iter()
                .map(|(k, v)| (k.to_string(), v.to_string())),
        )
    }

    #[test]
    fn test_into_query() {
        let query = SearchParams {
            q: "Login".to_string(),
            page: Some("2".to_string()),
            status: Some("Aberto".to_string()),
            data_inicio: Some("2024-03-01".to_string()),
            data_fim: Some("01/03/2024".to_string()),
            ..Default::default()
        }
        .into_query();

        assert_eq!(query.text, "Login");
        assert_eq!(query.page, 2);
        assert_eq!(query.status.as_deref(), Some("Aberto"));
        assert!(query.criticidade.is_none());
        assert_eq!(query.data_inicio, NaiveDate::from_ymd_opt(2024, 3, 1));
        assert!(query.data_fim.is_none());
    }

    #[test]
    fn test_from_pairs_keeps_first_value() {
        let params = pairs(&[
            ("q", "login"),
            ("page", "abc"),
            ("q", "impressora"),
            ("page", "2"),
            ("status", "Aberto"),
            ("status", "Encerrado"),
            ("other", "ignored"),
        ]);

        assert_eq!(params.q, "login");
        assert_eq!(params.resolved_page(), 1);
        assert_eq!(params.status.as_deref(), Some("Aberto"));
    }

    #[test]
    fn test_from_pairs_empty_first_value_wins() {
        let params = pairs(&[("q", ""), ("q", "login")]);
        assert_eq!(params.q, "");

        let params = pairs(&[]);
        assert_eq!(params.q, "");
        assert!(params.page.is_none());
    }

    #[test]
    fn test_app_error_response() {
        let response = AppError::Internal("boom".to_string()).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
