//! HTTP request handlers

use super::state::AppState;
use crate::error::{Result, ScoutError};
use crate::scout::{CompanyInput, CompetitorResponse, InvestorResponse};
use axum::{
    extract::{rejection::JsonRejection, State},
    response::IntoResponse,
    Json,
};
use serde::Serialize;

/// Routes listed on the index
const ENDPOINTS: [&str; 4] = [
    "POST /find-investors",
    "POST /find-competitors",
    "GET /health",
    "GET /",
];

#[derive(Debug, Serialize)]
pub struct ServiceInfo {
    pub service: String,
    pub version: &'static str,
    pub mock_mode: bool,
    pub endpoints: Vec<&'static str>,
}

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub mock_mode: bool,
    pub linkedin_client: bool,
}

/// Unwrap a JSON body, turning schema failures into a 422
fn company_input(
    body: std::result::Result<Json<CompanyInput>, JsonRejection>,
) -> Result<CompanyInput> {
    body.map(|Json(input)| input)
        .map_err(|rejection| ScoutError::Validation(rejection.body_text()))
}

/// Service metadata
pub async fn index(State(state): State<AppState>) -> impl IntoResponse {
    Json(ServiceInfo {
        service: state.service_name().to_string(),
        version: crate::VERSION,
        mock_mode: state.mock_mode(),
        endpoints: ENDPOINTS.to_vec(),
    })
}

/// Health check handler
pub async fn health(State(state): State<AppState>) -> impl IntoResponse {
    Json(HealthResponse {
        status: "healthy",
        mock_mode: state.mock_mode(),
        linkedin_client: state.scout.has_network(),
    })
}

pub async fn find_investors(
    State(state): State<AppState>,
    body: std::result::Result<Json<CompanyInput>, JsonRejection>,
) -> Result<Json<InvestorResponse>> {
    let input = company_input(body)?;
    let response = state.scout.find_investors(&input).await?;
    Ok(Json(response))
}

pub async fn find_competitors(
    State(state): State<AppState>,
    body: std::result::Result<Json<CompanyInput>, JsonRejection>,
) -> Result<Json<CompetitorResponse>> {
    let input = company_input(body)?;
    let response = state.scout.find_competitors(&input).await?;
    Ok(Json(response))
}
