use axum::Form;
use axum::Json;
use axum::extract::{Query, State};
use axum::http::header;
use axum::response::{Html, IntoResponse, Response};
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;
use time::format_description::well_known::Rfc3339;

use crate::entities::drug::DrugProfile;
use crate::entities::profile::NOVEL_USE;
use crate::error::RepurposerError;
use crate::render;
use crate::web::AppState;

fn now_rfc3339() -> String {
    OffsetDateTime::now_utc()
        .format(&Rfc3339)
        .unwrap_or_default()
}

#[derive(Serialize)]
pub(crate) struct Health {
    status: &'static str,
    version: &'static str,
}

pub(crate) async fn health() -> Json<Health> {
    Json(Health {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
    })
}

pub(crate) async fn index(
    State(state): State<AppState>,
) -> Result<Html<String>, RepurposerError> {
    let stats = state.profiles.cache_stats();
    Ok(Html(render::html::index_page(&stats)?))
}

#[derive(Deserialize)]
pub(crate) struct SearchForm {
    #[serde(default)]
    query: String,
}

pub(crate) async fn search(
    State(state): State<AppState>,
    Form(form): Form<SearchForm>,
) -> Result<Html<String>, RepurposerError> {
    let query = form.query.trim();
    if query.is_empty() {
        return Ok(Html(render::html::results_page("", &[], &now_rfc3339())?));
    }

    let profile = state.profiles.lookup(query).await;
    Ok(Html(render::html::results_page(
        query,
        &[profile],
        &now_rfc3339(),
    )?))
}

#[derive(Deserialize)]
pub(crate) struct ApiSearchParams {
    #[serde(default)]
    q: String,
}

#[derive(Serialize)]
pub(crate) struct ApiSearchResult {
    name: String,
    confidence: u8,
    indication: String,
}

pub(crate) async fn api_search(
    State(state): State<AppState>,
    Query(params): Query<ApiSearchParams>,
) -> Json<Vec<ApiSearchResult>> {
    let query = params.q.trim();
    if query.is_empty() {
        return Json(Vec::new());
    }

    let confidence = state.profiles.confidence_for(query).await;
    Json(vec![ApiSearchResult {
        name: query.to_string(),
        confidence,
        indication: NOVEL_USE.to_string(),
    }])
}

/// Three named slots; the form caps comparison at three drugs.
#[derive(Deserialize)]
pub(crate) struct CompareForm {
    #[serde(default)]
    compare_drug_1: String,
    #[serde(default)]
    compare_drug_2: String,
    #[serde(default)]
    compare_drug_3: String,
}

pub(crate) async fn compare_form() -> Result<Html<String>, RepurposerError> {
    Ok(Html(render::html::compare_page(&[], &now_rfc3339())?))
}

pub(crate) async fn compare(
    State(state): State<AppState>,
    Form(form): Form<CompareForm>,
) -> Result<Html<String>, RepurposerError> {
    let names = [
        form.compare_drug_1,
        form.compare_drug_2,
        form.compare_drug_3,
    ];

    let mut profiles = Vec::new();
    for name in names.iter().map(|n| n.trim()).filter(|n| !n.is_empty()) {
        profiles.push(state.profiles.lookup(name).await);
    }

    Ok(Html(render::html::compare_page(&profiles, &now_rfc3339())?))
}

#[derive(Deserialize)]
pub(crate) struct PdfRequest {
    #[serde(default)]
    drugs: Vec<DrugProfile>,
}

pub(crate) async fn generate_pdf(
    Json(request): Json<PdfRequest>,
) -> Result<Response, RepurposerError> {
    let bytes = render::pdf::report(&request.drugs)?;
    let filename = format!(
        "drug_repurposing_report_{}.pdf",
        OffsetDateTime::now_utc().unix_timestamp()
    );
    Ok((
        [
            (header::CONTENT_TYPE, "application/pdf".to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{filename}\""),
            ),
        ],
        bytes,
    )
        .into_response())
}

pub(crate) async fn clear_cache(State(state): State<AppState>) -> Json<serde_json::Value> {
    state.profiles.clear_caches();
    Json(serde_json::json!({ "status": "Cache cleared successfully" }))
}
