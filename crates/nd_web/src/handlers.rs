use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use nd_core::{collection, Article};
use serde::Serialize;
use std::sync::Arc;
use tracing::error;

use crate::AppState;

#[derive(Serialize)]
pub struct NewsListing {
    pub articles: Vec<Article>,
    #[serde(rename = "totalResults")]
    pub total_results: usize,
}

#[derive(Serialize)]
pub struct ErrorBody {
    pub error: String,
    pub details: String,
}

/// Active articles only, newest first. A corrupt store surfaces here as a
/// 500 with an error object; the write paths heal it on their own schedule.
pub async fn list_all_news(State(state): State<Arc<AppState>>) -> Response {
    match state.store.load().await {
        Ok(collection) => {
            let articles = collection::list_active(&collection);
            let total_results = articles.len();
            Json(NewsListing {
                articles,
                total_results,
            })
            .into_response()
        }
        Err(err) => {
            error!("failed to read news data: {}", err);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorBody {
                    error: "Failed to read news data".to_string(),
                    details: err.to_string(),
                }),
            )
                .into_response()
        }
    }
}
