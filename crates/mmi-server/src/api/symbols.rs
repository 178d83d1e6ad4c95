use axum::{
    extract::State,
    Extension, Json,
};
use serde::{Deserialize, Serialize};

use crate::middleware::RequestId;

use super::extract::ApiQuery;
use super::{normalize_limit, ApiResponse, AppState, ResponseMeta};

#[derive(Debug, Serialize)]
pub(super) struct SymbolItem {
    pub name: String,
    pub ticker: String,
}

#[derive(Debug, Deserialize)]
pub(super) struct SymbolsQuery {
    pub q: Option<String>,
    pub limit: Option<i64>,
}

pub(super) async fn list_symbols(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    ApiQuery(query): ApiQuery<SymbolsQuery>,
) -> Json<ApiResponse<Vec<SymbolItem>>> {
    let limit = normalize_limit(query.limit);
    let data = state
        .analyzer
        .symbols()
        .search(query.q.as_deref().unwrap_or_default(), limit)
        .into_iter()
        .map(|s| SymbolItem {
            name: s.name.clone(),
            ticker: s.ticker.clone(),
        })
        .collect();

    Json(ApiResponse {
        data,
        meta: ResponseMeta::new(req_id.0),
    })
}
