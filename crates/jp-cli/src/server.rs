//! Read-only HTTP surface for rendering clients.

use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
};
use serde::{Deserialize, Serialize};
use tokio::sync::Mutex;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use jp_core::{
    Category, CivilDate, JourneyStats, THEMES, ThemeId, ThemeMeta, classify_parts, layout_journey,
};
use jp_store::{Config, Store, StoreError};

pub struct AppState {
    pub store: Mutex<Store>,
    pub config: Config,
    /// Fixed "today" for reproducible responses; `None` means the real date.
    pub today: Option<CivilDate>,
}

impl AppState {
    fn today(&self) -> CivilDate {
        self.today.unwrap_or_else(CivilDate::today_utc)
    }
}

pub type SharedState = Arc<AppState>;

pub fn create_router(state: SharedState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/api/themes", get(api_themes))
        .route("/api/classify", post(api_classify))
        .route("/api/users/{user}/journey", get(api_journey))
        .route("/api/users/{user}/stats", get(api_stats))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

#[derive(Debug)]
pub struct ApiError(StatusCode, String);

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.0, Json(serde_json::json!({ "error": self.1 }))).into_response()
    }
}

impl From<StoreError> for ApiError {
    fn from(e: StoreError) -> Self {
        tracing::error!("store error: {e}");
        ApiError(StatusCode::INTERNAL_SERVER_ERROR, e.to_string())
    }
}

pub async fn health() -> impl IntoResponse {
    "OK"
}

/// GET /api/themes
pub async fn api_themes() -> Json<&'static [ThemeMeta]> {
    Json(&THEMES)
}

#[derive(Debug, Deserialize)]
pub struct ClassifyRequest {
    #[serde(default)]
    pub category: Option<Category>,
    #[serde(default)]
    pub tags: Vec<String>,
}

#[derive(Debug, Serialize)]
pub struct ClassifyResponse {
    pub theme: ThemeId,
    pub meta: &'static ThemeMeta,
}

/// POST /api/classify
pub async fn api_classify(Json(req): Json<ClassifyRequest>) -> Json<ClassifyResponse> {
    let theme = classify_parts(req.category, &req.tags);
    Json(ClassifyResponse {
        theme,
        meta: theme.meta(),
    })
}

#[derive(Debug, Deserialize)]
pub struct JourneyQuery {
    pub width: Option<f64>,
}

/// Width of a typical phone screen in points.
const DEFAULT_WIDTH: f64 = 390.0;

/// GET /api/users/{user}/journey?width=
pub async fn api_journey(
    State(state): State<SharedState>,
    Path(user): Path<String>,
    Query(query): Query<JourneyQuery>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let width = query.width.unwrap_or(DEFAULT_WIDTH);
    if !width.is_finite() || width < 0.0 {
        return Err(ApiError(
            StatusCode::BAD_REQUEST,
            format!("width must be a non-negative number, got {width}"),
        ));
    }

    let days = state.store.lock().await.refresh(&user, state.today())?;
    if days.is_empty() {
        return Err(ApiError(StatusCode::NOT_FOUND, format!("no journey for {user}")));
    }

    let layout = layout_journey(&days, width, &state.config.layout);
    serde_json::to_value(&layout)
        .map(Json)
        .map_err(|e| ApiError(StatusCode::INTERNAL_SERVER_ERROR, e.to_string()))
}

/// GET /api/users/{user}/stats
pub async fn api_stats(
    State(state): State<SharedState>,
    Path(user): Path<String>,
) -> Result<Json<JourneyStats>, ApiError> {
    let days = state.store.lock().await.refresh(&user, state.today())?;
    if days.is_empty() {
        return Err(ApiError(StatusCode::NOT_FOUND, format!("no journey for {user}")));
    }
    Ok(Json(JourneyStats::compute(
        &days,
        state.config.journey.milestone_frequency,
    )))
}

#[cfg(test)]
mod tests {
    use super::*;
    use jp_store::JourneyPlan;

    fn d(s: &str) -> CivilDate {
        s.parse().unwrap()
    }

    fn make_state() -> SharedState {
        let store = Store::open_in_memory().unwrap();
        let plan = JourneyPlan {
            start: d("2026-07-01"),
            length: 14,
        };
        store.start_journey("amina", plan, d("2026-07-01")).unwrap();
        store.log_day("amina", d("2026-07-01"), None).unwrap();
        Arc::new(AppState {
            store: Mutex::new(store),
            config: Config::default(),
            today: Some(d("2026-07-03")),
        })
    }

    #[tokio::test]
    async fn test_journey_layout() {
        let state = make_state();
        let Json(body) = api_journey(
            State(state),
            Path("amina".to_string()),
            Query(JourneyQuery { width: Some(390.0) }),
        )
        .await
        .unwrap();

        assert_eq!(body["nodes"].as_array().unwrap().len(), 14);
        assert_eq!(body["nodes"][1]["day"]["status"], "missed");
        assert_eq!(body["nodes"][2]["day"]["status"], "today");
        assert_eq!(body["streak"], 1);
        assert!(body["path"].as_str().unwrap().starts_with("M "));
    }

    #[tokio::test]
    async fn test_journey_unknown_user() {
        let result = api_journey(
            State(make_state()),
            Path("ghost".to_string()),
            Query(JourneyQuery { width: None }),
        )
        .await;
        assert!(matches!(result, Err(ApiError(code, _)) if code == StatusCode::NOT_FOUND));
    }

    #[tokio::test]
    async fn test_journey_rejects_negative_width() {
        let result = api_journey(
            State(make_state()),
            Path("amina".to_string()),
            Query(JourneyQuery { width: Some(-1.0) }),
        )
        .await;
        assert!(matches!(result, Err(ApiError(code, _)) if code == StatusCode::BAD_REQUEST));
    }

    #[tokio::test]
    async fn test_stats() {
        let Json(stats) = api_stats(State(make_state()), Path("amina".to_string()))
            .await
            .unwrap();
        assert_eq!(stats.total, 14);
        assert_eq!(stats.logged, 1);
        assert_eq!(stats.missed, 1);
        assert_eq!(stats.current_streak, 1);
    }

    #[tokio::test]
    async fn test_classify() {
        let Json(resp) = api_classify(Json(ClassifyRequest {
            category: None,
            tags: vec!["FOOD".to_string(), "Eating".to_string()],
        }))
        .await;
        assert_eq!(resp.theme, ThemeId::FoodSunnah);
        assert_eq!(resp.meta.label, "Food & Drink");
    }

    #[tokio::test]
    async fn test_themes_lists_all_nine() {
        let Json(themes) = api_themes().await;
        assert_eq!(themes.len(), 9);
        assert_eq!(themes[8].id, ThemeId::DEFAULT);
    }

    #[test]
    fn test_router_builds() {
        let _router = create_router(make_state());
    }
}
