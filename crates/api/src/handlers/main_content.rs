//! Handlers for the `/contenido-principal` resource (landing page media).
//!
//! Image and video payloads are stored without their data-URI prefix and
//! served with it; see [`techflow_core::media`].

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;
use techflow_core::error::CoreError;
use techflow_core::media::{decode_for_response, encode_for_storage, MediaKind};
use techflow_core::types::DbId;
use techflow_core::validation::{optional_text, require_text, MAX_TITLE_LEN};
use techflow_db::models::main_content::{MainContent, SaveMainContent};
use techflow_db::repositories::MainContentRepo;

use crate::error::{AppError, AppResult};
use crate::extract::{AppJson, AppPath};
use crate::middleware::rbac::{CanDeleteCatalog, CanEditCatalog};
use crate::response::DataResponse;
use crate::state::AppState;

/// Request body for `POST /contenido-principal` and `PUT /contenido-principal/{id}`.
#[derive(Debug, Deserialize)]
pub struct MainContentRequest {
    #[serde(rename = "titulo")]
    pub title: String,
    #[serde(rename = "descripcion", default)]
    pub description: Option<String>,
    #[serde(rename = "tipo")]
    pub kind: String,
    #[serde(rename = "url", default)]
    pub payload: Option<String>,
}

impl MainContentRequest {
    fn into_save(self) -> Result<SaveMainContent, CoreError> {
        let title = require_text("titulo", &self.title, MAX_TITLE_LEN)?;
        let kind: MediaKind = self.kind.parse()?;

        let payload = match self.payload.filter(|p| !p.is_empty()) {
            Some(raw) => Some(encode_for_storage(kind, &raw)?.to_string()),
            None => None,
        };

        Ok(SaveMainContent {
            title,
            description: optional_text(self.description),
            kind: kind.as_str().to_string(),
            payload,
        })
    }
}

/// Rebuild the client-facing payload of a stored row.
fn present(mut content: MainContent) -> MainContent {
    // Rows are constrained to known kinds; anything else is served as stored.
    let Ok(kind) = content.kind.parse::<MediaKind>() else {
        return content;
    };
    if let Some(stored) = content.payload.take() {
        content.payload = Some(decode_for_response(kind, &stored).into_owned());
    }
    content
}

/// GET /contenido-principal
pub async fn list_content(
    State(state): State<AppState>,
) -> AppResult<Json<DataResponse<Vec<MainContent>>>> {
    let rows = MainContentRepo::list(&state.pool).await?;
    Ok(Json(DataResponse {
        data: rows.into_iter().map(present).collect(),
    }))
}

/// GET /contenido-principal/{id}
pub async fn get_content(
    State(state): State<AppState>,
    AppPath(id): AppPath<DbId>,
) -> AppResult<Json<DataResponse<MainContent>>> {
    let content = MainContentRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "MainContent",
            id,
        }))?;
    Ok(Json(DataResponse {
        data: present(content),
    }))
}

/// POST /contenido-principal
pub async fn create_content(
    State(state): State<AppState>,
    CanEditCatalog(user): CanEditCatalog,
    AppJson(input): AppJson<MainContentRequest>,
) -> AppResult<(StatusCode, Json<DataResponse<MainContent>>)> {
    let save = input.into_save()?;
    let content = MainContentRepo::create(&state.pool, &save).await?;

    tracing::info!(
        content_id = content.id,
        kind = %content.kind,
        payload_bytes = content.payload.as_deref().map_or(0, str::len),
        user_id = user.user_id,
        "Main content created"
    );

    Ok((
        StatusCode::CREATED,
        Json(DataResponse {
            data: present(content),
        }),
    ))
}

/// PUT /contenido-principal/{id}
pub async fn update_content(
    State(state): State<AppState>,
    CanEditCatalog(user): CanEditCatalog,
    AppPath(id): AppPath<DbId>,
    AppJson(input): AppJson<MainContentRequest>,
) -> AppResult<Json<DataResponse<MainContent>>> {
    let save = input.into_save()?;
    let content = MainContentRepo::update(&state.pool, id, &save)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "MainContent",
            id,
        }))?;

    tracing::info!(content_id = id, user_id = user.user_id, "Main content updated");

    Ok(Json(DataResponse {
        data: present(content),
    }))
}

/// DELETE /contenido-principal/{id}
pub async fn delete_content(
    State(state): State<AppState>,
    CanDeleteCatalog(user): CanDeleteCatalog,
    AppPath(id): AppPath<DbId>,
) -> AppResult<StatusCode> {
    if !MainContentRepo::delete(&state.pool, id).await? {
        return Err(AppError::Core(CoreError::NotFound {
            entity: "MainContent",
            id,
        }));
    }

    tracing::info!(content_id = id, user_id = user.user_id, "Main content deleted");
    Ok(StatusCode::NO_CONTENT)
}
