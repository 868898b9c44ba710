use axum::extract::{RawQuery, State};
use serde::Deserialize;

use rolodex_auth_types::identity::Identity;
use rolodex_core::response::ApiResponse;

use crate::domain::types::ImportantDate;
use crate::error::ContactsError;
use crate::handlers::{DeleteRequest, JsonBody, list_query};
use crate::state::AppState;
use crate::usecase::important_date::{
    CreateImportantDateInput, CreateImportantDateUseCase, DeleteImportantDateUseCase,
    GetImportantDatesUseCase, UpdateImportantDateInput, UpdateImportantDateUseCase,
};

// ── POST /api/importantdates ─────────────────────────────────────────────────

#[derive(Deserialize, Default)]
#[serde(default)]
pub struct CreateImportantDateRequest {
    pub name: String,
    pub date: String,
    pub person_id: Option<String>,
}

pub async fn create_important_date(
    identity: Identity,
    State(state): State<AppState>,
    JsonBody(body): JsonBody<CreateImportantDateRequest>,
) -> Result<ApiResponse<ImportantDate>, ContactsError> {
    let usecase = CreateImportantDateUseCase { db: state.db };
    let important_date = usecase
        .execute(
            &identity.user_id,
            CreateImportantDateInput {
                name: body.name,
                date: body.date,
                person_id: body.person_id,
            },
        )
        .await?;
    Ok(ApiResponse::created(
        "Important date created successfully",
        important_date,
    ))
}

// ── GET /api/importantdates ──────────────────────────────────────────────────

pub async fn get_important_dates(
    identity: Identity,
    State(state): State<AppState>,
    RawQuery(raw_query): RawQuery,
) -> Result<ApiResponse<Vec<ImportantDate>>, ContactsError> {
    let query = list_query(raw_query)?;
    let usecase = GetImportantDatesUseCase { db: state.db };
    let listed = usecase.execute(&identity.user_id, query).await?;
    Ok(ApiResponse::page(
        "Important dates fetched successfully",
        listed.items,
        listed.meta,
    ))
}

// ── PATCH /api/importantdates ────────────────────────────────────────────────

#[derive(Deserialize, Default)]
#[serde(default)]
pub struct UpdateImportantDateRequest {
    pub id: String,
    pub name: Option<String>,
    pub date: Option<String>,
    pub person_id: Option<String>,
}

pub async fn update_important_date(
    identity: Identity,
    State(state): State<AppState>,
    JsonBody(body): JsonBody<UpdateImportantDateRequest>,
) -> Result<ApiResponse<ImportantDate>, ContactsError> {
    let usecase = UpdateImportantDateUseCase { db: state.db };
    let important_date = usecase
        .execute(
            &identity.user_id,
            UpdateImportantDateInput {
                id: body.id,
                name: body.name,
                date: body.date,
                person_id: body.person_id,
            },
        )
        .await?;
    Ok(ApiResponse::ok(
        "Important date updated successfully",
        important_date,
    ))
}

// ── DELETE /api/importantdates ───────────────────────────────────────────────

pub async fn delete_important_date(
    identity: Identity,
    State(state): State<AppState>,
    JsonBody(body): JsonBody<DeleteRequest>,
) -> Result<ApiResponse<ImportantDate>, ContactsError> {
    let usecase = DeleteImportantDateUseCase { db: state.db };
    let important_date = usecase.execute(&identity.user_id, &body.id).await?;
    Ok(ApiResponse::ok(
        "Important date deleted successfully",
        important_date,
    ))
}
