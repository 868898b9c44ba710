use axum::extract::{RawQuery, State};
use serde::Deserialize;

use rolodex_auth_types::identity::Identity;
use rolodex_core::response::ApiResponse;

use crate::domain::types::Tag;
use crate::error::ContactsError;
use crate::handlers::{DeleteRequest, JsonBody, list_query};
use crate::state::AppState;
use crate::usecase::tag::{
    CreateTagInput, CreateTagUseCase, DeleteTagUseCase, GetTagsUseCase, UpdateTagInput,
    UpdateTagUseCase,
};

// ── POST /api/tags ───────────────────────────────────────────────────────────

#[derive(Deserialize, Default)]
#[serde(default)]
pub struct CreateTagRequest {
    pub name: String,
    pub person_ids: Vec<String>,
}

pub async fn create_tag(
    identity: Identity,
    State(state): State<AppState>,
    JsonBody(body): JsonBody<CreateTagRequest>,
) -> Result<ApiResponse<Tag>, ContactsError> {
    let usecase = CreateTagUseCase { db: state.db };
    let tag = usecase
        .execute(
            &identity.user_id,
            CreateTagInput {
                name: body.name,
                person_ids: body.person_ids,
            },
        )
        .await?;
    Ok(ApiResponse::created("Tag created successfully", tag))
}

// ── GET /api/tags ────────────────────────────────────────────────────────────

pub async fn get_tags(
    identity: Identity,
    State(state): State<AppState>,
    RawQuery(raw_query): RawQuery,
) -> Result<ApiResponse<Vec<Tag>>, ContactsError> {
    let query = list_query(raw_query)?;
    let usecase = GetTagsUseCase { db: state.db };
    let listed = usecase.execute(&identity.user_id, query).await?;
    Ok(ApiResponse::page(
        "Tags fetched successfully",
        listed.items,
        listed.meta,
    ))
}

// ── PATCH /api/tags ──────────────────────────────────────────────────────────

#[derive(Deserialize, Default)]
#[serde(default)]
pub struct UpdateTagRequest {
    pub id: String,
    pub name: Option<String>,
    pub person_ids: Vec<String>,
}

pub async fn update_tag(
    identity: Identity,
    State(state): State<AppState>,
    JsonBody(body): JsonBody<UpdateTagRequest>,
) -> Result<ApiResponse<Tag>, ContactsError> {
    let usecase = UpdateTagUseCase { db: state.db };
    let tag = usecase
        .execute(
            &identity.user_id,
            UpdateTagInput {
                id: body.id,
                name: body.name,
                person_ids: body.person_ids,
            },
        )
        .await?;
    Ok(ApiResponse::ok("Tag updated successfully", tag))
}

// ── DELETE /api/tags ─────────────────────────────────────────────────────────

pub async fn delete_tag(
    identity: Identity,
    State(state): State<AppState>,
    JsonBody(body): JsonBody<DeleteRequest>,
) -> Result<ApiResponse<Tag>, ContactsError> {
    let usecase = DeleteTagUseCase { db: state.db };
    let tag = usecase.execute(&identity.user_id, &body.id).await?;
    Ok(ApiResponse::ok("Tag deleted successfully", tag))
}
