use axum::extract::{RawQuery, State};
use serde::Deserialize;

use rolodex_auth_types::identity::Identity;
use rolodex_core::response::ApiResponse;

use crate::domain::types::Relationship;
use crate::error::ContactsError;
use crate::handlers::{DeleteRequest, JsonBody, list_query};
use crate::state::AppState;
use crate::usecase::relationship::{
    CreateRelationshipInput, CreateRelationshipUseCase, DeleteRelationshipUseCase,
    GetRelationshipsUseCase, UpdateRelationshipInput, UpdateRelationshipUseCase,
};

// ── POST /api/relationships ──────────────────────────────────────────────────

#[derive(Deserialize, Default)]
#[serde(default)]
pub struct CreateRelationshipRequest {
    pub name: String,
    pub color: Option<String>,
    pub person_ids: Vec<String>,
}

pub async fn create_relationship(
    identity: Identity,
    State(state): State<AppState>,
    JsonBody(body): JsonBody<CreateRelationshipRequest>,
) -> Result<ApiResponse<Relationship>, ContactsError> {
    let usecase = CreateRelationshipUseCase { db: state.db };
    let relationship = usecase
        .execute(
            &identity.user_id,
            CreateRelationshipInput {
                name: body.name,
                color: body.color,
                person_ids: body.person_ids,
            },
        )
        .await?;
    Ok(ApiResponse::created(
        "Relationship created successfully",
        relationship,
    ))
}

// ── GET /api/relationships ───────────────────────────────────────────────────

pub async fn get_relationships(
    identity: Identity,
    State(state): State<AppState>,
    RawQuery(raw_query): RawQuery,
) -> Result<ApiResponse<Vec<Relationship>>, ContactsError> {
    let query = list_query(raw_query)?;
    let usecase = GetRelationshipsUseCase { db: state.db };
    let listed = usecase.execute(&identity.user_id, query).await?;
    Ok(ApiResponse::page(
        "Relationships fetched successfully",
        listed.items,
        listed.meta,
    ))
}

// ── PATCH /api/relationships ─────────────────────────────────────────────────

#[derive(Deserialize, Default)]
#[serde(default)]
pub struct UpdateRelationshipRequest {
    pub id: String,
    pub name: Option<String>,
    pub color: Option<String>,
    pub person_ids: Vec<String>,
}

pub async fn update_relationship(
    identity: Identity,
    State(state): State<AppState>,
    JsonBody(body): JsonBody<UpdateRelationshipRequest>,
) -> Result<ApiResponse<Relationship>, ContactsError> {
    let usecase = UpdateRelationshipUseCase { db: state.db };
    let relationship = usecase
        .execute(
            &identity.user_id,
            UpdateRelationshipInput {
                id: body.id,
                name: body.name,
                color: body.color,
                person_ids: body.person_ids,
            },
        )
        .await?;
    Ok(ApiResponse::ok(
        "Relationship updated successfully",
        relationship,
    ))
}

// ── DELETE /api/relationships ────────────────────────────────────────────────

pub async fn delete_relationship(
    identity: Identity,
    State(state): State<AppState>,
    JsonBody(body): JsonBody<DeleteRequest>,
) -> Result<ApiResponse<Relationship>, ContactsError> {
    let usecase = DeleteRelationshipUseCase { db: state.db };
    let relationship = usecase.execute(&identity.user_id, &body.id).await?;
    Ok(ApiResponse::ok(
        "Relationship deleted successfully",
        relationship,
    ))
}
