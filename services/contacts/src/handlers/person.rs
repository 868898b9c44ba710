use axum::extract::{RawQuery, State};
use serde::Deserialize;

use rolodex_auth_types::identity::Identity;
use rolodex_core::response::ApiResponse;

use crate::domain::types::Person;
use crate::error::ContactsError;
use crate::handlers::{DeleteRequest, JsonBody, list_query};
use crate::state::AppState;
use crate::usecase::person::{
    CreatePersonInput, CreatePersonUseCase, DeletePersonUseCase, GetPersonsUseCase,
    UpdatePersonInput, UpdatePersonUseCase,
};

// ── POST /api/persons ────────────────────────────────────────────────────────

#[derive(Deserialize, Default)]
#[serde(default)]
pub struct CreatePersonRequest {
    pub first_name: String,
    pub last_name: Option<String>,
    pub nickname: Option<String>,
    pub avatar: Option<String>,
    pub description: Option<String>,
    pub tag_ids: Vec<String>,
    pub relationship_ids: Vec<String>,
}

pub async fn create_person(
    identity: Identity,
    State(state): State<AppState>,
    JsonBody(body): JsonBody<CreatePersonRequest>,
) -> Result<ApiResponse<Person>, ContactsError> {
    let usecase = CreatePersonUseCase { db: state.db };
    let person = usecase
        .execute(
            &identity.user_id,
            CreatePersonInput {
                first_name: body.first_name,
                last_name: body.last_name,
                nickname: body.nickname,
                avatar: body.avatar,
                description: body.description,
                tag_ids: body.tag_ids,
                relationship_ids: body.relationship_ids,
            },
        )
        .await?;
    Ok(ApiResponse::created("Person created successfully", person))
}

// ── GET /api/persons ─────────────────────────────────────────────────────────

pub async fn get_persons(
    identity: Identity,
    State(state): State<AppState>,
    RawQuery(raw_query): RawQuery,
) -> Result<ApiResponse<Vec<Person>>, ContactsError> {
    let query = list_query(raw_query)?;
    let usecase = GetPersonsUseCase { db: state.db };
    let listed = usecase.execute(&identity.user_id, query).await?;
    Ok(ApiResponse::page(
        "Persons fetched successfully",
        listed.items,
        listed.meta,
    ))
}

// ── PATCH /api/persons ───────────────────────────────────────────────────────

#[derive(Deserialize, Default)]
#[serde(default)]
pub struct UpdatePersonRequest {
    pub id: String,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub nickname: Option<String>,
    pub avatar: Option<String>,
    pub description: Option<String>,
    pub tag_ids: Vec<String>,
    pub relationship_ids: Vec<String>,
}

pub async fn update_person(
    identity: Identity,
    State(state): State<AppState>,
    JsonBody(body): JsonBody<UpdatePersonRequest>,
) -> Result<ApiResponse<Person>, ContactsError> {
    let usecase = UpdatePersonUseCase { db: state.db };
    let person = usecase
        .execute(
            &identity.user_id,
            UpdatePersonInput {
                id: body.id,
                first_name: body.first_name,
                last_name: body.last_name,
                nickname: body.nickname,
                avatar: body.avatar,
                description: body.description,
                tag_ids: body.tag_ids,
                relationship_ids: body.relationship_ids,
            },
        )
        .await?;
    Ok(ApiResponse::ok("Person updated successfully", person))
}

// ── DELETE /api/persons ──────────────────────────────────────────────────────

pub async fn delete_person(
    identity: Identity,
    State(state): State<AppState>,
    JsonBody(body): JsonBody<DeleteRequest>,
) -> Result<ApiResponse<Person>, ContactsError> {
    let usecase = DeletePersonUseCase { db: state.db };
    let person = usecase.execute(&identity.user_id, &body.id).await?;
    Ok(ApiResponse::ok("Person deleted successfully", person))
}
