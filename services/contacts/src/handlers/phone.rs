use axum::extract::{RawQuery, State};
use serde::Deserialize;

use rolodex_auth_types::identity::Identity;
use rolodex_core::response::ApiResponse;

use crate::domain::types::Phone;
use crate::error::ContactsError;
use crate::handlers::{DeleteRequest, JsonBody, list_query};
use crate::state::AppState;
use crate::usecase::phone::{
    CreatePhoneInput, CreatePhoneUseCase, DeletePhoneUseCase, GetPhonesUseCase, UpdatePhoneInput,
    UpdatePhoneUseCase,
};

// ── POST /api/phones ─────────────────────────────────────────────────────────

#[derive(Deserialize, Default)]
#[serde(default)]
pub struct CreatePhoneRequest {
    pub name: String,
    pub number: String,
    pub person_id: Option<String>,
}

pub async fn create_phone(
    identity: Identity,
    State(state): State<AppState>,
    JsonBody(body): JsonBody<CreatePhoneRequest>,
) -> Result<ApiResponse<Phone>, ContactsError> {
    let usecase = CreatePhoneUseCase { db: state.db };
    let phone = usecase
        .execute(
            &identity.user_id,
            CreatePhoneInput {
                name: body.name,
                number: body.number,
                person_id: body.person_id,
            },
        )
        .await?;
    Ok(ApiResponse::created("Phone created successfully", phone))
}

// ── GET /api/phones ──────────────────────────────────────────────────────────

pub async fn get_phones(
    identity: Identity,
    State(state): State<AppState>,
    RawQuery(raw_query): RawQuery,
) -> Result<ApiResponse<Vec<Phone>>, ContactsError> {
    let query = list_query(raw_query)?;
    let usecase = GetPhonesUseCase { db: state.db };
    let listed = usecase.execute(&identity.user_id, query).await?;
    Ok(ApiResponse::page(
        "Phones fetched successfully",
        listed.items,
        listed.meta,
    ))
}

// ── PATCH /api/phones ────────────────────────────────────────────────────────

#[derive(Deserialize, Default)]
#[serde(default)]
pub struct UpdatePhoneRequest {
    pub id: String,
    pub name: Option<String>,
    pub number: Option<String>,
    pub person_id: Option<String>,
}

pub async fn update_phone(
    identity: Identity,
    State(state): State<AppState>,
    JsonBody(body): JsonBody<UpdatePhoneRequest>,
) -> Result<ApiResponse<Phone>, ContactsError> {
    let usecase = UpdatePhoneUseCase { db: state.db };
    let phone = usecase
        .execute(
            &identity.user_id,
            UpdatePhoneInput {
                id: body.id,
                name: body.name,
                number: body.number,
                person_id: body.person_id,
            },
        )
        .await?;
    Ok(ApiResponse::ok("Phone updated successfully", phone))
}

// ── DELETE /api/phones ───────────────────────────────────────────────────────

pub async fn delete_phone(
    identity: Identity,
    State(state): State<AppState>,
    JsonBody(body): JsonBody<DeleteRequest>,
) -> Result<ApiResponse<Phone>, ContactsError> {
    let usecase = DeletePhoneUseCase { db: state.db };
    let phone = usecase.execute(&identity.user_id, &body.id).await?;
    Ok(ApiResponse::ok("Phone deleted successfully", phone))
}
