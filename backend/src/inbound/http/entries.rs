//! Entry handlers.
//!
//! ```text
//! POST /api/entries {"textContent":"...","rageLevel":14}
//! GET  /api/entries/{entryId}
//! PUT  /api/entries/{entryId} {"textContent":"..."}
//! ```

use actix_web::{HttpResponse, get, post, put, web};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::ports::{CreateEntryRequest, EditEntryRequest};
use crate::inbound::http::ApiResult;
use crate::inbound::http::auth::CurrentUser;
use crate::inbound::http::dto::EntryResponse;
use crate::inbound::http::schemas::ErrorSchema;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::parse_entry_id;

/// Body for `POST /api/entries`.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateEntryBody {
    #[schema(example = "Standup ran for ninety minutes.")]
    pub text_content: String,
    /// Raw score; the server picks the anger tier from it.
    #[schema(example = 14)]
    pub rage_level: i32,
}

/// Body for `PUT /api/entries/{entryId}`.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct EditEntryBody {
    pub text_content: String,
}

/// Post a new entry as the current user.
#[utoipa::path(
    post,
    path = "/api/entries",
    request_body = CreateEntryBody,
    responses(
        (status = 201, description = "Entry created", body = EntryResponse),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 401, description = "Unauthorised", body = ErrorSchema),
        (status = 403, description = "Registration incomplete", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["entries"],
    operation_id = "createEntry"
)]
#[post("/entries")]
pub async fn create_entry(
    state: web::Data<HttpState>,
    CurrentUser(author): CurrentUser,
    payload: web::Json<CreateEntryBody>,
) -> ApiResult<HttpResponse> {
    let CreateEntryBody {
        text_content,
        rage_level,
    } = payload.into_inner();
    let entry = state
        .entries
        .create_entry(
            &author,
            CreateEntryRequest {
                text: text_content,
                rage_level,
            },
        )
        .await?;
    Ok(HttpResponse::Created().json(EntryResponse::from(&entry)))
}

/// Fetch a single entry.
#[utoipa::path(
    get,
    path = "/api/entries/{entryId}",
    params(("entryId" = i64, Path, description = "Entry identifier")),
    responses(
        (status = 200, description = "Entry", body = EntryResponse),
        (status = 401, description = "Unauthorised", body = ErrorSchema),
        (status = 403, description = "Registration incomplete", body = ErrorSchema),
        (status = 404, description = "Not found", body = ErrorSchema)
    ),
    tags = ["entries"],
    operation_id = "getEntry"
)]
#[get("/entries/{entry_id}")]
pub async fn get_entry(
    state: web::Data<HttpState>,
    _caller: CurrentUser,
    path: web::Path<String>,
) -> ApiResult<web::Json<EntryResponse>> {
    let entry_id = parse_entry_id(&path.into_inner())?;
    let entry = state.entries_query.get_entry(entry_id).await?;
    Ok(web::Json(EntryResponse::from(&entry)))
}

/// Replace the text of one of the caller's entries.
#[utoipa::path(
    put,
    path = "/api/entries/{entryId}",
    params(("entryId" = i64, Path, description = "Entry identifier")),
    request_body = EditEntryBody,
    responses(
        (status = 200, description = "Entry updated", body = EntryResponse),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 401, description = "Unauthorised", body = ErrorSchema),
        (status = 403, description = "Not the author", body = ErrorSchema),
        (status = 404, description = "Not found", body = ErrorSchema)
    ),
    tags = ["entries"],
    operation_id = "editEntry"
)]
#[put("/entries/{entry_id}")]
pub async fn edit_entry(
    state: web::Data<HttpState>,
    CurrentUser(editor): CurrentUser,
    path: web::Path<String>,
    payload: web::Json<EditEntryBody>,
) -> ApiResult<web::Json<EntryResponse>> {
    let entry_id = parse_entry_id(&path.into_inner())?;
    let entry = state
        .entries
        .edit_entry(
            &editor,
            EditEntryRequest {
                entry_id,
                text: payload.into_inner().text_content,
            },
        )
        .await?;
    Ok(web::Json(EntryResponse::from(&entry)))
}
