//! User handlers.
//!
//! ```text
//! GET  /api/current-user
//! POST /api/users {"title":"Grumpy Reviewer","countryIsoAlpha2Code":"SG"}
//! PUT  /api/users {"title":"Calm Reviewer","countryIsoAlpha2Code":"MY"}
//! GET  /api/public/profiles/{userId}
//! ```

use actix_web::{HttpResponse, get, post, put, web};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::ports::{EditProfileRequest, RegisterUserRequest};
use crate::inbound::http::ApiResult;
use crate::inbound::http::auth::{CurrentUser, OptionalUser, VerifiedCaller};
use crate::inbound::http::dto::UserResponse;
use crate::inbound::http::schemas::ErrorSchema;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::parse_user_id;

/// Body for `POST /api/users` and `PUT /api/users`.
///
/// Example JSON:
/// `{"title":"Grumpy Reviewer","countryIsoAlpha2Code":"SG"}`
#[derive(Debug, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UserProfileBody {
    #[schema(example = "Grumpy Reviewer")]
    pub title: String,
    #[schema(example = "SG")]
    pub country_iso_alpha2_code: String,
}

impl From<UserProfileBody> for RegisterUserRequest {
    fn from(body: UserProfileBody) -> Self {
        Self {
            title: body.title,
            country_code: body.country_iso_alpha2_code,
        }
    }
}

impl From<UserProfileBody> for EditProfileRequest {
    fn from(body: UserProfileBody) -> Self {
        Self {
            title: body.title,
            country_code: body.country_iso_alpha2_code,
        }
    }
}

/// The caller's own profile.
#[utoipa::path(
    get,
    path = "/api/current-user",
    responses(
        (status = 200, description = "Current user", body = UserResponse),
        (status = 401, description = "Unauthorised", body = ErrorSchema),
        (status = 403, description = "Registration incomplete", body = ErrorSchema)
    ),
    tags = ["users"],
    operation_id = "getCurrentUser"
)]
#[get("/current-user")]
pub async fn current_user(CurrentUser(user): CurrentUser) -> web::Json<UserResponse> {
    web::Json(UserResponse::from(&user.summary()))
}

/// Complete registration for a verified identity.
#[utoipa::path(
    post,
    path = "/api/users",
    request_body = UserProfileBody,
    responses(
        (status = 201, description = "User registered", body = UserResponse),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 401, description = "Unauthorised", body = ErrorSchema),
        (status = 409, description = "Already registered or email in use", body = ErrorSchema)
    ),
    tags = ["users"],
    operation_id = "registerUser"
)]
#[post("/users")]
pub async fn register_user(
    state: web::Data<HttpState>,
    VerifiedCaller(identity): VerifiedCaller,
    payload: web::Json<UserProfileBody>,
) -> ApiResult<HttpResponse> {
    let user = state
        .users
        .register(&identity, payload.into_inner().into())
        .await?;
    Ok(HttpResponse::Created().json(UserResponse::from(&user.summary())))
}

/// Change the caller's title and country.
#[utoipa::path(
    put,
    path = "/api/users",
    request_body = UserProfileBody,
    responses(
        (status = 200, description = "Profile updated", body = UserResponse),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 401, description = "Unauthorised", body = ErrorSchema),
        (status = 403, description = "Registration incomplete", body = ErrorSchema)
    ),
    tags = ["users"],
    operation_id = "editUser"
)]
#[put("/users")]
pub async fn edit_user(
    state: web::Data<HttpState>,
    CurrentUser(user): CurrentUser,
    payload: web::Json<UserProfileBody>,
) -> ApiResult<web::Json<UserResponse>> {
    let updated = state
        .users
        .edit_profile(&user, payload.into_inner().into())
        .await?;
    Ok(web::Json(UserResponse::from(&updated.summary())))
}

/// Public profile of any user.
#[utoipa::path(
    get,
    path = "/api/public/profiles/{userId}",
    params(("userId" = i64, Path, description = "User identifier")),
    responses(
        (status = 200, description = "Profile", body = UserResponse),
        (status = 404, description = "Not found", body = ErrorSchema)
    ),
    tags = ["users"],
    operation_id = "getProfile",
    security([])
)]
#[get("/profiles/{user_id}")]
pub async fn get_profile(
    state: web::Data<HttpState>,
    _caller: OptionalUser,
    path: web::Path<String>,
) -> ApiResult<web::Json<UserResponse>> {
    let user_id = parse_user_id(&path.into_inner())?;
    let profile = state.users_query.profile(user_id).await?;
    Ok(web::Json(UserResponse::from(&profile)))
}
