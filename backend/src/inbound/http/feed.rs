//! Public feed handler.
//!
//! ```text
//! GET /api/public/feed?before=1700000000000000&userId=42
//! ```

use actix_web::{get, web};
use pagination::TimestampCursor;
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::domain::ports::{FeedPage, FeedPageRequest};
use crate::domain::UserId;
use crate::inbound::http::ApiResult;
use crate::inbound::http::auth::OptionalUser;
use crate::inbound::http::dto::EntryResponse;
use crate::inbound::http::schemas::ErrorSchema;
use crate::inbound::http::state::HttpState;

/// Raw feed query parameters.
///
/// Both are lenient: anything that is not a positive integer is ignored.
#[derive(Debug, Default, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct FeedParams {
    /// Only return entries created strictly before this Unix time in
    /// microseconds; defaults to now.
    pub before: Option<String>,
    /// Only return entries written by this user.
    pub user_id: Option<String>,
}

/// One page of the feed.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct FeedResponse {
    pub entries: Vec<EntryResponse>,
    /// The cursor this page was read with, in microseconds.
    #[schema(example = 1_700_000_000_000_000_i64)]
    pub query_timestamp_micro: i64,
    /// Whether another page may follow.
    pub more_results: bool,
}

impl From<FeedPage> for FeedResponse {
    fn from(page: FeedPage) -> Self {
        Self {
            entries: page.items().iter().map(EntryResponse::from).collect(),
            query_timestamp_micro: page.cursor().micros(),
            more_results: page.has_more(),
        }
    }
}

/// Browse entries newest first.
#[utoipa::path(
    get,
    path = "/api/public/feed",
    params(FeedParams),
    responses(
        (status = 200, description = "Feed page", body = FeedResponse),
        (status = 500, description = "Internal server error", body = ErrorSchema),
        (status = 503, description = "Storage unavailable", body = ErrorSchema)
    ),
    tags = ["feed"],
    operation_id = "getFeed",
    security([])
)]
#[get("/feed")]
pub async fn get_feed(
    state: web::Data<HttpState>,
    _caller: OptionalUser,
    params: web::Query<FeedParams>,
) -> ApiResult<web::Json<FeedResponse>> {
    let params = params.into_inner();
    let request = FeedPageRequest {
        before: TimestampCursor::parse_param(params.before.as_deref()),
        page_size: state.feed_page_size,
        author: UserId::parse_param(params.user_id.as_deref()),
    };
    let page = state.feed.page(request).await?;
    Ok(web::Json(page.into()))
}
