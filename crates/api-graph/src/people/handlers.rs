use crate::error::ErrorResponse;
use crate::people::error::{self as people_error, PeopleResult};
use crate::people::models::{CastMember, DEFAULT_FRIENDS_LIMIT, Friend, FriendsParameters};
use crate::people::statements::{MOVIE_CAST, MUTUAL_FRIENDS, RECOMMEND_FRIENDS_WITH_LIMIT};
use crate::state::AppState;
use axum::{
    Json,
    extract::{Path, Query, State},
};
use core_executor::{QueryRequest, merge_handler};
use indexmap::IndexMap;
use snafu::ResultExt;
use utoipa::OpenApi;

pub const RECOMMEND_FRIENDS_QUERY: &str = "recommend-friend-with-limit";
pub const MUTUAL_FRIENDS_QUERY: &str = "mutual-friend";

#[derive(OpenApi)]
#[openapi(
    paths(get_friends, get_movie_cast),
    components(schemas(Friend, CastMember, ErrorResponse)),
    tags(
        (name = "people", description = "People and movies endpoints")
    )
)]
pub struct ApiDoc;

#[utoipa::path(
    get,
    operation_id = "getFriends",
    tags = ["people"],
    path = "/people/{name}/friends",
    params(
        ("name" = String, Path, description = "Person name"),
        FriendsParameters,
    ),
    responses(
        (status = 200, description = "Friend lists keyed by query name", body = Object),
        (status = 500, description = "Internal server error", body = ErrorResponse),
        (status = 504, description = "Database timeout", body = ErrorResponse),
    )
)]
#[tracing::instrument(level = "debug", skip(state), err, ret(level = tracing::Level::TRACE))]
pub async fn get_friends(
    State(state): State<AppState>,
    Path(name): Path<String>,
    Query(parameters): Query<FriendsParameters>,
) -> PeopleResult<Json<IndexMap<String, Vec<Friend>>>> {
    let mut requests: Vec<QueryRequest<Friend>> = vec![
        QueryRequest::new(RECOMMEND_FRIENDS_QUERY, RECOMMEND_FRIENDS_WITH_LIMIT)
            .with_param("name", name.as_str())
            .with_param("limit", parameters.limit.unwrap_or(DEFAULT_FRIENDS_LIMIT)),
    ];
    if let Some(other) = parameters.other {
        requests.push(
            QueryRequest::new(MUTUAL_FRIENDS_QUERY, MUTUAL_FRIENDS)
                .with_param("aName", other)
                .with_param("bName", name.as_str()),
        );
    }
    state
        .coordinator
        .run_concurrent_queries(requests, merge_handler)
        .await
        .context(people_error::FriendsSnafu)
        .map(Json)
}

#[utoipa::path(
    get,
    operation_id = "getMovieCast",
    tags = ["people"],
    path = "/movies/{title}/cast",
    params(
        ("title" = String, Path, description = "Movie title")
    ),
    responses(
        (status = 200, description = "Successful Response", body = Vec<CastMember>),
        (status = 500, description = "Internal server error", body = ErrorResponse),
    )
)]
#[tracing::instrument(level = "debug", skip(state), err, ret(level = tracing::Level::TRACE))]
pub async fn get_movie_cast(
    State(state): State<AppState>,
    Path(title): Path<String>,
) -> PeopleResult<Json<Vec<CastMember>>> {
    let request: QueryRequest<CastMember> =
        QueryRequest::new("movie-cast", MOVIE_CAST).with_param("title", title.as_str());
    state
        .coordinator
        .run_single_query(request)
        .await
        .context(people_error::CastSnafu)
        .map(|result| Json(result.payload))
}
