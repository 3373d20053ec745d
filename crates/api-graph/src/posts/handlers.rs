use crate::Properties;
use crate::error::ErrorResponse;
use crate::posts::error::{self as posts_error, PostsResult};
use crate::posts::models::Post;
use crate::posts::statements::{
    ALL_POSTS, CREATE_POST, DELETE_POST, FIND_POST_BY_ID, FIND_POSTS_BY_PROPS, UPDATE_POST,
};
use crate::state::AppState;
use crate::users::models::Deleted;
use axum::{
    Json,
    extract::{Path, State},
};
use core_executor::QueryRequest;
use serde_json::Value;
use snafu::{OptionExt, ResultExt, ensure};
use utoipa::OpenApi;
use uuid::Uuid;

#[derive(OpenApi)]
#[openapi(
    paths(list_posts, get_post, query_posts, create_post, update_post, delete_post),
    components(schemas(Post, ErrorResponse)),
    tags(
        (name = "posts", description = "Posts endpoints")
    )
)]
pub struct ApiDoc;

#[utoipa::path(
    get,
    operation_id = "getPosts",
    tags = ["posts"],
    path = "/posts",
    responses(
        (status = 200, description = "Successful Response", body = Vec<Post>),
        (status = 500, description = "Internal server error", body = ErrorResponse),
        (status = 504, description = "Database timeout", body = ErrorResponse),
    )
)]
#[tracing::instrument(level = "debug", skip(state), err, ret(level = tracing::Level::TRACE))]
pub async fn list_posts(State(state): State<AppState>) -> PostsResult<Json<Vec<Post>>> {
    let request: QueryRequest<Post> = QueryRequest::new("all-posts", ALL_POSTS);
    state
        .coordinator
        .run_single_query(request)
        .await
        .context(posts_error::ListSnafu)
        .map(|result| Json(result.payload))
}

#[utoipa::path(
    get,
    operation_id = "getPost",
    tags = ["posts"],
    path = "/posts/{id}",
    params(
        ("id" = String, Path, description = "Post id")
    ),
    responses(
        (status = 200, description = "Successful Response", body = Post),
        (status = 404, description = "Not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse),
    )
)]
#[tracing::instrument(level = "debug", skip(state), err, ret(level = tracing::Level::TRACE))]
pub async fn get_post(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> PostsResult<Json<Post>> {
    let request: QueryRequest<Post> =
        QueryRequest::new("find-post-by-id", FIND_POST_BY_ID).with_param("id", id.as_str());
    let result = state
        .coordinator
        .run_single_query(request)
        .await
        .context(posts_error::GetSnafu)?;
    result
        .payload
        .into_iter()
        .next()
        .map(Json)
        .context(posts_error::NotFoundSnafu { id })
}

#[utoipa::path(
    post,
    operation_id = "queryPosts",
    tags = ["posts"],
    path = "/posts/query",
    request_body(content = Object, description = "Properties every returned post must match"),
    responses(
        (status = 200, description = "Successful Response", body = Vec<Post>),
        (status = 400, description = "Bad request", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse),
    )
)]
#[tracing::instrument(level = "debug", skip(state), err, ret(level = tracing::Level::TRACE))]
pub async fn query_posts(
    State(state): State<AppState>,
    Json(props): Json<Properties>,
) -> PostsResult<Json<Vec<Post>>> {
    let request: QueryRequest<Post> =
        QueryRequest::new("find-posts-by-props", FIND_POSTS_BY_PROPS).with_param("props", props);
    state
        .coordinator
        .run_single_query(request)
        .await
        .context(posts_error::QuerySnafu)
        .map(|result| Json(result.payload))
}

#[utoipa::path(
    post,
    operation_id = "createPost",
    tags = ["posts"],
    path = "/posts",
    request_body(
        content = Object,
        description = "Post properties plus `author`, the id of the creating user"
    ),
    responses(
        (status = 200, description = "Successful Response", body = Post),
        (status = 400, description = "Bad request", body = ErrorResponse),
        (status = 404, description = "Author not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse),
    )
)]
#[tracing::instrument(level = "debug", skip(state, props), err, ret(level = tracing::Level::TRACE))]
pub async fn create_post(
    State(state): State<AppState>,
    Json(mut props): Json<Properties>,
) -> PostsResult<Json<Post>> {
    let author = match props.remove("author") {
        Some(Value::String(author)) if !author.is_empty() => author,
        _ => return posts_error::MissingAuthorSnafu.fail(),
    };
    props
        .entry("id")
        .or_insert_with(|| Value::String(Uuid::new_v4().to_string()));

    let request: QueryRequest<Post> = QueryRequest::new("create-post", CREATE_POST)
        .with_param("author", author.as_str())
        .with_param("props", props);
    let result = state
        .coordinator
        .run_single_query(request)
        .await
        .context(posts_error::CreateSnafu)?;
    result
        .payload
        .into_iter()
        .next()
        .map(Json)
        .context(posts_error::AuthorNotFoundSnafu { id: author })
}

#[utoipa::path(
    put,
    operation_id = "updatePost",
    tags = ["posts"],
    path = "/posts/{id}",
    params(
        ("id" = String, Path, description = "Post id")
    ),
    request_body(content = Object, description = "Post properties to set"),
    responses(
        (status = 200, description = "Successful Response", body = Post),
        (status = 400, description = "Bad request", body = ErrorResponse),
        (status = 404, description = "Not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse),
    )
)]
#[tracing::instrument(level = "debug", skip(state, props), err, ret(level = tracing::Level::TRACE))]
pub async fn update_post(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(mut props): Json<Properties>,
) -> PostsResult<Json<Post>> {
    // authorship is fixed at creation
    props.remove("author");
    let request: QueryRequest<Post> = QueryRequest::new("update-post", UPDATE_POST)
        .with_param("id", id.as_str())
        .with_param("props", props);
    let result = state
        .coordinator
        .run_single_query(request)
        .await
        .context(posts_error::UpdateSnafu)?;
    result
        .payload
        .into_iter()
        .next()
        .map(Json)
        .context(posts_error::NotFoundSnafu { id })
}

#[utoipa::path(
    delete,
    operation_id = "deletePost",
    tags = ["posts"],
    path = "/posts/{id}",
    params(
        ("id" = String, Path, description = "Post id")
    ),
    responses(
        (status = 200, description = "Successful Response"),
        (status = 404, description = "Not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse),
    )
)]
#[tracing::instrument(level = "debug", skip(state), err)]
pub async fn delete_post(State(state): State<AppState>, Path(id): Path<String>) -> PostsResult<()> {
    let request: QueryRequest<Deleted> =
        QueryRequest::new("delete-post", DELETE_POST).with_param("id", id.as_str());
    let result = state
        .coordinator
        .run_single_query(request)
        .await
        .context(posts_error::DeleteSnafu)?;
    let deleted = result.payload.first().map_or(0, |row| row.deleted);
    ensure!(deleted > 0, posts_error::NotFoundSnafu { id });
    Ok(())
}
