use crate::Properties;
use crate::error::ErrorResponse;
use crate::posts::statements::POSTS_BY_AUTHOR;
use crate::state::AppState;
use crate::users::error::{self as users_error, UsersResult};
use crate::users::models::{Deleted, User, UsersParameters};
use crate::users::statements::{
    ALL_USERS, CREATE_USER, DELETE_USER, FIND_USER_BY_EMAIL, FIND_USER_BY_ID, FIND_USERS_BY_PROPS,
    UPSERT_USER,
};
use axum::{
    Json,
    extract::{Path, Query, State},
};
use core_executor::{QueryRequest, merge_handler};
use indexmap::IndexMap;
use serde_json::Value;
use snafu::{OptionExt, ResultExt, ensure};
use utoipa::OpenApi;
use uuid::Uuid;

#[derive(OpenApi)]
#[openapi(
    paths(
        list_users,
        get_user,
        query_users,
        create_user,
        update_user,
        delete_user,
        get_user_overview,
    ),
    components(schemas(User, ErrorResponse)),
    tags(
        (name = "users", description = "Users endpoints")
    )
)]
pub struct ApiDoc;

#[utoipa::path(
    get,
    operation_id = "getUsers",
    tags = ["users"],
    path = "/users",
    params(UsersParameters),
    responses(
        (status = 200, description = "Successful Response", body = Vec<User>),
        (status = 500, description = "Internal server error", body = ErrorResponse),
        (status = 504, description = "Database timeout", body = ErrorResponse),
    )
)]
#[tracing::instrument(level = "debug", skip(state), err, ret(level = tracing::Level::TRACE))]
pub async fn list_users(
    State(state): State<AppState>,
    Query(parameters): Query<UsersParameters>,
) -> UsersResult<Json<Vec<User>>> {
    let request: QueryRequest<User> = match parameters.email {
        Some(email) => {
            QueryRequest::new("find-user-by-email", FIND_USER_BY_EMAIL).with_param("email", email)
        }
        None => QueryRequest::new("all-users", ALL_USERS),
    };
    state
        .coordinator
        .run_single_query(request)
        .await
        .context(users_error::ListSnafu)
        .map(|result| Json(result.payload))
}

#[utoipa::path(
    get,
    operation_id = "getUser",
    tags = ["users"],
    path = "/users/{id}",
    params(
        ("id" = String, Path, description = "User id")
    ),
    responses(
        (status = 200, description = "Successful Response", body = User),
        (status = 404, description = "Not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse),
    )
)]
#[tracing::instrument(level = "debug", skip(state), err, ret(level = tracing::Level::TRACE))]
pub async fn get_user(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> UsersResult<Json<User>> {
    let request: QueryRequest<User> =
        QueryRequest::new("find-user-by-id", FIND_USER_BY_ID).with_param("id", id.as_str());
    let result = state
        .coordinator
        .run_single_query(request)
        .await
        .context(users_error::GetSnafu)?;
    result
        .payload
        .into_iter()
        .next()
        .map(Json)
        .context(users_error::NotFoundSnafu { id })
}

#[utoipa::path(
    post,
    operation_id = "queryUsers",
    tags = ["users"],
    path = "/users/query",
    request_body(content = Object, description = "Properties every returned user must match"),
    responses(
        (status = 200, description = "Successful Response", body = Vec<User>),
        (status = 400, description = "Bad request", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse),
    )
)]
#[tracing::instrument(level = "debug", skip(state), err, ret(level = tracing::Level::TRACE))]
pub async fn query_users(
    State(state): State<AppState>,
    Json(props): Json<Properties>,
) -> UsersResult<Json<Vec<User>>> {
    let request: QueryRequest<User> =
        QueryRequest::new("find-users-by-props", FIND_USERS_BY_PROPS).with_param("props", props);
    state
        .coordinator
        .run_single_query(request)
        .await
        .context(users_error::QuerySnafu)
        .map(|result| Json(result.payload))
}

#[utoipa::path(
    post,
    operation_id = "createUser",
    tags = ["users"],
    path = "/users",
    request_body(content = Object, description = "User properties; an id is generated when absent"),
    responses(
        (status = 200, description = "Successful Response", body = User),
        (status = 400, description = "Bad request", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse),
    )
)]
#[tracing::instrument(level = "debug", skip(state, props), err, ret(level = tracing::Level::TRACE))]
pub async fn create_user(
    State(state): State<AppState>,
    Json(mut props): Json<Properties>,
) -> UsersResult<Json<User>> {
    let id = match props.get("id") {
        Some(Value::String(id)) => id.clone(),
        Some(other) => other.to_string(),
        None => {
            let id = Uuid::new_v4().to_string();
            props.insert("id".to_string(), Value::String(id.clone()));
            id
        }
    };
    let request: QueryRequest<User> =
        QueryRequest::new("create-user", CREATE_USER).with_param("props", props);
    let result = state
        .coordinator
        .run_single_query(request)
        .await
        .context(users_error::CreateSnafu)?;
    result
        .payload
        .into_iter()
        .next()
        .map(Json)
        .context(users_error::NotReturnedSnafu { id })
}

#[utoipa::path(
    put,
    operation_id = "updateUser",
    tags = ["users"],
    path = "/users/{id}",
    params(
        ("id" = String, Path, description = "User id")
    ),
    request_body(content = Object, description = "Replacement user properties"),
    responses(
        (status = 200, description = "Successful Response", body = User),
        (status = 400, description = "Bad request", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse),
    )
)]
#[tracing::instrument(level = "debug", skip(state, props), err, ret(level = tracing::Level::TRACE))]
pub async fn update_user(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(props): Json<Properties>,
) -> UsersResult<Json<User>> {
    let request: QueryRequest<User> = QueryRequest::new("upsert-user", UPSERT_USER)
        .with_param("id", id.as_str())
        .with_param("props", props);
    let result = state
        .coordinator
        .run_single_query(request)
        .await
        .context(users_error::UpdateSnafu)?;
    result
        .payload
        .into_iter()
        .next()
        .map(Json)
        .context(users_error::NotFoundSnafu { id })
}

#[utoipa::path(
    delete,
    operation_id = "deleteUser",
    tags = ["users"],
    path = "/users/{id}",
    params(
        ("id" = String, Path, description = "User id")
    ),
    responses(
        (status = 200, description = "Successful Response"),
        (status = 404, description = "Not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse),
    )
)]
#[tracing::instrument(level = "debug", skip(state), err)]
pub async fn delete_user(State(state): State<AppState>, Path(id): Path<String>) -> UsersResult<()> {
    let request: QueryRequest<Deleted> =
        QueryRequest::new("delete-user", DELETE_USER).with_param("id", id.as_str());
    let result = state
        .coordinator
        .run_single_query(request)
        .await
        .context(users_error::DeleteSnafu)?;
    let deleted = result.payload.first().map_or(0, |row| row.deleted);
    ensure!(deleted > 0, users_error::NotFoundSnafu { id });
    Ok(())
}

#[utoipa::path(
    get,
    operation_id = "getUserOverview",
    tags = ["users"],
    path = "/users/{id}/overview",
    params(
        ("id" = String, Path, description = "User id")
    ),
    responses(
        (status = 200, description = "The user and their posts keyed by query name", body = Object),
        (status = 404, description = "Not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse),
        (status = 504, description = "Database timeout", body = ErrorResponse),
    )
)]
#[tracing::instrument(level = "debug", skip(state), err, ret(level = tracing::Level::TRACE))]
pub async fn get_user_overview(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> UsersResult<Json<IndexMap<String, Vec<Value>>>> {
    let requests: Vec<QueryRequest> = vec![
        QueryRequest::new("user", FIND_USER_BY_ID).with_param("id", id.as_str()),
        QueryRequest::new("posts", POSTS_BY_AUTHOR).with_param("id", id.as_str()),
    ];
    let overview = state
        .coordinator
        .run_concurrent_queries(requests, merge_handler)
        .await
        .context(users_error::OverviewSnafu)?;
    let found = overview.get("user").is_some_and(|user| !user.is_empty());
    ensure!(found, users_error::NotFoundSnafu { id });
    Ok(Json(overview))
}
