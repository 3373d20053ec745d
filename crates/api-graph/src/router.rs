use crate::layers::add_request_metadata;
use crate::people::handlers::{ApiDoc as PeopleApiDoc, get_friends, get_movie_cast};
use crate::posts::handlers::{
    ApiDoc as PostsApiDoc, create_post, delete_post, get_post, list_posts, query_posts,
    update_post,
};
use crate::state::AppState;
use crate::users::handlers::{
    ApiDoc as UsersApiDoc, create_user, delete_user, get_user, get_user_overview, list_users,
    query_users, update_user,
};
use axum::routing::{get, post};
use axum::{Json, Router, middleware};
use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Graph API",
        description = "Users, posts and people over a Neo4j graph",
        version = "0.1.0",
    ),
    tags()
)]
pub struct ApiDoc;

#[must_use]
pub fn open_api_spec() -> utoipa::openapi::OpenApi {
    ApiDoc::openapi()
        .merge_from(UsersApiDoc::openapi())
        .merge_from(PostsApiDoc::openapi())
        .merge_from(PeopleApiDoc::openapi())
}

pub fn create_router() -> Router<AppState> {
    Router::new()
        .route("/users", get(list_users).post(create_user))
        .route("/users/query", post(query_users))
        .route(
            "/users/{id}",
            get(get_user).put(update_user).delete(delete_user),
        )
        .route("/users/{id}/overview", get(get_user_overview))
        .route("/posts", get(list_posts).post(create_post))
        .route("/posts/query", post(query_posts))
        .route(
            "/posts/{id}",
            get(get_post).put(update_post).delete(delete_post),
        )
        .route("/people/{name}/friends", get(get_friends))
        .route("/movies/{title}/cast", get(get_movie_cast))
        .route("/health", get(health))
        .route("/openapi.json", get(openapi_json))
        .layer(middleware::from_fn(add_request_metadata))
}

async fn health() -> &'static str {
    "OK"
}

async fn openapi_json() -> Json<utoipa::openapi::OpenApi> {
    Json(open_api_spec())
}
