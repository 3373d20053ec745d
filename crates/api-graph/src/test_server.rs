use crate::config::WebConfig;
use crate::layers::make_cors_middleware;
use crate::router;
use crate::state::AppState;
use axum::Router;
use core_executor::QueryCoordinator;
use core_executor::utils::Config;
use core_graphdb::GraphDb;
use std::net::SocketAddr;
use std::sync::Arc;

#[allow(clippy::unwrap_used)]
pub async fn run_test_server_with_config(db: Arc<dyn GraphDb>, config: Config) -> SocketAddr {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    let app = make_app(
        db,
        Arc::new(config),
        &WebConfig {
            port: 3000,
            host: "127.0.0.1".to_string(),
            allow_origin: None,
        },
    )
    .unwrap()
    .into_make_service_with_connect_info::<SocketAddr>();

    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    addr
}

pub async fn run_test_server(db: Arc<dyn GraphDb>) -> SocketAddr {
    run_test_server_with_config(db, Config::default()).await
}

pub fn make_app(
    db: Arc<dyn GraphDb>,
    execution_config: Arc<Config>,
    config: &WebConfig,
) -> Result<Router, Box<dyn std::error::Error>> {
    let coordinator = Arc::new(QueryCoordinator::new(db, execution_config));
    let app_state = AppState::new(coordinator);

    let mut router = router::create_router().with_state(app_state);
    if let Some(allow_origin) = config.allow_origin.as_ref() {
        router = router.layer(make_cors_middleware(allow_origin)?);
    }

    Ok(router)
}
