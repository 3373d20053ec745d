use async_trait::async_trait;
use core_graphdb::{GraphDb, GraphDbResult, GraphResponse, Params};
use mockall::mock;

pub mod coordinator;

mock! {
    pub Db {}

    #[async_trait]
    impl GraphDb for Db {
        async fn run(&self, statement: &str, params: &Params) -> GraphDbResult<GraphResponse>;
    }
}

impl std::fmt::Debug for MockDb {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("MockDb")
    }
}
