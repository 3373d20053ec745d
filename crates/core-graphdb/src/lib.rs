pub mod error;
pub mod graph_db;
pub mod memory;
pub mod neo4j;


pub use error::{GraphDbError, GraphDbResult};
pub use graph_db::{GraphDb, GraphResponse, Params};
pub use memory::{MemoryGraphDb, RecordedCall};
pub use neo4j::{Neo4jConfig, Neo4jHttpDb};
