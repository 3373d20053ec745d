pub mod config;
pub mod error;
pub mod layers;
pub mod people;
pub mod posts;
pub mod router;
pub mod state;
pub mod test_server;
#[cfg(test)]
pub mod tests;
pub mod users;

use serde_json::{Map, Value};

/// Request body of the `*/query` endpoints and of create/update calls:
/// node properties as sent by the client.
pub type Properties = Map<String, Value>;
