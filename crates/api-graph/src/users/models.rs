use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

/// A `:USER` node as returned by the user statements.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: Option<String>,
    pub name: Option<String>,
    pub email: Option<String>,
    pub role: Option<String>,
    pub hashed_password: Option<String>,
    pub salt: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct UsersParameters {
    /// Only return users with this email
    pub email: Option<String>,
}

#[derive(Debug, Clone, Copy, Deserialize)]
pub(crate) struct Deleted {
    pub deleted: u64,
}
