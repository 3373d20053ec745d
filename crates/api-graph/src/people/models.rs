use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

pub const DEFAULT_FRIENDS_LIMIT: u32 = 5;

/// A suggested or shared friend with the number of paths leading to them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Friend {
    #[serde(rename = "names")]
    pub name: Option<String>,
    #[serde(rename = "c")]
    pub count: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct CastMember {
    pub name: Option<String>,
    pub born: Option<i64>,
}

#[derive(Debug, Clone, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct FriendsParameters {
    /// Also list friends shared with this person
    pub other: Option<String>,
    /// Maximum number of recommendations, 5 by default
    pub limit: Option<u32>,
}
