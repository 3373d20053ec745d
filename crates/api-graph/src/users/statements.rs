//! Cypher statements over `:USER` nodes. Values are always bound as parameters.

pub const ALL_USERS: &str = "MATCH (u:USER) \
    RETURN u.id AS id, u.name AS name, u.email AS email, u.role AS role, \
    u.hashedPassword AS hashedPassword, u.salt AS salt";

pub const FIND_USER_BY_ID: &str = "MATCH (u:USER {id: $id}) \
    RETURN u.id AS id, u.name AS name, u.email AS email, u.role AS role, \
    u.hashedPassword AS hashedPassword, u.salt AS salt";

pub const FIND_USER_BY_EMAIL: &str = "MATCH (u:USER {email: $email}) \
    RETURN u.id AS id, u.name AS name, u.email AS email, u.role AS role, \
    u.hashedPassword AS hashedPassword, u.salt AS salt";

pub const FIND_USERS_BY_PROPS: &str = "MATCH (u:USER) \
    WHERE all(k IN keys($props) WHERE u[k] = $props[k]) \
    RETURN u.id AS id, u.name AS name, u.email AS email, u.role AS role, \
    u.hashedPassword AS hashedPassword, u.salt AS salt";

pub const CREATE_USER: &str = "CREATE (u:USER) SET u = $props \
    RETURN u.id AS id, u.name AS name, u.email AS email, u.role AS role, \
    u.hashedPassword AS hashedPassword, u.salt AS salt";

pub const UPSERT_USER: &str = "MERGE (u:USER {id: $id}) SET u = $props, u.id = $id \
    RETURN u.id AS id, u.name AS name, u.email AS email, u.role AS role, \
    u.hashedPassword AS hashedPassword, u.salt AS salt";

pub const DELETE_USER: &str = "MATCH (u:USER {id: $id}) DETACH DELETE u \
    RETURN count(u) AS deleted";
