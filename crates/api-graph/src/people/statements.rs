//! Statements over the `:Person` / `:Movie` graph.

pub const RECOMMEND_FRIENDS_WITH_LIMIT: &str =
    "MATCH (u:Person)-[:KNOWS]->(f:Person)-[:KNOWS]->(fof:Person) \
    WHERE u.name = $name AND NOT (u)-[:KNOWS]->(fof) AND NOT u = fof \
    RETURN u.name AS me, fof.name AS names, count(fof.name) AS c \
    ORDER BY c DESC LIMIT $limit";

pub const MUTUAL_FRIENDS: &str =
    "MATCH (a:Person)-[:KNOWS]->(mutual:Person)<-[:KNOWS]-(b:Person) \
    WHERE a.name = $aName AND b.name = $bName \
    RETURN mutual.name AS names, count(*) AS c";

pub const MOVIE_CAST: &str = "MATCH (a:Person)-[:ACTED_IN]->(movie) \
    WHERE movie.title = $title \
    RETURN a.name AS name, a.born AS born";
