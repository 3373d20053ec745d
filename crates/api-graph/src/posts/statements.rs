//! Cypher statements over `:POST` nodes and the `:CREATED` edge from their author.

pub const ALL_POSTS: &str = "MATCH (author:USER)-[r:CREATED]->(p:POST) \
    RETURN author.id, author.name, author.email, p.id AS id, p.title AS title, \
    p.type AS `type`, p.body AS body, p.status AS status, p.publishDate AS publishDate, \
    p.upvotes AS upvotes, p.downvotes AS downvotes, p.viewCount AS viewCount, \
    r.createTime AS createTime, p.lastModifiedDate AS lastModifiedDate";

pub const FIND_POST_BY_ID: &str = "MATCH (author:USER)-[r:CREATED]->(p:POST {id: $id}) \
    RETURN author.id, author.name, author.email, p.id AS id, p.title AS title, \
    p.type AS `type`, p.body AS body, p.status AS status, p.publishDate AS publishDate, \
    p.upvotes AS upvotes, p.downvotes AS downvotes, p.viewCount AS viewCount, \
    r.createTime AS createTime, p.lastModifiedDate AS lastModifiedDate";

pub const POSTS_BY_AUTHOR: &str = "MATCH (author:USER {id: $id})-[r:CREATED]->(p:POST) \
    RETURN author.id, author.name, author.email, p.id AS id, p.title AS title, \
    p.type AS `type`, p.body AS body, p.status AS status, p.publishDate AS publishDate, \
    p.upvotes AS upvotes, p.downvotes AS downvotes, p.viewCount AS viewCount, \
    r.createTime AS createTime, p.lastModifiedDate AS lastModifiedDate";

pub const FIND_POSTS_BY_PROPS: &str = "MATCH (author:USER)-[r:CREATED]->(p:POST) \
    WHERE all(k IN keys($props) WHERE p[k] = $props[k]) \
    RETURN author.id, author.name, author.email, p.id AS id, p.title AS title, \
    p.type AS `type`, p.body AS body, p.status AS status, p.publishDate AS publishDate, \
    p.upvotes AS upvotes, p.downvotes AS downvotes, p.viewCount AS viewCount, \
    r.createTime AS createTime, p.lastModifiedDate AS lastModifiedDate";

pub const CREATE_POST: &str = "MATCH (author:USER {id: $author}) \
    CREATE (author)-[r:CREATED {createTime: timestamp()}]->(p:POST) SET p = $props \
    RETURN author.id, author.name, author.email, p.id AS id, p.title AS title, \
    p.type AS `type`, p.body AS body, p.status AS status, p.publishDate AS publishDate, \
    p.upvotes AS upvotes, p.downvotes AS downvotes, p.viewCount AS viewCount, \
    r.createTime AS createTime, p.lastModifiedDate AS lastModifiedDate";

pub const UPDATE_POST: &str = "MATCH (author:USER)-[r:CREATED]->(p:POST {id: $id}) \
    SET p += $props, p.id = $id, p.lastModifiedDate = timestamp() \
    RETURN author.id, author.name, author.email, p.id AS id, p.title AS title, \
    p.type AS `type`, p.body AS body, p.status AS status, p.publishDate AS publishDate, \
    p.upvotes AS upvotes, p.downvotes AS downvotes, p.viewCount AS viewCount, \
    r.createTime AS createTime, p.lastModifiedDate AS lastModifiedDate";

pub const DELETE_POST: &str = "MATCH (p:POST {id: $id}) DETACH DELETE p \
    RETURN count(p) AS deleted";
