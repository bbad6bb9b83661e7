//! Wraps a caller-supplied half-query into the count and fetch statements.
//!
//! The half-query must select from `posts P` joined with `users U`; both
//! wrappers refer to those aliases.

use super::Fragment;

/// Number of posts per feed page.
pub const PAGE_SIZE: u64 = 10;

const FETCH_COLUMNS: &str = "SELECT DISTINCT P.id, P.user_id, P.title, P.body, P.image, \
P.created_at, P.modified_at, U.username AS author_name, U.image AS author_image, \
(SELECT COUNT(*) FROM likes L WHERE L.post_id = P.id AND L.is_like) AS likes, \
(SELECT COUNT(*) FROM likes L WHERE L.post_id = P.id AND NOT L.is_like) AS dislikes, \
COALESCE((SELECT CASE WHEN L.is_like THEN 'like' ELSE 'dislike' END \
FROM likes L WHERE L.post_id = P.id AND L.user_id = ";

/// Count the distinct posts matched by `fragment`.
pub fn compose_count(fragment: &Fragment) -> Fragment {
    Fragment::new("SELECT COUNT(*) AS total FROM (SELECT DISTINCT P.* ")
        .append(fragment)
        .push(") AS matched")
}

/// Fetch one page of posts matched by `fragment`, newest modification first.
///
/// Bind order is the viewer, then the fragment's own parameters, then the
/// offset. An anonymous viewer binds `NULL`, which never matches a reaction.
pub fn compose_fetch(fragment: &Fragment, viewer: Option<i64>, offset: i64, limit: u64) -> Fragment {
    Fragment::new(FETCH_COLUMNS)
        .bind(viewer)
        .push(" LIMIT 1), '') AS viewer_reaction ")
        .append(fragment)
        .push(format!(" ORDER BY P.modified_at DESC LIMIT {limit} OFFSET "))
        .bind(offset)
}
