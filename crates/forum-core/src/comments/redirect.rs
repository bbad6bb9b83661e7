/// Page of a post; `post_id` is forwarded exactly as submitted.
pub fn post_path(post_id: &str) -> String {
    format!("/posts/{post_id}")
}

/// Path part of a `Referer` header: everything from the first `/` after the
/// host. Falls back to `/` when the header is missing or has no such path.
pub fn referer_path(referer: Option<&str>) -> String {
    referer
        .and_then(|r| {
            let (_, rest) = r.split_once("://")?;
            let idx = rest.find('/')?;
            Some(rest[idx..].to_string())
        })
        .unwrap_or_else(|| "/".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_referer_path() {
        assert_eq!(referer_path(Some("http://localhost:8080/posts/42?x=1")), "/posts/42?x=1");
        assert_eq!(referer_path(Some("https://forum.example")), "/");
        assert_eq!(referer_path(Some("/relative")), "/");
        assert_eq!(referer_path(Some("")), "/");
        assert_eq!(referer_path(None), "/");
    }

    #[test]
    fn test_post_path() {
        assert_eq!(post_path("42"), "/posts/42");
    }
}
