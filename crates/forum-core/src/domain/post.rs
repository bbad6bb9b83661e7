use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::{Category, TopComment};

/// The viewer's own reaction to a post.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Reaction {
    #[default]
    None,
    Like,
    Dislike,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownReaction(pub String);

impl fmt::Display for UnknownReaction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown reaction {:?}", self.0)
    }
}

impl std::error::Error for UnknownReaction {}

impl FromStr for Reaction {
    type Err = UnknownReaction;

    /// Parses the storage sentinel: empty means the viewer has not reacted.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "" => Ok(Reaction::None),
            "like" => Ok(Reaction::Like),
            "dislike" => Ok(Reaction::Dislike),
            other => Err(UnknownReaction(other.to_string())),
        }
    }
}

/// A post row as returned by the paginated fetch, before enrichment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PostRow {
    pub id: i64,
    pub user_id: i64,
    pub title: String,
    pub body: String,
    pub image: Option<String>,
    pub created_at: i64,
    pub modified_at: i64,
    pub author_name: String,
    pub author_image: Option<String>,
    pub likes: i64,
    pub dislikes: i64,
    pub viewer_reaction: Reaction,
}

/// Post entity - a fully assembled feed entry.
///
/// Built once per feed request and never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Post {
    pub id: i64,
    pub user_id: i64,
    pub title: String,
    pub body: String,
    pub image: Option<String>,
    pub created_at: i64,
    pub modified_at: i64,
    pub author_name: String,
    pub author_image: Option<String>,
    pub likes: i64,
    pub dislikes: i64,
    pub viewer_reaction: Reaction,
    pub age: String,
    pub categories: Vec<Category>,
    pub top_comment: Option<TopComment>,
}

impl Post {
    /// Assemble a post from its fetched row and enrichment results.
    pub fn assemble(
        row: PostRow,
        age: String,
        categories: Vec<Category>,
        top_comment: Option<TopComment>,
    ) -> Self {
        Self {
            id: row.id,
            user_id: row.user_id,
            title: row.title,
            body: row.body,
            image: row.image,
            created_at: row.created_at,
            modified_at: row.modified_at,
            author_name: row.author_name,
            author_image: row.author_image,
            likes: row.likes,
            dislikes: row.dislikes,
            viewer_reaction: row.viewer_reaction,
            age,
            categories,
            top_comment,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reaction_sentinel() {
        assert_eq!("".parse::<Reaction>(), Ok(Reaction::None));
        assert_eq!("like".parse::<Reaction>(), Ok(Reaction::Like));
        assert_eq!("dislike".parse::<Reaction>(), Ok(Reaction::Dislike));
        assert!("meh".parse::<Reaction>().is_err());
    }
}
