//! Domain entities - the core business objects.

mod category;
mod comment;
mod page;
mod post;

pub use category::Category;
pub use comment::{Comment, NewComment, TopComment};
pub use page::{FeedPage, PaginationState};
pub use post::{Post, PostRow, Reaction, UnknownReaction};
