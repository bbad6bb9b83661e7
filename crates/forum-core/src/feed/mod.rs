//! Feed assembly: page parsing, navigation links, enrichment.

mod age;
mod enricher;
mod pagination;
mod service;

#[cfg(test)]
mod tests;

pub use age::humanize_age;
pub use enricher::PostEnricher;
pub use pagination::{has_more, last_page, page_offset, page_url, parse_page, pagination_state};
pub use service::{FeedRequest, FeedService};
