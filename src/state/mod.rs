//! State module for crawl targets and results
//!
//! # Components
//!
//! - `Target`: an address to fetch, with its home, depth budget and lineage
//! - `Depth`: remaining hop budget (limited or unlimited)
//! - `FetchResult`: outcome of fetching one target
//! - `CrawlResults`: successes and failures of a whole run

mod results;
mod target;

// Re-export main types
pub use results::{CrawlResults, FetchResult};
pub use target::{Depth, Target};
