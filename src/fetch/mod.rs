//! Retrieval of reader pages, metadata documents, and scrambled images
//!
//! All network access for the crate funnels through the [`HttpClient`]
//! trait so the pipeline can run against canned responses in tests.

/// HTTP client abstraction and the production reqwest implementation
pub mod client;
/// Download orchestration for one reader episode
pub mod episode;
/// Line-oriented scraping of reader pages
pub mod page;

pub use client::{HttpClient, WebClient};
pub use episode::{Episode, EpisodeFetcher, PageLink};
pub use page::ReaderPage;
