//! Client for the upstream article-search API.
//!
//! The API is consumed, not owned: one endpoint returns a JSON page of
//! article records plus a total-result count, and this module turns that
//! into the crate's [`Article`]/[`ArticlePage`] types.
//!
//! - [`client`] - HTTP client: request construction, auth, timeouts
//! - [`types`] - wire format and domain article records

mod client;
mod types;

pub use client::{FetchError, NewsClient};
pub use types::{Article, ArticlePage, SearchResponse, WireArticle, WireSource};
