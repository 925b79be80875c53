//! Clients for the two Naver APIs kwlens talks to.
//!
//! [`SearchAdClient`] wraps the signed Search-Ad keyword tool; [`OpenApiClient`]
//! wraps the OpenAPI web/blog search (document totals) and the `DataLab`
//! search-trend endpoint. Both return typed [`NaverError`]s and never retry;
//! the caller decides whether a failure skips a unit of work or stops the run.

pub mod error;
pub mod normalize;
pub mod openapi;
pub mod searchad;
pub mod signer;
pub mod types;

pub use error::{ErrorKind, NaverError};
pub use normalize::{
    filter_min_volume, normalize_keyword_list, sort_by_total_search, NormalizedBatch,
};
pub use openapi::OpenApiClient;
pub use searchad::{RelatedKeywords, SearchAdClient};
pub use signer::{sign, SignedHeaders};
