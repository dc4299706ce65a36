pub mod client;
pub mod collector;
pub mod error;
pub mod normalize;
pub mod officers;
pub mod retry;
pub mod social;
pub mod source;
pub mod types;

pub use client::{RegistryClient, PER_PAGE_MAX};
pub use collector::{collect_companies, CollectOptions};
pub use error::{ErrorKind, RegistryError};
pub use normalize::normalize_result;
pub use officers::natural_person_officers;
pub use retry::RetryPolicy;
pub use social::{
    google_search_url, linkedin_people_query, x_people_query, SocialCandidate,
    SocialSearchClient,
};
pub use source::PageSource;
pub use types::{Headquarters, Officer, SearchResponse, SearchResult};
