pub mod app_config;
pub mod bands;
pub mod cache;
pub mod config;
pub mod error;
pub mod filters;
pub mod packs;
pub mod pagination;
pub mod records;
pub mod search;

pub use app_config::{AppConfig, SearchProvider};
pub use bands::employee_band_label;
pub use cache::{CacheKey, RecordCache};
pub use config::{load_app_config, load_app_config_from_env};
pub use error::{CacheError, ConfigError, PaginationError};
pub use filters::{years_ago, EmployerFilter};
pub use packs::{
    get_query_pack, load_query_packs, normalize_activity_codes, QueryPack, SearchOverrides,
};
pub use pagination::paginate;
pub use records::{CompanyRecord, Country, SEARCH_SOURCE};
pub use search::SearchRequest;
