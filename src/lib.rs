//! Issue-tracker providers behind a uniform fetch contract, normalizing
//! tracker records into branch-name-ready issues.

pub mod config;
pub mod model;
pub mod providers;
pub mod util;

pub use model::issue::Issue;
pub use providers::error::ProviderError;
pub use providers::IssueProvider;
