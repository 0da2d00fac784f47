pub mod agility;
pub mod error;
pub mod wire;

use std::collections::HashMap;

use async_trait::async_trait;

use crate::config::AppConfig;
use crate::model::issue::Issue;
use self::error::ProviderError;

#[async_trait]
pub trait IssueProvider: Send + Sync {
    /// Stable lowercase identifier, used to select a provider from config.
    fn name(&self) -> &str;

    /// Fetch one issue by its human-facing number.
    ///
    /// Dropping the returned future aborts the in-flight request.
    async fn get(&self, id: &str) -> Result<Issue, ProviderError>;

    /// Fetch all issues visible to the configured credential.
    async fn list(&self) -> Result<Vec<Issue>, ProviderError>;
}

/// Tracker label name (lower-cased) → issue type category.
pub type LabelTypeMap = HashMap<String, String>;

/// First label with a mapping wins. Backends that supply no labels get no type.
pub fn issue_type_from_labels(map: &LabelTypeMap, labels: &[String]) -> Option<String> {
    labels
        .iter()
        .find_map(|label| map.get(&label.to_lowercase()).cloned())
}


pub fn create_providers(config: &AppConfig) -> Vec<Box<dyn IssueProvider>> {
    let mut providers: Vec<Box<dyn IssueProvider>> = Vec::new();

    if let Some(cfg) = &config.agility {
        providers.push(Box::new(agility::AgilityProvider::new(cfg)));
    }

    providers
}

pub fn provider_by_name<'a>(
    providers: &'a [Box<dyn IssueProvider>],
    name: &str,
) -> Option<&'a dyn IssueProvider> {
    providers
        .iter()
        .find(|p| p.name() == name)
        .map(|p| p.as_ref())
}
