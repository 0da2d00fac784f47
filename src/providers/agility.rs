use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use super::error::ProviderError;
use super::wire::{TracingWireLog, WireLog};
use super::{issue_type_from_labels, IssueProvider, LabelTypeMap};
use crate::config::AgilityConfig;
use crate::model::issue::Issue;
use crate::util::text::suggested_branch_name;

const QUERY_PATH: &str = "query.v1";
const STORY_FIELDS: [&str; 4] = ["Name", "Number", "ID", "Description"];
const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

pub struct AgilityProvider {
    endpoint: String,
    api_key: String,
    client: reqwest::Client,
    label_types: LabelTypeMap,
    wire_log: Arc<dyn WireLog>,
}

impl AgilityProvider {
    pub fn new(config: &AgilityConfig) -> Self {
        Self {
            endpoint: config.endpoint.trim_end_matches('/').to_string(),
            api_key: config.api_key.clone(),
            client: reqwest::Client::new(),
            label_types: LabelTypeMap::new(),
            wire_log: Arc::new(TracingWireLog),
        }
    }

    /// Replace the label→type table consulted during normalization.
    pub fn with_label_types(mut self, label_types: LabelTypeMap) -> Self {
        self.label_types = label_types;
        self
    }

    /// Replace the wire-traffic observer (the default logs via `tracing`).
    pub fn with_wire_log(mut self, wire_log: Arc<dyn WireLog>) -> Self {
        self.wire_log = wire_log;
        self
    }

    /// POST a JSON-encoded query to `{endpoint}/{path}` and decode the
    /// response. One attempt per call, bounded by a fixed timeout.
    async fn query<B, T>(&self, path: &str, body: &B) -> Result<T, ProviderError>
    where
        B: Serialize,
        T: DeserializeOwned,
    {
        let url = format!("{}/{}", self.endpoint, path);

        let payload = serde_json::to_string(body).map_err(|source| ProviderError::Encode {
            url: url.clone(),
            source,
        })?;
        self.wire_log.request(&url, &payload);

        let res = self
            .client
            .post(&url)
            .timeout(REQUEST_TIMEOUT)
            .header("Authorization", format!("Bearer {}", self.api_key))
            .header("content-type", "application/json")
            .body(payload)
            .send()
            .await
            .map_err(|source| ProviderError::Transport {
                url: url.clone(),
                source,
            })?;

        let status = res.status();
        if status != reqwest::StatusCode::OK {
            if status == reqwest::StatusCode::NOT_FOUND {
                return Err(ProviderError::RequestNotFound {
                    path: path.to_string(),
                });
            }
            return Err(ProviderError::RequestFailed {
                path: path.to_string(),
                status,
            });
        }

        let body = res
            .text()
            .await
            .map_err(|source| ProviderError::Transport {
                url: url.clone(),
                source,
            })?;
        self.wire_log.response(&url, &body);

        serde_json::from_str(&body).map_err(|source| ProviderError::Decode { url, source })
    }
}

#[derive(Debug, Serialize)]
struct StoryQuery {
    from: &'static str,
    select: Vec<&'static str>,
    #[serde(rename = "where")]
    filter: HashMap<&'static str, String>,
}

/// Query results come back as rows of columns; a single-story fetch reads
/// the head element of the head row.
type StoryRows = Vec<Vec<AgilityStory>>;

#[derive(Debug, Serialize, Deserialize)]
struct StoryRef {
    #[serde(rename = "_oid")]
    oid: String,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct AgilityStory {
    #[serde(rename = "_oid")]
    oid: String,
    name: String,
    number: String,
    #[serde(rename = "ID")]
    id: StoryRef,
    description: String,
}

impl AgilityStory {
    fn into_issue(self, label_types: &LabelTypeMap) -> Issue {
        // The nested ID oid is the stable identifier; the record's own
        // `_oid` is a view-specific alias.
        let key = self.id.oid;

        // The story query selects no label field, so there is nothing to
        // classify yet; queries that do select labels feed them in here.
        let issue_type = issue_type_from_labels(label_types, &[]);

        Issue {
            key,
            title: self.name,
            issue_type,
            suggested_branch_name: suggested_branch_name(&self.description),
        }
    }
}

#[async_trait]
impl IssueProvider for AgilityProvider {
    fn name(&self) -> &str {
        "agility"
    }

    async fn get(&self, id: &str) -> Result<Issue, ProviderError> {
        let query = StoryQuery {
            from: "Story",
            select: STORY_FIELDS.to_vec(),
            filter: HashMap::from([("Number", id.to_string())]),
        };

        let rows: StoryRows = self.query(QUERY_PATH, &query).await?;
        let story = rows
            .into_iter()
            .flatten()
            .next()
            .ok_or_else(|| ProviderError::NotFound { id: id.to_string() })?;

        Ok(story.into_issue(&self.label_types))
    }

    /// Agility has no working list query yet, so this backend reports an
    /// empty result instead of failing or issuing a request.
    async fn list(&self) -> Result<Vec<Issue>, ProviderError> {
        Ok(Vec::new())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn story(description: &str) -> AgilityStory {
        AgilityStory {
            oid: "Story:123:456".into(),
            name: "Test Issue".into(),
            number: "1".into(),
            id: StoryRef { oid: "123".into() },
            description: description.into(),
        }
    }

    #[test]
    fn into_issue_uses_nested_id() {
        let issue = story("This is a test issue").into_issue(&LabelTypeMap::new());
        assert_eq!(issue.key, "123");
        assert_eq!(issue.title, "Test Issue");
    }

    #[test]
    fn into_issue_sanitizes_description() {
        let issue = story("This is a <b>test</b> issue").into_issue(&LabelTypeMap::new());
        assert_eq!(issue.suggested_branch_name, "This_is_a_test_issue");
    }

    #[test]
    fn into_issue_has_no_type_without_labels() {
        let label_types = LabelTypeMap::from([("bug".to_string(), "fix".to_string())]);
        let issue = story("plain").into_issue(&label_types);
        assert_eq!(issue.issue_type, None);
    }

    #[test]
    fn story_query_matches_wire_format() {
        let query = StoryQuery {
            from: "Story",
            select: STORY_FIELDS.to_vec(),
            filter: HashMap::from([("Number", "1".to_string())]),
        };
        let value = serde_json::to_value(&query).unwrap();
        assert_eq!(value["from"], "Story");
        assert_eq!(
            value["select"],
            serde_json::json!(["Name", "Number", "ID", "Description"])
        );
        assert_eq!(value["where"]["Number"], "1");
    }

    #[test]
    fn story_roundtrips_wire_field_names() {
        let value = serde_json::to_value(story("desc")).unwrap();
        assert_eq!(value["_oid"], "Story:123:456");
        assert_eq!(value["Name"], "Test Issue");
        assert_eq!(value["Number"], "1");
        assert_eq!(value["ID"]["_oid"], "123");
        assert_eq!(value["Description"], "desc");

        let decoded: AgilityStory = serde_json::from_value(value).unwrap();
        assert_eq!(decoded.id.oid, "123");
    }
}
