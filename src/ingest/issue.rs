//! GitHub Issue Adapter
//!
//! Feedback issues carry a templated "Testing framework" section of
//! `Field: value` lines. This module pulls those lines out, plus the input
//! node recovered from the UI result URL.

use indexmap::IndexMap;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::{error, warn};

const FRAMEWORK_MARKER: &str = "## Testing framework:";
const RESULTS_MARKER: &str = "results?l=";

pub const TEST_ASSET_HEADERS: [&str; 9] = [
    "Relationship",
    "Settings",
    "InputName",
    "InputID",
    "OutputName",
    "OutputID",
    "Expected Result",
    "Author",
    "issue label",
];

#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct IssueLabel {
    pub name: String,
}

/// The parts of a GitHub issue object the parser reads.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct GitHubIssue {
    pub number: u64,
    pub url: String,
    #[serde(default)]
    pub body: Option<String>,
    #[serde(default)]
    pub labels: Vec<IssueLabel>,
}

/// Asset fields recovered from one templated issue.
#[derive(Debug, Clone, Serialize, PartialEq, Default)]
pub struct TemplatedAsset {
    #[serde(rename = "Relationship", skip_serializing_if = "Option::is_none")]
    pub relationship: Option<String>,
    #[serde(rename = "Settings", skip_serializing_if = "Option::is_none")]
    pub settings: Option<String>,
    #[serde(rename = "InputName", skip_serializing_if = "Option::is_none")]
    pub input_name: Option<String>,
    #[serde(rename = "InputID", skip_serializing_if = "Option::is_none")]
    pub input_id: Option<String>,
    #[serde(rename = "OutputName", skip_serializing_if = "Option::is_none")]
    pub output_name: Option<String>,
    #[serde(rename = "OutputID", skip_serializing_if = "Option::is_none")]
    pub output_id: Option<String>,
    #[serde(rename = "Expected Result", skip_serializing_if = "Option::is_none")]
    pub expected_result: Option<String>,
    #[serde(rename = "Author", skip_serializing_if = "Option::is_none")]
    pub author: Option<String>,
    #[serde(rename = "issue label", skip_serializing_if = "Option::is_none")]
    pub issue_label: Option<String>,
    pub labels: Vec<String>,
    #[serde(rename = "GitHubIssue")]
    pub github_issue: String,
}

impl TemplatedAsset {
    fn from_fields(mut fields: IndexMap<String, String>) -> Self {
        let mut take = |name: &str| fields.shift_remove(name);
        Self {
            relationship: take("Relationship"),
            settings: take("Settings"),
            input_name: take("InputName"),
            input_id: take("InputID"),
            output_name: take("OutputName"),
            output_id: take("OutputID"),
            expected_result: take("Expected Result"),
            author: take("Author"),
            issue_label: take("issue label"),
            labels: Vec::new(),
            github_issue: String::new(),
        }
    }
}

/// Extract `Field: value` pairs for the given field names. A later line for
/// the same field replaces an earlier one.
pub fn parse_lines<'a, I>(lines: I, field_names: &[&str]) -> IndexMap<String, String>
where
    I: IntoIterator<Item = &'a str>,
{
    let mut entry = IndexMap::new();
    for line in lines {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        for field in field_names {
            if !line.starts_with(field) {
                continue;
            }
            if let Some((_, value)) = line.split_once(&format!("{}:", field)) {
                entry.insert(field.to_string(), value.trim_start().to_string());
            }
        }
    }
    entry
}

/// Parse the templated section of an issue body. Bodies without the
/// marker give an empty mapping.
pub fn parse_asset(body: &str) -> IndexMap<String, String> {
    match body.split_once(FRAMEWORK_MARKER) {
        Some((_, section)) => parse_lines(section.lines(), &TEST_ASSET_HEADERS),
        None => IndexMap::new(),
    }
}

/// Input node encoded in a UI result URL such as
/// `https://ui.transltr.io/results?l=type%202%20diabetes&i=MONDO:0005148&t=0`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UiQuery {
    pub input_id: String,
    pub input_name: String,
}

pub fn parse_ui_url(url: &str) -> Option<UiQuery> {
    let (_, query) = url.split_once(RESULTS_MARKER)?;
    let mut parts = query.split('&');
    let raw_name = parts.next()?;
    let input_id = parts.next()?.get(2..)?.to_string();
    let input_name = urlencoding::decode(raw_name)
        .map(|name| name.into_owned())
        .unwrap_or_else(|_| raw_name.replace("%20", " "));
    Some(UiQuery { input_id, input_name })
}

/// Turn one issue into an asset record, if it follows the template.
pub fn templated_asset(issue: &GitHubIssue) -> Option<TemplatedAsset> {
    let body = issue.body.as_deref().unwrap_or_default();
    let fields = parse_asset(body);
    if fields.is_empty() {
        return None;
    }

    let mut asset = TemplatedAsset::from_fields(fields);
    let url_line = parse_lines(body.lines(), &["URL"]);
    match url_line.get("URL") {
        Some(url) => match parse_ui_url(url) {
            Some(query) => {
                asset.input_id = Some(query.input_id);
                asset.input_name = Some(query.input_name);
            }
            None => warn!("Could not parse query URL in issue #{}: {}", issue.number, url),
        },
        None => warn!("Query URL not provided in issue #{}", issue.number),
    }

    asset.labels = issue.labels.iter().map(|l| l.name.clone()).collect();
    asset.github_issue = issue.url.clone();
    Some(asset)
}

pub fn templated_assets(issues: &[GitHubIssue]) -> Vec<TemplatedAsset> {
    issues.iter().filter_map(templated_asset).collect()
}

/// List the open issues of `owner/repo`. Failures are logged and yield an
/// empty list so the run can continue.
pub async fn fetch_issues(client: &Client, api_base: &str, owner: &str, repo: &str) -> Vec<GitHubIssue> {
    let url = format!("{}/repos/{}/{}/issues", api_base.trim_end_matches('/'), owner, repo);

    let response = match client.get(&url).send().await {
        Ok(response) => response,
        Err(e) => {
            error!("Failed to fetch data from GitHub API: {}", e);
            return Vec::new();
        }
    };

    let status = response.status();
    if !status.is_success() {
        let text = response.text().await.unwrap_or_default();
        error!("Failed to fetch data from GitHub API. Status code: {}", status.as_u16());
        error!("{}", text);
        return Vec::new();
    }

    match response.json::<Vec<GitHubIssue>>().await {
        Ok(issues) => issues,
        Err(e) => {
            error!("Failed to decode GitHub issue list: {}", e);
            Vec::new()
        }
    }
}
