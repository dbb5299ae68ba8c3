//! Octocrab-backed [`RepositoryApi`].

use super::rate_limit::ensure_core_rate_limit;
use super::{single_tracking_issue, ApiError, PullRequestMeta, RepositoryApi, TrackingIssue};
use crate::config::RepositorySettings;
use crate::references::pull_request_url;
use async_trait::async_trait;
use octocrab::models::issues::Issue;
use octocrab::models::pulls::PullRequest;
use octocrab::params::{self, Direction};
use octocrab::Octocrab;
use std::collections::BTreeSet;
use tracing::{debug, info, info_span, warn, Instrument};

/// Results per page for issue and pull request listings.
const RESULTS_PER_PAGE: u8 = 100;

/// Talks to GitHub through an authenticated octocrab client.
#[derive(Debug, Clone)]
pub struct OctocrabRepositoryApi {
    octocrab: Octocrab,
    settings: RepositorySettings,
}

impl OctocrabRepositoryApi {
    /// Wraps an existing octocrab client.
    #[must_use]
    pub fn new(octocrab: Octocrab, settings: RepositorySettings) -> Self {
        Self { octocrab, settings }
    }

    /// Builds a client authenticated with a personal access token.
    ///
    /// # Errors
    ///
    /// Returns an error if the octocrab client cannot be built.
    pub fn with_token(token: String, settings: RepositorySettings) -> Result<Self, ApiError> {
        let octocrab = Octocrab::builder().personal_token(token).build()?;
        Ok(Self::new(octocrab, settings))
    }

    /// Lists pull requests newest first until `oldest` has been seen.
    async fn list_until(&self, oldest: u64) -> Result<Vec<PullRequest>, ApiError> {
        ensure_core_rate_limit(&self.octocrab).await?;
        let mut page = self
            .octocrab
            .pulls(&self.settings.owner, &self.settings.repo)
            .list()
            .state(params::State::All)
            .sort(params::pulls::Sort::Created)
            .direction(Direction::Descending)
            .per_page(RESULTS_PER_PAGE)
            .send()
            .await?;

        let mut pulls = Vec::new();
        loop {
            let reached_oldest = page_reaches(
                page.items.iter().map(|pull| pull.number),
                page.next.is_none(),
                oldest,
            );
            pulls.append(&mut page.items);
            if reached_oldest {
                break;
            }

            ensure_core_rate_limit(&self.octocrab).await?;
            match self.octocrab.get_page::<PullRequest>(&page.next).await? {
                Some(next_page) => page = next_page,
                None => break,
            }
        }

        debug!(count = pulls.len(), oldest, "Listed pull requests");
        Ok(pulls)
    }

    /// Fetches a single pull request, used when a listing omits the merger.
    async fn fetch_merger(&self, number: u64) -> Result<Option<String>, ApiError> {
        ensure_core_rate_limit(&self.octocrab).await?;
        let pull = self
            .octocrab
            .pulls(&self.settings.owner, &self.settings.repo)
            .get(number)
            .await?;
        Ok(pull.merged_by.map(|author| author.login))
    }

    fn convert_pull_request(&self, pull: PullRequest) -> PullRequestMeta {
        let url = pull
            .html_url
            .map(|url| url.to_string())
            .unwrap_or_else(|| pull_request_url(&self.settings.repository_url(), pull.number));

        PullRequestMeta {
            number: pull.number,
            url,
            title: pull.title.unwrap_or_default(),
            merged_by: pull.merged_by.map(|author| author.login),
            labels: pull
                .labels
                .unwrap_or_default()
                .into_iter()
                .map(|label| label.name)
                .collect(),
        }
    }
}

#[async_trait]
impl RepositoryApi for OctocrabRepositoryApi {
    async fn fetch_open_tracking_issue(&self) -> Result<TrackingIssue, ApiError> {
        let label = &self.settings.staging_deploy_label;
        let span = info_span!("fetch_tracking_issue", label = %label);

        async {
            ensure_core_rate_limit(&self.octocrab).await?;
            let labels = [label.clone()];
            let page = self
                .octocrab
                .issues(&self.settings.owner, &self.settings.repo)
                .list()
                .state(params::State::Open)
                .labels(&labels)
                .per_page(RESULTS_PER_PAGE)
                .send()
                .await?;

            let issues: Vec<TrackingIssue> = page
                .items
                .into_iter()
                .filter(|issue| issue.pull_request.is_none())
                .map(convert_issue)
                .collect();

            let issue = single_tracking_issue(issues, label)?;
            info!(issue_number = issue.number, "Found tracking issue");
            Ok(issue)
        }
        .instrument(span)
        .await
    }

    async fn fetch_pull_requests_by_numbers(
        &self,
        numbers: &BTreeSet<u64>,
    ) -> Result<Vec<PullRequestMeta>, ApiError> {
        let Some(&oldest) = numbers.first() else {
            return Ok(Vec::new());
        };
        let span = info_span!("fetch_pull_requests", requested = numbers.len(), oldest);

        async {
            let mut metas: Vec<PullRequestMeta> = self
                .list_until(oldest)
                .await?
                .into_iter()
                .filter(|pull| numbers.contains(&pull.number))
                .map(|pull| self.convert_pull_request(pull))
                .collect();
            metas.sort_by_key(|meta| meta.number);
            metas.dedup_by_key(|meta| meta.number);

            let internal_qa_label = &self.settings.internal_qa_label;
            for meta in metas
                .iter_mut()
                .filter(|meta| meta.merged_by.is_none() && meta.has_label(internal_qa_label))
            {
                match self.fetch_merger(meta.number).await {
                    Ok(merger) => meta.merged_by = merger,
                    Err(e) => {
                        warn!(
                            number = meta.number,
                            error = %e,
                            "Failed to fetch pull request merger"
                        );
                    }
                }
            }

            if metas.len() < numbers.len() {
                warn!(
                    requested = numbers.len(),
                    found = metas.len(),
                    "Some pull requests were not found"
                );
            }
            Ok(metas)
        }
        .instrument(span)
        .await
    }

    async fn post_comment(&self, repo: &str, number: u64, body: &str) -> Result<(), ApiError> {
        info!(repo, number, "Writing comment");
        ensure_core_rate_limit(&self.octocrab).await?;
        self.octocrab
            .issues(&self.settings.owner, repo)
            .create_comment(number, body)
            .await?;
        Ok(())
    }

    async fn update_issue_body(&self, number: u64, body: &str) -> Result<(), ApiError> {
        info!(issue_number = number, "Updating tracking issue body");
        ensure_core_rate_limit(&self.octocrab).await?;
        self.octocrab
            .issues(&self.settings.owner, &self.settings.repo)
            .update(number)
            .body(body)
            .send()
            .await?;
        Ok(())
    }
}

/// True if a newest-first page is the last one or holds `oldest` or anything older.
fn page_reaches(numbers: impl IntoIterator<Item = u64>, is_last: bool, oldest: u64) -> bool {
    is_last || numbers.into_iter().any(|number| number <= oldest)
}

fn convert_issue(issue: Issue) -> TrackingIssue {
    TrackingIssue {
        number: issue.number,
        title: issue.title,
        url: issue.html_url.to_string(),
        body: issue.body.unwrap_or_default(),
        labels: issue.labels.into_iter().map(|label| label.name).collect(),
    }
}
