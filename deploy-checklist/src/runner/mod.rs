//! Orchestrates reading, regenerating and writing back the checklist.
//!
//! [`ChecklistUpdater`] owns the repository API it is given; it never reaches
//! for a global client. Retry and rate-limit policy stay with the API.

mod config;
mod error;

pub use config::UpdateConfig;
pub use error::RunnerError;

use crate::checklist::DeployChecklist;
use crate::config::RepositorySettings;
use crate::generator::{ChecklistGenerator, GenerateRequest};
use crate::github::{RepositoryApi, TrackingIssue};
use crate::parser::parse_checklist;
use crate::references::pull_request_number;
use crate::summary::{CommentResult, CommentSummary, UpdateSummary};
use futures::stream::{self, StreamExt};
use std::collections::BTreeSet;
use tracing::{error, info, info_span, warn, Instrument};

/// Keeps the staging deploy checklist issue up to date.
pub struct ChecklistUpdater<A> {
    api: A,
    generator: ChecklistGenerator,
}

impl<A: RepositoryApi> ChecklistUpdater<A> {
    /// Creates an updater over the given repository API.
    pub fn new(api: A, settings: RepositorySettings) -> Self {
        Self {
            api,
            generator: ChecklistGenerator::new(settings),
        }
    }

    /// Returns the repository API in use.
    pub fn api(&self) -> &A {
        &self.api
    }

    /// Fetches the tracking issue and parses its body.
    ///
    /// # Errors
    ///
    /// Returns [`RunnerError::Api`] if the issue cannot be fetched (including
    /// not-found and conflict) and [`RunnerError::Parse`] if its body has no
    /// release version.
    pub async fn current(&self) -> Result<(TrackingIssue, DeployChecklist), RunnerError> {
        let issue = self.api.fetch_open_tracking_issue().await?;
        let checklist = parse_checklist(&issue.body)?;
        info!(
            issue_number = issue.number,
            tag = %checklist.tag,
            pull_requests = checklist.pull_requests.len(),
            internal_qa = checklist.internal_qa.len(),
            deploy_blockers = checklist.deploy_blockers.len(),
            "Parsed tracking issue"
        );
        Ok((issue, checklist))
    }

    /// Adds entries to the checklist and regenerates its body.
    ///
    /// Existing checked state is carried over. The Internal QA partition is
    /// recomputed from freshly fetched metadata every time. The body is
    /// written back only when it changed and the run is not a dry run.
    ///
    /// # Errors
    ///
    /// Returns [`RunnerError`] if fetching, parsing, generation or the write
    /// back fails. Missing metadata is reported in the summary, not raised.
    pub async fn update(&self, config: &UpdateConfig) -> Result<UpdateSummary, RunnerError> {
        let span = info_span!(
            "update_checklist",
            added_pull_requests = config.pull_requests().len(),
            added_deploy_blockers = config.deploy_blockers().len(),
            dry_run = config.dry_run()
        );

        async {
            let (issue, checklist) = self.current().await?;

            let mut request = GenerateRequest::from_checklist(&checklist);
            request
                .pull_requests
                .extend(config.pull_requests().iter().cloned());
            request
                .deploy_blockers
                .extend(config.deploy_blockers().iter().cloned());

            let numbers: BTreeSet<u64> = request
                .pull_requests
                .iter()
                .filter_map(|url| pull_request_number(url).ok())
                .collect();
            let metadata = self.api.fetch_pull_requests_by_numbers(&numbers).await?;

            let generated = self.generator.generate(&request, &metadata)?;
            if !generated.missing_metadata.is_empty() {
                warn!(
                    missing = ?generated.missing_metadata,
                    "Listing pull requests without metadata"
                );
            }

            let regenerated = parse_checklist(&generated.body)?;
            let body_changed = generated.body != issue.body;
            let updated = body_changed && !config.dry_run();

            if updated {
                self.api
                    .update_issue_body(issue.number, &generated.body)
                    .await?;
                info!(issue_number = issue.number, "Tracking issue updated");
            } else if !body_changed {
                info!(issue_number = issue.number, "Tracking issue already up to date");
            }

            Ok(UpdateSummary {
                issue_number: issue.number,
                checklist: regenerated,
                body: generated.body,
                notify: generated.notify,
                missing_metadata: generated.missing_metadata,
                body_changed,
                updated,
                dry_run: config.dry_run(),
            })
        }
        .instrument(span)
        .await
    }

    /// Posts `message` on every issue or pull request in `numbers`.
    ///
    /// At most `concurrency` comments are in flight at once. A failed post is
    /// recorded and does not stop the others.
    pub async fn comment_on(
        &self,
        repo: &str,
        numbers: &[u64],
        message: &str,
        concurrency: usize,
    ) -> CommentSummary {
        let unique: BTreeSet<u64> = numbers.iter().copied().collect();
        let results: Vec<CommentResult> = stream::iter(unique)
            .map(|number| async move {
                match self.api.post_comment(repo, number, message).await {
                    Ok(()) => CommentResult::Posted { number },
                    Err(e) => {
                        error!(repo, number, error = %e, "Failed to post comment");
                        CommentResult::Failed {
                            number,
                            error: e.to_string(),
                        }
                    }
                }
            })
            .buffer_unordered(concurrency.max(1))
            .collect()
            .await;

        let mut summary = CommentSummary::default();
        for result in results {
            summary.record_result(result);
        }
        summary
    }
}
