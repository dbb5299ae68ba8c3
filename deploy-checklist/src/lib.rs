#![doc = include_str!(concat!("../", env!("CARGO_PKG_README")))]

pub mod checklist;
pub mod config;
pub mod generator;
pub mod github;
pub mod parser;
pub mod references;
pub mod runner;
pub mod summary;

pub use checklist::{DeployChecklist, EntryReference, Verifications};
pub use config::{ConfigError, RepositorySettings};
pub use generator::{
    release_body, ChecklistGenerator, GenerateError, GenerateRequest, GeneratedChecklist,
};
pub use github::{
    single_tracking_issue, ApiError, OctocrabRepositoryApi, PullRequestMeta, RepositoryApi,
    TrackingIssue,
};
pub use parser::{parse_checklist, parse_tag, parse_verifications, ParseError};
pub use references::{
    issue_number, issue_or_pull_request_number, pull_request_number, pull_request_url,
    ReferenceError, ReferenceKind,
};
pub use runner::{ChecklistUpdater, RunnerError, UpdateConfig};
pub use summary::{CommentResult, CommentSummary, UpdateSummary};
