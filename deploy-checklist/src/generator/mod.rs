//! Staging deploy checklist generation.
//!
//! The generated body is a contract: other tools parse it, and
//! [`parse_checklist`](crate::parser::parse_checklist) must read back the same
//! entries, tag and verifications. Lines end in CRLF, checklist lines are
//! `- [x] <url>` / `- [ ] <url>`, and sections are separated by two blank lines.
//!
//! Generation is pure: identical inputs always give byte-identical output.

mod error;
mod release;
mod request;

pub use error::GenerateError;
pub use release::release_body;
pub use request::{GenerateRequest, GeneratedChecklist};

use crate::checklist::{
    sort_by_number, EntryReference, Verifications, CRASHLYTICS_MARKER, GITHUB_STATUS_MARKER,
    TIMING_DASHBOARD_MARKER,
};
use crate::config::RepositorySettings;
use crate::github::PullRequestMeta;
use crate::references::ReferenceKind;
use regex::Regex;
use std::collections::{BTreeSet, HashMap, HashSet};
use std::sync::LazyLock;

/// Titles tagged like this skip QA and are ticked automatically.
static NO_QA_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\[No\s?QA\]").expect("no-QA regex is valid"));

const PULL_REQUESTS_HEADING: &str =
    "**This release contains changes from the following pull requests:**";
const INTERNAL_QA_HEADING: &str = "**Internal QA:**";
const DEPLOY_BLOCKERS_HEADING: &str = "**Deploy Blockers:**";
const VERIFICATIONS_HEADING: &str = "**Deployer verifications:**";

const TIMING_DASHBOARD_TEXT: &str = "(https://graphs.expensify.com/grafana/d/yj2EobAGz/app-timing?orgId=1) and verified this release does not cause a noticeable performance regression.";
const CRASHLYTICS_TEXT: &str = "(https://console.firebase.google.com/u/0/project/expensify-chat/crashlytics/app/android:com.expensify.chat/issues?state=open&time=last-seven-days&tag=all) and verified that this release does not introduce any new crashes. More detailed instructions on this verification can be found [here](https://stackoverflowteams.com/c/expensify/questions/15095/15096).";
const GITHUB_STATUS_TEXT: &str =
    "(https://www.githubstatus.com/) and verified there is no reported incident with Actions.";

/// Builds checklist bodies for one repository.
#[derive(Debug, Clone, Default)]
pub struct ChecklistGenerator {
    settings: RepositorySettings,
}

impl ChecklistGenerator {
    /// Creates a generator for the given repository.
    #[must_use]
    pub fn new(settings: RepositorySettings) -> Self {
        Self { settings }
    }

    /// Generates the checklist body for `request`.
    ///
    /// Pull requests whose metadata carries the Internal QA label (and a
    /// merger) go to the Internal QA section, assigned to their merger.
    /// Every other pull request is listed in the main section, ticked if
    /// verified or titled `[No QA]`. Pull requests without metadata, or
    /// labelled for Internal QA without a merger, are listed in the main
    /// section keeping any recorded sign-off, and reported in
    /// [`GeneratedChecklist::missing_metadata`].
    ///
    /// # Errors
    ///
    /// Returns [`GenerateError::UnresolvedReference`] if any pull request or
    /// deploy blocker URL has no number. No partial body is produced.
    pub fn generate(
        &self,
        request: &GenerateRequest,
        metadata: &[PullRequestMeta],
    ) -> Result<GeneratedChecklist, GenerateError> {
        let pull_requests = resolve_unique(&request.pull_requests, ReferenceKind::PullRequest)?;
        let deploy_blockers =
            resolve_unique(&request.deploy_blockers, ReferenceKind::IssueOrPullRequest)?;

        let metadata: HashMap<u64, &PullRequestMeta> =
            metadata.iter().map(|meta| (meta.number, meta)).collect();
        let verified: HashSet<&str> = as_set(&request.verified_pull_requests);
        let resolved_internal_qa: HashSet<&str> = as_set(&request.resolved_internal_qa);
        let resolved_blockers: HashSet<&str> = as_set(&request.resolved_deploy_blockers);

        let mut main_list = Vec::new();
        let mut internal_qa = Vec::new();
        let mut missing_metadata = BTreeSet::new();

        for (number, url) in pull_requests {
            let Some(meta) = metadata.get(&number) else {
                missing_metadata.insert(number);
                main_list.push(EntryReference::new(url, number, verified.contains(url)));
                continue;
            };

            if !meta.has_label(&self.settings.internal_qa_label) {
                let checked = verified.contains(url) || NO_QA_RE.is_match(&meta.title);
                main_list.push(EntryReference::new(url, number, checked));
                continue;
            }

            let signed_off = resolved_internal_qa.contains(url);
            match meta.merged_by.as_deref() {
                Some(merger) => internal_qa.push(
                    EntryReference::new(url, number, signed_off).with_assignee(merger),
                ),
                None => {
                    // No assignee to route to yet; keep the sign-off until the merger is known.
                    missing_metadata.insert(number);
                    let checked = verified.contains(url) || signed_off;
                    main_list.push(EntryReference::new(url, number, checked));
                }
            }
        }

        let mut blockers: Vec<EntryReference> = deploy_blockers
            .into_iter()
            .map(|(number, url)| EntryReference::new(url, number, resolved_blockers.contains(url)))
            .collect();

        sort_by_number(&mut main_list);
        sort_by_number(&mut internal_qa);
        sort_by_number(&mut blockers);

        let notify = internal_qa
            .iter()
            .filter_map(|entry| entry.assignee.clone())
            .collect();

        let body = self.render(
            &request.tag,
            &main_list,
            &internal_qa,
            &blockers,
            request.verifications,
        );

        Ok(GeneratedChecklist {
            body,
            notify,
            missing_metadata: missing_metadata.into_iter().collect(),
        })
    }

    fn render(
        &self,
        tag: &str,
        pull_requests: &[EntryReference],
        internal_qa: &[EntryReference],
        deploy_blockers: &[EntryReference],
        verifications: Verifications,
    ) -> String {
        let mut body = format!(
            "**Release Version:** `{tag}`\r\n**Compare Changes:** {}\r\n",
            self.settings.compare_url()
        );

        if !pull_requests.is_empty() {
            body.push_str("\r\n");
            push_section(&mut body, PULL_REQUESTS_HEADING, pull_requests);
        }
        if !internal_qa.is_empty() {
            push_section(&mut body, INTERNAL_QA_HEADING, internal_qa);
        }
        if !deploy_blockers.is_empty() {
            push_section(&mut body, DEPLOY_BLOCKERS_HEADING, deploy_blockers);
        }

        body.push_str(VERIFICATIONS_HEADING);
        for (checked, marker, text) in [
            (
                verifications.timing_dashboard,
                TIMING_DASHBOARD_MARKER,
                TIMING_DASHBOARD_TEXT,
            ),
            (verifications.crashlytics, CRASHLYTICS_MARKER, CRASHLYTICS_TEXT),
            (
                verifications.github_status,
                GITHUB_STATUS_MARKER,
                GITHUB_STATUS_TEXT,
            ),
        ] {
            body.push_str("\r\n");
            body.push_str(checkbox(checked));
            body.push(' ');
            body.push_str(marker);
            body.push_str(text);
        }

        body.push_str("\r\n\r\ncc ");
        body.push_str(&self.settings.deployer_team);
        body.push_str("\r\n");
        body
    }
}

fn checkbox(checked: bool) -> &'static str {
    if checked {
        "- [x]"
    } else {
        "- [ ]"
    }
}

/// Appends a heading, one line per entry, then the section separator.
fn push_section(body: &mut String, heading: &str, entries: &[EntryReference]) {
    body.push_str(heading);
    body.push_str("\r\n");
    for entry in entries {
        body.push_str(checkbox(entry.checked));
        body.push(' ');
        body.push_str(&entry.url);
        if let Some(assignee) = &entry.assignee {
            body.push_str(" - @");
            body.push_str(assignee);
        }
        body.push_str("\r\n");
    }
    body.push_str("\r\n\r\n");
}

/// Resolves every URL to its number, dropping repeated URLs.
fn resolve_unique(
    urls: &[String],
    kind: ReferenceKind,
) -> Result<Vec<(u64, &str)>, GenerateError> {
    let mut seen = HashSet::new();
    let mut resolved = Vec::new();
    for url in urls {
        let number = kind
            .number(url)
            .map_err(|source| GenerateError::UnresolvedReference {
                url: url.clone(),
                source,
            })?;
        if seen.insert(url.as_str()) {
            resolved.push((number, url.as_str()));
        }
    }
    Ok(resolved)
}

fn as_set(urls: &[String]) -> HashSet<&str> {
    urls.iter().map(String::as_str).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::parse_checklist;
    use crate::references::ReferenceError;

    fn meta(number: u64, title: &str, labels: &[&str], merged_by: Option<&str>) -> PullRequestMeta {
        PullRequestMeta {
            number,
            url: format!("https://github.com/o/r/pull/{number}"),
            title: title.to_string(),
            merged_by: merged_by.map(str::to_string),
            labels: labels.iter().map(|label| label.to_string()).collect(),
        }
    }

    fn pr(number: u64) -> String {
        format!("https://github.com/o/r/pull/{number}")
    }

    #[test]
    fn lists_pull_requests_in_ascending_order() {
        let generator = ChecklistGenerator::default();
        let mut request = GenerateRequest::new("1.2.3");
        request.pull_requests = vec![pr(10), pr(5)];
        let metadata = [meta(5, "Five", &[], Some("x")), meta(10, "Ten", &[], Some("y"))];

        let generated = generator.generate(&request, &metadata).unwrap();

        let five = generated.body.find("- [ ] https://github.com/o/r/pull/5\r\n").unwrap();
        let ten = generated.body.find("- [ ] https://github.com/o/r/pull/10\r\n").unwrap();
        assert!(five < ten);
        assert!(generated.notify.is_empty());
        assert!(generated.missing_metadata.is_empty());
    }

    #[test]
    fn renders_exact_body() {
        let generator = ChecklistGenerator::default();
        let mut request = GenerateRequest::new("1.2.3-4");
        request.pull_requests = vec![pr(2), pr(1)];
        request.verified_pull_requests = vec![pr(2)];
        request.deploy_blockers = vec!["https://github.com/o/r/issues/9".to_string()];
        request.verifications.github_status = true;

        let generated = generator.generate(&request, &[]).unwrap();

        let expected = format!(
            "**Release Version:** `1.2.3-4`\r\n\
**Compare Changes:** https://github.com/Expensify/App/compare/production...staging\r\n\
\r\n\
**This release contains changes from the following pull requests:**\r\n\
- [ ] https://github.com/o/r/pull/1\r\n\
- [x] https://github.com/o/r/pull/2\r\n\
\r\n\
\r\n\
**Deploy Blockers:**\r\n\
- [ ] https://github.com/o/r/issues/9\r\n\
\r\n\
\r\n\
**Deployer verifications:**\r\n\
- [ ] {TIMING_DASHBOARD_MARKER}{TIMING_DASHBOARD_TEXT}\r\n\
- [ ] {CRASHLYTICS_MARKER}{CRASHLYTICS_TEXT}\r\n\
- [x] {GITHUB_STATUS_MARKER}{GITHUB_STATUS_TEXT}\r\n\
\r\n\
cc @Expensify/applauseleads\r\n"
        );
        assert_eq!(generated.body, expected);
        assert_eq!(generated.missing_metadata, vec![1, 2]);
    }

    #[test]
    fn internal_qa_pull_requests_are_routed_to_their_merger() {
        let generator = ChecklistGenerator::default();
        let mut request = GenerateRequest::new("1.0.0");
        request.pull_requests = vec![pr(7), pr(3)];
        let metadata = [
            meta(3, "Refactor", &["Internal QA"], Some("alice")),
            meta(7, "Feature", &[], Some("bob")),
        ];

        let generated = generator.generate(&request, &metadata).unwrap();

        assert!(generated
            .body
            .contains("**Internal QA:**\r\n- [ ] https://github.com/o/r/pull/3 - @alice\r\n"));
        assert!(generated
            .body
            .contains("pull requests:**\r\n- [ ] https://github.com/o/r/pull/7\r\n\r\n"));
        assert_eq!(generated.notify, BTreeSet::from(["alice".to_string()]));

        let parsed = parse_checklist(&generated.body).unwrap();
        assert_eq!(parsed.pull_requests.len(), 1);
        assert_eq!(parsed.pull_requests[0].number, 7);
    }

    #[test]
    fn resolved_internal_qa_is_ticked() {
        let generator = ChecklistGenerator::default();
        let mut request = GenerateRequest::new("1.0.0");
        request.pull_requests = vec![pr(3)];
        request.resolved_internal_qa = vec![pr(3)];
        let metadata = [meta(3, "Refactor", &["Internal QA"], Some("alice"))];

        let generated = generator.generate(&request, &metadata).unwrap();
        assert!(generated
            .body
            .contains("- [x] https://github.com/o/r/pull/3 - @alice\r\n"));
    }

    #[test]
    fn internal_qa_label_without_merger_stays_in_main_list() {
        let generator = ChecklistGenerator::default();
        let mut request = GenerateRequest::new("1.0.0");
        request.pull_requests = vec![pr(3)];
        let metadata = [meta(3, "Refactor", &["Internal QA"], None)];

        let generated = generator.generate(&request, &metadata).unwrap();
        assert!(!generated.body.contains(INTERNAL_QA_HEADING));
        assert!(generated.notify.is_empty());
    }

    #[test]
    fn internal_qa_without_merger_keeps_sign_off_and_is_reported() {
        let generator = ChecklistGenerator::default();
        let mut request = GenerateRequest::new("1.0.0");
        request.pull_requests = vec![pr(3), pr(4)];
        request.resolved_internal_qa = vec![pr(3)];
        let metadata = [
            meta(3, "Refactor", &["Internal QA"], None),
            meta(4, "Cleanup", &["Internal QA"], None),
        ];

        let generated = generator.generate(&request, &metadata).unwrap();
        assert_eq!(generated.missing_metadata, vec![3, 4]);

        let parsed = parse_checklist(&generated.body).unwrap();
        assert!(parsed.internal_qa.is_empty());
        assert_eq!(
            parsed.pull_requests,
            vec![
                EntryReference::new(pr(3), 3, true),
                EntryReference::new(pr(4), 4, false),
            ]
        );
    }

    #[test]
    fn no_qa_titles_are_ticked() {
        let generator = ChecklistGenerator::default();
        let mut request = GenerateRequest::new("1.0.0");
        request.pull_requests = vec![pr(1), pr(2), pr(3)];
        let metadata = [
            meta(1, "[No QA] Bump deps", &[], Some("a")),
            meta(2, "Fix crash [noqa]", &[], Some("a")),
            meta(3, "No QA needed", &[], Some("a")),
        ];

        let generated = generator.generate(&request, &metadata).unwrap();
        let parsed = parse_checklist(&generated.body).unwrap();
        let checked: Vec<bool> = parsed.pull_requests.iter().map(|e| e.checked).collect();
        assert_eq!(checked, vec![true, true, false]);
    }

    #[test]
    fn duplicates_are_removed() {
        let generator = ChecklistGenerator::default();
        let mut request = GenerateRequest::new("1.0.0");
        request.pull_requests = vec![pr(4), pr(4)];
        request.deploy_blockers = vec![pr(8), pr(8)];

        let parsed = parse_checklist(&generator.generate(&request, &[]).unwrap().body).unwrap();
        assert_eq!(parsed.pull_requests.len(), 1);
        assert_eq!(parsed.deploy_blockers.len(), 1);
    }

    #[test]
    fn empty_sections_are_omitted() {
        let generated = ChecklistGenerator::default()
            .generate(&GenerateRequest::new("1.0.0"), &[])
            .unwrap();
        assert!(!generated.body.contains(PULL_REQUESTS_HEADING));
        assert!(!generated.body.contains(INTERNAL_QA_HEADING));
        assert!(!generated.body.contains(DEPLOY_BLOCKERS_HEADING));
        assert!(generated.body.contains(VERIFICATIONS_HEADING));
    }

    #[test]
    fn malformed_pull_request_url_aborts() {
        let mut request = GenerateRequest::new("1.0.0");
        request.pull_requests = vec![pr(1), "https://github.com/o/r/issues/2".to_string()];

        let err = ChecklistGenerator::default()
            .generate(&request, &[])
            .unwrap_err();
        assert_eq!(
            err,
            GenerateError::UnresolvedReference {
                url: "https://github.com/o/r/issues/2".to_string(),
                source: ReferenceError::NotPullRequest {
                    url: "https://github.com/o/r/issues/2".to_string()
                },
            }
        );
    }

    #[test]
    fn malformed_deploy_blocker_url_aborts() {
        let mut request = GenerateRequest::new("1.0.0");
        request.deploy_blockers = vec!["not a url".to_string()];

        assert!(matches!(
            ChecklistGenerator::default().generate(&request, &[]),
            Err(GenerateError::UnresolvedReference { .. })
        ));
    }

    #[test]
    fn uses_configured_repository_and_team() {
        let settings = RepositorySettings {
            owner: "acme".to_string(),
            repo: "mobile".to_string(),
            deployer_team: "@acme/qa".to_string(),
            ..Default::default()
        };
        let generated = ChecklistGenerator::new(settings)
            .generate(&GenerateRequest::new("2.0.0"), &[])
            .unwrap();

        let compare = "https://github.com/acme/mobile/compare/production...staging";
        assert!(generated
            .body
            .contains(&format!("**Compare Changes:** {compare}\r\n")));
        assert!(generated.body.ends_with("\r\n\r\ncc @acme/qa\r\n"));
    }
}
