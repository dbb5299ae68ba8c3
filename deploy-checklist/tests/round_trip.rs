use std::path::PathBuf;

use deploy_checklist::{
    parse_checklist, ChecklistGenerator, GenerateRequest, PullRequestMeta, RepositorySettings,
    Verifications,
};

fn fixture(name: &str) -> String {
    let path = PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests/fixtures")
        .join(name);
    std::fs::read_to_string(path).unwrap()
}

fn meta(number: u64, title: &str, labels: &[&str], merged_by: &str) -> PullRequestMeta {
    PullRequestMeta {
        number,
        url: format!("https://github.com/Expensify/App/pull/{number}"),
        title: title.to_string(),
        merged_by: Some(merged_by.to_string()),
        labels: labels.iter().map(|label| label.to_string()).collect(),
    }
}

fn fixture_metadata() -> Vec<PullRequestMeta> {
    vec![
        meta(101, "Add offline banner", &[], "carol"),
        meta(115, "Refactor report actions", &["Internal QA"], "alice"),
        meta(120, "Fix login crash", &[], "dave"),
        meta(130, "Revert bad change", &[], "erin"),
    ]
}

#[test]
fn parse_fixture() {
    let checklist = parse_checklist(&fixture("staging-deploy.md")).unwrap();

    assert_eq!(checklist.tag, "1.0.5-2");
    let prs: Vec<(u64, bool)> = checklist
        .pull_requests
        .iter()
        .map(|entry| (entry.number, entry.checked))
        .collect();
    assert_eq!(prs, vec![(101, false), (120, true)]);
    assert_eq!(checklist.internal_qa[0].number, 115);
    assert_eq!(checklist.internal_qa[0].assignee.as_deref(), Some("alice"));
    assert_eq!(checklist.deploy_blockers.len(), 2);
    assert!(checklist.has_open_deploy_blockers());
    assert_eq!(
        checklist.verifications,
        Verifications {
            timing_dashboard: true,
            crashlytics: false,
            github_status: false,
        }
    );
}

#[test]
fn malformed_sections_degrade_to_empty() {
    let checklist = parse_checklist(&fixture("malformed-sections.md")).unwrap();

    assert_eq!(checklist.tag, "1.0.6-0");
    assert!(checklist.pull_requests.is_empty());
    assert!(checklist.internal_qa.is_empty());
    assert_eq!(checklist.deploy_blockers.len(), 1);
    assert_eq!(checklist.deploy_blockers[0].number, 3);
    assert!(!checklist.deploy_blockers[0].checked);
}

#[test]
fn regenerating_a_parsed_fixture_preserves_its_state() {
    let original = parse_checklist(&fixture("staging-deploy.md")).unwrap();
    let generator = ChecklistGenerator::new(RepositorySettings::default());

    let generated = generator
        .generate(&GenerateRequest::from_checklist(&original), &fixture_metadata())
        .unwrap();
    let reparsed = parse_checklist(&generated.body).unwrap();

    assert_eq!(reparsed, original);
    assert!(generated.notify.contains("alice"));
}

#[test]
fn generate_then_parse_round_trips() {
    let generator = ChecklistGenerator::default();
    let mut request = GenerateRequest::new("3.14.15-9");
    request.pull_requests = vec![
        "https://github.com/Expensify/App/pull/130".to_string(),
        "https://github.com/Expensify/App/pull/101".to_string(),
        "https://github.com/Expensify/App/pull/115".to_string(),
        "https://github.com/Expensify/App/pull/120".to_string(),
    ];
    request.verified_pull_requests = vec!["https://github.com/Expensify/App/pull/130".to_string()];
    request.resolved_internal_qa = vec!["https://github.com/Expensify/App/pull/115".to_string()];
    request.deploy_blockers = vec![
        "https://github.com/Expensify/App/issues/99".to_string(),
        "https://github.com/Expensify/App/pull/12".to_string(),
    ];
    request.resolved_deploy_blockers =
        vec!["https://github.com/Expensify/App/issues/99".to_string()];
    request.verifications = Verifications {
        timing_dashboard: false,
        crashlytics: true,
        github_status: true,
    };

    let first = generator.generate(&request, &fixture_metadata()).unwrap();
    let second = generator.generate(&request, &fixture_metadata()).unwrap();
    assert_eq!(first, second);

    let parsed = parse_checklist(&first.body).unwrap();
    assert_eq!(parsed.tag, "3.14.15-9");
    assert_eq!(parsed.verifications, request.verifications);

    let prs: Vec<(u64, bool)> = parsed
        .pull_requests
        .iter()
        .map(|entry| (entry.number, entry.checked))
        .collect();
    assert_eq!(prs, vec![(101, false), (120, false), (130, true)]);

    assert_eq!(parsed.internal_qa.len(), 1);
    assert!(parsed.internal_qa[0].checked);
    assert_eq!(parsed.internal_qa[0].assignee.as_deref(), Some("alice"));

    let blockers: Vec<(u64, bool)> = parsed
        .deploy_blockers
        .iter()
        .map(|entry| (entry.number, entry.checked))
        .collect();
    assert_eq!(blockers, vec![(12, false), (99, true)]);

    let regenerated = generator
        .generate(&GenerateRequest::from_checklist(&parsed), &fixture_metadata())
        .unwrap();
    assert_eq!(regenerated.body, first.body);
}

#[test]
fn same_url_may_appear_in_two_sections() {
    let generator = ChecklistGenerator::default();
    let url = "https://github.com/Expensify/App/pull/120".to_string();
    let mut request = GenerateRequest::new("1.0.0");
    request.pull_requests = vec![url.clone()];
    request.deploy_blockers = vec![url];

    let parsed = parse_checklist(&generator.generate(&request, &[]).unwrap().body).unwrap();
    assert_eq!(parsed.pull_requests.len(), 1);
    assert_eq!(parsed.deploy_blockers.len(), 1);
}
