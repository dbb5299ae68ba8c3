//! Line scanner for the checklist sections of an issue body.

use crate::checklist::EntryReference;
use crate::references::ReferenceKind;

/// What must follow the run of entry lines for the section to count.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Terminator {
    /// The run must be followed by an empty line.
    BlankLine,
    /// The run simply ends at the first non-entry line or at the end of the body.
    EndOfRun,
}

/// Which lines belong to a section's run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum RunLines {
    /// Any line starting with `-`.
    Dashes,
    /// Only `- [?]` checklist lines.
    Checkboxes,
}

/// How to find and read one checklist section.
#[derive(Debug, Clone, Copy)]
pub(crate) struct SectionRule {
    /// Text the heading line must contain.
    pub heading: &'static str,
    pub run: RunLines,
    pub terminator: Terminator,
    /// URLs accepted for entries in this section.
    pub kind: ReferenceKind,
    /// Whether a trailing `@login` mention is read as the assignee.
    pub reads_assignee: bool,
}

pub(crate) const PULL_REQUESTS: SectionRule = SectionRule {
    heading: "pull requests:",
    run: RunLines::Dashes,
    terminator: Terminator::BlankLine,
    kind: ReferenceKind::PullRequest,
    reads_assignee: false,
};

pub(crate) const INTERNAL_QA: SectionRule = SectionRule {
    heading: "Internal QA:",
    run: RunLines::Checkboxes,
    terminator: Terminator::EndOfRun,
    kind: ReferenceKind::PullRequest,
    reads_assignee: true,
};

pub(crate) const DEPLOY_BLOCKERS: SectionRule = SectionRule {
    heading: "Deploy Blockers:",
    run: RunLines::Dashes,
    terminator: Terminator::EndOfRun,
    kind: ReferenceKind::IssueOrPullRequest,
    reads_assignee: false,
};

impl RunLines {
    fn accepts(self, line: &str) -> bool {
        match self {
            Self::Dashes => line.starts_with('-'),
            Self::Checkboxes => split_checkbox(line).is_some(),
        }
    }
}

/// Returns the lines under the first heading matching `rule`.
///
/// An absent heading, an empty run, or a run missing its required
/// terminator all yield no lines.
pub(crate) fn section_lines<'a>(body: &'a str, rule: &SectionRule) -> Vec<&'a str> {
    let mut lines = body.lines();
    if !lines.by_ref().any(|line| line.contains(rule.heading)) {
        return Vec::new();
    }

    let mut run = Vec::new();
    for line in lines {
        if rule.run.accepts(line) {
            run.push(line);
            continue;
        }
        return match rule.terminator {
            Terminator::EndOfRun => run,
            Terminator::BlankLine if line.trim().is_empty() => run,
            Terminator::BlankLine => Vec::new(),
        };
    }

    match rule.terminator {
        Terminator::EndOfRun => run,
        Terminator::BlankLine => Vec::new(),
    }
}

/// Reads every entry of the section described by `rule`, ascending by number.
pub(crate) fn read_section(body: &str, rule: &SectionRule) -> Vec<EntryReference> {
    let mut entries: Vec<EntryReference> = section_lines(body, rule)
        .into_iter()
        .filter_map(|line| parse_entry(line, rule))
        .collect();
    crate::checklist::sort_by_number(&mut entries);
    entries
}

/// Splits `- [m] rest` into the checkbox mark and the text after it.
fn split_checkbox(line: &str) -> Option<(char, &str)> {
    let rest = line.strip_prefix("- [")?;
    let mut chars = rest.chars();
    let mark = chars.next()?;
    let rest = chars.as_str().strip_prefix(']')?;
    rest.starts_with(char::is_whitespace)
        .then(|| (mark, rest.trim_start()))
}

/// Parses one checklist line into an entry.
///
/// Only a lowercase `x` counts as checked. The URL is the first token after
/// the checkbox; for sections that read assignees, the first `@login` token
/// after the URL is kept as a separate field.
pub(crate) fn parse_entry(line: &str, rule: &SectionRule) -> Option<EntryReference> {
    let (mark, rest) = split_checkbox(line)?;
    let mut tokens = rest.split_whitespace();
    let url = tokens.next()?;
    let number = rule.kind.number(url).ok()?;

    let mut entry = EntryReference::new(url, number, mark == 'x');
    if rule.reads_assignee {
        entry.assignee = tokens
            .filter_map(|token| token.strip_prefix('@'))
            .find(|login| !login.is_empty())
            .map(str::to_string);
    }
    Some(entry)
}
