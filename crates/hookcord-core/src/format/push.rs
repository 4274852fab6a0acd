use chrono::{DateTime, FixedOffset};

use super::{actor_link, card};
use crate::events::{short_ref, short_sha, Commit, PushEvent};
use crate::message::Component;

pub const PUSH_COLOR: u32 = 0x5865F2;
pub const FORCE_PUSH_COLOR: u32 = 0xFC2A29;

/// Bytes of commit lines shown before the list is cut short.
pub const COMMIT_SECTION_LIMIT: usize = 1000;

/// Appended when commit lines were dropped.
pub const TRUNCATION_MARKER: &str = "...and more.";

pub fn push_components(event: &PushEvent) -> Vec<Component> {
    let repo = &event.repository;
    let target = format!(
        "[{}:{}]({})",
        repo.name,
        short_ref(&event.git_ref),
        repo.html_url
    );

    if event.forced {
        let header = format!(
            "{} force-pushed {} to `{}`.",
            actor_link(&event.sender),
            target,
            short_sha(&event.after)
        );
        return card(Some(FORCE_PUSH_COLOR), Component::text(header), repo);
    }

    let mut lines = vec![format!("{} committed to {}.", actor_link(&event.sender), target)];
    if event.commits.len() > 1 {
        lines.push(format!(
            "[{}...{}]({})",
            short_sha(&event.before),
            short_sha(&event.after),
            event.compare
        ));
    }
    let commits = commit_section(&event.commits);
    if !commits.is_empty() {
        lines.push(commits);
    }

    card(Some(PUSH_COLOR), Component::text(lines.join("\n")), repo)
}

/// One commit: linked short hash, committer, title, and relative time.
pub fn commit_line(commit: &Commit) -> String {
    render_commit(commit, commit.title())
}

fn render_commit(commit: &Commit, title: &str) -> String {
    format!(
        "[`{}`]({}) {}: {} {}",
        short_sha(&commit.id),
        commit.url,
        commit.committer.name,
        title,
        relative_timestamp(&commit.timestamp)
    )
}

/// Commit line with the title cut so the whole line fits in `max_len` bytes.
fn shortened_commit_line(commit: &Commit, max_len: usize) -> Option<String> {
    let frame = render_commit(commit, "").len();
    let room = max_len.checked_sub(frame)?;

    let title = commit.title();
    let mut end = room.min(title.len());
    while !title.is_char_boundary(end) {
        end -= 1;
    }
    Some(render_commit(commit, &title[..end]))
}

/// Discord timestamp markup that renders as "3 hours ago".
pub fn relative_timestamp(timestamp: &DateTime<FixedOffset>) -> String {
    format!("<t:{}:R>", timestamp.timestamp())
}

/// Commit lines joined by newlines, cut at [`COMMIT_SECTION_LIMIT`].
///
/// When lines are dropped the kept lines each end in a newline followed by
/// [`TRUNCATION_MARKER`], so the section never exceeds the limit plus the
/// marker length. The first commit is always shown; if it is too long on its
/// own, its title is shortened.
pub fn commit_section(commits: &[Commit]) -> String {
    let lines: Vec<String> = commits.iter().map(commit_line).collect();

    let total = lines.iter().map(String::len).sum::<usize>() + lines.len().saturating_sub(1);
    if total <= COMMIT_SECTION_LIMIT {
        return lines.join("\n");
    }

    let mut section = String::with_capacity(COMMIT_SECTION_LIMIT + TRUNCATION_MARKER.len());
    for (i, line) in lines.iter().enumerate() {
        if section.len() + line.len() + 1 > COMMIT_SECTION_LIMIT {
            if i == 0 {
                if let Some(first) = shortened_commit_line(&commits[0], COMMIT_SECTION_LIMIT - 1) {
                    section.push_str(&first);
                    section.push('\n');
                }
            }
            break;
        }
        section.push_str(line);
        section.push('\n');
    }
    section.push_str(TRUNCATION_MARKER);
    section
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::format::fixtures::{commit, repository, sender};
    use crate::message::Component;
    use serde_json::{json, Value};

    fn push_event(commits: Vec<Value>, forced: bool, before: &str, after: &str) -> PushEvent {
        serde_json::from_value(json!({
            "ref": "refs/heads/main",
            "before": before,
            "after": after,
            "forced": forced,
            "compare": "https://github.com/octocat/hello-world/compare/x...y",
            "commits": commits,
            "repository": repository(),
            "sender": sender()
        }))
        .unwrap()
    }

    fn container(components: &[Component]) -> &crate::message::Container {
        match components {
            [Component::Container(c)] => c,
            other => panic!("expected one container, got {other:?}"),
        }
    }

    #[test]
    fn test_single_commit() {
        let event = push_event(
            vec![commit("abcdef1234567890", "fix bug\nlonger body")],
            false,
            "0000000",
            "abcdef1",
        );
        let components = push_components(&event);
        let container = container(&components);
        let header = container.components[0].texts()[0];

        assert_eq!(container.accent_color, Some(PUSH_COLOR));
        assert_eq!(
            header,
            "[The Octocat](https://github.com/octocat) committed to \
             [hello-world:main](https://github.com/octocat/hello-world).\n\
             [`abcdef1`](https://github.com/octocat/hello-world/commit/abcdef1234567890) \
             Mona Lisa: fix bug <t:1714557600:R>"
        );
        assert!(!header.contains("longer body"));
        assert!(!header.contains("..."));
    }

    #[test]
    fn test_two_commits_show_compare_range() {
        let event = push_event(
            vec![commit("1111111aaaa", "one"), commit("2222222bbbb", "two")],
            false,
            "aaaa111ffff",
            "bbbb222ffff",
        );
        let components = push_components(&event);
        let text = components[0].texts().join("\n");

        assert!(text.contains(
            "[aaaa111...bbbb222](https://github.com/octocat/hello-world/compare/x...y)"
        ));
        assert!(text.contains("[`1111111`]"));
        assert!(text.contains("[`2222222`]"));
    }

    #[test]
    fn test_forced_push_omits_commits() {
        let event = push_event(
            vec![commit("1111111aaaa", "one")],
            true,
            "aaaa111",
            "cafebabe1234",
        );
        let components = push_components(&event);
        let container = container(&components);
        let header = container.components[0].texts()[0];

        assert_eq!(container.accent_color, Some(FORCE_PUSH_COLOR));
        assert!(header.ends_with(
            "force-pushed [hello-world:main](https://github.com/octocat/hello-world) to `cafebab`."
        ));
        assert!(!header.contains("1111111"));
    }

    #[test]
    fn test_forced_push_without_commits() {
        let event = push_event(vec![], true, "aaaa111", "bbbb222");
        let components = push_components(&event);
        assert!(components[0].texts()[0].contains("force-pushed"));
    }

    #[test]
    fn test_footer_and_separator() {
        let event = push_event(vec![commit("abc1234", "x")], false, "0", "abc1234");
        let components = push_components(&event);
        let container = container(&components);

        assert_eq!(container.components.len(), 3);
        assert!(matches!(container.components[1], Component::Separator(_)));
        assert_eq!(
            container.components[2].texts(),
            vec!["-# [octocat/hello-world](https://github.com/octocat/hello-world)"]
        );
    }

    #[test]
    fn test_commit_section_truncates() {
        let long_message = "m".repeat(120);
        let commits: Vec<Commit> = (0..30)
            .map(|i| {
                serde_json::from_value(commit(&format!("{:07}deadbeef", i), &long_message))
                    .unwrap()
            })
            .collect();

        let full_len: usize = commits.iter().map(|c| commit_line(c).len() + 1).sum();
        assert!(full_len > COMMIT_SECTION_LIMIT);

        let section = commit_section(&commits);
        assert!(section.ends_with(TRUNCATION_MARKER));
        assert!(section.len() <= COMMIT_SECTION_LIMIT + TRUNCATION_MARKER.len());
        assert!(section.starts_with(&commit_line(&commits[0])));
    }

    #[test]
    fn test_oversized_first_commit_keeps_its_hash() {
        let commits: Vec<Commit> = vec![serde_json::from_value(commit(
            "abcdef1234567890",
            &"y".repeat(1100),
        ))
        .unwrap()];

        let section = commit_section(&commits);

        assert!(section.starts_with(
            "[`abcdef1`](https://github.com/octocat/hello-world/commit/abcdef1234567890) \
             Mona Lisa: yyy"
        ));
        assert!(section.contains("<t:1714557600:R>\n"));
        assert!(section.ends_with(TRUNCATION_MARKER));
        assert!(section.len() <= COMMIT_SECTION_LIMIT + TRUNCATION_MARKER.len());
    }

    #[test]
    fn test_oversized_multibyte_title_is_cut_on_a_char_boundary() {
        let commits: Vec<Commit> = vec![
            serde_json::from_value(commit("abcdef1234567890", &"é".repeat(700))).unwrap(),
            serde_json::from_value(commit("1234567abcdef", "second")).unwrap(),
        ];

        let section = commit_section(&commits);

        assert!(section.contains("[`abcdef1`]"));
        assert!(!section.contains("[`1234567`]"));
        assert!(section.len() <= COMMIT_SECTION_LIMIT + TRUNCATION_MARKER.len());
    }

    #[test]
    fn test_commit_section_fits_exactly() {
        let commits: Vec<Commit> = (0..3)
            .map(|i| serde_json::from_value(commit(&format!("{:07}", i), "short")).unwrap())
            .collect();

        let section = commit_section(&commits);
        assert!(!section.contains(TRUNCATION_MARKER));
        assert_eq!(section.lines().count(), 3);
    }

    #[test]
    fn test_relative_timestamp() {
        let ts = DateTime::parse_from_rfc3339("1970-01-01T00:01:40Z").unwrap();
        assert_eq!(relative_timestamp(&ts), "<t:100:R>");
    }
}
