//! Turn GitHub events into Discord components.
//!
//! Every dedicated formatter renders the same card: a container with a header
//! naming the actor and what they did, a divider, and a subtext footer linking
//! the repository. Formatters are pure and cannot fail on a payload that
//! deserialized into its typed event.

mod create;
mod delete;
mod fallback;
mod push;
mod star;

pub use create::{create_components, CREATE_COLOR};
pub use delete::delete_components;
pub use fallback::{fallback_components, MAX_FALLBACK_PREVIEW_CHARS};
pub use push::{
    commit_line, commit_section, push_components, relative_timestamp, COMMIT_SECTION_LIMIT,
    FORCE_PUSH_COLOR, PUSH_COLOR, TRUNCATION_MARKER,
};
pub use star::{star_components, STAR_COLOR};

use crate::events::{GitHubEvent, Repository, User};
use crate::message::{Component, Container, Separator};

/// Render a typed event with its dedicated formatter.
pub fn format_event(event: &GitHubEvent) -> Vec<Component> {
    match event {
        GitHubEvent::Push(e) => push_components(e),
        GitHubEvent::Create(e) => create_components(e),
        GitHubEvent::Delete(e) => delete_components(e),
        GitHubEvent::Star(e) => star_components(e),
    }
}

/// Markdown link to the actor's profile.
pub(crate) fn actor_link(user: &User) -> String {
    format!("[{}]({})", user.display_name(), user.html_url)
}

/// De-emphasised footer linking the repository by full name.
pub(crate) fn repository_footer(repo: &Repository) -> Component {
    Component::text(format!("-# [{}]({})", repo.full_name, repo.html_url))
}

/// Header, divider, footer inside one container.
pub(crate) fn card(accent_color: Option<u32>, header: Component, repo: &Repository) -> Vec<Component> {
    vec![Container::new(
        accent_color,
        vec![header, Separator::divider().into(), repository_footer(repo)],
    )
    .into()]
}
