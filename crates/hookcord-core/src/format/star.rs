use super::{actor_link, repository_footer};
use crate::events::StarEvent;
use crate::message::{Component, Container, Section, Separator, TextDisplay, Thumbnail};

pub const STAR_COLOR: u32 = 0xE2B340;

/// Star card with the actor's avatar as the section accessory.
pub fn star_components(event: &StarEvent) -> Vec<Component> {
    let repo = &event.repository;
    let header = format!(
        "{} starred [{}]({})!\nStargazers: {}",
        actor_link(&event.sender),
        repo.name,
        repo.html_url,
        repo.stargazers_count
    );

    let section = Section::new(
        vec![TextDisplay::new(header)],
        Thumbnail::new(event.sender.avatar_url.clone()),
    );

    vec![Container::new(
        Some(STAR_COLOR),
        vec![
            section.into(),
            Separator::divider().into(),
            repository_footer(repo),
        ],
    )
    .into()]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::format::fixtures::{repository, sender};
    use serde_json::json;

    #[test]
    fn test_star_card() {
        let event: StarEvent = serde_json::from_value(json!({
            "action": "created",
            "starred_at": "2024-05-01T10:00:00Z",
            "repository": repository(),
            "sender": sender()
        }))
        .unwrap();

        let components = star_components(&event);
        let Component::Container(container) = &components[0] else {
            panic!("expected container");
        };
        let Component::Section(section) = &container.components[0] else {
            panic!("expected section");
        };

        assert_eq!(container.accent_color, Some(STAR_COLOR));
        assert_eq!(
            section.accessory.media.url,
            "https://avatars.githubusercontent.com/u/583231"
        );
        assert!(section.components[0].content.ends_with("!\nStargazers: 1337"));
        assert!(section.components[0]
            .content
            .starts_with("[The Octocat](https://github.com/octocat) starred"));
    }
}
