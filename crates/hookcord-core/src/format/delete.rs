use super::{actor_link, card};
use crate::events::{short_ref, DeleteEvent};
use crate::message::Component;

pub fn delete_components(event: &DeleteEvent) -> Vec<Component> {
    let repo = &event.repository;
    let header = format!(
        "{} deleted a {}: `{}` in [{}]({}).",
        actor_link(&event.sender),
        event.ref_type,
        short_ref(&event.git_ref),
        repo.name,
        repo.html_url
    );

    card(None, Component::text(header), repo)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::format::fixtures::{repository, sender};
    use crate::message::Component;
    use serde_json::json;

    #[test]
    fn test_delete_branch() {
        let mut actor = sender();
        actor["name"] = serde_json::Value::Null;

        let event: DeleteEvent = serde_json::from_value(json!({
            "ref": "refs/heads/feature/login",
            "ref_type": "branch",
            "repository": repository(),
            "sender": actor
        }))
        .unwrap();

        let components = delete_components(&event);
        let Component::Container(container) = &components[0] else {
            panic!("expected container");
        };

        assert_eq!(container.accent_color, None);
        assert_eq!(
            container.components[0].texts(),
            vec![
                "[octocat](https://github.com/octocat) deleted a branch: `feature/login` in \
                 [hello-world](https://github.com/octocat/hello-world)."
            ]
        );
    }
}
