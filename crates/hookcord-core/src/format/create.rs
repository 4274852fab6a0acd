use super::{actor_link, card};
use crate::events::{short_ref, CreateEvent};
use crate::message::Component;

pub const CREATE_COLOR: u32 = 0x57F287;

pub fn create_components(event: &CreateEvent) -> Vec<Component> {
    let repo = &event.repository;
    let name = short_ref(&event.git_ref);
    let header = format!(
        "{} created a {}: [{}]({}/tree/{}) in [{}]({}).",
        actor_link(&event.sender),
        event.ref_type,
        name,
        repo.html_url,
        name,
        repo.name,
        repo.html_url
    );

    card(Some(CREATE_COLOR), Component::text(header), repo)
}
