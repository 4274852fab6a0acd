//! GitHub event model and classification
//!
//! This module provides:
//! - Event labels from the `X-GitHub-Event` header
//! - Typed payloads for the events with dedicated formatting
//! - The classifier that picks suppression, formatting, or the fallback

mod classify;
mod kind;
mod payload;

pub use classify::{classify, is_private_repository, Disposition, SuppressReason};
pub use kind::EventKind;
pub use payload::{
    short_ref, short_sha, Commit, CreateEvent, DeleteEvent, GitActor, GitHubEvent, PushEvent,
    RefType, Repository, StarAction, StarEvent, User,
};
