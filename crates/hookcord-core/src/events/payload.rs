//! Typed views of the GitHub payloads hookcord formats.
//!
//! Only the fields the formatters read are modelled. Deserializing into these
//! types is how a payload gets validated against its declared event label.

use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

/// Repository the event happened in.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Repository {
    pub name: String,
    pub full_name: String,
    pub html_url: String,
    #[serde(default)]
    pub private: bool,
    #[serde(default)]
    pub stargazers_count: u64,
}

/// User that triggered the event (`sender`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub login: String,
    #[serde(default)]
    pub name: Option<String>,
    pub html_url: String,
    pub avatar_url: String,
}

impl User {
    /// Display name, falling back to the login.
    pub fn display_name(&self) -> &str {
        match self.name.as_deref() {
            Some(name) if !name.is_empty() => name,
            _ => &self.login,
        }
    }
}

/// Git identity attached to a commit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GitActor {
    pub name: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub username: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Commit {
    pub id: String,
    pub url: String,
    pub message: String,
    pub timestamp: DateTime<FixedOffset>,
    pub author: GitActor,
    pub committer: GitActor,
}

impl Commit {
    /// First line of the commit message.
    pub fn title(&self) -> &str {
        self.message.lines().next().unwrap_or("")
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PushEvent {
    #[serde(rename = "ref")]
    pub git_ref: String,
    pub before: String,
    pub after: String,
    #[serde(default)]
    pub created: bool,
    #[serde(default)]
    pub deleted: bool,
    #[serde(default)]
    pub forced: bool,
    pub compare: String,
    #[serde(default)]
    pub commits: Vec<Commit>,
    pub repository: Repository,
    pub sender: User,
}

/// Kind of ref a create/delete event refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display, EnumString)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum RefType {
    Branch,
    Tag,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreateEvent {
    #[serde(rename = "ref")]
    pub git_ref: String,
    pub ref_type: RefType,
    #[serde(default)]
    pub master_branch: Option<String>,
    pub repository: Repository,
    pub sender: User,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeleteEvent {
    #[serde(rename = "ref")]
    pub git_ref: String,
    pub ref_type: RefType,
    pub repository: Repository,
    pub sender: User,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum StarAction {
    Created,
    Deleted,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StarEvent {
    pub action: StarAction,
    #[serde(default)]
    pub starred_at: Option<DateTime<FixedOffset>>,
    pub repository: Repository,
    pub sender: User,
}

/// A payload narrowed to one of the event kinds with a dedicated formatter.
#[derive(Debug, Clone, PartialEq)]
pub enum GitHubEvent {
    Push(PushEvent),
    Create(CreateEvent),
    Delete(DeleteEvent),
    Star(StarEvent),
}

impl GitHubEvent {
    pub fn repository(&self) -> &Repository {
        match self {
            Self::Push(e) => &e.repository,
            Self::Create(e) => &e.repository,
            Self::Delete(e) => &e.repository,
            Self::Star(e) => &e.repository,
        }
    }

    pub fn sender(&self) -> &User {
        match self {
            Self::Push(e) => &e.sender,
            Self::Create(e) => &e.sender,
            Self::Delete(e) => &e.sender,
            Self::Star(e) => &e.sender,
        }
    }
}

/// Strip the `refs/heads/` or `refs/tags/` namespace from a ref.
pub fn short_ref(git_ref: &str) -> &str {
    git_ref
        .strip_prefix("refs/heads/")
        .or_else(|| git_ref.strip_prefix("refs/tags/"))
        .unwrap_or(git_ref)
}

/// First seven characters of a commit hash.
pub fn short_sha(sha: &str) -> &str {
    sha.get(..7).unwrap_or(sha)
}
