//! Discord message components (the "components v2" layout blocks).

use serde::{Serialize, Serializer};

/// Numeric component type as Discord expects it on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum ComponentType {
    Section = 9,
    TextDisplay = 10,
    Thumbnail = 11,
    Separator = 14,
    Container = 17,
}

impl Serialize for ComponentType {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u8(*self as u8)
    }
}

/// Padding around a separator. Only the small size is drawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum SeparatorSpacing {
    Small = 1,
}

impl Serialize for SeparatorSpacing {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u8(*self as u8)
    }
}

/// Markdown text block.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TextDisplay {
    #[serde(rename = "type")]
    kind: ComponentType,
    pub content: String,
}

impl TextDisplay {
    pub fn new(content: impl Into<String>) -> Self {
        Self {
            kind: ComponentType::TextDisplay,
            content: content.into(),
        }
    }
}

/// Vertical gap, optionally drawn as a line.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Separator {
    #[serde(rename = "type")]
    kind: ComponentType,
    pub divider: bool,
    pub spacing: SeparatorSpacing,
}

impl Separator {
    pub fn new(divider: bool, spacing: SeparatorSpacing) -> Self {
        Self {
            kind: ComponentType::Separator,
            divider,
            spacing,
        }
    }

    /// A thin line with small padding.
    pub fn divider() -> Self {
        Self::new(true, SeparatorSpacing::Small)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UnfurledMedia {
    pub url: String,
}

/// Small image shown as a section accessory.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Thumbnail {
    #[serde(rename = "type")]
    kind: ComponentType,
    pub media: UnfurledMedia,
}

impl Thumbnail {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            kind: ComponentType::Thumbnail,
            media: UnfurledMedia { url: url.into() },
        }
    }
}

/// Text blocks with an accessory shown next to them.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Section {
    #[serde(rename = "type")]
    kind: ComponentType,
    pub components: Vec<TextDisplay>,
    pub accessory: Thumbnail,
}

impl Section {
    pub fn new(components: Vec<TextDisplay>, accessory: Thumbnail) -> Self {
        Self {
            kind: ComponentType::Section,
            components,
            accessory,
        }
    }
}

/// Bordered group of components with an optional accent colour.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Container {
    #[serde(rename = "type")]
    kind: ComponentType,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub accent_color: Option<u32>,
    pub components: Vec<Component>,
}

impl Container {
    pub fn new(accent_color: Option<u32>, components: Vec<Component>) -> Self {
        Self {
            kind: ComponentType::Container,
            accent_color,
            components,
        }
    }
}

/// Any layout block that can appear in a message.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Component {
    Container(Container),
    Section(Section),
    TextDisplay(TextDisplay),
    Separator(Separator),
    Thumbnail(Thumbnail),
}

impl Component {
    /// Shorthand for a text block.
    pub fn text(content: impl Into<String>) -> Self {
        Self::TextDisplay(TextDisplay::new(content))
    }

    pub fn kind(&self) -> ComponentType {
        match self {
            Self::Container(_) => ComponentType::Container,
            Self::Section(_) => ComponentType::Section,
            Self::TextDisplay(_) => ComponentType::TextDisplay,
            Self::Separator(_) => ComponentType::Separator,
            Self::Thumbnail(_) => ComponentType::Thumbnail,
        }
    }

    /// Number of components in this subtree, itself included.
    pub fn count(&self) -> usize {
        match self {
            Self::Container(c) => 1 + c.components.iter().map(Component::count).sum::<usize>(),
            // texts + accessory + the section itself
            Self::Section(s) => 2 + s.components.len(),
            _ => 1,
        }
    }

    /// Every text block content in this subtree, in display order.
    pub fn texts(&self) -> Vec<&str> {
        let mut out = Vec::new();
        self.collect_texts(&mut out);
        out
    }

    fn collect_texts<'a>(&'a self, out: &mut Vec<&'a str>) {
        match self {
            Self::Container(c) => c.components.iter().for_each(|c| c.collect_texts(out)),
            Self::Section(s) => out.extend(s.components.iter().map(|t| t.content.as_str())),
            Self::TextDisplay(t) => out.push(&t.content),
            Self::Separator(_) | Self::Thumbnail(_) => {}
        }
    }
}

impl From<Container> for Component {
    fn from(c: Container) -> Self {
        Self::Container(c)
    }
}

impl From<Section> for Component {
    fn from(s: Section) -> Self {
        Self::Section(s)
    }
}

impl From<TextDisplay> for Component {
    fn from(t: TextDisplay) -> Self {
        Self::TextDisplay(t)
    }
}

impl From<Separator> for Component {
    fn from(s: Separator) -> Self {
        Self::Separator(s)
    }
}
