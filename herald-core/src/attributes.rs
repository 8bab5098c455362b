//! Typed event payloads.
//!
//! Subsystems attach rich content to an event alongside its text: an embed,
//! one file, or several files. Those well-known kinds get dedicated typed
//! slots on [`Attributes`]; anything else goes into the extension map as an
//! [`AttributeValue`].

use std::{collections::BTreeMap, io::Cursor, sync::Arc};

/// A single field of an [`Embed`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmbedField {
    /// Field title.
    pub name: String,
    /// Field body.
    pub value: String,
    /// Whether the field may share a row with its neighbours.
    pub inline: bool,
}

/// A rich embed attached to an outbound message.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Embed {
    /// Title line.
    pub title: Option<String>,
    /// Main body text.
    pub description: Option<String>,
    /// Sidebar colour as `0xRRGGBB`.
    pub color: Option<u32>,
    /// Additional fields, in display order.
    pub fields: Vec<EmbedField>,
    /// Footer text.
    pub footer: Option<String>,
}

impl Embed {
    /// Create an empty embed.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the title.
    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Set the description.
    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Set the sidebar colour.
    pub fn color(mut self, color: u32) -> Self {
        self.color = Some(color);
        self
    }

    /// Append a field.
    pub fn field(mut self, name: impl Into<String>, value: impl Into<String>, inline: bool) -> Self {
        self.fields.push(EmbedField {
            name: name.into(),
            value: value.into(),
            inline,
        });
        self
    }

    /// Set the footer text.
    pub fn footer(mut self, footer: impl Into<String>) -> Self {
        self.footer = Some(footer.into());
        self
    }
}

/// A file attached to an outbound message.
///
/// The bytes are shared and immutable. Every clone hands out its own
/// reader, so the same attachment can be delivered to several channels
/// without one delivery exhausting the stream of another.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attachment {
    filename: String,
    data: Arc<[u8]>,
}

impl Attachment {
    /// Create an attachment from a filename and its contents.
    pub fn new(filename: impl Into<String>, data: impl Into<Arc<[u8]>>) -> Self {
        Self {
            filename: filename.into(),
            data: data.into(),
        }
    }

    /// The filename presented to recipients.
    pub fn filename(&self) -> &str {
        &self.filename
    }

    /// The raw contents.
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// Size in bytes.
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Whether the attachment has no contents.
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// A fresh reader positioned at the start of the contents.
    pub fn reader(&self) -> Cursor<Arc<[u8]>> {
        Cursor::new(Arc::clone(&self.data))
    }
}

/// A value in the attribute extension map.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AttributeValue {
    /// Free-form text, e.g. an icon name.
    Text(String),
    /// An integer, e.g. a user or message id.
    Integer(i64),
    /// A boolean flag.
    Flag(bool),
}

impl AttributeValue {
    /// The text value, if this is [`AttributeValue::Text`].
    pub fn as_text(&self) -> Option<&str> {
        match self {
            AttributeValue::Text(text) => Some(text),
            _ => None,
        }
    }
}

impl From<&str> for AttributeValue {
    fn from(value: &str) -> Self {
        AttributeValue::Text(value.to_string())
    }
}

impl From<String> for AttributeValue {
    fn from(value: String) -> Self {
        AttributeValue::Text(value)
    }
}

impl From<i64> for AttributeValue {
    fn from(value: i64) -> Self {
        AttributeValue::Integer(value)
    }
}

impl From<bool> for AttributeValue {
    fn from(value: bool) -> Self {
        AttributeValue::Flag(value)
    }
}

/// The payload carried by an event besides its text content.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Attributes {
    /// Rich embed.
    pub embed: Option<Embed>,
    /// A single file.
    pub file: Option<Attachment>,
    /// Several files.
    pub files: Option<Vec<Attachment>>,
    /// Open extension map for everything else.
    pub extra: BTreeMap<String, AttributeValue>,
}

impl Attributes {
    /// Empty attributes.
    pub fn new() -> Self {
        Self::default()
    }

    /// Attach an embed.
    pub fn with_embed(mut self, embed: Embed) -> Self {
        self.embed = Some(embed);
        self
    }

    /// Attach a single file.
    pub fn with_file(mut self, file: Attachment) -> Self {
        self.file = Some(file);
        self
    }

    /// Attach several files.
    pub fn with_files(mut self, files: impl IntoIterator<Item = Attachment>) -> Self {
        self.files = Some(files.into_iter().collect());
        self
    }

    /// Set an extension attribute.
    pub fn with(mut self, key: impl Into<String>, value: impl Into<AttributeValue>) -> Self {
        self.extra.insert(key.into(), value.into());
        self
    }

    /// Look up an extension attribute.
    pub fn get(&self, key: &str) -> Option<&AttributeValue> {
        self.extra.get(key)
    }

    /// Whether no attribute at all is set.
    pub fn is_empty(&self) -> bool {
        self.embed.is_none() && self.file.is_none() && self.files.is_none() && self.extra.is_empty()
    }
}
