use chrono::NaiveDateTime;

/// Root of one exported chat history. Read-only once loaded.
#[derive(Debug, Clone)]
pub struct ChatExport {
    pub name: String,
    pub kind: String,
    pub id: i64,
    pub messages: Vec<Message>,
}

#[derive(Debug, Clone)]
pub struct Message {
    pub id: i64,
    /// `"message"`, `"service"` or whatever else the exporter emits.
    pub kind: String,
    pub timestamp: NaiveDateTime,
    pub sender: String,
    /// Empty for service messages.
    pub sender_id: String,
    text: String,
    fragments: Vec<TextFragment>,
    pub media_type: String,
    pub photo: String,
    pub forwarded_from: String,
    pub reactions: Vec<Reaction>,
}

impl Message {
    /// Builds a message from an already normalized text payload so that text and
    /// fragments always come from the same source.
    pub fn new(
        id: i64,
        kind: impl Into<String>,
        timestamp: NaiveDateTime,
        text: NormalizedText,
    ) -> Self {
        Self {
            id,
            kind: kind.into(),
            timestamp,
            sender: String::new(),
            sender_id: String::new(),
            text: text.text,
            fragments: text.fragments,
            media_type: String::new(),
            photo: String::new(),
            forwarded_from: String::new(),
            reactions: Vec::new(),
        }
    }

    pub fn with_sender(mut self, name: impl Into<String>, id: impl Into<String>) -> Self {
        self.sender = name.into();
        self.sender_id = id.into();
        self
    }

    pub fn with_media_type(mut self, media_type: impl Into<String>) -> Self {
        self.media_type = media_type.into();
        self
    }

    pub fn with_photo(mut self, photo: impl Into<String>) -> Self {
        self.photo = photo.into();
        self
    }

    pub fn with_forwarded_from(mut self, origin: impl Into<String>) -> Self {
        self.forwarded_from = origin.into();
        self
    }

    pub fn with_reactions(mut self, reactions: Vec<Reaction>) -> Self {
        self.reactions = reactions;
        self
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn fragments(&self) -> &[TextFragment] {
        &self.fragments
    }
}

/// Canonical text plus the typed fragments it was assembled from.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NormalizedText {
    pub text: String,
    pub fragments: Vec<TextFragment>,
}

impl NormalizedText {
    pub fn plain(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            fragments: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextFragment {
    /// `"plain"`, `"mention"`, `"bold"`, `"link"`, ...
    pub kind: String,
    pub text: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reaction {
    pub emoji: String,
    pub count: u32,
    pub kind: String,
    pub recent: Vec<RecentReactor>,
}

/// One entry of the bounded "recent" sample attached to a reaction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecentReactor {
    pub name: String,
    pub id: String,
    pub date: String,
}
