use crate::rope::Span;

/// Which surface encoding a change was written in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TagStyle {
    /// `<edit comment=".."><del>..</del><ins>..</ins></edit>`, the canonical form.
    Combined,
    /// `<del comment=".." replace-with="..">..</del>` and/or `<ins comment="..">..</ins>`.
    Split,
}

/// Per-change review state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    Pending,
    Accepted,
    Rejected,
}

/// One parsed change span.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChangeRecord {
    /// Position in appearance order within the parsed string.
    pub index: usize,
    /// The rationale, entity-unescaped.
    pub comment: String,
    /// Text the change removes. Empty bodies are stored as `None`.
    pub deleted: Option<String>,
    /// Text the change adds. Empty bodies are stored as `None`.
    pub inserted: Option<String>,
    /// Byte offsets of the whole span in the parsed string.
    pub span: Span,
    /// Exact matched text, `&parsed[span]`.
    pub raw: String,
    pub style: TagStyle,
}

impl ChangeRecord {
    /// True if the change carries neither a deletion nor an insertion.
    pub fn is_empty(&self) -> bool {
        self.deleted.is_none() && self.inserted.is_none()
    }

    pub fn deleted_text(&self) -> &str {
        self.deleted.as_deref().unwrap_or_default()
    }

    pub fn inserted_text(&self) -> &str {
        self.inserted.as_deref().unwrap_or_default()
    }

    /// The text this change resolves to under `decision`.
    ///
    /// Pending changes keep their markup.
    pub fn resolve(&self, decision: Decision) -> &str {
        match decision {
            Decision::Pending => &self.raw,
            Decision::Accepted => self.inserted_text(),
            Decision::Rejected => self.deleted_text(),
        }
    }

    /// A copy with the insertion replaced; empty text removes the insertion.
    pub fn with_inserted(&self, text: &str) -> Self {
        Self {
            inserted: non_empty(text),
            ..self.clone()
        }
    }
}

pub(crate) fn non_empty(s: &str) -> Option<String> {
    (!s.is_empty()).then(|| s.to_string())
}
