use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EmailDraft {
    pub subject: String,
    pub body: String,
}

impl EmailDraft {
    pub fn new(subject: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            subject: subject.into(),
            body: body.into(),
        }
    }

    /// Both fields carry visible text.
    pub fn is_complete(&self) -> bool {
        !self.subject.trim().is_empty() && !self.body.trim().is_empty()
    }

    /// Plain-text rendering used for copying a draft elsewhere.
    pub fn to_clipboard_text(&self) -> String {
        format!("Subject: {}\n\n{}", self.subject, self.body)
    }
}

/// The committed draft plus the scratch copy that exists only while editing.
#[derive(Debug, Clone, Default)]
pub struct DraftStore {
    current: Option<EmailDraft>,
    buffer: Option<EmailDraft>,
}

impl DraftStore {
    pub fn current(&self) -> Option<&EmailDraft> {
        self.current.as_ref()
    }

    pub fn replace(&mut self, draft: EmailDraft) {
        self.current = Some(draft);
        self.buffer = None;
    }

    pub fn begin_edit(&mut self) -> bool {
        match &self.current {
            Some(draft) => {
                self.buffer = Some(draft.clone());
                true
            }
            None => false,
        }
    }

    pub fn buffer(&self) -> Option<&EmailDraft> {
        self.buffer.as_ref()
    }

    pub fn buffer_mut(&mut self) -> Option<&mut EmailDraft> {
        self.buffer.as_mut()
    }

    pub fn commit(&mut self, subject: String, body: String) {
        self.current = Some(EmailDraft { subject, body });
        self.buffer = None;
    }

    pub fn discard(&mut self) {
        self.buffer = None;
    }
}
