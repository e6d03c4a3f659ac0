//! Message composer: maps a recipient display name to subject and body.

/// Composes the outgoing subject line and body text.
///
/// The subject base and body text come from configuration; the only
/// per-recipient variation is the display name. Absence of a name is
/// decided upstream (see `recipient::normalize_display_name`), so this
/// component only branches on `Option`.
#[derive(Debug, Clone)]
pub struct MessageComposer {
    subject_base: String,
    body_text: String,
}

impl MessageComposer {
    pub fn new(subject_base: impl Into<String>, body_text: impl Into<String>) -> Self {
        Self {
            subject_base: subject_base.into(),
            body_text: body_text.into(),
        }
    }

    /// Subject line; the display name is appended when present.
    pub fn subject(&self, display_name: Option<&str>) -> String {
        match display_name {
            Some(name) => format!("{} - {}", self.subject_base, name),
            None => self.subject_base.clone(),
        }
    }

    /// Body text with a per-recipient salutation line.
    pub fn body(&self, display_name: Option<&str>) -> String {
        let salutation = match display_name {
            Some(name) => format!("Dear {} hiring team,", name),
            None => "Dear hiring team,".to_string(),
        };
        format!("{}\n\n{}", salutation, self.body_text)
    }
}
