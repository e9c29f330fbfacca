//! Banned-word filter for comment text.

/// Default banned substrings.
pub const BAD_WORDS: &[&str] = &["редиска", "негодяй"];

/// Field error attached to `text` when a comment is rejected.
pub const WARNING: &str = "Не ругайтесь!";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    Accept,
    Reject { reason: &'static str },
}

/// A fixed set of banned substrings, matched case-sensitively anywhere in
/// the submitted text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModerationFilter {
    banned: Vec<String>,
}

impl Default for ModerationFilter {
    fn default() -> Self {
        Self::new(BAD_WORDS.iter().copied())
    }
}

impl ModerationFilter {
    /// Build a filter from a list of words. Blank entries are dropped.
    pub fn new<I, S>(words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let banned = words
            .into_iter()
            .map(|w| w.as_ref().trim().to_string())
            .filter(|w| !w.is_empty())
            .collect();
        Self { banned }
    }

    pub fn banned_words(&self) -> &[String] {
        &self.banned
    }

    pub fn validate_comment_text(&self, text: &str) -> Verdict {
        if self.banned.iter().any(|word| text.contains(word.as_str())) {
            Verdict::Reject { reason: WARNING }
        } else {
            Verdict::Accept
        }
    }
}
