//! Title synthesis for the chat index.

/// Policy for deriving and refreshing conversation titles.
///
/// A title is synthesized from message content, truncated at a word
/// boundary near the display limit. Generic-title detection is a
/// configurable predicate rather than a hard rule: hosts can adjust
/// the set without touching the session manager.
#[derive(Debug, Clone)]
pub struct TitlePolicy {
    /// Maximum title length in characters
    pub max_len: usize,
    /// How far back from the limit a word boundary is preferred
    pub boundary_window: usize,
    /// Titles shorter than this count as placeholders
    pub min_len: usize,
    /// Exact titles that count as placeholders
    pub generic_titles: Vec<String>,
    /// Title used when content is empty or whitespace-only
    pub default_title: String,
}

impl Default for TitlePolicy {
    fn default() -> Self {
        Self {
            max_len: 50,
            boundary_window: 20,
            min_len: 5,
            generic_titles: ["New Chat", "Chat", "New Conversation"]
                .map(String::from)
                .to_vec(),
            default_title: "New Conversation".into(),
        }
    }
}

impl TitlePolicy {
    /// Derive a title from message content.
    ///
    /// Content at or under the limit is used verbatim (trimmed). Longer
    /// content is cut at the last word boundary inside the allowance
    /// window, or mid-word if none is near enough, with an ellipsis
    /// marker appended. Blank content yields the default title.
    pub fn synthesize(&self, content: &str) -> String {
        let trimmed = content.trim();
        if trimmed.is_empty() {
            return self.default_title.clone();
        }
        if trimmed.chars().count() <= self.max_len {
            return trimmed.to_string();
        }

        let mut truncated: String = trimmed.chars().take(self.max_len).collect();
        if let Some(last_space) = truncated.rfind(' ') {
            let kept = truncated[..last_space].chars().count();
            if kept > 0 && kept > self.max_len.saturating_sub(self.boundary_window) {
                truncated.truncate(last_space);
            }
        }
        truncated.push_str("...");
        truncated
    }

    /// Whether a title still counts as a generic placeholder.
    pub fn is_placeholder(&self, title: &str) -> bool {
        self.generic_titles.iter().any(|t| t == title) || title.chars().count() < self.min_len
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn short_content_is_used_verbatim() {
        let policy = TitlePolicy::default();
        assert_eq!(policy.synthesize("  Hello there  "), "Hello there");
    }

    #[test]
    fn blank_content_yields_default() {
        let policy = TitlePolicy::default();
        assert_eq!(policy.synthesize("   "), "New Conversation");
        assert_eq!(policy.synthesize(""), "New Conversation");
    }

    #[test]
    fn long_content_cuts_at_word_boundary() {
        let policy = TitlePolicy::default();
        let content = "Hello there, how are you doing today my very dear old friend";
        let title = policy.synthesize(content);
        assert!(title.ends_with("..."));
        let body = title.trim_end_matches("...");
        assert!(!body.ends_with(' '));
        assert!(content.starts_with(body));
        // The cut lands on a word boundary, not mid-word.
        assert!(content[body.len()..].starts_with(' '));
        assert!(body.chars().count() <= policy.max_len);
    }

    #[test]
    fn cuts_mid_word_when_no_boundary_in_window() {
        let policy = TitlePolicy::default();
        let content = "a".repeat(80);
        let title = policy.synthesize(&content);
        assert_eq!(title, format!("{}...", "a".repeat(50)));
    }

    #[test]
    fn truncation_is_char_boundary_safe() {
        let policy = TitlePolicy::default();
        let content = "héllo wörld ".repeat(10);
        let title = policy.synthesize(&content);
        assert!(title.ends_with("..."));
        assert!(title.chars().count() <= policy.max_len + 3);
    }

    #[test]
    fn exact_limit_is_not_truncated() {
        let policy = TitlePolicy::default();
        let content = "b".repeat(50);
        assert_eq!(policy.synthesize(&content), content);
    }

    #[test]
    fn placeholder_detection() {
        let policy = TitlePolicy::default();
        assert!(policy.is_placeholder("New Chat"));
        assert!(policy.is_placeholder("New Conversation"));
        assert!(policy.is_placeholder("Hey"));
        assert!(!policy.is_placeholder("Rust borrow checker question"));
    }
}
