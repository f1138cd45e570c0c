//! Window context: where a capture came from.
//!
//! Supplied by the external active-window collaborator. The pipeline treats
//! it as read-only evidence for classification and never mutates it.

use regex::Regex;
use serde::{Deserialize, Serialize};

/// Source application context for one capture.
///
/// Unknown fields default to the empty string; the pipeline never assumes
/// any field is populated.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WindowContext {
    /// Frontmost application name (e.g. "Slack", "Google Chrome").
    pub app: String,
    /// Active window title.
    pub title: String,
    /// Page URL, when the collaborator could extract one.
    pub url: String,
}

impl WindowContext {
    /// Create a context from its three fields.
    pub fn new(app: impl Into<String>, title: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            app: app.into(),
            title: title.into(),
            url: url.into(),
        }
    }

    /// Lowercased "app title url" string used by classifier context checks.
    pub fn haystack(&self) -> String {
        format!("{} {} {}", self.app, self.title, self.url).to_lowercase()
    }

    /// Human-readable source label for the output bundle.
    pub fn source_label(&self) -> String {
        format!("{} - {}", self.app, self.title)
    }

    /// Is the capture coming from a LinkedIn page or window?
    pub fn is_linkedin(&self) -> bool {
        self.url.to_lowercase().contains("linkedin.com")
            || self.title.to_lowercase().contains("linkedin")
    }

    /// Is the frontmost app a code editor?
    pub fn is_code_editor(&self) -> bool {
        const CODE_APPS: &[&str] = &[
            "code", "vscode", "sublime", "atom", "webstorm", "intellij", "cursor", "vim",
            "neovim", "emacs",
        ];
        let app = self.app.to_lowercase();
        CODE_APPS.iter().any(|name| app.contains(name))
    }

    /// Does the title or URL point at a news/blog platform?
    pub fn is_news_source(&self) -> bool {
        const NEWS_MARKERS: &[&str] = &[
            "news",
            "article",
            "blog",
            "post",
            "medium.com",
            "substack.com",
            "techcrunch",
            "verge",
            "ycombinator",
            "reddit.com",
            "hacker news",
            "hackernews",
        ];
        let haystack = format!("{} {}", self.title, self.url).to_lowercase();
        NEWS_MARKERS.iter().any(|m| haystack.contains(m))
    }

    /// Is the frontmost app a web browser?
    pub fn is_browser(&self) -> bool {
        const BROWSERS: &[&str] = &["safari", "chrome", "firefox", "edge", "arc"];
        let app = self.app.to_lowercase();
        BROWSERS.iter().any(|name| app.contains(name))
    }

    /// Is the frontmost app a document/writing tool?
    pub fn is_document_editor(&self) -> bool {
        const DOC_APPS: &[&str] = &["word", "pages", "google docs", "notion", "obsidian", "roam"];
        let app = self.app.to_lowercase();
        let title = self.title.to_lowercase();
        DOC_APPS
            .iter()
            .any(|name| app.contains(name) || title.contains(name))
    }
}

/// Pull the first http(s) URL out of a window title, if any.
///
/// Browser collaborators often only expose the title; some embed the URL.
pub fn extract_url_from_title(title: &str) -> String {
    let url_re = Regex::new(r"https?://\S+").unwrap();
    url_re
        .find(title)
        .map(|m| m.as_str().to_string())
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn haystack_is_lowercased() {
        let ctx = WindowContext::new("Slack", "Team Chat", "");
        assert_eq!(ctx.haystack(), "slack team chat ");
    }

    #[test]
    fn source_label_format() {
        let ctx = WindowContext::new("Mail", "Inbox", "");
        assert_eq!(ctx.source_label(), "Mail - Inbox");
    }

    #[test]
    fn detects_linkedin_by_url_or_title() {
        assert!(WindowContext::new("Chrome", "", "https://www.linkedin.com/in/x").is_linkedin());
        assert!(WindowContext::new("Safari", "Jane Doe | LinkedIn", "").is_linkedin());
        assert!(!WindowContext::new("Chrome", "GitHub", "https://github.com").is_linkedin());
    }

    #[test]
    fn detects_code_editor() {
        assert!(WindowContext::new("Visual Studio Code", "main.rs", "").is_code_editor());
        assert!(WindowContext::new("Cursor", "", "").is_code_editor());
        assert!(!WindowContext::new("Mail", "", "").is_code_editor());
    }

    #[test]
    fn detects_news_source_from_title_and_url() {
        assert!(WindowContext::new("Arc", "Some blog post", "").is_news_source());
        assert!(WindowContext::new("Firefox", "", "https://medium.com/@a/b").is_news_source());
        assert!(!WindowContext::new("Firefox", "Dashboard", "https://example.com").is_news_source());
    }

    #[test]
    fn detects_browser_and_document_editor() {
        assert!(WindowContext::new("Google Chrome", "", "").is_browser());
        assert!(WindowContext::new("Notion", "", "").is_document_editor());
        assert!(WindowContext::new("Mail", "Notes in Notion", "").is_document_editor());
    }

    #[test]
    fn extracts_url_from_title() {
        assert_eq!(
            extract_url_from_title("Docs — https://example.com/page?x=1 — Chrome"),
            "https://example.com/page?x=1"
        );
        assert_eq!(extract_url_from_title("no url here"), "");
    }
}
