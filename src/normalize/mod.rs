//! Category-specific normalizers.
//!
//! One pure transformation per category. slack/email/linkedin are stateful
//! line parsers that rebuild structured records before rendering; the rest
//! are regex pipelines. Every normalizer is total: any input maps to a
//! (possibly empty) string, never an error.

pub mod chat;
pub mod email;
pub mod general;
pub mod linkedin;
pub mod slack;

use regex::Regex;
use tracing::debug;

use crate::classify::Category;

pub use chat::ChatNormalizer;
pub use email::{EmailEntry, EmailNormalizer};
pub use general::GeneralNormalizer;
pub use linkedin::LinkedInNormalizer;
pub use slack::{SlackMessage, SlackNormalizer};

/// All normalizers, compiled once and dispatched by category.
pub struct NormalizerSet {
    slack: SlackNormalizer,
    email: EmailNormalizer,
    chat: ChatNormalizer,
    linkedin: LinkedInNormalizer,
    general: GeneralNormalizer,
    blank_runs: Regex,
    trailing_ws: Regex,
    article_boilerplate: Vec<Regex>,
    docs_boilerplate: Vec<Regex>,
}

impl NormalizerSet {
    pub fn new() -> Self {
        let article_boilerplate = vec![
            Regex::new(r"(?im)^share this article.*").unwrap(),
            Regex::new(r"(?im)^subscribe to.*").unwrap(),
            Regex::new(r"(?im)^\d+\s+(min|minute)s?\s+read.*").unwrap(),
            Regex::new(r"(?im)^tags?:.*").unwrap(),
            Regex::new(r"(?im)^categories?:.*").unwrap(),
        ];
        let docs_boilerplate = vec![
            Regex::new(r"(?im)^table of contents.*").unwrap(),
            Regex::new(r"(?im)^edit this page.*").unwrap(),
            Regex::new(r"(?im)^last updated:.*").unwrap(),
        ];

        Self {
            slack: SlackNormalizer::new(),
            email: EmailNormalizer::new(),
            chat: ChatNormalizer::new(),
            linkedin: LinkedInNormalizer::new(),
            general: GeneralNormalizer::new(),
            blank_runs: Regex::new(r"\n{3,}").unwrap(),
            trailing_ws: Regex::new(r"(?m)[ \t]+$").unwrap(),
            article_boilerplate,
            docs_boilerplate,
        }
    }

    /// Apply the normalizer for `category` to a capture.
    ///
    /// Meeting and shopping captures have no dedicated cleaner and use the
    /// general one.
    pub fn normalize(&self, category: Category, content: &str) -> String {
        let content = content.trim();
        debug!(category = %category, len = content.len(), "Normalizing capture");

        match category {
            Category::Slack => self.slack.normalize(content),
            Category::Email => self.email.normalize(content),
            Category::Chat => self.chat.normalize(content),
            Category::LinkedIn => self.linkedin.normalize(content),
            Category::Code => self.normalize_code(content),
            Category::Article => strip_lines(content, &self.article_boilerplate),
            Category::Documentation => strip_lines(content, &self.docs_boilerplate),
            Category::Meeting | Category::Shopping | Category::General => {
                self.general.normalize(content)
            }
        }
    }

    /// Code keeps its structure; only whitespace is tidied.
    fn normalize_code(&self, content: &str) -> String {
        let without_trailing = self.trailing_ws.replace_all(content, "");
        self.blank_runs
            .replace_all(&without_trailing, "\n\n")
            .trim()
            .to_string()
    }
}

impl Default for NormalizerSet {
    fn default() -> Self {
        Self::new()
    }
}

/// Blank out boilerplate lines, leaving the rest untouched.
fn strip_lines(content: &str, patterns: &[Regex]) -> String {
    let mut out = content.to_string();
    for re in patterns {
        out = re.replace_all(&out, "").to_string();
    }
    out.trim().to_string()
}
