//! Category classifier: fixed-precedence content-type detection.
//!
//! An ordered rule list, first match wins:
//! slack → linkedin → email → code → chat → documentation → article →
//! meeting → shopping → general.
//!
//! The specific/structural families run before the broad conversational and
//! length-based fallbacks so a Slack export is not mistaken for generic chat
//! and a long article is not caught by the word-count fallback before the
//! vocabulary checks run. Each family predicate matches against both the
//! capture text and the lowercased window-context string.

use regex::Regex;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::context::WindowContext;

/// Semantic category of one capture. Exactly one per capture;
/// `General` is the fallback and is never absent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Slack,
    LinkedIn,
    Email,
    Code,
    Chat,
    Documentation,
    Article,
    Meeting,
    Shopping,
    General,
}

impl Category {
    /// Short label for logging and the output bundle.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Slack => "slack",
            Self::LinkedIn => "linkedin",
            Self::Email => "email",
            Self::Code => "code",
            Self::Chat => "chat",
            Self::Documentation => "documentation",
            Self::Article => "article",
            Self::Meeting => "meeting",
            Self::Shopping => "shopping",
            Self::General => "general",
        }
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Classifier with pre-compiled pattern families.
pub struct Classifier {
    slack_markers: Regex,
    linkedin: Vec<Regex>,
    email: Vec<Regex>,
    email_date: Regex,
    code: Vec<Regex>,
    chat: Vec<Regex>,
    chat_speaker: Regex,
    chat_name_time: Regex,
    chat_you_me: Regex,
    chat_name_colon: Regex,
    documentation: Vec<Regex>,
    article: Vec<Regex>,
    meeting: Vec<Regex>,
    shopping: Vec<Regex>,
}

impl Classifier {
    /// Compile all pattern families once.
    pub fn new() -> Self {
        let linkedin = vec![
            Regex::new(r"linkedin\.com|linkedin").unwrap(),
            Regex::new(r"(?i)years? of experience|skills|connect|endorsement|recommendation")
                .unwrap(),
            Regex::new(r"(?i)view.*profile|professional network|career").unwrap(),
            Regex::new(r"(?i)sent the following|shared a post|commented on").unwrap(),
            Regex::new(r"(?i)\b(ceo|cto|manager|director|engineer|developer|analyst)\s+at\s+")
                .unwrap(),
            Regex::new(r"(?i)(graduated|studied)\s+at\s+").unwrap(),
            Regex::new(r"(?i)\d+\s+(connection|follower)s?").unwrap(),
            Regex::new(r"(?i)premium\s+member|open\s+to\s+work").unwrap(),
        ];

        let email = vec![
            // Mail-client context vocabulary
            Regex::new(r"mail|email|outlook|gmail|thunderbird|yahoo.*mail|protonmail").unwrap(),
            // Structural markers
            Regex::new(r"(?im)^(from|to|subject|cc|bcc):\s*").unwrap(),
            Regex::new(r"(?im)^(dear|hello|hi)\s+[a-z]+,").unwrap(),
            Regex::new(r"(?im)(best regards|sincerely|thanks|cheers),?\s*$").unwrap(),
            Regex::new(r"(?im)^on\s+\w+,.*wrote:").unwrap(),
            // Name <email> headers
            Regex::new(r"\w+\s+<[\w.\-]+@[\w.\-]+>").unwrap(),
            Regex::new(r"(?m)^[\w\s]+<[\w.\-]+@[\w.\-]+>\s*$").unwrap(),
            Regex::new(r"(?m)^\w+,\s+\w+\s+\d+,?\s+\d+:\d+\s*(AM|PM)").unwrap(),
            // Signature and footer boilerplate
            Regex::new(r"(?i)sent from my (iphone|android|mobile)").unwrap(),
            Regex::new(r"(?i)this email was sent to").unwrap(),
            Regex::new(r"(?i)unsubscribe|opt.?out").unwrap(),
            Regex::new(r"(?i)attachments?").unwrap(),
            Regex::new(r"(?i)scanned by gmail").unwrap(),
            // Thread datelines
            Regex::new(r"(?i)(wed|tue|mon|thu|fri|sat|sun),?\s+\w+\s+\d+,?\s+\d+:\d+\s*(AM|PM)")
                .unwrap(),
            Regex::new(r"(?m)^[A-Z][a-z]+\s+[A-Z][a-z]+\s*$").unwrap(),
        ];

        let code = vec![
            Regex::new(r"code|github|gitlab|vscode|webstorm|sublime|atom|vim|neovim").unwrap(),
            Regex::new(r"(function|class|interface|type|enum)\s+\w+").unwrap(),
            Regex::new(r"(import|export|require|from)\s+").unwrap(),
            Regex::new(r"(const|let|var|def|fun|func)\s+\w+").unwrap(),
            Regex::new(r"(public|private|protected|static)\s+").unwrap(),
            Regex::new(r"(?s)\{.*\}").unwrap(),
            Regex::new(r"\w+\s*\([^)]*\)\s*[{:]").unwrap(),
            // No bare `#` here: it would swallow markdown headers before
            // the documentation rule gets a chance to run.
            Regex::new(r"//|/\*|<!--").unwrap(),
            Regex::new(r"(?i)\.(js|ts|py|java|cpp|c|php|rb|go|rs|swift|kt)(\s|$)").unwrap(),
            Regex::new(r"(?m)^\$\s+\w+|npm\s+|pip\s+|git\s+").unwrap(),
        ];

        let chat = vec![
            Regex::new(r"(?i)slack|discord|telegram|whatsapp|teams|zoom|messages|imessage|sms|chat")
                .unwrap(),
            Regex::new(r"(?m)^@\w+|#\w+").unwrap(),
            Regex::new(r"(?i)joined the (channel|room|conversation)").unwrap(),
            Regex::new(r"(?i)(dm|direct message)").unwrap(),
            Regex::new(r"(?m)^\w+:\s+").unwrap(),
            Regex::new(r"(?m)^[A-Z][a-z]+ [A-Z][a-z]+\s*$").unwrap(),
            Regex::new(r"\bemoji\b|:\w+:|[\x{1F600}-\x{1F64F}]").unwrap(),
            Regex::new(r"(?i)thread|reply to this message|replied to").unwrap(),
            Regex::new(r"(?i)status:\s+(online|offline|away|busy)").unwrap(),
            Regex::new(r"(?i)(yesterday|today|now|\d{1,2}:\d{2})\s*(am|pm)?").unwrap(),
            Regex::new(r"(?im)^(you|me):\s+").unwrap(),
            Regex::new(r"(?i)\b(said|says|wrote|replied|responded)\b").unwrap(),
            Regex::new(r"(?m)^\w+\s+\d{1,2}:\d{2}").unwrap(),
            Regex::new(r"(?m)^>\s+").unwrap(),
            Regex::new(r"(?i)in reply to|replying to|thread started").unwrap(),
            Regex::new(r"(?i)has left the|has joined|added.*to|removed.*from").unwrap(),
            Regex::new(r"(?i)forwarded message|forwarded from").unwrap(),
            Regex::new(r"(?i)(call|video|voice)\s+(started|ended|missed)").unwrap(),
        ];

        let documentation = vec![
            Regex::new(r"docs?|documentation|wiki|readme|manual|guide").unwrap(),
            Regex::new(r"(?m)^#{1,6}\s+\w+").unwrap(),
            Regex::new(r"\*\*\w+\*\*|\*\w+\*").unwrap(),
            Regex::new(r"\[.*\]\(.*\)").unwrap(),
            Regex::new(r"```|`\w+`").unwrap(),
            Regex::new(r"(?m)^\s*\d+\.\s+").unwrap(),
            Regex::new(r"(?m)^\s*[-*+]\s+").unwrap(),
            Regex::new(r"(?i)(api|endpoint|parameter|example|usage)").unwrap(),
            Regex::new(r"(?i)getting started|installation|setup").unwrap(),
        ];

        let article = vec![
            Regex::new(r"news|article|blog|medium|substack|techcrunch|verge|reddit").unwrap(),
            Regex::new(r"(?i)(published|author|written by|posted on)").unwrap(),
            Regex::new(r"(?i)(read more|continue reading|breaking|exclusive)").unwrap(),
            Regex::new(r"(?i)^\d+\s+(min|minute)s?\s+read").unwrap(),
            Regex::new(r"(?i)(according to|sources say|reported|announced)").unwrap(),
            Regex::new(r"(?i)\b(update|breaking|developing)\b.*:").unwrap(),
        ];

        let meeting = vec![
            Regex::new(r"calendar|meeting|zoom|teams|webex|event").unwrap(),
            Regex::new(r"(?i)(meeting|call|conference)\s+(scheduled|starts|ends)").unwrap(),
            Regex::new(r"(?i)join.*meeting|meeting.*id").unwrap(),
            Regex::new(r"(?i)(agenda|notes|action items|follow.?up)").unwrap(),
            Regex::new(r"(?i)\b\d{1,2}:\d{2}\s*(am|pm)\b").unwrap(),
            Regex::new(r"(?i)(monday|tuesday|wednesday|thursday|friday|saturday|sunday)").unwrap(),
            Regex::new(r"(?i)attendees?|participants?|organizer").unwrap(),
        ];

        let shopping = vec![
            Regex::new(r"amazon|ebay|shop|store|cart|checkout|product").unwrap(),
            Regex::new(r"(?i)\$\d+\.\d{2}|price|cost|sale|discount|offer").unwrap(),
            Regex::new(r"(?i)(add to cart|buy now|checkout|purchase)").unwrap(),
            Regex::new(r"(?i)(shipping|delivery|returns?)").unwrap(),
            Regex::new(r"(?i)(in stock|out of stock|available)").unwrap(),
            Regex::new(r"(?i)\d+\s+stars?|\d+/5|review").unwrap(),
            Regex::new(r"(?i)(brand|model|size|color|quantity)").unwrap(),
        ];

        Self {
            slack_markers: Regex::new(
                r"(?m)joined #[\w-]+\.|:\w+:|^\w+\s+\d{1,2}:\d{2}\s+(AM|PM)",
            )
            .unwrap(),
            linkedin,
            email,
            email_date: Regex::new(r"\w+,\s+\w+\s+\d+").unwrap(),
            code,
            chat,
            chat_speaker: Regex::new(r"^\w+:\s+").unwrap(),
            chat_name_time: Regex::new(r"^\w+\s+\d{1,2}:\d{2}").unwrap(),
            chat_you_me: Regex::new(r"(?i)^(you|me):").unwrap(),
            chat_name_colon: Regex::new(r"^\w+:").unwrap(),
            documentation,
            article,
            meeting,
            shopping,
        }
    }

    /// Classify one capture. Total: always returns a category.
    pub fn classify(&self, content: &str, context: &WindowContext) -> Category {
        let ctx = context.haystack();

        // Precedence order is load-bearing; do not reorder.
        let category = if ctx.contains("slack") || self.is_slack_content(content) {
            Category::Slack
        } else if self.is_linkedin(content, &ctx, context) {
            Category::LinkedIn
        } else if self.is_email(content, &ctx) {
            Category::Email
        } else if self.is_code(content, &ctx, context) {
            Category::Code
        } else if self.is_chat(content, &ctx) {
            Category::Chat
        } else if self.is_documentation(content, &ctx, context) {
            Category::Documentation
        } else if self.is_article(content, &ctx, context) {
            Category::Article
        } else if self.is_meeting(content, &ctx) {
            Category::Meeting
        } else if self.is_shopping(content, &ctx) {
            Category::Shopping
        } else {
            Category::General
        };

        debug!(category = %category, app = %context.app, "Capture classified");
        category
    }

    /// Slack-specific shape markers: channel joins, `:emoji:` codes,
    /// `user HH:MM AM/PM` message headers.
    pub fn is_slack_content(&self, content: &str) -> bool {
        self.slack_markers.is_match(content)
    }

    fn is_linkedin(&self, content: &str, ctx: &str, context: &WindowContext) -> bool {
        context.is_linkedin() || matches_any(&self.linkedin, content, ctx)
    }

    fn is_email(&self, content: &str, ctx: &str) -> bool {
        // Heuristic: an @ plus quoting or a dateline reads like a thread
        // even when no single structural marker fires.
        let has_email_structure = content.contains('@')
            && (content.contains("wrote:")
                || content.contains("to ")
                || self.email_date.is_match(content));

        matches_any(&self.email, content, ctx) || has_email_structure
    }

    fn is_code(&self, content: &str, ctx: &str, context: &WindowContext) -> bool {
        context.is_code_editor() || matches_any(&self.code, content, ctx)
    }

    fn is_chat(&self, content: &str, ctx: &str) -> bool {
        let lines: Vec<&str> = content
            .lines()
            .filter(|line| !line.trim().is_empty())
            .collect();

        // ≥2 lines shaped like `Name: message` or `Name HH:MM`
        let has_multiple_speakers = lines
            .iter()
            .filter(|line| {
                self.chat_speaker.is_match(line) || self.chat_name_time.is_match(line)
            })
            .count()
            >= 2;

        // Alternating you/me against another named speaker
        let has_back_and_forth = lines.len() >= 4
            && lines.iter().any(|line| self.chat_you_me.is_match(line))
            && lines.iter().any(|line| {
                self.chat_name_colon.is_match(line) && !self.chat_you_me.is_match(line)
            });

        matches_any(&self.chat, content, ctx) || has_multiple_speakers || has_back_and_forth
    }

    fn is_documentation(&self, content: &str, ctx: &str, context: &WindowContext) -> bool {
        context.is_document_editor() || matches_any(&self.documentation, content, ctx)
    }

    fn is_article(&self, content: &str, ctx: &str, context: &WindowContext) -> bool {
        // Length fallback: long-form prose defaults to article
        let is_long_form = content.split_whitespace().count() > 200;
        context.is_news_source() || matches_any(&self.article, content, ctx) || is_long_form
    }

    fn is_meeting(&self, content: &str, ctx: &str) -> bool {
        matches_any(&self.meeting, content, ctx)
    }

    fn is_shopping(&self, content: &str, ctx: &str) -> bool {
        matches_any(&self.shopping, content, ctx)
    }
}

impl Default for Classifier {
    fn default() -> Self {
        Self::new()
    }
}

fn matches_any(patterns: &[Regex], content: &str, ctx: &str) -> bool {
    patterns
        .iter()
        .any(|re| re.is_match(content) || re.is_match(ctx))
}
