//! Slack normalizer: rebuilds discrete messages from a flattened copy.
//!
//! A Slack copy arrives as boundary-ambiguous lines: usernames, timestamps,
//! message text, reaction codes, and channel noise all flattened together.
//! The scanner walks the lines with one-to-two lines of lookahead, builds
//! `SlackMessage` records, and renders one line per message.

use regex::Regex;

/// One reconstructed Slack message. Scoped to a single normalizer run.
#[derive(Debug, Clone, Default)]
pub struct SlackMessage {
    pub user: String,
    pub timestamp: Option<String>,
    pub lines: Vec<String>,
    pub reactions: Vec<String>,
}

/// Reactions dropped at render time. Present on nearly every message,
/// carry no signal.
const EXCLUDED_REACTIONS: &[&str] = &["white_check_mark", "raised_hands"];

/// Max reactions kept per rendered message.
const MAX_REACTIONS: usize = 2;

pub struct SlackNormalizer {
    channel_event: Regex,
    pure_number: Regex,
    bare_emoji_code: Regex,
    pure_emoji: Regex,
    am_pm_only: Regex,
    bare_channel: Regex,
    bare_timestamp: Regex,
    user_timestamp: Regex,
    username: Regex,
    reaction_code: Regex,
    emoji_with_count: Regex,
    leading_timestamp: Regex,
    presence_word: Regex,
}

impl SlackNormalizer {
    pub fn new() -> Self {
        let emoji = r"[\x{1F600}-\x{1F64F}\x{1F300}-\x{1F5FF}\x{1F680}-\x{1F6FF}\x{1F1E0}-\x{1F1FF}]";
        Self {
            channel_event: Regex::new(r"(?i)^(joined|left) #[\w-]+\.?$").unwrap(),
            pure_number: Regex::new(r"^\s*\d+\s*$").unwrap(),
            bare_emoji_code: Regex::new(r"^:\w+:$").unwrap(),
            pure_emoji: Regex::new(&format!(r"^{emoji}+\s*$")).unwrap(),
            am_pm_only: Regex::new(r"(?i)^(AM|PM)$").unwrap(),
            bare_channel: Regex::new(r"^#[\w-]+$").unwrap(),
            bare_timestamp: Regex::new(r"(?i)^\d{1,2}:\d{2}\s*(AM|PM)?$").unwrap(),
            user_timestamp: Regex::new(
                r"(?i)^([a-zA-Z][a-zA-Z0-9._-]*)\s+(\d{1,2}:\d{2}\s*(AM|PM))$",
            )
            .unwrap(),
            username: Regex::new(r"^[a-zA-Z][a-zA-Z0-9._-]*$").unwrap(),
            reaction_code: Regex::new(r"^:[\w_]+:\s*\d*$").unwrap(),
            emoji_with_count: Regex::new(&format!(r"^{emoji}+\s*\d*$")).unwrap(),
            leading_timestamp: Regex::new(r"(?i)^(\d{1,2}:\d{2}\s*(AM|PM)?)\s+(.+)$").unwrap(),
            presence_word: Regex::new(r"(?i)^(typing|online|offline|away|busy)$").unwrap(),
        }
    }

    /// Normalize a Slack-shaped capture. Total; empty input yields "".
    pub fn normalize(&self, content: &str) -> String {
        let lines: Vec<&str> = content.lines().collect();
        let messages = self.parse(&lines);
        self.render(&messages)
    }

    /// Is this line pure noise (system events, counts, bare glyphs)?
    fn is_noise(&self, line: &str) -> bool {
        self.channel_event.is_match(line)
            || self.pure_number.is_match(line)
            || self.bare_emoji_code.is_match(line)
            || self.pure_emoji.is_match(line)
            || self.am_pm_only.is_match(line)
            || self.bare_channel.is_match(line)
    }

    /// Could this line be part of a message structure rather than content?
    fn is_structural(&self, line: &str) -> bool {
        self.username.is_match(line) || self.bare_timestamp.is_match(line)
    }

    /// Scan lines into messages. Two states: no message open, message open.
    fn parse(&self, lines: &[&str]) -> Vec<SlackMessage> {
        let mut messages = Vec::new();
        let mut current: Option<SlackMessage> = None;
        let mut i = 0;

        let mut flush = |current: &mut Option<SlackMessage>, messages: &mut Vec<SlackMessage>| {
            if let Some(msg) = current.take() {
                if !msg.lines.is_empty() {
                    messages.push(msg);
                }
            }
        };

        while i < lines.len() {
            let line = lines[i].trim();

            if line.is_empty() || self.is_noise(line) {
                i += 1;
                continue;
            }

            // Standalone timestamp: drop unless something content-like follows
            // (then it falls through and is kept as message text).
            if self.bare_timestamp.is_match(line) {
                let has_content_after = lines
                    .get(i + 1)
                    .map(|next| {
                        let next = next.trim();
                        !next.is_empty() && !self.is_structural(next)
                    })
                    .unwrap_or(false);
                if !has_content_after {
                    i += 1;
                    continue;
                }
            }

            // `user HH:MM AM` header opens a new message
            if let Some(caps) = self.user_timestamp.captures(line) {
                flush(&mut current, &mut messages);
                current = Some(SlackMessage {
                    user: caps[1].to_string(),
                    timestamp: Some(caps[2].to_string()),
                    ..Default::default()
                });
                i += 1;
                continue;
            }

            // Bare username line: open a message only if a timestamp or
            // content-like line follows.
            if self.username.is_match(line) {
                let next = lines.get(i + 1).map(|l| l.trim()).unwrap_or("");
                let (timestamp, skip) = if self.bare_timestamp.is_match(next) && !next.is_empty() {
                    (Some(next.to_string()), 2)
                } else {
                    (None, 1)
                };

                let content_line = lines.get(i + skip).map(|l| l.trim()).unwrap_or("");
                let has_content = !content_line.is_empty() && !self.is_structural(content_line);

                if has_content || timestamp.is_some() {
                    flush(&mut current, &mut messages);
                    current = Some(SlackMessage {
                        user: line.to_string(),
                        timestamp,
                        ..Default::default()
                    });
                    i += skip;
                    continue;
                }
            }

            // `:code:` reaction lines attach to the open message
            if self.reaction_code.is_match(line) {
                if let Some(msg) = current.as_mut() {
                    let reaction = strip_trailing_count(line);
                    if !reaction.is_empty() {
                        msg.reactions.push(reaction);
                    }
                    i += 1;
                    continue;
                }
            }

            // Raw emoji reaction lines are consumed either way
            if self.emoji_with_count.is_match(line) {
                if let Some(msg) = current.as_mut() {
                    msg.reactions.push(strip_trailing_count(line));
                }
                i += 1;
                continue;
            }

            match current.as_mut() {
                Some(msg) => {
                    // Strip a leading timestamp only when the message already
                    // has one of its own.
                    let text = match self.leading_timestamp.captures(line) {
                        Some(caps) if msg.timestamp.is_some() => caps[3].to_string(),
                        _ => line.to_string(),
                    };
                    if !text.is_empty() {
                        msg.lines.push(text);
                    }
                }
                None => {
                    // Unattributed content opens a message if it looks
                    // substantial.
                    if line.chars().count() > 5
                        && !self.presence_word.is_match(line)
                        && !self.username.is_match(line)
                    {
                        current = Some(SlackMessage {
                            lines: vec![line.to_string()],
                            ..Default::default()
                        });
                    }
                }
            }

            i += 1;
        }

        flush(&mut current, &mut messages);
        messages
    }

    /// Render one line per message: `user timestamp: text (r1, r2)`.
    fn render(&self, messages: &[SlackMessage]) -> String {
        let rendered: Vec<String> = messages
            .iter()
            .map(|msg| {
                let mut out = String::new();

                if !msg.user.is_empty() {
                    match &msg.timestamp {
                        Some(ts) => out.push_str(&format!("{} {}: ", msg.user, ts)),
                        None => out.push_str(&format!("{}: ", msg.user)),
                    }
                }

                let text = msg.lines.join(" ");
                let text = text.split_whitespace().collect::<Vec<_>>().join(" ");
                out.push_str(&text);

                let reactions = clean_reactions(&msg.reactions);
                if !reactions.is_empty() {
                    out.push_str(&format!(" ({})", reactions.join(", ")));
                }

                out
            })
            .filter(|line| !line.trim().is_empty())
            .collect();

        rendered.join("\n")
    }
}

impl Default for SlackNormalizer {
    fn default() -> Self {
        Self::new()
    }
}

/// Drop a trailing reaction count ("`:tada: 3`" → "`:tada:`").
fn strip_trailing_count(line: &str) -> String {
    line.trim_end_matches(|c: char| c.is_ascii_digit())
        .trim()
        .to_string()
}

/// De-duplicate, strip colons, drop low-signal reactions, cap at two.
fn clean_reactions(reactions: &[String]) -> Vec<String> {
    let mut seen = Vec::new();
    for reaction in reactions {
        if !seen.contains(reaction) {
            seen.push(reaction.clone());
        }
    }
    seen.iter()
        .map(|r| r.trim_start_matches(':').trim_end_matches(':').to_string())
        .filter(|r| !r.is_empty() && !EXCLUDED_REACTIONS.contains(&r.as_str()))
        .take(MAX_REACTIONS)
        .collect()
}
