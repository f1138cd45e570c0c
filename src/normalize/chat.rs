//! Generic chat normalizer: speaker lines, continuations, and noise.
//!
//! Detects `Speaker: message` lines, folds repeated-speaker lines into the
//! previous message, drops system/UI noise, and normalizes "you:"/"me:"
//! to "You:".

use regex::Regex;

pub struct ChatNormalizer {
    noise: Vec<Regex>,
    leading_timestamp: Regex,
    trailing_timestamp: Regex,
    you_me: Regex,
    speaker: Regex,
}

impl ChatNormalizer {
    pub fn new() -> Self {
        let noise = vec![
            // System messages
            Regex::new(r"(?i)^(joined|left) the (chat|channel|room|conversation)").unwrap(),
            Regex::new(r"(?i)^(added|removed) .* (to|from) the").unwrap(),
            Regex::new(r"(?i)^(call|video|voice) (started|ended|missed)").unwrap(),
            Regex::new(r"(?i)^.* (is|was) (online|offline|away|busy)").unwrap(),
            // UI elements
            Regex::new(r"(?i)^(typing|online|offline|last seen)").unwrap(),
            Regex::new(r"(?i)^(read|delivered|sent)$").unwrap(),
            Regex::new(r"(?i)^(react|reply|forward|delete)$").unwrap(),
            // Bare timestamps
            Regex::new(r"(?i)^\d{1,2}:\d{2}\s*(am|pm)?$").unwrap(),
            Regex::new(r"(?i)^(yesterday|today|now)$").unwrap(),
            // Navigation
            Regex::new(r"(?i)^(back|close|menu|settings)$").unwrap(),
            // Bare reaction glyphs
            Regex::new(r"^[👍👎❤️😂😮😢😡]+$").unwrap(),
            // Status counters
            Regex::new(r"^\d+\s*(unread|new)").unwrap(),
            Regex::new(r"(?i)^(forwarded message|forwarded from)").unwrap(),
        ];

        Self {
            noise,
            leading_timestamp: Regex::new(r"(?i)^\d{1,2}:\d{2}\s*(am|pm)?\s*").unwrap(),
            trailing_timestamp: Regex::new(r"\s+\d{1,2}:\d{2}\s*(am|pm)?$").unwrap(),
            you_me: Regex::new(r"(?i)^(you|me):\s*").unwrap(),
            speaker: Regex::new(r"^(\w+(?:\s+\w+)?):\s*").unwrap(),
        }
    }

    /// Normalize a chat-shaped capture. Total; empty input yields "".
    pub fn normalize(&self, content: &str) -> String {
        let mut cleaned: Vec<String> = Vec::new();
        let mut last_speaker = String::new();

        for raw in content.lines() {
            let line = raw.trim();
            if line.is_empty() || self.noise.iter().any(|re| re.is_match(line)) {
                continue;
            }

            let line = self.leading_timestamp.replace(line, "").to_string();
            let line = self.trailing_timestamp.replace(&line, "").to_string();
            let line = self.you_me.replace(&line, "You: ").to_string();

            if let Some(caps) = self.speaker.captures(&line) {
                let speaker = caps[1].to_string();
                let message = line[caps[0].len()..].trim().to_string();

                if speaker != last_speaker && !message.is_empty() {
                    cleaned.push(format!("{speaker}: {message}"));
                    last_speaker = speaker;
                } else if !message.is_empty() {
                    // Same speaker again: mark as continuation
                    cleaned.push(format!("   {message}"));
                }
            } else if !line.is_empty() {
                if last_speaker.is_empty() {
                    cleaned.push(line);
                } else {
                    cleaned.push(format!("   {line}"));
                }
            }
        }

        // Merge continuation lines onto the previous message
        let mut merged: Vec<String> = Vec::new();
        for line in cleaned {
            if let Some(rest) = line.strip_prefix("   ") {
                if let Some(prev) = merged.last_mut() {
                    if !rest.is_empty() {
                        prev.push(' ');
                        prev.push_str(rest);
                    }
                    continue;
                }
            }
            merged.push(line);
        }

        merged
            .into_iter()
            .filter(|line| line.trim().chars().count() > 2)
            .collect::<Vec<_>>()
            .join("\n")
            .trim()
            .to_string()
    }
}

impl Default for ChatNormalizer {
    fn default() -> Self {
        Self::new()
    }
}
