//! General normalizer: the fallback cleaner for uncategorized captures.
//!
//! Line-by-line removal of a fixed UI-noise vocabulary, punctuation
//! collapse, timestamp stripping, and consecutive-duplicate removal.
//! Idempotent: running it on its own output changes nothing.

use regex::Regex;

pub struct GeneralNormalizer {
    noise: Vec<Regex>,
    ellipsis: Regex,
    bangs: Regex,
    questions: Regex,
    trailing_timestamp: Regex,
    leading_timestamp: Regex,
    social_words: Regex,
}

impl GeneralNormalizer {
    pub fn new() -> Self {
        let noise = vec![
            // Button labels
            Regex::new(
                r"(?i)^(OK|Cancel|Apply|Close|Save|Open|Copy|Paste|Submit|Back|Next|Done|Finish)$",
            )
            .unwrap(),
            // Status messages
            Regex::new(r"(?i)^(Loading|Please wait|Processing)\.{0,3}$").unwrap(),
            // Social counters and actions
            Regex::new(r"(?i)^\s*\d+\s*(likes?|comments?|shares?|views?|followers?|following)\s*$")
                .unwrap(),
            Regex::new(r"(?i)^(like|comment|share|follow|unfollow)$").unwrap(),
            // Navigation words
            Regex::new(r"(?i)^(home|profile|settings|notifications|messages|search)$").unwrap(),
            // Bare timestamps and relative times
            Regex::new(r"(?i)^\d{1,2}:\d{2}\s*(am|pm)?$").unwrap(),
            Regex::new(r"(?i)^(yesterday|today|now|\d+[hmsdw]\s+ago)$").unwrap(),
            // Single UI verbs
            Regex::new(r"(?i)^(more|less|show|hide|expand|collapse|edit|delete|remove)$").unwrap(),
            // Placeholder text
            Regex::new(r"(?i)^(untitled|unnamed|no title|click here|tap here)$").unwrap(),
            // Presence words
            Regex::new(r"(?i)^(online|offline|away|busy|active|inactive)$").unwrap(),
            // Terse status words
            Regex::new(r"(?i)^(error|failed|success|done|complete)$").unwrap(),
        ];

        Self {
            noise,
            ellipsis: Regex::new(r"\.{3,}").unwrap(),
            bangs: Regex::new(r"!{2,}").unwrap(),
            questions: Regex::new(r"\?{2,}").unwrap(),
            trailing_timestamp: Regex::new(r"(?i)\s+\d{1,2}:\d{2}\s*(am|pm)?\s*$").unwrap(),
            leading_timestamp: Regex::new(r"(?i)^\d{1,2}:\d{2}\s*(am|pm)?\s+").unwrap(),
            social_words: Regex::new(r"(?i)\b(via|RT|retweet|retweeted)\b").unwrap(),
        }
    }

    /// Normalize a general capture. Total and idempotent.
    pub fn normalize(&self, content: &str) -> String {
        let mut cleaned: Vec<String> = Vec::new();

        for raw in content.lines() {
            let line = raw.trim();

            if line.is_empty()
                || line.chars().count() < 3
                || is_repeated_char(line)
                || self.noise.iter().any(|re| re.is_match(line))
            {
                continue;
            }

            let line = self.ellipsis.replace_all(line, "...").to_string();
            let line = self.bangs.replace_all(&line, "!").to_string();
            let line = self.questions.replace_all(&line, "?").to_string();
            let line = self.trailing_timestamp.replace(&line, "").to_string();
            let line = self.leading_timestamp.replace(&line, "").to_string();
            let line = self.social_words.replace_all(&line, "").to_string();

            let line = line.trim();
            if line.chars().count() > 2 {
                cleaned.push(line.to_string());
            }
        }

        // Drop consecutive exact duplicates
        let mut deduplicated: Vec<String> = Vec::new();
        for line in cleaned {
            if deduplicated.last() != Some(&line) {
                deduplicated.push(line);
            }
        }

        deduplicated.join("\n").trim().to_string()
    }
}

impl Default for GeneralNormalizer {
    fn default() -> Self {
        Self::new()
    }
}

/// One character repeated five or more times is formatting, not content.
fn is_repeated_char(line: &str) -> bool {
    let mut chars = line.chars();
    match chars.next() {
        Some(first) => line.chars().count() >= 5 && chars.all(|c| c == first),
        None => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn normalize(content: &str) -> String {
        GeneralNormalizer::new().normalize(content)
    }

    #[test]
    fn removes_consecutive_duplicates() {
        let out = normalize("hi there\nhi there\nbye now");
        assert_eq!(out, "hi there\nbye now");
    }

    #[test]
    fn keeps_nonconsecutive_duplicates() {
        let out = normalize("hi there\nbye now\nhi there");
        assert_eq!(out, "hi there\nbye now\nhi there");
    }

    #[test]
    fn removes_ui_noise_lines() {
        let out = normalize("Cancel\nLoading...\n14 likes\nthe part worth keeping\nOnline");
        assert_eq!(out, "the part worth keeping");
    }

    #[test]
    fn collapses_repeated_punctuation() {
        let out = normalize("wait for it.....\nreally?!!!\nare you sure???");
        assert_eq!(out, "wait for it...\nreally?!\nare you sure?");
    }

    #[test]
    fn strips_edge_timestamps() {
        let out = normalize("9:41 am see you at the station 10:15 pm");
        assert_eq!(out, "see you at the station");
    }

    #[test]
    fn drops_repeated_character_lines() {
        let out = normalize("=====\n-----\nactual content here");
        assert_eq!(out, "actual content here");
    }

    #[test]
    fn idempotent_on_own_output() {
        let input = "Cancel\nhello world...\nhello world...\n3 likes\n9:41 am meet at noon\n====";
        let normalizer = GeneralNormalizer::new();
        let once = normalizer.normalize(input);
        let twice = normalizer.normalize(&once);
        assert_eq!(once, twice);
    }

    #[test]
    fn empty_input_yields_empty_output() {
        assert_eq!(normalize(""), "");
    }
}
