//! Email-thread normalizer: splits a flattened thread into entries.
//!
//! A header-ish line immediately followed by a date/time-shaped line opens a
//! new `EmailEntry`; everything else accumulates into the open entry. Footer
//! boilerplate is dropped and quote markers stripped. Entries render as
//! `### sender` / `*timestamp*` blocks joined by `---` separators.

use regex::Regex;

/// One entry of an email thread. Scoped to a single normalizer run.
#[derive(Debug, Clone, Default)]
pub struct EmailEntry {
    pub sender: Option<String>,
    pub timestamp: Option<String>,
    pub lines: Vec<String>,
}

pub struct EmailNormalizer {
    artifacts: Vec<Regex>,
    header: Regex,
    timestamp: Regex,
    quote_marker: Regex,
    to_line: Regex,
    leading_bullet: Regex,
    noise_line: Vec<Regex>,
    closing: Regex,
}

impl EmailNormalizer {
    pub fn new() -> Self {
        let artifacts = vec![
            Regex::new(r"^>+\s*$").unwrap(),
            Regex::new(r"^-{3,}.*$").unwrap(),
            Regex::new(r"(?i)this email was sent to").unwrap(),
            Regex::new(r"(?i)unsubscribe|privacy policy").unwrap(),
            Regex::new(r"(?i)sent from my (iphone|android|mobile)").unwrap(),
            Regex::new(r"(?i)^\d+\s+attachments?$").unwrap(),
            Regex::new(r"(?i)scanned by gmail").unwrap(),
            Regex::new(r"(?i)^\s*attachments?\s*$").unwrap(),
            Regex::new(r"^•\s*$").unwrap(),
            Regex::new(r"(?i)^\s*\d+\s*(attachment|file)s?\s*$").unwrap(),
        ];

        // Lines filtered out of the rendered body: bare closings, bare
        // names, bare addresses.
        let noise_line = vec![
            Regex::new(r"(?i)^(best,?|best regards,?|thanks,?|thank you,?|sincerely,?|cheers,?)$")
                .unwrap(),
            Regex::new(r"^[A-Z][a-z]+\s+[A-Z][a-z]+\s*$").unwrap(),
            Regex::new(r"^\w+@\w+\.\w+\s*$").unwrap(),
        ];

        Self {
            artifacts,
            header: Regex::new(r"^([^<]+(?:<[^>]+>)?)\s*$").unwrap(),
            timestamp: Regex::new(
                r"(?i)^(mon|tue|wed|thu|fri|sat|sun|yesterday|today).*|^\w+,\s+\w+\s+\d+,?\s+\d+:\d+\s*(am|pm)",
            )
            .unwrap(),
            quote_marker: Regex::new(r"^>+\s*").unwrap(),
            to_line: Regex::new(r"(?i)^to\s+\w+\s*$").unwrap(),
            leading_bullet: Regex::new(r"^\s*•\s*").unwrap(),
            noise_line,
            closing: Regex::new(
                r"(?i)(best regards?|thanks?|thank you|sincerely|cheers),?\s*([A-Z][a-z]+(?:\s+[A-Z][a-z]+)*)\s*$",
            )
            .unwrap(),
        }
    }

    /// Normalize an email-shaped capture. Total; empty input yields "".
    pub fn normalize(&self, content: &str) -> String {
        let lines: Vec<&str> = content.lines().collect();
        let entries = self.parse(&lines);
        self.render(&entries)
    }

    fn parse(&self, lines: &[&str]) -> Vec<EmailEntry> {
        let mut entries = Vec::new();
        let mut current = EmailEntry::default();
        let mut i = 0;

        while i < lines.len() {
            let line = lines[i].trim();

            if line.is_empty() {
                // Keep paragraph breaks inside an entry
                if !current.lines.is_empty() {
                    current.lines.push(String::new());
                }
                i += 1;
                continue;
            }

            if self.artifacts.iter().any(|re| re.is_match(line)) {
                i += 1;
                continue;
            }

            // Header line + date/time-shaped next line opens a new entry
            let next = lines.get(i + 1).map(|l| l.trim()).unwrap_or("");
            if let Some(caps) = self.header.captures(line) {
                if let Some(ts) = self.timestamp.find(next) {
                    if !current.lines.is_empty() {
                        entries.push(std::mem::take(&mut current));
                    }
                    current = EmailEntry {
                        sender: Some(caps[1].trim().to_string()),
                        timestamp: Some(ts.as_str().to_string()),
                        lines: Vec::new(),
                    };
                    i += 2; // the timestamp line is consumed too
                    continue;
                }
            }

            // Strip quote markers, keep the quoted content
            let line = self.quote_marker.replace(line, "").to_string();

            // Bare "to Name" routing lines after a sender add nothing
            if self.to_line.is_match(&line) && current.sender.is_some() {
                i += 1;
                continue;
            }

            let line = self.leading_bullet.replace(&line, "").to_string();
            if !line.is_empty() {
                current.lines.push(line);
            }
            i += 1;
        }

        if !current.lines.is_empty() {
            entries.push(current);
        }
        entries
    }

    fn render(&self, entries: &[EmailEntry]) -> String {
        let rendered: Vec<String> = entries
            .iter()
            .map(|entry| self.render_entry(entry))
            .filter(|text| !text.trim().is_empty())
            .collect();

        rendered.join("\n\n---\n\n")
    }

    fn render_entry(&self, entry: &EmailEntry) -> String {
        let mut out = String::new();

        match (&entry.sender, &entry.timestamp) {
            (Some(sender), Some(ts)) => {
                out.push_str(&format!("### {sender}\n*{ts}*\n\n"));
            }
            (Some(sender), None) => {
                out.push_str(&format!("### {sender}\n\n"));
            }
            _ => {}
        }

        let body: String = entry
            .lines
            .iter()
            .map(|line| line.trim())
            .filter(|line| {
                !line.is_empty() && !self.noise_line.iter().any(|re| re.is_match(line))
            })
            .collect::<Vec<_>>()
            .join("\n");
        let body = body.trim();

        if !body.is_empty() {
            out.push_str(body);

            // A closing in the last few raw lines is re-attached once if the
            // filtering above removed it. Heuristic; boundary cases where the
            // closing partially overlaps body text stay as-is.
            let tail_start = entry.lines.len().saturating_sub(3);
            let tail = entry.lines[tail_start..].join(" ");
            let tail = tail.trim();
            if let Some(caps) = self.closing.captures(tail) {
                if !body.contains(&caps[0]) {
                    out.push_str(&format!("\n\n{},\n{}", &caps[1], &caps[2]));
                }
            }
        }

        out
    }
}

impl Default for EmailNormalizer {
    fn default() -> Self {
        Self::new()
    }
}
