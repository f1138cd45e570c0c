//! LinkedIn normalizer: profile chrome stripping and post extraction.
//!
//! Drops connection counts, degree badges, overlay notices and similar
//! profile chrome. A line opening with a marker emoji (or a long "update:"
//! phrasing) starts a post block that accumulates until a profile-section
//! boundary (job date range, Experience/Education header, degree name);
//! accumulated posts of at least 100 characters are emitted as a labeled
//! block. Remaining substantive lines pass through filtered by length
//! and shape.

use regex::Regex;

/// Minimum accumulated length for a post block to be worth emitting.
const MIN_POST_LEN: usize = 100;

pub struct LinkedInNormalizer {
    chrome: Vec<Regex>,
    post_start: Regex,
    job_dates: Regex,
    section_header: Regex,
    education: Regex,
    title_at_company: Regex,
    role_word: Regex,
    profile_picture: Regex,
    degree_badge: Regex,
    month_year: Regex,
    relative_time: Regex,
}

impl LinkedInNormalizer {
    pub fn new() -> Self {
        let chrome = vec![
            Regex::new(r"^\d+,?\d*\s*(followers?|connections?)").unwrap(),
            Regex::new(r"Contact info|View.*profile|Show all \d+").unwrap(),
            Regex::new(r"^\d+(st|nd|rd|th)\s+degree").unwrap(),
            Regex::new(r"^(She|He|They)/(Her|Him|Them)").unwrap(),
            Regex::new(r"Followed by.*and \d+ other").unwrap(),
            Regex::new(r"You are on the messaging overlay").unwrap(),
            Regex::new(r"View.*graphic link").unwrap(),
            Regex::new(r"• \d+\w+.*Premium.*\d+\w+").unwrap(),
            Regex::new(r"^\d+h • .*hours? ago.*LinkedIn").unwrap(),
            Regex::new(r"From.*company").unwrap(),
            // Bare like counts and domain references
            Regex::new(r"^\d+$").unwrap(),
            Regex::new(r"^\w+\.\w+$").unwrap(),
        ];

        Self {
            chrome,
            post_start: Regex::new(r"^[🚨💡⚡🔥📢🎉]").unwrap(),
            job_dates: Regex::new(r"^\w+\s+\d{4}\s*-\s*(Present|\w+\s+\d{4})").unwrap(),
            section_header: Regex::new(r"^(Experience|Education|Licenses|Honors)").unwrap(),
            education: Regex::new(r"Bachelor|Master|PhD|University|College").unwrap(),
            title_at_company: Regex::new(r"^[A-Z][^a-z]*@").unwrap(),
            role_word: Regex::new(
                r"(Director|Manager|Engineer|Developer|Designer|Analyst|Consultant|VP|CEO|CTO|CMO)",
            )
            .unwrap(),
            profile_picture: Regex::new(r"^\w+\s+profile picture").unwrap(),
            degree_badge: Regex::new(r"^·\s+\d+\w+.*degree").unwrap(),
            month_year: Regex::new(r"^(Jan|Feb|Mar|Apr|May|Jun|Jul|Aug|Sep|Oct|Nov|Dec)\s+\d{4}")
                .unwrap(),
            relative_time: Regex::new(r"^\d+\s+\w+\s+ago").unwrap(),
        }
    }

    /// Normalize a LinkedIn-shaped capture. Total; empty input yields "".
    pub fn normalize(&self, content: &str) -> String {
        let mut out: Vec<String> = Vec::new();
        let mut post_lines: Vec<String> = Vec::new();
        let mut in_post = false;

        for raw in content.lines() {
            let line = raw.trim();

            if line.is_empty() || self.chrome.iter().any(|re| re.is_match(line)) {
                continue;
            }

            // A marker emoji or a long "update:" line opens a post block
            if self.post_start.is_match(line)
                || (line.chars().count() > 50 && line.contains("update") && line.contains(':'))
            {
                self.flush_post(&mut post_lines, &mut out);
                in_post = true;
                post_lines.push(line.to_string());
                continue;
            }

            if in_post {
                if self.is_section_boundary(line) {
                    // End of the post; the boundary line is profile info
                    // and falls through to the pass-through rules.
                    self.flush_post(&mut post_lines, &mut out);
                    in_post = false;
                } else {
                    post_lines.push(line.to_string());
                    continue;
                }
            }

            if self.is_profile_fact(line) {
                out.push(line.to_string());
            } else if line.chars().count() > 30 && !self.is_low_signal(line) {
                out.push(line.to_string());
            }
        }

        self.flush_post(&mut post_lines, &mut out);
        out.join("\n").trim().to_string()
    }

    fn is_section_boundary(&self, line: &str) -> bool {
        self.job_dates.is_match(line)
            || self.section_header.is_match(line)
            || self.education.is_match(line)
    }

    /// Job titles, date ranges, role words, degrees. Always kept.
    fn is_profile_fact(&self, line: &str) -> bool {
        self.title_at_company.is_match(line)
            || self.job_dates.is_match(line)
            || self.role_word.is_match(line)
            || self.education.is_match(line)
    }

    fn is_low_signal(&self, line: &str) -> bool {
        self.profile_picture.is_match(line)
            || self.degree_badge.is_match(line)
            || self.month_year.is_match(line)
            || self.relative_time.is_match(line)
    }

    fn flush_post(&self, post_lines: &mut Vec<String>, out: &mut Vec<String>) {
        if post_lines.is_empty() {
            return;
        }
        let post = post_lines.join("\n").trim().to_string();
        post_lines.clear();
        if post.chars().count() >= MIN_POST_LEN {
            out.push(format!("**Recent Post:**\n{post}\n"));
        }
    }
}

impl Default for LinkedInNormalizer {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn normalize(content: &str) -> String {
        LinkedInNormalizer::new().normalize(content)
    }

    #[test]
    fn strips_profile_chrome() {
        let input = "500+ connections\n2nd degree connection\nYou are on the messaging overlay\nSenior Engineer at BigCorp building data tools";
        let out = normalize(input);
        assert_eq!(out, "Senior Engineer at BigCorp building data tools");
    }

    #[test]
    fn keeps_profile_facts_regardless_of_length() {
        let out = normalize("Director of Platform\nJan 2021 - Present");
        assert!(out.contains("Director of Platform"));
        // The date range is a profile fact but also month-year low signal;
        // the fact check runs first and keeps it.
        assert!(out.contains("Jan 2021 - Present"));
    }

    #[test]
    fn emits_substantial_post_as_labeled_block() {
        let post_body = "We just shipped a rework of our ingestion layer and the latency wins are bigger than expected across every region.";
        let input = format!("🚨 Big news from the team\n{post_body}\nExperience");
        let out = normalize(&input);
        assert!(out.starts_with("**Recent Post:**"));
        assert!(out.contains(post_body));
    }

    #[test]
    fn short_post_blocks_are_dropped() {
        let input = "🎉 We did it\nExperience";
        assert_eq!(normalize(input), "");
    }

    #[test]
    fn short_non_fact_lines_are_dropped() {
        assert_eq!(normalize("a short line"), "");
    }

    #[test]
    fn empty_input_yields_empty_output() {
        assert_eq!(normalize(""), "");
    }
}
