//! Eligibility filter: privacy and quality gating before classification.
//!
//! Runs before anything else in the pipeline and may short-circuit it:
//! - length outside configured bounds → reject
//! - sensitive data (credentials, encoded blobs, personal identifiers) →
//!   reject at every sensitivity level
//! - low meaningful-word fraction → reject
//! - low-value shapes (bare URL, bare path, breadcrumb, …) → reject,
//!   each check gated by the configured sensitivity
//!
//! The decision is advisory; the orchestrator decides whether to continue.

use regex::Regex;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::config::{Config, SensitivityLevel};

/// Why a capture was rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RejectReason {
    /// Smart filtering is switched off entirely.
    Disabled,
    TooShort,
    TooLong,
    /// Matched a sensitive-data pattern (credentials, hashes, identifiers).
    Sensitive,
    /// Too few words, or too few of them meaningful.
    LowQuality,
    /// Bare URL/path/phone, breadcrumb trail, or repetitive content.
    LowValue,
}

/// Result of the eligibility check. A data value, never an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterDecision {
    pub eligible: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<RejectReason>,
}

impl FilterDecision {
    fn pass() -> Self {
        Self {
            eligible: true,
            reason: None,
        }
    }

    fn reject(reason: RejectReason) -> Self {
        Self {
            eligible: false,
            reason: Some(reason),
        }
    }
}

/// Eligibility filter with pre-compiled pattern families.
pub struct EligibilityFilter {
    sensitive: Vec<Regex>,
    ui_noise_words: Vec<Regex>,
    bare_url: Regex,
    bare_path: Regex,
    bare_email: Regex,
    bare_phone: Regex,
    breadcrumb: Regex,
    bare_numeric: Regex,
}

impl EligibilityFilter {
    /// Compile the pattern families once. Call at startup, reuse per capture.
    pub fn new() -> Self {
        let sensitive = vec![
            // Credential keywords
            Regex::new(r"(?i)password|passw0rd|passwd").unwrap(),
            Regex::new(r"(?i)token|auth|bearer|oauth").unwrap(),
            Regex::new(r"(?i)secret|private.*key|api.*key").unwrap(),
            Regex::new(r"(?i)credential|cert|certificate").unwrap(),
            // Encoded data shapes. Hex runs are matched anywhere in the
            // content; base64/hash shapes only when they are the whole
            // capture (short alnum runs occur in ordinary prose).
            Regex::new(r"^[a-zA-Z0-9+/]{20,}={0,2}$").unwrap(),
            Regex::new(r"\b[a-f0-9]{32,}\b").unwrap(),
            Regex::new(r"^\$[a-zA-Z0-9./]{50,}$").unwrap(),
            // Personal identifiers
            Regex::new(r"\b\d{3}-?\d{2}-?\d{4}\b").unwrap(),
            Regex::new(r"\b\d{4}[\s-]?\d{4}[\s-]?\d{4}[\s-]?\d{4}\b").unwrap(),
            Regex::new(r"\b[A-Z]{2}\d{6,8}[A-Z]?\b").unwrap(),
            // Sensitive file paths
            Regex::new(r"/\.ssh/|/\.aws/|/\.env").unwrap(),
            Regex::new(r"(?i)config\.json|credentials\.json|keyfile").unwrap(),
        ];

        let ui_noise_words = vec![
            Regex::new(
                r"(?i)^(ok|cancel|apply|close|save|open|copy|paste|cut|undo|redo|submit|back|next|previous|forward)$",
            )
            .unwrap(),
            Regex::new(
                r"(?i)^(menu|file|edit|view|window|help|home|about|contact|search|login|cart|profile)$",
            )
            .unwrap(),
            Regex::new(r"(?i)^\d+\s*(notification|like|comment|share|view|follower|following)s?$")
                .unwrap(),
            Regex::new(r"(?i)^(loading|please wait|processing)\.{0,3}$").unwrap(),
            Regex::new(r"(?i)^(more|show more|see more|view all|expand|collapse)$").unwrap(),
        ];

        Self {
            sensitive,
            ui_noise_words,
            bare_url: Regex::new(r"^https?://\S+$").unwrap(),
            bare_path: Regex::new(r"^[/\\][\w\-/\\.]+$").unwrap(),
            bare_email: Regex::new(r"^[\w.\-]+@[\w.\-]+\.\w+$").unwrap(),
            bare_phone: Regex::new(r"^[+\d\s\-()]+$").unwrap(),
            breadcrumb: Regex::new(r"^[\w\s]+>\s*[\w\s]+>\s*[\w\s]+").unwrap(),
            bare_numeric: Regex::new(r"^\d+$").unwrap(),
        }
    }

    /// Evaluate one capture against the configured limits and sensitivity.
    ///
    /// Rules run in order; the first rejection wins.
    pub fn evaluate(&self, content: &str, config: &Config) -> FilterDecision {
        if !config.smart_filtering {
            return FilterDecision::reject(RejectReason::Disabled);
        }

        let len = content.chars().count();
        if len < config.min_length {
            debug!(len, min = config.min_length, "Capture below minimum length");
            return FilterDecision::reject(RejectReason::TooShort);
        }
        if len > config.max_length {
            debug!(len, max = config.max_length, "Capture above maximum length");
            return FilterDecision::reject(RejectReason::TooLong);
        }

        // Sensitive data rejects at every sensitivity level.
        if self.sensitive.iter().any(|re| re.is_match(content)) {
            debug!("Capture matched sensitive-data pattern");
            return FilterDecision::reject(RejectReason::Sensitive);
        }

        if !self.has_quality_content(content, config.sensitivity) {
            debug!("Capture failed quality check");
            return FilterDecision::reject(RejectReason::LowQuality);
        }

        if self.is_low_value(content, config.sensitivity) {
            debug!("Capture matched low-value shape");
            return FilterDecision::reject(RejectReason::LowValue);
        }

        FilterDecision::pass()
    }

    /// Word-level quality score: enough words, and enough of them meaningful.
    fn has_quality_content(&self, content: &str, sensitivity: SensitivityLevel) -> bool {
        let words: Vec<&str> = content.split_whitespace().collect();

        let min_word_count = match sensitivity {
            SensitivityLevel::Low => 2,
            SensitivityLevel::Medium => 3,
            SensitivityLevel::High => 5,
        };
        if words.len() < min_word_count {
            return false;
        }

        let meaningful = words
            .iter()
            .filter(|word| {
                word.chars().count() > 2
                    && !self.ui_noise_words.iter().any(|re| re.is_match(word))
            })
            .count();

        let quality_threshold = match sensitivity {
            SensitivityLevel::Low => 0.4,
            SensitivityLevel::Medium => 0.6,
            SensitivityLevel::High => 0.8,
        };
        meaningful as f64 / words.len() as f64 >= quality_threshold
    }

    /// Shape checks for content not worth enhancing, gated by sensitivity.
    fn is_low_value(&self, content: &str, sensitivity: SensitivityLevel) -> bool {
        let trimmed = content.trim();
        let strict = sensitivity != SensitivityLevel::Low;
        let high = sensitivity == SensitivityLevel::High;

        // Single URL without any surrounding context
        if strict && self.bare_url.is_match(trimmed) {
            return true;
        }

        // Filesystem path only
        if strict && self.bare_path.is_match(trimmed) {
            return true;
        }

        // Email address only
        if high && self.bare_email.is_match(trimmed) {
            return true;
        }

        // Phone-number-shaped string
        if strict && self.bare_phone.is_match(trimmed) && content.chars().count() < 20 {
            return true;
        }

        // Repetitive content, mostly the same words over and over
        let words: Vec<String> = content
            .to_lowercase()
            .split_whitespace()
            .map(str::to_string)
            .collect();
        if words.len() > 10 {
            let unique: std::collections::HashSet<&String> = words.iter().collect();
            let repetition_threshold = match sensitivity {
                SensitivityLevel::Low => 0.2,
                SensitivityLevel::Medium => 0.3,
                SensitivityLevel::High => 0.4,
            };
            if (unique.len() as f64) / (words.len() as f64) < repetition_threshold {
                return true;
            }
        }

        // Navigation breadcrumbs ("Home > Settings > Privacy")
        if strict && self.breadcrumb.is_match(trimmed) {
            return true;
        }

        // Short numeric-only string
        if high && self.bare_numeric.is_match(trimmed) && content.chars().count() < 10 {
            return true;
        }

        false
    }
}

impl Default for EligibilityFilter {
    fn default() -> Self {
        Self::new()
    }
}
