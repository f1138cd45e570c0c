//! Pipeline orchestrator: filter, classify, normalize, bundle.
//!
//! One capture in, one outcome out. Stages run in a fixed order and the
//! filter may short-circuit the rest. The whole pass is synchronous and
//! side-effect free apart from tracing; the caller owns clipboard access,
//! persistence, and anything else with an effect.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::classify::{Category, Classifier};
use crate::config::Config;
use crate::context::WindowContext;
use crate::filter::{EligibilityFilter, RejectReason};
use crate::normalize::NormalizerSet;

/// Preview length in characters for the output bundle.
const PREVIEW_CHARS: usize = 150;

/// One clipboard capture handed to the pipeline.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Capture {
    pub text: String,
    pub context: WindowContext,
    pub observed_at: DateTime<Utc>,
}

impl Capture {
    /// Capture `text` from `context`, stamped with the current time.
    pub fn new(text: impl Into<String>, context: WindowContext) -> Self {
        Self {
            text: text.into(),
            context,
            observed_at: Utc::now(),
        }
    }
}

/// One rendition of the capture text with derived length and preview.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContentVariant {
    pub content: String,
    /// Length in characters, not bytes.
    pub length: usize,
    /// First 150 characters, "..." appended when truncated.
    pub preview: String,
}

impl ContentVariant {
    fn of(content: String) -> Self {
        let length = content.chars().count();
        let preview = if length > PREVIEW_CHARS {
            let head: String = content.chars().take(PREVIEW_CHARS).collect();
            format!("{head}...")
        } else {
            content.clone()
        };
        Self {
            content,
            length,
            preview,
        }
    }
}

/// The pipeline's product for one eligible capture.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputBundle {
    pub category: Category,
    /// "App - Title" label from the window context.
    pub source_label: String,
    /// Coarse quality label, e.g. "Brief" or "Email Thread (3 messages)".
    pub quality: String,
    pub original: ContentVariant,
    pub formatted: ContentVariant,
    pub captured_at: DateTime<Utc>,
}

/// What the pipeline did with a capture.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum PipelineOutcome {
    Captured(OutputBundle),
    Skipped { reason: RejectReason },
}

impl PipelineOutcome {
    pub fn bundle(&self) -> Option<&OutputBundle> {
        match self {
            Self::Captured(bundle) => Some(bundle),
            Self::Skipped { .. } => None,
        }
    }
}

/// Filter, classifier and normalizers wired together, plus the single
/// last-result slot.
pub struct Pipeline {
    filter: EligibilityFilter,
    classifier: Classifier,
    normalizers: NormalizerSet,
    config: Config,
    last: Option<OutputBundle>,
}

impl Pipeline {
    pub fn new(config: Config) -> Self {
        Self {
            filter: EligibilityFilter::new(),
            classifier: Classifier::new(),
            normalizers: NormalizerSet::new(),
            config,
            last: None,
        }
    }

    /// Run the full pass over one capture.
    ///
    /// Eligible captures replace the stored last result; a new capture
    /// overwrites an unread one without ceremony.
    pub fn process(&mut self, capture: &Capture) -> PipelineOutcome {
        let decision = self.filter.evaluate(&capture.text, &self.config);
        if !decision.eligible {
            // evaluate() always sets a reason on rejection
            let reason = decision.reason.unwrap_or(RejectReason::LowQuality);
            debug!(?reason, "Capture skipped");
            return PipelineOutcome::Skipped { reason };
        }

        let category = self.classifier.classify(&capture.text, &capture.context);
        let formatted = self.normalizers.normalize(category, &capture.text);
        let quality = assess_quality(category, &formatted);

        info!(
            category = %category,
            source = %capture.context.source_label(),
            quality = %quality,
            "Capture processed"
        );

        let bundle = OutputBundle {
            category,
            source_label: capture.context.source_label(),
            quality,
            original: ContentVariant::of(capture.text.clone()),
            formatted: ContentVariant::of(formatted),
            captured_at: capture.observed_at,
        };
        self.last = Some(bundle.clone());
        PipelineOutcome::Captured(bundle)
    }

    /// The most recent eligible result, if any. Last write wins.
    pub fn last(&self) -> Option<&OutputBundle> {
        self.last.as_ref()
    }

    /// Consume the stored result, leaving the slot empty.
    pub fn take_last(&mut self) -> Option<OutputBundle> {
        self.last.take()
    }
}

/// Coarse quality label for the formatted content.
///
/// Email threads are labeled by message count; everything else by word
/// count, with a sentence-length check separating dense prose from lists.
fn assess_quality(category: Category, formatted: &str) -> String {
    if category == Category::Email {
        let messages = formatted
            .lines()
            .filter(|line| line.starts_with("### "))
            .count();
        if messages > 1 {
            return format!("Email Thread ({messages} messages)");
        }
    }

    let words = formatted.split_whitespace().count();
    if words < 10 {
        return "Brief".to_string();
    }
    if words < 50 {
        return "Short".to_string();
    }
    if words < 200 {
        return "Medium".to_string();
    }

    let sentences = formatted
        .split(['.', '!', '?'])
        .filter(|s| !s.trim().is_empty())
        .count();
    let avg_words = if sentences == 0 {
        words
    } else {
        words / sentences
    };
    if avg_words > 25 {
        "Complex".to_string()
    } else {
        "Detailed".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SensitivityLevel;

    fn make_pipeline() -> Pipeline {
        Pipeline::new(Config::default())
    }

    fn make_capture(text: &str, app: &str, title: &str) -> Capture {
        Capture::new(text, WindowContext::new(app, title, ""))
    }

    #[test]
    fn eligible_capture_produces_bundle() {
        let mut pipeline = make_pipeline();
        let capture = make_capture(
            "alice 9:41 AM\ngood morning, the deploy finished cleanly",
            "Slack",
            "team-infra",
        );
        let outcome = pipeline.process(&capture);
        let bundle = outcome.bundle().unwrap();
        assert_eq!(bundle.category, Category::Slack);
        assert_eq!(bundle.source_label, "Slack - team-infra");
        assert!(bundle.formatted.content.starts_with("alice 9:41 AM:"));
    }

    #[test]
    fn sensitive_capture_is_skipped() {
        let mut pipeline = make_pipeline();
        let capture = make_capture(
            "here is the password for the staging box, keep it safe",
            "Notes",
            "scratch",
        );
        match pipeline.process(&capture) {
            PipelineOutcome::Skipped { reason } => assert_eq!(reason, RejectReason::Sensitive),
            PipelineOutcome::Captured(_) => panic!("sensitive content must not be captured"),
        }
        assert!(pipeline.last().is_none());
    }

    #[test]
    fn disabled_filtering_skips_everything() {
        let mut pipeline = Pipeline::new(Config {
            smart_filtering: false,
            ..Config::default()
        });
        let capture = make_capture(
            "perfectly ordinary sentence with plenty of meaningful words",
            "Notes",
            "scratch",
        );
        match pipeline.process(&capture) {
            PipelineOutcome::Skipped { reason } => assert_eq!(reason, RejectReason::Disabled),
            PipelineOutcome::Captured(_) => panic!("disabled pipeline must skip"),
        }
    }

    #[test]
    fn last_result_is_overwritten_by_newer_capture() {
        let mut pipeline = make_pipeline();
        let first = make_capture(
            "the first capture holds some reasonably interesting words",
            "Notes",
            "one",
        );
        let second = make_capture(
            "the second capture arrives before anyone reads the first",
            "Notes",
            "two",
        );
        pipeline.process(&first);
        pipeline.process(&second);
        let last = pipeline.take_last().unwrap();
        assert!(last.original.content.starts_with("the second"));
        assert!(pipeline.last().is_none());
    }

    #[test]
    fn preview_truncates_on_char_boundary() {
        let long: String = "é".repeat(200);
        let variant = ContentVariant::of(long);
        assert_eq!(variant.length, 200);
        assert_eq!(variant.preview.chars().count(), 153);
        assert!(variant.preview.ends_with("..."));
    }

    #[test]
    fn short_content_preview_is_verbatim() {
        let variant = ContentVariant::of("short".to_string());
        assert_eq!(variant.preview, "short");
        assert_eq!(variant.length, 5);
    }

    #[test]
    fn quality_counts_email_thread_messages() {
        let formatted = "### Alice\n*Mon*\n\nhi\n\n---\n\n### Bob\n*Tue*\n\nhello";
        assert_eq!(
            assess_quality(Category::Email, formatted),
            "Email Thread (2 messages)"
        );
    }

    #[test]
    fn quality_word_count_buckets() {
        assert_eq!(assess_quality(Category::General, "just a few words"), "Brief");
        let short = "word ".repeat(20);
        assert_eq!(assess_quality(Category::General, &short), "Short");
        let medium = "word ".repeat(100);
        assert_eq!(assess_quality(Category::General, &medium), "Medium");
        let detailed = "one two three four five. ".repeat(60);
        assert_eq!(assess_quality(Category::General, &detailed), "Detailed");
        let complex = "word ".repeat(300);
        assert_eq!(assess_quality(Category::General, &complex), "Complex");
    }

    #[test]
    fn high_sensitivity_tightens_the_filter() {
        let mut strict = Pipeline::new(Config {
            sensitivity: SensitivityLevel::High,
            ..Config::default()
        });
        let mut relaxed = make_pipeline();
        // Five meaningful words out of seven: passes the medium quality
        // bar, fails the high one.
        let capture = make_capture("ok so the quarterly report arrived today", "Notes", "x");
        assert!(relaxed.process(&capture).bundle().is_some());
        match strict.process(&capture) {
            PipelineOutcome::Skipped { reason } => assert_eq!(reason, RejectReason::LowQuality),
            PipelineOutcome::Captured(_) => panic!("high sensitivity should reject"),
        }
    }
}
