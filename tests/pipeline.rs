//! End-to-end pipeline tests: capture in, outcome out.

use clipsift::classify::Category;
use clipsift::config::{Config, SensitivityLevel};
use clipsift::context::WindowContext;
use clipsift::filter::RejectReason;
use clipsift::pipeline::{Capture, Pipeline, PipelineOutcome};

fn process(text: &str, app: &str, title: &str) -> PipelineOutcome {
    let mut pipeline = Pipeline::new(Config::default());
    let capture = Capture::new(text, WindowContext::new(app, title, ""));
    pipeline.process(&capture)
}

fn reject_reason(outcome: &PipelineOutcome) -> RejectReason {
    match outcome {
        PipelineOutcome::Skipped { reason } => *reason,
        PipelineOutcome::Captured(bundle) => {
            panic!("expected skip, got {:?}", bundle.category)
        }
    }
}

#[test]
fn short_capture_is_skipped() {
    let outcome = process("too short", "Notes", "scratch");
    assert_eq!(reject_reason(&outcome), RejectReason::TooShort);
}

#[test]
fn oversized_capture_is_skipped() {
    let huge = "all work and no play makes a dull page ".repeat(2_000);
    let outcome = process(&huge, "Notes", "scratch");
    assert_eq!(reject_reason(&outcome), RejectReason::TooLong);
}

#[test]
fn embedded_hash_is_rejected_at_every_level() {
    let hex = "f".repeat(64);
    let text = format!("release digest {hex} published to the registry today");
    for sensitivity in [
        SensitivityLevel::Low,
        SensitivityLevel::Medium,
        SensitivityLevel::High,
    ] {
        let mut pipeline = Pipeline::new(Config {
            sensitivity,
            ..Config::default()
        });
        let capture = Capture::new(text.clone(), WindowContext::default());
        let outcome = pipeline.process(&capture);
        assert_eq!(
            reject_reason(&outcome),
            RejectReason::Sensitive,
            "{sensitivity:?}"
        );
    }
}

#[test]
fn slack_export_is_not_mistaken_for_generic_chat() {
    // Speaker-colon lines alone would read as chat; the timestamp header
    // pins it to slack first.
    let text = "alice 9:41 AM\nthe deploy finished cleanly\nbob: looks good\ncarol: agreed, shipping it";
    let outcome = process(text, "Slack", "#team-infra");
    let bundle = outcome.bundle().expect("eligible capture");
    assert_eq!(bundle.category, Category::Slack);
}

#[test]
fn slack_message_renders_with_reactions() {
    let text = "alice 9:41 AM\nhello there everyone, quick update on the rollout\n:thumbsup: 2";
    let outcome = process(text, "Slack", "#general");
    let bundle = outcome.bundle().expect("eligible capture");
    assert_eq!(
        bundle.formatted.content,
        "alice 9:41 AM: hello there everyone, quick update on the rollout (thumbsup)"
    );
}

#[test]
fn email_thread_splits_and_labels_quality() {
    let text = "Alice Johnson\nMon, Jul 14, 3:22 PM\nThe draft is ready whenever you want to review it.\nBob Smith\nTue, Jul 15, 9:05 AM\nLooks good, merging it this afternoon.";
    let outcome = process(text, "Mail", "Inbox");
    let bundle = outcome.bundle().expect("eligible capture");
    assert_eq!(bundle.category, Category::Email);
    assert_eq!(bundle.quality, "Email Thread (2 messages)");

    let parts: Vec<&str> = bundle.formatted.content.split("\n\n---\n\n").collect();
    assert_eq!(parts.len(), 2);
    assert!(parts[0].starts_with("### Alice Johnson"));
    assert!(parts[1].starts_with("### Bob Smith"));
}

#[test]
fn general_capture_deduplicates_consecutive_lines() {
    let text = "the same status line repeated\nthe same status line repeated\nand then something else entirely";
    let outcome = process(text, "Notes", "scratch");
    let bundle = outcome.bundle().expect("eligible capture");
    assert_eq!(
        bundle.formatted.content,
        "the same status line repeated\nand then something else entirely"
    );
}

#[test]
fn formatted_output_is_stable_under_reprocessing() {
    let text = "Cancel\nmeeting moved to thursday afternoon\nmeeting moved to thursday afternoon\n3 likes";
    let first = process(text, "Notes", "scratch");
    let bundle = first.bundle().expect("eligible capture");

    let again = process(&bundle.formatted.content, "Notes", "scratch");
    let bundle_again = again.bundle().expect("still eligible");
    assert_eq!(bundle_again.formatted.content, bundle.formatted.content);
}

#[test]
fn empty_capture_is_skipped_not_panicked() {
    let outcome = process("", "Notes", "scratch");
    assert_eq!(reject_reason(&outcome), RejectReason::TooShort);
}

#[test]
fn outcome_serializes_with_tag() {
    let outcome = process("hello", "Notes", "scratch");
    let json = serde_json::to_string(&outcome).unwrap();
    assert!(json.contains("\"outcome\":\"skipped\""));
    assert!(json.contains("\"too_short\""));
}

#[test]
fn preview_reflects_original_and_formatted_lengths() {
    let filler = "The quarterly planning review covered hiring targets, infrastructure spending, regional expansion, customer churn, pricing experiments, and the roadmap changes everyone argued over last week.";
    let outcome = process(filler, "Notes", "scratch");
    let bundle = outcome.bundle().expect("eligible capture");
    assert!(bundle.original.length > 150);
    assert!(bundle.original.preview.ends_with("..."));
    assert_eq!(bundle.original.preview.chars().count(), 153);
}
