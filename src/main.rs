use std::io::Read;

use anyhow::Context;
use clipsift::config::{Config, SensitivityLevel};
use clipsift::context::WindowContext;
use clipsift::pipeline::{Capture, Pipeline};

/// Run one capture through the pipeline: text on stdin, window context
/// from environment variables, JSON outcome on stdout.
fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let config = config_from_env()?;

    let app = std::env::var("CLIPSIFT_APP").unwrap_or_default();
    let title = std::env::var("CLIPSIFT_TITLE").unwrap_or_default();
    let url = std::env::var("CLIPSIFT_URL").unwrap_or_else(|_| {
        // Browsers often embed the URL in the window title
        clipsift::context::extract_url_from_title(&title)
    });
    let context = WindowContext::new(app, title, url);

    let mut text = String::new();
    std::io::stdin()
        .read_to_string(&mut text)
        .context("reading capture text from stdin")?;

    let mut pipeline = Pipeline::new(config);
    let outcome = pipeline.process(&Capture::new(text, context));

    println!("{}", serde_json::to_string_pretty(&outcome)?);
    Ok(())
}

fn config_from_env() -> anyhow::Result<Config> {
    let defaults = Config::default();

    let smart_filtering = match std::env::var("CLIPSIFT_FILTERING") {
        Ok(v) => !matches!(v.trim().to_lowercase().as_str(), "off" | "false" | "0"),
        Err(_) => defaults.smart_filtering,
    };

    let sensitivity = match std::env::var("CLIPSIFT_SENSITIVITY") {
        Ok(v) => SensitivityLevel::parse(&v).context("CLIPSIFT_SENSITIVITY")?,
        Err(_) => defaults.sensitivity,
    };

    let min_length = match std::env::var("CLIPSIFT_MIN_LENGTH") {
        Ok(v) => v.trim().parse().context("CLIPSIFT_MIN_LENGTH")?,
        Err(_) => defaults.min_length,
    };

    let max_length = match std::env::var("CLIPSIFT_MAX_LENGTH") {
        Ok(v) => v.trim().parse().context("CLIPSIFT_MAX_LENGTH")?,
        Err(_) => defaults.max_length,
    };

    Ok(Config {
        smart_filtering,
        sensitivity,
        min_length,
        max_length,
    })
}
