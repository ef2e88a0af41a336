//! Terminal progress reporting.

use newsdesk::{EventSink, FnSink, StudioEvent};
use std::sync::Arc;

/// Sink that prints user-facing progress lines to stderr.
pub fn progress_sink() -> Arc<dyn EventSink> {
    Arc::new(FnSink(|event: StudioEvent| {
        if let Some(line) = describe(&event) {
            eprintln!("{line}");
        }
    }))
}

fn describe(event: &StudioEvent) -> Option<String> {
    match event {
        StudioEvent::RetryScheduled {
            attempt,
            max_retries,
            delay,
        } => Some(format!(
            "Rate limit hit. Retrying in {}s (attempt {attempt}/{max_retries})...",
            delay.as_secs()
        )),
        StudioEvent::CallPaced { waited } if !waited.is_zero() => Some(format!(
            "Waiting {}s before the next image request...",
            waited.as_secs()
        )),
        StudioEvent::StageStarted(stage) => Some(format!("[{stage}] started")),
        StudioEvent::FallbackUsed { role } => {
            Some(format!("{role}: primary prompt failed, trying a fallback"))
        }
        StudioEvent::Warning(message) => Some(format!("warning: {message}")),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use newsdesk::{ImageRole, Stage};
    use std::time::Duration;

    #[test]
    fn retry_lines_count_attempts() {
        let line = describe(&StudioEvent::RetryScheduled {
            attempt: 2,
            max_retries: 3,
            delay: Duration::from_secs(10),
        });
        assert_eq!(
            line.as_deref(),
            Some("Rate limit hit. Retrying in 10s (attempt 2/3)...")
        );
    }

    #[test]
    fn quiet_events_print_nothing() {
        assert!(describe(&StudioEvent::CallPaced { waited: Duration::ZERO }).is_none());
        assert!(describe(&StudioEvent::ImageGenerated { role: ImageRole::Thumbnail }).is_none());
        assert!(describe(&StudioEvent::StageFinished(Stage::BRoll)).is_none());
    }
}
