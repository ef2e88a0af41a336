//! B-roll batches, thumbnail regeneration and paragraph expansion.

mod test_utils;

use newsdesk_core::{EventSink, RecordingSink, StoryMode, StudioEvent};
use newsdesk_error::StudioErrorKind;
use newsdesk_rate_limit::{PacingPolicy, RequestPacer, RetryPolicy, RetryableCaller};
use newsdesk_studio::{DEFAULT_BASE_ANCHOR_PROMPT, ImageOrchestrator, ParagraphPromptExpander};
use std::sync::Arc;
use std::time::Duration;
use test_utils::{MockDriver, prompt_of, quota_error, studio};
use tokio::time::Instant;

fn orchestrator(driver: &Arc<MockDriver>, sink: Arc<dyn EventSink>) -> ImageOrchestrator {
    ImageOrchestrator::new(
        driver.clone(),
        RetryableCaller::new(RetryPolicy::default()).with_sink(Arc::clone(&sink)),
        RequestPacer::new(PacingPolicy::default()),
        DEFAULT_BASE_ANCHOR_PROMPT,
    )
    .with_sink(sink)
}

fn prompts(items: &[&str]) -> Vec<String> {
    items.iter().map(|item| item.to_string()).collect()
}

#[tokio::test(start_paused = true)]
async fn b_roll_preserves_prompt_order() {
    let driver = Arc::new(MockDriver::new());
    let images = orchestrator(&driver, Arc::new(RecordingSink::new()))
        .generate_b_roll(&prompts(&["harbor", "skyline", "market"]))
        .await;

    let rendered: Vec<String> = images.iter().map(prompt_of).collect();
    assert_eq!(
        rendered,
        vec![
            "harbor. Photorealistic, cinematic, 16:9 aspect ratio.",
            "skyline. Photorealistic, cinematic, 16:9 aspect ratio.",
            "market. Photorealistic, cinematic, 16:9 aspect ratio.",
        ]
    );
}

#[tokio::test(start_paused = true)]
async fn failed_b_roll_prompt_is_skipped() {
    let driver = Arc::new(MockDriver::new().refusing(&["skyline"]));
    let sink = Arc::new(RecordingSink::new());
    let images = orchestrator(&driver, sink.clone())
        .generate_b_roll(&prompts(&["harbor", "skyline", "market", "stadium"]))
        .await;

    let rendered: Vec<String> = images.iter().map(prompt_of).collect();
    assert_eq!(rendered.len(), 3);
    assert!(rendered[0].starts_with("harbor"));
    assert!(rendered[1].starts_with("market"));
    assert!(rendered[2].starts_with("stadium"));
    assert!(sink.events().contains(&StudioEvent::BRollSkipped { index: 1 }));
}

#[tokio::test(start_paused = true)]
async fn b_roll_errors_do_not_abort_the_batch() {
    let driver = Arc::new(MockDriver::new().with_image_rule(|request| {
        if request.prompt().starts_with("harbor") {
            Err(newsdesk_error::BackendError::new(
                newsdesk_error::BackendErrorKind::Http {
                    status_code: 400,
                    message: "prompt rejected".to_string(),
                },
            ))
        } else {
            Ok(Some(test_utils::image_for(request)))
        }
    }));
    let images = orchestrator(&driver, Arc::new(RecordingSink::new()))
        .generate_b_roll(&prompts(&["harbor", "skyline"]))
        .await;

    assert_eq!(images.len(), 1);
    assert_eq!(driver.image_requests().len(), 2);
}

#[tokio::test(start_paused = true)]
async fn empty_b_roll_batch_makes_no_calls() {
    let driver = Arc::new(MockDriver::new());
    let images = orchestrator(&driver, Arc::new(RecordingSink::new()))
        .generate_b_roll(&[])
        .await;
    assert!(images.is_empty());
    assert!(driver.image_requests().is_empty());
}

#[tokio::test(start_paused = true)]
async fn b_roll_calls_are_spaced() {
    let driver = Arc::new(MockDriver::new());
    orchestrator(&driver, Arc::new(RecordingSink::new()))
        .generate_b_roll(&prompts(&["a", "b", "c"]))
        .await;

    let times = driver.image_call_times();
    assert_eq!(times[1] - times[0], Duration::from_secs(15));
    assert_eq!(times[2] - times[1], Duration::from_secs(15));
}

#[tokio::test(start_paused = true)]
async fn regeneration_rethrows_after_retries() {
    let driver = Arc::new(MockDriver::new().with_image_rule(|_| Err(quota_error())));
    let sink = Arc::new(RecordingSink::new());
    let started = Instant::now();

    let err = orchestrator(&driver, sink.clone())
        .regenerate_thumbnail("An edited thumbnail")
        .await
        .expect_err("remote failure is not swallowed");

    match err.kind {
        StudioErrorKind::RemoteCallFailed(message) => {
            assert!(message.contains("Quota exceeded for imagen"));
        }
        other => panic!("unexpected kind {other:?}"),
    }
    assert_eq!(driver.image_requests().len(), 4);
    assert_eq!(started.elapsed(), Duration::from_secs(5 + 10 + 20));

    let retries = sink
        .events()
        .into_iter()
        .filter(|event| matches!(event, StudioEvent::RetryScheduled { .. }))
        .count();
    assert_eq!(retries, 3);
}

#[tokio::test(start_paused = true)]
async fn regeneration_without_image_is_none() {
    let driver = Arc::new(MockDriver::new().with_image_rule(|_| Ok(None)));
    let image = orchestrator(&driver, Arc::new(RecordingSink::new()))
        .regenerate_thumbnail("An edited thumbnail")
        .await
        .expect("backend answered");

    assert!(image.is_none());
    assert_eq!(driver.image_requests().len(), 1);
}

#[tokio::test(start_paused = true)]
async fn regeneration_rejects_empty_prompt() {
    let driver = Arc::new(MockDriver::new());
    let err = studio(&driver)
        .regenerate_thumbnail("   ")
        .await
        .expect_err("empty prompt");

    assert!(matches!(err.kind, StudioErrorKind::InvalidInput(_)));
    assert!(driver.image_requests().is_empty());
}

fn expander(driver: &Arc<MockDriver>) -> ParagraphPromptExpander {
    ParagraphPromptExpander::new(driver.clone(), RetryableCaller::default(), 0.7)
}

#[tokio::test(start_paused = true)]
async fn paragraph_element_without_prompt_is_malformed() {
    let driver = Arc::new(MockDriver::new().with_text(
        r#"{"prompts": [{"paragraph": "One."}, {"paragraph": "Two.", "prompt": "Pan left"}]}"#,
    ));
    let err = expander(&driver)
        .expand("One.\n\nTwo.", StoryMode::Single)
        .await
        .expect_err("element lacks prompt");
    assert!(matches!(err.kind, StudioErrorKind::MalformedResponse(_)));
}

#[tokio::test(start_paused = true)]
async fn paragraph_response_without_array_is_malformed() {
    let driver = Arc::new(MockDriver::new().with_text(r#"{"paragraphs": []}"#));
    let err = expander(&driver)
        .expand("One.", StoryMode::Single)
        .await
        .expect_err("array missing");
    assert!(matches!(err.kind, StudioErrorKind::MalformedResponse(_)));
}

#[tokio::test(start_paused = true)]
async fn paragraph_segmentation_is_taken_as_returned() {
    let driver = Arc::new(MockDriver::new().with_text(
        r#"{"prompts": [{"paragraph": "One. Two. Three.", "prompt": "Wide establishing shot"}]}"#,
    ));
    let set = expander(&driver)
        .expand("One.\n\nTwo.\n\nThree.", StoryMode::Single)
        .await
        .expect("parses");

    assert_eq!(set.len(), 1);
    assert_eq!(
        set.iter().next().map(|p| p.prompt.as_str()),
        Some("Wide establishing shot")
    );
}

#[tokio::test(start_paused = true)]
async fn empty_script_is_rejected_without_a_call() {
    let driver = Arc::new(MockDriver::new());
    let err = expander(&driver).expand("  ", StoryMode::Single).await.expect_err("empty");
    assert!(matches!(err.kind, StudioErrorKind::InvalidInput(_)));
    assert!(driver.text_requests().is_empty());
}

#[tokio::test(start_paused = true)]
async fn single_story_script_is_sent_whole() {
    let driver = Arc::new(MockDriver::new().with_text(
        r#"{"prompts": [{"paragraph": "Opening.", "prompt": "Aerial shot of the park"}]}"#,
    ));
    let script = "Opening line.\n\nFULL SCRIPT: is how the memo was titled.";
    expander(&driver)
        .expand(script, StoryMode::Single)
        .await
        .expect("parses");

    let sent = driver.text_requests()[0].prompt_text();
    assert!(sent.contains("Opening line."));
    assert!(sent.contains("is how the memo was titled."));
}

#[tokio::test(start_paused = true)]
async fn roundup_script_is_cut_to_main_section() {
    let driver = Arc::new(MockDriver::new().with_text(
        r#"{"prompts": [{"paragraph": "Body.", "prompt": "Slow pan across the harbor"}]}"#,
    ));
    let script = "INTRO:\nHook line.\n\n---\n\nFULL SCRIPT:\nBody.";
    expander(&driver)
        .expand(script, StoryMode::Multi)
        .await
        .expect("parses");

    let sent = driver.text_requests()[0].prompt_text();
    assert!(sent.contains("Body."));
    assert!(!sent.contains("Hook line."));
}

#[tokio::test(start_paused = true)]
async fn roundup_batch_with_no_images_fails() {
    let driver = Arc::new(MockDriver::new().with_image_rule(|_| Ok(None)));
    let err = orchestrator(&driver, Arc::new(RecordingSink::new()))
        .generate_multi(
            "Split screen of a trading floor and a lab",
            &prompts(&["Rising stock chart", "Vaccine vial"]),
        )
        .await
        .expect_err("nothing rendered");

    assert!(matches!(err.kind, StudioErrorKind::AllImagesFailed(_)));
    assert_eq!(driver.image_requests().len(), 2 + 2 * 2);
}

#[tokio::test(start_paused = true)]
async fn roundup_batch_succeeds_with_only_a_thumbnail() {
    let driver = Arc::new(MockDriver::new().with_image_rule(|request| {
        if request.prompt().contains("trading floor") {
            Ok(Some(test_utils::image_for(request)))
        } else {
            Ok(None)
        }
    }));
    let images = orchestrator(&driver, Arc::new(RecordingSink::new()))
        .generate_multi(
            "Split screen of a trading floor and a lab",
            &prompts(&["Rising stock chart", "Vaccine vial"]),
        )
        .await
        .expect("thumbnail alone is enough");

    assert!(images.thumbnail.is_some());
    assert!(images.post_images.iter().all(Option::is_none));
}
