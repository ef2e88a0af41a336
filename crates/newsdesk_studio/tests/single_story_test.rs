//! Single-story runs against a scripted backend.

mod test_utils;

use newsdesk_core::{
    AspectRatio, GenerationRequest, ImageRole, NewsTopic, RecordingSink, ReferenceImage, Stage,
    StudioEvent,
};
use newsdesk_error::{BackendError, BackendErrorKind, StudioErrorKind};
use newsdesk_rate_limit::{PacingPolicy, RequestPacer, RetryableCaller};
use newsdesk_studio::{DEFAULT_BASE_ANCHOR_PROMPT, ImageOrchestrator, Studio};
use std::sync::Arc;
use std::time::Duration;
use test_utils::{MockDriver, config, prompt_of, quota_error, single_story_json, studio};

#[tokio::test(start_paused = true)]
async fn headline_run_produces_bundle_and_images() {
    let driver = Arc::new(MockDriver::new().with_text(single_story_json()));
    let studio = studio(&driver);

    let run = studio
        .generate_single(None, Some("City announces new park"), None)
        .await
        .expect("run succeeds");

    let bundle = run.bundle();
    assert!(!bundle.script().is_empty());
    assert_eq!(*bundle.topic(), NewsTopic::Politics);
    assert!((3..=4).contains(&bundle.video_image_prompts().len()));
    assert!((1..=2).contains(&bundle.story_video_prompts().len()));

    let images = run.images();
    assert!(images.anchor_16x9().is_some());
    assert!(images.anchor_9x16().is_some());
    assert!(images.get(ImageRole::PostImage(0)).is_some());
    assert_eq!(images.b_roll().len(), 3);
    assert!(!*images.fallback_used());
    assert!(run.warnings().is_empty());
    assert!(run.image_error().is_none());

    let text = driver.text_requests();
    assert_eq!(text.len(), 1);
    assert!(text[0].response_schema().is_some());
    assert!(!*text[0].web_search());
    assert_eq!(*text[0].temperature(), Some(0.5));
    assert!(text[0].prompt_text().contains("City announces new park"));
}

#[tokio::test(start_paused = true)]
async fn images_are_requested_in_fixed_order() {
    let driver = Arc::new(MockDriver::new().with_text(single_story_json()));
    studio(&driver)
        .generate_single(None, Some("City announces new park"), None)
        .await
        .expect("run succeeds");

    let ratios: Vec<AspectRatio> = driver
        .image_requests()
        .iter()
        .map(|request| *request.aspect_ratio())
        .collect();
    assert_eq!(
        ratios,
        vec![
            AspectRatio::Landscape,
            AspectRatio::Portrait,
            AspectRatio::Square,
            AspectRatio::Landscape,
            AspectRatio::Landscape,
            AspectRatio::Landscape,
        ]
    );

    let requests = driver.image_requests();
    assert!(requests[0].prompt().ends_with("with a background of a sunny city park with young trees"));
    assert!(requests[1].prompt().starts_with("Medium close-up shot of"));
    assert!(requests[2].prompt().contains("Aerial view of a new park"));
    assert!(requests[3].prompt().ends_with(". Photorealistic, cinematic, 16:9 aspect ratio."));
}

#[tokio::test(start_paused = true)]
async fn consecutive_image_calls_are_spaced() {
    let driver = Arc::new(MockDriver::new().with_text(single_story_json()));
    studio(&driver)
        .generate_single(None, Some("City announces new park"), None)
        .await
        .expect("run succeeds");

    let times = driver.image_call_times();
    assert_eq!(times.len(), 6);
    for pair in times.windows(2) {
        assert!(pair[1] - pair[0] >= Duration::from_secs(15));
    }
}

#[tokio::test(start_paused = true)]
async fn refused_anchors_fall_back_to_generic_studio() {
    let driver = Arc::new(
        MockDriver::new()
            .with_text(single_story_json())
            .refusing(&["sunny city park"]),
    );
    let run = studio(&driver)
        .generate_single(None, Some("City announces new park"), None)
        .await
        .expect("run succeeds");

    let images = run.images();
    assert!(*images.fallback_used());
    let final_prompt = images.final_prompt().clone().unwrap_or_default();
    assert!(final_prompt.contains("a generic news studio"));
    assert!(!final_prompt.contains("sunny city park"));
    assert!(final_prompt.ends_with(
        "with a background of a generic news studio. (Fallback to generic background due to content policy)"
    ));

    let anchor = images.anchor_16x9().as_ref().expect("fallback rendered");
    assert!(prompt_of(anchor).contains("a generic news studio"));

    let requests = driver.image_requests();
    assert_eq!(requests.len(), 3 + 2 + 3);
    assert_eq!(*requests[3].aspect_ratio(), AspectRatio::Landscape);
    assert_eq!(*requests[4].aspect_ratio(), AspectRatio::Portrait);
    assert!(requests[4].prompt().starts_with("Medium close-up shot of"));
}

#[tokio::test(start_paused = true)]
async fn total_image_failure_keeps_the_bundle() {
    let driver = Arc::new(
        MockDriver::new()
            .with_text(single_story_json())
            .with_image_rule(|_| Ok(None)),
    );
    let run = studio(&driver)
        .generate_single(None, Some("City announces new park"), None)
        .await
        .expect("text succeeded, so the run succeeds");

    assert!(!run.bundle().script().is_empty());
    assert!(run.images().is_empty());
    let error = run.image_error().as_ref().expect("banner error");
    assert!(matches!(error.kind, StudioErrorKind::AllImagesFailed(_)));
    // three primaries and two fallbacks, no B-roll
    assert_eq!(driver.image_requests().len(), 5);
}

#[tokio::test(start_paused = true)]
async fn orchestrator_reports_all_images_failed() {
    let driver = Arc::new(MockDriver::new().with_image_rule(|_| Ok(None)));
    let orchestrator = ImageOrchestrator::new(
        driver.clone(),
        RetryableCaller::default(),
        RequestPacer::new(PacingPolicy::Unpaced),
        DEFAULT_BASE_ANCHOR_PROMPT,
    );

    let err = orchestrator
        .generate_single("a flooded street", "Flood warning graphic")
        .await
        .expect_err("nothing rendered");
    assert!(matches!(err.kind, StudioErrorKind::AllImagesFailed(_)));
}

#[tokio::test(start_paused = true)]
async fn url_without_image_enables_web_search() {
    let fenced = format!("```json\n{}\n```", single_story_json());
    let driver = Arc::new(MockDriver::new().with_text(fenced));
    let request = GenerationRequest::single(Some("https://example.com/park"), None, None)
        .expect("valid url");

    studio(&driver).generate(&request).await.expect("run succeeds");

    let text = driver.text_requests();
    assert!(*text[0].web_search());
    assert!(text[0].response_schema().is_none());
    assert_eq!(*text[0].temperature(), Some(0.3));
    assert!(text[0].prompt_text().contains("https://example.com/park"));
}

#[tokio::test(start_paused = true)]
async fn attached_image_disables_web_search() {
    let driver = Arc::new(MockDriver::new().with_text(single_story_json()));
    let request = GenerationRequest::single(
        Some("https://example.com/park"),
        None,
        Some(ReferenceImage::jpeg(vec![0xFF, 0xD8, 0xFF])),
    )
    .expect("valid url");

    studio(&driver).generate(&request).await.expect("run succeeds");

    let text = driver.text_requests();
    assert!(!*text[0].web_search());
    assert_eq!(text[0].image_count(), 1);
    assert!(text[0].prompt_text().contains("PRIMARY visual context"));
}

#[tokio::test(start_paused = true)]
async fn unparseable_text_aborts_before_images() {
    let driver = Arc::new(MockDriver::new().with_text("Sorry, I can't help with that."));
    let err = studio(&driver)
        .generate_single(None, Some("City announces new park"), None)
        .await
        .expect_err("no JSON");

    assert!(matches!(err.kind, StudioErrorKind::MalformedResponse(_)));
    assert!(driver.image_requests().is_empty());
}

#[tokio::test(start_paused = true)]
async fn transient_text_failure_is_retried() {
    let driver = Arc::new(
        MockDriver::new()
            .with_text_error(quota_error())
            .with_text(single_story_json()),
    );
    studio(&driver)
        .generate_single(None, Some("City announces new park"), None)
        .await
        .expect("second attempt succeeds");

    assert_eq!(driver.text_requests().len(), 2);
}

#[tokio::test(start_paused = true)]
async fn permanent_text_failure_keeps_backend_message() {
    let driver = Arc::new(MockDriver::new().with_text_error(BackendError::new(
        BackendErrorKind::Http {
            status_code: 400,
            message: "API key not valid".to_string(),
        },
    )));
    let err = studio(&driver)
        .generate_single(None, Some("City announces new park"), None)
        .await
        .expect_err("bad key");

    match err.kind {
        StudioErrorKind::RemoteCallFailed(message) => assert!(message.contains("API key not valid")),
        other => panic!("unexpected kind {other:?}"),
    }
    assert_eq!(driver.text_requests().len(), 1);
}

#[tokio::test(start_paused = true)]
async fn events_trace_the_run() {
    let driver = Arc::new(
        MockDriver::new()
            .with_text(single_story_json())
            .refusing(&["sunny city park"]),
    );
    let sink = Arc::new(RecordingSink::new());
    let studio = Studio::with_sink(driver, &config(), sink.clone());

    studio
        .generate_single(None, Some("City announces new park"), None)
        .await
        .expect("run succeeds");

    let events = sink.events();
    assert_eq!(
        events.first(),
        Some(&StudioEvent::StageStarted(Stage::TextGeneration))
    );
    assert!(events.contains(&StudioEvent::FallbackUsed {
        role: ImageRole::Anchor16x9
    }));
    assert!(events.contains(&StudioEvent::StageFinished(Stage::BRoll)));
    assert!(
        events
            .iter()
            .any(|event| matches!(event, StudioEvent::CallPaced { .. }))
    );
}
