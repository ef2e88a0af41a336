//! Subcommand handlers.

use super::output::{image_file_name, load_reference_image, write_image, write_run};
use anyhow::{Context, bail};
use newsdesk::{GenerationRequest, ImageRole, StoryInput, StoryMode, Studio, StudioRun};
use std::path::{Path, PathBuf};
use tracing::instrument;

/// Generate a single-story package.
#[instrument(skip(studio))]
pub async fn single(
    studio: &Studio,
    headline: Option<String>,
    url: Option<String>,
    language: Option<String>,
    image: Option<PathBuf>,
    out: &Path,
) -> anyhow::Result<()> {
    let image = image.as_deref().map(load_reference_image).transpose()?;
    let mut request = GenerationRequest::single(url.as_deref(), headline.as_deref(), image)?;
    if let Some(language) = language {
        request = request.with_language(language);
    }

    let run = studio.generate(&request).await?;
    report(&run, out)
}

/// Generate a roundup package.
#[instrument(skip(studio))]
pub async fn multi(
    studio: &Studio,
    headlines: Vec<String>,
    images: Vec<(usize, PathBuf)>,
    out: &Path,
) -> anyhow::Result<()> {
    let stories = stories_with_images(headlines, images)?;
    let run = studio.generate_multi(stories).await?;
    report(&run, out)
}

/// Pair headlines with their `INDEX=PATH` images (1-based).
///
/// An image must point at a non-blank headline; blank headlines are dropped
/// from the roundup, so an image on one would be lost.
fn stories_with_images(
    headlines: Vec<String>,
    images: Vec<(usize, PathBuf)>,
) -> anyhow::Result<Vec<StoryInput>> {
    let mut stories: Vec<StoryInput> = headlines.into_iter().map(StoryInput::new).collect();
    for (index, path) in images {
        let count = stories.len();
        let Some(story) = index.checked_sub(1).and_then(|slot| stories.get_mut(slot)) else {
            bail!("--image {index}=... refers to story {index}, but only {count} were given");
        };
        if story.headline.trim().is_empty() {
            bail!("--image {index}=... is attached to story {index}, which has no headline");
        }
        story.image = Some(load_reference_image(&path)?);
    }
    Ok(stories)
}

/// Render a thumbnail from an edited prompt.
#[instrument(skip(studio))]
pub async fn thumbnail(studio: &Studio, prompt: &str, out: &Path) -> anyhow::Result<()> {
    let Some(image) = studio.regenerate_thumbnail(prompt).await? else {
        bail!("No thumbnail was produced. The prompt may have been blocked by safety filters");
    };
    let path = write_image(out, &image_file_name(ImageRole::Thumbnail, &image), &image)?;
    println!("{}", path.display());
    Ok(())
}

/// Render B-roll stills.
#[instrument(skip(studio))]
pub async fn b_roll(studio: &Studio, prompts: &[String], out: &Path) -> anyhow::Result<()> {
    let images = studio.generate_b_roll(prompts).await;
    for (index, image) in images.iter().enumerate() {
        let path = write_image(out, &image_file_name(ImageRole::BRoll(index), image), image)?;
        println!("{}", path.display());
    }

    let missing = prompts.len() - images.len();
    if missing > 0 {
        eprintln!("warning: {missing} of {} B-roll stills could not be generated", prompts.len());
    }
    if images.is_empty() && !prompts.is_empty() {
        bail!("No B-roll stills were generated");
    }
    Ok(())
}

/// Expand a script file into paragraph prompts.
#[instrument(skip(studio))]
pub async fn paragraphs(
    studio: &Studio,
    script_file: &Path,
    roundup: bool,
    out: Option<&Path>,
) -> anyhow::Result<()> {
    let script = std::fs::read_to_string(script_file)
        .with_context(|| format!("Failed to read script {}", script_file.display()))?;
    let mode = if roundup {
        StoryMode::Multi
    } else {
        StoryMode::Single
    };
    let prompts = studio.generate_paragraph_prompts(&script, mode).await?;
    let json = serde_json::to_string_pretty(&prompts)?;

    match out {
        Some(dir) => {
            std::fs::create_dir_all(dir)
                .with_context(|| format!("Failed to create {}", dir.display()))?;
            let path = dir.join("paragraphs.json");
            std::fs::write(&path, json)
                .with_context(|| format!("Failed to write {}", path.display()))?;
            println!("{}", path.display());
        }
        None => println!("{json}"),
    }
    Ok(())
}

fn report(run: &StudioRun, out: &Path) -> anyhow::Result<()> {
    for warning in run.warnings() {
        eprintln!("warning: {warning}");
    }
    if let Some(error) = run.image_error() {
        eprintln!("error: images could not be generated: {error}");
    }
    for path in write_run(run, out)? {
        println!("{}", path.display());
    }
    Ok(())
}
