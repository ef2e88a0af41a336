//! Reading reference images and writing generated packages to disk.

use anyhow::Context;
use newsdesk::{GeneratedImage, ImageRole, ReferenceImage, StudioRun};
use serde_json::json;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Load a reference image, inferring its MIME type from the extension.
pub fn load_reference_image(path: &Path) -> anyhow::Result<ReferenceImage> {
    let data = std::fs::read(path)
        .with_context(|| format!("Failed to read image {}", path.display()))?;
    debug!(path = %path.display(), bytes = data.len(), "Loaded reference image");
    Ok(ReferenceImage::new(mime_for(path), data))
}

fn mime_for(path: &Path) -> &'static str {
    let extension = path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(str::to_ascii_lowercase);
    match extension.as_deref() {
        Some("png") => "image/png",
        Some("webp") => "image/webp",
        Some("gif") => "image/gif",
        _ => "image/jpeg",
    }
}

/// File name for an image, e.g. `postImage-0.jpg`.
pub fn image_file_name(role: ImageRole, image: &GeneratedImage) -> String {
    let stem = role.to_string().replace('[', "-").replace(']', "");
    format!("{stem}.{}", image.extension())
}

/// Write one image into `dir`.
pub fn write_image(dir: &Path, name: &str, image: &GeneratedImage) -> anyhow::Result<PathBuf> {
    std::fs::create_dir_all(dir)
        .with_context(|| format!("Failed to create {}", dir.display()))?;
    let path = dir.join(name);
    std::fs::write(&path, &image.data)
        .with_context(|| format!("Failed to write {}", path.display()))?;
    Ok(path)
}

/// Write `bundle.json` and every present image of a run into `dir`.
pub fn write_run(run: &StudioRun, dir: &Path) -> anyhow::Result<Vec<PathBuf>> {
    std::fs::create_dir_all(dir)
        .with_context(|| format!("Failed to create {}", dir.display()))?;

    let summary = json!({
        "bundle": run.bundle(),
        "finalPrompt": run.images().final_prompt(),
        "fallbackUsed": run.images().fallback_used(),
        "warnings": run.warnings(),
        "imageError": run.image_error().as_ref().map(|err| err.kind.to_string()),
    });
    let bundle_path = dir.join("bundle.json");
    std::fs::write(&bundle_path, serde_json::to_string_pretty(&summary)?)
        .with_context(|| format!("Failed to write {}", bundle_path.display()))?;

    let mut written = vec![bundle_path];
    for (role, image) in run.images().present() {
        written.push(write_image(dir, &image_file_name(role, image), image)?);
    }
    info!(dir = %dir.display(), files = written.len(), "Package written");
    Ok(written)
}

#[cfg(test)]
mod tests {
    use super::*;
    use newsdesk::AspectRatio;

    fn image(mime: &str) -> GeneratedImage {
        GeneratedImage {
            mime: mime.to_string(),
            data: vec![1, 2, 3],
            aspect_ratio: AspectRatio::Landscape,
        }
    }

    #[test]
    fn file_names_follow_roles() {
        assert_eq!(
            image_file_name(ImageRole::PostImage(1), &image("image/jpeg")),
            "postImage-1.jpg"
        );
        assert_eq!(
            image_file_name(ImageRole::Anchor16x9, &image("image/png")),
            "anchor16x9.png"
        );
    }

    #[test]
    fn mime_follows_extension() {
        assert_eq!(mime_for(Path::new("photo.PNG")), "image/png");
        assert_eq!(mime_for(Path::new("photo.jpeg")), "image/jpeg");
        assert_eq!(mime_for(Path::new("photo")), "image/jpeg");
    }

    #[test]
    fn reference_image_round_trips_from_disk() {
        let dir = tempfile::tempdir().expect("temp dir");
        let path = dir.path().join("chart.webp");
        std::fs::write(&path, [9, 8, 7]).expect("write");

        let loaded = load_reference_image(&path).expect("loads");
        assert_eq!(loaded.mime, "image/webp");
        assert_eq!(loaded.data, vec![9, 8, 7]);
    }

    #[test]
    fn missing_reference_image_names_the_path() {
        let err = load_reference_image(Path::new("/no/such/photo.jpg")).expect_err("missing");
        assert!(err.to_string().contains("/no/such/photo.jpg"));
    }

    #[test]
    fn images_land_in_nested_directories() {
        let dir = tempfile::tempdir().expect("temp dir");
        let nested = dir.path().join("run/1");
        let path = write_image(&nested, "thumbnail.jpg", &image("image/jpeg")).expect("writes");
        assert_eq!(std::fs::read(path).expect("read"), vec![1, 2, 3]);
    }
}
