use std::path::{Path, PathBuf};

use anyhow::Context as _;

use crate::foundation::error::{DoodleError, DoodleResult};
use crate::foundation::rng::RandomSource;
use crate::share::compose::ShareCompositor;
use crate::share::encode::ImageBuffer;
use crate::share::layout::AspectRatio;

/// File name offered for downloaded cards.
pub const DEFAULT_FILENAME: &str = "motivation-quote.png";

/// Where finished cards go.
pub trait ShareTarget {
    /// Save `image` under `filename`.
    fn download_image(&mut self, image: &ImageBuffer, filename: &str) -> DoodleResult<()>;

    /// Offer `image` to a share sheet. `false` when sharing is unavailable or was declined.
    fn share_image(&mut self, image: &ImageBuffer, caption: &str) -> bool;
}

/// Saves downloads into a directory. Has no share sheet.
#[derive(Clone, Debug)]
pub struct DirectoryTarget {
    dir: PathBuf,
}

impl DirectoryTarget {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }
}

fn check_filename(filename: &str) -> DoodleResult<()> {
    let plain = Path::new(filename)
        .file_name()
        .is_some_and(|name| name == filename);
    if filename.is_empty() || !plain {
        return Err(DoodleError::validation(format!(
            "download file name must be a plain file name, got \"{filename}\""
        )));
    }
    Ok(())
}

impl ShareTarget for DirectoryTarget {
    fn download_image(&mut self, image: &ImageBuffer, filename: &str) -> DoodleResult<()> {
        check_filename(filename)?;
        std::fs::create_dir_all(&self.dir)
            .with_context(|| format!("create download dir '{}'", self.dir.display()))?;
        let path = self.dir.join(filename);
        std::fs::write(&path, &image.bytes)
            .with_context(|| format!("write image '{}'", path.display()))?;
        tracing::debug!(path = %path.display(), bytes = image.bytes.len(), "image downloaded");
        Ok(())
    }

    fn share_image(&mut self, _image: &ImageBuffer, _caption: &str) -> bool {
        tracing::warn!("share sheet unavailable for directory target");
        false
    }
}

/// Records every call. Sharing succeeds when `accept_shares` is set.
#[derive(Clone, Debug, Default)]
pub struct InMemoryTarget {
    pub accept_shares: bool,
    pub downloads: Vec<(String, ImageBuffer)>,
    /// Every share attempt, accepted or not.
    pub share_attempts: Vec<(String, ImageBuffer)>,
}

impl InMemoryTarget {
    pub fn new(accept_shares: bool) -> Self {
        Self {
            accept_shares,
            ..Self::default()
        }
    }
}

impl ShareTarget for InMemoryTarget {
    fn download_image(&mut self, image: &ImageBuffer, filename: &str) -> DoodleResult<()> {
        check_filename(filename)?;
        self.downloads.push((filename.to_owned(), image.clone()));
        Ok(())
    }

    fn share_image(&mut self, image: &ImageBuffer, caption: &str) -> bool {
        self.share_attempts.push((caption.to_owned(), image.clone()));
        self.accept_shares
    }
}

/// Result of [`share_quote`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ShareOutcome {
    /// The 9:16 story card was shared.
    Story,
    /// The story share failed and the square card was shared instead.
    Square,
    /// Neither card could be shared.
    NotShared,
}

/// Compose the square card and save it as [`DEFAULT_FILENAME`].
pub fn download_quote<R: RandomSource>(
    compositor: &mut ShareCompositor<R>,
    target: &mut dyn ShareTarget,
    quote: &str,
) -> DoodleResult<ImageBuffer> {
    let image = compositor.compose(quote, AspectRatio::Square)?;
    target.download_image(&image, DEFAULT_FILENAME)?;
    Ok(image)
}

/// Share `quote` as a story card, falling back to the square card.
///
/// Only a failure to compose the square card is an error.
pub fn share_quote<R: RandomSource>(
    compositor: &mut ShareCompositor<R>,
    target: &mut dyn ShareTarget,
    quote: &str,
) -> DoodleResult<ShareOutcome> {
    match compositor.compose(quote, AspectRatio::Portrait) {
        Ok(story) => {
            if target.share_image(&story, quote) {
                return Ok(ShareOutcome::Story);
            }
        }
        Err(e) => tracing::warn!(error = %e, "story card failed, trying square card"),
    }

    let square = compositor.compose(quote, AspectRatio::Square)?;
    if target.share_image(&square, quote) {
        Ok(ShareOutcome::Square)
    } else {
        Ok(ShareOutcome::NotShared)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/share/deliver.rs"]
mod tests;
