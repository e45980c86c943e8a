//! Command-line interface for downloading and restoring scrambled pages

use crate::fetch::{EpisodeFetcher, HttpClient, WebClient};
use crate::io::configuration::{EXPECTED_URL_TOKENS, RESTORED_DIR};
use crate::io::error::{Result, RestoreError, invalid_target};
use crate::io::export::save_canvas;
use crate::io::paths;
use crate::io::progress::ProgressManager;
use crate::metadata::ImageDescriptor;
use crate::restore::descramble;
use clap::Parser;
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "unbinb")]
#[command(
    author,
    version,
    about = "Restore scrambled SpeedBinB web reader images"
)]
/// Command-line arguments for the descrambling tool
pub struct Cli {
    /// Reader URL to download and restore, or a local directory of
    /// already-downloaded .jpg/.ptimg.json pairs
    #[arg(value_name = "TARGET")]
    pub target: String,

    /// Root directory for downloaded raws and restored output
    #[arg(short, long, default_value = ".")]
    pub output_dir: PathBuf,

    /// Accept reader URLs on any host
    #[arg(long)]
    pub any_host: bool,

    /// Process pages even if downloads or output already exist
    #[arg(short, long)]
    pub no_skip: bool,

    /// Suppress progress output
    #[arg(short, long)]
    pub quiet: bool,
}

impl Cli {
    /// Check if existing files should be skipped
    pub const fn skip_existing(&self) -> bool {
        !self.no_skip
    }

    /// Check if progress should be displayed
    pub const fn should_show_progress(&self) -> bool {
        !self.quiet
    }

    fn target_is_url(&self) -> bool {
        self.target.starts_with("http://") || self.target.starts_with("https://")
    }
}

/// Orchestrates download and batch reconstruction with progress tracking
pub struct JobRunner {
    cli: Cli,
    progress: Option<ProgressManager>,
}

impl JobRunner {
    /// Create a runner from parsed CLI arguments
    pub fn new(cli: Cli) -> Self {
        let progress = cli.should_show_progress().then(ProgressManager::new);
        Self { cli, progress }
    }

    /// Run the full pipeline for the configured target
    ///
    /// A failed page is reported and the batch continues with the next
    /// page; the runner returns [`RestoreError::BatchFailed`] at the end
    /// so partial failure still exits nonzero.
    ///
    /// # Errors
    ///
    /// Returns target validation, retrieval, and filesystem errors, or
    /// [`RestoreError::BatchFailed`] summarizing per-page failures.
    pub fn run(&mut self) -> Result<()> {
        if self.cli.target_is_url() {
            let client = WebClient::new()?;
            self.run_remote(&client)
        } else {
            self.run_local()
        }
    }

    /// Run the download-and-restore pipeline through the given client
    ///
    /// A page whose download fails is reported, counted, and excluded
    /// from the restore stage; the remaining pages proceed.
    ///
    /// # Errors
    ///
    /// Returns target validation and filesystem errors, retrieval errors
    /// for the reader page itself, or [`RestoreError::BatchFailed`]
    /// summarizing per-page failures.
    pub fn run_remote<C: HttpClient>(&mut self, client: &C) -> Result<()> {
        let reader_url = normalize_reader_url(&self.cli.target, self.cli.any_host)?;
        let fetcher = EpisodeFetcher::new(client);
        let episode = fetcher.discover(&reader_url)?;

        let layout = paths::archive_layout(
            &self.cli.output_dir,
            &reader_url,
            episode.title.as_deref(),
        );
        create_dir(&layout.raws_dir)?;
        create_dir(&layout.restored_dir)?;

        if let Some(pm) = &mut self.progress {
            pm.start_stage("Downloading", episode.pages.len());
        }

        let total = episode.pages.len();
        let mut jobs = Vec::with_capacity(total);
        let mut failed = 0;
        for link in &episode.pages {
            let image_path = layout.raws_dir.join(link.image_filename());
            let metadata_path = layout.raws_dir.join(link.metadata_filename());
            if self.cli.skip_existing() && image_path.exists() && metadata_path.exists() {
                jobs.push((image_path, metadata_path));
            } else {
                // A dead page must not abort the rest of the episode
                match fetcher.download_page(link, &layout.raws_dir) {
                    Ok(_) => jobs.push((image_path, metadata_path)),
                    Err(error) => {
                        failed += 1;
                        report_failure(&image_path, &error);
                    }
                }
            }
            if let Some(pm) = &self.progress {
                pm.advance();
            }
        }
        if let Some(pm) = &mut self.progress {
            pm.finish_stage();
        }

        self.restore_batch(&jobs, &layout.restored_dir, failed, total)
    }

    fn run_local(&mut self) -> Result<()> {
        let raws_dir = PathBuf::from(&self.cli.target);
        if !raws_dir.is_dir() {
            return Err(invalid_target(
                &self.cli.target,
                &"target must be a reader URL or an existing directory",
            ));
        }

        let jobs = collect_local_jobs(&raws_dir)?;
        if jobs.is_empty() {
            return Err(invalid_target(
                &self.cli.target,
                &"directory contains no .jpg/.jpeg images",
            ));
        }

        let chapter = raws_dir.file_name().unwrap_or_default();
        let restored_dir = self.cli.output_dir.join(RESTORED_DIR).join(chapter);
        let total = jobs.len();
        self.restore_batch(&jobs, &restored_dir, 0, total)
    }

    fn restore_batch(
        &mut self,
        jobs: &[(PathBuf, PathBuf)],
        restored_dir: &Path,
        prior_failures: usize,
        total: usize,
    ) -> Result<()> {
        if let Some(pm) = &mut self.progress {
            pm.start_stage("Restoring", jobs.len());
        }

        let mut failed = prior_failures;
        for (image_path, metadata_path) in jobs {
            let output_path = restored_dir.join(paths::restored_name(image_path));
            if self.cli.skip_existing() && output_path.exists() {
                self.note_skip(&output_path);
            } else if let Err(error) = restore_page(image_path, metadata_path, &output_path) {
                failed += 1;
                report_failure(image_path, &error);
            }
            if let Some(pm) = &self.progress {
                pm.advance();
            }
        }
        if let Some(pm) = &mut self.progress {
            pm.finish_stage();
        }

        if failed > 0 {
            Err(RestoreError::BatchFailed { failed, total })
        } else {
            Ok(())
        }
    }

    // Allow print for user feedback for skipped files
    #[allow(clippy::print_stderr)]
    fn note_skip(&self, output_path: &Path) {
        if !self.cli.quiet {
            eprintln!("Skipping: {} (output exists)", output_path.display());
        }
    }
}

/// Reconstruct one page from disk and save it as PNG
///
/// # Errors
///
/// Propagates metadata, image loading, reconstruction, and export errors;
/// each carries the offending path and, for tile errors, the tile index.
pub fn restore_page(image_path: &Path, metadata_path: &Path, output_path: &Path) -> Result<()> {
    let metadata_bytes =
        std::fs::read(metadata_path).map_err(|err| RestoreError::Metadata {
            origin: metadata_path.display().to_string(),
            reason: format!("unreadable: {err}"),
        })?;
    let descriptor =
        ImageDescriptor::from_json(&metadata_path.display().to_string(), &metadata_bytes)?;

    let source = image::open(image_path).map_err(|err| RestoreError::ImageLoad {
        path: image_path.to_path_buf(),
        source: err,
    })?;

    let canvas = descramble(&source, &descriptor)?;
    save_canvas(canvas, output_path)
}

// Job failures are reported immediately; the batch carries on
#[allow(clippy::print_stderr)]
fn report_failure(image_path: &Path, error: &RestoreError) {
    eprintln!("Failed: {}: {error}", image_path.display());
}

// A URL missing every expected token is almost certainly not a reader
// page; one matching token is enough, mirror sites move hosts around.
fn normalize_reader_url(raw: &str, any_host: bool) -> Result<String> {
    let lowered = raw.to_lowercase();
    if !any_host
        && !EXPECTED_URL_TOKENS
            .iter()
            .any(|token| lowered.contains(token))
    {
        return Err(invalid_target(
            &raw,
            &format!(
                "expected a URL containing one of {EXPECTED_URL_TOKENS:?}; pass --any-host to override"
            ),
        ));
    }

    if raw.ends_with('/') {
        Ok(raw.to_string())
    } else {
        Ok(format!("{raw}/"))
    }
}

fn collect_local_jobs(raws_dir: &Path) -> Result<Vec<(PathBuf, PathBuf)>> {
    let mut images = Vec::new();
    for entry in std::fs::read_dir(raws_dir).map_err(|err| RestoreError::FileSystem {
        path: raws_dir.to_path_buf(),
        operation: "read directory",
        source: err,
    })? {
        let path = entry
            .map_err(|err| RestoreError::FileSystem {
                path: raws_dir.to_path_buf(),
                operation: "read directory entry",
                source: err,
            })?
            .path();
        let is_jpeg = path
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| ext.eq_ignore_ascii_case("jpg") || ext.eq_ignore_ascii_case("jpeg"));
        if is_jpeg {
            images.push(path);
        }
    }
    images.sort();

    Ok(images
        .into_iter()
        .map(|image_path| {
            let metadata_path = paths::metadata_path_for(&image_path);
            (image_path, metadata_path)
        })
        .collect())
}

fn create_dir(dir: &Path) -> Result<()> {
    std::fs::create_dir_all(dir).map_err(|err| RestoreError::FileSystem {
        path: dir.to_path_buf(),
        operation: "create directory",
        source: err,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_appends_trailing_slash() {
        let url = normalize_reader_url("https://7irocomics.jp/webcomic/content001/25", false)
            .unwrap();
        assert_eq!(url, "https://7irocomics.jp/webcomic/content001/25/");
    }

    #[test]
    fn test_normalize_accepts_single_matching_token() {
        // Matches the reader's own check: any one token is enough
        assert!(normalize_reader_url("https://example.test/webcomic/1/", false).is_ok());
        assert!(normalize_reader_url("https://7irocomics.jp/reader/1/", false).is_ok());
    }

    #[test]
    fn test_normalize_rejects_url_without_any_token() {
        let err = normalize_reader_url("https://example.test/comics/1/", false).unwrap_err();
        assert!(matches!(err, RestoreError::InvalidTarget { .. }));
    }

    #[test]
    fn test_normalize_accepts_tokenless_url_with_override() {
        assert!(normalize_reader_url("https://example.test/comics/1/", true).is_ok());
    }
}
