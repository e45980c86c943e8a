//! Download orchestration for one reader episode
//!
//! Discovery scrapes the reader page for metadata links; download pulls
//! each metadata/image pair to disk for archival before reconstruction.

use crate::fetch::client::HttpClient;
use crate::fetch::page::{ReaderPage, image_link_for};
use crate::io::error::{RestoreError, Result, invalid_target};
use std::path::{Path, PathBuf};

/// Absolute URLs for one scrambled page and its metadata document
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageLink {
    /// Full URL of the `.ptimg.json` document
    pub metadata_url: String,
    /// Full URL of the scrambled image
    pub image_url: String,
}

impl PageLink {
    /// Filename component of the metadata URL
    pub fn metadata_filename(&self) -> &str {
        trailing_segment(&self.metadata_url)
    }

    /// Filename component of the image URL
    pub fn image_filename(&self) -> &str {
        trailing_segment(&self.image_url)
    }
}

/// One discovered episode: title plus page links in reading order
#[derive(Debug, Clone)]
pub struct Episode {
    /// Page title from the reader, when present
    pub title: Option<String>,
    /// Pages in document order
    pub pages: Vec<PageLink>,
}

/// Drives discovery and download through an injected [`HttpClient`]
pub struct EpisodeFetcher<'a, C: HttpClient> {
    client: &'a C,
}

impl<'a, C: HttpClient> EpisodeFetcher<'a, C> {
    /// Create a fetcher borrowing the given client
    pub const fn new(client: &'a C) -> Self {
        Self { client }
    }

    /// Fetch the reader page and scrape it for page links
    ///
    /// `reader_url` must end with `/`; links are resolved relative to it.
    ///
    /// # Errors
    ///
    /// Propagates retrieval errors, and returns
    /// [`RestoreError::InvalidTarget`] when the page contains no
    /// `data-ptimg` links at all.
    pub fn discover(&self, reader_url: &str) -> Result<Episode> {
        let body = self.client.get(reader_url)?;
        let html = String::from_utf8_lossy(&body);
        let page = ReaderPage::parse(&html);

        if page.metadata_links.is_empty() {
            return Err(invalid_target(
                &reader_url,
                &"reader page contains no data-ptimg links",
            ));
        }

        let pages = page
            .metadata_links
            .iter()
            .map(|link| PageLink {
                metadata_url: format!("{reader_url}{link}"),
                image_url: format!("{reader_url}{}", image_link_for(link)),
            })
            .collect();

        Ok(Episode {
            title: page.title,
            pages,
        })
    }

    /// Download one metadata/image pair into `raws_dir`
    ///
    /// Returns the written (image, metadata) paths.
    ///
    /// # Errors
    ///
    /// Propagates retrieval errors and reports write failures as
    /// [`RestoreError::FileSystem`].
    pub fn download_page(&self, link: &PageLink, raws_dir: &Path) -> Result<(PathBuf, PathBuf)> {
        let metadata_path = raws_dir.join(link.metadata_filename());
        let metadata_bytes = self.client.get(&link.metadata_url)?;
        write_bytes(&metadata_path, &metadata_bytes)?;

        let image_path = raws_dir.join(link.image_filename());
        let image_bytes = self.client.get(&link.image_url)?;
        write_bytes(&image_path, &image_bytes)?;

        Ok((image_path, metadata_path))
    }
}

fn trailing_segment(url: &str) -> &str {
    url.rsplit('/').next().unwrap_or(url)
}

fn write_bytes(path: &Path, bytes: &[u8]) -> Result<()> {
    std::fs::write(path, bytes).map_err(|err| RestoreError::FileSystem {
        path: path.to_path_buf(),
        operation: "write download",
        source: err,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_link_filenames() {
        let link = PageLink {
            metadata_url: "https://example.test/c/25/data/0001.ptimg.json".to_string(),
            image_url: "https://example.test/c/25/data/0001.jpg".to_string(),
        };
        assert_eq!(link.metadata_filename(), "0001.ptimg.json");
        assert_eq!(link.image_filename(), "0001.jpg");
    }
}
