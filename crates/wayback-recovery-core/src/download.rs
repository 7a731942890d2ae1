//! Media download dispatch through `yt-dlp`
//!
//! Candidates are de-waybacked before they are handed over; format
//! selection and retries are left to `yt-dlp` itself.

use std::path::Path;

use tokio::process::Command;
use tracing::info;

use crate::error::{RecoveryError, Result};
use crate::url::rewrite;

/// Runs `yt-dlp` for one candidate URL at a time
#[derive(Debug, Clone)]
pub struct MediaDownloader {
    bin: String,
}

impl MediaDownloader {
    /// Create a downloader invoking the given executable
    pub fn new(bin: impl Into<String>) -> Self {
        Self { bin: bin.into() }
    }

    /// Builds the `yt-dlp` arguments for one candidate
    ///
    /// The output template is `%(title)s.%(ext)s`, or `%(title)s_<n>.%(ext)s`
    /// when a counter is given.
    ///
    /// # Example
    /// ```
    /// use std::path::Path;
    /// use wayback_recovery_core::download::MediaDownloader;
    /// let args = MediaDownloader::build_args(
    ///     "https://web.archive.org/web/2020/http://original.org/a.mp4",
    ///     Path::new("out"),
    ///     Some(2),
    /// );
    /// assert_eq!(args[2], "http://original.org/a.mp4");
    /// ```
    pub fn build_args(url: &str, out_dir: &Path, counter: Option<usize>) -> Vec<String> {
        let template = match counter {
            Some(n) => format!("%(title)s_{}.%(ext)s", n),
            None => "%(title)s.%(ext)s".to_string(),
        };

        vec![
            "-o".to_string(),
            out_dir.join(template).to_string_lossy().into_owned(),
            rewrite(url),
            "--no-overwrites".to_string(),
        ]
    }

    /// Downloads one candidate into `out_dir`
    ///
    /// # Errors
    /// - `Io` if the executable cannot be spawned
    /// - `DownloadFailed` if it exits unsuccessfully
    pub async fn download(&self, url: &str, out_dir: &Path, counter: Option<usize>) -> Result<()> {
        let args = Self::build_args(url, out_dir, counter);
        info!(bin = %self.bin, target = %args[2], "Running download");

        let status = Command::new(&self.bin).args(&args).status().await?;

        if status.success() {
            Ok(())
        } else {
            Err(RecoveryError::DownloadFailed {
                url: url.to_string(),
                code: status.code(),
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_args_single_candidate() {
        let args = MediaDownloader::build_args(
            "https://archive.org/details/harbour",
            Path::new("out/Harbour film"),
            None,
        );
        assert_eq!(
            args,
            vec![
                "-o",
                Path::new("out/Harbour film").join("%(title)s.%(ext)s").to_str().unwrap(),
                "https://archive.org/details/harbour",
                "--no-overwrites",
            ]
        );
    }

    #[test]
    fn test_build_args_with_counter_and_rewrite() {
        let args = MediaDownloader::build_args(
            "https://web.archive.org/web/20200101000000/http://original.org/uploads/a.mp4",
            Path::new("out"),
            Some(3),
        );
        assert!(args[1].ends_with("%(title)s_3.%(ext)s"));
        assert_eq!(args[2], "http://original.org/uploads/a.mp4");
    }

    #[tokio::test]
    async fn test_download_missing_binary_is_io_error() {
        let downloader = MediaDownloader::new("definitely-not-a-real-yt-dlp-binary");
        let result = downloader
            .download("https://archive.org/details/x", Path::new("."), None)
            .await;
        assert!(matches!(result, Err(RecoveryError::Io(_))));
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_download_exit_status() {
        let ok = MediaDownloader::new("true");
        assert!(ok.download("https://archive.org/details/x", Path::new("."), None).await.is_ok());

        let failing = MediaDownloader::new("false");
        let result = failing
            .download("https://archive.org/details/x", Path::new("."), Some(1))
            .await;
        assert!(matches!(
            result,
            Err(RecoveryError::DownloadFailed { code: Some(1), .. })
        ));
    }
}
