//! Loading media files from disk.

use std::io;
use std::path::Path;

use shieldai_core::media::MediaFile;

/// Read a media file from disk, guessing its MIME type from the extension.
pub async fn read_media_file(path: &Path) -> io::Result<MediaFile> {
    let file_name = path
        .file_name()
        .and_then(|name| name.to_str())
        .ok_or_else(|| {
            io::Error::new(
                io::ErrorKind::InvalidInput,
                format!("{} has no usable file name", path.display()),
            )
        })?
        .to_string();

    let bytes = tokio::fs::read(path).await?;
    tracing::debug!(file_name = %file_name, size = bytes.len(), "Loaded media file");

    Ok(MediaFile::from_bytes(file_name, bytes))
}
