//! Archive extraction for downloaded runtimes.

use crate::bundler::{
    error::{Error, ErrorExt, Result},
    settings::ArchiveKind,
};
use std::{io::Cursor, path::Path};

/// Extracts an in-memory archive into `dest`, creating it if needed.
///
/// Runs on the blocking pool; both formats are read synchronously.
pub async fn extract(data: Vec<u8>, kind: ArchiveKind, dest: &Path) -> Result<()> {
    let dest = dest.to_path_buf();

    tokio::task::spawn_blocking(move || -> Result<()> {
        std::fs::create_dir_all(&dest).fs_context("creating extraction directory", &dest)?;

        match kind {
            ArchiveKind::Zip => {
                let mut archive = zip::ZipArchive::new(Cursor::new(data))?;
                archive.extract(&dest)?;
            }
            ArchiveKind::TarGz => {
                let decoder = flate2::read::GzDecoder::new(Cursor::new(data));
                tar::Archive::new(decoder)
                    .unpack(&dest)
                    .fs_context("unpacking tar.gz archive into", &dest)?;
            }
        }

        Ok(())
    })
    .await
    .map_err(|e| Error::GenericError(format!("Archive extraction task panicked: {e}")))?
}
