//! Upload of a local file into a remote folder.
//!
//! The transfer runs in four steps: create the file entry, open an upload
//! slot, send the content in chunks as multipart requests, and close the
//! upload with the checksum so the service can verify what it received.

use indicatif::{ProgressBar, ProgressStyle};
use md5::{Digest, Md5};
use std::{
    fs::File,
    io::{self, Read},
    path::Path,
    time::UNIX_EPOCH,
};
use tracing::{debug, error, info};

use crate::{
    error::{ApiError, UploadError},
    file_ops::FileOperations,
    http_utils::{ChunkUpload, Transport},
    model::{
        CloseUploadRequest, CreateFileRequest, FileIdResponse, FileReference, OpenUploadRequest,
        OpenUploadResponse,
    },
};

pub const ENDPOINT_CREATE_FILE: &str = "file/create.json";
pub const ENDPOINT_OPEN_UPLOAD: &str = "upload/open_file_upload.json";
pub const ENDPOINT_UPLOAD_CHUNK: &str = "upload/upload_file_chunk.json";
pub const ENDPOINT_CLOSE_UPLOAD: &str = "upload/close_file_upload.json";

/// Read size used while hashing
pub const CHECKSUM_BUFFER_SIZE: usize = 4096;
pub const DEFAULT_CHUNK_SIZE: usize = 1024 * 1024;

/// MD5 of the whole file as lowercase hex, read in fixed-size blocks.
pub fn file_checksum(path: &Path) -> io::Result<String> {
    let mut file = File::open(path)?;
    let mut hasher = Md5::new();
    let mut buffer = [0u8; CHECKSUM_BUFFER_SIZE];
    loop {
        let read = file.read(&mut buffer)?;
        if read == 0 {
            break;
        }
        hasher.update(&buffer[..read]);
    }
    Ok(format!("{:x}", hasher.finalize()))
}

#[derive(Debug, Clone)]
pub struct UploadOptions {
    pub chunk_size: usize,
    pub show_progress: bool,
}

impl Default for UploadOptions {
    fn default() -> Self {
        Self {
            chunk_size: DEFAULT_CHUNK_SIZE,
            show_progress: true,
        }
    }
}

fn progress_bar(total: u64, visible: bool) -> ProgressBar {
    if !visible {
        return ProgressBar::hidden();
    }
    let pb = ProgressBar::new(total);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {bytes}/{total_bytes} ({eta})")
            .unwrap_or_else(|_| ProgressStyle::default_bar())
            .progress_chars("#>-"),
    );
    pb
}

impl<'a, T: Transport> FileOperations<'a, T> {
    /// Upload `local_file` into `remote_dir`, logging any failure.
    pub fn put(
        &self,
        local_file: &Path,
        remote_dir: &FileReference,
        options: &UploadOptions,
    ) -> bool {
        info!("Uploading {} to {}", local_file.display(), remote_dir);
        match self.upload_file(local_file, remote_dir, options) {
            Ok(file_id) => {
                info!("Uploaded {} as file {}", local_file.display(), file_id);
                true
            }
            Err(e) => {
                error!("Error uploading {}, {}", local_file.display(), e);
                false
            }
        }
    }

    /// Upload a file and return the ID the service assigned to it.
    pub fn upload_file(
        &self,
        local_file: &Path,
        remote_dir: &FileReference,
        options: &UploadOptions,
    ) -> Result<String, UploadError> {
        let metadata = std::fs::metadata(local_file)?;
        if !metadata.is_file() {
            return Err(UploadError::NotAFile(local_file.display().to_string()));
        }
        let file_name = local_file
            .file_name()
            .and_then(|n| n.to_str())
            .ok_or_else(|| UploadError::NotAFile(local_file.display().to_string()))?;

        let folder_id = self
            .resolve(remote_dir)
            .ok_or_else(|| UploadError::UnresolvedDirectory(remote_dir.to_string()))?;

        let file_size = metadata.len();
        let file_hash = file_checksum(local_file)?;
        let file_time = metadata
            .modified()
            .ok()
            .and_then(|t| t.duration_since(UNIX_EPOCH).ok())
            .map(|d| d.as_secs())
            .unwrap_or_default();
        debug!("{} is {} bytes with checksum {}", file_name, file_size, file_hash);

        let session = self.session();
        let created = session.authenticated_request(ENDPOINT_CREATE_FILE, || CreateFileRequest {
            folder_id: &folder_id,
            file_name,
            file_size,
            file_hash: &file_hash,
        })?;
        let file_id = serde_json::from_value::<FileIdResponse>(created)
            .map_err(ApiError::from)?
            .file_id
            .ok_or_else(|| ApiError::MissingField {
                endpoint: ENDPOINT_CREATE_FILE.to_string(),
                field: "FileId".to_string(),
            })?;

        let opened = session.authenticated_request(ENDPOINT_OPEN_UPLOAD, || OpenUploadRequest {
            file_id: &file_id,
            file_size,
            file_hash: &file_hash,
        })?;
        let temp_location = serde_json::from_value::<OpenUploadResponse>(opened)
            .map_err(ApiError::from)?
            .temp_location;

        self.send_chunks(local_file, file_name, &file_id, &temp_location, file_size, options)?;

        session.authenticated_request(ENDPOINT_CLOSE_UPLOAD, || CloseUploadRequest {
            file_id: &file_id,
            file_size,
            temp_location: &temp_location,
            file_time,
            file_hash: &file_hash,
        })?;

        Ok(file_id)
    }

    fn send_chunks(
        &self,
        local_file: &Path,
        file_name: &str,
        file_id: &str,
        temp_location: &str,
        file_size: u64,
        options: &UploadOptions,
    ) -> Result<(), UploadError> {
        let mut file = File::open(local_file)?;
        let chunk_size = options.chunk_size.max(1);
        let mut offset: u64 = 0;
        let pb = progress_bar(file_size, options.show_progress);

        loop {
            let mut data = Vec::with_capacity(chunk_size);
            (&mut file).take(chunk_size as u64).read_to_end(&mut data)?;
            if data.is_empty() {
                break;
            }
            let read = data.len();
            debug!("Sending chunk at offset {} ({} bytes)", offset, read);
            let chunk = ChunkUpload {
                fields: vec![
                    ("file_id".to_string(), file_id.to_string()),
                    ("temp_location".to_string(), temp_location.to_string()),
                    ("chunk_offset".to_string(), offset.to_string()),
                    ("chunk_size".to_string(), read.to_string()),
                ],
                file_name: file_name.to_string(),
                data,
            };
            if let Err(e) = self.session().upload_chunk(ENDPOINT_UPLOAD_CHUNK, chunk) {
                pb.abandon();
                return Err(e.into());
            }
            offset += read as u64;
            pb.set_position(offset);
        }

        pb.finish_and_clear();
        Ok(())
    }
}
