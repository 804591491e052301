//! File operations on an authenticated session.
//!
//! Every operation follows the same shape: liveness check, payload, POST,
//! then success value or a logged failure. Nothing here returns an error to
//! the caller; failures come back as `false` or `None`.

use serde::Serialize;
use serde_json::Value;
use tracing::{debug, error};

use crate::{
    error::ApiError,
    http_utils::Transport,
    model::{
        AccessLevel, FileIdRequest, FileIdResponse, FileReference, IdByPathRequest,
        MoveCopyRequest, RenameRequest, SendByEmailRequest, SetAccessRequest,
    },
    session::SessionManager,
};

pub const ENDPOINT_TRASH: &str = "file/trash.json";
pub const ENDPOINT_RESTORE: &str = "file/restore.json";
pub const ENDPOINT_SEND_BY_EMAIL: &str = "file/sendbyemail.json";
pub const ENDPOINT_RENAME: &str = "file/rename.json";
pub const ENDPOINT_MOVE_COPY: &str = "file/move_copy.json";
pub const ENDPOINT_ID_BY_PATH: &str = "file/idbypath.json";
pub const ENDPOINT_ACCESS: &str = "file/access.json";

pub struct FileOperations<'a, T: Transport> {
    session: &'a SessionManager<T>,
}

impl<'a, T: Transport> FileOperations<'a, T> {
    pub fn new(session: &'a SessionManager<T>) -> Self {
        Self { session }
    }

    pub fn session(&self) -> &'a SessionManager<T> {
        self.session
    }

    /// Run one authenticated call, logging any failure with the endpoint.
    pub(crate) fn call<P, F>(&self, endpoint: &str, build: F) -> Option<Value>
    where
        P: Serialize,
        F: FnOnce() -> P,
    {
        match self.session.authenticated_request(endpoint, build) {
            Ok(value) => {
                debug!("{} succeeded", endpoint);
                Some(value)
            }
            Err(ApiError::NotLoggedIn) => {
                error!("Not logged in, skipping {}", endpoint);
                None
            }
            Err(e) => {
                error!("Error calling {}, {}", endpoint, e);
                None
            }
        }
    }

    /// Move a file to the trash
    pub fn trash(&self, file_id: &str) -> bool {
        self.call(ENDPOINT_TRASH, || FileIdRequest { file_id }).is_some()
    }

    /// Restore a file from the trash
    pub fn restore(&self, file_id: &str) -> bool {
        self.call(ENDPOINT_RESTORE, || FileIdRequest { file_id }).is_some()
    }

    /// Email a link to a file. Empty subject or body are left out of the request.
    pub fn send_by_email(
        &self,
        file_id: &str,
        recipient_emails: &str,
        subject: Option<&str>,
        body: Option<&str>,
    ) -> bool {
        self.call(ENDPOINT_SEND_BY_EMAIL, || {
            SendByEmailRequest::new(file_id, recipient_emails, subject, body)
        })
        .is_some()
    }

    pub fn rename(&self, file_id: &str, new_file_name: &str) -> bool {
        self.call(ENDPOINT_RENAME, || RenameRequest {
            file_id,
            new_file_name,
        })
        .is_some()
    }

    /// Move (`move_file = true`) or copy a file into another folder
    pub fn move_or_copy(
        &self,
        src_file_id: &str,
        dst_folder_id: &str,
        move_file: bool,
        overwrite_if_exists: bool,
        new_file_name: Option<&str>,
    ) -> bool {
        self.call(ENDPOINT_MOVE_COPY, || {
            MoveCopyRequest::new(
                src_file_id,
                dst_folder_id,
                move_file,
                overwrite_if_exists,
                new_file_name,
            )
        })
        .is_some()
    }

    /// Look up the ID of a file or folder by its path.
    ///
    /// Returns `None` when the call fails or the response carries no `FileId`.
    pub fn id_by_path(&self, path: &str) -> Option<String> {
        let value = self.call(ENDPOINT_ID_BY_PATH, || IdByPathRequest { path })?;
        match serde_json::from_value::<FileIdResponse>(value) {
            Ok(FileIdResponse {
                file_id: Some(file_id),
            }) => Some(file_id),
            Ok(_) => {
                error!("No FileId in response from {} for {}", ENDPOINT_ID_BY_PATH, path);
                None
            }
            Err(e) => {
                error!("Error decoding response from {}, {}", ENDPOINT_ID_BY_PATH, e);
                None
            }
        }
    }

    pub fn set_access(&self, file_id: &str, access: AccessLevel) -> bool {
        self.call(ENDPOINT_ACCESS, || SetAccessRequest {
            file_id,
            file_ispublic: access,
        })
        .is_some()
    }

    /// Turn a reference into an ID, resolving paths through [`Self::id_by_path`].
    pub fn resolve(&self, reference: &FileReference) -> Option<String> {
        match reference {
            FileReference::Id(id) => Some(id.clone()),
            FileReference::Path(path) => self.id_by_path(path),
        }
    }
}
