//! Data models for the OpenDrive API.
//!
//! Request payloads serialize to the exact field names the service expects;
//! the session identifier is merged in by the session manager and is not part
//! of these structures. Response documents only declare the fields the client
//! reads.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use strum::{Display, EnumIter, EnumString};

/// Per-file visibility setting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, EnumIter)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum AccessLevel {
    Private = 0,
    Public = 1,
    Hidden = 2,
}

impl AccessLevel {
    /// Integer code sent as `file_ispublic`.
    pub fn code(&self) -> u8 {
        *self as u8
    }
}

impl Serialize for AccessLevel {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u8(self.code())
    }
}

/// A file or folder named either by its opaque ID or by a slash-delimited path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FileReference {
    Id(String),
    Path(String),
}

impl FileReference {
    /// Anything containing a `/` is a path, everything else an ID.
    pub fn parse(value: &str) -> FileReference {
        if value.contains('/') {
            FileReference::Path(value.to_string())
        } else {
            FileReference::Id(value.to_string())
        }
    }
}

impl fmt::Display for FileReference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FileReference::Id(id) => write!(f, "ID {}", id),
            FileReference::Path(path) => write!(f, "path {}", path),
        }
    }
}

fn bool_as_string<S: Serializer>(value: &bool, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(if *value { "true" } else { "false" })
}

/// Accepts identifiers the service sends either as strings or as numbers.
fn id_as_string<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<String>, D::Error> {
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawId {
        Text(String),
        Number(serde_json::Number),
    }

    Ok(match Option::<RawId>::deserialize(deserializer)? {
        Some(RawId::Text(text)) if !text.is_empty() => Some(text),
        Some(RawId::Number(number)) => Some(number.to_string()),
        _ => None,
    })
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.is_empty())
}

#[derive(Debug, Serialize)]
pub struct LoginRequest<'a> {
    pub username: &'a str,
    pub passwd: &'a str,
}

#[derive(Debug, Serialize)]
pub struct SessionRequest<'a> {
    pub session_id: &'a str,
}

#[derive(Debug, Serialize)]
pub struct FileIdRequest<'a> {
    pub file_id: &'a str,
}

#[derive(Debug, Serialize)]
pub struct RenameRequest<'a> {
    pub file_id: &'a str,
    pub new_file_name: &'a str,
}

#[derive(Debug, Serialize)]
pub struct SendByEmailRequest<'a> {
    pub file_id: &'a str,
    pub recipient_emails: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message_subject: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message_body: Option<&'a str>,
}

impl<'a> SendByEmailRequest<'a> {
    pub fn new(
        file_id: &'a str,
        recipient_emails: &'a str,
        subject: Option<&'a str>,
        body: Option<&'a str>,
    ) -> Self {
        Self {
            file_id,
            recipient_emails,
            message_subject: non_empty(subject),
            message_body: non_empty(body),
        }
    }
}

/// The service expects `move` and `overwrite_if_exists` as the strings
/// `"true"`/`"false"`, not JSON booleans.
#[derive(Debug, Serialize)]
pub struct MoveCopyRequest<'a> {
    pub src_file_id: &'a str,
    pub dst_folder_id: &'a str,
    #[serde(rename = "move", serialize_with = "bool_as_string")]
    pub move_file: bool,
    #[serde(serialize_with = "bool_as_string")]
    pub overwrite_if_exists: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub new_file_name: Option<&'a str>,
}

impl<'a> MoveCopyRequest<'a> {
    pub fn new(
        src_file_id: &'a str,
        dst_folder_id: &'a str,
        move_file: bool,
        overwrite_if_exists: bool,
        new_file_name: Option<&'a str>,
    ) -> Self {
        Self {
            src_file_id,
            dst_folder_id,
            move_file,
            overwrite_if_exists,
            new_file_name: non_empty(new_file_name),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct IdByPathRequest<'a> {
    pub path: &'a str,
}

#[derive(Debug, Serialize)]
pub struct SetAccessRequest<'a> {
    pub file_id: &'a str,
    pub file_ispublic: AccessLevel,
}

#[derive(Debug, Serialize)]
pub struct CreateFileRequest<'a> {
    pub folder_id: &'a str,
    pub file_name: &'a str,
    pub file_size: u64,
    pub file_hash: &'a str,
}

#[derive(Debug, Serialize)]
pub struct OpenUploadRequest<'a> {
    pub file_id: &'a str,
    pub file_size: u64,
    pub file_hash: &'a str,
}

#[derive(Debug, Serialize)]
pub struct CloseUploadRequest<'a> {
    pub file_id: &'a str,
    pub file_size: u64,
    pub temp_location: &'a str,
    pub file_time: u64,
    pub file_hash: &'a str,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct LoginResponse {
    #[serde(rename = "SessionID")]
    pub session_id: String,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct SessionExistsResponse {
    pub result: bool,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct FileIdResponse {
    #[serde(rename = "FileId", default, deserialize_with = "id_as_string")]
    pub file_id: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct OpenUploadResponse {
    #[serde(rename = "TempLocation")]
    pub temp_location: String,
}
