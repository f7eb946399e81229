//! Task workspace file endpoints.

use std::path::Path;

use bytes::{Bytes, BytesMut};
use futures::StreamExt;
use serde_json::json;
use tracing::debug;

use super::BerayClient;
use crate::error::BerayResult;
use crate::models::{FileEntry, UploadResult};
use crate::traits::{ByteStream, Headers, Method, StreamingResponse};

/// Directory listed by [`BerayClient::list_files_tree`] when none is given.
pub const DEFAULT_TREE_PATH: &str = ".";

/// Content type sent for uploads whose extension is not recognised.
pub const DEFAULT_CONTENT_TYPE: &str = "application/octet-stream";

const CONTENT_TYPES: &[(&str, &str)] = &[
    ("txt", "text/plain"),
    ("md", "text/markdown"),
    ("html", "text/html"),
    ("htm", "text/html"),
    ("css", "text/css"),
    ("csv", "text/csv"),
    ("js", "text/javascript"),
    ("py", "text/x-python"),
    ("json", "application/json"),
    ("xml", "application/xml"),
    ("yaml", "application/yaml"),
    ("yml", "application/yaml"),
    ("pdf", "application/pdf"),
    ("zip", "application/zip"),
    ("gz", "application/gzip"),
    ("tar", "application/x-tar"),
    ("png", "image/png"),
    ("jpg", "image/jpeg"),
    ("jpeg", "image/jpeg"),
    ("gif", "image/gif"),
    ("svg", "image/svg+xml"),
    ("webp", "image/webp"),
];

/// Guess a MIME type from the extension of `path`.
pub fn guess_content_type(path: &str) -> &'static str {
    Path::new(path)
        .extension()
        .and_then(|ext| ext.to_str())
        .and_then(|ext| {
            CONTENT_TYPES
                .iter()
                .find(|(known, _)| known.eq_ignore_ascii_case(ext))
                .map(|(_, content_type)| *content_type)
        })
        .unwrap_or(DEFAULT_CONTENT_TYPE)
}

/// A file or archive body, read lazily from the open connection.
pub struct FileDownload {
    response: StreamingResponse,
}

impl std::fmt::Debug for FileDownload {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FileDownload")
            .field("status", &self.response.status)
            .field("content_type", &self.content_type())
            .finish_non_exhaustive()
    }
}

impl FileDownload {
    fn from_response(response: StreamingResponse) -> Self {
        Self { response }
    }

    pub fn status(&self) -> u16 {
        self.response.status
    }

    pub fn headers(&self) -> &Headers {
        &self.response.headers
    }

    /// `Content-Type` reported by the server.
    pub fn content_type(&self) -> Option<&str> {
        self.response.header("content-type")
    }

    /// `Content-Length` reported by the server.
    pub fn content_length(&self) -> Option<u64> {
        self.response
            .header("content-length")
            .and_then(|v| v.parse().ok())
    }

    /// The raw body stream, for writing large files without buffering them.
    pub fn into_stream(self) -> ByteStream {
        self.response.body
    }

    /// Read the whole body into memory.
    pub async fn bytes(self) -> BerayResult<Bytes> {
        let mut body = self.response.body;
        let mut buffer = BytesMut::new();
        while let Some(chunk) = body.next().await {
            buffer.extend_from_slice(&chunk?);
        }
        Ok(buffer.freeze())
    }
}

impl BerayClient {
    /// List entries under `path` in a task's working directory (default `"."`).
    pub async fn list_files_tree(
        &self,
        task_id: i64,
        path: Option<&str>,
    ) -> BerayResult<Vec<FileEntry>> {
        let request = self
            .request(Method::Get, &format!("/tasks/{}/files/tree", task_id))
            .with_query("path", path.unwrap_or(DEFAULT_TREE_PATH));
        self.execute_as(request).await
    }

    /// Open a file from a task's working directory.
    pub async fn get_file_content(&self, task_id: i64, path: &str) -> BerayResult<FileDownload> {
        let request = self
            .request(Method::Get, &format!("/tasks/{}/files/content", task_id))
            .with_query("path", path);
        let response = self.execute_streaming(request).await?;
        Ok(FileDownload::from_response(response))
    }

    /// Create or replace a file in a task's working directory.
    ///
    /// Without an explicit `content_type` one is guessed from the extension.
    pub async fn upload_file(
        &self,
        task_id: i64,
        path: &str,
        content: impl Into<Bytes>,
        content_type: Option<&str>,
    ) -> BerayResult<UploadResult> {
        let content_type = content_type.unwrap_or_else(|| guess_content_type(path));
        let content = content.into();
        debug!(
            "Uploading {} bytes to task {} as {} ({})",
            content.len(),
            task_id,
            path,
            content_type
        );

        let request = self
            .request(Method::Put, &format!("/tasks/{}/files/content", task_id))
            .with_query("path", path)
            .with_raw(content_type, content);
        self.execute_as(request).await
    }

    /// Download workspace entries as a ZIP archive. No paths means the whole workspace.
    pub async fn download_files_as_zip<I, S>(
        &self,
        task_id: i64,
        paths: I,
    ) -> BerayResult<FileDownload>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let paths: Vec<String> = paths.into_iter().map(Into::into).collect();
        let request = self
            .request(Method::Post, &format!("/tasks/{}/files/download", task_id))
            .with_json(json!({ "paths": paths }));
        let response = self.execute_streaming(request).await?;
        Ok(FileDownload::from_response(response))
    }
}
