use std::io::Read;

use crate::utils::downloader_def::errors::FetchError;

/// An open connection to a remote artifact.
pub struct RemoteStream {
    pub reader: Box<dyn Read + Send>,
    pub content_length: Option<u64>,
}

impl RemoteStream {
    pub fn new(reader: impl Read + Send + 'static, content_length: Option<u64>) -> Self {
        Self {
            reader: Box::new(reader),
            content_length,
        }
    }
}

pub trait SourceProvider {
    /// Opens a streaming read of `url`. Non-success responses are errors.
    fn open_stream(&self, url: &str) -> Result<RemoteStream, FetchError>;
}
