use std::time::Duration;

use reqwest::blocking::Client;
use tracing::debug;

use crate::utils::downloader_def::errors::FetchError;
use crate::utils::downloader_def::r#trait::{RemoteStream, SourceProvider};

/// Plain HTTP(S) GET provider. No authentication, no request body.
#[derive(Debug)]
pub struct HttpSourceProvider {
    client: Client,
}

impl HttpSourceProvider {
    pub fn new(timeout: Option<Duration>) -> Result<Self, FetchError> {
        let mut builder =
            Client::builder().user_agent(concat!("provisioner/", env!("CARGO_PKG_VERSION")));
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }

        Ok(Self {
            client: builder.build()?,
        })
    }
}

impl SourceProvider for HttpSourceProvider {
    fn open_stream(&self, url: &str) -> Result<RemoteStream, FetchError> {
        debug!("GET {}", url);
        let resp = self.client.get(url).send()?;
        if !resp.status().is_success() {
            return Err(FetchError::Status {
                status: resp.status().as_u16(),
            });
        }

        let content_length = resp.content_length();
        Ok(RemoteStream::new(resp, content_length))
    }
}

#[cfg(test)]
mod tests {
    use std::io::Read as _;

    use super::*;
    use crate::utils::test_server::TestServer;

    #[test]
    fn streams_body_of_successful_response() {
        let server = TestServer::start();
        server.serve("/plugin.jar", b"jar-bytes".to_vec());

        let provider = HttpSourceProvider::new(None).unwrap();
        let mut stream = provider.open_stream(&server.url("/plugin.jar")).unwrap();
        let mut body = Vec::new();
        stream.reader.read_to_end(&mut body).unwrap();

        assert_eq!(body, b"jar-bytes");
        assert_eq!(stream.content_length, Some(9));
        assert_eq!(server.hits("/plugin.jar"), 1);
    }

    #[test]
    fn non_success_status_is_an_error() {
        let server = TestServer::start();

        let provider = HttpSourceProvider::new(None).unwrap();
        let err = provider
            .open_stream(&server.url("/missing.jar"))
            .err()
            .unwrap();

        assert!(matches!(err, FetchError::Status { status: 404 }));
    }

    #[test]
    fn connection_refused_is_a_transport_error() {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let provider = HttpSourceProvider::new(Some(Duration::from_secs(5))).unwrap();
        let err = provider
            .open_stream(&format!("http://{addr}/a.jar"))
            .err()
            .unwrap();

        assert!(matches!(err, FetchError::Transport(_)));
    }
}
