//! Local HTTP server for tests, run on its own tokio runtime so blocking
//! clients can call it from plain `#[test]` functions.

use std::{
    collections::HashMap,
    net::SocketAddr,
    sync::{Arc, Mutex, mpsc},
};

use axum::{
    Router,
    body::Body,
    extract::State,
    http::{StatusCode, Uri, header},
    response::{IntoResponse, Response},
};

#[derive(Clone)]
enum Reply {
    Bytes(Vec<u8>),
    Status(u16),
    BreakAfter(Vec<u8>),
}

#[derive(Default)]
struct ServerState {
    routes: Mutex<HashMap<String, Reply>>,
    requests: Mutex<Vec<String>>,
}

pub struct TestServer {
    addr: SocketAddr,
    state: Arc<ServerState>,
}

impl TestServer {
    pub fn start() -> Self {
        let state = Arc::new(ServerState::default());
        let shared = state.clone();
        let (tx, rx) = mpsc::channel();

        std::thread::spawn(move || {
            let runtime = tokio::runtime::Builder::new_multi_thread()
                .worker_threads(1)
                .enable_all()
                .build()
                .unwrap();
            runtime.block_on(async move {
                let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
                tx.send(listener.local_addr().unwrap()).unwrap();
                let app = Router::new().fallback(handle).with_state(shared);
                axum::serve(listener, app).await.unwrap();
            });
        });

        let addr = rx.recv().unwrap();
        Self { addr, state }
    }

    pub fn url(&self, path: &str) -> String {
        format!("http://{}{}", self.addr, path)
    }

    pub fn serve(&self, path: &str, body: Vec<u8>) {
        self.route(path, Reply::Bytes(body));
    }

    pub fn fail_with(&self, path: &str, status: u16) {
        self.route(path, Reply::Status(status));
    }

    /// Sends `prefix` and then drops the connection before the declared length.
    pub fn break_after(&self, path: &str, prefix: Vec<u8>) {
        self.route(path, Reply::BreakAfter(prefix));
    }

    pub fn hits(&self, path: &str) -> usize {
        self.requests().iter().filter(|p| *p == path).count()
    }

    pub fn requests(&self) -> Vec<String> {
        self.state.requests.lock().unwrap().clone()
    }

    fn route(&self, path: &str, reply: Reply) {
        self.state
            .routes
            .lock()
            .unwrap()
            .insert(path.to_string(), reply);
    }
}

async fn handle(State(state): State<Arc<ServerState>>, uri: Uri) -> Response {
    let path = uri.path().to_string();
    state.requests.lock().unwrap().push(path.clone());
    let reply = state.routes.lock().unwrap().get(&path).cloned();

    match reply {
        Some(Reply::Bytes(body)) => body.into_response(),
        Some(Reply::Status(code)) => StatusCode::from_u16(code).unwrap().into_response(),
        Some(Reply::BreakAfter(prefix)) => {
            let chunks: Vec<Result<Vec<u8>, std::io::Error>> = vec![
                Ok(prefix),
                Err(std::io::Error::other("connection dropped")),
            ];
            Response::builder()
                .header(header::CONTENT_LENGTH, "1048576")
                .body(Body::from_stream(futures_util::stream::iter(chunks)))
                .unwrap()
        }
        None => StatusCode::NOT_FOUND.into_response(),
    }
}
