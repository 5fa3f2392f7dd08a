#![allow(dead_code)]

use std::sync::Arc;

use axum::Router;
use parking_lot::Mutex;
use tokio::net::TcpListener;

use salon_client::config::{ClientConfig, Frontend};
use salon_client::identity::SessionStore;
use salon_client::pipeline::{expiry_channel, ApiClient, ExpiryReceiver, Navigator, NoticeLevel, Notifier};
use salon_client::storage::MemoryStore;

/// Serve `app` on an ephemeral port and return its origin.
pub async fn spawn_backend(app: Router) -> String {
    let listener = TcpListener::bind(("127.0.0.1", 0)).await.expect("bind 127.0.0.1:0");
    let addr = listener.local_addr().expect("local addr");
    tokio::spawn(async move {
        if let Err(e) = axum::serve(listener, app).await {
            eprintln!("mock backend error: {e:?}");
        }
    });
    format!("http://{}", addr)
}

/// An origin nothing is listening on.
pub async fn dead_origin() -> String {
    let listener = TcpListener::bind(("127.0.0.1", 0)).await.expect("bind 127.0.0.1:0");
    let addr = listener.local_addr().expect("local addr");
    drop(listener);
    format!("http://{}", addr)
}

#[derive(Default)]
pub struct RecordingNavigator(pub Mutex<Vec<String>>);

impl Navigator for RecordingNavigator {
    fn navigate(&self, path: &str) { self.0.lock().push(path.to_string()); }
}

#[derive(Default)]
pub struct RecordingNotifier(pub Mutex<Vec<(NoticeLevel, String)>>);

impl RecordingNotifier {
    pub fn messages(&self) -> Vec<(NoticeLevel, String)> { self.0.lock().clone() }
}

impl Notifier for RecordingNotifier {
    fn notify(&self, level: NoticeLevel, message: &str) { self.0.lock().push((level, message.to_string())); }
}

pub struct Harness {
    pub client: ApiClient,
    pub session: Arc<SessionStore>,
    pub storage: MemoryStore,
    pub notices: Arc<RecordingNotifier>,
    pub expiry: ExpiryReceiver,
}

pub fn harness(config: ClientConfig) -> Harness {
    let storage = MemoryStore::new();
    let session = Arc::new(SessionStore::for_config(Arc::new(storage.clone()), &config));
    let notices = Arc::new(RecordingNotifier::default());
    let (tx, expiry) = expiry_channel();
    let client = ApiClient::builder(config, session.clone())
        .expiry(tx)
        .notifier(notices.clone())
        .build()
        .expect("client builds");
    Harness { client, session, storage, notices, expiry }
}

pub fn preset(frontend: Frontend, origin: &str) -> ClientConfig {
    ClientConfig::preset(frontend).with_origin(origin)
}
