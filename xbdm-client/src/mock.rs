//! Scripted XBDM peer for tests

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tokio::net::TcpListener;
use tokio::task::JoinHandle;
use xbdm_core::Endpoint;

type Reply = dyn Fn(&str) -> Option<String> + Send + Sync;

/// In-process console that answers each command line through `reply`
///
/// `reply` returns the raw text to write back (CRLFs included) or `None` to
/// stay silent.
pub(crate) struct MockConsole {
    pub endpoint: Endpoint,
    pub accepts: Arc<AtomicUsize>,
    pub disconnects: Arc<AtomicUsize>,
    pub commands: Arc<Mutex<Vec<String>>>,
    task: JoinHandle<()>,
}

impl MockConsole {
    pub async fn start<F>(banner: Option<&'static str>, reply: F) -> Self
    where
        F: Fn(&str) -> Option<String> + Send + Sync + 'static,
    {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let port = listener.local_addr().unwrap().port();
        let accepts = Arc::new(AtomicUsize::new(0));
        let disconnects = Arc::new(AtomicUsize::new(0));
        let commands = Arc::new(Mutex::new(Vec::new()));
        let reply: Arc<Reply> = Arc::new(reply);

        let task = {
            let accepts = accepts.clone();
            let disconnects = disconnects.clone();
            let commands = commands.clone();
            tokio::spawn(async move {
                loop {
                    let (mut stream, _) = listener.accept().await.unwrap();
                    accepts.fetch_add(1, Ordering::SeqCst);
                    let disconnects = disconnects.clone();
                    let commands = commands.clone();
                    let reply = reply.clone();
                    tokio::spawn(async move {
                        if let Some(banner) = banner {
                            stream.write_all(banner.as_bytes()).await.unwrap();
                        }
                        let (read_half, mut write_half) = stream.split();
                        let mut reader = BufReader::new(read_half);
                        let mut line = String::new();
                        loop {
                            line.clear();
                            match reader.read_line(&mut line).await {
                                Ok(0) | Err(_) => break,
                                Ok(_) => {}
                            }
                            let command = line.trim_end_matches(['\r', '\n']).to_string();
                            commands.lock().unwrap().push(line.clone());
                            if let Some(text) = reply(&command) {
                                if write_half.write_all(text.as_bytes()).await.is_err() {
                                    break;
                                }
                            }
                        }
                        disconnects.fetch_add(1, Ordering::SeqCst);
                    });
                }
            })
        };

        Self {
            endpoint: Endpoint::new("127.0.0.1", port),
            accepts,
            disconnects,
            commands,
            task,
        }
    }

    /// Console that answers every command with `200- OK`
    pub async fn ok() -> Self {
        Self::start(None, |_| Some("200- OK\r\n".to_string())).await
    }

    pub fn accepts(&self) -> usize {
        self.accepts.load(Ordering::SeqCst)
    }

    pub fn disconnects(&self) -> usize {
        self.disconnects.load(Ordering::SeqCst)
    }

    /// Raw command lines received so far, terminators included
    pub fn commands(&self) -> Vec<String> {
        self.commands.lock().unwrap().clone()
    }
}

impl Drop for MockConsole {
    fn drop(&mut self) {
        self.task.abort();
    }
}
