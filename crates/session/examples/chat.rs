//! Minimal terminal chat over a single conversation.
//!
//! ```text
//! MINNOW_BASE_URL=https://api.deepseek.com \
//! MINNOW_API_KEY=sk-... \
//! MINNOW_MODEL=deepseek-chat \
//! cargo run -p minnow-session --example chat
//! ```

use llm::{Client, Config, HttpProvider};
use minnow_session::{Notifier, SessionManager, Severity};
use std::{
    io::{BufRead, Write},
    sync::Arc,
};
use store::InMemoryStore;
use tokio_util::sync::CancellationToken;

struct StderrNotifier;

impl Notifier for StderrNotifier {
    fn notify(&self, message: &str, severity: Severity) {
        eprintln!("[{severity:?}] {message}");
    }
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt::init();

    let config = Config::new(
        std::env::var("MINNOW_BASE_URL").unwrap_or_default(),
        std::env::var("MINNOW_API_KEY").unwrap_or_default(),
        std::env::var("MINNOW_MODEL").unwrap_or_default(),
    );
    let store = Arc::new(InMemoryStore::new());
    let manager = SessionManager::new(
        HttpProvider::new(Client::new()),
        config,
        store.clone(),
        store,
    )
    .with_notifier(Arc::new(StderrNotifier));

    let stdin = std::io::stdin();
    print!("> ");
    std::io::stdout().flush().ok();
    for line in stdin.lock().lines() {
        let Ok(line) = line else { break };
        match manager
            .send_message("repl", &line, &CancellationToken::new())
            .await
        {
            Ok(reply) => println!("{}", reply.content),
            Err(e) => eprintln!("send failed: {e}"),
        }
        print!("> ");
        std::io::stdout().flush().ok();
    }
}
