use std::sync::{mpsc, Arc};
use std::thread;
use std::time::Duration;

use feed_logging::{feed_debug, feed_info};

use crate::{RequestId, SignalSource, SourceEvent};

enum SourceCommand {
    Load { request_id: RequestId },
}

/// Runs loads off the UI thread. Results come back tagged with the request id
/// so the dashboard can drop superseded ones.
pub struct SourceHandle {
    cmd_tx: mpsc::Sender<SourceCommand>,
    event_rx: mpsc::Receiver<SourceEvent>,
}

impl SourceHandle {
    pub fn new(source: Arc<dyn SignalSource>) -> std::io::Result<Self> {
        let (cmd_tx, cmd_rx) = mpsc::channel();
        let (event_tx, event_rx) = mpsc::channel();
        let runtime = tokio::runtime::Builder::new_multi_thread()
            .worker_threads(1)
            .enable_all()
            .build()?;

        thread::spawn(move || {
            while let Ok(command) = cmd_rx.recv() {
                let source = source.clone();
                let event_tx = event_tx.clone();
                runtime.spawn(async move {
                    handle_command(source.as_ref(), command, event_tx).await;
                });
            }
            feed_debug!("Signal source command channel closed");
        });

        Ok(Self { cmd_tx, event_rx })
    }

    pub fn request(&self, request_id: RequestId) {
        feed_info!("Requesting signal load {}", request_id);
        let _ = self.cmd_tx.send(SourceCommand::Load { request_id });
    }

    pub fn try_recv(&self) -> Option<SourceEvent> {
        self.event_rx.try_recv().ok()
    }

    pub fn recv_timeout(&self, timeout: Duration) -> Option<SourceEvent> {
        self.event_rx.recv_timeout(timeout).ok()
    }
}

async fn handle_command(
    source: &dyn SignalSource,
    command: SourceCommand,
    event_tx: mpsc::Sender<SourceEvent>,
) {
    match command {
        SourceCommand::Load { request_id } => {
            let result = source.load().await;
            let _ = event_tx.send(SourceEvent::Loaded { request_id, result });
        }
    }
}
