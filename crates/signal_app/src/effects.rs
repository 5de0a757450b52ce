use std::sync::Arc;
use std::time::Duration;

use feed_logging::{feed_error, feed_info, feed_warn};
use signal_core::{update, DashboardState, Effect, Msg, Notice};
use signal_source::{SavedSignalStore, SignalSource, SourceEvent, SourceHandle};

/// Executes effects produced by `update` and turns source events back into messages.
pub struct EffectRunner {
    source: SourceHandle,
    saved: Arc<dyn SavedSignalStore>,
    notices: Vec<Notice>,
}

impl EffectRunner {
    pub fn new(
        source: Arc<dyn SignalSource>,
        saved: Arc<dyn SavedSignalStore>,
    ) -> std::io::Result<Self> {
        Ok(Self {
            source: SourceHandle::new(source)?,
            saved,
            notices: Vec::new(),
        })
    }

    /// Applies a message and runs whatever it asks for.
    pub fn dispatch(&mut self, state: DashboardState, msg: Msg) -> DashboardState {
        let (state, effects) = update(state, msg);
        self.run(effects);
        state
    }

    pub fn run(&mut self, effects: Vec<Effect>) {
        for effect in effects {
            match effect {
                Effect::FetchSignals { request_id } => self.source.request(request_id),
                Effect::Notify(notice) => {
                    feed_info!("Notice {:?}: {}", notice.level, notice.message);
                    self.notices.push(notice);
                }
                Effect::PersistSaved { ids } => {
                    if let Err(err) = self.saved.save(&ids) {
                        feed_error!("Failed to persist {} saved signal(s): {}", ids.len(), err);
                    }
                }
                Effect::DataQualityWarning { duplicate_ids } => {
                    feed_warn!(
                        "Signal collection contains duplicated ids {:?}; lookups use the last record",
                        duplicate_ids
                    );
                }
            }
        }
    }

    /// Restores saved ids through the persistence hook.
    pub fn restore_saved(&mut self, state: DashboardState) -> DashboardState {
        match self.saved.load() {
            Ok(ids) if ids.is_empty() => state,
            Ok(ids) => self.dispatch(state, Msg::SavedRestored(ids)),
            Err(err) => {
                feed_warn!("Ignoring unreadable saved signals: {}", err);
                state
            }
        }
    }

    /// Waits for source results until the latest request has settled.
    pub fn await_load(&mut self, mut state: DashboardState, timeout: Duration) -> DashboardState {
        while state.is_loading() {
            let Some(event) = self.source.recv_timeout(timeout) else {
                feed_warn!("Timed out after {:?} waiting for signals", timeout);
                break;
            };
            state = self.dispatch(state, source_msg(event));
        }
        state
    }

    pub fn take_notices(&mut self) -> Vec<Notice> {
        std::mem::take(&mut self.notices)
    }
}

fn source_msg(event: SourceEvent) -> Msg {
    match event {
        SourceEvent::Loaded {
            request_id,
            result: Ok(records),
        } => Msg::SignalsLoaded {
            request_id,
            records,
        },
        SourceEvent::Loaded {
            request_id,
            result: Err(err),
        } => Msg::SignalsLoadFailed {
            request_id,
            message: err.to_string(),
        },
    }
}
