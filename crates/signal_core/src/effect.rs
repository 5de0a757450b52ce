use crate::{RequestId, SignalId};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    FetchSignals { request_id: RequestId },
    Notify(Notice),
    PersistSaved { ids: Vec<SignalId> },
    DataQualityWarning { duplicate_ids: Vec<SignalId> },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeLevel {
    Success,
    Info,
    Error,
}

/// Toast-style message for the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub level: NoticeLevel,
    pub message: String,
}

impl Notice {
    pub fn new(level: NoticeLevel, message: impl Into<String>) -> Self {
        Self {
            level,
            message: message.into(),
        }
    }
}
