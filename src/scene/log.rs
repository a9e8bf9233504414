//! Shared record of export calls.

use std::sync::Arc;

use parking_lot::Mutex;
use serde::{Deserialize, Serialize};

use crate::core::TimeCode;
use crate::util::Tick;

/// One recorded export call.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ExportEvent {
    ObjectWrite {
        object: String,
        time: Tick,
        time_code: TimeCode,
        first_frame: bool,
    },
    TransformWrite {
        object: String,
        time: Tick,
    },
    PostExport {
        object: String,
    },
}

impl ExportEvent {
    /// Name of the object the event belongs to.
    pub fn object(&self) -> &str {
        match self {
            Self::ObjectWrite { object, .. }
            | Self::TransformWrite { object, .. }
            | Self::PostExport { object } => object,
        }
    }

    /// Time of the event; post-export has none.
    pub fn time(&self) -> Option<Tick> {
        match self {
            Self::ObjectWrite { time, .. } | Self::TransformWrite { time, .. } => Some(*time),
            Self::PostExport { .. } => None,
        }
    }
}

/// Cloneable, thread-safe event log.
#[derive(Clone, Debug, Default)]
pub struct ExportLog {
    events: Arc<Mutex<Vec<ExportEvent>>>,
}

impl ExportLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&self, event: ExportEvent) {
        self.events.lock().push(event);
    }

    /// Snapshot of all events in record order.
    pub fn events(&self) -> Vec<ExportEvent> {
        self.events.lock().clone()
    }

    /// Times at which `object` was written as an object.
    pub fn object_times(&self, object: &str) -> Vec<Tick> {
        self.events
            .lock()
            .iter()
            .filter_map(|e| match e {
                ExportEvent::ObjectWrite { object: o, time, .. } if o == object => Some(*time),
                _ => None,
            })
            .collect()
    }

    /// Times at which the transform of `object` was written.
    pub fn transform_times(&self, object: &str) -> Vec<Tick> {
        self.events
            .lock()
            .iter()
            .filter_map(|e| match e {
                ExportEvent::TransformWrite { object: o, time } if o == object => Some(*time),
                _ => None,
            })
            .collect()
    }

    /// Number of post-export calls for `object`.
    pub fn post_export_count(&self, object: &str) -> usize {
        self.events
            .lock()
            .iter()
            .filter(|e| matches!(e, ExportEvent::PostExport { object: o } if o == object))
            .count()
    }

    pub fn len(&self) -> usize {
        self.events.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.lock().is_empty()
    }

    pub fn clear(&self) {
        self.events.lock().clear();
    }
}
