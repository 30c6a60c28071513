//! Notes Sync
//!
//! Keeps independently rendered note views consistent with the remote notes
//! service after every write, without a central state store.
//!
//! Layers:
//! - model / config / error: data and settings
//! - gateway: the only code that performs network I/O
//! - refresh: typed fan-out/fan-in bus between the coordinator and the lists
//! - list / coordinator: the per-view state machine and the write cycle

mod config;
mod coordinator;
mod error;
mod gateway;
mod intent;
mod list;
mod model;
mod notify;
mod presenter;
mod refresh;
pub mod timer;
pub mod validation;

#[cfg(test)]
mod fake;

pub use config::{ClientConfig, StatusWindow};
pub use coordinator::{Coordinator, DispatchReport};
pub use error::{ConfigError, GatewayError, GatewayResult, ValidationError};
pub use gateway::{HttpGateway, NotesGateway, WriteReceipt};
pub use intent::{ControlId, Intent, IntentPayload, OperationKind, Trigger};
pub use list::{ListController, ListKind, ListState, ReadErrorPolicy};
pub use model::{sort_most_recent_first, NewNote, Note, NoteId, NotesEnvelope};
pub use notify::Notifier;
pub use presenter::{ControlState, LoadingPresenter, BUSY_LABEL, SPINNER_GLYPH};
pub use refresh::{RefreshBus, RefreshOutcome, RefreshRequest, Subscription};
