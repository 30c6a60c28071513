//! Test doubles: an in-memory notes service, a recording presenter and a
//! recording notifier, all writing to one shared journal so tests can
//! assert on cross-component ordering.

use std::cell::{Cell, RefCell};
use std::rc::Rc;
use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::config::ClientConfig;
use crate::error::{GatewayError, GatewayResult};
use crate::gateway::{NotesGateway, WriteReceipt};
use crate::intent::{ControlId, Trigger};
use crate::model::{NewNote, Note, NoteId};
use crate::notify::Notifier;
use crate::presenter::{ControlState, LoadingPresenter};
use crate::timer::{sleep, with_timeout};

pub(crate) type Journal = Rc<RefCell<Vec<String>>>;

pub(crate) fn journal() -> Journal {
    Rc::new(RefCell::new(Vec::new()))
}

/// In-memory stand-in for the remote service. Writes are idempotent the way
/// the real service is: archiving an archived note succeeds.
pub(crate) struct FakeGateway {
    notes: RefCell<Vec<Note>>,
    next_id: Cell<i64>,
    journal: Journal,
    pub fail_reads: Cell<bool>,
    pub fail_writes: Cell<bool>,
    pub hang_writes: Cell<bool>,
    /// Latency of every read, still subject to the request bound
    pub read_delay: Cell<Duration>,
    timeout: Duration,
}

impl FakeGateway {
    pub fn new(journal: Journal) -> Self {
        Self {
            notes: RefCell::new(Vec::new()),
            next_id: Cell::new(1),
            journal,
            fail_reads: Cell::new(false),
            fail_writes: Cell::new(false),
            hang_writes: Cell::new(false),
            read_delay: Cell::new(Duration::ZERO),
            timeout: ClientConfig::default().request_timeout(),
        }
    }

    /// Insert directly, bypassing the journal; later seeds are newer
    pub fn seed(&self, title: &str, archived: bool) -> NoteId {
        let n = self.next_id.get();
        self.next_id.set(n + 1);
        let id = NoteId::Text(format!("notes-{}", n));
        self.notes.borrow_mut().push(Note {
            id: id.clone(),
            title: title.to_string(),
            body: format!("body of {}", title),
            created_at: created_at(n),
            archived,
        });
        id
    }

    fn record(&self, entry: &str) {
        self.journal.borrow_mut().push(format!("gateway:{}", entry));
    }

    async fn read(&self, operation: &'static str, archived: bool) -> GatewayResult<Vec<Note>> {
        self.record(operation);
        let delay = self.read_delay.get();
        if !delay.is_zero() {
            with_timeout(sleep(delay), self.timeout)
                .await
                .map_err(|_| GatewayError::Timeout {
                    operation,
                    after: self.timeout,
                })?;
        }
        if self.fail_reads.get() {
            return Err(GatewayError::failed(operation, "unexpected status 503 Service Unavailable"));
        }
        Ok(self.notes.borrow().iter().filter(|n| n.archived == archived).cloned().collect())
    }

    async fn write(&self, operation: &'static str, apply: impl FnOnce(&mut Vec<Note>) -> bool) -> GatewayResult<WriteReceipt> {
        self.record(operation);
        if self.hang_writes.get() {
            with_timeout(futures::future::pending::<()>(), self.timeout)
                .await
                .map_err(|_| GatewayError::Timeout {
                    operation,
                    after: self.timeout,
                })?;
        }
        if self.fail_writes.get() {
            return Err(GatewayError::failed(operation, "unexpected status 500 Internal Server Error"));
        }
        if apply(&mut self.notes.borrow_mut()) {
            Ok(WriteReceipt { status: 200 })
        } else {
            Err(GatewayError::failed(operation, "unexpected status 404 Not Found"))
        }
    }

    async fn set_archived(&self, operation: &'static str, id: &NoteId, archived: bool) -> GatewayResult<WriteReceipt> {
        self.write(operation, |notes| {
            notes
                .iter_mut()
                .find(|n| &n.id == id)
                .map(|n| n.archived = archived)
                .is_some()
        })
        .await
    }
}

fn created_at(n: i64) -> DateTime<Utc> {
    let base: DateTime<Utc> = "2024-05-01T08:00:00Z".parse().expect("valid timestamp");
    base + chrono::Duration::minutes(n)
}

#[async_trait(?Send)]
impl NotesGateway for FakeGateway {
    async fn list_active(&self) -> GatewayResult<Vec<Note>> {
        self.read("list_active", false).await
    }

    async fn list_archived(&self) -> GatewayResult<Vec<Note>> {
        self.read("list_archived", true).await
    }

    async fn create(&self, note: &NewNote) -> GatewayResult<WriteReceipt> {
        let n = self.next_id.get();
        self.write("create", |notes| {
            notes.push(Note {
                id: NoteId::Text(format!("notes-{}", n)),
                title: note.title.clone(),
                body: note.body.clone(),
                created_at: created_at(n),
                archived: false,
            });
            true
        })
        .await
        .inspect(|_| self.next_id.set(n + 1))
    }

    async fn archive(&self, id: &NoteId) -> GatewayResult<WriteReceipt> {
        self.set_archived("archive", id, true).await
    }

    async fn unarchive(&self, id: &NoteId) -> GatewayResult<WriteReceipt> {
        self.set_archived("unarchive", id, false).await
    }

    async fn delete(&self, id: &NoteId) -> GatewayResult<WriteReceipt> {
        self.write("delete", |notes| {
            let before = notes.len();
            notes.retain(|n| &n.id != id);
            notes.len() != before
        })
        .await
    }
}

/// A button whose state the tests can inspect
#[derive(Clone)]
pub(crate) struct TestButton {
    id: ControlId,
    pub state: Rc<RefCell<ControlState>>,
}

impl TestButton {
    pub fn new(id: &str, label: &str) -> Self {
        Self {
            id: ControlId::new(id),
            state: Rc::new(RefCell::new(ControlState::idle(label))),
        }
    }

    pub fn state(&self) -> ControlState {
        self.state.borrow().clone()
    }
}

impl Trigger for TestButton {
    fn control_id(&self) -> ControlId {
        self.id.clone()
    }
}

pub(crate) struct RecordingPresenter {
    journal: Journal,
}

impl RecordingPresenter {
    pub fn new(journal: Journal) -> Self {
        Self { journal }
    }
}

impl LoadingPresenter for RecordingPresenter {
    type Control = TestButton;

    fn show_busy(&self, control: &TestButton) {
        *control.state.borrow_mut() = ControlState::Busy;
        self.journal.borrow_mut().push(format!("busy:{}", control.id));
    }

    fn restore_idle(&self, control: &TestButton, label: &str) {
        *control.state.borrow_mut() = ControlState::idle(label);
        self.journal.borrow_mut().push(format!("idle:{}:{}", control.id, label));
    }
}

pub(crate) struct RecordingNotifier {
    journal: Journal,
    pub alerts: RefCell<Vec<String>>,
}

impl RecordingNotifier {
    pub fn new(journal: Journal) -> Self {
        Self {
            journal,
            alerts: RefCell::new(Vec::new()),
        }
    }
}

impl Notifier for RecordingNotifier {
    fn alert(&self, message: &str) {
        self.alerts.borrow_mut().push(message.to_string());
        self.journal.borrow_mut().push(format!("alert:{}", message));
    }

    fn stale(&self, pending: &[String]) {
        self.journal.borrow_mut().push(format!("stale:{}", pending.join(",")));
    }

    fn fresh(&self) {
        self.journal.borrow_mut().push("fresh".to_string());
    }
}
