//! List Controllers
//!
//! Each list view owns one note collection, replaced wholesale on every
//! fetch. The controller holds the state machine; the view mirrors it.

use std::cell::RefCell;
use std::rc::Rc;

use crate::error::GatewayResult;
use crate::gateway::NotesGateway;
use crate::model::{sort_most_recent_first, Note};
use crate::notify::Notifier;
use crate::refresh::Subscription;

/// What a list does with a failed read
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReadErrorPolicy {
    /// Surface through a blocking alert
    Alert,
    /// Log only
    Log,
}

/// Which collection a list shows
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ListKind {
    Active,
    Archived,
}

impl ListKind {
    pub fn heading(self) -> &'static str {
        match self {
            ListKind::Active => "Notes",
            ListKind::Archived => "Archived Notes",
        }
    }

    pub fn empty_message(self) -> &'static str {
        match self {
            ListKind::Active => "No notes yet",
            ListKind::Archived => "No archived notes",
        }
    }

    /// Active reads alert, archived reads are only logged. Kept for parity
    /// with the existing behaviour.
    pub fn read_error_policy(self) -> ReadErrorPolicy {
        match self {
            ListKind::Active => ReadErrorPolicy::Alert,
            ListKind::Archived => ReadErrorPolicy::Log,
        }
    }

    /// Name registered on the refresh bus
    pub fn subscriber_name(self) -> &'static str {
        match self {
            ListKind::Active => "active-notes",
            ListKind::Archived => "archived-notes",
        }
    }
}

/// `Uninitialized -> Loading -> Populated | Empty`
#[derive(Debug, Clone, PartialEq, Default)]
pub enum ListState {
    #[default]
    Uninitialized,
    Loading,
    Populated(Vec<Note>),
    Empty,
}

impl ListState {
    fn from_notes(notes: Vec<Note>) -> Self {
        if notes.is_empty() {
            ListState::Empty
        } else {
            ListState::Populated(notes)
        }
    }

    pub fn notes(&self) -> &[Note] {
        match self {
            ListState::Populated(notes) => notes,
            _ => &[],
        }
    }

    pub fn is_loading(&self) -> bool {
        matches!(self, ListState::Loading)
    }
}

type Observer = Box<dyn Fn(&ListState)>;

pub struct ListController<G: ?Sized> {
    kind: ListKind,
    gateway: Rc<G>,
    notifier: Rc<dyn Notifier>,
    state: RefCell<ListState>,
    observer: RefCell<Option<Observer>>,
}

impl<G: NotesGateway + ?Sized> ListController<G> {
    pub fn new(kind: ListKind, gateway: Rc<G>, notifier: Rc<dyn Notifier>) -> Self {
        Self {
            kind,
            gateway,
            notifier,
            state: RefCell::new(ListState::Uninitialized),
            observer: RefCell::new(None),
        }
    }

    pub fn kind(&self) -> ListKind {
        self.kind
    }

    pub fn state(&self) -> ListState {
        self.state.borrow().clone()
    }

    /// Called with every state transition
    pub fn on_change(&self, observer: impl Fn(&ListState) + 'static) {
        *self.observer.borrow_mut() = Some(Box::new(observer));
    }

    fn set_state(&self, state: ListState) {
        *self.state.borrow_mut() = state;
        if let Some(observer) = self.observer.borrow().as_ref() {
            observer(&*self.state.borrow());
        }
    }

    async fn fetch(&self) -> GatewayResult<Vec<Note>> {
        match self.kind {
            ListKind::Active => self.gateway.list_active().await,
            ListKind::Archived => self.gateway.list_archived().await,
        }
    }

    /// One fetch-and-render cycle. Returns the number of notes shown.
    ///
    /// A failed read keeps the previous collection (or lands in `Empty`).
    pub async fn refresh(&self) -> GatewayResult<usize> {
        let previous = self.state();
        self.set_state(ListState::Loading);

        match self.fetch().await {
            Ok(mut notes) => {
                sort_most_recent_first(&mut notes);
                let count = notes.len();
                log::info!("[{}] Loaded {} notes", self.kind.subscriber_name(), count);
                self.set_state(ListState::from_notes(notes));
                Ok(count)
            }
            Err(e) => {
                match self.kind.read_error_policy() {
                    ReadErrorPolicy::Alert => self.notifier.alert(&e.to_string()),
                    ReadErrorPolicy::Log => log::error!("[{}] {}", self.kind.subscriber_name(), e),
                }
                let fallback = match previous {
                    ListState::Populated(notes) => ListState::Populated(notes),
                    _ => ListState::Empty,
                };
                self.set_state(fallback);
                Err(e)
            }
        }
    }

    /// Re-fetch on every refresh request, acknowledging after each render.
    /// Ends when the bus goes away.
    pub async fn run(&self, mut subscription: Subscription) {
        while let Some(request) = subscription.next().await {
            log::debug!(
                "[{}] refresh round {} from {:?}",
                subscription.name(),
                request.round(),
                request.origin().map(|c| c.as_str())
            );
            // Failures were already surfaced by the error policy
            let _ = self.refresh().await;
            request.acknowledge();
        }
    }

    /// Initial load, then follow the bus
    pub async fn attach(&self, subscription: Subscription) {
        let _ = self.refresh().await;
        self.run(subscription).await;
    }
}
