//! Coordinator
//!
//! Turns one intent into the full cycle: busy indicator, gateway call,
//! refresh round across the list views, idle indicator. It is the single
//! place where write failures reach the user.

use std::cell::RefCell;
use std::collections::HashSet;
use std::rc::Rc;

use crate::error::{GatewayError, GatewayResult};
use crate::gateway::NotesGateway;
use crate::intent::{ControlId, Intent, IntentPayload, OperationKind, Trigger};
use crate::notify::Notifier;
use crate::presenter::LoadingPresenter;
use crate::refresh::{RefreshBus, RefreshOutcome};

/// What happened to one dispatched intent
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DispatchReport {
    Completed {
        kind: OperationKind,
        result: Result<(), GatewayError>,
        refresh: RefreshOutcome,
    },
    /// The triggering control already had an operation in flight
    Rejected { kind: OperationKind, control: ControlId },
}

impl DispatchReport {
    pub fn succeeded(&self) -> bool {
        matches!(self, DispatchReport::Completed { result: Ok(()), .. })
    }
}

/// Marks a control busy for as long as it lives
struct BusyGuard<'a> {
    busy: &'a RefCell<HashSet<ControlId>>,
    control: ControlId,
}

impl<'a> BusyGuard<'a> {
    fn acquire(busy: &'a RefCell<HashSet<ControlId>>, control: ControlId) -> Option<Self> {
        if busy.borrow_mut().insert(control.clone()) {
            Some(Self { busy, control })
        } else {
            None
        }
    }
}

impl Drop for BusyGuard<'_> {
    fn drop(&mut self) {
        self.busy.borrow_mut().remove(&self.control);
    }
}

pub struct Coordinator<G: ?Sized, P> {
    gateway: Rc<G>,
    presenter: P,
    notifier: Rc<dyn Notifier>,
    bus: RefreshBus,
    busy: RefCell<HashSet<ControlId>>,
}

impl<G, P> Coordinator<G, P>
where
    G: NotesGateway + ?Sized,
    P: LoadingPresenter,
    P::Control: Trigger,
{
    pub fn new(gateway: Rc<G>, presenter: P, notifier: Rc<dyn Notifier>, bus: RefreshBus) -> Self {
        Self {
            gateway,
            presenter,
            notifier,
            bus,
            busy: RefCell::new(HashSet::new()),
        }
    }

    pub fn bus(&self) -> &RefreshBus {
        &self.bus
    }

    pub fn is_busy(&self, control: &ControlId) -> bool {
        self.busy.borrow().contains(control)
    }

    /// Run the full cycle for `intent`.
    ///
    /// Ordering within one cycle: busy, gateway call, refresh round, idle.
    /// The control returns to idle on every path, including failures and
    /// stale refresh rounds.
    pub async fn dispatch(&self, intent: Intent<P::Control>) -> DispatchReport {
        let Intent { kind, payload, trigger } = intent;
        let control = trigger.control_id();

        let Some(_guard) = BusyGuard::acquire(&self.busy, control.clone()) else {
            log::warn!("[Coordinator] {} ignored: {} is busy", kind, control);
            return DispatchReport::Rejected { kind, control };
        };

        self.presenter.show_busy(&trigger);
        log::debug!("[Coordinator] {} started from {}", kind, control);

        let result = self.perform(kind, &payload).await;
        match &result {
            Ok(()) => log::info!("[Coordinator] {} succeeded", kind),
            Err(e) => self.notifier.alert(&e.to_string()),
        }

        let refresh = self.bus.request_refresh(Some(control.clone())).await;
        match &refresh {
            RefreshOutcome::Stale { pending, .. } => self.notifier.stale(pending),
            RefreshOutcome::Complete { .. } => self.notifier.fresh(),
        }

        self.presenter.restore_idle(&trigger, kind.idle_label());
        log::debug!("[Coordinator] {} finished on {}", kind, control);

        DispatchReport::Completed { kind, result, refresh }
    }

    async fn perform(&self, kind: OperationKind, payload: &IntentPayload) -> GatewayResult<()> {
        let receipt = match (kind, payload) {
            (OperationKind::Create, IntentPayload::Create(note)) => self.gateway.create(note).await,
            (OperationKind::Delete, IntentPayload::Target(id)) => self.gateway.delete(id).await,
            (OperationKind::Archive, IntentPayload::Target(id)) => self.gateway.archive(id).await,
            (OperationKind::Unarchive, IntentPayload::Target(id)) => self.gateway.unarchive(id).await,
            _ => Err(GatewayError::failed(kind.as_str(), "intent payload does not match operation")),
        }?;
        log::debug!("[Coordinator] {} accepted with status {}", kind, receipt.status);
        Ok(())
    }
}
