//! Refresh Bus
//!
//! Typed in-process publish/subscribe between the coordinator and the list
//! views. A refresh round fans a request out to every live subscriber and
//! fans the acknowledgements back in, bounded by a timeout so a detached or
//! slow subscriber cannot stall the caller.

use std::cell::RefCell;
use std::rc::{Rc, Weak};
use std::time::Duration;

use futures::channel::{mpsc, oneshot};
use futures::stream::{FuturesUnordered, StreamExt};

use crate::intent::ControlId;
use crate::timer::with_timeout;

struct SubscriberSlot {
    id: u64,
    name: String,
    sender: mpsc::UnboundedSender<RefreshRequest>,
}

#[derive(Default)]
struct BusInner {
    next_subscriber: u64,
    next_round: u64,
    subscribers: Vec<SubscriberSlot>,
}

/// Shared handle; clones refer to the same bus
#[derive(Clone)]
pub struct RefreshBus {
    inner: Rc<RefCell<BusInner>>,
    ack_timeout: Duration,
}

/// Result of one refresh round
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RefreshOutcome {
    /// Every subscriber acknowledged or went away
    Complete { acknowledged: usize },
    /// The acknowledgement bound expired; `pending` names who never answered
    Stale { acknowledged: usize, pending: Vec<String> },
}

impl RefreshOutcome {
    pub fn is_stale(&self) -> bool {
        matches!(self, RefreshOutcome::Stale { .. })
    }

    pub fn acknowledged(&self) -> usize {
        match self {
            RefreshOutcome::Complete { acknowledged } | RefreshOutcome::Stale { acknowledged, .. } => *acknowledged,
        }
    }
}

/// One refresh request delivered to one subscriber.
///
/// Must be answered with [`RefreshRequest::acknowledge`] once the
/// subscriber has re-rendered. Dropping it unanswered releases the round
/// for this subscriber and is logged.
pub struct RefreshRequest {
    round: u64,
    subscriber: String,
    origin: Option<ControlId>,
    ack: Option<oneshot::Sender<()>>,
}

impl RefreshRequest {
    /// Control whose operation triggered the round (informational)
    pub fn origin(&self) -> Option<&ControlId> {
        self.origin.as_ref()
    }

    pub fn round(&self) -> u64 {
        self.round
    }

    pub fn acknowledge(mut self) {
        if let Some(ack) = self.ack.take() {
            // The round may already have timed out
            let _ = ack.send(());
        }
    }

    fn disarm(mut self) {
        self.ack = None;
    }
}

impl Drop for RefreshRequest {
    fn drop(&mut self) {
        if self.ack.is_some() {
            log::warn!(
                "[RefreshBus] round {}: {} dropped its request without acknowledging",
                self.round,
                self.subscriber
            );
        }
    }
}

/// Registration on the bus. Dropping it unsubscribes.
pub struct Subscription {
    id: u64,
    name: String,
    receiver: mpsc::UnboundedReceiver<RefreshRequest>,
    bus: Weak<RefCell<BusInner>>,
}

impl Subscription {
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Next refresh request, or `None` once the bus is gone
    pub async fn next(&mut self) -> Option<RefreshRequest> {
        self.receiver.next().await
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        if let Some(bus) = self.bus.upgrade() {
            // While the bus is borrowed the slot stays; its sender is closed
            // from here on, so counting skips it and the next fan-out prunes it
            if let Ok(mut inner) = bus.try_borrow_mut() {
                inner.subscribers.retain(|slot| slot.id != self.id);
            }
        }
        log::debug!("[RefreshBus] {} unsubscribed", self.name);
    }
}

impl RefreshBus {
    pub fn new(ack_timeout: Duration) -> Self {
        Self {
            inner: Rc::new(RefCell::new(BusInner::default())),
            ack_timeout,
        }
    }

    pub fn ack_timeout(&self) -> Duration {
        self.ack_timeout
    }

    /// Register a named subscriber
    pub fn subscribe(&self, name: impl Into<String>) -> Subscription {
        let name = name.into();
        let (sender, receiver) = mpsc::unbounded();
        let mut inner = self.inner.borrow_mut();
        let id = inner.next_subscriber;
        inner.next_subscriber += 1;
        inner.subscribers.push(SubscriberSlot {
            id,
            name: name.clone(),
            sender,
        });
        log::debug!("[RefreshBus] {} subscribed ({} total)", name, inner.subscribers.len());
        Subscription {
            id,
            name,
            receiver,
            bus: Rc::downgrade(&self.inner),
        }
    }

    /// Live subscribers
    pub fn subscriber_count(&self) -> usize {
        self.inner
            .borrow()
            .subscribers
            .iter()
            .filter(|slot| !slot.sender.is_closed())
            .count()
    }

    /// Broadcast a refresh request and wait for every live subscriber to
    /// acknowledge, or for the acknowledgement bound to expire.
    pub async fn request_refresh(&self, origin: Option<ControlId>) -> RefreshOutcome {
        let (round, waits) = self.fan_out(origin);
        if waits.is_empty() {
            log::debug!("[RefreshBus] round {}: no subscribers", round);
            return RefreshOutcome::Complete { acknowledged: 0 };
        }

        let names: Vec<String> = waits.iter().map(|(name, _)| name.clone()).collect();
        let mut settled: Vec<Option<bool>> = vec![None; waits.len()];
        let mut answers: FuturesUnordered<_> = waits
            .into_iter()
            .enumerate()
            .map(|(index, (_, rx))| async move { (index, rx.await.is_ok()) })
            .collect();

        let drain = async {
            while let Some((index, acked)) = answers.next().await {
                settled[index] = Some(acked);
            }
        };
        let timed_out = with_timeout(drain, self.ack_timeout).await.is_err();

        let acknowledged = settled.iter().filter(|s| **s == Some(true)).count();
        let pending: Vec<String> = names
            .iter()
            .zip(&settled)
            .filter(|(_, s)| s.is_none())
            .map(|(name, _)| name.clone())
            .collect();

        if timed_out && !pending.is_empty() {
            log::warn!(
                "[RefreshBus] round {}: no acknowledgement from {:?} within {} ms",
                round,
                pending,
                self.ack_timeout.as_millis()
            );
            RefreshOutcome::Stale { acknowledged, pending }
        } else {
            log::info!("[RefreshBus] round {}: {}/{} acknowledged", round, acknowledged, names.len());
            RefreshOutcome::Complete { acknowledged }
        }
    }

    /// Deliver one request per live subscriber, dropping closed ones
    fn fan_out(&self, origin: Option<ControlId>) -> (u64, Vec<(String, oneshot::Receiver<()>)>) {
        let mut inner = self.inner.borrow_mut();
        let round = inner.next_round;
        inner.next_round += 1;

        let mut waits = Vec::new();
        inner.subscribers.retain(|slot| {
            let (ack, rx) = oneshot::channel();
            let request = RefreshRequest {
                round,
                subscriber: slot.name.clone(),
                origin: origin.clone(),
                ack: Some(ack),
            };
            match slot.sender.unbounded_send(request) {
                Ok(()) => {
                    waits.push((slot.name.clone(), rx));
                    true
                }
                Err(err) => {
                    err.into_inner().disarm();
                    log::debug!("[RefreshBus] dropping closed subscriber {}", slot.name);
                    false
                }
            }
        });
        log::debug!(
            "[RefreshBus] round {} requested by {:?}, {} subscribers",
            round,
            origin.as_ref().map(ControlId::as_str),
            waits.len()
        );
        (round, waits)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::task::{spawn_local, LocalSet};

    fn bus() -> RefreshBus {
        RefreshBus::new(Duration::from_millis(3000))
    }

    /// Acknowledge every request, counting them
    fn spawn_acker(mut sub: Subscription, seen: Rc<RefCell<usize>>) {
        spawn_local(async move {
            while let Some(request) = sub.next().await {
                *seen.borrow_mut() += 1;
                request.acknowledge();
            }
        });
    }

    #[tokio::test(start_paused = true)]
    async fn test_round_without_subscribers_completes() {
        let outcome = bus().request_refresh(None).await;
        assert_eq!(outcome, RefreshOutcome::Complete { acknowledged: 0 });
    }

    #[tokio::test(start_paused = true)]
    async fn test_waits_for_every_subscriber() {
        LocalSet::new()
            .run_until(async {
                let bus = bus();
                let active = Rc::new(RefCell::new(0));
                let archived = Rc::new(RefCell::new(0));
                spawn_acker(bus.subscribe("active"), active.clone());
                spawn_acker(bus.subscribe("archived"), archived.clone());

                let outcome = bus.request_refresh(Some(ControlId::new("make-note"))).await;

                assert_eq!(outcome, RefreshOutcome::Complete { acknowledged: 2 });
                assert_eq!(*active.borrow(), 1);
                assert_eq!(*archived.borrow(), 1);
            })
            .await;
    }

    #[tokio::test(start_paused = true)]
    async fn test_silent_subscriber_makes_round_stale() {
        LocalSet::new()
            .run_until(async {
                let bus = bus();
                let seen = Rc::new(RefCell::new(0));
                spawn_acker(bus.subscribe("active"), seen.clone());
                // Registered but never polled
                let _silent = bus.subscribe("archived");

                let outcome = bus.request_refresh(None).await;

                assert_eq!(
                    outcome,
                    RefreshOutcome::Stale {
                        acknowledged: 1,
                        pending: vec!["archived".to_string()],
                    }
                );
            })
            .await;
    }

    #[tokio::test(start_paused = true)]
    async fn test_dropped_subscription_is_not_awaited() {
        let bus = bus();
        let sub = bus.subscribe("archived");
        assert_eq!(bus.subscriber_count(), 1);
        drop(sub);
        assert_eq!(bus.subscriber_count(), 0);

        let outcome = bus.request_refresh(None).await;
        assert_eq!(outcome, RefreshOutcome::Complete { acknowledged: 0 });
    }

    #[tokio::test(start_paused = true)]
    async fn test_subscription_dropped_during_borrow_is_not_counted() {
        let bus = bus();
        let sub = bus.subscribe("archived");
        {
            let _held = bus.inner.borrow();
            drop(sub);
        }
        assert_eq!(bus.inner.borrow().subscribers.len(), 1);
        assert_eq!(bus.subscriber_count(), 0);

        let outcome = bus.request_refresh(None).await;
        assert_eq!(outcome, RefreshOutcome::Complete { acknowledged: 0 });
        assert!(bus.inner.borrow().subscribers.is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn test_abandoned_request_releases_round() {
        LocalSet::new()
            .run_until(async {
                let bus = bus();
                let mut sub = bus.subscribe("active");
                spawn_local(async move {
                    while let Some(request) = sub.next().await {
                        drop(request);
                    }
                });

                let outcome = bus.request_refresh(None).await;
                assert_eq!(outcome, RefreshOutcome::Complete { acknowledged: 0 });
            })
            .await;
    }

    #[tokio::test(start_paused = true)]
    async fn test_request_carries_origin() {
        LocalSet::new()
            .run_until(async {
                let bus = bus();
                let mut sub = bus.subscribe("active");
                let origin = Rc::new(RefCell::new(None));
                let seen = origin.clone();
                spawn_local(async move {
                    if let Some(request) = sub.next().await {
                        *seen.borrow_mut() = request.origin().cloned();
                        request.acknowledge();
                    }
                });

                bus.request_refresh(Some(ControlId::new("delete:1"))).await;
                assert_eq!(*origin.borrow(), Some(ControlId::new("delete:1")));
            })
            .await;
    }
}
