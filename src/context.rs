//! Application Context
//!
//! Shared handles provided via Leptos Context API. The coordinator and the
//! gateway are single-threaded, so they live in local storage.

use std::rc::Rc;

use leptos::prelude::*;
use leptos::task::spawn_local;
use notes_sync::{ClientConfig, Coordinator, HttpGateway, Intent, Notifier, RefreshBus};

use crate::components::{ButtonHandle, SignalPresenter};
use crate::dom::BrowserNotifier;

pub type AppCoordinator = Coordinator<HttpGateway, SignalPresenter>;

#[derive(Clone, Copy)]
pub struct AppContext {
    gateway: StoredValue<Rc<HttpGateway>, LocalStorage>,
    notifier: StoredValue<Rc<dyn Notifier>, LocalStorage>,
    bus: StoredValue<RefreshBus, LocalStorage>,
    coordinator: StoredValue<Rc<AppCoordinator>, LocalStorage>,
    /// Set when a refresh round ends without every list confirming
    pub stale_notice: RwSignal<Option<String>>,
}

impl AppContext {
    pub fn new(config: ClientConfig) -> Self {
        let stale_notice = RwSignal::new(None);
        let gateway = Rc::new(HttpGateway::new(config.clone()));
        let notifier: Rc<dyn Notifier> = Rc::new(BrowserNotifier::new(stale_notice));
        let bus = RefreshBus::new(config.refresh_ack_timeout());
        let coordinator = Rc::new(Coordinator::new(
            gateway.clone(),
            SignalPresenter,
            notifier.clone(),
            bus.clone(),
        ));
        Self {
            gateway: StoredValue::new_local(gateway),
            notifier: StoredValue::new_local(notifier),
            bus: StoredValue::new_local(bus),
            coordinator: StoredValue::new_local(coordinator),
            stale_notice,
        }
    }

    pub fn gateway(&self) -> Rc<HttpGateway> {
        self.gateway.get_value()
    }

    pub fn notifier(&self) -> Rc<dyn Notifier> {
        self.notifier.get_value()
    }

    pub fn bus(&self) -> RefreshBus {
        self.bus.get_value()
    }

    /// Hand an intent to the coordinator; the cycle runs in the background
    pub fn dispatch(&self, intent: Intent<ButtonHandle>) {
        let coordinator = self.coordinator.get_value();
        spawn_local(async move {
            let report = coordinator.dispatch(intent).await;
            log::debug!("[APP] {:?}", report);
        });
    }
}
