//! Action Button Component
//!
//! A triggering control whose idle/busy state is a signal the coordinator
//! drives through [`SignalPresenter`].

use leptos::prelude::*;
use notes_sync::{ControlId, ControlState, LoadingPresenter, Trigger, BUSY_LABEL, SPINNER_GLYPH};

/// Reactive handle to one button
#[derive(Clone)]
pub struct ButtonHandle {
    id: ControlId,
    state: RwSignal<ControlState>,
}

impl ButtonHandle {
    pub fn new(id: ControlId, label: &str) -> Self {
        Self {
            id,
            state: RwSignal::new(ControlState::idle(label)),
        }
    }

    pub fn state(&self) -> RwSignal<ControlState> {
        self.state
    }
}

impl Trigger for ButtonHandle {
    fn control_id(&self) -> ControlId {
        self.id.clone()
    }
}

/// Writes presenter transitions into the button's signal. The button may
/// have been unmounted by a list re-render, so writes tolerate disposal.
pub struct SignalPresenter;

impl LoadingPresenter for SignalPresenter {
    type Control = ButtonHandle;

    fn show_busy(&self, control: &ButtonHandle) {
        let _ = control.state.try_set(ControlState::Busy);
    }

    fn restore_idle(&self, control: &ButtonHandle, label: &str) {
        let _ = control.state.try_set(ControlState::idle(label));
    }
}

/// Button rendering a [`ButtonHandle`]: disabled with a spinner while busy
#[component]
pub fn ActionButton(
    handle: ButtonHandle,
    #[prop(into)] class: String,
    #[prop(default = "button")] button_type: &'static str,
    #[prop(optional, into)] on_click: Option<Callback<()>>,
) -> impl IntoView {
    let state = handle.state();

    view! {
        <button
            type=button_type
            class=class
            data-control=handle.control_id().to_string()
            disabled=move || state.get().disabled()
            on:click=move |_| {
                if let Some(cb) = on_click {
                    cb.run(());
                }
            }
        >
            {move || match state.get() {
                ControlState::Idle(label) => view! { <span>{label}</span> }.into_any(),
                ControlState::Busy => view! {
                    <span class="busy">
                        {BUSY_LABEL} " " <span class="spinner">{SPINNER_GLYPH}</span>
                    </span>
                }.into_any(),
            }}
        </button>
    }
}
