//! Note List Component
//!
//! Active or archived notes. Owns its collection through a
//! `ListController` and re-fetches on every refresh round.

use std::rc::Rc;

use futures::future::abortable;
use leptos::prelude::*;
use leptos::task::spawn_local;
use notes_sync::{ListController, ListKind, ListState, SPINNER_GLYPH};

use crate::components::NoteItem;
use crate::context::AppContext;

#[component]
pub fn NoteList(kind: ListKind) -> impl IntoView {
    let ctx = use_context::<AppContext>().expect("AppContext should be provided");

    let (state, set_state) = signal(ListState::Uninitialized);
    let is_archived = kind == ListKind::Archived;

    let controller = Rc::new(ListController::new(kind, ctx.gateway(), ctx.notifier()));
    controller.on_change(move |s| {
        let _ = set_state.try_set(s.clone());
    });

    // Subscribe before the first fetch so no round is missed
    let subscription = ctx.bus().subscribe(kind.subscriber_name());
    let (task, handle) = abortable(async move { controller.attach(subscription).await });
    spawn_local(async move {
        if task.await.is_err() {
            log::debug!("[{}] detached", kind.subscriber_name());
        }
    });
    on_cleanup(move || handle.abort());

    view! {
        <section class="note-list" class:archived-list=is_archived>
            <h2>{kind.heading()}</h2>
            <p class="note-count">{move || format!("{} notes", state.with(|s| s.notes().len()))}</p>
            {move || match state.get() {
                ListState::Uninitialized | ListState::Loading => view! {
                    <div class="loading">
                        <span class="spinner">{SPINNER_GLYPH}</span>
                        " Loading..."
                    </div>
                }.into_any(),
                ListState::Empty => view! {
                    <p class="empty-state">{kind.empty_message()}</p>
                }.into_any(),
                ListState::Populated(notes) => view! {
                    <div class="note-grid">
                        {notes.into_iter().map(|note| view! { <NoteItem note=note /> }).collect_view()}
                    </div>
                }.into_any(),
            }}
        </section>
    }
}
