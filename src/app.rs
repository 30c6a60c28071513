//! Notes Frontend App
//!
//! Creation form above the active and archived lists.

use leptos::prelude::*;
use notes_sync::{ClientConfig, ListKind};

use crate::components::{NoteForm, NoteList};
use crate::context::AppContext;

#[component]
pub fn App() -> impl IntoView {
    let config = ClientConfig::from_env().or_default();
    log::info!("[APP] Using notes service at {}", config.base_url);

    let ctx = AppContext::new(config);
    provide_context(ctx);

    view! {
        <div class="app-layout">
            <header class="app-header">
                <h1>"Notes"</h1>
            </header>

            {move || ctx.stale_notice.get().map(|notice| view! {
                <div class="stale-banner" role="status">
                    <span>{notice}</span>
                    <button type="button" on:click=move |_| ctx.stale_notice.set(None)>"×"</button>
                </div>
            })}

            <main class="main-content">
                <NoteForm />
                <NoteList kind=ListKind::Active />
                <NoteList kind=ListKind::Archived />
            </main>
        </div>
    }
}
