//! Note Item Component
//!
//! One note with its delete and archive/unarchive controls.

use leptos::prelude::*;
use notes_sync::{ControlId, Intent, Note, OperationKind};

use crate::components::{ActionButton, ButtonHandle};
use crate::context::AppContext;
use crate::dom::format_long_date;

#[component]
pub fn NoteItem(note: Note) -> impl IntoView {
    let ctx = use_context::<AppContext>().expect("AppContext should be provided");

    let id = note.id.clone();
    let archived = note.archived;
    let toggle_kind = if archived { OperationKind::Unarchive } else { OperationKind::Archive };

    let delete = ButtonHandle::new(
        ControlId::for_note(OperationKind::Delete, &id),
        OperationKind::Delete.idle_label(),
    );
    let toggle = ButtonHandle::new(ControlId::for_note(toggle_kind, &id), toggle_kind.idle_label());

    let on_delete = {
        let (id, delete) = (id.clone(), delete.clone());
        move |_: ()| ctx.dispatch(Intent::delete(id.clone(), delete.clone()))
    };
    let on_toggle = {
        let (id, toggle) = (id.clone(), toggle.clone());
        move |_: ()| {
            let intent = if archived {
                Intent::unarchive(id.clone(), toggle.clone())
            } else {
                Intent::archive(id.clone(), toggle.clone())
            };
            ctx.dispatch(intent)
        }
    };

    view! {
        <article class="note-item" class:archived=archived data-id=id.to_string()>
            <h3 class="note-title">{note.title}</h3>
            <p class="note-date">{format_long_date(&note.created_at)}</p>
            <p class="note-body">{note.body}</p>
            <div class="note-actions">
                <ActionButton handle=delete class="delete-btn" on_click=Callback::new(on_delete) />
                <ActionButton handle=toggle class="archive-btn" on_click=Callback::new(on_toggle) />
            </div>
        </article>
    }
}
