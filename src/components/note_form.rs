//! Note Form Component
//!
//! Title and body inputs with blur validation and a remaining-character
//! counter. Submission always proceeds; the native length attributes are
//! the gate.

use leptos::prelude::*;
use notes_sync::validation::{
    feedback, remaining_title_chars, validate_body, validate_title, BODY_MIN_LEN, TITLE_MAX_LEN, TITLE_MIN_LEN,
};
use notes_sync::{ControlId, Intent, NewNote, OperationKind};

use crate::components::{ActionButton, ButtonHandle};
use crate::context::AppContext;

#[component]
pub fn NoteForm() -> impl IntoView {
    let ctx = use_context::<AppContext>().expect("AppContext should be provided");

    let (title, set_title) = signal(String::new());
    let (body, set_body) = signal(String::new());
    let (title_error, set_title_error) = signal(String::new());
    let (body_error, set_body_error) = signal(String::new());

    let submit = ButtonHandle::new(ControlId::new("make-note"), OperationKind::Create.idle_label());

    let on_submit = {
        let submit = submit.clone();
        move |ev: web_sys::SubmitEvent| {
            ev.prevent_default();
            let note = NewNote::new(title.get_untracked(), body.get_untracked());
            ctx.dispatch(Intent::create(note, submit.clone()));

            set_title.set(String::new());
            set_body.set(String::new());
            set_title_error.set(String::new());
            set_body_error.set(String::new());
        }
    };

    view! {
        <form class="note-form" on:submit=on_submit>
            <div class="form-field">
                <label for="note-title">"Title"</label>
                <input
                    id="note-title"
                    type="text"
                    required
                    minlength=TITLE_MIN_LEN.to_string()
                    maxlength=TITLE_MAX_LEN.to_string()
                    placeholder="Note title..."
                    prop:value=move || title.get()
                    on:input=move |ev| set_title.set(event_target_value(&ev))
                    on:blur=move |_| set_title_error.set(feedback(validate_title(&title.get_untracked())))
                />
                <small class="char-counter">
                    {move || format!("{} characters left", remaining_title_chars(&title.get()))}
                </small>
                <small class="field-error">{move || title_error.get()}</small>
            </div>

            <div class="form-field">
                <label for="note-body">"Note"</label>
                <textarea
                    id="note-body"
                    required
                    minlength=BODY_MIN_LEN.to_string()
                    placeholder="Write your note..."
                    prop:value=move || body.get()
                    on:input=move |ev| set_body.set(event_target_value(&ev))
                    on:blur=move |_| set_body_error.set(feedback(validate_body(&body.get_untracked())))
                ></textarea>
                <small class="field-error">{move || body_error.get()}</small>
            </div>

            <ActionButton handle=submit class="make-note-btn" button_type="submit" />
        </form>
    }
}
