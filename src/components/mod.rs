//! UI Components
//!
//! Views that render note state and raise intents. None of them call the
//! gateway for writes; intents go through the coordinator in `AppContext`.

mod action_button;
mod note_form;
mod note_item;
mod note_list;

pub use action_button::{ActionButton, ButtonHandle, SignalPresenter};
pub use note_form::NoteForm;
pub use note_item::NoteItem;
pub use note_list::NoteList;
