use gloo::storage::{LocalStorage, Storage};
use shared::CompletionSet;

/// Fixed local storage key holding the JSON array of completion records.
pub const COMPLETED_LESSONS_KEY: &str = "completed_lessons";

/// Load the persisted completion set. Missing or malformed storage content
/// degrades to an empty set.
pub fn load_completions() -> CompletionSet {
    let raw = LocalStorage::raw()
        .get_item(COMPLETED_LESSONS_KEY)
        .ok()
        .flatten();
    CompletionSet::from_json(raw.as_deref())
}

/// Write the completion set back to local storage.
pub fn save_completions(completions: &CompletionSet) {
    if let Err(e) = LocalStorage::raw().set_item(COMPLETED_LESSONS_KEY, &completions.to_json()) {
        gloo::console::error!(format!("Failed to persist completed lessons: {:?}", e));
    }
}
