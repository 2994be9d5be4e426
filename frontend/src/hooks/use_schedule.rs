use chrono::{Days, NaiveDate};
use shared::{lessons_for_day, weekday_token, CompletionRecord, CompletionSet, ScheduleEntry};
use wasm_bindgen_futures::spawn_local;
use web_sys::MouseEvent;
use yew::prelude::*;

use crate::services::api::ApiClient;
use crate::services::{date_utils, storage};

#[derive(Clone)]
pub struct ScheduleState {
    /// Calendar date currently displayed, owned by this hook and passed to
    /// all formatting and fetch logic.
    pub selected_date: NaiveDate,
    /// Lessons for the selected day, ordered by start time
    pub lessons: Vec<ScheduleEntry>,
    pub loading: bool,
    pub load_error: bool,
    /// Snapshot of the persisted completion set, reloaded on every refresh
    pub completions: CompletionSet,
}

pub struct UseScheduleResult {
    pub state: ScheduleState,
    pub actions: UseScheduleActions,
}

#[derive(Clone)]
pub struct UseScheduleActions {
    pub prev_day: Callback<MouseEvent>,
    pub next_day: Callback<MouseEvent>,
    pub refresh: Callback<()>,
    /// Persist a lesson completion locally and mirror it to the income API
    pub mark_completed: Callback<CompletionRecord>,
}

/// Day schedule state: the selected date, the lessons filtered to it and the
/// completion bookkeeping around them.
#[hook]
pub fn use_schedule(api_client: &ApiClient) -> UseScheduleResult {
    let selected_date = use_state(date_utils::today);
    let lessons = use_state(Vec::<ScheduleEntry>::new);
    let loading = use_state(|| true);
    let load_error = use_state(|| false);
    let completions = use_state(storage::load_completions);

    // Refresh schedule callback. A failed fetch always clears `loading` so
    // the view degrades to the error placeholder instead of spinning forever.
    let refresh = {
        let api_client = api_client.clone();
        let lessons = lessons.clone();
        let loading = loading.clone();
        let load_error = load_error.clone();
        let completions = completions.clone();
        let selected_date = selected_date.clone();

        Callback::from(move |_: ()| {
            let api_client = api_client.clone();
            let lessons = lessons.clone();
            let loading = loading.clone();
            let load_error = load_error.clone();
            let completions = completions.clone();
            let date = *selected_date;

            spawn_local(async move {
                loading.set(true);
                load_error.set(false);
                completions.set(storage::load_completions());

                match api_client.get_schedule().await {
                    Ok(entries) => {
                        lessons.set(lessons_for_day(entries, weekday_token(date)));
                    }
                    Err(e) => {
                        gloo::console::error!(format!("Failed to fetch schedule: {}", e));
                        lessons.set(Vec::new());
                        load_error.set(true);
                    }
                }

                loading.set(false);
            });
        })
    };

    // Navigation callbacks
    let prev_day = {
        let selected_date = selected_date.clone();
        Callback::from(move |_: MouseEvent| {
            if let Some(previous) = selected_date.checked_sub_days(Days::new(1)) {
                selected_date.set(previous);
            }
        })
    };

    let next_day = {
        let selected_date = selected_date.clone();
        Callback::from(move |_: MouseEvent| {
            if let Some(next) = selected_date.checked_add_days(Days::new(1)) {
                selected_date.set(next);
            }
        })
    };

    let mark_completed = {
        let api_client = api_client.clone();
        let completions = completions.clone();

        Callback::from(move |record: CompletionRecord| {
            // Local set is the source of truth; duplicate keys are a silent
            // no-op and nothing is written back.
            let mut set = storage::load_completions();
            if set.insert(record.clone()) {
                storage::save_completions(&set);
            }
            completions.set(set);

            // Fire-and-forget remote mirror, reported at console level only
            let api_client = api_client.clone();
            spawn_local(async move {
                match api_client.create_income_lesson(record.to_income_request()).await {
                    Ok(response) if response.success => {
                        gloo::console::log!(format!(
                            "Income lesson recorded (id {:?})",
                            response.lesson_id
                        ));
                    }
                    Ok(response) => {
                        gloo::console::warn!(format!(
                            "Income lesson rejected: {}",
                            response.message.unwrap_or_default()
                        ));
                    }
                    Err(e) => {
                        gloo::console::error!(format!("Failed to record income lesson: {}", e));
                    }
                }
            });
        })
    };

    // Fetch on mount and whenever the selected day changes
    use_effect_with(*selected_date, {
        let refresh = refresh.clone();
        move |_| {
            refresh.emit(());
            || ()
        }
    });

    let state = ScheduleState {
        selected_date: *selected_date,
        lessons: (*lessons).clone(),
        loading: *loading,
        load_error: *load_error,
        completions: (*completions).clone(),
    };

    let actions = UseScheduleActions {
        prev_day,
        next_day,
        refresh,
        mark_completed,
    };

    UseScheduleResult { state, actions }
}
