use chrono::NaiveDate;
use shared::{completion_key, CompletionRecord, CompletionSet, ScheduleEntry};
use yew::prelude::*;

use crate::components::lesson_card::LessonCard;

#[derive(Properties, PartialEq)]
pub struct DayScheduleProps {
    pub date: NaiveDate,
    pub lessons: Vec<ScheduleEntry>,
    pub loading: bool,
    pub load_error: bool,
    pub completions: CompletionSet,
    pub on_completed: Callback<CompletionRecord>,
}

/// Lesson list for one day. Loading, load failure and an empty day each get
/// their own placeholder row so the three states stay distinguishable.
#[function_component(DaySchedule)]
pub fn day_schedule(props: &DayScheduleProps) -> Html {
    if props.loading {
        return html! {
            <div class="schedule-placeholder loading">{"Загрузка расписания..."}</div>
        };
    }

    if props.load_error {
        return html! {
            <div class="schedule-placeholder error">{"Не удалось загрузить расписание"}</div>
        };
    }

    if props.lessons.is_empty() {
        return html! {
            <div class="schedule-placeholder empty">{"На этот день занятий нет"}</div>
        };
    }

    html! {
        <div class="lesson-list">
            {for props.lessons.iter().map(|entry| {
                let key = completion_key(props.date, entry.id);
                let completed = props.completions.contains(&key);

                html! {
                    // Keyed per lesson instance so cards remount when the
                    // selected day changes
                    <LessonCard
                        key={key}
                        entry={entry.clone()}
                        date={props.date}
                        {completed}
                        on_completed={props.on_completed.clone()}
                    />
                }
            })}
        </div>
    }
}
