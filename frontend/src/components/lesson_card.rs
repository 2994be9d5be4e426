use chrono::NaiveDate;
use shared::{CompletionRecord, LessonPhase, ScheduleEntry, TransitionEffect};
use web_sys::MouseEvent;
use yew::prelude::*;

#[derive(Properties, PartialEq)]
pub struct LessonCardProps {
    pub entry: ScheduleEntry,
    /// Calendar date this card is rendered for (the lesson instance date)
    pub date: NaiveDate,
    /// Whether the persisted completion set already holds this instance
    pub completed: bool,
    pub on_completed: Callback<CompletionRecord>,
}

/// One lesson card: time range, student, exam badge, topic and the
/// state-transition button.
#[function_component(LessonCard)]
pub fn lesson_card(props: &LessonCardProps) -> Html {
    let phase = use_state(|| LessonPhase::initial(props.completed));

    // A lesson restored from the persisted set is terminal regardless of
    // what this card's own state says.
    let current = if props.completed {
        LessonPhase::Done
    } else {
        *phase
    };

    let onclick = {
        let phase = phase.clone();
        let entry = props.entry.clone();
        let date = props.date;
        let on_completed = props.on_completed.clone();

        Callback::from(move |_: MouseEvent| {
            let (next, effect) = current.advance();
            phase.set(next);
            if effect == TransitionEffect::PersistCompletion {
                on_completed.emit(CompletionRecord::new(date, &entry));
            }
        })
    };

    let entry = &props.entry;

    html! {
        <div class="lesson-card">
            <div class="lesson-time">{entry.time_range()}</div>
            <div class="lesson-student">
                <div class="student-initials">{entry.initials()}</div>
                <div class="student-info">
                    <div class="student-name">{entry.display_name()}</div>
                    {if let Some(grade) = entry.grade.as_ref() {
                        html! { <div class="student-grade">{format!("{} класс", grade)}</div> }
                    } else {
                        html! {}
                    }}
                </div>
            </div>
            <span class="exam-badge">{entry.exam_label()}</span>
            <div class="lesson-topic">{&entry.topic_title}</div>
            {if let Some(link) = entry.lesson_link.as_ref() {
                html! {
                    <a class="lesson-link" href={link.clone()} target="_blank">
                        {"Подключиться"}
                    </a>
                }
            } else {
                html! {}
            }}
            <button
                class="lesson-status-btn"
                disabled={current.is_terminal()}
                {onclick}
            >
                {current.label()}
            </button>
        </div>
    }
}
