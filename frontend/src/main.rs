use yew::prelude::*;

mod components;
mod hooks;
mod services;

use components::day_schedule::DaySchedule;
use hooks::use_auth_guard::use_auth_guard;
use hooks::use_schedule::use_schedule;
use services::api::ApiClient;
use shared::day_title;

#[function_component(App)]
fn app() -> Html {
    let api_client = ApiClient::new();

    use_auth_guard(&api_client);
    let schedule = use_schedule(&api_client);

    html! {
        <>
            <header class="header">
                <div class="container">
                    <h1>{"Расписание занятий"}</h1>
                </div>
            </header>

            <main class="main">
                <div class="container">
                    <section class="schedule-section">
                        <div class="schedule-header">
                            <button class="day-nav-btn" onclick={schedule.actions.prev_day.clone()}>{"‹"}</button>
                            // Derived from the selected date alone, so the
                            // title stays current even while a fetch is in
                            // flight or has failed
                            <h2 class="day-title">{day_title(schedule.state.selected_date)}</h2>
                            <button class="day-nav-btn" onclick={schedule.actions.next_day.clone()}>{"›"}</button>
                        </div>

                        <DaySchedule
                            date={schedule.state.selected_date}
                            lessons={schedule.state.lessons.clone()}
                            loading={schedule.state.loading}
                            load_error={schedule.state.load_error}
                            completions={schedule.state.completions.clone()}
                            on_completed={schedule.actions.mark_completed.clone()}
                        />
                    </section>
                </div>
            </main>
        </>
    }
}

fn main() {
    yew::Renderer::<App>::new().render();
}
