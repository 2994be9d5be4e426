pub mod day_schedule;
pub mod lesson_card;
