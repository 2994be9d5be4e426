pub mod use_auth_guard;
pub mod use_schedule;
