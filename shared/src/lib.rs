use chrono::{Datelike, NaiveDate, Weekday};
use serde::{Deserialize, Serialize};

/// One recurring weekly lesson slot as returned by the backend schedule API.
///
/// Entries are immutable from the view's perspective: the tutor cabinet only
/// reads them, filters them to a day and renders them as cards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScheduleEntry {
    pub id: i64,
    /// Lowercase English weekday token ("monday".."sunday"), the server's
    /// day-of-week encoding.
    pub day_of_week: String,
    /// "HH:MM" or "HH:MM:SS", zero-padded
    pub start_time: String,
    /// "HH:MM" or "HH:MM:SS", zero-padded
    pub end_time: String,
    #[serde(default)]
    pub student_name: String,
    #[serde(default)]
    pub student_last_name: String,
    #[serde(default)]
    pub grade: Option<String>,
    /// Free-form exam identifier, e.g. "ege" or "oge"
    #[serde(default)]
    pub exam_type: String,
    #[serde(default)]
    pub topic_title: String,
    #[serde(default)]
    pub lesson_link: Option<String>,
    #[serde(default)]
    pub lesson_price: f64,
}

/// Placeholder shown when a schedule entry carries no student name at all.
pub const STUDENT_PLACEHOLDER: &str = "Ученик";

impl ScheduleEntry {
    /// Student display name: first and last name joined by a space, or the
    /// placeholder when both are empty.
    pub fn display_name(&self) -> String {
        let name = format!("{} {}", self.student_name.trim(), self.student_last_name.trim());
        let name = name.trim().to_string();
        if name.is_empty() {
            STUDENT_PLACEHOLDER.to_string()
        } else {
            name
        }
    }

    /// Two-letter (at most) initials for the card avatar, derived from the
    /// words of the display name.
    pub fn initials(&self) -> String {
        self.display_name()
            .split_whitespace()
            .take(2)
            .filter_map(|word| word.chars().next())
            .flat_map(|c| c.to_uppercase())
            .collect()
    }

    /// Time range for the card, seconds truncated: "10:00 — 11:00".
    pub fn time_range(&self) -> String {
        format!("{} — {}", short_time(&self.start_time), short_time(&self.end_time))
    }

    /// Uppercased exam label used for the card badge and the income record.
    pub fn exam_label(&self) -> String {
        self.exam_type.to_uppercase()
    }
}

/// Truncate "HH:MM:SS" to "HH:MM"; shorter values pass through unchanged.
fn short_time(time: &str) -> &str {
    time.get(..5).unwrap_or(time)
}

/// Response shape of `GET /api/schedule`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScheduleResponse {
    pub schedule: Vec<ScheduleEntry>,
}

/// Response shape of `GET /api/check-auth`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CheckAuthResponse {
    pub authenticated: bool,
}

/// Body of `POST /api/income-lessons`, the best-effort remote mirror of a
/// completed lesson.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreateIncomeLessonRequest {
    /// ISO date of the lesson instance (YYYY-MM-DD)
    pub date: String,
    pub student: String,
    pub exam: String,
    pub price: f64,
    pub status: String,
}

/// Response of `POST /api/income-lessons`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreateIncomeLessonResponse {
    pub success: bool,
    #[serde(default)]
    pub lesson_id: Option<i64>,
    #[serde(default)]
    pub message: Option<String>,
}

/// Filter the full weekly schedule down to one day and order it by start
/// time. Times are zero-padded so lexicographic comparison is chronological.
pub fn lessons_for_day(mut entries: Vec<ScheduleEntry>, weekday_token: &str) -> Vec<ScheduleEntry> {
    entries.retain(|entry| entry.day_of_week == weekday_token);
    entries.sort_by(|a, b| a.start_time.cmp(&b.start_time));
    entries
}

/// Canonical lowercase English weekday token for a date, matching the
/// server's day-of-week encoding. Week starts on Monday.
pub fn weekday_token(date: NaiveDate) -> &'static str {
    match date.weekday() {
        Weekday::Mon => "monday",
        Weekday::Tue => "tuesday",
        Weekday::Wed => "wednesday",
        Weekday::Thu => "thursday",
        Weekday::Fri => "friday",
        Weekday::Sat => "saturday",
        Weekday::Sun => "sunday",
    }
}

fn weekday_name_ru(date: NaiveDate) -> &'static str {
    match date.weekday() {
        Weekday::Mon => "понедельник",
        Weekday::Tue => "вторник",
        Weekday::Wed => "среда",
        Weekday::Thu => "четверг",
        Weekday::Fri => "пятница",
        Weekday::Sat => "суббота",
        Weekday::Sun => "воскресенье",
    }
}

/// Genitive month names for the day title. Fixed table, no locale lookup.
const MONTHS_GENITIVE_RU: [&str; 12] = [
    "января",
    "февраля",
    "марта",
    "апреля",
    "мая",
    "июня",
    "июля",
    "августа",
    "сентября",
    "октября",
    "ноября",
    "декабря",
];

/// Human-readable Russian title for the selected day, e.g.
/// "понедельник, 3 июня 2024 г.". Deterministic for a given date.
pub fn day_title(date: NaiveDate) -> String {
    let month = MONTHS_GENITIVE_RU[date.month0() as usize];
    format!(
        "{}, {} {} {} г.",
        weekday_name_ru(date),
        date.day(),
        month,
        date.year()
    )
}

/// Canonical ISO "YYYY-MM-DD" string, used as the date half of completion
/// keys and in income records.
pub fn iso_date(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

/// Composite key identifying one lesson instance: a schedule entry on a
/// specific calendar date, e.g. "2024-06-03-5".
pub fn completion_key(date: NaiveDate, schedule_id: i64) -> String {
    format!("{}-{}", iso_date(date), schedule_id)
}

/// Phase of one lesson card's transition control.
///
/// The machine is pure: `advance` only describes what happens next, the
/// frontend decides how to render it and runs the persistence effect.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LessonPhase {
    /// Not started, button reads "Начать"
    Idle,
    /// In progress, button reads "Завершить"
    Running,
    /// Terminal: completed, button disabled
    Done,
}

/// Side effect requested by a phase transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransitionEffect {
    None,
    /// Append a completion record locally and mirror it to the income API.
    PersistCompletion,
}

impl LessonPhase {
    /// Initial phase for a card. A lesson already present in the persisted
    /// completion set restores straight into `Done`, skipping Idle/Running.
    pub fn initial(already_completed: bool) -> Self {
        if already_completed {
            LessonPhase::Done
        } else {
            LessonPhase::Idle
        }
    }

    /// Advance the machine by one activation. `Done` is terminal: there is
    /// no transition back to `Idle` or `Running`.
    pub fn advance(self) -> (LessonPhase, TransitionEffect) {
        match self {
            LessonPhase::Idle => (LessonPhase::Running, TransitionEffect::None),
            LessonPhase::Running => (LessonPhase::Done, TransitionEffect::PersistCompletion),
            LessonPhase::Done => (LessonPhase::Done, TransitionEffect::None),
        }
    }

    /// Button label for this phase.
    pub fn label(&self) -> &'static str {
        match self {
            LessonPhase::Idle => "Начать",
            LessonPhase::Running => "Завершить",
            LessonPhase::Done => "Проведен",
        }
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, LessonPhase::Done)
    }
}

/// Status a completion record is created with. The income page flips it to
/// "paid" later; this component never does.
pub const COMPLETION_STATUS_PENDING: &str = "pending";

/// One lesson instance marked as completed: a specific schedule entry on a
/// specific calendar date. Created exactly once per (date, schedule id) pair
/// and never mutated by the schedule view.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompletionRecord {
    /// Composite key: "YYYY-MM-DD-<schedule id>"
    pub key: String,
    pub date: String,
    pub schedule_id: i64,
    pub student: String,
    pub exam: String,
    pub price: f64,
    pub time: String,
    pub status: String,
}

impl CompletionRecord {
    /// Build the record for a lesson held on `date`, capturing the card's
    /// display attributes.
    pub fn new(date: NaiveDate, entry: &ScheduleEntry) -> Self {
        Self {
            key: completion_key(date, entry.id),
            date: iso_date(date),
            schedule_id: entry.id,
            student: entry.display_name(),
            exam: entry.exam_label(),
            price: entry.lesson_price,
            time: entry.time_range(),
            status: COMPLETION_STATUS_PENDING.to_string(),
        }
    }

    /// Request body for the best-effort remote mirror of this record.
    pub fn to_income_request(&self) -> CreateIncomeLessonRequest {
        CreateIncomeLessonRequest {
            date: self.date.clone(),
            student: self.student.clone(),
            exam: self.exam.clone(),
            price: self.price,
            status: self.status.clone(),
        }
    }
}

/// Ordered set of completion records with at most one record per composite
/// key. This is the durable client-local source of truth for "already marked
/// done in this browser".
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CompletionSet {
    records: Vec<CompletionRecord>,
}

impl CompletionSet {
    /// Rebuild the set from stored records, dropping any duplicate keys and
    /// keeping the first occurrence.
    pub fn from_records(records: Vec<CompletionRecord>) -> Self {
        let mut set = CompletionSet::default();
        for record in records {
            set.insert(record);
        }
        set
    }

    /// Parse the JSON payload kept in local storage. Missing, unreadable or
    /// malformed data degrades to an empty set, never an error.
    pub fn from_json(raw: Option<&str>) -> Self {
        let records = raw
            .and_then(|json| serde_json::from_str::<Vec<CompletionRecord>>(json).ok())
            .unwrap_or_default();
        Self::from_records(records)
    }

    /// Serialize the set for local storage.
    pub fn to_json(&self) -> String {
        serde_json::to_string(&self.records).unwrap_or_else(|_| "[]".to_string())
    }

    pub fn contains(&self, key: &str) -> bool {
        self.records.iter().any(|record| record.key == key)
    }

    /// Append a record unless one with the same key already exists. Returns
    /// whether the record was actually added; duplicates are a silent no-op.
    pub fn insert(&mut self, record: CompletionRecord) -> bool {
        if self.contains(&record.key) {
            return false;
        }
        self.records.push(record);
        true
    }

    pub fn records(&self) -> &[CompletionRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn entry(id: i64, day: &str, start: &str) -> ScheduleEntry {
        ScheduleEntry {
            id,
            day_of_week: day.to_string(),
            start_time: start.to_string(),
            end_time: "23:00".to_string(),
            student_name: "Анна".to_string(),
            student_last_name: "Иванова".to_string(),
            grade: Some("11".to_string()),
            exam_type: "ege".to_string(),
            topic_title: "Алгоритмы".to_string(),
            lesson_link: None,
            lesson_price: 1500.0,
        }
    }

    #[test]
    fn test_weekday_tokens_over_one_week() {
        // 2024-06-03 is a Monday
        let expected = [
            "monday",
            "tuesday",
            "wednesday",
            "thursday",
            "friday",
            "saturday",
            "sunday",
        ];
        for (offset, token) in expected.iter().enumerate() {
            let day = date(2024, 6, 3 + offset as u32);
            assert_eq!(weekday_token(day), *token);
        }
    }

    #[test]
    fn test_weekday_token_repeats_every_seven_days() {
        let start = date(2023, 1, 1);
        for offset in 0u64..30 {
            let day = start + chrono::Days::new(offset);
            let week_later = day + chrono::Days::new(7);
            assert_eq!(weekday_token(day), weekday_token(week_later));
        }
    }

    #[test]
    fn test_day_title_russian() {
        assert_eq!(day_title(date(2024, 6, 3)), "понедельник, 3 июня 2024 г.");
        assert_eq!(day_title(date(2025, 1, 9)), "четверг, 9 января 2025 г.");
        assert_eq!(
            day_title(date(2024, 12, 31)),
            "вторник, 31 декабря 2024 г."
        );
    }

    #[test]
    fn test_iso_date_is_zero_padded() {
        assert_eq!(iso_date(date(2024, 6, 3)), "2024-06-03");
        assert_eq!(iso_date(date(2024, 11, 20)), "2024-11-20");
    }

    #[test]
    fn test_completion_key_format() {
        assert_eq!(completion_key(date(2024, 6, 3), 5), "2024-06-03-5");
    }

    #[test]
    fn test_lessons_for_day_filters_and_sorts() {
        let entries = vec![
            entry(1, "monday", "18:00"),
            entry(2, "tuesday", "10:00"),
            entry(3, "monday", "09:00"),
            entry(4, "monday", "12:30"),
            entry(5, "sunday", "11:00"),
        ];

        let monday = lessons_for_day(entries, "monday");

        assert_eq!(monday.len(), 3);
        for lesson in &monday {
            assert_eq!(lesson.day_of_week, "monday");
        }
        for pair in monday.windows(2) {
            assert!(pair[0].start_time <= pair[1].start_time);
        }
        assert_eq!(monday[0].id, 3);
        assert_eq!(monday[2].id, 1);
    }

    #[test]
    fn test_lessons_for_day_empty_result() {
        let entries = vec![entry(1, "monday", "10:00")];
        assert!(lessons_for_day(entries, "tuesday").is_empty());
    }

    #[test]
    fn test_display_name_joins_first_and_last() {
        let e = entry(1, "monday", "10:00");
        assert_eq!(e.display_name(), "Анна Иванова");
    }

    #[test]
    fn test_display_name_falls_back_to_placeholder() {
        let mut e = entry(1, "monday", "10:00");
        e.student_name = String::new();
        e.student_last_name = String::new();
        assert_eq!(e.display_name(), STUDENT_PLACEHOLDER);

        e.student_name = "  ".to_string();
        assert_eq!(e.display_name(), STUDENT_PLACEHOLDER);
    }

    #[test]
    fn test_initials() {
        let mut e = entry(1, "monday", "10:00");
        assert_eq!(e.initials(), "АИ");

        e.student_last_name = String::new();
        assert_eq!(e.initials(), "А");

        e.student_name = "anna".to_string();
        assert_eq!(e.initials(), "A");
    }

    #[test]
    fn test_time_range_truncates_seconds() {
        let mut e = entry(1, "monday", "10:00");
        e.start_time = "10:00:00".to_string();
        e.end_time = "11:00:00".to_string();
        assert_eq!(e.time_range(), "10:00 — 11:00");

        e.start_time = "09:30".to_string();
        e.end_time = "10:30".to_string();
        assert_eq!(e.time_range(), "09:30 — 10:30");
    }

    #[test]
    fn test_exam_label_uppercase() {
        let mut e = entry(1, "monday", "10:00");
        assert_eq!(e.exam_label(), "EGE");
        e.exam_type = "oge".to_string();
        assert_eq!(e.exam_label(), "OGE");
    }

    #[test]
    fn test_lesson_phase_transitions() {
        let (running, effect) = LessonPhase::Idle.advance();
        assert_eq!(running, LessonPhase::Running);
        assert_eq!(effect, TransitionEffect::None);

        let (done, effect) = running.advance();
        assert_eq!(done, LessonPhase::Done);
        assert_eq!(effect, TransitionEffect::PersistCompletion);

        // Done is terminal, re-activation changes nothing
        let (still_done, effect) = done.advance();
        assert_eq!(still_done, LessonPhase::Done);
        assert_eq!(effect, TransitionEffect::None);
    }

    #[test]
    fn test_lesson_phase_labels() {
        assert_eq!(LessonPhase::Idle.label(), "Начать");
        assert_eq!(LessonPhase::Running.label(), "Завершить");
        assert_eq!(LessonPhase::Done.label(), "Проведен");
        assert!(!LessonPhase::Idle.is_terminal());
        assert!(!LessonPhase::Running.is_terminal());
        assert!(LessonPhase::Done.is_terminal());
    }

    #[test]
    fn test_lesson_phase_restores_done_from_persisted_state() {
        assert_eq!(LessonPhase::initial(true), LessonPhase::Done);
        assert_eq!(LessonPhase::initial(false), LessonPhase::Idle);
    }

    #[test]
    fn test_completion_record_from_entry() {
        let mut e = entry(5, "monday", "10:00");
        e.student_name = "Anna".to_string();
        e.student_last_name = String::new();
        e.end_time = "11:00".to_string();

        let record = CompletionRecord::new(date(2024, 6, 3), &e);

        assert_eq!(record.key, "2024-06-03-5");
        assert_eq!(record.date, "2024-06-03");
        assert_eq!(record.schedule_id, 5);
        assert_eq!(record.student, "Anna");
        assert_eq!(record.exam, "EGE");
        assert_eq!(record.price, 1500.0);
        assert_eq!(record.time, "10:00 — 11:00");
        assert_eq!(record.status, "pending");
    }

    #[test]
    fn test_completion_set_insert_is_idempotent() {
        let e = entry(5, "monday", "10:00");
        let record = CompletionRecord::new(date(2024, 6, 3), &e);

        let mut set = CompletionSet::default();
        assert!(set.insert(record.clone()));
        assert!(!set.insert(record.clone()));
        assert_eq!(set.len(), 1);

        // Same entry on another date is a different lesson instance
        let other_day = CompletionRecord::new(date(2024, 6, 10), &e);
        assert!(set.insert(other_day));
        assert_eq!(set.len(), 2);
    }

    #[test]
    fn test_completion_set_contains_restored_key() {
        let e = entry(5, "monday", "10:00");
        let set = CompletionSet::from_records(vec![CompletionRecord::new(date(2024, 6, 3), &e)]);

        assert!(set.contains("2024-06-03-5"));
        assert!(!set.contains("2024-06-04-5"));
        assert_eq!(LessonPhase::initial(set.contains("2024-06-03-5")), LessonPhase::Done);
    }

    #[test]
    fn test_completion_set_json_round_trip() {
        let e = entry(5, "monday", "10:00");
        let mut set = CompletionSet::default();
        set.insert(CompletionRecord::new(date(2024, 6, 3), &e));

        let restored = CompletionSet::from_json(Some(&set.to_json()));
        assert_eq!(restored, set);
    }

    #[test]
    fn test_completion_set_malformed_storage_degrades_to_empty() {
        assert!(CompletionSet::from_json(None).is_empty());
        assert!(CompletionSet::from_json(Some("")).is_empty());
        assert!(CompletionSet::from_json(Some("not json")).is_empty());
        assert!(CompletionSet::from_json(Some("{\"schedule\":[]}")).is_empty());
    }

    #[test]
    fn test_completion_set_from_records_drops_duplicate_keys() {
        let e = entry(5, "monday", "10:00");
        let first = CompletionRecord::new(date(2024, 6, 3), &e);
        let mut shadow = first.clone();
        shadow.student = "Другой".to_string();

        let set = CompletionSet::from_records(vec![first.clone(), shadow]);
        assert_eq!(set.len(), 1);
        assert_eq!(set.records()[0].student, first.student);
    }

    #[test]
    fn test_schedule_entry_deserializes_server_payload() {
        let json = r#"{
            "schedule": [{
                "id": 5,
                "day_of_week": "monday",
                "start_time": "10:00:00",
                "end_time": "11:00:00",
                "student_name": "Anna",
                "student_last_name": "",
                "grade": null,
                "exam_type": "ege",
                "topic_title": "Информатика",
                "lesson_link": "https://meet.example.com/abc",
                "lesson_price": 1500
            }]
        }"#;

        let response: ScheduleResponse = serde_json::from_str(json).unwrap();
        let lesson = &response.schedule[0];
        assert_eq!(lesson.id, 5);
        assert_eq!(lesson.day_of_week, "monday");
        assert_eq!(lesson.time_range(), "10:00 — 11:00");
        assert_eq!(lesson.lesson_link.as_deref(), Some("https://meet.example.com/abc"));
        assert_eq!(lesson.lesson_price, 1500.0);
    }

    #[test]
    fn test_schedule_entry_tolerates_missing_optional_fields() {
        let json = r#"{
            "id": 7,
            "day_of_week": "friday",
            "start_time": "16:00",
            "end_time": "17:00"
        }"#;

        let lesson: ScheduleEntry = serde_json::from_str(json).unwrap();
        assert_eq!(lesson.display_name(), STUDENT_PLACEHOLDER);
        assert_eq!(lesson.exam_label(), "");
        assert!(lesson.lesson_link.is_none());
        assert_eq!(lesson.lesson_price, 0.0);
    }

    #[test]
    fn test_income_request_mirrors_record() {
        let e = entry(5, "monday", "10:00");
        let record = CompletionRecord::new(date(2024, 6, 3), &e);
        let request = record.to_income_request();

        assert_eq!(request.date, "2024-06-03");
        assert_eq!(request.student, "Анна Иванова");
        assert_eq!(request.exam, "EGE");
        assert_eq!(request.price, 1500.0);
        assert_eq!(request.status, "pending");
    }
}
