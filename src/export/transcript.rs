//! Plain-text rendering of a tracking session.

use chrono::{DateTime, Local, TimeZone, Utc};
use std::fmt::Display;

use crate::recorder::session::Session;

const START_FORMAT: &str = "%d.%m.%Y, %H:%M";
const RECORD_FORMAT: &str = "%H:%M:%S%.3f";

pub(crate) fn at<Tz: TimeZone>(timestamp_ms: i64, tz: &Tz) -> DateTime<Tz> {
    DateTime::<Utc>::from_timestamp_millis(timestamp_ms)
        .unwrap_or_default()
        .with_timezone(tz)
}

/// `DD.MM.YYYY, HH:mm` for the session start.
pub fn start_time_text<Tz: TimeZone>(session: &Session, tz: &Tz) -> String
where
    Tz::Offset: Display,
{
    at(session.started_at_ms, tz).format(START_FORMAT).to_string()
}

/// Render the session in the local time zone.
pub fn build(session: &Session) -> String {
    build_in(session, &Local)
}

pub fn build_in<Tz: TimeZone>(session: &Session, tz: &Tz) -> String
where
    Tz::Offset: Display,
{
    let mut lines = Vec::with_capacity(session.len() + 1);
    lines.push(format!("Tracking started: {}.", start_time_text(session, tz)));
    lines.extend(session.records().iter().map(|record| {
        format!(
            "{}: {}",
            at(record.timestamp_ms, tz).format(RECORD_FORMAT),
            record.data
        )
    }));
    lines.join("\n")
}

/// `My_IDE_action_tracker_19_10_2026__14_05.txt`
pub fn default_file_name(product_name: &str, start_time_text: &str) -> String {
    let product = product_name.replace(' ', "_");
    let time: String = start_time_text
        .chars()
        .map(|c| if matches!(c, '.' | ',' | ':' | ' ') { '_' } else { c })
        .collect();
    format!("{product}_action_tracker_{time}.txt")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::recorder::types::{ActionData, KeyCode, KeyStroke};
    use chrono::FixedOffset;

    // 2026-10-19 14:05:03.007 UTC
    const START: i64 = 1_792_418_703_007;

    fn session() -> Session {
        let mut session = Session::new(START);
        session.add_record(START, ActionData::CharTyped { ch: 'a' });
        session.add_record(
            START + 1_250,
            ActionData::command("Rename", None).with_selection("Foo.bar"),
        );
        session.add_record(
            START + 1_250,
            ActionData::KeyStrokePressed {
                keystroke: KeyStroke::plain(KeyCode::Enter),
            },
        );
        session
    }

    #[test]
    fn builds_header_and_one_line_per_record() {
        let text = build_in(&session(), &Utc);
        assert_eq!(
            text,
            "Tracking started: 19.10.2026, 14:05.\n\
             14:05:03.007: typed 'a'\n\
             14:05:04.257: action 'Rename' on 'Foo.bar'\n\
             14:05:04.257: Enter"
        );
    }

    #[test]
    fn empty_session_is_header_only() {
        let text = build_in(&Session::new(START), &Utc);
        assert_eq!(text, "Tracking started: 19.10.2026, 14:05.");
    }

    #[test]
    fn renders_in_requested_time_zone() {
        let tz = FixedOffset::east_opt(2 * 3600).expect("offset");
        let text = build_in(&session(), &tz);
        assert!(text.starts_with("Tracking started: 19.10.2026, 16:05."));
        assert!(text.contains("\n16:05:03.007: typed 'a'"));
    }

    #[test]
    fn local_build_has_same_shape() {
        let text = build(&session());
        assert_eq!(text.lines().count(), 4);
        assert!(text.starts_with("Tracking started: "));
    }

    #[test]
    fn file_name_replaces_separators() {
        assert_eq!(
            default_file_name("My IDE", "19.10.2026, 14:05"),
            "My_IDE_action_tracker_19_10_2026__14_05.txt"
        );
    }
}
