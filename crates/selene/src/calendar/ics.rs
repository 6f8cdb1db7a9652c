//! iCalendar (RFC 5545) text output.

use crate::calendar::types::CosmicEvent;
use crate::config::CalendarConfig;
use chrono::{DateTime, Duration, Utc};
use uuid::Uuid;

/// Maximum content line length in octets, excluding the line break
pub const MAX_LINE_OCTETS: usize = 75;

const CRLF: &str = "\r\n";

/// Escape backslash, semicolon, comma and newline in a TEXT value.
pub fn escape_text(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            ';' => out.push_str("\\;"),
            ',' => out.push_str("\\,"),
            '\n' => out.push_str("\\n"),
            '\r' => {}
            _ => out.push(c),
        }
    }
    out
}

/// UTC date-time in `YYYYMMDDThhmmssZ` form.
pub fn format_timestamp(instant: DateTime<Utc>) -> String {
    instant.format("%Y%m%dT%H%M%SZ").to_string()
}

/// Fold a content line so no physical line exceeds [`MAX_LINE_OCTETS`].
/// Continuation lines start with a single space and breaks never split a
/// UTF-8 sequence.
pub fn fold_line(line: &str) -> String {
    if line.len() <= MAX_LINE_OCTETS {
        return line.to_string();
    }

    let mut out = String::with_capacity(line.len() + line.len() / MAX_LINE_OCTETS * 3);
    let mut width = 0;
    for c in line.chars() {
        let len = c.len_utf8();
        if width + len > MAX_LINE_OCTETS {
            out.push_str(CRLF);
            out.push(' ');
            width = 1;
        }
        out.push(c);
        width += len;
    }
    out
}

/// Stable UID for the `ordinal`-th event of the calendar.
pub fn event_uid(event: &CosmicEvent, ordinal: usize, domain: &str) -> String {
    let name = format!("{}/{}/{}", event.date.to_rfc3339(), ordinal, event.title);
    format!("{}@{}", Uuid::new_v5(&Uuid::NAMESPACE_OID, name.as_bytes()), domain)
}

/// Render `events` as a complete VCALENDAR with CRLF line endings.
pub fn render_calendar(
    year: i32,
    events: &[CosmicEvent],
    config: &CalendarConfig,
    stamp: DateTime<Utc>,
) -> String {
    let mut lines: Vec<String> = vec![
        "BEGIN:VCALENDAR".to_string(),
        "VERSION:2.0".to_string(),
        format!("PRODID:{}", config.product_id),
        "CALSCALE:GREGORIAN".to_string(),
        "METHOD:PUBLISH".to_string(),
        format!("X-WR-CALNAME:{}", escape_text(&format!("{} {}", config.name, year))),
        format!(
            "X-WR-CALDESC:{}",
            escape_text(&format!("{} for {}.", config.description, year))
        ),
        "X-WR-TIMEZONE:UTC".to_string(),
    ];

    let duration = Duration::minutes(config.event_duration_minutes as i64);
    let dtstamp = format_timestamp(stamp);

    for (ordinal, event) in events.iter().enumerate() {
        lines.push("BEGIN:VEVENT".to_string());
        lines.push(format!("UID:{}", event_uid(event, ordinal, &config.uid_domain)));
        lines.push(format!("DTSTART:{}", format_timestamp(event.date)));
        lines.push(format!("DTEND:{}", format_timestamp(event.date + duration)));
        lines.push(format!("DTSTAMP:{}", dtstamp));
        lines.push(format!("SUMMARY:{}", escape_text(&event.title)));
        lines.push(format!("DESCRIPTION:{}", escape_text(&event.description)));
        lines.push(format!("LOCATION:{}", escape_text(&config.location)));
        lines.push("STATUS:CONFIRMED".to_string());
        lines.push("SEQUENCE:0".to_string());
        lines.push(format!("CATEGORIES:{}", escape_text(&config.category)));
        lines.push("END:VEVENT".to_string());
    }

    lines.push("END:VCALENDAR".to_string());

    lines.iter().map(|l| fold_line(l)).collect::<Vec<_>>().join(CRLF)
}
