//! Year-long cosmic event calendar.

pub mod ics;
pub mod moon;
pub mod scanner;
pub mod types;

pub use moon::{full_moon_name, MoonPhase};
pub use scanner::{CosmicEventScanner, MAX_YEAR, MIN_YEAR};
pub use types::{CalendarError, CosmicCalendar, CosmicEvent, CosmicEventKind, ScanWarning};
