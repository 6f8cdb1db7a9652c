//! Year-long event scan.
//!
//! The scan runs in two phases. Every day of the year is first sampled on
//! its own (noon UTC, each body with its one-day difference, plus the lunar
//! phase). The samples are then reduced in day order through a small state
//! machine per body, which is where events are emitted. Only the reduction
//! depends on ordering.
//!
//! A body that cannot be sampled on some day keeps its previous state for
//! that day and a [`ScanWarning`] is recorded; the rest of the year is
//! unaffected.

use crate::calendar::ics::render_calendar;
use crate::calendar::moon::{full_moon_name, MoonPhase};
use crate::calendar::types::{
    CalendarError, CosmicCalendar, CosmicEvent, CosmicEventKind, ScanWarning,
};
use crate::config::CalendarConfig;
use crate::ephemeris::{
    station_hint, Body, EphemerisError, EphemerisProvider, PositionSampler, RetrogradeSample,
};
use crate::time::Observer;
use crate::zodiac::{normalize_degrees, ZodiacSign};
use chrono::{DateTime, Datelike, Duration, NaiveDate, NaiveTime, TimeZone, Utc};
use std::collections::hash_map::Entry;
use std::collections::HashMap;

/// Years the scanner accepts. Matches the span of the standard Swiss
/// Ephemeris data files.
pub const MIN_YEAR: i32 = 1800;
pub const MAX_YEAR: i32 = 2399;

/// Hour of day (UTC) each day is sampled at
const SAMPLE_HOUR: u32 = 12;

/// Maximum Sun-node distance for a New Moon to be eclipsed
pub const SOLAR_ECLIPSE_LIMIT: f64 = 18.5;
/// Maximum Sun-node distance for a Full Moon to be eclipsed
pub const LUNAR_ECLIPSE_LIMIT: f64 = 12.2;

struct LunarDay {
    phase: MoonPhase,
    angle: f64,
    illumination: f64,
    /// Sun and North Node longitudes, only sampled on New and Full Moon days.
    /// A failure carries the body that could not be sampled.
    nodes: Option<Result<(f64, f64), (Body, EphemerisError)>>,
}

struct DaySample {
    date: NaiveDate,
    instant: DateTime<Utc>,
    moon: Result<LunarDay, EphemerisError>,
    bodies: Vec<(Body, Result<RetrogradeSample, EphemerisError>)>,
}

#[derive(Debug, Clone, Copy)]
struct BodyState {
    sign: ZodiacSign,
    retrograde: bool,
    /// Noon longitudes on the two previous scanned days, most recent first
    history: [Option<f64>; 2],
}

/// Scans a year for sign ingresses, retrograde stations, cardinal moon
/// phases and eclipses, and renders the result as iCalendar text.
pub struct CosmicEventScanner<'a, P: EphemerisProvider + ?Sized> {
    sampler: PositionSampler<'a, P>,
    config: &'a CalendarConfig,
    observer: Observer,
    timestamp: Option<DateTime<Utc>>,
}

impl<'a, P: EphemerisProvider + ?Sized> CosmicEventScanner<'a, P> {
    pub fn new(provider: &'a P, config: &'a CalendarConfig, observer: Observer) -> Self {
        Self {
            sampler: PositionSampler::new(provider),
            config,
            observer,
            timestamp: None,
        }
    }

    /// Fix the `DTSTAMP` written into the calendar. Without it the wall
    /// clock at the end of the scan is used.
    pub fn with_timestamp(mut self, timestamp: DateTime<Utc>) -> Self {
        self.timestamp = Some(timestamp);
        self
    }

    pub fn generate_cosmic_calendar(&self, year: i32) -> Result<CosmicCalendar, CalendarError> {
        let days = days_of_year(year)?;
        log::debug!(
            "scanning {} days of {} for {} bodies",
            days.len(),
            year,
            self.config.tracked_bodies.len()
        );

        let samples: Vec<DaySample> = days.into_iter().map(|date| self.sample_day(date)).collect();
        let (events, warnings) = self.reduce(&samples);

        let stamp = self.timestamp.unwrap_or_else(Utc::now);
        let serialized = render_calendar(year, &events, self.config, stamp);

        log::info!(
            "cosmic calendar {}: {} events, {} warnings",
            year,
            events.len(),
            warnings.len()
        );

        Ok(CosmicCalendar {
            year,
            events,
            serialized,
            warnings,
        })
    }

    fn sample_day(&self, date: NaiveDate) -> DaySample {
        let instant = noon_utc(date);
        let provider = self.sampler.provider();

        let moon = provider
            .moon_phase_angle(instant)
            .and_then(|angle| -> Result<LunarDay, EphemerisError> {
                let illumination = provider.moon_illumination(instant)?;
                let phase = MoonPhase::classify(angle);
                let nodes = matches!(phase, MoonPhase::NewMoon | MoonPhase::FullMoon)
                    .then(|| self.sample_nodes(instant));
                Ok(LunarDay {
                    phase,
                    angle,
                    illumination,
                    nodes,
                })
            });

        let bodies = self
            .config
            .tracked_bodies
            .iter()
            .map(|&body| {
                let sample = self.sampler.sample_with_retrograde(instant, &self.observer, body);
                (body, sample)
            })
            .collect();

        DaySample {
            date,
            instant,
            moon,
            bodies,
        }
    }

    fn sample_nodes(&self, instant: DateTime<Utc>) -> Result<(f64, f64), (Body, EphemerisError)> {
        let longitude = |body: Body| {
            self.sampler
                .longitude(body, instant, &self.observer)
                .map_err(|e| (body, e))
        };
        Ok((longitude(Body::Sun)?, longitude(Body::NorthNode)?))
    }

    fn reduce(&self, samples: &[DaySample]) -> (Vec<CosmicEvent>, Vec<ScanWarning>) {
        let mut events = Vec::new();
        let mut warnings = Vec::new();
        let mut last_phase: Option<MoonPhase> = None;
        let mut states: HashMap<Body, BodyState> = HashMap::new();

        for day in samples {
            match &day.moon {
                Ok(lunar) => {
                    if lunar.phase.is_cardinal() && last_phase != Some(lunar.phase) {
                        events.push(moon_phase_event(day.instant, lunar));
                        if let Some(event) = self.eclipse_event(day, lunar, &mut warnings) {
                            events.push(event);
                        }
                    }
                    last_phase = Some(lunar.phase);
                }
                Err(e) => warnings.push(warn(day.date, None, e)),
            }

            for (body, sample) in &day.bodies {
                let sample = match sample {
                    Ok(sample) => sample,
                    Err(e) => {
                        warnings.push(warn(day.date, Some(*body), e));
                        if let Some(state) = states.get_mut(body) {
                            state.history = [None, state.history[0]];
                        }
                        continue;
                    }
                };

                let sign = ZodiacSign::from_longitude(sample.longitude);
                let state = match states.entry(*body) {
                    Entry::Occupied(slot) => slot.into_mut(),
                    Entry::Vacant(slot) => {
                        slot.insert(BodyState {
                            sign,
                            retrograde: sample.retrograde,
                            history: [Some(sample.longitude), sample.previous_longitude],
                        });
                        continue;
                    }
                };

                if sign != state.sign {
                    events.push(ingress_event(day.instant, *body, state.sign, sign));
                }
                if sample.retrograde != state.retrograde {
                    log_station_hint(day.date, sample, state);
                    events.push(station_event(day.instant, *body, sample.retrograde, sign));
                }

                *state = BodyState {
                    sign,
                    retrograde: sample.retrograde,
                    history: [Some(sample.longitude), state.history[0]],
                };
            }
        }

        (events, warnings)
    }

    fn eclipse_event(
        &self,
        day: &DaySample,
        lunar: &LunarDay,
        warnings: &mut Vec<ScanWarning>,
    ) -> Option<CosmicEvent> {
        let (sun, node) = match lunar.nodes.as_ref()? {
            Ok(pair) => *pair,
            Err((body, e)) => {
                warnings.push(warn(day.date, Some(*body), e));
                return None;
            }
        };

        let from_north = angular_separation(sun, node);
        let (distance, node_name) = if from_north <= 90.0 {
            (from_north, "North Node")
        } else {
            (180.0 - from_north, "South Node")
        };

        let (limit, kind, sign) = match lunar.phase {
            MoonPhase::NewMoon => (SOLAR_ECLIPSE_LIMIT, "Solar", ZodiacSign::from_longitude(sun)),
            _ => (
                LUNAR_ECLIPSE_LIMIT,
                "Lunar",
                ZodiacSign::from_longitude(normalize_degrees(sun + lunar.angle)),
            ),
        };
        if distance > limit {
            return None;
        }

        Some(CosmicEvent {
            date: day.instant,
            kind: CosmicEventKind::Eclipse,
            title: format!("{} {} Eclipse", lunar.phase.emoji(), kind),
            description: format!(
                "{} eclipse season: the {} in {} falls {:.1}° from the {}. Eclipses mark \
                 sudden turning points and endings that clear the way for new beginnings.",
                kind,
                lunar.phase.name(),
                sign,
                distance,
                node_name
            ),
            planet: None,
            sign: Some(sign),
        })
    }
}

fn days_of_year(year: i32) -> Result<Vec<NaiveDate>, CalendarError> {
    let invalid = || CalendarError::InvalidYear {
        year,
        min: MIN_YEAR,
        max: MAX_YEAR,
    };
    if !(MIN_YEAR..=MAX_YEAR).contains(&year) {
        return Err(invalid());
    }
    let first = NaiveDate::from_ymd_opt(year, 1, 1).ok_or_else(invalid)?;
    Ok(first.iter_days().take_while(|d| d.year() == year).collect())
}

fn noon_utc(date: NaiveDate) -> DateTime<Utc> {
    Utc.from_utc_datetime(&date.and_time(NaiveTime::MIN)) + Duration::hours(SAMPLE_HOUR as i64)
}

/// Smallest angle between two longitudes, in [0, 180].
fn angular_separation(a: f64, b: f64) -> f64 {
    let d = normalize_degrees(a - b);
    d.min(360.0 - d)
}

fn warn(date: NaiveDate, body: Option<Body>, error: &EphemerisError) -> ScanWarning {
    match body {
        Some(body) => log::warn!(
            "{}: {} not sampled, keeping previous state: {}",
            date,
            body,
            error
        ),
        None => log::warn!("{}: lunar phase not sampled: {}", date, error),
    }
    ScanWarning {
        date,
        body,
        message: error.to_string(),
    }
}

/// The three-point heuristic is coarser than the day-over-day flag, so it is
/// only reported for comparison.
fn log_station_hint(date: NaiveDate, sample: &RetrogradeSample, state: &BodyState) {
    let (Some(previous), Some(before_previous)) = (sample.previous_longitude, state.history[1])
    else {
        return;
    };
    let hint = station_hint(sample.longitude, previous, before_previous);
    log::debug!(
        "{}: {} station ({}), three-point hint {:?}",
        date,
        sample.body,
        if sample.retrograde { "retrograde" } else { "direct" },
        hint
    );
}

fn moon_phase_event(instant: DateTime<Utc>, lunar: &LunarDay) -> CosmicEvent {
    let name = match lunar.phase {
        MoonPhase::FullMoon => format!(
            "{} ({})",
            lunar.phase.name(),
            full_moon_name(instant.month())
        ),
        _ => lunar.phase.name().to_string(),
    };
    CosmicEvent {
        date: instant,
        kind: CosmicEventKind::MoonPhase,
        title: format!("{} {}", lunar.phase.emoji(), lunar.phase.name()),
        description: format!(
            "{} - {}% illuminated. A powerful time for intention setting and ritual work.",
            name,
            (lunar.illumination * 100.0).round() as i64
        ),
        planet: Some(Body::Moon),
        sign: None,
    }
}

fn ingress_event(
    instant: DateTime<Utc>,
    body: Body,
    from: ZodiacSign,
    to: ZodiacSign,
) -> CosmicEvent {
    CosmicEvent {
        date: instant,
        kind: CosmicEventKind::SignIngress,
        title: format!("{} enters {}", body, to),
        description: format!(
            "{} moves from {} into {}, bringing {} energy and themes.",
            body,
            from,
            to,
            to.quality()
        ),
        planet: Some(body),
        sign: Some(to),
    }
}

fn station_event(
    instant: DateTime<Utc>,
    body: Body,
    retrograde: bool,
    sign: ZodiacSign,
) -> CosmicEvent {
    let theme = body.display_name().to_lowercase();
    if retrograde {
        CosmicEvent {
            date: instant,
            kind: CosmicEventKind::RetrogradeStart,
            title: format!("🔴 {} Retrograde Begins", body),
            description: format!(
                "{} begins its retrograde motion in {}. A time for reflection, review, \
                 and revisiting {}-related themes.",
                body, sign, theme
            ),
            planet: Some(body),
            sign: Some(sign),
        }
    } else {
        CosmicEvent {
            date: instant,
            kind: CosmicEventKind::RetrogradeEnd,
            title: format!("🟢 {} Retrograde Ends", body),
            description: format!(
                "{} ends its retrograde motion and goes direct in {}. Forward momentum \
                 returns for {}-related matters.",
                body, sign, theme
            ),
            planet: Some(body),
            sign: Some(sign),
        }
    }
}
