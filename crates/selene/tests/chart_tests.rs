mod common;

use common::{FailingDays, ModelEphemeris};
use selene::chart::{BirthChartAssembler, ChartError, ChartRequest};
use selene::ephemeris::{Body, EphemerisError, SwissEphemerisAdapter};
use selene::time::{Observer, ResolveOptions, TimeError};
use selene::zodiac::ZodiacSign;

fn london() -> Observer {
    Observer::new(51.5074, -0.1278, 0.0).unwrap()
}

#[test]
fn test_placements_stay_in_range() {
    let assembler = BirthChartAssembler::new(ModelEphemeris);
    for year in [1901, 1950, 1994, 2000, 2024, 2099] {
        for (month, time) in [(1, "00:00"), (4, "06:15"), (7, "12:00"), (10, "23:59")] {
            let request = ChartRequest::new(
                format!("{}-{:02}-15", year, month),
                ResolveOptions::new().with_time(time).with_timezone("Europe/London"),
            );
            let chart = assembler.generate_birth_chart(&request).unwrap();
            for p in &chart.placements {
                assert!(
                    (0.0..360.0).contains(&p.ecliptic_longitude),
                    "{} at {}",
                    p.body,
                    p.ecliptic_longitude
                );
                assert!(p.placement.degree < 30);
                assert!(p.placement.minute < 60);
                assert_eq!(p.placement.sign, ZodiacSign::from_longitude(p.ecliptic_longitude));
            }
        }
    }
}

#[test]
fn test_chart_contains_every_body() {
    let assembler = BirthChartAssembler::new(ModelEphemeris);
    let chart = assembler
        .generate_birth_chart(&ChartRequest::new("2000-06-15", ResolveOptions::new()))
        .unwrap();
    assert!(chart.is_complete());
    assert_eq!(chart.placements.len(), 20);
    for body in Body::CHART {
        assert!(chart.body(body).is_some(), "{} missing", body);
    }
}

#[test]
fn test_identical_requests_are_bit_identical() {
    let assembler = BirthChartAssembler::new(ModelEphemeris);
    let request = ChartRequest::new(
        "1987-03-21",
        ResolveOptions::new()
            .with_time("04:30")
            .with_timezone("America/New_York")
            .with_observer(Observer::new(40.7128, -74.006, 10.0).unwrap()),
    );
    let a = assembler.generate_birth_chart_with_houses(&request).unwrap();
    let b = assembler.generate_birth_chart_with_houses(&request).unwrap();
    assert_eq!(a, b);
    for (x, y) in a.planets.iter().zip(&b.planets) {
        assert_eq!(x.ecliptic_longitude.to_bits(), y.ecliptic_longitude.to_bits());
    }
}

#[test]
fn test_houses_start_at_ascendant_and_follow_zodiac() {
    let assembler = BirthChartAssembler::new(ModelEphemeris);
    for hour in 0..24 {
        let request = ChartRequest::new(
            "2010-09-01",
            ResolveOptions::new()
                .with_time(format!("{:02}:00", hour))
                .with_observer(london()),
        );
        let chart = assembler.generate_birth_chart_with_houses(&request).unwrap();
        let asc = chart.body(Body::Ascendant).unwrap();
        assert_eq!(chart.houses[0].sign, asc.placement.sign);
        for i in 0..11 {
            assert_eq!(chart.houses[i + 1].sign, chart.houses[i].sign.next());
        }
        assert_eq!(chart.houses[11].sign.next(), chart.houses[0].sign);

        assert_eq!(asc.house, Some(1));
        for p in &chart.planets {
            if p.body.is_angle() {
                assert!(!p.retrograde);
            }
            let house = p.house.unwrap() as usize;
            assert!((1..=12).contains(&house));
            assert_eq!(chart.houses[house - 1].sign, p.placement.sign);
        }
    }
}

#[test]
fn test_every_placement_has_a_house() {
    let request = ChartRequest::new(
        "1994-01-20",
        ResolveOptions::new()
            .with_time("01:00")
            .with_timezone("Europe/London")
            .with_observer(london()),
    );
    let chart = BirthChartAssembler::new(ModelEphemeris)
        .generate_birth_chart_with_houses(&request)
        .unwrap();
    let missing: Vec<Body> = chart
        .planets
        .iter()
        .filter(|p| p.house.is_none())
        .map(|p| p.body)
        .collect();
    assert!(missing.is_empty(), "placements without house: {:?}", missing);
    assert_eq!(chart.body(Body::Ascendant).unwrap().house, Some(1));

    let mc = chart.body(Body::Midheaven).unwrap();
    let expected = chart
        .houses
        .iter()
        .find(|h| h.sign == mc.placement.sign)
        .map(|h| h.number);
    assert_eq!(mc.house, expected);
}

#[test]
fn test_defaults_are_noon_utc_at_greenwich() {
    let chart = BirthChartAssembler::new(ModelEphemeris)
        .generate_birth_chart(&ChartRequest::new("2000-01-01", ResolveOptions::new()))
        .unwrap();
    assert_eq!(chart.instant.to_rfc3339(), "2000-01-01T12:00:00+00:00");
    assert_eq!(chart.observer, Observer::GREENWICH);
}

#[test]
fn test_caller_errors_surface_unchanged() {
    let assembler = BirthChartAssembler::new(ModelEphemeris);

    let err = assembler
        .generate_birth_chart(&ChartRequest::new(
            "15/06/2000",
            ResolveOptions::new().with_time("12:00"),
        ))
        .unwrap_err();
    assert!(matches!(err, ChartError::Time(TimeError::InvalidDateFormat { .. })));

    let err = assembler
        .generate_birth_chart(&ChartRequest::new(
            "2000-06-15",
            ResolveOptions::new().with_time("25:00"),
        ))
        .unwrap_err();
    assert!(matches!(err, ChartError::Time(TimeError::InvalidTimeFormat { .. })));
}

#[test]
fn test_sample_failure_is_atomic() {
    let provider = FailingDays {
        body: Body::Sun,
        dates: vec![common::date(2000, 6, 14)],
    };
    // The failing date is the retrograde reference day, not the chart day
    let err = BirthChartAssembler::new(&provider)
        .generate_birth_chart_with_houses(&ChartRequest::new("2000-06-15", ResolveOptions::new()))
        .unwrap_err();
    assert!(matches!(
        err,
        ChartError::Ephemeris(EphemerisError::SampleFailed { body: Body::Sun, .. })
    ));
}

#[test]
fn test_chart_json_shape() {
    let chart = BirthChartAssembler::new(ModelEphemeris)
        .generate_birth_chart_with_houses(&ChartRequest::new("2000-06-15", ResolveOptions::new()))
        .unwrap();
    let json = serde_json::to_value(&chart).unwrap();
    let sun = &json["planets"][0];
    assert_eq!(sun["body"], "Sun");
    assert!(sun["eclipticLongitude"].is_number());
    assert!(sun["sign"].is_string());
    assert!(sun["degree"].is_number());
    assert!(sun["house"].is_number());
    assert_eq!(json["houses"].as_array().unwrap().len(), 12);
    let node = json["planets"]
        .as_array()
        .unwrap()
        .iter()
        .find(|p| p["body"] == "North Node");
    assert!(node.is_some());
}

#[test]
#[ignore] // Requires Swiss Ephemeris files
fn test_london_1994_sun_on_capricorn_cusp() {
    let adapter = SwissEphemerisAdapter::new(None).unwrap();
    let request = ChartRequest::new(
        "1994-01-20",
        ResolveOptions::new()
            .with_time("01:00")
            .with_timezone("Europe/London")
            .with_observer(london()),
    );
    let chart = BirthChartAssembler::new(&adapter)
        .generate_birth_chart_with_houses(&request)
        .unwrap();
    let sun = chart.body(Body::Sun).unwrap();
    assert_eq!(sun.placement.sign, ZodiacSign::Capricorn);
    assert!((sun.ecliptic_longitude - 299.74).abs() < 0.5);
    assert_eq!(sun.placement.degree, 29);
    assert_eq!(chart.houses[0].sign, chart.body(Body::Ascendant).unwrap().placement.sign);
}
