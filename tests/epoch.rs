use chrono::{TimeZone, Utc};
use qspace::epoch::{
    CalendarTimestamp, EpochError, days_since_j2000, julian_date, julian_date_from_unix,
    modified_julian_date,
};

fn assert_jd(ts: CalendarTimestamp, expected: f64) {
    let jd = julian_date(&ts);
    assert!(
        (jd - expected).abs() < 1e-9,
        "{ts}: expected {expected}, got {jd}"
    );
}

#[test]
fn reference_epochs() {
    assert_jd(CalendarTimestamp::new(2000, 1, 1, 12, 0, 0.0), 2_451_545.0);
    assert_jd(CalendarTimestamp::new(1970, 1, 1, 0, 0, 0.0), 2_440_587.5);
    assert_jd(CalendarTimestamp::new(1858, 11, 17, 0, 0, 0.0), 2_400_000.5);
    assert_jd(CalendarTimestamp::new(2015, 1, 1, 0, 0, 0.0), 2_457_023.5);
}

#[test]
fn leap_day_afternoon() {
    assert_jd(
        CalendarTimestamp::new(2024, 2, 29, 18, 30, 0.0),
        2_460_370.270_833_333_5,
    );
}

#[test]
fn fractional_seconds_reach_the_day_fraction() {
    assert_jd(
        CalendarTimestamp::new(1999, 12, 31, 23, 59, 59.5),
        2_451_544.499_994_212_8,
    );
}

#[test]
fn consecutive_days_differ_by_one() {
    let pairs = [
        ((2023, 12, 31), (2024, 1, 1)),
        ((2024, 2, 28), (2024, 2, 29)),
        ((2024, 2, 29), (2024, 3, 1)),
        ((1900, 2, 28), (1900, 3, 1)),
    ];
    for ((y0, m0, d0), (y1, m1, d1)) in pairs {
        let before = julian_date(&CalendarTimestamp::new(y0, m0, d0, 6, 0, 0.0));
        let after = julian_date(&CalendarTimestamp::new(y1, m1, d1, 6, 0, 0.0));
        assert!((after - before - 1.0).abs() < 1e-9, "{y0}-{m0}-{d0}");
    }
}

#[test]
fn modified_and_j2000_offsets() {
    let ts = CalendarTimestamp::new(2000, 1, 1, 12, 0, 0.0);
    assert!((modified_julian_date(&ts) - 51_544.5).abs() < 1e-9);
    assert_eq!(days_since_j2000(&ts), 0.0);

    let mjd_epoch = CalendarTimestamp::new(1858, 11, 17, 0, 0, 0.0);
    assert_eq!(modified_julian_date(&mjd_epoch), 0.0);
}

#[test]
fn chrono_instants_convert_to_calendar_fields() {
    let dt = Utc.with_ymd_and_hms(2024, 2, 29, 18, 30, 15).unwrap();
    let ts = CalendarTimestamp::from_datetime(&dt);
    assert_eq!(ts, CalendarTimestamp::new(2024, 2, 29, 18, 30, 15.0));
    assert_eq!(ts.julian_date(), julian_date(&ts));
}

#[test]
fn unix_seconds_map_to_julian_dates() {
    assert!((julian_date_from_unix(0).unwrap() - 2_440_587.5).abs() < 1e-9);
    assert!((julian_date_from_unix(946_728_000).unwrap() - 2_451_545.0).abs() < 1e-9);

    let ts = CalendarTimestamp::from_unix_seconds(1_420_070_400).unwrap();
    assert_eq!(ts, CalendarTimestamp::new(2015, 1, 1, 0, 0, 0.0));
}

#[test]
fn unix_seconds_outside_chrono_range_are_rejected() {
    let err = CalendarTimestamp::from_unix_seconds(i64::MAX).unwrap_err();
    assert!(matches!(err, EpochError::OutOfRange(i64::MAX)));
}

#[test]
fn rfc3339_timestamps_parse_and_display() {
    let ts: CalendarTimestamp = "2000-01-01T12:00:00Z".parse().unwrap();
    assert_eq!(ts.julian_date(), 2_451_545.0);
    assert_eq!(ts.to_string(), "2000-01-01T12:00:00.000000Z");

    // offsets are folded into UTC
    let shifted: CalendarTimestamp = "2000-01-01T14:00:00+02:00".parse().unwrap();
    assert_eq!(shifted, ts);

    let fractional: CalendarTimestamp = "1999-12-31T23:59:59.5Z".parse().unwrap();
    assert_eq!(fractional.second, 59.5);

    assert!(matches!(
        "yesterday".parse::<CalendarTimestamp>(),
        Err(EpochError::Parse(_))
    ));
}
