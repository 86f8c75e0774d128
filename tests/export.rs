use std::fs;

use qspace::export::ExportError;
use qspace::export::elements::{ElementRow, ElementsReport, write_elements_csv, write_report};
use qspace::export::trajectory::{read_trajectory, read_trajectory_from, write_trajectory};
use qspace::export::writer_for_path;
use qspace::orbits::{CartesianState, KeplerianElements, state_to_elements};
use tempfile::tempdir;

const MU_EARTH: f64 = 398_600.441_8; // km^3 / s^2

#[test]
fn trajectory_rows_are_tab_separated_states() {
    let text = "7000\t0\t0\t0\t7.5\t0\n\n-6045.0\t-3490.0\t2500.0\t-3.457\t6.618\t2.533\n";
    let states = read_trajectory_from(text.as_bytes()).unwrap();
    assert_eq!(states.len(), 2);
    assert_eq!(states[0], CartesianState::new([7000.0, 0.0, 0.0], [0.0, 7.5, 0.0]));
    assert_eq!(states[1].velocity_km_s, [-3.457, 6.618, 2.533]);
}

#[test]
fn trajectory_files_round_trip() {
    let states = vec![
        CartesianState::new([7000.0, 0.0, 0.0], [0.0, 7.5, 0.0]),
        CartesianState::new([-6045.0, -3490.0, 2500.0], [-3.457, 6.618, 2.533]),
    ];
    let dir = tempdir().unwrap();
    let path = dir.path().join("nested").join("trajectory.txt");

    let mut writer = writer_for_path(&path).unwrap();
    write_trajectory(&mut writer, &states).unwrap();
    drop(writer);

    let text = fs::read_to_string(&path).unwrap();
    assert_eq!(text.lines().next(), Some("7000\t0\t0\t0\t7.5\t0"));
    assert_eq!(read_trajectory(&path).unwrap(), states);
}

#[test]
fn short_rows_report_their_line() {
    let text = "7000\t0\t0\t0\t7.5\t0\n7000\t0\t0\n";
    match read_trajectory_from(text.as_bytes()).unwrap_err() {
        ExportError::Row { line, message } => {
            assert_eq!(line, 2);
            assert!(message.contains("expected 6 columns"), "{message}");
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn non_numeric_fields_are_rejected() {
    let text = "7000\t0\t0\t0\tfast\t0\n";
    let err = read_trajectory_from(text.as_bytes()).unwrap_err();
    assert!(matches!(err, ExportError::Row { line: 1, .. }));
    assert!(err.to_string().contains("`fast`"));
}

#[test]
fn element_table_has_a_header_and_degree_angles() {
    let elements = KeplerianElements::from_degrees(7000.0, 0.1, 30.0, 45.0, 90.0, 180.0);
    let rows = vec![ElementRow::new(0, &elements), ElementRow::new(3, &elements)];

    let mut buffer = Vec::new();
    write_elements_csv(&mut buffer, &rows).unwrap();
    let text = String::from_utf8(buffer).unwrap();

    let mut reader = csv::Reader::from_reader(text.as_bytes());
    let headers = reader.headers().unwrap().clone();
    assert_eq!(
        headers.iter().collect::<Vec<_>>(),
        ["index", "a_km", "e", "i_deg", "raan_deg", "argp_deg", "nu_deg"]
    );

    let records: Vec<csv::StringRecord> = reader.records().map(Result::unwrap).collect();
    assert_eq!(records.len(), 2);
    assert_eq!(&records[1][0], "3");
    let i_deg: f64 = records[0][3].parse().unwrap();
    let nu_deg: f64 = records[0][6].parse().unwrap();
    assert!((i_deg - 30.0).abs() < 1e-9);
    assert!((nu_deg - 180.0).abs() < 1e-9);
}

#[test]
fn json_report_carries_state_elements_and_period() {
    let state = CartesianState::new([7000.0, 0.0, 0.0], [0.0, 7.5, 0.0]);
    let elements = state_to_elements(&state, MU_EARTH).unwrap();
    let report = ElementsReport::new("Earth", MU_EARTH, state, elements);

    let mut buffer = Vec::new();
    write_report(&mut buffer, &report).unwrap();
    let json: serde_json::Value = serde_json::from_slice(&buffer).unwrap();

    assert_eq!(json["body"], "Earth");
    assert_eq!(json["state"]["position_km"][0], 7000.0);
    assert_eq!(json["elements"]["i"], 0.0);
    assert!((json["degrees"]["theta"].as_f64().unwrap() - 180.0).abs() < 1e-9);
    let period = json["period_s"].as_f64().unwrap();
    assert!(period > 5000.0 && period < 6000.0, "period = {period}");
}

#[test]
fn hyperbolic_report_has_no_period() {
    let elements = KeplerianElements::new(-20_000.0, 1.5, 0.5, 1.0, 2.0, 0.7);
    let state = qspace::orbits::elements_to_state(&elements, MU_EARTH).unwrap();
    let report = ElementsReport::new("Earth", MU_EARTH, state, elements);

    let mut buffer = Vec::new();
    write_report(&mut buffer, &report).unwrap();
    let json: serde_json::Value = serde_json::from_slice(&buffer).unwrap();
    assert!(json["period_s"].is_null());
}
