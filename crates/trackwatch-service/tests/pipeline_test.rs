//! End-to-end pipeline tests: event records in, notification records out.

use chrono::{DateTime, TimeZone, Utc};
use geo::{point, Geometry};
use std::sync::Arc;
use std::thread;
use trackwatch_events::{EventRecord, Field, FieldTag, FieldValue};
use trackwatch_service::{AppConfig, Application};

const LON: f64 = -117.19;
const LAT: f64 = 34.05;
// Roughly 200 ft of latitude displacement.
const LAT_200FT: f64 = LAT + 0.00055;

fn ts(offset_secs: i64) -> DateTime<Utc> {
    Utc.timestamp_opt(1_700_000_000 + offset_secs, 0).unwrap()
}

fn record(track: &str, offset_secs: i64, lat: f64) -> EventRecord {
    EventRecord::new("acme", "vehicle-positions")
        .with_field(Field::tagged(
            "unit",
            FieldTag::TrackId,
            FieldValue::String(track.into()),
        ))
        .with_field(Field::tagged(
            "position",
            FieldTag::Geometry,
            FieldValue::Geometry(Geometry::Point(point!(x: LON, y: lat))),
        ))
        .with_field(Field::tagged(
            "reported",
            FieldTag::StartTime,
            FieldValue::Timestamp(ts(offset_secs)),
        ))
        .with_field(Field::new("speed", FieldValue::Double(0.0)))
}

fn app(toml: &str) -> Application {
    let config: AppConfig = toml::from_str(toml).unwrap();
    Application::new(config).unwrap()
}

#[test]
fn on_change_pipeline_scenario() {
    let app = app("");

    // Seeding observation produces nothing.
    assert!(app.handle_record(&record("truck-1", 0, LAT)).is_none());

    // Exactly at the 300s limit: idle start.
    let started = app
        .handle_record(&record("truck-1", 300, LAT))
        .expect("idle start");
    assert_eq!(started.schema, "TrackIdle");
    assert_eq!(started.track_id(), Some("truck-1"));
    assert_eq!(started.field("idle").unwrap().value, FieldValue::Bool(true));
    assert_eq!(
        started.field("idleDuration").unwrap().value,
        FieldValue::Double(300.0)
    );
    assert_eq!(
        started.field("idleStart").unwrap().value,
        FieldValue::Timestamp(ts(0))
    );
    // Minimal policy drops caller-supplied extras.
    assert!(started.field("speed").is_none());

    // Still idle under OnChange: silent.
    assert!(app.handle_record(&record("truck-1", 400, LAT)).is_none());

    // Movement ends the episode.
    let ended = app
        .handle_record(&record("truck-1", 450, LAT_200FT))
        .expect("idle end");
    assert_eq!(ended.field("idle").unwrap().value, FieldValue::Bool(false));
    assert_eq!(
        ended.field("idleDuration").unwrap().value,
        FieldValue::Double(400.0)
    );
}

#[test]
fn keep_all_policy_copies_triggering_fields() {
    let app = app(
        r#"
        [pipeline]
        field_policy = "keep_all"
        "#,
    );

    app.handle_record(&record("truck-1", 0, LAT));
    let started = app.handle_record(&record("truck-1", 300, LAT)).unwrap();

    assert!(started.field("speed").is_some());
    assert_eq!(started.track_id(), Some("truck-1"));
    assert_eq!(
        started.field("idleDuration").unwrap().value,
        FieldValue::Double(300.0)
    );
}

#[test]
fn malformed_records_are_dropped_not_fatal() {
    let app = app("");

    // No geometry field at all.
    let no_geometry = EventRecord::new("acme", "fleet")
        .with_field(Field::tagged(
            "unit",
            FieldTag::TrackId,
            FieldValue::String("truck-1".into()),
        ))
        .with_field(Field::tagged(
            "reported",
            FieldTag::StartTime,
            FieldValue::Timestamp(ts(0)),
        ));
    assert!(app.handle_record(&no_geometry).is_none());

    // The pipeline keeps working afterwards.
    assert!(app.handle_record(&record("truck-1", 0, LAT)).is_none());
    assert!(app.handle_record(&record("truck-1", 300, LAT)).is_some());
}

#[test]
fn non_point_geometry_rejects_single_observation() {
    let app = app("");
    app.handle_record(&record("truck-1", 0, LAT));

    let mut polygonal = record("truck-1", 300, LAT);
    polygonal.set(Field::tagged(
        "position",
        FieldTag::Geometry,
        FieldValue::Geometry(Geometry::MultiPoint(geo::MultiPoint(vec![]))),
    ));
    assert!(app.handle_record(&polygonal).is_none());

    // State was not corrupted: the limit crossing still fires off the
    // original anchor.
    let started = app.handle_record(&record("truck-1", 300, LAT)).unwrap();
    assert_eq!(
        started.field("idleDuration").unwrap().value,
        FieldValue::Double(300.0)
    );
}

#[test]
fn concurrent_tracks_never_interleave_state() {
    let app = Arc::new(app(""));

    let mut handles = Vec::new();
    for (track, lat_step) in [("truck-1", 0.0), ("truck-2", 0.01)] {
        let app = app.clone();
        handles.push(thread::spawn(move || {
            let mut notifications = 0;
            for i in 0..50 {
                // truck-1 is stationary; truck-2 jumps far on every report.
                let lat = LAT + lat_step * i as f64;
                if app.handle_record(&record(track, i * 60, lat)).is_some() {
                    notifications += 1;
                }
            }
            (track, notifications)
        }));
    }

    for handle in handles {
        let (track, notifications) = handle.join().unwrap();
        match track {
            // Stationary: exactly one idle-start under OnChange.
            "truck-1" => assert_eq!(notifications, 1),
            // Always moving: never classified idle.
            "truck-2" => assert_eq!(notifications, 0),
            _ => unreachable!(),
        }
    }

    let store = app.detector().store();
    assert_eq!(store.len(), 2);
}

#[test]
fn invalid_configuration_refuses_to_start() {
    let config: AppConfig = toml::from_str(
        r#"
        [detector]
        idle_limit_secs = 0
        "#,
    )
    .unwrap();
    assert!(Application::new(config).is_err());
}
