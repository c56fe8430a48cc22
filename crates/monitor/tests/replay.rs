use alerting::{AlertError, AlertEvent, AlertSink, LogAlertSink};
use dms::detector::mesh_indices;
use dms::{DmsConfig, DrowsinessTracker, FrameEvaluation};
use monitor::{replay, ReplayError};
use serde_json::json;

/// Normalized Face Mesh whose eyes both measure `ear` on a 640x480 frame
fn mesh(ear: f32) -> Vec<[f32; 2]> {
    let half = ear * 64.0 / 480.0 / 2.0;
    let eye = [
        [0.4, 0.5],
        [0.425, 0.5 - half],
        [0.475, 0.5 - half],
        [0.5, 0.5],
        [0.475, 0.5 + half],
        [0.425, 0.5 + half],
    ];
    let mut points = vec![[0.5, 0.5]; 478];
    for indices in [mesh_indices::LEFT_EYE, mesh_indices::RIGHT_EYE] {
        for (&idx, &p) in indices.iter().zip(eye.iter()) {
            points[idx] = p;
        }
    }
    points
}

fn line(timestamp: f64, ear: Option<f32>) -> String {
    json!({
        "timestamp": timestamp,
        "width": 640,
        "height": 480,
        "landmarks": ear.map(mesh),
    })
    .to_string()
}

fn tracker() -> DrowsinessTracker {
    DrowsinessTracker::new(DmsConfig {
        consecutive_frames: 3,
        cooldown_seconds: 3.0,
        ..Default::default()
    })
}

fn parse_output(out: &[u8]) -> Vec<FrameEvaluation> {
    std::str::from_utf8(out)
        .unwrap()
        .lines()
        .map(|l| serde_json::from_str(l).unwrap())
        .collect()
}

#[tokio::test]
async fn test_replay_scenario() {
    let input = [
        line(0.0, Some(0.15)),
        line(1.0, Some(0.15)),
        String::new(),
        line(2.0, Some(0.15)),
        line(2.5, Some(0.15)),
        line(3.0, None),
    ]
    .join("\n");

    let mut out = Vec::new();
    let mut sink = LogAlertSink::new();
    let mut tracker = tracker();
    let summary = replay(input.as_bytes(), &mut out, &mut tracker, &mut sink)
        .await
        .unwrap();

    assert_eq!(summary.frames, 5);
    assert_eq!(summary.faces, 4);
    assert_eq!(summary.drowsy_frames, 2);
    assert_eq!(summary.alerts, 1);
    assert_eq!(sink.delivered(), 1);

    let evals = parse_output(&out);
    assert_eq!(evals.len(), 5);
    let fired: Vec<bool> = evals.iter().map(|e| e.alert_fired).collect();
    assert_eq!(fired, vec![false, false, true, false, false]);
    assert!((evals[0].ear.unwrap() - 0.15).abs() < 1e-4);
    assert!(!evals[4].face_detected);
    assert_eq!(evals[4].ear, None);
}

struct BrokenSpeaker;

impl AlertSink for BrokenSpeaker {
    fn notify(&mut self, _event: &AlertEvent) -> Result<(), AlertError> {
        Err(AlertError::Unavailable)
    }
}

#[tokio::test]
async fn test_sink_failure_does_not_stop_replay() {
    let input = [0.0, 1.0, 2.0, 6.0]
        .iter()
        .map(|&t| line(t, Some(0.1)))
        .collect::<Vec<_>>()
        .join("\n");

    let mut out = Vec::new();
    let summary = replay(input.as_bytes(), &mut out, &mut tracker(), &mut BrokenSpeaker)
        .await
        .unwrap();

    assert_eq!(summary.frames, 4);
    assert_eq!(summary.alerts, 2);
}

#[tokio::test]
async fn test_malformed_line_reports_line_number() {
    let input = format!("{}\n{{not json}}\n", line(0.0, None));

    let mut out = Vec::new();
    let err = replay(input.as_bytes(), &mut out, &mut tracker(), &mut LogAlertSink::new())
        .await
        .unwrap_err();

    assert!(matches!(err, ReplayError::Parse { line: 2, .. }), "{err}");
}

#[tokio::test]
async fn test_negative_timestamp_rejected() {
    let input = line(-1.0, Some(0.3));

    let mut out = Vec::new();
    let err = replay(input.as_bytes(), &mut out, &mut tracker(), &mut LogAlertSink::new())
        .await
        .unwrap_err();

    assert!(matches!(err, ReplayError::Timestamp { line: 1, .. }));
}
