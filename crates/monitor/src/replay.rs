//! Landmark replay
//!
//! Feeds recorded landmark frames (one JSON object per line) through the
//! tracker and writes one JSON evaluation per frame.

use alerting::AlertSink;
use dms::{DmsError, DrowsinessTracker, FaceLandmarks, Point};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use thiserror::Error;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt};
use tracing::{debug, warn};

#[derive(Error, Debug)]
pub enum ReplayError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("line {line}: malformed record: {source}")]
    Parse {
        line: usize,
        #[source]
        source: serde_json::Error,
    },

    #[error("line {line}: {source}")]
    Landmarks {
        line: usize,
        #[source]
        source: DmsError,
    },

    #[error("line {line}: invalid timestamp {value}")]
    Timestamp { line: usize, value: f64 },

    #[error("Failed to encode evaluation: {0}")]
    Encode(#[source] serde_json::Error),
}

/// One recorded frame
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReplayRecord {
    /// Seconds since stream start
    pub timestamp: f64,
    pub width: u32,
    pub height: u32,
    /// Full normalized face mesh, or null when no face was found
    #[serde(default)]
    pub landmarks: Option<Vec<[f32; 2]>>,
    /// Pre-extracted eye points, used when `landmarks` is absent
    #[serde(default)]
    pub eyes: Option<FaceLandmarks>,
}

impl ReplayRecord {
    /// Eye landmarks of this frame, `None` when no face was recorded
    pub fn face_landmarks(&self) -> Result<Option<FaceLandmarks>, DmsError> {
        match (&self.landmarks, self.eyes) {
            (Some(mesh), _) => {
                let points: Vec<Point> = mesh.iter().copied().map(Point::from).collect();
                FaceLandmarks::from_mesh(&points).map(Some)
            }
            (None, eyes) => Ok(eyes),
        }
    }
}

/// Totals over one replay
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ReplaySummary {
    pub frames: usize,
    pub faces: usize,
    pub drowsy_frames: usize,
    pub alerts: usize,
}

/// Replay every record from `reader`, writing evaluations to `writer`.
///
/// Blank lines are skipped. Sink failures are logged and do not stop the replay.
pub async fn replay<R, W, S>(
    reader: R,
    mut writer: W,
    tracker: &mut DrowsinessTracker,
    sink: &mut S,
) -> Result<ReplaySummary, ReplayError>
where
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
    S: AlertSink + ?Sized,
{
    let mut summary = ReplaySummary::default();
    let mut lines = reader.lines();
    let mut line = 0;

    while let Some(text) = lines.next_line().await? {
        line += 1;
        if text.trim().is_empty() {
            continue;
        }

        let record: ReplayRecord =
            serde_json::from_str(&text).map_err(|source| ReplayError::Parse { line, source })?;
        let landmarks = record
            .face_landmarks()
            .map_err(|source| ReplayError::Landmarks { line, source })?;
        let now = Duration::try_from_secs_f64(record.timestamp).map_err(|_| ReplayError::Timestamp {
            line,
            value: record.timestamp,
        })?;

        let eval = tracker.evaluate_frame_at(landmarks.as_ref(), record.width, record.height, now);
        debug!(line, ?eval, "Frame evaluated");

        summary.frames += 1;
        summary.faces += usize::from(eval.face_detected);
        summary.drowsy_frames += usize::from(eval.is_drowsy);

        let mut out = serde_json::to_vec(&eval).map_err(ReplayError::Encode)?;
        out.push(b'\n');
        writer.write_all(&out).await?;

        if let Some(event) = eval.alert_event() {
            summary.alerts += 1;
            if let Err(e) = sink.notify(&event) {
                warn!("Alert delivery failed at line {}: {}", line, e);
            }
        }
    }

    writer.flush().await?;
    Ok(summary)
}
