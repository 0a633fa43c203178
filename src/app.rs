//! Replay application: drives the detector from a recorded landmark stream.
//!
//! Input is JSON Lines, one record per line:
//!
//! ```text
//! {"type":"frame","landmarks":[{"x":0.41,"y":0.37}, ...]}
//! {"type":"frame","landmarks":null}
//! {"type":"reset_counters"}
//! {"type":"recalibrate"}
//! {"type":"configure","config":{"blink_delta":0.05}}
//! ```
//!
//! A frame with no `landmarks` means the upstream detector found no face.

use crate::{
    config::{Config, DetectionPatch},
    detector::{ExpressionDetector, FrameOutput},
    landmarks::{Expressions, LandmarkFrame},
    overlay::DebugOverlay,
    report, Error, Result,
};
use log::{debug, info};
use serde::{Deserialize, Serialize};
use std::io::{BufRead, Write};

/// One line of the replay stream
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum StreamRecord {
    /// A detection cycle; `None` when no face was found
    Frame {
        #[serde(default)]
        landmarks: Option<LandmarkFrame>,
    },
    /// Zero the event counters
    ResetCounters,
    /// Throw away the baseline and calibrate again
    Recalibrate,
    /// Change detection thresholds; omitted fields keep their current value
    Configure { config: DetectionPatch },
}

impl StreamRecord {
    /// Parse one JSON line
    ///
    /// # Errors
    ///
    /// Returns [`Error::Json`] if the line is not a valid record.
    pub fn parse(line: &str) -> Result<Self> {
        Ok(serde_json::from_str(line)?)
    }
}

/// Output format for per-frame results
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    /// Human-readable status line per frame
    Text,
    /// `FrameOutput` as one JSON object per frame
    Json,
}

/// Replay application configuration
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Per-frame output format
    pub format: OutputFormat,
    /// Surface size for debug overlay geometry (JSON output only)
    pub overlay: Option<(u32, u32)>,
    /// Suppress per-frame output and only report the summary
    pub quiet: bool,
    /// Detection and calibration settings
    pub detection: Config,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            format: OutputFormat::Text,
            overlay: None,
            quiet: false,
            detection: Config::default(),
        }
    }
}

/// Totals for a finished replay
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReplaySummary {
    /// Frame records processed, with or without a face
    pub frames: u64,
    /// Frame records without a face
    pub faceless_frames: u64,
    /// Command records applied
    pub commands: u64,
    /// Completed events per expression at the end of the stream
    pub counts: Expressions<u64>,
}

#[derive(Serialize)]
struct JsonFrame<'a> {
    frame: u64,
    #[serde(flatten)]
    output: &'a FrameOutput,
    #[serde(skip_serializing_if = "Option::is_none")]
    overlay: Option<DebugOverlay>,
}

/// Main application struct
pub struct ReplayApp {
    config: AppConfig,
    detector: ExpressionDetector,
}

impl ReplayApp {
    /// Create a replay application
    ///
    /// # Errors
    ///
    /// Returns [`Error::ConfigError`] if the detection settings are invalid.
    pub fn new(config: AppConfig) -> Result<Self> {
        info!("Initializing replay application");
        let detector = ExpressionDetector::from_config(&config.detection)?;
        Ok(Self { config, detector })
    }

    /// Run every record from `input`, writing per-frame results to `output`
    ///
    /// # Errors
    ///
    /// Stops at the first unreadable line, invalid record or malformed
    /// frame, reporting its line number.
    pub fn run<R: BufRead, W: Write>(&mut self, input: R, mut output: W) -> Result<ReplaySummary> {
        let mut summary = ReplaySummary {
            frames: 0,
            faceless_frames: 0,
            commands: 0,
            counts: Expressions::default(),
        };

        for (index, line) in input.lines().enumerate() {
            let line_number = index + 1;
            let line = line.map_err(|e| at_line(line_number, e.into()))?;
            if line.trim().is_empty() {
                continue;
            }

            let record = StreamRecord::parse(&line).map_err(|e| at_line(line_number, e))?;

            match record {
                StreamRecord::Frame { landmarks } => {
                    let result = self
                        .detector
                        .process(landmarks.as_ref())
                        .map_err(|e| at_line(line_number, e))?;
                    summary.frames += 1;
                    if !result.face_detected {
                        summary.faceless_frames += 1;
                    }
                    self.log_transitions(summary.frames, &result);
                    if !self.config.quiet {
                        self.write_frame(&mut output, summary.frames, &result, landmarks.as_ref())?;
                    }
                }
                StreamRecord::ResetCounters => {
                    summary.commands += 1;
                    self.detector.reset_counters();
                }
                StreamRecord::Recalibrate => {
                    summary.commands += 1;
                    self.detector.recalibrate();
                }
                StreamRecord::Configure { config: patch } => {
                    summary.commands += 1;
                    let config = patch.apply(self.detector.config());
                    config.validate().map_err(|e| at_line(line_number, e))?;
                    debug!("Detection config updated: {:?}", config);
                    self.detector.set_config(config);
                }
            }
        }

        summary.counts = self.detector.counts();
        output.flush()?;
        info!(
            "Replay finished: {} frames ({} without a face), {}",
            summary.frames,
            summary.faceless_frames,
            report::counts_line(&summary.counts)
        );
        Ok(summary)
    }

    fn log_transitions(&self, frame: u64, result: &FrameOutput) {
        if result.completed.blink || result.completed.mouth || result.completed.brow {
            info!("Frame {frame}: {}", report::counts_line(&result.counts));
        }
    }

    fn write_frame<W: Write>(
        &self,
        output: &mut W,
        frame: u64,
        result: &FrameOutput,
        landmarks: Option<&LandmarkFrame>,
    ) -> Result<()> {
        match self.config.format {
            OutputFormat::Text => writeln!(output, "{}", report::status_line(frame, result))?,
            OutputFormat::Json => {
                let overlay = match (self.config.overlay, landmarks) {
                    (Some((width, height)), Some(landmarks)) => Some(DebugOverlay::build(landmarks, width, height)?),
                    _ => None,
                };
                let record = JsonFrame {
                    frame,
                    output: result,
                    overlay,
                };
                serde_json::to_writer(&mut *output, &record)?;
                writeln!(output)?;
            }
        }
        Ok(())
    }

    /// The underlying detector
    #[must_use]
    pub fn detector(&self) -> &ExpressionDetector {
        &self.detector
    }
}

/// Prefix an error with the stream line it came from
fn at_line(line_number: usize, err: Error) -> Error {
    match err {
        Error::ConfigError(msg) => Error::ConfigError(format!("line {line_number}: {msg}")),
        other => Error::InvalidInput(format!("line {line_number}: {other}")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DetectionConfig;
    use crate::landmarks::tests::synthetic_face;

    fn frame_line(ear: f64, mar: f64, brow: f64) -> String {
        let record = StreamRecord::Frame {
            landmarks: Some(synthetic_face(ear, mar, brow)),
        };
        serde_json::to_string(&record).unwrap()
    }

    #[test]
    fn test_parse_commands() {
        assert_eq!(StreamRecord::parse(r#"{"type":"reset_counters"}"#).unwrap(), StreamRecord::ResetCounters);
        assert_eq!(StreamRecord::parse(r#"{"type":"recalibrate"}"#).unwrap(), StreamRecord::Recalibrate);
        assert_eq!(
            StreamRecord::parse(r#"{"type":"frame","landmarks":null}"#).unwrap(),
            StreamRecord::Frame { landmarks: None }
        );
        assert_eq!(
            StreamRecord::parse(r#"{"type":"frame"}"#).unwrap(),
            StreamRecord::Frame { landmarks: None }
        );
    }

    #[test]
    fn test_parse_partial_configure() {
        let record = StreamRecord::parse(r#"{"type":"configure","config":{"blink_delta":0.05}}"#).unwrap();
        let StreamRecord::Configure { config } = record else {
            panic!("expected configure record");
        };
        assert_eq!(config.blink_delta, Some(0.05));
        assert_eq!(config.min_on, None);
    }

    #[test]
    fn test_parse_configure_rejects_unknown_field() {
        assert!(StreamRecord::parse(r#"{"type":"configure","config":{"blink_dleta":0.05}}"#).is_err());
    }

    #[test]
    fn test_configure_keeps_unset_fields() {
        let mut detection = Config::default();
        detection.detection.min_on = 6;
        detection.detection.cooldown = 20;
        let config = AppConfig {
            detection,
            ..AppConfig::default()
        };
        let mut app = ReplayApp::new(config).unwrap();

        let input = r#"{"type":"configure","config":{"blink_delta":0.05}}"#;
        app.run(input.as_bytes(), Vec::new()).unwrap();

        let current = app.detector().config();
        assert_eq!(current.blink_delta, 0.05);
        assert_eq!(current.min_on, 6);
        assert_eq!(current.cooldown, 20);
        assert_eq!(current.mouth_delta, DetectionConfig::default().mouth_delta);
    }

    #[test]
    fn test_invalid_configure_names_line() {
        let input = format!("{}\n{}", frame_line(0.30, 0.10, 0.05), r#"{"type":"configure","config":{"min_off":0}}"#);
        let mut app = ReplayApp::new(AppConfig::default()).unwrap();
        let err = app.run(input.as_bytes(), Vec::new()).unwrap_err();
        assert!(matches!(&err, Error::ConfigError(msg) if msg.starts_with("line 2: ")));
        // The rejected patch is not applied.
        assert_eq!(app.detector().config().min_off, DetectionConfig::default().min_off);
    }

    #[test]
    fn test_parse_rejects_unknown_type() {
        assert!(StreamRecord::parse(r#"{"type":"explode"}"#).is_err());
    }

    #[test]
    fn test_run_text_output() {
        let mut lines = vec![frame_line(0.30, 0.10, 0.05); 3];
        lines.push(r#"{"type":"frame","landmarks":null}"#.to_string());
        lines.push(String::new());
        lines.push(r#"{"type":"reset_counters"}"#.to_string());
        let input = lines.join("\n");

        let mut app = ReplayApp::new(AppConfig::default()).unwrap();
        let mut out = Vec::new();
        let summary = app.run(input.as_bytes(), &mut out).unwrap();

        assert_eq!(summary.frames, 4);
        assert_eq!(summary.faceless_frames, 1);
        assert_eq!(summary.commands, 1);

        let text = String::from_utf8(out).unwrap();
        assert_eq!(text.lines().count(), 4);
        assert!(text.lines().next().unwrap().contains("Calibrating… 1/60"));
        assert!(text.lines().nth(3).unwrap().contains("no face"));
    }

    #[test]
    fn test_run_reports_bad_line() {
        let input = format!("{}\nnot json\n", frame_line(0.30, 0.10, 0.05));
        let mut app = ReplayApp::new(AppConfig::default()).unwrap();
        let err = app.run(input.as_bytes(), Vec::new()).unwrap_err();
        assert!(err.to_string().contains("line 2"));
    }

    #[test]
    fn test_run_json_with_overlay() {
        let input = frame_line(0.30, 0.10, 0.05);
        let config = AppConfig {
            format: OutputFormat::Json,
            overlay: Some((640, 480)),
            ..AppConfig::default()
        };
        let mut app = ReplayApp::new(config).unwrap();
        let mut out = Vec::new();
        app.run(input.as_bytes(), &mut out).unwrap();

        let value: serde_json::Value = serde_json::from_slice(&out).unwrap();
        assert_eq!(value["frame"], 1);
        assert_eq!(value["face_detected"], true);
        assert_eq!(value["overlay"]["circles"].as_array().unwrap().len(), 22);
    }

    #[test]
    fn test_quiet_suppresses_frames() {
        let input = frame_line(0.30, 0.10, 0.05);
        let config = AppConfig {
            quiet: true,
            ..AppConfig::default()
        };
        let mut app = ReplayApp::new(config).unwrap();
        let mut out = Vec::new();
        let summary = app.run(input.as_bytes(), &mut out).unwrap();
        assert!(out.is_empty());
        assert_eq!(summary.frames, 1);
    }
}
