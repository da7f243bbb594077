//! The BDML document writer.

use std::fmt::Write as _;
use std::fs;
use std::path::{Path, PathBuf};

use log::{debug, info};

use crate::error::ExportResult;
use crate::snapshot::SnapshotSource;

/// Default number of exported frames.
const DEFAULT_FRAMES: usize = 181;
/// Default simulated time between consecutive frames.
const DEFAULT_TIME_STEP: f64 = 0.5;

/// Configuration for an export run.
///
/// # Example
///
/// ```rust
/// use bdml_export::ExportConfig;
///
/// let config = ExportConfig::builder()
///     .with_frames(100)
///     .with_time_step(0.1)
///     .build();
/// assert_eq!(config.frames, 100);
/// ```
#[derive(Debug, Clone)]
pub struct ExportConfig {
    /// Number of frames to export.
    pub frames: usize,
    /// Simulated time between consecutive frames.
    pub time_step: f64,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            frames: DEFAULT_FRAMES,
            time_step: DEFAULT_TIME_STEP,
        }
    }
}

impl ExportConfig {
    /// Creates a new builder for ExportConfig.
    pub fn builder() -> ExportConfigBuilder {
        ExportConfigBuilder::default()
    }
}

/// Builder for [`ExportConfig`].
#[derive(Debug, Clone, Default)]
pub struct ExportConfigBuilder {
    frames: Option<usize>,
    time_step: Option<f64>,
}

impl ExportConfigBuilder {
    /// Sets the number of frames to export.
    pub fn with_frames(mut self, frames: usize) -> Self {
        self.frames = Some(frames);
        self
    }

    /// Sets the simulated time between consecutive frames.
    pub fn with_time_step(mut self, time_step: f64) -> Self {
        self.time_step = Some(time_step);
        self
    }

    /// Builds the config, falling back to defaults for unset fields.
    pub fn build(self) -> ExportConfig {
        let defaults = ExportConfig::default();
        ExportConfig {
            frames: self.frames.unwrap_or(defaults.frames),
            time_step: self.time_step.unwrap_or(defaults.time_step),
        }
    }
}

/// Serializes particle trajectory snapshots into a time-indexed BDML
/// document.
///
/// The exporter walks frame indices in order, pulls the snapshot for each
/// frame from its [`SnapshotSource`], and writes one time/measurement
/// block per frame. The document is write-only: it is handed to
/// downstream viewers and never parsed back.
#[derive(Debug)]
pub struct BdmlExporter<'a, S: SnapshotSource> {
    source: &'a S,
    config: ExportConfig,
}

impl<'a, S: SnapshotSource> BdmlExporter<'a, S> {
    /// Creates an exporter over `source` with the default configuration.
    pub fn new(source: &'a S) -> Self {
        Self::with_config(source, ExportConfig::default())
    }

    /// Creates an exporter with an explicit configuration.
    pub fn with_config(source: &'a S, config: ExportConfig) -> Self {
        Self { source, config }
    }

    /// Renders the full document as a string.
    ///
    /// Fails with [`ExportError::MissingFrame`](crate::ExportError) if the
    /// source runs out of snapshots before the configured frame count.
    pub fn render_document(&self) -> ExportResult<String> {
        let mut xml = String::new();
        writeln!(xml, r#"<?xml version="1.0" encoding="UTF-8"?>"#)?;
        writeln!(xml, "<component>")?;

        for index in 0..self.config.frames {
            let time = index as f64 * self.config.time_step;
            let snapshot = self.source.load(index)?;
            debug!(
                "frame {}: {} particles at t={}",
                index,
                snapshot.particle_count(),
                time
            );

            writeln!(xml, "  <time>{}</time>", time)?;
            writeln!(xml, "  <measurementList>")?;
            for species in snapshot.species() {
                writeln!(xml, "    <measurement>")?;
                writeln!(xml, "      <targetRef>{}</targetRef>", escape_text(species))?;
                for particle in snapshot.particles(species) {
                    let [x, y, z] = particle.position;
                    writeln!(xml, "      <point>{},{},{}</point>", x, y, z)?;
                }
                writeln!(xml, "    </measurement>")?;
            }
            writeln!(xml, "  </measurementList>")?;
        }

        writeln!(xml, "</component>")?;
        Ok(xml)
    }

    /// Renders the document and writes it next to the model file, with the
    /// model extension replaced by `.bdml`. Returns the output path.
    pub fn export(&self, model: &Path) -> ExportResult<PathBuf> {
        let document = self.render_document()?;
        let out = model.with_extension("bdml");
        fs::write(&out, &document)?;
        info!(
            "exported {} frames to {}",
            self.config.frames,
            out.display()
        );
        Ok(out)
    }
}

/// Escapes text content for markup output.
fn escape_text(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            _ => escaped.push(ch),
        }
    }
    escaped
}
