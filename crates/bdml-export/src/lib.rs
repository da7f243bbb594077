//! # bdml-export
//!
//! Serializes particle trajectory snapshots into a time-indexed BDML
//! document.
//!
//! The exporter iterates a fixed range of frame indices, pulls the
//! particle positions recorded at each step from a [`SnapshotSource`],
//! and writes one time/measurement block per step into a single markup
//! document saved next to the model file.
//!
//! ## Quick start
//!
//! ```no_run
//! use bdml_export::{BdmlExporter, ExportConfig, JsonTrajectory};
//! use std::path::Path;
//!
//! # fn main() -> Result<(), bdml_export::ExportError> {
//! let trajectory = JsonTrajectory::open("run.traj.json")?;
//! let config = ExportConfig::builder()
//!     .with_frames(trajectory.frame_count())
//!     .with_time_step(0.5)
//!     .build();
//!
//! let exporter = BdmlExporter::with_config(&trajectory, config);
//! let written = exporter.export(Path::new("run.dat"))?;
//! println!("wrote {}", written.display());
//! # Ok(())
//! # }
//! ```
//!
//! Any frame store can drive the exporter by implementing
//! [`SnapshotSource`]; [`JsonTrajectory`] is the bundled file-backed
//! source.

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

mod error;
mod exporter;
mod snapshot;

pub use error::{ExportError, ExportResult};
pub use exporter::{BdmlExporter, ExportConfig, ExportConfigBuilder};
pub use snapshot::{JsonTrajectory, Particle, Snapshot, SnapshotSource};
