//! Per-timestep particle snapshots and their sources.

use std::collections::BTreeMap;
use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};

use log::debug;
use serde::{Deserialize, Serialize};

use crate::error::{ExportError, ExportResult};

/// One recorded particle: a position in model coordinates.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Particle {
    /// Position as `[x, y, z]`.
    pub position: [f64; 3],
}

impl Particle {
    /// Creates a particle at the given position.
    pub fn new(x: f64, y: f64, z: f64) -> Self {
        Self {
            position: [x, y, z],
        }
    }
}

/// All particle positions recorded at one timestep, keyed by species id.
///
/// Species ids are kept in a sorted map so the exported document is
/// deterministic for a given snapshot.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    /// Particles per species.
    pub positions: BTreeMap<String, Vec<Particle>>,
}

impl Snapshot {
    /// Creates an empty snapshot.
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a particle for `species`.
    pub fn push(&mut self, species: impl Into<String>, particle: Particle) {
        self.positions
            .entry(species.into())
            .or_default()
            .push(particle);
    }

    /// Species ids present in this snapshot, in sorted order.
    pub fn species(&self) -> impl Iterator<Item = &str> {
        self.positions.keys().map(String::as_str)
    }

    /// Particles recorded for `species`. Empty if the species is absent.
    pub fn particles(&self, species: &str) -> &[Particle] {
        self.positions
            .get(species)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Total number of particles across all species.
    pub fn particle_count(&self) -> usize {
        self.positions.values().map(Vec::len).sum()
    }
}

/// Source of per-timestep particle snapshots.
///
/// The exporter asks for one frame at a time; implementations decide how
/// frames are stored and loaded.
pub trait SnapshotSource {
    /// Loads the snapshot for the given frame index.
    ///
    /// Fails with [`ExportError::MissingFrame`] when no snapshot was
    /// recorded for `index`.
    fn load(&self, index: usize) -> ExportResult<Snapshot>;
}

/// A trajectory backed by a JSON file holding the full frame sequence.
///
/// The file format is a JSON array with one snapshot object per frame,
/// each mapping species ids to particle records.
#[derive(Debug, Clone)]
pub struct JsonTrajectory {
    path: PathBuf,
    frames: Vec<Snapshot>,
}

impl JsonTrajectory {
    /// Opens and parses a trajectory file.
    pub fn open(path: impl AsRef<Path>) -> ExportResult<Self> {
        let path = path.as_ref().to_path_buf();
        let reader = BufReader::new(File::open(&path)?);
        let frames: Vec<Snapshot> = serde_json::from_reader(reader)?;
        debug!("loaded {} frames from {}", frames.len(), path.display());
        Ok(Self { path, frames })
    }

    /// Number of recorded frames.
    pub fn frame_count(&self) -> usize {
        self.frames.len()
    }

    /// The file this trajectory was read from.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl SnapshotSource for JsonTrajectory {
    fn load(&self, index: usize) -> ExportResult<Snapshot> {
        self.frames
            .get(index)
            .cloned()
            .ok_or(ExportError::MissingFrame(index))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_species_are_sorted() {
        let mut snapshot = Snapshot::new();
        snapshot.push("B", Particle::new(0.0, 0.0, 0.0));
        snapshot.push("A", Particle::new(1.0, 0.0, 0.0));
        snapshot.push("B", Particle::new(2.0, 0.0, 0.0));

        let species: Vec<&str> = snapshot.species().collect();
        assert_eq!(species, ["A", "B"]);
        assert_eq!(snapshot.particles("B").len(), 2);
        assert_eq!(snapshot.particle_count(), 3);
    }

    #[test]
    fn test_absent_species_has_no_particles() {
        let snapshot = Snapshot::new();
        assert!(snapshot.particles("missing").is_empty());
    }

    #[test]
    fn test_json_trajectory_loads_frames() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("run.traj.json");

        let mut frame = Snapshot::new();
        frame.push("A", Particle::new(1.0, 2.0, 3.0));
        let payload = serde_json::to_string(&vec![frame.clone()]).unwrap();
        std::fs::write(&path, payload).unwrap();

        let trajectory = JsonTrajectory::open(&path).unwrap();
        assert_eq!(trajectory.frame_count(), 1);
        assert_eq!(trajectory.load(0).unwrap(), frame);
        assert!(matches!(
            trajectory.load(1).unwrap_err(),
            ExportError::MissingFrame(1)
        ));
    }
}
