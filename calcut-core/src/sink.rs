//! Destinations for finished split units.

use std::path::{Path, PathBuf};

use crate::error::{CalcutError, CalcutResult};
use crate::split::SplitUnit;

/// Receives split units one at a time, in order.
pub trait UnitSink {
    fn write(&mut self, unit: &SplitUnit) -> CalcutResult<()>;
}

/// Hand every unit to `sink`, stopping at the first error.
///
/// Units written before the failure are left in place.
pub fn write_units<S: UnitSink + ?Sized>(units: &[SplitUnit], sink: &mut S) -> CalcutResult<()> {
    for unit in units {
        sink.write(unit)?;
    }
    Ok(())
}

/// Writes each unit to `{dir}/{filename}`.
#[derive(Debug)]
pub struct DirectorySink {
    dir: PathBuf,
    written: Vec<PathBuf>,
}

impl DirectorySink {
    /// Create the output directory (and parents) if needed.
    pub fn create(dir: impl Into<PathBuf>) -> CalcutResult<Self> {
        let dir = dir.into();
        std::fs::create_dir_all(&dir).map_err(|source| CalcutError::CreateDir {
            path: dir.clone(),
            source,
        })?;

        Ok(DirectorySink {
            dir,
            written: Vec::new(),
        })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Paths written so far, in order.
    pub fn written(&self) -> &[PathBuf] {
        &self.written
    }
}

impl UnitSink for DirectorySink {
    fn write(&mut self, unit: &SplitUnit) -> CalcutResult<()> {
        let path = self.dir.join(&unit.filename);
        std::fs::write(&path, &unit.content).map_err(|source| CalcutError::Write {
            path: path.clone(),
            source,
        })?;

        tracing::debug!(path = %path.display(), bytes = unit.byte_size, "Wrote unit");
        self.written.push(path);
        Ok(())
    }
}

/// Keeps units in memory, for callers that package or serve them themselves.
#[derive(Debug, Default)]
pub struct MemorySink {
    pub units: Vec<SplitUnit>,
}

impl UnitSink for MemorySink {
    fn write(&mut self, unit: &SplitUnit) -> CalcutResult<()> {
        self.units.push(unit.clone());
        Ok(())
    }
}
