//! Command-line interface for writing batches of synthetic patches to disk

use crate::analysis::mosaic::{MosaicOptions, mosaic};
use crate::io::configuration::{
    DEFAULT_PATCH_COUNT, DEFAULT_PATCH_SIZE, MOSAIC_SUFFIX, OUTPUT_EXTENSION,
};
use crate::io::error::{PatchError, Result, io_error};
use crate::io::image::{persist, persist_plane};
use crate::io::progress::ProgressManager;
use crate::spatial::raster::validate_size;
use crate::synthesis::{PatchGenerator, PatchKind};
use clap::{Parser, ValueEnum};
use ndarray::Axis;
use std::path::{Path, PathBuf};

/// Which patch kinds a batch contains
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum KindSelection {
    /// Only sine gratings
    Sine,
    /// Only strokes
    Stroke,
    /// Only ellipses
    Ellipse,
    /// Cycle through sine, stroke and ellipse
    All,
}

impl KindSelection {
    /// Kind of the patch at a batch index
    pub const fn kind_at(self, index: usize) -> PatchKind {
        match self {
            Self::Sine => PatchKind::Sine,
            Self::Stroke => PatchKind::Stroke,
            Self::Ellipse => PatchKind::Ellipse,
            Self::All => match index % 3 {
                0 => PatchKind::Sine,
                1 => PatchKind::Stroke,
                _ => PatchKind::Ellipse,
            },
        }
    }
}

#[derive(Parser, Debug)]
#[command(name = "patchsynth")]
#[command(
    author,
    version,
    about = "Generate synthetic sine, stroke and ellipse image patches"
)]
/// Command-line arguments for the patch generation tool
pub struct Cli {
    /// Directory the patches are written to
    #[arg(value_name = "OUTPUT_DIR")]
    pub output: PathBuf,

    /// Patch kinds to generate
    #[arg(short, long, value_enum, default_value_t = KindSelection::All)]
    pub kind: KindSelection,

    /// Patch edge length in pixels
    #[arg(short, long, default_value_t = DEFAULT_PATCH_SIZE)]
    pub size: usize,

    /// Number of patches to generate
    #[arg(short = 'n', long, default_value_t = DEFAULT_PATCH_COUNT)]
    pub count: usize,

    /// Random seed for reproducible generation (OS entropy when omitted)
    #[arg(long)]
    pub seed: Option<u64>,

    /// Suppress progress output
    #[arg(short, long)]
    pub quiet: bool,

    /// Overwrite patches that already exist
    #[arg(long)]
    pub no_skip: bool,

    /// Also write a Bayer-mosaicked grayscale companion for every patch
    #[arg(short, long)]
    pub mosaic: bool,
}

impl Cli {
    /// Check if existing output files should be skipped
    pub const fn skip_existing(&self) -> bool {
        !self.no_skip
    }

    /// Check if progress should be displayed
    pub const fn should_show_progress(&self) -> bool {
        !self.quiet
    }
}

/// Counts reported after a batch completes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BatchSummary {
    /// Patches written to disk
    pub written: usize,
    /// Patches whose output already existed
    pub skipped: usize,
}

/// Generates a batch of patches and writes them to the output directory
pub struct BatchWriter {
    cli: Cli,
    generator: PatchGenerator,
    progress: ProgressManager,
}

impl BatchWriter {
    /// Create a batch writer from parsed CLI arguments
    pub fn new(cli: Cli) -> Self {
        let generator = PatchGenerator::seeded(cli.seed);
        let progress = if cli.should_show_progress() {
            ProgressManager::new()
        } else {
            ProgressManager::hidden()
        };

        Self {
            cli,
            generator,
            progress,
        }
    }

    /// Generate and write every patch of the batch
    ///
    /// # Errors
    ///
    /// Returns an error if the size is invalid, the output path is not a
    /// directory, or any patch cannot be written
    pub fn process(&mut self) -> Result<BatchSummary> {
        validate_size(self.cli.size)?;
        self.prepare_output_dir()?;

        self.progress.initialize(self.cli.count);

        for index in 0..self.cli.count {
            let kind = self.cli.kind.kind_at(index);
            // Generate even when skipping so patch N is the same on every run
            let patch = self.generator.generate(kind, self.cli.size)?;

            let path = Self::output_path(&self.cli.output, kind, index);
            let name = path
                .file_name()
                .unwrap_or_default()
                .to_string_lossy()
                .to_string();

            if self.cli.skip_existing() && path.exists() {
                log::info!("Skipping: {} (output exists)", path.display());
                self.progress.skip_patch(&name);
                continue;
            }

            persist(&patch, &path)?;

            if self.cli.mosaic {
                let sampled = mosaic(&patch, MosaicOptions::default())?;
                let plane = sampled.index_axis(Axis(2), 0).to_owned();
                persist_plane(&plane, Self::mosaic_path(&self.cli.output, kind, index))?;
            }

            self.progress.complete_patch(&name);
        }

        self.progress.finish();

        let summary = BatchSummary {
            written: self.progress.written(),
            skipped: self.progress.skipped(),
        };
        log::info!(
            "Batch complete in {}: {} written, {} skipped",
            self.cli.output.display(),
            summary.written,
            summary.skipped
        );
        Ok(summary)
    }

    fn prepare_output_dir(&self) -> Result<()> {
        let dir = &self.cli.output;
        if dir.exists() && !dir.is_dir() {
            return Err(io_error("Output path must be a directory"));
        }
        std::fs::create_dir_all(dir).map_err(|e| PatchError::FileSystem {
            path: dir.clone(),
            operation: "create directory",
            source: e,
        })
    }

    /// Path of the patch at a batch index
    pub fn output_path(dir: &Path, kind: PatchKind, index: usize) -> PathBuf {
        dir.join(format!("{kind}_{index:05}.{OUTPUT_EXTENSION}"))
    }

    /// Path of the mosaic companion of the patch at a batch index
    pub fn mosaic_path(dir: &Path, kind: PatchKind, index: usize) -> PathBuf {
        dir.join(format!(
            "{kind}_{index:05}{MOSAIC_SUFFIX}.{OUTPUT_EXTENSION}"
        ))
    }
}
