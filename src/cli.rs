//! Batch front door.
//!
//! `run` takes an output directory and a list of inputs, and generates one
//! atomic-family source per input file, strictly in order. The first failure
//! aborts the batch; files written before it are left in place and reported
//! alongside the error.

use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

use thiserror::Error;
use walkdir::WalkDir;

use queuegen_core::config::GeneratorConfig;
use queuegen_core::error::{GenError, GenResult};
use queuegen_core::output::FileResult;
use queuegen_java::generator::AtomicQueueGenerator;

/// Extension of the source files the generator accepts.
pub const SOURCE_EXTENSION: &str = "java";

/// A batch that stopped part way.
#[derive(Debug, Error)]
#[error("{error}")]
pub struct BatchFailure {
    /// What stopped the batch.
    #[source]
    pub error: GenError,
    /// Files completed before the failure.
    pub written: Vec<FileResult>,
}

impl From<GenError> for BatchFailure {
    fn from(error: GenError) -> Self {
        BatchFailure {
            error,
            written: Vec::new(),
        }
    }
}

/// Expand `inputs` into the list of source files to process.
///
/// Files are taken as given. Directories contribute every `.java` file below
/// them, sorted by path.
pub fn collect_inputs(inputs: &[PathBuf]) -> GenResult<Vec<PathBuf>> {
    let mut files = Vec::new();
    for input in inputs {
        if !input.is_dir() {
            files.push(input.clone());
            continue;
        }
        let mut found = Vec::new();
        for entry in WalkDir::new(input).sort_by_file_name() {
            let entry = entry.map_err(|e| {
                let path = e.path().unwrap_or(input).to_path_buf();
                GenError::read(path, e.into())
            })?;
            let is_source = entry.file_type().is_file()
                && entry.path().extension().is_some_and(|ext| ext == SOURCE_EXTENSION);
            if is_source {
                found.push(entry.into_path());
            }
        }
        tracing::debug!("{} source files under {}", found.len(), input.display());
        files.extend(found);
    }

    if files.is_empty() {
        return Err(GenError::invalid_args("no input source files"));
    }
    Ok(files)
}

/// Generate one output file per input into `output_dir`.
pub fn run(
    output_dir: &Path,
    inputs: &[PathBuf],
    config: &GeneratorConfig,
) -> Result<Vec<FileResult>, BatchFailure> {
    let files = collect_inputs(inputs)?;
    fs::create_dir_all(output_dir).map_err(|e| GenError::write(output_dir, e))?;

    let generator = AtomicQueueGenerator::new(config);
    let mut written = Vec::with_capacity(files.len());
    for input in &files {
        match generate_file(&generator, output_dir, input) {
            Ok(result) => written.push(result),
            Err(error) => return Err(BatchFailure { error, written }),
        }
    }
    Ok(written)
}

fn generate_file(
    generator: &AtomicQueueGenerator<'_>,
    output_dir: &Path,
    input: &Path,
) -> GenResult<FileResult> {
    let file_name = input
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .ok_or_else(|| GenError::invalid_args(format!("not a file: {}", input.display())))?;

    tracing::info!("processing {}", input.display());
    let source = fs::read_to_string(input).map_err(|e| GenError::read(input, e))?;
    let unit = generator.generate(&file_name, &source)?;

    let output = output_dir.join(&unit.file_name);
    let mut file = File::create(&output).map_err(|e| GenError::write(&output, e))?;
    file.write_all(unit.text.as_bytes())
        .map_err(|e| GenError::write(&output, e))?;
    tracing::info!("wrote {}", output.display());

    Ok(FileResult {
        input: input.display().to_string(),
        output: output.display().to_string(),
        classes: unit.stats.classes,
        accessors: unit.stats.accessors,
        updaters: unit.stats.updaters,
    })
}
