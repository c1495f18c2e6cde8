//! Command handlers
//!
//! Handlers return a process exit code. The work itself lives in small functions
//! generic over [`FileSystem`] so it can be driven against an in-memory tree.

use anyhow::{Context, Result};
use std::path::{Path, PathBuf};
use tracing::{debug, error, info, warn};

use super::commands::{ConfigArgs, ExtractionArgs, InspectArgs, RenderArgs};
use super::output::OutputFormatter;
use crate::config::SwiftcubeConfig;
use crate::extractor::{DeclarationExtractor, DeclarationRecord, MemberScope};
use crate::fs::{FileSystem, RealFileSystem};
use crate::render::CubeRenderer;
use crate::source::{output_path, SourceLocator};

/// Environment configuration with command-line overrides applied
pub fn resolve_config(
    extraction: &ExtractionArgs,
    output_dir: Option<&Path>,
) -> Result<SwiftcubeConfig> {
    let mut config = SwiftcubeConfig::from_env().context("Invalid environment configuration")?;

    if extraction.any_depth {
        config.member_scope = MemberScope::AnyDepth;
    }
    if let Some(ref extension) = extraction.extension {
        config.source_extension = extension.trim_start_matches('.').to_string();
    }
    if let Some(dir) = output_dir {
        config.output_dir = Some(dir.to_path_buf());
    }

    config.validate().context("Invalid configuration")?;
    debug!("Effective configuration: {:?}", config);
    Ok(config)
}

/// Loads and extracts one declaration
pub fn load_record<F: FileSystem>(
    locator: &SourceLocator<F>,
    extractor: &DeclarationExtractor,
    file: &Path,
) -> Result<DeclarationRecord> {
    let source = locator
        .load(file)
        .with_context(|| format!("Failed to load {}", file.display()))?;

    let record = extractor
        .extract(&source.contents)
        .with_context(|| format!("Failed to extract a declaration from {}", source.path.display()))?;

    debug!(
        kind = record.kind.keyword(),
        name = %record.name,
        members = record.member_count(),
        "Extracted declaration from {}",
        source.path.display()
    );
    Ok(record)
}

/// Renders every file, continuing past failures
///
/// Results come back in input order.
pub fn render_files<F: FileSystem>(
    files: &[PathBuf],
    config: &SwiftcubeConfig,
    renderer: &CubeRenderer,
    fs: F,
) -> Vec<(PathBuf, Result<PathBuf>)> {
    let locator = config.source_locator(fs);
    let extractor = config.extractor();

    files
        .iter()
        .map(|file| {
            let outcome = render_one(&locator, &extractor, renderer, config, file);
            (file.clone(), outcome)
        })
        .collect()
}

fn render_one<F: FileSystem>(
    locator: &SourceLocator<F>,
    extractor: &DeclarationExtractor,
    renderer: &CubeRenderer,
    config: &SwiftcubeConfig,
    file: &Path,
) -> Result<PathBuf> {
    let record = load_record(locator, extractor, file)?;
    let html = renderer.render(&record);
    let target = output_path(config.output_dir.as_deref(), &record);

    locator
        .fs()
        .write(&target, &html)
        .with_context(|| format!("Failed to write {}", target.display()))?;

    info!("Wrote {} for {}", target.display(), record.header());
    Ok(target)
}

pub fn handle_render(args: &RenderArgs, quiet: bool) -> i32 {
    let config = match resolve_config(&args.extraction, args.output_dir.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            error!("{:#}", e);
            return 1;
        }
    };

    let renderer = CubeRenderer::new().with_lang(args.lang.clone());
    let results = render_files(&args.files, &config, &renderer, RealFileSystem::new());
    let mut failures = 0;

    for (file, outcome) in results {
        match outcome {
            Ok(target) => {
                if !quiet {
                    println!("{}", target.display());
                }
            }
            Err(e) => {
                failures += 1;
                error!("{}: {:#}", file.display(), e);
            }
        }
    }

    if failures > 0 {
        warn!("{} of {} file(s) failed", failures, args.files.len());
        1
    } else {
        0
    }
}

/// Loads, extracts and formats a single file
pub fn inspect_file<F: FileSystem>(
    file: &Path,
    formatter: &OutputFormatter,
    config: &SwiftcubeConfig,
    fs: F,
) -> Result<String> {
    let locator = config.source_locator(fs);
    let record = load_record(&locator, &config.extractor(), file)?;
    formatter.format(&record)
}

pub fn handle_inspect(args: &InspectArgs) -> i32 {
    let config = match resolve_config(&args.extraction, None) {
        Ok(config) => config,
        Err(e) => {
            error!("{:#}", e);
            return 1;
        }
    };

    let formatter = OutputFormatter::new(args.format.into());
    match inspect_file(&args.file, &formatter, &config, RealFileSystem::new()) {
        Ok(output) => {
            print!("{}", output);
            if !output.ends_with('\n') {
                println!();
            }
            0
        }
        Err(e) => {
            error!("{:#}", e);
            1
        }
    }
}

pub fn handle_config(args: &ConfigArgs) -> i32 {
    let config = match SwiftcubeConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            error!("Configuration error: {}", e);
            return 1;
        }
    };
    if let Err(e) = config.validate() {
        warn!("{}", e);
    }

    match OutputFormatter::new(args.format.into()).format_config(&config) {
        Ok(output) => {
            print!("{}", output);
            if !output.ends_with('\n') {
                println!();
            }
            0
        }
        Err(e) => {
            error!("{:#}", e);
            1
        }
    }
}
