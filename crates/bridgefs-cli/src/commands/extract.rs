//! Extraction and decompression commands.

use crate::cli::ExtractArgs;
use crate::cli::GunzipArgs;
use crate::error::add_archive_context;
use crate::output::OutputFormatter;
use crate::progress::CliProgress;
use anyhow::Result;
use bridgefs_core::Bridge;
use bridgefs_core::NoopProgress;
use bridgefs_core::ProgressCallback;

pub fn unzip(
    bridge: &Bridge,
    args: &ExtractArgs,
    formatter: &dyn OutputFormatter,
    show_progress: bool,
) -> Result<()> {
    let report = with_progress(show_progress, |progress| {
        bridge.extract_zip(&args.archive, &args.output_dir, progress)
    });
    let report = add_archive_context(report, &args.archive)?;

    formatter.format_extraction_result("unzip", &report)
}

pub fn untar_gz(
    bridge: &Bridge,
    args: &ExtractArgs,
    formatter: &dyn OutputFormatter,
    show_progress: bool,
) -> Result<()> {
    let report = with_progress(show_progress, |progress| {
        bridge.extract_tar_gz(&args.archive, &args.output_dir, progress)
    });
    let report = add_archive_context(report, &args.archive)?;

    formatter.format_extraction_result("untar-gz", &report)
}

pub fn gunzip(bridge: &Bridge, args: &GunzipArgs, formatter: &dyn OutputFormatter) -> Result<()> {
    let written = add_archive_context(
        bridge.decompress_gz(&args.archive, &args.output, &mut NoopProgress),
        &args.archive,
    )?;

    formatter.format_decompression_result(&bridge.resolve(&args.output), written)
}

// Use a progress bar only when someone is watching stderr.
fn with_progress<T>(show: bool, run: impl FnOnce(&mut dyn ProgressCallback) -> T) -> T {
    if show && CliProgress::should_show() {
        let mut progress = CliProgress::new("Extracting");
        run(&mut progress)
    } else {
        run(&mut NoopProgress)
    }
}
