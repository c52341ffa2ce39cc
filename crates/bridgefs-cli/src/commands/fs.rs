//! Plain file operations, one per bridge call.
//!
//! Every command maps a failed `FlagResult` to a non-zero exit through
//! [`check_flag`].

use crate::cli::PathArgs;
use crate::cli::ReadArgs;
use crate::cli::TransferArgs;
use crate::cli::WriteArgs;
use crate::error::check_flag;
use crate::output::OutputFormatter;
use anyhow::Context;
use anyhow::Result;
use bridgefs_core::Bridge;
use std::io;

pub fn read(bridge: &Bridge, args: &ReadArgs, formatter: &dyn OutputFormatter) -> Result<()> {
    let result = if args.external {
        bridge.read_external_file(&args.path)
    } else {
        bridge.read_file(&args.path, &args.mode)
    };
    let result = check_flag("read", result)?;

    formatter.format_value("read", &result.data)
}

pub fn write(bridge: &Bridge, args: &WriteArgs, formatter: &dyn OutputFormatter) -> Result<()> {
    let content = match &args.content {
        Some(content) => content.clone(),
        None => io::read_to_string(io::stdin()).context("failed to read content from stdin")?,
    };

    let result = if args.external {
        bridge.write_external_file(&args.path, &content)
    } else {
        bridge.write_file(&args.path, &content, &args.mode)
    };
    check_flag("write", result)?;

    formatter.format_success("write", &format!("Wrote {}", args.path.display()))
}

pub fn mv(bridge: &Bridge, args: &TransferArgs, formatter: &dyn OutputFormatter) -> Result<()> {
    check_flag("mv", bridge.move_file(&args.source, &args.target))?;

    formatter.format_success(
        "mv",
        &format!("Moved {} to {}", args.source.display(), args.target.display()),
    )
}

pub fn cp(bridge: &Bridge, args: &TransferArgs, formatter: &dyn OutputFormatter) -> Result<()> {
    check_flag("cp", bridge.copy_file(&args.source, &args.target))?;

    formatter.format_success(
        "cp",
        &format!("Copied {} to {}", args.source.display(), args.target.display()),
    )
}

pub fn rm(bridge: &Bridge, args: &PathArgs, formatter: &dyn OutputFormatter) -> Result<()> {
    check_flag("rm", bridge.remove_file(&args.path))?;

    formatter.format_success("rm", &format!("Removed {}", args.path.display()))
}

pub fn mkdir(bridge: &Bridge, args: &PathArgs, formatter: &dyn OutputFormatter) -> Result<()> {
    check_flag("mkdir", bridge.make_dir(&args.path))?;

    formatter.format_success("mkdir", &format!("Created {}", args.path.display()))
}

pub fn ls(bridge: &Bridge, args: &PathArgs, formatter: &dyn OutputFormatter) -> Result<()> {
    let result = check_flag("ls", bridge.read_dir(&args.path))?;

    formatter.format_listing(&result.data)
}

pub fn exists(bridge: &Bridge, args: &PathArgs, formatter: &dyn OutputFormatter) -> Result<()> {
    let result = check_flag("exists", bridge.file_exists(&args.path))?;

    formatter.format_value("exists", &result.data)
}

pub fn abspath(bridge: &Bridge, args: &PathArgs, formatter: &dyn OutputFormatter) -> Result<()> {
    let result = check_flag("abspath", bridge.absolute_path(&args.path))?;

    formatter.format_value("abspath", &result.data)
}
