//! Extraction loops over the two entry abstractions.

use std::path::Path;
use std::time::Instant;

use tracing::warn;

use super::Materializer;
use crate::Result;
use crate::config::BridgeConfig;
use crate::formats::EntryCatalog;
use crate::formats::EntryCursor;
use crate::report::EntryOutcome;
use crate::report::ExtractionReport;
use crate::report::ProgressCallback;
use crate::types::DestRoot;

/// Extracts every entry of a random-access catalog under `root`.
///
/// This never fails: an entry that cannot even be opened is recorded as
/// skipped like any other per-entry error, and the loop moves on.
pub fn extract_catalog<C: EntryCatalog>(
    catalog: &mut C,
    root: DestRoot,
    config: &BridgeConfig,
    progress: &mut dyn ProgressCallback,
) -> ExtractionReport {
    let start = Instant::now();
    let mut materializer = Materializer::new(root, config.preserve_permissions);
    let mut report = ExtractionReport::new();
    let total = catalog.len();

    for index in 0..total {
        let name = catalog
            .name_of(index)
            .map_or_else(|| format!("entry #{index}"), str::to_string);
        progress.on_entry_start(Path::new(&name), total, index + 1);

        let outcome = catalog
            .with_entry(index, |header, reader| {
                materializer.materialize_entry(header, reader)
            })
            .unwrap_or_else(|e| {
                warn!(entry = %name, error = %e, "cannot open entry, skipped");
                EntryOutcome::SkippedError(e.to_string())
            });

        if let EntryOutcome::Extracted { bytes } = outcome {
            progress.on_bytes_written(bytes);
        }
        progress.on_entry_complete(Path::new(&name));
        report.record(name, outcome);
    }

    report.duration = start.elapsed();
    progress.on_complete();
    report
}

/// Extracts every entry of a forward-only cursor under `root`.
///
/// Per-entry failures are recorded and skipped. A failure of the cursor
/// itself (undecodable stream, unreadable header) aborts the extraction;
/// entries written before that point stay on disk.
///
/// # Errors
///
/// Returns the cursor's error if the stream cannot be walked to its end.
pub fn extract_cursor<C: EntryCursor>(
    cursor: &mut C,
    root: DestRoot,
    config: &BridgeConfig,
    progress: &mut dyn ProgressCallback,
) -> Result<ExtractionReport> {
    let start = Instant::now();
    let mut materializer = Materializer::new(root, config.preserve_permissions);
    let mut report = ExtractionReport::new();
    let mut current = 0;

    cursor.for_each_entry(|header, reader| {
        current += 1;
        let path = Path::new(&header.name);
        progress.on_entry_start(path, 0, current);

        let outcome = materializer.materialize_entry(header, reader);

        if let EntryOutcome::Extracted { bytes } = outcome {
            progress.on_bytes_written(bytes);
        }
        progress.on_entry_complete(path);
        report.record(header.name.clone(), outcome);
    })?;

    report.duration = start.elapsed();
    progress.on_complete();
    Ok(report)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::formats::TarCursor;
    use crate::formats::ZipCatalog;
    use crate::report::NoopProgress;
    use crate::test_utils::TarTestBuilder;
    use crate::test_utils::ZipTestBuilder;
    use std::fs;
    use std::io::Cursor;
    use tempfile::TempDir;

    #[derive(Default)]
    struct RecordingProgress {
        started: Vec<(String, usize, usize)>,
        bytes: u64,
        completed: usize,
        finished: bool,
    }

    impl ProgressCallback for RecordingProgress {
        fn on_entry_start(&mut self, path: &Path, total: usize, current: usize) {
            self.started
                .push((path.display().to_string(), total, current));
        }

        fn on_bytes_written(&mut self, bytes: u64) {
            self.bytes += bytes;
        }

        fn on_entry_complete(&mut self, _path: &Path) {
            self.completed += 1;
        }

        fn on_complete(&mut self) {
            self.finished = true;
        }
    }

    fn root_in(temp: &TempDir) -> DestRoot {
        DestRoot::new(temp.path().join("out")).unwrap()
    }

    #[test]
    fn test_catalog_extraction_records_every_entry() {
        let temp = TempDir::new().unwrap();
        let data = ZipTestBuilder::new()
            .add_file("a.txt", b"hi")
            .add_directory("sub/")
            .add_file("sub/b.txt", b"there")
            .add_file("../evil.txt", b"evil")
            .build();
        let mut catalog = ZipCatalog::new(Cursor::new(data)).unwrap();
        let mut progress = RecordingProgress::default();

        let report = extract_catalog(
            &mut catalog,
            root_in(&temp),
            &BridgeConfig::default(),
            &mut progress,
        );

        assert_eq!(report.files_extracted, 2);
        assert_eq!(report.directories_created, 1);
        assert_eq!(report.entries_skipped, 1);
        assert_eq!(report.bytes_written, 7);
        assert_eq!(
            report.outcome_of("../evil.txt"),
            Some(&EntryOutcome::SkippedConfinement)
        );
        assert!(!temp.path().join("evil.txt").exists());

        assert_eq!(progress.started.len(), 4);
        assert_eq!(progress.started[0], ("a.txt".to_string(), 4, 1));
        assert_eq!(progress.bytes, 7);
        assert_eq!(progress.completed, 4);
        assert!(progress.finished);
    }

    #[test]
    fn test_cursor_extraction_records_every_entry() {
        let temp = TempDir::new().unwrap();
        let data = TarTestBuilder::new()
            .add_file("a.txt", b"hi")
            .add_file("../evil.txt", b"evil")
            .add_symlink("link", "/etc/passwd")
            .build();
        let mut cursor = TarCursor::new(Cursor::new(data));
        let mut progress = RecordingProgress::default();

        let report = extract_cursor(
            &mut cursor,
            root_in(&temp),
            &BridgeConfig::default(),
            &mut progress,
        )
        .unwrap();

        assert_eq!(report.files_extracted, 1);
        assert_eq!(report.entries_skipped, 2);
        assert!(matches!(
            report.outcome_of("link"),
            Some(EntryOutcome::SkippedError(_))
        ));
        assert_eq!(
            fs::read(temp.path().join("out").join("a.txt")).unwrap(),
            b"hi"
        );
        assert_eq!(progress.started[1], ("../evil.txt".to_string(), 0, 2));
        assert!(progress.finished);
    }

    #[test]
    fn test_cursor_error_aborts() {
        let temp = TempDir::new().unwrap();
        let mut data = TarTestBuilder::new().add_file("a.txt", b"hi").build();
        // Corrupt the header checksum of the first entry.
        data[148..156].copy_from_slice(b"0000000\0");
        let mut cursor = TarCursor::new(Cursor::new(data));

        let result = extract_cursor(
            &mut cursor,
            root_in(&temp),
            &BridgeConfig::default(),
            &mut NoopProgress,
        );

        assert!(result.is_err());
        assert!(!temp.path().join("out").join("a.txt").exists());
    }
}
