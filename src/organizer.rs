//! Run orchestration: validate, list, then extract/mkdir/copy each image.
//!
//! Files are handled one at a time and independently. Nothing learned from one
//! file influences another, and no per-file failure stops the run.

use std::io;
use std::path::{Path, PathBuf};
use tracing::{error, info, warn};
use walkdir::WalkDir;

use crate::config::{Config, check_directories};
use crate::errors::{ConfigError, ProcessError};
use crate::fs_ops::{CopyOutcome, copy_no_clobber, ensure_dir};
use crate::metadata::{DateParser, NO_EXIF_DIR, SubPath, extract_sub_path};
use crate::output as out;
use crate::shutdown;

/// Extension (compared case-insensitively) of files picked up from the source.
pub const JPEG_SUFFIX: &str = ".jpg";

/// Settings for one run.
#[derive(Debug, Clone)]
pub struct OrganizeOptions {
    pub source: PathBuf,
    pub destination: PathBuf,
    pub dry_run: bool,
    pub preserve_timestamps: bool,
    pub parser: DateParser,
}

impl OrganizeOptions {
    pub fn new(source: impl Into<PathBuf>, destination: impl Into<PathBuf>) -> Self {
        Self {
            source: source.into(),
            destination: destination.into(),
            dry_run: false,
            preserve_timestamps: false,
            parser: DateParser::default(),
        }
    }
}

impl From<&Config> for OrganizeOptions {
    fn from(cfg: &Config) -> Self {
        Self {
            source: cfg.source.clone(),
            destination: cfg.destination.clone(),
            dry_run: cfg.dry_run,
            preserve_timestamps: cfg.preserve_timestamps,
            parser: cfg.date_parser(),
        }
    }
}

/// What happened to one source file.
#[derive(Debug)]
pub enum FileOutcome {
    Copied {
        source: PathBuf,
        destination: PathBuf,
        sub_path: SubPath,
    },
    /// Dry-run: where the file would have gone.
    Planned {
        source: PathBuf,
        destination: PathBuf,
        sub_path: SubPath,
    },
    /// A file with the same name already exists at the destination.
    Collision {
        source: PathBuf,
        destination: PathBuf,
    },
    Failed {
        source: PathBuf,
        error: ProcessError,
    },
}

impl FileOutcome {
    pub fn source(&self) -> &Path {
        match self {
            FileOutcome::Copied { source, .. }
            | FileOutcome::Planned { source, .. }
            | FileOutcome::Collision { source, .. }
            | FileOutcome::Failed { source, .. } => source,
        }
    }
}

/// All per-file outcomes of a run, in processing order.
#[derive(Debug, Default)]
pub struct RunReport {
    pub outcomes: Vec<FileOutcome>,
    /// True if the run stopped early on Ctrl-C.
    pub interrupted: bool,
}

impl RunReport {
    pub fn copied(&self) -> usize {
        self.count(|o| matches!(o, FileOutcome::Copied { .. }))
    }

    pub fn planned(&self) -> usize {
        self.count(|o| matches!(o, FileOutcome::Planned { .. }))
    }

    pub fn collisions(&self) -> usize {
        self.count(|o| matches!(o, FileOutcome::Collision { .. }))
    }

    pub fn failures(&self) -> usize {
        self.count(|o| matches!(o, FileOutcome::Failed { .. }))
    }

    /// Files that were copied (or planned) into the fallback bucket.
    pub fn fallbacks(&self) -> usize {
        self.count(|o| match o {
            FileOutcome::Copied { sub_path, .. } | FileOutcome::Planned { sub_path, .. } => {
                sub_path.is_fallback()
            }
            _ => false,
        })
    }

    fn count(&self, pred: impl Fn(&FileOutcome) -> bool) -> usize {
        self.outcomes.iter().filter(|o| pred(o)).count()
    }
}

/// Copies JPEGs from a source directory into a dated destination tree.
pub struct Organizer {
    options: OrganizeOptions,
    stop_requested: fn() -> bool,
}

impl Organizer {
    pub fn new(options: OrganizeOptions) -> Self {
        Self {
            options,
            stop_requested: shutdown::is_requested,
        }
    }

    /// Replace the interruption check (defaults to the Ctrl-C flag).
    pub fn with_stop_check(mut self, check: fn() -> bool) -> Self {
        self.stop_requested = check;
        self
    }

    pub fn options(&self) -> &OrganizeOptions {
        &self.options
    }

    /// Run and print each outcome as it happens.
    pub fn run(&self) -> Result<RunReport, ConfigError> {
        self.run_with(print_outcome)
    }

    /// Run, handing each outcome to `on_outcome` before moving to the next file.
    ///
    /// The only error is an invalid source/destination pair, detected before
    /// any file is touched.
    pub fn run_with<F>(&self, mut on_outcome: F) -> Result<RunReport, ConfigError>
    where
        F: FnMut(&FileOutcome),
    {
        let opts = &self.options;
        if let Err(e) = check_directories(&opts.source, &opts.destination) {
            error!(code = e.code(), error = %e, "Invalid source or destination");
            return Err(e);
        }
        info!(
            source = %opts.source.display(),
            destination = %opts.destination.display(),
            dry_run = opts.dry_run,
            "Copying from '{}' to '{}'",
            opts.source.display(),
            opts.destination.display()
        );

        let candidates = list_candidates(&opts.source)?;
        info!(count = candidates.len(), "Found candidate images");

        let mut report = RunReport::default();
        for image in candidates {
            if (self.stop_requested)() {
                warn!("Interrupted; remaining files were not processed");
                report.interrupted = true;
                break;
            }
            let outcome = self.process_file(&image);
            on_outcome(&outcome);
            report.outcomes.push(outcome);
        }
        Ok(report)
    }

    /// Extract, create the dated directory and copy one image.
    pub fn process_file(&self, image: &Path) -> FileOutcome {
        let opts = &self.options;
        let failed = |error: ProcessError| FileOutcome::Failed {
            source: image.to_path_buf(),
            error,
        };

        let Some(file_name) = image.file_name() else {
            return failed(ProcessError::NoFileName(image.to_path_buf()));
        };

        let sub_path = match extract_sub_path(image, &opts.parser) {
            Ok(s) => s,
            Err(e) => return failed(e.into()),
        };

        let dir = opts.destination.join(sub_path.to_path_buf());
        let destination = dir.join(file_name);

        if opts.dry_run {
            if destination.exists() {
                return FileOutcome::Collision {
                    source: image.to_path_buf(),
                    destination,
                };
            }
            return FileOutcome::Planned {
                source: image.to_path_buf(),
                destination,
                sub_path,
            };
        }

        if let Err(e) = ensure_dir(&dir) {
            return failed(ProcessError::CreateDir(e));
        }

        match copy_no_clobber(image, &destination, opts.preserve_timestamps) {
            Ok(CopyOutcome::Copied { bytes }) => {
                info!(
                    src = %image.display(),
                    dest = %destination.display(),
                    bytes,
                    sub_path = %sub_path,
                    "Copied"
                );
                FileOutcome::Copied {
                    source: image.to_path_buf(),
                    destination,
                    sub_path,
                }
            }
            Ok(CopyOutcome::Collision) => FileOutcome::Collision {
                source: image.to_path_buf(),
                destination,
            },
            Err(e) => failed(ProcessError::Copy(e)),
        }
    }
}

/// Regular files directly under `source` whose name ends in `.jpg` (any case),
/// sorted by file name. Symlinks to regular files count as regular files.
pub fn list_candidates(source: &Path) -> Result<Vec<PathBuf>, ConfigError> {
    let mut files = Vec::new();
    let walker = WalkDir::new(source)
        .min_depth(1)
        .max_depth(1)
        .follow_links(true)
        .sort_by_file_name();

    for entry in walker {
        let entry = match entry {
            Ok(e) => e,
            Err(e) if e.depth() == 0 => {
                return Err(ConfigError::Unreadable {
                    path: source.to_path_buf(),
                    source: io::Error::from(e),
                });
            }
            Err(e) => {
                warn!(error = %e, "Skipping unreadable directory entry");
                continue;
            }
        };
        if entry.file_type().is_file() && has_jpeg_suffix(entry.file_name()) {
            files.push(entry.into_path());
        }
    }
    Ok(files)
}

fn has_jpeg_suffix(name: &std::ffi::OsStr) -> bool {
    name.to_string_lossy().to_lowercase().ends_with(JPEG_SUFFIX)
}

/// Default per-file reporting: one user-facing line plus a structured event.
pub fn print_outcome(outcome: &FileOutcome) {
    match outcome {
        FileOutcome::Copied {
            source,
            destination,
            sub_path,
        } => {
            if sub_path.is_format_miss() {
                out::print_warn(&format!(
                    "Problems parsing the capture date of '{}'; copied to {NO_EXIF_DIR}/. Check the logs for the raw value.",
                    source.display()
                ));
            }
            out::print_user(&format!(
                "'{}' -> '{}' done.",
                source.display(),
                destination.display()
            ));
        }
        FileOutcome::Planned {
            source,
            destination,
            ..
        } => {
            out::print_info(&format!(
                "Dry-run: would copy '{}' -> '{}'",
                source.display(),
                destination.display()
            ));
        }
        FileOutcome::Collision {
            source,
            destination,
        } => {
            warn!(
                kind = "collision",
                src = %source.display(),
                dest = %destination.display(),
                "Destination exists; skipping"
            );
            out::print_warn(&format!(
                "File '{}' already exists on destination ('{}'). Skipping",
                source.display(),
                destination.display()
            ));
        }
        FileOutcome::Failed { source, error } => {
            error!(
                code = error.code(),
                kind = error.kind(),
                src = %source.display(),
                error = %error,
                "Failed to process file"
            );
            out::print_error(&format!("Error processing '{}': {}", source.display(), error));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_fs::TempDir;
    use assert_fs::prelude::*;
    use std::fs;

    const BARE_JPEG: [u8; 4] = [0xFF, 0xD8, 0xFF, 0xD9];

    fn src_and_dst() -> (TempDir, PathBuf, PathBuf) {
        let td = TempDir::new().unwrap();
        let src = td.child("src");
        let dst = td.child("dst");
        src.create_dir_all().unwrap();
        dst.create_dir_all().unwrap();
        let (s, d) = (src.path().to_path_buf(), dst.path().to_path_buf());
        (td, s, d)
    }

    #[test]
    fn lists_only_jpg_files_case_insensitively() {
        let (_td, src, _dst) = src_and_dst();
        fs::write(src.join("a.jpg"), BARE_JPEG).unwrap();
        fs::write(src.join("B.JPG"), BARE_JPEG).unwrap();
        fs::write(src.join("c.Jpg"), BARE_JPEG).unwrap();
        fs::write(src.join("d.jpeg"), BARE_JPEG).unwrap();
        fs::write(src.join("e.png"), BARE_JPEG).unwrap();
        fs::write(src.join("notes.txt"), b"x").unwrap();
        fs::create_dir_all(src.join("folder.jpg")).unwrap();
        fs::create_dir_all(src.join("nested")).unwrap();
        fs::write(src.join("nested").join("deep.jpg"), BARE_JPEG).unwrap();

        let names: Vec<String> = list_candidates(&src)
            .unwrap()
            .iter()
            .map(|p| p.file_name().unwrap().to_string_lossy().into_owned())
            .collect();
        assert_eq!(names, vec!["B.JPG", "a.jpg", "c.Jpg"]);
    }

    #[test]
    fn invalid_directories_abort_before_touching_anything() {
        let (_td, src, _dst) = src_and_dst();
        fs::write(src.join("a.jpg"), BARE_JPEG).unwrap();
        let organizer = Organizer::new(OrganizeOptions::new(&src, &src));
        let mut seen = 0;
        let err = organizer.run_with(|_| seen += 1).unwrap_err();
        assert!(matches!(err, ConfigError::SameDirectory(_)));
        assert_eq!(seen, 0);
        assert!(!src.join(NO_EXIF_DIR).exists());
    }

    #[test]
    fn image_without_metadata_lands_in_fallback() {
        let (_td, src, dst) = src_and_dst();
        fs::write(src.join("b.jpg"), BARE_JPEG).unwrap();

        let report = Organizer::new(OrganizeOptions::new(&src, &dst))
            .run_with(|_| {})
            .unwrap();
        assert_eq!(report.copied(), 1);
        assert_eq!(report.fallbacks(), 1);
        assert_eq!(fs::read(dst.join("NoExif").join("b.jpg")).unwrap(), BARE_JPEG);
        assert!(src.join("b.jpg").exists());
    }

    #[test]
    fn collision_is_reported_and_existing_file_kept() {
        let (_td, src, dst) = src_and_dst();
        fs::write(src.join("b.jpg"), BARE_JPEG).unwrap();
        fs::create_dir_all(dst.join("NoExif")).unwrap();
        fs::write(dst.join("NoExif").join("b.jpg"), b"keep me").unwrap();

        let report = Organizer::new(OrganizeOptions::new(&src, &dst))
            .run_with(|_| {})
            .unwrap();
        assert_eq!(report.collisions(), 1);
        assert_eq!(report.failures(), 0);
        assert_eq!(fs::read(dst.join("NoExif").join("b.jpg")).unwrap(), b"keep me");
    }

    #[test]
    fn one_bad_file_does_not_stop_the_others() {
        let (_td, src, dst) = src_and_dst();
        fs::write(src.join("a_bad.jpg"), b"definitely not an image").unwrap();
        fs::write(src.join("b_tiff.jpg"), b"MM\0*\0\0\0\x08\0\0").unwrap();
        fs::write(src.join("c_good.jpg"), BARE_JPEG).unwrap();

        let mut kinds = Vec::new();
        let report = Organizer::new(OrganizeOptions::new(&src, &dst))
            .run_with(|o| {
                kinds.push(match o {
                    FileOutcome::Failed { error, .. } => error.kind(),
                    FileOutcome::Copied { .. } => "copied",
                    _ => "other",
                })
            })
            .unwrap();
        assert_eq!(kinds, vec!["decode_error", "unsupported_metadata", "copied"]);
        assert_eq!(report.failures(), 2);
        // Failed files are skipped, not bucketed.
        assert!(!dst.join("NoExif").join("a_bad.jpg").exists());
        assert!(!dst.join("NoExif").join("b_tiff.jpg").exists());
        assert!(dst.join("NoExif").join("c_good.jpg").exists());
    }

    #[test]
    fn dry_run_creates_nothing() {
        let (_td, src, dst) = src_and_dst();
        fs::write(src.join("b.jpg"), BARE_JPEG).unwrap();
        let mut opts = OrganizeOptions::new(&src, &dst);
        opts.dry_run = true;

        let report = Organizer::new(opts).run_with(|_| {}).unwrap();
        assert_eq!(report.planned(), 1);
        match &report.outcomes[0] {
            FileOutcome::Planned { destination, .. } => {
                assert_eq!(destination, &dst.join("NoExif").join("b.jpg"));
            }
            other => panic!("unexpected outcome {other:?}"),
        }
        assert_eq!(fs::read_dir(&dst).unwrap().count(), 0);
    }

    #[test]
    fn stop_check_halts_before_next_file() {
        let (_td, src, dst) = src_and_dst();
        fs::write(src.join("a.jpg"), BARE_JPEG).unwrap();
        fs::write(src.join("b.jpg"), BARE_JPEG).unwrap();

        let report = Organizer::new(OrganizeOptions::new(&src, &dst))
            .with_stop_check(|| true)
            .run_with(|_| {})
            .unwrap();
        assert!(report.interrupted);
        assert!(report.outcomes.is_empty());
        assert!(!dst.join("NoExif").exists());
    }

    #[test]
    fn fallback_dir_blocked_by_file_is_a_per_file_failure() {
        let (_td, src, dst) = src_and_dst();
        fs::write(src.join("b.jpg"), BARE_JPEG).unwrap();
        fs::write(dst.join("NoExif"), b"in the way").unwrap();

        let report = Organizer::new(OrganizeOptions::new(&src, &dst))
            .run_with(|_| {})
            .unwrap();
        assert_eq!(report.failures(), 1);
        match &report.outcomes[0] {
            FileOutcome::Failed { error, .. } => assert_eq!(error.kind(), "create_dir"),
            other => panic!("unexpected outcome {other:?}"),
        }
    }
}
