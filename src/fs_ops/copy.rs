//! Flattened copy into the target directory.
//! - Destination is `<target_dir>/<file name>`; the source's subdirectories are dropped.
//! - An existing destination is only replaced after the user confirms.
//! - Data is streamed into a temp file in the target directory, synced, then renamed
//!   over the destination so a failed copy never leaves a half-written file behind.
//! - Failures are classified into a per-file error result; they never abort the run.

use std::fs::{self, File, OpenOptions};
use std::io::{self, BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

use crate::errors::CopyError;
use crate::prompt::OverwritePrompt;
use crate::state::{OperationResult, SKIP_OVERWRITE_DECLINED};

use super::helpers::describe_io_error;
use super::util;

/// Copy `source` into `target_dir`, asking `prompt` before replacing an existing file.
pub fn copy_to_target<P>(source: &Path, target_dir: &Path, prompt: &mut P) -> OperationResult
where
    P: OverwritePrompt + ?Sized,
{
    let dest = match destination_for(source, target_dir) {
        Ok(d) => d,
        Err(e) => return error_result(source, e),
    };

    if dest.symlink_metadata().is_ok() {
        match prompt.confirm_overwrite(&dest) {
            Ok(true) => debug!(dest = %dest.display(), "Overwrite confirmed"),
            Ok(false) => {
                info!(src = %source.display(), dest = %dest.display(), "Overwrite declined");
                return OperationResult::Skip {
                    source: source.to_path_buf(),
                    reason: SKIP_OVERWRITE_DECLINED.to_string(),
                };
            }
            Err(e) => {
                warn!(dest = %dest.display(), error = %e, "No answer to overwrite prompt");
                let detail = describe_io_error("confirm overwrite of", &dest, &e);
                return OperationResult::Error {
                    source: source.to_path_buf(),
                    message: "Overwrite confirmation unavailable".to_string(),
                    cause: CopyError::from_io(&dest, detail, e),
                };
            }
        }
    }

    match safe_copy_and_rename(source, &dest) {
        Ok(bytes) => {
            info!(src = %source.display(), dest = %dest.display(), bytes, "Copied file");
            OperationResult::Success {
                source: source.to_path_buf(),
                target: dest,
            }
        }
        Err(e) => error_result(source, e),
    }
}

/// `<target_dir>/<file name of source>`.
fn destination_for(source: &Path, target_dir: &Path) -> Result<PathBuf, CopyError> {
    let name = source.file_name().ok_or_else(|| {
        let e = io::Error::new(io::ErrorKind::InvalidInput, "source has no file name");
        CopyError::from_io(source, describe_io_error("resolve file name of", source, &e), e)
    })?;
    Ok(target_dir.join(name))
}

/// Copy src -> temp in dest dir, then atomic rename temp -> dest. Returns bytes copied.
fn safe_copy_and_rename(src: &Path, dest: &Path) -> Result<u64, CopyError> {
    let dest_dir = match dest.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };

    fs::create_dir_all(dest_dir).map_err(classify("create target directory", dest_dir))?;

    let tmp_path = util::unique_temp_path(dest_dir, "copy");
    let bytes = match copy_streaming(src, &tmp_path) {
        Ok(n) => n,
        Err((op, path, e)) => {
            let _ = fs::remove_file(&tmp_path);
            return Err(CopyError::from_io(&path, describe_io_error(op, &path, &e), e));
        }
    };

    if let Err(e) = rename_replacing(&tmp_path, dest) {
        let _ = fs::remove_file(&tmp_path);
        return Err(classify("move temporary file into place at", dest)(e));
    }
    Ok(bytes)
}

type StepError = (&'static str, PathBuf, io::Error);

/// Stream `src` into a newly created `dst` and sync it to disk.
fn copy_streaming(src: &Path, dst: &Path) -> Result<u64, StepError> {
    const BUF_SIZE: usize = 256 * 1024;
    let fail = |op: &'static str, p: &Path| {
        let p = p.to_path_buf();
        move |e: io::Error| (op, p, e)
    };

    let src_f = File::open(src).map_err(fail("open source", src))?;
    let dst_f = OpenOptions::new()
        .write(true)
        .create_new(true)
        .open(dst)
        .map_err(fail("create temporary file", dst))?;

    let mut reader = BufReader::with_capacity(BUF_SIZE, src_f);
    let mut writer = BufWriter::with_capacity(BUF_SIZE, dst_f);
    let bytes = io::copy(&mut reader, &mut writer).map_err(fail("copy data to", dst))?;
    writer.flush().map_err(fail("flush", dst))?;
    let dst_f = writer
        .into_inner()
        .map_err(|e| ("flush", dst.to_path_buf(), e.into_error()))?;
    dst_f.sync_all().map_err(fail("sync", dst))?;
    Ok(bytes)
}

fn rename_replacing(src: &Path, dst: &Path) -> io::Result<()> {
    // Windows: rename doesn't overwrite.
    #[cfg(windows)]
    if dst.exists() {
        if let Err(e) = fs::remove_file(dst) {
            if e.kind() != io::ErrorKind::NotFound {
                return Err(e);
            }
        }
    }

    fs::rename(src, dst)?;

    if let Some(parent) = dst.parent() {
        let _ = util::fsync_dir(parent);
    }
    Ok(())
}

fn classify<'a>(op: &'a str, path: &'a Path) -> impl FnOnce(io::Error) -> CopyError + 'a {
    move |e: io::Error| CopyError::from_io(path, describe_io_error(op, path, &e), e)
}

fn error_result(source: &Path, err: CopyError) -> OperationResult {
    warn!(
        src = %source.display(),
        code = err.code(),
        error = %err,
        "Copy failed"
    );
    OperationResult::Error {
        source: source.to_path_buf(),
        message: err.user_message().to_string(),
        cause: err,
    }
}
