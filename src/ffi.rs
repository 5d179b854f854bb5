//! C API.
//!
//! Two ways to get results out:
//!
//! * `glob_scan` / `glob_clear` stage results in one process-wide buffer. The
//!   returned array is borrowed and is invalidated by the next `glob_scan` or
//!   `glob_clear`, whoever calls it. `glob_last_status` tells why a scan
//!   returned NULL.
//! * `glob_find` / `glob_result_free` fill a caller-owned `glob_result_t`
//!   that lives until the caller frees it.
//!
//! Strings are NUL-terminated. On Unix they are raw filesystem bytes,
//! elsewhere UTF-8.

use crate::buffer::{self, path_to_cstring};
use crate::error::{GlobError, GLOB_INVALID_ARGUMENT, GLOB_OK};
use crate::flags::ScanFlags;
use crate::scan::{scan, Matches};
use std::ffi::{c_char, c_int, CStr, CString};
use std::path::Path;
use std::ptr;
use std::sync::atomic::{AtomicI32, Ordering};
use tracing::debug;

static LAST_STATUS: AtomicI32 = AtomicI32::new(GLOB_OK);

/// Caller-owned scan result.
///
/// Release with `glob_result_free`.
#[repr(C)]
#[allow(non_camel_case_types)]
#[derive(Debug)]
pub struct glob_result_t {
    /// Count of matched paths
    pub pathc: usize,
    /// Array of matched path strings (NULL-terminated)
    pub pathv: *mut *mut c_char,
    /// Array of path lengths in bytes (parallel to pathv)
    pub pathlen: *mut usize,
}

impl Default for glob_result_t {
    fn default() -> Self {
        Self {
            pathc: 0,
            pathv: ptr::null_mut(),
            pathlen: ptr::null_mut(),
        }
    }
}

impl glob_result_t {
    fn from_matches(matches: &Matches) -> Result<Self, GlobError> {
        let strings = matches
            .iter()
            .map(path_to_cstring)
            .collect::<Result<Vec<CString>, _>>()?;

        let pathlen: Box<[usize]> = strings.iter().map(|s| s.as_bytes().len()).collect();
        let pathv: Box<[*mut c_char]> = strings
            .into_iter()
            .map(CString::into_raw)
            .chain(std::iter::once(ptr::null_mut()))
            .collect();

        Ok(Self {
            pathc: pathlen.len(),
            pathv: Box::into_raw(pathv) as *mut *mut c_char,
            pathlen: Box::into_raw(pathlen) as *mut usize,
        })
    }

    /// # Safety
    ///
    /// `self` must have been produced by `from_matches` and not released yet.
    unsafe fn release(&mut self) {
        if !self.pathv.is_null() {
            let pathv = Box::from_raw(ptr::slice_from_raw_parts_mut(self.pathv, self.pathc + 1));
            for &s in pathv.iter().take(self.pathc) {
                drop(CString::from_raw(s));
            }
        }
        if !self.pathlen.is_null() {
            drop(Box::from_raw(ptr::slice_from_raw_parts_mut(
                self.pathlen,
                self.pathc,
            )));
        }
        *self = Self::default();
    }
}

unsafe fn str_arg<'a>(ptr: *const c_char, what: &'static str) -> Result<&'a str, GlobError> {
    if ptr.is_null() {
        return Err(GlobError::InvalidArgument(what));
    }
    CStr::from_ptr(ptr)
        .to_str()
        .map_err(|_| GlobError::InvalidArgument(what))
}

unsafe fn path_arg<'a>(ptr: *const c_char, what: &'static str) -> Result<&'a Path, GlobError> {
    if ptr.is_null() {
        return Err(GlobError::InvalidArgument(what));
    }
    let raw: &'a CStr = CStr::from_ptr(ptr);

    #[cfg(unix)]
    let path = {
        use std::ffi::OsStr;
        use std::os::unix::ffi::OsStrExt;
        Path::new(OsStr::from_bytes(raw.to_bytes()))
    };
    #[cfg(not(unix))]
    let path = Path::new(raw.to_str().map_err(|_| GlobError::InvalidArgument(what))?);

    Ok(path)
}

unsafe fn scan_args(
    pattern: *const c_char,
    base_path: *const c_char,
    flags: ScanFlags,
) -> Result<Matches, GlobError> {
    let pattern = str_arg(pattern, "pattern is NULL or not UTF-8")?;
    let base = path_arg(base_path, "base path is NULL or not UTF-8")?;
    scan(pattern, base, flags)
}

/// Empty the shared result buffer.
///
/// Every pointer returned by an earlier `glob_scan` becomes invalid. Resets
/// `glob_last_status` to `GLOB_OK`.
#[no_mangle]
pub extern "C" fn glob_clear() {
    buffer::global().clear();
    LAST_STATUS.store(GLOB_OK, Ordering::Relaxed);
}

/// Scan `base_path` for regular files whose name matches `pattern`.
///
/// # Parameters
/// * `pattern` - Glob pattern, `*` and `?` are wildcards (must not be NULL)
/// * `base_path` - Directory to walk (must not be NULL)
/// * `recursive` - Descend into subdirectories
/// * `out_size` - Receives the number of matches, 0 on failure (may be NULL)
///
/// # Returns
/// * A NULL-terminated array of paths, valid until the next `glob_scan` or `glob_clear`
/// * NULL on failure; see `glob_last_status`
///
/// The shared buffer is cleared before anything else, so a failed scan leaves
/// it empty.
///
/// # Safety
/// * `pattern` and `base_path` must be NULL or valid NUL-terminated strings
/// * `out_size` must be NULL or valid for writes
/// * The returned strings must not be freed or written by the caller
///
/// # Example
/// ```c
/// size_t n = 0;
/// const char *const *paths = glob_scan("*.txt", "docs", false, &n);
/// if (paths == NULL) {
///     fprintf(stderr, "scan failed: %d\n", glob_last_status());
/// }
/// for (size_t i = 0; i < n; i++) puts(paths[i]);
/// glob_clear();
/// ```
#[no_mangle]
pub unsafe extern "C" fn glob_scan(
    pattern: *const c_char,
    base_path: *const c_char,
    recursive: bool,
    out_size: *mut usize,
) -> *const *const c_char {
    let mut staged = buffer::global();
    staged.clear();

    let outcome = scan_args(pattern, base_path, ScanFlags::legacy(recursive))
        .and_then(|matches| staged.stage(&matches));

    let (status, count, array) = match outcome {
        Ok(()) => (GLOB_OK, staged.len(), staged.as_ptr()),
        Err(err) => {
            debug!(error = %err, "glob_scan failed");
            (err.code(), 0, ptr::null())
        }
    };

    LAST_STATUS.store(status, Ordering::Relaxed);
    if !out_size.is_null() {
        *out_size = count;
    }
    array
}

/// Alias of `glob_scan` under the name hosts of the original `glob.dll` bind.
///
/// # Safety
/// Same contract as `glob_scan`.
#[no_mangle]
pub unsafe extern "C" fn glob_cpp(
    pattern: *const c_char,
    base_path: *const c_char,
    recursive: bool,
    out_size: *mut usize,
) -> *const *const c_char {
    glob_scan(pattern, base_path, recursive, out_size)
}

/// Status of the most recent `glob_scan`: `GLOB_OK` or one of the
/// `GLOB_INVALID_PATTERN`, `GLOB_DIRECTORY_ACCESS`, `GLOB_INVALID_ARGUMENT` codes.
#[no_mangle]
pub extern "C" fn glob_last_status() -> c_int {
    LAST_STATUS.load(Ordering::Relaxed)
}

/// Scan into a caller-owned result.
///
/// `flags` is a combination of the `GLOB_RECURSIVE`, `GLOB_SORT`,
/// `GLOB_SKIP_UNREADABLE`, `GLOB_ESCAPE_META` and `GLOB_CASE_INSENSITIVE`
/// bits. Unknown bits are ignored. Does not touch the shared buffer.
///
/// # Returns
/// * `GLOB_OK`, with `*out` filled in (possibly with zero paths)
/// * An error code, with `*out` reset to empty
///
/// # Safety
/// * `pattern` and `base_path` must be NULL or valid NUL-terminated strings
/// * `out` must be NULL or valid for writes; any previous contents are
///   overwritten without being freed
///
/// # Example
/// ```c
/// glob_result_t res;
/// if (glob_find("*.log", "logs", GLOB_RECURSIVE | GLOB_SORT, &res) == GLOB_OK) {
///     for (size_t i = 0; i < res.pathc; i++) puts(res.pathv[i]);
///     glob_result_free(&res);
/// }
/// ```
#[no_mangle]
pub unsafe extern "C" fn glob_find(
    pattern: *const c_char,
    base_path: *const c_char,
    flags: c_int,
    out: *mut glob_result_t,
) -> c_int {
    if out.is_null() {
        return GLOB_INVALID_ARGUMENT;
    }
    ptr::write(out, glob_result_t::default());

    let flags = ScanFlags::from_bits_truncate(flags);
    match scan_args(pattern, base_path, flags).and_then(|m| glob_result_t::from_matches(&m)) {
        Ok(result) => {
            ptr::write(out, result);
            GLOB_OK
        }
        Err(err) => {
            debug!(error = %err, "glob_find failed");
            err.code()
        }
    }
}

/// Release a result filled by `glob_find` and reset it to empty.
///
/// NULL and already-released results are ignored.
///
/// # Safety
/// * `result` must be NULL or point to a `glob_result_t` filled by `glob_find`
///   (or zero-initialized)
#[no_mangle]
pub unsafe extern "C" fn glob_result_free(result: *mut glob_result_t) {
    if let Some(result) = result.as_mut() {
        result.release();
    }
}
