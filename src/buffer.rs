//! Process-wide staging buffer behind the legacy `glob_scan` entry point.
//!
//! The C caller receives pointers into this buffer, not copies. They stay
//! valid until the next `glob_scan` or `glob_clear`, from any caller.

use crate::error::GlobError;
use crate::scan::Matches;
use std::ffi::{c_char, CString};
use std::path::Path;
use std::ptr;
use std::sync::{Mutex, MutexGuard};

static BUFFER: Mutex<ResultBuffer> = Mutex::new(ResultBuffer::new());

/// Locks the process-wide buffer, creating it empty on first use.
///
/// The buffer is only ever replaced wholesale, so a poisoned lock still holds
/// a consistent value and is recovered.
pub(crate) fn global() -> MutexGuard<'static, ResultBuffer> {
    BUFFER.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

/// Owned C strings plus a NULL-terminated array of pointers into them.
#[derive(Debug, Default)]
pub struct ResultBuffer {
    strings: Vec<CString>,
    pointers: Vec<*const c_char>,
}

// SAFETY: the raw pointers only ever point into `strings`, which this buffer owns
unsafe impl Send for ResultBuffer {}

impl ResultBuffer {
    pub const fn new() -> Self {
        ResultBuffer {
            strings: Vec::new(),
            pointers: Vec::new(),
        }
    }

    /// Replaces the contents with `matches`.
    ///
    /// The buffer is cleared first, so on error it is left empty.
    pub fn stage(&mut self, matches: &Matches) -> Result<(), GlobError> {
        self.clear();

        let mut strings = Vec::with_capacity(matches.len());
        for path in matches {
            strings.push(path_to_cstring(path)?);
        }

        self.pointers = strings
            .iter()
            .map(|s| s.as_ptr())
            .chain(std::iter::once(ptr::null()))
            .collect();
        self.strings = strings;
        Ok(())
    }

    /// Drops every staged string. Pointers handed out earlier now dangle.
    pub fn clear(&mut self) {
        self.pointers.clear();
        self.strings.clear();
    }

    /// Number of staged paths, not counting the NULL terminator.
    #[inline]
    pub fn len(&self) -> usize {
        self.strings.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.strings.is_empty()
    }

    /// Pointer to the first entry of the NULL-terminated array.
    ///
    /// Only meaningful after a successful [`stage`](Self::stage); an empty
    /// buffer has no terminator and returns a dangling, non-NULL pointer.
    pub fn as_ptr(&self) -> *const *const c_char {
        self.pointers.as_ptr()
    }

    /// Iterates over the staged strings.
    pub fn iter(&self) -> impl Iterator<Item = &std::ffi::CStr> + '_ {
        self.strings.iter().map(CString::as_c_str)
    }
}

/// Encodes a path the way the host filesystem API spells it: raw bytes on
/// Unix, UTF-8 elsewhere.
pub(crate) fn path_to_cstring(path: &Path) -> Result<CString, GlobError> {
    #[cfg(unix)]
    let bytes = {
        use std::os::unix::ffi::OsStrExt;
        path.as_os_str().as_bytes().to_vec()
    };
    #[cfg(not(unix))]
    let bytes = path.to_string_lossy().into_owned().into_bytes();

    CString::new(bytes).map_err(|_| GlobError::InvalidArgument("path contains a NUL byte"))
}
