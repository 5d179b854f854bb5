//! # dirglob
//!
//! Glob-style filename matching over a directory tree, usable from Rust and,
//! as a shared library, from C.
//!
//! - `*` matches any run of characters (including none)
//! - `?` matches exactly one character
//! - everything else, `.` included, is literal
//!
//! Patterns are matched against a file's name only, and must match the whole
//! name. Only regular files are returned; directories, symlinks and special
//! files are skipped.
//!
//! ## Basic Usage
//!
//! ```no_run
//! use dirglob::{scan, ScanFlags};
//!
//! let result = scan("*.txt", "notes", ScanFlags::RECURSIVE)?;
//! for path in &result {
//!     println!("{}", path.display());
//! }
//! # Ok::<(), dirglob::GlobError>(())
//! ```
//!
//! ## Flags
//!
//! | Flag | Effect |
//! |------|--------|
//! | `RECURSIVE` | Walk every subdirectory, not just direct children |
//! | `SORT` | Sort results by path instead of directory order |
//! | `SKIP_UNREADABLE` | Skip unreadable entries instead of failing |
//! | `ESCAPE_META` | Treat regex metacharacters in the pattern literally |
//! | `CASE_INSENSITIVE` | Ignore case when matching names |
//!
//! **Note:** without `ESCAPE_META`, characters other than `*`, `?` and `.` are
//! passed to the regex engine verbatim, as the original library did. `a|b`
//! matches `a` or `b`, and an unbalanced `(` is an
//! [`InvalidPattern`](GlobError::InvalidPattern) error. Use
//! [`ScanFlags::RECOMMENDED`] for untrusted patterns.
//!
//! ## Error Handling
//!
//! ```no_run
//! use dirglob::{scan, GlobError, ScanFlags};
//!
//! match scan("*.log", "/var/log", ScanFlags::empty()) {
//!     Ok(result) if result.is_empty() => println!("No files matched"),
//!     Ok(result) => println!("Found {} files", result.len()),
//!     Err(GlobError::InvalidPattern { pattern, .. }) => println!("bad pattern {pattern}"),
//!     Err(err) => println!("{err}"),
//! }
//! ```
//!
//! ## C API
//!
//! See `include/dirglob.h`. `glob_scan`/`glob_clear` return borrowed arrays
//! from a shared buffer, valid until the next call to either. `glob_find`/
//! `glob_result_free` hand out results the caller owns.

mod buffer;
mod error;
mod flags;
mod pattern;
mod scan;

pub mod ffi;

pub use buffer::ResultBuffer;
pub use error::*;
pub use flags::*;
pub use pattern::*;
pub use scan::*;
