use crate::error::GlobError;
use crate::flags::ScanFlags;
use crate::pattern::Pattern;
use std::fs;
use std::io;
use std::ops::Index;
use std::path::{Path, PathBuf};
use std::slice;
use tracing::{debug, trace, warn};
use walkdir::WalkDir;

/// Result of a [`scan()`] call.
///
/// Owns the matched paths. Nothing here is shared with other scans, so a
/// `Matches` stays valid no matter what other callers do.
///
/// # Example
///
/// ```no_run
/// use dirglob::{scan, ScanFlags};
///
/// let result = scan("*.log", "/var/log", ScanFlags::RECURSIVE)?;
/// for path in &result {
///     println!("{}", path.display());
/// }
///
/// if !result.is_empty() {
///     println!("First: {}", result[0].display());
/// }
/// # Ok::<(), dirglob::GlobError>(())
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Matches {
    paths: Vec<PathBuf>,
}

impl Matches {
    /// Returns the number of matched paths.
    #[inline]
    pub fn len(&self) -> usize {
        self.paths.len()
    }

    /// Returns `true` if no paths matched.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.paths.is_empty()
    }

    /// Returns the path at the given index, or `None` if out of bounds.
    #[inline]
    pub fn get(&self, index: usize) -> Option<&Path> {
        self.paths.get(index).map(PathBuf::as_path)
    }

    /// Returns an iterator over the matched paths, in visit order.
    #[inline]
    pub fn iter(&self) -> MatchesIter<'_> {
        MatchesIter {
            inner: self.paths.iter(),
        }
    }

    pub fn as_paths(&self) -> &[PathBuf] {
        &self.paths
    }

    /// Converts to a vector of owned strings, replacing invalid UTF-8 lossily.
    pub fn to_strings(&self) -> Vec<String> {
        self.iter()
            .map(|p| p.to_string_lossy().into_owned())
            .collect()
    }

    pub fn into_paths(self) -> Vec<PathBuf> {
        self.paths
    }
}

impl From<Vec<PathBuf>> for Matches {
    fn from(paths: Vec<PathBuf>) -> Self {
        Matches { paths }
    }
}

impl Index<usize> for Matches {
    type Output = Path;

    /// Returns the path at the given index.
    ///
    /// # Panics
    ///
    /// Panics if `index >= self.len()`.
    fn index(&self, index: usize) -> &Self::Output {
        &self.paths[index]
    }
}

impl<'a> IntoIterator for &'a Matches {
    type Item = &'a Path;
    type IntoIter = MatchesIter<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Iterator over [`Matches`], yielding `&Path`.
#[derive(Debug, Clone)]
pub struct MatchesIter<'a> {
    inner: slice::Iter<'a, PathBuf>,
}

impl<'a> Iterator for MatchesIter<'a> {
    type Item = &'a Path;

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(PathBuf::as_path)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }

    fn nth(&mut self, n: usize) -> Option<Self::Item> {
        self.inner.nth(n).map(PathBuf::as_path)
    }
}

impl ExactSizeIterator for MatchesIter<'_> {}

impl DoubleEndedIterator for MatchesIter<'_> {
    fn next_back(&mut self) -> Option<Self::Item> {
        self.inner.next_back().map(PathBuf::as_path)
    }
}

impl std::iter::FusedIterator for MatchesIter<'_> {}

/// Find regular files under `base` whose file name matches `pattern`.
///
/// The pattern is matched against the file name only, never the full path,
/// and has to match the whole name. Returned paths are `base` joined with the
/// walked components.
///
/// # Arguments
///
/// * `pattern` - Glob pattern using `*` and `?` (e.g. `"*.txt"`, `"file?.log"`)
/// * `base` - Directory to walk
/// * `flags` - Controls recursion, ordering, error tolerance and translation
///
/// # Returns
///
/// * `Ok(Matches)` - The walk completed; the result may be empty
/// * `Err(GlobError::InvalidPattern)` - The pattern did not compile
/// * `Err(GlobError::DirectoryAccess)` - `base` is not a readable directory, or
///   an entry under it could not be read and `SKIP_UNREADABLE` is not set
///
/// # Example
///
/// ```no_run
/// use dirglob::{scan, ScanFlags};
///
/// // Direct children only, in directory order
/// let txt = scan("*.txt", "docs", ScanFlags::empty())?;
///
/// // Whole tree, sorted
/// let logs = scan("app-??.log", "logs", ScanFlags::RECURSIVE | ScanFlags::SORT)?;
/// # Ok::<(), dirglob::GlobError>(())
/// ```
pub fn scan(
    pattern: &str,
    base: impl AsRef<Path>,
    flags: ScanFlags,
) -> Result<Matches, GlobError> {
    let compiled = Pattern::new(pattern, flags)?;
    scan_with(&compiled, base, flags)
}

/// Like [`scan()`], with an already compiled pattern.
///
/// Translation flags are ignored here; they were applied when `pattern` was built.
pub fn scan_with(
    pattern: &Pattern,
    base: impl AsRef<Path>,
    flags: ScanFlags,
) -> Result<Matches, GlobError> {
    let base = base.as_ref();
    debug!(
        pattern = pattern.as_str(),
        base = %base.display(),
        ?flags,
        "scanning"
    );

    ensure_directory(base)?;

    let max_depth = if flags.contains(ScanFlags::RECURSIVE) {
        usize::MAX
    } else {
        1
    };
    let walker = WalkDir::new(base)
        .min_depth(1)
        .max_depth(max_depth)
        .follow_links(false);

    let mut paths = Vec::new();
    for entry in walker {
        let entry = match entry {
            Ok(entry) => entry,
            Err(err) if flags.contains(ScanFlags::SKIP_UNREADABLE) => {
                warn!(error = %err, "skipping unreadable entry");
                continue;
            }
            Err(err) => return Err(GlobError::from_walk(base, err)),
        };

        // symlinks report their own type here, so they never count as files
        if !entry.file_type().is_file() {
            continue;
        }

        if pattern.is_match(&entry.file_name().to_string_lossy()) {
            trace!(path = %entry.path().display(), "matched");
            paths.push(entry.into_path());
        }
    }

    if flags.contains(ScanFlags::SORT) {
        paths.sort();
    }

    debug!(count = paths.len(), "scan finished");
    Ok(Matches { paths })
}

fn ensure_directory(base: &Path) -> Result<(), GlobError> {
    let metadata = fs::metadata(base).map_err(|source| GlobError::DirectoryAccess {
        path: base.to_path_buf(),
        source,
    })?;

    if !metadata.is_dir() {
        return Err(GlobError::DirectoryAccess {
            path: base.to_path_buf(),
            source: io::Error::from(io::ErrorKind::NotADirectory),
        });
    }
    Ok(())
}
