//! Flag types for dirglob scans.

use bitflags::bitflags;

bitflags! {
    /// Options controlling pattern translation and the directory walk.
    ///
    /// # Example
    ///
    /// ```
    /// use dirglob::ScanFlags;
    ///
    /// let flags = ScanFlags::RECURSIVE | ScanFlags::SORT;
    /// assert!(flags.contains(ScanFlags::RECURSIVE));
    /// ```
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct ScanFlags: i32 {
        /// Descend into every subdirectory instead of only listing direct children.
        const RECURSIVE = 1 << 0;

        /// Sort the result by path. Without it, results follow directory order.
        const SORT = 1 << 1;

        /// Skip entries that cannot be read instead of failing the whole scan.
        const SKIP_UNREADABLE = 1 << 2;

        /// Escape regex metacharacters in literal parts of the pattern.
        ///
        /// Without this flag a pattern like `a|b` is handed to the regex engine
        /// as-is and matches either `a` or `b`.
        const ESCAPE_META = 1 << 3;

        /// Compare file names ignoring case.
        const CASE_INSENSITIVE = 1 << 4;

        /// Behaviour of the original library: nothing set.
        const LEGACY = 0;

        /// Recommended defaults for new callers.
        ///
        /// Enables: ESCAPE_META, SORT
        const RECOMMENDED = Self::ESCAPE_META.bits() | Self::SORT.bits();
    }
}

impl ScanFlags {
    /// Flags for the legacy `glob_scan` entry point, which only carries a recursion switch.
    pub fn legacy(recursive: bool) -> Self {
        let mut flags = ScanFlags::LEGACY;
        flags.set(ScanFlags::RECURSIVE, recursive);
        flags
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flag_values_are_stable() {
        // These are part of the C header.
        assert_eq!(ScanFlags::RECURSIVE.bits(), 0x01);
        assert_eq!(ScanFlags::SORT.bits(), 0x02);
        assert_eq!(ScanFlags::SKIP_UNREADABLE.bits(), 0x04);
        assert_eq!(ScanFlags::ESCAPE_META.bits(), 0x08);
        assert_eq!(ScanFlags::CASE_INSENSITIVE.bits(), 0x10);
    }

    #[test]
    fn test_recommended_contains_expected_flags() {
        let recommended = ScanFlags::RECOMMENDED;
        assert!(recommended.contains(ScanFlags::ESCAPE_META));
        assert!(recommended.contains(ScanFlags::SORT));
        assert!(!recommended.contains(ScanFlags::RECURSIVE));
        assert!(ScanFlags::LEGACY.is_empty());
    }

    #[test]
    fn test_legacy_only_sets_recursion() {
        assert_eq!(ScanFlags::legacy(true), ScanFlags::RECURSIVE);
        assert_eq!(ScanFlags::legacy(false), ScanFlags::empty());
    }

    #[test]
    fn test_unknown_bits_are_dropped() {
        let flags = ScanFlags::from_bits_truncate(0x7fff_0001);
        assert_eq!(flags, ScanFlags::RECURSIVE);
    }
}
