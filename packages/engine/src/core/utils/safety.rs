//! Slot Access Macros
//!
//! Pool reads and writes go through `fast!`: bounds-checked in debug builds,
//! unchecked in release builds. Slot indices are always derived from
//! `slot * PIPE_PROP_COUNT + offset` with `slot < pipe_count`, so the release
//! path never sees an out-of-range index.
//!
//! Usage:
//! ```rust
//! use flow_pipes_engine::fast;
//!
//! let mut props = vec![0.0f32; 16];
//! fast!(props, [9] = 4.5);
//! assert_eq!(*fast!(props, [9]), 4.5);
//! ```

/// Indexed slice access that skips bounds checks outside debug builds
///
/// - `fast!(slice, [index])` reads and yields a reference
/// - `fast!(slice, [index] = value)` writes
#[macro_export]
macro_rules! fast {
    // Read: fast!(props, [i])
    ($slice:expr, [$index:expr]) => {{
        #[cfg(debug_assertions)]
        {
            // Debug: plain indexing, panics on a bad slot
            &$slice[$index]
        }
        #[cfg(not(debug_assertions))]
        {
            // Release: no bounds check
            unsafe { $slice.get_unchecked($index) }
        }
    }};

    // Write: fast!(props, [i] = v)
    ($slice:expr, [$index:expr] = $val:expr) => {{
        #[cfg(debug_assertions)]
        {
            // Debug: plain indexing, panics on a bad slot
            $slice[$index] = $val;
        }
        #[cfg(not(debug_assertions))]
        {
            // Release: no bounds check
            unsafe { *$slice.get_unchecked_mut($index) = $val; }
        }
    }};
}
