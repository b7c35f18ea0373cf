//! Errors raised while building intercept lists.

use crate::SideId;

/// Fatal failures of the half-plane.
///
/// These are not recoverable for the current map: the caller should abandon
/// the BSP build and refuse to load the map rather than continue with a
/// partially built tree.
#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum HPlaneError {
    /// Two adjacent intercepts are out of geometric order by more than the
    /// ordering tolerance after sorting.
    ///
    /// This points at corrupt map geometry or at a bug in the segment
    /// splitting upstream.
    #[error(
        "Invalid intercept order: {previous} (segment {previous_segment:?}) is ahead of {next} (segment {next_segment:?})"
    )]
    InvalidInterceptOrder {
        previous: f64,
        next: f64,
        previous_segment: SideId,
        next_segment: SideId,
    },
}
