//! Tolerance window around a move target.

/// Open interval `(target - tolerance, target + tolerance)`.
///
/// The same comparison is used for positive and negative targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ToleranceWindow {
    target: i32,
    tolerance: i32,
}

impl ToleranceWindow {
    /// Window of half-width `tolerance` around `target`.
    #[inline]
    pub const fn new(target: i32, tolerance: i32) -> Self {
        Self { target, tolerance }
    }

    /// Move target.
    #[inline]
    pub const fn target(&self) -> i32 {
        self.target
    }

    /// Half-width of the window.
    #[inline]
    pub const fn tolerance(&self) -> i32 {
        self.tolerance
    }

    /// Exclusive lower bound.
    #[inline]
    pub fn lower(&self) -> i32 {
        self.target.saturating_sub(self.tolerance)
    }

    /// Exclusive upper bound.
    #[inline]
    pub fn upper(&self) -> i32 {
        self.target.saturating_add(self.tolerance)
    }

    /// Check whether a position lies strictly inside the window.
    #[inline]
    pub fn contains(&self, position: i32) -> bool {
        position > self.lower() && position < self.upper()
    }

    /// Distance from the target.
    #[inline]
    pub fn error(&self, position: i32) -> u32 {
        (i64::from(position) - i64::from(self.target)).unsigned_abs() as u32
    }
}
