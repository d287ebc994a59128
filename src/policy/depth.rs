use std::fmt;

/// Remaining recursion budget of a traversal frame
///
/// `Unbounded` is its own mode rather than a very large count: descending from
/// it never reaches zero. Callers that still speak the `-1` convention can
/// convert with `Depth::from(-1)`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Depth {
    #[default]
    Unbounded,
    Limited(u32),
}

impl Depth {
    pub const fn limited(levels: u32) -> Self {
        Self::Limited(levels)
    }

    /// Returns true when no further level may be emitted
    pub const fn is_exhausted(self) -> bool {
        matches!(self, Self::Limited(0))
    }

    /// Budget for the next level down
    pub const fn descend(self) -> Self {
        match self {
            Self::Unbounded => Self::Unbounded,
            Self::Limited(levels) => Self::Limited(levels.saturating_sub(1)),
        }
    }
}

impl From<u32> for Depth {
    fn from(levels: u32) -> Self {
        Self::Limited(levels)
    }
}

/// Any negative value means unbounded
impl From<i64> for Depth {
    fn from(raw: i64) -> Self {
        if raw < 0 {
            Self::Unbounded
        } else {
            Self::Limited(u32::try_from(raw).unwrap_or(u32::MAX))
        }
    }
}

impl From<i32> for Depth {
    fn from(raw: i32) -> Self {
        Self::from(i64::from(raw))
    }
}

impl fmt::Display for Depth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Unbounded => write!(f, "unbounded"),
            Self::Limited(levels) => write!(f, "{levels}"),
        }
    }
}
