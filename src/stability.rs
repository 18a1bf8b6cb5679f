//! Stability tags carried by the public record types.
//!
//! Every record declares its tag through [`Annotated`]. Deprecated records
//! call [`surface`] from their constructors, which logs a warning and hands
//! the notice back to the caller.

use std::fmt;
use tracing::warn;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stability {
    Experimental,
    Stable,
    Deprecated {
        since: &'static str,
        note: &'static str,
    },
}

impl Stability {
    pub fn is_deprecated(&self) -> bool {
        matches!(self, Self::Deprecated { .. })
    }
}

impl fmt::Display for Stability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Experimental => write!(f, "experimental"),
            Self::Stable => write!(f, "stable"),
            Self::Deprecated { since, .. } => write!(f, "deprecated since {}", since),
        }
    }
}

/// Type-level stability metadata.
pub trait Annotated {
    const NAME: &'static str;
    const STABILITY: Stability;
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeprecationNotice {
    pub type_name: &'static str,
    pub since: &'static str,
    pub note: &'static str,
}

impl fmt::Display for DeprecationNotice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "`{}` is deprecated since {}. {}",
            self.type_name, self.since, self.note
        )
    }
}

/// Returns the deprecation notice for `T`, if any, without logging it.
pub fn deprecation_notice<T: Annotated>() -> Option<DeprecationNotice> {
    match T::STABILITY {
        Stability::Deprecated { since, note } => Some(DeprecationNotice {
            type_name: T::NAME,
            since,
            note,
        }),
        _ => None,
    }
}

/// Logs the deprecation notice for `T` and returns it.
pub fn surface<T: Annotated>() -> Option<DeprecationNotice> {
    let notice = deprecation_notice::<T>()?;
    warn!(type_name = notice.type_name, since = notice.since, "{}", notice);
    Some(notice)
}
