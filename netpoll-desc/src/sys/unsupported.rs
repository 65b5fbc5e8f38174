//! Targets without native readiness notification

use crate::error::DescError;
use crate::{Event, RawConn};

use core::convert::Infallible;
use core::fmt;

/// Descriptor handle, never constructed on this target.
pub struct Desc {
    never: Infallible,
}

/// Always fails with [`DescError::Unsupported`] on this target.
pub fn handle<C>(_conn: &C, _event: Event) -> Result<Desc, DescError>
where
    C: RawConn + ?Sized,
{
    Err(DescError::Unsupported(std::env::consts::OS))
}

impl Desc {
    /// Interest the handle was created with
    pub fn event(&self) -> Event {
        match self.never {}
    }
    /// Was the handle released
    pub fn is_closed(&self) -> bool {
        match self.never {}
    }
    /// Unreachable, no handle exists on this target
    pub fn with_fd<F, T>(&self, _f: F) -> Result<T, DescError> {
        match self.never {}
    }
    /// Unreachable, no handle exists on this target
    pub fn close(&mut self) -> Result<(), DescError> {
        match self.never {}
    }
}

impl fmt::Debug for Desc {
    fn fmt(&self, _: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.never {}
    }
}
