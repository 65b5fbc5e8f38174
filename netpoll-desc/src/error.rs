//! Descriptor handle Errors

use crate::Event;

use core::fmt;
use core::fmt::Display;

use std::error::Error;
use std::io;

/// Errors from creating, accessing and releasing a [`crate::Desc`]
#[derive(Debug)]
pub enum DescError {
    /// The connection could not give access to its descriptor.
    Acquire(io::Error),
    /// Duplicating the connection descriptor failed.
    Duplicate(io::Error),
    /// Closing the duplicated descriptor failed. The handle is released regardless.
    Close(io::Error),
    /// The handle was already released.
    Closed,
    /// Interest has neither READ nor WRITE.
    InvalidEvent(Event),
    /// Descriptor handles are not available on this target OS.
    Unsupported(&'static str),
    /// The callback given to [`crate::Desc::with_fd`] failed.
    Callback(io::Error),
}

impl Display for DescError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Acquire(e) => write!(f, "obtaining fd: {}", e),
            Self::Duplicate(e) => write!(f, "duplicating fd: {}", e),
            Self::Close(e) => write!(f, "closing fd: {}", e),
            Self::Closed => write!(f, "Descriptor handle is already closed."),
            Self::InvalidEvent(ev) => {
                write!(f, "Invalid interest {}, must have READ or WRITE.", ev)
            }
            Self::Unsupported(os) => write!(f, "unsupported on {}", os),
            Self::Callback(e) => write!(f, "fd callback: {}", e),
        }
    }
}

impl Error for DescError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Acquire(e) | Self::Duplicate(e) | Self::Close(e) | Self::Callback(e) => Some(e),
            Self::Closed | Self::InvalidEvent(_) | Self::Unsupported(_) => None,
        }
    }
}
