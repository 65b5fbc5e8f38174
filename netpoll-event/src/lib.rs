#![warn(
    clippy::unwrap_used,
    missing_docs,
    rust_2018_idioms,
    unused_lifetimes,
    unused_qualifications
)]
#![doc = include_str!("../README.md")]

use core::fmt;
use core::fmt::Display;

bitflags::bitflags! {
    /// Readiness interest of a descriptor handle.
    ///
    /// Without [`Event::EDGE_TRIGGERED`] the interest is level-triggered and
    /// without [`Event::ONE_SHOT`] notifications keep firing until the
    /// registration is removed. A mask is only usable for a handle when it
    /// carries at least one of [`Event::READ`] or [`Event::WRITE`], see
    /// [`Event::is_valid_interest`].
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
    pub struct Event: u16 {
        /// Readable
        const READ = 0x1;
        /// Writable
        const WRITE = 0x2;
        /// Disarm after the first notification until re-armed
        const ONE_SHOT = 0x4;
        /// Notify on state transitions only
        const EDGE_TRIGGERED = 0x8;
    }
}

impl Event {
    /// At least one of READ or WRITE is set
    #[inline]
    pub fn is_valid_interest(&self) -> bool {
        self.intersects(Self::READ | Self::WRITE)
    }
    /// EDGE_TRIGGERED is set
    #[inline]
    pub fn is_edge_triggered(&self) -> bool {
        self.contains(Self::EDGE_TRIGGERED)
    }
    /// EDGE_TRIGGERED is not set
    #[inline]
    pub fn is_level_triggered(&self) -> bool {
        !self.is_edge_triggered()
    }
    /// ONE_SHOT is set
    #[inline]
    pub fn is_one_shot(&self) -> bool {
        self.contains(Self::ONE_SHOT)
    }
    /// Translate into the `events` field of `libc::epoll_event` as expected
    /// by epoll_ctl(2).
    ///
    /// READ also asks for EPOLLRDHUP so that a peer shutdown wakes up readers.
    #[cfg(any(target_os = "linux", target_os = "android"))]
    pub fn epoll_events(&self) -> u32 {
        let mut mask: i32 = 0;
        if self.contains(Self::READ) {
            mask |= libc::EPOLLIN | libc::EPOLLRDHUP;
        }
        if self.contains(Self::WRITE) {
            mask |= libc::EPOLLOUT;
        }
        if self.contains(Self::ONE_SHOT) {
            mask |= libc::EPOLLONESHOT;
        }
        if self.contains(Self::EDGE_TRIGGERED) {
            mask |= libc::EPOLLET;
        }
        mask as u32
    }
}

impl Display for Event {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_empty() {
            return write!(f, "EMPTY");
        }
        for (idx, (name, _)) in self.iter_names().enumerate() {
            if idx > 0 {
                write!(f, "|")?;
            }
            write!(f, "{}", name)?;
        }
        Ok(())
    }
}
