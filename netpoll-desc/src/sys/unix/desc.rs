//! Descriptor handle owning a duplicated descriptor

use super::fd;

use crate::error::DescError;
use crate::Event;

use core::fmt;

use std::io;
use std::os::fd::{AsFd, AsRawFd, BorrowedFd, OwnedFd};

/// Descriptor handle registered with a poller.
///
/// Holds a duplicate of a connection descriptor together with the fixed
/// interest it was created with. The duplicate is owned by the handle alone:
/// closing or recycling the original connection descriptor never affects it.
///
/// # Concurrency
///
/// Methods are not meant to be called concurrently on one handle. Use one
/// handle per registration. [`Desc::close`] takes `&mut self` so a release
/// can never overlap an in-flight [`Desc::with_fd`].
///
/// # Release
///
/// [`Desc::close`] releases the duplicate and reports the close(2) result.
/// A handle dropped without `close` releases it silently. Either way the
/// duplicate is closed exactly once.
pub struct Desc {
    fd: Option<OwnedFd>,
    event: Event,
}

impl Desc {
    pub(crate) fn from_owned(fd: OwnedFd, event: Event) -> Self {
        Self {
            fd: Some(fd),
            event,
        }
    }
    /// Interest the handle was created with
    #[inline]
    pub fn event(&self) -> Event {
        self.event
    }
    /// Was the handle released with [`Desc::close`]
    #[inline]
    pub fn is_closed(&self) -> bool {
        self.fd.is_none()
    }
    /// Invoke `f` with the owned descriptor, which stays valid for the call.
    ///
    /// Fails with [`DescError::Closed`] after [`Desc::close`] without running
    /// `f`. An error returned by `f` comes back as [`DescError::Callback`].
    pub fn with_fd<F, T>(&self, f: F) -> Result<T, DescError>
    where
        F: FnOnce(BorrowedFd<'_>) -> io::Result<T>,
    {
        let owned = self.fd.as_ref().ok_or(DescError::Closed)?;
        f(owned.as_fd()).map_err(DescError::Callback)
    }
    /// Close the owned descriptor.
    ///
    /// The handle is released even when close(2) reports an error. Calling
    /// this again returns [`DescError::Closed`].
    pub fn close(&mut self) -> Result<(), DescError> {
        let owned = self.fd.take().ok_or(DescError::Closed)?;
        log::debug!("closing fd {} for {}", owned.as_raw_fd(), self.event);
        fd::close(owned).map_err(DescError::Close)
    }
}

impl Drop for Desc {
    fn drop(&mut self) {
        if let Some(owned) = self.fd.take() {
            let raw = owned.as_raw_fd();
            if let Err(e) = fd::close(owned) {
                log::warn!("closing fd {} on drop: {}", raw, e);
            }
        }
    }
}

impl fmt::Debug for Desc {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut d = f.debug_struct("Desc");
        match self.fd {
            Some(ref owned) => d.field("fd", &owned.as_raw_fd()),
            None => d.field("fd", &"closed"),
        };
        d.field("event", &self.event).finish()
    }
}

#[cfg(test)]
mod test {
    use crate::{handle, DescError, Event};

    use std::io;
    use std::io::{Read, Write};
    use std::os::fd::AsRawFd;
    use std::os::unix::net::UnixStream;

    /// Peer has no pending data but still sees the socket open
    fn peer_still_open(peer: &mut UnixStream) -> bool {
        let mut buf = [0u8; 1];
        match peer.read(&mut buf) {
            Err(e) => e.kind() == io::ErrorKind::WouldBlock,
            Ok(_) => false,
        }
    }
    /// Peer reads EOF once every descriptor of the other end is closed
    fn peer_sees_eof(peer: &mut UnixStream) -> bool {
        let mut buf = [0u8; 1];
        matches!(peer.read(&mut buf), Ok(0))
    }

    #[test]
    fn keeps_event() {
        let (a, _b) = UnixStream::pair().unwrap();
        let desc = handle(&a, Event::WRITE).unwrap();
        assert_eq!(desc.event(), Event::WRITE);
        assert!(desc.event().is_level_triggered());
        assert!(!desc.is_closed());
    }
    #[test]
    fn with_fd_lends_duplicate() {
        let (a, _b) = UnixStream::pair().unwrap();
        let desc = handle(&a, Event::READ).unwrap();
        let raw = desc.with_fd(|fd| Ok(fd.as_raw_fd())).unwrap();
        assert_ne!(raw, a.as_raw_fd());
        // Same descriptor every time until closed
        assert_eq!(desc.with_fd(|fd| Ok(fd.as_raw_fd())).unwrap(), raw);
    }
    #[test]
    fn callback_error_is_distinct() {
        let (a, _b) = UnixStream::pair().unwrap();
        let desc = handle(&a, Event::READ).unwrap();
        let r: Result<(), DescError> =
            desc.with_fd(|_| Err(io::Error::from_raw_os_error(libc::EAGAIN)));
        match r {
            Err(DescError::Callback(e)) => assert_eq!(e.raw_os_error(), Some(libc::EAGAIN)),
            other => panic!("expected Callback, got {:?}", other),
        }
        // Callback failing does not release anything
        assert!(!desc.is_closed());
    }
    #[test]
    fn close_twice_fails() {
        let (a, _b) = UnixStream::pair().unwrap();
        let mut desc = handle(&a, Event::READ).unwrap();
        desc.close().unwrap();
        assert!(desc.is_closed());
        assert!(matches!(desc.close(), Err(DescError::Closed)));
    }
    #[test]
    fn with_fd_after_close_fails_without_calling() {
        let (a, _b) = UnixStream::pair().unwrap();
        let mut desc = handle(&a, Event::READ).unwrap();
        desc.close().unwrap();
        let mut called = false;
        let r = desc.with_fd(|_| {
            called = true;
            Ok(())
        });
        assert!(matches!(r, Err(DescError::Closed)));
        assert!(!called);
    }
    #[test]
    fn debug_shows_state() {
        let (a, _b) = UnixStream::pair().unwrap();
        let mut desc = handle(&a, Event::READ | Event::ONE_SHOT).unwrap();
        let raw = desc.with_fd(|fd| Ok(fd.as_raw_fd())).unwrap();
        let open = format!("{:?}", desc);
        assert!(open.contains(&format!("fd: {}", raw)));
        desc.close().unwrap();
        let closed = format!("{:?}", desc);
        assert!(closed.contains("\"closed\""));
    }
    #[test]
    fn close_releases_the_duplicate() {
        let (a, mut b) = UnixStream::pair().unwrap();
        b.set_nonblocking(true).unwrap();
        let mut desc = handle(&a, Event::READ).unwrap();

        // Only the duplicate keeps the socket alive now
        drop(a);
        assert!(peer_still_open(&mut b));

        desc.close().unwrap();
        assert!(peer_sees_eof(&mut b));
    }
    #[test]
    fn drop_releases_the_duplicate() {
        let (a, mut b) = UnixStream::pair().unwrap();
        b.set_nonblocking(true).unwrap();
        let desc = handle(&a, Event::WRITE | Event::ONE_SHOT).unwrap();

        drop(a);
        assert!(peer_still_open(&mut b));

        drop(desc);
        assert!(peer_sees_eof(&mut b));
    }
    #[test]
    fn release_leaves_original_open() {
        let (a, mut b) = UnixStream::pair().unwrap();
        let mut closed = handle(&a, Event::READ).unwrap();
        let dropped = handle(&a, Event::WRITE).unwrap();
        closed.close().unwrap();
        drop(dropped);

        // SAFETY: a is alive so its descriptor is open for the call.
        let flags = unsafe { libc::fcntl(a.as_raw_fd(), libc::F_GETFD) };
        assert_ne!(flags, -1);
        (&a).write_all(b"ok").unwrap();
        let mut buf = [0u8; 2];
        b.read_exact(&mut buf).unwrap();
        assert_eq!(&buf, b"ok");
    }
}
