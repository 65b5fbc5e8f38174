//! Descriptor duplication and release syscalls

use std::io;
use std::os::fd::{AsRawFd, BorrowedFd, FromRawFd, IntoRawFd, OwnedFd};

/// Duplicate `fd` into a new close-on-exec descriptor owned by the caller.
pub(crate) fn dup(fd: BorrowedFd<'_>) -> io::Result<OwnedFd> {
    // SAFETY: fd is borrowed and so stays open for the duration of the call.
    let dup_fd = unsafe { libc::fcntl(fd.as_raw_fd(), libc::F_DUPFD_CLOEXEC, 0) };
    if dup_fd == -1 {
        return Err(io::Error::last_os_error());
    }
    // SAFETY: fcntl returned a fresh descriptor that nothing else owns.
    Ok(unsafe { OwnedFd::from_raw_fd(dup_fd) })
}

/// Close `fd` reporting the close(2) result which dropping an OwnedFd discards.
///
/// The descriptor is gone after this returns, even on error. EINTR is not
/// retried since the number may already be reused.
pub(crate) fn close(fd: OwnedFd) -> io::Result<()> {
    let raw = fd.into_raw_fd();
    // SAFETY: raw came out of an OwnedFd so we are its sole owner.
    let r = unsafe { libc::close(raw) };
    if r == -1 {
        return Err(io::Error::last_os_error());
    }
    Ok(())
}
