//! Duplicate-and-own implementation for epoll / kqueue platforms

mod desc;
mod fd;

pub use desc::Desc;

use crate::error::DescError;
use crate::{Event, RawConn};

use std::io;
use std::os::fd::{AsRawFd, BorrowedFd, OwnedFd};

/// Create a new [`Desc`] for `conn` with the given interest.
///
/// The descriptor of `conn` is duplicated while it is lent out by
/// [`RawConn::control`], the returned handle owns the duplicate. The
/// connection keeps its own descriptor and may close it at any time without
/// affecting the handle.
///
/// The handle may be passed to a poller for registration via
/// [`Desc::with_fd`]. Release it with [`Desc::close`] once monitoring ends.
///
/// ```rust
/// use std::os::unix::net::UnixStream;
/// use netpoll_desc::{handle, Event};
///
/// let (a, _b) = UnixStream::pair().expect("socketpair");
/// let mut desc = handle(&a, Event::READ | Event::ONE_SHOT).expect("handle");
/// assert_eq!(desc.event(), Event::READ | Event::ONE_SHOT);
/// desc.close().expect("close");
/// ```
pub fn handle<C>(conn: &C, event: Event) -> Result<Desc, DescError>
where
    C: RawConn + ?Sized,
{
    if !event.is_valid_interest() {
        return Err(DescError::InvalidEvent(event));
    }

    let mut dup_res: Option<io::Result<OwnedFd>> = None;
    conn.control(&mut |lent: BorrowedFd<'_>| {
        if dup_res.is_some() {
            return;
        }
        let res = fd::dup(lent);
        if let Ok(ref dup_fd) = res {
            log::debug!(
                "duplicated fd {} -> {} for {}",
                lent.as_raw_fd(),
                dup_fd.as_raw_fd(),
                event
            );
        }
        dup_res = Some(res);
    })
    .map_err(DescError::Acquire)?;

    match dup_res {
        Some(Ok(dup_fd)) => Ok(Desc::from_owned(dup_fd, event)),
        Some(Err(e)) => Err(DescError::Duplicate(e)),
        None => Err(DescError::Acquire(io::Error::new(
            io::ErrorKind::Other,
            "connection did not lend its descriptor",
        ))),
    }
}
