//! Scoped access to the descriptor of a connection

use std::rc::Rc;
use std::sync::Arc;

#[cfg(unix)]
use std::fs::File;
#[cfg(unix)]
use std::io;
#[cfg(unix)]
use std::net::{TcpListener, TcpStream, UdpSocket};
#[cfg(unix)]
use std::os::fd::{AsFd, BorrowedFd, OwnedFd};
#[cfg(unix)]
use std::os::unix::net::{UnixDatagram, UnixListener, UnixStream};

/// Connection that can lend its live descriptor to a callback.
///
/// This is the only thing a [`crate::Desc`] needs from the I/O stack that
/// owns the connection.
///
/// # Contract
///
/// [`RawConn::control`] runs `f` synchronously and at most once. The
/// descriptor handed to `f` stays open until `f` returns. When the descriptor
/// cannot be obtained (e.g. the connection is closed) an error is returned
/// and `f` is not run.
///
/// On targets without file descriptors the trait has no methods; the
/// constructors still accept it and fail with [`crate::DescError::Unsupported`].
pub trait RawConn {
    /// Run `f` with the live descriptor of the connection
    #[cfg(unix)]
    fn control(&self, f: &mut dyn FnMut(BorrowedFd<'_>)) -> io::Result<()>;
}

#[cfg(unix)]
macro_rules! impl_raw_conn_as_fd {
    ($($ty:ty),+ $(,)?) => {
        $(
            impl RawConn for $ty {
                fn control(&self, f: &mut dyn FnMut(BorrowedFd<'_>)) -> io::Result<()> {
                    f(self.as_fd());
                    Ok(())
                }
            }
        )+
    };
}

#[cfg(unix)]
impl_raw_conn_as_fd!(
    TcpStream,
    TcpListener,
    UdpSocket,
    UnixStream,
    UnixListener,
    UnixDatagram,
    File,
    OwnedFd,
);

#[cfg(unix)]
impl RawConn for BorrowedFd<'_> {
    fn control(&self, f: &mut dyn FnMut(BorrowedFd<'_>)) -> io::Result<()> {
        f(*self);
        Ok(())
    }
}

impl<T: RawConn + ?Sized> RawConn for &T {
    #[cfg(unix)]
    fn control(&self, f: &mut dyn FnMut(BorrowedFd<'_>)) -> io::Result<()> {
        (**self).control(f)
    }
}

impl<T: RawConn + ?Sized> RawConn for Box<T> {
    #[cfg(unix)]
    fn control(&self, f: &mut dyn FnMut(BorrowedFd<'_>)) -> io::Result<()> {
        (**self).control(f)
    }
}

impl<T: RawConn + ?Sized> RawConn for Rc<T> {
    #[cfg(unix)]
    fn control(&self, f: &mut dyn FnMut(BorrowedFd<'_>)) -> io::Result<()> {
        (**self).control(f)
    }
}

impl<T: RawConn + ?Sized> RawConn for Arc<T> {
    #[cfg(unix)]
    fn control(&self, f: &mut dyn FnMut(BorrowedFd<'_>)) -> io::Result<()> {
        (**self).control(f)
    }
}

#[cfg(all(unix, test))]
mod test {
    use super::RawConn;

    use std::net::{IpAddr, Ipv4Addr, SocketAddr, TcpListener};
    use std::os::fd::{AsFd, AsRawFd};
    use std::sync::Arc;

    fn lent_fd(conn: &dyn RawConn) -> i32 {
        let mut seen = -1;
        conn.control(&mut |fd| seen = fd.as_raw_fd()).unwrap();
        seen
    }

    #[test]
    fn lends_own_descriptor() {
        let s =
            TcpListener::bind(SocketAddr::new(IpAddr::V4(Ipv4Addr::new(127, 0, 0, 1)), 0)).unwrap();
        assert_eq!(lent_fd(&s), s.as_raw_fd());
    }
    #[test]
    fn forwards_through_pointers() {
        let s = Arc::new(
            TcpListener::bind(SocketAddr::new(IpAddr::V4(Ipv4Addr::new(127, 0, 0, 1)), 0)).unwrap(),
        );
        let raw = s.as_raw_fd();
        assert_eq!(lent_fd(&s), raw);
        assert_eq!(lent_fd(&&*s), raw);
        assert_eq!(lent_fd(&s.as_fd()), raw);
        let boxed: Box<dyn RawConn + '_> = Box::new(s.as_fd());
        assert_eq!(lent_fd(&boxed), raw);
    }
}
