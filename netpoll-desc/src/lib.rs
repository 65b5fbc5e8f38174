#![warn(
    clippy::unwrap_used,
    missing_docs,
    rust_2018_idioms,
    unused_lifetimes,
    unused_qualifications
)]
#![doc = include_str!("../README.md")]

//***********************************************
// Re-Exports
//***********************************************
#[doc(inline)]
pub use netpoll_event::Event;

//-----------------------------------------------
// All Errors
//-----------------------------------------------
pub mod error;
#[doc(inline)]
pub use error::DescError;

//-----------------------------------------------
// Descriptor access capability of connections
//-----------------------------------------------
mod raw_conn;
#[doc(inline)]
pub use raw_conn::RawConn;

//-----------------------------------------------
// Platform dependent handle & construction
//-----------------------------------------------
mod sys;
#[doc(inline)]
pub use sys::{handle, Desc};

//-----------------------------------------------
// Convenience constructors
//-----------------------------------------------

/// Create a read [`Desc`], same as `handle(conn, Event::READ | Event::EDGE_TRIGGERED)`
pub fn handle_read<C>(conn: &C) -> Result<Desc, DescError>
where
    C: RawConn + ?Sized,
{
    handle(conn, Event::READ | Event::EDGE_TRIGGERED)
}

/// Create a one-shot read [`Desc`], same as `handle(conn, Event::READ | Event::ONE_SHOT)`
pub fn handle_read_once<C>(conn: &C) -> Result<Desc, DescError>
where
    C: RawConn + ?Sized,
{
    handle(conn, Event::READ | Event::ONE_SHOT)
}

/// Create a write [`Desc`], same as `handle(conn, Event::WRITE | Event::EDGE_TRIGGERED)`
pub fn handle_write<C>(conn: &C) -> Result<Desc, DescError>
where
    C: RawConn + ?Sized,
{
    handle(conn, Event::WRITE | Event::EDGE_TRIGGERED)
}

/// Create a one-shot write [`Desc`], same as `handle(conn, Event::WRITE | Event::ONE_SHOT)`
pub fn handle_write_once<C>(conn: &C) -> Result<Desc, DescError>
where
    C: RawConn + ?Sized,
{
    handle(conn, Event::WRITE | Event::ONE_SHOT)
}

/// Create a read and write [`Desc`], same as
/// `handle(conn, Event::READ | Event::WRITE | Event::EDGE_TRIGGERED)`
pub fn handle_read_write<C>(conn: &C) -> Result<Desc, DescError>
where
    C: RawConn + ?Sized,
{
    handle(conn, Event::READ | Event::WRITE | Event::EDGE_TRIGGERED)
}
