//! Network link plumbing: line codec, link event channel, and the async
//! I/O task bridging the TCP transport to the control loop.

pub mod channels;
pub mod codec;
pub mod io_task;
