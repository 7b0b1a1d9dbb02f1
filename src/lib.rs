//! Output Channel - leveled logging into named output panels
//!
//! A [`LogChannel`](logging::LogChannel) timestamps messages, tags them with a
//! severity level, renders optional payloads and appends the result to a sink
//! that the host tool can reveal or dispose.

pub mod config;
pub mod logging;
