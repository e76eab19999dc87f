//! Test doubles for exercising the engine without a live server.
//!
//! [`RecordingConnector`] hands out [`RecordingConnection`]s that log every SQL string they
//! receive, escape with MySQL rules and answer from a script of [`Reply`] values.

pub mod recording;
pub mod test_helpers;

pub use recording::{RecordingConnection, RecordingConnector, Reply};
pub use test_helpers::create_test_row;
