//! Configuration files
//!
//! Two plain-text files drive a session:
//!
//! - **`input.txt`**: the decay chain ([`read_input`] → [`DecayParameters`](crate::physics::DecayParameters))
//! - **`settings.txt`**: what to run and plot ([`read_settings`] → [`Settings`])
//!
//! Both share the `Name = arg, arg, ...` format handled by [`KeyValueFile`].
//! Every value is converted to seconds, atoms or plain fractions while reading
//! (see [`units`]), so the solvers never see a unit.

pub mod units;
mod reader;
mod input;
mod settings;

pub use reader::{normalize, Entry, KeyValueFile};
pub use input::{parse_input, read_input};
pub use settings::{parse_settings, read_settings, FinalGraphs, Settings};
