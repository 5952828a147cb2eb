//! # System Interaction Layer
//!
//! This module provides abstractions for interacting with the underlying operating system.
//! It serves as a boundary between the core pipeline and the specifics of process
//! management and output presentation.
//!
//! ## Modules
//!
//! - **`executor`**: Spawns the expect script and drains both of its output streams
//!   concurrently, relaying each classified line to a sink before the exit wait
//!   completes.
//! - **`sink`**: The results-view abstraction shared by the stream readers, plus the
//!   terminal and in-memory implementations shipped with the CLI.

pub mod executor;
pub mod sink;
