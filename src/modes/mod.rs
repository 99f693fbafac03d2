//! Front-ends that feed text commands to the [`CommandProcessor`](crate::engine::CommandProcessor)
//!
//! - `batch` - one command per line from a file
//! - `interactive` - a `$ ` prompt on stdin until `exit` or Ctrl+C

pub mod batch;
pub mod interactive;

pub use batch::run_batch;
pub use interactive::{run_interactive, spawn_stdin_reader};
