pub mod client;
pub mod commands;
pub mod session;

pub use client::{ClientError, Task, TodoClient, UserProfile};
pub use commands::{Cli, Commands, run};
pub use session::{Session, SessionFile};
