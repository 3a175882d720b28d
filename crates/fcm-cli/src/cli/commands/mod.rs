//! CLI command handlers, one file per subcommand.

mod add;
mod completions;
mod list;
mod message;
mod notify;
mod remove;
mod send;

pub use add::run_add;
pub use completions::run_completions;
pub use list::run_list;
pub use message::run_message;
pub use notify::run_notify;
pub use remove::run_remove;
