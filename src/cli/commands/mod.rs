//! One module per subcommand; each exposes an `execute` function.

pub mod add;
pub mod category;
pub mod copy;
pub mod delete;
pub mod edit;
pub mod init;
pub mod list;
pub mod rotate;
pub mod search;
pub mod show;
