//! Filesystem operations: the copy executor and its I/O helpers.

mod copy;
mod helpers;
mod util;

pub use copy::copy_to_target;
pub use helpers::describe_io_error;
pub(crate) use util::unique_temp_path;
