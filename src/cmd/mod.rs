/// Manifest literal rendering command.
pub mod render;
/// Schema registry inspection command.
pub mod schema;
/// Shared argument parsing and output helpers.
pub(crate) mod util;
