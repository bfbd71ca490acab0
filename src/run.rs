mod cli;
mod shell;

pub(crate) use cli::as_cli;
pub(crate) use shell::as_shell;
