use thiserror::Error;

pub type Result<T, E = ToolsError> = std::result::Result<T, E>;

#[derive(Debug, Error, PartialEq)]
pub enum ToolsError {
    #[error("The HTTP client couldn't be created.")]
    CantCreateClient,
    #[error("The {0} argument is missing.")]
    MissingArgument(String),
    #[error("The {name} argument has an invalid value [value: {value}]")]
    InvalidArgument { name: String, value: String },
    #[error("No command has been given. Run with `help` to list the commands.")]
    MissingCommand,
}
