use std::fmt::Debug;

pub mod currency;
pub mod env_args;
pub mod error;
pub mod test;
pub mod web;

/// Log the incoming error, then hand back `value_to_return`.
/// Meant to be used with `map_err`.
pub fn log_error_and_return<E: Debug, T>(value_to_return: T) -> impl FnOnce(E) -> T {
    |e| {
        error!("{e:#?}");
        value_to_return
    }
}

pub fn log_message_and_return<E: Debug, T>(
    message: &str,
    value_to_return: T,
) -> impl FnOnce(E) -> T {
    move |e| {
        error!("{message}\n{e:#?}");
        value_to_return
    }
}

/// Turn an empty or blank value into `None`, trimming the others.
pub fn blank_to_none(value: Option<String>) -> Option<String> {
    value
        .map(|value| value.trim().to_owned())
        .filter(|value| !value.is_empty())
}
