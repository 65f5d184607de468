#[cfg(test)]
use std::cell::RefCell;
#[cfg(not(test))]
use std::env;
use std::str::FromStr;

use crate::tools::error::Result;
use crate::tools::error::ToolsError::{InvalidArgument, MissingCommand};

/// Value of an option passed as `--name=value`. Only the first `=` separates
/// the name from the value.
///
/// Args are read from the process, except under test where
/// `with_env_args` provides them.
pub fn retrieve_arg_value(name: &str) -> Option<String> {
    get_env_args().into_iter().find_map(|arg| {
        arg.split_once('=')
            .filter(|(arg_name, _)| *arg_name == name)
            .map(|(_, value)| value.to_owned())
    })
}

pub fn retrieve_expected_arg_value<E>(name: &str, error_if_missing: E) -> Result<String, E> {
    retrieve_arg_value(name).ok_or(error_if_missing)
}

/// A missing option gives `Ok(None)`, an unparsable one is an error.
pub fn retrieve_parsed_arg_value<T: FromStr>(name: &str) -> Result<Option<T>> {
    retrieve_arg_value(name)
        .map(|value| {
            value.parse().map_err(|_| InvalidArgument {
                name: name.to_owned(),
                value,
            })
        })
        .transpose()
}

/// Whether a bare flag (`--name`) has been passed.
pub fn has_flag(flag: &str) -> bool {
    get_env_args().iter().any(|arg| arg == flag)
}

/// The command is the first arg that is not an option.
pub fn retrieve_command() -> Result<String> {
    get_env_args()
        .into_iter()
        .find(|arg| !arg.starts_with('-'))
        .ok_or(MissingCommand)
}

#[cfg(not(test))]
fn get_env_args() -> Vec<String> {
    env::args().skip(1).collect()
}

#[cfg(test)]
thread_local! {
    static ENV_ARGS: RefCell<Vec<String>> = const { RefCell::new(vec![]) };
}

#[cfg(test)]
fn get_env_args() -> Vec<String> {
    ENV_ARGS.with(|args| args.borrow().clone())
}

/// Run `function` as if the console had been given `args`.
/// Previous args are restored afterwards.
#[cfg(test)]
pub fn with_env_args<F, T>(args: Vec<String>, function: F) -> T
where
    F: FnOnce() -> T,
{
    let previous_args = ENV_ARGS.with(|cell| cell.replace(args));
    let result = function();
    ENV_ARGS.with(|cell| cell.replace(previous_args));
    result
}

#[cfg(test)]
pub mod tests {
    use parameterized::{ide, parameterized};

    use crate::tools::env_args::{
        has_flag, retrieve_arg_value, retrieve_command, retrieve_expected_arg_value,
        retrieve_parsed_arg_value, with_env_args,
    };
    use crate::tools::error::ToolsError::{InvalidArgument, MissingCommand};

    ide!();

    fn args(args: &[&str]) -> Vec<String> {
        args.iter().map(|arg| arg.to_string()).collect()
    }

    #[parameterized(
        given = {&["--client=42"], &["renew", "--client=42", "--term=anual"], &["--clients=42"], &["--client"]},
        expected_value = {Some("42"), Some("42"), None, None}
    )]
    fn should_retrieve_client_arg(given: &[&str], expected_value: Option<&str>) {
        let value = with_env_args(args(given), || retrieve_arg_value("--client"));
        assert_eq!(expected_value.map(str::to_owned), value);
    }

    #[test]
    fn should_keep_equal_signs_in_value() {
        let value = with_env_args(args(&["--search=a=b"]), || retrieve_arg_value("--search"));
        assert_eq!(Some("a=b".to_owned()), value);
    }

    #[test]
    fn should_retrieve_expected_arg_value() {
        let value = with_env_args(args(&["--username=front-desk"]), || {
            retrieve_expected_arg_value("--username", "missing")
        });
        assert_eq!(Ok("front-desk".to_owned()), value);
    }

    #[test]
    fn should_fail_to_retrieve_expected_arg_value() {
        let value = with_env_args(args(&["login"]), || {
            retrieve_expected_arg_value("--username", "missing")
        });
        assert_eq!(Err("missing"), value);
    }

    #[test]
    fn should_retrieve_parsed_arg_value() {
        let value = with_env_args(args(&["--client=42"]), || {
            retrieve_parsed_arg_value::<u64>("--client")
        });
        assert_eq!(Ok(Some(42)), value);
    }

    #[test]
    fn should_fail_to_parse_arg_value() {
        let value = with_env_args(args(&["--client=jon"]), || {
            retrieve_parsed_arg_value::<u64>("--client")
        });
        assert_eq!(
            Err(InvalidArgument {
                name: "--client".to_owned(),
                value: "jon".to_owned()
            }),
            value
        );
    }

    #[test]
    fn should_retrieve_command() {
        let given = args(&["--api-url=http://localhost", "renew", "--client=1"]);
        assert_eq!(Ok("renew".to_owned()), with_env_args(given, retrieve_command));
    }

    #[test]
    fn should_fail_to_retrieve_missing_command() {
        let given = args(&["--client=1"]);
        assert_eq!(Err(MissingCommand), with_env_args(given, retrieve_command));
    }

    #[test]
    fn should_detect_flag() {
        let given = args(&["reminder", "--server"]);
        assert!(with_env_args(given.clone(), || has_flag("--server")));
        assert!(!with_env_args(given, || has_flag("--ephemeral")));
    }
}
