use clap::{value_parser, Arg, ArgAction, Command};
use thiserror::Error;

/// Immutable run configuration, built once at startup and shared
/// read-only with every worker.
#[derive(Debug, Clone)]
pub struct Config {
    pub processes: u32,
    pub requests: u32,
    pub verbose: bool,
    pub url: String,
}

impl Config {
    pub(crate) fn validate(&self) -> Result<(), ConfigError> {
        if self.url.is_empty() {
            return Err(ConfigError::EmptyUrl);
        }
        if self.processes < 1 || self.requests < 1 {
            return Err(ConfigError::ZeroCount);
        }
        Ok(())
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid arguments: {0}")]
    Invalid(#[from] clap::Error),
    #[error("exactly one target URL is required")]
    MissingUrl,
    #[error("target URL must not be empty")]
    EmptyUrl,
    #[error("process and request counts must be at least 1")]
    ZeroCount,
}

pub enum Parsed {
    Help,
    Run(Config),
}

pub fn usage(program: &str) -> String {
    format!(
        "Usage: {program} [-p PROCESSES -r REQUESTS -v] URL
  -h              Display help message, exit code 0
  -v              Enable verbose output (print response body on HTTP 200)
  -p PROCESSES    Number of parallel workers (default 1)
  -r REQUESTS     Number of requests per worker (default 1)
"
    )
}

// Clap's own help/version machinery is disabled, the usage text above
// is the whole help surface.
fn command() -> Command {
    Command::new(env!("CARGO_PKG_NAME"))
        .disable_help_flag(true)
        .disable_version_flag(true)
        .arg(Arg::new("help").short('h').action(ArgAction::SetTrue))
        .arg(Arg::new("verbose").short('v').action(ArgAction::SetTrue))
        .arg(
            Arg::new("processes")
                .short('p')
                .value_name("PROCESSES")
                .value_parser(value_parser!(u32).range(1..))
                .default_value("1"),
        )
        .arg(
            Arg::new("requests")
                .short('r')
                .value_name("REQUESTS")
                .value_parser(value_parser!(u32).range(1..))
                .default_value("1"),
        )
        .arg(Arg::new("url").value_name("URL"))
}

/// Parse a full argv, program name included. `-h` wins over a missing URL.
pub fn parse<I, T>(argv: I) -> Result<Parsed, ConfigError>
where
    I: IntoIterator<Item = T>,
    T: Into<std::ffi::OsString> + Clone,
{
    let matches = command().try_get_matches_from(argv)?;
    if matches.get_flag("help") {
        return Ok(Parsed::Help);
    }
    let url = matches
        .get_one::<String>("url")
        .cloned()
        .ok_or(ConfigError::MissingUrl)?;
    let config = Config {
        processes: matches.get_one::<u32>("processes").copied().unwrap_or(1),
        requests: matches.get_one::<u32>("requests").copied().unwrap_or(1),
        verbose: matches.get_flag("verbose"),
        url,
    };
    config.validate()?;
    Ok(Parsed::Run(config))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse_args(args: &[&str]) -> Result<Parsed, ConfigError> {
        parse(std::iter::once("thor").chain(args.iter().copied()))
    }

    #[test]
    fn defaults_apply_with_url_only() {
        let Ok(Parsed::Run(config)) = parse_args(&["http://example.test"]) else {
            panic!("expected a run config");
        };
        assert_eq!(1, config.processes);
        assert_eq!(1, config.requests);
        assert!(!config.verbose);
        assert_eq!("http://example.test", config.url);
    }

    #[test]
    fn flags_parse_in_any_order() {
        let Ok(Parsed::Run(config)) =
            parse_args(&["-r", "3", "-v", "-p", "2", "http://example.test"])
        else {
            panic!("expected a run config");
        };
        assert_eq!(2, config.processes);
        assert_eq!(3, config.requests);
        assert!(config.verbose);
    }

    #[test]
    fn url_position_does_not_matter() {
        let Ok(Parsed::Run(config)) = parse_args(&["http://example.test", "-p", "4"]) else {
            panic!("expected a run config");
        };
        assert_eq!(4, config.processes);
    }

    #[test]
    fn missing_url_is_rejected() {
        assert!(matches!(parse_args(&["-p", "2"]), Err(ConfigError::MissingUrl)));
    }

    #[test]
    fn help_wins_over_missing_url() {
        assert!(matches!(parse_args(&["-h"]), Ok(Parsed::Help)));
    }

    #[test]
    fn non_integer_count_is_rejected() {
        assert!(matches!(
            parse_args(&["-p", "abc", "http://example.test"]),
            Err(ConfigError::Invalid(_))
        ));
    }

    #[test]
    fn zero_count_is_rejected() {
        assert!(parse_args(&["-r", "0", "http://example.test"]).is_err());
    }

    #[test]
    fn unknown_flag_is_rejected() {
        assert!(matches!(
            parse_args(&["-x", "http://example.test"]),
            Err(ConfigError::Invalid(_))
        ));
    }

    #[test]
    fn extra_positional_is_rejected() {
        assert!(parse_args(&["http://a.test", "http://b.test"]).is_err());
    }

    #[test]
    fn validate_rejects_empty_url() {
        let config = Config {
            processes: 1,
            requests: 1,
            verbose: false,
            url: String::new(),
        };
        assert!(matches!(config.validate(), Err(ConfigError::EmptyUrl)));
    }
}
