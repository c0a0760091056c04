//! Startup flags for the relay-bot binary.
//!
//! Every flag overrides the matching config file and environment value;
//! there are no subcommands.

use std::ffi::OsString;
use std::net::IpAddr;
use std::path::PathBuf;
use std::str::FromStr;

const HELP: &str = "\
Telegram bot gateway for art generation, Q&A and translation

USAGE:
    relay-bot [OPTIONS]

OPTIONS:
    -c, --config <FILE>     JSON configuration file
    -H, --host <ADDR>       Content server bind address [default: 0.0.0.0]
    -p, --port <PORT>       Content server port [default: 3000]
    -l, --log-level <LVL>   Log filter, e.g. info or relay_bot=debug
    -h, --help              Show this message
    -V, --version           Show the version

ENVIRONMENT:
    TELEGRAM_BOT_TOKEN      Bot token (required)
    DEVELOPER_CHAT_ID       Chat receiving developer contact messages
    RENDER_URL              Public base URL for hosted document links
    RENDER_INSTANCE         Render instance name, used when RENDER_URL is unset
    PORT                    Content server port
    RELAY_BOT_HOST          Content server bind address
    RELAY_BOT_LOG_LEVEL     Log filter
    RUST_LOG                Log filter, when RELAY_BOT_LOG_LEVEL is unset

EXAMPLE:
    TELEGRAM_BOT_TOKEN=123:ABC RENDER_URL=https://bot.example.com relay-bot -p 8080
";

/// Flags given on the command line; `None` leaves the configured value.
#[derive(Debug, Clone, Default)]
pub struct Args {
    pub config: Option<PathBuf>,
    pub host: Option<IpAddr>,
    pub port: Option<u16>,
    pub log_level: Option<String>,
    pub help: bool,
    pub version: bool,
}

/// Parse the process arguments.
pub fn parse_args() -> Result<Args, ArgsError> {
    parse_args_from(std::env::args_os())
}

/// Parse `argv`, including the program name in first position.
pub fn parse_args_from<I>(argv: I) -> Result<Args, ArgsError>
where
    I: IntoIterator<Item = OsString>,
{
    use lexopt::prelude::*;

    let mut parser = lexopt::Parser::from_iter(argv);
    let mut args = Args::default();

    while let Some(flag) = parser.next()? {
        match flag {
            Short('c') | Long("config") => args.config = Some(parser.value()?.into()),
            Short('H') | Long("host") => args.host = Some(typed(&mut parser, "host")?),
            Short('p') | Long("port") => args.port = Some(typed(&mut parser, "port")?),
            Short('l') | Long("log-level") => args.log_level = Some(parser.value()?.string()?),
            Short('h') | Long("help") => args.help = true,
            Short('V') | Long("version") => args.version = true,
            Value(stray) => return Err(ArgsError::Positional(stray.to_string_lossy().into())),
            other => return Err(other.unexpected().into()),
        }
    }

    Ok(args)
}

/// Read the flag's value and parse it as `T`.
fn typed<T: FromStr>(parser: &mut lexopt::Parser, flag: &'static str) -> Result<T, ArgsError> {
    use lexopt::ValueExt;

    let raw = parser.value()?.string()?;
    raw.parse().map_err(|_| ArgsError::BadValue { flag, value: raw })
}

pub fn print_help() {
    println!("relay-bot {}\n{}", env!("CARGO_PKG_VERSION"), HELP);
}

pub fn print_version() {
    println!("relay-bot {}", env!("CARGO_PKG_VERSION"));
}

/// Command-line errors.
#[derive(Debug)]
pub enum ArgsError {
    /// Unknown flag, missing value or non UTF-8 input.
    Parse(lexopt::Error),
    /// A flag value that does not parse as the expected type.
    BadValue { flag: &'static str, value: String },
    /// A positional argument; the binary takes none.
    Positional(String),
}

impl std::fmt::Display for ArgsError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Parse(e) => std::fmt::Display::fmt(e, f),
            Self::BadValue { flag, value } => write!(f, "--{flag}: cannot use '{value}'"),
            Self::Positional(arg) => write!(f, "relay-bot takes no arguments, got '{arg}'"),
        }
    }
}

impl std::error::Error for ArgsError {}

impl From<lexopt::Error> for ArgsError {
    fn from(e: lexopt::Error) -> Self {
        Self::Parse(e)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn argv(flags: &[&str]) -> Vec<OsString> {
        ["relay-bot"]
            .iter()
            .chain(flags)
            .map(OsString::from)
            .collect()
    }

    #[test]
    fn test_no_flags_leaves_everything_unset() {
        let args = parse_args_from(argv(&[])).unwrap();
        assert!(args.config.is_none());
        assert!(args.host.is_none());
        assert!(args.port.is_none());
        assert!(args.log_level.is_none());
        assert!(!args.help && !args.version);
    }

    #[test]
    fn test_short_flags() {
        let args = parse_args_from(argv(&["-H", "127.0.0.1", "-p", "8080", "-l", "warn"])).unwrap();
        assert_eq!(args.host, Some(IpAddr::from([127, 0, 0, 1])));
        assert_eq!(args.port, Some(8080));
        assert_eq!(args.log_level.as_deref(), Some("warn"));
    }

    #[test]
    fn test_long_flags_with_equals() {
        let args = parse_args_from(argv(&["--port=9000", "--config=relay.json"])).unwrap();
        assert_eq!(args.port, Some(9000));
        assert_eq!(args.config, Some(PathBuf::from("relay.json")));
    }

    #[test]
    fn test_help_and_version() {
        assert!(parse_args_from(argv(&["--help"])).unwrap().help);
        assert!(parse_args_from(argv(&["-h"])).unwrap().help);
        assert!(parse_args_from(argv(&["-V"])).unwrap().version);
    }

    #[test]
    fn test_bad_values_name_the_flag() {
        let err = parse_args_from(argv(&["-p", "70000"])).unwrap_err();
        assert!(matches!(err, ArgsError::BadValue { flag: "port", .. }));
        assert_eq!(err.to_string(), "--port: cannot use '70000'");

        let err = parse_args_from(argv(&["--host", "localhost"])).unwrap_err();
        assert!(matches!(err, ArgsError::BadValue { flag: "host", .. }));
    }

    #[test]
    fn test_rejects_positionals_and_unknown_flags() {
        assert!(matches!(
            parse_args_from(argv(&["run"])),
            Err(ArgsError::Positional(_))
        ));
        assert!(matches!(
            parse_args_from(argv(&["--api-key", "x"])),
            Err(ArgsError::Parse(_))
        ));
        assert!(matches!(
            parse_args_from(argv(&["-p"])),
            Err(ArgsError::Parse(_))
        ));
    }
}
