use std::fmt;

use services::{ApiConfig, AppServices, Clock};
use sport_core::model::{ClubId, ExerciseId, FitnessResultDraft, SessionKey};
use tracing::info;
use tracing_subscriber::prelude::*;
use tracing_subscriber::{EnvFilter, fmt as log_fmt};

mod render;

#[derive(Debug, PartialEq, Eq)]
enum ArgsError {
    MissingValue { flag: &'static str },
    MissingArgument { command: &'static str, what: &'static str },
    UnknownArg(String),
    UnknownCommand(String),
    InvalidWeek { raw: String },
    InvalidClubId { raw: String },
    InvalidResult { raw: String },
}

impl fmt::Display for ArgsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ArgsError::MissingValue { flag } => write!(f, "{flag} requires a value"),
            ArgsError::MissingArgument { command, what } => {
                write!(f, "{command} requires {what}")
            }
            ArgsError::UnknownArg(arg) => write!(f, "unknown argument: {arg}"),
            ArgsError::UnknownCommand(cmd) => write!(f, "unknown subcommand: {cmd}"),
            ArgsError::InvalidWeek { raw } => write!(f, "invalid --week value: {raw}"),
            ArgsError::InvalidClubId { raw } => write!(f, "invalid club id: {raw}"),
            ArgsError::InvalidResult { raw } => {
                write!(f, "invalid result `{raw}`, expected <exercise-id>=<value>")
            }
        }
    }
}

impl std::error::Error for ArgsError {}

fn require_value(
    args: &mut impl Iterator<Item = String>,
    flag: &'static str,
) -> Result<String, ArgsError> {
    args.next().ok_or(ArgsError::MissingValue { flag })
}

fn print_usage() {
    eprintln!("Usage:");
    eprintln!("  app [--base-url <url>] [--token <token>] <command>");
    eprintln!();
    eprintln!("Commands:");
    eprintln!("  schedule [--week <offset>]        show a week (0 = current)");
    eprintln!("  enroll <session-id>               check in to a session");
    eprintln!("  cancel <session-id>               cancel a check-in");
    eprintln!("  progress [--legacy]               semester hours");
    eprintln!("  profile                           student profile and progress");
    eprintln!("  clubs                             list clubs");
    eprintln!("  club <id>                         club groups and roster");
    eprintln!("  faq [<category>]                  frequently asked questions");
    eprintln!("  exercises                         fitness test exercises");
    eprintln!("  fitness <id>=<value>...           submit fitness test results");
    eprintln!();
    eprintln!("Environment (also read from .env):");
    eprintln!("  SPORT_API_BASE_URL, SPORT_API_TOKEN, SPORT_API_TIMEOUT_SECS, RUST_LOG");
}

#[derive(Debug, PartialEq, Eq)]
enum Command {
    Schedule { week: i64 },
    Enroll(SessionKey),
    Cancel(SessionKey),
    Progress { legacy: bool },
    Profile,
    Clubs,
    Club(ClubId),
    Faq { category: Option<String> },
    Exercises,
    Fitness(Vec<(ExerciseId, String)>),
}

#[derive(Debug, PartialEq, Eq)]
struct Args {
    base_url: Option<String>,
    token: Option<String>,
    /// `None` asks for usage.
    command: Option<Command>,
}

impl Args {
    fn parse(args: impl IntoIterator<Item = String>) -> Result<Self, ArgsError> {
        let mut args = args.into_iter();
        let mut base_url = None;
        let mut token = None;
        let mut week = None;
        let mut legacy = false;
        let mut positional = Vec::new();

        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--base-url" => base_url = Some(require_value(&mut args, "--base-url")?),
                "--token" => token = Some(require_value(&mut args, "--token")?),
                "--week" => {
                    let value = require_value(&mut args, "--week")?;
                    let parsed: i64 = value
                        .trim()
                        .parse()
                        .map_err(|_| ArgsError::InvalidWeek { raw: value.clone() })?;
                    week = Some(parsed);
                }
                "--legacy" => legacy = true,
                "--help" | "-h" => {
                    return Ok(Self {
                        base_url,
                        token,
                        command: None,
                    });
                }
                _ if arg.starts_with("--") => return Err(ArgsError::UnknownArg(arg)),
                _ => positional.push(arg),
            }
        }

        let mut positional = positional.into_iter();
        let command = match positional.next().as_deref() {
            None => {
                return Ok(Self {
                    base_url,
                    token,
                    command: None,
                });
            }
            Some("schedule") => Command::Schedule {
                week: week.unwrap_or(0),
            },
            Some("enroll") => Command::Enroll(session_key(positional.next(), "enroll")?),
            Some("cancel") => Command::Cancel(session_key(positional.next(), "cancel")?),
            Some("progress") => Command::Progress { legacy },
            Some("profile") => Command::Profile,
            Some("clubs") => Command::Clubs,
            Some("club") => {
                let raw = positional.next().ok_or(ArgsError::MissingArgument {
                    command: "club",
                    what: "a club id",
                })?;
                let id = raw
                    .parse::<ClubId>()
                    .map_err(|_| ArgsError::InvalidClubId { raw: raw.clone() })?;
                Command::Club(id)
            }
            Some("faq") => Command::Faq {
                category: positional.next(),
            },
            Some("exercises") => Command::Exercises,
            Some("fitness") => {
                let results = positional
                    .by_ref()
                    .map(|raw| fitness_result(&raw))
                    .collect::<Result<Vec<_>, _>>()?;
                if results.is_empty() {
                    return Err(ArgsError::MissingArgument {
                        command: "fitness",
                        what: "at least one <exercise-id>=<value>",
                    });
                }
                Command::Fitness(results)
            }
            Some(other) => return Err(ArgsError::UnknownCommand(other.to_string())),
        };

        if let Some(extra) = positional.next() {
            return Err(ArgsError::UnknownArg(extra));
        }

        Ok(Self {
            base_url,
            token,
            command: Some(command),
        })
    }
}

fn session_key(raw: Option<String>, command: &'static str) -> Result<SessionKey, ArgsError> {
    raw.filter(|value| !value.trim().is_empty())
        .map(SessionKey::from_raw)
        .ok_or(ArgsError::MissingArgument {
            command,
            what: "a session id",
        })
}

fn fitness_result(raw: &str) -> Result<(ExerciseId, String), ArgsError> {
    let invalid = || ArgsError::InvalidResult {
        raw: raw.to_string(),
    };
    let (id, value) = raw.split_once('=').ok_or_else(invalid)?;
    let id = id.parse::<ExerciseId>().map_err(|_| invalid())?;
    Ok((id, value.to_string()))
}

fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::registry()
        .with(filter)
        .with(
            log_fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false),
        )
        .init();
}

async fn run() -> Result<(), Box<dyn std::error::Error>> {
    // Binary glue only: libraries never read .env themselves.
    dotenvy::dotenv().ok();
    init_logging();

    let args = Args::parse(std::env::args().skip(1)).map_err(|e| {
        eprintln!("{e}");
        print_usage();
        e
    })?;

    let Some(command) = args.command else {
        print_usage();
        return Ok(());
    };

    let mut config = ApiConfig::from_env()?;
    if let Some(base_url) = args.base_url.as_deref() {
        config = config.with_base_url(base_url)?;
    }
    if let Some(token) = args.token {
        config = config.with_token(token);
    }

    let services = AppServices::from_config(&config, Clock::system())?;

    match command {
        Command::Schedule { week } => {
            let schedule = services.schedule().load_week(week).await?;
            print!("{}", render::week(&schedule));
        }
        Command::Enroll(key) => {
            let session = services.schedule().enroll(&key).await?;
            println!(
                "Checked in: {} {} {}",
                session.slot.activity(),
                session.slot.date(),
                session.slot.time()
            );
        }
        Command::Cancel(key) => {
            let session = services.schedule().cancel(&key).await?;
            println!(
                "Cancelled: {} {} {}",
                session.slot.activity(),
                session.slot.date(),
                session.slot.time()
            );
        }
        Command::Progress { legacy } => {
            let record = if legacy {
                services.profile().legacy_progress().await?
            } else {
                services.profile().progress().await?.progress
            };
            print!("{}", render::progress(&record));
        }
        Command::Profile => {
            let result = services.profile().progress().await?;
            print!("{}", render::profile(&result));
        }
        Command::Clubs => {
            let clubs = services.clubs().list().await?;
            print!("{}", render::clubs(&clubs));
        }
        Command::Club(id) => {
            let detail = services.clubs().detail(id).await?;
            print!("{}", render::club(&detail));
        }
        Command::Faq { category } => {
            let categories = match category {
                Some(name) => vec![services.faq().category(&name).await?],
                None => services.faq().categories().await?,
            };
            print!("{}", render::faq(&categories));
        }
        Command::Exercises => {
            let exercises = services.fitness().exercises().await?;
            print!("{}", render::exercises(&exercises));
        }
        Command::Fitness(results) => {
            let draft = results
                .into_iter()
                .fold(FitnessResultDraft::new(), |draft, (id, value)| {
                    draft.with_result(id, value)
                });
            let submission = services.fitness().submit(draft).await?;
            info!(results = submission.results().len(), "submitted");
            println!("Submitted {} result(s).", submission.results().len());
        }
    }

    Ok(())
}

#[tokio::main]
async fn main() {
    if let Err(err) = run().await {
        // At this layer (binary glue), printing once is fine.
        eprintln!("{err}");
        std::process::exit(2);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Result<Args, ArgsError> {
        Args::parse(args.iter().map(|arg| (*arg).to_string()))
    }

    #[test]
    fn no_arguments_prints_help() {
        assert_eq!(parse(&[]).unwrap().command, None);
        assert_eq!(parse(&["clubs", "--help"]).unwrap().command, None);
    }

    #[test]
    fn schedule_week_offset() {
        assert_eq!(
            parse(&["schedule"]).unwrap().command,
            Some(Command::Schedule { week: 0 })
        );
        assert_eq!(
            parse(&["schedule", "--week", "-2"]).unwrap().command,
            Some(Command::Schedule { week: -2 })
        );
        assert_eq!(
            parse(&["schedule", "--week", "soon"]).unwrap_err(),
            ArgsError::InvalidWeek { raw: "soon".into() }
        );
    }

    #[test]
    fn global_overrides_anywhere() {
        let args = parse(&[
            "--token",
            "abc",
            "enroll",
            "yoga-monday-09001030-2024-01-15",
            "--base-url",
            "http://localhost:8000/api",
        ])
        .unwrap();
        assert_eq!(args.token.as_deref(), Some("abc"));
        assert_eq!(args.base_url.as_deref(), Some("http://localhost:8000/api"));
        assert_eq!(
            args.command,
            Some(Command::Enroll(SessionKey::from_raw(
                "yoga-monday-09001030-2024-01-15"
            )))
        );
    }

    #[test]
    fn commands_require_their_arguments() {
        assert!(matches!(
            parse(&["cancel"]),
            Err(ArgsError::MissingArgument { command: "cancel", .. })
        ));
        assert!(matches!(
            parse(&["club", "basketball"]),
            Err(ArgsError::InvalidClubId { .. })
        ));
        assert!(matches!(
            parse(&["--token"]),
            Err(ArgsError::MissingValue { flag: "--token" })
        ));
        assert!(matches!(
            parse(&["dance"]),
            Err(ArgsError::UnknownCommand(_))
        ));
        assert!(matches!(
            parse(&["clubs", "extra"]),
            Err(ArgsError::UnknownArg(_))
        ));
    }

    #[test]
    fn fitness_results_parse_as_pairs() {
        assert_eq!(
            parse(&["fitness", "1=25", "2=Good"]).unwrap().command,
            Some(Command::Fitness(vec![
                (ExerciseId::new(1), "25".into()),
                (ExerciseId::new(2), "Good".into()),
            ]))
        );
        assert!(matches!(
            parse(&["fitness", "push-ups"]),
            Err(ArgsError::InvalidResult { .. })
        ));
    }

    #[test]
    fn progress_and_faq_options() {
        assert_eq!(
            parse(&["progress", "--legacy"]).unwrap().command,
            Some(Command::Progress { legacy: true })
        );
        assert_eq!(
            parse(&["faq", "Attendance"]).unwrap().command,
            Some(Command::Faq {
                category: Some("Attendance".into())
            })
        );
    }
}
