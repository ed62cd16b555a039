use anyhow::{anyhow, Result};
use clap::{
    crate_authors, crate_description, crate_name, crate_version, App as Cli, AppSettings, Arg,
    ArgMatches, SubCommand,
};
use log::LevelFilter;
use sprint_forms::app::{parse_assignment, App, Command, EntityKind, FillReport, Report};
use sprint_forms::form::SubmitOutcome;
use sprint_forms::logger;

#[tokio::main]
async fn main() -> Result<()> {
    let matches = Cli::new(crate_name!())
        .version(crate_version!())
        .author(crate_authors!())
        .about(crate_description!())
        .setting(AppSettings::SubcommandRequiredElseHelp)
        .arg(
            Arg::with_name("session-dir")
                .short("s")
                .long("session-dir")
                .value_name("DIR")
                .help("Sets a custom session directory")
                .global(true)
                .takes_value(true),
        )
        .arg(
            Arg::with_name("verbose")
                .short("v")
                .long("verbose")
                .help("Prints debug logs to stderr")
                .global(true),
        )
        .subcommand(
            SubCommand::with_name("login")
                .about("Signs in as the given user")
                .arg(Arg::with_name("id").long("id").value_name("ID").required(true))
                .arg(Arg::with_name("name").long("name").value_name("NAME").required(true)),
        )
        .subcommand(SubCommand::with_name("logout").about("Signs out the current user"))
        .subcommand(SubCommand::with_name("whoami").about("Shows the signed-in user"))
        .subcommand(
            SubCommand::with_name("fill")
                .about("Fills in and submits an entity form")
                .arg(
                    Arg::with_name("entity")
                        .required(true)
                        .possible_values(&EntityKind::NAMES),
                )
                .arg(
                    Arg::with_name("set")
                        .long("set")
                        .value_name("FIELD=VALUE")
                        .help("Changes a field before submitting")
                        .multiple(true)
                        .number_of_values(1),
                )
                .arg(
                    Arg::with_name("project-id")
                        .long("project-id")
                        .value_name("ID")
                        .help("Project a new sprint belongs to"),
                )
                .arg(
                    Arg::with_name("sprint-id")
                        .long("sprint-id")
                        .value_name("ID")
                        .help("Sprint a new log or task completion belongs to"),
                ),
        )
        .get_matches();

    // Global flags land on whichever level they were given at
    let sub = matches.subcommand().1;
    let verbose = matches.is_present("verbose") || sub.map_or(false, |s| s.is_present("verbose"));
    let session_dir = sub
        .and_then(|s| s.value_of("session-dir"))
        .or_else(|| matches.value_of("session-dir"));

    if verbose {
        logger::init(LevelFilter::Debug, Box::new(|line| eprintln!("{}", line)))?;
    }

    let command = parse_command(&matches)?;
    let report = App::start(command, session_dir).await?;
    print_report(&report);

    match report {
        Report::Filled(FillReport {
            outcome: SubmitOutcome::InvalidFields(_),
            ..
        })
        | Report::Filled(FillReport {
            outcome: SubmitOutcome::SubmitFailed(_),
            ..
        }) => std::process::exit(1),
        _ => Ok(()),
    }
}

fn parse_command(matches: &ArgMatches) -> Result<Command> {
    match matches.subcommand() {
        ("login", Some(sub)) => Ok(Command::Login {
            id: parse_id(sub, "id")?.ok_or_else(|| anyhow!("Missing user ID"))?,
            name: sub.value_of("name").unwrap_or_default().to_string(),
        }),
        ("logout", _) => Ok(Command::Logout),
        ("whoami", _) => Ok(Command::WhoAmI),
        ("fill", Some(sub)) => {
            let name = sub.value_of("entity").unwrap_or_default();
            let entity =
                EntityKind::from_name(name).ok_or_else(|| anyhow!("Unknown form '{}'", name))?;
            let values = sub
                .values_of("set")
                .map(|args| args.map(parse_assignment).collect::<Result<Vec<_>, _>>())
                .transpose()?
                .unwrap_or_default();
            Ok(Command::Fill {
                entity,
                values,
                project_id: parse_id(sub, "project-id")?,
                sprint_id: parse_id(sub, "sprint-id")?,
            })
        }
        (other, _) => Err(anyhow!("Unknown command '{}'", other)),
    }
}

fn parse_id(matches: &ArgMatches, name: &str) -> Result<Option<i64>> {
    matches
        .value_of(name)
        .map(|raw| {
            raw.parse::<i64>()
                .map_err(|_| anyhow!("Expected a numeric {}, got '{}'", name, raw))
        })
        .transpose()
}

fn print_report(report: &Report) {
    match report {
        Report::User(Some(user)) => println!("Signed in as {} (ID: {})", user.name, user.id),
        Report::User(None) => println!("Not signed in"),
        Report::Filled(fill) => {
            match &fill.outcome {
                SubmitOutcome::Submitted => println!("{}: submitted", fill.title),
                SubmitOutcome::InvalidFields(_) => println!("{}: invalid fields", fill.title),
                SubmitOutcome::SubmitFailed(e) => println!("{}: {}", fill.title, e),
            }
            for (field, message) in &fill.errors {
                println!("  {}: {}", field, message);
            }
            if let Some(payload) = &fill.payload {
                match serde_json::to_string_pretty(payload) {
                    Ok(text) => println!("{}", text),
                    Err(e) => eprintln!("Failed to render payload: {}", e),
                }
            }
        }
    }
}
