use anyhow::{Context, Result};
use job_data::{Config, DataError, JobData, LoadFailurePolicy};

const USAGE: &str = "\
usage: job-data <command>

commands:
  columns                   list the searchable columns
  list <column>             distinct values of a column
  all                       every job
  search <column> <term>    jobs whose column contains term
  search-all <term>         jobs with any column containing term

configuration: JOB_DATA_FILE, JOB_DATA_DELIMITER, JOB_DATA_ON_LOAD_FAILURE,
               JOB_DATA_CONFIG (JSON file)";

enum Command {
    Columns,
    List(String),
    All,
    Search { column: String, term: String },
    SearchAll(String),
}

fn parse_args(args: &[String]) -> Option<Command> {
    let args: Vec<&str> = args.iter().map(String::as_str).collect();
    match args.as_slice() {
        ["columns"] => Some(Command::Columns),
        ["list", column] => Some(Command::List(column.to_string())),
        ["all"] => Some(Command::All),
        ["search", column, term] => Some(Command::Search {
            column: column.to_string(),
            term: term.to_string(),
        }),
        ["search-all", term] => Some(Command::SearchAll(term.to_string())),
        _ => None,
    }
}

/// Build the job service and load it, applying the configured failure policy.
fn open(config: &Config) -> Result<JobData> {
    let data = JobData::new(config.source()?);
    match data.load() {
        Ok(()) => Ok(data),
        Err(e) => match config.on_load_failure {
            LoadFailurePolicy::Abort => Err(e).context("loading job data"),
            LoadFailurePolicy::Empty => {
                log::warn!("continuing with an empty job table: {e}");
                Ok(JobData::unavailable(&e))
            }
        },
    }
}

fn main() -> Result<()> {
    env_logger::init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    let Some(command) = parse_args(&args) else {
        eprintln!("{USAGE}");
        std::process::exit(2);
    };

    let config = Config::from_env().context("reading configuration")?;
    log::debug!("configuration: {config:?}");
    let data = open(&config)?;

    let output = match command {
        Command::Columns => serde_json::to_string_pretty(&data.columns()?)?,
        Command::List(column) => serde_json::to_string_pretty(&data.distinct_values(&column)?)?,
        Command::All => serde_json::to_string_pretty(&data.find_all()?)?,
        Command::Search { column, term } => {
            serde_json::to_string_pretty(&data.find_by_column_and_value(&column, &term)?)?
        }
        Command::SearchAll(term) => serde_json::to_string_pretty(&data.find_by_value(&term)?)?,
    };
    println!("{output}");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn parses_commands() {
        assert!(matches!(parse_args(&args(&["columns"])), Some(Command::Columns)));
        assert!(matches!(parse_args(&args(&["all"])), Some(Command::All)));
        assert!(matches!(
            parse_args(&args(&["list", "employer"])),
            Some(Command::List(c)) if c == "employer"
        ));
        assert!(matches!(
            parse_args(&args(&["search", "position type", "web"])),
            Some(Command::Search { column, term }) if column == "position type" && term == "web"
        ));
        assert!(matches!(
            parse_args(&args(&["search-all", "java"])),
            Some(Command::SearchAll(t)) if t == "java"
        ));
    }

    #[test]
    fn rejects_unknown_or_incomplete_commands() {
        assert!(parse_args(&args(&[])).is_none());
        assert!(parse_args(&args(&["list"])).is_none());
        assert!(parse_args(&args(&["delete", "x"])).is_none());
    }

    #[test]
    fn empty_policy_falls_back_to_empty_table() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config {
            data_file: dir.path().join("missing.csv"),
            on_load_failure: LoadFailurePolicy::Empty,
            ..Config::default()
        };
        let data = open(&config).unwrap();
        assert!(data.find_all().unwrap().is_empty());
        let err = data.distinct_values("employer").unwrap_err();
        assert!(matches!(err, DataError::Unavailable { .. }), "{err}");
        assert!(err.to_string().contains("missing.csv"), "{err}");

        let config = Config {
            on_load_failure: LoadFailurePolicy::Abort,
            ..config
        };
        assert!(open(&config).is_err());
    }
}
