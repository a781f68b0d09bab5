use std::fs;
use std::io::{ stdin, Read, Result as IoResult };
use std::path::{ Path, PathBuf };
use std::process;
use std::str::FromStr;
use is_terminal::IsTerminal;
use serde::Serialize;
use serde_json::{ json, Value };
use structopt::StructOpt;
use tracing::debug;
use tracing_subscriber::EnvFilter;
use sql_complexity::{
    Assessor,
    ComplexityRules,
    SqlDialect,
    SqlError,
};

/// Estimate the complexity of a single SQL statement by counting
/// joins, filter predicates, CTEs, GROUP BY expressions, set operations,
/// function calls, and CASE expressions.
#[derive(Debug, Clone, StructOpt)]
#[structopt(name = "sql-complexity")]
struct Options {
    /// File containing the SQL statement. Reads standard input
    /// if omitted or `-`.
    #[structopt(parse(from_os_str))]
    input: Option<PathBuf>,
    /// The SQL dialect to adhere to when parsing the input
    /// (ansi, generic, mssql, mysql, postgresql, sqlite, snowflake).
    #[structopt(short = "d", long = "dialect", default_value = "generic")]
    dialect: SqlDialect,
    /// Weighting preset for the weighted total (default, strict, lenient).
    #[structopt(short = "r", long = "rules", default_value = "default")]
    rules: ComplexityRules,
    /// Output format (text, json).
    #[structopt(short = "f", long = "format", default_value = "text")]
    format: OutputFormat,
    /// Echo the input and log what is going on to `stderr`.
    #[structopt(short = "v", long = "verbose")]
    verbose: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum OutputFormat {
    Text,
    Json,
}

impl FromStr for OutputFormat {
    type Err = SqlError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "text" => Ok(OutputFormat::Text),
            "json" => Ok(OutputFormat::Json),
            _ => Err(SqlError::Format(s.to_owned())),
        }
    }
}

impl Options {
    fn run(self) -> Result<(), SqlError> {
        let sql = read_sql(self.input.as_deref())?;

        if self.verbose {
            eprintln!("{}", sql);
        }

        let assessor = Assessor::new()
            .with_dialect(self.dialect)
            .with_rules(self.rules);

        let score = assessor.assess(&sql)?;
        let weighted = assessor.weigh(&score);

        debug!(total = score.total(), weighted, "scored input");

        match self.format {
            OutputFormat::Text => {
                println!("{}", score);

                if self.rules != ComplexityRules::default() {
                    println!("Weighted Score: {}", weighted);
                }
            }
            OutputFormat::Json => {
                let mut value = serde_json::to_value(&score)?;

                if let Value::Object(ref mut map) = value {
                    map.insert("weighted_total".into(), json!(weighted));
                }

                json_dump(&value)?;
                println!();
            }
        }

        Ok(())
    }
}

/// Read the statement from the given file, or from `stdin`
/// when there is no file or it is `-`.
fn read_sql(input: Option<&Path>) -> IoResult<String> {
    let buf = match input {
        Some(path) if path != Path::new("-") => fs::read_to_string(path)?,
        _ => {
            if stdin().is_terminal() {
                eprintln!("Running in interactive mode");
            }

            let mut buf = String::new();
            stdin().read_to_string(&mut buf)?;
            buf
        }
    };

    Ok(buf.trim().to_owned())
}

/// Dump a serializable value as JSON to the standard output stream.
fn json_dump<T: Serialize>(value: &T) -> serde_json::Result<()> {
    serde_json::to_writer_pretty(std::io::stdout(), value)
}

/// Logs go to `stderr`; `stdout` is reserved for the report.
/// `RUST_LOG` takes precedence over `--verbose`.
fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_level));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

fn main() {
    let options = Options::from_args();

    init_logging(options.verbose);

    if let Err(error) = options.run() {
        eprintln!("error: {}", error);
        process::exit(1);
    }
}
