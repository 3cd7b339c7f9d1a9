mod cli;

use config_repo_core::{ConfigRepository, Error, Result};
use serde::Serialize;
use serde_json::Value;

const OUTPUT_SCHEMA: &str = "config-repo-cli/output/v1";

fn main() {
    let args = cli::Cli::parse_args();
    config_repo_core::logging::init_tracing(&args.log_level);

    let command = args.command.name();
    if let Err(error) = run(args.command, args.output) {
        if args.output == cli::OutputFormat::Json
            && print_json_error_envelope(command, &error).is_ok()
        {
            std::process::exit(1);
        }
        eprintln!("config-repo-cli failed: {error}");
        std::process::exit(1);
    }
}

fn run(command: cli::Command, output: cli::OutputFormat) -> Result<()> {
    let name = command.name();
    let data = match command {
        cli::Command::Show { files } => {
            let repo = load_repository(files)?;
            Value::Object(repo.resolved())
        }
        cli::Command::Get { key, files, default } => {
            let repo = load_repository(files)?;
            let default = parse_default(default.as_deref())?;
            repo.get_or(&key, default).resolve(&repo)
        }
        cli::Command::Has { key, files } => {
            let repo = load_repository(files)?;
            Value::Bool(repo.has(&key))
        }
    };

    match output {
        cli::OutputFormat::Text => print_text(&data)?,
        cli::OutputFormat::Json => print_json_envelope(name, &data)?,
    }
    Ok(())
}

fn load_repository(files: Vec<String>) -> Result<ConfigRepository> {
    let mut repo = ConfigRepository::new();
    repo.load(files)?;
    tracing::debug!(keys = repo.len(), "repository ready");
    Ok(repo)
}

fn parse_default(raw: Option<&str>) -> Result<Value> {
    match raw {
        Some(raw) => serde_json::from_str(raw)
            .map_err(|err| Error::Config(format!("--default must be valid JSON: {err}"))),
        None => Ok(Value::Null),
    }
}

fn print_text(data: &Value) -> Result<()> {
    match data {
        Value::String(text) => println!("{text}"),
        Value::Bool(flag) => println!("{flag}"),
        other => println!("{}", serde_json::to_string_pretty(other)?),
    }
    Ok(())
}

fn print_json_envelope<T: Serialize>(command: &str, data: &T) -> Result<()> {
    let envelope = CliJsonEnvelope {
        schema: OUTPUT_SCHEMA,
        status: "ok",
        command,
        data,
    };
    println!("{}", serde_json::to_string(&envelope)?);
    Ok(())
}

fn print_json_error_envelope(command: &str, error: &Error) -> Result<()> {
    let envelope = CliJsonErrorEnvelope {
        schema: OUTPUT_SCHEMA,
        status: "error",
        command,
        error: CliJsonErrorPayload {
            code: error_code(error),
            message: error.to_string(),
            source: match error {
                Error::FileLoad { path, .. } => Some(path.clone()),
                _ => None,
            },
        },
    };
    println!("{}", serde_json::to_string(&envelope)?);
    Ok(())
}

fn error_code(error: &Error) -> &'static str {
    match error {
        Error::FileLoad { .. } => "file_load_error",
        Error::Config(_) => "config_error",
        Error::Serialization(_) => "serialization_error",
    }
}

#[derive(Debug, Serialize)]
struct CliJsonEnvelope<'a, T: Serialize> {
    schema: &'a str,
    status: &'a str,
    command: &'a str,
    data: &'a T,
}

#[derive(Debug, Serialize)]
struct CliJsonErrorEnvelope<'a> {
    schema: &'a str,
    status: &'a str,
    command: &'a str,
    error: CliJsonErrorPayload,
}

#[derive(Debug, Serialize)]
struct CliJsonErrorPayload {
    code: &'static str,
    message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    source: Option<String>,
}
