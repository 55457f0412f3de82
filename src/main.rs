use clap::Parser;
use serde::Serialize;
use std::path::PathBuf;
use std::process::ExitCode;
use xmlmap::{ConverterBuilder, Error, to_json};

/// Converts an XML document to JSON using a mapping specification.
#[derive(Parser, Debug)]
#[command(name = "xmlmap", version, about)]
struct Cli {
    /// Mapping specification file.
    #[arg(short, long)]
    mapping: PathBuf,

    /// Name of the mapping section to apply.
    #[arg(short, long, required_unless_present = "list")]
    schema: Option<String>,

    /// List the mapping sections and exit.
    #[arg(long, conflicts_with_all = ["schema", "dump"])]
    list: bool,

    /// Print the compiled rules instead of converting.
    #[arg(long)]
    dump: bool,

    /// With --list, print the sections as a JSON document.
    #[arg(long, requires = "list")]
    json: bool,

    /// Pretty-print the JSON output.
    #[arg(short, long)]
    pretty: bool,

    /// Enable debug logging (overridden by RUST_LOG).
    #[arg(short, long)]
    verbose: bool,

    /// XML document to convert.
    #[arg(required_unless_present_any = ["list", "dump"])]
    data: Option<PathBuf>,
}

/// The `--list --json` output.
#[derive(Serialize)]
struct SchemaListing {
    mapping: String,
    schemas: Vec<String>,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let default_filter = if cli.verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .init();

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}

fn run(cli: &Cli) -> Result<(), Error> {
    let builder = ConverterBuilder::new().with_mapping_file(&cli.mapping)?;

    if cli.list {
        let schemas = builder.schema_names()?;
        if cli.json {
            let listing = SchemaListing {
                mapping: cli.mapping.display().to_string(),
                schemas,
            };
            println!("{}", to_json(&listing, cli.pretty)?);
        } else {
            for name in schemas {
                println!("{}", name);
            }
        }
        return Ok(());
    }

    let schema = cli
        .schema
        .clone()
        .ok_or_else(|| Error::Config("--schema is required".to_string()))?;
    let converter = builder.with_schema(schema).build()?;

    if cli.dump {
        print!("{}", converter.mapping());
        return Ok(());
    }

    let data = cli
        .data
        .as_ref()
        .ok_or_else(|| Error::Config("no input document given".to_string()))?;
    log::info!("Converting {}", data.display());
    let dict = converter.convert_file(data)?;
    println!("{}", to_json(&dict, cli.pretty)?);
    Ok(())
}
