use anyhow::{Context, bail};
use clap::{Arg, ArgMatches, Command};
use common::config::Settings;
use common::logging::init_tracing;
use opendataswiss::RecordSource;
use std::io::Write;
use std::path::Path;
use std::process;

fn config_arg() -> Arg {
    Arg::new("config")
        .short('c')
        .long("config")
        .value_name("FILE")
        .global(true)
        .help("Sets a custom config file")
}

#[tokio::main]
async fn main() {
    let matches = Command::new("OpenDataSwiss Catalog Publisher")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Converts EnviDat metadata to DCAT-AP CH and publishes it")
        .arg(config_arg())
        .subcommand(
            Command::new("publish").about("Fetch, convert and upload the catalog (default)"),
        )
        .subcommand(
            Command::new("convert")
                .about("Convert the catalog without uploading it")
                .arg(
                    Arg::new("input")
                        .short('i')
                        .long("input")
                        .value_name("FILE")
                        .help("Read a saved package list instead of calling the API"),
                )
                .arg(
                    Arg::new("output")
                        .short('o')
                        .long("output")
                        .value_name("FILE")
                        .help("Write the XML to a file instead of stdout"),
                ),
        )
        .get_matches();

    if let Err(e) = run(&matches).await {
        eprintln!("opendataswiss error: {:#}", e);
        process::exit(1);
    }
}

async fn run(matches: &ArgMatches) -> anyhow::Result<()> {
    let config_path = matches
        .get_one::<String>("config")
        .map(|s| s.as_str())
        .unwrap_or("config/opendataswiss.toml");

    let settings = Settings::new(config_path)
        .with_context(|| format!("Failed to load configuration from {}", config_path))?;
    init_tracing(&settings.logging)?;

    match matches.subcommand() {
        Some(("convert", convert_matches)) => {
            let source = match convert_matches.get_one::<String>("input") {
                Some(path) => RecordSource::File(Path::new(path)),
                None => RecordSource::Api,
            };
            let output = convert_matches.get_one::<String>("output").map(Path::new);

            let (xml, _) = opendataswiss::run_convert(&settings, source, output).await?;
            if output.is_none() {
                std::io::stdout()
                    .write_all(xml.as_bytes())
                    .context("Failed to write catalog to stdout")?;
            }
        }
        Some(("publish", _)) | None => {
            let report = opendataswiss::run_publish_pipeline(&settings).await?;
            if !report.is_success() {
                bail!("catalog upload to bucket '{}' failed", settings.publish.bucket);
            }
        }
        Some((other, _)) => bail!("unknown subcommand '{}'", other),
    }

    Ok(())
}
