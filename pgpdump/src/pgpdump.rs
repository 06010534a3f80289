/// A command-line frontend for structural OpenPGP packet dumps.

use anyhow::Context as _;
use std::fs::OpenOptions;
use std::io::{self, Write};
use std::path::Path;

use buffered_reader::{BufferedReader, File, Generic};
use log::debug;
use sequoia_pgpdump as pgpdump;

use pgpdump::{Options, Report, Result};

mod pgpdump_cli;

fn open_or_stdin(f: Option<&str>)
                 -> Result<Box<dyn BufferedReader<()>>> {
    match f {
        Some(f) if f != "-" => Ok(Box::new(File::open(f)
                                 .context("Failed to open input file")?)),
        _ => Ok(Box::new(Generic::new(io::stdin(), None))),
    }
}

fn create_or_stdout(f: Option<&str>, force: bool)
    -> Result<Box<dyn io::Write + Sync + Send>> {
    match f {
        None => Ok(Box::new(io::stdout())),
        Some(p) if p == "-" => Ok(Box::new(io::stdout())),
        Some(f) => {
            let p = Path::new(f);
            if !p.exists() || force {
                Ok(Box::new(OpenOptions::new()
                            .write(true)
                            .truncate(true)
                            .create(true)
                            .open(f)
                            .context("Failed to create output file")?))
            } else {
                Err(anyhow::anyhow!(
                    format!("File {:?} exists, use --force to overwrite", p)))
            }
        }
    }
}

/// The output formats.
enum Format {
    Text,
    Json { indent: usize },
    Toml,
}

fn render(report: &Report, format: Format) -> Result<String> {
    Ok(match format {
        Format::Text => report.to_string(),
        Format::Json { indent: 0 } =>
            serde_json::to_string(report)? + "\n",
        Format::Json { indent } => {
            use serde::Serialize;
            let indent = vec![b' '; indent];
            let formatter =
                serde_json::ser::PrettyFormatter::with_indent(&indent);
            let mut buf = Vec::new();
            let mut ser =
                serde_json::Serializer::with_formatter(&mut buf, formatter);
            report.serialize(&mut ser)?;
            buf.push(b'\n');
            String::from_utf8(buf)?
        }
        Format::Toml => toml::to_string(report)
            .context("Failed to render TOML")?,
    })
}

fn main() -> Result<()> {
    env_logger::init();

    let matches = pgpdump_cli::build().get_matches();

    let options = Options {
        debug: matches.is_present("debug"),
        integer_dump: matches.is_present("int"),
        marker_dump: matches.is_present("marker"),
        literal_dump: matches.is_present("literal"),
        private_dump: matches.is_present("private"),
        grouped_dump: matches.is_present("gdump"),
        utc: matches.is_present("utc"),
        armor_only: matches.is_present("armor"),
        ..Default::default()
    };
    debug!("{:?}", options);

    let format = if matches.is_present("json") {
        let indent = match matches.value_of("indent") {
            Some(n) => n.parse()
                .with_context(|| format!("Invalid indent {:?}", n))?,
            None => 2,
        };
        Format::Json { indent }
    } else if matches.is_present("toml") {
        Format::Toml
    } else {
        Format::Text
    };

    let mut input = open_or_stdin(matches.value_of("input"))?;
    let data = input.data_eof().context("Failed to read input")?;
    let (report, result) = pgpdump::parse(data, &options);

    // Whatever was decoded before a framing error is still shown.
    if result.is_ok() || ! report.packets().is_empty() {
        let rendered = render(&report, format)?;
        let mut output = create_or_stdout(matches.value_of("output"),
                                          matches.is_present("force"))?;
        output.write_all(rendered.as_bytes())?;
        output.flush()?;
    }
    result
}
