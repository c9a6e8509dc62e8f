use env_logger::Builder;
use log::{info, LevelFilter};
use std::{
    env,
    io::{stdout, Write},
    path::{Path, PathBuf},
};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};

use inistore::Document;

#[derive(Parser, Debug)]
#[clap(name = "inistore", version = "0.1.0")]
pub struct Opts {
    #[clap(subcommand)]
    pub cmd: Cmd,
    #[clap(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,
}

#[derive(Subcommand, Debug)]
pub enum Cmd {
    /// Print a whole file, optionally converted
    Show {
        input: PathBuf,
        /// output filepath
        #[clap(short, long)]
        output: Option<PathBuf>,
        #[clap(short, long, value_enum)]
        to: Option<ToVariant>,
    },
    /// List section names
    Sections { input: PathBuf },
    /// List parameter names of a section
    Params { input: PathBuf, section: String },
    /// Print a single value
    Get {
        input: PathBuf,
        section: String,
        key: String,
    },
    /// Set a value and save the file
    Set {
        input: PathBuf,
        section: String,
        key: String,
        value: String,
        /// create the section (and the file) when missing
        #[clap(long, action = clap::ArgAction::SetTrue)]
        create_section: bool,
    },
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq)]
pub enum ToVariant {
    Ini,
    Json,
    PrettyJson,
    Yaml,
}

impl ToVariant {
    fn from_path<P: AsRef<Path>>(path: P) -> Option<Self> {
        let p = path.as_ref().extension()?.to_str()?;
        match p {
            "ini" | "conf" | "cfg" => Some(Self::Ini),
            "json" => Some(Self::Json),
            "yaml" | "yml" => Some(Self::Yaml),
            _ => None,
        }
    }

    fn to_buf(self, doc: &Document) -> Result<Vec<u8>> {
        let buf = match self {
            ToVariant::Ini => doc.to_string().into_bytes(),
            ToVariant::Json => serde_json::to_vec(doc)?,
            ToVariant::PrettyJson => serde_json::to_vec_pretty(doc)?,
            ToVariant::Yaml => serde_yaml::to_string(doc)?.into_bytes(),
        };
        Ok(buf)
    }
}

fn load(input: &Path) -> Result<Document> {
    Document::load(input).with_context(|| format!("Failed to read {}", input.display()))
}

fn print_lines<'a>(lines: impl IntoIterator<Item = &'a str>) -> Result<()> {
    let mut out = stdout().lock();
    for line in lines {
        writeln!(out, "{line}")?;
    }
    Ok(())
}

pub fn run(opts: Opts) -> Result<()> {
    match opts.cmd {
        Cmd::Show { input, output, to } => {
            let doc = load(&input)?;
            let to_variant = to.unwrap_or_else(|| {
                output
                    .as_ref()
                    .and_then(ToVariant::from_path)
                    .unwrap_or(ToVariant::Ini)
            });
            let buf = to_variant.to_buf(&doc)?;

            if let Some(output_file) = output {
                std::fs::write(&output_file, buf)
                    .with_context(|| format!("Failed to write to file: {:?}", output_file))?;
            } else {
                stdout().lock().write_all(&buf)?;
            }
        }
        Cmd::Sections { input } => {
            let doc = load(&input)?;
            print_lines(doc.sections())?;
        }
        Cmd::Params { input, section } => {
            let doc = load(&input)?;
            print_lines(doc.parameters(&section)?)?;
        }
        Cmd::Get { input, section, key } => {
            let doc = load(&input)?;
            print_lines([doc.get(&section, &key)?])?;
        }
        Cmd::Set {
            input,
            section,
            key,
            value,
            create_section,
        } => {
            let mut doc = if create_section && !input.exists() {
                info!("{} does not exist, starting from an empty document", input.display());
                Document::new()
            } else {
                load(&input)?
            };

            if create_section && !doc.contains_section(&section) {
                doc.insert_section(section.as_str());
            }
            doc.set(&section, key, value)?;
            doc.save(&input)?;
        }
    }

    Ok(())
}

fn init_logger(opts: &Opts) {
    let rust_log = env::var("RUST_LOG").ok();

    let mut builder = Builder::from_default_env();

    #[cfg(not(debug_assertions))]
    {
        builder
            .format_module_path(false)
            .format_target(false)
            .format_timestamp(None);
    }

    if rust_log.is_none() {
        let log_level = match opts.verbose {
            0 => LevelFilter::Warn,
            1 => LevelFilter::Info,
            2 => LevelFilter::Debug,
            _ => LevelFilter::Trace,
        };

        builder.filter(None, log_level);
    }

    builder.init();
}

fn main() {
    let opts = Opts::parse();

    init_logger(&opts);

    if let Err(e) = run(opts) {
        eprintln!("Error: {e:#}");
        std::process::exit(1);
    }
}
