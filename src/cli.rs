use std::io::{self, Read, Write};
use std::path::{Path, PathBuf};

use anyhow::Result;
use clap::Parser;

use crate::config::load_config;
use crate::layout::compute_layout;
use crate::layout_dump::{LayoutDump, write_layout_dump};
use crate::records::parse_payload;

/// Layout inspector: reads a formulation graph payload, computes the region
/// layout, and dumps it as JSON. Debugging aid; persistence stays with the
/// host application.
#[derive(Parser, Debug)]
#[command(name = "pbtf", version, about = "PBT formulation graph layout inspector")]
pub struct Args {
    /// Input graph payload (.json) or '-' for stdin
    #[arg(short = 'i', long = "input")]
    pub input: Option<PathBuf>,

    /// Output file for the layout dump. Defaults to stdout.
    #[arg(short = 'o', long = "output")]
    pub output: Option<PathBuf>,

    /// Layout config file (JSON5)
    #[arg(short = 'c', long = "configFile")]
    pub config: Option<PathBuf>,
}

pub fn run() -> Result<()> {
    let args = Args::parse();
    let config = load_config(args.config.as_deref())?;

    let input = read_input(args.input.as_deref())?;
    let graph = parse_payload(&input)?.into_graph();
    let layout = compute_layout(&graph, &config);

    match args.output.as_deref() {
        Some(path) => write_layout_dump(path, &layout, &graph)?,
        None => {
            let dump = LayoutDump::from_layout(&layout, &graph);
            let json = serde_json::to_string_pretty(&dump)?;
            let mut stdout = io::stdout().lock();
            stdout.write_all(json.as_bytes())?;
            stdout.write_all(b"\n")?;
        }
    }
    Ok(())
}

fn read_input(path: Option<&Path>) -> Result<String> {
    match path {
        Some(path) if path == Path::new("-") => {
            let mut buf = String::new();
            io::stdin().read_to_string(&mut buf)?;
            Ok(buf)
        }
        Some(path) => Ok(std::fs::read_to_string(path)?),
        None => {
            let mut buf = String::new();
            io::stdin().read_to_string(&mut buf)?;
            Ok(buf)
        }
    }
}
