use std::path::PathBuf;

use anyhow::{bail, Context};
use rangekit::{init_logging, Canvas, DiagramSummary, EditorSettings, StageDiagram};

const USAGE: &str = "usage: rangekit <diagram.json> [--settings <file>]";

struct Args {
    diagram: PathBuf,
    settings: Option<PathBuf>,
}

fn parse_args() -> anyhow::Result<Args> {
    let mut diagram = None;
    let mut settings = None;
    let mut args = std::env::args_os().skip(1);

    while let Some(arg) = args.next() {
        if arg == "--settings" {
            let path = args.next().context(USAGE)?;
            settings = Some(PathBuf::from(path));
        } else if arg == "-h" || arg == "--help" {
            println!("{}", USAGE);
            std::process::exit(0);
        } else if diagram.is_none() {
            diagram = Some(PathBuf::from(arg));
        } else {
            bail!("unexpected argument {:?}\n{}", arg, USAGE);
        }
    }

    Ok(Args {
        diagram: diagram.context(USAGE)?,
        settings,
    })
}

fn main() -> anyhow::Result<()> {
    init_logging()?;
    let args = parse_args()?;

    let settings = match &args.settings {
        Some(path) => EditorSettings::load_from_file(path)
            .with_context(|| format!("Failed to load settings from {}", path.display()))?,
        None => match EditorSettings::default_config_path() {
            Some(path) => EditorSettings::load_or_default(&path)?,
            None => EditorSettings::default(),
        },
    };

    let diagram = StageDiagram::load_from_file(&args.diagram)
        .with_context(|| format!("Failed to load {}", args.diagram.display()))?;

    let mut canvas = Canvas::with_settings(&settings);
    canvas
        .import_diagram(diagram)
        .with_context(|| format!("Failed to import {}", args.diagram.display()))?;

    println!("{}", DiagramSummary::from_canvas(&canvas));
    Ok(())
}
