use clap::Parser;
use color_eyre::Result;
use std::fs::File;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tracing_subscriber::{EnvFilter, FmtSubscriber};

use ifc_treeview::dump::{dump_csv, dump_json, DumpFormat};
use ifc_treeview::parser::load_if_present;
use ifc_treeview::tree::objects::OBJECT_HEADERS;
use ifc_treeview::tree::properties::PROPERTY_HEADERS;
use ifc_treeview::tree::{build_object_tree, build_property_panel, DisplayRow};
use ifc_treeview::ui::App;

/// File opened when no path is given.
const DEFAULT_FILE: &str = "Ifc4_SampleHouse.ifc";

#[derive(Parser, Debug)]
#[command(name = "ifc-treeview")]
#[command(about = "IFC Tree View - browse the object hierarchy and property sets of IFC files")]
#[command(version)]
struct Args {
    /// Path to IFC file
    #[arg(default_value = DEFAULT_FILE)]
    file: PathBuf,

    /// Print the tree to stdout instead of opening the viewer
    #[arg(long, value_enum, value_name = "FORMAT")]
    dump: Option<DumpFormat>,

    /// With --dump, print the property panel for these GlobalIds instead
    #[arg(long = "select", value_name = "GLOBALID", requires = "dump")]
    select: Vec<String>,

    /// Write log output to this file
    #[arg(long, value_name = "FILE")]
    log_file: Option<PathBuf>,
}

fn main() -> Result<()> {
    color_eyre::install()?;
    let args = Args::parse();
    init_logging(args.log_file.as_deref(), args.dump.is_some())?;

    let Some(model) = load_if_present(&args.file)? else {
        return Ok(());
    };

    if let Some(format) = args.dump {
        let (rows, headers) = if args.select.is_empty() {
            (vec![build_object_tree(&model)], OBJECT_HEADERS)
        } else {
            let selection: Vec<DisplayRow> = args
                .select
                .iter()
                .map(|global_id| DisplayRow::new("", "", global_id.as_str()))
                .collect();
            (build_property_panel(&model, &selection), PROPERTY_HEADERS)
        };

        let stdout = io::stdout().lock();
        match format {
            DumpFormat::Json => dump_json(&rows, stdout)?,
            DumpFormat::Csv => dump_csv(&rows, headers, stdout)?,
        }
        return Ok(());
    }

    let terminal = ratatui::init();
    let result = App::new(model).run(terminal);
    ratatui::restore();
    result
}

/// Logs go to `log_file` when given, to stderr in dump mode, and nowhere
/// while the terminal UI owns the screen.
fn init_logging(log_file: Option<&Path>, headless: bool) -> Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info"));
    let builder = FmtSubscriber::builder()
        .with_env_filter(filter)
        .with_target(false)
        .compact();

    if let Some(path) = log_file {
        let file = File::create(path)?;
        builder.with_ansi(false).with_writer(Mutex::new(file)).init();
    } else if headless {
        builder.with_writer(io::stderr).init();
    }

    Ok(())
}
