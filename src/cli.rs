//! Headless command line front end.
//!
//! Loads a layout, optionally replays scripted drags against it, saves or
//! resets the edited layout, and prints the rendered summary together with
//! any invariant violations.
//!
//! ```text
//! cutlayout <original.json> [--edited FILE] [--config FILE]
//!           [--drag 1:210,10>2:400,120 ...] [--save FILE] [--reset]
//! ```
//!
//! Sheets are numbered from 1 as in the headings. A drag target of `-` lifts
//! the pointer off every sheet before releasing it.

use crate::{drag_options, view_options};
use anyhow::{anyhow, bail, Context};
use clap::Parser;
use cutlayout_core::{LayoutPayload, Point};
use cutlayout_editor::{
    audit, DropOutcome, FileGateway, LayoutEditor, MemoryGateway, PersistenceGateway,
    PointerEvent,
};
use cutlayout_settings::EditorConfig;
use std::fmt::Write as _;
use std::path::{Path, PathBuf};

const LONG_VERSION: &str = concat!(env!("CARGO_PKG_VERSION"), " (built ", env!("BUILD_DATE"), ")");

/// One pointer-down, pointer-move, pointer-up sequence
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScriptedDrag {
    pub from: PointerEvent,
    pub to: PointerEvent,
}

impl ScriptedDrag {
    /// Parses `S:X,Y>S:X,Y` with 1-based sheets; the target may be `-`.
    pub fn parse(spec: &str) -> anyhow::Result<Self> {
        let (from, to) = spec
            .split_once('>')
            .ok_or_else(|| anyhow!("drag '{spec}' must look like 1:10,10>2:40,40"))?;
        let from = parse_pointer(from).with_context(|| format!("in drag '{spec}'"))?;
        let to = if to.trim() == "-" {
            PointerEvent::off_surface()
        } else {
            parse_pointer(to).with_context(|| format!("in drag '{spec}'"))?
        };
        Ok(Self { from, to })
    }
}

fn parse_pointer(text: &str) -> anyhow::Result<PointerEvent> {
    let (sheet, coords) = text
        .trim()
        .split_once(':')
        .ok_or_else(|| anyhow!("pointer '{text}' must look like SHEET:X,Y"))?;
    let sheet: usize = sheet.parse().context("sheet must be a number")?;
    if sheet == 0 {
        bail!("sheets are numbered from 1");
    }
    let (x, y) = coords
        .split_once(',')
        .ok_or_else(|| anyhow!("coordinates '{coords}' must look like X,Y"))?;
    Ok(PointerEvent::on_sheet(
        sheet - 1,
        x.trim().parse().context("x must be a number")?,
        y.trim().parse().context("y must be a number")?,
    ))
}

/// Parsed command line
#[derive(Parser, Debug, Clone, PartialEq)]
#[command(name = "cutlayout")]
#[command(about = "Replay manual adjustments against an optimized cut layout")]
#[command(version, long_version = LONG_VERSION)]
pub struct CliArgs {
    /// Optimized layout JSON
    pub original: PathBuf,

    /// Previously saved edited layout (overrides the original)
    #[arg(long, value_name = "FILE")]
    pub edited: Option<PathBuf>,

    /// Editor settings (.toml or .json)
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Replay a drag, e.g. 1:210,10>2:400,120 or 1:210,10>-
    #[arg(long = "drag", value_name = "DRAG", value_parser = ScriptedDrag::parse)]
    pub drags: Vec<ScriptedDrag>,

    /// Save the edited layout to FILE after the drags
    #[arg(long, value_name = "FILE")]
    pub save: Option<PathBuf>,

    /// Delete the edited layout at --save FILE first
    #[arg(long, requires = "save")]
    pub reset: bool,
}

fn load_config(path: Option<&Path>) -> anyhow::Result<EditorConfig> {
    if let Some(path) = path {
        return EditorConfig::load_from_file(path)
            .with_context(|| format!("reading config {}", path.display()));
    }
    match EditorConfig::default_path().and_then(|p| EditorConfig::load_or_default(&p)) {
        Ok(config) => Ok(config),
        Err(e) => {
            tracing::warn!(error = %e, "ignoring user editor config");
            Ok(EditorConfig::default())
        }
    }
}

/// Reads a payload file. Unparseable content is reported and treated as absent.
fn read_payload(path: &Path) -> anyhow::Result<Option<LayoutPayload>> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("reading layout {}", path.display()))?;
    match LayoutPayload::from_json_str(&text) {
        Ok(payload) => Ok(Some(payload)),
        Err(e) => {
            tracing::warn!(path = %path.display(), error = %e, "layout file is not a layout");
            Ok(None)
        }
    }
}

/// Loads the layouts, replays the drags and returns the text to print.
pub async fn run(args: &CliArgs) -> anyhow::Result<String> {
    let config = load_config(args.config.as_deref())?;
    let original = read_payload(&args.original)?;

    let file_gateway = args.save.as_ref().map(FileGateway::new);
    let mut edited = match &args.edited {
        Some(path) => read_payload(path)?,
        None => None,
    };
    if edited.is_none() && !args.reset {
        if let Some(gateway) = &file_gateway {
            edited = gateway.load().await?.map(|saved| saved.layout);
        }
    }

    let memory_gateway = MemoryGateway::new();
    let gateway: &dyn PersistenceGateway = match &file_gateway {
        Some(gateway) => gateway,
        None => &memory_gateway,
    };

    let mut editor = LayoutEditor::new(original, edited, drag_options(&config));
    let mut out = String::new();

    if args.reset {
        editor.reset(gateway).await?;
        writeln!(out, "reset to original layout")?;
    }

    if !args.drags.is_empty() {
        editor.enter_edit_mode()?;
        for drag in &args.drags {
            writeln!(out, "{}", replay(&mut editor, drag))?;
        }
        if args.save.is_some() {
            editor.save(gateway).await?;
            writeln!(out, "saved edited layout")?;
        }
    }

    let Some(view) = editor.view(&view_options(&config)) else {
        writeln!(out, "no layout to display")?;
        return Ok(out);
    };
    for sheet in &view.sheets {
        writeln!(out, "{}", sheet.heading)?;
        for piece in &sheet.pieces {
            write!(
                out,
                "  {} at ({}, {}) {}",
                piece.dimensions, piece.position.x, piece.position.y, piece.color
            )?;
            if let Some(label) = &piece.label {
                write!(out, " {label}")?;
            }
            writeln!(out)?;
        }
    }
    writeln!(out, "{}", view.summary)?;
    writeln!(out, "{} piece type(s)", editor.lookup().piece_types())?;

    if let Some(layout) = editor.display_layout() {
        for violation in audit(layout) {
            writeln!(out, "warning: {violation}")?;
        }
    }
    Ok(out)
}

fn replay(editor: &mut LayoutEditor, drag: &ScriptedDrag) -> String {
    let (Some(sheet), position) = (drag.from.sheet, drag.from.position) else {
        return "drag ignored: no start sheet".to_string();
    };
    if editor.pointer_down(drag.from).is_none() {
        return format!(
            "no piece on sheet {} at ({}, {})",
            sheet + 1,
            position.x,
            position.y
        );
    }
    editor.pointer_move(drag.to);
    match editor.pointer_up() {
        Some(DropOutcome::Moved {
            sheet, index, to, ..
        }) => format!("moved sheet {} piece {} to {}", sheet + 1, index + 1, point(to)),
        Some(DropOutcome::Transferred {
            from_sheet,
            from_index,
            transfer,
        }) => {
            let mut line = format!(
                "moved sheet {} piece {} to sheet {} at {}",
                from_sheet + 1,
                from_index + 1,
                transfer.sheet + 1,
                point(transfer.position)
            );
            if transfer.source_pruned {
                line.push_str(&format!(" (sheet {} removed)", from_sheet + 1));
            }
            line
        }
        Some(DropOutcome::Rejected {
            sheet,
            index,
            origin,
        }) => format!(
            "rejected: sheet {} piece {} stays at {}",
            sheet + 1,
            index + 1,
            point(origin)
        ),
        None => "drag ignored".to_string(),
    }
}

fn point(p: Point) -> String {
    format!("({}, {})", p.x, p.y)
}
