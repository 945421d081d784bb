//! CLI logic for the Gridboard layout tool.
//!
//! This module contains the core CLI logic: loading a layout file, running one
//! command on it and writing the result.

pub mod error_adapter;

mod args;
mod config;

pub use args::{Args, Command};

use std::fs;

use log::{info, warn};

use gridboard::{
    Board, GridboardError, LayoutBuilder,
    diagnostic::{Diagnostic, LayoutError, has_errors},
    geometry::GridSize,
    identifier::WidgetId,
};

use error_adapter::DiagnosticAdapter;

/// Run the Gridboard CLI application
///
/// # Arguments
///
/// * `args` - Command-line arguments
///
/// # Errors
///
/// Returns `GridboardError` for:
/// - File I/O errors
/// - Configuration loading errors
/// - Malformed layouts, or layouts violating board invariants
/// - Rejected edits
pub fn run(args: &Args) -> Result<(), GridboardError> {
    info!(input_path = args.input; "Processing layout");

    let app_config = config::load_config(args.config.as_ref())?;
    let source = fs::read_to_string(&args.input)?;
    let builder = LayoutBuilder::new(app_config);

    match &args.command {
        Command::Check => {
            let diagnostics = builder.check(&source)?;
            if has_errors(&diagnostics) {
                return Err(GridboardError::new_layout_error(
                    LayoutError::new(diagnostics),
                    source,
                ));
            }
            report_warnings(&diagnostics, &source);
            info!(warnings = diagnostics.len(); "Layout is valid");
        }
        Command::Place { width, height } => {
            let board = builder.load(&source)?;
            let position = board.next_free_position(GridSize::new(*width, *height))?;
            println!("{position}");
        }
        Command::Insert {
            id,
            width,
            height,
            index,
        } => {
            let mut board = builder.load(&source)?;
            let index = index.unwrap_or(board.len());
            let change = board.insert_at(WidgetId::new(id), GridSize::new(*width, *height), index)?;
            info!(widget = id.as_str(), reorganized = change.reorganized(); "Inserted widget");
            write_layout(&builder, &board, args)?;
        }
        Command::Reorganize => {
            let mut board = builder.load(&source)?;
            let change = board.reorganize();
            info!(updated = change.keys().len(); "Reorganized order keys");
            write_layout(&builder, &board, args)?;
        }
        Command::Reflow {
            columns,
            breakpoint,
        } => {
            let mut board = builder.load(&source)?;
            let columns = columns.unwrap_or_else(|| {
                builder
                    .config()
                    .grid()
                    .columns(breakpoint.unwrap_or_default())
            });
            let change = board.set_columns(columns);
            info!(columns, moved = change.positions().len(); "Reflowed layout");
            write_layout(&builder, &board, args)?;
        }
    }

    Ok(())
}

fn write_layout(builder: &LayoutBuilder, board: &Board, args: &Args) -> Result<(), GridboardError> {
    let layout = builder.save(board)?;
    match &args.output {
        Some(path) => {
            fs::write(path, layout)?;
            info!(output_file = path.as_str(); "Layout written");
        }
        None => print!("{layout}"),
    }
    Ok(())
}

/// Logs each warning rendered with its source snippet.
fn report_warnings(diagnostics: &[Diagnostic], source: &str) {
    let reporter = miette::GraphicalReportHandler::new();
    for diag in diagnostics.iter().filter(|diag| diag.severity().is_warning()) {
        let mut writer = String::new();
        match reporter.render_report(&mut writer, &DiagnosticAdapter::new(diag, source)) {
            Ok(()) => warn!("{writer}"),
            Err(_) => warn!("{diag}"),
        }
    }
}
