//! Command dispatch for the flocky binary

use std::io;
use std::path::Path;

use clap::CommandFactory;
use clap_complete::generate;
use tracing::{debug, instrument};

use crate::application::{export_json, replay, Session};
use crate::cli::args::{Cli, Commands, ConfigCommands};
use crate::cli::error::{CliError, CliResult};
use crate::cli::output;
use crate::config::{global_config_path, Settings};
use crate::domain::{BulletId, ZoomState};
use crate::infrastructure::source::{load_script, load_snapshot};
use crate::infrastructure::{FileSystem, RealFileSystem};
use crate::render::{render, RenderStyle, TreeConvert};

pub fn execute_command(cli: &Cli) -> CliResult<()> {
    let settings = Settings::load(cli.config.as_deref())?;
    output::set_color(settings.color);
    run(cli, &settings, &RealFileSystem)
}

/// Dispatch with explicit settings and filesystem.
pub fn run(cli: &Cli, settings: &Settings, fs: &dyn FileSystem) -> CliResult<()> {
    match &cli.command {
        Some(Commands::Replay { script, json }) => _replay(fs, settings, script.as_deref(), *json),
        Some(Commands::Show { snapshot, zoom }) => _show(fs, settings, snapshot, *zoom),
        Some(Commands::Check { snapshot }) => _check(fs, snapshot),
        Some(Commands::Config { command }) => _config(settings, command, cli.config.as_deref()),
        Some(Commands::Completion { shell }) => {
            let mut cmd = Cli::command();
            let name = cmd.get_name().to_string();
            generate(*shell, &mut cmd, name, &mut io::stdout());
            Ok(())
        }
        None => Ok(()),
    }
}

#[instrument(skip(fs, settings))]
fn _replay(fs: &dyn FileSystem, settings: &Settings, script: Option<&Path>, json: bool) -> CliResult<()> {
    let steps = load_script(fs, script)?;
    debug!(steps = steps.len(), "script loaded");
    let session = replay(Session::new(), &steps);
    if json {
        output::info(&export_json(session.outline(), true)?);
    } else {
        output::info(&session.to_tree_string(&RenderStyle::from(settings)));
    }
    Ok(())
}

#[instrument(skip(fs, settings))]
fn _show(fs: &dyn FileSystem, settings: &Settings, snapshot: &Path, zoom: Option<u64>) -> CliResult<()> {
    let outline = load_snapshot(fs, snapshot)?;
    let zoom = match zoom {
        Some(raw) => ZoomState::top_level()
            .try_zoom_in(&outline, BulletId(raw))
            .map_err(|e| CliError::InvalidArgs(e.to_string()))?,
        None => ZoomState::top_level(),
    };
    output::info(&render(&outline, zoom, None, &RenderStyle::from(settings)));
    Ok(())
}

#[instrument(skip(fs))]
fn _check(fs: &dyn FileSystem, snapshot: &Path) -> CliResult<()> {
    match load_snapshot(fs, snapshot) {
        Ok(outline) => {
            output::success(&format!(
                "{}: {} bullets, depth {}",
                snapshot.display(),
                outline.node_count(),
                outline.depth()
            ));
            Ok(())
        }
        Err(e) => {
            output::failure(&snapshot.display());
            Err(e.into())
        }
    }
}

fn _config(settings: &Settings, command: &ConfigCommands, explicit: Option<&Path>) -> CliResult<()> {
    match command {
        ConfigCommands::Show => output::info(&settings.to_toml()?),
        ConfigCommands::Path => {
            output::header("Config files");
            match global_config_path() {
                Some(path) => output::detail(&format!("global: {}", path.display())),
                None => output::detail(&"global: <no config directory>"),
            }
            if let Some(path) = explicit {
                output::detail(&format!("explicit: {}", path.display()));
            }
        }
        ConfigCommands::Template => output::info(&Settings::template()),
    }
    Ok(())
}
