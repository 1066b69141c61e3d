//! Command dispatch

use std::io::{self, Write};
use std::path::{Path, PathBuf};

use clap::CommandFactory;
use clap_complete::{generate, Shell};
use tracing::{debug, instrument};

use crate::cli::args::{Cli, Commands, ConfigCommands};
use crate::cli::error::CliResult;
use crate::cli::output;
use crate::config::{global_config_path, Settings};
use crate::domain::{Mode, Terminal};
use crate::infrastructure::console::{ConsoleChoices, ConsolePresenter};
use crate::infrastructure::di::ServiceContainer;
use crate::infrastructure::InfraError;

/// Execute the parsed CLI command. Without a subcommand a session is played
/// with the configured settings.
pub fn execute_command(cli: &Cli) -> CliResult<()> {
    match &cli.command {
        Some(Commands::Explore {
            map,
            mode,
            hide_neighbors,
        }) => cmd_explore(cli, map.as_deref(), *mode, *hide_neighbors),
        Some(Commands::Map { map }) => cmd_map(cli, map.as_deref()),
        Some(Commands::Config { command }) => cmd_config(cli, command),
        Some(Commands::Completion { shell }) => cmd_completion(*shell),
        None => cmd_explore(cli, None, None, false),
    }
}

fn load_settings(cli: &Cli) -> CliResult<Settings> {
    Ok(Settings::load(cli.config.as_deref())?)
}

/// Command-line flags win over every configuration layer.
fn apply_flags(
    mut settings: Settings,
    map: Option<&Path>,
    mode: Option<Mode>,
    hide_neighbors: bool,
) -> Settings {
    if let Some(mode) = mode {
        settings.mode = mode;
    }
    if let Some(map) = map {
        settings.map_file = Some(PathBuf::from(map));
    }
    if hide_neighbors {
        settings.show_neighbors = false;
    }
    settings
}

#[instrument(level = "debug", skip(cli))]
fn cmd_explore(
    cli: &Cli,
    map: Option<&Path>,
    mode: Option<Mode>,
    hide_neighbors: bool,
) -> CliResult<()> {
    let settings = apply_flags(load_settings(cli)?, map, mode, hide_neighbors);
    debug!(?settings, "effective settings");
    let container = ServiceContainer::new(settings);

    let spec = container
        .map_service()
        .resolve(container.settings.map_file.as_deref())?;
    let service = container.investigation_service();

    output::header(&format!("Detective Quest ({} mode)", service.mode()));
    match service.mode() {
        Mode::Investigate => {
            output::detail("Collect the clues hidden in the rooms. Stop when you are ready.")
        }
        Mode::Explore => output::detail("Find a room with no way further."),
    }
    output::info("");

    let mut choices = ConsoleChoices::stdin();
    let mut presenter = ConsolePresenter::stdout(container.settings.show_neighbors);
    let report = service.run(&spec, &mut choices, &mut presenter)?;

    output::info("");
    match report.terminal {
        Terminal::Exited => output::header("Investigation closed."),
        Terminal::DeadEnd => output::header("Exploration finished."),
    }
    output::detail(&format!("Rooms entered: {}", report.path.len()));
    Ok(())
}

#[instrument(level = "debug", skip(cli))]
fn cmd_map(cli: &Cli, map: Option<&Path>) -> CliResult<()> {
    let settings = apply_flags(load_settings(cli)?, map, None, false);
    let container = ServiceContainer::new(settings);
    let service = container.map_service();

    let spec = service.resolve(container.settings.map_file.as_deref())?;
    let tree = service.build(&spec)?;

    let mut out = io::stdout().lock();
    write!(out, "{}", service.render(&tree))
        .and_then(|_| out.flush())
        .map_err(|e| InfraError::io("write map", e))?;
    output::detail(&format!(
        "{} rooms, {} with clues, depth {}",
        tree.len(),
        tree.remaining_clues(),
        tree.depth()
    ));
    Ok(())
}

fn cmd_config(cli: &Cli, command: &ConfigCommands) -> CliResult<()> {
    match command {
        ConfigCommands::Show => {
            let settings = load_settings(cli)?;
            output::info(&settings.to_toml()?);
        }
        ConfigCommands::Template => output::info(&Settings::template()),
        ConfigCommands::Path => match global_config_path() {
            Some(path) => {
                output::info(&path.display());
                if !path.exists() {
                    output::warning("file does not exist yet");
                }
            }
            None => output::warning("no config directory available on this platform"),
        },
    }
    Ok(())
}

fn cmd_completion(shell: Shell) -> CliResult<()> {
    let mut cmd = Cli::command();
    let name = cmd.get_name().to_string();
    generate(shell, &mut cmd, name, &mut io::stdout());
    Ok(())
}
