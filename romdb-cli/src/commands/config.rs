use owo_colors::OwoColorize;
use owo_colors::Stream::Stdout;

use crate::CliError;
use crate::settings::{ResolvedPaths, load_settings, settings_path};

/// Show the settings file location and the paths in effect.
pub(crate) fn run_config_show(paths: &ResolvedPaths) -> Result<(), CliError> {
    let path = settings_path();
    let settings = load_settings()?;

    log::info!("{}", "romdb Configuration".if_supports_color(Stdout, |t| t.bold()));
    crate::log_blank();
    if path.exists() {
        log::info!(
            "  Settings file: {} {}",
            path.display().if_supports_color(Stdout, |t| t.cyan()),
            "(exists)".if_supports_color(Stdout, |t| t.green()),
        );
    } else {
        log::info!(
            "  Settings file: {} {}",
            path.display().if_supports_color(Stdout, |t| t.cyan()),
            "(not found)".if_supports_color(Stdout, |t| t.dimmed()),
        );
    }

    log::info!("  Data directory: {}", paths.data_dir.display());
    log::info!("  Database:       {}", paths.database.display());

    let rendered = toml::to_string_pretty(&settings)
        .map_err(|e| CliError::config(format!("Failed to render settings: {e}")))?;
    crate::log_blank();
    log::info!("  Saved settings:");
    for line in rendered.lines() {
        log::info!("    {line}");
    }
    Ok(())
}

/// Print the settings file path.
pub(crate) fn run_config_path() {
    println!("{}", settings_path().display());
}
