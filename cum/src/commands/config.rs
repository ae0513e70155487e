//! Config command - Show or initialize the configuration

use colored::Colorize;

use crate::config::loader::{config_exists, read_config, write_config, ENV_OVERRIDES};
use crate::config::paths::resolve_paths;
use crate::types::config::CumConfig;

pub fn run(init: bool) -> anyhow::Result<()> {
    let paths = resolve_paths();

    if init {
        return init_config(&paths.config_path);
    }

    println!("{}", "\ncum configuration\n".bold());

    println!("{}", "Config location:".dimmed());
    if config_exists(&paths.config_path) {
        println!(
            "  {} {} ({:?})",
            "●".green(),
            paths.config_path,
            paths.config_type
        );
    } else {
        println!("  {} {} (not found)", "○".red(), paths.config_path);
        println!(
            "  {}",
            "Run 'cum config --init' to create one, or rely on environment variables.".dimmed()
        );
    }

    println!("{}", "\nContext file:".dimmed());
    if config_exists(&paths.context_path) {
        println!("  {} {}", "●".green(), paths.context_path);
    } else {
        println!("  {} {} (not found)", "○".red(), paths.context_path);
    }

    let config = if config_exists(&paths.config_path) {
        match read_config(&paths.config_path) {
            Ok(config) => config,
            Err(e) => {
                eprintln!("\n{}", "Error reading config:".red());
                eprintln!("  {}", format!("{}", e).dimmed());
                println!();
                return Ok(());
            }
        }
    } else {
        CumConfig::default()
    };

    println!("{}", "\nCurrent settings:".dimmed());
    println!(
        "  api_token:          {}",
        redact_token(config.api_token.as_deref()).cyan()
    );
    println!(
        "  team_id:            {}",
        config.team_id.as_deref().unwrap_or("(auto)").cyan()
    );
    println!("  base_url:           {}", config.base_url.cyan());
    println!(
        "  external_blockers:  {}",
        format!("{}", config.assigned.external_blockers).cyan()
    );
    println!(
        "  include_closed:     {}",
        format!("{}", config.assigned.include_closed).cyan()
    );
    println!(
        "  show_legend:        {}",
        format!("{}", config.assigned.show_legend).cyan()
    );

    println!("{}", "\nEnvironment overrides:".dimmed());
    let mut has_overrides = false;
    for var in ENV_OVERRIDES {
        if let Ok(val) = std::env::var(var) {
            let shown = if var.ends_with("TOKEN") {
                redact_token(Some(&val))
            } else {
                val
            };
            println!("  {}={}", var, shown.yellow());
            has_overrides = true;
        }
    }
    if !has_overrides {
        println!("  {}", "(none)".dimmed());
    }

    println!();
    Ok(())
}

fn init_config(config_path: &str) -> anyhow::Result<()> {
    if config_exists(config_path) {
        println!(
            "{}",
            format!("Config already exists at {}", config_path).yellow()
        );
        return Ok(());
    }

    write_config(config_path, &CumConfig::default())?;
    println!("{} Created {}", "✓".green(), config_path);
    println!(
        "  {}",
        "Set api_token there or export CLICKUP_API_TOKEN.".dimmed()
    );
    Ok(())
}

/// Show only the last four characters of a token.
fn redact_token(token: Option<&str>) -> String {
    match token.map(str::trim) {
        None | Some("") => "(not set)".to_string(),
        Some(t) if t.chars().count() <= 4 => "****".to_string(),
        Some(t) => {
            let tail: String = t
                .chars()
                .rev()
                .take(4)
                .collect::<Vec<_>>()
                .into_iter()
                .rev()
                .collect();
            format!("****{tail}")
        }
    }
}
