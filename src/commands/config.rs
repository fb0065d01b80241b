use anyhow::Result;
use calcut_core::config::CalcutConfig;
use owo_colors::OwoColorize;

pub fn run(init: bool) -> Result<()> {
    let config_path = CalcutConfig::config_path()?;

    if init {
        if config_path.exists() {
            println!("{}", "Config file already exists, leaving it unchanged".dimmed());
        } else {
            CalcutConfig::create_default_config(&config_path)?;
            println!("Created {}", config_path.display());
        }
    }

    let config = CalcutConfig::load_from(&config_path)?;

    println!("{}", "Paths".bold());
    println!("  Config:  {}", config_path.display());
    println!("  Output:  {}", config.expanded_output_dir().display());
    println!();
    println!("{}", "Defaults".bold());
    println!("  Prefix:   {}", config.prefix.as_deref().unwrap_or("(none)"));
    println!("  Max size: {}", config.max_size.as_deref().unwrap_or("(none)"));
    println!(
        "  Mode:     {}",
        config
            .mode
            .map(|m| m.to_string())
            .unwrap_or_else(|| "per-event unless a max size is set".to_string())
    );

    Ok(())
}
