//! Command line entry point: print a champion's stats at a level with items.

use anyhow::{Context, Result};
use clap::Parser;
use riftstat::data::fetch::HttpFetcher;
use riftstat::{Champion, DataConfig, GameData};
use std::path::PathBuf;

/// Champion stat snapshot from Data Dragon and Community Dragon data
#[derive(Parser)]
#[command(name = "riftstat", version)]
struct Cli {
    /// Champion id or name (e.g. MonkeyKing, Wukong)
    #[arg(value_name = "CHAMPION")]
    champion: String,

    /// Config file (defaults are used if it does not exist)
    #[arg(short, long, value_name = "PATH", default_value = "riftstat.toml")]
    config: PathBuf,

    /// Refetch every dataset even if cached
    #[arg(short, long)]
    update: bool,

    /// Champion level (1-18)
    #[arg(short, long, default_value_t = 1)]
    level: u8,

    /// Item id to apply, repeatable
    #[arg(short, long = "item", value_name = "ID")]
    items: Vec<String>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "summary")]
    format: OutputFormat,
}

#[derive(Clone, Copy, clap::ValueEnum)]
enum OutputFormat {
    /// Main combat stats
    Summary,
    /// Full champion as JSON
    Json,
}

fn main() -> Result<()> {
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let config = DataConfig::load_or_default(&cli.config)
        .with_context(|| format!("loading {}", cli.config.display()))?;
    let fetcher = HttpFetcher::from_config(&config)?;
    let data = GameData::load(&config, &fetcher, cli.update)?;

    let mut champion = data.champion(&cli.champion)?;
    champion.set_level(cli.level)?;
    champion.set_bonuses(data.bonuses(cli.items.as_slice())?);

    match cli.format {
        OutputFormat::Summary => print_summary(&data.version, &champion),
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&champion)?),
    }
    Ok(())
}

fn print_summary(version: &str, champion: &Champion) {
    let stats = champion.stats();
    println!("{} (level {}, patch {version})", champion.name(), champion.level());
    println!("  health          {:>8.1}  (+{:.1})", stats.health, stats.health_bonus);
    println!("  health regen    {:>8.2}", stats.health_regen);
    if !champion.resource_type().is_empty() {
        println!(
            "  {:<15} {:>8.1}  (+{:.1})",
            champion.resource_type().to_lowercase(),
            stats.resource,
            stats.resource_bonus
        );
    }
    println!("  armor           {:>8.1}  (+{:.1})", stats.armor, stats.armor_bonus);
    println!("  magic resist    {:>8.1}  (+{:.1})", stats.magic_resist, stats.magic_resist_bonus);
    println!("  attack damage   {:>8.1}  (+{:.1})", stats.attack_damage, stats.attack_damage_bonus);
    println!("  ability power   {:>8.1}", stats.ability_power);
    println!("  attack speed    {:>8.3}", stats.attack_speed);
    println!("  crit chance     {:>7.0}%", stats.crit_chance * 100.0);
    println!("  attack range    {:>8.0}", stats.attack_range);
    println!("  move speed      {:>8.1}", stats.move_speed);
    println!("  ability haste   {:>8.0}", stats.ability_haste);
    println!(
        "  effective hp    {:>8.0} physical, {:.0} magic",
        champion.effective_health_physical(),
        champion.effective_health_magic()
    );
}
