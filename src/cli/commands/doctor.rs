//! Doctor command - verify credentials and configuration.

use crate::cli::Output;
use crate::config::{check_all, Settings};
use console::style;

/// Run the doctor checks.
pub fn run_doctor(settings: &Settings) -> anyhow::Result<()> {
    Output::header("Prat Doctor");
    println!();

    println!("{}", style("Credentials").bold());
    let mut missing = 0;
    for (name, present) in check_all() {
        if present {
            println!("  {} {} is set", style("✓").green(), style(name).bold());
        } else {
            missing += 1;
            println!("  {} {} is not set", style("✗").red(), style(name).bold());
            println!("    Set it with: export {}='...'", name);
        }
    }

    println!();
    println!("{}", style("Configuration").bold());
    let config_path = Settings::default_config_path();
    if config_path.exists() {
        println!(
            "  {} config file: {}",
            style("✓").green(),
            config_path.display()
        );
    } else {
        println!(
            "  {} no config file at {} (defaults in use)",
            style("!").yellow(),
            config_path.display()
        );
    }
    Output::kv("Draft model", &settings.composer.draft_model);
    Output::kv("Refine model", &settings.composer.refine_model);
    Output::kv("Embedding model", &settings.embedding.model);

    println!();
    if missing == 0 {
        Output::success("All checks passed.");
    } else {
        Output::error(&format!("{} credential(s) missing.", missing));
        anyhow::bail!("doctor found problems");
    }

    Ok(())
}
