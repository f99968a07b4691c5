use anyhow::Context;
use clap::Parser;
use monolith_scaffold::utils::{logger, validation::Validate};
use monolith_scaffold::{
    CliConfig, PathToolLocator, ProjectLayout, ProjectName, ScaffoldReport, ScaffoldSettings,
    Scaffolder, SystemRunner,
};
use std::path::PathBuf;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = CliConfig::parse();

    // 載入設定檔（未指定時使用預設值）
    let settings = match &config.config {
        Some(path) => match ScaffoldSettings::from_file(path) {
            Ok(settings) => settings,
            Err(e) => {
                eprintln!("❌ Failed to load config file '{}': {}", path, e);
                eprintln!("💡 {}", e.recovery_suggestion());
                std::process::exit(e.exit_code());
            }
        },
        None => ScaffoldSettings::default(),
    };

    if let Err(e) = settings.validate() {
        eprintln!("❌ {}", e.user_friendly_message());
        eprintln!("💡 {}", e.recovery_suggestion());
        std::process::exit(e.exit_code());
    }

    // 初始化日誌
    let log_file = PathBuf::from(
        config
            .log_file
            .clone()
            .unwrap_or_else(|| settings.logging.file.clone()),
    );
    logger::init_cli_logger(config.verbose, &log_file)
        .with_context(|| format!("cannot open log file {}", log_file.display()))?;

    tracing::info!("Starting monolith-scaffold");
    if config.verbose {
        tracing::debug!("CLI config: {:?}", config);
        tracing::debug!("Settings: {:?}", settings);
    }

    let layout = ProjectLayout::new(&config.base_dir, ProjectName::new(&config.project_name));
    let scaffolder = Scaffolder::new(layout, settings, SystemRunner::new(), PathToolLocator::new());

    match scaffolder.run().await {
        Ok(report) => {
            print_summary(&report);
            Ok(())
        }
        Err(e) => {
            let step = e
                .step()
                .map(|step| step.to_string())
                .unwrap_or_else(|| "startup".to_string());
            tracing::error!(
                "❌ Scaffolding failed in step '{}': {} (Category: {:?}, exit code {})",
                step,
                e,
                e.category(),
                e.exit_code()
            );
            tracing::error!("💡 Recovery suggestion: {}", e.recovery_suggestion());

            eprintln!("❌ {}", e.user_friendly_message());
            eprintln!("💡 {}", e.recovery_suggestion());
            std::process::exit(e.exit_code());
        }
    }
}

fn print_summary(report: &ScaffoldReport) {
    tracing::info!("✅ Project scaffolded in {}", report.project_root.display());

    println!("✅ Project scaffolded in {}", report.project_root.display());
    println!(
        "  Created: {}, already present: {}, written: {}",
        report.created.len(),
        report.already_present.len(),
        report.overwritten.len()
    );
    if report.committed {
        println!("  Initial commit created");
    } else {
        println!("  No changes to commit");
    }
    println!("  Branch: {}", report.branch);
    println!("  Took {:.1}s", report.elapsed().num_milliseconds() as f64 / 1000.0);
}
