use clap::Parser;
use prolink_schema::utils::error::SchemaError;
use prolink_schema::utils::{logger, validation::Validate};
use prolink_schema::{CliConfig, FixtureEngine, LocalStorage, TomlConfig};
use std::path::Path;

const EXIT_VIOLATIONS: i32 = 1;
const EXIT_UNREADABLE: i32 = 2;
const EXIT_CONFIG: i32 = 3;

fn fail_config(e: &SchemaError) -> ! {
    tracing::error!("❌ Configuration validation failed: {}", e);
    tracing::error!("💡 Suggestion: {}", e.recovery_suggestion());
    eprintln!("❌ {}", e.user_friendly_message());
    std::process::exit(EXIT_CONFIG);
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = CliConfig::parse();

    // TOML first: it picks the log format
    let toml = match config.config.as_deref().map(TomlConfig::from_file).transpose() {
        Ok(toml) => toml,
        Err(e) => {
            logger::init_cli_logger(config.verbose);
            fail_config(&e);
        }
    };

    match &toml {
        Some(t) if t.json_logs() => {
            let level = if config.verbose { "debug" } else { t.log_level() };
            logger::init_json_logger(level);
        }
        _ => logger::init_cli_logger(config.verbose),
    }

    tracing::info!("Starting prolink-schema");
    if config.verbose {
        tracing::debug!("CLI config: {:?}", config);
    }

    if let Err(e) = config.validate() {
        fail_config(&e);
    }
    if let Some(Err(e)) = toml.as_ref().map(|t| t.validate()) {
        fail_config(&e);
    }
    let rules = match config.resolve_rules(toml.as_ref()) {
        Ok(rules) => rules,
        Err(e) => fail_config(&e),
    };
    tracing::debug!("Contract rules: {:?}", rules);

    let storage = LocalStorage::new(config.base_path.clone());
    let engine = FixtureEngine::new(storage, rules);
    let summary = engine.run(config.kind, config.paginated, &config.files).await?;

    for file in &summary.files {
        match &file.outcome {
            prolink_schema::FileOutcome::Clean => println!("✅ {}", file.path),
            prolink_schema::FileOutcome::Violations(violations) => {
                println!("❌ {} ({} violation(s))", file.path, violations.len());
                for violation in violations {
                    println!("   - {}", violation);
                }
            }
            prolink_schema::FileOutcome::Failed(reason) => println!("⚠️  {}: {}", file.path, reason),
        }
    }
    println!(
        "📊 {} clean, {} violation(s), {} failed",
        summary.clean(),
        summary.violations(),
        summary.failed()
    );

    if let Some(path) = &config.summary {
        summary.write_json_lines(Path::new(path))?;
        tracing::info!("📁 Summary saved to: {}", path);
    }

    // unreadable input outranks violations
    if summary.failed() > 0 {
        std::process::exit(EXIT_UNREADABLE);
    }
    if summary.violations() > 0 {
        std::process::exit(EXIT_VIOLATIONS);
    }

    Ok(())
}
