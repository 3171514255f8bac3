use anyhow::Context;
use log::info;
use natality_prep::PipelineConfig;

fn main() -> anyhow::Result<()> {
    // Setup logging
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = PipelineConfig::default();
    info!(
        "preparing analytic table from {} and {}",
        config.natality_path.display(),
        config.rankings_path.display()
    );

    let output = natality_prep::run(&config).context("pipeline run failed")?;
    info!(
        "done: {} rows persisted to {}",
        output.records.len(),
        config.output_path.display()
    );
    Ok(())
}
