use agency_demo::{demo, init_tracing, Config, Reporter};

fn main() -> anyhow::Result<()> {
    let config = Config::load()?;
    init_tracing(&config.logging.filter);
    tracing::info!("Starting travel agency demo ({:?} report)", config.report.format);

    let stdout = std::io::stdout();
    let mut reporter = Reporter::new(stdout.lock(), config.report.clone());
    demo::run(&mut reporter)?;

    Ok(())
}
