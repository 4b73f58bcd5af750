use signal_deck::{Cli, run_deck};

fn main() -> anyhow::Result<()> {
    use clap::Parser;
    use tokio::runtime::Runtime;

    // A. Init Logging
    std::panic::set_hook(Box::new(|panic_info| {
        eprintln!("Application panicked: {:?}", panic_info);
    }));
    env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Info)
        .init();

    // B. Parse Args
    let args = Cli::parse();
    #[cfg(debug_assertions)]
    log::info!("Parsed arguments: {:?}", args);

    // C. Run the refresh loop
    let rt = Runtime::new()?;
    rt.block_on(run_deck(&args));

    Ok(())
}
