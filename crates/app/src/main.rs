mod cli;
mod console;
mod html;

fn main() {
    if let Err(err) = run() {
        eprintln!("{err:?}");
        std::process::exit(1);
    }
}

fn run() -> anyhow::Result<()> {
    let _ = tracing_subscriber::fmt::try_init();
    let args: Vec<String> = std::env::args().collect();
    if cli::handle_commands(&args)? {
        return Ok(());
    }

    // No subcommand: serve the console with environment-derived settings.
    console::run(console::ConsoleConfig::from_env()?)
}
