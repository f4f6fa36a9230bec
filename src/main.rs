// Entrypoint for the CLI application.
// Keeps `main` small: load configuration, set up logging, run one operation.

use inventory_cli::{config::Config, logging, ui::main_menu};

fn main() -> anyhow::Result<()> {
    logging::init();

    // Backend, data directory and API URL come from `INVENTORY_*` variables.
    // See `config::Config::from_env`.
    let config = Config::from_env()?;

    main_menu(&config)?;
    Ok(())
}
