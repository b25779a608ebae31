use std::env;
use std::path::PathBuf;

use plant_explorer::app::{self, Config};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    let args: Vec<String> = env::args().collect();
    let mut config = Config::default();

    // Positional overrides: data file, asset directory, bind address.
    if let Some(path) = args.get(1) {
        config.data_path = PathBuf::from(path);
    } else if let Ok(path) = env::var("EXPLORER_DATA") {
        config.data_path = PathBuf::from(path);
    }

    if let Some(dir) = args.get(2) {
        config.asset_dir = PathBuf::from(dir);
    } else if let Ok(dir) = env::var("EXPLORER_ASSETS") {
        config.asset_dir = PathBuf::from(dir);
    }

    if let Some(addr) = args.get(3) {
        config.bind_addr = addr.clone();
    } else if let Ok(addr) = env::var("EXPLORER_BIND") {
        config.bind_addr = addr;
    }

    app::run(config).await
}
