//! Applies a CSV script of cart operations to the saved cart and prints the result.
//!
//! ```bash
//! marketplace-cart data/example_ops.csv --storage cart_storage.json --persist-mode current
//! ```

use clap::Parser;
use std::path::PathBuf;
use std::process;
use std::sync::Arc;

use marketplace_cart::config::DEFAULT_NAMESPACE;
use marketplace_cart::stores::JsonFileStorage;
use marketplace_cart::{logging, run, CartConfig, CartProvider, Error, PersistMode};

#[derive(Parser)]
#[command(name = "marketplace-cart")]
#[command(version, about = "Apply cart operations to a locally persisted cart")]
struct Cli {
    /// CSV script with rows `type,id,title,image_url,price`
    script: PathBuf,

    /// JSON file standing in for the device key-value storage
    #[arg(long, env = "CART_STORAGE_PATH", default_value = "cart_storage.json")]
    storage: PathBuf,

    /// Namespace of the storage key (`@<namespace>:cart`)
    #[arg(long, env = "CART_NAMESPACE", default_value = DEFAULT_NAMESPACE)]
    namespace: String,

    /// Whether writes carry the cart from before or after each operation
    #[arg(long, env = "CART_PERSIST_MODE", value_enum, default_value_t = PersistMode::Lagged)]
    persist_mode: PersistMode,

    /// Emit logs as JSON lines
    #[arg(long, env = "CART_LOG_JSON")]
    json_logs: bool,
}

#[tokio::main]
async fn main() {
    let _ = dotenvy::dotenv();
    let cli = Cli::parse();
    logging::init_logging(cli.json_logs);

    if let Err(err) = run_app(cli).await {
        eprintln!("Error: {}", err);
        process::exit(1);
    }
}

async fn run_app(cli: Cli) -> Result<(), Error> {
    let storage = JsonFileStorage::open(&cli.storage).await?;
    let config = CartConfig::new(cli.namespace, cli.persist_mode);

    let mut provider = CartProvider::new();
    let cart = provider.mount(Arc::new(storage), &config);
    // Start from the saved cart rather than racing the load.
    cart.settle().await;

    run(&cli.script, provider.use_cart()?, std::io::stdout()).await?;
    provider.unmount();
    Ok(())
}
