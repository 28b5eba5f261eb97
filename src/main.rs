use tracing_subscriber::EnvFilter;

use fruitboard::Options;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_target(false)
        .init();

    if let Err(e) = fruitboard::run(Options::from_env()) {
        tracing::error!("{e}");
        std::process::exit(1);
    }
}
