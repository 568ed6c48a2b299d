mod app;

use artworks_core::{ArticClient, CatalogConfig};
use std::sync::Arc;

fn init_logging() {
    tracing_subscriber::fmt()
        .with_env_filter(
            // Example: RUST_LOG=artworks_core::session=debug,artworks_gui=debug
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "artworks_core=info,artworks_gui=info".into()),
        )
        .init();
}

fn main() -> iced::Result {
    init_logging();

    let client = match ArticClient::new(CatalogConfig::default()) {
        Ok(client) => Arc::new(client),
        Err(e) => {
            eprintln!("Failed to create catalog client: {}", e);
            std::process::exit(1);
        }
    };

    iced::application("Artworks", app::update, app::view)
        .window_size(iced::Size::new(1280.0, 820.0))
        .run_with(move || app::initialize(client))
}
