//! Render every built-in icon in both themes to PNG files.
//!
//! ```text
//! cargo run --example export_icons -- <output-dir> [size] [config.toml]
//! ```

use std::path::PathBuf;

use horizon_fluent::prelude::*;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let mut args = std::env::args().skip(1);
    let out_dir = PathBuf::from(args.next().unwrap_or_else(|| "fluent-icons".to_string()));
    let size: u32 = args.next().map(|s| s.parse()).transpose()?.unwrap_or(32);
    let config = match args.next() {
        Some(path) => FluentConfig::from_file(path)?,
        None => FluentConfig::default(),
    };

    let assets = ResourceManager::with_fluent_icons();
    FluentIcon::verify_bundle(&assets)?;

    let theme = ThemeSetting::from_config(&config);
    let renderer = IconRenderer::from_config(&assets, &theme, &config);

    std::fs::create_dir_all(&out_dir)?;
    for &icon in FluentIcon::ALL {
        for mode in [ThemeMode::Light, ThemeMode::Dark] {
            let bitmap = renderer.to_bitmap(IconRef::Fluent(&icon), size, size, mode)?;
            let path = out_dir.join(format!("{}_{}_{size}.png", icon.name(), mode));
            bitmap.save_png(&path)?;
        }
    }

    tracing::info!(
        count = FluentIcon::ALL.len() * 2,
        dir = %out_dir.display(),
        "exported icons"
    );
    Ok(())
}
