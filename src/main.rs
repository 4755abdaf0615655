use anyhow::{anyhow, Context};
use clap::{Parser, Subcommand};
use std::fs;
use std::path::PathBuf;
use tracing::info;

use subsidy_lookup::cache::CatalogCache;
use subsidy_lookup::catalog::Catalog;
use subsidy_lookup::citations::collect_sources;
use subsidy_lookup::config::Config;
use subsidy_lookup::constants::{ITEM_NOT_FOUND, NO_SOURCE_WEB};
use subsidy_lookup::export::{DeviceSheet, DocumentRenderer, PrintSheetRenderer};
use subsidy_lookup::filter::{filter_devices, ProgramFilter};
use subsidy_lookup::format::{format_currency, percent, years};
use subsidy_lookup::logging;
use subsidy_lookup::photos::{pick_best_image, HeaderProbe};
use subsidy_lookup::share::{canonical_link, LinkEncoder, QrSvgEncoder};
use subsidy_lookup::types::Device;

#[derive(Parser)]
#[command(name = "subsidy_lookup")]
#[command(about = "Assistive-device subsidy lookup")]
#[command(version = "0.1.0")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the web application
    Serve {
        /// Port to listen on (overrides config.toml and PORT)
        #[arg(long)]
        port: Option<u16>,
    },
    /// Search the catalog by name or alias
    Search {
        /// Text matched against names and aliases
        #[arg(long)]
        query: Option<String>,
        /// Program tag (LTC, PWD) or 全部
        #[arg(long)]
        program: Option<String>,
    },
    /// Show one device in full
    Show {
        id: String,
    },
    /// List photos discovered in the images directory
    Photos,
    /// Write the printable sheet for a device
    Export {
        id: String,
        /// Output file (default: <id>.html)
        #[arg(long)]
        out: Option<PathBuf>,
    },
    /// Write the QR code for a device's canonical link
    Share {
        id: String,
        /// Output file (default: <id>-qr.svg)
        #[arg(long)]
        out: Option<PathBuf>,
    },
}

fn find_device<'a>(catalog: &'a Catalog, id: &str) -> anyhow::Result<&'a Device> {
    catalog
        .get(id)
        .ok_or_else(|| anyhow!("{}: {}", ITEM_NOT_FOUND, id))
}

fn print_device(device: &Device) {
    println!("\n🧰 {} ({})", device.name, device.id);
    if !device.aliases.is_empty() {
        println!("   別名: {}", device.aliases.join("、"));
    }
    println!("   體系: {}", device.programs.join(" / "));
    println!(
        "   金額上限: {}  補助比例: {}  使用年限: {}",
        format_currency(device.funding.amount_cap),
        percent(device.funding.ratio_cap),
        years(device.lifespan_years)
    );
    for item in &device.eligibility {
        println!("   • {}", item);
    }
    for city in &device.city_specifics {
        let funding = city.funding.clone().unwrap_or_default();
        println!(
            "   - {} / {}: 上限 {}，比例 {}",
            city.city,
            city.program.as_deref().unwrap_or("—"),
            format_currency(funding.amount_cap),
            percent(funding.ratio_cap)
        );
    }
    let sources = collect_sources(device);
    if sources.is_empty() {
        println!("   {}", NO_SOURCE_WEB);
    }
    for (i, src) in sources.iter().enumerate() {
        println!("   {}. {}  {}", i + 1, src.label, src.url);
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();
    logging::init_logging();

    let cli = Cli::parse();
    let mut config = Config::load()?;

    match cli.command {
        Commands::Serve { port } => {
            if let Some(port) = port {
                config.server.port = port;
            }
            subsidy_lookup::web::serve(&config).await?;
        }
        Commands::Search { query, program } => {
            let cache = CatalogCache::from_config(&config);
            let snapshot = cache.get().context("loading catalog")?;
            let program = ProgramFilter::parse(program.as_deref());
            let query = query.unwrap_or_default();

            let found = filter_devices(snapshot.catalog.devices(), &program, &query);
            println!("找到 {} 項", found.len());
            for device in found {
                let photo = pick_best_image(&device.photos, config.images.list_width, &HeaderProbe);
                println!(
                    "  {} [{}] {} / {}  {}",
                    device.name,
                    device.id,
                    format_currency(device.funding.amount_cap),
                    percent(device.funding.ratio_cap),
                    photo.unwrap_or("（無圖片）")
                );
            }
        }
        Commands::Show { id } => {
            let cache = CatalogCache::from_config(&config);
            let snapshot = cache.get().context("loading catalog")?;
            print_device(find_device(&snapshot.catalog, &id)?);
        }
        Commands::Photos => {
            let cache = CatalogCache::from_config(&config);
            let snapshot = cache.get().context("loading catalog")?;
            println!("📷 Photos under {}", cache.images_dir().display());
            for (device_id, paths) in snapshot.photos.iter() {
                let known = if snapshot.catalog.get(device_id).is_some() { "" } else { " (not in catalog)" };
                println!("  {}{}", device_id, known);
                for path in paths {
                    println!("    {}", path);
                }
            }
        }
        Commands::Export { id, out } => {
            let cache = CatalogCache::from_config(&config);
            let snapshot = cache.get().context("loading catalog")?;
            let device = find_device(&snapshot.catalog, &id)?;

            let sheet = DeviceSheet::build(device, config.images.detail_width, &HeaderProbe);
            let renderer = PrintSheetRenderer;
            let bytes = renderer.render(&sheet)?;
            let out = out.unwrap_or_else(|| PathBuf::from(renderer.file_name(&sheet)));
            fs::write(&out, bytes).with_context(|| format!("writing {}", out.display()))?;
            info!("Exported sheet for {} to {}", id, out.display());
            println!("✅ Wrote {}", out.display());
        }
        Commands::Share { id, out } => {
            let cache = CatalogCache::from_config(&config);
            let snapshot = cache.get().context("loading catalog")?;
            let device = find_device(&snapshot.catalog, &id)?;

            let link = canonical_link(device);
            let bytes = QrSvgEncoder::default().encode(&link)?;
            let out = out.unwrap_or_else(|| PathBuf::from(format!("{}-qr.svg", device.id)));
            fs::write(&out, bytes).with_context(|| format!("writing {}", out.display()))?;
            println!("🔗 {}", link);
            println!("✅ Wrote {}", out.display());
        }
    }
    Ok(())
}
