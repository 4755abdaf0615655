use anyhow::Result;
use std::fs;
use std::path::Path;
use subsidy_lookup::cache::CatalogCache;
use subsidy_lookup::export::{DeviceSheet, DocumentRenderer, PrintSheetRenderer};
use subsidy_lookup::filter::{filter_devices, ProgramFilter};
use subsidy_lookup::photos::{pick_best_image, HeaderProbe, PhotoIndex};
use tempfile::tempdir;

fn write_png(path: &Path, width: u32) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    image::RgbImage::new(width, 4).save(path)?;
    Ok(())
}

const CATALOG: &str = r#"[
  {
    "id": "wheelchair",
    "name": "輪椅",
    "aliases": ["Manual Wheelchair", "手動輪椅"],
    "category": "行動輔具",
    "programs": ["LTC", "PWD"],
    "funding": {"amountCap": 9000, "ratioCap": 0.7},
    "lifespanYears": 5,
    "eligibility": ["經評估需使用輪椅者"],
    "citySpecifics": [
      {"city": "臺北市", "program": "PWD", "funding": {"amountCap": 10000}, "sourceUrl": "https://tp.example/notice"}
    ],
    "photos": ["https://cdn.example/wheelchair.jpg"],
    "lastUpdated": "2025-06-01"
  },
  {
    "id": "walker",
    "name": "助行器",
    "programs": ["LTC"]
  }
]"#;

#[test]
fn test_best_image_from_discovered_photos() -> Result<()> {
    let temp_dir = tempdir()?;
    let images = temp_dir.path().join("images");
    write_png(&images.join("wheelchair").join("a.png"), 400)?;
    write_png(&images.join("wheelchair").join("b.png"), 900)?;
    write_png(&images.join("wheelchair-side.png"), 1300)?;
    fs::write(images.join("wheelchair").join("broken.png"), b"not a png")?;

    let index = PhotoIndex::build(&images);
    assert_eq!(index.get("wheelchair").len(), 4);

    let best = pick_best_image(index.get("wheelchair"), 1000, &HeaderProbe);
    let expected = images.join("wheelchair").join("b.png");
    assert_eq!(best, expected.to_str());

    let exact = pick_best_image(index.get("wheelchair"), 1300, &HeaderProbe);
    let expected = images.join("wheelchair-side.png");
    assert_eq!(exact, expected.to_str());
    Ok(())
}

#[test]
fn test_catalog_load_merges_photos_and_filters() -> Result<()> {
    let temp_dir = tempdir()?;
    let catalog_path = temp_dir.path().join("devices.json");
    let images = temp_dir.path().join("images");
    fs::write(&catalog_path, CATALOG)?;
    write_png(&images.join("wheelchair").join("front.png"), 1200)?;

    let cache = CatalogCache::new(&catalog_path, &images);
    let snapshot = cache.get()?;
    let wheelchair = snapshot.catalog.get("wheelchair").expect("wheelchair present");

    // Discovered photos come before authored ones
    assert_eq!(wheelchair.photos.len(), 2);
    assert!(wheelchair.photos[0].ends_with("front.png"));
    assert_eq!(wheelchair.photos[1], "https://cdn.example/wheelchair.jpg");

    let found = filter_devices(snapshot.catalog.devices(), &ProgramFilter::All, "wheelchair");
    assert_eq!(found.len(), 1);
    assert_eq!(found[0].id, "wheelchair");

    let pwd = ProgramFilter::Only("PWD".to_string());
    let found = filter_devices(snapshot.catalog.devices(), &pwd, "");
    assert_eq!(found.len(), 1);
    Ok(())
}

#[test]
fn test_export_sheet_for_device_without_photos() -> Result<()> {
    let temp_dir = tempdir()?;
    let catalog_path = temp_dir.path().join("devices.json");
    fs::write(&catalog_path, CATALOG)?;

    let cache = CatalogCache::new(&catalog_path, temp_dir.path().join("missing-images"));
    let snapshot = cache.get()?;
    let walker = snapshot.catalog.get("walker").expect("walker present");

    let sheet = DeviceSheet::build(walker, 1200, &HeaderProbe);
    assert!(sheet.image.is_none());

    let html = String::from_utf8(PrintSheetRenderer.render(&sheet)?)?;
    assert!(html.contains("助行器"));
    assert!(html.contains("（尚未設定來源）"));
    assert!(!html.contains("<img"));
    Ok(())
}

#[test]
fn test_malformed_catalog_fails() -> Result<()> {
    let temp_dir = tempdir()?;
    let catalog_path = temp_dir.path().join("devices.json");
    fs::write(&catalog_path, "{ not json")?;

    let cache = CatalogCache::new(&catalog_path, temp_dir.path().join("images"));
    assert!(cache.get().is_err());
    Ok(())
}
