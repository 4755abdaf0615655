use anyhow::Result;
use axum::body::{to_bytes, Body};
use axum::http::{header, Request, StatusCode};
use axum::Router;
use std::fs;
use std::path::Path;
use std::sync::Arc;
use subsidy_lookup::cache::CatalogCache;
use subsidy_lookup::config::ImageConfig;
use subsidy_lookup::web::{app_router, AppState};
use tempfile::{tempdir, TempDir};
use tower::ServiceExt;

const CATALOG: &str = r#"[
  {
    "id": "wheelchair",
    "name": "輪椅",
    "aliases": ["Manual Wheelchair"],
    "programs": ["LTC", "PWD"],
    "funding": {"amountCap": 9000, "ratioCap": 0.7},
    "eligibility": ["經評估需使用輪椅者"],
    "citySpecifics": [
      {"city": "臺北市", "program": "PWD", "sourceUrl": "https://tp.example/notice"}
    ]
  },
  {
    "id": "walker",
    "name": "助行器",
    "programs": ["LTC"]
  },
  {
    "id": "bed #2",
    "name": "電動床",
    "programs": ["PWD"]
  }
]"#;

fn setup() -> Result<(TempDir, Router)> {
    let temp_dir = tempdir()?;
    let catalog_path = temp_dir.path().join("devices.json");
    fs::write(&catalog_path, CATALOG)?;
    let images = temp_dir.path().join("images");
    fs::create_dir_all(images.join("walker"))?;
    image::RgbImage::new(800, 4).save(images.join("walker").join("front.png"))?;
    fs::create_dir_all(images.join("bed #2"))?;
    image::RgbImage::new(600, 4).save(images.join("bed #2").join("front view#1.png"))?;

    let cache = Arc::new(CatalogCache::new(&catalog_path, &images));
    let state = AppState::new(cache, ImageConfig::default());
    let app = app_router(state, Path::new("static"));
    Ok((temp_dir, app))
}

async fn get(app: &Router, uri: &str, htmx: bool) -> Result<(StatusCode, String)> {
    let mut request = Request::builder().uri(uri);
    if htmx {
        request = request.header("HX-Request", "true");
    }
    let response = app.clone().oneshot(request.body(Body::empty())?).await?;
    let status = response.status();
    let body = to_bytes(response.into_body(), usize::MAX).await?;
    Ok((status, String::from_utf8_lossy(&body).into_owned()))
}

#[tokio::test]
async fn test_index_lists_all_devices() -> Result<()> {
    let (_dir, app) = setup()?;
    let (status, body) = get(&app, "/", false).await?;
    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("找到 3 項"));
    assert!(body.contains("Manual Wheelchair（輪椅）"));
    assert!(body.contains("/photos/walker/front.png"));
    Ok(())
}

#[tokio::test]
async fn test_htmx_search_returns_partial() -> Result<()> {
    let (_dir, app) = setup()?;
    let (status, body) = get(&app, "/devices?q=wheelchair&program=PWD", true).await?;
    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("找到 1 項"));
    assert!(!body.contains("<html"));

    let (_, full) = get(&app, "/devices?q=wheelchair", false).await?;
    assert!(full.contains("<html"));
    Ok(())
}

#[tokio::test]
async fn test_detail_and_missing_device() -> Result<()> {
    let (_dir, app) = setup()?;
    let (status, body) = get(&app, "/device/wheelchair?theme=dark&font=120", false).await?;
    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("NT$9,000"));
    assert!(body.contains("臺北市 PWD 公告"));
    assert!(body.contains("font-size: 120%"));

    let (status, body) = get(&app, "/device/walker", false).await?;
    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("（此筆尚未設定來源，請後台補充）"));
    assert!(body.contains("尚無差異資料。"));

    let (status, body) = get(&app, "/device/unknown", false).await?;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(body.contains("找不到該項目"));
    Ok(())
}

#[tokio::test]
async fn test_sheet_and_qr_exports() -> Result<()> {
    let (_dir, app) = setup()?;
    let response = app
        .clone()
        .oneshot(Request::builder().uri("/device/wheelchair/sheet").body(Body::empty())?)
        .await?;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response.headers().get(header::CONTENT_DISPOSITION).map(|v| v.as_bytes()),
        Some(&b"attachment; filename=\"wheelchair.html\"; filename*=UTF-8''wheelchair.html"[..])
    );

    let response = app
        .clone()
        .oneshot(Request::builder().uri("/device/wheelchair/qr").body(Body::empty())?)
        .await?;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response.headers().get(header::CONTENT_TYPE).map(|v| v.as_bytes()),
        Some(&b"image/svg+xml"[..])
    );
    Ok(())
}

#[tokio::test]
async fn test_select_redirects_to_detail() -> Result<()> {
    let (_dir, app) = setup()?;
    let response = app
        .clone()
        .oneshot(Request::builder().uri("/select?device=walker").body(Body::empty())?)
        .await?;
    assert!(response.status().is_redirection());
    assert_eq!(
        response.headers().get(header::LOCATION).map(|v| v.as_bytes()),
        Some(&b"/device/walker?theme=light&font=100"[..])
    );
    Ok(())
}

#[tokio::test]
async fn test_cache_clear_reloads_catalog() -> Result<()> {
    let (dir, app) = setup()?;
    let (_, body) = get(&app, "/", false).await?;
    assert!(body.contains("找到 3 項"));

    fs::write(
        dir.path().join("devices.json"),
        r#"[{"id": "cane", "name": "手杖"}]"#,
    )?;
    let (_, body) = get(&app, "/", false).await?;
    assert!(body.contains("找到 3 項"));

    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/cache/clear")
                .body(Body::empty())?,
        )
        .await?;
    assert!(response.status().is_redirection());
    assert_eq!(
        response.headers().get(header::LOCATION).map(|v| v.as_bytes()),
        Some(&b"/?theme=light&font=100"[..])
    );

    let (_, body) = get(&app, "/", false).await?;
    assert!(body.contains("找到 1 項"));
    assert!(body.contains("手杖"));
    Ok(())
}

#[tokio::test]
async fn test_downloaded_sheet_embeds_its_image() -> Result<()> {
    let (_dir, app) = setup()?;
    let (status, body) = get(&app, "/device/walker/sheet", false).await?;
    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("data:image/png;base64,"));
    assert!(!body.contains("/photos/"));
    Ok(())
}

#[tokio::test]
async fn test_ids_and_file_names_are_encoded_in_links() -> Result<()> {
    let (_dir, app) = setup()?;
    let (_, body) = get(&app, "/", false).await?;
    assert!(body.contains("/device/bed%20%232?theme=light"));
    assert!(body.contains("/photos/bed%20%232/front%20view%231.png"));

    let (status, body) = get(&app, "/device/bed%20%232", false).await?;
    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("電動床"));
    assert!(body.contains("/device/bed%20%232/sheet"));

    let (status, _) = get(&app, "/photos/bed%20%232/front%20view%231.png", false).await?;
    assert_eq!(status, StatusCode::OK);
    Ok(())
}

#[tokio::test]
async fn test_bad_font_falls_back_to_default() -> Result<()> {
    let (_dir, app) = setup()?;
    for uri in ["/?font=", "/?font=abc", "/device/walker?font=abc&theme=dark"] {
        let (status, body) = get(&app, uri, false).await?;
        assert_eq!(status, StatusCode::OK, "{}", uri);
        assert!(body.contains("font-size: 100%"), "{}", uri);
    }
    Ok(())
}
