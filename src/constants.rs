/// Program tags and display strings shared across the catalog, views and exports.

// Program tags as they appear in the catalog file
pub const PROGRAM_LTC: &str = "LTC";
pub const PROGRAM_PWD: &str = "PWD";

/// Selector value meaning "no program filter"
pub const PROGRAM_ALL: &str = "全部";

/// Programs offered in the filter control, in display order
pub fn get_filter_programs() -> Vec<&'static str> {
    vec![PROGRAM_ALL, PROGRAM_LTC, PROGRAM_PWD]
}

// Image discovery
pub const IMAGE_EXTENSIONS: [&str; 5] = ["jpg", "jpeg", "png", "webp", "gif"];
pub const PHOTO_ID_SEPARATOR: char = '-';

// Best-fit widths
pub const LIST_IMAGE_WIDTH: u32 = 800;
pub const DETAIL_IMAGE_WIDTH: u32 = 1200;

/// Prefixes that mark a photo entry as remote rather than a local path
pub const URL_PREFIXES: [&str; 3] = ["http://", "https://", "data:"];

// Citation defaults
pub const DOCUMENT_LABEL: &str = "文件";
pub const SOURCE_LABEL: &str = "來源";
pub const CITY_SOURCE_NOTE: &str = "地方政府公告";

// Placeholders
pub const MISSING_VALUE: &str = "—";
pub const NO_SOURCE_WEB: &str = "（此筆尚未設定來源，請後台補充）";
pub const NO_SOURCE_DOCUMENT: &str = "（尚未設定來源）";
pub const NO_IMAGE: &str = "（無圖片）";
pub const NO_CITY_DIFFERENCES: &str = "尚無差異資料。";
pub const ITEM_NOT_FOUND: &str = "找不到該項目";
pub const LIFESPAN_PER_NOTICE: &str = "依公告";

/// Max alias chips on a list card
pub const MAX_ALIAS_CHIPS: usize = 6;
