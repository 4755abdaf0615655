use serde::Deserialize;

use super::session::ViewParams;
use crate::citations::collect_sources;
use crate::constants::{LIFESPAN_PER_NOTICE, MAX_ALIAS_CHIPS, MISSING_VALUE};
use crate::filter::DeviceQuery;
use crate::format::{format_currency, percent, years};
use crate::photos::{pick_best_image, ImageProbe, PhotoLinks};
use crate::share::canonical_link;
use crate::types::{Citation, Device};
use crate::urls::device_path;

// Query strings for each page. Kept flat: urlencoded numbers do not survive
// `#[serde(flatten)]`.

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ListParams {
    pub q: Option<String>,
    pub program: Option<String>,
    pub theme: Option<String>,
    pub font: Option<String>,
}

impl ListParams {
    pub fn query(&self) -> DeviceQuery {
        DeviceQuery {
            q: self.q.clone(),
            program: self.program.clone(),
        }
    }

    pub fn view(&self) -> ViewParams {
        ViewParams {
            theme: self.theme.clone(),
            font: self.font.clone(),
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct SelectParams {
    pub device: Option<String>,
    pub theme: Option<String>,
    pub font: Option<String>,
}

impl SelectParams {
    pub fn view(&self) -> ViewParams {
        ViewParams {
            theme: self.theme.clone(),
            font: self.font.clone(),
        }
    }
}

/// One row of the device list.
#[derive(Debug, Clone)]
pub struct DeviceCard {
    pub id: String,
    /// Encoded `/device/{id}` link.
    pub path: String,
    pub name: String,
    pub aliases: Vec<String>,
    pub category: String,
    pub programs: String,
    pub amount_cap: String,
    pub ratio: String,
    pub image: Option<String>,
}

impl DeviceCard {
    pub fn build(device: &Device, width: u32, probe: &dyn ImageProbe, links: &PhotoLinks) -> Self {
        Self {
            id: device.id.clone(),
            path: device_path(&device.id),
            name: device.name.clone(),
            aliases: device.aliases.iter().take(MAX_ALIAS_CHIPS).cloned().collect(),
            category: device
                .category
                .clone()
                .unwrap_or_else(|| MISSING_VALUE.to_string()),
            programs: device.programs.join(" / "),
            amount_cap: format_currency(device.funding.amount_cap),
            ratio: percent(device.funding.ratio_cap),
            image: pick_best_image(&device.photos, width, probe).map(|p| links.href(p)),
        }
    }
}

#[derive(Debug, Clone)]
pub struct CityRow {
    pub city: String,
    pub program: String,
    pub amount_cap: String,
    pub ratio: String,
    pub extra_eligibility: String,
    pub effective_to: String,
    pub source: Option<String>,
}

/// Everything the detail page shows for one device.
#[derive(Debug, Clone)]
pub struct DeviceDetail {
    pub id: String,
    pub path: String,
    pub name: String,
    pub image: Option<String>,
    pub amount_cap: String,
    pub ratio: String,
    pub lifespan: String,
    pub funding_notes: Option<String>,
    pub eligibility: Vec<String>,
    pub lifespan_rule: String,
    pub renewal_rule: Option<String>,
    pub usage_notes: Vec<String>,
    pub city_rows: Vec<CityRow>,
    pub sources: Vec<Citation>,
    pub share_link: String,
    pub last_updated: Option<String>,
}

impl DeviceDetail {
    pub fn build(device: &Device, width: u32, probe: &dyn ImageProbe, links: &PhotoLinks) -> Self {
        let city_rows = device
            .city_specifics
            .iter()
            .map(|c| {
                let funding = c.funding.clone().unwrap_or_default();
                CityRow {
                    city: c.city.clone(),
                    program: c.program.clone().unwrap_or_else(|| MISSING_VALUE.to_string()),
                    amount_cap: format_currency(funding.amount_cap),
                    ratio: percent(funding.ratio_cap),
                    extra_eligibility: if c.extra_eligibility.is_empty() {
                        MISSING_VALUE.to_string()
                    } else {
                        c.extra_eligibility.join("、")
                    },
                    effective_to: c
                        .effective_to
                        .map(|d| d.format("%Y-%m-%d").to_string())
                        .unwrap_or_else(|| MISSING_VALUE.to_string()),
                    source: c.source_url.clone().filter(|u| !u.trim().is_empty()),
                }
            })
            .collect();

        Self {
            id: device.id.clone(),
            path: device_path(&device.id),
            name: device.name.clone(),
            image: pick_best_image(&device.photos, width, probe).map(|p| links.href(p)),
            amount_cap: format_currency(device.funding.amount_cap),
            ratio: percent(device.funding.ratio_cap),
            lifespan: years(device.lifespan_years),
            funding_notes: device.funding.notes.clone().filter(|n| !n.trim().is_empty()),
            eligibility: device.eligibility.clone(),
            lifespan_rule: match device.lifespan_years {
                Some(_) => years(device.lifespan_years),
                None => LIFESPAN_PER_NOTICE.to_string(),
            },
            renewal_rule: device.renewal_interval_years.map(|n| years(Some(n))),
            usage_notes: device.usage_notes.clone(),
            city_rows,
            sources: collect_sources(device),
            share_link: canonical_link(device),
            last_updated: device.last_updated.map(|d| d.format("%Y-%m-%d").to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::photos::ProbeOutcome;
    use serde_json::json;
    use std::path::Path;

    struct NoProbe;

    impl ImageProbe for NoProbe {
        fn probe(&self, _path: &Path) -> ProbeOutcome {
            ProbeOutcome::Unreadable("test".to_string())
        }
    }

    fn device() -> Device {
        serde_json::from_value(json!({
            "id": "wheelchair",
            "name": "輪椅",
            "aliases": ["a", "b", "c", "d", "e", "f", "g"],
            "programs": ["LTC", "PWD"],
            "funding": {"amountCap": 9000, "ratioCap": 0.7},
            "renewalIntervalYears": 3,
            "photos": ["data/images/wheelchair/1.png"],
            "citySpecifics": [
                {"city": "臺北市", "program": "PWD", "extraEligibility": ["設籍", "低收"], "effectiveTo": "2026-12-31"},
                {"city": "新北市"}
            ]
        }))
        .unwrap()
    }

    #[test]
    fn test_card() {
        let links = PhotoLinks::served("data/images", "/photos");
        let card = DeviceCard::build(&device(), 800, &NoProbe, &links);
        assert_eq!(card.aliases.len(), 6);
        assert_eq!(card.category, "—");
        assert_eq!(card.programs, "LTC / PWD");
        assert_eq!(card.amount_cap, "NT$9,000");
        assert_eq!(card.ratio, "70%");
        assert_eq!(card.image.as_deref(), Some("/photos/wheelchair/1.png"));
        assert_eq!(card.path, "/device/wheelchair");
    }

    #[test]
    fn test_links_encode_ids_and_file_names() {
        let mut d = device();
        d.id = "bed #2".to_string();
        d.photos = vec!["data/images/bed #2/front view#1.png".to_string()];
        let links = PhotoLinks::served("data/images", "/photos");

        let card = DeviceCard::build(&d, 800, &NoProbe, &links);
        assert_eq!(card.path, "/device/bed%20%232");
        assert_eq!(card.image.as_deref(), Some("/photos/bed%20%232/front%20view%231.png"));

        let detail = DeviceDetail::build(&d, 1200, &NoProbe, &links);
        assert_eq!(detail.path, "/device/bed%20%232");
    }

    #[test]
    fn test_detail_rules_and_city_rows() {
        let links = PhotoLinks::served("data/images", "/photos");
        let detail = DeviceDetail::build(&device(), 1200, &NoProbe, &links);
        assert_eq!(detail.lifespan, "—");
        assert_eq!(detail.lifespan_rule, "依公告");
        assert_eq!(detail.renewal_rule.as_deref(), Some("3 年"));
        assert_eq!(detail.city_rows[0].extra_eligibility, "設籍、低收");
        assert_eq!(detail.city_rows[0].effective_to, "2026-12-31");
        assert_eq!(detail.city_rows[1].program, "—");
        assert_eq!(detail.city_rows[1].extra_eligibility, "—");
        assert!(detail.sources.is_empty());
        assert_eq!(detail.share_link, "Assistive: 輪椅");
    }
}
