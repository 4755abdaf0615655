use std::collections::HashSet;

use crate::constants::{CITY_SOURCE_NOTE, DOCUMENT_LABEL, SOURCE_LABEL};
use crate::types::{Citation, Device, SourceRef};

/// Citations for a device: authored documents, then authored sources, then one
/// entry per city override carrying a source URL. The first entry for a URL wins.
pub fn collect_sources(device: &Device) -> Vec<Citation> {
    let mut seen = HashSet::new();
    let mut out = Vec::new();

    let mut push = |citation: Citation| {
        if seen.insert(citation.url.clone()) {
            out.push(citation);
        }
    };

    for doc in &device.documents {
        if let Some(citation) = from_ref(doc, DOCUMENT_LABEL, false) {
            push(citation);
        }
    }
    for src in &device.sources {
        if let Some(citation) = from_ref(src, SOURCE_LABEL, true) {
            push(citation);
        }
    }
    for city in &device.city_specifics {
        let Some(url) = non_empty(city.source_url.as_deref()) else {
            continue;
        };
        let label = match non_empty(city.program.as_deref()) {
            Some(program) => format!("{} {} 公告", city.city, program),
            None => format!("{} 公告", city.city),
        };
        push(Citation {
            label,
            url: url.to_string(),
            note: CITY_SOURCE_NOTE.to_string(),
        });
    }

    out
}

fn from_ref(entry: &SourceRef, default_label: &str, keep_note: bool) -> Option<Citation> {
    let url = non_empty(entry.url.as_deref())?;
    Some(Citation {
        label: non_empty(entry.label.as_deref())
            .unwrap_or(default_label)
            .to_string(),
        url: url.to_string(),
        note: if keep_note {
            entry.note.clone().unwrap_or_default()
        } else {
            String::new()
        },
    })
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}
