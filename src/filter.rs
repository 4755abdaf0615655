use serde::Deserialize;

use crate::constants::PROGRAM_ALL;
use crate::types::Device;

/// Program membership filter.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum ProgramFilter {
    #[default]
    All,
    Only(String),
}

impl ProgramFilter {
    /// Empty input or the "all" selector means no filtering.
    pub fn parse(value: Option<&str>) -> Self {
        match value.map(str::trim) {
            None | Some("") => ProgramFilter::All,
            Some(v) if v == PROGRAM_ALL || v.eq_ignore_ascii_case("all") => ProgramFilter::All,
            Some(v) => ProgramFilter::Only(v.to_string()),
        }
    }

    pub fn matches(&self, device: &Device) -> bool {
        match self {
            ProgramFilter::All => true,
            ProgramFilter::Only(program) => device.in_program(program),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            ProgramFilter::All => PROGRAM_ALL,
            ProgramFilter::Only(program) => program,
        }
    }
}

/// Search form input as submitted by the list page.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct DeviceQuery {
    pub q: Option<String>,
    pub program: Option<String>,
}

impl DeviceQuery {
    pub fn program_filter(&self) -> ProgramFilter {
        ProgramFilter::parse(self.program.as_deref())
    }

    pub fn text(&self) -> &str {
        self.q.as_deref().map(str::trim).unwrap_or_default()
    }
}

/// Case-insensitive substring match on the name or any alias.
pub fn matches_text(device: &Device, query: &str) -> bool {
    let needle = query.trim().to_lowercase();
    if needle.is_empty() {
        return true;
    }
    device.name.to_lowercase().contains(&needle)
        || device
            .aliases
            .iter()
            .any(|alias| alias.to_lowercase().contains(&needle))
}

/// Devices passing both the program filter and the text filter, in catalog order.
pub fn filter_devices<'a, I>(devices: I, program: &ProgramFilter, query: &str) -> Vec<&'a Device>
where
    I: IntoIterator<Item = &'a Device>,
{
    devices
        .into_iter()
        .filter(|d| program.matches(d) && matches_text(d, query))
        .collect()
}
