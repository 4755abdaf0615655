use serde::Serialize;
use std::collections::HashMap;
use std::fs;
use std::path::Path;
use tracing::info;

use crate::error::{CatalogError, Result};
use crate::photos::{merge_photos, PhotoIndex};
use crate::types::Device;

/// The immutable device catalog, with discovered photos merged in.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    devices: Vec<Device>,
    by_id: HashMap<String, usize>,
}

/// An entry of the direct-selection list: a device name or one of its aliases.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SelectOption {
    pub label: String,
    pub device_id: String,
}

impl Catalog {
    /// Reads `devices.json` and merges photos discovered in `photos`.
    /// A missing or malformed file is an error.
    pub fn load(path: &Path, photos: &PhotoIndex) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        let devices: Vec<Device> = serde_json::from_str(&content)?;
        let catalog = Self::from_devices(devices, photos)?;
        info!(
            "Loaded {} devices from {}",
            catalog.devices.len(),
            path.display()
        );
        Ok(catalog)
    }

    pub fn from_devices(mut devices: Vec<Device>, photos: &PhotoIndex) -> Result<Self> {
        let mut by_id = HashMap::with_capacity(devices.len());
        for (position, device) in devices.iter_mut().enumerate() {
            if by_id.insert(device.id.clone(), position).is_some() {
                return Err(CatalogError::DuplicateId(device.id.clone()));
            }
            validate_ratio(&device.id, device.funding.ratio_cap)?;
            for city in &device.city_specifics {
                validate_ratio(&device.id, city.funding.as_ref().and_then(|f| f.ratio_cap))?;
            }
            device.photos = merge_photos(photos.get(&device.id), &device.photos);
        }
        Ok(Self { devices, by_id })
    }

    pub fn devices(&self) -> &[Device] {
        &self.devices
    }

    pub fn get(&self, id: &str) -> Option<&Device> {
        self.by_id.get(id).and_then(|&i| self.devices.get(i))
    }

    pub fn len(&self) -> usize {
        self.devices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.devices.is_empty()
    }

    /// Every device name followed by its aliases, labeled `alias（name）`.
    pub fn select_options(&self) -> Vec<SelectOption> {
        let mut options = Vec::new();
        for device in &self.devices {
            options.push(SelectOption {
                label: device.name.clone(),
                device_id: device.id.clone(),
            });
            for alias in &device.aliases {
                options.push(SelectOption {
                    label: format!("{}（{}）", alias, device.name),
                    device_id: device.id.clone(),
                });
            }
        }
        options
    }
}

fn validate_ratio(id: &str, ratio: Option<f64>) -> Result<()> {
    match ratio {
        Some(r) if !(0.0..=1.0).contains(&r) => Err(CatalogError::InvalidRatio {
            id: id.to_string(),
            ratio: r,
        }),
        _ => Ok(()),
    }
}
