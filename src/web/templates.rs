use askama::Template;

use super::models::{DeviceCard, DeviceDetail};
use super::session::SessionView;
use crate::catalog::SelectOption;

#[derive(Template)]
#[template(path = "index.html")]
pub struct IndexTemplate {
    pub session: SessionView,
    pub query: String,
    pub program: String,
    pub programs: Vec<&'static str>,
    pub options: Vec<SelectOption>,
    pub devices: Vec<DeviceCard>,
}

#[derive(Template)]
#[template(path = "devices_list.html")]
pub struct DevicesListTemplate {
    pub session: SessionView,
    pub devices: Vec<DeviceCard>,
}

#[derive(Template)]
#[template(path = "device.html")]
pub struct DeviceTemplate {
    pub session: SessionView,
    pub device: DeviceDetail,
}

#[derive(Template)]
#[template(path = "not_found.html")]
pub struct NotFoundTemplate {
    pub session: SessionView,
    pub message: &'static str,
}
