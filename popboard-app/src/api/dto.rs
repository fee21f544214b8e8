use popboard_core::Popup;
use serde::Serialize;

#[derive(Serialize)]
pub struct SaveOut {
    pub success: bool,
    pub popup: Popup,
}

#[derive(Serialize)]
pub struct DeleteOut {
    pub success: bool,
}

#[derive(Serialize)]
pub struct ErrorOut {
    pub error: &'static str,
}
