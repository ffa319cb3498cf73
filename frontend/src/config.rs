#[cfg(debug_assertions)]
pub fn get_backend_url() -> &'static str {
    "http://localhost:3001"  // Development URL when running locally
}

#[cfg(not(debug_assertions))]
pub fn get_backend_url() -> &'static str {
    ""  // Production URL
}

// Google Apps Script web app that fronts the spreadsheet
pub const APPS_SCRIPT_URL: &str = "https://script.google.com/macros/s/AKfycbzNj9ezmbafz8oD2fVy-EcimT4Cw7nntid3dL2FjRaJaAb2Qjo-MnLwNP_6L9Pqv8T7/exec";
pub const SHEET_ID: &str = "1wGMehA9CpOkdGqe_QXM0WkkkVdRl61-PDj3br33y1ME";

pub fn gviz_url(sheet: &str) -> String {
    format!(
        "https://docs.google.com/spreadsheets/d/{}/gviz/tq?tqx=out:json&sheet={}",
        SHEET_ID,
        urlencoding::encode(sheet)
    )
}

/// Viewport width (css px) under which the site switches to its mobile layout.
pub const MOBILE_BREAKPOINT: f64 = 768.0;

pub const INTRO_FRAMES_PATH: &str = "/video-frames/";
pub const INTRO_FRAME_COUNT: usize = 192;
pub const INTRO_SCROLL_DESKTOP: f64 = 4000.0;
pub const INTRO_SCROLL_MOBILE: f64 = 2500.0;

pub const COMPANY_NAME: &str = "ZENTRIX";
pub const TAGLINE: &str = "AUTOMATION OS";
pub const PHONE_NUMBER: &str = "7089935002";
pub const PHONE_NUMBER_2: &str = "7999206708";
pub const EMAIL: &str = "zentrix.ai8@gmail.com";
pub const ADDRESS: &str = "Raipur, Chhattisgarh, India";
pub const LOGO_URL: &str = "https://i.ibb.co/vCP2fg5R/Zentrix-Logo-with-Interlocking-Monogram.png";
