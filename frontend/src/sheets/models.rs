use std::collections::BTreeMap;

use serde::Serialize;

use super::images::resolve_image_url;
use super::row::SheetRow;

pub const TESTIMONIALS_SHEET: &str = "admin";
pub const BANNERS_SHEET: &str = "ADS";
pub const SETTINGS_SHEET: &str = "settings";
pub const BOOKINGS_SHEET: &str = "demo book";
pub const LOGIN_SHEET: &str = "login";

#[derive(Clone, Debug, PartialEq)]
pub struct Testimonial {
    pub name: String,
    pub logo: Option<String>,
    pub text: String,
    pub role: String,
    pub company: String,
    pub rating: u8,
}

impl Testimonial {
    pub fn from_row(row: &SheetRow) -> Option<Self> {
        if !row.has_any(&["client_name", "name", "company", "feedback"]) {
            return None;
        }
        let name = row
            .text(&["client_name", "name"])
            .unwrap_or_else(|| "Enterprise Partner".to_string());
        let logo = row
            .text(&["logo_url", "logo", "client_logo", "image", "brand_logo", "image_url"])
            .and_then(|raw| resolve_image_url(&raw));
        Some(Self {
            logo,
            text: row
                .text(&["feedback", "text", "testimonial"])
                .unwrap_or_else(|| "Quality service.".to_string()),
            role: "Strategic Partner".to_string(),
            company: row
                .text(&["company", "designation"])
                .unwrap_or_else(|| name.clone()),
            name,
            rating: 5,
        })
    }

    /// Shown until (or instead of, when the sheet is empty) the live list.
    pub fn defaults() -> Vec<Self> {
        vec![
            Self {
                name: "Akshay Bardia".to_string(),
                logo: Some("https://images.unsplash.com/photo-1614850523296-d8c1af93d400?w=100&h=100&fit=crop".to_string()),
                text: "ZENTRIX changed our business completely. Everything is now automatic and fast.".to_string(),
                role: "Director".to_string(),
                company: "Bardia Enterprises".to_string(),
                rating: 5,
            },
            Self {
                name: "Dilip Kodwani".to_string(),
                logo: Some("https://images.unsplash.com/photo-1599305090598-fe179d501227?w=100&h=100&fit=crop".to_string()),
                text: "Best automation service in Raipur. Their WhatsApp bot saves us hours every day.".to_string(),
                role: "Manager".to_string(),
                company: "Acemark Solutions".to_string(),
                rating: 5,
            },
        ]
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Banner {
    pub id: String,
    pub image_url: Option<String>,
    pub link: String,
    pub title: String,
}

impl Banner {
    pub fn from_row(position: usize, row: &SheetRow) -> Option<Self> {
        let title = row.text(&["CONTENT", "title"]);
        let image = row.text(&["IMAGE URL", "image_url"]);
        if title.is_none() && image.is_none() {
            return None;
        }
        Some(Self {
            id: row.text(&["id"]).unwrap_or_else(|| format!("banner-{}", position)),
            image_url: image.and_then(|raw| resolve_image_url(&raw)),
            link: row.text(&["link", "LINK"]).unwrap_or_else(|| "#".to_string()),
            title: title.unwrap_or_else(|| "PROMOTION".to_string()),
        })
    }
}

pub type Settings = BTreeMap<String, String>;

pub fn parse_testimonials(rows: &[SheetRow]) -> Vec<Testimonial> {
    rows.iter().filter_map(Testimonial::from_row).collect()
}

pub fn parse_banners(rows: &[SheetRow]) -> Vec<Banner> {
    rows.iter()
        .enumerate()
        .filter_map(|(position, row)| Banner::from_row(position, row))
        .collect()
}

/// Later rows overwrite earlier ones, so re-saving a key acts as an update.
pub fn parse_settings(rows: &[SheetRow]) -> Settings {
    let mut settings = Settings::new();
    for row in rows {
        if let Some(key) = row.text(&["setting_key", "key"]) {
            let value = row.text(&["setting_value", "value"]).unwrap_or_default();
            settings.insert(key, value);
        }
    }
    settings
}

pub const SOCIAL_KEYS: [&str; 5] = ["facebook", "instagram", "linkedin", "twitter", "whatsapp"];

#[derive(Clone, Debug, Default, PartialEq)]
pub struct SocialLinks {
    pub facebook: String,
    pub instagram: String,
    pub linkedin: String,
    pub twitter: String,
    pub whatsapp: String,
}

impl SocialLinks {
    pub fn from_settings(settings: &Settings) -> Self {
        let get = |key: &str| settings.get(key).cloned().unwrap_or_default();
        Self {
            facebook: get("facebook"),
            instagram: get("instagram"),
            linkedin: get("linkedin"),
            twitter: get("twitter"),
            whatsapp: get("whatsapp"),
        }
    }

    pub fn get(&self, key: &str) -> &str {
        match key {
            "facebook" => &self.facebook,
            "instagram" => &self.instagram,
            "linkedin" => &self.linkedin,
            "twitter" => &self.twitter,
            "whatsapp" => &self.whatsapp,
            _ => "",
        }
    }

    pub fn set(&mut self, key: &str, value: String) {
        match key {
            "facebook" => self.facebook = value,
            "instagram" => self.instagram = value,
            "linkedin" => self.linkedin = value,
            "twitter" => self.twitter = value,
            "whatsapp" => self.whatsapp = value,
            _ => {}
        }
    }

    /// Link for the footer; unset entries point nowhere.
    pub fn href(&self, key: &str) -> String {
        let value = self.get(key);
        if value.trim().is_empty() {
            "#".to_string()
        } else {
            value.to_string()
        }
    }

    pub fn entries(&self) -> Vec<(String, String)> {
        SOCIAL_KEYS
            .iter()
            .map(|key| (key.to_string(), self.get(key).to_string()))
            .collect()
    }
}

// Field names below match the existing sheet headers, typo included.

#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct DemoBooking {
    #[serde(rename = "NAME")]
    pub name: String,
    #[serde(rename = "NUMNER")]
    pub phone: String,
    #[serde(rename = "BUSINESS EMAIL")]
    pub email: String,
    #[serde(rename = "NOTES")]
    pub message: String,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct NewTestimonial {
    #[serde(rename = "client_name")]
    pub name: String,
    #[serde(rename = "logo_url")]
    pub logo: String,
    pub feedback: String,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct NewBanner {
    #[serde(rename = "CONTENT")]
    pub title: String,
    #[serde(rename = "IMAGE URL")]
    pub image_url: String,
    pub link: String,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct SettingEntry {
    pub setting_key: String,
    pub setting_value: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{json, Value};

    fn rows(value: Value) -> Vec<SheetRow> {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn testimonials_tolerate_messy_headers() {
        let parsed = parse_testimonials(&rows(json!([
            { "Client Name": "Acme Retail", "LOGO URL": "https://i.ibb.co/a/acme.png", "Feedback": "Fast delivery." },
            { "name": "", "company": "Solo Co" },
            { "timestamp": "2024-01-01" }
        ])));
        assert_eq!(parsed.len(), 2);
        assert_eq!(parsed[0].name, "Acme Retail");
        assert_eq!(parsed[0].company, "Acme Retail");
        assert_eq!(parsed[0].logo.as_deref(), Some("https://i.ibb.co/a/acme.png"));
        assert_eq!(parsed[0].text, "Fast delivery.");
        assert_eq!(parsed[1].name, "Enterprise Partner");
        assert_eq!(parsed[1].company, "Solo Co");
        assert_eq!(parsed[1].text, "Quality service.");
        assert_eq!(parsed[1].logo, None);
        assert!(parsed.iter().all(|t| t.rating == 5 && t.role == "Strategic Partner"));
    }

    #[test]
    fn banners_need_a_title_or_an_image() {
        let parsed = parse_banners(&rows(json!([
            { "CONTENT": "Diwali offer", "IMAGE URL": "https://i.ibb.co/b/d.png", "link": "https://wa.me/1" },
            { "image_url": "https://drive.google.com/file/d/XYZ/view" },
            { "link": "https://example.com" }
        ])));
        assert_eq!(parsed.len(), 2);
        assert_eq!(parsed[0].title, "Diwali offer");
        assert_eq!(parsed[0].link, "https://wa.me/1");
        assert_eq!(parsed[0].id, "banner-0");
        assert_eq!(parsed[1].title, "PROMOTION");
        assert_eq!(parsed[1].link, "#");
        assert_eq!(
            parsed[1].image_url.as_deref(),
            Some("https://docs.google.com/uc?export=view&id=XYZ")
        );
    }

    #[test]
    fn settings_keep_the_latest_value_per_key() {
        let settings = parse_settings(&rows(json!([
            { "setting_key": "facebook", "setting_value": "https://fb.com/old" },
            { "Setting Key": "facebook", "Setting Value": "https://fb.com/new" },
            { "key": "whatsapp" },
            { "setting_value": "orphan" }
        ])));
        assert_eq!(settings.len(), 2);
        assert_eq!(settings["facebook"], "https://fb.com/new");
        assert_eq!(settings["whatsapp"], "");

        let social = SocialLinks::from_settings(&settings);
        assert_eq!(social.href("facebook"), "https://fb.com/new");
        assert_eq!(social.href("whatsapp"), "#");
        assert_eq!(social.href("linkedin"), "#");
    }

    #[test]
    fn write_payloads_use_sheet_headers() {
        let booking = DemoBooking {
            name: "Ravi".to_string(),
            phone: "9876543210".to_string(),
            email: "ravi@shop.in".to_string(),
            message: "Automate billing please".to_string(),
        };
        let value = serde_json::to_value(&booking).unwrap();
        assert_eq!(value["NAME"], "Ravi");
        assert_eq!(value["NUMNER"], "9876543210");
        assert_eq!(value["BUSINESS EMAIL"], "ravi@shop.in");
        assert_eq!(value["NOTES"], "Automate billing please");
    }

    #[test]
    fn social_entries_cover_every_network() {
        let mut social = SocialLinks::default();
        social.set("twitter", "https://x.com/zentrix".to_string());
        social.set("myspace", "ignored".to_string());
        let entries = social.entries();
        assert_eq!(entries.len(), SOCIAL_KEYS.len());
        assert!(entries.contains(&("twitter".to_string(), "https://x.com/zentrix".to_string())));
    }
}
