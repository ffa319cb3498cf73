use once_cell::sync::Lazy;
use regex::Regex;

static IMG_SRC: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"(?i)src=["']([^"']+)["']"#).expect("valid img src pattern")
});

const DRIVE_FILE_MARKER: &str = "drive.google.com/file/d/";

/// Turns whatever an admin pasted into a logo/banner cell into a loadable URL.
///
/// Accepts direct links (ImgBB and friends), `<img>` embed snippets and Google
/// Drive share links. Anything that is not an http(s) URL after that is dropped.
pub fn resolve_image_url(raw: &str) -> Option<String> {
    let mut url = raw.trim().to_string();
    if url.is_empty() {
        return None;
    }

    if url.to_lowercase().contains("<img") {
        if let Some(src) = IMG_SRC.captures(&url).and_then(|c| c.get(1)) {
            url = src.as_str().trim().to_string();
        }
    }

    if url.contains(DRIVE_FILE_MARKER) {
        let id = url
            .split("/d/")
            .nth(1)
            .and_then(|rest| rest.split('/').next())
            .filter(|id| !id.is_empty());
        if let Some(id) = id {
            return Some(format!("https://docs.google.com/uc?export=view&id={}", id));
        }
    }

    url.starts_with("http").then_some(url)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn direct_links_pass_through() {
        assert_eq!(
            resolve_image_url("  https://i.ibb.co/abc/logo.png "),
            Some("https://i.ibb.co/abc/logo.png".to_string())
        );
    }

    #[test]
    fn img_embed_snippet_yields_its_src() {
        let embed = r#"<a href="https://ibb.co/x"><IMG SRC='https://i.ibb.co/x/logo.png' alt="logo"></a>"#;
        assert_eq!(resolve_image_url(embed), Some("https://i.ibb.co/x/logo.png".to_string()));
    }

    #[test]
    fn drive_share_link_becomes_view_url() {
        assert_eq!(
            resolve_image_url("https://drive.google.com/file/d/1AbC_dEf/view?usp=sharing"),
            Some("https://docs.google.com/uc?export=view&id=1AbC_dEf".to_string())
        );
    }

    #[test]
    fn non_http_values_are_rejected() {
        assert_eq!(resolve_image_url(""), None);
        assert_eq!(resolve_image_url("   "), None);
        assert_eq!(resolve_image_url("logo.png"), None);
        assert_eq!(resolve_image_url("<img alt='no source'>"), None);
    }
}
