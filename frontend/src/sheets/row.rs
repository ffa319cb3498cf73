use serde::Deserialize;
use serde_json::{Map, Value};

/// One spreadsheet row as returned by the Apps Script endpoint: an object
/// keyed by whatever the header row says.
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
#[serde(transparent)]
pub struct SheetRow(Map<String, Value>);

/// Lower-cases, turns `_` into spaces and trims, so `logo_url`, `LOGO URL`
/// and ` Logo_Url ` all compare equal.
pub fn normalize_header(key: &str) -> String {
    key.to_lowercase().replace('_', " ").trim().to_string()
}

/// Renders a cell the way the sheet shows it. Blank cells are `None`.
pub fn value_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => {
            let trimmed = s.trim();
            (!trimmed.is_empty()).then(|| trimmed.to_string())
        }
        Value::Number(n) => Some(match n.as_f64() {
            // integral floats print without the trailing ".0"
            Some(f) if n.is_f64() && f.fract() == 0.0 && f.abs() < 1e15 => format!("{}", f as i64),
            _ => n.to_string(),
        }),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

impl SheetRow {
    pub fn new(fields: Map<String, Value>) -> Self {
        Self(fields)
    }

    /// First non-blank cell among `aliases`, tried in order. For each alias
    /// an exact header match wins over a normalized one.
    pub fn lookup(&self, aliases: &[&str]) -> Option<&Value> {
        for alias in aliases {
            if let Some(value) = self.0.get(*alias).filter(|v| value_text(v).is_some()) {
                return Some(value);
            }
            let wanted = normalize_header(alias);
            let found = self
                .0
                .iter()
                .find(|(key, value)| normalize_header(key) == wanted && value_text(value).is_some());
            if let Some((_, value)) = found {
                return Some(value);
            }
        }
        None
    }

    pub fn text(&self, aliases: &[&str]) -> Option<String> {
        self.lookup(aliases).and_then(value_text)
    }

    pub fn has_any(&self, aliases: &[&str]) -> bool {
        self.lookup(aliases).is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn row(value: Value) -> SheetRow {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn normalized_header_matches_alias() {
        let r = row(json!({ "LOGO URL": "https://i.ibb.co/x.png" }));
        assert_eq!(r.text(&["logo_url"]).as_deref(), Some("https://i.ibb.co/x.png"));
        let r = row(json!({ " Client_Name ": "Acme" }));
        assert_eq!(r.text(&["client_name"]).as_deref(), Some("Acme"));
    }

    #[test]
    fn exact_key_wins_over_normalized() {
        let r = row(json!({ "Title": "normalized", "title": "exact" }));
        assert_eq!(r.text(&["title"]).as_deref(), Some("exact"));
    }

    #[test]
    fn aliases_are_tried_in_order() {
        let r = row(json!({ "name": "second", "client_name": "first" }));
        assert_eq!(r.text(&["client_name", "name"]).as_deref(), Some("first"));
        assert_eq!(r.text(&["name", "client_name"]).as_deref(), Some("second"));
    }

    #[test]
    fn blank_cells_fall_through() {
        let r = row(json!({ "client_name": "  ", "name": "Fallback", "logo": null }));
        assert_eq!(r.text(&["client_name", "name"]).as_deref(), Some("Fallback"));
        assert!(r.lookup(&["logo"]).is_none());
        assert!(!r.has_any(&["missing", "logo"]));
    }

    #[test]
    fn numbers_render_like_the_sheet() {
        let r = row(json!({ "id": 1234.0, "phone": 7089935002u64, "ratio": 0.5, "ok": true }));
        assert_eq!(r.text(&["id"]).as_deref(), Some("1234"));
        assert_eq!(r.text(&["phone"]).as_deref(), Some("7089935002"));
        assert_eq!(r.text(&["ratio"]).as_deref(), Some("0.5"));
        assert_eq!(r.text(&["ok"]).as_deref(), Some("true"));
    }
}
