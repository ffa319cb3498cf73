use gloo_net::http::Request;
use log::{error, info};
use serde::Deserialize;
use serde_json::Value;
use thiserror::Error;

use crate::config;

use super::models::LOGIN_SHEET;
use super::row::value_text;

#[derive(Clone, Debug, Error, PartialEq)]
pub enum LoginError {
    #[error("Access Denied.")]
    Denied,
    #[error("Authentication Failed.")]
    Unavailable,
}

#[derive(Clone, Debug, PartialEq)]
pub struct AdminUser {
    pub name: String,
    pub id: String,
    pub password: String,
}

// The visualization endpoint wraps its JSON in a JS callback:
// `/*O_o*/ google.visualization.Query.setResponse({...});`
#[derive(Deserialize)]
struct GvizResponse {
    table: GvizTable,
}

#[derive(Deserialize)]
struct GvizTable {
    #[serde(default)]
    rows: Vec<GvizRow>,
}

#[derive(Deserialize)]
struct GvizRow {
    #[serde(default)]
    c: Vec<Option<GvizCell>>,
}

#[derive(Deserialize)]
struct GvizCell {
    #[serde(default)]
    v: Value,
}

impl GvizRow {
    fn cell(&self, column: usize) -> String {
        self.c
            .get(column)
            .and_then(|cell| cell.as_ref())
            .and_then(|cell| value_text(&cell.v))
            .unwrap_or_default()
    }
}

/// Reads the `login` tab: columns are user name, user id, password.
pub fn parse_gviz_users(text: &str) -> Result<Vec<AdminUser>, LoginError> {
    let start = text.find('{').ok_or(LoginError::Unavailable)?;
    let end = text.rfind('}').ok_or(LoginError::Unavailable)?;
    if end < start {
        return Err(LoginError::Unavailable);
    }
    let response: GvizResponse = serde_json::from_str(&text[start..=end]).map_err(|e| {
        error!("Could not decode login table: {}", e);
        LoginError::Unavailable
    })?;
    Ok(response
        .table
        .rows
        .iter()
        .map(|row| AdminUser {
            name: row.cell(0),
            id: row.cell(1),
            password: row.cell(2),
        })
        .collect())
}

pub fn find_user<'a>(
    users: &'a [AdminUser],
    username: &str,
    id: &str,
    password: &str,
) -> Option<&'a AdminUser> {
    let username = username.trim().to_lowercase();
    let id = id.trim();
    let password = password.trim();
    users.iter().find(|user| {
        user.name.to_lowercase() == username && user.id == id && user.password == password
    })
}

/// Checks the credentials against the login tab and returns the user name
/// as it is written in the sheet.
pub async fn validate_login(username: &str, id: &str, password: &str) -> Result<String, LoginError> {
    let response = Request::get(&config::gviz_url(LOGIN_SHEET))
        .send()
        .await
        .map_err(|e| {
            error!("Login table unreachable: {}", e);
            LoginError::Unavailable
        })?;
    if !response.ok() {
        error!("Login table answered with status {}", response.status());
        return Err(LoginError::Unavailable);
    }
    let text = response.text().await.map_err(|e| {
        error!("Failed to read login table: {}", e);
        LoginError::Unavailable
    })?;
    let users = parse_gviz_users(&text)?;
    match find_user(&users, username, id, password) {
        Some(user) => {
            info!("Admin {} signed in", user.name);
            Ok(user.name.clone())
        }
        None => Err(LoginError::Denied),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"/*O_o*/
google.visualization.Query.setResponse({"version":"0.6","status":"ok","table":{"cols":[{"id":"A","label":"USER NAME","type":"string"},{"id":"B","label":"USER ID","type":"number"},{"id":"C","label":"PASSWORD","type":"string"}],"rows":[{"c":[{"v":"Admin "},{"v":1001.0,"f":"1001"},{"v":"s3cret"}]},{"c":[{"v":"ops"},null,{"v":"x"}]}]}});"#;

    #[test]
    fn parses_wrapped_table() {
        let users = parse_gviz_users(SAMPLE).unwrap();
        assert_eq!(users.len(), 2);
        assert_eq!(
            users[0],
            AdminUser {
                name: "Admin".to_string(),
                id: "1001".to_string(),
                password: "s3cret".to_string(),
            }
        );
        assert_eq!(users[1].id, "");
    }

    #[test]
    fn username_ignores_case_but_secrets_do_not() {
        let users = parse_gviz_users(SAMPLE).unwrap();
        assert_eq!(
            find_user(&users, "  ADMIN ", " 1001", "s3cret ").map(|u| u.name.as_str()),
            Some("Admin")
        );
        assert!(find_user(&users, "admin", "1001", "S3CRET").is_none());
        assert!(find_user(&users, "admin", "1002", "s3cret").is_none());
    }

    #[test]
    fn garbage_is_unavailable_not_denied() {
        assert_eq!(parse_gviz_users("<html>quota</html>"), Err(LoginError::Unavailable));
        assert_eq!(parse_gviz_users("} nope {"), Err(LoginError::Unavailable));
        assert_eq!(parse_gviz_users("{\"status\":\"error\"}"), Err(LoginError::Unavailable));
    }
}
