use serde::{Deserialize, Serialize};

/// Suffix appended to an authorization code to form its access token.
pub const ACCESS_TOKEN_SUFFIX: &str = "_mock_access_token";

pub fn access_token_for(code: &str) -> String {
    format!("{}{}", code, ACCESS_TOKEN_SUFFIX)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EmailVisibility {
    Public,
}

/// One entry of `GET /user/emails`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GitHubEmail {
    pub email: String,
    pub verified: bool,
    pub primary: bool,
    pub visibility: Option<EmailVisibility>,
}

/// Body of `GET /user` and `GET /user/{id}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GitHubProfile {
    pub login: String,
    pub id: String,
    pub name: String,
    pub avatar_url: String,
    pub emails: Vec<String>,
}

/// A synthetic GitHub account as persisted in the fixture file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GitHubUser {
    pub code: String,
    pub access_token: String,
    pub profile: GitHubProfile,
    pub emails: Vec<GitHubEmail>,
    pub primary_email: String,
}

impl GitHubUser {
    pub fn primary(&self) -> Option<&GitHubEmail> {
        self.emails.iter().find(|e| e.primary)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn access_token_is_code_with_suffix() {
        assert_eq!(access_token_for("abc"), "abc_mock_access_token");
    }

    #[test]
    fn serializes_in_fixture_file_shape() {
        let user = GitHubUser {
            code: "abc".into(),
            access_token: access_token_for("abc"),
            profile: GitHubProfile {
                login: "octo".into(),
                id: "42".into(),
                name: "Octo Cat".into(),
                avatar_url: "https://github.com/ghost.png".into(),
                emails: vec!["octo@example.com".into()],
            },
            emails: vec![GitHubEmail {
                email: "octo@example.com".into(),
                verified: true,
                primary: true,
                visibility: None,
            }],
            primary_email: "octo@example.com".into(),
        };

        let value = serde_json::to_value(&user).unwrap();
        assert_eq!(value["accessToken"], "abc_mock_access_token");
        assert_eq!(value["primaryEmail"], "octo@example.com");
        assert_eq!(value["profile"]["avatar_url"], "https://github.com/ghost.png");
        assert_eq!(value["emails"][0]["visibility"], json!(null));
    }

    #[test]
    fn visibility_reads_public_and_null() {
        let emails: Vec<GitHubEmail> = serde_json::from_value(json!([
            { "email": "a@example.com", "verified": false, "primary": false, "visibility": "public" },
            { "email": "b@example.com", "verified": true, "primary": true, "visibility": null }
        ]))
        .unwrap();

        assert_eq!(emails[0].visibility, Some(EmailVisibility::Public));
        assert_eq!(emails[1].visibility, None);
    }
}
