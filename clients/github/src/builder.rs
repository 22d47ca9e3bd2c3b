use crate::GithubClient;
use gitview::api::{Error, Result};
use reqwest::header;
use reqwest::header::HeaderMap;
use reqwest::header::HeaderName;
use reqwest::header::HeaderValue;
use reqwest::ClientBuilder;
use secrecy::ExposeSecret;
use url::Url;

pub const GITHUB_API_URL: &str = "https://api.github.com";

pub struct GithubClientBuilder {
    client_builder: ClientBuilder,
    github_url: String,
    headers: HeaderMap,
}

impl Default for GithubClientBuilder {
    fn default() -> Self {
        let mut headers = HeaderMap::default();
        headers.insert(header::USER_AGENT, HeaderValue::from_static("gitview"));
        headers.insert(header::ACCEPT, HeaderValue::from_static("application/vnd.github.v3+json"));
        Self {
            client_builder: ClientBuilder::default(),
            github_url: GITHUB_API_URL.to_string(),
            headers,
        }
    }
}

impl GithubClientBuilder {
    pub fn try_with_token(self, token: &secrecy::SecretString) -> Result<GithubClientBuilder> {
        let mut builder = self.try_with_header(header::AUTHORIZATION, format!("Bearer {}", token.expose_secret()))?;
        if let Some(authorization) = builder.headers.get_mut(header::AUTHORIZATION) {
            authorization.set_sensitive(true);
        }
        Ok(builder)
    }

    pub fn try_with_user_agent<STR: AsRef<str>>(self, user_agent: STR) -> Result<GithubClientBuilder> {
        self.try_with_header(header::USER_AGENT, user_agent)
    }

    pub fn with_github_url<STR: AsRef<str>>(mut self, url: STR) -> GithubClientBuilder {
        self.github_url = url.as_ref().to_string();
        self
    }

    fn try_with_header(mut self, key: HeaderName, val: impl AsRef<str>) -> Result<GithubClientBuilder> {
        let val = HeaderValue::from_str(val.as_ref())
            .map_err(|err| Error::Config(format!("invalid {} header: {}", key, err)))?;
        self.headers.insert(key, val);
        Ok(self)
    }

    pub fn build(self) -> Result<GithubClient> {
        let github_url = Url::parse(&self.github_url)
            .map_err(|err| Error::Config(format!("invalid API URL {}: {}", self.github_url, err)))?;
        if github_url.cannot_be_a_base() {
            return Err(Error::Config(format!("invalid API URL {}", self.github_url)));
        }
        let client = self
            .client_builder
            .default_headers(self.headers)
            .build()
            .map_err(|err| Error::Config(err.to_string()))?;
        Ok(GithubClient { client, github_url })
    }
}
