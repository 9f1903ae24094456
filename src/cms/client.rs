use crate::cms::localization::{select_localization, LocalizedChoice};
use crate::cms::models::{
    Blog, BlogSummary, Cv, Entity, Envelope, LandingPage, Legal, Page, Pagination, Social,
};
use crate::config::Config;
use crate::error::{CmsError, CmsResult};
use crate::i18n::Locale;
use crate::retry::{with_retry_if, RetryConfig};
use anyhow::{Context, Result};
use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use std::time::Duration;
use tracing::debug;
use url::Url;

const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// One page of the blog overview.
#[derive(Debug, Clone, Default)]
pub struct BlogPage {
    pub blogs: Vec<Entity<BlogSummary>>,
    pub pagination: Pagination,
}

/// Read-only client for the content API.
#[derive(Debug, Clone)]
pub struct CmsClient {
    http: reqwest::Client,
    base_url: String,
    auth_token: Option<String>,
    page_context: String,
    retry: RetryConfig,
}

impl CmsClient {
    pub fn new(config: &Config) -> Result<Self> {
        Url::parse(&config.cms_api_url)
            .with_context(|| format!("STRAPI_API_URL is not a valid URL: {}", config.cms_api_url))?;

        let http = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .context("Failed to build HTTP client")?;

        Ok(Self {
            http,
            base_url: config.cms_api_url.trim_end_matches('/').to_string(),
            auth_token: config.cms_auth_token.clone(),
            page_context: config.page_context.clone(),
            retry: RetryConfig::cms_fetch(),
        })
    }

    #[cfg(test)]
    pub(crate) fn with_retry_config(mut self, retry: RetryConfig) -> Self {
        self.retry = retry;
        self
    }

    /// Fetch `resource` and return the envelope's `data`.
    ///
    /// # Errors
    /// `MissingData` when `data` is absent or null, plus everything
    /// [`fetch_envelope`](Self::fetch_envelope) returns.
    pub async fn fetch_data<T: DeserializeOwned>(
        &self,
        resource: &str,
        query: &[(&str, &str)],
    ) -> CmsResult<T> {
        self.fetch_envelope(resource, query)
            .await?
            .data
            .ok_or(CmsError::MissingData)
    }

    /// Fetch `resource` and return the whole envelope, `meta` included.
    /// Transient failures are retried.
    pub async fn fetch_envelope<T: DeserializeOwned>(
        &self,
        resource: &str,
        query: &[(&str, &str)],
    ) -> CmsResult<Envelope<T>> {
        let url = self.url(resource, query)?;

        with_retry_if(
            &self.retry,
            resource,
            || self.send(resource, url.clone()),
            CmsError::is_transient,
        )
        .await
    }

    fn url(&self, resource: &str, query: &[(&str, &str)]) -> CmsResult<Url> {
        let raw = format!("{}/{}", self.base_url, resource);
        let mut url = Url::parse(&raw).map_err(|e| CmsError::InvalidUrl(format!("{}: {}", raw, e)))?;
        if !query.is_empty() {
            url.query_pairs_mut().extend_pairs(query);
        }
        Ok(url)
    }

    async fn send<T: DeserializeOwned>(&self, resource: &str, url: Url) -> CmsResult<Envelope<T>> {
        debug!("GET {}", url);

        let mut request = self.http.get(url);
        if let Some(token) = &self.auth_token {
            request = request.bearer_auth(token);
        }

        let response = request.send().await.map_err(|source| CmsError::Request {
            resource: resource.to_string(),
            source,
        })?;

        let status = response.status();
        if status == StatusCode::NOT_FOUND {
            return Err(CmsError::NotFound(resource.to_string()));
        }
        if !status.is_success() {
            return Err(CmsError::Status {
                resource: resource.to_string(),
                status,
            });
        }

        response.json().await.map_err(|source| CmsError::Decode {
            resource: resource.to_string(),
            source,
        })
    }

    // ========================================================================
    // Resources
    // ========================================================================

    pub async fn landing_page(&self, locale: Locale) -> CmsResult<LandingPage> {
        let page: Entity<LandingPage> = self
            .fetch_data(
                "landing-page",
                &[
                    ("populate", "photo,sections,sections.coverimage"),
                    ("locale", locale.code()),
                ],
            )
            .await?;
        Ok(page.attributes)
    }

    /// The generic page published under `route`, in `locale` when translated.
    pub async fn page(&self, locale: Locale, route: &str) -> CmsResult<Page> {
        let pages: Vec<Entity<Page>> = self
            .fetch_data(
                "pages",
                &[
                    ("populate", "pageContent,pageContent.context,localizations"),
                    ("filters[pageContent][route][$eq]", route),
                    ("filters[pageContent][context][title][$eq]", &self.page_context),
                ],
            )
            .await?;

        let page = pages
            .into_iter()
            .next()
            .ok_or_else(|| CmsError::NotFound(format!("page '{}'", route)))?;

        let localizations = page.attributes.localizations.data.as_deref().unwrap_or(&[]);
        match select_localization(&page.attributes.locale, localizations, locale) {
            LocalizedChoice::Default => Ok(page.attributes),
            LocalizedChoice::Localized(id) => {
                let localized: Entity<Page> = self
                    .fetch_data(
                        &format!("pages/{}", id),
                        &[("populate", "pageContent,pageContent.keywords")],
                    )
                    .await?;
                Ok(localized.attributes)
            }
        }
    }

    /// Page `page` (1-based) of the blog overview, newest first.
    pub async fn blogs(&self, locale: Locale, page: u32, page_size: u32) -> CmsResult<BlogPage> {
        let page_size_param = page_size.to_string();
        let page_param = page.to_string();

        let envelope: Envelope<Vec<Entity<BlogSummary>>> = self
            .fetch_envelope(
                "blogs",
                &[
                    ("fields[0]", "id"),
                    ("fields[1]", "title"),
                    ("fields[2]", "author"),
                    ("fields[3]", "date"),
                    ("fields[4]", "teaserText"),
                    ("populate", "coverimage"),
                    ("locale", locale.code()),
                    ("pagination[pageSize]", &page_size_param),
                    ("pagination[page]", &page_param),
                    ("sort", "date:desc"),
                ],
            )
            .await?;

        Ok(BlogPage {
            blogs: envelope.data.unwrap_or_default(),
            pagination: envelope.meta.pagination.unwrap_or(Pagination {
                page,
                page_size,
                page_count: 1,
                total: 0,
            }),
        })
    }

    pub async fn blog(&self, id: u64) -> CmsResult<Blog> {
        let blog: Entity<Blog> = self
            .fetch_data(
                &format!("blogs/{}", id),
                &[("populate", "coverimage,attachments,photos,links,keywords")],
            )
            .await?;
        Ok(blog.attributes)
    }

    pub async fn cv(&self, locale: Locale) -> CmsResult<Cv> {
        let cv: Entity<Cv> = self
            .fetch_data(
                "cv",
                &[("populate", "cv,cv.skills"), ("locale", locale.code())],
            )
            .await?;
        Ok(cv.attributes)
    }

    /// Legal notice and consent groups for this site, in `locale` when translated.
    pub async fn legal(&self, locale: Locale) -> CmsResult<Legal> {
        const POPULATE: &str = "groups,groups.items,localizations";

        let legals: Vec<Entity<Legal>> = self
            .fetch_data(
                "legals",
                &[
                    ("filters[contexts][title][$eq]", &self.page_context),
                    ("populate", POPULATE),
                ],
            )
            .await?;

        let legal = legals
            .into_iter()
            .next()
            .ok_or_else(|| CmsError::NotFound("legal".to_string()))?;

        let localizations = legal.attributes.localizations.data.as_deref().unwrap_or(&[]);
        match select_localization(&legal.attributes.locale, localizations, locale) {
            LocalizedChoice::Default => Ok(legal.attributes),
            LocalizedChoice::Localized(id) => {
                let localized: Entity<Legal> = self
                    .fetch_data(&format!("legals/{}", id), &[("populate", POPULATE)])
                    .await?;
                Ok(localized.attributes)
            }
        }
    }

    pub async fn socials(&self) -> CmsResult<Vec<Social>> {
        let socials: Vec<Entity<Social>> = self
            .fetch_data(
                "socials",
                &[("filters[contexts][title][$eq]", &self.page_context)],
            )
            .await?;
        Ok(socials.into_iter().map(|s| s.attributes).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::{
        matchers::{header, method, path, query_param},
        Mock, MockServer, ResponseTemplate,
    };

    fn test_config(api_url: &str) -> Config {
        Config {
            cms_api_url: api_url.to_string(),
            cms_auth_token: Some("test-token".to_string()),
            page_context: "example.org".to_string(),
            site_base_url: "https://example.org".to_string(),
            contact_email: None,
            blog_page_size: 4,
            port: 3000,
            locales_dir: "locales".to_string(),
            static_dir: "static".to_string(),
        }
    }

    fn client(server: &MockServer) -> CmsClient {
        CmsClient::new(&test_config(&server.uri()))
            .expect("Client should build")
            .with_retry_config(RetryConfig::new(2, Duration::from_millis(1)))
    }

    fn locale(code: &str) -> Locale {
        Locale::from_code(code).expect("Test locale should exist")
    }

    // ==================== Construction Tests ====================

    #[test]
    fn test_invalid_base_url_rejected() {
        assert!(CmsClient::new(&test_config("not a url")).is_err());
    }

    #[test]
    fn test_url_encodes_query() {
        let client = CmsClient::new(&test_config("https://cms.example.org/api/")).unwrap();
        let url = client
            .url("pages", &[("filters[pageContent][route][$eq]", "a b")])
            .unwrap();

        assert_eq!(url.path(), "/api/pages");
        let pairs: Vec<_> = url.query_pairs().collect();
        assert_eq!(pairs[0].0, "filters[pageContent][route][$eq]");
        assert_eq!(pairs[0].1, "a b");
    }

    // ==================== fetch_data Tests ====================

    #[tokio::test]
    async fn test_fetch_sends_bearer_token() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/socials"))
            .and(header("authorization", "Bearer test-token"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"data": []})))
            .expect(1)
            .mount(&server)
            .await;

        let socials = client(&server).socials().await.expect("Should fetch socials");
        assert!(socials.is_empty());
    }

    #[tokio::test]
    async fn test_fetch_without_token_sends_no_header() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/socials"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"data": []})))
            .mount(&server)
            .await;

        let mut config = test_config(&server.uri());
        config.cms_auth_token = None;
        let client = CmsClient::new(&config).unwrap();
        client.socials().await.expect("Should fetch socials");

        let requests = server.received_requests().await.unwrap();
        assert!(requests[0].headers.get("authorization").is_none());
    }

    #[tokio::test]
    async fn test_null_data_is_missing_data() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/cv"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"data": null})))
            .mount(&server)
            .await;

        let err = client(&server).cv(locale("de")).await.unwrap_err();
        assert!(matches!(err, CmsError::MissingData));
        assert_eq!(err.to_string(), "Received no data from the API.");
    }

    #[tokio::test]
    async fn test_server_error_is_retried() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/cv"))
            .respond_with(ResponseTemplate::new(503))
            .expect(2)
            .mount(&server)
            .await;

        let err = client(&server).cv(locale("de")).await.unwrap_err();
        assert!(matches!(
            err,
            CmsError::Status {
                status: StatusCode::SERVICE_UNAVAILABLE,
                ..
            }
        ));
    }

    #[tokio::test]
    async fn test_not_found_is_not_retried() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/blogs/99"))
            .respond_with(ResponseTemplate::new(404))
            .expect(1)
            .mount(&server)
            .await;

        let err = client(&server).blog(99).await.unwrap_err();
        assert!(matches!(err, CmsError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_invalid_json_is_decode_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/landing-page"))
            .respond_with(ResponseTemplate::new(200).set_body_string("<html>"))
            .mount(&server)
            .await;

        let err = client(&server).landing_page(locale("en")).await.unwrap_err();
        assert!(matches!(err, CmsError::Decode { .. }));
    }

    // ==================== Resource Tests ====================

    #[tokio::test]
    async fn test_landing_page() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/landing-page"))
            .and(query_param("locale", "en"))
            .and(query_param("populate", "photo,sections,sections.coverimage"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "data": {"id": 1, "attributes": {
                    "title": "Welcome",
                    "introduction": "Hi there",
                    "sections": [{"id": 1, "title": "Blog", "callToActionRoute": "blogs"}]
                }}
            })))
            .mount(&server)
            .await;

        let landing = client(&server).landing_page(locale("en")).await.unwrap();
        assert_eq!(landing.title, "Welcome");
        assert_eq!(landing.sections[0].call_to_action_route, "blogs");
    }

    #[tokio::test]
    async fn test_page_in_default_locale() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/pages"))
            .and(query_param("filters[pageContent][route][$eq]", "about"))
            .and(query_param("filters[pageContent][context][title][$eq]", "example.org"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "data": [{"id": 1, "attributes": {
                    "locale": "de",
                    "pageContent": {"title": "Über mich", "content": []},
                    "localizations": {"data": [{"id": 2, "attributes": {"locale": "en"}}]}
                }}]
            })))
            .mount(&server)
            .await;

        let page = client(&server).page(locale("de"), "about").await.unwrap();
        assert_eq!(page.page_content.title, "Über mich");
    }

    #[tokio::test]
    async fn test_page_fetches_translation() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/pages"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "data": [{"id": 1, "attributes": {
                    "locale": "de",
                    "pageContent": {"title": "Über mich"},
                    "localizations": {"data": [{"id": 2, "attributes": {"locale": "en"}}]}
                }}]
            })))
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/pages/2"))
            .and(query_param("populate", "pageContent,pageContent.keywords"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "data": {"id": 2, "attributes": {
                    "locale": "en",
                    "pageContent": {"title": "About me", "keywords": [{"keyword": "rust"}]}
                }}
            })))
            .expect(1)
            .mount(&server)
            .await;

        let page = client(&server).page(locale("en"), "about").await.unwrap();
        assert_eq!(page.page_content.title, "About me");
        assert_eq!(page.page_content.keywords[0].keyword, "rust");
    }

    #[tokio::test]
    async fn test_page_not_found() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/pages"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"data": []})))
            .mount(&server)
            .await;

        let err = client(&server).page(locale("de"), "missing").await.unwrap_err();
        assert!(matches!(err, CmsError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_blogs_pagination() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/blogs"))
            .and(query_param("pagination[page]", "2"))
            .and(query_param("pagination[pageSize]", "4"))
            .and(query_param("sort", "date:desc"))
            .and(query_param("locale", "es"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "data": [{"id": 5, "attributes": {"title": "Hola"}}],
                "meta": {"pagination": {"page": 2, "pageSize": 4, "pageCount": 3, "total": 9}}
            })))
            .mount(&server)
            .await;

        let page = client(&server).blogs(locale("es"), 2, 4).await.unwrap();
        assert_eq!(page.blogs.len(), 1);
        assert_eq!(page.blogs[0].id, 5);
        assert_eq!(page.pagination.page_count, 3);
    }

    #[tokio::test]
    async fn test_blogs_without_meta() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/blogs"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"data": []})))
            .mount(&server)
            .await;

        let page = client(&server).blogs(locale("de"), 3, 4).await.unwrap();
        assert!(page.blogs.is_empty());
        assert_eq!(page.pagination.page, 3);
        assert_eq!(page.pagination.page_count, 1);
    }

    #[tokio::test]
    async fn test_legal_fetches_translation() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/legals"))
            .and(query_param("filters[contexts][title][$eq]", "example.org"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "data": [{"id": 1, "attributes": {
                    "locale": "de",
                    "title": "Datenschutz",
                    "localizations": {"data": [{"id": 4, "attributes": {"locale": "es"}}]}
                }}]
            })))
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/legals/4"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "data": {"id": 4, "attributes": {"locale": "es", "title": "Privacidad", "cookie": "consent"}}
            })))
            .mount(&server)
            .await;

        let legal = client(&server).legal(locale("es")).await.unwrap();
        assert_eq!(legal.title, "Privacidad");
        assert_eq!(legal.cookie, "consent");
    }
}
