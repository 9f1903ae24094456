use anyhow::{Context, Result};

#[derive(Debug, Clone)]
pub struct Config {
    // Content API
    pub cms_api_url: String,
    pub cms_auth_token: Option<String>,
    pub page_context: String,

    // Site
    pub site_base_url: String,
    pub contact_email: Option<String>,
    pub blog_page_size: u32,

    // Server
    pub port: u16,
    pub locales_dir: String,
    pub static_dir: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        Ok(Self {
            // Content API
            cms_api_url: std::env::var("STRAPI_API_URL")
                .context("STRAPI_API_URL not set")?
                .trim_end_matches('/')
                .to_string(),
            cms_auth_token: std::env::var("STRAPI_AUTH_TOKEN")
                .ok()
                .filter(|v| !v.is_empty()),
            page_context: std::env::var("PAGE_CONTEXT").context("PAGE_CONTEXT not set")?,

            // Site
            site_base_url: std::env::var("SITE_BASE_URL")
                .map(|v| v.trim_end_matches('/').to_string())
                .unwrap_or_else(|_| "http://localhost:3000".to_string()),
            contact_email: std::env::var("CONTACT_EMAIL")
                .ok()
                .filter(|v| !v.is_empty()),
            blog_page_size: std::env::var("BLOG_PAGE_SIZE")
                .ok()
                .and_then(|v| v.parse().ok())
                .filter(|&n| n > 0)
                .unwrap_or(4),

            // Server
            port: std::env::var("PORT")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(3000),
            locales_dir: std::env::var("LOCALES_DIR").unwrap_or_else(|_| "locales".to_string()),
            static_dir: std::env::var("STATIC_DIR").unwrap_or_else(|_| "static".to_string()),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    const ALL_VARS: [&str; 9] = [
        "STRAPI_API_URL",
        "STRAPI_AUTH_TOKEN",
        "PAGE_CONTEXT",
        "SITE_BASE_URL",
        "CONTACT_EMAIL",
        "BLOG_PAGE_SIZE",
        "PORT",
        "LOCALES_DIR",
        "STATIC_DIR",
    ];

    fn clear_env() {
        for var in ALL_VARS {
            std::env::remove_var(var);
        }
    }

    // ==================== Required Variable Tests ====================

    #[test]
    #[serial]
    fn test_missing_api_url_fails() {
        clear_env();
        std::env::set_var("PAGE_CONTEXT", "example.org");

        let err = Config::from_env().unwrap_err();
        assert!(err.to_string().contains("STRAPI_API_URL"));
    }

    #[test]
    #[serial]
    fn test_missing_page_context_fails() {
        clear_env();
        std::env::set_var("STRAPI_API_URL", "http://cms.local/api");

        let err = Config::from_env().unwrap_err();
        assert!(err.to_string().contains("PAGE_CONTEXT"));
    }

    // ==================== Default Tests ====================

    #[test]
    #[serial]
    fn test_defaults_applied() {
        clear_env();
        std::env::set_var("STRAPI_API_URL", "http://cms.local/api/");
        std::env::set_var("PAGE_CONTEXT", "example.org");

        let config = Config::from_env().expect("Should load config");
        assert_eq!(config.cms_api_url, "http://cms.local/api");
        assert_eq!(config.cms_auth_token, None);
        assert_eq!(config.site_base_url, "http://localhost:3000");
        assert_eq!(config.contact_email, None);
        assert_eq!(config.blog_page_size, 4);
        assert_eq!(config.port, 3000);
        assert_eq!(config.locales_dir, "locales");
        assert_eq!(config.static_dir, "static");
    }

    #[test]
    #[serial]
    fn test_invalid_numbers_fall_back_to_defaults() {
        clear_env();
        std::env::set_var("STRAPI_API_URL", "http://cms.local/api");
        std::env::set_var("PAGE_CONTEXT", "example.org");
        std::env::set_var("PORT", "not-a-port");
        std::env::set_var("BLOG_PAGE_SIZE", "0");

        let config = Config::from_env().expect("Should load config");
        assert_eq!(config.port, 3000);
        assert_eq!(config.blog_page_size, 4);
    }

    #[test]
    #[serial]
    fn test_empty_token_treated_as_absent() {
        clear_env();
        std::env::set_var("STRAPI_API_URL", "http://cms.local/api");
        std::env::set_var("PAGE_CONTEXT", "example.org");
        std::env::set_var("STRAPI_AUTH_TOKEN", "");

        let config = Config::from_env().expect("Should load config");
        assert!(config.cms_auth_token.is_none());
    }

    #[test]
    #[serial]
    fn test_overrides_are_read() {
        clear_env();
        std::env::set_var("STRAPI_API_URL", "http://cms.local/api");
        std::env::set_var("PAGE_CONTEXT", "example.org");
        std::env::set_var("STRAPI_AUTH_TOKEN", "secret");
        std::env::set_var("SITE_BASE_URL", "https://example.org/");
        std::env::set_var("PORT", "8080");
        std::env::set_var("BLOG_PAGE_SIZE", "6");

        let config = Config::from_env().expect("Should load config");
        assert_eq!(config.cms_auth_token.as_deref(), Some("secret"));
        assert_eq!(config.site_base_url, "https://example.org");
        assert_eq!(config.port, 8080);
        assert_eq!(config.blog_page_size, 6);
    }
}
