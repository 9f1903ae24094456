//! Locale resolution for incoming requests.
//!
//! Every page lives under `/<locale>/...`. Requests without a supported locale
//! as their first path segment are redirected to one picked from the locale
//! cookie when present, otherwise from `Accept-Language`, falling back to the
//! default locale. Requests that already
//! carry a locale persist the locale of the page they came from (the
//! `Referer`) in the cookie, so the language switcher sticks.

use crate::i18n::{LanguageNegotiator, Locale};
use crate::web::SharedState;
use axum::extract::{Request, State};
use axum::http::header::{ACCEPT_LANGUAGE, COOKIE, REFERER, SET_COOKIE};
use axum::http::{HeaderMap, HeaderValue};
use axum::middleware::Next;
use axum::response::{IntoResponse, Redirect, Response};
use chrono::{Duration, Utc};
use regex::Regex;
use std::sync::OnceLock;
use tracing::{debug, warn};
use url::Url;

/// Name of the cookie holding the preferred locale.
pub const LOCALE_COOKIE: &str = "i18next";

/// Lifetime of persisted cookies.
pub const COOKIE_MAX_AGE_DAYS: i64 = 365;

/// Paths that are never locale-prefixed: static assets, crawler files, probes.
static EXCLUDED_PATHS: OnceLock<Regex> = OnceLock::new();

fn excluded_paths() -> &'static Regex {
    EXCLUDED_PATHS.get_or_init(|| {
        Regex::new(
            r"^/(?:api|static|assets|favicon|img|icons|fonts|sw\.js|robots\.txt|sitemap\.xml|health)",
        )
        .expect("Excluded path pattern should compile")
    })
}

/// The request data the resolver looks at.
#[derive(Debug, Clone, Copy, Default)]
pub struct LocaleRequest<'a> {
    pub path: &'a str,
    pub cookie: Option<&'a str>,
    pub accept_language: Option<&'a str>,
    pub referer: Option<&'a str>,
}

impl<'a> LocaleRequest<'a> {
    pub fn from_parts(path: &'a str, headers: &'a HeaderMap) -> Self {
        Self {
            path,
            cookie: cookie_value(headers, LOCALE_COOKIE),
            accept_language: header_str(headers, ACCEPT_LANGUAGE.as_str()),
            referer: header_str(headers, REFERER.as_str()),
        }
    }
}

/// What to do with a request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LocaleDecision {
    /// Not a page request; leave it alone.
    Skip,
    /// Send the visitor to `/<locale>`.
    Redirect(Locale),
    /// Serve the request, optionally persisting a locale cookie.
    PassThrough { cookie: Option<Locale> },
}

/// Decide how to handle a request. Never fails: anything unreadable degrades
/// to the fallback locale or to "no cookie".
pub fn resolve(negotiator: &LanguageNegotiator, request: &LocaleRequest<'_>) -> LocaleDecision {
    if excluded_paths().is_match(request.path) {
        return LocaleDecision::Skip;
    }

    // An empty first segment ("/") is treated like an unsupported one.
    let top_level = request.path.split('/').nth(1).unwrap_or("");

    if negotiator.exact(top_level).is_none() {
        return LocaleDecision::Redirect(preferred_locale(negotiator, request));
    }

    LocaleDecision::PassThrough {
        cookie: request
            .referer
            .and_then(|referer| referer_locale(negotiator, referer)),
    }
}

/// A present cookie always decides, even when it names an unsupported locale.
/// Only without a cookie is `Accept-Language` consulted.
fn preferred_locale(negotiator: &LanguageNegotiator, request: &LocaleRequest<'_>) -> Locale {
    let candidate = match request.cookie {
        Some(value) => negotiator.negotiate(value),
        None => request
            .accept_language
            .and_then(|header| negotiator.negotiate(header)),
    };
    candidate.unwrap_or_else(|| negotiator.fallback())
}

/// First supported locale whose code prefixes the referer's path.
fn referer_locale(negotiator: &LanguageNegotiator, referer: &str) -> Option<Locale> {
    let url = match Url::parse(referer) {
        Ok(url) => url,
        Err(e) => {
            debug!("Ignoring unparsable referer '{}': {}", referer, e);
            return None;
        }
    };

    negotiator
        .supported()
        .iter()
        .copied()
        .find(|locale| url.path().starts_with(&format!("/{}", locale.code())))
}

fn header_str<'a>(headers: &'a HeaderMap, name: &str) -> Option<&'a str> {
    headers.get(name).and_then(|v| v.to_str().ok())
}

/// Value of cookie `name` from the request's `Cookie` header(s).
pub fn cookie_value<'a>(headers: &'a HeaderMap, name: &str) -> Option<&'a str> {
    headers
        .get_all(COOKIE)
        .iter()
        .filter_map(|v| v.to_str().ok())
        .flat_map(|header| header.split(';'))
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(key, _)| key.trim() == name)
        .map(|(_, value)| value.trim())
}

/// `Set-Cookie` value with the site's fixed attributes: path `/`, secure,
/// strict same-site, one year.
pub fn persistent_cookie(name: &str, value: &str) -> String {
    let expires = Utc::now() + Duration::days(COOKIE_MAX_AGE_DAYS);
    format!(
        "{}={}; Path=/; Max-Age={}; Expires={}; Secure; SameSite=Strict",
        name,
        value,
        COOKIE_MAX_AGE_DAYS * 24 * 60 * 60,
        expires.format("%a, %d %b %Y %H:%M:%S GMT")
    )
}

/// axum middleware applying [`resolve`] to every request.
pub async fn locale_middleware(
    State(state): State<SharedState>,
    request: Request,
    next: Next,
) -> Response {
    let decision = resolve(
        &state.negotiator,
        &LocaleRequest::from_parts(request.uri().path(), request.headers()),
    );

    match decision {
        LocaleDecision::Skip | LocaleDecision::PassThrough { cookie: None } => {
            next.run(request).await
        }
        LocaleDecision::Redirect(locale) => {
            debug!("Redirecting {} to /{}", request.uri().path(), locale);
            Redirect::temporary(&format!("/{}", locale.code())).into_response()
        }
        LocaleDecision::PassThrough {
            cookie: Some(locale),
        } => {
            let mut response = next.run(request).await;
            match HeaderValue::from_str(&persistent_cookie(LOCALE_COOKIE, locale.code())) {
                Ok(value) => {
                    response.headers_mut().append(SET_COOKIE, value);
                }
                Err(e) => warn!("Could not build locale cookie: {}", e),
            }
            response
        }
    }
}
