//! HTTP surface: shared state, router and page handlers.

use crate::cms::models::{Legal, Social};
use crate::cms::CmsClient;
use crate::config::Config;
use crate::consent::{ConsentForm, ConsentState};
use crate::error::AppError;
use crate::i18n::{LanguageNegotiator, Locale, Translator};
use crate::middleware::{cookie_value, locale_middleware, persistent_cookie};
use crate::seo;
use crate::views::{self, LayoutContext};
use anyhow::Result;
use axum::extract::{Path, State};
use axum::http::header::{CONTENT_TYPE, REFERER, SET_COOKIE};
use axum::http::{HeaderMap, HeaderValue};
use axum::response::{IntoResponse, Redirect, Response};
use axum::routing::{get, post};
use axum::{middleware, Form, Router};
use chrono::Utc;
use maud::Markup;
use std::path::PathBuf;
use std::sync::Arc;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;
use tracing::{debug, info, warn};
use url::Url;

/// Immutable application state, built once at start-up.
pub struct AppState {
    pub config: Config,
    pub cms: CmsClient,
    pub translator: Translator,
    pub negotiator: LanguageNegotiator,
}

pub type SharedState = Arc<AppState>;

impl AppState {
    pub fn new(config: Config, translator: Translator) -> Result<Self> {
        let cms = CmsClient::new(&config)?;
        Ok(Self {
            config,
            cms,
            translator,
            negotiator: LanguageNegotiator::from_registry(),
        })
    }

    fn locale(&self, lng: &str) -> Result<Locale, AppError> {
        self.negotiator.exact(lng).ok_or(AppError::NotFound)
    }
}

pub fn router(state: SharedState) -> Router {
    let static_dir = PathBuf::from(&state.config.static_dir);

    Router::new()
        .route("/health", get(health))
        .route("/robots.txt", get(robots))
        .route("/sitemap.xml", get(sitemap))
        .route("/:lng", get(home))
        .route("/:lng/", get(home))
        .route("/:lng/page/:route", get(page))
        .route("/:lng/blogs", get(blogs_first))
        .route("/:lng/blogs/:idx", get(blogs))
        .route("/:lng/blog/:id", get(blog))
        .route("/:lng/cv", get(cv))
        .route("/:lng/legal/consent", post(consent))
        .nest_service("/static", ServeDir::new(&static_dir))
        .nest_service("/img", ServeDir::new(static_dir.join("img")))
        .nest_service("/icons", ServeDir::new(static_dir.join("icons")))
        .nest_service("/favicon", ServeDir::new(static_dir.join("favicon")))
        .fallback(not_found)
        .layer(middleware::from_fn_with_state(state.clone(), locale_middleware))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

// ============================================================================
// Layout data
// ============================================================================

/// Data every page needs for its header, footer and consent banner.
struct Shell {
    locale: Locale,
    socials: Vec<Social>,
    legal: Option<Legal>,
    consent: Option<ConsentState>,
}

impl Shell {
    /// Socials and legal text are decoration: failures are logged, not fatal.
    async fn load(state: &AppState, locale: Locale, headers: &HeaderMap) -> Self {
        let (socials, legal) = futures::join!(state.cms.socials(), state.cms.legal(locale));

        let socials = socials.unwrap_or_else(|e| {
            warn!("Could not load socials: {}", e);
            Vec::new()
        });
        let legal = legal
            .map_err(|e| warn!("Could not load legal text: {}", e))
            .ok();
        let consent = legal
            .as_ref()
            .and_then(|l| cookie_value(headers, &l.cookie))
            .map(ConsentState::from_cookie);

        Self {
            locale,
            socials,
            legal,
            consent,
        }
    }

    fn context<'a>(&'a self, state: &'a AppState) -> LayoutContext<'a> {
        LayoutContext {
            locale: self.locale,
            translator: &state.translator,
            site_base_url: &state.config.site_base_url,
            contact_email: state.config.contact_email.as_deref(),
            socials: &self.socials,
            legal: self.legal.as_ref(),
            consent: self.consent.as_ref(),
        }
    }
}

// ============================================================================
// Pages
// ============================================================================

async fn home(
    State(state): State<SharedState>,
    Path(lng): Path<String>,
    headers: HeaderMap,
) -> Result<Markup, AppError> {
    let locale = state.locale(&lng)?;
    let (shell, landing) = futures::join!(
        Shell::load(&state, locale, &headers),
        state.cms.landing_page(locale)
    );

    Ok(views::home(&shell.context(&state), &landing?))
}

async fn page(
    State(state): State<SharedState>,
    Path((lng, route)): Path<(String, String)>,
    headers: HeaderMap,
) -> Result<Markup, AppError> {
    let locale = state.locale(&lng)?;
    let (shell, page) = futures::join!(
        Shell::load(&state, locale, &headers),
        state.cms.page(locale, &route)
    );

    // A missing or broken page still renders, just without content.
    let page = page
        .map_err(|e| warn!("Could not load page '{}': {}", route, e))
        .ok();

    Ok(views::page(&shell.context(&state), &route, page.as_ref()))
}

async fn blogs_first(
    state: State<SharedState>,
    Path(lng): Path<String>,
    headers: HeaderMap,
) -> Result<Response, AppError> {
    render_blogs(state, lng, 1, headers).await
}

async fn blogs(
    state: State<SharedState>,
    Path((lng, idx)): Path<(String, String)>,
    headers: HeaderMap,
) -> Result<Response, AppError> {
    let idx = idx
        .parse::<u32>()
        .ok()
        .filter(|n| *n >= 1)
        .ok_or(AppError::NotFound)?;
    render_blogs(state, lng, idx, headers).await
}

async fn render_blogs(
    State(state): State<SharedState>,
    lng: String,
    idx: u32,
    headers: HeaderMap,
) -> Result<Response, AppError> {
    let locale = state.locale(&lng)?;
    let (shell, listing) = futures::join!(
        Shell::load(&state, locale, &headers),
        state.cms.blogs(locale, idx, state.config.blog_page_size)
    );
    let listing = listing?;

    if listing.blogs.is_empty() && idx > 1 {
        debug!("Blog page {} is empty, redirecting to the first page", idx);
        return Ok(Redirect::temporary(&format!("/{}/blogs", locale.code())).into_response());
    }

    Ok(views::blogs(&shell.context(&state), &listing.blogs, &listing.pagination).into_response())
}

async fn blog(
    State(state): State<SharedState>,
    Path((lng, id)): Path<(String, String)>,
    headers: HeaderMap,
) -> Result<Markup, AppError> {
    let locale = state.locale(&lng)?;
    let id: u64 = id.parse().map_err(|_| AppError::NotFound)?;
    let (shell, entry) = futures::join!(Shell::load(&state, locale, &headers), state.cms.blog(id));

    Ok(views::blog(&shell.context(&state), id, &entry?))
}

async fn cv(
    State(state): State<SharedState>,
    Path(lng): Path<String>,
    headers: HeaderMap,
) -> Result<Markup, AppError> {
    let locale = state.locale(&lng)?;
    let (shell, cv) = futures::join!(Shell::load(&state, locale, &headers), state.cms.cv(locale));

    Ok(views::cv(&shell.context(&state), &cv?))
}

/// Store the submitted consent choices and send the visitor back.
async fn consent(
    State(state): State<SharedState>,
    Path(lng): Path<String>,
    headers: HeaderMap,
    Form(pairs): Form<Vec<(String, String)>>,
) -> Result<Response, AppError> {
    let locale = state.locale(&lng)?;
    let legal = state.cms.legal(locale).await?;

    let mut consent = cookie_value(&headers, &legal.cookie)
        .map(ConsentState::from_cookie)
        .unwrap_or_default();
    let form = ConsentForm::from_pairs(&pairs);
    consent.apply(&form, &legal.groups);
    debug!("Consent updated with action '{}'", form.action.as_str());

    let target = headers
        .get(REFERER)
        .and_then(|v| v.to_str().ok())
        .and_then(local_path)
        .unwrap_or_else(|| format!("/{}", locale.code()));

    let mut response = Redirect::to(&target).into_response();
    match HeaderValue::from_str(&persistent_cookie(&legal.cookie, &consent.to_cookie_value())) {
        Ok(value) => {
            response.headers_mut().append(SET_COOKIE, value);
        }
        Err(e) => warn!("Could not build consent cookie: {}", e),
    }
    Ok(response)
}

/// Path and query of a referer, so redirects never leave the site.
fn local_path(referer: &str) -> Option<String> {
    let url = Url::parse(referer).ok()?;
    Some(match url.query() {
        Some(query) => format!("{}?{}", url.path(), query),
        None => url.path().to_string(),
    })
}

// ============================================================================
// Crawlers and probes
// ============================================================================

async fn health() -> &'static str {
    "OK"
}

async fn robots(State(state): State<SharedState>) -> impl IntoResponse {
    (
        [(CONTENT_TYPE, "text/plain; charset=utf-8")],
        seo::robots_txt(&state.config.site_base_url),
    )
}

async fn sitemap(State(state): State<SharedState>) -> impl IntoResponse {
    (
        [(CONTENT_TYPE, "application/xml")],
        seo::sitemap_xml(&state.config.site_base_url, Utc::now().date_naive()),
    )
}

async fn not_found() -> AppError {
    AppError::NotFound
}

/// Bind and serve until the process is stopped.
pub async fn serve(state: SharedState) -> Result<()> {
    let addr = format!("0.0.0.0:{}", state.config.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!("✓ Listening on http://{}", addr);

    axum::serve(listener, router(state)).await?;
    Ok(())
}
