use axum::http::StatusCode;
use maud::{html, Markup, DOCTYPE};

/// Standalone error document. Rendered without the layout so it works even
/// when the content API is down.
pub fn error_page(status: StatusCode) -> Markup {
    let reason = status.canonical_reason().unwrap_or("Error");

    html! {
        (DOCTYPE)
        html lang="en" {
            head {
                meta charset="UTF-8";
                meta name="viewport" content="width=device-width, initial-scale=1.0";
                meta name="robots" content="noindex";
                title { (status.as_u16()) " " (reason) }
                link rel="stylesheet" href="/static/site.css";
            }
            body {
                div.error_wrapper {
                    img.error_image src="/img/error_monster.svg" alt="Error Monster" width="500" height="500";
                    h1 { (status.as_u16()) }
                    p { (reason) }
                    a href="/" { "Home" }
                }
            }
        }
    }
}
