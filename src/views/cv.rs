use crate::cms::models::{Cv, CvEntry};
use crate::i18n::Translations;
use crate::views::components::{breadcrumbs, icon, icon_with_hover, AriaRole, Crumb, IconType};
use crate::views::layout::{self, LayoutContext, PageMeta};
use chrono::NaiveDate;
use maud::{html, Markup};

pub fn cv(ctx: &LayoutContext<'_>, cv: &Cv) -> Markup {
    let t = ctx.t("cv");
    let common = ctx.t("common");
    let title = cv.title.clone().unwrap_or_else(|| t.t("placeholderTitle"));
    let introduction = cv
        .introduction
        .clone()
        .unwrap_or_else(|| t.t("placeholderIntro"));

    let meta = PageMeta::site(&common, "/cv").with_title(format!(
        "{} {} {}",
        common.t("meta-common-page-title-prefix"),
        title,
        common.t("meta-common-page-title-suffix")
    ));

    let content = html! {
        div.page_wrapper {
            (breadcrumbs(
                &[Crumb::home("home", format!("/{}", ctx.locale.code()))],
                Some(&Crumb::current(title.as_str())),
            ))
            h1 { (title) }
            p { (introduction) }
            div.cv_list {
                @for entry in &cv.cv {
                    (cv_entry(entry, &t))
                }
            }
        }
    };

    layout::page(ctx, &meta, content)
}

fn cv_entry(entry: &CvEntry, t: &Translations<'_>) -> Markup {
    let to = entry
        .to
        .map(format_date)
        .unwrap_or_else(|| t.t("current"));
    let from = entry.from.map(format_date).unwrap_or_default();

    html! {
        div.card {
            h2.cv_position {
                (entry.position.clone().unwrap_or_else(|| t.t("placeholderPosition")))
            }
            div.inline_flex {
                (icon(IconType::Work, AriaRole::Presentation, ""))
                div.cv_company {
                    (entry.company.clone().unwrap_or_else(|| t.t("placeholderCompany")))
                }
                @if let Some(url) = &entry.url {
                    a href=(url) target="_blank" rel="noreferrer" {
                        (icon_with_hover(IconType::External, AriaRole::Presentation, "", true))
                    }
                }
            }
            div.cv_location.inline_flex {
                (icon(IconType::Location, AriaRole::Presentation, ""))
                (entry.location.clone().unwrap_or_else(|| t.t("placeholderLocation")))
            }
            div.cv_range.inline_flex {
                (icon(IconType::Month, AriaRole::Presentation, ""))
                (from) " - " (to)
            }
            @if !entry.skills.is_empty() {
                div.cv_skills_wrapper {
                    @for skill in &entry.skills {
                        div.cv_list_item { (skill.title) }
                    }
                }
            }
        }
    }
}

/// `DD.MM.YYYY`
pub fn format_date(date: NaiveDate) -> String {
    date.format("%d.%m.%Y").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cms::models::Skill;
    use crate::i18n::{Locale, Translator};

    fn translator() -> Translator {
        let mut translator = Translator::empty();
        translator
            .add_bundle(
                Locale::fallback(),
                "cv",
                r#"{"placeholderTitle": "Lebenslauf", "placeholderIntro": "Mein Werdegang", "current": "heute"}"#,
            )
            .unwrap();
        translator
    }

    fn context(translator: &Translator) -> LayoutContext<'_> {
        LayoutContext {
            locale: Locale::fallback(),
            translator,
            site_base_url: "https://example.org",
            contact_email: None,
            socials: &[],
            legal: None,
            consent: None,
        }
    }

    #[test]
    fn test_format_date() {
        assert_eq!(format_date(NaiveDate::from_ymd_opt(2021, 3, 7).unwrap()), "07.03.2021");
    }

    #[test]
    fn test_placeholders_without_title() {
        let translator = translator();
        let html = cv(&context(&translator), &Cv::default()).into_string();

        assert!(html.contains("<h1>Lebenslauf</h1>"));
        assert!(html.contains("<p>Mein Werdegang</p>"));
    }

    #[test]
    fn test_entry_with_open_end() {
        let translator = translator();
        let data = Cv {
            title: Some("CV".to_string()),
            introduction: None,
            cv: vec![CvEntry {
                id: 1,
                position: Some("Engineer".to_string()),
                company: Some("ACME".to_string()),
                url: Some("https://acme.example".to_string()),
                location: Some("Vienna".to_string()),
                from: NaiveDate::from_ymd_opt(2020, 1, 15),
                to: None,
                skills: vec![Skill {
                    id: 1,
                    title: "Rust".to_string(),
                }],
            }],
        };

        let html = cv(&context(&translator), &data).into_string();

        assert!(html.contains(r#"<h2 class="cv_position">Engineer</h2>"#));
        assert!(html.contains(r#"<div class="cv_company">ACME</div>"#));
        assert!(html.contains(r#"href="https://acme.example""#));
        assert!(html.contains("15.01.2020 - heute"));
        assert!(html.contains(r#"<div class="cv_list_item">Rust</div>"#));
    }

    #[test]
    fn test_entry_placeholders() {
        let translator = translator();
        let data = Cv {
            cv: vec![CvEntry {
                from: NaiveDate::from_ymd_opt(2019, 5, 1),
                to: NaiveDate::from_ymd_opt(2020, 6, 30),
                ..Default::default()
            }],
            ..Default::default()
        };

        let html = cv(&context(&translator), &data).into_string();

        assert!(html.contains("placeholderPosition"));
        assert!(html.contains("placeholderCompany"));
        assert!(html.contains("01.05.2019 - 30.06.2020"));
        assert!(!html.contains("cv_skills_wrapper"));
    }
}
