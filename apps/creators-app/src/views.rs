// Views
// One template per page; all display strings are prepared here so the
// templates only branch and loop.

use askama::Template;
use askama_web::WebTemplate;
use axum::response::{IntoResponse, Response};
use creators_shared::api::{FaqEntry, MainSettings, SubscriptionState};

use crate::format::{format_amount, format_date, format_price};
use crate::page::Page;
use crate::pagination::PageLinks;
use crate::session::{ProfileState, Session};

const APP_TITLE: &str = "Creators Pro";

const BENEFITS: &[&str] = &[
    "Eng so'nggi va trentdagi soundlar",
    "Lightroom presetlar (2 ta)",
    "Pulli LUTlar (2 ta)",
    "Colorgrading bo'yicha videodarslik (1 ta)",
    "Ishni tezlashtiruvchi videodarsliklar (2 ta)",
    "Jonli efirlar (2 ta)",
    "Vakansiyalar",
    "Bir martalik ishlar",
    "Production jamoamizga qo'shilish imkoniyati",
];

/// Builds in-app links that carry the visitor's `x_api_key` forward.
pub struct Nav<'a> {
    api_key: Option<&'a str>,
}

impl<'a> Nav<'a> {
    pub fn new(api_key: Option<&'a str>) -> Self {
        Self { api_key }
    }

    fn with_key(&self, path: &str, query: Option<String>) -> String {
        let mut params: Vec<String> = query.into_iter().collect();
        if let Some(key) = self.api_key {
            params.push(format!("x_api_key={}", urlencoding::encode(key)));
        }
        if params.is_empty() {
            path.to_string()
        } else {
            format!("{}?{}", path, params.join("&"))
        }
    }

    pub fn page(&self, page: Page) -> String {
        self.with_key(&format!("/page/{}", page.slug()), None)
    }

    pub fn back(&self) -> String {
        self.with_key("/back", None)
    }

    pub fn history(&self, page: u32) -> String {
        self.with_key("/history", Some(format!("page={}", page)))
    }

    pub fn receipt(&self) -> String {
        self.with_key("/receipt", None)
    }
}

pub struct Header {
    pub title: &'static str,
    pub back_href: Option<String>,
}

impl Header {
    fn root(title: &'static str) -> Self {
        Self {
            title,
            back_href: None,
        }
    }

    fn with_back(title: &'static str, nav: &Nav<'_>) -> Self {
        Self {
            title,
            back_href: Some(nav.back()),
        }
    }
}

fn admin_url(settings: Option<&MainSettings>) -> Option<String> {
    settings
        .map(|s| s.admin.trim())
        .filter(|admin| !admin.is_empty())
        .map(|admin| format!("https://t.me/{}", admin.trim_start_matches('@')))
}

#[derive(Template, WebTemplate)]
#[template(path = "dashboard.html")]
pub struct DashboardView {
    pub header: Header,
    pub error: Option<&'static str>,
    pub loading: bool,
    pub balance_days: Option<i64>,
    pub upgrade_title: Option<&'static str>,
    pub subscription_href: String,
    pub history_href: String,
    pub faq_href: String,
    pub admin_url: Option<String>,
}

impl DashboardView {
    pub fn build(session: &Session, nav: &Nav<'_>) -> Self {
        let (error, loading, profile) = match &session.profile {
            ProfileState::Loading => (None, true, None),
            ProfileState::Ready(profile) => (None, false, Some(profile)),
            ProfileState::Failed(err) => (Some(err.message()), false, None),
        };

        Self {
            header: Header::root(APP_TITLE),
            error,
            loading,
            balance_days: profile
                .map(|p| p.rest_of_days)
                .filter(|days| *days != 0),
            upgrade_title: profile
                .filter(|p| p.is_subscribed.needs_upgrade())
                .map(|p| match p.is_subscribed {
                    SubscriptionState::Expired => "Obunani yangilaysizmi?",
                    _ => "Yopiq community qo'shilish",
                }),
            subscription_href: nav.page(Page::Subscription),
            history_href: nav.page(Page::PaymentHistory),
            faq_href: nav.page(Page::Faq),
            admin_url: admin_url(session.settings.as_ref()),
        }
    }
}

pub struct CardDetails {
    pub number: String,
    pub holder: String,
}

#[derive(Template, WebTemplate)]
#[template(path = "subscription.html")]
pub struct SubscriptionView {
    pub header: Header,
    pub price: String,
    pub benefits: Vec<&'static str>,
    pub card: Option<CardDetails>,
    pub receipt_name: Option<String>,
    pub upload_message: Option<String>,
    pub upload_ok: bool,
    pub upload_action: String,
}

impl SubscriptionView {
    pub fn build(session: &Session, nav: &Nav<'_>) -> Self {
        let price = session
            .settings
            .as_ref()
            .and_then(|s| s.main_subscription_price)
            .filter(|price| *price != 0.0)
            .map(format_price)
            .unwrap_or_else(|| "…".to_string());

        Self {
            header: Header::with_back(APP_TITLE, nav),
            price,
            benefits: BENEFITS.to_vec(),
            card: session.settings.as_ref().map(|s| CardDetails {
                number: s.card_number.clone(),
                holder: s.card_holder.clone(),
            }),
            receipt_name: session.receipt.as_ref().map(|r| r.file_name.clone()),
            upload_message: session.upload_message.as_ref().map(|m| m.0.clone()),
            upload_ok: session
                .upload_message
                .as_ref()
                .is_some_and(|m| m.is_success()),
            upload_action: nav.receipt(),
        }
    }
}

#[derive(Template, WebTemplate)]
#[template(path = "card_input.html")]
pub struct CardInputView {
    pub header: Header,
}

pub struct HistoryRow {
    pub date: String,
    pub amount: String,
}

pub struct PageLinkView {
    pub number: u32,
    pub href: String,
    pub active: bool,
}

pub struct PaginationView {
    pub prev_href: String,
    pub prev_disabled: bool,
    pub next_href: String,
    pub next_disabled: bool,
    pub links: Vec<PageLinkView>,
}

impl PaginationView {
    fn build(links: &PageLinks, nav: &Nav<'_>) -> Option<Self> {
        if !links.is_visible() {
            return None;
        }
        Some(Self {
            prev_href: nav.history(links.prev),
            prev_disabled: links.at_first(),
            next_href: nav.history(links.next),
            next_disabled: links.at_last(),
            links: links
                .pages
                .iter()
                .map(|&number| PageLinkView {
                    number,
                    href: nav.history(number),
                    active: number == links.current,
                })
                .collect(),
        })
    }
}

#[derive(Template, WebTemplate)]
#[template(path = "payment_history.html")]
pub struct PaymentHistoryView {
    pub header: Header,
    pub rows: Vec<HistoryRow>,
    pub pagination: Option<PaginationView>,
}

impl PaymentHistoryView {
    pub fn build(session: &Session, nav: &Nav<'_>) -> Self {
        let links = PageLinks::new(session.pagination_page, session.transaction_count);
        Self {
            header: Header::with_back("To'lovlar tarixi", nav),
            rows: session
                .transactions
                .iter()
                .map(|t| HistoryRow {
                    date: format_date(&t.created_at),
                    amount: format_amount(&t.amount),
                })
                .collect(),
            pagination: PaginationView::build(&links, nav),
        }
    }
}

#[derive(Template, WebTemplate)]
#[template(path = "faq.html")]
pub struct FaqView {
    pub header: Header,
    pub faqs: Vec<FaqEntry>,
    pub admin_url: Option<String>,
}

impl FaqView {
    pub fn build(session: &Session, nav: &Nav<'_>) -> Self {
        Self {
            header: Header::with_back("FAQ", nav),
            faqs: session.faqs.clone(),
            admin_url: admin_url(session.settings.as_ref()),
        }
    }
}

/// Renders whichever page the session is on.
pub fn render(session: &Session, api_key: Option<&str>) -> Response {
    let nav = Nav::new(api_key);
    match session.page {
        // No dedicated profile screen; it falls back to the dashboard.
        Page::Dashboard | Page::Profile => DashboardView::build(session, &nav).into_response(),
        Page::Subscription => SubscriptionView::build(session, &nav).into_response(),
        Page::CardInput => CardInputView {
            header: Header::with_back("Parallel Muhit", &nav),
        }
        .into_response(),
        Page::PaymentHistory => PaymentHistoryView::build(session, &nav).into_response(),
        Page::Faq => FaqView::build(session, &nav).into_response(),
    }
}
