use axum::{
    extract::{multipart::MultipartError, Multipart, Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use serde::Deserialize;
use tracing::{info, warn};
use uuid::Uuid;

use crate::backend_client::Receipt;
use crate::page::Page;
use crate::session::{Session, UploadMessage};
use crate::views;
use crate::AppState;

pub const SESSION_COOKIE: &str = "creators_session";
const RECEIPT_FIELD: &str = "payment_check";
const MSG_RECEIPT_UNREADABLE: &str = "Faylni o'qib bo'lmadi";

#[derive(Debug, Default, Deserialize)]
pub struct KeyParams {
    pub x_api_key: Option<String>,
}

impl KeyParams {
    /// An empty `x_api_key=` counts as no key at all.
    pub fn api_key(&self) -> Option<&str> {
        self.x_api_key.as_deref().filter(|key| !key.is_empty())
    }
}

#[derive(Debug, Deserialize)]
pub struct HistoryParams {
    pub x_api_key: Option<String>,
    pub page: Option<String>,
}

impl HistoryParams {
    /// Missing or unreadable page numbers fall back to the first page.
    pub fn page(&self) -> u32 {
        self.page
            .as_deref()
            .and_then(|page| page.trim().parse().ok())
            .unwrap_or(1)
    }
}

fn session_id(jar: &CookieJar) -> Option<Uuid> {
    jar.get(SESSION_COOKIE)
        .and_then(|cookie| Uuid::parse_str(cookie.value()).ok())
}

fn session_cookie(id: Uuid) -> Cookie<'static> {
    Cookie::build((SESSION_COOKIE, id.to_string()))
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .build()
}

/// Picks up the visitor's session, mounting a fresh one when it expired.
async fn checkout(state: &AppState, jar: &CookieJar, api_key: Option<&str>) -> (Uuid, Session) {
    if let Some(id) = session_id(jar) {
        if let Some(session) = state.sessions.get(id).await {
            return (id, session);
        }
    }

    let id = state.sessions.open().await;
    let mut session = Session::default();
    session.mount(api_key, state.backend.as_ref()).await;
    (id, session)
}

async fn finish(
    state: &AppState,
    jar: CookieJar,
    id: Uuid,
    session: Session,
    api_key: Option<&str>,
) -> Response {
    let page = views::render(&session, api_key);
    state.sessions.commit(id, session).await;
    (jar.add(session_cookie(id)), page).into_response()
}

/// GET / - opens the app; any earlier session of this browser is torn down
pub async fn mount(
    State(state): State<AppState>,
    jar: CookieJar,
    Query(params): Query<KeyParams>,
) -> Response {
    let api_key = params.api_key();

    if let Some(previous) = session_id(&jar) {
        state.sessions.remove(previous).await;
    }

    let id = state.sessions.open().await;
    info!("Mounting session {} (api key present: {})", id, api_key.is_some());

    let mut session = Session::default();
    session.mount(api_key, state.backend.as_ref()).await;
    finish(&state, jar, id, session, api_key).await
}

/// GET /page/{page}
pub async fn navigate(
    State(state): State<AppState>,
    jar: CookieJar,
    Path(slug): Path<String>,
    Query(params): Query<KeyParams>,
) -> Response {
    let Ok(page) = slug.parse::<Page>() else {
        return (StatusCode::NOT_FOUND, "Not Found").into_response();
    };
    let api_key = params.api_key();

    let (id, mut session) = checkout(&state, &jar, api_key).await;
    session.navigate(page, api_key, state.backend.as_ref()).await;
    finish(&state, jar, id, session, api_key).await
}

/// GET /back
pub async fn back(
    State(state): State<AppState>,
    jar: CookieJar,
    Query(params): Query<KeyParams>,
) -> Response {
    let api_key = params.api_key();

    let (id, mut session) = checkout(&state, &jar, api_key).await;
    session.back();
    finish(&state, jar, id, session, api_key).await
}

/// GET /history?page=N
pub async fn history_page(
    State(state): State<AppState>,
    jar: CookieJar,
    Query(params): Query<HistoryParams>,
) -> Response {
    let api_key = params.x_api_key.as_deref().filter(|key| !key.is_empty());

    let (id, mut session) = checkout(&state, &jar, api_key).await;
    session
        .change_transaction_page(params.page(), api_key, state.backend.as_ref())
        .await;
    finish(&state, jar, id, session, api_key).await
}

async fn read_receipt(mut multipart: Multipart) -> Result<Option<Receipt>, MultipartError> {
    while let Some(field) = multipart.next_field().await? {
        if field.name() != Some(RECEIPT_FIELD) {
            continue;
        }

        let file_name = field.file_name().unwrap_or_default().to_string();
        let content_type = field
            .content_type()
            .unwrap_or("application/octet-stream")
            .to_string();
        let bytes = field.bytes().await?;

        // Browsers send an empty part when no file was picked
        if file_name.is_empty() || bytes.is_empty() {
            return Ok(None);
        }

        return Ok(Some(Receipt {
            file_name,
            content_type,
            bytes,
        }));
    }

    Ok(None)
}

/// POST /receipt - multipart `payment_check`; a new file replaces the
/// selected one, then the selected receipt is submitted.
pub async fn submit_receipt(
    State(state): State<AppState>,
    jar: CookieJar,
    Query(params): Query<KeyParams>,
    multipart: Multipart,
) -> Response {
    let api_key = params.api_key();

    let (id, mut session) = checkout(&state, &jar, api_key).await;
    session.page = Page::Subscription;

    match read_receipt(multipart).await {
        Ok(Some(receipt)) => session.select_receipt(receipt),
        Ok(None) => {}
        Err(e) => {
            warn!("Receipt upload could not be read: {}", e);
            session.upload_message = Some(UploadMessage(MSG_RECEIPT_UNREADABLE.to_string()));
            return finish(&state, jar, id, session, api_key).await;
        }
    }

    session.upload_receipt(api_key, state.backend.as_ref()).await;
    finish(&state, jar, id, session, api_key).await
}
