// UI session: the per-visitor state behind every rendered page.
// Operations mutate a snapshot; `SessionStore` decides whether it is kept.

use creators_shared::api::{FaqEntry, MainSettings, Transaction, UserProfile};
use tracing::{debug, warn};

use crate::backend_client::{Backend, BackendError, Receipt, UploadStatus};
use crate::page::Page;

pub const MSG_NOT_REGISTERED: &str = "Siz hali ro'yhatdan o'tmagansiz";
pub const MSG_PROFILE_UNAVAILABLE: &str = "API xatolik";
pub const MSG_MISSING_KEY_OR_FILE: &str = "API kalit yoki fayl topilmadi";
pub const MSG_UPLOAD_SUCCESS: &str =
    "To'lov cheki muvaffaqiyatli yuborildi! Tekshirish uchun kutib turing.";
pub const MSG_UPLOAD_REJECTED: &str = "Xatolik yuz berdi";
pub const MSG_UPLOAD_SERVER_ERROR: &str = "Server xatoligi yuz berdi";
pub const MSG_UPLOAD_NETWORK_PREFIX: &str = "Tarmoq xatoligi";

const SUCCESS_MARKER: &str = "muvaffaqiyatli";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProfileError {
    /// No key in the URL, or the backend answered 401.
    NotRegistered,
    /// Any other failed status or a network error.
    Unavailable,
}

impl ProfileError {
    pub fn message(self) -> &'static str {
        match self {
            ProfileError::NotRegistered => MSG_NOT_REGISTERED,
            ProfileError::Unavailable => MSG_PROFILE_UNAVAILABLE,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub enum ProfileState {
    #[default]
    Loading,
    Ready(UserProfile),
    Failed(ProfileError),
}

#[derive(Debug, Clone, PartialEq)]
pub struct UploadMessage(pub String);

impl UploadMessage {
    pub fn is_success(&self) -> bool {
        self.0.contains(SUCCESS_MARKER)
    }
}

#[derive(Debug, Clone)]
pub struct Session {
    pub page: Page,
    pub pagination_page: u32,
    pub profile: ProfileState,
    pub settings: Option<MainSettings>,
    pub faqs: Vec<FaqEntry>,
    pub transactions: Vec<Transaction>,
    pub transaction_count: u64,
    pub receipt: Option<Receipt>,
    pub upload_message: Option<UploadMessage>,
}

impl Default for Session {
    fn default() -> Self {
        Self {
            page: Page::Dashboard,
            pagination_page: 1,
            profile: ProfileState::Loading,
            settings: None,
            faqs: Vec::new(),
            transactions: Vec::new(),
            transaction_count: 0,
            receipt: None,
            upload_message: None,
        }
    }
}

impl Session {
    /// First render: profile plus the settings the dashboard menu needs.
    pub async fn mount(&mut self, api_key: Option<&str>, backend: &dyn Backend) {
        self.page = Page::Dashboard;
        self.load_profile(api_key, backend).await;
        self.load_settings(backend).await;
    }

    pub async fn load_profile(&mut self, api_key: Option<&str>, backend: &dyn Backend) {
        let Some(api_key) = api_key else {
            self.profile = ProfileState::Failed(ProfileError::NotRegistered);
            return;
        };

        self.profile = match backend.profile(api_key).await {
            Ok(profile) => ProfileState::Ready(profile),
            Err(BackendError::Unauthorized) => ProfileState::Failed(ProfileError::NotRegistered),
            Err(e) => {
                warn!("Profile fetch failed: {}", e);
                ProfileState::Failed(ProfileError::Unavailable)
            }
        };
    }

    /// Best effort; a failure leaves the previous settings (or none) in place.
    pub async fn load_settings(&mut self, backend: &dyn Backend) {
        if self.settings.is_some() {
            return;
        }
        match backend.main_settings().await {
            Ok(settings) => self.settings = Some(settings),
            Err(e) => warn!("Main settings fetch failed: {}", e),
        }
    }

    pub async fn load_faqs(&mut self, backend: &dyn Backend) {
        match backend.faqs().await {
            Ok(faqs) => self.faqs = faqs,
            Err(e) => warn!("FAQ fetch failed: {}", e),
        }
    }

    pub async fn load_transactions(
        &mut self,
        api_key: Option<&str>,
        page: u32,
        backend: &dyn Backend,
    ) {
        let Some(api_key) = api_key else {
            return;
        };
        match backend.transaction_history(api_key, page).await {
            Ok(history) => {
                self.transactions = history.results;
                self.transaction_count = history.count;
            }
            Err(e) => warn!("Transaction history fetch failed (page {}): {}", page, e),
        }
    }

    pub async fn navigate(&mut self, page: Page, api_key: Option<&str>, backend: &dyn Backend) {
        debug!("Navigate {} -> {}", self.page, page);
        self.page = page;
        self.pagination_page = 1;

        match page {
            Page::Faq => {
                if self.faqs.is_empty() {
                    self.load_faqs(backend).await;
                }
                self.load_settings(backend).await;
            }
            Page::PaymentHistory => self.load_transactions(api_key, 1, backend).await,
            Page::Subscription => self.load_settings(backend).await,
            _ => {}
        }
    }

    pub fn back(&mut self) {
        self.page = self.page.back_target();
    }

    pub async fn change_transaction_page(
        &mut self,
        page: u32,
        api_key: Option<&str>,
        backend: &dyn Backend,
    ) {
        let page = page.max(1);
        self.page = Page::PaymentHistory;
        self.pagination_page = page;
        self.load_transactions(api_key, page, backend).await;
    }

    pub fn select_receipt(&mut self, receipt: Receipt) {
        self.receipt = Some(receipt);
    }

    pub async fn upload_receipt(&mut self, api_key: Option<&str>, backend: &dyn Backend) {
        let (Some(api_key), Some(receipt)) = (api_key, self.receipt.as_ref()) else {
            self.upload_message = Some(UploadMessage(MSG_MISSING_KEY_OR_FILE.to_string()));
            return;
        };

        self.upload_message = None;
        let message = match backend.upload_payment_check(api_key, receipt).await {
            Ok(UploadStatus::Accepted) => {
                self.receipt = None;
                MSG_UPLOAD_SUCCESS.to_string()
            }
            Ok(UploadStatus::Rejected { first_error }) => {
                first_error.unwrap_or_else(|| MSG_UPLOAD_REJECTED.to_string())
            }
            Ok(UploadStatus::ServerError(status)) => {
                warn!("Payment check upload failed with status {}", status);
                MSG_UPLOAD_SERVER_ERROR.to_string()
            }
            Err(e) => format!("{}: {}", MSG_UPLOAD_NETWORK_PREFIX, e),
        };
        self.upload_message = Some(UploadMessage(message));
    }
}
