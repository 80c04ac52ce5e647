use serde::{Deserialize, Deserializer, Serialize};

/// Wire types of the Creators Pro backend (`/api/common/...`).
pub mod api {
    use super::*;

    #[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
    #[serde(rename_all = "snake_case")]
    pub enum SubscriptionState {
        Subscribed,
        NoSubscribed,
        Expired,
        /// Any value the backend adds later; treated like an active state.
        #[serde(other)]
        Unknown,
    }

    impl SubscriptionState {
        /// States that get the join/renew card on the dashboard.
        pub fn needs_upgrade(self) -> bool {
            matches!(self, Self::NoSubscribed | Self::Expired)
        }
    }

    /// `GET /api/common/profile/me/`
    #[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
    pub struct UserProfile {
        pub is_subscribed: SubscriptionState,
        pub rest_of_days: i64,
    }

    /// `GET /api/common/extra/main-settings/`
    ///
    /// Every field is optional on the wire; `null` strings read as empty.
    #[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
    pub struct MainSettings {
        #[serde(default)]
        pub id: Option<i64>,
        #[serde(default, deserialize_with = "null_as_empty")]
        pub admin: String,
        #[serde(default, deserialize_with = "null_as_empty")]
        pub card_number: String,
        #[serde(default, deserialize_with = "null_as_empty")]
        pub card_holder: String,
        #[serde(default, deserialize_with = "lenient_price")]
        pub main_subscription_price: Option<f64>,
    }

    fn null_as_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
    where
        D: Deserializer<'de>,
    {
        Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
    }

    #[derive(Deserialize)]
    #[serde(untagged)]
    enum NumberOrText {
        Number(f64),
        Text(String),
    }

    /// Accepts `150000`, `"150000.00"` or `null`; unreadable text is no price.
    fn lenient_price<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
    where
        D: Deserializer<'de>,
    {
        Ok(match Option::<NumberOrText>::deserialize(deserializer)? {
            Some(NumberOrText::Number(price)) => Some(price),
            Some(NumberOrText::Text(text)) => text.trim().parse().ok(),
            None => None,
        })
    }

    #[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
    pub struct FaqEntry {
        pub question: String,
        pub answer: String,
    }

    #[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
    pub struct Transaction {
        /// Decimal string, e.g. `"150000.00"`.
        pub amount: String,
        pub created_at: String,
    }

    /// `GET /api/common/profile/transaction-history/?page=N`
    #[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
    pub struct TransactionPage {
        pub count: u64,
        pub next: Option<String>,
        pub previous: Option<String>,
        pub results: Vec<Transaction>,
    }

    /// 400 body of `POST /api/common/profile/payment-check/`
    #[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
    pub struct ValidationErrors {
        #[serde(default)]
        pub non_field_errors: Vec<String>,
    }

    impl ValidationErrors {
        pub fn first(&self) -> Option<&str> {
            self.non_field_errors.first().map(String::as_str)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::api::*;

    #[test]
    fn profile_decodes_every_subscription_state() {
        for (raw, expected) in [
            ("subscribed", SubscriptionState::Subscribed),
            ("no_subscribed", SubscriptionState::NoSubscribed),
            ("expired", SubscriptionState::Expired),
            ("frozen", SubscriptionState::Unknown),
        ] {
            let json = format!(r#"{{"is_subscribed":"{}","rest_of_days":3}}"#, raw);
            let profile: UserProfile = serde_json::from_str(&json).unwrap();
            assert_eq!(profile.is_subscribed, expected);
            assert_eq!(profile.rest_of_days, 3);
        }
    }

    #[test]
    fn only_missing_or_expired_subscriptions_need_upgrade() {
        assert!(SubscriptionState::NoSubscribed.needs_upgrade());
        assert!(SubscriptionState::Expired.needs_upgrade());
        assert!(!SubscriptionState::Subscribed.needs_upgrade());
        assert!(!SubscriptionState::Unknown.needs_upgrade());
    }

    #[test]
    fn main_settings_tolerate_missing_fields() {
        let settings: MainSettings =
            serde_json::from_str(r#"{"admin":"creators_admin","main_subscription_price":150000}"#)
                .unwrap();
        assert_eq!(settings.admin, "creators_admin");
        assert_eq!(settings.main_subscription_price, Some(150000.0));
        assert!(settings.card_number.is_empty());
    }

    #[test]
    fn main_settings_read_null_strings_as_empty() {
        let settings: MainSettings = serde_json::from_str(
            r#"{"id":1,"admin":null,"card_number":"8600 1234","card_holder":null,
                "main_subscription_price":150000}"#,
        )
        .unwrap();
        assert!(settings.admin.is_empty());
        assert!(settings.card_holder.is_empty());
        assert_eq!(settings.card_number, "8600 1234");
        assert_eq!(settings.main_subscription_price, Some(150000.0));
    }

    #[test]
    fn main_settings_accept_decimal_string_price() {
        let settings: MainSettings = serde_json::from_str(
            r#"{"admin":"creators_admin","main_subscription_price":"150000.00"}"#,
        )
        .unwrap();
        assert_eq!(settings.admin, "creators_admin");
        assert_eq!(settings.main_subscription_price, Some(150000.0));

        let unreadable: MainSettings =
            serde_json::from_str(r#"{"admin":"a","main_subscription_price":"soon"}"#).unwrap();
        assert_eq!(unreadable.main_subscription_price, None);
        assert_eq!(unreadable.admin, "a");

        let null_price: MainSettings =
            serde_json::from_str(r#"{"main_subscription_price":null}"#).unwrap();
        assert_eq!(null_price.main_subscription_price, None);
    }

    #[test]
    fn validation_errors_expose_first_entry() {
        let body: ValidationErrors =
            serde_json::from_str(r#"{"non_field_errors":["Chek allaqachon yuborilgan","x"]}"#)
                .unwrap();
        assert_eq!(body.first(), Some("Chek allaqachon yuborilgan"));

        let empty: ValidationErrors = serde_json::from_str(r#"{"payment_check":["bad"]}"#).unwrap();
        assert_eq!(empty.first(), None);
    }

    #[test]
    fn transaction_page_decodes_paginated_envelope() {
        let page: TransactionPage = serde_json::from_str(
            r#"{"count":12,"next":"https://x/?page=2","previous":null,
                "results":[{"amount":"150000.00","created_at":"2025-01-05T10:00:00Z"}]}"#,
        )
        .unwrap();
        assert_eq!(page.count, 12);
        assert_eq!(page.previous, None);
        assert_eq!(page.results[0].amount, "150000.00");
    }
}
