#[cfg(not(debug_assertions))]
const PRODUCTION_WEBHOOK: &str =
    "https://n8n.idontcareaboutname.ru/webhook/ae7e6e72-80f7-447b-b37a-cf9da952789f";

#[cfg(debug_assertions)]
const TEST_WEBHOOK: &str =
    "https://n8n.idontcareaboutname.ru/webhook-test/ae7e6e72-80f7-447b-b37a-cf9da952789f";

pub const FALLBACK_PHONE: &str = "+7 (900) 696-30-25";

pub const METRIKA_COUNTER_ID: u32 = 87509078;

#[cfg(debug_assertions)]
pub fn get_webhook_url() -> &'static str {
    option_env!("LEAD_WEBHOOK_URL").unwrap_or(TEST_WEBHOOK)
}

#[cfg(not(debug_assertions))]
pub fn get_webhook_url() -> &'static str {
    option_env!("LEAD_WEBHOOK_URL").unwrap_or(PRODUCTION_WEBHOOK)
}

#[derive(Clone, Debug, PartialEq)]
pub struct SiteConfig {
    pub webhook_url: String,
    pub fallback_phone: String,
    pub metrika_counter_id: Option<u32>,
}

impl SiteConfig {
    pub fn from_build() -> Self {
        Self {
            webhook_url: get_webhook_url().to_string(),
            fallback_phone: FALLBACK_PHONE.to_string(),
            metrika_counter_id: Some(METRIKA_COUNTER_ID),
        }
    }

    pub fn call_us_message(&self) -> String {
        format!("Пожалуйста, позвоните нам: {}", self.fallback_phone)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn call_us_message_carries_fallback_phone() {
        let config = SiteConfig::from_build();
        assert_eq!(
            config.call_us_message(),
            "Пожалуйста, позвоните нам: +7 (900) 696-30-25"
        );
    }

    #[test]
    fn debug_build_targets_a_webhook() {
        let config = SiteConfig::from_build();
        assert!(!config.webhook_url.is_empty());
        assert_eq!(config.metrika_counter_id, Some(METRIKA_COUNTER_ID));
    }
}
