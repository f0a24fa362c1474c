use chrono::{DateTime, SecondsFormat, Utc};
use serde::Serialize;

use crate::pricing::QuoteSnapshot;

pub const EMAIL_MISSING: &str = "Не указан";
pub const SERVICE_MISSING: &str = "Не выбрана";
pub const MESSAGE_MISSING: &str = "Нет сообщения";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ServiceKind {
    Matte,
    Glossy,
    Satin,
    Printed,
    Repair,
}

impl ServiceKind {
    pub const ALL: [ServiceKind; 5] = [
        ServiceKind::Matte,
        ServiceKind::Glossy,
        ServiceKind::Satin,
        ServiceKind::Printed,
        ServiceKind::Repair,
    ];

    pub fn value(self) -> &'static str {
        match self {
            ServiceKind::Matte => "matte",
            ServiceKind::Glossy => "glossy",
            ServiceKind::Satin => "satin",
            ServiceKind::Printed => "printed",
            ServiceKind::Repair => "repair",
        }
    }

    pub fn display_name(self) -> &'static str {
        match self {
            ServiceKind::Matte => "Матовые потолки",
            ServiceKind::Glossy => "Глянцевые потолки",
            ServiceKind::Satin => "Сатиновые потолки",
            ServiceKind::Printed => "Потолки с печатью",
            ServiceKind::Repair => "Ремонт потолков",
        }
    }

    pub fn from_value(value: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|s| s.value() == value)
    }
}

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(tag = "form_type", rename_all = "lowercase")]
pub enum LeadForm {
    Modal {
        title: String,
        name: String,
        phone: String,
    },
    Contact {
        name: String,
        phone: String,
        email: String,
        service: String,
        message: String,
    },
}

impl LeadForm {
    pub fn form_type(&self) -> &'static str {
        match self {
            LeadForm::Modal { .. } => "modal",
            LeadForm::Contact { .. } => "contact",
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct LeadSubmission {
    #[serde(flatten)]
    pub form: LeadForm,
    pub timestamp: String,
    pub page_url: String,
    #[serde(flatten)]
    pub quote: Option<QuoteSnapshot>,
}

impl LeadSubmission {
    pub fn new(form: LeadForm, quote: Option<QuoteSnapshot>, page_url: String) -> Self {
        Self::at(form, quote, page_url, Utc::now())
    }

    pub fn at(
        form: LeadForm,
        quote: Option<QuoteSnapshot>,
        page_url: String,
        now: DateTime<Utc>,
    ) -> Self {
        Self {
            form,
            timestamp: now.to_rfc3339_opts(SecondsFormat::Millis, true),
            page_url,
            quote,
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct ModalFields {
    pub name: String,
    pub phone: String,
}

impl ModalFields {
    pub fn to_form(&self, title: &str) -> LeadForm {
        LeadForm::Modal {
            title: title.to_string(),
            name: self.name.clone(),
            phone: self.phone.clone(),
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct ContactFields {
    pub name: String,
    pub phone: String,
    pub email: String,
    pub service: String,
    pub message: String,
}

impl ContactFields {
    pub fn to_form(&self) -> LeadForm {
        LeadForm::Contact {
            name: self.name.clone(),
            phone: self.phone.clone(),
            email: or_placeholder(&self.email, EMAIL_MISSING),
            service: ServiceKind::from_value(self.service.trim())
                .map(ServiceKind::display_name)
                .unwrap_or(SERVICE_MISSING)
                .to_string(),
            message: or_placeholder(&self.message, MESSAGE_MISSING),
        }
    }
}

fn or_placeholder(value: &str, placeholder: &str) -> String {
    if value.trim().is_empty() {
        placeholder.to_string()
    } else {
        value.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use serde_json::json;

    fn noon() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 5, 14, 12, 0, 0).unwrap()
    }

    #[test]
    fn modal_lead_is_flat_json() {
        let fields = ModalFields {
            name: "Анна".to_string(),
            phone: "+7 (999) 123-45-67".to_string(),
        };
        let lead = LeadSubmission::at(
            fields.to_form("Заказать звонок"),
            None,
            "https://example.ru/".to_string(),
            noon(),
        );
        assert_eq!(
            serde_json::to_value(&lead).unwrap(),
            json!({
                "form_type": "modal",
                "title": "Заказать звонок",
                "name": "Анна",
                "phone": "+7 (999) 123-45-67",
                "timestamp": "2024-05-14T12:00:00.000Z",
                "page_url": "https://example.ru/",
            })
        );
    }

    #[test]
    fn quote_snapshot_is_flattened_into_lead() {
        let snapshot = QuoteSnapshot {
            area: "20".to_string(),
            ceiling_type: "Матовый".to_string(),
            total: "9\u{a0}000 ₽".to_string(),
        };
        let lead = LeadSubmission::at(
            ModalFields::default().to_form("Заказать точный расчет"),
            Some(snapshot),
            String::new(),
            noon(),
        );
        let value = serde_json::to_value(&lead).unwrap();
        assert_eq!(value["calculator_area"], "20");
        assert_eq!(value["calculator_type"], "Матовый");
        assert_eq!(value["calculator_total"], "9\u{a0}000 ₽");
        assert_eq!(value["form_type"], "modal");
    }

    #[test]
    fn contact_lead_uses_placeholders_for_missing_fields() {
        let fields = ContactFields {
            name: "Олег".to_string(),
            phone: "+7 (900) 000-00-00".to_string(),
            email: "  ".to_string(),
            ..Default::default()
        };
        let value = serde_json::to_value(LeadSubmission::at(
            fields.to_form(),
            None,
            String::new(),
            noon(),
        ))
        .unwrap();
        assert_eq!(value["form_type"], "contact");
        assert_eq!(value["email"], EMAIL_MISSING);
        assert_eq!(value["service"], SERVICE_MISSING);
        assert_eq!(value["message"], MESSAGE_MISSING);
        assert!(value.get("calculator_total").is_none());
        assert!(value.get("title").is_none());
    }

    #[test]
    fn contact_lead_names_the_service() {
        let fields = ContactFields {
            service: "repair".to_string(),
            email: "o@example.ru".to_string(),
            message: "Протечка".to_string(),
            ..Default::default()
        };
        match fields.to_form() {
            LeadForm::Contact { service, email, message, .. } => {
                assert_eq!(service, "Ремонт потолков");
                assert_eq!(email, "o@example.ru");
                assert_eq!(message, "Протечка");
            }
            other => panic!("unexpected form {:?}", other),
        }
    }

    #[test]
    fn unknown_service_counts_as_not_chosen() {
        let fields = ContactFields {
            service: "walls".to_string(),
            ..Default::default()
        };
        assert!(matches!(
            fields.to_form(),
            LeadForm::Contact { service, .. } if service == SERVICE_MISSING
        ));
    }
}
