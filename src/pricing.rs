use serde::Serialize;
use thiserror::Error;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CeilingType {
    Matte,
    Glossy,
    Satin,
    Printed,
}

impl CeilingType {
    pub const ALL: [CeilingType; 4] = [
        CeilingType::Matte,
        CeilingType::Glossy,
        CeilingType::Satin,
        CeilingType::Printed,
    ];

    pub fn value(self) -> &'static str {
        match self {
            CeilingType::Matte => "matte",
            CeilingType::Glossy => "glossy",
            CeilingType::Satin => "satin",
            CeilingType::Printed => "printed",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            CeilingType::Matte => "Матовый",
            CeilingType::Glossy => "Глянцевый",
            CeilingType::Satin => "Сатиновый",
            CeilingType::Printed => "С фотопечатью",
        }
    }

    pub fn rate(self) -> f64 {
        match self {
            CeilingType::Matte => 450.0,
            CeilingType::Glossy => 500.0,
            CeilingType::Satin => 550.0,
            CeilingType::Printed => 1200.0,
        }
    }

    pub fn from_value(value: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|t| t.value() == value)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum LightingOption {
    #[default]
    None,
    LedStrip,
    Chandelier,
    Spotlights,
}

impl LightingOption {
    pub const ALL: [LightingOption; 4] = [
        LightingOption::None,
        LightingOption::LedStrip,
        LightingOption::Chandelier,
        LightingOption::Spotlights,
    ];

    pub fn value(self) -> &'static str {
        match self {
            LightingOption::None => "none",
            LightingOption::LedStrip => "led",
            LightingOption::Chandelier => "chandelier",
            LightingOption::Spotlights => "spotlights",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            LightingOption::None => "Без освещения",
            LightingOption::LedStrip => "LED-подсветка (2 500 ₽/м)",
            LightingOption::Chandelier => "Люстра (600 ₽/шт)",
            LightingOption::Spotlights => "Точечные светильники (550 ₽/шт)",
        }
    }

    pub fn unit_cost(self) -> f64 {
        match self {
            LightingOption::None => 0.0,
            LightingOption::LedStrip => 2500.0,
            LightingOption::Chandelier => 600.0,
            LightingOption::Spotlights => 550.0,
        }
    }

    pub fn is_fixture(self) -> bool {
        matches!(self, LightingOption::Chandelier | LightingOption::Spotlights)
    }

    pub fn from_value(value: &str) -> Self {
        Self::ALL
            .into_iter()
            .find(|o| o.value() == value)
            .unwrap_or_default()
    }
}

pub const COMPLEXITY_LEVELS: [(u32, &str); 3] = [
    (0, "Простой"),
    (15, "Средний (ниши, обходы труб)"),
    (30, "Многоуровневый"),
];

#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum QuoteError {
    #[error("Пожалуйста, укажите площадь помещения")]
    MissingArea,
    #[error("Пожалуйста, выберите тип потолка")]
    MissingCeilingType,
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct CalculatorFields {
    pub area: String,
    pub ceiling_type: String,
    pub complexity: String,
    pub lighting: String,
    pub quantity: String,
}

#[derive(Clone, Debug, PartialEq)]
pub struct PriceQuoteInput {
    pub area: f64,
    pub ceiling_type: CeilingType,
    pub complexity_percent: f64,
    pub lighting: LightingOption,
    pub quantity: u32,
}

impl CalculatorFields {
    pub fn parse(&self) -> Result<PriceQuoteInput, QuoteError> {
        let area = parse_decimal(&self.area)
            .filter(|a| *a > 0.0)
            .ok_or(QuoteError::MissingArea)?;
        let ceiling_type =
            CeilingType::from_value(self.ceiling_type.trim()).ok_or(QuoteError::MissingCeilingType)?;

        let complexity_percent = parse_decimal(&self.complexity)
            .filter(|c| *c > 0.0)
            .unwrap_or(0.0);
        let quantity = leading_integer(&self.quantity)
            .filter(|q| *q > 0)
            .unwrap_or(1);

        Ok(PriceQuoteInput {
            area,
            ceiling_type,
            complexity_percent,
            lighting: LightingOption::from_value(self.lighting.trim()),
            quantity,
        })
    }

    pub fn wants_quantity(&self) -> bool {
        LightingOption::from_value(self.lighting.trim()).is_fixture()
    }
}

// "4.0" and "3 шт" read as 4 and 3
fn leading_integer(raw: &str) -> Option<u32> {
    let raw = raw.trim();
    let end = raw
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(raw.len());
    raw[..end].parse::<u32>().ok()
}

fn parse_decimal(raw: &str) -> Option<f64> {
    raw.trim()
        .replace(',', ".")
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
}

#[derive(Clone, Debug, PartialEq)]
pub struct PriceQuote {
    pub total: u64,
    pub display_type: String,
}

impl PriceQuote {
    pub fn formatted_total(&self) -> String {
        format_rubles(self.total)
    }

    pub fn snapshot(&self, area: &str) -> QuoteSnapshot {
        QuoteSnapshot {
            area: area.trim().to_string(),
            ceiling_type: self.display_type.clone(),
            total: self.formatted_total(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct QuoteSnapshot {
    #[serde(rename = "calculator_area")]
    pub area: String,
    #[serde(rename = "calculator_type")]
    pub ceiling_type: String,
    #[serde(rename = "calculator_total")]
    pub total: String,
}

pub fn base_price(input: &PriceQuoteInput) -> f64 {
    let base = input.area * input.ceiling_type.rate();
    if input.complexity_percent > 0.0 {
        base * (1.0 + input.complexity_percent / 100.0)
    } else {
        base
    }
}

// LED strip runs along the perimeter: cost grows with sqrt(area)
pub fn lighting_cost(input: &PriceQuoteInput) -> f64 {
    match input.lighting {
        LightingOption::None => 0.0,
        LightingOption::LedStrip => input.lighting.unit_cost() * input.area.sqrt(),
        LightingOption::Chandelier | LightingOption::Spotlights => {
            input.lighting.unit_cost() * f64::from(input.quantity)
        }
    }
}

pub fn calculate(input: &PriceQuoteInput) -> PriceQuote {
    let total = (base_price(input) + lighting_cost(input)).round().max(0.0) as u64;
    PriceQuote {
        total,
        display_type: input.ceiling_type.label().to_string(),
    }
}

pub fn quote(fields: &CalculatorFields) -> Result<PriceQuote, QuoteError> {
    Ok(calculate(&fields.parse()?))
}

pub fn format_rubles(total: u64) -> String {
    let digits = total.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3 * 2 + 4);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push('\u{a0}');
        }
        grouped.push(ch);
    }
    format!("{} ₽", grouped)
}

#[derive(Clone, Debug, PartialEq, Default)]
pub enum ResultPanel {
    #[default]
    Empty,
    Invalid(QuoteError),
    Priced(String),
}

#[derive(Clone, Debug, PartialEq, Default)]
pub struct CalculatorView {
    pub display: Option<PriceQuote>,
    pub panel: ResultPanel,
}

impl CalculatorView {
    pub fn apply(&mut self, outcome: Result<PriceQuote, QuoteError>) {
        match outcome {
            Ok(quote) => {
                self.panel = ResultPanel::Priced(quote.formatted_total());
                self.display = Some(quote);
            }
            Err(err) => self.panel = ResultPanel::Invalid(err),
        }
    }
}
