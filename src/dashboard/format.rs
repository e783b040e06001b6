//! Display lookups and pt-BR date formatting for the dashboard.

use chrono::{Datelike, Duration, NaiveDate};

const DAYS_OF_WEEK: [&str; 7] = ["Dom", "Seg", "Ter", "Qua", "Qui", "Sex", "Sáb"];
const DAYS_OF_WEEK_FULL: [&str; 7] = [
    "Domingo",
    "Segunda-feira",
    "Terça-feira",
    "Quarta-feira",
    "Quinta-feira",
    "Sexta-feira",
    "Sábado",
];
const MONTHS: [&str; 12] = [
    "Jan", "Fev", "Mar", "Abr", "Mai", "Jun", "Jul", "Ago", "Set", "Out", "Nov", "Dez",
];
const MONTHS_FULL: [&str; 12] = [
    "Janeiro", "Fevereiro", "Março", "Abril", "Maio", "Junho", "Julho", "Agosto", "Setembro",
    "Outubro", "Novembro", "Dezembro",
];

/// Upper bounds (exclusive) for each UV band; anything above is "Extremo".
const UV_LEVELS: [(f64, &str); 4] = [
    (3.0, "Baixo"),
    (6.0, "Moderado"),
    (8.0, "Alto"),
    (11.0, "Muito Alto"),
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RiskColor {
    Green,
    Yellow,
    Red,
}

impl RiskColor {
    pub fn ansi(self) -> &'static str {
        match self {
            RiskColor::Green => "\x1b[32m",
            RiskColor::Yellow => "\x1b[33m",
            RiskColor::Red => "\x1b[31m",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SevereRiskLevel {
    pub label: &'static str,
    pub color: RiskColor,
}

pub const SEVERE_RISK_LOW: SevereRiskLevel = SevereRiskLevel {
    label: "Baixo",
    color: RiskColor::Green,
};
pub const SEVERE_RISK_MODERATE: SevereRiskLevel = SevereRiskLevel {
    label: "Moderado",
    color: RiskColor::Yellow,
};
pub const SEVERE_RISK_HIGH: SevereRiskLevel = SevereRiskLevel {
    label: "Alto",
    color: RiskColor::Red,
};

const SEVERE_RISK_LOW_THRESHOLD: f64 = 30.0;
const SEVERE_RISK_MODERATE_THRESHOLD: f64 = 60.0;

pub fn uv_level(uv: f64) -> &'static str {
    UV_LEVELS
        .iter()
        .find(|(max, _)| uv < *max)
        .map(|(_, label)| *label)
        .unwrap_or("Extremo")
}

pub fn moon_phase(phase: f64) -> &'static str {
    if phase == 0.0 {
        "Nova"
    } else if phase < 0.25 {
        "Crescente"
    } else if phase == 0.25 {
        "Quarto Crescente"
    } else if phase < 0.5 {
        "Crescente"
    } else if phase == 0.5 {
        "Cheia"
    } else if phase < 0.75 {
        "Minguante"
    } else if phase == 0.75 {
        "Quarto Minguante"
    } else {
        "Minguante"
    }
}

pub fn severe_risk_level(risk: f64) -> SevereRiskLevel {
    if risk < SEVERE_RISK_LOW_THRESHOLD {
        SEVERE_RISK_LOW
    } else if risk < SEVERE_RISK_MODERATE_THRESHOLD {
        SEVERE_RISK_MODERATE
    } else {
        SEVERE_RISK_HIGH
    }
}

pub fn severe_risk_message(risk: f64) -> &'static str {
    if risk < SEVERE_RISK_LOW_THRESHOLD {
        "Condições normais esperadas"
    } else if risk < SEVERE_RISK_MODERATE_THRESHOLD {
        "Atenção para possíveis tempestades"
    } else {
        "Alto risco de condições severas - mantenha-se atento"
    }
}

/// "14:00:00" -> "14:00"
pub fn format_time(time: &str) -> String {
    time.chars().take(5).collect()
}

/// "Seg, 5 Jan"
pub fn format_short_date(date: NaiveDate) -> String {
    format!(
        "{}, {} {}",
        DAYS_OF_WEEK[date.weekday().num_days_from_sunday() as usize],
        date.day(),
        MONTHS[date.month0() as usize]
    )
}

/// "Segunda-feira, 5 de Janeiro"
pub fn format_full_date(date: NaiveDate) -> String {
    format!(
        "{}, {} de {}",
        DAYS_OF_WEEK_FULL[date.weekday().num_days_from_sunday() as usize],
        date.day(),
        MONTHS_FULL[date.month0() as usize]
    )
}

pub fn date_after(today: NaiveDate, days: usize) -> NaiveDate {
    today + Duration::days(days as i64)
}

/// Sidebar label for the forecast day at `index`, counted from today.
pub fn day_label(index: usize, today: NaiveDate) -> String {
    if index == 0 {
        "Hoje".to_string()
    } else {
        format_short_date(date_after(today, index))
    }
}

/// Half-up rounding for displayed values.
pub fn round(value: f64) -> i64 {
    (value + 0.5).floor() as i64
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IconKind {
    Sun,
    Moon,
    CloudSun,
    CloudMoon,
    Cloudy,
    CloudRain,
    CloudDrizzle,
    CloudLightning,
    CloudSnow,
    CloudFog,
    Wind,
    Cloud,
}

impl IconKind {
    pub fn glyph(self) -> &'static str {
        match self {
            IconKind::Sun => "☀",
            IconKind::Moon => "☾",
            IconKind::CloudSun => "⛅",
            IconKind::CloudMoon => "☁☾",
            IconKind::Cloudy => "☁☁",
            IconKind::CloudRain => "🌧",
            IconKind::CloudDrizzle => "🌦",
            IconKind::CloudLightning => "⛈",
            IconKind::CloudSnow => "❄",
            IconKind::CloudFog => "🌫",
            IconKind::Wind => "🌬",
            IconKind::Cloud => "☁",
        }
    }
}

/// Map a Visual Crossing icon id to the icon shown for it.
pub fn weather_icon(icon: &str) -> IconKind {
    match icon {
        "clear-day" => IconKind::Sun,
        "clear-night" => IconKind::Moon,
        "partly-cloudy-day" => IconKind::CloudSun,
        "partly-cloudy-night" => IconKind::CloudMoon,
        "cloudy" => IconKind::Cloudy,
        "rain" | "showers-day" => IconKind::CloudRain,
        "showers-night" => IconKind::CloudDrizzle,
        "thunder-rain" | "thunder" => IconKind::CloudLightning,
        "snow" => IconKind::CloudSnow,
        "fog" => IconKind::CloudFog,
        "wind" => IconKind::Wind,
        _ => IconKind::Cloud,
    }
}
