use chrono::NaiveDate;
use std::fmt::{self, Write};

use super::format::{
    date_after, day_label, format_full_date, format_time, moon_phase, round, severe_risk_level,
    severe_risk_message, uv_level, weather_icon,
};
use super::types::{DailyWeather, WeatherData};
use super::view::WeatherView;

const ANSI_RESET: &str = "\x1b[0m";
const RISK_BAR_WIDTH: usize = 20;

/// Render the dashboard for the current view state as terminal text.
pub fn render(view: &WeatherView, today: NaiveDate) -> String {
    let mut out = String::new();
    render_into(&mut out, view, today).expect("writing to a String is infallible");
    out
}

fn render_into(out: &mut String, view: &WeatherView, today: NaiveDate) -> fmt::Result {
    if view.loading {
        return writeln!(out, "Carregando dados meteorológicos...");
    }
    if let Some(error) = &view.error {
        return writeln!(out, "Erro: {}", error);
    }

    let (Some(weather), Some(day)) = (&view.weather, view.selected_day()) else {
        return writeln!(out, "Nenhum dado disponível para {}.", view.city);
    };

    main_card(out, weather, day, view.selected_day, today)?;
    hourly_strip(out, day)?;
    metric_cards(out, day, view.selected_day)?;
    storm_alert(out, day)?;
    forecast_sidebar(out, weather, view.selected_day, today)
}

fn main_card(
    out: &mut String,
    weather: &WeatherData,
    day: &DailyWeather,
    index: usize,
    today: NaiveDate,
) -> fmt::Result {
    writeln!(out, "{}", format_full_date(date_after(today, index)))?;
    writeln!(out, "{}", weather.resolved_address)?;
    writeln!(
        out,
        "{}  {}°  {}",
        weather_icon(&day.icon).glyph(),
        round(day.temp),
        day.condition
    )?;
    write!(
        out,
        "↑ {}°  ↓ {}°  {}% precipitação",
        round(day.high),
        round(day.low),
        round(day.precip_prob)
    )?;
    if day.snow > 0.0 {
        write!(out, "  {} cm neve", day.snow)?;
    }
    writeln!(out)?;
    if !day.description.is_empty() {
        writeln!(out, "{}", day.description)?;
    }
    writeln!(out)
}

fn hourly_strip(out: &mut String, day: &DailyWeather) -> fmt::Result {
    writeln!(out, "Fluxo de Temperatura (24h)")?;
    if day.hours.is_empty() {
        writeln!(out, "  Sem dados horários")?;
    }
    for hour in &day.hours {
        let icon = if hour.icon.is_empty() { &day.icon } else { &hour.icon };
        writeln!(
            out,
            "  {}  {}  {:>3}°  sensação {:>3}°  {:>3}%",
            format_time(&hour.time),
            weather_icon(icon).glyph(),
            round(hour.temp),
            round(hour.feelslike),
            round(hour.precip_prob)
        )?;
    }
    writeln!(out)
}

fn metric_cards(out: &mut String, day: &DailyWeather, index: usize) -> fmt::Result {
    let feels_sub = if index == 0 {
        "Térmica".to_string()
    } else {
        format!("Mín: {}°", round(day.feelslike_min))
    };

    writeln!(out, "{:<12} {}°  {}", "Sensação", round(day.feelslike_max), feels_sub)?;
    writeln!(
        out,
        "{:<12} {} km/h  Rajadas {} km/h",
        "Vento",
        round(day.wind_speed),
        round(day.wind_gust)
    )?;
    writeln!(out, "{:<12} {}%  Ar externo", "Umidade", round(day.humidity))?;
    writeln!(out, "{:<12} {}  {}", "Índice UV", day.uv_index, uv_level(day.uv_index))?;
    writeln!(out)?;
    writeln!(
        out,
        "Visibilidade {} km | Pressão {} hPa | Nuvens {}%",
        day.visibility,
        day.pressure,
        round(day.cloud_cover)
    )?;
    writeln!(
        out,
        "Amanhecer {} | Entardecer {} | Fase da lua {}",
        day.sunrise,
        day.sunset,
        moon_phase(day.moon_phase)
    )?;
    writeln!(out)
}

fn storm_alert(out: &mut String, day: &DailyWeather) -> fmt::Result {
    let level = severe_risk_level(day.severe_risk);
    let filled = ((day.severe_risk.clamp(0.0, 100.0) / 100.0) * RISK_BAR_WIDTH as f64).round() as usize;

    writeln!(out, "Alerta de Tempestade")?;
    writeln!(
        out,
        "  Risco Severo [{}{}] {}{}{}",
        "#".repeat(filled),
        "-".repeat(RISK_BAR_WIDTH - filled),
        level.color.ansi(),
        level.label,
        ANSI_RESET
    )?;
    writeln!(out, "  {}", severe_risk_message(day.severe_risk))?;
    writeln!(out)
}

fn forecast_sidebar(
    out: &mut String,
    weather: &WeatherData,
    selected: usize,
    today: NaiveDate,
) -> fmt::Result {
    let fallback_icon = weather
        .daily
        .get(selected)
        .map(|day| day.icon.as_str())
        .unwrap_or_default();

    writeln!(out, "Previsão 15 Dias")?;
    for (i, day) in weather.daily.iter().enumerate() {
        let marker = if i == selected { '>' } else { ' ' };
        let icon = if day.icon.is_empty() { fallback_icon } else { &day.icon };
        write!(
            out,
            "{} {:<12} {:>3}%  {}  ↑{}° ↓{}°",
            marker,
            day_label(i, today),
            round(day.precip_prob),
            weather_icon(icon).glyph(),
            round(day.high),
            round(day.low)
        )?;
        if day.snow > 0.0 {
            write!(out, "  {} cm", day.snow)?;
        }
        writeln!(out)?;
    }
    Ok(())
}
