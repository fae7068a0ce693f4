use std::sync::Once;

static TRACING_INIT: Once = Once::new();

/// Initializes the global tracing subscriber with sensible defaults.
pub fn init_tracing() {
    TRACING_INIT.call_once(|| {
        use tracing_subscriber::{fmt, EnvFilter};

        let mut filter = EnvFilter::from_default_env();
        if let Ok(directive) = "installment_engine=info".parse() {
            filter = filter.add_directive(directive);
        }

        // A host application may already own the global subscriber.
        let _ = fmt().with_env_filter(filter).try_init();
    });
}

/// Rounds a monetary value to cents, half away from zero.
///
/// Only meant for presentation; the engine keeps full precision internally.
pub fn round_currency(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Decimal and grouping separators for a BCP 47 language tag such as `pt-BR`.
pub fn separators_for(locale: &str) -> (char, char) {
    let language = locale.split(|c: char| c == '-' || c == '_').next().unwrap_or_default();
    match language.to_ascii_lowercase().as_str() {
        "pt" | "de" | "es" | "it" | "nl" | "id" | "tr" => (',', '.'),
        "fr" | "pl" | "sv" | "nb" | "fi" | "cs" | "ru" => (',', ' '),
        _ => ('.', ','),
    }
}

/// Digits after the decimal separator for an ISO 4217 code.
pub fn minor_units_for(currency: &str) -> usize {
    match currency {
        "JPY" | "KRW" | "CLP" => 0,
        "KWD" | "BHD" => 3,
        _ => 2,
    }
}

/// Formats an amount with its currency code and the locale's separators,
/// e.g. `USD 1,200.00` or `BRL 1.200,00`.
pub fn format_amount(value: f64, currency: &str, locale: &str) -> String {
    let (decimal, grouping) = separators_for(locale);
    let precision = minor_units_for(currency);
    let body = format!("{:.*}", precision, value.abs());
    let (int_part, fraction) = match body.split_once('.') {
        Some((int_part, fraction)) => (int_part, Some(fraction)),
        None => (body.as_str(), None),
    };

    let mut rendered = group_digits(int_part, grouping);
    if let Some(fraction) = fraction {
        rendered.push(decimal);
        rendered.push_str(fraction);
    }
    let sign = if value < 0.0 && rendered.chars().any(|c| c.is_ascii_digit() && c != '0') {
        "-"
    } else {
        ""
    };
    format!("{} {}{}", currency, sign, rendered)
}

fn group_digits(digits: &str, separator: char) -> String {
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (index, ch) in digits.chars().enumerate() {
        if index != 0 && (digits.len() - index) % 3 == 0 {
            grouped.push(separator);
        }
        grouped.push(ch);
    }
    grouped
}
