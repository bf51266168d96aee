//! Period arithmetic shared by match setup and plan rendering.
//!
//! Periods are 0-based everywhere inside the crate and in the database.
//! Only [`period_label`] turns an index into the 1-based number a coach sees.

/// Number of periods needed to cover a match, rounding up.
pub fn period_count_for(match_minutes: u32, period_length_minutes: u32) -> u32 {
    if period_length_minutes == 0 {
        return 0;
    }
    match_minutes.div_ceil(period_length_minutes)
}

/// Checks a 1-based period number against the period count.
pub fn is_valid_period(period_number: u32, period_count: u32) -> bool {
    (1..=period_count).contains(&period_number)
}

/// Returns a message when the derived period count falls outside the allowed range.
pub fn validate_period_configuration(
    match_minutes: u32,
    period_length_minutes: u32,
    min_periods: u32,
    max_periods: u32,
) -> Option<String> {
    if period_length_minutes == 0 {
        return Some("period length must be positive".to_string());
    }

    let count = period_count_for(match_minutes, period_length_minutes);
    if count < min_periods {
        Some(format!(
            "{} minute periods give {} periods, minimum is {}",
            period_length_minutes, count, min_periods
        ))
    } else if count > max_periods {
        Some(format!(
            "{} minute periods give {} periods, maximum is {}",
            period_length_minutes, count, max_periods
        ))
    } else {
        None
    }
}

pub fn period_label(index: usize) -> String {
    format!("Period {}", index + 1)
}

/// Minute range covered by a 0-based period, e.g. `"10-15"`.
pub fn period_minutes(index: usize, period_length_minutes: u32) -> String {
    let start = u32::try_from(index)
        .unwrap_or(u32::MAX)
        .saturating_mul(period_length_minutes);
    format!("{}-{}", start, start.saturating_add(period_length_minutes))
}
