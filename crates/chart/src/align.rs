use schema::TrendSeries;
use std::cmp::Ordering;
use std::collections::HashMap;

/// Leading integer of a year label, the way `parseInt` reads it:
/// surrounding whitespace is ignored and trailing text is dropped.
pub fn year_number(label: &str) -> Option<i64> {
    let trimmed = label.trim();
    let (sign, digits) = match trimmed.strip_prefix('-') {
        Some(rest) => (-1, rest),
        None => (1, trimmed.strip_prefix('+').unwrap_or(trimmed)),
    };
    let end = digits
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(digits.len());
    digits[..end].parse::<i64>().ok().map(|n| sign * n)
}

fn compare_years(a: &str, b: &str) -> Ordering {
    match (year_number(a), year_number(b)) {
        (Some(x), Some(y)) => x.cmp(&y).then_with(|| a.cmp(b)),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => a.cmp(b),
    }
}

/// Sorted union of every year seen across `series`.
///
/// Numeric labels come first in ascending order; labels without a leading
/// number follow, lexicographically.
pub fn year_axis<'a, I>(series: I) -> Vec<String>
where
    I: IntoIterator<Item = &'a TrendSeries>,
{
    let mut years: Vec<String> = series
        .into_iter()
        .flat_map(|s| s.years.iter().cloned())
        .collect();
    years.sort_by(|a, b| compare_years(a, b));
    years.dedup();
    years
}

/// Reindex the overall rate series of `series` onto `axis`.
///
/// Years the area lacks come back as `None`. If a year label repeats within
/// one series the later value wins.
pub fn align_rates(axis: &[String], series: &TrendSeries) -> Vec<Option<f64>> {
    let mut by_year: HashMap<&str, Option<f64>> = HashMap::with_capacity(series.len());
    for (i, year) in series.years.iter().enumerate() {
        by_year.insert(year.as_str(), series.rate_at(i));
    }

    axis.iter()
        .map(|year| by_year.get(year.as_str()).copied().flatten())
        .collect()
}
