//! Human-readable duration strings.

use std::time::Duration;

const NANOS_PER_SEC: u128 = 1_000_000_000;

/// Parse a human-readable duration string into a [`Duration`].
///
/// A string is a sequence of `<number><unit>` components such as "2h30m",
/// "1d12h" or "1s500ms". Numbers may carry a fraction ("1.5m", ".5s").
/// Units: `d`, `h`, `m`, `s`, `ms`, `us` (or `µs`) and `ns`. A bare integer
/// is read as seconds. Returns `None` if the string is empty or unparseable.
pub fn parse_duration(s: &str) -> Option<Duration> {
    let s = s.trim();
    if s.is_empty() {
        return None;
    }
    if s.bytes().all(|b| b.is_ascii_digit()) {
        return s.parse::<u64>().ok().map(Duration::from_secs);
    }

    let mut total_ns: u128 = 0;
    let mut rest = s;
    while !rest.is_empty() {
        let number_len = rest
            .find(|c: char| !(c.is_ascii_digit() || c == '.'))
            .unwrap_or(rest.len());
        let (number, tail) = rest.split_at(number_len);
        let unit_len = tail
            .find(|c: char| c.is_ascii_digit() || c == '.')
            .unwrap_or(tail.len());
        let (unit, tail) = tail.split_at(unit_len);

        // "30m15" has a trailing number with no unit
        let unit_ns = unit_nanos(unit)?;
        total_ns = total_ns.checked_add(scale(number, unit_ns)?)?;
        rest = tail;
    }

    let secs = u64::try_from(total_ns / NANOS_PER_SEC).ok()?;
    Some(Duration::new(secs, (total_ns % NANOS_PER_SEC) as u32))
}

fn unit_nanos(unit: &str) -> Option<u128> {
    Some(match unit {
        "d" => 86_400 * NANOS_PER_SEC,
        "h" => 3_600 * NANOS_PER_SEC,
        "m" => 60 * NANOS_PER_SEC,
        "s" => NANOS_PER_SEC,
        "ms" => 1_000_000,
        "us" | "µs" | "μs" => 1_000,
        "ns" => 1,
        _ => return None,
    })
}

/// `number` (digits with an optional fraction) times `unit_ns`, in nanoseconds.
fn scale(number: &str, unit_ns: u128) -> Option<u128> {
    let (whole, fraction) = number.split_once('.').unwrap_or((number, ""));
    if whole.is_empty() && fraction.is_empty() {
        return None;
    }
    if !whole.bytes().all(|b| b.is_ascii_digit()) || !fraction.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }

    let whole: u128 = if whole.is_empty() { 0 } else { whole.parse().ok()? };
    let mut value = whole.checked_mul(unit_ns)?;

    // digits past the 18th cannot change a nanosecond count of any unit here
    let fraction = &fraction[..fraction.len().min(18)];
    if !fraction.is_empty() {
        let numerator: u128 = fraction.parse().ok()?;
        let denominator = 10u128.pow(fraction.len() as u32);
        value = value.checked_add(numerator.checked_mul(unit_ns)? / denominator)?;
    }
    Some(value)
}

/// Format a [`Duration`] back into the form accepted by [`parse_duration`].
pub fn format_duration(d: Duration) -> String {
    let mut ns = d.as_nanos();
    if ns == 0 {
        return "0s".to_string();
    }

    let mut out = String::new();
    for unit in ["d", "h", "m", "s", "ms", "us", "ns"] {
        let size = unit_nanos(unit).unwrap_or(1);
        let n = ns / size;
        if n > 0 {
            out.push_str(&format!("{n}{unit}"));
            ns %= size;
        }
    }
    out
}
