/// Best-effort ISO 8601 duration parsing for the transform stage.
///
/// The platform reports video lengths as `PT#H#M#S` (days show up as
/// `P#DT…` for very long streams). Durations with year or month components
/// have no fixed length in seconds, so they are rejected the same way any
/// malformed value is: `None`, never an error.
pub fn parse_seconds(input: &str) -> Option<f64> {
    let rest = input.trim().strip_prefix('P')?;
    if rest.is_empty() {
        return None;
    }

    let (date_part, time_part) = match rest.split_once('T') {
        Some((date, time)) => (date, Some(time)),
        None => (rest, None),
    };
    if let Some(time) = time_part
        && time.is_empty()
    {
        return None;
    }

    let mut total = 0.0;
    let mut seen_component = false;

    for (value, unit) in components(date_part)? {
        let factor = match unit {
            'W' => 7.0 * 86_400.0,
            'D' => 86_400.0,
            _ => return None,
        };
        total += value * factor;
        seen_component = true;
    }

    if let Some(time) = time_part {
        for (value, unit) in components(time)? {
            let factor = match unit {
                'H' => 3_600.0,
                'M' => 60.0,
                'S' => 1.0,
                _ => return None,
            };
            total += value * factor;
            seen_component = true;
        }
    }

    seen_component.then_some(total)
}

/// Split `12H34M5S` into `(12.0, 'H'), (34.0, 'M'), (5.0, 'S')`.
fn components(part: &str) -> Option<Vec<(f64, char)>> {
    let mut out = Vec::new();
    let mut number = String::new();

    for ch in part.chars() {
        if ch.is_ascii_digit() || ch == '.' {
            number.push(ch);
        } else if ch.is_ascii_alphabetic() {
            if number.is_empty() {
                return None;
            }
            let value: f64 = number.parse().ok()?;
            out.push((value, ch.to_ascii_uppercase()));
            number.clear();
        } else {
            return None;
        }
    }

    // Trailing digits without a designator are malformed.
    if !number.is_empty() {
        return None;
    }

    Some(out)
}
