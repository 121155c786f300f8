//! Macro expansion and translation of 5-field expressions into `cron` crate schedules.

use std::str::FromStr;

use cron::Schedule;

use super::fields::{Field, FieldKind};

/// Expand the `@` shorthands into their 5-field form.
pub(crate) fn expand_macro(expr: &str) -> Option<&'static str> {
    match expr.to_ascii_lowercase().as_str() {
        "@yearly" | "@annually" => Some("0 0 1 1 *"),
        "@monthly" => Some("0 0 1 * *"),
        "@weekly" => Some("0 0 * * 0"),
        "@daily" | "@midnight" => Some("0 0 * * *"),
        "@hourly" => Some("0 * * * *"),
        _ => None,
    }
}

/// Split a 5-field expression into parsed fields.
pub(crate) fn parse_fields(expr: &str) -> Result<[Field; 5], String> {
    let parts: Vec<&str> = expr.split_whitespace().collect();
    if parts.len() != 5 {
        return Err(format!(
            "expected 5 fields (minute hour day-of-month month day-of-week), found {}",
            parts.len()
        ));
    }

    let mut fields = Vec::with_capacity(5);
    for (kind, text) in FieldKind::ALL.into_iter().zip(parts) {
        fields.push(Field::parse(kind, text)?);
    }
    fields
        .try_into()
        .map_err(|_| "internal error: field count mismatch".to_string())
}

/// Build the 6-field `cron` crate expressions (seconds pinned to 0) for a
/// parsed expression.
///
/// The `cron` crate ANDs day-of-month with day-of-week. Standard cron ORs them
/// when both are restricted, so that case becomes two schedules whose
/// earliest occurrence wins.
pub(crate) fn to_cron_expressions(fields: &[Field; 5]) -> Vec<String> {
    let [minute, hour, dom, month, dow] = fields;
    let line = |dom: &str, dow: &str| {
        format!(
            "0 {} {} {} {} {}",
            minute.render(),
            hour.render(),
            dom,
            month.render(),
            dow
        )
    };

    match (dom.wildcard, dow.wildcard) {
        (false, false) => vec![line(&dom.render(), "*"), line("*", &dow.render())],
        (false, true) => vec![line(&dom.render(), "*")],
        (true, false) => vec![line("*", &dow.render())],
        (true, true) => vec![line("*", "*")],
    }
}

pub(crate) fn compile(expressions: &[String]) -> Result<Vec<Schedule>, String> {
    expressions
        .iter()
        .map(|e| Schedule::from_str(e).map_err(|err| format!("rejected by scheduler: {err}")))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn expand_macro_known_and_unknown() {
        assert_eq!(expand_macro("@hourly"), Some("0 * * * *"));
        assert_eq!(expand_macro("@ANNUALLY"), Some("0 0 1 1 *"));
        assert_eq!(expand_macro("@reboot"), None);
        assert_eq!(expand_macro("* * * * *"), None);
    }

    #[test]
    fn parse_fields_requires_five() {
        assert!(parse_fields("* * * *").is_err());
        assert!(parse_fields("0 * * * * *").is_err());
        assert!(parse_fields("  0-5   *  * * *  ").is_ok());
    }

    #[test]
    fn translation_prepends_seconds() {
        let fields = parse_fields("*/15 * * * *").unwrap();
        assert_eq!(
            to_cron_expressions(&fields),
            vec!["0 0,15,30,45 * * * *".to_string()]
        );
    }

    #[test]
    fn translation_splits_restricted_day_fields() {
        let fields = parse_fields("0 6 13 * fri").unwrap();
        assert_eq!(
            to_cron_expressions(&fields),
            vec!["0 0 6 13 * *".to_string(), "0 0 6 * * Fri".to_string()]
        );
    }

    #[test]
    fn translation_keeps_single_restricted_day_field() {
        let fields = parse_fields("0 6 * * 1-5").unwrap();
        assert_eq!(
            to_cron_expressions(&fields),
            vec!["0 0 6 * * Mon,Tue,Wed,Thu,Fri".to_string()]
        );
    }

    #[test]
    fn compiled_expressions_are_accepted() {
        let fields = parse_fields("0-5,10-15 * 1,15 jan-jun sat").unwrap();
        assert!(compile(&to_cron_expressions(&fields)).is_ok());
    }
}
