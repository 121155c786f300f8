//! Parsing of the five standard cron fields into explicit value sets.

use std::collections::BTreeSet;

const MONTH_NAMES: [&str; 12] = [
    "jan", "feb", "mar", "apr", "may", "jun", "jul", "aug", "sep", "oct", "nov", "dec",
];

const DAY_NAMES: [&str; 7] = ["sun", "mon", "tue", "wed", "thu", "fri", "sat"];

/// Which of the five cron fields a value set belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum FieldKind {
    Minute,
    Hour,
    DayOfMonth,
    Month,
    DayOfWeek,
}

impl FieldKind {
    pub(crate) const ALL: [FieldKind; 5] = [
        FieldKind::Minute,
        FieldKind::Hour,
        FieldKind::DayOfMonth,
        FieldKind::Month,
        FieldKind::DayOfWeek,
    ];

    pub(crate) fn label(self) -> &'static str {
        match self {
            Self::Minute => "minute",
            Self::Hour => "hour",
            Self::DayOfMonth => "day-of-month",
            Self::Month => "month",
            Self::DayOfWeek => "day-of-week",
        }
    }

    /// Inclusive bounds accepted in expressions. Day-of-week allows 7 as Sunday.
    fn bounds(self) -> (u32, u32) {
        match self {
            Self::Minute => (0, 59),
            Self::Hour => (0, 23),
            Self::DayOfMonth => (1, 31),
            Self::Month => (1, 12),
            Self::DayOfWeek => (0, 7),
        }
    }

    /// Bounds of the normalized set (after 7 folds into 0).
    fn set_bounds(self) -> (u32, u32) {
        match self {
            Self::DayOfWeek => (0, 6),
            other => other.bounds(),
        }
    }

    fn lookup_name(self, token: &str) -> Option<u32> {
        let token = token.to_ascii_lowercase();
        match self {
            Self::Month => MONTH_NAMES
                .iter()
                .position(|n| *n == token)
                .map(|i| i as u32 + 1),
            Self::DayOfWeek => DAY_NAMES.iter().position(|n| *n == token).map(|i| i as u32),
            _ => None,
        }
    }

    fn allows_question_mark(self) -> bool {
        matches!(self, Self::DayOfMonth | Self::DayOfWeek)
    }
}

/// The set of values one cron field matches.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Field {
    pub(crate) kind: FieldKind,
    pub(crate) values: BTreeSet<u32>,
    /// Written as a bare `*` or `?`. Only meaningful for the two day fields,
    /// where it decides between AND and OR semantics.
    pub(crate) wildcard: bool,
}

impl Field {
    pub(crate) fn parse(kind: FieldKind, text: &str) -> Result<Self, String> {
        let text = text.trim();
        if text.is_empty() {
            return Err(format!("{} field is empty", kind.label()));
        }

        let wildcard = text == "*" || (text == "?" && kind.allows_question_mark());
        let (min, max) = kind.bounds();
        let mut values = BTreeSet::new();

        for part in text.split(',') {
            let (range, step) = match part.split_once('/') {
                Some((range, step)) => {
                    let step: u32 = step.parse().map_err(|_| {
                        format!("{} field: invalid step '{step}'", kind.label())
                    })?;
                    if step == 0 {
                        return Err(format!("{} field: step must be positive", kind.label()));
                    }
                    (range, Some(step))
                }
                None => (part, None),
            };

            let (start, end) = if range == "*" || (range == "?" && kind.allows_question_mark()) {
                (min, max)
            } else if let Some((a, b)) = range.split_once('-') {
                let a = parse_value(kind, a)?;
                let b = parse_value(kind, b)?;
                if a > b {
                    return Err(format!(
                        "{} field: range start {a} is greater than end {b}",
                        kind.label()
                    ));
                }
                (a, b)
            } else {
                let a = parse_value(kind, range)?;
                // "a/n" runs from a to the field maximum
                if step.is_some() { (a, max) } else { (a, a) }
            };

            let step = step.unwrap_or(1) as usize;
            for v in (start..=end).step_by(step) {
                values.insert(if kind == FieldKind::DayOfWeek && v == 7 { 0 } else { v });
            }
        }

        Ok(Self {
            kind,
            values,
            wildcard,
        })
    }

    pub(crate) fn contains(&self, value: u32) -> bool {
        self.values.contains(&value)
    }

    fn is_full(&self) -> bool {
        let (min, max) = self.kind.set_bounds();
        (min..=max).all(|v| self.values.contains(&v))
    }

    /// Render as a field for the `cron` crate.
    ///
    /// Day-of-week is emitted as day names so the output does not depend on
    /// the crate's numeric day ordering.
    pub(crate) fn render(&self) -> String {
        if self.is_full() {
            return "*".to_string();
        }
        let tokens: Vec<String> = match self.kind {
            FieldKind::DayOfWeek => self
                .values
                .iter()
                .map(|&v| capitalize(DAY_NAMES[v as usize]))
                .collect(),
            _ => self.values.iter().map(u32::to_string).collect(),
        };
        tokens.join(",")
    }
}

fn parse_value(kind: FieldKind, token: &str) -> Result<u32, String> {
    let (min, max) = kind.bounds();
    let value = match token.parse::<u32>() {
        Ok(v) => v,
        Err(_) => kind
            .lookup_name(token)
            .ok_or_else(|| format!("{} field: invalid value '{token}'", kind.label()))?,
    };
    if value < min || value > max {
        return Err(format!(
            "{} field: value {value} out of range {min}-{max}",
            kind.label()
        ));
    }
    Ok(value)
}

fn capitalize(name: &str) -> String {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) => first.to_ascii_uppercase().to_string() + chars.as_str(),
        None => String::new(),
    }
}
