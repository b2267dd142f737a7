//! Remaining auction time, parsed from ISO-8601 durations such as `P1DT2H3M4S`.

use regex_lite::Regex;
use std::fmt;
use std::str::FromStr;
use std::sync::LazyLock;

static DURATION: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"^P(?:(\d+)W)?(?:(\d+)D)?(?:T(?:(\d+)H)?(?:(\d+)M)?(?:(\d+)(?:[.,]\d+)?S)?)?$",
    )
    .unwrap()
});

/// Time left on a listing, normalized to whole seconds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct TimeLeft {
    total_seconds: u64,
}

impl TimeLeft {
    pub fn from_seconds(total_seconds: u64) -> Self {
        Self { total_seconds }
    }

    pub fn total_seconds(&self) -> u64 {
        self.total_seconds
    }

    pub fn days(&self) -> u64 {
        self.total_seconds / 86_400
    }
}

impl FromStr for TimeLeft {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let caps = DURATION.captures(s).ok_or_else(|| rejection(s))?;

        if (1..=5).all(|i| caps.get(i).is_none()) {
            return Err(format!("duration \"{}\" has no components", s));
        }
        if s.contains('T') && (3..=5).all(|i| caps.get(i).is_none()) {
            return Err(format!("duration \"{}\" has no time components after T", s));
        }

        let field = |i: usize| -> Result<u64, String> {
            caps.get(i)
                .map(|m| m.as_str().parse::<u64>().map_err(|e| format!("{}: {}", s, e)))
                .unwrap_or(Ok(0))
        };

        let units = [(1, 7 * 86_400), (2, 86_400), (3, 3_600), (4, 60), (5, 1)];
        let mut total: u64 = 0;
        for (group, seconds) in units {
            total = field(group)?
                .checked_mul(seconds)
                .and_then(|part| total.checked_add(part))
                .ok_or_else(|| format!("duration \"{}\" is too large", s))?;
        }

        Ok(Self { total_seconds: total })
    }
}

fn rejection(s: &str) -> String {
    let date_part = s.split('T').next().unwrap_or_default();
    if s.starts_with('P') && (date_part.contains('Y') || date_part.contains('M')) {
        format!("duration \"{}\" uses years or months", s)
    } else {
        format!("\"{}\" is not an ISO-8601 duration", s)
    }
}

/// Renders as `H:MM:SS`, prefixed with `N day(s), ` when at least a day remains.
impl fmt::Display for TimeLeft {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let days = self.days();
        let rest = self.total_seconds % 86_400;
        let (hours, minutes, seconds) = (rest / 3_600, rest % 3_600 / 60, rest % 60);

        match days {
            0 => {}
            1 => write!(f, "1 day, ")?,
            n => write!(f, "{} days, ", n)?,
        }
        write!(f, "{}:{:02}:{:02}", hours, minutes, seconds)
    }
}
