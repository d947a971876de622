//! Console rendering of step totals.

use std::fmt;

/// Format a number with comma thousands separators.
pub fn format_thousands(n: u64) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

/// Step totals for the current day, week, month and year, plus lifetime.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Summary {
    pub today: u64,
    pub week: u64,
    pub month: u64,
    pub year: u64,
    pub lifetime: u64,
}

impl Summary {
    fn rows(&self) -> [(&'static str, u64); 4] {
        [
            ("Today:", self.today),
            ("This week:", self.week),
            ("This month:", self.month),
            ("This year:", self.year),
        ]
    }
}

impl fmt::Display for Summary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Your summary statistics (total steps)")?;
        writeln!(f)?;
        for (label, steps) in self.rows() {
            writeln!(f, "{} {}", label, format_thousands(steps))?;
        }
        writeln!(f)?;
        writeln!(f, "Lifetime: {}", format_thousands(self.lifetime))
    }
}
