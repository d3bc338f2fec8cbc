//! Industry and company-size budget benchmark bands.
//!
//! The budget-realism assessor compares a claimed figure against the band
//! for the company's profile; figures far outside the band in either
//! direction lower the realism score.

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Expected annual budget band for a company profile, in dollars.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BenchmarkBand {
    pub low: u64,
    pub high: u64,
}

impl BenchmarkBand {
    /// True when the figure falls inside the band (bounds inclusive).
    pub fn contains(&self, figure: u64) -> bool {
        figure >= self.low && figure <= self.high
    }

    /// How many times outside the band the figure sits; 1.0 inside.
    ///
    /// A $500k claim against a $10k–$50k band returns 10.0; a $1k claim
    /// against the same band returns 10.0 as well. Symmetric skepticism.
    pub fn deviation_factor(&self, figure: u64) -> f64 {
        if figure == 0 {
            return f64::INFINITY;
        }
        if self.contains(figure) {
            return 1.0;
        }
        if figure > self.high {
            figure as f64 / self.high as f64
        } else {
            self.low as f64 / figure as f64
        }
    }
}

/// Base bands by company size (employee count).
const MICRO: BenchmarkBand = BenchmarkBand { low: 2_000, high: 15_000 };
const SMALL: BenchmarkBand = BenchmarkBand { low: 5_000, high: 40_000 };
const MID: BenchmarkBand = BenchmarkBand { low: 15_000, high: 120_000 };
const LARGE: BenchmarkBand = BenchmarkBand { low: 40_000, high: 500_000 };

/// Industry spend multipliers applied to the size band, in tenths
/// (15 means 1.5x). Industries absent from the table use 10.
static INDUSTRY_MULTIPLIERS: Lazy<HashMap<&'static str, u64>> = Lazy::new(|| {
    HashMap::from([
        ("finance", 15),
        ("healthcare", 15),
        ("technology", 15),
        ("professional_services", 12),
        ("construction", 10),
        ("manufacturing", 10),
        ("logistics", 10),
        ("retail", 8),
        ("hospitality", 8),
    ])
});

/// Looks up the benchmark band for a company profile.
///
/// Missing employee count defaults to the small-company band; missing or
/// unrecognized industry uses the neutral multiplier.
pub fn benchmark_for(industry: Option<&str>, employee_count: Option<u32>) -> BenchmarkBand {
    let base = match employee_count {
        Some(n) if n >= 250 => LARGE,
        Some(n) if n >= 50 => MID,
        Some(n) if n >= 10 => SMALL,
        Some(_) => MICRO,
        None => SMALL,
    };

    let multiplier = industry
        .and_then(|name| INDUSTRY_MULTIPLIERS.get(name).copied())
        .unwrap_or(10);

    BenchmarkBand {
        low: base.low * multiplier / 10,
        high: base.high * multiplier / 10,
    }
}
