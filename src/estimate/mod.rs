use std::fmt;
use std::str::FromStr;

use anyhow::{bail, Context};
use compact_str::CompactString;

use crate::layout::Item;

/// Requirement priority, lowest first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub enum Priority {
    Low,
    #[default]
    Medium,
    High,
    Critical,
}

impl FromStr for Priority {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> anyhow::Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "low" => Ok(Self::Low),
            "medium" => Ok(Self::Medium),
            "high" => Ok(Self::High),
            "critical" => Ok(Self::Critical),
            other => bail!("unknown priority '{}'", other),
        }
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
            Self::Critical => "critical",
        };
        f.write_str(name)
    }
}

/// Estimated implementation complexity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub enum Complexity {
    Simple,
    #[default]
    Moderate,
    Complex,
    VeryComplex,
}

impl FromStr for Complexity {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> anyhow::Result<Self> {
        match s.trim().to_ascii_lowercase().replace('_', "-").as_str() {
            "simple" => Ok(Self::Simple),
            "moderate" => Ok(Self::Moderate),
            "complex" => Ok(Self::Complex),
            "very-complex" => Ok(Self::VeryComplex),
            other => bail!("unknown complexity '{}'", other),
        }
    }
}

impl fmt::Display for Complexity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Simple => "simple",
            Self::Moderate => "moderate",
            Self::Complex => "complex",
            Self::VeryComplex => "very-complex",
        };
        f.write_str(name)
    }
}

/// A tracked requirement as the dashboard hands it to the treemap.
#[derive(Debug, Clone, PartialEq)]
pub struct Requirement {
    pub id: CompactString,
    pub title: String,
    pub priority: Priority,
    pub complexity: Complexity,
    /// Estimated effort in working days.
    pub effort_days: f64,
}

/// One treemap item per requirement, weighted by estimated effort.
///
/// Requirements without a positive estimate are passed through; the layout
/// drops them.
pub fn to_items(requirements: &[Requirement]) -> Vec<Item<Requirement>> {
    requirements
        .iter()
        .map(|req| Item::new(req.id.clone(), req.effort_days, req.clone()))
        .collect()
}

/// Parse requirements from comma-separated lines:
/// `id,effort_days[,title[,priority[,complexity]]]`.
///
/// Blank lines and lines starting with `#` are skipped. Titles cannot contain
/// commas.
pub fn parse_requirements(text: &str) -> anyhow::Result<Vec<Requirement>> {
    let mut out = Vec::new();
    for (lineno, line) in text.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        let fields: Vec<&str> = line.split(',').map(str::trim).collect();
        if fields.len() < 2 || fields[0].is_empty() {
            bail!("line {}: expected at least 'id,effort_days'", lineno + 1);
        }
        let effort_days = fields[1]
            .parse::<f64>()
            .with_context(|| format!("line {}: bad effort '{}'", lineno + 1, fields[1]))?;
        let title = fields.get(2).copied().unwrap_or(fields[0]).to_string();
        let priority = match fields.get(3) {
            Some(raw) => raw
                .parse::<Priority>()
                .with_context(|| format!("line {}", lineno + 1))?,
            None => Priority::default(),
        };
        let complexity = match fields.get(4) {
            Some(raw) => raw
                .parse::<Complexity>()
                .with_context(|| format!("line {}", lineno + 1))?,
            None => Complexity::default(),
        };
        out.push(Requirement {
            id: CompactString::new(fields[0]),
            title,
            priority,
            complexity,
            effort_days,
        });
    }
    Ok(out)
}

/// Format an effort estimate for a card label.
pub fn format_effort(days: f64) -> String {
    const WEEK: f64 = 5.0;

    if days >= 20.0 {
        format!("{:.1} wk", days / WEEK)
    } else if days >= 5.0 {
        format!("{:.0} d", days)
    } else {
        format!("{:.1} d", days)
    }
}
