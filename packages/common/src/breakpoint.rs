use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Responsive viewport class
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Breakpoint {
    Sm,
    Md,
    Lg,
}

impl Breakpoint {
    /// All breakpoints, smallest first
    pub const ALL: [Breakpoint; 3] = [Breakpoint::Sm, Breakpoint::Md, Breakpoint::Lg];

    /// The next smaller breakpoint, if any
    pub fn smaller(self) -> Option<Breakpoint> {
        match self {
            Breakpoint::Sm => None,
            Breakpoint::Md => Some(Breakpoint::Sm),
            Breakpoint::Lg => Some(Breakpoint::Md),
        }
    }

    /// Minimum viewport width (px) at which this breakpoint applies
    pub fn min_width(self) -> u32 {
        match self {
            Breakpoint::Sm => 0,
            Breakpoint::Md => 640,
            Breakpoint::Lg => 1024,
        }
    }

    /// Breakpoint active for a viewport width
    pub fn for_width(width: u32) -> Breakpoint {
        Self::ALL
            .iter()
            .rev()
            .copied()
            .find(|bp| width >= bp.min_width())
            .unwrap_or(Breakpoint::Sm)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Breakpoint::Sm => "sm",
            Breakpoint::Md => "md",
            Breakpoint::Lg => "lg",
        }
    }
}

impl fmt::Display for Breakpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Breakpoint {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "sm" | "mobile" => Ok(Breakpoint::Sm),
            "md" | "tablet" => Ok(Breakpoint::Md),
            "lg" | "desktop" => Ok(Breakpoint::Lg),
            other => Err(format!("Unknown breakpoint: {}. Use: sm, md or lg", other)),
        }
    }
}

/// Optional per-breakpoint values (`{sm?, md?, lg?}`)
///
/// Each slot is an independent override. Inheritance between slots is not applied
/// here; readers that want fallback semantics resolve it themselves.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ByBreakpoint<T> {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sm: Option<T>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub md: Option<T>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lg: Option<T>,
}

impl<T> ByBreakpoint<T> {
    pub const fn empty() -> Self {
        Self {
            sm: None,
            md: None,
            lg: None,
        }
    }

    /// Same value at every breakpoint
    pub fn uniform(value: T) -> Self
    where
        T: Clone,
    {
        Self {
            sm: Some(value.clone()),
            md: Some(value.clone()),
            lg: Some(value),
        }
    }

    pub fn get(&self, breakpoint: Breakpoint) -> Option<&T> {
        match breakpoint {
            Breakpoint::Sm => self.sm.as_ref(),
            Breakpoint::Md => self.md.as_ref(),
            Breakpoint::Lg => self.lg.as_ref(),
        }
    }

    pub fn slot_mut(&mut self, breakpoint: Breakpoint) -> &mut Option<T> {
        match breakpoint {
            Breakpoint::Sm => &mut self.sm,
            Breakpoint::Md => &mut self.md,
            Breakpoint::Lg => &mut self.lg,
        }
    }

    pub fn set(&mut self, breakpoint: Breakpoint, value: T) {
        *self.slot_mut(breakpoint) = Some(value);
    }

    pub fn with(mut self, breakpoint: Breakpoint, value: T) -> Self {
        self.set(breakpoint, value);
        self
    }

    pub fn is_empty(&self) -> bool {
        self.sm.is_none() && self.md.is_none() && self.lg.is_none()
    }

    /// Defined values with their breakpoint, smallest first
    pub fn iter(&self) -> impl Iterator<Item = (Breakpoint, &T)> {
        Breakpoint::ALL
            .into_iter()
            .filter_map(move |bp| self.get(bp).map(|value| (bp, value)))
    }
}

impl<T> Default for ByBreakpoint<T> {
    fn default() -> Self {
        Self::empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_smaller_chain() {
        assert_eq!(Breakpoint::Lg.smaller(), Some(Breakpoint::Md));
        assert_eq!(Breakpoint::Md.smaller(), Some(Breakpoint::Sm));
        assert_eq!(Breakpoint::Sm.smaller(), None);
    }

    #[test]
    fn test_for_width() {
        assert_eq!(Breakpoint::for_width(320), Breakpoint::Sm);
        assert_eq!(Breakpoint::for_width(640), Breakpoint::Md);
        assert_eq!(Breakpoint::for_width(1440), Breakpoint::Lg);
    }

    #[test]
    fn test_parse_aliases() {
        assert_eq!("tablet".parse::<Breakpoint>(), Ok(Breakpoint::Md));
        assert!("xl".parse::<Breakpoint>().is_err());
    }

    #[test]
    fn test_by_breakpoint_serializes_only_defined_slots() {
        let spans = ByBreakpoint::empty().with(Breakpoint::Sm, 6u8);
        let json = serde_json::to_string(&spans).unwrap();
        assert_eq!(json, r#"{"sm":6}"#);

        let parsed: ByBreakpoint<u8> = serde_json::from_str("{}").unwrap();
        assert!(parsed.is_empty());
    }

    #[test]
    fn test_iter_skips_missing() {
        let values = ByBreakpoint::empty()
            .with(Breakpoint::Lg, false)
            .with(Breakpoint::Sm, true);
        let collected: Vec<_> = values.iter().collect();
        assert_eq!(collected, vec![(Breakpoint::Sm, &true), (Breakpoint::Lg, &false)]);
    }
}
