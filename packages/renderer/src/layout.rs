//! Responsive resolution of column spans and visibility.
//!
//! A missing span falls back to the next smaller breakpoint's resolved span,
//! and to the full 12 columns when nothing smaller is set. A widget is hidden
//! at a breakpoint only when visibility is explicitly `false` there.

use pagecraft_document::{Breakpoint, ColSpan, Visibility, GRID_COLUMNS};

/// A value for every breakpoint
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Resolved<T> {
    pub sm: T,
    pub md: T,
    pub lg: T,
}

impl<T: Copy> Resolved<T> {
    pub fn get(&self, breakpoint: Breakpoint) -> T {
        match breakpoint {
            Breakpoint::Sm => self.sm,
            Breakpoint::Md => self.md,
            Breakpoint::Lg => self.lg,
        }
    }

    fn build(mut f: impl FnMut(Breakpoint) -> T) -> Self {
        let sm = f(Breakpoint::Sm);
        let md = f(Breakpoint::Md);
        let lg = f(Breakpoint::Lg);
        Self { sm, md, lg }
    }
}

pub fn resolve_col_span(col_span: &ColSpan) -> Resolved<u8> {
    let mut inherited = GRID_COLUMNS;
    Resolved::build(|breakpoint| {
        if let Some(value) = col_span.get(breakpoint) {
            inherited = (*value).clamp(1, GRID_COLUMNS);
        }
        inherited
    })
}

pub fn resolve_visibility(visibility: &Visibility) -> Resolved<bool> {
    Resolved::build(|breakpoint| visibility.get(breakpoint) != Some(&false))
}

pub fn col_class(breakpoint: Breakpoint, span: u8) -> String {
    format!("pc-col-{}-{}", breakpoint, span)
}

pub fn hidden_class(breakpoint: Breakpoint) -> String {
    format!("pc-hidden-{}", breakpoint)
}

/// `min-width` media query for a breakpoint; `sm` is the unqualified base
pub fn min_width_query(breakpoint: Breakpoint) -> Option<String> {
    match breakpoint.min_width() {
        0 => None,
        width => Some(format!("(min-width: {}px)", width)),
    }
}

/// Media query matching exactly one breakpoint's width range
pub fn range_query(breakpoint: Breakpoint) -> String {
    let min = breakpoint.min_width();
    let next = Breakpoint::ALL
        .iter()
        .map(|b| b.min_width())
        .find(|width| *width > min);
    match (min, next) {
        (0, Some(next)) => format!("(max-width: {}px)", next - 1),
        (min, Some(next)) => format!("(min-width: {}px) and (max-width: {}px)", min, next - 1),
        (min, None) => format!("(min-width: {}px)", min),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_small_span_fills_upward() {
        let span = ColSpan::empty().with(Breakpoint::Sm, 6);
        let resolved = resolve_col_span(&span);
        assert_eq!(resolved, Resolved { sm: 6, md: 6, lg: 6 });
    }

    #[test]
    fn test_missing_span_is_full_width() {
        assert_eq!(
            resolve_col_span(&ColSpan::empty()),
            Resolved { sm: 12, md: 12, lg: 12 }
        );
    }

    #[test]
    fn test_large_only_span() {
        let span = ColSpan::empty().with(Breakpoint::Lg, 4);
        assert_eq!(resolve_col_span(&span), Resolved { sm: 12, md: 12, lg: 4 });
    }

    #[test]
    fn test_md_overrides_then_inherits() {
        let span = ColSpan::empty()
            .with(Breakpoint::Sm, 12)
            .with(Breakpoint::Md, 6);
        assert_eq!(resolve_col_span(&span), Resolved { sm: 12, md: 6, lg: 6 });
    }

    #[test]
    fn test_out_of_range_spans_are_clamped() {
        let span = ColSpan::empty().with(Breakpoint::Sm, 0).with(Breakpoint::Lg, 40);
        assert_eq!(resolve_col_span(&span), Resolved { sm: 1, md: 1, lg: 12 });
    }

    #[test]
    fn test_visibility_hidden_only_when_false() {
        let visibility = Visibility::empty().with(Breakpoint::Md, false);
        assert_eq!(
            resolve_visibility(&visibility),
            Resolved { sm: true, md: false, lg: true }
        );
        assert_eq!(
            resolve_visibility(&Visibility::empty()),
            Resolved { sm: true, md: true, lg: true }
        );
    }

    #[test]
    fn test_queries() {
        assert_eq!(min_width_query(Breakpoint::Sm), None);
        assert_eq!(min_width_query(Breakpoint::Lg).as_deref(), Some("(min-width: 1024px)"));
        assert_eq!(range_query(Breakpoint::Sm), "(max-width: 639px)");
        assert_eq!(
            range_query(Breakpoint::Md),
            "(min-width: 640px) and (max-width: 1023px)"
        );
        assert_eq!(range_query(Breakpoint::Lg), "(min-width: 1024px)");
    }
}
