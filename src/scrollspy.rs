//! Scroll-spy core: which section owns the current scroll position, and
//! how often we are willing to recompute it.

/// Offset added to the raw scroll position so the probe lands below the
/// fixed navbar instead of behind it.
pub const HEADER_OFFSET: f64 = 100.0;

/// Below this scroll position the page counts as "near the top" and the
/// home link stays highlighted even when no section contains the probe.
pub const NEAR_TOP_THRESHOLD: f64 = 200.0;

/// Scroll deltas at or under this many pixels are ignored.
pub const SCROLL_DELTA_THRESHOLD: f64 = 5.0;

pub const DEFAULT_SECTION_ID: &str = "home";

/// A page section as measured from live layout. Geometry is re-read on
/// every recomputation, never cached across scroll events.
#[derive(Clone, Debug, PartialEq)]
pub struct SectionSpan {
    pub id: String,
    pub top: f64,
    pub height: f64,
}

impl SectionSpan {
    pub fn new(id: impl Into<String>, top: f64, height: f64) -> Self {
        Self {
            id: id.into(),
            top,
            height,
        }
    }

    fn contains(&self, position: f64) -> bool {
        position >= self.top && position < self.top + self.height
    }
}

/// Returns the id of the section whose `[top, top + height)` range contains
/// `scroll_y + HEADER_OFFSET`. The first section in document order wins.
/// Near the top of the page the home section is the fallback; further down
/// a miss returns `None` and the caller leaves link states untouched.
pub fn active_section(sections: &[SectionSpan], scroll_y: f64) -> Option<&str> {
    let probe = scroll_y + HEADER_OFFSET;
    if let Some(section) = sections.iter().find(|section| section.contains(probe)) {
        return Some(&section.id);
    }
    if scroll_y < NEAR_TOP_THRESHOLD {
        return Some(DEFAULT_SECTION_ID);
    }
    None
}

/// Rate limiter for scroll-driven recomputation: at most one pending
/// animation frame at a time, and accumulated deltas must exceed
/// [`SCROLL_DELTA_THRESHOLD`] before a frame is scheduled at all.
#[derive(Debug, Default)]
pub struct ScrollThrottle {
    ticking: bool,
    last_scroll_top: f64,
}

impl ScrollThrottle {
    pub fn new() -> Self {
        Self::default()
    }

    /// Called from the raw scroll listener. Returns `true` when the caller
    /// should schedule one recomputation for the next animation frame.
    pub fn should_schedule(&mut self, scroll_top: f64) -> bool {
        if self.ticking {
            return false;
        }
        if (scroll_top - self.last_scroll_top).abs() <= SCROLL_DELTA_THRESHOLD {
            return false;
        }
        self.ticking = true;
        self.last_scroll_top = scroll_top;
        true
    }

    /// Called from the animation-frame callback once the recomputation ran.
    pub fn frame_done(&mut self) {
        self.ticking = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn page() -> Vec<SectionSpan> {
        vec![
            SectionSpan::new("home", 0.0, 600.0),
            SectionSpan::new("about", 600.0, 500.0),
            SectionSpan::new("projects", 1100.0, 900.0),
            SectionSpan::new("education", 2000.0, 400.0),
            SectionSpan::new("contact", 2400.0, 600.0),
        ]
    }

    #[test]
    fn top_of_page_is_home() {
        assert_eq!(active_section(&page(), 0.0), Some("home"));
    }

    #[test]
    fn probe_includes_header_offset() {
        // scroll 520 + offset 100 = 620, inside about's [600, 1100).
        assert_eq!(active_section(&page(), 520.0), Some("about"));
    }

    #[test]
    fn range_end_is_exclusive() {
        // probe exactly at about's end (1100) belongs to projects.
        assert_eq!(active_section(&page(), 1000.0), Some("projects"));
    }

    #[test]
    fn scroll_inside_projects_activates_projects() {
        assert_eq!(active_section(&page(), 1500.0), Some("projects"));
    }

    #[test]
    fn first_section_wins_on_overlap() {
        let overlapping = vec![
            SectionSpan::new("about", 500.0, 800.0),
            SectionSpan::new("projects", 900.0, 800.0),
        ];
        assert_eq!(active_section(&overlapping, 900.0), Some("about"));
    }

    #[test]
    fn gap_near_top_falls_back_to_home() {
        let gapped = vec![SectionSpan::new("about", 5000.0, 500.0)];
        assert_eq!(active_section(&gapped, 150.0), Some("home"));
    }

    #[test]
    fn gap_far_from_top_matches_nothing() {
        let gapped = vec![
            SectionSpan::new("home", 0.0, 600.0),
            SectionSpan::new("contact", 5000.0, 500.0),
        ];
        assert_eq!(active_section(&gapped, 3000.0), None);
    }

    #[test]
    fn empty_page_defaults_to_home_only_near_top() {
        assert_eq!(active_section(&[], 0.0), Some("home"));
        assert_eq!(active_section(&[], 199.9), Some("home"));
        assert_eq!(active_section(&[], 200.0), None);
    }

    #[test]
    fn throttle_schedules_once_per_frame() {
        let mut throttle = ScrollThrottle::new();
        assert!(throttle.should_schedule(50.0));
        // Rapid-fire events before the frame runs are all suppressed.
        assert!(!throttle.should_schedule(80.0));
        assert!(!throttle.should_schedule(120.0));
        throttle.frame_done();
        assert!(throttle.should_schedule(120.0));
    }

    #[test]
    fn throttle_ignores_small_deltas() {
        let mut throttle = ScrollThrottle::new();
        assert!(!throttle.should_schedule(5.0));
        assert!(!throttle.should_schedule(3.0));
        assert!(throttle.should_schedule(5.1));
        throttle.frame_done();
        // Delta measured from the last accepted position.
        assert!(!throttle.should_schedule(8.0));
        assert!(throttle.should_schedule(11.0));
    }
}
