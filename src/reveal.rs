//! Exactly-once reveal tracking for content blocks.
//!
//! Blocks are registered with their line ranges; as the viewport moves,
//! each block is reported revealed the first time enough of it enters the
//! visible window, and never again. Unrevealed blocks render dimmed, so
//! content appears to "develop" as the reader scrolls.
//!
//! A bottom margin keeps blocks hidden until they are a few rows inside
//! the window, and a threshold requires a fraction of the block to be
//! visible before it counts as seen.

use std::ops::Range;

/// Rows a block must clear past the bottom edge before it can reveal.
const DEFAULT_MARGIN: usize = 2;
/// Fraction of a block that must be visible before it reveals.
const DEFAULT_THRESHOLD: f64 = 0.1;

#[derive(Debug, Clone)]
struct ObservedBlock {
    id: usize,
    lines: Range<usize>,
    revealed: bool,
}

/// Tracks which content blocks have entered the viewport.
#[derive(Debug, Clone)]
pub struct RevealTracker {
    blocks: Vec<ObservedBlock>,
    margin: usize,
    threshold: f64,
}

impl Default for RevealTracker {
    fn default() -> Self {
        Self::new(DEFAULT_MARGIN, DEFAULT_THRESHOLD)
    }
}

impl RevealTracker {
    pub fn new(margin: usize, threshold: f64) -> Self {
        Self {
            blocks: Vec::new(),
            margin,
            threshold: threshold.clamp(0.0, 1.0),
        }
    }

    /// Observe a block of content lines.
    pub fn observe(&mut self, id: usize, lines: Range<usize>) {
        self.blocks.push(ObservedBlock {
            id,
            lines,
            revealed: false,
        });
    }

    /// Replace the observed blocks after a reflow, carrying over reveal
    /// state for ids that were already seen.
    pub fn reobserve(&mut self, blocks: impl IntoIterator<Item = (usize, Range<usize>)>) {
        let seen: Vec<usize> = self
            .blocks
            .iter()
            .filter(|b| b.revealed)
            .map(|b| b.id)
            .collect();

        self.blocks = blocks
            .into_iter()
            .map(|(id, lines)| ObservedBlock {
                id,
                lines,
                revealed: seen.contains(&id),
            })
            .collect();
    }

    /// Report the visible window and collect newly revealed block ids.
    ///
    /// Each id is returned at most once over the tracker's lifetime.
    pub fn update(&mut self, top: usize, height: usize) -> Vec<usize> {
        let bottom = (top + height).saturating_sub(self.margin);
        let mut newly = Vec::new();

        for block in &mut self.blocks {
            if block.revealed || block.lines.is_empty() {
                continue;
            }
            let visible_start = block.lines.start.max(top);
            let visible_end = block.lines.end.min(bottom);
            let visible = visible_end.saturating_sub(visible_start);
            let fraction = visible as f64 / block.lines.len() as f64;
            if fraction >= self.threshold && visible > 0 {
                block.revealed = true;
                newly.push(block.id);
            }
        }

        newly
    }

    /// Whether a block has been revealed.
    pub fn is_revealed(&self, id: usize) -> bool {
        self.blocks.iter().any(|b| b.id == id && b.revealed)
    }

    /// Stop observing everything.
    pub fn disconnect(&mut self) {
        self.blocks.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blocks_reveal_exactly_once() {
        let mut tracker = RevealTracker::new(0, 0.1);
        tracker.observe(0, 0..5);
        tracker.observe(1, 10..15);

        let newly = tracker.update(0, 8);
        assert_eq!(newly, vec![0]);

        // Same window again: nothing new.
        assert!(tracker.update(0, 8).is_empty());

        // Scroll down past the second block.
        assert_eq!(tracker.update(8, 10), vec![1]);
        assert!(tracker.is_revealed(0));
        assert!(tracker.is_revealed(1));

        // Scrolling back up re-reveals nothing.
        assert!(tracker.update(0, 8).is_empty());
    }

    #[test]
    fn test_margin_delays_reveal() {
        let mut tracker = RevealTracker::new(3, 0.5);
        tracker.observe(0, 8..12);

        // Block starts at the window's bottom edge: margin hides it.
        assert!(tracker.update(0, 10).is_empty());

        // Deep enough inside the window to clear margin and threshold.
        assert_eq!(tracker.update(5, 10), vec![0]);
    }

    #[test]
    fn test_threshold_requires_fraction_visible() {
        let mut tracker = RevealTracker::new(0, 0.5);
        tracker.observe(0, 0..10);

        // Only 2 of 10 lines visible: under the 50% threshold.
        assert!(tracker.update(8, 10).is_empty());

        assert_eq!(tracker.update(3, 10), vec![0]);
    }

    #[test]
    fn test_reobserve_carries_reveal_state() {
        let mut tracker = RevealTracker::new(0, 0.1);
        tracker.observe(0, 0..5);
        tracker.observe(1, 10..15);
        tracker.update(0, 8);
        assert!(tracker.is_revealed(0));

        // Reflow moved every block; block 0 stays revealed.
        tracker.reobserve([(0, 0..7), (1, 14..20)]);
        assert!(tracker.is_revealed(0));
        assert!(!tracker.is_revealed(1));
    }

    #[test]
    fn test_disconnect_stops_observation() {
        let mut tracker = RevealTracker::default();
        tracker.observe(0, 0..5);
        tracker.disconnect();

        assert!(tracker.update(0, 50).is_empty());
        assert!(!tracker.is_revealed(0));
    }
}
