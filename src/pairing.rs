// src/pairing.rs

use crate::rectangle::{RectId, Rectangle};

/// The two rectangles whose areas differ the least.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ClosestPair {
    pub first: RectId,
    pub second: RectId,
    /// `second.area - first.area`, never negative.
    pub gap: f64,
}

/// Finds the pair of rectangles with the smallest area difference.
///
/// Sorts a copy by area (stable, so equal areas keep insertion order) and scans
/// adjacent pairs: the global minimum gap is always between sorted neighbours.
/// On equal gaps the leftmost pair in sorted order wins. `first` is the smaller
/// of the two. Returns `None` for fewer than two rectangles.
pub fn closest_areas(rects: &[Rectangle]) -> Option<ClosestPair> {
    if rects.len() < 2 {
        return None;
    }

    let mut sorted: Vec<&Rectangle> = rects.iter().collect();
    sorted.sort_by(|a, b| a.area().total_cmp(&b.area()));

    let mut best: Option<ClosestPair> = None;
    for pair in sorted.windows(2) {
        let gap = pair[1].area() - pair[0].area();
        if best.is_none_or(|b| gap < b.gap) {
            best = Some(ClosestPair { first: pair[0].id(), second: pair[1].id(), gap });
        }
    }
    best
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rectangle::Rgb;
    use druid::Point;
    use rstest::rstest;

    fn rects_with_areas(areas: &[f64]) -> Vec<Rectangle> {
        areas
            .iter()
            .enumerate()
            .map(|(i, &a)| {
                let mut r = Rectangle::new(RectId(i as u64), Point::ZERO, Rgb::new(0, 0, 0));
                r.stretch_to(Point::new(a, 1.0));
                r
            })
            .collect()
    }

    #[test]
    fn fewer_than_two_is_none() {
        assert_eq!(closest_areas(&[]), None);
        assert_eq!(closest_areas(&rects_with_areas(&[3.0])), None);
    }

    #[rstest]
    #[case(&[1.0, 4.0, 10.0, 11.0], 2, 3, 1.0)]
    #[case(&[11.0, 1.0, 10.0, 4.0], 2, 0, 1.0)]
    #[case(&[5.0, 5.0], 0, 1, 0.0)]
    #[case(&[100.0, 7.0, 50.0, 7.0], 1, 3, 0.0)]
    // gaps 2 and 2: the first one in sorted order wins
    #[case(&[6.0, 4.0, 2.0], 2, 1, 2.0)]
    fn picks_smallest_gap(
        #[case] areas: &[f64],
        #[case] first: u64,
        #[case] second: u64,
        #[case] gap: f64,
    ) {
        let pair = closest_areas(&rects_with_areas(areas)).unwrap();
        assert_eq!(pair.first, RectId(first));
        assert_eq!(pair.second, RectId(second));
        assert_eq!(pair.gap, gap);
    }

    #[test]
    fn input_order_is_untouched() {
        let rects = rects_with_areas(&[9.0, 1.0, 5.0]);
        closest_areas(&rects);
        let ids: Vec<_> = rects.iter().map(Rectangle::id).collect();
        assert_eq!(ids, vec![RectId(0), RectId(1), RectId(2)]);
    }
}
