//! Closest pair of points in the plane.
//!
//! [`brute_force`] checks every pair. [`closest_pair`] is the divide-and-conquer
//! algorithm: the points are sorted once by x and once by y, the x-order is
//! halved by index, and the y-order is split to match by comparing each
//! point's rank in the x-order against the split rank. Ranks break ties on
//! equal coordinates, so duplicates always land on the same side in both
//! orders. The combine step scans the strip around the dividing line in
//! y-order and stops comparing once the vertical gap reaches the best
//! distance so far.

use std::fmt;

use log::debug;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Point {
    pub x: i64,
    pub y: i64,
}

impl Point {
    pub fn new(x: i64, y: i64) -> Self {
        Self { x, y }
    }
}

impl From<(i64, i64)> for Point {
    fn from((x, y): (i64, i64)) -> Self {
        Self { x, y }
    }
}

impl fmt::Display for Point {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// Euclidean distance. Coordinate gaps are taken unsigned, so the full `i64`
/// range is accepted.
pub fn distance(p: Point, q: Point) -> f64 {
    let dx = p.x.abs_diff(q.x) as f64;
    let dy = p.y.abs_diff(q.y) as f64;
    (dx * dx + dy * dy).sqrt()
}

/// The closest pair found and its distance.
///
/// With fewer than two points there is no pair; see [`ClosestPair::UNDEFINED`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ClosestPair {
    pub pair: Option<(Point, Point)>,
    pub distance: f64,
}

impl ClosestPair {
    pub const UNDEFINED: ClosestPair = ClosestPair {
        pair: None,
        distance: f64::INFINITY,
    };

    pub fn is_undefined(&self) -> bool {
        self.pair.is_none()
    }

    fn of(p: Point, q: Point) -> Self {
        Self {
            pair: Some((p, q)),
            distance: distance(p, q),
        }
    }
}

/// Examines every unordered pair once; ties keep the first pair met.
pub fn brute_force(points: &[Point]) -> ClosestPair {
    let mut best = ClosestPair::UNDEFINED;
    for (i, &p) in points.iter().enumerate() {
        for &q in &points[i + 1..] {
            let d = distance(p, q);
            if d < best.distance {
                best = ClosestPair {
                    pair: Some((p, q)),
                    distance: d,
                };
            }
        }
    }
    best
}

/// Divide-and-conquer closest pair, `O(n log n)`.
pub fn closest_pair(points: &[Point]) -> ClosestPair {
    if points.len() < 2 {
        return ClosestPair::UNDEFINED;
    }

    let mut by_x: Vec<usize> = (0..points.len()).collect();
    by_x.sort_by_key(|&i| (points[i].x, points[i].y, i));

    let mut rank = vec![0; points.len()];
    for (r, &i) in by_x.iter().enumerate() {
        rank[i] = r;
    }

    let mut by_y: Vec<usize> = (0..points.len()).collect();
    by_y.sort_by_key(|&i| (points[i].y, points[i].x, i));

    let search = Recursion {
        points,
        rank: &rank,
    };
    let best = search.closest(&by_x, &by_y);
    debug!(
        "closest pair over {} points: distance {}",
        points.len(),
        best.distance
    );
    best
}

struct Recursion<'a> {
    points: &'a [Point],
    rank: &'a [usize],
}

impl Recursion<'_> {
    /// `by_x` and `by_y` hold the same indices, ordered by x and by y.
    fn closest(&self, by_x: &[usize], by_y: &[usize]) -> ClosestPair {
        if by_x.len() <= 3 {
            let base: Vec<Point> = by_x.iter().map(|&i| self.points[i]).collect();
            return brute_force(&base);
        }

        let mid = by_x.len() / 2;
        let split_rank = self.rank[by_x[mid]];
        let split_x = self.points[by_x[mid]].x;

        let (left_y, right_y): (Vec<usize>, Vec<usize>) =
            by_y.iter().partition(|&&i| self.rank[i] < split_rank);

        let left = self.closest(&by_x[..mid], &left_y);
        let right = self.closest(&by_x[mid..], &right_y);
        let mut best = if left.distance <= right.distance {
            left
        } else {
            right
        };

        let strip: Vec<Point> = by_y
            .iter()
            .map(|&i| self.points[i])
            .filter(|p| (p.x.abs_diff(split_x) as f64) < best.distance)
            .collect();

        for (i, &p) in strip.iter().enumerate() {
            for &q in &strip[i + 1..] {
                if q.y.abs_diff(p.y) as f64 >= best.distance {
                    break;
                }
                if distance(p, q) < best.distance {
                    best = ClosestPair::of(p, q);
                }
            }
        }

        best
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn points(coords: &[(i64, i64)]) -> Vec<Point> {
        coords.iter().copied().map(Point::from).collect()
    }

    #[test]
    fn distance_is_euclidean() {
        assert_eq!(distance(Point::new(1, 2), Point::new(4, 6)), 5.0);
        assert_eq!(distance(Point::new(-3, 0), Point::new(-3, 0)), 0.0);
    }

    #[test]
    fn distance_spans_the_whole_coordinate_range() {
        let far = distance(Point::new(i64::MAX, -1), Point::new(0, 0));
        assert_eq!(far, distance(Point::new(0, 0), Point::new(i64::MAX, -1)));
        assert!((far - 9.223372036854776e18).abs() < 1e4);

        let across = distance(Point::new(i64::MIN, 0), Point::new(i64::MAX, 0));
        assert_eq!(across, u64::MAX as f64);
    }

    #[test]
    fn fewer_than_two_points_is_undefined() {
        for input in [vec![], points(&[(1, 1)])] {
            for result in [brute_force(&input), closest_pair(&input)] {
                assert!(result.is_undefined());
                assert!(result.distance.is_infinite());
            }
        }
    }

    #[test]
    fn three_point_example() {
        let input = points(&[(0, 0), (3, 4), (0, 1)]);
        let expected = ClosestPair {
            pair: Some((Point::new(0, 0), Point::new(0, 1))),
            distance: 1.0,
        };
        assert_eq!(brute_force(&input), expected);
        assert_eq!(closest_pair(&input), expected);
    }

    #[test]
    fn brute_force_keeps_first_tie() {
        let input = points(&[(0, 0), (0, 2), (5, 5), (5, 7)]);
        let result = brute_force(&input);
        assert_eq!(result.pair, Some((Point::new(0, 0), Point::new(0, 2))));
        assert_eq!(result.distance, 2.0);
    }

    #[test]
    fn pair_straddling_the_split_is_found_in_the_strip() {
        // Split falls between x = 4 and x = 5.
        let input = points(&[(0, 0), (9, 40), (4, 9), (5, 9), (12, 0), (1, 30)]);
        let result = closest_pair(&input);
        assert_eq!(result.distance, 1.0);
        let (p, q) = result.pair.unwrap();
        assert_eq!(
            [p.min(q), p.max(q)],
            [Point::new(4, 9), Point::new(5, 9)]
        );
    }

    #[test]
    fn duplicates_give_zero_distance() {
        let input = points(&[(7, 7), (1, 1), (3, 3), (7, 7), (9, 2), (7, 7), (0, 5)]);
        assert_eq!(closest_pair(&input).distance, 0.0);

        let all_same = vec![Point::new(2, 2); 9];
        assert_eq!(closest_pair(&all_same).distance, 0.0);
    }

    #[test]
    fn input_is_not_reordered() {
        let input = points(&[(5, 1), (2, 8), (9, 9), (1, 1), (6, 2)]);
        let before = input.clone();
        let first = closest_pair(&input);
        assert_eq!(input, before);
        assert_eq!(closest_pair(&input), first);
        assert_eq!(brute_force(&input), brute_force(&input));
    }
}
