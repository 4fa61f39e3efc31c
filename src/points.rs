//! Point files: one line of comma-separated x-coordinates followed by one
//! line of y-coordinates, zipped by position.

use std::fs;
use std::path::Path;

use rand::Rng;

use crate::error::PointsError;
use crate::geometry::Point;

fn parse_line(line: Option<&str>, number: usize) -> Result<Vec<i64>, PointsError> {
    let line = line
        .map(str::trim)
        .filter(|l| !l.is_empty())
        .ok_or(PointsError::MissingLine(number))?;

    line.split(',')
        .map(|token| {
            let token = token.trim();
            token
                .parse::<i64>()
                .map_err(|source| PointsError::InvalidCoordinate {
                    line: number,
                    token: token.to_string(),
                    source,
                })
        })
        .collect()
}

/// Parses the two-line format.
pub fn parse_points(text: &str) -> Result<Vec<Point>, PointsError> {
    let mut lines = text.lines();
    let xs = parse_line(lines.next(), 1)?;
    let ys = parse_line(lines.next(), 2)?;

    if xs.len() != ys.len() {
        return Err(PointsError::LengthMismatch {
            xs: xs.len(),
            ys: ys.len(),
        });
    }

    Ok(xs.into_iter().zip(ys).map(|(x, y)| Point::new(x, y)).collect())
}

pub fn read_points(path: &Path) -> Result<Vec<Point>, PointsError> {
    let text = fs::read_to_string(path).map_err(|source| PointsError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    parse_points(&text)
}

pub fn format_points(points: &[Point]) -> String {
    let join = |coords: Vec<String>| coords.join(",");
    format!(
        "{}\n{}\n",
        join(points.iter().map(|p| p.x.to_string()).collect()),
        join(points.iter().map(|p| p.y.to_string()).collect())
    )
}

pub fn write_points(path: &Path, points: &[Point]) -> Result<(), PointsError> {
    fs::write(path, format_points(points)).map_err(|source| PointsError::Io {
        path: path.to_path_buf(),
        source,
    })
}

/// `count` points with both coordinates drawn uniformly from `-range..=range`.
pub fn random_points<R: Rng + ?Sized>(count: usize, range: i64, rng: &mut R) -> Vec<Point> {
    (0..count)
        .map(|_| Point::new(rng.gen_range(-range..=range), rng.gen_range(-range..=range)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{rngs::StdRng, SeedableRng};

    #[test]
    fn zips_two_lines_positionally() {
        let points = parse_points("1, 3,5\n2,4, -6\n").unwrap();
        assert_eq!(
            points,
            vec![Point::new(1, 2), Point::new(3, 4), Point::new(5, -6)]
        );
    }

    #[test]
    fn missing_lines_are_reported() {
        assert!(matches!(parse_points(""), Err(PointsError::MissingLine(1))));
        assert!(matches!(
            parse_points("1,2,3\n"),
            Err(PointsError::MissingLine(2))
        ));
    }

    #[test]
    fn bad_tokens_and_lengths_are_reported() {
        match parse_points("1,2\n3,x\n") {
            Err(PointsError::InvalidCoordinate { line, token, .. }) => {
                assert_eq!(line, 2);
                assert_eq!(token, "x");
            }
            other => panic!("unexpected {:?}", other),
        }
        assert!(matches!(
            parse_points("1,2,3\n4,5\n"),
            Err(PointsError::LengthMismatch { xs: 3, ys: 2 })
        ));
    }

    #[test]
    fn written_files_read_back() {
        let mut rng = StdRng::seed_from_u64(11);
        let points = random_points(40, 1000, &mut rng);
        assert!(points.iter().all(|p| p.x.abs() <= 1000 && p.y.abs() <= 1000));

        let path = std::env::temp_dir().join(format!("points-{}.txt", std::process::id()));
        write_points(&path, &points).unwrap();
        let read = read_points(&path).unwrap();
        std::fs::remove_file(&path).unwrap();
        assert_eq!(read, points);
    }

    #[test]
    fn missing_file_is_an_io_error() {
        let path = Path::new("/definitely/not/here/points.txt");
        assert!(matches!(read_points(path), Err(PointsError::Io { .. })));
    }
}
