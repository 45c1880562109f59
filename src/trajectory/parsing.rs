use crate::orbit::StateVector;
use crate::trajectory::TrajectoryError;

const FIELDS_PER_RECORD: usize = 6;

/// Parses whitespace separated `X Y Z VX VY VZ [...]` records.
///
/// A first line that is not entirely numeric is taken as a column header.
/// Lines with fewer than six fields are ignored; only the first six fields
/// of a record are used.
pub fn parse_records(content: &str) -> Result<Vec<StateVector>, TrajectoryError> {
    let mut lines = content
        .lines()
        .enumerate()
        .map(|(i, l)| (i + 1, l.trim()))
        .filter(|(_, l)| !l.is_empty())
        .peekable();

    if let Some((_, first)) = lines.peek() {
        if is_header(first) {
            lines.next();
        }
    }

    let mut states = Vec::new();
    for (line, text) in lines {
        let fields: Vec<&str> = text.split_whitespace().collect();
        if fields.len() < FIELDS_PER_RECORD {
            continue;
        }

        let values = fields[..FIELDS_PER_RECORD]
            .iter()
            .map(|f| f.parse::<f64>())
            .collect::<Result<Vec<_>, _>>()
            .map_err(|e| TrajectoryError::Parse {
                line,
                message: e.to_string(),
            })?;

        if let Some(state) = StateVector::from_slice(&values) {
            states.push(state);
        }
    }

    Ok(states)
}

fn is_header(line: &str) -> bool {
    line.split_whitespace().any(|f| f.parse::<f64>().is_err())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn skips_header_and_short_lines() {
        let content = "\
X Y Z VX VY VZ
7000 0 0 0 7.5 0

1 2 3
-4200.5 5100 300 -5.1 -4.0 2.2 12.0 extra
";
        let states = parse_records(content).unwrap();
        assert_eq!(states.len(), 2);
        assert_eq!(states[0].to_array(), [7000.0, 0.0, 0.0, 0.0, 7.5, 0.0]);
        assert_eq!(states[1].position, [-4200.5, 5100.0, 300.0]);
        assert_eq!(states[1].velocity, [-5.1, -4.0, 2.2]);
    }

    #[test]
    fn accepts_headerless_scientific_notation() {
        let states = parse_records("7.0e3 0 0 0 7.5e0 0\n").unwrap();
        assert_eq!(states.len(), 1);
        assert_eq!(states[0].position[0], 7000.0);
    }

    #[test]
    fn empty_input_is_empty_trajectory() {
        assert!(parse_records("").unwrap().is_empty());
        assert!(parse_records("X Y Z VX VY VZ\n").unwrap().is_empty());
    }

    #[test]
    fn bad_number_reports_line() {
        let err = parse_records("1 2 3 4 5 6\n1 2 oops 4 5 6\n").unwrap_err();
        match err {
            TrajectoryError::Parse { line, .. } => assert_eq!(line, 2),
            other => panic!("unexpected error: {other}"),
        }
    }
}
