use tracing::debug;

use crate::error::{MixingError, Result};
use crate::model::age_group::AgeGroup;
use crate::model::matrix::MixingMatrix;

/// Aggregate a population-scaled matrix into `new_groups`.
///
/// Cell `(A, B)` of the result is the sum of every scaled cell `(a, b)` with
/// `a` inside `A` and `b` inside `B`. Source groups not inside any target
/// group contribute nothing; a source group inside two overlapping targets
/// counts towards both. Use [`rebin_checked`] to reject such target lists.
pub fn rebin(scaled: &MixingMatrix, new_groups: &[AgeGroup]) -> Result<MixingMatrix> {
    if new_groups.is_empty() {
        return Err(MixingError::data_format("no target age groups given"));
    }

    // members[k]: source indices inside new_groups[k], in source order so the
    // summation order matches a full scan of the source matrix.
    let members: Vec<Vec<usize>> = new_groups
        .iter()
        .map(|target| {
            scaled
                .groups()
                .iter()
                .enumerate()
                .filter(|(_, g)| g.is_within(target))
                .map(|(i, _)| i)
                .collect()
        })
        .collect();

    for (i, g) in scaled.groups().iter().enumerate() {
        if !members.iter().any(|m| m.contains(&i)) {
            debug!(group = %g, "source group is not inside any target group; its cells are dropped");
        }
    }

    MixingMatrix::from_fn(new_groups.to_vec(), |a, b| {
        let mut sum = 0.0;
        for &i in &members[a] {
            for &j in &members[b] {
                sum += scaled.at(i, j);
            }
        }
        sum
    })
}

/// Like [`rebin`], but first requires `new_groups` to tile the source groups.
pub fn rebin_checked(scaled: &MixingMatrix, new_groups: &[AgeGroup]) -> Result<MixingMatrix> {
    check_tiling(scaled.groups(), new_groups)?;
    rebin(scaled, new_groups)
}

/// Verify that target groups do not overlap one another and that every source
/// group sits inside exactly one target group.
pub fn check_tiling(source: &[AgeGroup], targets: &[AgeGroup]) -> Result<()> {
    let mut problems = Vec::new();

    for (k, a) in targets.iter().enumerate() {
        for b in &targets[k + 1..] {
            if a.overlaps(b) {
                problems.push(format!("targets '{}' and '{}' overlap", a, b));
            }
        }
    }

    for g in source {
        let hits = targets.iter().filter(|t| g.is_within(t)).count();
        if hits == 0 {
            if targets.iter().any(|t| g.overlaps(t)) {
                problems.push(format!("'{}' straddles a target boundary", g));
            } else {
                problems.push(format!("'{}' is not covered by any target", g));
            }
        }
    }

    if problems.is_empty() {
        Ok(())
    } else {
        Err(MixingError::Tiling(problems.join("; ")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::age_group::parse_groups;

    fn matrix(labels: &[&str], values: Vec<f64>) -> MixingMatrix {
        MixingMatrix::new(parse_groups(labels).unwrap(), values).unwrap()
    }

    #[test]
    fn sums_contained_blocks() {
        let m = matrix(
            &["0-4", "5-9", "10-14"],
            vec![
                1.0, 2.0, 3.0, //
                4.0, 5.0, 6.0, //
                7.0, 8.0, 9.0,
            ],
        );
        let out = rebin(&m, &parse_groups(&["0-9", "10-14"]).unwrap()).unwrap();
        assert_eq!(out.get("0-9", "0-9"), Some(12.0));
        assert_eq!(out.get("0-9", "10-14"), Some(9.0));
        assert_eq!(out.get("10-14", "0-9"), Some(15.0));
        assert_eq!(out.get("10-14", "10-14"), Some(9.0));
    }

    #[test]
    fn uncovered_groups_are_dropped() {
        let m = matrix(&["0-4", "5-9"], vec![1.0, 2.0, 3.0, 4.0]);
        let out = rebin(&m, &parse_groups(&["0-4"]).unwrap()).unwrap();
        assert_eq!(out.len(), 1);
        assert_eq!(out.get("0-4", "0-4"), Some(1.0));
    }

    #[test]
    fn straddling_group_contributes_nothing() {
        let m = matrix(&["0-9"], vec![5.0]);
        let out = rebin(&m, &parse_groups(&["0-4", "5-9"]).unwrap()).unwrap();
        assert_eq!(out.total(), 0.0);
    }

    #[test]
    fn overlapping_targets_double_count() {
        let m = matrix(&["0-4", "5-9"], vec![1.0, 0.0, 0.0, 1.0]);
        let out = rebin(&m, &parse_groups(&["0-9", "0-4"]).unwrap()).unwrap();
        assert_eq!(out.get("0-9", "0-9"), Some(2.0));
        assert_eq!(out.get("0-4", "0-4"), Some(1.0));
        assert_eq!(out.get("0-9", "0-4"), Some(1.0));
    }

    #[test]
    fn empty_or_duplicate_targets_rejected() {
        let m = matrix(&["0-4"], vec![1.0]);
        assert!(rebin(&m, &[]).is_err());
        let dup = parse_groups(&["0-4", "0-4"]).unwrap();
        assert!(matches!(rebin(&m, &dup), Err(MixingError::DataFormat(_))));
    }

    #[test]
    fn tiling_check_accepts_exact_cover() {
        let src = parse_groups(&["0-4", "5-9", "10-14"]).unwrap();
        let tgt = parse_groups(&["0-9", "10-14"]).unwrap();
        assert!(check_tiling(&src, &tgt).is_ok());
    }

    #[test]
    fn tiling_check_reports_each_problem() {
        let src = parse_groups(&["0-4", "5-9", "10-14", "15-19"]).unwrap();
        let tgt = parse_groups(&["0-6", "5-12"]).unwrap();
        let msg = match check_tiling(&src, &tgt) {
            Err(MixingError::Tiling(msg)) => msg,
            other => panic!("expected tiling error, got {:?}", other),
        };
        assert!(msg.contains("'0-6' and '5-12' overlap"), "{msg}");
        assert!(msg.contains("'10-14' straddles"), "{msg}");
        assert!(msg.contains("'15-19' is not covered"), "{msg}");
    }

    #[test]
    fn checked_rebin_refuses_gaps() {
        let m = matrix(&["0-4", "5-9"], vec![1.0; 4]);
        let err = rebin_checked(&m, &parse_groups(&["0-4"]).unwrap()).unwrap_err();
        assert!(matches!(err, MixingError::Tiling(_)));
    }
}
