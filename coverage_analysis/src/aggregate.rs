//! Block deduplication and coverage statistics
//!
//! A profile produced with cross-package instrumentation repeats the same
//! block once for every package whose tests exercised it. Occurrences are
//! merged by identity (summing call counts) before anything is counted, so
//! every block votes exactly once.

use std::collections::HashMap;
use std::hash::Hash;

use serde::Serialize;

use crate::block::Block;
use crate::math::percentage;
use crate::standard::CoverageStandard;

/// Coverage statistics for one package.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PackageSummary {
    pub package_name: String,
    pub block_count: usize,
    pub covered_block_count: usize,
    pub uncovered_block_count: usize,
    /// 0-100
    pub coverage_percentage: f64,
}

/// Project wide coverage statistics and the verdict against the standard.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProjectSummary {
    pub package_count: usize,
    pub block_count: usize,
    pub covered_block_count: usize,
    pub uncovered_block_count: usize,
    pub coverage_percentage: f64,
    pub coverage_standard: CoverageStandard,
    pub standard_met: bool,
    /// Sorted by descending whole-number coverage percentage.
    pub package_summaries: Vec<PackageSummary>,
}

/// Groups `items` by `key`, keeping groups in order of first appearance.
fn group_by<T, K, F>(items: impl IntoIterator<Item = T>, mut key: F) -> Vec<(K, Vec<T>)>
where
    K: Eq + Hash + Clone,
    F: FnMut(&T) -> K,
{
    let mut index: HashMap<K, usize> = HashMap::new();
    let mut groups: Vec<(K, Vec<T>)> = Vec::new();

    for item in items {
        let k = key(&item);
        match index.get(&k) {
            Some(&slot) => groups[slot].1.push(item),
            None => {
                index.insert(k.clone(), groups.len());
                groups.push((k, vec![item]));
            }
        }
    }

    groups
}

/// Collapse repeated occurrences of the same block into one block whose
/// call count is the sum of all occurrences.
pub fn merge_blocks(blocks: impl IntoIterator<Item = Block>) -> Vec<Block> {
    group_by(blocks, |block| block.identity.clone())
        .into_iter()
        .filter_map(|(_, occurrences)| {
            let mut occurrences = occurrences.into_iter();
            let mut merged = occurrences.next()?;
            for block in occurrences {
                merged.call_count = merged.call_count.saturating_add(block.call_count);
            }
            Some(merged)
        })
        .collect()
}

fn summarize_package(package_name: String, blocks: &[Block]) -> PackageSummary {
    let block_count = blocks.len();
    let covered_block_count = blocks.iter().filter(|block| block.is_covered()).count();

    PackageSummary {
        package_name,
        block_count,
        covered_block_count,
        uncovered_block_count: block_count - covered_block_count,
        coverage_percentage: percentage(covered_block_count, block_count),
    }
}

/// Merge, group and count `blocks` into a project summary.
///
/// The returned summary is evaluated against a zero standard; call
/// [`ProjectSummary::evaluate`] to apply the configured one.
pub fn aggregate(blocks: impl IntoIterator<Item = Block>) -> ProjectSummary {
    let distinct = merge_blocks(blocks);

    let mut package_summaries: Vec<PackageSummary> =
        group_by(distinct, |block| block.package_name.clone())
            .into_iter()
            .map(|(package_name, blocks)| summarize_package(package_name, &blocks))
            .collect();

    let block_count: usize = package_summaries.iter().map(|p| p.block_count).sum();
    let covered_block_count: usize = package_summaries
        .iter()
        .map(|p| p.covered_block_count)
        .sum();

    // Whole-number comparison only: 66.6 and 66.4 tie and keep grouping order.
    package_summaries.sort_by(|a, b| {
        (b.coverage_percentage as i64).cmp(&(a.coverage_percentage as i64))
    });

    ProjectSummary {
        package_count: package_summaries.len(),
        block_count,
        covered_block_count,
        uncovered_block_count: block_count - covered_block_count,
        coverage_percentage: percentage(covered_block_count, block_count),
        coverage_standard: CoverageStandard::default(),
        standard_met: true,
        package_summaries,
    }
}

#[cfg(test)]
mod tests {
    #![allow(non_snake_case)]

    use super::*;

    fn block(line: &str) -> Block {
        Block::parse(line).unwrap()
    }

    fn blocks(lines: &[&str]) -> Vec<Block> {
        lines.iter().map(|line| block(line)).collect()
    }

    #[test]
    fn group_by__interleaved_keys__then_first_seen_order() {
        let groups = group_by(vec![3, 1, 4, 1, 5, 9, 2, 6], |n| n % 3);
        let keys: Vec<i32> = groups.iter().map(|(k, _)| *k).collect();
        assert_eq!(keys, vec![0, 1, 2]);
        assert_eq!(groups[0].1, vec![3, 9, 6]);
        assert_eq!(groups[1].1, vec![1, 4, 1]);
        assert_eq!(groups[2].1, vec![5, 2]);
    }

    #[test]
    fn merge_blocks__duplicate_identity__then_call_counts_summed() {
        let merged = merge_blocks(blocks(&[
            "github.com/example/pkg/file1.go:10.20,15.30 2 1",
            "github.com/example/pkg/file1.go:10.20,15.30 2 2",
        ]));

        assert_eq!(merged.len(), 1);
        assert_eq!(merged[0].call_count, 3);
        assert_eq!(merged[0].statement_count, 2);
        assert_eq!(merged[0].package_name, "github.com/example/pkg");
    }

    #[test]
    fn merge_blocks__uncovered_then_covered_occurrence__then_covered() {
        let merged = merge_blocks(blocks(&[
            "pkg/a.go:1.1,2.2 1 0",
            "pkg/a.go:1.1,2.2 1 0",
            "pkg/a.go:1.1,2.2 1 4",
        ]));
        assert_eq!(merged.len(), 1);
        assert!(merged[0].is_covered());
    }

    #[test]
    fn merge_blocks__same_file_different_ranges__then_kept_apart() {
        let merged = merge_blocks(blocks(&["pkg/a.go:1.1,2.2 1 0", "pkg/a.go:2.2,3.3 1 1"]));
        assert_eq!(merged.len(), 2);
    }

    #[test]
    fn merge_blocks__huge_counts__then_saturates() {
        let saturated = format!("pkg/a.go:1.1,2.2 1 {}", u64::MAX);
        let merged = merge_blocks(blocks(&[saturated.as_str(), "pkg/a.go:1.1,2.2 1 1"]));
        assert_eq!(merged[0].call_count, u64::MAX);
    }

    #[test]
    fn aggregate__empty__then_zero_summary() {
        let summary = aggregate(Vec::new());
        assert_eq!(summary.package_count, 0);
        assert_eq!(summary.block_count, 0);
        assert_eq!(summary.covered_block_count, 0);
        assert_eq!(summary.uncovered_block_count, 0);
        assert_eq!(summary.coverage_percentage, 0.0);
        assert!(summary.package_summaries.is_empty());
    }

    #[test]
    fn aggregate__two_packages__then_project_totals_are_sums() {
        let summary = aggregate(blocks(&[
            "github.com/example/pkg1/file1.go:10.20,15.30 2 1",
            "github.com/example/pkg1/file1.go:15.30,20.40 2 1",
            "github.com/example/pkg2/file2.go:10.20,15.30 2 0",
            "github.com/example/pkg2/file2.go:15.30,20.40 2 0",
        ]));

        assert_eq!(summary.package_count, 2);
        assert_eq!(summary.block_count, 4);
        assert_eq!(summary.covered_block_count, 2);
        assert_eq!(summary.uncovered_block_count, 2);
        assert_eq!(summary.coverage_percentage, 50.0);

        let first = &summary.package_summaries[0];
        assert_eq!(first.package_name, "github.com/example/pkg1");
        assert_eq!(first.coverage_percentage, 100.0);
        let second = &summary.package_summaries[1];
        assert_eq!(second.package_name, "github.com/example/pkg2");
        assert_eq!(second.uncovered_block_count, 2);
        assert_eq!(second.coverage_percentage, 0.0);
    }

    #[test]
    fn aggregate__duplicates_across_packages__then_counted_once() {
        let summary = aggregate(blocks(&[
            "pkg/a.go:1.1,2.2 1 0",
            "pkg/a.go:2.2,3.3 1 0",
            "pkg/a.go:1.1,2.2 1 1",
            "pkg/a.go:2.2,3.3 1 0",
        ]));
        assert_eq!(summary.block_count, 2);
        assert_eq!(summary.covered_block_count, 1);
        assert_eq!(summary.coverage_percentage, 50.0);
    }

    #[test]
    fn aggregate__uncleaned_directory_spellings__then_one_package() {
        let summary = aggregate(blocks(&[
            "example.com/pkg/a.go:1.1,2.2 1 1",
            "example.com//pkg/b.go:1.1,2.2 1 0",
            "example.com/pkg/./c.go:1.1,2.2 1 1",
        ]));
        assert_eq!(summary.package_count, 1);
        assert_eq!(summary.package_summaries[0].package_name, "example.com/pkg");
        assert_eq!(summary.package_summaries[0].block_count, 3);
    }

    #[test]
    fn aggregate__packages_out_of_order__then_sorted_descending() {
        let summary = aggregate(blocks(&[
            "low/a.go:1.1,2.2 1 0",
            "mid/a.go:1.1,2.2 1 1",
            "mid/a.go:2.2,3.3 1 0",
            "high/a.go:1.1,2.2 1 1",
        ]));
        let names: Vec<&str> = summary
            .package_summaries
            .iter()
            .map(|p| p.package_name.as_str())
            .collect();
        assert_eq!(names, vec!["high", "mid", "low"]);
    }

    #[test]
    fn aggregate__fractional_difference_only__then_first_seen_order_kept() {
        // 2/3 = 66.67% and 200/301 = 66.45% truncate to the same whole percent.
        let mut lines = vec![
            "first/a.go:1.1,1.2 1 1".to_string(),
            "first/a.go:1.2,1.3 1 1".to_string(),
            "first/a.go:1.3,1.4 1 0".to_string(),
        ];
        for i in 0..301 {
            let calls = if i < 200 { 1 } else { 0 };
            lines.push(format!("second/a.go:{i}.1,{i}.2 1 {calls}"));
        }

        let summary = aggregate(lines.iter().map(|line| block(line)));
        assert!(
            summary.package_summaries[1].coverage_percentage
                < summary.package_summaries[0].coverage_percentage
        );
        assert_eq!(summary.package_summaries[0].package_name, "first");

        let mut reversed: Vec<Block> = lines.iter().map(|line| block(line)).collect();
        reversed.rotate_left(3);
        let summary = aggregate(reversed);
        assert_eq!(summary.package_summaries[0].package_name, "second");
    }
}
