//! Per-node analysis of evaluated class values: duplicates, extractable
//! repetitions, conflicting utilities, and unknown classes.
//!
//! Works purely on `ClassOccurrence` tag sets; the only outside knowledge is
//! the oracle. Everything here is pairwise co-residency reasoning: two
//! occurrences matter to each other only when some execution path renders
//! both at once.

use std::collections::{HashMap, HashSet};

use crate::core::design::{ClassOracle, ConflictGroup};
use crate::core::resolve::occurrence::{ClassOccurrence, ClassValue, ConditionalId};

/// One analysis result before it is located in source and turned into an
/// `Issue`. Occurrence indices refer to the flattened occurrence list of the
/// node, in evaluation order.
#[derive(Debug, Clone, PartialEq)]
pub enum Finding {
    /// A co-resident cluster of the same class text, size >= 2.
    Duplicate {
        text: String,
        occurrences: Vec<ClassOccurrence>,
    },
    /// The same text appears in two or more arms of one conditional and
    /// nowhere outside it.
    Extractable {
        text: String,
        occurrences: Vec<ClassOccurrence>,
    },
    /// Two different class texts with the same conflict group can render
    /// together.
    Conflict {
        text: String,
        other: String,
        axis: String,
        occurrences: Vec<ClassOccurrence>,
    },
    /// The oracle does not know this class.
    Invalid { occurrence: ClassOccurrence },
}

/// Analyze the class values gathered from one markup node (or one builder
/// analysis unit). The caller guarantees the oracle is initialized.
pub fn analyze_node(values: &[ClassValue], oracle: &dyn ClassOracle) -> Vec<Finding> {
    let occurrences: Vec<&ClassOccurrence> =
        values.iter().flat_map(|v| v.occurrences.iter()).collect();
    if occurrences.is_empty() {
        return Vec::new();
    }

    // Group indices by class text, first appearance order.
    let mut order: Vec<&str> = Vec::new();
    let mut groups: HashMap<&str, Vec<usize>> = HashMap::new();
    for (i, occ) in occurrences.iter().enumerate() {
        let entry = groups.entry(occ.text.as_str()).or_default();
        if entry.is_empty() {
            order.push(occ.text.as_str());
        }
        entry.push(i);
    }

    let mut findings = Vec::new();
    let mut duplicate_texts: HashSet<&str> = HashSet::new();

    for &text in &order {
        let members = &groups[text];
        for cluster in co_resident_clusters(&occurrences, members) {
            if cluster.len() < 2 {
                continue;
            }
            duplicate_texts.insert(text);
            findings.push(Finding::Duplicate {
                text: text.to_string(),
                occurrences: cluster.iter().map(|&i| occurrences[i].clone()).collect(),
            });
        }
    }

    // Extractable: fires at most once per text and never alongside a
    // duplicate for the same text (the duplicate is the stronger signal).
    for &text in &order {
        if duplicate_texts.contains(text) {
            continue;
        }
        let members = &groups[text];
        if members.len() < 2 {
            continue;
        }
        if covering_conditional(&occurrences, members).is_some() {
            findings.push(Finding::Extractable {
                text: text.to_string(),
                occurrences: members.iter().map(|&i| occurrences[i].clone()).collect(),
            });
        }
    }

    // Conflicts: classify each distinct text once, then test distinct-text
    // pairs for a shared group and at least one co-resident pairing.
    let classified: Vec<(&str, ConflictGroup)> = order
        .iter()
        .filter_map(|&text| oracle.classify_for_conflicts(text).map(|g| (text, g)))
        .collect();
    for (i, (text_a, group_a)) in classified.iter().enumerate() {
        for (text_b, group_b) in classified.iter().skip(i + 1) {
            if group_a != group_b {
                continue;
            }
            let mut involved: Vec<usize> = Vec::new();
            for &a in &groups[text_a] {
                for &b in &groups[text_b] {
                    if occurrences[a].co_resident(occurrences[b]) {
                        if !involved.contains(&a) {
                            involved.push(a);
                        }
                        if !involved.contains(&b) {
                            involved.push(b);
                        }
                    }
                }
            }
            if !involved.is_empty() {
                involved.sort_unstable();
                findings.push(Finding::Conflict {
                    text: text_a.to_string(),
                    other: text_b.to_string(),
                    axis: group_a.axis.clone(),
                    occurrences: involved.iter().map(|&i| occurrences[i].clone()).collect(),
                });
            }
        }
    }

    // Invalid: one finding per distinct source span.
    let mut seen_spans: HashSet<(u32, u32)> = HashSet::new();
    for occ in &occurrences {
        if oracle.is_valid_class(&occ.text) {
            continue;
        }
        if seen_spans.insert((occ.start, occ.length)) {
            findings.push(Finding::Invalid {
                occurrence: (*occ).clone(),
            });
        }
    }

    findings
}

/// Partition a text group into maximal clusters connected by co-residency.
/// A root occurrence bridges the two arms of a ternary into one cluster even
/// though the arms exclude each other.
fn co_resident_clusters(occurrences: &[&ClassOccurrence], members: &[usize]) -> Vec<Vec<usize>> {
    let mut clusters: Vec<Vec<usize>> = Vec::new();
    let mut assigned: HashSet<usize> = HashSet::new();

    for &seed in members {
        if assigned.contains(&seed) {
            continue;
        }
        let mut cluster = vec![seed];
        assigned.insert(seed);
        let mut frontier = vec![seed];
        while let Some(current) = frontier.pop() {
            for &candidate in members {
                if !assigned.contains(&candidate)
                    && occurrences[current].co_resident(occurrences[candidate])
                {
                    assigned.insert(candidate);
                    cluster.push(candidate);
                    frontier.push(candidate);
                }
            }
        }
        cluster.sort_unstable();
        clusters.push(cluster);
    }
    clusters
}

/// A conditional that every member is tagged with, taking at least two
/// different arms across the group. Such a group renders the same class
/// whichever arm is chosen, so the class can be hoisted out.
fn covering_conditional(
    occurrences: &[&ClassOccurrence],
    members: &[usize],
) -> Option<ConditionalId> {
    let first = occurrences[members[0]];
    'candidates: for tag in &first.tags {
        let mut arms: HashSet<u8> = HashSet::new();
        for &i in members {
            match occurrences[i].arm_of(tag.conditional) {
                Some(arm) => {
                    arms.insert(arm);
                }
                // A member outside the conditional means the class already
                // renders unconditionally relative to it.
                None => continue 'candidates,
            }
        }
        if arms.len() >= 2 {
            return Some(tag.conditional);
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use std::collections::{HashMap, HashSet};

    use crate::core::analyze::conflicts::*;
    use crate::core::design::{ClassOracle, ConflictGroup};
    use crate::core::resolve::occurrence::{BranchTag, ClassOccurrence, ClassValue};

    /// Test oracle with a fixed vocabulary and axis table.
    struct TableOracle {
        known: HashSet<&'static str>,
        axes: HashMap<&'static str, &'static str>,
    }

    impl TableOracle {
        fn new() -> Self {
            let known = ["flex", "block", "grid", "p-2", "p-4", "text-sm", "text-lg", "mx-auto"]
                .into_iter()
                .collect();
            let axes = [
                ("flex", "display"),
                ("block", "display"),
                ("grid", "display"),
                ("p-2", "padding"),
                ("p-4", "padding"),
                ("text-sm", "font-size"),
                ("text-lg", "font-size"),
            ]
            .into_iter()
            .collect();
            Self { known, axes }
        }
    }

    impl ClassOracle for TableOracle {
        fn is_initialized(&self) -> bool {
            true
        }

        fn is_valid_class(&self, text: &str) -> bool {
            self.known.contains(text)
        }

        fn classify_for_conflicts(&self, text: &str) -> Option<ConflictGroup> {
            self.axes.get(text).map(|&axis| ConflictGroup {
                variants: Vec::new(),
                axis: axis.to_string(),
            })
        }
    }

    fn occ(text: &str, start: u32, tags: &[(u32, u8)]) -> ClassOccurrence {
        let mut o = ClassOccurrence::new(text, start, text.len() as u32);
        o.tags = tags.iter().map(|&(c, a)| BranchTag::new(c, a)).collect();
        o
    }

    fn value(occs: Vec<ClassOccurrence>) -> ClassValue {
        ClassValue::from_occurrences(occs)
    }

    fn count<F: Fn(&Finding) -> bool>(findings: &[Finding], f: F) -> usize {
        findings.iter().filter(|x| f(x)).count()
    }

    #[test]
    fn test_unconditional_duplicate() {
        let v = value(vec![occ("flex", 0, &[]), occ("flex", 10, &[])]);
        let findings = analyze_node(&[v], &TableOracle::new());
        assert_eq!(count(&findings, |f| matches!(f, Finding::Duplicate { .. })), 1);
    }

    #[test]
    fn test_opposite_arms_are_not_duplicates() {
        let v = value(vec![occ("flex", 0, &[(0, 0)]), occ("flex", 10, &[(0, 1)])]);
        let findings = analyze_node(&[v], &TableOracle::new());
        assert_eq!(count(&findings, |f| matches!(f, Finding::Duplicate { .. })), 0);
        // ...but they are extractable: same class whichever arm runs.
        assert_eq!(count(&findings, |f| matches!(f, Finding::Extractable { .. })), 1);
    }

    #[test]
    fn test_root_bridges_both_arms_into_one_cluster() {
        // flex unconditionally plus flex in each ternary arm: one duplicate
        // cluster of three, no extractable hint.
        let v = value(vec![
            occ("flex", 0, &[]),
            occ("flex", 10, &[(0, 0)]),
            occ("flex", 20, &[(0, 1)]),
        ]);
        let findings = analyze_node(&[v], &TableOracle::new());
        let dupes: Vec<_> = findings
            .iter()
            .filter_map(|f| match f {
                Finding::Duplicate { occurrences, .. } => Some(occurrences.len()),
                _ => None,
            })
            .collect();
        assert_eq!(dupes, vec![3]);
        assert_eq!(count(&findings, |f| matches!(f, Finding::Extractable { .. })), 0);
    }

    #[test]
    fn test_conflict_between_co_resident_axis_classes() {
        let v = value(vec![occ("p-2", 0, &[]), occ("p-4", 10, &[])]);
        let findings = analyze_node(&[v], &TableOracle::new());
        match findings.iter().find(|f| matches!(f, Finding::Conflict { .. })) {
            Some(Finding::Conflict { text, other, axis, .. }) => {
                assert_eq!(text, "p-2");
                assert_eq!(other, "p-4");
                assert_eq!(axis, "padding");
            }
            other => panic!("expected a conflict, got {other:?}"),
        }
    }

    #[test]
    fn test_exclusive_arms_do_not_conflict() {
        let v = value(vec![occ("p-2", 0, &[(0, 0)]), occ("p-4", 10, &[(0, 1)])]);
        let findings = analyze_node(&[v], &TableOracle::new());
        assert_eq!(count(&findings, |f| matches!(f, Finding::Conflict { .. })), 0);
    }

    #[test]
    fn test_variant_axis_options_never_flag_each_other() {
        // Three options of one axis: pairwise exclusive.
        let v = value(vec![
            occ("text-sm", 0, &[(3, 0)]),
            occ("text-lg", 10, &[(3, 1)]),
            occ("flex", 20, &[(3, 2)]),
        ]);
        let findings = analyze_node(&[v], &TableOracle::new());
        assert!(findings.is_empty());
    }

    #[test]
    fn test_invalid_reported_once_per_span() {
        // The same declaration span reached twice stays one finding.
        let v = value(vec![occ("flexx", 5, &[]), occ("flexx", 5, &[])]);
        let findings = analyze_node(&[v], &TableOracle::new());
        assert_eq!(count(&findings, |f| matches!(f, Finding::Invalid { .. })), 1);
    }

    #[test]
    fn test_invalid_in_one_arm_still_reported() {
        let v = value(vec![occ("flexx", 0, &[(0, 0)]), occ("block", 10, &[(0, 1)])]);
        let findings = analyze_node(&[v], &TableOracle::new());
        assert_eq!(count(&findings, |f| matches!(f, Finding::Invalid { .. })), 1);
    }

    #[test]
    fn test_unknown_class_has_no_conflict_group() {
        // mx-auto is known but carries no axis; it conflicts with nothing.
        let v = value(vec![occ("mx-auto", 0, &[]), occ("flex", 10, &[])]);
        let findings = analyze_node(&[v], &TableOracle::new());
        assert!(findings.is_empty());
    }

    #[test]
    fn test_cross_attribute_occurrences_are_one_unit() {
        // Duplicate across two attribute values of the same element.
        let a = value(vec![occ("flex", 0, &[])]);
        let b = value(vec![occ("flex", 40, &[])]);
        let findings = analyze_node(&[a, b], &TableOracle::new());
        assert_eq!(count(&findings, |f| matches!(f, Finding::Duplicate { .. })), 1);
    }

    #[test]
    fn test_extractable_requires_full_coverage() {
        // flex in arm 0 and unconditionally: not extractable (and the pair is
        // co-resident, so it is a duplicate instead).
        let v = value(vec![occ("flex", 0, &[(0, 0)]), occ("flex", 10, &[])]);
        let findings = analyze_node(&[v], &TableOracle::new());
        assert_eq!(count(&findings, |f| matches!(f, Finding::Extractable { .. })), 0);
        assert_eq!(count(&findings, |f| matches!(f, Finding::Duplicate { .. })), 1);
    }

    #[test]
    fn test_empty_values_produce_nothing() {
        assert!(analyze_node(&[], &TableOracle::new()).is_empty());
        assert!(analyze_node(&[ClassValue::empty()], &TableOracle::new()).is_empty());
    }
}
