#[cfg(test)]
mod proptests {
    use cr_core::types::{Section, SectionStatus};
    use proptest::prelude::*;

    use crate::progress::classify;

    /// Random non-overlapping, seq-ordered section lists.
    fn arb_sections() -> impl Strategy<Value = Vec<Section>> {
        prop::collection::vec((1u64..20, 0u64..30, 1u64..50), 1..10).prop_map(|specs| {
            let mut next = 0u64;
            specs
                .into_iter()
                .enumerate()
                .map(|(i, (gap, len, count))| {
                    let min_seq = next + gap;
                    let max_seq = min_seq + len;
                    next = max_seq + 1;
                    Section {
                        title: format!("Section {i}"),
                        min_seq,
                        max_seq,
                        count,
                    }
                })
                .collect()
        })
    }

    proptest! {
        #[test]
        fn test_classification_law(sections in arb_sections(), boundary in 0u64..400) {
            for section in &sections {
                let status = classify(section, Some(boundary));
                if section.min_seq <= boundary && boundary <= section.max_seq {
                    prop_assert_eq!(status, SectionStatus::Current);
                } else if section.max_seq <= boundary {
                    prop_assert_eq!(status, SectionStatus::Done);
                } else {
                    prop_assert_eq!(status, SectionStatus::Pending);
                }
            }
        }

        #[test]
        fn test_at_most_one_current_section(sections in arb_sections(), boundary in 0u64..400) {
            let current = sections
                .iter()
                .filter(|s| classify(s, Some(boundary)) == SectionStatus::Current)
                .count();
            prop_assert!(current <= 1);
        }

        #[test]
        fn test_unset_boundary_leaves_everything_pending(sections in arb_sections()) {
            for section in &sections {
                prop_assert_eq!(classify(section, None), SectionStatus::Pending);
            }
        }

        #[test]
        fn test_boundary_at_section_end_marks_it_current_not_done(sections in arb_sections()) {
            for section in &sections {
                prop_assert_eq!(
                    classify(section, Some(section.max_seq)),
                    SectionStatus::Current
                );
            }
        }
    }
}
