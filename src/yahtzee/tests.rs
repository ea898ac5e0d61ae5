#[cfg(test)]
mod tests {
    use crate::yahtzee::{Category, PlayerScoreSheet, ScoreSlot, Section};
    use rstest::rstest;
    use strum::IntoEnumIterator;

    const UPPER: [Category; 6] = [
        Category::Ones,
        Category::Twos,
        Category::Threes,
        Category::Fours,
        Category::Fives,
        Category::Sixes,
    ];

    const LOWER: [Category; 7] = [
        Category::Chance,
        Category::ThreeOfKind,
        Category::FourOfKind,
        Category::FullHouse,
        Category::SmallStraight,
        Category::LargeStraight,
        Category::Yahtzee,
    ];

    fn empty_sheet() -> PlayerScoreSheet {
        PlayerScoreSheet::new(1, "Test Player", 0xFFFF0000)
    }

    fn with_upper(values: [u32; 6]) -> PlayerScoreSheet {
        let mut sheet = empty_sheet();
        for (category, value) in UPPER.iter().zip(values) {
            sheet.set(*category, value);
        }
        sheet
    }

    fn with_all(upper: [u32; 6], lower: [u32; 7]) -> PlayerScoreSheet {
        let mut sheet = with_upper(upper);
        for (category, value) in LOWER.iter().zip(lower) {
            sheet.set(*category, value);
        }
        sheet
    }

    #[test]
    fn test_sections_partition_categories() {
        assert_eq!(Category::iter().count(), 13);
        assert_eq!(Category::upper().collect::<Vec<_>>(), UPPER.to_vec());
        assert_eq!(Category::lower().collect::<Vec<_>>(), LOWER.to_vec());
        assert!(UPPER.iter().all(|c| c.section() == Section::Upper));
        assert!(LOWER.iter().all(|c| c.section() == Section::Lower));
    }

    #[rstest]
    #[case(Category::Ones, vec![0, 1, 2, 3, 4, 5])]
    #[case(Category::Twos, vec![0, 2, 4, 6, 8, 10])]
    #[case(Category::Threes, vec![0, 3, 6, 9, 12, 15])]
    #[case(Category::Fours, vec![0, 4, 8, 12, 16, 20])]
    #[case(Category::Fives, vec![0, 5, 10, 15, 20, 25])]
    #[case(Category::Sixes, vec![0, 6, 12, 18, 24, 30])]
    #[case(Category::Chance, (5..=30).collect())]
    #[case(Category::ThreeOfKind, vec![0, 3, 6, 9, 12, 15, 18])]
    #[case(Category::FourOfKind, vec![0, 4, 8, 12, 16, 20, 24])]
    #[case(Category::FullHouse, vec![0, 25])]
    #[case(Category::SmallStraight, vec![0, 30])]
    #[case(Category::LargeStraight, vec![0, 40])]
    #[case(Category::Yahtzee, vec![0, 50])]
    fn test_legal_values(#[case] category: Category, #[case] expected: Vec<u32>) {
        assert_eq!(category.legal_values(), expected.as_slice());
    }

    #[test]
    fn test_chance_cannot_be_zero() {
        assert!(!Category::Chance.is_legal(0));
        assert!(Category::Chance.is_legal(5));
        assert_eq!(Category::Chance.max_value(), 30);
        assert_eq!(Category::Yahtzee.max_value(), 50);
    }

    #[test]
    fn test_empty_sheet() {
        let sheet = empty_sheet();

        assert_eq!(sheet.upper_total(), 0);
        assert_eq!(sheet.lower_total(), 0);
        assert_eq!(sheet.bonus(), 0);
        assert_eq!(sheet.grand_total(), 0);
        assert_eq!(sheet.bonus_progress(), 63);
        assert!(!sheet.is_complete());
        assert_eq!(sheet.remaining().len(), 13);
    }

    #[test]
    fn test_all_zero_sheet_is_complete() {
        let sheet = with_all([0; 6], [0; 7]);

        assert_eq!(sheet.upper_total(), 0);
        assert_eq!(sheet.lower_total(), 0);
        assert_eq!(sheet.bonus(), 0);
        assert_eq!(sheet.bonus_progress(), 63);
        assert_eq!(sheet.grand_total(), 0);
        assert!(sheet.is_complete());
    }

    #[rstest]
    #[case([5, 10, 15, 20, 25, 30], 105, 35, 0)] // maximum upper section
    #[case([3, 6, 9, 12, 15, 18], 63, 35, 0)] // threshold is inclusive
    #[case([2, 4, 6, 8, 10, 12], 42, 0, 21)]
    #[case([4, 8, 12, 16, 20, 0], 60, 0, 3)]
    fn test_upper_section_bonus(
        #[case] values: [u32; 6],
        #[case] upper_total: u32,
        #[case] bonus: u32,
        #[case] progress: u32,
    ) {
        let sheet = with_upper(values);

        assert_eq!(sheet.upper_total(), upper_total);
        assert_eq!(sheet.bonus(), bonus);
        assert_eq!(sheet.bonus_progress(), progress);
    }

    #[test]
    fn test_lower_total() {
        let sheet = with_all([0; 6], [20, 15, 20, 25, 30, 40, 50]);

        assert_eq!(sheet.lower_total(), 200);
        assert_eq!(sheet.upper_total(), 0);
    }

    #[test]
    fn test_grand_total_with_bonus() {
        let sheet = with_all([3, 6, 9, 12, 15, 18], [20, 15, 20, 25, 30, 40, 50]);

        assert_eq!(sheet.upper_total(), 63);
        assert_eq!(sheet.lower_total(), 200);
        assert_eq!(sheet.bonus(), 35);
        // 63 (upper) + 35 (bonus) + 200 (lower)
        assert_eq!(sheet.grand_total(), 298);
    }

    #[test]
    fn test_unset_slots_count_as_zero() {
        let mut sheet = empty_sheet();
        sheet.set(Category::Sixes, 30);
        sheet.set(Category::Yahtzee, 50);

        assert_eq!(sheet.upper_total(), 30);
        assert_eq!(sheet.lower_total(), 50);
        assert_eq!(sheet.grand_total(), 80);
    }

    #[test]
    fn test_complete_regardless_of_fill_order() {
        for last in Category::iter() {
            let mut sheet = empty_sheet();
            for category in Category::iter().filter(|c| *c != last) {
                sheet.set(category, 0);
                assert!(!sheet.is_complete());
            }

            sheet.set(last, last.legal_values()[0]);
            assert!(sheet.is_complete(), "{last} filled last should complete the sheet");
        }
    }

    #[test]
    fn test_clear_and_apply_score() {
        let mut sheet = with_all([0; 6], [0; 7]);
        sheet.clear(Category::FullHouse);

        assert!(!sheet.is_complete());
        assert_eq!(sheet.remaining(), vec![Category::FullHouse]);
        assert_eq!(sheet.slot(Category::FullHouse), ScoreSlot::Unset);

        let sheet = sheet.apply_score(Category::FullHouse, ScoreSlot::Set(25));
        assert!(sheet.is_complete());
        assert_eq!(sheet.score(Category::FullHouse), Some(25));
        assert_eq!(sheet.grand_total(), 25);
    }

    #[test]
    fn test_score_slot() {
        assert_eq!(ScoreSlot::from(None), ScoreSlot::Unset);
        assert_eq!(ScoreSlot::from(Some(0)), ScoreSlot::Set(0));
        assert!(ScoreSlot::Set(0).is_set());
        assert!(!ScoreSlot::Unset.is_set());
        assert_eq!(ScoreSlot::Unset.points(), 0);
        assert_eq!(ScoreSlot::Set(12).points(), 12);
    }

    #[test]
    fn test_category_names() {
        assert_eq!(Category::ThreeOfKind.to_string(), "three_of_kind");
        assert_eq!("full_house".parse::<Category>().unwrap(), Category::FullHouse);
    }
}
