use serde::{Deserialize, Serialize};
use strum::IntoEnumIterator;
use strum_macros::{Display, EnumIter, EnumString};

/// Number of scoring slots on a Yahtzee sheet.
pub const CATEGORY_COUNT: usize = 13;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Section {
    Upper,
    Lower,
}

/// The 13 fixed Yahtzee categories, in sheet order.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    EnumIter,
    Display,
    EnumString,
)]
#[strum(serialize_all = "snake_case")]
pub enum Category {
    Ones = 0,
    Twos = 1,
    Threes = 2,
    Fours = 3,
    Fives = 4,
    Sixes = 5,
    Chance = 6,
    ThreeOfKind = 7,
    FourOfKind = 8,
    FullHouse = 9,
    SmallStraight = 10,
    LargeStraight = 11,
    Yahtzee = 12,
}

const ONES_VALUES: [u32; 6] = [0, 1, 2, 3, 4, 5];
const TWOS_VALUES: [u32; 6] = [0, 2, 4, 6, 8, 10];
const THREES_VALUES: [u32; 6] = [0, 3, 6, 9, 12, 15];
const FOURS_VALUES: [u32; 6] = [0, 4, 8, 12, 16, 20];
const FIVES_VALUES: [u32; 6] = [0, 5, 10, 15, 20, 25];
const SIXES_VALUES: [u32; 6] = [0, 6, 12, 18, 24, 30];
const CHANCE_VALUES: [u32; 26] = [
    5, 6, 7, 8, 9, 10, 11, 12, 13, 14, 15, 16, 17, 18, 19, 20, 21, 22, 23, 24, 25, 26, 27, 28,
    29, 30,
];
const THREE_OF_KIND_VALUES: [u32; 7] = [0, 3, 6, 9, 12, 15, 18];
const FOUR_OF_KIND_VALUES: [u32; 7] = [0, 4, 8, 12, 16, 20, 24];
const FULL_HOUSE_VALUES: [u32; 2] = [0, 25];
const SMALL_STRAIGHT_VALUES: [u32; 2] = [0, 30];
const LARGE_STRAIGHT_VALUES: [u32; 2] = [0, 40];
const YAHTZEE_VALUES: [u32; 2] = [0, 50];

impl Category {
    /// All categories in sheet order.
    pub fn all() -> impl Iterator<Item = Category> {
        Category::iter()
    }

    pub fn upper() -> impl Iterator<Item = Category> {
        Category::iter().filter(|c| c.section() == Section::Upper)
    }

    pub fn lower() -> impl Iterator<Item = Category> {
        Category::iter().filter(|c| c.section() == Section::Lower)
    }

    /// Position of the category on the sheet (0..13).
    pub fn index(self) -> usize {
        self as usize
    }

    pub fn section(self) -> Section {
        match self {
            Category::Ones
            | Category::Twos
            | Category::Threes
            | Category::Fours
            | Category::Fives
            | Category::Sixes => Section::Upper,
            _ => Section::Lower,
        }
    }

    /// The point values a player may pick for this category, in display order.
    ///
    /// This is a selection list, not a dice evaluation: the player reads the
    /// dice and picks the achieved score. Callers must only record values from
    /// this list; sheets do not re-check it.
    pub fn legal_values(self) -> &'static [u32] {
        match self {
            Category::Ones => &ONES_VALUES,
            Category::Twos => &TWOS_VALUES,
            Category::Threes => &THREES_VALUES,
            Category::Fours => &FOURS_VALUES,
            Category::Fives => &FIVES_VALUES,
            Category::Sixes => &SIXES_VALUES,
            Category::Chance => &CHANCE_VALUES,
            Category::ThreeOfKind => &THREE_OF_KIND_VALUES,
            Category::FourOfKind => &FOUR_OF_KIND_VALUES,
            Category::FullHouse => &FULL_HOUSE_VALUES,
            Category::SmallStraight => &SMALL_STRAIGHT_VALUES,
            Category::LargeStraight => &LARGE_STRAIGHT_VALUES,
            Category::Yahtzee => &YAHTZEE_VALUES,
        }
    }

    pub fn is_legal(self, value: u32) -> bool {
        self.legal_values().contains(&value)
    }

    /// Highest selectable value.
    pub fn max_value(self) -> u32 {
        self.legal_values().iter().copied().max().unwrap_or_default()
    }
}
