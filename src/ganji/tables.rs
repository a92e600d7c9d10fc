//! Fixed lookup data
//!
//! Every table is indexed by enum ordinal (`Stem::index()`,
//! `Branch::index()`), so each key domain is total by construction.

use super::{Branch, Stem};
use crate::annotate::{SinSal, SinSalGroup, TenStar, TwelveStage};

/// One of the twelve major solar terms (절기) that open a month branch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SolarTerm {
    pub korean: &'static str,
    pub hanja: &'static str,
    /// Nominal Gregorian onset as (month, day).
    pub month: u32,
    pub day: u32,
    pub branch: Branch,
}

const fn term(korean: &'static str, hanja: &'static str, month: u32, day: u32, branch: Branch) -> SolarTerm {
    SolarTerm { korean, hanja, month, day, branch }
}

/// Major terms in calendar order. The last window (대설) runs into the
/// following January up to the day before 소한.
pub static SOLAR_TERMS: [SolarTerm; 12] = [
    term("소한", "小寒", 1, 6, Branch::Chuk),
    term("입춘", "立春", 2, 4, Branch::In),
    term("경칩", "驚蟄", 3, 6, Branch::Myo),
    term("청명", "淸明", 4, 5, Branch::Jin),
    term("입하", "立夏", 5, 6, Branch::Sa),
    term("망종", "芒種", 6, 6, Branch::O),
    term("소서", "小暑", 7, 7, Branch::Mi),
    term("입추", "立秋", 8, 8, Branch::Sin),
    term("백로", "白露", 9, 8, Branch::Yu),
    term("한로", "寒露", 10, 8, Branch::Sul),
    term("입동", "立冬", 11, 7, Branch::Hae),
    term("대설", "大雪", 12, 7, Branch::Ja),
];

/// Month stem by [year stem][month branch], the "five tigers" rule
/// (甲己 years open the tiger month with 丙寅, 乙庚 with 戊寅, and so on).
pub static MONTH_STEM: [[Stem; 12]; 10] = {
    use Stem as S;
    [
        [S::Byeong, S::Jeong, S::Byeong, S::Jeong, S::Mu, S::Gi, S::Gyeong, S::Sin, S::Im, S::Gye, S::Gap, S::Eul],
        [S::Mu, S::Gi, S::Mu, S::Gi, S::Gyeong, S::Sin, S::Im, S::Gye, S::Gap, S::Eul, S::Byeong, S::Jeong],
        [S::Gyeong, S::Sin, S::Gyeong, S::Sin, S::Im, S::Gye, S::Gap, S::Eul, S::Byeong, S::Jeong, S::Mu, S::Gi],
        [S::Im, S::Gye, S::Im, S::Gye, S::Gap, S::Eul, S::Byeong, S::Jeong, S::Mu, S::Gi, S::Gyeong, S::Sin],
        [S::Gap, S::Eul, S::Gap, S::Eul, S::Byeong, S::Jeong, S::Mu, S::Gi, S::Gyeong, S::Sin, S::Im, S::Gye],
        [S::Byeong, S::Jeong, S::Byeong, S::Jeong, S::Mu, S::Gi, S::Gyeong, S::Sin, S::Im, S::Gye, S::Gap, S::Eul],
        [S::Mu, S::Gi, S::Mu, S::Gi, S::Gyeong, S::Sin, S::Im, S::Gye, S::Gap, S::Eul, S::Byeong, S::Jeong],
        [S::Gyeong, S::Sin, S::Gyeong, S::Sin, S::Im, S::Gye, S::Gap, S::Eul, S::Byeong, S::Jeong, S::Mu, S::Gi],
        [S::Im, S::Gye, S::Im, S::Gye, S::Gap, S::Eul, S::Byeong, S::Jeong, S::Mu, S::Gi, S::Gyeong, S::Sin],
        [S::Gap, S::Eul, S::Gap, S::Eul, S::Byeong, S::Jeong, S::Mu, S::Gi, S::Gyeong, S::Sin, S::Im, S::Gye],
    ]
};

/// Branch ten-star by [day stem][branch]. Memorized data; not recomputed
/// from the element cycles.
pub static GROUND_TEN_STAR: [[TenStar; 12]; 10] = {
    use TenStar::*;
    [
        [Jeongin, Jeongjae, Bigyeon, Geopjae, Pyeonjae, Siksin, Sanggwan, Jeongjae, Pyeongwan, Jeonggwan, Pyeonjae, Pyeonin],
        [Pyeonin, Pyeonjae, Geopjae, Bigyeon, Jeongjae, Sanggwan, Siksin, Pyeonjae, Jeonggwan, Pyeongwan, Jeongjae, Jeongin],
        [Jeonggwan, Sanggwan, Pyeonin, Jeongin, Siksin, Bigyeon, Geopjae, Sanggwan, Pyeonjae, Jeongjae, Siksin, Pyeongwan],
        [Pyeongwan, Siksin, Jeongin, Pyeonin, Sanggwan, Geopjae, Bigyeon, Siksin, Jeongjae, Pyeonjae, Sanggwan, Jeonggwan],
        [Jeongjae, Geopjae, Pyeongwan, Jeonggwan, Bigyeon, Pyeonin, Jeongin, Geopjae, Siksin, Sanggwan, Bigyeon, Pyeonjae],
        [Pyeonjae, Bigyeon, Jeonggwan, Pyeongwan, Geopjae, Jeongin, Pyeonin, Bigyeon, Sanggwan, Siksin, Geopjae, Jeongjae],
        [Sanggwan, Jeongin, Pyeonjae, Jeongjae, Pyeonin, Pyeongwan, Jeonggwan, Jeongin, Bigyeon, Geopjae, Pyeonin, Siksin],
        [Siksin, Pyeonin, Jeongjae, Pyeonjae, Jeongin, Jeonggwan, Pyeongwan, Pyeonin, Geopjae, Bigyeon, Jeongin, Sanggwan],
        [Geopjae, Jeonggwan, Siksin, Sanggwan, Pyeongwan, Pyeonjae, Jeongjae, Jeonggwan, Pyeonin, Jeongin, Pyeongwan, Bigyeon],
        [Bigyeon, Pyeongwan, Sanggwan, Siksin, Jeonggwan, Jeongjae, Pyeonjae, Pyeongwan, Jeongin, Pyeonin, Jeonggwan, Geopjae],
    ]
};

/// Twelve-stage position by [day stem][branch]. Yang stems run forward
/// from their birth branch, yin stems backward.
pub static TWELVE_STAGE: [[TwelveStage; 12]; 10] = {
    use TwelveStage::*;
    [
        [Mokyok, Gwandae, Geonrok, Jewang, Soe, Byeong, Sa, Myo, Jeol, Tae, Yang, Jangsaeng],
        [Byeong, Soe, Jewang, Geonrok, Gwandae, Mokyok, Jangsaeng, Yang, Tae, Jeol, Myo, Sa],
        [Tae, Yang, Jangsaeng, Mokyok, Gwandae, Geonrok, Jewang, Soe, Byeong, Sa, Myo, Jeol],
        [Jeol, Myo, Sa, Byeong, Soe, Jewang, Geonrok, Gwandae, Mokyok, Jangsaeng, Yang, Tae],
        [Tae, Yang, Jangsaeng, Mokyok, Gwandae, Geonrok, Jewang, Soe, Byeong, Sa, Myo, Jeol],
        [Jeol, Myo, Sa, Byeong, Soe, Jewang, Geonrok, Gwandae, Mokyok, Jangsaeng, Yang, Tae],
        [Sa, Myo, Jeol, Tae, Yang, Jangsaeng, Mokyok, Gwandae, Geonrok, Jewang, Soe, Byeong],
        [Jangsaeng, Yang, Tae, Jeol, Myo, Sa, Byeong, Soe, Jewang, Geonrok, Gwandae, Mokyok],
        [Jewang, Soe, Byeong, Sa, Myo, Jeol, Tae, Yang, Jangsaeng, Mokyok, Gwandae, Geonrok],
        [Geonrok, Gwandae, Mokyok, Jangsaeng, Yang, Tae, Jeol, Myo, Sa, Byeong, Soe, Jewang],
    ]
};

/// Hidden stems (지장간) by branch, in traditional order ending with the
/// principal stem.
pub static HIDDEN_STEMS: [&[Stem]; 12] = {
    use Stem::*;
    [
        &[Im, Gye],
        &[Gye, Sin, Gi],
        &[Mu, Byeong, Gap],
        &[Gap, Eul],
        &[Eul, Gye, Mu],
        &[Mu, Gyeong, Byeong],
        &[Byeong, Gi, Jeong],
        &[Jeong, Eul, Gi],
        &[Mu, Im, Gyeong],
        &[Gyeong, Sin],
        &[Sin, Jeong, Mu],
        &[Mu, Gap, Im],
    ]
};

/// Target branch of each auxiliary star, by [group][star] with stars in
/// `SinSal::ALL` order.
pub static SIN_SAL_TARGETS: [[Branch; 12]; 4] = {
    use Branch::*;
    [
        // 申子辰
        [Sa, O, Mi, Sin, Yu, Sul, Hae, Ja, Chuk, In, Myo, Jin],
        // 巳酉丑
        [In, Myo, Jin, Sa, O, Mi, Sin, Yu, Sul, Hae, Ja, Chuk],
        // 寅午戌
        [Hae, Ja, Chuk, In, Myo, Jin, Sa, O, Mi, Sin, Yu, Sul],
        // 亥卯未
        [Sin, Yu, Sul, Hae, Ja, Chuk, In, Myo, Jin, Sa, O, Mi],
    ]
};

pub fn month_stem(year_stem: Stem, month_branch: Branch) -> Stem {
    MONTH_STEM[year_stem.index()][month_branch.index()]
}

pub fn ground_ten_star(day_stem: Stem, branch: Branch) -> TenStar {
    GROUND_TEN_STAR[day_stem.index()][branch.index()]
}

pub fn twelve_stage(day_stem: Stem, branch: Branch) -> TwelveStage {
    TWELVE_STAGE[day_stem.index()][branch.index()]
}

pub fn hidden_stems(branch: Branch) -> &'static [Stem] {
    HIDDEN_STEMS[branch.index()]
}

pub fn sin_sal_target(group: SinSalGroup, star: SinSal) -> Branch {
    SIN_SAL_TARGETS[group.index()][star.index()]
}
