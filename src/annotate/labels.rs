use serde::{Serialize, Serializer};
use std::fmt;

use crate::ganji::Branch;

/// Relational star (십성) of a stem relative to the day stem
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TenStar {
    /// The day pillar itself (일간)
    DayMaster,
    Bigyeon,
    Geopjae,
    Siksin,
    Sanggwan,
    Pyeonjae,
    Jeongjae,
    Pyeongwan,
    Jeonggwan,
    Pyeonin,
    Jeongin,
}

impl TenStar {
    pub fn label(self) -> &'static str {
        match self {
            TenStar::DayMaster => "일간",
            TenStar::Bigyeon => "비견",
            TenStar::Geopjae => "겁재",
            TenStar::Siksin => "식신",
            TenStar::Sanggwan => "상관",
            TenStar::Pyeonjae => "편재",
            TenStar::Jeongjae => "정재",
            TenStar::Pyeongwan => "편관",
            TenStar::Jeonggwan => "정관",
            TenStar::Pyeonin => "편인",
            TenStar::Jeongin => "정인",
        }
    }
}

/// Twelve-stage life cycle (십이운성)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TwelveStage {
    Jangsaeng,
    Mokyok,
    Gwandae,
    Geonrok,
    Jewang,
    Soe,
    Byeong,
    Sa,
    Myo,
    Jeol,
    Tae,
    Yang,
}

const STAGE_LABELS: [&str; 12] = [
    "장생", "목욕", "관대", "건록", "제왕", "쇠", "병", "사", "묘", "절", "태", "양",
];

impl TwelveStage {
    pub fn index(self) -> usize {
        self as usize
    }

    pub fn label(self) -> &'static str {
        STAGE_LABELS[self.index()]
    }

    pub fn labels() -> &'static [&'static str; 12] {
        &STAGE_LABELS
    }
}

/// Auxiliary star (십이신살)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SinSal {
    Geopsal,
    Jaesal,
    Cheonsal,
    Jisal,
    Yeonsal,
    Wolsal,
    Mangsin,
    Jangseong,
    Banan,
    Yeokma,
    Yukhae,
    Hwagae,
}

const SIN_SAL_LABELS: [&str; 12] = [
    "겁살", "재살", "천살", "지살", "연살", "월살", "망신살", "장성살", "반안살", "역마살", "육해살", "화개살",
];

impl SinSal {
    pub const ALL: [SinSal; 12] = [
        SinSal::Geopsal,
        SinSal::Jaesal,
        SinSal::Cheonsal,
        SinSal::Jisal,
        SinSal::Yeonsal,
        SinSal::Wolsal,
        SinSal::Mangsin,
        SinSal::Jangseong,
        SinSal::Banan,
        SinSal::Yeokma,
        SinSal::Yukhae,
        SinSal::Hwagae,
    ];

    pub fn index(self) -> usize {
        self as usize
    }

    pub fn label(self) -> &'static str {
        SIN_SAL_LABELS[self.index()]
    }
}

/// Three-branch group of the year branch, 120° apart on the cycle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SinSalGroup {
    /// 申子辰
    Water,
    /// 巳酉丑
    Metal,
    /// 寅午戌
    Fire,
    /// 亥卯未
    Wood,
}

impl SinSalGroup {
    pub const ALL: [SinSalGroup; 4] = [SinSalGroup::Water, SinSalGroup::Metal, SinSalGroup::Fire, SinSalGroup::Wood];

    pub fn index(self) -> usize {
        self as usize
    }

    /// Branches four apart share a group, so the group is the index mod 4.
    pub fn of(year_branch: Branch) -> Self {
        Self::ALL[year_branch.index() % 4]
    }
}

macro_rules! label_serialize {
    ($($ty:ty),*) => {
        $(
            impl Serialize for $ty {
                fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
                    serializer.serialize_str(self.label())
                }
            }

            impl fmt::Display for $ty {
                fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                    f.write_str(self.label())
                }
            }
        )*
    };
}

label_serialize!(TenStar, TwelveStage, SinSal);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_group_membership() {
        assert_eq!(SinSalGroup::of(Branch::Sin), SinSalGroup::Water);
        assert_eq!(SinSalGroup::of(Branch::Ja), SinSalGroup::Water);
        assert_eq!(SinSalGroup::of(Branch::Jin), SinSalGroup::Water);
        assert_eq!(SinSalGroup::of(Branch::Yu), SinSalGroup::Metal);
        assert_eq!(SinSalGroup::of(Branch::In), SinSalGroup::Fire);
        assert_eq!(SinSalGroup::of(Branch::Hae), SinSalGroup::Wood);
    }

    #[test]
    fn test_labels_serialize() {
        assert_eq!(serde_json::to_string(&TenStar::DayMaster).unwrap(), "\"일간\"");
        assert_eq!(serde_json::to_string(&TwelveStage::Jeol).unwrap(), "\"절\"");
        assert_eq!(SinSal::Yeokma.to_string(), "역마살");
    }
}
