//! Ganji (Stem/Branch) Symbols
//!
//! The ten heavenly stems and twelve earthly branches, each carrying both its
//! Hanja symbol and its Korean reading, plus the five-element cycles used to
//! relate them.

pub mod tables;

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// The five elements (오행)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Element {
    Wood,
    Fire,
    Earth,
    Metal,
    Water,
}

impl Element {
    pub const ALL: [Element; 5] = [
        Element::Wood,
        Element::Fire,
        Element::Earth,
        Element::Metal,
        Element::Water,
    ];

    fn index(self) -> usize {
        self as usize
    }

    /// Element produced by this one: wood → fire → earth → metal → water → wood.
    pub fn generates(self) -> Element {
        Self::ALL[(self.index() + 1) % 5]
    }

    /// Element overcome by this one: wood → earth → water → fire → metal → wood.
    pub fn controls(self) -> Element {
        Self::ALL[(self.index() + 2) % 5]
    }

    pub fn korean(self) -> &'static str {
        match self {
            Element::Wood => "목",
            Element::Fire => "화",
            Element::Earth => "토",
            Element::Metal => "금",
            Element::Water => "수",
        }
    }
}

/// Yang/yin polarity (음양)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Polarity {
    Yang,
    Yin,
}

impl Polarity {
    fn from_index(i: usize) -> Self {
        if i % 2 == 0 { Polarity::Yang } else { Polarity::Yin }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown ganji symbol: {0:?}")]
pub struct UnknownSymbol(pub String);

/// Heavenly stem (천간)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Stem {
    Gap,
    Eul,
    Byeong,
    Jeong,
    Mu,
    Gi,
    Gyeong,
    Sin,
    Im,
    Gye,
}

const STEM_HANJA: [&str; 10] = ["甲", "乙", "丙", "丁", "戊", "己", "庚", "辛", "壬", "癸"];
const STEM_KOREAN: [&str; 10] = ["갑", "을", "병", "정", "무", "기", "경", "신", "임", "계"];

impl Stem {
    pub const ALL: [Stem; 10] = [
        Stem::Gap,
        Stem::Eul,
        Stem::Byeong,
        Stem::Jeong,
        Stem::Mu,
        Stem::Gi,
        Stem::Gyeong,
        Stem::Sin,
        Stem::Im,
        Stem::Gye,
    ];

    pub fn index(self) -> usize {
        self as usize
    }

    /// Stem at position `i` of the cycle; any integer is accepted.
    pub fn from_index(i: i64) -> Self {
        Self::ALL[i.rem_euclid(10) as usize]
    }

    pub fn hanja(self) -> &'static str {
        STEM_HANJA[self.index()]
    }

    pub fn korean(self) -> &'static str {
        STEM_KOREAN[self.index()]
    }

    pub fn element(self) -> Element {
        Element::ALL[self.index() / 2]
    }

    pub fn polarity(self) -> Polarity {
        Polarity::from_index(self.index())
    }

    pub fn from_hanja(s: &str) -> Option<Self> {
        STEM_HANJA.iter().position(|h| *h == s).map(|i| Self::ALL[i])
    }

    pub fn from_korean(s: &str) -> Option<Self> {
        STEM_KOREAN.iter().position(|k| *k == s).map(|i| Self::ALL[i])
    }
}

impl FromStr for Stem {
    type Err = UnknownSymbol;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        Self::from_hanja(s)
            .or_else(|| Self::from_korean(s))
            .ok_or_else(|| UnknownSymbol(s.to_string()))
    }
}

impl TryFrom<String> for Stem {
    type Error = UnknownSymbol;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

impl From<Stem> for String {
    fn from(stem: Stem) -> String {
        stem.hanja().to_string()
    }
}

impl fmt::Display for Stem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.hanja())
    }
}

/// Earthly branch (지지)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Branch {
    Ja,
    Chuk,
    In,
    Myo,
    Jin,
    Sa,
    O,
    Mi,
    Sin,
    Yu,
    Sul,
    Hae,
}

const BRANCH_HANJA: [&str; 12] = ["子", "丑", "寅", "卯", "辰", "巳", "午", "未", "申", "酉", "戌", "亥"];
const BRANCH_KOREAN: [&str; 12] = ["자", "축", "인", "묘", "진", "사", "오", "미", "신", "유", "술", "해"];
const BRANCH_ANIMAL: [&str; 12] = [
    "쥐", "소", "호랑이", "토끼", "용", "뱀", "말", "양", "원숭이", "닭", "개", "돼지",
];

impl Branch {
    pub const ALL: [Branch; 12] = [
        Branch::Ja,
        Branch::Chuk,
        Branch::In,
        Branch::Myo,
        Branch::Jin,
        Branch::Sa,
        Branch::O,
        Branch::Mi,
        Branch::Sin,
        Branch::Yu,
        Branch::Sul,
        Branch::Hae,
    ];

    pub fn index(self) -> usize {
        self as usize
    }

    /// Branch at position `i` of the cycle; any integer is accepted.
    pub fn from_index(i: i64) -> Self {
        Self::ALL[i.rem_euclid(12) as usize]
    }

    pub fn hanja(self) -> &'static str {
        BRANCH_HANJA[self.index()]
    }

    pub fn korean(self) -> &'static str {
        BRANCH_KOREAN[self.index()]
    }

    /// Animal of the twelve-year cycle.
    pub fn animal(self) -> &'static str {
        BRANCH_ANIMAL[self.index()]
    }

    pub fn element(self) -> Element {
        match self {
            Branch::In | Branch::Myo => Element::Wood,
            Branch::Sa | Branch::O => Element::Fire,
            Branch::Chuk | Branch::Jin | Branch::Mi | Branch::Sul => Element::Earth,
            Branch::Sin | Branch::Yu => Element::Metal,
            Branch::Hae | Branch::Ja => Element::Water,
        }
    }

    pub fn polarity(self) -> Polarity {
        Polarity::from_index(self.index())
    }

    pub fn from_hanja(s: &str) -> Option<Self> {
        BRANCH_HANJA.iter().position(|h| *h == s).map(|i| Self::ALL[i])
    }

    pub fn from_korean(s: &str) -> Option<Self> {
        BRANCH_KOREAN.iter().position(|k| *k == s).map(|i| Self::ALL[i])
    }
}

impl FromStr for Branch {
    type Err = UnknownSymbol;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        Self::from_hanja(s)
            .or_else(|| Self::from_korean(s))
            .ok_or_else(|| UnknownSymbol(s.to_string()))
    }
}

impl TryFrom<String> for Branch {
    type Error = UnknownSymbol;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

impl From<Branch> for String {
    fn from(branch: Branch) -> String {
        branch.hanja().to_string()
    }
}

impl fmt::Display for Branch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.hanja())
    }
}

/// One pillar: a stem over a branch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct StemBranch {
    pub stem: Stem,
    pub branch: Branch,
}

impl StemBranch {
    pub fn new(stem: Stem, branch: Branch) -> Self {
        Self { stem, branch }
    }

    /// Position in the sixty-cycle, 0 for 甲子 through 59 for 癸亥.
    ///
    /// `None` when stem and branch differ in parity, since such pairs never
    /// occur in the cycle.
    pub fn sexagenary_index(&self) -> Option<usize> {
        let (s, b) = (self.stem.index(), self.branch.index());
        if s % 2 != b % 2 {
            return None;
        }
        (0..60).find(|n| n % 10 == s && n % 12 == b)
    }

    pub fn from_sexagenary(n: i64) -> Self {
        Self::new(Stem::from_index(n), Branch::from_index(n))
    }

    pub fn hanja(&self) -> String {
        format!("{}{}", self.stem.hanja(), self.branch.hanja())
    }

    pub fn korean(&self) -> String {
        format!("{}{}", self.stem.korean(), self.branch.korean())
    }
}

impl FromStr for StemBranch {
    type Err = UnknownSymbol;

    /// Accepts "경오", "庚午", or the combined "경오(庚午)" form.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let head = s.split('(').next().unwrap_or("").trim();
        let chars: Vec<char> = head.chars().collect();
        if chars.len() != 2 {
            return Err(UnknownSymbol(s.to_string()));
        }
        let stem: Stem = chars[0].to_string().parse().map_err(|_| UnknownSymbol(s.to_string()))?;
        let branch: Branch = chars[1].to_string().parse().map_err(|_| UnknownSymbol(s.to_string()))?;
        Ok(Self::new(stem, branch))
    }
}

impl fmt::Display for StemBranch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.stem, self.branch)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stem_attributes() {
        assert_eq!(Stem::Gap.element(), Element::Wood);
        assert_eq!(Stem::Gap.polarity(), Polarity::Yang);
        assert_eq!(Stem::Gye.element(), Element::Water);
        assert_eq!(Stem::Gye.polarity(), Polarity::Yin);
        assert_eq!(Stem::Gyeong.hanja(), "庚");
        assert_eq!(Stem::Gyeong.korean(), "경");
    }

    #[test]
    fn test_from_index_wraps() {
        assert_eq!(Stem::from_index(-1), Stem::Gye);
        assert_eq!(Stem::from_index(23), Stem::Jeong);
        assert_eq!(Branch::from_index(-1), Branch::Hae);
        assert_eq!(Branch::from_index(26), Branch::In);
    }

    #[test]
    fn test_element_cycles() {
        assert_eq!(Element::Wood.generates(), Element::Fire);
        assert_eq!(Element::Water.generates(), Element::Wood);
        assert_eq!(Element::Wood.controls(), Element::Earth);
        assert_eq!(Element::Earth.controls(), Element::Water);
        assert_eq!(Element::Water.controls(), Element::Fire);
        assert_eq!(Element::Metal.controls(), Element::Wood);
    }

    #[test]
    fn test_parse_both_scripts() {
        assert_eq!("辛".parse::<Stem>().unwrap(), Stem::Sin);
        assert_eq!("신".parse::<Stem>().unwrap(), Stem::Sin);
        assert_eq!("신".parse::<Branch>().unwrap(), Branch::Sin);
        assert_eq!("申".parse::<Branch>().unwrap(), Branch::Sin);
        assert!("X".parse::<Stem>().is_err());
    }

    #[test]
    fn test_parse_pair_forms() {
        let expected = StemBranch::new(Stem::Gyeong, Branch::O);
        assert_eq!("경오".parse::<StemBranch>().unwrap(), expected);
        assert_eq!("庚午".parse::<StemBranch>().unwrap(), expected);
        assert_eq!("경오(庚午)".parse::<StemBranch>().unwrap(), expected);
        assert!("경".parse::<StemBranch>().is_err());
        assert!("경오일".parse::<StemBranch>().is_err());
    }

    #[test]
    fn test_sexagenary_index() {
        assert_eq!(StemBranch::new(Stem::Gap, Branch::Ja).sexagenary_index(), Some(0));
        assert_eq!(StemBranch::new(Stem::Gye, Branch::Hae).sexagenary_index(), Some(59));
        assert_eq!(StemBranch::new(Stem::Gap, Branch::Chuk).sexagenary_index(), None);
        for n in 0..60 {
            assert_eq!(StemBranch::from_sexagenary(n).sexagenary_index(), Some(n as usize));
        }
    }

    #[test]
    fn test_serializes_as_hanja() {
        let pair = StemBranch::new(Stem::Byeong, Branch::In);
        let json = serde_json::to_value(pair).unwrap();
        assert_eq!(json["stem"], "丙");
        assert_eq!(json["branch"], "寅");
        let back: StemBranch = serde_json::from_value(json).unwrap();
        assert_eq!(back, pair);
    }
}
