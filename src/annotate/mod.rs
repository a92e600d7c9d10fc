//! Derived Attribute Engine
//!
//! Annotates a pillar with everything that follows from the day stem (the
//! "self" element) and the year branch: ten-stars, hidden stems, the
//! twelve-stage position and the twelve auxiliary stars (십이신살).
//!
//! Every attribute is a pure function of (day stem, branch) or
//! (year branch, branch), so pillars can be annotated in any order.

mod labels;

pub use labels::{SinSal, SinSalGroup, TenStar, TwelveStage};

use serde::Serialize;

use crate::ganji::tables;
use crate::ganji::{Branch, Stem, StemBranch};

/// Which of the four pillars is being annotated
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PillarRole {
    Year,
    Month,
    Day,
    Hour,
}

impl PillarRole {
    pub const ALL: [PillarRole; 4] = [PillarRole::Year, PillarRole::Month, PillarRole::Day, PillarRole::Hour];
}

#[derive(Debug, Clone, Copy)]
pub struct AnnotationContext {
    pub day_stem: Stem,
    pub year_branch: Branch,
    pub role: PillarRole,
}

/// A pillar with its derived attributes
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AnnotatedPillar {
    pub stem: Stem,
    pub branch: Branch,
    pub stem_kor: &'static str,
    pub branch_kor: &'static str,
    pub ten_star: TenStar,
    pub ground_ten_star: TenStar,
    pub hidden_stems: Vec<Stem>,
    pub hidden_ten_stars: Vec<TenStar>,
    pub twelve_stage: TwelveStage,
    pub twelve_sin_sal: Vec<SinSal>,
}

impl AnnotatedPillar {
    pub fn pair(&self) -> StemBranch {
        StemBranch::new(self.stem, self.branch)
    }
}

/// Relation of `target` to the day stem through the generation/control cycles.
pub fn ten_star(day_stem: Stem, target: Stem) -> TenStar {
    let (me, other) = (day_stem.element(), target.element());
    let same = day_stem.polarity() == target.polarity();
    let pick = |same_star, diff_star| if same { same_star } else { diff_star };

    if me == other {
        pick(TenStar::Bigyeon, TenStar::Geopjae)
    } else if me.generates() == other {
        pick(TenStar::Siksin, TenStar::Sanggwan)
    } else if me.controls() == other {
        pick(TenStar::Pyeonjae, TenStar::Jeongjae)
    } else if other.controls() == me {
        pick(TenStar::Pyeongwan, TenStar::Jeonggwan)
    } else {
        // only remaining relation: target generates self
        pick(TenStar::Pyeonin, TenStar::Jeongin)
    }
}

/// Auxiliary stars whose group-specific target is `branch`.
pub fn sin_sal_for(year_branch: Branch, branch: Branch) -> Vec<SinSal> {
    let group = SinSalGroup::of(year_branch);
    SinSal::ALL
        .iter()
        .copied()
        .filter(|star| tables::sin_sal_target(group, *star) == branch)
        .collect()
}

pub fn annotate(pillar: StemBranch, ctx: AnnotationContext) -> AnnotatedPillar {
    let StemBranch { stem, branch } = pillar;

    let ten_star = if ctx.role == PillarRole::Day {
        TenStar::DayMaster
    } else {
        ten_star(ctx.day_stem, stem)
    };

    let hidden_stems = tables::hidden_stems(branch).to_vec();
    let hidden_ten_stars = hidden_stems.iter().map(|h| self::ten_star(ctx.day_stem, *h)).collect();

    AnnotatedPillar {
        stem,
        branch,
        stem_kor: stem.korean(),
        branch_kor: branch.korean(),
        ten_star,
        ground_ten_star: tables::ground_ten_star(ctx.day_stem, branch),
        hidden_stems,
        hidden_ten_stars,
        twelve_stage: tables::twelve_stage(ctx.day_stem, branch),
        twelve_sin_sal: sin_sal_for(ctx.year_branch, branch),
    }
}
