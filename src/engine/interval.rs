// src/engine/interval.rs
//! Per-skill bounds on the hidden sub-level (0..=999) inside the current band.

use crate::config::consts::SUBLEVEL_MAX;
use crate::core::skills::{Skill, SkillMap};

/// Closed bound `[min, max]`. `max == SUBLEVEL_MAX` means "no upper bound yet".
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct SkillInterval {
    pub min: i32,
    pub max: i32,
}

impl Default for SkillInterval {
    fn default() -> Self {
        Self { min: 0, max: SUBLEVEL_MAX }
    }
}

impl SkillInterval {
    /// One period of training worth `points_gained`.
    ///
    /// A band crossing resets the bound to `[0, points_gained - 1]`: the gain
    /// is assumed to have landed exactly on the boundary.
    pub fn update(&mut self, points_gained: i32, band_increased: bool) {
        if band_increased {
            self.max = (points_gained - 1).clamp(0, SUBLEVEL_MAX);
            self.min = 0;
        } else {
            self.min = (self.min + points_gained).min(self.max);
            if self.max != SUBLEVEL_MAX {
                self.max = (self.max + points_gained).clamp(0, SUBLEVEL_MAX);
            }
        }
        self.min = self.min.clamp(0, self.max);
    }

    pub fn is_solved(&self) -> bool {
        self.max != SUBLEVEL_MAX
    }

    pub fn width(&self) -> i32 {
        self.max - self.min
    }

    pub fn midpoint(&self) -> f64 {
        (self.min + self.max) as f64 / 2.0
    }
}

/// Interval tracker for all seven skills of one player.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct SpareSkills {
    skills: SkillMap<SkillInterval>,
}

impl SpareSkills {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn update(&mut self, skill: Skill, points_gained: i32, band_increased: bool) {
        self.skills[skill].update(points_gained, band_increased);
    }

    /// Apply a whole period: one gain and one crossing flag per skill.
    pub fn update_all(&mut self, gains: &SkillMap<i32>, crossed: &SkillMap<bool>) {
        for skill in Skill::ALL {
            self.update(skill, gains[skill], crossed[skill]);
        }
    }

    pub fn get(&self, skill: Skill) -> SkillInterval {
        self.skills[skill]
    }

    pub fn is_solved(&self, skill: Skill) -> bool {
        self.skills[skill].is_solved()
    }

    pub fn intervals(&self) -> &SkillMap<SkillInterval> {
        &self.skills
    }

    pub fn mins(&self) -> SkillMap<i32> {
        self.skills.map(|_, iv| iv.min)
    }

    /// Σ (max - min) over all skills.
    pub fn total_unknown(&self) -> i32 {
        self.skills.values().iter().map(SkillInterval::width).sum()
    }

    pub fn summary(&self) -> String {
        let mut out = format!("Total Unknown: {}", self.total_unknown());
        for (skill, iv) in self.skills.iter() {
            out.push_str(&format!("\n{}: ({}, {})", skill.name(), iv.min, iv.max));
        }
        out
    }
}
