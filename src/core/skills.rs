// src/core/skills.rs
use std::ops::{Index, IndexMut};

use crate::config::consts::N_SKILLS;
use crate::core::sanitize::label_key;

/// The seven trained skills, in the order the site lists them.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Skill {
    Batting,
    Bowling,
    Keeping,
    Fielding,
    Endurance,
    Technique,
    Power,
}

impl Skill {
    pub const ALL: [Skill; N_SKILLS] = [
        Skill::Batting,
        Skill::Bowling,
        Skill::Keeping,
        Skill::Fielding,
        Skill::Endurance,
        Skill::Technique,
        Skill::Power,
    ];

    pub fn index(self) -> usize {
        self as usize
    }

    pub fn name(self) -> &'static str {
        match self {
            Skill::Batting => "Batting",
            Skill::Bowling => "Bowling",
            Skill::Keeping => "Keeping",
            Skill::Fielding => "Fielding",
            Skill::Endurance => "Endurance",
            Skill::Technique => "Technique",
            Skill::Power => "Power",
        }
    }

    /// Column suffix used by the training yield table ("16Bat", "16Field", …).
    pub fn abbr(self) -> &'static str {
        match self {
            Skill::Batting => "Bat",
            Skill::Bowling => "Bowl",
            Skill::Keeping => "Keep",
            Skill::Fielding => "Field",
            Skill::Endurance => "End",
            Skill::Technique => "Tech",
            Skill::Power => "Power",
        }
    }

    /// Accepts full names and yield-table abbreviations (incl. "Pow").
    pub fn parse(s: &str) -> Option<Skill> {
        let key = label_key(s);
        Skill::ALL.into_iter().find(|sk| {
            key == label_key(sk.name()) || key == label_key(sk.abbr())
        }).or_else(|| (key == "pow").then_some(Skill::Power))
    }
}

/// One value per skill, indexed by `Skill`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default, Hash)]
pub struct SkillMap<T>([T; N_SKILLS]);

impl<T> SkillMap<T> {
    pub const fn new(values: [T; N_SKILLS]) -> Self {
        Self(values)
    }

    pub fn iter(&self) -> impl Iterator<Item = (Skill, &T)> {
        Skill::ALL.into_iter().zip(self.0.iter())
    }

    pub fn values(&self) -> &[T; N_SKILLS] {
        &self.0
    }

    pub fn into_array(self) -> [T; N_SKILLS] {
        self.0
    }

    pub fn map<U>(&self, mut f: impl FnMut(Skill, &T) -> U) -> SkillMap<U> {
        SkillMap(std::array::from_fn(|i| f(Skill::ALL[i], &self.0[i])))
    }

    pub fn zip_with<U, V>(&self, other: &SkillMap<U>, mut f: impl FnMut(&T, &U) -> V) -> SkillMap<V> {
        SkillMap(std::array::from_fn(|i| f(&self.0[i], &other.0[i])))
    }
}

impl<T: Copy> SkillMap<T> {
    pub fn splat(value: T) -> Self {
        Self([value; N_SKILLS])
    }
}

impl SkillMap<i32> {
    pub fn total(&self) -> i64 {
        self.0.iter().map(|&v| v as i64).sum()
    }
}

impl<T> Index<Skill> for SkillMap<T> {
    type Output = T;
    fn index(&self, skill: Skill) -> &T {
        &self.0[skill.index()]
    }
}

impl<T> IndexMut<Skill> for SkillMap<T> {
    fn index_mut(&mut self, skill: Skill) -> &mut T {
        &mut self.0[skill.index()]
    }
}

impl<T> From<[T; N_SKILLS]> for SkillMap<T> {
    fn from(values: [T; N_SKILLS]) -> Self {
        Self(values)
    }
}
