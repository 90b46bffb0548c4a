//! Ranking/sort engine: stable ordering with dense 1-based positions.

use lords_core::AiModel;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use strum_macros::{Display, EnumString};

use crate::timeline::parse_date;

/// Field a ranking is ordered by
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum SortKey {
    Score,
    #[strum(to_string = "vote_score", serialize = "votes")]
    VoteScore,
    Likes,
    /// Likes minus dislikes
    Engagement,
    #[strum(to_string = "release_date", serialize = "date")]
    ReleaseDate,
    Name,
}

impl SortKey {
    /// Direction a freshly selected key starts in
    pub fn default_direction(self) -> SortDirection {
        match self {
            SortKey::Name => SortDirection::Asc,
            _ => SortDirection::Desc,
        }
    }

    fn compare(self, a: &AiModel, b: &AiModel) -> Ordering {
        match self {
            SortKey::Score => cmp_f64(a.score.unwrap_or(0.0), b.score.unwrap_or(0.0)),
            SortKey::VoteScore => a.vote_score.cmp(&b.vote_score),
            SortKey::Likes => a.likes.cmp(&b.likes),
            SortKey::Engagement => a.engagement().cmp(&b.engagement()),
            SortKey::ReleaseDate => {
                let a = a.release_date.as_deref().and_then(parse_date);
                let b = b.release_date.as_deref().and_then(parse_date);
                a.cmp(&b)
            }
            SortKey::Name => a.name.cmp(&b.name),
        }
    }
}

/// Total order over scores; non-finite values rank as 0
fn cmp_f64(a: f64, b: f64) -> Ordering {
    let finite = |v: f64| if v.is_finite() { v } else { 0.0 };
    finite(a).total_cmp(&finite(b))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum SortDirection {
    Asc,
    Desc,
}

impl SortDirection {
    pub fn toggled(self) -> Self {
        match self {
            SortDirection::Asc => SortDirection::Desc,
            SortDirection::Desc => SortDirection::Asc,
        }
    }
}

/// Current sort column of a ranking table
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SortState {
    pub key: SortKey,
    pub direction: SortDirection,
}

impl Default for SortState {
    fn default() -> Self {
        Self::new(SortKey::Score)
    }
}

impl SortState {
    pub fn new(key: SortKey) -> Self {
        Self {
            key,
            direction: key.default_direction(),
        }
    }

    /// Select `key`: the active key flips direction, a new key starts at its default
    pub fn request(&mut self, key: SortKey) {
        if self.key == key {
            self.direction = self.direction.toggled();
        } else {
            *self = Self::new(key);
        }
    }

    pub fn apply(&self, models: &[AiModel]) -> Vec<RankedModel> {
        rank(models, self.key, self.direction)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RankedModel {
    /// 1-based, no gaps
    pub position: usize,
    pub model: AiModel,
}

/// Order `models` by `key` and number them from 1.
///
/// Sorting is stable in both directions: models with equal keys keep their
/// input order. Missing numeric values rank as 0.
pub fn rank(models: &[AiModel], key: SortKey, direction: SortDirection) -> Vec<RankedModel> {
    let mut ordered: Vec<&AiModel> = models.iter().collect();
    ordered.sort_by(|a, b| match direction {
        SortDirection::Asc => key.compare(a, b),
        SortDirection::Desc => key.compare(b, a),
    });

    ordered
        .into_iter()
        .enumerate()
        .map(|(index, model)| RankedModel {
            position: index + 1,
            model: model.clone(),
        })
        .collect()
}

/// Leaderboard of the first `n` after ranking the whole list
pub fn top_n(
    models: &[AiModel],
    key: SortKey,
    direction: SortDirection,
    n: usize,
) -> Vec<RankedModel> {
    let mut ranked = rank(models, key, direction);
    ranked.truncate(n);
    ranked
}
