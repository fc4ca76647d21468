//! Game-stage mode.
//!
//! A lemon has to be washed, dried, peeled, sliced and aligned before it can
//! be squeezed. Each stage needs a configured number of clicks. The pipeline
//! only tracks progress; the final squeeze still goes through the store.

use super::model::LemonId;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Stage {
    Wash,
    Dry,
    Peel,
    Slice,
    Align,
    Squeeze,
    Done,
}

impl Stage {
    pub const SEQUENCE: [Stage; 6] = [
        Stage::Wash,
        Stage::Dry,
        Stage::Peel,
        Stage::Slice,
        Stage::Align,
        Stage::Squeeze,
    ];

    pub fn next(self) -> Stage {
        match self {
            Stage::Wash => Stage::Dry,
            Stage::Dry => Stage::Peel,
            Stage::Peel => Stage::Slice,
            Stage::Slice => Stage::Align,
            Stage::Align => Stage::Squeeze,
            Stage::Squeeze | Stage::Done => Stage::Done,
        }
    }

    pub fn verb(self) -> &'static str {
        match self {
            Stage::Wash => "Wash",
            Stage::Dry => "Dry",
            Stage::Peel => "Peel",
            Stage::Slice => "Slice",
            Stage::Align => "Align",
            Stage::Squeeze => "Squeeze",
            Stage::Done => "Enjoy",
        }
    }

    pub fn hint(self) -> &'static str {
        match self {
            Stage::Wash => "Rinse the lemon under cold water",
            Stage::Dry => "Pat it dry with a towel",
            Stage::Peel => "Peel away the zest",
            Stage::Slice => "Slice it in half",
            Stage::Align => "Line it up over the glass",
            Stage::Squeeze => "Squeeze with all your might",
            Stage::Done => "Fresh juice is served",
        }
    }
}

/// Clicks needed to clear each stage.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StageClicks {
    #[serde(default = "default_wash")]
    pub wash: u32,
    #[serde(default = "default_dry")]
    pub dry: u32,
    #[serde(default = "default_peel")]
    pub peel: u32,
    #[serde(default = "default_slice")]
    pub slice: u32,
    #[serde(default = "default_align")]
    pub align: u32,
    #[serde(default = "default_squeeze")]
    pub squeeze: u32,
}

impl StageClicks {
    /// Zero counts are treated as one click.
    pub fn required(&self, stage: Stage) -> u32 {
        let n = match stage {
            Stage::Wash => self.wash,
            Stage::Dry => self.dry,
            Stage::Peel => self.peel,
            Stage::Slice => self.slice,
            Stage::Align => self.align,
            Stage::Squeeze => self.squeeze,
            Stage::Done => return 0,
        };
        n.max(1)
    }

    /// Clicks across every stage. Summed in `u64` so no configured counts
    /// can overflow.
    pub fn total(&self) -> u64 {
        Stage::SEQUENCE
            .iter()
            .map(|s| u64::from(self.required(*s)))
            .sum()
    }
}

impl Default for StageClicks {
    fn default() -> Self {
        Self {
            wash: default_wash(),
            dry: default_dry(),
            peel: default_peel(),
            slice: default_slice(),
            align: default_align(),
            squeeze: default_squeeze(),
        }
    }
}

fn default_wash() -> u32 {
    3
}
fn default_dry() -> u32 {
    2
}
fn default_peel() -> u32 {
    4
}
fn default_slice() -> u32 {
    3
}
fn default_align() -> u32 {
    2
}
fn default_squeeze() -> u32 {
    1
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StageProgress {
    /// More clicks needed in the current stage.
    Continue { remaining: u32 },
    /// Moved on to the given stage.
    Advanced(Stage),
    /// The squeeze stage is complete; the caller should start the squeeze.
    ReadyToSqueeze,
    /// Nothing left to do.
    Finished,
}

#[derive(Debug, Clone)]
pub struct StagePipeline {
    lemon: LemonId,
    clicks: StageClicks,
    stage: Stage,
    done_in_stage: u32,
    awaiting_squeeze: bool,
}

impl StagePipeline {
    pub fn new(lemon: LemonId, clicks: StageClicks) -> Self {
        Self {
            lemon,
            clicks,
            stage: Stage::Wash,
            done_in_stage: 0,
            awaiting_squeeze: false,
        }
    }

    pub fn lemon(&self) -> LemonId {
        self.lemon
    }

    pub fn stage(&self) -> Stage {
        self.stage
    }

    pub fn remaining_in_stage(&self) -> u32 {
        self.clicks.required(self.stage).saturating_sub(self.done_in_stage)
    }

    /// Overall progress in `[0, 1]`.
    pub fn progress(&self) -> f64 {
        if self.stage == Stage::Done {
            return 1.0;
        }
        let done: u64 = Stage::SEQUENCE
            .iter()
            .take_while(|s| **s != self.stage)
            .map(|s| u64::from(self.clicks.required(*s)))
            .sum::<u64>()
            + u64::from(self.done_in_stage);
        done as f64 / self.clicks.total() as f64
    }

    pub fn is_awaiting_squeeze(&self) -> bool {
        self.awaiting_squeeze
    }

    pub fn click(&mut self) -> StageProgress {
        if self.stage == Stage::Done || self.awaiting_squeeze {
            return StageProgress::Finished;
        }
        self.done_in_stage += 1;
        let remaining = self.remaining_in_stage();
        if remaining > 0 {
            return StageProgress::Continue { remaining };
        }
        if self.stage == Stage::Squeeze {
            self.awaiting_squeeze = true;
            return StageProgress::ReadyToSqueeze;
        }
        self.stage = self.stage.next();
        self.done_in_stage = 0;
        StageProgress::Advanced(self.stage)
    }

    /// The store refused the squeeze; allow another attempt.
    pub fn retry_squeeze(&mut self) {
        if self.awaiting_squeeze {
            self.awaiting_squeeze = false;
            self.done_in_stage = 0;
        }
    }

    /// The squeeze of this pipeline's lemon completed.
    pub fn mark_done(&mut self) {
        self.stage = Stage::Done;
        self.done_in_stage = 0;
        self.awaiting_squeeze = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn quick() -> StageClicks {
        StageClicks {
            wash: 2,
            dry: 1,
            peel: 1,
            slice: 1,
            align: 1,
            squeeze: 1,
        }
    }

    #[test]
    fn test_stage_advances_after_required_clicks() {
        let mut p = StagePipeline::new(LemonId(1), quick());
        assert_eq!(p.stage(), Stage::Wash);
        assert_eq!(p.click(), StageProgress::Continue { remaining: 1 });
        assert_eq!(p.click(), StageProgress::Advanced(Stage::Dry));
        assert_eq!(p.click(), StageProgress::Advanced(Stage::Peel));
        assert_eq!(p.click(), StageProgress::Advanced(Stage::Slice));
        assert_eq!(p.click(), StageProgress::Advanced(Stage::Align));
        assert_eq!(p.click(), StageProgress::Advanced(Stage::Squeeze));
        assert_eq!(p.click(), StageProgress::ReadyToSqueeze);
        assert!(p.is_awaiting_squeeze());
        assert_eq!(p.click(), StageProgress::Finished);
        p.mark_done();
        assert_eq!(p.stage(), Stage::Done);
        assert_eq!(p.progress(), 1.0);
        assert_eq!(p.click(), StageProgress::Finished);
    }

    #[test]
    fn test_progress_fraction() {
        let mut p = StagePipeline::new(LemonId(1), quick());
        assert_eq!(p.progress(), 0.0);
        p.click();
        p.click();
        p.click();
        // 3 of 7 clicks
        assert!((p.progress() - 3.0 / 7.0).abs() < 1e-9);
    }

    #[test]
    fn test_zero_clicks_count_as_one() {
        let clicks = StageClicks {
            wash: 0,
            ..StageClicks::default()
        };
        assert_eq!(clicks.required(Stage::Wash), 1);
        assert_eq!(clicks.required(Stage::Done), 0);
        assert_eq!(StageClicks::default().total(), 15);
    }

    #[test]
    fn test_huge_click_counts_do_not_overflow() {
        let clicks: StageClicks = toml::from_str("wash = 4294967295\ndry = 4294967295").unwrap();
        assert_eq!(clicks.total(), 2 * u64::from(u32::MAX) + 4 + 3 + 2 + 1);

        let mut p = StagePipeline::new(LemonId(1), clicks);
        assert_eq!(p.progress(), 0.0);
        assert_eq!(
            p.click(),
            StageProgress::Continue {
                remaining: u32::MAX - 1
            }
        );
        assert!(p.progress() > 0.0 && p.progress() < 1.0);
    }

    #[test]
    fn test_retry_squeeze() {
        let mut p = StagePipeline::new(
            LemonId(1),
            StageClicks {
                wash: 1,
                dry: 1,
                peel: 1,
                slice: 1,
                align: 1,
                squeeze: 2,
            },
        );
        for _ in 0..5 {
            p.click();
        }
        assert_eq!(p.click(), StageProgress::Continue { remaining: 1 });
        assert_eq!(p.click(), StageProgress::ReadyToSqueeze);
        p.retry_squeeze();
        assert_eq!(p.stage(), Stage::Squeeze);
        assert_eq!(p.remaining_in_stage(), 2);
    }
}
