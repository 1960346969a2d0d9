//! Sliding-window majority vote over the primary hand's results

use std::collections::VecDeque;

use crate::classifier::Classification;
use crate::config::{HISTORY_SIZE, MIN_CONSENSUS};

pub struct TemporalSmoother {
    history: VecDeque<Classification>,
    capacity: usize,
    min_consensus: f32,
}

struct Group<'a> {
    count: usize,
    best: &'a Classification,
}

impl TemporalSmoother {
    pub fn new(capacity: usize, min_consensus: f32) -> Self {
        let capacity = capacity.max(1);
        Self {
            history: VecDeque::with_capacity(capacity),
            capacity,
            min_consensus,
        }
    }

    /// Feed one frame (`None` when no hand was seen) and return the vote
    pub fn smooth(&mut self, raw: Option<Classification>) -> Option<Classification> {
        match raw {
            // Decay one entry at a time rather than dropping the window
            None => {
                self.history.pop_front();
            }
            Some(result) if result.motion_detected => {
                self.history.clear();
                self.history.push_back(result);
            }
            Some(result) => {
                self.history.push_back(result);
                while self.history.len() > self.capacity {
                    self.history.pop_front();
                }
            }
        }
        self.vote()
    }

    /// Majority symbol of the current window, if it has enough consensus
    pub fn vote(&self) -> Option<Classification> {
        if self.history.is_empty() {
            return None;
        }

        let mut groups: Vec<(&str, Group)> = Vec::new();
        for entry in &self.history {
            match groups.iter_mut().find(|(symbol, _)| *symbol == entry.symbol) {
                Some((_, group)) => {
                    group.count += 1;
                    if entry.confidence > group.best.confidence {
                        group.best = entry;
                    }
                }
                None => groups.push((
                    entry.symbol.as_str(),
                    Group {
                        count: 1,
                        best: entry,
                    },
                )),
            }
        }

        // Most votes; then highest single confidence; then earliest
        let (_, winner) = groups.iter().fold(None::<&(&str, Group)>, |acc, candidate| {
            match acc {
                Some((_, lead))
                    if lead.count > candidate.1.count
                        || (lead.count == candidate.1.count
                            && lead.best.confidence >= candidate.1.best.confidence) =>
                {
                    acc
                }
                _ => Some(candidate),
            }
        })?;

        let ratio = winner.count as f32 / self.history.len() as f32;
        if ratio < self.min_consensus {
            return None;
        }

        let confidence = (winner.best.confidence * (0.5 + 0.5 * ratio)).min(1.0);
        Some(winner.best.clone().with_confidence(confidence))
    }

    pub fn reset(&mut self) {
        self.history.clear();
    }

    pub fn len(&self) -> usize {
        self.history.len()
    }

    pub fn is_empty(&self) -> bool {
        self.history.is_empty()
    }
}

impl Default for TemporalSmoother {
    fn default() -> Self {
        Self::new(HISTORY_SIZE, MIN_CONSENSUS)
    }
}
