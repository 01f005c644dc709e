//! Ordering policies for the working question sequence.

use std::cmp::Ordering;
use std::str::FromStr;

use rand::seq::SliceRandom;
use rand::Rng;

use crate::model::Question;

/// How to order questions before rendering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OrderPolicy {
    /// Keep the current (load or selection) order.
    #[default]
    Default,
    /// Uniform shuffle on the shared RNG.
    Random,
    /// Ascending by id, numeric-aware so `q2` sorts before `q10`.
    Id,
    /// Ascending by prompt text, case-insensitively.
    Alphabetic,
}

impl FromStr for OrderPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "default" => Ok(OrderPolicy::Default),
            "random" => Ok(OrderPolicy::Random),
            "id" => Ok(OrderPolicy::Id),
            "alpha" => Ok(OrderPolicy::Alphabetic),
            other => Err(format!("unknown order '{other}' (expected random, id, or alpha)")),
        }
    }
}

/// Reorder `questions` in place according to `policy`.
pub fn apply(policy: OrderPolicy, questions: &mut [Question], rng: &mut impl Rng) {
    match policy {
        OrderPolicy::Default => {}
        OrderPolicy::Random => questions.shuffle(rng),
        OrderPolicy::Id => questions.sort_by(|a, b| compare_ids(&a.id, &b.id)),
        OrderPolicy::Alphabetic => questions.sort_by(|a, b| {
            a.prompt
                .to_ascii_lowercase()
                .cmp(&b.prompt.to_ascii_lowercase())
        }),
    }
}

/// Numeric-aware id comparison: digit runs compare as integers, everything
/// else compares lexicographically. Total and deterministic.
pub fn compare_ids(a: &str, b: &str) -> Ordering {
    let mut ax = a.as_bytes();
    let mut bx = b.as_bytes();

    loop {
        match (ax.first(), bx.first()) {
            (None, None) => return Ordering::Equal,
            (None, Some(_)) => return Ordering::Less,
            (Some(_), None) => return Ordering::Greater,
            (Some(&ac), Some(&bc)) => {
                if ac.is_ascii_digit() && bc.is_ascii_digit() {
                    let (an, arest) = take_number(ax);
                    let (bn, brest) = take_number(bx);
                    match an.cmp(&bn) {
                        Ordering::Equal => {
                            ax = arest;
                            bx = brest;
                        }
                        other => return other,
                    }
                } else {
                    match ac.cmp(&bc) {
                        Ordering::Equal => {
                            ax = &ax[1..];
                            bx = &bx[1..];
                        }
                        other => return other,
                    }
                }
            }
        }
    }
}

/// Split a leading digit run off `bytes`, returning its value and the rest.
fn take_number(bytes: &[u8]) -> (u128, &[u8]) {
    let end = bytes
        .iter()
        .position(|b| !b.is_ascii_digit())
        .unwrap_or(bytes.len());
    let mut value: u128 = 0;
    for &b in &bytes[..end] {
        // Saturate rather than overflow on absurdly long digit runs.
        value = value.saturating_mul(10).saturating_add((b - b'0') as u128);
    }
    (value, &bytes[end..])
}
