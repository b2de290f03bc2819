use rayon::prelude::*;
use serde::{Serialize, Deserialize};
use crate::{Float,DESCRIPTOR_LENGTH};

/// Second best distance when set two holds fewer than two candidates
pub const UNMATCHED_DISTANCE: u32 = 0x7fff_ffff;

/// Accepted correspondence. Indices are 1-based, `score` is the squared distance of the pair.
#[derive(Debug,Copy,Clone,PartialEq,Eq,Serialize,Deserialize)]
pub struct Match {
    pub index_one: usize,
    pub index_two: usize,
    pub score: u32
}

impl Match {
    pub fn to_pair(&self) -> (usize,usize) {
        (self.index_one,self.index_two)
    }
}

pub fn squared_distance(a: &[u8; DESCRIPTOR_LENGTH], b: &[u8; DESCRIPTOR_LENGTH]) -> u32 {
    a.iter().zip(b.iter()).map(|(&x,&y)| {
        let delta = x as i32 - y as i32;
        (delta*delta) as u32
    }).sum()
}

/// Best and second best distance of `descriptor` over `candidates`, with the 0-based index of the best.
/// Equal distances keep the earlier candidate as best.
pub fn two_nearest(descriptor: &[u8; DESCRIPTOR_LENGTH], candidates: &[[u8; DESCRIPTOR_LENGTH]]) -> (Option<usize>,u32,u32) {
    let mut best = UNMATCHED_DISTANCE;
    let mut second_best = UNMATCHED_DISTANCE;
    let mut best_index = None;

    for (k,candidate) in candidates.iter().enumerate() {
        let distance = squared_distance(descriptor, candidate);
        if distance < best {
            second_best = best;
            best = distance;
            best_index = Some(k);
        } else if distance < second_best {
            second_best = distance;
        }
    }

    (best_index,best,second_best)
}

fn ratio_test(k: usize, descriptor: &[u8; DESCRIPTOR_LENGTH], set_two: &[[u8; DESCRIPTOR_LENGTH]], ratio_threshold: Float) -> Option<Match> {
    let (best_index,best,second_best) = two_nearest(descriptor, set_two);
    match best_index {
        Some(index) if ratio_threshold*(best as Float) < second_best as Float => Some(Match{index_one: k+1, index_two: index+1, score: best}),
        _ => None
    }
}

/// Matches every descriptor of `set_one` to its nearest neighbour in `set_two`, keeping only
/// pairs whose nearest distance times `ratio_threshold` stays below the second nearest one.
///
/// With a single candidate in `set_two` the second nearest distance is `UNMATCHED_DISTANCE`,
/// so the pair is accepted.
pub fn match_descriptors(set_one: &[[u8; DESCRIPTOR_LENGTH]], set_two: &[[u8; DESCRIPTOR_LENGTH]], ratio_threshold: Float) -> Vec<Match> {
    let mut matches: Vec<Match> = set_one.iter().enumerate().filter_map(|(k,descriptor)| ratio_test(k, descriptor, set_two, ratio_threshold)).collect();
    matches.shrink_to_fit();
    matches
}

/// Same result as `match_descriptors`, searching set one in parallel
pub fn par_match_descriptors(set_one: &[[u8; DESCRIPTOR_LENGTH]], set_two: &[[u8; DESCRIPTOR_LENGTH]], ratio_threshold: Float) -> Vec<Match> {
    let mut matches: Vec<Match> = set_one.par_iter().enumerate().filter_map(|(k,descriptor)| ratio_test(k, descriptor, set_two, ratio_threshold)).collect();
    matches.shrink_to_fit();
    matches
}
