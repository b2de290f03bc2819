extern crate dsp_sift;
extern crate rand;

use rand::{SeedableRng,RngCore,rngs::SmallRng};
use dsp_sift::{DESCRIPTOR_LENGTH,Match,match_descriptors,par_match_descriptors};
use dsp_sift::matching::{squared_distance,two_nearest,UNMATCHED_DISTANCE};

fn random_descriptors(rng: &mut SmallRng, count: usize) -> Vec<[u8; DESCRIPTOR_LENGTH]> {
    (0..count).map(|_| {
        let mut descriptor = [0u8; DESCRIPTOR_LENGTH];
        for v in descriptor.iter_mut() {
            *v = (rng.next_u32() % 256) as u8;
        }
        descriptor
    }).collect()
}

fn constant(value: u8) -> [u8; DESCRIPTOR_LENGTH] {
    [value; DESCRIPTOR_LENGTH]
}

#[test]
fn distance_is_sum_of_squares() {
    let a = constant(10);
    let mut b = constant(10);
    b[0] = 13;
    b[127] = 6;
    assert_eq!(squared_distance(&a, &b), 9 + 16);
    assert_eq!(squared_distance(&constant(0), &constant(255)), 255*255*128);
}

#[test]
fn accepted_matches_pass_the_ratio_test() {
    let mut rng = SmallRng::seed_from_u64(7);
    let set_one = random_descriptors(&mut rng, 40);
    let set_two = random_descriptors(&mut rng, 60);
    let ratio = 1.05;

    let matches = match_descriptors(&set_one, &set_two, ratio);
    for m in matches.iter() {
        assert!(m.index_one >= 1 && m.index_one <= set_one.len());
        assert!(m.index_two >= 1 && m.index_two <= set_two.len());
        let descriptor = &set_one[m.index_one-1];
        let distances: Vec<u32> = set_two.iter().map(|c| squared_distance(descriptor, c)).collect();
        let best = *distances.iter().min().unwrap();
        assert_eq!(m.score, best);
        assert_eq!(distances[m.index_two-1], best);
        let second_best = distances.iter().enumerate().filter(|&(k,_)| k != m.index_two-1).map(|(_,&d)| d).min().unwrap();
        assert!(ratio*(best as f64) < second_best as f64);
    }
}

#[test]
fn rejected_descriptors_fail_the_ratio_test() {
    let mut rng = SmallRng::seed_from_u64(11);
    let set_one = random_descriptors(&mut rng, 30);
    let set_two = random_descriptors(&mut rng, 30);
    let ratio = 1.1;

    let matches = match_descriptors(&set_one, &set_two, ratio);
    for (k,descriptor) in set_one.iter().enumerate() {
        if matches.iter().any(|m| m.index_one == k+1) {
            continue;
        }
        let (_,best,second_best) = two_nearest(descriptor, &set_two);
        assert!(!(ratio*(best as f64) < second_best as f64));
    }
}

#[test]
fn matching_is_idempotent() {
    let mut rng = SmallRng::seed_from_u64(3);
    let set_one = random_descriptors(&mut rng, 25);
    let set_two = random_descriptors(&mut rng, 25);
    assert_eq!(match_descriptors(&set_one, &set_two, 1.0), match_descriptors(&set_one, &set_two, 1.0));
}

#[test]
fn parallel_search_gives_the_sequential_result() {
    let mut rng = SmallRng::seed_from_u64(5);
    let set_one = random_descriptors(&mut rng, 200);
    let set_two = random_descriptors(&mut rng, 150);
    for &ratio in [0.0, 1.0, 1.5].iter() {
        assert_eq!(par_match_descriptors(&set_one, &set_two, ratio), match_descriptors(&set_one, &set_two, ratio));
    }
}

#[test]
fn matches_are_ordered_by_first_index() {
    let mut rng = SmallRng::seed_from_u64(13);
    let set_one = random_descriptors(&mut rng, 50);
    let set_two = random_descriptors(&mut rng, 20);
    let matches = match_descriptors(&set_one, &set_two, 0.5);
    assert!(matches.windows(2).all(|pair| pair[0].index_one < pair[1].index_one));
}

#[test]
fn empty_sets_give_no_matches() {
    let set = vec![constant(1), constant(2)];
    assert!(match_descriptors(&[], &set, 1.5).is_empty());
    assert!(match_descriptors(&set, &[], 1.5).is_empty());
    assert!(par_match_descriptors(&set, &[], 1.5).is_empty());
}

#[test]
fn single_candidate_is_accepted() {
    let set_one = vec![constant(40)];
    let set_two = vec![constant(40)];
    let matches = match_descriptors(&set_one, &set_two, 1.5);
    assert_eq!(matches, vec![Match{index_one: 1, index_two: 1, score: 0}]);

    let (best_index,best,second_best) = two_nearest(&set_one[0], &set_two);
    assert_eq!(best_index, Some(0));
    assert_eq!(best, 0);
    assert_eq!(second_best, UNMATCHED_DISTANCE);
}

#[test]
fn indices_are_one_based() {
    let set_one = vec![constant(0), constant(100), constant(200)];
    let set_two = vec![constant(201), constant(99), constant(2)];
    let pairs: Vec<(usize,usize)> = match_descriptors(&set_one, &set_two, 1.5).iter().map(|m| m.to_pair()).collect();
    assert_eq!(pairs, vec![(1,3),(2,2),(3,1)]);
}

#[test]
fn duplicated_best_candidate_is_ambiguous() {
    let set_one = vec![constant(50)];
    let set_two = vec![constant(10), constant(52), constant(52)];

    assert!(match_descriptors(&set_one, &set_two, 1.0).is_empty());

    // Below a ratio of one the tie passes and the earlier candidate wins
    let matches = match_descriptors(&set_one, &set_two, 0.5);
    assert_eq!(matches, vec![Match{index_one: 1, index_two: 2, score: 4*128}]);
}

#[test]
fn matching_is_not_symmetric() {
    let set_one = vec![constant(10)];
    let set_two = vec![constant(12), constant(30)];

    let forward = match_descriptors(&set_one, &set_two, 1.5);
    assert_eq!(forward, vec![Match{index_one: 1, index_two: 1, score: 4*128}]);

    let backward = match_descriptors(&set_two, &set_one, 1.5);
    assert_eq!(backward.len(), 2);
    assert_eq!(backward[1], Match{index_one: 2, index_two: 1, score: 400*128});
}
