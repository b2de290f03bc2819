extern crate dsp_sift;

use dsp_sift::DESCRIPTOR_LENGTH;
use dsp_sift::descriptor::transpose::{transpose_descriptor,transposed_index};

fn ramp() -> [usize; DESCRIPTOR_LENGTH] {
    let mut src = [0usize; DESCRIPTOR_LENGTH];
    for (i,v) in src.iter_mut().enumerate() {
        *v = i;
    }
    src
}

#[test]
fn entries_move_to_transposed_index() {
    let src = ramp();
    let dst = transpose_descriptor(&src);
    for i in 0..DESCRIPTOR_LENGTH {
        assert_eq!(dst[transposed_index(i)], src[i]);
    }
}

#[test]
fn mapping_is_a_permutation() {
    let mut seen = [false; DESCRIPTOR_LENGTH];
    for i in 0..DESCRIPTOR_LENGTH {
        let target = transposed_index(i);
        assert!(!seen[target]);
        seen[target] = true;
    }
    assert!(seen.iter().all(|&s| s));
}

#[test]
fn known_positions() {
    // j = 0, i = 0, t = 0 lands in the last spatial row with t unchanged
    assert_eq!(transposed_index(0), 96);
    assert_eq!(transposed_index(1), 103);
    assert_eq!(transposed_index(7), 97);
    assert_eq!(transposed_index(8), 104);
    assert_eq!(transposed_index(32), 64);
    assert_eq!(transposed_index(127), 25);
}

#[test]
fn applying_twice_restores_the_descriptor() {
    let src = ramp();
    let twice = transpose_descriptor(&transpose_descriptor(&src));
    assert_eq!(twice.to_vec(), src.to_vec());
}

#[test]
fn float_descriptors_are_permuted_without_change_of_values() {
    let mut src = [0.0f64; DESCRIPTOR_LENGTH];
    src[3] = 0.25;
    src[70] = 0.5;
    let dst = transpose_descriptor(&src);
    assert_eq!(dst[transposed_index(3)], 0.25);
    assert_eq!(dst[transposed_index(70)], 0.5);
    assert_eq!(dst.iter().sum::<f64>(), 0.75);
}
