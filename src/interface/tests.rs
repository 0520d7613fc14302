use crate::interface::{quickshift, Parameters};
use crate::test_utils::{close_l1, read_image};
use ndarray::{arr1, arr2, Array3, ArrayD, IxDyn};

#[test]
fn test_rejects_more_than_three_dimensions() {
    let image = ArrayD::<f64>::zeros(IxDyn(&[2, 2, 2, 2]));
    let result = quickshift(image.view(), &Parameters::default());
    assert!(result.is_err());
    assert!(result.unwrap_err().to_string().contains("3 dimensions"));
}

#[test]
fn test_rejects_less_than_two_dimensions() {
    let image = arr1(&[1.0, 2.0, 3.0]).into_dyn();
    assert!(quickshift(image.view(), &Parameters::default()).is_err());
}

#[test]
fn test_rejects_empty_image() {
    let image = ArrayD::<f64>::zeros(IxDyn(&[0, 4]));
    assert!(quickshift(image.view(), &Parameters::default()).is_err());
}

#[test]
fn test_rejects_degenerate_sigma() {
    let image = ArrayD::<f64>::zeros(IxDyn(&[4, 4]));

    let parameters = Parameters {
        sigma: 0.0,
        ..Parameters::default()
    };
    assert!(quickshift(image.view(), &parameters).is_err());

    let parameters = Parameters {
        sigma: f64::INFINITY,
        ..Parameters::default()
    };
    assert!(quickshift(image.view(), &parameters).is_err());
}

// Same 1x3 image as the engine tests, through the adapter: parents come back
// as real-valued linear indices.
#[test]
fn test_maps_match_hand_computed_values() {
    let image = arr2(&[[0.0, 0.0, 10.0]]).into_dyn();
    let parameters = Parameters {
        sigma: 10.0,
        tau: Some(2.0),
        ..Parameters::default()
    };
    let (parents, dists, density) = quickshift(image.view(), &parameters).unwrap();

    assert_eq!(arr2(&[[1.0, 1.0, 2.0]]), parents);

    assert_eq!(1.0, dists[[0, 0]]);
    assert!(dists[[0, 1]].is_infinite());
    assert!(dists[[0, 2]].is_infinite());

    close_l1(2.5895330, density[[0, 0]], 1e-4);
    close_l1(2.5985181, density[[0, 1]], 1e-4);
    close_l1(2.1980261, density[[0, 2]], 1e-4);
}

#[test]
fn test_output_extent_ignores_channel_count() {
    let parameters = Parameters {
        sigma: 1.0,
        ..Parameters::default()
    };

    let image = Array3::from_shape_fn((5, 4, 3), |(r, c, k)| {
        (0.3 * r as f64 + 0.7 * c as f64 + 0.1 * k as f64).sin()
    })
    .into_dyn();
    let (parents, dists, density) = quickshift(image.view(), &parameters).unwrap();
    assert_eq!(&[5, 4], parents.shape());
    assert_eq!(&[5, 4], dists.shape());
    assert_eq!(&[5, 4], density.shape());

    let image = arr2(&[
        [0.1, 0.2, 0.3, 0.4],
        [0.5, 0.6, 0.7, 0.8],
        [0.9, 1.0, 1.1, 1.2],
        [1.3, 1.4, 1.5, 1.6],
        [1.7, 1.8, 1.9, 2.0],
    ])
    .into_dyn();
    let (parents, dists, density) = quickshift(image.view(), &parameters).unwrap();
    assert_eq!(&[5, 4], parents.shape());
    assert_eq!(&[5, 4], dists.shape());
    assert_eq!(&[5, 4], density.shape());
}

#[test]
fn test_medoid_flag_changes_variant_not_shape() {
    let image = read_image("data/test_image.csv").into_dyn();

    let mut parameters = Parameters {
        sigma: 1.0,
        tau: Some(3.0),
        ..Parameters::default()
    };
    parameters.apply_flags(&["Medoid"]).unwrap();
    assert_eq!("medoid", parameters.mode());

    let (parents, dists, density) = quickshift(image.view(), &parameters).unwrap();
    assert_eq!(&[8, 8], parents.shape());
    assert_eq!(&[8, 8], dists.shape());
    assert_eq!(&[8, 8], density.shape());
}

#[test]
fn test_parent_indices_stay_in_bounds() {
    let image = read_image("data/test_image.csv").into_dyn();
    let parameters = Parameters {
        sigma: 1.0,
        ..Parameters::default()
    };
    let (parents, _, _) = quickshift(image.view(), &parameters).unwrap();
    for &parent in parents.iter() {
        assert!(parent >= 0.0);
        assert!(parent < 64.0);
        assert_eq!(parent, parent.trunc());
    }
}
