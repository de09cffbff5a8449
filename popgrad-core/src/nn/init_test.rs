use super::*;
use rand::rngs::StdRng;
use rand::SeedableRng;

#[test]
fn test_zeros_and_full() {
    let z = zeros(3).unwrap();
    assert_eq!(z.data(), vec![0.0; 3]);
    assert!(z.requires_grad());

    let f = full(2, 1.5).unwrap();
    assert_eq!(f.data(), vec![1.5, 1.5]);
}

#[test]
fn test_zero_length_rejected() {
    assert!(matches!(zeros(0), Err(PopGradError::EmptyPopulation { .. })));
    let mut rng = StdRng::seed_from_u64(0);
    assert!(matches!(
        normal(0, 0.0, 1.0, &mut rng),
        Err(PopGradError::EmptyPopulation { .. })
    ));
}

#[test]
fn test_uniform_within_bounds() {
    let mut rng = StdRng::seed_from_u64(42);
    let p = uniform(100, -0.5, 0.5, &mut rng).unwrap();
    assert_eq!(p.numel(), 100);
    assert!(p.data().iter().all(|v| (-0.5..0.5).contains(v)));
}

#[test]
fn test_uniform_invalid_bounds() {
    let mut rng = StdRng::seed_from_u64(42);
    assert!(matches!(
        uniform(4, 1.0, 1.0, &mut rng),
        Err(PopGradError::InvalidInitialization(_))
    ));
    assert!(matches!(
        uniform(4, 0.0, f64::INFINITY, &mut rng),
        Err(PopGradError::InvalidInitialization(_))
    ));
}

#[test]
fn test_normal_is_reproducible() {
    let a = normal(5, 1.0, 0.1, &mut StdRng::seed_from_u64(3)).unwrap();
    let b = normal(5, 1.0, 0.1, &mut StdRng::seed_from_u64(3)).unwrap();
    assert_eq!(a.data(), b.data());
    assert!(a.data().iter().all(|v| (v - 1.0).abs() < 1.0));
}

#[test]
fn test_normal_invalid_std() {
    let mut rng = StdRng::seed_from_u64(1);
    assert!(matches!(
        normal(3, 0.0, -1.0, &mut rng),
        Err(PopGradError::InvalidInitialization(_))
    ));
}
