use popgrad_core::Node;

// Each integration test binary includes this module; not every binary uses
// every helper.
#[allow(dead_code)]
pub(crate) fn init_logger() {
    let _ = env_logger::builder().is_test(true).try_init();
}

#[allow(dead_code)]
pub(crate) fn leaf(values: &[f64]) -> Node {
    Node::new(values.to_vec()).expect("Test node creation failed")
}

#[allow(dead_code)]
pub(crate) fn assert_population_eq(actual: &[f64], expected: &[f64]) {
    popgrad_core::utils::testing::check_population_near(actual, expected, 1e-12);
}
