use super::*;

#[test]
fn can_validate_default_configs_of_all_algorithms() {
    ["GNG", "GNG-U", "HCL", "NG", "NGCHL", "CHL", "GG", "GR", "SOM", "LBG", "LBG-U"].iter().for_each(|name| {
        let algorithm = Algorithm::from_name(name).expect("unknown algorithm");
        let config = SimulationConfig::new(algorithm);

        assert!(config.validate().is_ok(), "{name} has invalid defaults");
        assert_eq!(config.algorithm.name(), *name);
    });
}

parameterized_test! {can_resolve_algorithm_by_name, (name, expected), {
    can_resolve_algorithm_by_name_impl(name, expected);
}}

can_resolve_algorithm_by_name! {
    case01_lower_case: ("gng", Some("GNG")),
    case02_alias: ("gngu", Some("GNG-U")),
    case03_ring: ("gr", Some("GR")),
    case04_hebbian_alias: ("ng-chl", Some("NGCHL")),
    case05_unknown: ("kohonen", None),
    case06_empty: ("", None),
}

fn can_resolve_algorithm_by_name_impl(name: &str, expected: Option<&str>) {
    assert_eq!(Algorithm::from_name(name).map(|algorithm| algorithm.name()), expected);
}

#[test]
fn can_classify_algorithms() {
    let gng = Algorithm::from_name("GNG").unwrap();
    let gg = Algorithm::from_name("GG").unwrap();
    let ng = Algorithm::from_name("NG").unwrap();
    let lbg = Algorithm::from_name("LBG-U").unwrap();

    assert!(gng.is_gng_type() && gng.is_growing() && !gng.is_discrete());
    assert!(!gg.is_gng_type() && gg.is_growing());
    assert!(!ng.is_growing());
    assert!(lbg.is_discrete() && !lbg.is_growing());
}

#[test]
fn can_collect_all_validation_errors() {
    let config = SimulationConfig {
        max_nodes: 0,
        max_degree: 2,
        step_size: MAX_STEP_SIZE + 1,
        decay: 1.,
        ..SimulationConfig::default()
    };

    let message = config.validate().expect_err("config should be invalid").to_string();

    assert!(message.contains("max nodes"));
    assert!(message.contains("max degree"));
    assert!(message.contains("step size"));
    assert!(message.contains("decay"));
    assert!(message.contains("at least 2 nodes"));
    assert!(message.matches(", ").count() >= 4);
}

#[test]
fn can_validate_algorithm_parameters() {
    let grid = SimulationConfig {
        max_nodes: 8,
        ..SimulationConfig::new(Algorithm::GrowingGrid(GrowingGridParams::default()))
    };
    let som = SimulationConfig::new(Algorithm::SelfOrganizingMap(SomParams {
        sigma: Schedule::new(0., 1.),
        ..SomParams::default()
    }));
    let lbg = SimulationConfig { discrete_signals: 0, ..SimulationConfig::new(Algorithm::Lbg) };

    assert!(grid.validate().expect_err("grid does not fit").to_string().contains("3x3"));
    assert!(som.validate().expect_err("sigma is zero").to_string().contains("sigma"));
    assert!(lbg.validate().expect_err("no signals").to_string().contains("discrete signals"));
}

#[test]
fn can_use_lattice_size_as_node_limit_of_som() {
    let som = SimulationConfig {
        max_nodes: 5,
        ..SimulationConfig::new(Algorithm::SelfOrganizingMap(SomParams { width: 4, height: 3, ..SomParams::default() }))
    };
    let gng = SimulationConfig { max_nodes: 5, ..SimulationConfig::default() };

    assert_eq!(som.effective_max_nodes(), 12);
    assert_eq!(gng.effective_max_nodes(), 5);
}

parameterized_test! {can_calculate_schedule_value, (initial, last, time, expected), {
    can_calculate_schedule_value_impl(initial, last, time, expected);
}}

can_calculate_schedule_value! {
    case01_start: (0.5, 0.005, 0., 0.5),
    case02_end: (0.5, 0.005, 100., 0.005),
    case03_middle: (1., 0.01, 50., 0.1),
    case04_growing: (20., 200., 50., 63.245553203367585),
}

fn can_calculate_schedule_value_impl(initial: Float, last: Float, time: Float, expected: Float) {
    let value = Schedule::new(initial, last).at(time, 100.);

    assert!((value - expected).abs() < 1E-9, "{value} != {expected}");
}
