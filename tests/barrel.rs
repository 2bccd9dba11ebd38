use std::f64::consts::PI;

use alignable::{
    alignable::{Alignable, Barrel, Composite, DetUnit, StructureType, Wheel},
    error::AlignError,
    prelude::*,
    report::{alignments, count_units, dump_tree},
};
use approx::assert_relative_eq;

fn init_logging() {
    let _ = tracing_subscriber::fmt()
        .with_max_level(tracing::Level::TRACE)
        .with_test_writer()
        .try_init();
}

/// Wheel of `n` chambers spread in phi at radius `r`, all at `z`
fn build_wheel(first_id: u32, n: u32, r: f64, z: f64) -> Wheel {
    let chambers = (0..n)
        .map(|i| {
            let phi = 2. * PI * i as f64 / n as f64;
            DetUnit::new(
                first_id + i,
                Vector3::new(r * phi.cos(), r * phi.sin(), z),
                Rotation3::from_axis_angle(&Vector3::z_axis(), phi),
            )
        })
        .collect_vec();
    Wheel::new(StructureType::Wheel, chambers).unwrap()
}

fn build_barrel() -> Barrel {
    let wheels = [-1200., -600., 0., 600., 1200.]
        .iter()
        .enumerate()
        .map(|(i, &z)| build_wheel(100 * i as u32, 12, 700., z))
        .collect_vec();
    Barrel::new(StructureType::Barrel, wheels).unwrap()
}

#[test]
fn test_three_children_mean_z() {
    init_logging();

    let units = [1., 2., 3.]
        .iter()
        .enumerate()
        .map(|(i, &z)| DetUnit::new(i as u32, Vector3::new(5., 5., z), Rotation3::identity()))
        .collect_vec();
    let wheel = Wheel::new(StructureType::Wheel, units).unwrap();

    assert_eq!(wheel.surface().position(), Vector3::new(0., 0., 2.));
    assert_eq!(wheel.child_count(), 3);
    assert!(matches!(
        wheel.child(3),
        Err(AlignError::OutOfRange { index: 3, size: 3 })
    ));
    assert_eq!(wheel.child(2).unwrap().id(), 2);
    assert_eq!(wheel.child(2).unwrap().global_position()[2], 3.);
}

#[test]
fn test_barrel_surface() {
    init_logging();

    let barrel = build_barrel();
    assert_eq!(barrel.child_count(), 5);
    assert_eq!(count_units(&barrel), 60);
    assert_relative_eq!(barrel.surface().position(), Vector3::zeros());
    assert_eq!(barrel.surface().rotation(), Rotation3::identity());

    // Wheels keep their insertion order
    let zs = barrel.children().map(|w| w.global_position()[2]).collect_vec();
    assert_eq!(zs, vec![-1200., -600., 0., 600., 1200.]);
}

#[test]
fn test_twist_single_child() {
    init_logging();

    let r = Rotation3::from_axis_angle(&Vector3::x_axis(), PI / 3.);
    let unit = DetUnit::new(1, Vector3::new(0., 300., 40.), r);
    let mut wheel = Wheel::new(StructureType::Wheel, vec![unit]).unwrap();

    wheel.twist(0.1);

    let child = wheel.child(0).unwrap();
    assert_relative_eq!(
        *child.global_rotation().matrix(),
        *(r * Rotation3::from_axis_angle(&Vector3::z_axis(), 0.1)).matrix(),
        epsilon = 1e-15
    );
    assert_eq!(child.global_position(), Vector3::new(0., 300., 40.));
    assert_eq!(wheel.surface().rotation(), Rotation3::identity());
    assert_eq!(wheel.surface().position(), Vector3::new(0., 0., 40.));
}

#[test]
fn test_barrel_twist_matches_direct_twist() {
    init_logging();

    let mut barrel = build_barrel();
    let before = barrel.surface();
    let mut reference = build_barrel();

    barrel.twist(-0.02);
    for i in 0..reference.child_count() {
        reference.child_mut(i).unwrap().twist(-0.02);
    }

    assert_eq!(barrel.surface(), before);
    assert_eq!(alignments(&barrel), alignments(&reference));
}

#[test]
fn test_recompute_after_translate_of_one_wheel() {
    init_logging();

    let mut barrel = build_barrel();
    barrel
        .child_mut(4)
        .unwrap()
        .translate(&Vector3::new(0., 0., 50.));
    assert_eq!(barrel.surface().position()[2], 0.);

    barrel.recompute_surface();
    assert_relative_eq!(barrel.surface().position()[2], 10.);
}

#[test]
fn test_heterogeneous_tree() {
    init_logging();

    // Boxed components let units and composites sit side by side
    let station: Box<dyn Alignable> = Box::new(
        Composite::new(
            StructureType::Station,
            vec![
                DetUnit::new(1, Vector3::new(0., 500., 10.), Rotation3::identity()),
                DetUnit::new(2, Vector3::new(0., 520., 30.), Rotation3::identity()),
            ],
        )
        .unwrap(),
    );
    let loose: Box<dyn Alignable> = Box::new(DetUnit::new(
        3,
        Vector3::new(0., -500., 50.),
        Rotation3::identity(),
    ));
    let mut wheel: Composite = Composite::new(StructureType::Wheel, vec![station, loose]).unwrap();

    assert_relative_eq!(wheel.global_position()[2], 35.);
    assert_eq!(count_units(&wheel), 3);
    assert_eq!(wheel.child(0).unwrap().size(), 2);

    wheel.twist(PI);
    let ids = alignments(&wheel)
        .iter()
        .map(|t| (t.id, t.rotation.angle()))
        .collect_vec();
    assert_eq!(ids.len(), 3);
    for (_, angle) in ids {
        assert_relative_eq!(angle, PI, epsilon = 1e-12);
    }

    let mut out: Vec<u8> = Vec::new();
    dump_tree(&wheel, &mut out).unwrap();
    let text = String::from_utf8(out).unwrap();
    assert!(text.starts_with("This Wheel contains 2 components"));
    assert!(text.contains("This Station contains 2 components"));
}
