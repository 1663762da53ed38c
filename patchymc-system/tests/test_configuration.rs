#[cfg(test)]
mod space_tests {
    use rand::rngs::SmallRng;
    use rand::{Rng, SeedableRng};

    use patchymc_numerical::{assert_eq_float, assert_eq_vec3, Vec3};
    use patchymc_system::CuboidPbc;

    #[test]
    fn wrap_is_idempotent_and_in_box() {
        let space = CuboidPbc::new(10.0);
        let mut rng = SmallRng::seed_from_u64(11);
        for _ in 0..200 {
            let p = Vec3::new(
                rng.gen_range(-14.9..14.9),
                rng.gen_range(-14.9..14.9),
                rng.gen_range(-14.9..14.9),
            );
            let w = space.wrap(&p);
            assert!(w.x >= -5.0 && w.x < 5.0);
            assert!(w.y >= -5.0 && w.y < 5.0);
            assert!(w.z >= -5.0 && w.z < 5.0);
            assert_eq_vec3!(space.wrap(&w), w, 1e-12);
        }
    }

    #[test]
    fn diff_is_bounded_for_wrapped_positions() {
        let space = CuboidPbc::new(10.0);
        let max_dist = 5.0 * 3.0_f64.sqrt();
        let mut rng = SmallRng::seed_from_u64(12);
        for _ in 0..200 {
            let p1 = space.wrap(&Vec3::new(
                rng.gen_range(-5.0..5.0),
                rng.gen_range(-5.0..5.0),
                rng.gen_range(-5.0..5.0),
            ));
            let p2 = space.wrap(&Vec3::new(
                rng.gen_range(-5.0..5.0),
                rng.gen_range(-5.0..5.0),
                rng.gen_range(-5.0..5.0),
            ));
            let d = space.dist(&p1, &p2);
            assert!(d >= 0.0);
            assert!(d <= max_dist + 1e-12);
            assert_eq_float!(d, space.dist(&p2, &p1), 1e-12);
        }
    }

    #[test]
    fn diff_picks_the_closest_image() {
        let space = CuboidPbc::new(10.0);
        let p1 = Vec3::new(4.5, 0.0, 0.0);
        let p2 = Vec3::new(-4.5, 0.0, 0.0);
        // The direct separation is 9; the image across the boundary is 1 away
        assert_eq_float!(space.dist(&p1, &p2), 1.0, 1e-12);
        let d = space.diff(&p1, &p2);
        assert_eq_vec3!(d, Vec3::new(-1.0, 0.0, 0.0), 1e-12);
    }

    #[test]
    fn unwrap_returns_the_image_next_to_the_reference() {
        let space = CuboidPbc::new(10.0);
        let reference = Vec3::new(4.5, 0.0, 0.0);
        let p = Vec3::new(-4.5, 1.0, 0.0);
        let image = space.unwrap(&reference, &p);
        assert_eq_vec3!(image, Vec3::new(5.5, 1.0, 0.0), 1e-12);
        // A point already next to the reference is returned unchanged
        let q = Vec3::new(4.0, -1.0, 2.0);
        assert_eq_vec3!(space.unwrap(&reference, &q), q, 1e-12);
    }
}

#[cfg(test)]
mod transform_tests {
    use std::f64::consts::PI;

    use patchymc_numerical::{assert_eq_float, assert_eq_vec3, Matrix3x3, Vec3};
    use patchymc_system::{CoorSet, CuboidPbc, Monomer, Orientation, Particle, ParticleForm};

    fn patchy_particle(index: usize, pos: Vec3, norm: Vec3) -> Particle {
        let ore = Orientation { patch_norm: norm, ..Default::default() };
        Particle::new(index, 0, ParticleForm::Patchy, pos, ore)
    }

    #[test]
    fn translate_commit_and_reverse_restores_position() {
        let space = CuboidPbc::new(10.0);
        let mut p = patchy_particle(0, Vec3::new(1.0, 2.0, 3.0), Vec3::new(1.0, 0.0, 0.0));
        let start = *p.pos(CoorSet::Current);
        let disp = Vec3::new(0.3, -0.2, 0.9);
        p.translate(&disp, &space);
        p.trial_to_current();
        p.translate(&-disp, &space);
        p.trial_to_current();
        assert_eq_vec3!(p.pos(CoorSet::Current), start, 1e-12);
    }

    #[test]
    fn rotate_and_rotate_back_restores_monomer() {
        let space = CuboidPbc::new(10.0);
        let particles = vec![
            patchy_particle(0, Vec3::new(0.0, 0.0, 0.0), Vec3::new(1.0, 0.0, 0.0)),
            patchy_particle(1, Vec3::new(1.0, 0.0, 0.0), Vec3::new(0.0, 1.0, 0.0)),
            patchy_particle(2, Vec3::new(0.0, 1.0, 0.0), Vec3::new(0.0, 0.0, 1.0)),
        ];
        let mut monomer = Monomer::new(0, 1, particles, &space);
        let starts: Vec<Vec3> = monomer
            .particles()
            .iter()
            .map(|p| *p.pos(CoorSet::Current))
            .collect();

        let center = Vec3::new(0.5, 0.5, 0.0);
        let rot = Matrix3x3::rotation_about_axis(&Vec3::new(0.3, -1.0, 0.7), 1.1);
        monomer.rotate(&center, &rot, &space);
        monomer.trial_to_current();
        monomer.rotate(&center, &rot.transposed(), &space);
        monomer.trial_to_current();

        for (p, start) in monomer.particles().iter().zip(starts.iter()) {
            assert_eq_vec3!(p.pos(CoorSet::Current), start, 1e-9);
        }
        for p in monomer.particles() {
            assert_eq_float!(p.ore(CoorSet::Current).patch_norm.length(), 1.0, 1e-9);
        }
    }

    #[test]
    fn rotation_spins_all_owned_patch_vectors() {
        let space = CuboidPbc::new(10.0);
        let ore = Orientation {
            patch_norm: Vec3::new(1.0, 0.0, 0.0),
            patch_orient: Vec3::new(0.0, 1.0, 0.0),
            patch_orient2: Vec3::new(0.0, 0.0, 1.0),
        };
        let mut p = Particle::new(0, 0, ParticleForm::DoubleOrientedPatchy, Vec3::default(), ore);
        let rot = Matrix3x3::rotation_about_axis(&Vec3::new(0.0, 0.0, 1.0), PI / 2.0);
        p.rotate(&Vec3::default(), &rot, &space);
        assert_eq_vec3!(p.ore(CoorSet::Trial).patch_norm, Vec3::new(0.0, 1.0, 0.0), 1e-12);
        assert_eq_vec3!(p.ore(CoorSet::Trial).patch_orient, Vec3::new(-1.0, 0.0, 0.0), 1e-12);
        assert_eq_vec3!(p.ore(CoorSet::Trial).patch_orient2, Vec3::new(0.0, 0.0, 1.0), 1e-12);
        for v in [
            p.ore(CoorSet::Trial).patch_norm,
            p.ore(CoorSet::Trial).patch_orient,
            p.ore(CoorSet::Trial).patch_orient2,
        ] {
            assert_eq_float!(v.length(), 1.0, 1e-12);
        }
    }

    #[test]
    fn center_follows_whole_monomer_translation() {
        let space = CuboidPbc::new(10.0);
        let particles = vec![
            patchy_particle(0, Vec3::new(-0.5, 0.0, 0.0), Vec3::new(1.0, 0.0, 0.0)),
            patchy_particle(1, Vec3::new(0.5, 0.0, 0.0), Vec3::new(1.0, 0.0, 0.0)),
        ];
        let mut monomer = Monomer::new(0, 1, particles, &space);
        let before = monomer.center(CoorSet::Current, &space);
        let disp = Vec3::new(2.25, -1.5, 0.75);
        monomer.translate(&disp, &space);
        monomer.trial_to_current();
        let after = monomer.center(CoorSet::Current, &space);
        assert_eq_vec3!(after, space.wrap(&(before + disp)), 1e-12);
    }

    #[test]
    fn center_is_correct_across_the_boundary() {
        let space = CuboidPbc::new(10.0);
        // Two beads straddling the +x face: their centre sits on the face,
        // not in the middle of the box
        let particles = vec![
            patchy_particle(0, Vec3::new(4.5, 0.0, 0.0), Vec3::new(1.0, 0.0, 0.0)),
            patchy_particle(1, Vec3::new(-4.5, 0.0, 0.0), Vec3::new(1.0, 0.0, 0.0)),
        ];
        let monomer = Monomer::new(0, 1, particles, &space);
        let center = monomer.center(CoorSet::Current, &space);
        assert_eq_vec3!(center, Vec3::new(-5.0, 0.0, 0.0), 1e-12);
        assert_eq_float!(monomer.radius(), 0.5, 1e-12);
    }

    #[test]
    fn conformer_flip_is_buffered_until_commit() {
        let space = CuboidPbc::new(10.0);
        let particles = vec![patchy_particle(0, Vec3::default(), Vec3::new(1.0, 0.0, 0.0))];
        let mut monomer = Monomer::new(0, 1, particles, &space);
        monomer.flip_conformation();
        assert_eq!(monomer.conformer(CoorSet::Current), 1);
        assert_eq!(monomer.conformer(CoorSet::Trial), -1);
        monomer.trial_to_current();
        assert_eq!(monomer.conformer(CoorSet::Current), -1);
        monomer.flip_conformation();
        monomer.current_to_trial();
        assert_eq!(monomer.conformer(CoorSet::Trial), -1);
    }
}

#[cfg(test)]
mod configuration_tests {
    use rand::rngs::SmallRng;
    use rand::SeedableRng;

    use patchymc_numerical::{assert_eq_float, Vec3};
    use patchymc_system::{Configuration, CoorSet, MonomerData, ParticleData};

    fn simple_particle(index: usize, pos: [f64; 3]) -> ParticleData {
        ParticleData {
            index,
            domain: String::new(),
            form: "SimpleParticle".to_string(),
            type_id: 0,
            pos,
            patch_norm: None,
            patch_orient: None,
            patch_orient2: None,
        }
    }

    /// Two monomers of two beads each in an L = 10 box; translations move the
    /// pair of reference beads from separation 3 to minimum-image separation 2
    #[test]
    fn minimum_image_distances_after_translations() {
        let monomers = vec![
            MonomerData {
                index: 0,
                conformer: 1,
                particles: vec![simple_particle(0, [0.0, 0.0, 0.0]), simple_particle(1, [1.0, 0.0, 0.0])],
            },
            MonomerData {
                index: 1,
                conformer: 1,
                particles: vec![simple_particle(0, [3.0, 0.0, 0.0]), simple_particle(1, [4.0, 0.0, 0.0])],
            },
        ];
        let mut conf = Configuration::new(monomers, 10.0, 1.0).unwrap();

        let d = conf.particle_dist(
            &conf.monomer(0).particles()[0],
            CoorSet::Current,
            &conf.monomer(1).particles()[0],
            CoorSet::Current,
        );
        assert_eq_float!(d, 3.0, 1e-12);

        let space = conf.space().clone();
        conf.monomer_mut(0).translate(&Vec3::new(-4.0, 0.0, 0.0), &space);
        conf.monomer_mut(0).trial_to_current();
        conf.monomer_mut(1).translate(&Vec3::new(1.0, 0.0, 0.0), &space);
        conf.monomer_mut(1).trial_to_current();

        // m1 bead 0 is now at -4, m2 bead 0 at +4: the closest images are 2 apart
        let d = conf.particle_dist(
            &conf.monomer(0).particles()[0],
            CoorSet::Current,
            &conf.monomer(1).particles()[0],
            CoorSet::Current,
        );
        assert_eq_float!(d, 2.0, 1e-12);
    }

    #[test]
    fn unknown_form_tag_is_rejected() {
        let monomers = vec![MonomerData {
            index: 0,
            conformer: 1,
            particles: vec![ParticleData {
                form: "TetrahedralParticle".to_string(),
                ..simple_particle(0, [0.0, 0.0, 0.0])
            }],
        }];
        assert!(Configuration::new(monomers, 10.0, 1.0).is_err());
    }

    #[test]
    fn conformer_outside_pm_one_is_rejected() {
        let monomers = vec![MonomerData {
            index: 0,
            conformer: 0,
            particles: vec![simple_particle(0, [0.0, 0.0, 0.0])],
        }];
        assert!(Configuration::new(monomers, 10.0, 1.0).is_err());
    }

    #[test]
    fn random_monomer_selection_covers_all_indices() {
        let monomers = (0..4)
            .map(|i| MonomerData {
                index: i,
                conformer: 1,
                particles: vec![simple_particle(0, [i as f64, 0.0, 0.0])],
            })
            .collect();
        let conf = Configuration::new(monomers, 20.0, 1.0).unwrap();
        let mut rng = SmallRng::seed_from_u64(3);
        let mut seen = [false; 4];
        for _ in 0..200 {
            seen[conf.random_monomer_index(&mut rng)] = true;
        }
        assert!(seen.iter().all(|s| *s));
    }
}
