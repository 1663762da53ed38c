use patchymc_numerical::Vec3;

/// Shifts a single coordinate by one box length when it lies outside `[-r, +r)`
macro_rules! wrap_component {
    ($c:expr, $r:expr) => {
        if $c >= $r {
            $c -= 2.0 * $r;
        } else if $c < -$r {
            $c += 2.0 * $r;
        }
    };
}

/// Replaces a single difference component with its minimum image
macro_rules! closest_image_component {
    ($c:expr, $r:expr) => {
        if $c > $r {
            $c -= 2.0 * $r;
        } else if $c < -$r {
            $c += 2.0 * $r;
        }
    };
}

/// Cubic simulation box with periodic boundary conditions, centred at the origin.
///
/// Wrapped positions lie in `[-r, +r)` on every axis, where `r` is half the
/// box edge length. All shift operations are one-shot: they assume their
/// inputs are never further than one box length out of the box, which holds
/// as long as callers only pass wrapped positions or the output of a prior
/// [`unwrap()`](CuboidPbc::unwrap).
#[derive(Clone, Debug)]
pub struct CuboidPbc {
    half_len: f64,
}

impl CuboidPbc {
    pub fn new(len: f64) -> CuboidPbc {
        CuboidPbc { half_len: len / 2.0 }
    }

    /// Edge length of the box
    #[inline(always)]
    pub fn len(&self) -> f64 {
        2.0 * self.half_len
    }

    /// Half of the edge length
    #[inline(always)]
    pub fn half_len(&self) -> f64 {
        self.half_len
    }

    /// Calculates the shortest difference `p1 - p2` under the minimum image convention
    pub fn diff(&self, p1: &Vec3, p2: &Vec3) -> Vec3 {
        let r = self.half_len;
        let mut d = *p1 - *p2;
        closest_image_component!(d.x, r);
        closest_image_component!(d.y, r);
        closest_image_component!(d.z, r);

        return d;
    }

    /// Distance between `p1` and the closest periodic image of `p2`
    pub fn dist(&self, p1: &Vec3, p2: &Vec3) -> f64 {
        self.diff(p1, p2).length()
    }

    /// Shifts a position back into the box
    pub fn wrap(&self, pos: &Vec3) -> Vec3 {
        let r = self.half_len;
        let mut p = *pos;
        wrap_component!(p.x, r);
        wrap_component!(p.y, r);
        wrap_component!(p.z, r);

        return p;
    }

    /// Returns the periodic image of `pos` that is closest to `reference`.
    ///
    /// The result may lie outside the box; it is meant for assembling rigid
    /// bodies that straddle a boundary before operating on them in open space.
    pub fn unwrap(&self, reference: &Vec3, pos: &Vec3) -> Vec3 {
        let mut d = *pos - *reference;
        let r = self.half_len;
        closest_image_component!(d.x, r);
        closest_image_component!(d.y, r);
        closest_image_component!(d.z, r);

        return *reference + d;
    }
}
