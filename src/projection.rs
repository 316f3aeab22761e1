//! Equal Earth projection and the screen transform used to draw and pick
//! country shapes.

use geo::{BoundingRect, Contains, Coord, MapCoords, MultiPolygon, Point, Rect};

use crate::state::Viewport;

const A1: f64 = 1.340264;
const A2: f64 = -0.081106;
const A3: f64 = 0.000893;
const A4: f64 = 0.003796;
const M: f64 = 0.866_025_403_784_438_6; // sqrt(3) / 2

/// Half-extents of the projected world in projection units.
pub const X_EXTENT: f64 = 2.706_629_983_696_075;
pub const Y_EXTENT: f64 = 1.317_362_759_157_413;

/// Fraction of the widget the whole world occupies at zoom 1.
const FIT_PADDING: f64 = 0.95;

/// Project `(longitude, latitude)` in degrees.
pub fn project(coord: Coord<f64>) -> Coord<f64> {
    let lambda = coord.x.to_radians();
    let phi = coord.y.clamp(-90.0, 90.0).to_radians();
    let l = (M * phi.sin()).asin();
    let l2 = l * l;
    let l6 = l2 * l2 * l2;
    Coord {
        x: lambda * l.cos() / (M * (A1 + 3.0 * A2 * l2 + l6 * (7.0 * A3 + 9.0 * A4 * l2))),
        y: l * (A1 + A2 * l2 + l6 * (A3 + A4 * l2)),
    }
}

/// Inverse of [`project`], back to degrees.
pub fn invert(point: Coord<f64>) -> Coord<f64> {
    let mut l = point.y;
    let mut l2 = l * l;
    let mut l6 = l2 * l2 * l2;
    for _ in 0..12 {
        let fy = l * (A1 + A2 * l2 + l6 * (A3 + A4 * l2)) - point.y;
        let fpy = A1 + 3.0 * A2 * l2 + l6 * (7.0 * A3 + 9.0 * A4 * l2);
        let delta = fy / fpy;
        l -= delta;
        l2 = l * l;
        l6 = l2 * l2 * l2;
        if delta.abs() < 1e-12 {
            break;
        }
    }
    let fpy = A1 + 3.0 * A2 * l2 + l6 * (7.0 * A3 + 9.0 * A4 * l2);
    Coord {
        x: (M * point.x * fpy / l.cos()).to_degrees(),
        y: (l.sin() / M).clamp(-1.0, 1.0).asin().to_degrees(),
    }
}

/// Maps projected coordinates to widget pixels for one viewport and size.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MapTransform {
    scale: f64,
    origin: (f64, f64),
    center: Coord<f64>,
}

impl MapTransform {
    pub fn new(width: f64, height: f64, viewport: &Viewport) -> Self {
        let fit = (width / (2.0 * X_EXTENT)).min(height / (2.0 * Y_EXTENT)) * FIT_PADDING;
        let (lon, lat) = viewport.center();
        Self {
            scale: fit.max(f64::EPSILON) * viewport.zoom() as f64,
            origin: (width / 2.0, height / 2.0),
            center: project(Coord { x: lon, y: lat }),
        }
    }

    pub fn scale(&self) -> f64 {
        self.scale
    }

    pub fn to_screen(&self, p: Coord<f64>) -> (f64, f64) {
        (
            self.origin.0 + (p.x - self.center.x) * self.scale,
            self.origin.1 - (p.y - self.center.y) * self.scale,
        )
    }

    pub fn to_projected(&self, x: f64, y: f64) -> Coord<f64> {
        Coord {
            x: self.center.x + (x - self.origin.0) / self.scale,
            y: self.center.y - (y - self.origin.1) / self.scale,
        }
    }

    /// Center `(lon, lat)` that results from dragging the map by a pixel offset
    /// when the drag started at `start`.
    pub fn dragged_center(&self, start: (f64, f64), dx: f64, dy: f64) -> (f64, f64) {
        let start = project(Coord { x: start.0, y: start.1 });
        let moved = invert(Coord {
            x: start.x - dx / self.scale,
            y: start.y + dy / self.scale,
        });
        (moved.x, moved.y)
    }
}

/// A shape in projection space with its bounds cached for picking.
#[derive(Debug, Clone)]
pub struct ProjectedShape {
    pub shape: MultiPolygon<f64>,
    bounds: Option<Rect<f64>>,
}

impl ProjectedShape {
    pub fn new(geographic: &MultiPolygon<f64>) -> Self {
        let shape = geographic.map_coords(project);
        let bounds = shape.bounding_rect();
        Self { shape, bounds }
    }

    pub fn contains(&self, p: Coord<f64>) -> bool {
        let Some(bounds) = self.bounds else {
            return false;
        };
        let (min, max) = (bounds.min(), bounds.max());
        if p.x < min.x || p.x > max.x || p.y < min.y || p.y > max.y {
            return false;
        }
        self.shape.contains(&Point::from(p))
    }
}

/// Index of the topmost shape under `p`.
///
/// Shapes are drawn in order, so later shapes win.
pub fn hit_test<'a, I>(shapes: I, p: Coord<f64>) -> Option<usize>
where
    I: IntoIterator<Item = &'a ProjectedShape>,
    I::IntoIter: DoubleEndedIterator + ExactSizeIterator,
{
    shapes
        .into_iter()
        .enumerate()
        .rev()
        .find(|(_, shape)| shape.contains(p))
        .map(|(i, _)| i)
}

#[cfg(test)]
mod tests {
    use super::*;
    use geo::polygon;

    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-6
    }

    #[test]
    fn test_project_origin_and_extents() {
        let origin = project(Coord { x: 0.0, y: 0.0 });
        assert!(approx(origin.x, 0.0) && approx(origin.y, 0.0));

        let east = project(Coord { x: 180.0, y: 0.0 });
        assert!(approx(east.x, X_EXTENT));

        let pole = project(Coord { x: 0.0, y: 90.0 });
        assert!(approx(pole.y, Y_EXTENT));
    }

    #[test]
    fn test_invert_round_trips() {
        for &(lon, lat) in &[(0.0, 0.0), (-74.0, 40.7), (139.7, 35.7), (151.2, -33.9), (-179.0, -80.0)] {
            let back = invert(project(Coord { x: lon, y: lat }));
            assert!(approx(back.x, lon), "lon {} -> {}", lon, back.x);
            assert!(approx(back.y, lat), "lat {} -> {}", lat, back.y);
        }
    }

    #[test]
    fn test_transform_centers_viewport() {
        let mut vp = Viewport::default();
        let t = MapTransform::new(800.0, 600.0, &vp);
        let (x, y) = t.to_screen(project(Coord { x: 0.0, y: 0.0 }));
        assert!(approx(x, 400.0) && approx(y, 300.0));

        vp.set_center(30.0, 10.0);
        let t = MapTransform::new(800.0, 600.0, &vp);
        let (x, y) = t.to_screen(project(Coord { x: 30.0, y: 10.0 }));
        assert!(approx(x, 400.0) && approx(y, 300.0));
    }

    #[test]
    fn test_transform_scales_with_zoom() {
        let base = MapTransform::new(800.0, 600.0, &Viewport::default());
        let zoomed = MapTransform::new(800.0, 600.0, &Viewport::with_zoom(4));
        assert!(approx(zoomed.scale(), base.scale() * 4.0));
    }

    #[test]
    fn test_screen_round_trip() {
        let t = MapTransform::new(1024.0, 768.0, &Viewport::with_zoom(3));
        let p = Coord { x: 0.4, y: -0.2 };
        let (x, y) = t.to_screen(p);
        let back = t.to_projected(x, y);
        assert!(approx(back.x, p.x) && approx(back.y, p.y));
    }

    #[test]
    fn test_pan_near_antimeridian_moves_map_smoothly() {
        let tokyo = project(Coord { x: 139.7, y: 35.7 });
        let mut vp = Viewport::default();
        vp.set_center(175.0, 0.0);
        let (before, _) = MapTransform::new(800.0, 600.0, &vp).to_screen(tokyo);
        vp.pan_by(10.0, 0.0);
        let (after, _) = MapTransform::new(800.0, 600.0, &vp).to_screen(tokyo);
        assert!(after < before);
        assert!(before - after < 20.0, "moved {} px", before - after);
    }

    #[test]
    fn test_drag_moves_center_against_pointer() {
        let vp = Viewport::default();
        let t = MapTransform::new(800.0, 600.0, &vp);
        let (lon, lat) = t.dragged_center(vp.center(), 100.0, 0.0);
        assert!(lon < 0.0);
        assert!(approx(lat, 0.0));
        let (_, lat) = t.dragged_center(vp.center(), 0.0, 100.0);
        assert!(lat > 0.0);
    }

    #[test]
    fn test_hit_test_prefers_topmost() {
        let left = ProjectedShape::new(&MultiPolygon::new(vec![polygon![
            (x: -20.0, y: -10.0), (x: 0.0, y: -10.0), (x: 0.0, y: 10.0), (x: -20.0, y: 10.0)
        ]]));
        let right = ProjectedShape::new(&MultiPolygon::new(vec![polygon![
            (x: 0.0, y: -10.0), (x: 20.0, y: -10.0), (x: 20.0, y: 10.0), (x: 0.0, y: 10.0)
        ]]));
        let wide = ProjectedShape::new(&MultiPolygon::new(vec![polygon![
            (x: 5.0, y: -5.0), (x: 30.0, y: -5.0), (x: 30.0, y: 5.0), (x: 5.0, y: 5.0)
        ]]));
        let shapes = vec![left, right, wide];

        let inside_left = project(Coord { x: -10.0, y: 0.0 });
        assert_eq!(hit_test(&shapes, inside_left), Some(0));

        let overlap = project(Coord { x: 10.0, y: 0.0 });
        assert_eq!(hit_test(&shapes, overlap), Some(2));

        let only_right = project(Coord { x: 10.0, y: 8.0 });
        assert_eq!(hit_test(&shapes, only_right), Some(1));

        let ocean = project(Coord { x: 100.0, y: 50.0 });
        assert_eq!(hit_test(&shapes, ocean), None);
    }

    #[test]
    fn test_empty_shape_never_hits() {
        let empty = ProjectedShape::new(&MultiPolygon::new(vec![]));
        assert!(!empty.contains(Coord { x: 0.0, y: 0.0 }));
    }
}
