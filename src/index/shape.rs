use geo::{Contains, Coord, Intersects, Line, Polygon, Rect};

use crate::cell::CellId;
use crate::geometry::{edge_intersects_rect, rect_contains_point, rects_intersect, union_rect};

/// The geometry of a single indexed item.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ItemGeometry {
    Point(Coord<f64>),
    Edge(Line<f64>),
    Cell(CellId),
}

impl ItemGeometry {
    /// The smallest rectangle containing this item.
    pub fn bounding_rect(&self) -> Rect<f64> {
        match self {
            Self::Point(point) => Rect::new(*point, *point),
            Self::Edge(edge) => Rect::new(edge.start, edge.end),
            Self::Cell(id) => id.rect(),
        }
    }

    /// Returns `true` if this item shares at least one point with the closed rectangle.
    pub fn intersects_rect(&self, rect: &Rect<f64>) -> bool {
        match self {
            Self::Point(point) => rect_contains_point(rect, *point),
            Self::Edge(edge) => edge_intersects_rect(edge, rect),
            Self::Cell(id) => rects_intersect(&id.rect(), rect),
        }
    }

    /// A point lying on this item.
    pub fn representative_point(&self) -> Coord<f64> {
        match self {
            Self::Point(point) => *point,
            Self::Edge(edge) => edge.start,
            Self::Cell(id) => id.center(),
        }
    }
}

/// An indexed shape: a collection of items with an optional interior.
///
/// Items are addressed by their position within the shape. Polygons contribute one edge item per
/// ring segment and additionally report their interior through [`Shape::contains`].
#[derive(Debug, Clone, PartialEq)]
pub struct Shape {
    items: Vec<ItemGeometry>,
    region: Option<Polygon<f64>>,
}

impl Shape {
    pub fn points(points: impl IntoIterator<Item = Coord<f64>>) -> Self {
        Self {
            items: points.into_iter().map(ItemGeometry::Point).collect(),
            region: None,
        }
    }

    /// A chain of edges joining consecutive vertices.
    pub fn polyline(vertices: &[Coord<f64>]) -> Self {
        Self {
            items: vertices
                .windows(2)
                .map(|pair| ItemGeometry::Edge(Line::new(pair[0], pair[1])))
                .collect(),
            region: None,
        }
    }

    /// The edges of every ring of the polygon, exterior first.
    pub fn polygon(polygon: Polygon<f64>) -> Self {
        let items = polygon
            .exterior()
            .lines()
            .chain(polygon.interiors().iter().flat_map(|ring| ring.lines()))
            .map(ItemGeometry::Edge)
            .collect();
        Self {
            items,
            region: Some(polygon),
        }
    }

    pub fn cells(cells: impl IntoIterator<Item = CellId>) -> Self {
        Self {
            items: cells.into_iter().map(ItemGeometry::Cell).collect(),
            region: None,
        }
    }

    pub fn num_items(&self) -> usize {
        self.items.len()
    }

    pub fn item(&self, item_id: usize) -> Option<&ItemGeometry> {
        self.items.get(item_id)
    }

    pub fn items(&self) -> &[ItemGeometry] {
        &self.items
    }

    /// The polygon bounding this shape's interior, if it has one.
    pub fn region(&self) -> Option<&Polygon<f64>> {
        self.region.as_ref()
    }

    /// Returns `true` if the shape has an interior.
    pub fn is_region(&self) -> bool {
        self.region.is_some()
    }

    /// The dimension of the shape: 0 for points, 1 for polylines, 2 for polygons and cells.
    pub fn dimension(&self) -> u8 {
        if self.is_region() {
            return 2;
        }
        match self.items.first() {
            Some(ItemGeometry::Edge(_)) => 1,
            Some(ItemGeometry::Cell(_)) => 2,
            _ => 0,
        }
    }

    /// Returns `true` if the point lies in the interior of the shape's region.
    pub fn contains(&self, point: Coord<f64>) -> bool {
        self.region
            .as_ref()
            .is_some_and(|polygon| polygon.contains(&point))
    }

    /// Returns `true` if the shape's region meets the closed rectangle.
    pub fn region_intersects_rect(&self, rect: &Rect<f64>) -> bool {
        self.region
            .as_ref()
            .is_some_and(|polygon| polygon.intersects(rect))
    }

    /// A point on the boundary of the shape, used to test containment of whole shapes.
    pub fn representative_point(&self) -> Option<Coord<f64>> {
        self.items.first().map(ItemGeometry::representative_point)
    }

    /// The smallest rectangle containing every item of this shape.
    pub fn bounding_rect(&self) -> Option<Rect<f64>> {
        self.items
            .iter()
            .map(ItemGeometry::bounding_rect)
            .reduce(|a, b| union_rect(&a, &b))
    }
}

#[cfg(test)]
mod test {
    use geo::{coord, polygon};

    use super::*;

    #[test]
    fn polygon_items_and_interior() {
        let shape = Shape::polygon(polygon![
            (x: 0.1, y: 0.1),
            (x: 0.4, y: 0.1),
            (x: 0.4, y: 0.4),
            (x: 0.1, y: 0.4),
        ]);
        assert_eq!(shape.num_items(), 4);
        assert_eq!(shape.dimension(), 2);
        assert!(shape.contains(coord! { x: 0.2, y: 0.2 }));
        assert!(!shape.contains(coord! { x: 0.5, y: 0.2 }));
        assert_eq!(
            shape.bounding_rect(),
            Some(Rect::new(coord! { x: 0.1, y: 0.1 }, coord! { x: 0.4, y: 0.4 }))
        );
        assert_eq!(shape.representative_point(), Some(coord! { x: 0.1, y: 0.1 }));
    }

    #[test]
    fn polyline_edges() {
        let vertices = [
            coord! { x: 0.1, y: 0.1 },
            coord! { x: 0.2, y: 0.1 },
            coord! { x: 0.2, y: 0.3 },
        ];
        let shape = Shape::polyline(&vertices);
        assert_eq!(shape.num_items(), 2);
        assert_eq!(shape.dimension(), 1);
        assert_eq!(
            shape.item(1),
            Some(&ItemGeometry::Edge(Line::new(vertices[1], vertices[2])))
        );
        assert!(shape.item(2).is_none());
        assert!(!shape.contains(coord! { x: 0.15, y: 0.15 }));
    }

    #[test]
    fn item_rect_tests() {
        let rect = Rect::new(coord! { x: 0.0, y: 0.0 }, coord! { x: 0.5, y: 0.5 });
        assert!(ItemGeometry::Point(coord! { x: 0.5, y: 0.5 }).intersects_rect(&rect));
        assert!(!ItemGeometry::Point(coord! { x: 0.6, y: 0.5 }).intersects_rect(&rect));

        let edge = Line::new(coord! { x: 0.6, y: 0.0 }, coord! { x: 0.0, y: 0.6 });
        assert!(ItemGeometry::Edge(edge).intersects_rect(&rect));

        let cell = CellId::root().child(3);
        assert!(ItemGeometry::Cell(cell).intersects_rect(&rect));
        assert!(!ItemGeometry::Cell(cell.child(3)).intersects_rect(&rect));
    }
}
