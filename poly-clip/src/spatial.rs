//! Bounding box tree for point-in-region candidate lookup.
//!
//! A small axis-aligned box hierarchy over an indexed set of rectangles.
//! Queries return candidate indices whose boxes contain the probe; the
//! caller runs the exact containment test on the candidates.

use poly_types::{BoundingBox, Point};
use smallvec::SmallVec;

const MAX_LEAF_SIZE: usize = 8;

#[derive(Debug)]
enum Node {
    Leaf {
        bbox: BoundingBox,
        items: SmallVec<[u32; 8]>,
    },
    Internal {
        bbox: BoundingBox,
        left: Box<Node>,
        right: Box<Node>,
    },
}

impl Node {
    fn bbox(&self) -> &BoundingBox {
        match self {
            Self::Leaf { bbox, .. } | Self::Internal { bbox, .. } => bbox,
        }
    }
}

/// Box hierarchy over an indexed rectangle set.
///
/// Built once from a slice of boxes; queries return indices into that
/// slice. Splits recursively at the median along the wider axis.
#[derive(Debug)]
pub struct AabbTree {
    root: Option<Node>,
}

impl AabbTree {
    /// Build a tree over `boxes`. Invalid (empty) boxes never match a
    /// query but still occupy their index.
    #[must_use]
    pub fn build(boxes: &[BoundingBox]) -> Self {
        if boxes.is_empty() {
            return Self { root: None };
        }
        let indices: Vec<usize> = (0..boxes.len()).collect();
        Self { root: Some(build_recursive(boxes, indices)) }
    }

    /// Whether the tree holds no boxes.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.root.is_none()
    }

    /// Indices of all boxes containing `pt`, borders inclusive.
    #[must_use]
    pub fn query_point(&self, pt: Point) -> Vec<u32> {
        let mut out = Vec::new();
        if let Some(root) = &self.root {
            query_point_recursive(root, pt, &mut out);
        }
        out
    }

    /// Indices of all boxes overlapping `query`, borders inclusive.
    #[must_use]
    pub fn query_box(&self, query: &BoundingBox) -> Vec<u32> {
        let mut out = Vec::new();
        if let Some(root) = &self.root {
            query_box_recursive(root, query, &mut out);
        }
        out
    }
}

fn build_recursive(boxes: &[BoundingBox], indices: Vec<usize>) -> Node {
    let mut bbox = BoundingBox::empty();
    for &i in &indices {
        bbox.merge(&boxes[i]);
    }

    if indices.len() <= MAX_LEAF_SIZE {
        #[allow(clippy::cast_possible_truncation)]
        let items: SmallVec<[u32; 8]> = indices.iter().map(|&i| i as u32).collect();
        return Node::Leaf { bbox, items };
    }

    // Median split on box centers along the wider axis.
    let split_x = bbox.width() >= bbox.height();
    let mut sorted = indices;
    sorted.sort_unstable_by_key(|&i| {
        let c = boxes[i].center();
        if split_x {
            c.x
        } else {
            c.y
        }
    });
    let mid = sorted.len() / 2;
    let right_indices = sorted.split_off(mid);
    let left = build_recursive(boxes, sorted);
    let right = build_recursive(boxes, right_indices);
    Node::Internal {
        bbox,
        left: Box::new(left),
        right: Box::new(right),
    }
}

fn query_point_recursive(node: &Node, pt: Point, out: &mut Vec<u32>) {
    match node {
        Node::Leaf { bbox, items } => {
            if bbox.contains(pt) {
                out.extend(items.iter().copied());
            }
        }
        Node::Internal { bbox, left, right } => {
            if bbox.contains(pt) {
                query_point_recursive(left, pt, out);
                query_point_recursive(right, pt, out);
            }
        }
    }
}

fn query_box_recursive(node: &Node, query: &BoundingBox, out: &mut Vec<u32>) {
    if !node.bbox().overlaps(query) {
        return;
    }
    match node {
        Node::Leaf { items, .. } => out.extend(items.iter().copied()),
        Node::Internal { left, right, .. } => {
            query_box_recursive(left, query, out);
            query_box_recursive(right, query, out);
        }
    }
}
