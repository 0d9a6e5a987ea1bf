//! Edge adjacency for indexed meshes.
//!
//! Every undirected edge is mapped to the faces that use it, together with
//! the direction each face traverses it. Two faces sharing an edge with a
//! consistent winding traverse it in opposite directions.

use hashbrown::HashMap;

/// One face's use of an undirected edge.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct EdgeUse {
    face: usize,
    /// `true` if the face walks the edge from the lower to the higher index.
    forward: bool,
}

/// Edge-to-face adjacency for a mesh.
///
/// # Example
///
/// ```
/// use mesh_validate::MeshAdjacency;
///
/// let faces = vec![[0, 1, 2], [1, 3, 2]];
/// let adj = MeshAdjacency::build(&faces);
///
/// assert_eq!(adj.edge_count(), 5);
/// assert_eq!(adj.boundary_edge_count(), 4);
/// assert_eq!(adj.inconsistent_edge_count(), 0);
/// ```
#[derive(Debug, Clone)]
pub struct MeshAdjacency {
    /// Maps edge (v0, v1) with v0 < v1 to the faces using it.
    edges: HashMap<(u32, u32), Vec<EdgeUse>>,
}

impl MeshAdjacency {
    /// Build adjacency from triangle faces.
    #[must_use]
    pub fn build(faces: &[[u32; 3]]) -> Self {
        let mut edges: HashMap<(u32, u32), Vec<EdgeUse>> =
            HashMap::with_capacity(faces.len() * 3 / 2);

        for (face, &[a, b, c]) in faces.iter().enumerate() {
            for (from, to) in [(a, b), (b, c), (c, a)] {
                let (key, forward) = normalize_edge(from, to);
                edges.entry(key).or_default().push(EdgeUse { face, forward });
            }
        }

        Self { edges }
    }

    /// Total number of undirected edges.
    #[must_use]
    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    /// Edges used by exactly one face (holes).
    #[must_use]
    pub fn boundary_edge_count(&self) -> usize {
        self.edges.values().filter(|uses| uses.len() == 1).count()
    }

    /// Edges used by more than two faces.
    #[must_use]
    pub fn non_manifold_edge_count(&self) -> usize {
        self.edges.values().filter(|uses| uses.len() > 2).count()
    }

    /// Two-face edges that both faces traverse in the same direction.
    ///
    /// Any such edge means one of the two faces is wound inside-out
    /// relative to the other.
    #[must_use]
    pub fn inconsistent_edge_count(&self) -> usize {
        self.edges
            .values()
            .filter(|uses| uses.len() == 2 && uses[0].forward == uses[1].forward)
            .count()
    }

    /// Every edge has at most two faces.
    #[must_use]
    pub fn is_manifold(&self) -> bool {
        self.edges.values().all(|uses| uses.len() <= 2)
    }

    /// Every edge has at least two faces.
    #[must_use]
    pub fn is_watertight(&self) -> bool {
        self.edges.values().all(|uses| uses.len() >= 2)
    }
}

/// Order an edge so the lower index comes first, reporting the original direction.
#[inline]
fn normalize_edge(from: u32, to: u32) -> ((u32, u32), bool) {
    if from < to {
        ((from, to), true)
    } else {
        ((to, from), false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn single_triangle_is_open() {
        let adj = MeshAdjacency::build(&[[0, 1, 2]]);

        assert_eq!(adj.edge_count(), 3);
        assert_eq!(adj.boundary_edge_count(), 3);
        assert!(!adj.is_watertight());
        assert!(adj.is_manifold());
    }

    #[test]
    fn three_faces_on_one_edge() {
        let adj = MeshAdjacency::build(&[[0, 1, 2], [1, 0, 3], [0, 1, 4]]);

        assert_eq!(adj.non_manifold_edge_count(), 1);
        assert!(!adj.is_manifold());
    }

    #[test]
    fn flipped_neighbor_is_inconsistent() {
        // Second face walks 1 -> 2 like the first one does.
        let adj = MeshAdjacency::build(&[[0, 1, 2], [1, 2, 3]]);
        assert_eq!(adj.inconsistent_edge_count(), 1);
    }
}
