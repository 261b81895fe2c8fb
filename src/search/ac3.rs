use std::collections::VecDeque;

use bit_set::BitSet;
use log::trace;

use crate::color::{Graph, VertexId};

/// arc (x_i, x_j): every color of x_i must be compatible with some color of x_j
pub type Arc = (VertexId, VertexId);

/** removes from domains[x_i] the colors incompatible with domains[x_j].
With a "different colors" constraint, a color a of x_i has no support only if x_j can only
take a. Returns true iff some color was removed.
*/
pub fn remove_inconsistent_values(domains:&mut [BitSet], x_i:VertexId, x_j:VertexId) -> bool {
    if domains[x_j].len() != 1 { return false; }
    match domains[x_j].iter().next() {
        Some(a) => domains[x_i].remove(a),
        None => false,
    }
}

/** both arcs of every edge of the graph */
pub fn all_arcs(inst:&Graph) -> Vec<Arc> {
    inst.edges().iter()
        .flat_map(|(u,v)| vec![(*u,*v), (*v,*u)])
        .collect()
}

/** AC-3 arc consistency.
Processes a FIFO worklist initialized with `arcs`. When the domain of x_i shrinks along
(x_i,x_j), every arc (x_k,x_i) with x_k != x_j is enqueued again.

Returns None as soon as a domain becomes empty, the narrowed domains otherwise.
*/
pub fn ac3<I>(inst:&Graph, mut domains:Vec<BitSet>, arcs:I) -> Option<Vec<BitSet>>
where I:IntoIterator<Item=Arc> {
    let mut queue:VecDeque<Arc> = arcs.into_iter().collect();
    while let Some((x_i, x_j)) = queue.pop_front() {
        if remove_inconsistent_values(&mut domains, x_i, x_j) {
            if domains[x_i].is_empty() {
                trace!("ac3: wipeout of {} (arc {}->{})", x_i, x_i, x_j);
                return None;
            }
            queue.extend(inst.neighbors(x_i).iter()
                .filter(|x_k| **x_k != x_j)
                .map(|x_k| (*x_k, x_i))
            );
        }
    }
    Some(domains)
}


#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::Point;

    fn single_edge() -> Graph {
        Graph::from_edges(vec![Point::new(0., 0.), Point::new(1., 1.)], &[(0,1)]).unwrap()
    }

    fn full(k:usize, n:usize) -> Vec<BitSet> {
        vec![(0..k).collect() ; n]
    }

    #[test]
    fn test_single_edge_one_color() {
        let g = single_edge();
        assert_eq!(ac3(&g, full(1, 2), all_arcs(&g)), None);
    }

    #[test]
    fn test_single_edge_two_colors() {
        let g = single_edge();
        let res = ac3(&g, full(2, 2), all_arcs(&g)).unwrap();
        let expected:BitSet = (0..2).collect();
        assert_eq!(res, vec![expected.clone(), expected]);
    }

    #[test]
    fn test_propagation_along_path() {
        // path 0-1-2, 2 colors, 0 fixed to color 0: 1 becomes {1}, 2 becomes {0}
        let g = Graph::from_edges(
            vec![Point::new(0., 0.), Point::new(0.5, 0.1), Point::new(1., 0.)],
            &[(0,1), (1,2)]
        ).unwrap();
        let mut domains = full(2, 3);
        domains[0] = [0].iter().cloned().collect();
        let res = ac3(&g, domains, vec![(1,0)]).unwrap();
        assert_eq!(res[1].iter().collect::<Vec<_>>(), vec![1]);
        assert_eq!(res[2].iter().collect::<Vec<_>>(), vec![0]);
    }

    #[test]
    fn test_triangle_two_colors_wipeout() {
        let g = Graph::cycle(3);
        let mut domains = full(2, 3);
        domains[0] = [1].iter().cloned().collect();
        assert_eq!(ac3(&g, domains, vec![(1,0), (2,0)]), None);
    }

    #[test]
    fn test_remove_inconsistent_values() {
        let mut domains = full(3, 2);
        assert!(!remove_inconsistent_values(&mut domains, 0, 1));
        domains[1] = [2].iter().cloned().collect();
        assert!(remove_inconsistent_values(&mut domains, 0, 1));
        assert!(!remove_inconsistent_values(&mut domains, 0, 1));
        assert_eq!(domains[0].iter().collect::<Vec<_>>(), vec![0,1]);
    }
}
