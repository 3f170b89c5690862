pub mod test_graph {
    use crate::graph::{gauge_graph::GaugeGraph, link_record::LinkRecord};

    /// Node ids of the lettered fixture graphs.
    #[derive(Clone, Copy)]
    pub enum Letter {
        A = 1,
        B = 2,
        C = 3,
        D = 4,
        E = 5,
        Z = 26,
    }

    pub fn records(links: &[(&str, f64)]) -> Vec<LinkRecord> {
        links
            .iter()
            .map(|&(id, distance)| LinkRecord::new(id, distance))
            .collect()
    }

    fn lettered_graph(links: &[(Letter, Letter, f64)]) -> GaugeGraph {
        let records = links
            .iter()
            .map(|(a, b, distance)| {
                LinkRecord::new(format!("{}-{}", *a as u32, *b as u32), *distance)
            })
            .collect::<Vec<_>>();

        GaugeGraph::build(&records).unwrap()
    }

    /// Shortest a -> z is 13 through c, b, d and e.
    pub fn lettered_graph_one() -> GaugeGraph {
        use Letter::*;

        lettered_graph(&[
            (A, B, 4.0),
            (A, C, 2.0),
            (B, C, 1.0),
            (B, D, 5.0),
            (C, D, 8.0),
            (C, E, 10.0),
            (D, E, 2.0),
            (D, Z, 6.0),
            (E, Z, 3.0),
        ])
    }

    /// Shortest a -> z is 7 through b, e and d.
    pub fn lettered_graph_two() -> GaugeGraph {
        use Letter::*;

        lettered_graph(&[
            (A, B, 2.0),
            (A, C, 3.0),
            (B, D, 5.0),
            (B, E, 2.0),
            (C, E, 5.0),
            (D, E, 1.0),
            (D, Z, 2.0),
            (E, Z, 4.0),
        ])
    }
}
