use freight_network::graph::link_record::{GaugeLinkRecord, LinkRecord};

//
//  Grid of `size` x `size` nodes numbered row by row from 1, every link
//  10 km long:
//
//  1 -- 2 -- 3
//  |    |    |
//  4 -- 5 -- 6
//  |    |    |
//  7 -- 8 -- 9
//
pub fn grid_records(size: u32) -> Vec<LinkRecord> {
    let node = |row: u32, col: u32| row * size + col + 1;
    let mut records = Vec::new();

    for row in 0..size {
        for col in 0..size {
            if col + 1 < size {
                records.push(LinkRecord::new(
                    format!("{}-{}", node(row, col), node(row, col + 1)),
                    10.0,
                ));
            }
            if row + 1 < size {
                records.push(LinkRecord::new(
                    format!("{}-{}", node(row, col), node(row + 1, col)),
                    10.0,
                ));
            }
        }
    }

    records
}

/// Railway table with two gauges sharing node ids.
pub fn railway_table() -> Vec<GaugeLinkRecord> {
    serde_json::from_str(
        r#"[
            {"id": "68-69", "distance": 100.0, "gauge": "ancha"},
            {"id": "69-70", "distance": 200.0, "gauge": "ancha"},
            {"id": "68-70", "distance": 350.0, "gauge": "ancha"},
            {"id": "70-71", "distance": 50.0, "gauge": "ancha"},
            {"id": "68-69", "distance": 90.0, "gauge": "angosta"},
            {"id": "69-72", "distance": 40.0, "gauge": "angosta"}
        ]"#,
    )
    .unwrap()
}
