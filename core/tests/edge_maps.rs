use snapjig_core::edges::{
    build_edge_maps, EDGE_DEPTH_MAX, EDGE_DEPTH_MIN, EDGE_SIZE_MAX, EDGE_SIZE_MIN,
};

#[test]
fn borders_are_flat() {
    let maps = build_edge_maps(3, 4, 0xABCD_1234);
    for col in 0..4 {
        assert_eq!(maps.vertical_at(0, col).unwrap().sign, 0);
        assert_eq!(maps.vertical_at(3, col).unwrap().sign, 0);
    }
    for row in 0..3 {
        assert_eq!(maps.horizontal_at(row, 0).unwrap().sign, 0);
        assert_eq!(maps.horizontal_at(row, 4).unwrap().sign, 0);
    }
}

#[test]
fn internal_boundaries_are_signed_and_in_range() {
    let maps = build_edge_maps(4, 5, 0x0BAD_F00D);
    for row in 1..4 {
        for col in 0..5 {
            let edge = maps.vertical_at(row, col).unwrap();
            assert!(edge.sign == 1 || edge.sign == -1);
            assert!(edge.size >= EDGE_SIZE_MIN && edge.size <= EDGE_SIZE_MAX);
            assert!(edge.depth >= EDGE_DEPTH_MIN && edge.depth <= EDGE_DEPTH_MAX);
        }
    }
    for row in 0..4 {
        for col in 1..5 {
            let edge = maps.horizontal_at(row, col).unwrap();
            assert!(edge.sign == 1 || edge.sign == -1);
        }
    }
}

#[test]
fn shared_boundary_reads_are_symmetric() {
    let maps = build_edge_maps(3, 3, 0x5EED_0001);
    for row in 1..3u32 {
        for col in 0..3u32 {
            let boundary = maps.vertical_at(row, col).unwrap();
            let below = maps.piece_edges(row, col);
            let above = maps.piece_edges(row - 1, col);
            assert_eq!(below.top.sign, -boundary.sign);
            assert_eq!(below.top.size, boundary.size);
            assert_eq!(below.top.depth, boundary.depth);
            assert_eq!(above.bottom, boundary);
        }
    }
    for row in 0..3u32 {
        for col in 1..3u32 {
            let boundary = maps.horizontal_at(row, col).unwrap();
            let right_cell = maps.piece_edges(row, col);
            let left_cell = maps.piece_edges(row, col - 1);
            assert_eq!(right_cell.left.sign, -boundary.sign);
            assert_eq!(right_cell.left.size, boundary.size);
            assert_eq!(left_cell.right, boundary);
        }
    }
}

#[test]
fn center_piece_resolves_the_four_expected_boundaries() {
    let maps = build_edge_maps(3, 3, 0xDEAD_BEEF);
    let edges = maps.piece_edges(1, 1);
    assert_eq!(edges.top, maps.vertical_at(1, 1).unwrap().inverted());
    assert_eq!(edges.bottom, maps.vertical_at(2, 1).unwrap());
    assert_eq!(edges.left, maps.horizontal_at(1, 1).unwrap().inverted());
    assert_eq!(edges.right, maps.horizontal_at(1, 2).unwrap());
}

#[test]
fn same_seed_reproduces_the_map() {
    let first = build_edge_maps(5, 7, 42);
    let second = build_edge_maps(5, 7, 42);
    assert_eq!(first, second);
    let third = build_edge_maps(5, 7, 43);
    assert_ne!(first, third);
}
