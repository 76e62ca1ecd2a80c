#[cfg(test)]
mod tests {
    use ndarray::{Array2, array};
    use priority_flood::{
        Connectivity, Coord, FloodError, FloodObserver, FloodParams, PriorityFlood, Queue,
        fill_depressions, find_pits, grid_from_rows,
    };

    /// Deterministic bumpy terrain.
    fn terrain(rows: usize, cols: usize, seed: u64) -> Array2<u8> {
        let mut state = seed;
        Array2::from_shape_fn((rows, cols), |_| {
            state = state.wrapping_mul(6364136223846793005).wrapping_add(1442695040888963407);
            (state >> 56) as u8
        })
    }

    fn is_border((r, c): Coord, (rows, cols): (usize, usize)) -> bool {
        r == 0 || c == 0 || r == rows - 1 || c == cols - 1
    }

    /// Every cell reaches the border along a non-increasing path.
    fn drains_to_border(dem: &Array2<u8>) -> bool {
        let shape = dem.dim();
        let mut drained = Array2::from_shape_fn(shape, |c| is_border(c, shape));
        let mut changed = true;
        while changed {
            changed = false;
            for r in 0..shape.0 {
                for c in 0..shape.1 {
                    if drained[[r, c]] {
                        continue;
                    }
                    let z = dem[[r, c]];
                    let out = Connectivity::Four
                        .neighbours((r, c), shape)
                        .any(|n| drained[n] && dem[n] <= z);
                    if out {
                        drained[[r, c]] = true;
                        changed = true;
                    }
                }
            }
        }
        drained.iter().all(|&d| d)
    }

    #[test]
    fn test_single_pit() {
        let mut dem: Array2<i32> = array![
            [5, 5, 5],
            [5, 1, 5],
            [5, 5, 5],
        ];
        let stats = fill_depressions(&mut dem, &FloodParams::default()).unwrap();
        assert_eq!(dem, array![[5, 5, 5], [5, 5, 5], [5, 5, 5]]);
        assert_eq!(stats.seeded, 8);
        assert_eq!(stats.expanded, 9);
        assert_eq!(stats.raised, 1);
        assert_eq!(stats.volume, 4.0);
    }

    #[test]
    fn test_single_row() {
        let mut dem: Array2<f64> = array![[9.0, 9.0, 1.0, 9.0, 9.0]];
        let stats = fill_depressions(&mut dem, &FloodParams::default()).unwrap();
        assert_eq!(dem, array![[9.0, 9.0, 9.0, 9.0, 9.0]]);
        assert_eq!(stats.seeded, 2);
        assert_eq!(stats.expanded, 5);
        assert_eq!(stats.raised, 1);
        assert_eq!(stats.volume, 8.0);
    }

    #[test]
    fn test_single_row_drains_to_lower_end() {
        let mut dem: Array2<u16> = array![[5, 3, 3, 4, 6]];
        fill_depressions(&mut dem, &FloodParams::default()).unwrap();
        assert_eq!(dem, array![[5, 5, 5, 5, 6]]);
    }

    #[test]
    fn test_single_cell() {
        let mut dem: Array2<f32> = array![[1.5]];
        let stats = fill_depressions(&mut dem, &FloodParams::default()).unwrap();
        assert_eq!(dem, array![[1.5]]);
        assert_eq!(stats.seeded, 1);
        assert_eq!(stats.expanded, 1);
    }

    #[test]
    fn test_flat() {
        let mut dem: Array2<u8> = array![[7, 7], [7, 7]];
        let stats = fill_depressions(&mut dem, &FloodParams::default()).unwrap();
        assert_eq!(dem, array![[7, 7], [7, 7]]);
        assert_eq!(stats.raised, 0);
    }

    #[test]
    fn test_no_pits() {
        let mut dem: Array2<f64> = array![
            [1.0, 2.0, 3.0],
            [4.0, 5.0, 6.0],
            [7.0, 8.0, 9.0],
        ];
        let orig = dem.clone();
        let stats = fill_depressions(&mut dem, &FloodParams::default()).unwrap();
        assert_eq!(dem, orig);
        assert_eq!(stats.raised, 0);
    }

    #[test]
    fn test_partially_filled() {
        let mut dem: Array2<f64> = array![
            [3.0, 3.0, 3.0, 7.0],
            [3.0, 2.0, 4.0, 2.0],
            [5.0, 6.0, 8.0, 0.0],
        ];
        fill_depressions(&mut dem, &FloodParams::default()).unwrap();
        assert_eq!(
            dem,
            array![
                [3.0, 3.0, 3.0, 7.0],
                [3.0, 3.0, 4.0, 2.0],
                [5.0, 6.0, 8.0, 0.0],
            ]
        );
    }

    #[test]
    fn test_basin_fills_to_outlet() {
        let mut dem: Array2<u8> = array![
            [9, 9, 9, 9, 9],
            [9, 2, 2, 2, 9],
            [9, 2, 1, 2, 9],
            [9, 2, 2, 2, 9],
            [9, 9, 6, 9, 9],
        ];
        let stats = fill_depressions(&mut dem, &FloodParams::default()).unwrap();
        assert_eq!(
            dem,
            array![
                [9, 9, 9, 9, 9],
                [9, 6, 6, 6, 9],
                [9, 6, 6, 6, 9],
                [9, 6, 6, 6, 9],
                [9, 9, 6, 9, 9],
            ]
        );
        assert_eq!(stats.raised, 9);
        assert_eq!(stats.volume, 37.0);
    }

    #[test]
    fn test_connectivity() {
        let dem: Array2<u8> = array![
            [9, 9, 9],
            [9, 1, 9],
            [9, 9, 0],
        ];

        let mut four = dem.clone();
        fill_depressions(&mut four, &FloodParams::default()).unwrap();
        assert_eq!(four[[1, 1]], 9);

        let mut eight = dem.clone();
        let params = FloodParams { connectivity: Connectivity::Eight, verbose: false };
        fill_depressions(&mut eight, &params).unwrap();
        assert_eq!(eight, dem);
    }

    #[test]
    fn test_border_never_modified() {
        let dem = terrain(17, 23, 7);
        let mut filled = dem.clone();
        fill_depressions(&mut filled, &FloodParams::default()).unwrap();
        let shape = dem.dim();
        for ((c, a), b) in dem.indexed_iter().zip(filled.iter()) {
            if is_border(c, shape) {
                assert_eq!(a, b, "border cell {:?} changed", c);
            } else {
                assert!(b >= a, "cell {:?} lowered", c);
            }
        }
    }

    #[test]
    fn test_filled_grid_drains_and_has_no_pits() {
        for seed in 1..6 {
            let mut dem = terrain(20, 30, seed);
            let before = find_pits(dem.view(), Connectivity::Four);
            assert!(!before.is_empty());
            fill_depressions(&mut dem, &FloodParams::default()).unwrap();
            assert!(find_pits(dem.view(), Connectivity::Four).is_empty());
            assert!(drains_to_border(&dem));
        }
    }

    #[test]
    fn test_idempotent() {
        let mut dem = terrain(25, 25, 42);
        fill_depressions(&mut dem, &FloodParams::default()).unwrap();
        let once = dem.clone();
        let stats = fill_depressions(&mut dem, &FloodParams::default()).unwrap();
        assert_eq!(dem, once);
        assert_eq!(stats.raised, 0);
    }

    #[test]
    fn test_every_cell_expanded_once() {
        let mut dem = terrain(13, 9, 3);
        let stats = fill_depressions(&mut dem, &FloodParams::default()).unwrap();
        assert_eq!(stats.expanded, 13 * 9);
        assert_eq!(stats.seeded, 2 * 13 + 2 * 9 - 4);
    }

    #[test]
    fn test_verbose_gives_same_result() {
        let dem = terrain(11, 14, 9);
        let mut quiet = dem.clone();
        let mut loud = dem.clone();
        let a = fill_depressions(&mut quiet, &FloodParams::default()).unwrap();
        let params = FloodParams { verbose: true, ..FloodParams::default() };
        let b = fill_depressions(&mut loud, &params).unwrap();
        assert_eq!(quiet, loud);
        assert_eq!(a, b);
    }

    #[derive(Default)]
    struct Recorder {
        seeded: usize,
        popped: Vec<(Coord, Queue)>,
        raised: Vec<(Coord, u8, u8)>,
        pushed_pit: usize,
    }

    impl FloodObserver<u8> for Recorder {
        fn seeded(&mut self, _cell: Coord, _elevation: u8) {
            self.seeded += 1;
        }

        fn popped(&mut self, cell: Coord, _elevation: u8, from: Queue) {
            self.popped.push((cell, from));
        }

        fn raised(&mut self, cell: Coord, from: u8, to: u8) {
            self.raised.push((cell, from, to));
        }

        fn enqueued(&mut self, _cell: Coord, _elevation: u8, onto: Queue) {
            if onto == Queue::Pit {
                self.pushed_pit += 1;
            }
        }
    }

    #[test]
    fn test_observer_sees_every_event() {
        let mut dem: Array2<u8> = array![
            [5, 5, 5],
            [5, 1, 5],
            [5, 5, 5],
        ];
        let mut recorder = Recorder::default();
        let mut flood = PriorityFlood::new(&mut dem).unwrap().with_observer(&mut recorder);
        flood.run().unwrap();
        let stats = *flood.stats();
        drop(flood);

        assert_eq!(recorder.seeded, 8);
        assert_eq!(recorder.popped.len(), 9);
        assert_eq!(recorder.raised, vec![((1, 1), 1, 5)]);
        assert_eq!(recorder.pushed_pit, 1);
        assert_eq!(recorder.popped.iter().filter(|(_, q)| *q == Queue::Pit).count(), 1);
        assert_eq!(stats.raised, 1);
        assert_eq!(dem[[1, 1]], 5);
    }

    #[test]
    fn test_plateau_drained_before_open() {
        // (0,1) raises the pit below it; that cell must be expanded next,
        // before the remaining equal-height border cells.
        let mut dem: Array2<u8> = array![
            [1, 4, 4, 4],
            [4, 2, 3, 4],
            [4, 4, 4, 4],
        ];
        let mut recorder = Recorder::default();
        PriorityFlood::new(&mut dem)
            .unwrap()
            .with_observer(&mut recorder)
            .run()
            .unwrap();
        assert_eq!(dem, array![[1, 4, 4, 4], [4, 4, 4, 4], [4, 4, 4, 4]]);
        let first_pit = recorder.popped.iter().position(|(_, q)| *q == Queue::Pit).unwrap();
        assert_eq!(recorder.popped[first_pit].0, (1, 1));
        assert_eq!(recorder.popped[first_pit + 1], ((1, 2), Queue::Pit));
    }

    #[test]
    fn test_run_on_slice() {
        let mut data = vec![5u8, 5, 5, 5, 1, 5, 5, 5, 5];
        let mut flood = PriorityFlood::from_slice(&mut data, 3, 3).unwrap();
        flood.run().unwrap();
        assert_eq!(flood.grid().get((1, 1)), 5);
        drop(flood);
        assert!(data.iter().all(|&v| v == 5));
    }

    #[test]
    fn test_invalid_dimensions() {
        let mut empty = Array2::<f64>::zeros((0, 3));
        assert!(matches!(
            PriorityFlood::new(&mut empty),
            Err(FloodError::InvalidDimensions { rows: 0, cols: 3, .. })
        ));

        let mut data = vec![1u8; 5];
        assert!(matches!(
            PriorityFlood::from_slice(&mut data, 2, 3),
            Err(FloodError::InvalidDimensions { .. })
        ));

        let ragged = grid_from_rows(vec![vec![1, 2, 3], vec![4, 5]]);
        assert!(matches!(ragged, Err(FloodError::InvalidDimensions { .. })));
        assert!(grid_from_rows::<u8>(vec![]).is_err());

        let ok = grid_from_rows(vec![vec![1, 2], vec![3, 4]]).unwrap();
        assert_eq!(ok, array![[1, 2], [3, 4]]);
    }
}
