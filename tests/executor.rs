use gridbot::{
    execute_path, move_robot, pathfind::Path, CellKind, Error, Grid, Position, BONUS_SCORE,
};

fn path_of(coords: &[(usize, usize)]) -> Path {
    Path::from(
        coords
            .iter()
            .map(|(x, y)| Position::new(*x, *y))
            .collect::<Vec<_>>(),
    )
}

#[test]
fn bonus_on_path_is_collected() {
    let mut grid: Grid = "RBW\n...".parse().unwrap();
    let mut snapshots = Vec::new();
    let mut observer = |grid: &Grid, score: u32| -> Result<(), Error> {
        snapshots.push((grid.clone(), score));
        Ok(())
    };
    let score = execute_path(&mut grid, &path_of(&[(0, 0), (1, 0), (2, 0)]), 5, &mut observer).unwrap();

    assert_eq!(score, 5 + BONUS_SCORE);
    assert_eq!(grid.cell_at(&Position::new(0, 0)).unwrap(), CellKind::Empty);
    assert_eq!(grid.cell_at(&Position::new(1, 0)).unwrap(), CellKind::Empty);
    assert_eq!(grid.cell_at(&Position::new(2, 0)).unwrap(), CellKind::Robot);
    assert_eq!(grid.robot_pos(), Position::new(2, 0));
    assert_eq!(snapshots.len(), 2);
    assert_eq!(snapshots[0].0.to_string(), ". R W\n. . .\n");
    assert_eq!(snapshots[0].1, 15);
    assert_eq!(snapshots[1].0, grid);
}

#[test]
fn move_to_non_adjacent_cell_is_rejected() {
    let mut grid: Grid = "R.W".parse().unwrap();
    let mut score = 0;

    assert!(matches!(
        move_robot(&mut grid, &Position::new(2, 0), &mut score),
        Err(Error::InvalidMove(from, to)) if from == Position::new(0, 0) && to == Position::new(2, 0)
    ));
    assert!(matches!(
        move_robot(&mut grid, &Position::new(0, 0), &mut score),
        Err(Error::InvalidMove(_, _))
    ));
    assert_eq!(grid.to_string(), "R . W\n");
}

#[test]
fn move_into_obstacle_or_outside_is_rejected() {
    let mut grid: Grid = "RX\n.W".parse().unwrap();
    let mut score = 0;

    for dest in [Position::new(1, 0), Position::new(0, 5)] {
        assert!(matches!(
            move_robot(&mut grid, &dest, &mut score),
            Err(Error::InvalidMove(_, _))
        ));
    }
    assert_eq!(grid.robot_pos(), Position::new(0, 0));
}

#[test]
fn move_onto_goal_marks_robot() {
    let mut grid: Grid = "RW".parse().unwrap();
    let mut score = 0;
    move_robot(&mut grid, &Position::new(1, 0), &mut score).unwrap();

    assert_eq!(grid.to_string(), ". R\n");
    assert_eq!(grid.robot_pos(), grid.goal_pos());
    assert_eq!(score, 0);
}

#[test]
fn robot_cell_cannot_be_overwritten_before_moving() {
    let mut grid: Grid = "R.W".parse().unwrap();
    let mut score = 0;

    assert!(matches!(
        grid.set_cell(&Position::new(0, 0), CellKind::Obstacle),
        Err(Error::InvalidCellUpdate(_, CellKind::Robot, CellKind::Obstacle))
    ));
    move_robot(&mut grid, &Position::new(1, 0), &mut score).unwrap();

    assert_eq!(grid.to_string(), ". R W\n");
    assert_eq!(grid.count(CellKind::Obstacle), 0);
}

#[test]
fn moving_back_and_forth_keeps_obstacles_and_one_robot() {
    let mut grid: Grid = "XR.\n.XW".parse().unwrap();
    let mut score = 0;
    for dest in [(2, 0), (1, 0), (2, 0), (2, 1)] {
        move_robot(&mut grid, &Position::new(dest.0, dest.1), &mut score).unwrap();

        assert_eq!(grid.count(CellKind::Robot), 1);
        assert_eq!(grid.count(CellKind::Obstacle), 2);
    }

    assert_eq!(grid.to_string(), "X . .\n. X R\n");
}

#[test]
fn corrupted_path_stops_at_bad_step() {
    let mut grid: Grid = "R.B.W".parse().unwrap();
    let mut observed_n = 0;
    let mut observer = |_: &Grid, _: u32| -> Result<(), Error> {
        observed_n += 1;
        Ok(())
    };
    let result = execute_path(&mut grid, &path_of(&[(0, 0), (1, 0), (3, 0)]), 0, &mut observer);

    assert!(matches!(
        result,
        Err(Error::InvalidMove(from, to)) if from == Position::new(1, 0) && to == Position::new(3, 0)
    ));
    assert_eq!(grid.robot_pos(), Position::new(1, 0));
    assert_eq!(observed_n, 1);
}

#[test]
fn path_without_robot_start_moves_from_current_cell() {
    let mut grid: Grid = "RBW".parse().unwrap();
    let mut observer = |_: &Grid, _: u32| -> Result<(), Error> { Ok(()) };
    let score = execute_path(&mut grid, &path_of(&[(1, 0), (2, 0)]), 0, &mut observer).unwrap();

    assert_eq!(score, BONUS_SCORE);
    assert_eq!(grid.to_string(), ". . R\n");
}
