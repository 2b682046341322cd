use chrono::{DateTime, TimeZone, Utc};
use workboard_core::board::{Board, BoardIntent};
use workboard_core::column::{AddAffordance, Column, total_tasks};
use workboard_core::datetime::parse_due_date;
use workboard_core::drag::TaskMove;
use workboard_core::owner::BoardOwner;
use workboard_core::stages::{default_stages, partition_tasks};
use workboard_core::task::{Priority, Task};

fn now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 10, 19, 9, 0, 0)
        .single()
        .expect("valid now")
}

fn scenario_columns() -> Vec<Column> {
    let mut write_copy = Task::new("t1", "Write copy");
    write_copy.priority = Priority::Normal;
    vec![
        Column::new("todo", "Te doen", "blue").with_tasks(vec![write_copy]),
        Column::new("done", "Klaar", "green"),
    ]
}

fn todo_to_done() -> BoardIntent {
    BoardIntent::Move(TaskMove {
        task_id: "t1".into(),
        from_column_id: "todo".into(),
        to_column_id: "done".into(),
    })
}

#[test]
fn drag_to_other_column_then_back_before_update() {
    let mut board = Board::new(scenario_columns());
    let mut moves = Vec::new();

    let payload = board.begin_drag("t1", "todo").expect("drag start");
    let native = payload.encode().expect("encode");
    board.hover("done");
    if let Some(intent) = board.drop_on("done", Some(&native)) {
        moves.push(intent);
    }
    board.end_drag();
    assert_eq!(moves, vec![todo_to_done()]);

    // No external update yet, so t1 is still listed under todo.
    board.begin_drag("t1", "todo").expect("second drag");
    board.hover("todo");
    assert_eq!(board.drop_on("todo", None), None);
    board.end_drag();
    assert_eq!(moves.len(), 1);
}

#[test]
fn both_protocol_paths_emit_the_same_move() {
    let mut native_board = Board::new(scenario_columns());
    let raw = native_board
        .begin_drag("t1", "todo")
        .expect("drag")
        .encode()
        .expect("encode");
    assert_eq!(native_board.drop_on("done", Some(&raw)), Some(todo_to_done()));

    let mut memory_board = Board::new(scenario_columns());
    memory_board.begin_drag("t1", "todo").expect("drag");
    assert_eq!(memory_board.drop_on("done", Some("")), Some(todo_to_done()));
}

#[test]
fn later_drag_behaves_like_a_first_drag() {
    let fresh = {
        let mut board = Board::new(scenario_columns());
        board.begin_drag("t1", "todo");
        board.hover("done");
        board.drop_on("done", None)
    };

    let mut board = Board::new(scenario_columns());
    // cancelled drag
    board.begin_drag("t1", "todo");
    board.hover("done");
    board.end_drag();
    // rejected drop
    board.begin_drag("t1", "todo");
    board.drop_on("todo", None);
    board.end_drag();

    assert!(!board.drag().is_active());
    assert_eq!(board.drag().over_column(), None);

    board.begin_drag("t1", "todo");
    board.hover("done");
    assert_eq!(board.drop_on("done", None), fresh);
}

#[test]
fn overdue_card_from_2020() {
    let mut task = Task::new("t7", "Renew domain");
    task.due_date = parse_due_date("2020-01-01");
    let board = Board::new(vec![Column::new("todo", "Te doen", "blue").with_tasks(vec![task])]);

    let layout = board.layout(now());
    assert!(layout[0].cards[0].overdue);
}

#[test]
fn collapse_strip_round_trip() {
    let columns = vec![
        Column::new("backlog", "Backlog", "slate").with_tasks(vec![
            Task::new("b1", "Moodboard"),
            Task::new("b2", "Sitemap"),
        ]),
        Column::new("todo", "Te doen", "blue"),
    ];
    let mut board = Board::new(columns.clone());
    let before = board.layout(now());

    board.toggle_column("backlog");
    let collapsed = board.layout(now());
    assert!(!collapsed[0].expanded);
    assert!(collapsed[1].expanded);

    board.toggle_column("backlog");
    assert_eq!(board.layout(now()), before);
    assert_eq!(board.columns(), columns);
}

#[test]
fn empty_review_column_switches_affordance_after_add() {
    let columns = vec![
        Column::new("todo", "Te doen", "blue").with_tasks(vec![Task::new("t1", "Write copy")]),
        Column::new("review", "Review", "amber"),
    ];
    let mut board = Board::new(columns.clone());
    let mut owner = BoardOwner::new(columns);

    let layout = board.layout(now());
    assert_eq!(layout[1].add_affordance, AddAffordance::EmptyPlaceholder);
    assert_eq!(layout[0].add_affordance, AddAffordance::ListFooter);

    let intent = board.request_add("review");
    assert!(owner.apply(intent, now()));
    board.set_columns(owner.snapshot());

    let layout = board.layout(now());
    assert_eq!(layout[1].add_affordance, AddAffordance::ListFooter);
    assert_eq!(layout[1].cards.len(), 1);
}

#[test]
fn owner_round_trip_keeps_partition() {
    let columns = vec![
        Column::new("todo", "Te doen", "blue").with_tasks(vec![
            Task::new("t1", "Write copy"),
            Task::new("t2", "Fonts"),
        ]),
        Column::new("review", "Review", "amber"),
        Column::new("done", "Klaar", "green"),
    ];
    let mut board = Board::new(columns.clone());
    let mut owner = BoardOwner::new(columns);

    for (task_id, from, to) in [
        ("t1", "todo", "review"),
        ("t1", "review", "done"),
        ("t2", "todo", "done"),
    ] {
        board.begin_drag(task_id, from);
        board.hover(to);
        let intent = board.drop_on(to, None).expect("move intent");
        board.end_drag();
        assert!(owner.apply(intent, now()));
        board.set_columns(owner.snapshot());
        assert_eq!(total_tasks(board.columns()), 2);
    }

    let done = &board.layout(now())[2];
    assert_eq!(
        done.cards
            .iter()
            .map(|card| card.task_id.as_str())
            .collect::<Vec<_>>(),
        vec!["t1", "t2"]
    );
}

#[test]
fn dragged_task_keeps_its_column_through_a_flat_export() {
    let mut task = Task::new("t1", "Write copy");
    task.stage = Some("todo".into());
    let columns = partition_tasks(vec![task], &default_stages());
    let mut board = Board::new(columns.clone());
    let mut owner = BoardOwner::new(columns);

    board.begin_drag("t1", "todo");
    board.hover("done");
    let intent = board.drop_on("done", None).expect("move intent");
    board.end_drag();
    assert!(owner.apply(intent, now()));

    let flat = owner
        .into_columns()
        .into_iter()
        .flat_map(|column| column.tasks)
        .collect::<Vec<_>>();
    let reloaded = partition_tasks(flat, &default_stages());
    let done = reloaded
        .iter()
        .find(|column| column.id == "done")
        .expect("done column");
    assert!(done.contains_task("t1"));
}
