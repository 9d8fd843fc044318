use logpane::{Anchor, Bookmark, Config, LogView, MonospaceMeasure, Position, WrapMode};
use std::sync::{Arc, Once};
use std::thread;

fn init_test_tracing() {
    static INIT: Once = Once::new();
    INIT.call_once(|| {
        let filter = tracing_subscriber::EnvFilter::new("logpane_core=debug,logpane_view=info");
        let _ = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_test_writer()
            .try_init();
    });
}

fn test_config(capacity: usize) -> Config {
    Config {
        capacity,
        wrap: WrapMode::Word,
        text_size: 10.0,
        inner_padding: 0.0,
        line_spacing: 0.0,
        overscan: 0.0,
        perf_log: true,
    }
}

/// Rows are 10 px tall and characters 10 px wide.
fn new_view(capacity: usize, width: f32, height: f32) -> LogView<MonospaceMeasure> {
    let mut view = LogView::new(MonospaceMeasure::new(1.0, 1.0), &test_config(capacity));
    view.resize(width, height);
    view
}

#[test]
fn producer_thread_and_refresh_loop_stay_consistent() {
    init_test_tracing();
    let mut view = new_view(100, 400.0, 50.0);
    let document = Arc::clone(view.document());

    let producer = thread::spawn(move || {
        for batch in 0..50 {
            document.add((0..10).map(|i| format!("line {}", batch * 10 + i)));
        }
    });

    let mut last_refresh = 0;
    for _ in 0..200 {
        let frame = view.refresh();
        assert!(frame.stats.refresh_id > last_refresh);
        last_refresh = frame.stats.refresh_id;
        assert!(frame.items.len() <= 5);
        for pair in frame.items.windows(2) {
            assert!(pair[0].position.y < pair[1].position.y);
            assert!(pair[0].anchor < pair[1].anchor);
        }
        for item in &frame.items {
            assert!(item.text.starts_with("line "), "unexpected row {:?}", item.text);
        }
    }

    producer.join().expect("producer thread");
    assert_eq!(view.document().len(), 100);

    view.scroll(f32::MAX);
    let frame = view.refresh();
    let texts: Vec<&str> = frame.items.iter().map(|item| item.text.as_str()).collect();
    assert_eq!(texts, ["line 495", "line 496", "line 497", "line 498", "line 499"]);
    assert_eq!(frame.scroll_y, 950.0);
}

#[test]
fn eviction_during_drag_selection_keeps_selection_valid() {
    init_test_tracing();
    let mut view = new_view(5, 200.0, 50.0);
    view.append_lines(["row0", "row1", "row2", "row3", "row4"]);

    view.pointer_down(Position::new(10.0, 15.0));
    view.pointer_drag(Position::new(20.0, 35.0));
    assert_eq!(
        view.document().selection(),
        (Anchor::new(1, 1), Anchor::new(3, 2))
    );
    assert_eq!(view.copy_selection("|"), "ow1|row2|ro");

    view.append_lines(["row5", "row6"]);
    assert_eq!(
        view.document().selection(),
        (Anchor::new(0, 0), Anchor::new(1, 2))
    );
    assert_eq!(view.copy_selection("|"), "row2|ro");

    // The drag continues against the shifted layout.
    view.pointer_drag(Position::new(40.0, 45.0));
    view.pointer_up();
    assert_eq!(view.copy_selection("|"), "row2|row3|row4|row5|row6");

    let frame = view.refresh();
    assert_eq!(frame.highlights.len(), 5);
}

#[test]
fn scroll_to_bookmark_tracks_evicted_lines() {
    init_test_tracing();
    let mut view = new_view(50, 200.0, 20.0);
    view.append_lines((0..50).map(|i| format!("entry {}", i)));
    let key = Bookmark::named("marker");
    view.set_bookmark(key.clone(), Anchor::new(40, 0));

    view.append_lines((50..60).map(|i| format!("entry {}", i)));
    assert_eq!(view.document().get_bookmark(&key), Some(Anchor::new(30, 0)));

    assert!(view.scroll_to_bookmark(&key));
    let frame = view.refresh();
    let texts: Vec<&str> = frame.items.iter().map(|item| item.text.as_str()).collect();
    assert!(texts.contains(&"entry 40"), "visible rows: {:?}", texts);
    assert_eq!(
        view.extract_text(&key, &Bookmark::End, "\n")
            .map(|text| text.lines().count()),
        Some(20)
    );
}

#[test]
fn whole_document_round_trips_through_extract_text() {
    init_test_tracing();
    let view = new_view(0, 200.0, 20.0);
    let lines = ["alpha", "", "gamma \u{3b4}", "omega"];
    view.append_lines(lines);
    assert_eq!(
        view.extract_text(&Bookmark::Start, &Bookmark::End, "\n"),
        Some(lines.join("\n"))
    );
    view.select_all();
    assert_eq!(view.copy_selection("\n"), lines.join("\n"));
}
