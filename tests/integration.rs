//! Integration tests for termui.
//!
//! These exercise the public API from outside the crate: layout, the frame
//! differ, input routing through the headless Pilot, and the full app loop
//! against a recording terminal.

use std::io;
use std::time::Duration;

use pretty_assertions::assert_eq;

use termui::app::{App, AppConfig, AppError};
use termui::dom::{Dom, Node};
use termui::event::binding::BindingAction;
use termui::event::input::{InputEvent, Key, Modifiers};
use termui::event::router::InteractionState;
use termui::event::source::{ByteSource, ChannelSource};
use termui::geometry::{Region, Spacing};
use termui::layout::{resolve, GridPlacement, GridSpec, LayoutResult, Track};
use termui::render::{diff, CellChange, Frame, Renderer};
use termui::screen::Screen;
use termui::style::{Cell, Color, StyleResolved};
use termui::testing::{HeadlessTerminal, Pilot};
use termui::theme::{Interaction, Theme};
use termui::widgets::{Button, Container, Label};

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn layout(root: Node, area: Region) -> (Dom, LayoutResult) {
    let mut dom = Dom::new();
    let root = dom.mount(root);
    let result = resolve(&dom, root, area).unwrap();
    (dom, result)
}

fn rect(dom: &Dom, result: &LayoutResult, id: &str) -> Region {
    result.get(dom.query_by_id(id).unwrap()).unwrap()
}

/// Deterministic pseudo-random frames for the differ properties.
fn scribble(width: u16, height: u16, mut seed: u64) -> Frame {
    let mut frame = Frame::new(width, height);
    let palette = [Color::Default, Color::Ansi(1), Color::Rgb(10, 20, 30)];
    for row in 0..height {
        for col in 0..width {
            seed ^= seed << 13;
            seed ^= seed >> 7;
            seed ^= seed << 17;
            if seed % 3 == 0 {
                let style = StyleResolved::new(palette[(seed >> 8) as usize % 3], Color::Default, Default::default());
                frame.set(col, row, Cell::new((b'a' + (seed >> 16) as u8 % 26) as char, &style));
            }
        }
    }
    frame
}

// ---------------------------------------------------------------------------
// Frame differ
// ---------------------------------------------------------------------------

#[test]
fn diff_against_itself_is_empty() {
    for seed in 1..20 {
        let frame = scribble(17, 5, seed);
        assert!(diff(&frame, &frame).is_empty());
    }
}

#[test]
fn applying_diff_reproduces_next_frame() {
    for seed in 1..20 {
        let previous = scribble(17, 5, seed);
        let next = scribble(17, 5, seed * 7919);
        let changes: Vec<CellChange> = diff(&previous, &next);
        let mut patched = previous.clone();
        termui::render::diff::apply(&mut patched, &changes);
        assert_eq!(patched, next);
        // Row-major order.
        assert!(changes.windows(2).all(|w| (w[0].row, w[0].col) < (w[1].row, w[1].col)));
    }
}

// ---------------------------------------------------------------------------
// Layout
// ---------------------------------------------------------------------------

#[test]
fn children_stay_inside_parents_and_never_overlap() {
    let tree = || {
        Node::new(Container::new())
            .id("root")
            .padding(Spacing::all(1))
            .spacing(1)
            .child(Node::new(Label::new("header")).id("a").fixed(3))
            .child(
                Node::new(Container::new())
                    .id("b")
                    .horizontal()
                    .spacing(2)
                    .child(Node::new(Button::new("one")).id("b1").flex(2))
                    .child(Node::new(Button::new("two")).id("b2").content())
                    .child(Node::new(Label::new("x")).id("b3").fixed(50)),
            )
            .child(Node::new(Label::new("footer")).id("c").flex(1).cross(4))
    };
    for (w, h) in [(40, 12), (7, 3), (1, 1), (0, 0), (100, 2)] {
        let (dom, result) = layout(tree(), Region::new(0, 0, w, h));
        for (id, region) in result.iter() {
            if let Some(parent) = dom.parent(id) {
                let parent_rect = result.get(parent).unwrap();
                assert!(
                    region.is_empty() || parent_rect.contains_region(region),
                    "{region:?} escapes {parent_rect:?} at {w}x{h}"
                );
            }
        }
        for parent in ["root", "b"] {
            let kids: Vec<Region> = dom
                .children(dom.query_by_id(parent).unwrap())
                .iter()
                .map(|&c| result.get(c).unwrap())
                .collect();
            for (i, a) in kids.iter().enumerate() {
                for b in &kids[i + 1..] {
                    assert!(!a.overlaps(*b), "{a:?} overlaps {b:?} at {w}x{h}");
                }
            }
        }
    }
}

#[test]
fn flex_and_fixed_share_a_row() {
    let (dom, result) = layout(
        Node::new(Container::new())
            .horizontal()
            .child(Node::new(Label::new("flex")).id("flex").flex(1))
            .child(Node::new(Label::new("fixed")).id("fixed").fixed(5)),
        Region::new(0, 0, 25, 3),
    );
    assert_eq!(rect(&dom, &result, "flex"), Region::new(0, 0, 20, 3));
    assert_eq!(rect(&dom, &result, "fixed"), Region::new(20, 0, 5, 3));
}

#[test]
fn fixed_grid_columns_get_their_width() {
    let (dom, result) = layout(
        Node::new(Container::new())
            .grid(GridSpec::new([Track::Fixed(10), Track::Fixed(20)]))
            .child(Node::new(Label::new("a")).id("a"))
            .child(Node::new(Label::new("b")).id("b"))
            .child(Node::new(Label::new("c")).id("c"))
            .child(Node::new(Label::new("d")).id("d")),
        Region::new(0, 0, 30, 10),
    );
    for id in ["a", "c"] {
        let r = rect(&dom, &result, id);
        assert_eq!((r.x, r.width), (0, 10));
    }
    for id in ["b", "d"] {
        let r = rect(&dom, &result, id);
        assert_eq!((r.x, r.width), (10, 20));
        assert!(r.right() <= 30);
    }
    assert_eq!(rect(&dom, &result, "c").y, rect(&dom, &result, "a").bottom());
}

#[test]
fn grid_spans_and_pinned_cells() {
    let (dom, result) = layout(
        Node::new(Container::new())
            .grid(GridSpec::new([Track::Flex(1), Track::Flex(1), Track::Flex(1)]).with_rows([Track::Fixed(2), Track::Fixed(2)]))
            .child(Node::new(Label::new("wide")).id("wide").place(GridPlacement::default().span(1, 2)))
            .child(Node::new(Label::new("pin")).id("pin").place(GridPlacement::at(1, 0)))
            .child(Node::new(Label::new("auto")).id("auto")),
        Region::new(0, 0, 30, 4),
    );
    assert_eq!(rect(&dom, &result, "pin"), Region::new(0, 2, 10, 2));
    assert_eq!(rect(&dom, &result, "wide"), Region::new(0, 0, 20, 2));
    assert_eq!(rect(&dom, &result, "auto"), Region::new(20, 0, 10, 2));
}

// ---------------------------------------------------------------------------
// Renderer
// ---------------------------------------------------------------------------

#[test]
fn resize_produces_full_repaint() {
    let mut screen = Screen::new("main", Node::new(Container::new()).child(Node::new(Label::new("hi"))));
    let theme = Theme::default();
    let interaction = InteractionState::new();
    let mut renderer = Renderer::new(80, 24);
    assert_eq!(renderer.render(&mut screen, &theme, &interaction).unwrap().changes, 80 * 24);
    assert_eq!(renderer.render(&mut screen, &theme, &interaction).unwrap().changes, 0);

    renderer.resize(80, 25);
    let rendered = renderer.render(&mut screen, &theme, &interaction).unwrap();
    assert_eq!(rendered.changes, 80 * 25);
    assert_eq!(renderer.previous().height(), 25);
}

#[test]
fn missing_theme_tokens_use_terminal_defaults() {
    let style = Theme::default().resolve("no_such_token", Interaction::default());
    assert_eq!((style.fg, style.bg), (Color::Default, Color::Default));
}

// ---------------------------------------------------------------------------
// Input routing through the Pilot
// ---------------------------------------------------------------------------

fn nested() -> Node {
    Node::new(Container::new())
        .child(
            Node::new(Container::new())
                .id("panel")
                .focusable(true)
                .padding(Spacing::all(1))
                .child(Node::new(Button::new("inner")).id("inner")),
        )
        .child(Node::new(Label::new("plain")).id("plain").fixed(1))
}

#[test]
fn click_resolves_to_the_deepest_node() {
    let mut pilot = Pilot::mount(20, 6, nested);
    pilot.click(5, 2);
    assert_eq!(pilot.focused_id().as_deref(), Some("inner"));
    assert_eq!(pilot.widget::<Button>("inner").unwrap().presses(), 1);

    // The panel's border row belongs to the panel alone.
    pilot.click(5, 0);
    assert_eq!(pilot.focused_id().as_deref(), Some("panel"));
    assert_eq!(pilot.widget::<Button>("inner").unwrap().presses(), 1);
}

#[test]
fn clicking_a_non_focusable_node_keeps_focus() {
    let mut pilot = Pilot::mount(20, 6, nested);
    pilot.click(5, 2);
    pilot.click(2, 5);
    assert_eq!(pilot.focused_id().as_deref(), Some("inner"));
}

#[test]
fn custom_binding_switches_screens() {
    let mut pilot = Pilot::new(20, 3);
    pilot.screen("main", nested);
    pilot.screen("help", || Node::new(Label::new("help text"))).title("Help");
    pilot
        .state_mut()
        .bindings
        .bind_str("f1", BindingAction::ShowScreen("help".into()))
        .unwrap();
    pilot.start().unwrap();
    pilot.press_key(Key::Tab);
    assert!(pilot.focused_id().is_some());

    pilot.press_key(Key::F(1));
    assert_eq!(pilot.active_screen(), Some("help"));
    assert_eq!(pilot.row_text(0), "help text");
    assert!(pilot.focused_id().is_none());
}

#[test]
fn ctrl_c_quits() {
    let mut pilot = Pilot::mount(10, 2, nested);
    pilot.press_key_with(Key::Char('c'), Modifiers::CTRL);
    assert!(!pilot.is_running());
}

// ---------------------------------------------------------------------------
// App loop
// ---------------------------------------------------------------------------

fn app() -> App {
    let mut app = App::new(AppConfig::new().with_tick_rate(Duration::from_millis(10)));
    app.screen("main", nested);
    app
}

#[tokio::test]
async fn stop_during_render_wait_restores_once() {
    let term = HeadlessTerminal::new(20, 6);
    let (_tx, input) = ChannelSource::channel();
    let app = app();
    let handle = app.handle();
    let mut out = Vec::new();

    let (result, ()) = tokio::join!(app.run(input, &mut out, term.clone()), async {
        // Long enough for the first frame; the render loop is then idle.
        tokio::time::sleep(Duration::from_millis(50)).await;
        handle.stop();
    });

    result.unwrap();
    assert_eq!(term.enters(), 1);
    assert_eq!(term.leaves(), 1);
    assert!(!out.is_empty());
}

#[tokio::test]
async fn typed_quit_key_ends_the_app() {
    let term = HeadlessTerminal::new(20, 6);
    let reader = tokio_test::io::Builder::new()
        .read(b"q")
        .wait(Duration::from_secs(5))
        .build();
    let result = tokio::time::timeout(
        Duration::from_secs(2),
        app().run(ByteSource::new(reader), tokio::io::sink(), term.clone()),
    )
    .await
    .expect("app did not stop on q");
    result.unwrap();
    assert_eq!(term.leaves(), 1);
}

#[tokio::test]
async fn posted_commands_reach_the_app() {
    let term = HeadlessTerminal::new(20, 6);
    let (tx, input) = ChannelSource::channel();
    let app = app();
    let handle = app.handle();

    let (result, ()) = tokio::join!(app.run(input, tokio::io::sink(), term.clone()), async {
        tx.send(InputEvent::key(Key::Tab)).unwrap();
        tokio::time::sleep(Duration::from_millis(20)).await;
        handle.post(termui::Command::Quit);
    });
    result.unwrap();
    assert_eq!(term.leaves(), 1);
}

#[tokio::test]
async fn write_failure_is_fatal_and_restores() {
    let term = HeadlessTerminal::new(20, 6);
    let (_tx, input) = ChannelSource::channel();
    let output = tokio_test::io::Builder::new()
        .write_error(io::Error::new(io::ErrorKind::BrokenPipe, "terminal went away"))
        .build();

    let err = app().run(input, output, term.clone()).await.unwrap_err();
    match err {
        AppError::Io(err) => assert_eq!(err.kind(), io::ErrorKind::BrokenPipe),
        other => panic!("expected an I/O error, got {other:?}"),
    }
    assert_eq!((term.enters(), term.leaves()), (1, 1));
}

#[tokio::test]
async fn closed_input_is_fatal_and_restores() {
    let term = HeadlessTerminal::new(20, 6);
    let (tx, input) = ChannelSource::channel();
    drop(tx);
    let err = app().run(input, tokio::io::sink(), term.clone()).await.unwrap_err();
    assert!(matches!(err, AppError::Io(ref e) if e.kind() == io::ErrorKind::UnexpectedEof));
    assert_eq!(term.leaves(), 1);
}
