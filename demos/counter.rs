//! A counter with two buttons and a help screen.
//!
//! Run with `cargo run --example counter`. Logs go to
//! `$TMPDIR/termui-counter.log`; set `RUST_LOG=termui=debug` for more.
//!
//! Keys: Tab/Shift+Tab move focus, Enter or a click presses the focused
//! button, `+`/`-` change the count directly, F1 shows help, `q` quits.

use std::sync::Mutex;

use termui::event::binding::BindingAction;
use termui::geometry::Spacing;
use termui::layout::{GridSpec, Track};
use termui::widgets::{Button, Container, Label};
use termui::{App, AppConfig, Dom, Node};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

fn init_logging() -> std::io::Result<()> {
    let file = std::fs::File::create(std::env::temp_dir().join("termui-counter.log"))?;
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("termui=info"));
    let _ = tracing_subscriber::registry()
        .with(env_filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(Mutex::new(file))
                .with_ansi(false)
                .with_target(true),
        )
        .try_init();
    Ok(())
}

fn counter_screen() -> Node {
    Node::new(Container::new())
        .variant("base_200")
        .padding(Spacing::all(1))
        .spacing(1)
        .child(Node::new(Label::new("Counter")).id("title").fixed(1).variant("primary"))
        .child(Node::new(Label::new("0")).id("count").fixed(1))
        .child(
            Node::new(Container::new())
                .grid(GridSpec::new([Track::Fixed(9), Track::Fixed(9)]).with_rows([Track::Fixed(1)]))
                .spacing(2)
                .fixed(1)
                .child(Node::new(Button::new("-").action("decrement")).id("dec").variant("secondary"))
                .child(Node::new(Button::new("+").action("increment")).id("inc").variant("accent")),
        )
        .child(Node::new(Label::new("F1 help, q quit")).variant("neutral"))
}

fn help_screen() -> Node {
    Node::new(Container::new())
        .padding(Spacing::all(1))
        .child(Node::new(Label::new("Tab moves focus\nEnter presses\n+ and - count\nEsc goes back")))
}

fn bump(dom: &mut Dom, delta: i64) {
    if let Some(label) = dom.widget_mut::<Label>("count") {
        let value = label.text().parse::<i64>().unwrap_or(0) + delta;
        label.set_text(value.to_string());
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    init_logging()?;

    let mut app = App::new(AppConfig::new().with_title("counter").with_fps(30));
    app.screen("counter", counter_screen).title("Counter");
    app.screen("help", help_screen).title("Help");

    let bindings = app.bindings_mut();
    bindings.bind_str("+", BindingAction::Custom("increment".into()))?;
    bindings.bind_str("-", BindingAction::Custom("decrement".into()))?;
    bindings.bind_str("f1", BindingAction::ShowScreen("help".into()))?;
    bindings.bind_str("esc", BindingAction::ShowScreen("counter".into()))?;

    app.on_command(|name, dom, ctx| {
        match name {
            "increment" => bump(dom, 1),
            "decrement" => bump(dom, -1),
            _ => return,
        }
        ctx.request_redraw();
    });

    app.run_terminal().await?;
    Ok(())
}
