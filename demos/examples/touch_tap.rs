// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Touch routing on a two-output desk: a rotated panel and an external monitor.
//!
//! This example shows how to combine:
//! - `understory_touch_map` for placing normalized touch positions on a rotated output,
//! - `understory_touch::router` for hit testing, sloppy focus and pointer emulation,
//! - `understory_touch::dispatcher` for fanning backend events out to subscribers.
//!
//! Run:
//! - `RUST_LOG=trace cargo run -p understory_touch_demos --example touch_tap`

use kurbo::{Point, Rect};
use tracing::info;
use tracing_subscriber::EnvFilter;
use understory_touch::config::TouchConfig;
use understory_touch::dispatcher::{InputDispatcher, Outcome};
use understory_touch::emulation::{PointerButton, PointerMotion, PointerSink};
use understory_touch::event::{EventMask, TouchDown, TouchEvent, TouchMotion, TouchUp};
use understory_touch::hit::{Hit, StackEntry, SurfaceStack};
use understory_touch::registry::TouchDevice;
use understory_touch::router::{TouchHost, TouchRouter};
use understory_touch::seat::{HeadlessSeat, TouchSeat};
use understory_touch::types::{ButtonState, DeviceId, TouchId};
use understory_touch_map::{Output, OutputLayout, OutputTransform};

/// Surfaces are plain numbers here; clients are names.
type Surface = u32;
type Client = &'static str;

/// Cursor state driven by the generic pointer path.
#[derive(Debug, Default)]
struct Cursor {
    at: Point,
    held: bool,
}

impl PointerSink for Cursor {
    fn cursor_position(&self) -> Point {
        self.at
    }

    fn relative_motion(&mut self, motion: PointerMotion) {
        self.at += motion.delta;
        println!("  pointer moved to ({:.0}, {:.0})", self.at.x, self.at.y);
    }

    fn button(&mut self, button: PointerButton) {
        self.held = button.state == ButtonState::Pressed;
        println!("  pointer button {:#x} {:?}", button.button, button.state);
    }
}

/// The compositor side: layout, scene, seat and keyboard focus.
#[derive(Debug)]
struct Shell {
    outputs: OutputLayout,
    scene: SurfaceStack<Surface, Client>,
    seat: HeadlessSeat<Surface>,
    cursor: Cursor,
    focused: Option<Client>,
    idle_resets: u32,
}

impl TouchHost for Shell {
    type Surface = Surface;
    type Client = Client;
    type Seat = HeadlessSeat<Surface>;
    type Pointer = Cursor;

    fn outputs(&self) -> &OutputLayout {
        &self.outputs
    }

    fn hit_test(&self, at: Point) -> Hit<Surface, Client> {
        self.scene.hit_test(at)
    }

    fn focus_client(&mut self, client: &Client) {
        if self.focused != Some(*client) {
            println!("  focus -> {client}");
            self.focused = Some(*client);
        }
    }

    fn notify_activity(&mut self) {
        self.idle_resets += 1;
    }

    fn seat(&mut self) -> &mut HeadlessSeat<Surface> {
        &mut self.seat
    }

    fn pointer(&mut self) -> &mut Cursor {
        &mut self.cursor
    }
}

/// Everything the dispatcher's subscribers share.
#[derive(Debug)]
struct Session {
    router: TouchRouter,
    shell: Shell,
    frames: u32,
}

fn main() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or(EnvFilter::new("debug"));
    tracing_subscriber::fmt()
        .compact()
        .with_env_filter(env_filter)
        .init();

    // A 1080x1920 portrait panel mounted sideways, left of a 1920x1080 monitor.
    let mut outputs = OutputLayout::new();
    outputs.add(
        Output::new("DSI-1", Rect::new(0.0, 0.0, 1920.0, 1080.0))
            .with_transform(OutputTransform::Rotate90),
    );
    outputs.add(Output::new("HDMI-1", Rect::new(1920.0, 0.0, 3840.0, 1080.0)));

    // A terminal and a launcher share the panel; a browser fills the monitor.
    let mut scene = SurfaceStack::new();
    scene.push(StackEntry::new(1, "terminal", Rect::new(0.0, 0.0, 960.0, 1080.0)));
    scene.push(StackEntry::new(2, "launcher", Rect::new(960.0, 0.0, 1920.0, 1080.0)));
    scene.push(StackEntry::new(3, "browser", Rect::new(1920.0, 0.0, 3840.0, 1080.0)));

    let mut session = Session {
        router: TouchRouter::new(TouchConfig::default()),
        shell: Shell {
            outputs,
            scene,
            seat: HeadlessSeat::new(),
            cursor: Cursor::default(),
            focused: None,
            idle_resets: 0,
        },
        frames: 0,
    };

    let mut dispatcher: InputDispatcher<Session> = InputDispatcher::new();
    dispatcher.subscribe(EventMask::ALL, |s, ev| {
        info!(class = ?ev.mask(), "routing touch event");
        s.router.handle(&mut s.shell, ev);
        Outcome::Continue
    });
    dispatcher.subscribe(EventMask::FRAME, |s, _| {
        s.frames += 1;
        Outcome::Continue
    });

    let panel = DeviceId(0);
    let down = |id: i32, x: f64, y: f64| {
        TouchEvent::Down(TouchDown {
            device: panel,
            time_msec: 0,
            touch_id: TouchId(id),
            position: Point::new(x, y),
        })
    };
    let motion = |id: i32, x: f64, y: f64| {
        TouchEvent::Motion(TouchMotion {
            device: panel,
            time_msec: 0,
            touch_id: TouchId(id),
            position: Point::new(x, y),
        })
    };
    let up = |id: i32| {
        TouchEvent::Up(TouchUp {
            time_msec: 0,
            touch_id: TouchId(id),
        })
    };

    let script: &[(&str, Vec<TouchEvent>)] = &[
        (
            "panel plugged in",
            vec![TouchEvent::DeviceAdded(
                TouchDevice::new(panel).with_output_name("DSI-1"),
            )],
        ),
        (
            "tap near the panel's top-left corner",
            vec![down(0, 0.1, 0.1), TouchEvent::Frame, up(0), TouchEvent::Frame],
        ),
        (
            "two-finger touch on the other half",
            vec![
                down(1, 0.5, 0.8),
                TouchEvent::Frame,
                down(2, 0.6, 0.8),
                TouchEvent::Frame,
                up(2),
                up(1),
                TouchEvent::Frame,
            ],
        ),
        (
            "drag from the launcher across to the terminal",
            vec![
                down(3, 0.5, 0.9),
                TouchEvent::Frame,
                motion(3, 0.5, 0.5),
                TouchEvent::Frame,
                motion(3, 0.5, 0.1),
                TouchEvent::Frame,
                up(3),
                TouchEvent::Frame,
            ],
        ),
    ];

    for (label, events) in script {
        println!("== {label}");
        for ev in events {
            dispatcher.dispatch(&mut session, ev);
        }
        println!(
            "  points down: {}, cursor held: {}",
            session.shell.seat.num_points(),
            session.shell.cursor.held
        );
    }

    println!(
        "focused: {:?}, frames: {}, idle resets: {}",
        session.shell.focused, session.frames, session.shell.idle_resets
    );
}
