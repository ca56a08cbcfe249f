//! Input-to-simulation pipeline tests
//!
//! Drives the collector, router and game handler the way the window loop does,
//! without a window or GPU.

use moving_box::app::MovingBoxConfig;
use moving_box::app::geometry::ViewportMapping;
use moving_box::app::input::{
    Button, GameInputHandler, InputCollector, InputContext, KeyCode, Rect, ViewportId,
};
use moving_box::sim::World;
use moving_box::sim::moving_box::CursorHint;

const GAME: ViewportId = ViewportId(0);
const OVERLAY: ViewportId = ViewportId(1);

struct Harness {
    collector: InputCollector,
    context: InputContext,
    world: World,
}

impl Harness {
    /// A full-window game viewport at the given on-screen size
    fn new(view: Rect) -> Self {
        let mut context = InputContext::new();
        context.register_handler(Box::new(GameInputHandler::new(GAME)));
        context.register_viewport(GAME, view, "sim_viewport");

        Self {
            collector: InputCollector::new(),
            context,
            world: World::with_moving_box(MovingBoxConfig::default(), [800.0, 600.0]),
        }
    }

    fn handler(&mut self) -> &mut GameInputHandler {
        self.context
            .get_handler_typed_mut::<GameInputHandler>(GameInputHandler::NAME)
            .expect("game handler registered")
    }

    /// One frame: route input, apply it to the box, tick
    fn frame(&mut self, dt: f32) {
        let rect = self.context.viewport_rect(GAME);
        self.handler().set_viewport_rect(rect);

        self.context.update_state(self.collector.clone_state());
        self.context.process();
        self.collector.advance_frame();

        let handler = self.handler();
        let actions = handler.take_actions();
        let cursor = handler.cursor_local();
        let movement = handler.movement();

        let moving_box = self.world.moving_box_mut().expect("box simulation");
        let mapping = ViewportMapping::new(rect.expect("viewport"), moving_box.arena());
        moving_box.set_movement(movement);
        for action in actions {
            if let Some((local, resize)) = action.resize() {
                moving_box.resize_at(mapping.local_to_arena(local), resize);
            }
        }
        moving_box.set_cursor(cursor.map(|pos| mapping.local_to_arena(pos)));

        self.world.tick(dt);
    }

    fn click(&mut self, pos: [f32; 2], button: Button) {
        self.collector.cursor_moved(pos);
        self.collector.set_button(button, true);
        self.frame(0.0);
        self.collector.set_button(button, false);
        self.frame(0.0);
    }

    fn half_size(&self) -> f32 {
        self.world.moving_box().expect("box simulation").half_size()
    }

    fn center(&self) -> [f32; 2] {
        self.world.moving_box().expect("box simulation").center()
    }
}

#[test]
fn test_left_click_on_box_grows_it() {
    let mut h = Harness::new(Rect::new(0.0, 0.0, 800.0, 600.0));

    h.click([400.0, 300.0], Button::Left);
    assert_eq!(h.half_size(), 30.0);

    h.click([400.0, 300.0], Button::Right);
    h.click([400.0, 300.0], Button::Right);
    assert_eq!(h.half_size(), 20.0);
}

#[test]
fn test_tap_within_one_frame_still_clicks() {
    let mut h = Harness::new(Rect::new(0.0, 0.0, 800.0, 600.0));
    h.collector.cursor_moved([400.0, 300.0]);
    h.frame(0.0);

    // Touchpads deliver press and release before the next frame
    h.collector.set_button(Button::Left, true);
    h.collector.set_button(Button::Left, false);
    h.frame(0.0);
    assert_eq!(h.half_size(), 30.0);

    h.collector.set_button(Button::Right, true);
    h.collector.set_button(Button::Right, false);
    h.frame(0.0);
    assert_eq!(h.half_size(), 25.0);

    // Nothing repeats on the following frame
    h.frame(0.0);
    assert_eq!(h.half_size(), 25.0);
}

#[test]
fn test_click_off_box_does_nothing() {
    let mut h = Harness::new(Rect::new(0.0, 0.0, 800.0, 600.0));
    h.click([10.0, 10.0], Button::Left);
    assert_eq!(h.half_size(), 25.0);
}

#[test]
fn test_click_maps_through_scaled_viewport() {
    // Viewport shown at half size, offset from the window corner
    let mut h = Harness::new(Rect::new(100.0, 50.0, 400.0, 300.0));

    // Window (300, 200) is local (200, 150), which is arena (400, 300)
    h.click([300.0, 200.0], Button::Left);
    assert_eq!(h.half_size(), 30.0);
}

#[test]
fn test_overlay_blocks_clicks() {
    let mut h = Harness::new(Rect::new(0.0, 0.0, 800.0, 600.0));
    h.context
        .register_overlay(OVERLAY, Rect::new(350.0, 250.0, 100.0, 100.0), "debug_window");

    h.click([400.0, 300.0], Button::Left);
    assert_eq!(h.half_size(), 25.0);

    h.context.unregister_viewport(OVERLAY);
    h.click([400.0, 300.0], Button::Left);
    assert_eq!(h.half_size(), 30.0);
}

#[test]
fn test_scroll_resizes_per_event() {
    let mut h = Harness::new(Rect::new(0.0, 0.0, 800.0, 600.0));
    h.collector.cursor_moved([400.0, 300.0]);

    // One line up
    h.collector.add_scroll([0.0, 20.0]);
    h.frame(0.0);
    assert_eq!(h.half_size(), 30.0);

    // Less than a line is ignored
    h.collector.add_scroll([0.0, -10.0]);
    h.frame(0.0);
    assert_eq!(h.half_size(), 30.0);

    // Three lines down still counts as one shrink
    h.collector.add_scroll([0.0, -60.0]);
    h.frame(0.0);
    assert_eq!(h.half_size(), 25.0);
}

#[test]
fn test_held_arrow_moves_until_released() {
    let mut h = Harness::new(Rect::new(0.0, 0.0, 800.0, 600.0));

    h.collector.set_key(KeyCode::Left, true);
    for _ in 0..10 {
        h.frame(1.0 / 60.0);
    }
    let moved = h.center();
    assert!(moved[0] < 400.0);
    assert_eq!(moved[1], 300.0);

    h.collector.set_key(KeyCode::Left, false);
    h.frame(1.0 / 60.0);
    let stopped = h.center();
    for _ in 0..10 {
        h.frame(1.0 / 60.0);
    }
    assert_eq!(h.center(), stopped);
}

#[test]
fn test_focus_loss_stops_movement() {
    let mut h = Harness::new(Rect::new(0.0, 0.0, 800.0, 600.0));

    h.collector.set_key(KeyCode::Up, true);
    h.frame(1.0 / 60.0);
    h.collector.release_all();
    h.frame(1.0 / 60.0);

    let center = h.center();
    for _ in 0..10 {
        h.frame(1.0 / 60.0);
    }
    assert_eq!(h.center(), center);
}

#[test]
fn test_cursor_hint_follows_pointer() {
    let mut h = Harness::new(Rect::new(0.0, 0.0, 800.0, 600.0));
    let hint = |h: &Harness| h.world.moving_box().expect("box").cursor_hint();

    h.collector.cursor_moved([400.0, 300.0]);
    h.frame(0.0);
    assert_eq!(hint(&h), CursorHint::Hand);

    h.collector.cursor_moved([20.0, 20.0]);
    h.frame(0.0);
    assert_eq!(hint(&h), CursorHint::Default);

    h.collector.cursor_left();
    h.frame(0.0);
    assert_eq!(hint(&h), CursorHint::Default);
}

#[test]
fn test_grow_to_limit_shows_not_allowed() {
    let mut h = Harness::new(Rect::new(0.0, 0.0, 800.0, 600.0));

    // 25 -> 100 in steps of 5
    for _ in 0..15 {
        h.click([400.0, 300.0], Button::Left);
    }
    assert_eq!(h.half_size(), 100.0);

    h.click([400.0, 300.0], Button::Left);
    assert_eq!(h.half_size(), 100.0);
    assert_eq!(
        h.world.moving_box().expect("box").cursor_hint(),
        CursorHint::NotAllowed
    );
}
