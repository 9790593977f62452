#![forbid(unsafe_code)]

//! End-to-end progress block scenarios against a scripted driver.
//!
//! `ScriptedDriver` replays a fixed list of samples, one per frame, and logs
//! every call so the initialization order can be checked.

use std::cell::RefCell;
use std::collections::VecDeque;
use std::rc::Rc;
use std::time::Duration;

use pblock_core::animation::{AnimationDriver, Easing};
use pblock_core::geometry::{Point, Rect, Size};
use pblock_render::color::PackedRgba;
use pblock_render::raster::PixelBuffer;
use pblock_render::surface::{DrawCommand, RecordingSurface};
use pblock_widgets::{AnimationState, ConfigError, ProgressBlock, ProgressBlockConfig, Widget};

const FRAME: Duration = Duration::from_millis(16);

#[derive(Debug, Clone, Default)]
struct ScriptedDriver {
    script: VecDeque<f32>,
    played: Vec<f32>,
    last: Option<f32>,
    running: bool,
    paused: bool,
    finished: bool,
    duration: Duration,
    delay: Duration,
    easing: Easing,
    calls: Rc<RefCell<Vec<&'static str>>>,
}

impl ScriptedDriver {
    fn new(samples: &[f32]) -> Self {
        Self {
            script: samples.iter().copied().collect(),
            ..Default::default()
        }
    }

    fn log(&self, call: &'static str) {
        self.calls.borrow_mut().push(call);
    }
}

impl AnimationDriver for ScriptedDriver {
    fn set_range(&mut self, _from: f32, _to: f32) {
        self.log("set_range");
    }

    fn set_duration(&mut self, duration: Duration) {
        self.log("set_duration");
        self.duration = duration;
    }

    fn duration(&self) -> Duration {
        self.duration
    }

    fn set_start_delay(&mut self, delay: Duration) {
        self.log("set_start_delay");
        self.delay = delay;
    }

    fn start_delay(&self) -> Duration {
        self.delay
    }

    fn set_easing(&mut self, easing: Easing) {
        self.log("set_easing");
        self.easing = easing;
    }

    fn easing(&self) -> Easing {
        self.easing
    }

    fn start(&mut self) {
        self.log("start");
        let mut replay: VecDeque<f32> = self.played.drain(..).collect();
        replay.extend(self.script.drain(..));
        self.script = replay;
        self.running = true;
        self.paused = false;
        self.finished = false;
        self.last = Some(0.0);
    }

    fn cancel(&mut self) {
        self.log("cancel");
        self.running = false;
        self.paused = false;
    }

    fn pause(&mut self) {
        self.log("pause");
        if self.running {
            self.running = false;
            self.paused = true;
        }
    }

    fn is_running(&self) -> bool {
        self.running
    }

    fn is_paused(&self) -> bool {
        self.paused
    }

    fn is_finished(&self) -> bool {
        self.finished
    }

    fn sample(&self) -> Option<f32> {
        self.last
    }

    fn advance(&mut self, _dt: Duration) -> Option<f32> {
        if !self.running {
            return None;
        }
        let next = self.script.pop_front()?;
        self.played.push(next);
        self.last = Some(next);
        if self.script.is_empty() {
            self.running = false;
            self.finished = true;
        }
        Some(next)
    }

    fn animated_value(&self) -> Option<f32> {
        self.last
    }
}

fn scripted(config: &ProgressBlockConfig, samples: &[f32]) -> ProgressBlock<ScriptedDriver> {
    ProgressBlock::initialize_with_driver(config, ScriptedDriver::new(samples)).expect("valid config")
}

fn started_at(config: &ProgressBlockConfig, fraction: f32) -> ProgressBlock<ScriptedDriver> {
    let mut block = scripted(config, &[fraction, 1.0]);
    block.start();
    assert!(block.on_frame(FRAME));
    block
}

#[test]
fn half_count_at_half_fraction() {
    let block = started_at(&ProgressBlockConfig::default(), 0.5);
    let mut s = RecordingSurface::new();
    block.on_draw(Size::new(100.0, 20.0), &mut s);

    assert_eq!(s.filled_rects(), vec![Rect::new(0.0, 0.0, 25.0, 20.0)]);

    let lines = s.lines();
    assert_eq!(lines.len(), 11);
    for (i, (from, to)) in lines.iter().enumerate() {
        let x = i as f32 * 10.0;
        assert_eq!(*from, Point::new(x, 0.0));
        assert_eq!(*to, Point::new(x, 20.0));
    }
}

#[test]
fn full_count_at_full_fraction_spans_width() {
    let config = ProgressBlockConfig {
        max_count: 4,
        current_count: 4,
        ..Default::default()
    };
    let block = started_at(&config, 1.0);
    let g = block.geometry(Size::new(200.0, 30.0));
    assert_eq!(g.filled, Rect::new(0.0, 0.0, 200.0, 30.0));
    assert_eq!(g.dividers, vec![0.0, 50.0, 100.0, 150.0, 200.0]);
}

#[test]
fn zero_fraction_draws_empty_fill() {
    let block = scripted(&ProgressBlockConfig::default(), &[]);
    assert_eq!(block.state(), AnimationState::Idle);
    assert_eq!(block.geometry(Size::new(100.0, 20.0)).filled_width(), 0.0);
}

#[test]
fn max_then_current_fails() {
    let config = ProgressBlockConfig {
        current_count: 0,
        ..Default::default()
    };
    let mut block = ProgressBlock::initialize(&config).expect("valid");
    block.set_max_count(3).expect("3 >= 0");
    assert_eq!(
        block.set_current_count(5),
        Err(ConfigError::CountOverflow {
            max_count: 3,
            current_count: 5
        })
    );
    assert_eq!((block.max_count(), block.current_count()), (3, 0));
}

#[test]
fn current_then_max_succeeds() {
    let config = ProgressBlockConfig {
        current_count: 0,
        ..Default::default()
    };
    let mut block = ProgressBlock::initialize(&config).expect("valid");
    block.set_current_count(5).expect("5 <= 10");
    block.set_max_count(6).expect("6 >= 5");
    assert_eq!((block.max_count(), block.current_count()), (6, 5));
}

#[test]
fn set_counts_avoids_ordering_hazard() {
    let mut block = ProgressBlock::initialize(&ProgressBlockConfig::default()).expect("valid");
    block.set_counts(3, 3).expect("shrinking both at once");
    assert_eq!((block.max_count(), block.current_count()), (3, 3));
}

#[test]
fn clear_zeroes_next_draw_in_every_state() {
    let config = ProgressBlockConfig::default();

    let mut idle = scripted(&config, &[]);
    idle.clear();
    assert_eq!(idle.geometry(Size::new(100.0, 20.0)).filled_width(), 0.0);

    let mut running = scripted(&config, &[0.4, 0.8, 1.0]);
    running.start();
    running.on_frame(FRAME);
    running.clear();
    assert_eq!(running.state(), AnimationState::Running);
    assert_eq!(running.geometry(Size::new(100.0, 20.0)).filled_width(), 0.0);

    let mut done = started_at(&config, 1.0);
    done.on_frame(FRAME);
    assert_eq!(done.state(), AnimationState::Completed);
    done.clear();
    assert_eq!(done.geometry(Size::new(100.0, 20.0)).filled_width(), 0.0);
}

#[test]
fn double_start_restarts_from_zero() {
    let mut block = scripted(&ProgressBlockConfig::default(), &[0.3, 0.6, 1.0]);
    block.start();
    block.on_frame(FRAME);
    block.on_frame(FRAME);
    assert_eq!(block.animated_fraction(), 0.6);

    block.start();
    assert_eq!(block.animated_fraction(), 0.0);
    block.on_frame(FRAME);
    assert_eq!(block.animated_fraction(), 0.3);

    let calls = block.driver().calls.borrow();
    let tail: Vec<&str> = calls.iter().rev().take(3).rev().copied().collect();
    assert_eq!(tail, ["start", "cancel", "start"]);
}

#[test]
fn initialization_configures_before_arming() {
    let config = ProgressBlockConfig {
        auto_start: true,
        ..Default::default()
    };
    let block = scripted(&config, &[1.0]);
    let calls = block.driver().calls.borrow().clone();
    assert_eq!(
        calls,
        ["set_duration", "set_start_delay", "set_range", "set_easing", "start"]
    );
}

#[test]
fn without_auto_start_driver_is_never_started() {
    let block = scripted(&ProgressBlockConfig::default(), &[1.0]);
    assert!(!block.driver().calls.borrow().contains(&"start"));
    assert_eq!(block.state(), AnimationState::Idle);
}

#[test]
fn ticks_request_redraws_until_completion() {
    let mut block = scripted(&ProgressBlockConfig::default(), &[0.25, 0.5, 1.0]);
    block.start();
    block.take_redraw();

    let mut redraws = 0;
    while block.on_frame(FRAME) {
        assert!(block.take_redraw());
        redraws += 1;
    }
    assert_eq!(redraws, 3);
    assert_eq!(block.state(), AnimationState::Completed);
    assert!(!block.on_frame(FRAME));
    assert!(!block.take_redraw());
}

#[test]
fn widget_draw_paints_background_first() {
    let block = started_at(&ProgressBlockConfig::default(), 0.5);
    let mut s = RecordingSurface::new();
    block.draw(Size::new(100.0, 20.0), &mut s);

    match s.commands()[0] {
        DrawCommand::FillRect { rect, paint } => {
            assert_eq!(rect, Rect::new(0.0, 0.0, 100.0, 20.0));
            assert_eq!(paint.color, PackedRgba::WHITE);
        }
        other => panic!("expected background fill, got {other:?}"),
    }
    assert_eq!(s.commands().len(), 1 + 1 + 1 + 11);
}

#[test]
fn widget_draw_skips_empty_area() {
    let block = started_at(&ProgressBlockConfig::default(), 0.5);
    let mut s = RecordingSurface::new();
    block.draw(Size::new(0.0, 20.0), &mut s);
    assert!(s.commands().is_empty());
}

#[test]
fn pixel_snapshot_of_half_filled_block() {
    let config = ProgressBlockConfig {
        max_count: 4,
        current_count: 2,
        line_width: 1.0,
        line_color: PackedRgba::BLACK,
        counted_color: PackedRgba::YELLOW,
        uncounted_color: PackedRgba::WHITE,
        ..Default::default()
    };
    let block = started_at(&config, 1.0);

    let mut buf = PixelBuffer::new(16, 3);
    block.draw(buf.size(), &mut buf);

    let legend = [
        (PackedRgba::BLACK, 'k'),
        (PackedRgba::YELLOW, 'y'),
        (PackedRgba::WHITE, '.'),
    ];
    // Interior dividers cover the pixel left of their coordinate; the
    // outline and the edge dividers stay inside the buffer.
    assert_eq!(
        buf.to_ascii(&legend),
        "kkkkkkkkkkkkkkkk\n\
         kyykyyyk...k...k\n\
         kkkkkkkkkkkkkkkk\n"
    );
}
