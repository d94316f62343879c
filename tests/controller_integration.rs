//! Integration tests: RackService → navigation FSM → display/serial ports.
//!
//! Everything here runs on the host with mock adapters that record the
//! full call history, so tests assert on what actually reached the panel
//! and the notification link.

use fridgerack::app::events::{NoticeKind, RackEvent};
use fridgerack::app::ports::{
    AssetError, DisplayPort, EventSink, IconBitmap, IconPort, InputPort, NotifyPort,
};
use fridgerack::app::service::RackService;
use fridgerack::config::RackConfig;
use fridgerack::fsm::Phase;
use fridgerack::slots::{FoodIcon, SlotIndex, Warning};

// ── Mock implementations ──────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq)]
enum DrawCall {
    Grid,
    Marker(SlotIndex),
    ClearMarker(SlotIndex),
    Warning(SlotIndex, Warning),
    ClearWarning(SlotIndex),
    Countdown(SlotIndex, u8),
    Icon(SlotIndex),
}

/// Records every display call and wait, and plays back whatever input the
/// test poked into `selector`/`pressed`.
struct MockHw {
    selector: f32,
    pressed: bool,
    draws: Vec<DrawCall>,
    waits: Vec<bool>,
}

impl MockHw {
    fn new() -> Self {
        Self {
            selector: 0.0,
            pressed: false,
            draws: Vec::new(),
            waits: Vec::new(),
        }
    }
}

impl InputPort for MockHw {
    fn read_selector(&mut self) -> f32 {
        self.selector
    }
    fn confirm_pressed(&mut self) -> bool {
        self.pressed
    }
    fn wait_confirm(&mut self, pressed: bool) {
        self.waits.push(pressed);
    }
}

impl DisplayPort for MockHw {
    fn draw_grid(&mut self) {
        self.draws.push(DrawCall::Grid);
    }
    fn draw_marker(&mut self, slot: SlotIndex) {
        self.draws.push(DrawCall::Marker(slot));
    }
    fn clear_marker(&mut self, slot: SlotIndex) {
        self.draws.push(DrawCall::ClearMarker(slot));
    }
    fn draw_warning(&mut self, slot: SlotIndex, warning: Warning) {
        self.draws.push(DrawCall::Warning(slot, warning));
    }
    fn clear_warning(&mut self, slot: SlotIndex) {
        self.draws.push(DrawCall::ClearWarning(slot));
    }
    fn draw_countdown(&mut self, slot: SlotIndex, days: u8) {
        self.draws.push(DrawCall::Countdown(slot, days));
    }
    fn draw_icon(&mut self, slot: SlotIndex, _bitmap: &IconBitmap) {
        self.draws.push(DrawCall::Icon(slot));
    }
}

/// Always returns a tiny bitmap so icon draws reach the display mock.
struct StubIcons;

impl IconPort for StubIcons {
    fn load_icon(&mut self, _icon: FoodIcon) -> Result<IconBitmap, AssetError> {
        Ok(IconBitmap {
            width: 1,
            height: 1,
            pixels: vec![0xFFFF],
        })
    }
}

#[derive(Default)]
struct MockNotify {
    notices: Vec<(SlotIndex, NoticeKind)>,
}

impl NotifyPort for MockNotify {
    fn notify(&mut self, slot: SlotIndex, kind: NoticeKind) {
        self.notices.push((slot, kind));
    }
}

#[derive(Default)]
struct VecSink(Vec<RackEvent>);

impl EventSink for VecSink {
    fn emit(&mut self, event: &RackEvent) {
        self.0.push(*event);
    }
}

// ── Test rig ──────────────────────────────────────────────────

struct Rig {
    svc: RackService,
    hw: MockHw,
    icons: StubIcons,
    notify: MockNotify,
    sink: VecSink,
    ticks_per_day: u64,
}

impl Rig {
    fn new(ticks_per_day: u64) -> Self {
        let config = RackConfig {
            ticks_per_day,
            ..RackConfig::default()
        };
        let mut rig = Self {
            svc: RackService::new(config),
            hw: MockHw::new(),
            icons: StubIcons,
            notify: MockNotify::default(),
            sink: VecSink::default(),
            ticks_per_day,
        };
        rig.svc.start(&mut rig.hw, &mut rig.sink);
        rig
    }

    fn tick(&mut self, selector: f32, pressed: bool) {
        self.hw.selector = selector;
        self.hw.pressed = pressed;
        self.svc
            .tick(&mut self.hw, &mut self.icons, &mut self.notify, &mut self.sink);
    }

    /// One press-and-release pair at a fixed dial position.
    fn press_release(&mut self, selector: f32) {
        self.tick(selector, true);
        self.tick(selector, false);
    }

    /// Drive a full edit cycle: pick `slot_norm`, dial in `days_norm`,
    /// dial in `icon_norm`, ending back in Idle.
    fn commit_slot(&mut self, slot_norm: f32, days_norm: f32, icon_norm: f32) {
        self.press_release(slot_norm); // Idle → Selecting → SettingExpiration
        self.tick(days_norm, false); // first expiration render
        self.press_release(days_norm); // → SettingIcon
        self.tick(icon_norm, false); // first icon render
        self.press_release(icon_norm); // → Idle
        assert_eq!(self.svc.phase(), Phase::Idle);
    }

    /// Run idle ticks until exactly one rollover fires.
    fn run_one_day(&mut self) {
        let need = self.ticks_per_day - self.svc.day_ticks();
        for _ in 0..need {
            self.tick(0.0, false);
        }
    }

    fn take_draws(&mut self) -> Vec<DrawCall> {
        std::mem::take(&mut self.hw.draws)
    }
}

fn slot(i: u8) -> SlotIndex {
    SlotIndex::new(i).unwrap()
}

// ── Scenario: full edit cycle ─────────────────────────────────

#[test]
fn full_edit_cycle_commits_slot_and_returns_to_idle() {
    let mut rig = Rig::new(100_000);
    // Dial 0.4 of 6 cells → slot 2; 0.35 of 9 bands → 3+1 = 4 days;
    // 0.15 of 8 icons → index 1 (apple).
    rig.commit_slot(0.4, 0.35, 0.15);

    let committed = rig.svc.slot(slot(2));
    assert_eq!(committed.remaining_days, 4);
    assert_eq!(committed.food, Some(FoodIcon::Apple));

    assert!(rig.sink.0.contains(&RackEvent::SlotCommitted {
        slot: slot(2),
        icon: Some(FoodIcon::Apple),
        remaining_days: 4,
    }));

    // The panel saw the whole story: marker on, countdown, icon, marker off.
    let draws = rig.take_draws();
    assert!(draws.contains(&DrawCall::Marker(slot(2))));
    assert!(draws.contains(&DrawCall::Countdown(slot(2), 4)));
    assert!(draws.contains(&DrawCall::Icon(slot(2))));
    assert_eq!(draws.last(), Some(&DrawCall::ClearMarker(slot(2))));
}

#[test]
fn edit_cycle_phase_sequence_is_reported() {
    let mut rig = Rig::new(100_000);
    rig.commit_slot(0.0, 0.5, 0.5);

    let phases: Vec<(Phase, Phase)> = rig
        .sink
        .0
        .iter()
        .filter_map(|e| match e {
            RackEvent::PhaseChanged { from, to } => Some((*from, *to)),
            _ => None,
        })
        .collect();
    assert_eq!(
        phases,
        vec![
            (Phase::Idle, Phase::SelectingSlot),
            (Phase::SelectingSlot, Phase::SettingExpiration),
            (Phase::SettingExpiration, Phase::SettingIcon),
            (Phase::SettingIcon, Phase::Idle),
        ]
    );
}

// ── Scenario: daily countdown and escalation ──────────────────

#[test]
fn slot_counts_down_then_warns_then_expires() {
    let mut rig = Rig::new(20);
    // Slot 0 with 2 remaining days (0.13 of 9 bands → 1+1).
    rig.commit_slot(0.0, 0.13, 0.0);
    assert_eq!(rig.svc.slot(slot(0)).remaining_days, 2);
    rig.take_draws();
    rig.notify.notices.clear();

    // Day 1: 2 → 1, plain countdown redraw, no notice for slot 0.
    rig.run_one_day();
    let draws = rig.take_draws();
    assert!(draws.contains(&DrawCall::Countdown(slot(0), 1)));
    assert!(!draws
        .iter()
        .any(|d| matches!(d, DrawCall::Warning(s, _) if *s == slot(0))));
    assert!(!rig.notify.notices.iter().any(|(s, _)| *s == slot(0)));

    // Day 2: 1 → 0, orange bar plus "expiring tomorrow".
    rig.run_one_day();
    let draws = rig.take_draws();
    assert!(draws.contains(&DrawCall::Warning(slot(0), Warning::Orange)));
    assert!(draws.contains(&DrawCall::Countdown(slot(0), 0)));
    assert!(rig
        .notify
        .notices
        .contains(&(slot(0), NoticeKind::ExpiringTomorrow)));

    // Day 3: already 0, red bar plus "expired today".
    rig.run_one_day();
    let draws = rig.take_draws();
    assert!(draws.contains(&DrawCall::Warning(slot(0), Warning::Red)));
    assert!(rig
        .notify
        .notices
        .contains(&(slot(0), NoticeKind::ExpiredToday)));

    // Day 4: the expired notice repeats daily until reconfigured.
    rig.notify.notices.clear();
    rig.run_one_day();
    assert!(rig
        .notify
        .notices
        .contains(&(slot(0), NoticeKind::ExpiredToday)));
}

#[test]
fn reconfiguring_an_expired_slot_clears_its_warning() {
    let mut rig = Rig::new(10);
    rig.run_one_day(); // everything unset → all red
    rig.take_draws();

    rig.commit_slot(0.2, 0.8, 0.9); // slot 1 gets fresh days
    let draws = rig.take_draws();
    assert!(draws.contains(&DrawCall::ClearWarning(slot(1))));
    assert_eq!(rig.svc.slot(slot(1)).remaining_days, 8);
}

// ── Scenario: rollover is deferred while editing ──────────────

#[test]
fn rollover_waits_for_idle_and_drains_backlog_one_day_per_tick() {
    let mut rig = Rig::new(4);

    // Park in SelectingSlot for three days' worth of ticks.
    rig.tick(0.0, true);
    for _ in 0..12 {
        rig.tick(0.0, true);
    }
    assert_eq!(rig.svc.phase(), Phase::SelectingSlot);
    assert!(
        !rig.sink.0.iter().any(|e| matches!(e, RackEvent::DayElapsed { .. })),
        "no rollover may fire outside Idle"
    );

    // Finish the edit cycle; the final release lands back in Idle.
    rig.tick(0.0, false);
    rig.press_release(0.5);
    rig.press_release(0.5);
    assert_eq!(rig.svc.phase(), Phase::Idle);

    // Each idle tick now drains exactly one backlogged day.
    let days_before = rig
        .sink
        .0
        .iter()
        .filter(|e| matches!(e, RackEvent::DayElapsed { .. }))
        .count();
    rig.tick(0.0, false);
    rig.tick(0.0, false);
    let days_after = rig
        .sink
        .0
        .iter()
        .filter(|e| matches!(e, RackEvent::DayElapsed { .. }))
        .count();
    assert_eq!(days_after - days_before, 2);
}

// ── Scenario: debounce on confirm edges ───────────────────────

#[test]
fn every_confirm_edge_blocks_until_the_level_settles() {
    let mut rig = Rig::new(100_000);
    rig.commit_slot(0.0, 0.5, 0.5);

    // Three presses and three releases, in order, one wait per edge.
    assert_eq!(rig.hw.waits, vec![true, false, true, false, true, false]);
}

#[test]
fn holding_the_button_produces_no_extra_waits() {
    let mut rig = Rig::new(100_000);
    rig.tick(0.0, true);
    rig.tick(0.0, true);
    rig.tick(0.0, true);
    assert_eq!(rig.hw.waits, vec![true]);
}

// ── Scenario: marker tracking while selecting ─────────────────

#[test]
fn moving_the_dial_repaints_the_marker_via_diff() {
    let mut rig = Rig::new(100_000);
    rig.tick(0.05, true); // enter Selecting at slot 0
    rig.take_draws();

    rig.tick(0.9, true); // dial to slot 5
    assert_eq!(
        rig.take_draws(),
        vec![DrawCall::ClearMarker(slot(0)), DrawCall::Marker(slot(5))]
    );

    rig.tick(0.9, true); // dial unchanged: nothing to repaint
    assert!(rig.take_draws().is_empty());
}

#[test]
fn at_most_one_marker_is_ever_lit() {
    let mut rig = Rig::new(100_000);
    rig.tick(0.0, true);
    for norm in [0.3, 0.8, 0.1, 0.99, 0.5, 0.0] {
        rig.tick(norm, true);
    }
    rig.tick(0.0, false); // lock the slot, move on to SettingExpiration

    let mut lit = [false; SlotIndex::COUNT];
    for call in &rig.hw.draws {
        match call {
            DrawCall::Marker(s) => lit[s.index()] = true,
            DrawCall::ClearMarker(s) => lit[s.index()] = false,
            _ => {}
        }
        assert!(lit.iter().filter(|&&l| l).count() <= 1);
    }
    // The locked slot's marker stays lit through the editing phases.
    assert!(lit[0]);
}
