//! End-to-end lifecycle tests: power-up, identification, and steady-state
//! decoding against scripted collaborators.

use keybridge_core::common::layout as uni;
use keybridge_core::common::{Action, Family, HostLeds, KeyPos, KeyboardLeds, PortError, Protocol};
use keybridge_core::keymap;
use keybridge_core::testutil::{MockClock, MockHost, ScriptedPort};
use keybridge_core::{Converter, LifecycleState};

type TestConverter = Converter<ScriptedPort, MockClock, MockHost>;

/// Build an initialized converter around a scripted port and host.
///
/// The clock self-advances 1 ms per reading so the bounded waits inside
/// identification run out on their own.
fn converter(port: ScriptedPort, host: MockHost) -> TestConverter {
    let mut conv = Converter::new(port, MockClock::with_step(1), host, keymap::TRANSPARENT);
    conv.init();
    conv
}

/// Drive the converter through the startup quiet period, leaving it one
/// tick away from running identification.
fn run_startup(conv: &mut TestConverter) {
    conv.scan();
    assert_eq!(conv.state(), LifecycleState::WaitStartup);
    conv.clock().advance(1001);
    conv.scan();
    assert_eq!(conv.state(), LifecycleState::ReadId);
}

/// A port scripted to acknowledge the disable and identify commands.
fn acking_port() -> ScriptedPort {
    let mut port = ScriptedPort::new();
    port.reply_with(Some(0xFA));
    port.reply_with(Some(0xFA));
    port
}

/// Boot an AT/PS-2 keyboard reporting ID `AB 83` all the way into the
/// steady state.
fn boot_ps2(host: MockHost) -> TestConverter {
    let mut conv = converter(acking_port(), host);
    run_startup(&mut conv);
    conv.port_mut().feed(&[0xAB, 0x83]);
    conv.scan();
    conv.scan();
    assert_eq!(conv.state(), LifecycleState::Loop);
    conv
}

#[test]
fn xt_keyboard_is_classified_by_its_silence() {
    // XT boards cannot acknowledge the host, so the identify send fails.
    let mut conv = converter(ScriptedPort::new(), MockHost::new());
    run_startup(&mut conv);
    conv.scan();

    assert_eq!(conv.keyboard_id(), 0xFFFF);
    assert_eq!(conv.family(), Family::Xt);
    assert_eq!(conv.port().protocol(), Some(Protocol::Xt));
    assert_eq!(conv.port().sent(), [0xF5, 0xF2]);

    conv.scan();
    assert_eq!(conv.state(), LifecycleState::Loop);
    // One-way line: the LED command is never issued.
    assert_eq!(conv.port().leds(), None);
}

#[test]
fn ps2_keyboard_is_classified_by_its_id() {
    let host = MockHost::with_leds(HostLeds::NUM_LOCK | HostLeds::CAPS_LOCK);
    let conv = boot_ps2(host);

    assert_eq!(conv.keyboard_id(), 0xAB83);
    assert_eq!(conv.family(), Family::At);
    assert_eq!(conv.port().protocol(), Some(Protocol::At));
    assert_eq!(conv.port().sent(), [0xF5, 0xF2, 0xF4]);
    assert_eq!(
        conv.port().leds(),
        Some(KeyboardLeds::NUM_LOCK | KeyboardLeds::CAPS_LOCK)
    );
}

#[test]
fn terminal_keyboard_is_classified_by_its_id() {
    let mut conv = converter(acking_port(), MockHost::new());
    run_startup(&mut conv);
    conv.port_mut().feed(&[0xBF, 0xBF]);
    conv.scan();

    assert_eq!(conv.keyboard_id(), 0xBFBF);
    assert_eq!(conv.family(), Family::Terminal);
    assert_eq!(conv.port().protocol(), Some(Protocol::At));
}

#[test]
fn silent_at_keyboard_acknowledges_then_says_nothing() {
    let mut conv = converter(acking_port(), MockHost::new());
    run_startup(&mut conv);
    conv.scan();

    assert_eq!(conv.keyboard_id(), 0x0000);
    assert_eq!(conv.family(), Family::At);
    // The exchange was abandoned before the enable command.
    assert_eq!(conv.port().sent(), [0xF5, 0xF2]);
}

#[test]
fn mangled_handshake_still_counts_as_at() {
    let mut port = ScriptedPort::new();
    port.reply_with(Some(0xFA));
    port.reply_with(Some(0xEE));
    let mut conv = converter(port, MockHost::new());
    run_startup(&mut conv);
    conv.scan();

    assert_eq!(conv.keyboard_id(), 0xFFFE);
    assert_eq!(conv.family(), Family::At);
}

#[test]
fn missing_second_id_byte_fills_with_ff() {
    let mut conv = converter(acking_port(), MockHost::new());
    run_startup(&mut conv);
    conv.port_mut().feed(&[0xAB]);
    conv.scan();

    assert_eq!(conv.keyboard_id(), 0xABFF);
    assert_eq!(conv.family(), Family::At);
}

#[test]
fn mice_are_refused() {
    let mut conv = converter(acking_port(), MockHost::new());
    run_startup(&mut conv);
    conv.port_mut().feed(&[0x00, 0xFF]);
    conv.scan();
    conv.scan();

    assert_eq!(conv.keyboard_id(), 0x00FF);
    assert_eq!(conv.family(), Family::None);
    assert_eq!(conv.state(), LifecycleState::Loop);

    // Whatever the mouse sends now is never decoded.
    conv.port_mut().feed(&[0x1C]);
    conv.scan();
    assert_eq!(conv.key_count(), 0);
}

#[test]
fn startup_chatter_does_not_leak_into_the_id() {
    let mut port = acking_port();
    port.feed(&[0xAA]);
    let mut conv = converter(port, MockHost::new());
    run_startup(&mut conv);

    conv.port_mut().feed(&[0xAB, 0x83]);
    conv.scan();
    assert_eq!(conv.keyboard_id(), 0xAB83);
}

#[test]
fn keys_resolve_to_actions_in_the_steady_state() {
    let mut conv = boot_ps2(MockHost::new());

    conv.port_mut().feed(&[0x1C]);
    assert!(conv.scan());
    assert!(conv.is_on(3, 4));
    assert_eq!(conv.key_count(), 1);
    assert_eq!(conv.get_row(3), 1 << 4);

    let action = conv.action_for_key(0, KeyPos::new(3, 4));
    assert_eq!(action, Action(0x0100 | uni::A as u16));
    // Resolution is pure: asking again gives the same answer.
    assert_eq!(conv.action_for_key(0, KeyPos::new(3, 4)), action);

    // Unassigned cells resolve to nothing.
    assert_eq!(conv.action_for_key(0, KeyPos::new(0, 0)), Action::NONE);

    conv.port_mut().feed(&[0xF0, 0x1C]);
    conv.scan();
    assert_eq!(conv.key_count(), 0);
}

#[test]
fn nothing_resolves_before_identification() {
    let mut conv = converter(ScriptedPort::new(), MockHost::new());
    conv.scan();
    assert_eq!(conv.action_for_key(0, KeyPos::new(3, 4)), Action::NONE);
}

#[test]
fn pause_releases_on_the_following_tick() {
    let mut conv = boot_ps2(MockHost::new());

    conv.port_mut().feed(&[0xE1, 0x14, 0x77, 0xE1, 0xF0, 0x14, 0xF0, 0x77]);
    for _ in 0..8 {
        conv.scan();
    }
    assert!(conv.is_on(0xFE >> 3, 0xFE & 7));

    conv.scan();
    assert_eq!(conv.key_count(), 0);
}

#[test]
fn receive_errors_force_reidentification() {
    let mut conv = boot_ps2(MockHost::new());
    conv.port_mut().feed(&[0x1C]);
    conv.scan();
    assert_eq!(conv.key_count(), 1);

    conv.port_mut().raise_error(PortError::PARITY);
    conv.scan();

    assert_eq!(conv.state(), LifecycleState::WaitStartup);
    assert_eq!(conv.family(), Family::None);
    assert_eq!(conv.key_count(), 0);
}

#[test]
fn send_and_overflow_errors_do_not_reinitialize() {
    let mut conv = boot_ps2(MockHost::new());

    conv.port_mut().raise_error(PortError::SEND);
    conv.scan();
    assert_eq!(conv.state(), LifecycleState::Loop);
    assert_eq!(conv.family(), Family::At);

    conv.port_mut().raise_error(PortError::BUFFER_FULL);
    conv.scan();
    assert_eq!(conv.state(), LifecycleState::Loop);
}

#[test]
fn receive_errors_outside_the_loop_do_not_reset_the_lifecycle() {
    let mut conv = converter(ScriptedPort::new(), MockHost::new());
    conv.scan();
    assert_eq!(conv.state(), LifecycleState::WaitStartup);

    conv.port_mut().raise_error(PortError::PARITY);
    conv.scan();
    // Still waiting out the startup quiet period, not restarted.
    assert_eq!(conv.state(), LifecycleState::WaitStartup);
}

#[test]
fn self_test_byte_in_the_stream_forces_reidentification() {
    let mut conv = boot_ps2(MockHost::new());

    conv.port_mut().feed(&[0xAA]);
    conv.scan();
    assert_eq!(conv.state(), LifecycleState::Init);

    conv.scan();
    assert_eq!(conv.state(), LifecycleState::WaitStartup);
    assert_eq!(conv.family(), Family::None);
}
