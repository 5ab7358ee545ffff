mod common;

use std::sync::Arc;

use futures::executor::block_on;
use media_recorder_core::{
    classify, CapabilityNegotiator, DeviceCapability, MediaKind, PermissionOutcome, RecorderError,
};
use media_recorder_sim::{Consent, SimulatedEnvironment};

use common::init_logging;

fn negotiator(env: &Arc<SimulatedEnvironment>) -> CapabilityNegotiator<SimulatedEnvironment> {
    init_logging();
    CapabilityNegotiator::new(Arc::clone(env))
}

#[test]
fn granted_devices_report_their_ids() {
    let env = Arc::new(SimulatedEnvironment::with_default_devices());
    let pair = block_on(negotiator(&env).negotiate());

    assert_eq!(pair.audio, DeviceCapability::granted("builtin-mic"));
    assert_eq!(pair.video, DeviceCapability::granted("builtin-cam"));
    assert_eq!(classify(&pair), PermissionOutcome::Granted);
}

#[test]
fn both_kinds_are_probed_and_released() {
    let env = Arc::new(SimulatedEnvironment::with_default_devices());
    block_on(negotiator(&env).negotiate());

    let requests = env.requests();
    assert_eq!(requests.len(), 2);
    assert!(requests.iter().any(|c| c.enabled_kinds() == vec![MediaKind::Audio]));
    assert!(requests.iter().any(|c| c.enabled_kinds() == vec![MediaKind::Video]));
    assert!(env.streams().iter().all(|s| s.is_stopped()));
}

#[test]
fn denied_microphone_with_camera_blocks_recording() {
    let env = Arc::new(SimulatedEnvironment::with_default_devices());
    env.set_consent(MediaKind::Audio, Consent::Denied);

    let pair = block_on(negotiator(&env).negotiate());
    assert_eq!(pair.audio, DeviceCapability::denied());
    assert_eq!(classify(&pair), PermissionOutcome::VideoOnlyNoAudio);

    let err = block_on(negotiator(&env).negotiate_and_classify()).unwrap_err();
    assert_eq!(err, RecorderError::VideoOnlyNoAudio);
    assert!(err.is_negotiation_failure());
}

#[test]
fn no_hardware_at_all() {
    let env = Arc::new(SimulatedEnvironment::new());
    let err = block_on(negotiator(&env).negotiate_and_classify()).unwrap_err();
    assert_eq!(err, RecorderError::NoDeviceAtAll);
}

#[test]
fn both_denied() {
    let env = Arc::new(SimulatedEnvironment::with_default_devices());
    env.set_consent(MediaKind::Audio, Consent::Denied);
    env.set_consent(MediaKind::Video, Consent::Denied);

    let err = block_on(negotiator(&env).negotiate_and_classify()).unwrap_err();
    assert_eq!(err, RecorderError::NoPermissionForEither);
}

#[test]
fn audio_only_machine_is_granted_without_video() {
    let env = Arc::new(SimulatedEnvironment::new());
    env.add_device(MediaKind::Audio, "headset", "Headset Microphone");

    let negotiated = block_on(negotiator(&env).negotiate_and_classify()).unwrap();
    assert!(negotiated.usable_audio);
    assert!(!negotiated.usable_video);
    assert_eq!(negotiated.pair.video, DeviceCapability::absent());
}

#[test]
fn denied_camera_still_grants_audio() {
    let env = Arc::new(SimulatedEnvironment::with_default_devices());
    env.set_consent(MediaKind::Video, Consent::Denied);

    let negotiated = block_on(negotiator(&env).negotiate_and_classify()).unwrap();
    assert!(negotiated.usable_audio);
    assert!(!negotiated.usable_video);
}

#[test]
fn selectable_devices_cover_usable_kinds_and_mark_negotiated() {
    let env = Arc::new(SimulatedEnvironment::with_default_devices());
    env.set_consent(MediaKind::Video, Consent::Denied);
    let negotiator = negotiator(&env);
    let pair = block_on(negotiator.negotiate());

    let devices = block_on(negotiator.selectable_devices(&pair)).unwrap();
    let listed: Vec<(&str, bool)> = devices
        .iter()
        .map(|d| (d.device.device_id.as_str(), d.selected))
        .collect();
    assert_eq!(listed, vec![("builtin-mic", true), ("usb-mic", false)]);
}
