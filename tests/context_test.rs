use flow_orrery::context::PRESENT_MODE;

// Bodies advance a fixed angle per frame, an uncapped present mode would
// make them race.
#[test]
fn frames_are_paced_to_the_display() {
    assert_eq!(PRESENT_MODE, wgpu::PresentMode::AutoVsync);
}
