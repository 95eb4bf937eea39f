use layerkit_core::{BuildPlate, CancellationToken, PlateSize};
use std::thread;

#[test]
fn test_plate_size_reports_dimensions() {
    let plate = PlateSize::new(235.0, 220.0);
    assert_eq!(plate.build_plate_size(), (235.0, 220.0));

    let by_ref: &dyn BuildPlate = &plate;
    assert_eq!(by_ref.build_plate_size(), (235.0, 220.0));
}

#[test]
fn test_cancellation_crosses_threads() {
    let token = CancellationToken::new();
    let remote = token.clone();

    thread::spawn(move || remote.cancel())
        .join()
        .expect("cancel thread panicked");

    assert!(token.is_cancelled());
}
