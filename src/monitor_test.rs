use super::*;

#[test]
fn starts_with_initial_appearance() {
    let monitor = SystemAppearanceMonitor::new(Appearance::Dark);
    assert_eq!(monitor.current(), Appearance::Dark);
}

#[test]
fn set_reports_whether_value_changed() {
    let monitor = SystemAppearanceMonitor::new(Appearance::Light);
    assert!(!monitor.set(Appearance::Light));
    assert!(monitor.set(Appearance::Dark));
    assert_eq!(monitor.current(), Appearance::Dark);
}

#[test]
fn subscribers_see_live_value() {
    let monitor = SystemAppearanceMonitor::default();
    let rx = monitor.subscribe();
    monitor.set(Appearance::Dark);
    assert_eq!(*rx.borrow(), Appearance::Dark);
}

#[tokio::test]
async fn subscribers_are_notified_on_change() {
    let monitor = SystemAppearanceMonitor::new(Appearance::Light);
    let mut rx = monitor.subscribe();

    monitor.set(Appearance::Dark);

    rx.changed().await.expect("sender alive");
    assert_eq!(*rx.borrow_and_update(), Appearance::Dark);
}

#[test]
fn unchanged_set_does_not_notify() {
    let monitor = SystemAppearanceMonitor::new(Appearance::Light);
    let rx = monitor.subscribe();

    monitor.set(Appearance::Light);

    assert!(!rx.has_changed().expect("sender alive"));
}
