use super::*;

const IDLE: Duration = Duration::from_millis(1200);

#[test]
fn burst_of_edits_fires_once_after_last_edit() {
    let start = Instant::now();
    let mut scheduler = FormatScheduler::new(IDLE);

    let mut fired = 0;
    for i in 0..10u64 {
        let at = start + Duration::from_millis(i * 100);
        scheduler.arm(at);
        if scheduler.poll(at) {
            fired += 1;
        }
    }
    let last_edit = start + Duration::from_millis(900);
    assert_eq!(scheduler.deadline(), Some(last_edit + IDLE));

    assert!(!scheduler.poll(last_edit + IDLE - Duration::from_millis(1)));
    if scheduler.poll(last_edit + IDLE) {
        fired += 1;
    }
    assert!(!scheduler.poll(last_edit + IDLE * 3));
    assert_eq!(fired, 1);
}

#[test]
fn cancel_drops_pending_deadline() {
    let now = Instant::now();
    let mut scheduler = FormatScheduler::new(IDLE);
    assert!(!scheduler.cancel());

    scheduler.arm(now);
    assert!(scheduler.is_pending());
    assert!(scheduler.cancel());
    assert!(!scheduler.poll(now + IDLE * 2));
}

#[test]
fn idle_scheduler_never_fires() {
    let mut scheduler = FormatScheduler::new(IDLE);
    assert!(!scheduler.poll(Instant::now() + IDLE * 10));
    assert_eq!(scheduler.idle(), IDLE);
}
