use fulfillment_rs::clock::{add_minutes, time_difference};
use fulfillment_rs::sequencer::{EventKind, Journal};
use fulfillment_rs::Scheduler;
use proptest::prelude::*;

#[derive(Debug, Clone)]
enum Step {
    Order { books: u32, electronics: u32 },
    Report(u8),
}

fn step() -> impl Strategy<Value = Step> {
    prop_oneof![
        3 => (0u32..6, 0u32..6).prop_map(|(books, electronics)| Step::Order { books, electronics }),
        1 => (0u8..3).prop_map(Step::Report),
    ]
}

fn hhmm(minutes: u32) -> String {
    format!("{:02}{:02}", minutes / 60, minutes % 60)
}

proptest! {
    #[test]
    fn prop_add_minutes_wraps_modulo_a_day(start in 0u32..1440, delta in 0u32..5000) {
        let shifted = add_minutes(&hhmm(start), delta).unwrap();
        prop_assert_eq!(shifted, hhmm((start + delta) % 1440));
    }

    #[test]
    fn prop_time_difference_is_symmetric(a in 0u32..1440, b in 0u32..1440) {
        let ab = time_difference(&hhmm(a), &hhmm(b)).unwrap();
        let ba = time_difference(&hhmm(b), &hhmm(a)).unwrap();
        prop_assert_eq!(ab, ba);
        prop_assert_eq!(ab, a.abs_diff(b));
    }

    #[test]
    fn prop_scheduler_invariants_hold(
        steps in prop::collection::vec((0u32..4, step()), 1..60),
    ) {
        let mut scheduler = Scheduler::default();
        let roster = scheduler.pool().roster().len();
        let mut now = 8 * 60;
        let mut orders = 0usize;

        for (i, (advance, step)) in steps.into_iter().enumerate() {
            now += advance;
            let line = match step {
                Step::Order { books, electronics } => {
                    orders += 1;
                    format!("CustomerOrder {} C{i} {books} {electronics}", hhmm(now))
                }
                Step::Report(0) => format!("PrintAvailableWorkerList {}", hhmm(now)),
                Step::Report(1) => format!("PrintWorkerAssignmentList {}", hhmm(now)),
                Step::Report(_) => format!("PrintMaxFulfillmentTime {}", hhmm(now)),
            };
            prop_assert!(scheduler.execute_line(&line).is_success());

            let bundles = scheduler.bundles().open_bundles();
            let mut workers: Vec<&str> = bundles.iter().map(|b| b.worker()).collect();
            workers.sort_unstable();
            workers.dedup();
            prop_assert_eq!(workers.len(), bundles.len());
            prop_assert_eq!(scheduler.pool().available_count() + bundles.len(), roster);

            let rules = *scheduler.bundles().rules();
            for bundle in bundles {
                prop_assert!(bundle.total_items() <= rules.capacity);
                let first = &bundle.orders()[0];
                for order in bundle.orders() {
                    prop_assert!(first.arrival_time.difference(order.arrival_time) <= rules.window_minutes);
                    prop_assert_eq!(order.profile(), first.profile());
                }
            }
        }

        scheduler.finish();
        prop_assert!(scheduler.bundles().is_idle());
        prop_assert_eq!(scheduler.pool().available_count(), roster);

        let served: usize = scheduler
            .journal()
            .of_kind(EventKind::OrderCompletion)
            .map(|e| e.payload.split(',').count())
            .sum();
        prop_assert_eq!(served, orders);

        let events = scheduler.journal().chronological();
        for pair in events.windows(2) {
            prop_assert!(pair[0].time <= pair[1].time);
        }
    }
}
