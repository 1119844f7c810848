//! Property tests for the Domain Builder's start-slot enumeration, covering
//! alignment and day containment, run over synthetically generated
//! `(length_subslots, days, periods_per_day, base_slot_minutes)` tuples.

use proptest::prelude::*;
use timetable_scheduler::scheduler::domain::start_domain;
use timetable_scheduler::types::ScheduleConfig;

fn arb_config() -> impl Strategy<Value = ScheduleConfig> {
    (1u32..=5, 1u32..=8, prop_oneof![Just(45u32), Just(15u32), Just(30u32)]).prop_map(
        |(days, periods_per_day, base_slot_minutes)| ScheduleConfig {
            days,
            periods_per_day,
            base_slot_minutes,
            ..ScheduleConfig::default()
        },
    )
}

proptest! {
    #[test]
    fn every_start_respects_day_containment(
        config in arb_config(),
        length_subslots in 1u32..=6,
    ) {
        let subslots_per_day = config.subslots_per_day();
        prop_assume!(length_subslots <= subslots_per_day);

        for (start, day) in start_domain(length_subslots, &config) {
            let end = start + length_subslots - 1;
            prop_assert_eq!(day, start / subslots_per_day);
            prop_assert_eq!(day, end / subslots_per_day);
        }
    }

    #[test]
    fn long_sessions_only_start_on_even_subslots(
        config in arb_config(),
        length_subslots in 2u32..=6,
    ) {
        for (start, _day) in start_domain(length_subslots, &config) {
            prop_assert_eq!(start % 2, 0);
        }
    }

    #[test]
    fn single_subslot_sessions_may_start_anywhere(
        config in arb_config(),
    ) {
        let pairs = start_domain(1, &config);
        prop_assert_eq!(pairs.len() as u32, config.total_subslots());
    }

    #[test]
    fn day_is_always_derivable_from_start(
        config in arb_config(),
        length_subslots in 1u32..=6,
    ) {
        for (start, day) in start_domain(length_subslots, &config) {
            prop_assert_eq!(day, start / config.subslots_per_day());
        }
    }
}
