/// Epoch boundary calculation for the first staking year
///
/// The schedule starts at the next full hour after the reference block
/// time and runs four back-to-back quarters of 91, 92, 91 and 91 days.

use staking_types::{DeployResult, EpochSchedule, Quarter, StakeDeployError, SECONDS_PER_HOUR, SECONDS_PER_MINUTE};

/// Seconds from `timestamp` to the next hour boundary, in `1..=3600`.
///
/// A timestamp that is already on the hour yields a full hour, never zero.
pub fn seconds_until_next_hour(timestamp: u64) -> u64 {
    let seconds = timestamp % SECONDS_PER_MINUTE;
    let minutes = (timestamp / SECONDS_PER_MINUTE) % 60;
    SECONDS_PER_HOUR - seconds - minutes * SECONDS_PER_MINUTE
}

/// Derive the quarterly schedule from the latest block timestamp.
///
/// Fails only when the year would run past `u64::MAX` seconds.
pub fn compute_epoch_schedule(reference_timestamp: u64) -> DeployResult<EpochSchedule> {
    let out_of_range = || {
        StakeDeployError::invalid_config(
            "reference_timestamp",
            &format!("{} leaves no room for a full staking year", reference_timestamp),
        )
    };

    let start_time = reference_timestamp
        .checked_add(seconds_until_next_hour(reference_timestamp))
        .ok_or_else(out_of_range)?;

    let mut quarter_ends = [0u64; 4];
    let mut boundary = start_time;
    for quarter in Quarter::ALL {
        boundary = boundary.checked_add(quarter.length_secs()).ok_or_else(out_of_range)?;
        quarter_ends[quarter.position()] = boundary;
    }

    Ok(EpochSchedule {
        start_time,
        quarter_ends,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use staking_types::{FISCAL_YEAR_DAYS, SECONDS_PER_DAY};

    #[test]
    fn test_reference_block_rounds_up_to_next_hour() {
        // Tue Nov 14 2023 22:13:20 UTC
        let schedule = compute_epoch_schedule(1_700_000_000).unwrap();

        // 23:00:00 UTC
        assert_eq!(schedule.start_time, 1_700_002_800);
        assert_eq!(schedule.end_of(Quarter::Q1), 1_707_865_200);
        assert_eq!(schedule.end_of(Quarter::Q1), schedule.start_time + 91 * SECONDS_PER_DAY);
        assert_eq!(schedule.end_of(Quarter::Q2), 1_715_814_000);
        assert_eq!(schedule.end_of(Quarter::Q3), 1_723_676_400);
        assert_eq!(schedule.end_of(Quarter::Q4), 1_731_538_800);
    }

    #[test]
    fn test_exact_hour_adds_a_full_hour() {
        let on_the_hour = 1_700_002_800;
        assert_eq!(seconds_until_next_hour(on_the_hour), 3_600);
        assert_eq!(compute_epoch_schedule(on_the_hour).unwrap().start_time, on_the_hour + 3_600);
    }

    #[test]
    fn test_one_second_before_the_hour() {
        assert_eq!(seconds_until_next_hour(1_700_002_799), 1);
        assert_eq!(seconds_until_next_hour(0), 3_600);
    }

    #[test]
    fn test_reference_near_u64_max_is_rejected() {
        assert!(matches!(
            compute_epoch_schedule(u64::MAX - 10),
            Err(StakeDeployError::InvalidConfiguration { .. })
        ));

        // Start fits but Q4 end does not
        assert!(compute_epoch_schedule(u64::MAX - 100 * SECONDS_PER_DAY).is_err());

        let last_ok = u64::MAX - FISCAL_YEAR_DAYS * SECONDS_PER_DAY - 2 * SECONDS_PER_HOUR;
        assert!(compute_epoch_schedule(last_ok).is_ok());
    }

    proptest! {
        #[test]
        fn prop_start_is_next_hour_boundary(reference in 0u64..10_000_000_000u64) {
            let schedule = compute_epoch_schedule(reference).unwrap();
            let lead = schedule.start_time - reference;
            prop_assert!(lead > 0 && lead <= 3_600);
            prop_assert_eq!(schedule.start_time % 3_600, 0);
        }

        #[test]
        fn prop_quarter_gaps_are_fixed(reference in 0u64..10_000_000_000u64) {
            let schedule = compute_epoch_schedule(reference).unwrap();
            let mut previous = schedule.start_time;
            for (quarter, days) in Quarter::ALL.iter().zip([91u64, 92, 91, 91]) {
                let end = schedule.end_of(*quarter);
                prop_assert!(end > previous);
                prop_assert_eq!(end - previous, days * SECONDS_PER_DAY);
                previous = end;
            }
            prop_assert_eq!(schedule.end_time() - schedule.start_time, FISCAL_YEAR_DAYS * SECONDS_PER_DAY);
        }
    }
}
